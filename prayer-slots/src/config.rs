use std::path::PathBuf;
use std::time::Duration;

use crate::feed::DEFAULT_SHEET_URL;

pub const DEFAULT_SITE_URL: &str = "https://prayer-slots.techbk.dev";

/// Runtime settings shared by the CLI and the web server
#[derive(Debug, Clone)]
pub struct Settings {
    pub sheet_url: String,
    pub site_url: String,
    pub feed_timeout: Duration,
    pub static_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            sheet_url: DEFAULT_SHEET_URL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            feed_timeout: Duration::from_secs(30),
            static_dir: PathBuf::from("static"),
        }
    }
}
