use std::path::Path;
use std::time::Duration;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::error::FeedError;
use crate::schedule::RawRow;

/// Public CSV export of the prayer chain sign-up sheet
pub const DEFAULT_SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1vqwzrBAHDM0xze2IvHDFchy5wq2cCwdGKSUztaxzu7Q/gviz/tq?tqx=out:csv&gid=2103911492";

/// Fetches the sign-up sheet and turns it into rows
#[derive(Clone)]
pub struct FeedLoader {
    client: reqwest::Client,
    url: String,
}

impl FeedLoader {
    /// Creates a loader for `url`. The timeout applies to the whole request.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Downloads the sheet once. No caching and no retry.
    pub async fn fetch_rows(&self) -> Result<Vec<RawRow>, FeedError> {
        debug!(url = %self.url, "fetching sheet");
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.text().await?;
        let rows = parse_rows(&body)?;
        info!(rows = rows.len(), "loaded sheet");
        Ok(rows)
    }
}

/// Parses CSV text with a header row into column -> value maps.
/// Records shorter than the header only carry the columns they have.
pub fn parse_rows(csv_text: &str) -> Result<Vec<RawRow>, csv::Error> {
    let reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(csv_text.as_bytes());
    read_rows(reader)
}

/// Loads rows from a CSV file on disk (an exported copy of the sheet)
pub fn load_rows_from_path<P: AsRef<Path>>(csv_path: P) -> Result<Vec<RawRow>, FeedError> {
    let reader = ReaderBuilder::new().flexible(true).from_path(csv_path)?;
    Ok(read_rows(reader)?)
}

fn read_rows<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<RawRow>, csv::Error> {
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
