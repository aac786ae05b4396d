use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use prayer_slots::config::{Settings, DEFAULT_SITE_URL};
use prayer_slots::display::{print_roster, write_roster_to_file};
use prayer_slots::export::export_roster_to_csv;
use prayer_slots::feed::{load_rows_from_path, FeedLoader, DEFAULT_SHEET_URL};
use prayer_slots::report::{search_slots, Summary};
use prayer_slots::schedule::{assign_slots, Assignment};
use prayer_slots::sitemap::write_site_files;
use prayer_slots::web;

#[derive(Parser)]
#[command(name = "prayer-slots")]
#[command(version)]
#[command(about = "Assigns prayer chain sign-ups to hourly slots")]
struct Cli {
    /// CSV export URL of the sign-up sheet
    #[arg(long, env = "SHEET_URL", default_value = DEFAULT_SHEET_URL)]
    sheet_url: String,

    /// Public URL of the site (sitemap and robots.txt)
    #[arg(long, env = "SITE_URL", default_value = DEFAULT_SITE_URL)]
    site_url: String,

    /// Timeout for fetching the sheet, in seconds
    #[arg(long, env = "FEED_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web dashboard and API
    Serve {
        /// Address to bind to
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
        bind: String,

        /// Port to listen on
        #[arg(long, env = "PORT", default_value = "8080")]
        port: u16,

        /// Directory served under /static
        #[arg(long, env = "STATIC_DIR", default_value = "static")]
        static_dir: PathBuf,
    },
    /// Print the roster to the console
    Show {
        /// Read a local CSV export instead of fetching the sheet
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Only show slots with a matching name or surname
        #[arg(long)]
        search: Option<String>,
    },
    /// Write the roster to a file
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file
        #[arg(long, short)]
        output: PathBuf,

        /// Read a local CSV export instead of fetching the sheet
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Only export slots with a matching name or surname
        #[arg(long)]
        search: Option<String>,
    },
    /// Write sitemap.xml and robots.txt
    Sitemap {
        /// Output directory
        #[arg(long, default_value = "public")]
        out_dir: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Text,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Loads rows from a local file when given, otherwise from the sheet
async fn load_assignment(settings: &Settings, csv: Option<&PathBuf>) -> Result<Assignment> {
    let rows = match csv {
        Some(path) => load_rows_from_path(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => FeedLoader::new(&settings.sheet_url, settings.feed_timeout)?
            .fetch_rows()
            .await
            .context("Failed to fetch sign-up sheet")?,
    };
    info!(rows = rows.len(), "loaded sign-ups");
    Ok(assign_slots(&rows))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut settings = Settings {
        sheet_url: cli.sheet_url,
        site_url: cli.site_url,
        feed_timeout: Duration::from_secs(cli.timeout_secs),
        ..Settings::default()
    };

    match cli.command {
        Commands::Serve { bind, port, static_dir } => {
            settings.static_dir = static_dir;
            println!("Access the site at http://localhost:{}", port);
            web::start_server(&bind, port, settings).await?;
        }
        Commands::Show { csv, search } => {
            let assignment = load_assignment(&settings, csv.as_ref()).await?;
            let slots = search_slots(&assignment.slots, search.as_deref().unwrap_or(""));
            print_roster("Prayer Slots", &slots, &Summary::from_assignment(&assignment));
        }
        Commands::Export { format, output, csv, search } => {
            let assignment = load_assignment(&settings, csv.as_ref()).await?;
            let slots = search_slots(&assignment.slots, search.as_deref().unwrap_or(""));
            match format {
                ExportFormat::Csv => export_roster_to_csv(&slots, &output)?,
                ExportFormat::Text => write_roster_to_file("Prayer Slots", &slots, &output)?,
            }
            println!("Roster saved to {}", output.display());
        }
        Commands::Sitemap { out_dir } => {
            write_site_files(&out_dir, &settings.site_url)
                .with_context(|| format!("Failed to write site files to {}", out_dir.display()))?;
            println!("Sitemap generated in {}", out_dir.display());
        }
    }

    Ok(())
}
