//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `site_archiver` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use site_archiver::config::DEFAULT_USER_AGENT;
use site_archiver::initialization::init_logger_with;
use site_archiver::{
    bind_file_server, resolve_port, run_fetch, ArchiveStore, Config, LogFormat, LogLevel,
};

/// Fetch websites, archive them as `<hostname>.html`, and optionally serve them.
#[derive(Debug, Parser)]
#[command(name = "site_archiver", version, about)]
struct Cli {
    /// Sites to fetch (URLs or bare hostnames; `https://` is assumed)
    #[arg(value_name = "SITE", required_unless_present = "serve")]
    targets: Vec<String>,

    /// Count links and images and print a summary for each page
    #[arg(long)]
    metadata: bool,

    /// Serve archived pages over HTTP after fetching
    #[arg(long)]
    serve: bool,

    /// Server port (default: $SITE_ARCHIVER_PORT, $PORT, $HTTP_PORT, then 3000)
    #[arg(long)]
    port: Option<u16>,

    /// Directory archived pages are written to and served from
    #[arg(long, value_name = "DIR", default_value = ".")]
    archive_dir: PathBuf,

    /// HTTP User-Agent header
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            targets: cli.targets,
            show_metadata: cli.metadata,
            start_server: cli.serve,
            port: cli.port,
            archive_dir: cli.archive_dir,
            user_agent: cli.user_agent,
            log_level: cli.log_level,
            log_format: cli.log_format,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Port overrides may live in a .env file
    let _ = dotenvy::dotenv();

    let config = Config::from(Cli::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if !config.targets.is_empty() {
        match run_fetch(config.clone()).await {
            Ok(report) => {
                if report.failed() > 0 {
                    eprintln!(
                        "{} of {} site{} could not be archived",
                        report.failed(),
                        report.total(),
                        if report.total() == 1 { "" } else { "s" }
                    );
                }
            }
            Err(e) => {
                eprintln!("site_archiver error: {:#}", e);
                process::exit(1);
            }
        }
    }

    if config.start_server {
        let port = resolve_port(config.port, |key| std::env::var(key).ok());
        let server = match bind_file_server(port, ArchiveStore::new(&config.archive_dir)).await {
            Ok(server) => server,
            Err(e) => {
                eprintln!("site_archiver error: {}", e);
                process::exit(1);
            }
        };
        server.serve().await.context("File server stopped")?;
    }

    Ok(())
}
