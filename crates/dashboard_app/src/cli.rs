//! Command-line parsing and the startup configuration derived from it.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dashboard_core::{ArticleId, CoreSettings};
use dashboard_engine::{ApiSettings, DEFAULT_API_URL};
use dashboard_logging::{LevelFilter, LogDestination, LogSettings, DEFAULT_LOG_FILE};
use url::Url;

#[derive(Debug, Parser)]
#[command(
    name = "news-dashboard",
    version,
    about = "Lists news articles and triggers rewrites on the articles backend"
)]
pub struct Cli {
    /// Base URL of the articles API.
    #[arg(
        long,
        env = "NEWS_DASHBOARD_API_URL",
        default_value = DEFAULT_API_URL,
        value_parser = parse_base_url
    )]
    pub api_url: Url,

    /// TCP connect timeout in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub connect_timeout_ms: u64,

    /// Whole-request timeout in milliseconds.
    #[arg(long, default_value_t = 30_000)]
    pub request_timeout_ms: u64,

    /// Fill empty article bodies with default content after the first load.
    #[arg(long)]
    pub backfill: bool,

    /// Replace local content with a placeholder once a rewrite is acknowledged.
    #[arg(long)]
    pub overwrite_content_on_select: bool,

    /// Maximum log level (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,

    /// File that receives log output.
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Also log to the terminal.
    #[arg(long)]
    pub log_to_terminal: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive dashboard driven by stdin commands (default).
    Watch,
    /// Print the article list once and exit.
    List,
    /// Trigger a rewrite for one article and wait for it to settle.
    Rewrite {
        /// Article identifier as listed by the backend.
        id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Watch,
    List,
    Rewrite { article_id: ArticleId },
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    pub core: CoreSettings,
    pub log: LogSettings,
    pub mode: RunMode,
}

impl Cli {
    pub fn into_config(self) -> DashboardConfig {
        let destination = if self.log_to_terminal {
            LogDestination::Both(self.log_file)
        } else {
            LogDestination::File(self.log_file)
        };
        let mode = match self.command.unwrap_or(Command::Watch) {
            Command::Watch => RunMode::Watch,
            Command::List => RunMode::List,
            Command::Rewrite { id } => RunMode::Rewrite {
                article_id: ArticleId::new(id),
            },
        };

        DashboardConfig {
            api: ApiSettings {
                base_url: self.api_url.to_string(),
                connect_timeout: Duration::from_millis(self.connect_timeout_ms),
                request_timeout: Duration::from_millis(self.request_timeout_ms),
            },
            core: CoreSettings {
                backfill_missing_content: self.backfill,
                overwrite_content_on_select: self.overwrite_content_on_select,
            },
            log: LogSettings {
                level: self.log_level,
                destination,
            },
            mode,
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|err| format!("invalid URL {raw:?}: {err}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme {other:?}, expected http or https")),
    }
}
