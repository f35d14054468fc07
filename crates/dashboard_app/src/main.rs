mod cli;
mod platform;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = cli.into_config();

    if !dashboard_logging::initialize(&config.log) {
        eprintln!("Warning: logging is disabled");
    }

    platform::run_app(config)
}
