use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use wellness_tracker::{cli::Cli, config::Settings, error::ServiceResult, handler};

fn main() -> ServiceResult<()> {
    let cli = Cli::parse();

    let settings = cli
        .global
        .settings
        .clone()
        .or_else(Settings::default_path)
        .map(|path| Settings::load_from(&path))
        .unwrap_or_default();

    let level = cli
        .global
        .log_level
        .clone()
        .unwrap_or_else(|| settings.log_level.clone());
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = handler::run(cli, settings) {
        eprintln!("{} {err}", "error:".red().bold());
        std::process::exit(1);
    }
    Ok(())
}
