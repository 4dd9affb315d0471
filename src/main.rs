use chrono::Local;
use clap::Parser;
use fara::{
    config::{Cli, Config},
    info_time,
    process::process_site,
    Result,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the feed can be piped from stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let start_time = Local::now();
    let config = Config::from(Cli::parse());
    process_site(&config).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
