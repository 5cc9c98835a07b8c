use guild_snapshot::{bot, config::Config, error::SnapshotError, output};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), SnapshotError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let snapshot = bot::start::run_snapshot(&config).await?;

    output::write_snapshot(&config.output_path, &snapshot, config.pretty).await?;

    Ok(())
}
