use anyhow::Result;
use clap::Parser;
use shop_widget::{cli::{Args, CliApp}, utils::Config};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env()?.with_catalog_path(args.config.clone());

    let level = if args.verbose { "debug" } else { config.log_level.as_str() };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("🛒 Shop widget starting...");

    let mut app = CliApp::new(config).map_err(|e| {
        tracing::error!("Failed to start: {:#}", e);
        e
    })?;
    app.run(args.command).await?;

    tracing::info!("🛒 Shop widget stopped");
    Ok(())
}
