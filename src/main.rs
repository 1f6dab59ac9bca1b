use mimalloc::MiMalloc;
use patchfetch::config::AppConfig;
use patchfetch::services::pipeline;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Example CVE that usually carries a direct commit link.
const CVE_ID: &str = "CVE-2024-32002";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries the progress lines, structured logs go to stderr.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "patchfetch=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(cve_id = CVE_ID, db_path = %config.db_path, "Starting patch fetch");

    pipeline::run(&config, CVE_ID).await?;

    Ok(())
}
