//! Print a summary of the most recently stored patch record.
//!
//! Usage: `cargo run --bin check_db`
//!
//! Reads `DB_PATH` (default `patches.db`, honours .env).

use patchfetch::config::AppConfig;
use patchfetch::{db, services::patch};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let pool = db::open_store(&config.db_path).await?;

    let latest = patch::latest(&pool).await;
    let total = patch::count(&pool).await;
    pool.close().await;

    match latest? {
        Some(summary) => println!("{summary}"),
        None => println!("No patches stored in {}", config.db_path),
    }
    println!("Total records: {}", total?);

    Ok(())
}
