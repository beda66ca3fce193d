use std::io;

use clap::Parser;
use lungdb::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let config = RunnerConfig::parse();

    let records = load_queries(&config.queries_file)?;
    if records.is_empty() {
        println!(
            "No queries found in {} or invalid format.",
            config.queries_file.display()
        );
        return Ok(());
    }
    tracing::info!(
        "Loaded {} queries from {}",
        records.len(),
        config.queries_file.display()
    );

    if config.list {
        lungdb::executor::write_listing(io::stdout().lock(), &records)?;
        return Ok(());
    }

    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Connected to database");

    let summary = QueryExecutor::stdout(&db).run_all(&records).await;
    db.close().await;

    let summary = summary?;
    if summary.failed > 0 {
        tracing::warn!("{} of {} queries failed", summary.failed, summary.total());
    }

    Ok(())
}
