//! Seed script - loads the lung cancer dataset into lung_cancer_data
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed -- --migrate
//! ```

use anyhow::Context;
use clap::Parser;
use seed_data::prelude::*;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::parse();

    let records = DatasetLoader::load_file(&config.csv_path)?;
    tracing::info!("Transformed {} rows", records.len());

    if config.dry_run {
        tracing::info!("Dry run, nothing inserted");
        return Ok(());
    }

    let inserted = match config.target {
        SeedTarget::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(1)
                .connect(&config.database_url)
                .await?;
            tracing::info!("Connected to database");

            let seeder = Seeder::new(pool.clone());
            let result = async {
                if config.migrate {
                    seeder.run_migrations().await?;
                }
                seeder.seed_records(&records).await
            }
            .await;
            pool.close().await;

            result?
        }
        SeedTarget::Rest => {
            let url = config
                .supabase_url
                .as_deref()
                .context("SUPABASE_URL is required for the rest target")?;
            let key = config
                .supabase_key
                .as_deref()
                .context("SUPABASE_KEY is required for the rest target")?;
            if config.migrate {
                tracing::warn!("--migrate only applies to the postgres target");
            }

            let seeder = ApiSeeder::new(url, key);
            seeder.check_health().await?;
            seeder.insert_records(&records).await?
        }
    };

    tracing::info!("Data successfully inserted: {inserted} rows into {LUNG_CANCER_TABLE}");

    Ok(())
}
