//! Configuration for seeding runs.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use lungdb::config::DEFAULT_DATABASE_URL;

use crate::dataset::DEFAULT_CSV_PATH;

/// Where the transformed rows are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SeedTarget {
    /// Direct connection with `DATABASE_URL`.
    #[default]
    Postgres,
    /// Hosted REST endpoint with `SUPABASE_URL` and `SUPABASE_KEY`.
    Rest,
}

/// Configuration for seeding operations.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed",
    about = "Load the lung cancer CSV and bulk-insert it into lung_cancer_data"
)]
pub struct SeedConfig {
    /// Dataset to load.
    #[arg(long = "csv", env = "SEED_CSV_PATH", default_value = DEFAULT_CSV_PATH)]
    pub csv_path: PathBuf,

    /// Destination of the bulk insert.
    #[arg(long, value_enum, default_value_t = SeedTarget::Postgres)]
    pub target: SeedTarget,

    /// Postgres connection string for the `postgres` target.
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Project URL for the `rest` target.
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    /// API key for the `rest` target.
    #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
    pub supabase_key: Option<String>,

    /// Create the table from the bundled migrations before inserting.
    #[arg(long)]
    pub migrate: bool,

    /// Load and transform the dataset without inserting it.
    #[arg(long)]
    pub dry_run: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            target: SeedTarget::default(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            supabase_url: None,
            supabase_key: None,
            migrate: false,
            dry_run: false,
        }
    }
}
