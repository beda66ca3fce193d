//! Database seeding utilities.

use lungdb::models::{LUNG_CANCER_TABLE, LungCancerRecord};
use sqlx::PgPool;
use sqlx::types::Json;
use thiserror::Error;
use tracing::info;

use crate::dataset::target_columns;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Builds the bulk insert for the dataset table.
///
/// Rows arrive as one JSON array bound to `$1`, so the statement size does
/// not grow with the dataset and the bind-parameter limit never applies.
fn bulk_insert_sql() -> String {
    let columns = target_columns().collect::<Vec<_>>().join(", ");
    format!(
        "INSERT INTO {LUNG_CANCER_TABLE} ({columns}) \
         SELECT {columns} FROM jsonb_populate_recordset(NULL::{LUNG_CANCER_TABLE}, $1)"
    )
}

/// Database seeder for the lung cancer dataset.
pub struct Seeder {
    pool: PgPool,
}

impl Seeder {
    /// Creates a new seeder with the given database pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the dataset table if it does not exist yet.
    pub async fn run_migrations(&self) -> Result<(), SeedError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Migrations applied");
        Ok(())
    }

    /// Inserts every record in one statement and returns the inserted count.
    ///
    /// Either all rows land or none do; errors are returned unchanged.
    pub async fn seed_records(&self, records: &[LungCancerRecord]) -> Result<u64, SeedError> {
        info!("Inserting {} rows into {LUNG_CANCER_TABLE}...", records.len());

        let result = sqlx::query(&bulk_insert_sql())
            .bind(Json(records))
            .execute(&self.pool)
            .await?;

        info!("Inserted {} rows", result.rows_affected());
        Ok(result.rows_affected())
    }
}
