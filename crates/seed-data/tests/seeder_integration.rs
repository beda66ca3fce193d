//! Integration tests for the Postgres bulk insert.
//!
//! To run these tests, you need:
//! 1. A PostgreSQL database the tests may create `lung_cancer_data` in
//! 2. DATABASE_URL environment variable set
//!
//! Run with: `DATABASE_URL=postgres://... cargo nextest run -p seed-data seeder`
//!
//! Note: the seeded rows are deleted again at the end of the test, so it
//! can safely run against a development database.

use std::env;
use std::path::PathBuf;

use seed_data::prelude::*;
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Get database pool, skipping tests if DATABASE_URL is not set.
async fn get_test_pool() -> Option<PgPool> {
    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: DATABASE_URL not set");
            return None;
        }
    };

    match PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
    {
        Ok(pool) => Some(pool),
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            None
        }
    }
}

fn sample_records() -> Vec<LungCancerRecord> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/lung_cancer_sample.csv");
    DatasetLoader::load_file(path).expect("Failed to load sample dataset")
}

#[tokio::test]
async fn test_migrate_and_seed() {
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let seeder = Seeder::new(pool.clone());
    seeder.run_migrations().await.expect("Failed to run migrations");

    let before: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lung_cancer_data")
        .fetch_one(&pool)
        .await
        .expect("Failed to count rows");

    let records = sample_records();
    let inserted = seeder
        .seed_records(&records)
        .await
        .expect("Failed to seed records");
    assert_eq!(inserted, records.len() as u64);

    let (after, positives): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE pulmonary_disease) FROM lung_cancer_data",
    )
    .fetch_one(&pool)
    .await
    .expect("Failed to count rows");
    assert_eq!(after - before, 10);
    assert!(positives >= 5);

    sqlx::query("DELETE FROM lung_cancer_data WHERE id IN (SELECT id FROM lung_cancer_data ORDER BY id DESC LIMIT $1)")
        .bind(inserted as i64)
        .execute(&pool)
        .await
        .expect("Failed to clean up seeded rows");
}
