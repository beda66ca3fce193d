use async_trait::async_trait;
use futures_util::TryStreamExt;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Column, Either, Executor, Row, ValueRef};
use tracing::debug;

use crate::errors::AppError;
use crate::executor::SqlBackend;
use crate::models::{ResultTable, RowCount};

/// Leading keywords of statements whose command tag carries no row count.
const UNCOUNTED_KEYWORDS: [&str; 18] = [
    "CREATE", "ALTER", "DROP", "TRUNCATE", "GRANT", "REVOKE", "COMMENT", "SET", "RESET", "DO",
    "CALL", "VACUUM", "ANALYZE", "REINDEX", "CLUSTER", "REFRESH", "LOCK", "DISCARD",
];

/// Single long-lived database handle shared by every statement of a run.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a single-connection pool; statements never run concurrently.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs a read query and renders every cell as text.
    ///
    /// The statement goes through the simple query protocol, so Postgres
    /// returns text for every column type and no per-type decoding is needed.
    /// When the body holds several statements only the last result set is
    /// kept.
    pub async fn fetch_table(&self, sql: &str) -> Result<ResultTable, AppError> {
        let mut results = (&self.pool).fetch_many(sqlx::raw_sql(sql));
        let mut current = Vec::new();
        let mut last = Vec::new();
        while let Some(step) = results.try_next().await? {
            match step {
                Either::Left(_) => last = std::mem::take(&mut current),
                Either::Right(row) => current.push(row),
            }
        }
        drop(results);
        if !current.is_empty() {
            last = current;
        }

        let columns = match last.first() {
            Some(row) => column_names(row.columns()),
            None => self.describe_columns(sql).await,
        };

        let rows = last
            .iter()
            .map(render_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResultTable::new(columns, rows))
    }

    /// Column names of an empty result, taken from the prepared statement.
    ///
    /// Multi-statement bodies cannot be prepared; their empty results have
    /// no header.
    async fn describe_columns(&self, sql: &str) -> Vec<String> {
        match (&self.pool).describe(sql).await {
            Ok(describe) => column_names(describe.columns()),
            Err(e) => {
                debug!("Could not describe empty result: {e}");
                Vec::new()
            }
        }
    }

    /// Runs a statement inside its own transaction and commits it.
    pub async fn execute_in_transaction(&self, sql: &str) -> Result<RowCount, AppError> {
        let mut tx = self.pool.begin().await?;
        let result = Executor::execute(&mut *tx, sqlx::raw_sql(sql)).await?;
        tx.commit().await?;

        let affected = result.rows_affected();
        debug!("Statement committed, driver reported {affected} rows");

        Ok(row_count_for(sql, affected))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl SqlBackend for Database {
    async fn fetch_table(&self, sql: &str) -> Result<ResultTable, AppError> {
        Database::fetch_table(self, sql).await
    }

    async fn execute_in_transaction(&self, sql: &str) -> Result<RowCount, AppError> {
        Database::execute_in_transaction(self, sql).await
    }
}

fn render_row(row: &PgRow) -> Result<Vec<String>, sqlx::Error> {
    (0..row.len())
        .map(|idx| {
            if row.try_get_raw(idx)?.is_null() {
                return Ok("NULL".to_string());
            }
            row.try_get_unchecked::<String, _>(idx)
        })
        .collect()
}

fn column_names<C: Column>(columns: &[C]) -> Vec<String> {
    columns.iter().map(|c| c.name().to_string()).collect()
}

/// A zero count from DDL-like statements means "no count", not "no rows".
fn row_count_for(sql: &str, affected: u64) -> RowCount {
    let uncounted = sql
        .split_whitespace()
        .next()
        .is_some_and(|word| UNCOUNTED_KEYWORDS.iter().any(|k| word.eq_ignore_ascii_case(k)));

    if uncounted && affected == 0 {
        RowCount::NotApplicable
    } else {
        RowCount::Affected(affected)
    }
}
