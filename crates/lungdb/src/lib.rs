//! Shared model and annotated query runner for the lung cancer dataset.
//!
//! The runner reads a query file made of `-- Query:` / `-- Purpose:`
//! annotated statements, then executes them one by one against Postgres:
//!
//! ```rust,ignore
//! use lungdb::prelude::*;
//!
//! let db = Database::connect(&config.database_url).await?;
//! let records = load_queries(&config.queries_file)?;
//! let summary = QueryExecutor::stdout(&db).run_all(&records).await?;
//! ```

pub mod config;
pub mod database;
pub mod errors;
pub mod executor;
pub mod models;
pub mod query_file;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::RunnerConfig;
    pub use crate::database::Database;
    pub use crate::errors::AppError;
    pub use crate::executor::{QueryExecutor, QueryOutcome, RunSummary, SqlBackend};
    pub use crate::models::{
        LUNG_CANCER_TABLE, LungCancerRecord, QueryRecord, ResultTable, RowCount, StatementKind,
    };
    pub use crate::query_file::{load_queries, parse_queries};
}
