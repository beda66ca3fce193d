//! Sequential execution of parsed query records.
//!
//! Each record moves through `pending -> running -> reported`, one at a
//! time. A failing statement is reported and logged, and the run continues
//! with the next record.

use std::io::{self, Write};

use async_trait::async_trait;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{QueryRecord, ResultTable, RowCount, StatementKind};

const BANNER_WIDTH: usize = 60;

/// Database operations the executor needs.
#[async_trait]
pub trait SqlBackend: Send + Sync {
    /// Runs a read query and materializes its rows.
    async fn fetch_table(&self, sql: &str) -> Result<ResultTable, AppError>;

    /// Runs a statement in a committed transaction.
    async fn execute_in_transaction(&self, sql: &str) -> Result<RowCount, AppError>;
}

/// What was reported for a single record.
#[derive(Debug)]
pub enum QueryOutcome {
    Rows(ResultTable),
    Executed(RowCount),
    Failed {
        kind: StatementKind,
        error: AppError,
    },
}

impl QueryOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, QueryOutcome::Failed { .. })
    }
}

/// Tally of a full run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Runs records against a backend and writes the console report to `out`.
pub struct QueryExecutor<'a, B: ?Sized, W> {
    backend: &'a B,
    out: W,
}

impl<'a, B> QueryExecutor<'a, B, io::Stdout>
where
    B: SqlBackend + ?Sized,
{
    /// Executor that reports on standard output.
    pub fn stdout(backend: &'a B) -> Self {
        Self::new(backend, io::stdout())
    }
}

impl<'a, B, W> QueryExecutor<'a, B, W>
where
    B: SqlBackend + ?Sized,
    W: Write,
{
    pub fn new(backend: &'a B, out: W) -> Self {
        Self { backend, out }
    }

    /// Runs every record in order. Failures never stop the run.
    pub async fn run_all(&mut self, records: &[QueryRecord]) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();

        for record in records {
            if self.run_one(record).await?.is_success() {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }
        }

        info!(
            "Ran {} queries: {} succeeded, {} failed",
            summary.total(),
            summary.succeeded,
            summary.failed
        );
        Ok(summary)
    }

    /// Runs one record and reports it. Only a broken output stream is an error.
    pub async fn run_one(&mut self, record: &QueryRecord) -> io::Result<QueryOutcome> {
        self.write_header(record)?;

        let kind = record.kind();
        let outcome = match kind {
            StatementKind::Read => match self.backend.fetch_table(&record.sql).await {
                Ok(table) => QueryOutcome::Rows(table),
                Err(error) => QueryOutcome::Failed { kind, error },
            },
            StatementKind::Write => match self.backend.execute_in_transaction(&record.sql).await {
                Ok(count) => QueryOutcome::Executed(count),
                Err(error) => QueryOutcome::Failed { kind, error },
            },
        };

        if let QueryOutcome::Failed { error, .. } = &outcome {
            error!("Query {:?} failed: {error}", record.display_name());
        }

        self.write_outcome(&outcome)?;
        Ok(outcome)
    }

    fn write_header(&mut self, record: &QueryRecord) -> io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(BANNER_WIDTH))?;
        writeln!(self.out, "Query Name: {}", record.display_name())?;
        writeln!(self.out, "Purpose   : {}", record.purpose)?;
        writeln!(self.out, "SQL       :\n{}", record.sql)?;
        writeln!(self.out, "{}", "-".repeat(BANNER_WIDTH))
    }

    fn write_outcome(&mut self, outcome: &QueryOutcome) -> io::Result<()> {
        match outcome {
            QueryOutcome::Rows(table) => writeln!(self.out, "Result:\n{table}")?,
            QueryOutcome::Executed(count) => writeln!(
                self.out,
                "Query executed successfully. Row count: {count}"
            )?,
            QueryOutcome::Failed {
                kind: StatementKind::Read,
                error,
            } => writeln!(self.out, "Error fetching SELECT query:\n{error}")?,
            QueryOutcome::Failed {
                kind: StatementKind::Write,
                error,
            } => writeln!(self.out, "Error executing query:\n{error}")?,
        }
        writeln!(self.out, "{}", "=".repeat(BANNER_WIDTH))?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Prints parsed records without executing them.
pub fn write_listing(mut out: impl Write, records: &[QueryRecord]) -> io::Result<()> {
    for (i, record) in records.iter().enumerate() {
        let kind = match record.kind() {
            StatementKind::Read => "read",
            StatementKind::Write => "write",
        };
        writeln!(out, "{:>3}. [{kind}] {}", i + 1, record.display_name())?;
        if !record.purpose.is_empty() {
            writeln!(out, "     {}", record.purpose)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Backend that fails any statement containing `fail` and records calls.
    #[derive(Default)]
    struct FakeBackend {
        calls: Mutex<Vec<(StatementKind, String)>>,
    }

    impl FakeBackend {
        fn calls(&self) -> Vec<(StatementKind, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SqlBackend for FakeBackend {
        async fn fetch_table(&self, sql: &str) -> Result<ResultTable, AppError> {
            self.calls
                .lock()
                .unwrap()
                .push((StatementKind::Read, sql.to_string()));
            if sql.contains("fail") {
                return Err(AppError::Database(sqlx::Error::Protocol(
                    "relation \"fail\" does not exist".into(),
                )));
            }
            Ok(ResultTable::new(
                vec!["n".into()],
                vec![vec!["1".into()]],
            ))
        }

        async fn execute_in_transaction(&self, sql: &str) -> Result<RowCount, AppError> {
            self.calls
                .lock()
                .unwrap()
                .push((StatementKind::Write, sql.to_string()));
            if sql.contains("fail") {
                return Err(AppError::Database(sqlx::Error::RowNotFound));
            }
            if sql.starts_with("CREATE") {
                Ok(RowCount::NotApplicable)
            } else {
                Ok(RowCount::Affected(2))
            }
        }
    }

    fn record(name: &str, purpose: &str, sql: &str) -> QueryRecord {
        QueryRecord {
            name: Some(name.to_string()),
            purpose: purpose.to_string(),
            sql: sql.to_string(),
        }
    }

    #[tokio::test]
    async fn test_routes_by_leading_keyword() {
        let backend = FakeBackend::default();
        let mut executor = QueryExecutor::new(&backend, Vec::new());

        let records = vec![
            record("a", "", "select 1"),
            record("b", "", "insert into t values (1)"),
            record("c", "", "update t set a = 2"),
            record("d", "", "CREATE TABLE x (a int)"),
        ];
        executor.run_all(&records).await.unwrap();

        let kinds: Vec<_> = backend.calls().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                StatementKind::Read,
                StatementKind::Write,
                StatementKind::Write,
                StatementKind::Write,
            ]
        );
    }

    #[tokio::test]
    async fn test_read_error_does_not_abort_run() {
        let backend = FakeBackend::default();
        let mut out = Vec::new();

        let records = vec![
            record("broken", "", "SELECT * FROM fail"),
            record("after", "", "SELECT 1"),
            record("write", "", "DELETE FROM fail"),
            record("last", "", "INSERT INTO t VALUES (1)"),
        ];
        let summary = QueryExecutor::new(&backend, &mut out)
            .run_all(&records)
            .await
            .unwrap();

        assert_eq!(summary, RunSummary { succeeded: 2, failed: 2 });
        assert_eq!(backend.calls().len(), 4);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Error fetching SELECT query:\nDatabase error:"));
        assert!(text.contains("Error executing query:\nDatabase error:"));
        assert!(text.contains("Query Name: last"));
    }

    #[tokio::test]
    async fn test_report_order() {
        let backend = FakeBackend::default();
        let mut out = Vec::new();

        QueryExecutor::new(&backend, &mut out)
            .run_one(&record("Count", "How many", "SELECT 1"))
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "=".repeat(60));
        assert_eq!(lines[1], "Query Name: Count");
        assert_eq!(lines[2], "Purpose   : How many");
        assert_eq!(lines[3], "SQL       :");
        assert_eq!(lines[4], "SELECT 1");
        assert_eq!(lines[5], "-".repeat(60));
        assert_eq!(lines[6], "Result:");
        assert!(text.ends_with(&format!("{}\n\n", "=".repeat(60))));
    }

    #[tokio::test]
    async fn test_write_reports_row_count() {
        let backend = FakeBackend::default();
        let mut out = Vec::new();
        let mut executor = QueryExecutor::new(&backend, &mut out);

        let outcome = executor
            .run_one(&record("ddl", "", "CREATE TABLE x (a int)"))
            .await
            .unwrap();
        assert!(matches!(outcome, QueryOutcome::Executed(RowCount::NotApplicable)));

        let outcome = executor
            .run_one(&record("dml", "", "UPDATE t SET a = 1"))
            .await
            .unwrap();
        assert!(matches!(outcome, QueryOutcome::Executed(RowCount::Affected(2))));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Query executed successfully. Row count: N/A"));
        assert!(text.contains("Query executed successfully. Row count: 2"));
    }

    #[test]
    fn test_listing() {
        let mut out = Vec::new();
        let records = vec![
            record("First", "Reads things", "SELECT 1"),
            QueryRecord {
                name: None,
                purpose: String::new(),
                sql: "DELETE FROM t".into(),
            },
        ];
        write_listing(&mut out, &records).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "  1. [read] First\n     Reads things\n  2. [write] No Name\n"
        );
    }
}
