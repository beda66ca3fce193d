//! Parser for annotated query files.
//!
//! A query file is plain SQL where each statement is preceded by marker
//! comments:
//!
//! ```sql
//! -- Query: Smokers by age
//! -- Purpose: Count smokers
//! -- Purpose: grouped by age.
//! SELECT age, COUNT(*)
//! FROM lung_cancer_data
//! WHERE smoking
//! GROUP BY age;
//! ```
//!
//! Every other `--` comment and every blank line is ignored. Any remaining
//! line is part of the current statement body.

use std::path::Path;

use tracing::debug;

use crate::errors::AppError;
use crate::models::QueryRecord;

const NAME_MARKER: &str = "-- Query:";
const PURPOSE_MARKER: &str = "-- Purpose:";
const COMMENT_PREFIX: &str = "--";

/// Accumulator for the block currently being scanned.
#[derive(Debug, Default)]
struct PendingBlock {
    name: Option<String>,
    purpose: Vec<String>,
    body: Vec<String>,
}

impl PendingBlock {
    /// Emits the block if it has a body and resets all accumulated state.
    fn flush_into(&mut self, out: &mut Vec<QueryRecord>) {
        let block = std::mem::take(self);
        if block.body.is_empty() {
            if let Some(name) = &block.name {
                debug!("Skipping query block {name:?} without a SQL body");
            }
            return;
        }

        out.push(QueryRecord {
            name: block.name,
            purpose: block.purpose.join(" "),
            sql: finalize_sql(&block.body),
        });
    }
}

/// Joins body lines and strips surrounding whitespace and one trailing `;`.
fn finalize_sql(lines: &[String]) -> String {
    let sql = lines.join("\n");
    let sql = sql.trim();
    sql.strip_suffix(';').unwrap_or(sql).trim().to_string()
}

/// Parses query file text into records, in file order.
///
/// Blocks whose body is empty are dropped. Statement bodies are kept
/// verbatim apart from the final trim, so semicolons inside a statement
/// survive.
pub fn parse_queries(text: &str) -> Vec<QueryRecord> {
    let mut records = Vec::new();
    let mut pending = PendingBlock::default();

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some(name) = trimmed.strip_prefix(NAME_MARKER) {
            pending.flush_into(&mut records);
            pending.name = Some(name.trim().to_string());
        } else if let Some(purpose) = trimmed.strip_prefix(PURPOSE_MARKER) {
            pending.purpose.push(purpose.trim().to_string());
        } else if !trimmed.is_empty() && !trimmed.starts_with(COMMENT_PREFIX) {
            pending.body.push(line.to_string());
        }
    }
    pending.flush_into(&mut records);

    records
}

/// Reads and parses a query file.
pub fn load_queries(path: impl AsRef<Path>) -> Result<Vec<QueryRecord>, AppError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AppError::QueryFileNotFound(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path)?;
    let records = parse_queries(&text);
    debug!("Parsed {} queries from {}", records.len(), path.display());

    Ok(records)
}
