use std::fmt;

use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

/// Name of the table the dataset is seeded into.
pub const LUNG_CANCER_TABLE: &str = "lung_cancer_data";

/// One annotated statement read from a query file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    /// Text after `-- Query:`; `None` for statements before the first marker.
    pub name: Option<String>,
    /// `-- Purpose:` fragments joined with single spaces.
    pub purpose: String,
    /// Statement body, trimmed, without its terminating semicolon.
    pub sql: String,
}

impl QueryRecord {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("No Name")
    }

    pub fn kind(&self) -> StatementKind {
        StatementKind::classify(&self.sql)
    }
}

/// How a statement is executed and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `SELECT ...`, materialized as a table.
    Read,
    /// Everything else, run in a transaction and reported by row count.
    Write,
}

impl StatementKind {
    const READ_KEYWORD: &'static str = "SELECT";

    /// Classifies by the first whitespace-delimited token, ignoring case.
    pub fn classify(sql: &str) -> Self {
        match sql.split_whitespace().next() {
            Some(word) if word.eq_ignore_ascii_case(Self::READ_KEYWORD) => StatementKind::Read,
            _ => StatementKind::Write,
        }
    }
}

/// Affected-row count of a write statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowCount {
    Affected(u64),
    /// The driver could not report a count (DDL and similar).
    NotApplicable,
}

impl fmt::Display for RowCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowCount::Affected(n) => write!(f, "{n}"),
            RowCount::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// Materialized result of a read query, every cell rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return write!(f, "Empty result set\nColumns: [{}]", self.columns.join(", "));
        }

        let mut table = Table::new();
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(self.columns.clone());
        for row in &self.rows {
            table.add_row(row.clone());
        }

        writeln!(f, "{table}")?;
        write!(
            f,
            "[{} rows x {} columns]",
            self.rows.len(),
            self.columns.len()
        )
    }
}

/// A row of the lung cancer dataset after renaming and boolean coercion.
///
/// Field names match the columns of [`LUNG_CANCER_TABLE`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LungCancerRecord {
    pub age: i32,
    pub gender: bool,
    pub smoking: bool,
    pub finger_discoloration: bool,
    pub mental_stress: bool,
    pub exposure_to_pollution: bool,
    pub long_term_illness: bool,
    pub energy_level: f64,
    pub immune_weakness: bool,
    pub breathing_issue: bool,
    pub alcohol_consumption: bool,
    pub throat_discomfort: bool,
    pub oxygen_saturation: f64,
    pub chest_tightness: bool,
    pub family_history: bool,
    pub smoking_family_history: bool,
    pub stress_immune: bool,
    pub pulmonary_disease: bool,
}
