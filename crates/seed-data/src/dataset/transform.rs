//! Row coercion from raw CSV text to [`LungCancerRecord`].

use std::collections::HashMap;

use csv::StringRecord;
use lungdb::models::LungCancerRecord;
use thiserror::Error;

use super::columns::{COLUMN_COUNT, COLUMNS, ColumnSpec};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing CSV columns: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
    #[error("Line {line}: {column} value {value:?} is not 0/1")]
    InvalidFlag {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("Line {line}: {column} value {value:?} is not a number")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("Line {line}: pulmonary_disease value {value:?} is neither YES nor NO")]
    InvalidLabel { line: u64, value: String },
}

/// Interprets a numeric cell by truthiness: any non-zero number is `true`.
pub fn parse_flag(raw: &str) -> Option<bool> {
    raw.trim().parse::<f64>().ok().map(|v| v != 0.0)
}

/// Maps the label column's `YES`/`NO` to a boolean.
pub fn parse_label(raw: &str) -> Option<bool> {
    match raw.trim() {
        "YES" => Some(true),
        "NO" => Some(false),
        _ => None,
    }
}

/// Resolves every source column to its position in the CSV header.
///
/// All missing columns are reported at once. Extra columns are ignored.
pub fn check_headers(headers: &StringRecord) -> Result<ColumnIndex, DatasetError> {
    let positions: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim(), i))
        .collect();

    let mut missing = Vec::new();
    let mut index = [0usize; COLUMN_COUNT];
    for (slot, column) in index.iter_mut().zip(COLUMNS.iter()) {
        match positions.get(column.source) {
            Some(&pos) => *slot = pos,
            None => missing.push(column.source),
        }
    }

    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing));
    }
    Ok(ColumnIndex(index))
}

/// CSV position of each entry of [`COLUMNS`].
#[derive(Debug, Clone, Copy)]
pub struct ColumnIndex([usize; COLUMN_COUNT]);

impl ColumnIndex {
    /// Renames and coerces one CSV row.
    pub fn transform(&self, row: &StringRecord) -> Result<LungCancerRecord, DatasetError> {
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let cells = Cells {
            index: self,
            row,
            line,
        };

        Ok(LungCancerRecord {
            age: cells.integer(0)?,
            gender: cells.flag(1)?,
            smoking: cells.flag(2)?,
            finger_discoloration: cells.flag(3)?,
            mental_stress: cells.flag(4)?,
            exposure_to_pollution: cells.flag(5)?,
            long_term_illness: cells.flag(6)?,
            energy_level: cells.real(7)?,
            immune_weakness: cells.flag(8)?,
            breathing_issue: cells.flag(9)?,
            alcohol_consumption: cells.flag(10)?,
            throat_discomfort: cells.flag(11)?,
            oxygen_saturation: cells.real(12)?,
            chest_tightness: cells.flag(13)?,
            family_history: cells.flag(14)?,
            smoking_family_history: cells.flag(15)?,
            stress_immune: cells.flag(16)?,
            pulmonary_disease: cells.label(17)?,
        })
    }
}

struct Cells<'a> {
    index: &'a ColumnIndex,
    row: &'a StringRecord,
    line: u64,
}

impl Cells<'_> {
    fn raw(&self, column: usize) -> (&'static ColumnSpec, &str) {
        let spec: &'static ColumnSpec = &COLUMNS[column];
        let value = self.row.get(self.index.0[column]).unwrap_or("");
        (spec, value)
    }

    fn flag(&self, column: usize) -> Result<bool, DatasetError> {
        let (spec, value) = self.raw(column);
        parse_flag(value).ok_or_else(|| DatasetError::InvalidFlag {
            line: self.line,
            column: spec.target,
            value: value.to_string(),
        })
    }

    fn integer(&self, column: usize) -> Result<i32, DatasetError> {
        let (spec, value) = self.raw(column);
        value
            .trim()
            .parse()
            .map_err(|_| self.invalid_number(spec, value))
    }

    fn real(&self, column: usize) -> Result<f64, DatasetError> {
        let (spec, value) = self.raw(column);
        value
            .trim()
            .parse()
            .map_err(|_| self.invalid_number(spec, value))
    }

    fn label(&self, column: usize) -> Result<bool, DatasetError> {
        let (_, value) = self.raw(column);
        parse_label(value).ok_or_else(|| DatasetError::InvalidLabel {
            line: self.line,
            value: value.to_string(),
        })
    }

    fn invalid_number(&self, spec: &ColumnSpec, value: &str) -> DatasetError {
        DatasetError::InvalidNumber {
            line: self.line,
            column: spec.target,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> StringRecord {
        StringRecord::from(COLUMNS.iter().map(|c| c.source).collect::<Vec<_>>())
    }

    fn row(gender: &str, label: &str) -> StringRecord {
        StringRecord::from(vec![
            "68", gender, "1", "1", "1", "1", "0", "57.83", "0", "0", "1", "1", "95.98", "1",
            "0", "0", "0", label,
        ])
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(" 0.0 "), Some(false));
        assert_eq!(parse_flag("2"), Some(true));
        assert_eq!(parse_flag("yes"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(parse_label("YES"), Some(true));
        assert_eq!(parse_label("NO"), Some(false));
        assert_eq!(parse_label(" YES "), Some(true));
        assert_eq!(parse_label("MAYBE"), None);
        assert_eq!(parse_label("yes"), None);
    }

    #[test]
    fn test_transform_gender_and_label() {
        let index = check_headers(&header()).unwrap();

        let record = index.transform(&row("1", "YES")).unwrap();
        assert!(record.gender);
        assert!(record.pulmonary_disease);
        assert_eq!(record.age, 68);
        assert!((record.energy_level - 57.83).abs() < f64::EPSILON);
        assert!(!record.long_term_illness);

        let record = index.transform(&row("0", "NO")).unwrap();
        assert!(!record.gender);
        assert!(!record.pulmonary_disease);
    }

    #[test]
    fn test_unknown_label_rejected() {
        let index = check_headers(&header()).unwrap();
        let err = index.transform(&row("1", "UNKNOWN")).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidLabel { ref value, .. } if value == "UNKNOWN"
        ));
    }

    #[test]
    fn test_non_numeric_flag_rejected() {
        let index = check_headers(&header()).unwrap();
        let err = index.transform(&row("M", "NO")).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidFlag { column: "gender", .. }
        ));
    }

    #[test]
    fn test_headers_in_any_order() {
        let mut sources: Vec<&str> = COLUMNS.iter().map(|c| c.source).collect();
        sources.reverse();
        let index = check_headers(&StringRecord::from(sources)).unwrap();

        let mut values = vec![
            "68", "1", "1", "1", "1", "1", "0", "57.83", "0", "0", "1", "1", "95.98", "1", "0",
            "0", "0", "NO",
        ];
        values.reverse();
        let record = index.transform(&StringRecord::from(values)).unwrap();
        assert_eq!(record.age, 68);
        assert!(!record.pulmonary_disease);
    }

    #[test]
    fn test_missing_headers_reported_together() {
        let headers = StringRecord::from(
            COLUMNS
                .iter()
                .map(|c| c.source)
                .filter(|s| *s != "AGE" && *s != "STRESS_IMMUNE")
                .collect::<Vec<_>>(),
        );
        let err = check_headers(&headers).unwrap_err();
        assert_eq!(err.to_string(), "Missing CSV columns: AGE, STRESS_IMMUNE");
    }
}
