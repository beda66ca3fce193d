//! Column layout of the lung cancer CSV and its target table.

/// How a source column is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Whole number, kept as is.
    Integer,
    /// Real number, kept as is.
    Real,
    /// Numeric 0/1, coerced to boolean by truthiness.
    Flag,
    /// Literal `YES`/`NO`, coerced to boolean.
    Label,
}

/// A CSV column and the table column it is renamed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub source: &'static str,
    pub target: &'static str,
    pub kind: ColumnKind,
}

const fn col(source: &'static str, target: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        source,
        target,
        kind,
    }
}

pub const COLUMN_COUNT: usize = 18;

/// Every dataset column in CSV order.
pub static COLUMNS: [ColumnSpec; COLUMN_COUNT] = [
    col("AGE", "age", ColumnKind::Integer),
    col("GENDER", "gender", ColumnKind::Flag),
    col("SMOKING", "smoking", ColumnKind::Flag),
    col("FINGER_DISCOLORATION", "finger_discoloration", ColumnKind::Flag),
    col("MENTAL_STRESS", "mental_stress", ColumnKind::Flag),
    col("EXPOSURE_TO_POLLUTION", "exposure_to_pollution", ColumnKind::Flag),
    col("LONG_TERM_ILLNESS", "long_term_illness", ColumnKind::Flag),
    col("ENERGY_LEVEL", "energy_level", ColumnKind::Real),
    col("IMMUNE_WEAKNESS", "immune_weakness", ColumnKind::Flag),
    col("BREATHING_ISSUE", "breathing_issue", ColumnKind::Flag),
    col("ALCOHOL_CONSUMPTION", "alcohol_consumption", ColumnKind::Flag),
    col("THROAT_DISCOMFORT", "throat_discomfort", ColumnKind::Flag),
    col("OXYGEN_SATURATION", "oxygen_saturation", ColumnKind::Real),
    col("CHEST_TIGHTNESS", "chest_tightness", ColumnKind::Flag),
    col("FAMILY_HISTORY", "family_history", ColumnKind::Flag),
    col("SMOKING_FAMILY_HISTORY", "smoking_family_history", ColumnKind::Flag),
    col("STRESS_IMMUNE", "stress_immune", ColumnKind::Flag),
    col("PULMONARY_DISEASE", "pulmonary_disease", ColumnKind::Label),
];

/// Target column names in table order.
pub fn target_columns() -> impl Iterator<Item = &'static str> {
    COLUMNS.iter().map(|c| c.target)
}

/// Target names of the columns coerced from 0/1.
pub fn flag_columns() -> impl Iterator<Item = &'static str> {
    COLUMNS
        .iter()
        .filter(|c| c.kind == ColumnKind::Flag)
        .map(|c| c.target)
}
