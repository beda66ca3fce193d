//! The lung cancer CSV dataset.
//!
//! [`DatasetLoader`] reads the CSV, renames the upper-case source columns
//! to the table's snake_case names and coerces the 0/1 and `YES`/`NO`
//! columns to booleans.

mod columns;
mod loader;
mod transform;

pub use columns::{COLUMN_COUNT, COLUMNS, ColumnKind, ColumnSpec, flag_columns, target_columns};
pub use loader::{DEFAULT_CSV_PATH, DatasetLoader};
pub use transform::{ColumnIndex, DatasetError, check_headers, parse_flag, parse_label};
