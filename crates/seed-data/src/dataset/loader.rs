//! CSV loading for the lung cancer dataset.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use lungdb::models::LungCancerRecord;
use tracing::{debug, info};

use super::transform::{DatasetError, check_headers};

/// Default location of the dataset, relative to the working directory.
pub const DEFAULT_CSV_PATH: &str = "data/LungCancerDataset.csv";

/// Loads and transforms the dataset in one pass.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Loads every row of a CSV file.
    ///
    /// The first invalid row aborts the load, so a partial dataset is never
    /// returned.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<LungCancerRecord>, DatasetError> {
        let path = path.as_ref();
        info!("Loading dataset from {}", path.display());

        let file = std::fs::File::open(path).map_err(csv::Error::from)?;
        Self::load_reader(std::io::BufReader::new(file))
    }

    /// Loads every row from CSV data in any reader.
    pub fn load_reader(reader: impl Read) -> Result<Vec<LungCancerRecord>, DatasetError> {
        let mut csv = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let index = check_headers(csv.headers()?)?;

        let mut records = Vec::new();
        for row in csv.records() {
            records.push(index.transform(&row?)?);
        }

        debug!("Transformed {} dataset rows", records.len());
        Ok(records)
    }
}
