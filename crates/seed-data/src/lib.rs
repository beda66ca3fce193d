//! Seeding for the lung cancer dataset.
//!
//! Loads `LungCancerDataset.csv`, renames and coerces its columns, and
//! bulk-inserts the rows into `lung_cancer_data`.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let records = DatasetLoader::load_file("data/LungCancerDataset.csv")?;
//! let seeder = Seeder::new(pool);
//! seeder.run_migrations().await?;
//! seeder.seed_records(&records).await?;
//! ```

pub mod api;
pub mod config;
pub mod dataset;
pub mod db;

// Re-export the row type from the lungdb crate
pub use lungdb::models::{LUNG_CANCER_TABLE, LungCancerRecord};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::api::{ApiError, ApiSeeder};
    pub use crate::config::{SeedConfig, SeedTarget};
    pub use crate::dataset::{DatasetError, DatasetLoader};
    pub use crate::db::{SeedError, Seeder};
    pub use crate::{LUNG_CANCER_TABLE, LungCancerRecord};
}
