//! Direct Postgres seeding.
//!
//! The [`Seeder`] submits the whole dataset in a single statement and can
//! create the target table from the bundled migrations first.

mod seeder;

pub use seeder::{SeedError, Seeder};
