//! Data module - sheet loading, cleaning and caching

mod cache;
mod loader;
mod processor;
mod record;

pub use cache::SnapshotCache;
pub use loader::DataLoader;
pub use processor::DataProcessor;
pub use record::{columns, DisplayColumn, PatientRecord, Ward};
