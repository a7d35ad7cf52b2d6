//! Experiment Store
//!
//! Keeps the accepted experiment setup and its export layout in memory.

mod store;

pub use store::{AcceptedExperiment, ExperimentStore, ExportLayout, StoreEvent};

use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Lock error: {0}")]
    LockError(String),
    #[error("No experiment accepted yet")]
    NotConfigured,
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
