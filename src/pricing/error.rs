//! Error types for the price worker.

use atelier_framework::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PriceError {
    /// Newer input was submitted before this calculation finished.
    #[error("Price calculation {generation} superseded by newer input")]
    Superseded { generation: u64 },

    /// The metal or stone catalog could not be fetched.
    #[error("Could not load rates: {0}")]
    Rates(#[from] ApiError),

    #[error("Price worker closed")]
    WorkerClosed,

    #[error("Price worker dropped response channel")]
    WorkerDropped,
}
