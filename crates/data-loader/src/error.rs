//! Error types for the data-loader crate.
//!
//! Every failure in the leaderboard run is fatal to the batch, so the
//! variants here describe *why* a batch was rejected rather than how to
//! recover from it.

use thiserror::Error;

/// Errors raised while building, validating or persisting film records.
#[derive(Error, Debug)]
pub enum FilmDataError {
    /// A required field was absent or malformed on a scraped record
    ///
    /// `position` is the 1-based place of the film in the source listing.
    #[error("Extraction failed for film #{position}: {field} {reason}")]
    ExtractionFailure {
        position: usize,
        field: String,
        reason: String,
    },

    /// Zero records were handed to the scoring engine
    #[error("Cannot score an empty batch")]
    EmptyBatch,

    /// A record or a configuration value is outside its documented domain
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// I/O error occurred while reading or writing a table
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV reader/writer failure
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl FilmDataError {
    /// Shorthand for building an [`FilmDataError::ExtractionFailure`].
    pub fn extraction(position: usize, field: &str, reason: impl Into<String>) -> Self {
        Self::ExtractionFailure {
            position,
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, FilmDataError>;
