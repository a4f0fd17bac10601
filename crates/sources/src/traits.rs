//! The extraction contract.

use crate::error::Result;
use data_loader::FilmRecord;

/// Produces one batch of fully resolved film records.
///
/// Implementations return exactly the configured number of films, in source
/// order, or fail the whole batch. There is no partial result.
pub trait FilmSource: Send + Sync {
    /// Returns the name of this source (for logging/debugging)
    fn name(&self) -> &str;

    fn fetch_batch(&self) -> Result<Vec<FilmRecord>>;
}
