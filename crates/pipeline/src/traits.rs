//! Core traits for the scoring pipeline.
//!
//! This module defines the Adjustment trait that lets rating adjustments be
//! composed into a ScoringPipeline.

use anyhow::Result;
use data_loader::FilmRecord;

/// One stage of the rating adjustment.
///
/// ## Contract
/// - `Send + Sync` so a built engine can be shared across tasks
/// - A stage takes the whole batch by value and returns a batch of the same
///   length, in the same order, with new rating values. Stages that need a
///   batch-wide statistic (such as the maximum vote count) compute it from
///   the batch they are given.
pub trait Adjustment: Send + Sync {
    /// Returns the name of this adjustment (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this adjustment to a batch of films.
    ///
    /// # Returns
    /// * `Ok(Vec<FilmRecord>)` - The adjusted films, positionally aligned with the input
    /// * `Err` - If the batch cannot be adjusted
    fn apply(&self, films: Vec<FilmRecord>) -> Result<Vec<FilmRecord>>;
}
