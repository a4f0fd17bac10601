//! The ScoringPipeline chains rating adjustments.
//!
//! This module provides the ScoringPipeline struct that runs several
//! adjustments in sequence using the builder pattern.

use crate::traits::Adjustment;
use anyhow::{Context, Result, ensure};
use data_loader::FilmRecord;
use tracing;

/// Chains multiple adjustments together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = ScoringPipeline::new()
///     .add_adjustment(AwardBonus::default())
///     .add_adjustment(PopularityPenalty::default());
///
/// let adjusted = pipeline.apply(films)?;
/// ```
pub struct ScoringPipeline {
    adjustments: Vec<Box<dyn Adjustment>>,
}

impl ScoringPipeline {
    /// Create a new empty ScoringPipeline.
    pub fn new() -> Self {
        Self {
            adjustments: Vec::new(),
        }
    }

    /// Add an adjustment to the pipeline (builder pattern).
    pub fn add_adjustment(mut self, adjustment: impl Adjustment + 'static) -> Self {
        self.adjustments.push(Box::new(adjustment));
        self
    }

    /// Names of the stages, in execution order
    pub fn stage_names(&self) -> Vec<&str> {
        self.adjustments.iter().map(|a| a.name()).collect()
    }

    /// Apply all adjustments in sequence to the batch.
    ///
    /// Every stage receives the complete output of the previous one. A stage
    /// that changes the batch length is an error, since the before and
    /// after rankings are matched up by position.
    pub fn apply(&self, films: Vec<FilmRecord>) -> Result<Vec<FilmRecord>> {
        let expected = films.len();
        let mut current = films;
        for adjustment in &self.adjustments {
            tracing::debug!(
                "Applying adjustment: {} (batch size: {})",
                adjustment.name(),
                current.len()
            );
            current = adjustment
                .apply(current)
                .with_context(|| format!("Adjustment {} failed", adjustment.name()))?;
            ensure!(
                current.len() == expected,
                "Adjustment {} returned {} films, expected {}",
                adjustment.name(),
                current.len(),
                expected
            );
        }
        Ok(current)
    }
}

impl Default for ScoringPipeline {
    fn default() -> Self {
        Self::new()
    }
}
