//! The scoring engine: raw batch in, before/after leaderboard out.
//!
//! ## Steps
//! 1. Validate the batch (non-empty, names present, ratings in [0, 10])
//! 2. Rank the batch as given -> "before" set
//! 3. Run the adjustment pipeline on a copy of the batch
//! 4. Stable-sort the adjusted films by rating -> "after" set
//!
//! The engine holds no state between calls; scoring the same batch twice
//! gives the same leaderboard.

use crate::adjustments::{AwardBonus, PopularityPenalty};
use crate::config::ScoringConfig;
use crate::ranking::{rank, rerank};
use crate::scoring_pipeline::ScoringPipeline;
use anyhow::{Context, Result};
use data_loader::{FilmRecord, Leaderboard, validate_batch};
use tracing::{debug, info, instrument};

pub struct ScoringEngine {
    pipeline: ScoringPipeline,
}

impl ScoringEngine {
    /// Build the standard two-stage engine (award bonus, then popularity
    /// penalty) from a validated configuration.
    pub fn new(config: &ScoringConfig) -> Result<Self> {
        config.validate().context("Invalid scoring configuration")?;
        let pipeline = ScoringPipeline::new()
            .add_adjustment(AwardBonus::from_config(config))
            .add_adjustment(PopularityPenalty::from_config(config));
        Ok(Self { pipeline })
    }

    /// Build an engine around a custom pipeline
    pub fn with_pipeline(pipeline: ScoringPipeline) -> Self {
        Self { pipeline }
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.pipeline.stage_names()
    }

    /// Score a batch and produce both rankings.
    ///
    /// The input slice is only read; the before set is built from it
    /// directly, so the adjustment stages never see those records.
    #[instrument(skip(self, films), fields(batch_size = films.len()))]
    pub fn score(&self, films: &[FilmRecord]) -> Result<Leaderboard> {
        validate_batch(films).context("Rejected batch")?;

        let before = rank(films);
        let adjusted = self.pipeline.apply(films.to_vec())?;
        debug!("Adjusted {} films", adjusted.len());

        let after = rerank(adjusted);
        if let (Some(first), Some(top)) = (before.first(), after.first()) {
            info!(
                "Scored {} films: '{}' leads the raw ranking, '{}' leads the adjusted one",
                before.len(),
                first.film.name,
                top.film.name
            );
        }

        Ok(Leaderboard { before, after })
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::with_pipeline(
            ScoringPipeline::new()
                .add_adjustment(AwardBonus::default())
                .add_adjustment(PopularityPenalty::default()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::FilmDataError;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ScoringConfig {
            votes_per_unit: 0,
            ..ScoringConfig::default()
        };
        assert!(ScoringEngine::new(&config).is_err());
    }

    #[test]
    fn test_default_stages() {
        let engine = ScoringEngine::default();
        assert_eq!(engine.stage_names(), vec!["AwardBonus", "PopularityPenalty"]);
    }

    #[test]
    fn test_empty_batch_is_typed_error() {
        let err = ScoringEngine::default().score(&[]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FilmDataError>(),
            Some(FilmDataError::EmptyBatch)
        ));
    }

    #[test]
    fn test_out_of_range_rating_is_rejected() {
        let films = vec![FilmRecord::new("Broken", 12.0, 10, 0)];
        let err = ScoringEngine::default().score(&films).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FilmDataError>(),
            Some(FilmDataError::ValidationError(_))
        ));
    }

    #[test]
    fn test_single_film() {
        let films = vec![FilmRecord::new("Alone", 8.0, 0, 3)];
        let board = ScoringEngine::default().score(&films).unwrap();
        assert_eq!(board.before[0].film.rating, 8.0);
        assert_eq!(board.after[0].film.rating, 8.5);
        assert_eq!(board.after[0].rank, 1);
    }
}
