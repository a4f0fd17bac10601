//! Popularity penalty: discount films with far fewer votes than the batch
//! leader.
//!
//! A film loses `penalty_per_unit` rating for every `votes_per_unit` votes it
//! trails the most-voted film of the batch, rounded to the nearest whole
//! unit. Because the reference point is the batch maximum, this stage must
//! see the complete batch.
//!
//! Unit counts round halves away from zero (a 250,000 deficit at 100,000 per
//! unit is 3 units), not half-to-even as the Python scraper's `round` did.

use super::round_to_tenth;
use crate::config::{DEFAULT_PENALTY_PER_UNIT, DEFAULT_VOTES_PER_UNIT, ScoringConfig};
use crate::traits::Adjustment;
use anyhow::Result;
use data_loader::{FilmDataError, FilmRecord, Votes};
use tracing::debug;

/// Deducts rating in proportion to each film's vote deficit.
///
/// ## Algorithm
/// 1. `max_votes` = largest vote count in the batch
/// 2. `units` = round((max_votes - votes) / votes_per_unit), halves away from zero
/// 3. New rating = round(rating - units * penalty_per_unit, 1 decimal)
///
/// The result is not clamped; a weak, obscure film can end below zero.
#[derive(Debug, Clone, Copy)]
pub struct PopularityPenalty {
    votes_per_unit: Votes,
    penalty_per_unit: f64,
}

impl PopularityPenalty {
    /// Create a new PopularityPenalty.
    ///
    /// # Arguments
    /// * `votes_per_unit` - Vote deficit worth one penalty unit (must be > 0)
    /// * `penalty_per_unit` - Rating deducted per unit
    pub fn new(votes_per_unit: Votes, penalty_per_unit: f64) -> Self {
        Self {
            votes_per_unit,
            penalty_per_unit,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.votes_per_unit, config.penalty_per_unit)
    }

    /// Whole penalty units for a deficit
    pub fn penalty_units(&self, deficit: Votes) -> f64 {
        (deficit as f64 / self.votes_per_unit as f64).round()
    }

    /// Penalised ratings for parallel slices of votes and ratings
    pub fn penalize(&self, votes: &[Votes], ratings: &[f64]) -> data_loader::Result<Vec<f64>> {
        if votes.len() != ratings.len() {
            return Err(FilmDataError::ValidationError(format!(
                "{} vote counts but {} ratings",
                votes.len(),
                ratings.len()
            )));
        }
        if self.votes_per_unit == 0 {
            return Err(FilmDataError::ValidationError(
                "votes_per_unit must be greater than zero".to_string(),
            ));
        }
        let max_votes = *votes.iter().max().ok_or(FilmDataError::EmptyBatch)?;
        debug!("Popularity penalty reference: max_votes={}", max_votes);

        Ok(votes
            .iter()
            .zip(ratings)
            .map(|(&count, &rating)| {
                let units = self.penalty_units(max_votes - count);
                round_to_tenth(rating - units * self.penalty_per_unit)
            })
            .collect())
    }
}

impl Default for PopularityPenalty {
    fn default() -> Self {
        Self::new(DEFAULT_VOTES_PER_UNIT, DEFAULT_PENALTY_PER_UNIT)
    }
}

impl Adjustment for PopularityPenalty {
    fn name(&self) -> &str {
        "PopularityPenalty"
    }

    fn apply(&self, films: Vec<FilmRecord>) -> Result<Vec<FilmRecord>> {
        let votes: Vec<Votes> = films.iter().map(|f| f.votes).collect();
        let ratings: Vec<f64> = films.iter().map(|f| f.rating).collect();
        let penalized = self.penalize(&votes, &ratings)?;

        Ok(films
            .into_iter()
            .zip(penalized)
            .map(|(film, rating)| FilmRecord { rating, ..film })
            .collect())
    }
}

/// Apply the standard popularity penalty (0.1 per 100,000 votes of deficit).
pub fn vote_penalty(votes: &[Votes], ratings: &[f64]) -> data_loader::Result<Vec<f64>> {
    PopularityPenalty::default().penalize(votes, ratings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_penalty_reference_case() {
        let adjusted = vote_penalty(&[100_000, 200_000, 300_000], &[7.2, 8.1, 9.0]).unwrap();
        assert_eq!(adjusted, vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_most_voted_film_is_not_penalized() {
        let adjusted = vote_penalty(&[5, 2_000_000, 2_000_000], &[9.9, 8.8, 7.7]).unwrap();
        assert_eq!(adjusted[1], 8.8);
        assert_eq!(adjusted[2], 7.7);
        // 1,999,995 behind -> 20 units
        assert_eq!(adjusted[0], 7.9);
    }

    #[test]
    fn test_units_round_to_nearest() {
        let penalty = PopularityPenalty::default();
        assert_eq!(penalty.penalty_units(0), 0.0);
        assert_eq!(penalty.penalty_units(49_999), 0.0);
        assert_eq!(penalty.penalty_units(50_000), 1.0);
        assert_eq!(penalty.penalty_units(149_999), 1.0);
        assert_eq!(penalty.penalty_units(150_000), 2.0);
        assert_eq!(penalty.penalty_units(250_000), 3.0);
    }

    #[test]
    fn test_no_clamping() {
        let adjusted = vote_penalty(&[0, 1_000_000], &[0.5, 10.0]).unwrap();
        assert_eq!(adjusted, vec![-0.5, 10.0]);
    }

    #[test]
    fn test_all_zero_votes() {
        let adjusted = vote_penalty(&[0, 0], &[7.0, 8.0]).unwrap();
        assert_eq!(adjusted, vec![7.0, 8.0]);
    }

    #[test]
    fn test_empty_batch() {
        assert!(matches!(vote_penalty(&[], &[]), Err(FilmDataError::EmptyBatch)));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            vote_penalty(&[1, 2, 3], &[7.0]),
            Err(FilmDataError::ValidationError(_))
        ));
    }

    #[test]
    fn test_zero_votes_per_unit_is_rejected() {
        let penalty = PopularityPenalty::new(0, 0.1);
        assert!(penalty.penalize(&[1], &[7.0]).is_err());
    }

    #[test]
    fn test_apply_uses_batch_maximum() {
        let films = vec![
            FilmRecord::new("test1", 7.1, 200_000, 8),
            FilmRecord::new("test2", 8.5, 300_000, 11),
        ];
        let adjusted = PopularityPenalty::default().apply(films).unwrap();
        assert_eq!(adjusted[0].rating, 7.0);
        assert_eq!(adjusted[1].rating, 8.5);
        assert_eq!(adjusted[0].award_count, 8);
    }
}
