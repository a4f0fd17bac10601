//! Award bonus: reward films that won awards.
//!
//! Awards are a coarse, saturating signal, so the bonus is a step function
//! over award-count buckets rather than a linear function of the count.
//! Bucket upper bounds are inclusive: exactly 2 awards falls in the 1-2
//! bucket, exactly 10 in the 6-10 bucket.

use super::round_to_tenth;
use crate::config::{AwardTier, DEFAULT_AWARD_TIERS, DEFAULT_OVERFLOW_BONUS, ScoringConfig};
use crate::traits::Adjustment;
use anyhow::Result;
use data_loader::{AwardCount, FilmDataError, FilmRecord};
use rayon::prelude::*;

/// Adds the award bonus to every film's rating.
///
/// ## Algorithm
/// For each film independently:
/// 1. Find the first tier whose `max_awards` is >= the film's award count
/// 2. Use that tier's bonus, or the overflow bonus past the last tier
/// 3. New rating = round(rating + bonus, 1 decimal)
pub struct AwardBonus {
    tiers: Vec<AwardTier>,
    overflow_bonus: f64,
}

impl AwardBonus {
    /// Create an AwardBonus from explicit tiers.
    ///
    /// Tiers must already be sorted by `max_awards`; use
    /// [`ScoringConfig::validate`] to check user-supplied tables.
    pub fn new(tiers: Vec<AwardTier>, overflow_bonus: f64) -> Self {
        Self {
            tiers,
            overflow_bonus,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.award_tiers.clone(), config.overflow_bonus)
    }

    /// Bonus for a given award count
    pub fn bonus_for(&self, award_count: AwardCount) -> f64 {
        self.tiers
            .iter()
            .find(|tier| award_count <= tier.max_awards)
            .map(|tier| tier.bonus)
            .unwrap_or(self.overflow_bonus)
    }

    /// Rating after the bonus, rounded to one decimal
    pub fn adjust(&self, rating: f64, award_count: AwardCount) -> f64 {
        round_to_tenth(rating + self.bonus_for(award_count))
    }
}

impl Default for AwardBonus {
    fn default() -> Self {
        Self::new(DEFAULT_AWARD_TIERS.to_vec(), DEFAULT_OVERFLOW_BONUS)
    }
}

impl Adjustment for AwardBonus {
    fn name(&self) -> &str {
        "AwardBonus"
    }

    fn apply(&self, films: Vec<FilmRecord>) -> Result<Vec<FilmRecord>> {
        // Each film is independent; indexed collect keeps the input order.
        let adjusted: Vec<FilmRecord> = films
            .into_par_iter()
            .map(|film| {
                let rating = self.adjust(film.rating, film.award_count);
                FilmRecord { rating, ..film }
            })
            .collect();
        Ok(adjusted)
    }
}

/// Bonus for an award count under the standard tiers
///
/// | awards | bonus |
/// |--------|-------|
/// | 0      | 0.0   |
/// | 1-2    | 0.3   |
/// | 3-5    | 0.5   |
/// | 6-10   | 1.0   |
/// | > 10   | 1.5   |
pub fn award_bonus(award_count: AwardCount) -> f64 {
    match award_count {
        0 => 0.0,
        1..=2 => 0.3,
        3..=5 => 0.5,
        6..=10 => 1.0,
        _ => DEFAULT_OVERFLOW_BONUS,
    }
}

/// Apply the standard award bonus to parallel slices of award counts and
/// ratings.
pub fn award_adjust(award_counts: &[AwardCount], ratings: &[f64]) -> data_loader::Result<Vec<f64>> {
    if award_counts.len() != ratings.len() {
        return Err(FilmDataError::ValidationError(format!(
            "{} award counts but {} ratings",
            award_counts.len(),
            ratings.len()
        )));
    }
    Ok(award_counts
        .iter()
        .zip(ratings)
        .map(|(&count, &rating)| round_to_tenth(rating + award_bonus(count)))
        .collect())
}
