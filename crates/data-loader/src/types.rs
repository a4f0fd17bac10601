//! Core domain types for the film leaderboard.
//!
//! This module defines the records that flow from extraction, through the
//! scoring engine, into presentation:
//! - `FilmRecord`: one scraped film (name, rating, votes, award count)
//! - `RankedFilmRecord`: a record with its 1-based position in a ranking
//! - `Leaderboard`: the "before" and "after" rankings of one batch

use crate::error::{FilmDataError, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Raw popularity count of a film
pub type Votes = u64;

/// Number of awards (Oscars) a film has won
pub type AwardCount = u32;

/// 1-based position in a ranking
pub type Rank = usize;

/// Lowest rating a scraped record may carry
pub const RATING_MIN: f64 = 0.0;

/// Highest rating a scraped record may carry
pub const RATING_MAX: f64 = 10.0;

// =============================================================================
// Film Records
// =============================================================================

/// One film as produced by an extraction source.
///
/// Names are display identifiers only; two records may share a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmRecord {
    pub name: String,
    /// Rating on the 0-10 scale as scraped, or the adjusted value
    /// once the scoring engine has produced a new record
    pub rating: f64,
    pub votes: Votes,
    pub award_count: AwardCount,
}

impl FilmRecord {
    pub fn new(name: impl Into<String>, rating: f64, votes: Votes, award_count: AwardCount) -> Self {
        Self {
            name: name.into(),
            rating,
            votes,
            award_count,
        }
    }

    /// Returns a copy of this record carrying a different rating.
    pub fn with_rating(&self, rating: f64) -> Self {
        Self {
            rating,
            ..self.clone()
        }
    }

    /// Check the record against the scraped-data domain.
    ///
    /// Votes and award counts are unsigned, so only the name and the
    /// rating need checking here.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FilmDataError::ValidationError(
                "film name must not be empty".to_string(),
            ));
        }
        if !self.rating.is_finite() || !(RATING_MIN..=RATING_MAX).contains(&self.rating) {
            return Err(FilmDataError::ValidationError(format!(
                "rating {} of '{}' is outside [{}, {}]",
                self.rating, self.name, RATING_MIN, RATING_MAX
            )));
        }
        Ok(())
    }
}

/// Validate a whole batch before it enters the scoring engine.
///
/// An empty batch is rejected with [`FilmDataError::EmptyBatch`]; the first
/// invalid record aborts the batch.
pub fn validate_batch(films: &[FilmRecord]) -> Result<()> {
    if films.is_empty() {
        return Err(FilmDataError::EmptyBatch);
    }
    for (idx, film) in films.iter().enumerate() {
        film.validate().map_err(|e| match e {
            FilmDataError::ValidationError(reason) => {
                FilmDataError::ValidationError(format!("film #{}: {}", idx + 1, reason))
            }
            other => other,
        })?;
    }
    Ok(())
}

/// A film together with its position in one of the two rankings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFilmRecord {
    pub rank: Rank,
    /// Rank the film held in the original (scrape-order) listing
    pub original_rank: Rank,
    pub film: FilmRecord,
}

impl RankedFilmRecord {
    /// Places gained (positive) or lost (negative) relative to the
    /// original listing.
    pub fn movement(&self) -> i64 {
        self.original_rank as i64 - self.rank as i64
    }
}

// =============================================================================
// Leaderboard
// =============================================================================

/// Both rankings of a scored batch.
///
/// `before` keeps scrape order and the scraped ratings; `after` is sorted by
/// adjusted rating. Each is numbered 1..N independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub before: Vec<RankedFilmRecord>,
    pub after: Vec<RankedFilmRecord>,
}

impl Leaderboard {
    /// Number of films in the batch
    pub fn len(&self) -> usize {
        self.before.len()
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty()
    }

    /// All output rows: the before set first, then the after set.
    pub fn rows(&self) -> impl Iterator<Item = &RankedFilmRecord> {
        self.before.iter().chain(self.after.iter())
    }
}
