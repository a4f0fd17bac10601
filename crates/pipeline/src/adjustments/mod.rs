//! Rating adjustments for the scoring pipeline.
//!
//! This module contains the concrete Adjustment implementations that can be
//! composed into a ScoringPipeline.

pub mod award_bonus;
pub mod popularity_penalty;

// Re-export for convenience
pub use award_bonus::{award_adjust, award_bonus, AwardBonus};
pub use popularity_penalty::{vote_penalty, PopularityPenalty};

/// Round to one decimal place, halves away from zero.
///
/// A negative zero result is normalised to `0.0` so it compares and prints
/// like any other zero rating.
pub fn round_to_tenth(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}
