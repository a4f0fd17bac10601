//! Tunable constants of the scoring engine.
//!
//! The defaults reproduce the published leaderboard rules. A JSON file with
//! any subset of the fields can override them:
//!
//! ```json
//! {
//!   "award_tiers": [
//!     { "max_awards": 0, "bonus": 0.0 },
//!     { "max_awards": 2, "bonus": 0.3 }
//!   ],
//!   "overflow_bonus": 0.5,
//!   "votes_per_unit": 250000
//! }
//! ```

use anyhow::{Context, Result};
use data_loader::{AwardCount, FilmDataError, Votes};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One bucket of the award step function.
///
/// A film whose award count is `<= max_awards` (and above the previous
/// tier's bound) receives `bonus`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AwardTier {
    pub max_awards: AwardCount,
    pub bonus: f64,
}

/// The standard award buckets: 0, 1-2, 3-5, 6-10
pub const DEFAULT_AWARD_TIERS: [AwardTier; 4] = [
    AwardTier { max_awards: 0, bonus: 0.0 },
    AwardTier { max_awards: 2, bonus: 0.3 },
    AwardTier { max_awards: 5, bonus: 0.5 },
    AwardTier { max_awards: 10, bonus: 1.0 },
];

/// Bonus for award counts beyond the last tier (more than 10)
pub const DEFAULT_OVERFLOW_BONUS: f64 = 1.5;

/// Vote deficit that costs one penalty unit
pub const DEFAULT_VOTES_PER_UNIT: Votes = 100_000;

/// Rating deducted per penalty unit
pub const DEFAULT_PENALTY_PER_UNIT: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub award_tiers: Vec<AwardTier>,
    pub overflow_bonus: f64,
    pub votes_per_unit: Votes,
    pub penalty_per_unit: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            award_tiers: DEFAULT_AWARD_TIERS.to_vec(),
            overflow_bonus: DEFAULT_OVERFLOW_BONUS,
            votes_per_unit: DEFAULT_VOTES_PER_UNIT,
            penalty_per_unit: DEFAULT_PENALTY_PER_UNIT,
        }
    }
}

impl ScoringConfig {
    /// Parse a configuration from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Invalid scoring config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring config {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Failed to load scoring config {}", path.display()))
    }

    /// Check that the award buckets form a monotonic step function and the
    /// penalty constants are usable.
    pub fn validate(&self) -> data_loader::Result<()> {
        let invalid = |reason: String| Err(FilmDataError::ValidationError(reason));

        for tier in &self.award_tiers {
            if !tier.bonus.is_finite() || tier.bonus < 0.0 {
                return invalid(format!(
                    "award tier <= {} has invalid bonus {}",
                    tier.max_awards, tier.bonus
                ));
            }
        }
        for pair in self.award_tiers.windows(2) {
            if pair[1].max_awards <= pair[0].max_awards {
                return invalid(format!(
                    "award tier bounds must be strictly ascending ({} then {})",
                    pair[0].max_awards, pair[1].max_awards
                ));
            }
            if pair[1].bonus < pair[0].bonus {
                return invalid(format!(
                    "award bonus must not decrease ({} then {})",
                    pair[0].bonus, pair[1].bonus
                ));
            }
        }

        let last_bonus = self.award_tiers.last().map(|t| t.bonus).unwrap_or(0.0);
        if !self.overflow_bonus.is_finite() || self.overflow_bonus < last_bonus {
            return invalid(format!(
                "overflow bonus {} must be finite and at least {}",
                self.overflow_bonus, last_bonus
            ));
        }

        if self.votes_per_unit == 0 {
            return invalid("votes_per_unit must be greater than zero".to_string());
        }
        if !self.penalty_per_unit.is_finite() || self.penalty_per_unit < 0.0 {
            return invalid(format!(
                "penalty_per_unit {} must be finite and non-negative",
                self.penalty_per_unit
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ScoringConfig::from_json_str(r#"{ "votes_per_unit": 250000 }"#).unwrap();
        assert_eq!(config.votes_per_unit, 250_000);
        assert_eq!(config.award_tiers, DEFAULT_AWARD_TIERS.to_vec());
        assert_eq!(config.penalty_per_unit, DEFAULT_PENALTY_PER_UNIT);
    }

    #[test]
    fn test_rejects_descending_bounds() {
        let config = ScoringConfig {
            award_tiers: vec![
                AwardTier { max_awards: 5, bonus: 0.1 },
                AwardTier { max_awards: 3, bonus: 0.2 },
            ],
            ..ScoringConfig::default()
        };
        assert!(matches!(config.validate(), Err(FilmDataError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_decreasing_bonus() {
        let config = ScoringConfig {
            award_tiers: vec![
                AwardTier { max_awards: 1, bonus: 0.5 },
                AwardTier { max_awards: 3, bonus: 0.2 },
            ],
            ..ScoringConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ScoringConfig {
            overflow_bonus: 0.5,
            ..ScoringConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_votes_per_unit() {
        let result = ScoringConfig::from_json_str(r#"{ "votes_per_unit": 0 }"#);
        assert!(result.is_err());
    }
}
