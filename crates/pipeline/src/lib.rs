//! Scoring engine for the film leaderboard.
//!
//! This crate provides:
//! - Adjustment trait and implementations for rating adjustments
//! - ScoringPipeline for composing adjustments
//! - Ranking helpers and the ScoringEngine that ties them together
//!
//! ## Architecture
//! A batch is processed in stages:
//! 1. AwardBonus adds a step-function bonus per film
//! 2. PopularityPenalty deducts rating by vote deficit against the batch leader
//! 3. The adjusted films are stable-sorted and re-ranked
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{ScoringConfig, ScoringEngine};
//!
//! let engine = ScoringEngine::new(&ScoringConfig::default())?;
//! let leaderboard = engine.score(&films)?;
//! ```

pub mod traits;
pub mod config;
pub mod adjustments;
pub mod scoring_pipeline;
pub mod ranking;
pub mod engine;

// Re-export main types
pub use traits::Adjustment;
pub use config::{AwardTier, ScoringConfig};
pub use adjustments::{award_adjust, award_bonus, round_to_tenth, vote_penalty, AwardBonus, PopularityPenalty};
pub use scoring_pipeline::ScoringPipeline;
pub use ranking::{rank, rerank};
pub use engine::ScoringEngine;
