//! Orchestrator crate for the film leaderboard.
//!
//! Coordinates extraction, scoring and CSV output for one batch of films.

pub mod orchestrator;

pub use orchestrator::LeaderboardOrchestrator;
