//! # Leaderboard Orchestrator
//!
//! This module coordinates one leaderboard run:
//! 1. Fetch the chart listing
//! 2. Resolve every film (detail page fetches, bounded concurrency)
//! 3. Score the complete batch
//! 4. Write the before/after CSV
//!
//! Detail fetches are blocking HTTP calls, so each runs on tokio's blocking
//! pool. A semaphore caps how many run at once; results are joined back into
//! listing order before scoring, because the popularity penalty needs the
//! whole batch. The first failed film aborts the run.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, instrument, warn};

use data_loader::{FilmRecord, Leaderboard, table};
use pipeline::ScoringEngine;
use sources::{FilmSource, ListingSource};

/// Runs extraction, scoring and presentation for one batch.
#[derive(Clone)]
pub struct LeaderboardOrchestrator {
    engine: Arc<ScoringEngine>,
    output: Option<PathBuf>,
}

impl LeaderboardOrchestrator {
    /// Create an orchestrator that scores with `engine` and writes nothing.
    pub fn new(engine: ScoringEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            output: None,
        }
    }

    /// Write the leaderboard CSV to `path` at the end of each run
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Scrape, score and publish.
    #[instrument(skip(self, source), fields(top_n = source.config().top_n))]
    pub async fn run_scrape(&self, source: ListingSource) -> Result<Leaderboard> {
        let start_time = Instant::now();

        let films = self.extract_concurrently(source).await?;
        info!("Extracted {} films in {:.2?}", films.len(), start_time.elapsed());

        let leaderboard = self.score(&films)?;
        self.publish(&leaderboard)?;

        info!("Total run time: {:.2?}", start_time.elapsed());
        Ok(leaderboard)
    }

    /// Score and publish a batch from any source (e.g. a CSV snapshot).
    pub async fn run_source(&self, source: Arc<dyn FilmSource>) -> Result<Leaderboard> {
        let name = source.name().to_string();
        let films = tokio::task::spawn_blocking(move || source.fetch_batch())
            .await
            .context("Source task panicked")?
            .with_context(|| format!("{} failed", name))?;
        info!("{} produced {} films", name, films.len());

        let leaderboard = self.score(&films)?;
        self.publish(&leaderboard)?;
        Ok(leaderboard)
    }

    /// Fetch the listing, then resolve every row on the blocking pool.
    async fn extract_concurrently(&self, source: ListingSource) -> Result<Vec<FilmRecord>> {
        let listing = source.clone();
        let rows = tokio::task::spawn_blocking(move || listing.fetch_listing())
            .await
            .context("Listing task panicked")?
            .context("Failed to fetch chart listing")?;

        let expected = rows.len();
        let concurrency = source.config().concurrency.max(1);
        info!(
            "Resolving {} films with up to {} concurrent detail fetches",
            expected, concurrency
        );

        let semaphore = Arc::new(Semaphore::new(concurrency));
        let mut tasks = JoinSet::new();
        for row in rows {
            let semaphore = semaphore.clone();
            let source = source.clone();
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .context("Detail fetch limiter closed")?;
                let position = row.position;
                let film = tokio::task::spawn_blocking(move || source.resolve(&row))
                    .await
                    .context("Detail fetch task panicked")?
                    .with_context(|| format!("Failed to resolve film #{}", position))?;
                Ok::<_, anyhow::Error>((position, film))
            });
        }

        let mut resolved = Vec::with_capacity(expected);
        while let Some(joined) = tasks.join_next().await {
            match joined.context("Detail fetch task failed to join")? {
                Ok(pair) => resolved.push(pair),
                Err(err) => {
                    warn!("Aborting batch: {:#}", err);
                    tasks.abort_all();
                    return Err(err);
                }
            }
        }

        // Restore listing order
        resolved.sort_by_key(|(position, _)| *position);
        Ok(resolved.into_iter().map(|(_, film)| film).collect())
    }

    fn score(&self, films: &[FilmRecord]) -> Result<Leaderboard> {
        self.engine
            .score(films)
            .context("Failed to score batch")
    }

    fn publish(&self, leaderboard: &Leaderboard) -> Result<()> {
        if let Some(path) = &self.output {
            table::write_leaderboard_file(path, leaderboard)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                "Wrote {} rows to {}",
                leaderboard.before.len() + leaderboard.after.len(),
                path.display()
            );
        }
        Ok(())
    }
}

impl Default for LeaderboardOrchestrator {
    fn default() -> Self {
        Self::new(ScoringEngine::default())
    }
}
