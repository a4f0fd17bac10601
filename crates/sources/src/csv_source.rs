//! CSV Source - films read from a raw-record table
//!
//! Lets a saved snapshot (columns `Name,Oscars,Rating,Votes`) be re-scored
//! without touching the network.

use crate::error::Result;
use crate::traits::FilmSource;
use data_loader::{FilmDataError, FilmRecord, table};
use std::path::PathBuf;
use tracing::info;

pub struct CsvSource {
    path: PathBuf,
    /// Required batch size; `None` takes every row
    limit: Option<usize>,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            limit: None,
        }
    }

    /// Require exactly `limit` films: extra rows are ignored, missing rows
    /// fail the batch.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl FilmSource for CsvSource {
    fn name(&self) -> &str {
        "CsvSource"
    }

    fn fetch_batch(&self) -> Result<Vec<FilmRecord>> {
        let mut films = table::read_raw_records_file(&self.path)?;
        info!("Read {} films from {}", films.len(), self.path.display());

        if let Some(limit) = self.limit {
            if films.len() < limit {
                return Err(FilmDataError::extraction(
                    films.len() + 1,
                    "row",
                    format!(
                        "{} has {} films, {} requested",
                        self.path.display(),
                        films.len(),
                        limit
                    ),
                )
                .into());
            }
            films.truncate(limit);
        }
        Ok(films)
    }
}
