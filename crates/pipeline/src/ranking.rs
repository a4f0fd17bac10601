//! Rank assignment for the before and after leaderboards.

use data_loader::{FilmRecord, RankedFilmRecord};
use std::cmp::Ordering;

/// Number films 1..N in the order given.
pub fn rank(films: &[FilmRecord]) -> Vec<RankedFilmRecord> {
    films
        .iter()
        .enumerate()
        .map(|(idx, film)| RankedFilmRecord {
            rank: idx + 1,
            original_rank: idx + 1,
            film: film.clone(),
        })
        .collect()
}

/// Sort films by rating (highest first) and number them 1..N.
///
/// The sort is stable: films with equal ratings keep their input order.
/// `original_rank` records each film's input position.
pub fn rerank(films: Vec<FilmRecord>) -> Vec<RankedFilmRecord> {
    let mut indexed: Vec<(usize, FilmRecord)> = films.into_iter().enumerate().collect();

    // Sort by rating DESC
    indexed.sort_by(|a, b| {
        b.1.rating
            .partial_cmp(&a.1.rating)
            .unwrap_or(Ordering::Equal)
    });

    indexed
        .into_iter()
        .enumerate()
        .map(|(idx, (origin, film))| RankedFilmRecord {
            rank: idx + 1,
            original_rank: origin + 1,
            film,
        })
        .collect()
}
