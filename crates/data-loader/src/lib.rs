//! # Data Loader Crate
//!
//! Film records for the leaderboard and everything needed to get them in
//! and out of the process.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (FilmRecord, RankedFilmRecord, Leaderboard)
//! - **parser**: Turn scraped text into typed fields
//! - **table**: Read raw-record CSVs and write the leaderboard CSV
//! - **error**: The error taxonomy shared by every crate in the workspace
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::table;
//! use std::path::Path;
//!
//! let films = table::read_raw_records_file(Path::new("films.csv"))?;
//! data_loader::validate_batch(&films)?;
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod table;

// Re-export commonly used types for convenience
pub use error::{FilmDataError, Result};
pub use types::{
    // Type aliases
    AwardCount,
    Rank,
    Votes,
    // Core types
    FilmRecord,
    Leaderboard,
    RankedFilmRecord,
    // Validation
    validate_batch,
    RATING_MAX,
    RATING_MIN,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaderboard_rows_order() {
        let a = FilmRecord::new("A", 8.0, 10, 0);
        let b = FilmRecord::new("B", 9.0, 20, 0);
        let board = Leaderboard {
            before: vec![
                RankedFilmRecord { rank: 1, original_rank: 1, film: a.clone() },
                RankedFilmRecord { rank: 2, original_rank: 2, film: b.clone() },
            ],
            after: vec![
                RankedFilmRecord { rank: 1, original_rank: 2, film: b },
                RankedFilmRecord { rank: 2, original_rank: 1, film: a },
            ],
        };

        let names: Vec<&str> = board.rows().map(|r| r.film.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "B", "A"]);
        assert_eq!(board.len(), 2);
        assert!(!board.is_empty());
    }
}
