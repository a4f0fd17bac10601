//! Parsing of raw scraped text into typed film fields.
//!
//! Sources hand over strings exactly as they appear in the page or table:
//! - rating: "9.2"
//! - votes: "2705845" or "2,705,845"
//! - award count: "7"
//!
//! Each parser reports failures as `ExtractionFailure` carrying the film's
//! listing position, so a bad record aborts the batch with a useful message.

use crate::error::{FilmDataError, Result};
use crate::types::{AwardCount, FilmRecord, Votes};

/// Parse a rating such as "8.7"
pub fn parse_rating(position: usize, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FilmDataError::extraction(position, "rating", "is missing"));
    }
    let rating: f64 = trimmed.parse().map_err(|e| {
        FilmDataError::extraction(position, "rating", format!("'{}' is not a number: {}", trimmed, e))
    })?;
    if !rating.is_finite() {
        return Err(FilmDataError::extraction(
            position,
            "rating",
            format!("'{}' is not a finite number", trimmed),
        ));
    }
    Ok(rating)
}

/// Parse a vote count, tolerating thousands separators
///
/// Example: "1,234,567" -> 1234567
pub fn parse_votes(position: usize, raw: &str) -> Result<Votes> {
    let digits: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if digits.is_empty() {
        return Err(FilmDataError::extraction(position, "votes", "is missing"));
    }
    digits.parse().map_err(|e| {
        FilmDataError::extraction(position, "votes", format!("'{}' is not a vote count: {}", raw.trim(), e))
    })
}

/// Parse an award count such as "11"
pub fn parse_award_count(position: usize, raw: &str) -> Result<AwardCount> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FilmDataError::extraction(position, "awards", "is missing"));
    }
    trimmed.parse().map_err(|e| {
        FilmDataError::extraction(position, "awards", format!("'{}' is not an award count: {}", trimmed, e))
    })
}

/// Assemble a record from raw fields, parsing the numeric ones
pub fn parse_record(
    position: usize,
    name: &str,
    rating: &str,
    votes: &str,
    award_count: AwardCount,
) -> Result<FilmRecord> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FilmDataError::extraction(position, "name", "is missing"));
    }
    Ok(FilmRecord {
        name: name.to_string(),
        rating: parse_rating(position, rating)?,
        votes: parse_votes(position, votes)?,
        award_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating(1, " 9.2 ").unwrap(), 9.2);
        assert!(matches!(
            parse_rating(3, "n/a"),
            Err(FilmDataError::ExtractionFailure { position: 3, .. })
        ));
        assert!(parse_rating(1, "").is_err());
        assert!(parse_rating(1, "inf").is_err());
    }

    #[test]
    fn test_parse_votes_with_separators() {
        assert_eq!(parse_votes(1, "2,705,845").unwrap(), 2_705_845);
        assert_eq!(parse_votes(1, "300000").unwrap(), 300_000);
    }

    #[test]
    fn test_parse_votes_rejects_negative() {
        let err = parse_votes(4, "-12").unwrap_err();
        match err {
            FilmDataError::ExtractionFailure { position, field, .. } => {
                assert_eq!(position, 4);
                assert_eq!(field, "votes");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_award_count() {
        assert_eq!(parse_award_count(1, "11").unwrap(), 11);
        assert!(parse_award_count(1, "-1").is_err());
        assert!(parse_award_count(1, "").is_err());
    }

    #[test]
    fn test_parse_record() {
        let film = parse_record(1, " The Godfather ", "9.2", "1,900,000", 3).unwrap();
        assert_eq!(film.name, "The Godfather");
        assert_eq!(film.rating, 9.2);
        assert_eq!(film.votes, 1_900_000);
        assert_eq!(film.award_count, 3);

        assert!(parse_record(2, "", "9.2", "10", 0).is_err());
    }
}
