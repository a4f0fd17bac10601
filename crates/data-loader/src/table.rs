//! CSV tables at the edges of the run.
//!
//! Two shapes are supported:
//! - raw input tables: `Name,Oscars,Rating,Votes` (one row per film)
//! - leaderboard output: `Rank,Name,Oscars,Rating,Votes`, the before rows
//!   followed by the after rows
//!
//! The output column order is fixed; downstream spreadsheets depend on it.

use crate::error::{FilmDataError, Result};
use crate::parser;
use crate::types::{FilmRecord, Leaderboard, Rank, RankedFilmRecord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Header of the leaderboard output, in column order
pub const LEADERBOARD_HEADER: [&str; 5] = ["Rank", "Name", "Oscars", "Rating", "Votes"];

/// One row of a raw input table. Numbers stay textual until the parser
/// turns them into typed fields with positional error messages.
#[derive(Debug, Deserialize)]
struct RawFilmRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Oscars", default)]
    oscars: String,
    #[serde(rename = "Rating")]
    rating: String,
    #[serde(rename = "Votes")]
    votes: String,
}

#[derive(Debug, Serialize)]
struct LeaderboardRow<'a> {
    #[serde(rename = "Rank")]
    rank: Rank,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Oscars")]
    oscars: u32,
    #[serde(rename = "Rating")]
    rating: String,
    #[serde(rename = "Votes")]
    votes: u64,
}

impl<'a> From<&'a RankedFilmRecord> for LeaderboardRow<'a> {
    fn from(ranked: &'a RankedFilmRecord) -> Self {
        Self {
            rank: ranked.rank,
            name: &ranked.film.name,
            oscars: ranked.film.award_count,
            rating: format_rating(ranked.film.rating),
            votes: ranked.film.votes,
        }
    }
}

/// Render a rating with one decimal place unless that would lose precision
///
/// Example: 7.0 -> "7.0", 8.25 -> "8.25"
pub fn format_rating(rating: f64) -> String {
    let short = format!("{:.1}", rating);
    match short.parse::<f64>() {
        Ok(value) if value == rating => short,
        _ => rating.to_string(),
    }
}

/// Read raw film records from a CSV table.
///
/// An empty `Oscars` cell counts as zero awards.
pub fn read_raw_records<R: Read>(reader: R) -> Result<Vec<FilmRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut films = Vec::new();
    for (idx, row) in csv_reader.deserialize::<RawFilmRow>().enumerate() {
        let position = idx + 1;
        let row = row?;
        let award_count = if row.oscars.is_empty() {
            0
        } else {
            parser::parse_award_count(position, &row.oscars)?
        };
        films.push(parser::parse_record(
            position,
            &row.name,
            &row.rating,
            &row.votes,
            award_count,
        )?);
    }
    Ok(films)
}

/// Read raw film records from a CSV file on disk
pub fn read_raw_records_file(path: &Path) -> Result<Vec<FilmRecord>> {
    let file = File::open(path).map_err(|e| {
        FilmDataError::IoError(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    read_raw_records(file)
}

/// Write both rankings of a leaderboard as one CSV table.
pub fn write_leaderboard<W: Write>(writer: W, leaderboard: &Leaderboard) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if leaderboard.is_empty() {
        csv_writer.write_record(LEADERBOARD_HEADER)?;
    }
    for ranked in leaderboard.rows() {
        csv_writer.serialize(LeaderboardRow::from(ranked))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a leaderboard to a CSV file, replacing any existing file.
///
/// Rows go to a temporary file in the target directory, which is renamed
/// over `path` only after the whole table is flushed. A failed write leaves
/// any previous file untouched.
pub fn write_leaderboard_file(path: &Path, leaderboard: &Leaderboard) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    write_leaderboard(staged.as_file_mut(), leaderboard)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}
