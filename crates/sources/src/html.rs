//! Field extraction from the chart listing and film detail pages.
//!
//! Listing layout (one `<tr>` per film inside `tbody.lister-list`):
//!
//! ```text
//! <tr>
//!   <td class="posterColumn"> ... <span name="nv" data-value="2705845"></span> ... </td>
//!   <td class="titleColumn"> 1. <a href="/title/tt0111161/">The Shawshank Redemption</a> ... </td>
//!   <td class="ratingColumn imdbRating"><strong title="...">9.2</strong></td>
//! </tr>
//! ```
//!
//! Detail pages mention the award count as "Won 7 Oscars".

use data_loader::{AwardCount, FilmDataError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Raw fields of one listing row, before numeric parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRow {
    /// 1-based position in the listing
    pub position: usize,
    pub name: String,
    /// Link to the detail page as written in the listing (usually relative)
    pub href: String,
    pub votes: String,
    pub rating: String,
}

static LISTING_BODY: OnceLock<Regex> = OnceLock::new();
static TABLE_ROW: OnceLock<Regex> = OnceLock::new();
static TITLE_CELL: OnceLock<Regex> = OnceLock::new();
static ANCHOR: OnceLock<Regex> = OnceLock::new();
static HREF_ATTR: OnceLock<Regex> = OnceLock::new();
static VOTES_SPAN: OnceLock<Regex> = OnceLock::new();
static DATA_VALUE_ATTR: OnceLock<Regex> = OnceLock::new();
static RATING_STRONG: OnceLock<Regex> = OnceLock::new();
static AWARDS_WON: OnceLock<Regex> = OnceLock::new();
static TAG: OnceLock<Regex> = OnceLock::new();

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("valid regex"))
}

fn listing_body() -> &'static Regex {
    regex(
        &LISTING_BODY,
        r#"(?is)<tbody[^>]*\bclass\s*=\s*"[^"]*\blister-list\b[^"]*"[^>]*>(.*?)</tbody>"#,
    )
}

fn table_row() -> &'static Regex {
    regex(&TABLE_ROW, r"(?is)<tr\b[^>]*>(.*?)</tr>")
}

fn title_cell() -> &'static Regex {
    regex(
        &TITLE_CELL,
        r#"(?is)<td[^>]*\bclass\s*=\s*"[^"]*\btitleColumn\b[^"]*"[^>]*>(.*?)</td>"#,
    )
}

fn anchor() -> &'static Regex {
    regex(&ANCHOR, r"(?is)<a\b([^>]*)>(.*?)</a>")
}

fn href_attr() -> &'static Regex {
    regex(&HREF_ATTR, r#"(?i)\bhref\s*=\s*"([^"]*)""#)
}

fn votes_span() -> &'static Regex {
    regex(&VOTES_SPAN, r#"(?is)<span\b[^>]*\bname\s*=\s*"nv"[^>]*>"#)
}

fn data_value_attr() -> &'static Regex {
    regex(&DATA_VALUE_ATTR, r#"(?i)\bdata-value\s*=\s*"([^"]*)""#)
}

fn rating_strong() -> &'static Regex {
    regex(
        &RATING_STRONG,
        r#"(?is)<td[^>]*\bclass\s*=\s*"[^"]*\bimdbRating\b[^"]*"[^>]*>.*?<strong\b[^>]*>(.*?)</strong>"#,
    )
}

fn awards_won() -> &'static Regex {
    regex(&AWARDS_WON, r"\bWon\s+(\d+)")
}

fn tag() -> &'static Regex {
    regex(&TAG, r"(?s)<[^>]*>")
}

/// Extract the first `limit` rows of the chart listing.
///
/// Fails if the listing table is missing, if it has fewer than `limit`
/// rows, or if any of those rows lacks a field.
pub fn parse_listing(html: &str, limit: usize) -> Result<Vec<ListingRow>> {
    let body = listing_body()
        .captures(html)
        .and_then(|c| c.get(1))
        .ok_or_else(|| FilmDataError::extraction(0, "listing", "table tbody.lister-list not found"))?
        .as_str();

    let rows: Vec<&str> = table_row()
        .captures_iter(body)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .take(limit)
        .collect();

    if rows.len() < limit {
        return Err(FilmDataError::extraction(
            rows.len() + 1,
            "listing",
            format!("only {} rows available, {} requested", rows.len(), limit),
        ));
    }

    rows.iter()
        .enumerate()
        .map(|(idx, row)| parse_listing_row(idx + 1, row))
        .collect()
}

/// Extract the raw fields of one `<tr>` body.
pub fn parse_listing_row(position: usize, row: &str) -> Result<ListingRow> {
    let cell = title_cell()
        .captures(row)
        .and_then(|c| c.get(1))
        .ok_or_else(|| FilmDataError::extraction(position, "name", "title cell not found"))?
        .as_str();

    let link = anchor()
        .captures(cell)
        .ok_or_else(|| FilmDataError::extraction(position, "name", "title link not found"))?;
    let attrs = link.get(1).map(|m| m.as_str()).unwrap_or_default();
    let name = text_content(link.get(2).map(|m| m.as_str()).unwrap_or_default());

    let href = href_attr()
        .captures(attrs)
        .and_then(|c| c.get(1))
        .map(|m| decode_entities(m.as_str()))
        .ok_or_else(|| FilmDataError::extraction(position, "link", "title link has no href"))?;

    let votes = votes_span()
        .find(row)
        .and_then(|span| data_value_attr().captures(span.as_str()))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or_else(|| FilmDataError::extraction(position, "votes", "vote count not found"))?;

    let rating = rating_strong()
        .captures(row)
        .and_then(|c| c.get(1))
        .map(|m| text_content(m.as_str()))
        .ok_or_else(|| FilmDataError::extraction(position, "rating", "rating cell not found"))?;

    Ok(ListingRow {
        position,
        name,
        href,
        votes,
        rating,
    })
}

/// Award count mentioned on a detail page ("Won 7 Oscars" -> 7).
///
/// Pages without such a phrase count as zero awards.
pub fn parse_award_count(position: usize, html: &str) -> Result<AwardCount> {
    match awards_won().captures(html).and_then(|c| c.get(1)) {
        Some(count) => count.as_str().parse().map_err(|e| {
            FilmDataError::extraction(
                position,
                "awards",
                format!("'{}' is not an award count: {}", count.as_str(), e),
            )
        }),
        None => Ok(0),
    }
}

/// Visible text of an HTML fragment: tags removed, entities decoded,
/// whitespace collapsed.
pub fn text_content(fragment: &str) -> String {
    let stripped = tag().replace_all(fragment, " ");
    decode_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode named and numeric character references.
pub fn decode_entities(s: &str) -> String {
    html_escape::decode_html_entities(s).into_owned()
}
