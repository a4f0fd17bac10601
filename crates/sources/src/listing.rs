//! Listing Source - films scraped from the ranked chart page
//!
//! ## Algorithm
//! 1. Fetch the chart page and take its first N rows
//! 2. For each row, parse name, rating and votes from the listing
//! 3. Fetch the film's detail page and read its award count
//!
//! Step 3 is independent per film; `resolve` is exposed separately so a
//! caller can run those fetches concurrently and join them in order.

use crate::config::{ScrapeConfig, resolve_url};
use crate::error::Result;
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::html::{self, ListingRow};
use crate::traits::FilmSource;
use data_loader::{FilmRecord, parser};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Scrapes the chart listing and per-film detail pages.
#[derive(Clone)]
pub struct ListingSource {
    /// Shared page fetcher (read-only, so no Mutex needed)
    fetcher: Arc<dyn PageFetcher>,
    config: ScrapeConfig,
}

impl ListingSource {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: ScrapeConfig) -> Self {
        Self { fetcher, config }
    }

    /// A source that talks HTTP, honouring the configured timeout
    pub fn http(config: ScrapeConfig) -> Self {
        let fetcher = Arc::new(HttpFetcher::new(config.timeout));
        Self::new(fetcher, config)
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Fetch the chart page and extract its first N rows
    #[instrument(skip(self), fields(top_n = self.config.top_n))]
    pub fn fetch_listing(&self) -> Result<Vec<ListingRow>> {
        let url = self.config.chart_url();
        info!("Fetching chart listing from {}", url);
        let page = self.fetcher.fetch(&url)?;
        let rows = html::parse_listing(&page, self.config.top_n)?;
        debug!("Extracted {} listing rows", rows.len());
        Ok(rows)
    }

    /// Absolute URL of a row's detail page
    pub fn detail_url(&self, row: &ListingRow) -> String {
        resolve_url(&self.config.base_url, &row.href)
    }

    /// Turn a listing row into a complete record.
    ///
    /// Listing fields are parsed first, so a malformed row fails before its
    /// detail page is requested.
    pub fn resolve(&self, row: &ListingRow) -> Result<FilmRecord> {
        let mut film = parser::parse_record(row.position, &row.name, &row.rating, &row.votes, 0)?;

        let url = self.detail_url(row);
        let page = self.fetcher.fetch(&url)?;
        film.award_count = html::parse_award_count(row.position, &page)?;

        debug!(
            "Resolved #{} '{}': rating={}, votes={}, awards={}",
            row.position, film.name, film.rating, film.votes, film.award_count
        );
        Ok(film)
    }
}

impl FilmSource for ListingSource {
    fn name(&self) -> &str {
        "ListingSource"
    }

    /// Sequential extraction: one detail page at a time.
    fn fetch_batch(&self) -> Result<Vec<FilmRecord>> {
        self.fetch_listing()?
            .iter()
            .map(|row| self.resolve(row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::fetcher::MemoryFetcher;
    use data_loader::FilmDataError;

    const BASE: &str = "http://films.test";

    fn row_html(rank: usize, id: &str, name: &str, votes: u64, rating: &str) -> String {
        format!(
            r#"<tr>
                <td class="posterColumn"><span name="nv" data-value="{votes}"></span></td>
                <td class="titleColumn">{rank}. <a href="/title/{id}/">{name}</a></td>
                <td class="ratingColumn imdbRating"><strong>{rating}</strong></td>
            </tr>"#
        )
    }

    fn chart(rows: &[String]) -> String {
        format!(
            "<html><table><tbody class=\"lister-list\">{}</tbody></table></html>",
            rows.concat()
        )
    }

    fn source(fetcher: MemoryFetcher, top_n: usize) -> ListingSource {
        let config = ScrapeConfig::default()
            .with_base_url(BASE)
            .with_chart_path("/chart/top/")
            .with_top_n(top_n);
        ListingSource::new(Arc::new(fetcher), config)
    }

    #[test]
    fn test_fetch_batch() {
        let fetcher = MemoryFetcher::new()
            .with_page(
                format!("{}/chart/top/", BASE),
                chart(&[
                    row_html(1, "tt1", "The Godfather", 1_900_000, "9.2"),
                    row_html(2, "tt2", "Tom &amp; Jerry", 300_000, "8.1"),
                    row_html(3, "tt3", "Not Requested", 1, "7.0"),
                ]),
            )
            .with_page(format!("{}/title/tt1/", BASE), "<b>Won 3 Oscars.</b>")
            .with_page(format!("{}/title/tt2/", BASE), "<b>Nominated for 1 Oscar.</b>");

        let films = source(fetcher, 2).fetch_batch().unwrap();

        assert_eq!(
            films,
            vec![
                FilmRecord::new("The Godfather", 9.2, 1_900_000, 3),
                FilmRecord::new("Tom & Jerry", 8.1, 300_000, 0),
            ]
        );
    }

    #[test]
    fn test_missing_detail_page_fails_batch() {
        let fetcher = MemoryFetcher::new().with_page(
            format!("{}/chart/top/", BASE),
            chart(&[row_html(1, "tt1", "Orphan", 10, "7.0")]),
        );

        let err = source(fetcher, 1).fetch_batch().unwrap_err();
        assert!(matches!(err, SourceError::Http { status: 404, .. }));
    }

    #[test]
    fn test_malformed_row_skips_detail_fetch() {
        let fetcher = Arc::new(MemoryFetcher::new().with_page(
            format!("{}/chart/top/", BASE),
            chart(&[row_html(1, "tt1", "Bad Rating", 10, "N/A")]),
        ));
        let config = ScrapeConfig::default().with_base_url(BASE).with_top_n(1);
        let listing = ListingSource::new(fetcher.clone(), config);

        let err = listing.fetch_batch().unwrap_err();
        assert!(matches!(
            err.as_data(),
            Some(FilmDataError::ExtractionFailure { position: 1, .. })
        ));
        assert_eq!(fetcher.requests().len(), 1, "only the chart should be fetched");
    }
}
