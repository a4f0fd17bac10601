//! Scrape settings, passed to the listing source at construction.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.imdb.com";
pub const DEFAULT_CHART_PATH: &str = "/chart/top/";
pub const DEFAULT_TOP_N: usize = 20;
pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where to scrape from and how much.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeConfig {
    /// Site root; detail links on the listing are resolved against it
    pub base_url: String,
    /// Path of the ranked listing page, relative to `base_url`
    pub chart_path: String,
    /// Number of films in the batch (N)
    pub top_n: usize,
    /// Maximum detail pages fetched at once
    pub concurrency: usize,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            chart_path: DEFAULT_CHART_PATH.to_string(),
            top_n: DEFAULT_TOP_N,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ScrapeConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_chart_path(mut self, chart_path: impl Into<String>) -> Self {
        self.chart_path = chart_path.into();
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Configure detail-page parallelism (clamped to at least 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL of the listing page
    pub fn chart_url(&self) -> String {
        resolve_url(&self.base_url, &self.chart_path)
    }
}

/// Resolve a link found on a page against the site root.
///
/// Absolute links are returned unchanged.
pub fn resolve_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        format!("{}/{}", base, href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_url() {
        assert_eq!(ScrapeConfig::default().chart_url(), "https://www.imdb.com/chart/top/");
        let config = ScrapeConfig::default()
            .with_base_url("http://localhost:8080/")
            .with_chart_path("top.html");
        assert_eq!(config.chart_url(), "http://localhost:8080/top.html");
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(
            resolve_url("https://www.imdb.com", "/title/tt0111161/"),
            "https://www.imdb.com/title/tt0111161/"
        );
        assert_eq!(
            resolve_url("https://www.imdb.com", "https://example.org/x"),
            "https://example.org/x"
        );
    }

    #[test]
    fn test_concurrency_floor() {
        assert_eq!(ScrapeConfig::default().with_concurrency(0).concurrency, 1);
    }
}
