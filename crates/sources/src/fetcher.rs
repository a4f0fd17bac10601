//! Page retrieval.
//!
//! `PageFetcher` is the only place the extraction code touches the network.
//! `HttpFetcher` is the real implementation (ureq, blocking); `MemoryFetcher`
//! serves canned pages for tests and offline demos.

use crate::error::{Result, SourceError};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("film-leaderboard/", env!("CARGO_PKG_VERSION"));

/// Fetches the body of a page by absolute URL.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP client, one shared connection pool.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false) // statuses are mapped to SourceError::Http below
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept-Language", "en-US,en;q=0.8")
            .call()
            .map_err(|e| SourceError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(SourceError::Http {
                url: url.to_string(),
                status,
            });
        }

        response
            .into_body()
            .read_to_string()
            .map_err(|e| SourceError::Transport {
                url: url.to_string(),
                reason: format!("could not read body: {}", e),
            })
    }
}

/// Serves pages from memory; unknown URLs answer 404.
#[derive(Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page body for a URL (builder pattern)
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    /// URLs requested so far, in request order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

impl PageFetcher for MemoryFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(url.to_string());
        }
        self.pages.get(url).cloned().ok_or_else(|| SourceError::Http {
            url: url.to_string(),
            status: 404,
        })
    }
}
