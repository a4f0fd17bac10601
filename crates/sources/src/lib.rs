//! # Sources Crate
//!
//! Extraction adapters that produce a batch of film records.
//!
//! ## Components
//!
//! ### Listing Source (network)
//! Scrapes the ranked chart page for name, rating and vote count, then each
//! film's detail page for its award count.
//!
//! ### CSV Source (offline)
//! Reads the same four fields from a raw-record table.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{FilmSource, ListingSource, ScrapeConfig};
//!
//! let source = ListingSource::http(ScrapeConfig::default().with_top_n(20));
//! let films = source.fetch_batch()?;
//! ```
//!
//! Every source either returns the full batch or fails it; there are no
//! partial batches and no retries.

// Public modules
pub mod error;
pub mod config;
pub mod fetcher;
pub mod html;
pub mod traits;
pub mod listing;
pub mod csv_source;

// Re-export commonly used types
pub use error::{Result, SourceError};
pub use config::ScrapeConfig;
pub use fetcher::{HttpFetcher, MemoryFetcher, PageFetcher};
pub use html::ListingRow;
pub use traits::FilmSource;
pub use listing::ListingSource;
pub use csv_source::CsvSource;
