//! Error types for film sources.

use data_loader::FilmDataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    /// The server answered with a non-success status
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u16 },

    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("GET {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// A page or table was fetched but its content could not be turned
    /// into film records
    #[error(transparent)]
    Data(#[from] FilmDataError),
}

impl SourceError {
    /// The underlying data error, if this failure was about content
    pub fn as_data(&self) -> Option<&FilmDataError> {
        match self {
            Self::Data(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
