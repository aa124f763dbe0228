use std::path::PathBuf;

use thiserror::Error;

/// Failures of a case search or PDF download.
///
/// An empty search is not an error; it comes back as
/// [`SearchStatus::NoResults`](crate::model::SearchStatus).
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Connectivity problems, timeouts and HTTP error statuses.
    #[error("network error during {step}: {source}")]
    Network {
        step: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The page no longer has the structure we expect. Usually means the site changed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The site rejected the CAPTCHA. A fresh session usually fixes it.
    #[error("captcha rejected: {0}")]
    Captcha(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScrapeError {
    pub(crate) fn network(step: &'static str) -> impl FnOnce(reqwest::Error) -> ScrapeError {
        move |source| ScrapeError::Network { step, source }
    }

    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> ScrapeError {
        let path = path.into();
        move |source| ScrapeError::Io { path, source }
    }

    /// Only CAPTCHA rejections are worth retrying with a new session.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScrapeError::Captcha(_))
    }

    /// Short machine-readable label, used by the HTTP API.
    pub fn kind(&self) -> &'static str {
        match self {
            ScrapeError::Network { .. } => "network_error",
            ScrapeError::Parse(_) => "parse_error",
            ScrapeError::Captcha(_) => "captcha_error",
            ScrapeError::InvalidQuery(_) => "invalid_query",
            ScrapeError::Config(_) => "config_error",
            ScrapeError::Io { .. } => "io_error",
        }
    }
}
