use std::env;
use std::path::PathBuf;
use std::time::Duration;

use log::warn;
use url::Url;

use crate::error::ScrapeError;

pub const DEFAULT_BASE_URL: &str = "https://delhihighcourt.nic.in";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DOWNLOADS_DIR: &str = "downloads";

// The court site turns away non-browser clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

const CASE_SEARCH_PATH: &str = "/app/case-number";
const VALIDATE_CAPTCHA_PATH: &str = "/app/validateCaptcha";

/// Everything the scraper needs to know about the target site and the local disk.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub downloads_dir: PathBuf,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        ScraperConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            downloads_dir: PathBuf::from(DEFAULT_DOWNLOADS_DIR),
        }
    }
}

impl ScraperConfig {
    /// Defaults, overridden by `COURT_BASE_URL`, `COURT_TIMEOUT_SECS`,
    /// `COURT_USER_AGENT` and `COURT_DOWNLOADS_DIR` when set.
    pub fn from_env() -> Self {
        let mut config = ScraperConfig::default();

        if let Ok(base) = env::var("COURT_BASE_URL") {
            if !base.trim().is_empty() {
                config.base_url = base.trim().to_string();
            }
        }
        if let Ok(raw) = env::var("COURT_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!("Ignoring invalid COURT_TIMEOUT_SECS value '{}'", raw),
            }
        }
        if let Ok(ua) = env::var("COURT_USER_AGENT") {
            if !ua.trim().is_empty() {
                config.user_agent = ua;
            }
        }
        if let Ok(dir) = env::var("COURT_DOWNLOADS_DIR") {
            if !dir.trim().is_empty() {
                config.downloads_dir = PathBuf::from(dir);
            }
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_downloads_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.downloads_dir = dir.into();
        self
    }

    pub fn base(&self) -> Result<Url, ScrapeError> {
        Url::parse(self.base_url.trim_end_matches('/'))
            .map_err(|e| ScrapeError::Config(format!("invalid base URL '{}': {}", self.base_url, e)))
    }

    pub fn case_search_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CASE_SEARCH_PATH)
    }

    pub fn validate_captcha_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), VALIDATE_CAPTCHA_PATH)
    }

    /// Scheme + host of the base URL, as browsers send it in `Origin`.
    pub fn origin(&self) -> String {
        match Url::parse(&self.base_url) {
            Ok(u) => u.origin().ascii_serialization(),
            Err(_) => self.base_url.trim_end_matches('/').to_string(),
        }
    }
}
