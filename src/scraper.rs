use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{error, info, warn};
use url::Url;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::extractor::Extractor;
use crate::model::{CaseQuery, CaseResult, SearchStatus};
use crate::session::{self, Session};

/// Runs the case-number search workflow against the court site.
///
/// Every call opens its own session; nothing is kept between calls and
/// nothing is retried here. See [`crate::delay_manager`] for retries.
pub struct CourtScraper {
    config: ScraperConfig,
    extractor: Extractor,
}

impl CourtScraper {
    pub fn new(config: ScraperConfig) -> Self {
        CourtScraper {
            config,
            extractor: Extractor::new(),
        }
    }

    /// `case_type` may be the website code (`CW`) or its display name (`W.P.(C)`).
    pub fn search_case(&self, case_type: &str, case_number: &str, year: &str) -> Result<CaseResult, ScrapeError> {
        let query = CaseQuery::new(case_type, case_number, year)?;
        self.search(&query)
    }

    pub fn search(&self, query: &CaseQuery) -> Result<CaseResult, ScrapeError> {
        info!("Starting case search for {}", query.identifier());
        let started = Instant::now();
        let base = self.config.base()?;

        let results_html = Session::open(&self.config)
            .and_then(|loaded| loaded.extract_challenge(&self.extractor))
            .and_then(|challenged| challenged.validate())
            .and_then(|validated| validated.submit(query))
            .map_err(|e| {
                error!("Case search for {} failed: {}", query.identifier(), e);
                e
            })?;

        info!("Step 5: Parsing results table");
        let parsed = self.extractor.parse_results(&results_html, &base);

        let status = if parsed.cases.is_empty() {
            warn!(
                "No cases found for {}: {}",
                query.identifier(),
                parsed.notice.as_deref().unwrap_or("empty response")
            );
            SearchStatus::NoResults
        } else {
            info!("Found {} case(s) for {}", parsed.cases.len(), query.identifier());
            SearchStatus::Success
        };

        let elapsed = started.elapsed();
        info!("Search completed in {:.2} seconds", elapsed.as_secs_f64());

        Ok(CaseResult {
            query: query.clone(),
            status,
            table_shape: parsed.shape,
            cases: parsed.cases,
            notice: parsed.notice,
            duration_ms: elapsed.as_millis() as u64,
        })
    }

    /// Fetches a judgment PDF from the court site and saves it as
    /// `<downloads_dir>/<case_id>.pdf`. Links to other hosts are refused.
    pub fn download_pdf(&self, pdf_url: &str, case_id: &str) -> Result<PathBuf, ScrapeError> {
        let base = self.config.base()?;
        let url = base
            .join(pdf_url.trim())
            .map_err(|e| ScrapeError::InvalidQuery(format!("bad PDF link '{}': {}", pdf_url, e)))?;
        if !same_site(&base, &url) {
            return Err(ScrapeError::InvalidQuery(format!(
                "refusing to download from outside {}: {}",
                self.config.base_url, url
            )));
        }

        info!("Downloading PDF: {}", url);
        let client = session::build_client(&self.config)?;
        let bytes = client
            .get(url.as_str())
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes())
            .map_err(ScrapeError::network("pdf download"))?;

        let dir = &self.config.downloads_dir;
        fs::create_dir_all(dir).map_err(ScrapeError::io(dir))?;

        let path = dir.join(format!("{}.pdf", secure_filename(case_id)));
        if let Err(e) = write_file(&path, &bytes) {
            // Leave no half-written PDF behind.
            let _ = fs::remove_file(&path);
            return Err(ScrapeError::Io { path, source: e });
        }

        info!("PDF saved: {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn same_site(base: &Url, url: &Url) -> bool {
    base.scheme() == url.scheme()
        && base.host_str() == url.host_str()
        && base.port_or_known_default() == url.port_or_known_default()
}

/// Keeps ASCII letters, digits, `-`, `_` and `.`; anything else becomes `_`.
pub fn secure_filename(name: &str) -> String {
    let mapped: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect();
    let cleaned = mapped.trim_matches(|c| c == '.' || c == '_');
    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned.to_string()
    }
}
