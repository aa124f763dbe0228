//! One search session against the court site.
//!
//! Each step consumes the previous state and returns the next one, so a
//! search can only be submitted after the CAPTCHA extracted from the same
//! page load has been accepted:
//!
//! `Session::open` → [`LoadedSession`] → [`ChallengedSession`] → [`ValidatedSession`] → results HTML

use reqwest::blocking::Client;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER, USER_AGENT,
};
use log::{debug, info};

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::extractor::{Challenge, Extractor};
use crate::model::CaseQuery;

const X_REQUESTED_WITH: &str = "X-Requested-With";

pub(crate) fn build_client(config: &ScraperConfig) -> Result<Client, ScrapeError> {
    let mut headers = HeaderMap::new();
    let user_agent = HeaderValue::from_str(&config.user_agent)
        .map_err(|e| ScrapeError::Config(format!("invalid User-Agent: {}", e)))?;
    headers.insert(USER_AGENT, user_agent);
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"Windows\""));

    Client::builder()
        .timeout(config.timeout)
        .default_headers(headers)
        .cookie_store(true)
        .build()
        .map_err(ScrapeError::network("client setup"))
}

/// Cookie jar plus the endpoints it talks to. Never shared between searches.
pub struct Session {
    client: Client,
    config: ScraperConfig,
}

pub struct LoadedSession {
    session: Session,
    html: String,
}

pub struct ChallengedSession {
    session: Session,
    challenge: Challenge,
}

pub struct ValidatedSession {
    session: Session,
    challenge: Challenge,
}

impl Session {
    /// Step 1: fresh cookie jar, GET the case-number search page.
    pub fn open(config: &ScraperConfig) -> Result<LoadedSession, ScrapeError> {
        let client = build_client(config)?;
        let url = config.case_search_url();
        info!("Step 1: Accessing case search page {}", url);

        let html = client
            .get(&url)
            .header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(ScrapeError::network("search page load"))?;

        debug!("Search page: {} bytes", html.len());
        Ok(LoadedSession {
            session: Session { client, config: config.clone() },
            html,
        })
    }
}

impl LoadedSession {
    /// Step 2: pull the CAPTCHA text and `_token` out of the page.
    pub fn extract_challenge(self, extractor: &Extractor) -> Result<ChallengedSession, ScrapeError> {
        info!("Step 2: Extracting captcha code and token");
        let challenge = extractor.extract_challenge(&self.html)?;
        info!(
            "Extracted captcha: {}, token: {}...",
            challenge.captcha,
            truncate(&challenge.token, 20)
        );
        Ok(ChallengedSession { session: self.session, challenge })
    }
}

impl ChallengedSession {
    /// Step 3: submit the token/CAPTCHA pair the way the page's XHR does.
    pub fn validate(self) -> Result<ValidatedSession, ScrapeError> {
        info!("Step 3: Validating captcha");
        let config = &self.session.config;

        let resp = self
            .session
            .client
            .post(config.validate_captcha_url())
            .header(X_REQUESTED_WITH, "XMLHttpRequest")
            .header(ACCEPT, "*/*")
            .header(ORIGIN, config.origin())
            .header(REFERER, config.case_search_url())
            .header("Sec-Fetch-Mode", "cors")
            .header("Sec-Fetch-Site", "same-origin")
            .form(&[
                ("_token", self.challenge.token.as_str()),
                ("captchaInput", self.challenge.captcha.as_str()),
            ])
            .send()
            .map_err(ScrapeError::network("captcha validation"))?;

        let status = resp.status();
        let body = resp.text().map_err(ScrapeError::network("captcha validation"))?;

        if !status.is_success() {
            return Err(ScrapeError::Captcha(format!("validation endpoint answered {}", status)));
        }
        if let Some(reason) = rejection_reason(&body) {
            return Err(ScrapeError::Captcha(reason));
        }

        debug!("Captcha accepted ({})", status);
        Ok(ValidatedSession { session: self.session, challenge: self.challenge })
    }
}

impl ValidatedSession {
    /// Step 4: POST the search form. The session is spent afterwards.
    pub fn submit(self, query: &CaseQuery) -> Result<String, ScrapeError> {
        info!("Step 4: Submitting case search for {}", query.identifier());
        let config = &self.session.config;

        self.session
            .client
            .post(config.case_search_url())
            .header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header(ORIGIN, config.origin())
            .header(REFERER, config.case_search_url())
            .header("Sec-Fetch-Mode", "navigate")
            .header("Sec-Fetch-Site", "same-origin")
            .header("Upgrade-Insecure-Requests", "1")
            .form(&[
                ("_token", self.challenge.token.as_str()),
                ("case_type", query.case_type.as_str()),
                ("case_number", query.case_number.as_str()),
                ("year", query.year.as_str()),
                ("randomid", self.challenge.captcha.as_str()),
                ("captchaInput", self.challenge.captcha.as_str()),
            ])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(ScrapeError::network("case search submit"))
    }
}

/// The validation endpoint answers 200 with a JSON verdict. Anything that
/// is not an explicit "no" counts as accepted.
pub(crate) fn rejection_reason(body: &str) -> Option<String> {
    const REJECTED: &str = "site rejected the captcha";
    let value: serde_json::Value = serde_json::from_str(body.trim()).ok()?;

    let obj = match &value {
        serde_json::Value::Object(obj) => obj,
        bare if is_negative(bare) => return Some(REJECTED.to_string()),
        _ => return None,
    };

    let rejected = ["success", "status", "valid"]
        .iter()
        .any(|key| obj.get(*key).map_or(false, is_negative));
    if rejected {
        let message = obj.get("message").and_then(|v| v.as_str()).unwrap_or(REJECTED);
        return Some(message.to_string());
    }
    None
}

// `false`, `0` and failure words like "invalid".
fn is_negative(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
        serde_json::Value::String(s) => {
            matches!(s.trim().to_lowercase().as_str(), "error" | "fail" | "failed" | "invalid" | "false")
        }
        _ => false,
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
