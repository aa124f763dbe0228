use serde::{Deserialize, Serialize};

use crate::case_types;
use crate::error::ScrapeError;

/// One case-number search. Build it with [`CaseQuery::new`] so the inputs are checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseQuery {
    /// Website code, e.g. `CW`.
    pub case_type: String,
    pub case_number: String,
    pub year: String,
}

impl CaseQuery {
    /// `case_type` may be a display name (`W.P.(C)`) or a code (`CW`).
    pub fn new(case_type: &str, case_number: &str, year: &str) -> Result<Self, ScrapeError> {
        let case_type = case_type.trim();
        let case_number = case_number.trim();
        let year = year.trim();

        if case_type.is_empty() || case_number.is_empty() || year.is_empty() {
            return Err(ScrapeError::InvalidQuery(
                "case type, case number and year are all required".to_string(),
            ));
        }
        if !case_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ScrapeError::InvalidQuery(format!(
                "case number must be numeric, got '{}'",
                case_number
            )));
        }
        if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(ScrapeError::InvalidQuery(format!(
                "year must be a 4-digit number, got '{}'",
                year
            )));
        }
        let resolved = case_types::resolve(case_type)
            .ok_or_else(|| ScrapeError::InvalidQuery(format!("unknown case type '{}'", case_type)))?;

        Ok(CaseQuery {
            case_type: resolved.code.to_string(),
            case_number: case_number.to_string(),
            year: year.to_string(),
        })
    }

    /// `CW-11180/2025`, also used to name downloaded files.
    pub fn identifier(&self) -> String {
        format!("{}-{}/{}", self.case_type, self.case_number, self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Success,
    NoResults,
}

/// Which results table the rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableShape {
    /// `table#s_judgeTable`: judgments with PDF/TXT links.
    Judgment,
    /// `table#caseTable`: listing details, next/last hearing dates.
    Listing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Pdf,
    Txt,
    Other,
}

impl LinkKind {
    pub fn from_href(href: &str) -> Self {
        let lower = href.to_lowercase();
        if lower.contains("pdf") {
            LinkKind::Pdf
        } else if lower.contains("txt") {
            LinkKind::Txt
        } else {
            LinkKind::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLink {
    pub url: String,
    pub text: String,
    pub kind: LinkKind,
}

/// One row of a results table. Fields the row does not carry are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub serial_no: Option<String>,
    pub case_type: Option<String>,
    pub case_number: Option<String>,
    pub year: Option<String>,
    pub petitioner: Option<String>,
    pub respondent: Option<String>,
    pub next_date: Option<String>,
    pub last_date: Option<String>,
    pub court_no: Option<String>,
    pub judgment_date: Option<String>,
    pub pdf_link: Option<String>,
    pub links: Vec<DocumentLink>,
    /// e.g. `DISPOSED`, listing table only.
    pub status: Option<String>,
    pub orders_link: Option<String>,
    /// Neutral citation (`2025:DHC:1234`), judgment table only.
    pub citation: Option<String>,
}

impl CaseRecord {
    pub fn title(&self) -> String {
        format!(
            "{}-{}/{}",
            na(&self.case_type),
            na(&self.case_number),
            na(&self.year)
        )
    }

    pub fn parties(&self) -> String {
        format!("{} vs {}", na(&self.petitioner), na(&self.respondent))
    }
}

/// Renders a missing field the way the court site does.
pub fn na(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("NA")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseResult {
    pub query: CaseQuery,
    pub status: SearchStatus,
    pub table_shape: Option<TableShape>,
    pub cases: Vec<CaseRecord>,
    /// Why nothing was found, when the site said so.
    pub notice: Option<String>,
    /// Wall-clock time of the whole five-step search.
    #[serde(default)]
    pub duration_ms: u64,
}

impl CaseResult {
    pub fn is_empty(&self) -> bool {
        self.status == SearchStatus::NoResults
    }

    pub fn pdf_links(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().filter_map(|c| c.pdf_link.as_deref())
    }
}
