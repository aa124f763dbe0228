use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;
use log::{debug, warn};

use crate::error::ScrapeError;
use crate::model::{CaseRecord, DocumentLink, LinkKind, TableShape};

/// Security token and CAPTCHA text pulled from the search page.
/// They belong to one server-side session and must be submitted together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub token: String,
    pub captcha: String,
}

/// Rows found on a results page. `shape` is `None` when no table matched.
#[derive(Debug, Default)]
pub struct ParsedResults {
    pub shape: Option<TableShape>,
    pub cases: Vec<CaseRecord>,
    pub notice: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CaseInfo {
    pub case_type: Option<String>,
    pub case_number: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Parties {
    pub petitioner: Option<String>,
    pub respondent: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListingInfo {
    pub next_date: Option<String>,
    pub last_date: Option<String>,
    pub court_no: Option<String>,
}

const NO_RESULTS_INDICATORS: [&str; 8] = [
    "no case found",
    "no cases found",
    "no record found",
    "no records found",
    "case not found",
    "no result found",
    "no data found",
    "record not available",
];

pub struct Extractor {
    case_info_regex: Regex,
    number_year_regex: Regex,
    trailing_dots_regex: Regex,
    trailing_dash_regex: Regex,
    vs_regex: Regex,
    petitioner_label_regex: Regex,
    respondent_label_regex: Regex,
    leading_dots_regex: Regex,
    next_date_regex: Regex,
    last_date_regex: Regex,
    court_no_regex: Regex,
    date_regex: Regex,

    captcha_selector: Selector,
    token_selector: Selector,
    judgment_table_selector: Selector,
    listing_table_selector: Selector,
    row_selector: Selector,
    link_selector: Selector,
    citation_selector: Selector,
    status_selector: Selector,
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex")
}

impl Extractor {
    pub fn new() -> Self {
        Extractor {
            // W.P.(C)-11180/2025, CRL.M.C.-558/2025, O.M.P. (E) (COMM.)-123/2024
            case_info_regex: regex(r"(.+?)-(\d+)/(\d{4})"),
            number_year_regex: regex(r"(\d+)/(\d{4})"),
            trailing_dots_regex: regex(r"\.+$"),
            trailing_dash_regex: regex(r"[-\s]+$"),
            vs_regex: regex(r"\b(?:VS|Vs|vs)\b\.?\s*"),
            petitioner_label_regex: regex(r"(?i)^PETITIONER\s*:?\s*"),
            respondent_label_regex: regex(r"(?i)^RESPONDENT\s*:?\s*"),
            leading_dots_regex: regex(r"^\.+\s*"),
            next_date_regex: regex(r"NEXT DATE:\s*(.+?)\s*(?:Last Date:|COURT NO:|$)"),
            last_date_regex: regex(r"Last Date:\s*(.+?)\s*(?:COURT NO:|$)"),
            court_no_regex: regex(r"COURT NO:\s*(\d+)"),
            date_regex: regex(r"(\d{2}-\d{2}-\d{4})"),

            captcha_selector: selector("#captcha-code"),
            token_selector: selector(r#"input[name="_token"][type="hidden"]"#),
            judgment_table_selector: selector("table#s_judgeTable"),
            listing_table_selector: selector("table#caseTable"),
            row_selector: selector("tbody > tr"),
            link_selector: selector("a"),
            citation_selector: selector(r#"font[color="blue"]"#),
            status_selector: selector(r#"font[color="red"]"#),
        }
    }

    pub fn extract_challenge(&self, html: &str) -> Result<Challenge, ScrapeError> {
        let document = Html::parse_document(html);

        let captcha = document
            .select(&self.captcha_selector)
            .next()
            .map(|el| clean_text(el))
            .filter(|text| !text.is_empty());

        let token = document
            .select(&self.token_selector)
            .next()
            .and_then(|el| el.value().attr("value"))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        match (captcha, token) {
            (Some(captcha), Some(token)) => Ok(Challenge { token, captcha }),
            (captcha, token) => {
                warn!(
                    "Search page layout changed? captcha found: {}, token found: {}",
                    captcha.is_some(),
                    token.is_some()
                );
                Err(ScrapeError::Parse("CAPTCHA/token not found".to_string()))
            }
        }
    }

    /// Judgment table first, then listing table. The first one that yields
    /// at least one row wins; otherwise the page counts as "no cases found".
    pub fn parse_results(&self, html: &str, base: &Url) -> ParsedResults {
        let document = Html::parse_document(html);

        if let Some(table) = document.select(&self.judgment_table_selector).next() {
            let cases = self.parse_judgment_table(table, base);
            if !cases.is_empty() {
                return ParsedResults { shape: Some(TableShape::Judgment), cases, notice: None };
            }
            debug!("Judgment table present but has no case rows");
        }

        if let Some(table) = document.select(&self.listing_table_selector).next() {
            let cases = self.parse_listing_table(table, base);
            if !cases.is_empty() {
                return ParsedResults { shape: Some(TableShape::Listing), cases, notice: None };
            }
            debug!("Listing table present but has no case rows");
        }

        let page_text = document.root_element().text().collect::<String>().to_lowercase();
        let notice = NO_RESULTS_INDICATORS
            .iter()
            .find(|indicator| page_text.contains(*indicator))
            .map(|indicator| format!("website returned: {}", indicator))
            .unwrap_or_else(|| "no recognizable results table in response".to_string());

        ParsedResults { shape: None, cases: Vec::new(), notice: Some(notice) }
    }

    fn parse_judgment_table(&self, table: ElementRef, base: &Url) -> Vec<CaseRecord> {
        let mut cases = Vec::new();
        for row in table.select(&self.row_selector) {
            let cells = cells_of(row);
            if cells.len() < 4 {
                continue;
            }
            let info = self.extract_case_info(&clean_text(cells[1]));
            let parties = self.extract_parties(&clean_text(cells[3]));
            let links = self.extract_links(cells[2], base);
            let (judgment_date, pdf_link) = self.extract_judgment_info(cells[2], &links);
            let citation = cells[1]
                .select(&self.citation_selector)
                .next()
                .map(|el| clean_text(el))
                .filter(|t| !t.is_empty());

            cases.push(CaseRecord {
                serial_no: non_empty(clean_text(cells[0])),
                case_type: info.case_type,
                case_number: info.case_number,
                year: info.year,
                petitioner: parties.petitioner,
                respondent: parties.respondent,
                judgment_date,
                pdf_link,
                links,
                citation,
                ..Default::default()
            });
        }
        cases
    }

    fn parse_listing_table(&self, table: ElementRef, base: &Url) -> Vec<CaseRecord> {
        let mut cases = Vec::new();
        for row in table.select(&self.row_selector) {
            let cells = cells_of(row);
            if cells.len() < 4 {
                continue;
            }
            let info = self.extract_case_info(&clean_text(cells[1]));
            let parties = self.extract_parties(&clean_text(cells[2]));
            let listing = self.extract_listing_dates(&clean_text(cells[3]));

            let status = cells[1]
                .select(&self.status_selector)
                .next()
                .map(|el| clean_text(el).replace(['[', ']'], "").trim().to_string())
                .filter(|s| !s.is_empty());

            let orders_link = cells[1]
                .select(&self.link_selector)
                .find(|a| {
                    clean_text(*a) == "Orders"
                        || a.value().attr("href").map_or(false, |h| h.contains("case-type-status-details"))
                })
                .and_then(|a| a.value().attr("href"))
                .and_then(|href| resolve_link(base, href));

            cases.push(CaseRecord {
                serial_no: non_empty(clean_text(cells[0])),
                case_type: info.case_type,
                case_number: info.case_number,
                year: info.year,
                petitioner: parties.petitioner,
                respondent: parties.respondent,
                next_date: listing.next_date,
                last_date: listing.last_date,
                court_no: listing.court_no,
                status,
                orders_link,
                ..Default::default()
            });
        }
        cases
    }

    pub fn extract_case_info(&self, text: &str) -> CaseInfo {
        if let Some(caps) = self.case_info_regex.captures(text) {
            let raw_type = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
            let case_type = self.trailing_dots_regex.replace(&raw_type, "").trim().to_string();
            return CaseInfo {
                case_type: non_empty(case_type),
                case_number: Some(caps[2].to_string()),
                year: Some(caps[3].to_string()),
            };
        }

        if let Some(caps) = self.number_year_regex.captures(text) {
            if let Some(whole) = caps.get(0) {
                let prefix = self.trailing_dash_regex.replace(&text[..whole.start()], "");
                let prefix = prefix.trim();
                if !prefix.is_empty() {
                    return CaseInfo {
                        case_type: Some(prefix.to_string()),
                        case_number: Some(caps[1].to_string()),
                        year: Some(caps[2].to_string()),
                    };
                }
            }
        }

        CaseInfo::default()
    }

    pub fn extract_parties(&self, text: &str) -> Parties {
        if let Some(sep) = self.vs_regex.find(text) {
            let petitioner = self.petitioner_label_regex.replace(text[..sep.start()].trim(), "");
            let respondent = self.respondent_label_regex.replace(text[sep.end()..].trim(), "");
            let respondent = self.leading_dots_regex.replace(respondent.trim(), "");
            return Parties {
                petitioner: non_empty(petitioner.trim().to_string()),
                respondent: non_empty(respondent.trim().to_string()),
            };
        }
        Parties { petitioner: non_empty(text.trim().to_string()), respondent: None }
    }

    pub fn extract_listing_dates(&self, text: &str) -> ListingInfo {
        let capture = |re: &Regex| {
            re.captures(text)
                .map(|c| c[1].trim().to_string())
                .filter(|v| !v.is_empty() && v != "NA")
        };
        ListingInfo {
            next_date: capture(&self.next_date_regex),
            last_date: capture(&self.last_date_regex),
            court_no: capture(&self.court_no_regex),
        }
    }

    fn extract_links(&self, cell: ElementRef, base: &Url) -> Vec<DocumentLink> {
        cell.select(&self.link_selector)
            .filter_map(|a| {
                let href = a.value().attr("href")?.trim();
                if href.is_empty() {
                    return None;
                }
                Some(DocumentLink {
                    url: resolve_link(base, href)?,
                    text: clean_text(a),
                    kind: LinkKind::from_href(href),
                })
            })
            .collect()
    }

    // Date comes from the PDF link text ("02-07-2025 (pdf)"), else the cell.
    fn extract_judgment_info(&self, cell: ElementRef, links: &[DocumentLink]) -> (Option<String>, Option<String>) {
        let pdf = links.iter().find(|l| l.kind == LinkKind::Pdf);
        let date_in = |text: &str| self.date_regex.captures(text).map(|c| c[1].to_string());

        let date = pdf
            .and_then(|l| date_in(&l.text))
            .or_else(|| date_in(&clean_text(cell)));
        (date, pdf.map(|l| l.url.clone()))
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Visible text of an element with whitespace collapsed and `&nbsp` debris removed.
pub fn clean_text(element: ElementRef) -> String {
    let joined = element.text().collect::<Vec<_>>().join(" ");
    joined
        .replace("&nbsp;", " ")
        .replace("&nbsp", " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn cells_of(row: ElementRef) -> Vec<ElementRef> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .collect()
}

fn resolve_link(base: &Url, href: &str) -> Option<String> {
    match base.join(href) {
        Ok(u) => Some(u.to_string()),
        Err(e) => {
            warn!("Skipping unresolvable link '{}': {}", href, e);
            None
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() || s == "NA" {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://delhihighcourt.nic.in").unwrap()
    }

    #[test]
    fn clean_text_collapses_whitespace() {
        let doc = Html::parse_fragment("<div>  Test   text  with\n  multiple   spaces  </div>");
        let div = doc.select(&Selector::parse("div").unwrap()).next().unwrap();
        assert_eq!(clean_text(div), "Test text with multiple spaces");
    }

    #[test]
    fn challenge_is_extracted() {
        let html = r#"
            <html><body>
                <form>
                    <input type="hidden" name="_token" value="test_token_value">
                    <span id="captcha-code"> ABC123 </span>
                </form>
            </body></html>"#;
        let challenge = Extractor::new().extract_challenge(html).unwrap();
        assert_eq!(challenge.captcha, "ABC123");
        assert_eq!(challenge.token, "test_token_value");
    }

    #[test]
    fn missing_captcha_is_a_parse_error() {
        let html = r#"<html><body><input type="hidden" name="_token" value="t"><p>No captcha here</p></body></html>"#;
        let err = Extractor::new().extract_challenge(html).unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
        assert!(err.to_string().contains("CAPTCHA/token not found"));
    }

    #[test]
    fn missing_token_is_a_parse_error() {
        let html = r#"<span id="captcha-code">ABC123</span><input type="text" name="_token" value="visible">"#;
        assert!(matches!(Extractor::new().extract_challenge(html), Err(ScrapeError::Parse(_))));
    }

    #[test]
    fn case_info_valid() {
        let info = Extractor::new().extract_case_info("W.P.(C)-11180/2025");
        assert_eq!(info.case_type.as_deref(), Some("W.P.(C)"));
        assert_eq!(info.case_number.as_deref(), Some("11180"));
        assert_eq!(info.year.as_deref(), Some("2025"));
    }

    #[test]
    fn case_info_strips_trailing_dots_and_spaces() {
        let ex = Extractor::new();
        let info = ex.extract_case_info("O.M.P.  (E) (COMM.)-123/2024");
        assert_eq!(info.case_type.as_deref(), Some("O.M.P. (E) (COMM.)"));

        let info = ex.extract_case_info("CRL.M.C.-558/2025");
        assert_eq!(info.case_type.as_deref(), Some("CRL.M.C"));
    }

    #[test]
    fn case_info_fallback_without_dash() {
        let info = Extractor::new().extract_case_info("BAIL APPLN. 3021/2024");
        assert_eq!(info.case_type.as_deref(), Some("BAIL APPLN."));
        assert_eq!(info.case_number.as_deref(), Some("3021"));
        assert_eq!(info.year.as_deref(), Some("2024"));
    }

    #[test]
    fn case_info_invalid() {
        assert_eq!(Extractor::new().extract_case_info("Invalid format"), CaseInfo::default());
    }

    #[test]
    fn parties_with_vs() {
        let parties = Extractor::new().extract_parties("ANIJAY TYAGI VS MUNICIPAL CORPORATION");
        assert_eq!(parties.petitioner.as_deref(), Some("ANIJAY TYAGI"));
        assert_eq!(parties.respondent.as_deref(), Some("MUNICIPAL CORPORATION"));
    }

    #[test]
    fn parties_strip_labels_and_dots() {
        let parties = Extractor::new()
            .extract_parties("PETITIONER: RAM KUMAR Vs. RESPONDENT: STATE OF NCT OF DELHI");
        assert_eq!(parties.petitioner.as_deref(), Some("RAM KUMAR"));
        assert_eq!(parties.respondent.as_deref(), Some("STATE OF NCT OF DELHI"));

        let parties = Extractor::new().extract_parties("RAM KUMAR vs .. STATE");
        assert_eq!(parties.respondent.as_deref(), Some("STATE"));
    }

    #[test]
    fn parties_without_vs() {
        let parties = Extractor::new().extract_parties("PETITIONER NAME ONLY");
        assert_eq!(parties.petitioner.as_deref(), Some("PETITIONER NAME ONLY"));
        assert_eq!(parties.respondent, None);
    }

    #[test]
    fn vs_inside_a_word_is_not_a_separator() {
        let parties = Extractor::new().extract_parties("VSNL LTD VS UNION OF INDIA");
        assert_eq!(parties.petitioner.as_deref(), Some("VSNL LTD"));
        assert_eq!(parties.respondent.as_deref(), Some("UNION OF INDIA"));
    }

    #[test]
    fn listing_dates() {
        let info = Extractor::new()
            .extract_listing_dates("NEXT DATE: 15/09/2025 Last Date: 01/08/2025 COURT NO: 12");
        assert_eq!(info.next_date.as_deref(), Some("15/09/2025"));
        assert_eq!(info.last_date.as_deref(), Some("01/08/2025"));
        assert_eq!(info.court_no.as_deref(), Some("12"));

        let info = Extractor::new().extract_listing_dates("NEXT DATE: NA Last Date: 01/08/2025");
        assert_eq!(info.next_date, None);
        assert_eq!(info.last_date.as_deref(), Some("01/08/2025"));
        assert_eq!(info.court_no, None);
    }

    const JUDGMENT_PAGE: &str = r#"
        <table id="s_judgeTable" class="table">
          <thead><tr><th>S.No.</th><th>Case No</th><th>Date of Judgment</th><th>Party</th><th>Corrigendum</th></tr></thead>
          <tbody>
            <tr>
              <td>1</td>
              <td>W.P.(C)-11180/2025 <font color="blue">2025:DHC:6543</font></td>
              <td><a href="/app/showlogo/1751449171_W.P.(C)-11180-2025.pdf">02-07-2025 (pdf)</a>
                  <a href="/app/showFileJudgment/11180.txt">(txt)</a></td>
              <td>ANIJAY TYAGI&nbsp; VS MUNICIPAL CORPORATION OF DELHI</td>
              <td></td>
            </tr>
          </tbody>
        </table>"#;

    #[test]
    fn judgment_table_rows() {
        let parsed = Extractor::new().parse_results(JUDGMENT_PAGE, &base());
        assert_eq!(parsed.shape, Some(TableShape::Judgment));
        assert_eq!(parsed.cases.len(), 1);

        let case = &parsed.cases[0];
        assert_eq!(case.serial_no.as_deref(), Some("1"));
        assert_eq!(case.case_type.as_deref(), Some("W.P.(C)"));
        assert_eq!(case.case_number.as_deref(), Some("11180"));
        assert_eq!(case.year.as_deref(), Some("2025"));
        assert_eq!(case.citation.as_deref(), Some("2025:DHC:6543"));
        assert_eq!(case.petitioner.as_deref(), Some("ANIJAY TYAGI"));
        assert_eq!(case.respondent.as_deref(), Some("MUNICIPAL CORPORATION OF DELHI"));
        assert_eq!(case.judgment_date.as_deref(), Some("02-07-2025"));
        assert_eq!(
            case.pdf_link.as_deref(),
            Some("https://delhihighcourt.nic.in/app/showlogo/1751449171_W.P.(C)-11180-2025.pdf")
        );
        assert_eq!(case.links.len(), 2);
        assert_eq!(case.links[1].kind, LinkKind::Txt);
        assert_eq!(case.next_date, None);
    }

    const LISTING_PAGE: &str = r#"
        <table id="caseTable">
          <tbody>
            <tr>
              <td>1</td>
              <td>CRL.M.C.-558/2025 <font color="red">[DISPOSED]</font>
                  <a href="/app/case-type-status-details/CRLMM/558/2025">Orders</a></td>
              <td>RAKESH KUMAR VS STATE OF NCT OF DELHI</td>
              <td>NEXT DATE: NA Last Date: 24/01/2025 COURT NO: 33</td>
            </tr>
            <tr><td colspan="4">footer</td></tr>
          </tbody>
        </table>"#;

    #[test]
    fn listing_table_rows() {
        let parsed = Extractor::new().parse_results(LISTING_PAGE, &base());
        assert_eq!(parsed.shape, Some(TableShape::Listing));
        assert_eq!(parsed.cases.len(), 1);

        let case = &parsed.cases[0];
        assert_eq!(case.case_type.as_deref(), Some("CRL.M.C"));
        assert_eq!(case.status.as_deref(), Some("DISPOSED"));
        assert_eq!(
            case.orders_link.as_deref(),
            Some("https://delhihighcourt.nic.in/app/case-type-status-details/CRLMM/558/2025")
        );
        assert_eq!(case.respondent.as_deref(), Some("STATE OF NCT OF DELHI"));
        assert_eq!(case.next_date, None);
        assert_eq!(case.last_date.as_deref(), Some("24/01/2025"));
        assert_eq!(case.court_no.as_deref(), Some("33"));
        assert_eq!(case.pdf_link, None);
    }

    #[test]
    fn empty_judgment_table_falls_through_to_listing() {
        let html = format!(
            r#"<table id="s_judgeTable"><tbody><tr><td>No data</td></tr></tbody></table>{}"#,
            LISTING_PAGE
        );
        let parsed = Extractor::new().parse_results(&html, &base());
        assert_eq!(parsed.shape, Some(TableShape::Listing));
    }

    #[test]
    fn judgment_table_wins_when_both_match() {
        let html = format!("{}{}", LISTING_PAGE, JUDGMENT_PAGE);
        let parsed = Extractor::new().parse_results(&html, &base());
        assert_eq!(parsed.shape, Some(TableShape::Judgment));
    }

    #[test]
    fn no_results_message_is_not_an_error() {
        let html = "<html><body><p>No case found for the given criteria</p></body></html>";
        let parsed = Extractor::new().parse_results(html, &base());
        assert!(parsed.shape.is_none());
        assert!(parsed.cases.is_empty());
        assert!(parsed.notice.unwrap().contains("no case found"));
    }

    #[test]
    fn unknown_page_is_no_results() {
        let parsed = Extractor::new().parse_results("<html><body><table><tr><td>x</td></tr></table></body></html>", &base());
        assert!(parsed.cases.is_empty());
        assert_eq!(parsed.notice.as_deref(), Some("no recognizable results table in response"));
    }
}
