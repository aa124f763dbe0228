#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use court_scraper_lib::ScraperConfig;

pub const SESSION_COOKIE: &str = "dhc_session=c00k1e";
pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n% fake judgment\n%%EOF\n";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub form: HashMap<String, String>,
}

/// What the fake court serves.
#[derive(Clone)]
pub struct Behaviour {
    pub page_html: String,
    /// CAPTCHA the server will accept; differs from the displayed one to simulate expiry.
    pub accepted_captcha: String,
    pub token: String,
    pub validate_body: String,
    pub results_html: String,
    /// Number of validation attempts rejected before the server starts accepting.
    pub reject_first: usize,
    /// Status line the search submit answers with instead of the results page.
    pub submit_failure: Option<String>,
}

impl Behaviour {
    pub fn new(results_html: &str) -> Self {
        Behaviour {
            page_html: search_page("XK42P", "tok-1234567890abcdefghijklmnop"),
            accepted_captcha: "XK42P".to_string(),
            token: "tok-1234567890abcdefghijklmnop".to_string(),
            validate_body: r#"{"success":true}"#.to_string(),
            results_html: results_html.to_string(),
            reject_first: 0,
            submit_failure: None,
        }
    }
}

pub struct FakeCourt {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeCourt {
    pub fn start(behaviour: Behaviour) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let validations = Arc::new(AtomicUsize::new(0));

        let log = requests.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let _ = handle(stream, &behaviour, &log, &validations);
            }
        });

        FakeCourt { base_url, requests }
    }

    pub fn config(&self) -> ScraperConfig {
        ScraperConfig::default()
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(5))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

/// A port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Accepts connections but never answers. Keep it alive for the test's duration.
pub fn silent_listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    (listener, url)
}

pub fn search_page(captcha: &str, token: &str) -> String {
    format!(
        r#"<html><body>
            <form method="POST" action="/app/case-number">
              <input type="hidden" name="_token" value="{token}">
              <select name="case_type"><option value="CW">W.P.(C)</option></select>
              <input type="text" name="case_number"><input type="text" name="year">
              <span id="captcha-code" class="captcha-code">{captcha}</span>
              <input type="text" name="captchaInput">
            </form>
        </body></html>"#
    )
}

pub fn judgment_results(pdf_href: &str) -> String {
    format!(
        r#"<html><body>
        <table id="s_judgeTable" class="table table-bordered">
          <thead><tr><th>S.No.</th><th>Case No</th><th>Date of Judgment/Order</th><th>Party</th><th>Corrigendum</th></tr></thead>
          <tbody>
            <tr>
              <td>1</td>
              <td>W.P.(C)-11180/2025 <font color="blue">2025:DHC:6543</font></td>
              <td><a href="{pdf_href}">02-07-2025 (pdf)</a></td>
              <td>ANIJAY TYAGI VS MUNICIPAL CORPORATION OF DELHI</td>
              <td></td>
            </tr>
          </tbody>
        </table></body></html>"#
    )
}

pub const NO_RESULTS_PAGE: &str = r#"<html><body><div class="alert">No record found.</div></body></html>"#;

fn handle(
    stream: TcpStream,
    behaviour: &Behaviour,
    log: &Arc<Mutex<Vec<Recorded>>>,
    validations: &AtomicUsize,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_lowercase(), value.trim().to_string());
        }
    }

    let length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body)?;
    let form: HashMap<String, String> = url::form_urlencoded::parse(&body).into_owned().collect();

    log.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        headers: headers.clone(),
        form: form.clone(),
    });

    let has_cookie = headers
        .get("cookie")
        .map_or(false, |c| c.contains(SESSION_COOKIE));
    let token_ok = form.get("_token") == Some(&behaviour.token);

    let (status, content_type, extra, payload): (&str, &str, &str, Vec<u8>) = match (method.as_str(), path.as_str()) {
        ("GET", "/app/case-number") => (
            "200 OK",
            "text/html",
            "Set-Cookie: dhc_session=c00k1e; Path=/\r\n",
            behaviour.page_html.clone().into_bytes(),
        ),
        ("POST", "/app/validateCaptcha") => {
            let attempt = validations.fetch_add(1, Ordering::SeqCst);
            let xhr = headers.get("x-requested-with").map(String::as_str) == Some("XMLHttpRequest");
            let captcha_ok = form.get("captchaInput") == Some(&behaviour.accepted_captcha);
            if attempt < behaviour.reject_first || !(has_cookie && token_ok && captcha_ok && xhr) {
                (
                    "422 Unprocessable Entity",
                    "application/json",
                    "",
                    br#"{"success":false,"message":"Invalid Captcha"}"#.to_vec(),
                )
            } else {
                ("200 OK", "application/json", "", behaviour.validate_body.clone().into_bytes())
            }
        }
        ("POST", "/app/case-number") if behaviour.submit_failure.is_some() => (
            behaviour.submit_failure.as_deref().unwrap_or("500 Internal Server Error"),
            "text/html",
            "",
            b"server error".to_vec(),
        ),
        ("POST", "/app/case-number") if has_cookie && token_ok => {
            ("200 OK", "text/html", "", behaviour.results_html.clone().into_bytes())
        }
        ("POST", "/app/case-number") => ("419 Page Expired", "text/html", "", b"expired".to_vec()),
        ("GET", p) if p.ends_with(".pdf") => ("200 OK", "application/pdf", "", PDF_BYTES.to_vec()),
        _ => ("404 Not Found", "text/plain", "", b"not found".to_vec()),
    };

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        status,
        content_type,
        payload.len(),
        extra
    )?;
    stream.write_all(&payload)?;
    stream.flush()
}
