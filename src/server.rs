use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use actix_cors::Cors;
use chrono::Local;
use log::LevelFilter;
use serde::Deserialize;
use std::sync::{Arc, Mutex};

use court_scraper_lib::{case_types, delay_manager, logger};
use court_scraper_lib::{CaseQuery, CourtScraper, RetryPolicy, ScrapeError, ScraperConfig};

struct AppState {
    scraper: Arc<CourtScraper>,
    retry: RetryPolicy,
    // One request at a time against the court site.
    site_gate: Arc<Mutex<()>>,
}

#[derive(Deserialize)]
struct SearchRequest {
    case_type: String,
    case_number: String,
    year: String,
}

#[derive(Deserialize)]
struct DownloadParams {
    url: String,
    case_id: Option<String>,
}

/// Runs `work` while holding the site gate. A poisoned gate is still usable.
fn exclusive<T>(gate: &Mutex<()>, work: impl FnOnce() -> T) -> T {
    let _turn = gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    work()
}

fn error_response(err: &ScrapeError) -> HttpResponse {
    let body = serde_json::json!({
        "status": "error",
        "error_type": err.kind(),
        "error": err.to_string(),
    });
    match err {
        ScrapeError::InvalidQuery(_) => HttpResponse::BadRequest().json(body),
        ScrapeError::Io { .. } | ScrapeError::Config(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadGateway().json(body),
    }
}

#[get("/api/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": Local::now().to_rfc3339(),
    }))
}

#[get("/api/case-types")]
async fn list_case_types() -> impl Responder {
    HttpResponse::Ok().json(case_types::all())
}

#[post("/api/search")]
async fn search_case(body: web::Json<SearchRequest>, data: web::Data<AppState>) -> impl Responder {
    let req = body.into_inner();
    let query = match CaseQuery::new(&req.case_type, &req.case_number, &req.year) {
        Ok(q) => q,
        Err(e) => return error_response(&e),
    };
    log::info!("API search for {}", query.identifier());

    let scraper = data.scraper.clone();
    let gate = data.site_gate.clone();
    let policy = data.retry.clone();

    let outcome = web::block(move || {
        exclusive(&gate, || delay_manager::search_with_retries(&scraper, &query, &policy))
    })
    .await;

    match outcome {
        Ok(Ok(result)) if result.is_empty() => HttpResponse::Ok().json(serde_json::json!({
            "status": "no_results",
            "message": "No cases found for the given criteria.",
            "notice": result.notice,
            "query": result.query,
        })),
        Ok(Ok(result)) => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "result": result,
        })),
        Ok(Err(e)) => {
            log::error!("Search failed: {}", e);
            error_response(&e)
        }
        Err(e) => {
            log::error!("Search worker failed: {}", e);
            HttpResponse::InternalServerError().json("Search worker failed")
        }
    }
}

#[get("/api/download_pdf")]
async fn download_pdf(params: web::Query<DownloadParams>, data: web::Data<AppState>) -> impl Responder {
    let params = params.into_inner();
    let case_id = params.case_id.unwrap_or_else(|| "document".to_string());
    let scraper = data.scraper.clone();
    let gate = data.site_gate.clone();

    let outcome = web::block(move || {
        let path = exclusive(&gate, || scraper.download_pdf(&params.url, &case_id))?;
        let bytes = std::fs::read(&path).map_err(|source| ScrapeError::Io { path: path.clone(), source })?;
        Ok::<_, ScrapeError>((path, bytes))
    })
    .await;

    match outcome {
        Ok(Ok((path, bytes))) => {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "document.pdf".to_string());
            HttpResponse::Ok()
                .content_type("application/pdf")
                .append_header(("Content-Disposition", format!("attachment; filename=\"{}\"", filename)))
                .body(bytes)
        }
        Ok(Err(e)) => {
            log::error!("Failed to download PDF: {}", e);
            error_response(&e)
        }
        Err(e) => {
            log::error!("Download worker failed: {}", e);
            HttpResponse::InternalServerError().json("Download worker failed")
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    logger::init(LevelFilter::Info);

    let config = ScraperConfig::from_env();
    let port: u16 = std::env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(8080);

    let state = web::Data::new(AppState {
        scraper: Arc::new(CourtScraper::new(config)),
        retry: RetryPolicy::default(),
        site_gate: Arc::new(Mutex::new(())),
    });

    log::info!("Starting Web Server at http://0.0.0.0:{}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(health_check)
            .service(list_case_types)
            .service(search_case)
            .service(download_pdf)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
