pub mod case_types;
pub mod config;
pub mod delay_manager;
pub mod error;
pub mod export;
pub mod extractor;
pub mod logger;
pub mod model;
pub mod scraper;
pub mod session;

// Exporting types for convenience
pub use config::ScraperConfig;
pub use delay_manager::RetryPolicy;
pub use error::ScrapeError;
pub use extractor::Extractor;
pub use model::{CaseQuery, CaseRecord, CaseResult, SearchStatus, TableShape};
pub use scraper::CourtScraper;
