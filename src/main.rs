use court_scraper_lib::{case_types, delay_manager, export, logger, model::na};
use court_scraper_lib::{CaseQuery, CaseResult, CourtScraper, RetryPolicy, ScraperConfig};

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use log::{error, info, warn, LevelFilter};

#[derive(Parser)]
#[command(name = "court-scraper")]
#[command(about = "Look up Delhi High Court cases by type, number and year", long_about = None)]
struct Cli {
    /// Court website root
    #[arg(long, global = true, env = "COURT_BASE_URL")]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "COURT_TIMEOUT_SECS")]
    timeout: Option<u64>,

    /// Where downloaded judgment PDFs go
    #[arg(long, global = true, env = "COURT_DOWNLOADS_DIR")]
    downloads_dir: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for a case
    Search {
        /// Display name (W.P.(C)) or website code (CW)
        #[arg(short = 't', long)]
        case_type: String,
        #[arg(short, long)]
        number: String,
        #[arg(short, long)]
        year: String,
        /// Attempts when the CAPTCHA is rejected
        #[arg(long, default_value_t = 3)]
        retries: u32,
        /// Also write the cases to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Save every judgment PDF found
        #[arg(long)]
        download: bool,
    },
    /// List known case types
    CaseTypes {
        #[arg(long)]
        filter: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logger::init(if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info });

    let mut config = ScraperConfig::from_env();
    if let Some(base) = cli.base_url {
        config = config.with_base_url(base);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs.max(1)));
    }
    if let Some(dir) = cli.downloads_dir {
        config = config.with_downloads_dir(dir);
    }

    match cli.command {
        Command::CaseTypes { filter } => {
            for ct in case_types::search(filter.as_deref().unwrap_or("")) {
                println!("{:<22} {:<12} {}", ct.display_name, ct.code, ct.description);
            }
            Ok(())
        }
        Command::Search { case_type, number, year, retries, csv, json, download } => {
            let query = CaseQuery::new(&case_type, &number, &year)?;
            if let Some(ct) = case_types::by_code(&query.case_type) {
                info!("Searching for case: {} ({})-{}/{}", case_type, ct.code, query.case_number, query.year);
            }

            let scraper = CourtScraper::new(config);
            let policy = RetryPolicy::default().with_attempts(retries);
            let result = match delay_manager::search_with_retries(&scraper, &query, &policy) {
                Ok(result) => result,
                Err(e) => {
                    error!("Search failed: {}", e);
                    return Err(e.into());
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }

            if let Some(path) = csv {
                export::export_csv(&result, &path)?;
            }

            if download {
                for case in &result.cases {
                    if let Some(link) = &case.pdf_link {
                        match scraper.download_pdf(link, &case.title()) {
                            Ok(path) => println!("Saved {}", path.display()),
                            Err(e) => warn!("Could not download {}: {}", link, e),
                        }
                    }
                }
            }
            Ok(())
        }
    }
}

fn print_result(result: &CaseResult) {
    if result.is_empty() {
        println!("No cases found for {}.", result.query.identifier());
        return;
    }
    for (i, case) in result.cases.iter().enumerate() {
        println!("{}. {}", i + 1, case.title());
        println!("   Parties:      {}", case.parties());
        if case.next_date.is_some() || case.last_date.is_some() {
            println!("   Next date:    {}", na(&case.next_date));
            println!("   Last date:    {}", na(&case.last_date));
        }
        if let Some(status) = &case.status {
            println!("   Status:       {}", status);
        }
        if case.judgment_date.is_some() {
            println!("   Judgment:     {}", na(&case.judgment_date));
        }
        if let Some(link) = &case.pdf_link {
            println!("   PDF:          {}", link);
        }
        if let Some(link) = &case.orders_link {
            println!("   Orders:       {}", link);
        }
    }
}
