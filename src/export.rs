use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use log::info;

use crate::model::{na, CaseResult};

const HEADERS: [&str; 15] = [
    "serial_no",
    "case_type",
    "case_number",
    "year",
    "petitioner",
    "respondent",
    "next_date",
    "last_date",
    "court_no",
    "date_of_judgment_order",
    "pdf_link",
    "status",
    "orders_link",
    "citation",
    "retrieved_at",
];

/// One row per case; missing fields are written as `NA`.
pub fn write_csv<W: Write>(result: &CaseResult, writer: W) -> Result<(), Box<dyn Error>> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    for case in &result.cases {
        csv_writer.write_record([
            na(&case.serial_no),
            na(&case.case_type),
            na(&case.case_number),
            na(&case.year),
            na(&case.petitioner),
            na(&case.respondent),
            na(&case.next_date),
            na(&case.last_date),
            na(&case.court_no),
            na(&case.judgment_date),
            na(&case.pdf_link),
            na(&case.status),
            na(&case.orders_link),
            na(&case.citation),
            timestamp.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_csv<P: AsRef<Path>>(result: &CaseResult, path: P) -> Result<(), Box<dyn Error>> {
    let file = File::create(path.as_ref())?;
    write_csv(result, file)?;
    info!("Wrote {} case(s) to {:?}", result.cases.len(), path.as_ref());
    Ok(())
}
