//! CSV loading for the daily and hourly tables

use std::fs::File;
use std::io::Read;
use std::path::Path;

use bikeshare_common::{BikeshareError, Result};
use tracing::{debug, info, instrument};

use crate::record::{RawRow, RentalRecord, TableKind};

/// Load the daily table from a CSV file
pub fn load_daily<P: AsRef<Path>>(path: P) -> Result<Vec<RentalRecord>> {
    load_table(path.as_ref(), TableKind::Daily)
}

/// Load the hourly table from a CSV file
pub fn load_hourly<P: AsRef<Path>>(path: P) -> Result<Vec<RentalRecord>> {
    load_table(path.as_ref(), TableKind::Hourly)
}

#[instrument(skip_all, fields(path = %path.display(), kind = kind.name()))]
fn load_table(path: &Path, kind: TableKind) -> Result<Vec<RentalRecord>> {
    let source = path.display().to_string();
    let file = File::open(path)
        .map_err(|e| BikeshareError::data(&source, format!("cannot open file: {e}")))?;

    let records = read_records(file, &source, kind)?;
    info!(rows = records.len(), "Loaded {} table", kind.name());
    Ok(records)
}

/// Parse and validate rows from any reader.
///
/// `source` names the input in error messages. The first invalid row aborts
/// the load with its line number.
pub fn read_records<R: Read>(reader: R, source: &str, kind: TableKind) -> Result<Vec<RentalRecord>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| BikeshareError::data(source, format!("cannot read header: {e}")))?
        .clone();
    debug!(columns = headers.len(), "Read CSV header");

    let mut row = csv::StringRecord::new();
    let mut records = Vec::new();
    loop {
        let has_row = reader.read_record(&mut row).map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or_default();
            BikeshareError::data_at_line(source, line, e.to_string())
        })?;
        if !has_row {
            break;
        }

        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let raw: RawRow = row
            .deserialize(Some(&headers))
            .map_err(|e| BikeshareError::data_at_line(source, line, describe_csv_error(&e)))?;
        let record = raw
            .into_record(kind)
            .map_err(|e| BikeshareError::data_at_line(source, line, e.to_string()))?;
        records.push(record);
    }

    Ok(records)
}

fn describe_csv_error(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(field) => format!("column {}: {}", field + 1, err.kind()),
            None => err.kind().to_string(),
        },
        _ => err.to_string(),
    }
}
