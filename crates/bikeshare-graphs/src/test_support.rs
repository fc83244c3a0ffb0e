//! Fixture datasets for unit tests

use bikeshare_common::test_utils::{sample_days, sample_hours, to_csv, DAY_HEADER, HOUR_HEADER};
use bikeshare_data::{read_records, Dataset, TableKind};

/// The shared sample tables parsed through the real CSV path
pub fn sample_dataset() -> Dataset {
    let daily = read_records(
        to_csv(DAY_HEADER, &sample_days()).as_bytes(),
        "sample_day",
        TableKind::Daily,
    )
    .expect("sample daily table is valid");
    let hourly = read_records(
        to_csv(HOUR_HEADER, &sample_hours()).as_bytes(),
        "sample_hour",
        TableKind::Hourly,
    )
    .expect("sample hourly table is valid");
    Dataset::new(daily, hourly)
}
