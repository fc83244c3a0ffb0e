//! Integration tests for bikeshare-data crate.

use bikeshare_common::test_utils::{
    create_temp_dir, sample_days, to_csv, write_fixture, write_sample_datasets, DAY_HEADER,
};
use bikeshare_common::BikeshareError;
use bikeshare_data::{Dataset, DateRange};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_load_filter_and_totals() {
    let dir = create_temp_dir();
    let (day, hour) = write_sample_datasets(dir.path());
    let dataset = Dataset::load(&day, &hour).unwrap();

    let range = DateRange::new(date(2012, 1, 1), date(2012, 12, 31)).unwrap();
    let year_2012 = dataset.filter(&range);
    assert_eq!(year_2012.daily().len(), 2);
    assert!(year_2012.daily().iter().all(|r| r.year == 2012));
    assert!(year_2012.hourly().iter().all(|r| r.year == 2012));

    for record in dataset.daily().iter().chain(dataset.hourly()) {
        assert_eq!(record.casual + record.registered, record.total);
    }
}

#[test]
fn test_bad_row_aborts_load_with_location() {
    let dir = create_temp_dir();
    let (_, hour) = write_sample_datasets(dir.path());

    // Sixth data row, 2011-06-15: total no longer matches casual + registered
    let csv = to_csv(DAY_HEADER, &sample_days()).replace(",846,4261,5107", ",846,4261,5108");
    let broken = write_fixture(dir.path(), "broken_day.csv", &csv);

    let err = Dataset::load(&broken, &hour).unwrap_err();
    match err {
        BikeshareError::Data { path, line, message } => {
            assert!(path.ends_with("broken_day.csv"));
            assert_eq!(line, Some(7));
            assert!(message.contains("cnt"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_reversed_range_is_rejected() {
    assert!(DateRange::new(date(2011, 12, 31), date(2011, 1, 1))
        .unwrap_err()
        .is_validation());
}
