//! Integration tests for bikeshare-common crate.

use bikeshare_common::{
    format_count, month_abbrev, weekday_from_code, weekday_name, BikeshareError, Season,
    WeatherSituation, WEEKDAYS_FROM_SUNDAY,
};

#[test]
fn test_weekday_labels_follow_dataset_order() {
    let labels: Vec<&str> = WEEKDAYS_FROM_SUNDAY.iter().map(|d| weekday_name(*d)).collect();
    assert_eq!(
        labels,
        vec!["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]
    );
    assert_eq!(weekday_name(weekday_from_code(3).unwrap()), "Wednesday");
}

#[test]
fn test_category_errors_are_validation_errors() {
    let err = Season::try_from(7).unwrap_err();
    assert!(matches!(err, BikeshareError::Validation { field: Some(ref f), .. } if f == "season"));

    let err = WeatherSituation::try_from(0).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_display_helpers() {
    assert_eq!(month_abbrev(7), Some("Jul"));
    assert_eq!(format_count(20936), "20,936");
}
