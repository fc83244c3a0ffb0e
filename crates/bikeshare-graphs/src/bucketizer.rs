//! Fixed-width bucketing of normalized readings.
//!
//! Readings in the dataset are fractions of a known real-world maximum. The
//! bucketizer splits `[0, 1]` into five equal bins, sums a count per bin and
//! labels each bin in real units, e.g. `"8-16"` for temperature with a
//! maximum of 41 °C.
//!
//! Bins are closed on the right, so a value sitting exactly on an inner edge
//! belongs to the lower bin. The first bin also admits `0.0`.

use bikeshare_common::{BikeshareError, Result};
use serde::Serialize;

/// Bin edges over the normalized domain
pub const BUCKET_EDGES: [f64; 6] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];

/// Number of bins produced for every input
pub const BUCKET_COUNT: usize = BUCKET_EDGES.len() - 1;

/// One labeled bin and the counts summed into it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub count: u64,
}

/// Index of the bin holding `value`, or `None` outside `[0, 1]`
pub fn bucket_index(value: f64) -> Option<usize> {
    if !(0.0..=1.0).contains(&value) {
        return None;
    }
    BUCKET_EDGES[1..].iter().position(|&right| value <= right)
}

/// Real-unit labels for the five bins
pub fn bucket_labels(scale: f64) -> Result<Vec<String>> {
    validate_scale(scale)?;
    Ok(BUCKET_EDGES
        .windows(2)
        .map(|edges| format!("{}-{}", scaled_edge(edges[0], scale), scaled_edge(edges[1], scale)))
        .collect())
}

/// Sum counts into the five bins.
///
/// Every bin is reported, empty ones with a count of zero. Fails when the
/// scale is not a positive finite number or any value lies outside `[0, 1]`.
pub fn bucketize<I>(values: I, scale: f64) -> Result<Vec<Bucket>>
where
    I: IntoIterator<Item = (f64, u64)>,
{
    let labels = bucket_labels(scale)?;
    let mut counts = [0u64; BUCKET_COUNT];

    for (value, count) in values {
        let index = bucket_index(value).ok_or_else(|| {
            BikeshareError::validation_field(
                format!("normalized value {value} is outside [0, 1]"),
                "value",
            )
        })?;
        counts[index] = counts[index].saturating_add(count);
    }

    Ok(labels
        .into_iter()
        .zip(counts)
        .map(|(label, count)| Bucket { label, count })
        .collect())
}

fn validate_scale(scale: f64) -> Result<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(BikeshareError::validation_field(
            format!("scale must be a positive number, got {scale}"),
            "scale",
        ));
    }
    Ok(())
}

// 0.6 * 41 = 24.6 labels as 24
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_edge(edge: f64, scale: f64) -> u64 {
    (edge * scale).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pairs(buckets: &[Bucket]) -> Vec<(&str, u64)> {
        buckets.iter().map(|b| (b.label.as_str(), b.count)).collect()
    }

    #[test]
    fn test_sums_counts_per_bin() {
        let buckets = bucketize(vec![(0.1, 5), (0.3, 2), (0.3, 3), (0.9, 7)], 10.0).unwrap();
        assert_eq!(
            pairs(&buckets),
            vec![("0-2", 5), ("2-4", 5), ("4-6", 0), ("6-8", 0), ("8-10", 7)]
        );
    }

    #[test]
    fn test_inner_edges_fall_in_lower_bin() {
        let buckets = bucketize(vec![(0.2, 1), (1.0, 4), (0.0, 2)], 41.0).unwrap();
        assert_eq!(
            pairs(&buckets),
            vec![("0-8", 3), ("8-16", 0), ("16-24", 0), ("24-32", 0), ("32-41", 4)]
        );
    }

    #[test]
    fn test_labels_for_dataset_scales() {
        assert_eq!(bucket_labels(41.0).unwrap(), vec!["0-8", "8-16", "16-24", "24-32", "32-41"]);
        assert_eq!(bucket_labels(50.0).unwrap(), vec!["0-10", "10-20", "20-30", "30-40", "40-50"]);
        assert_eq!(bucket_labels(100.0).unwrap(), vec!["0-20", "20-40", "40-60", "60-80", "80-100"]);
        assert_eq!(bucket_labels(67.0).unwrap(), vec!["0-13", "13-26", "26-40", "40-53", "53-67"]);
    }

    #[test]
    fn test_empty_input_reports_zero_bins() {
        let buckets = bucketize(Vec::<(f64, u64)>::new(), 41.0).unwrap();
        assert_eq!(buckets.len(), BUCKET_COUNT);
        assert!(buckets.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_rejects_invalid_scale() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = bucketize(vec![(0.5, 1)], scale).unwrap_err();
            assert!(err.is_validation(), "scale {scale} accepted");
        }
    }

    #[test]
    fn test_huge_counts_saturate() {
        let buckets = bucketize(vec![(0.5, u64::MAX), (0.5, 10)], 41.0).unwrap();
        assert_eq!(buckets[2].count, u64::MAX);
    }

    #[test]
    fn test_rejects_out_of_domain_values() {
        for value in [-0.01, 1.01, f64::NAN] {
            assert!(bucketize(vec![(0.5, 1), (value, 1)], 41.0).is_err());
        }
    }

    #[test]
    fn test_bucket_index() {
        assert_eq!(bucket_index(0.0), Some(0));
        assert_eq!(bucket_index(0.2), Some(0));
        assert_eq!(bucket_index(0.2000001), Some(1));
        assert_eq!(bucket_index(0.8), Some(3));
        assert_eq!(bucket_index(1.0), Some(4));
        assert_eq!(bucket_index(1.5), None);
    }

    proptest! {
        #[test]
        fn prop_counts_are_conserved(
            rows in prop::collection::vec((0.0f64..=1.0, 0u64..10_000), 0..200),
            scale in 0.5f64..500.0,
        ) {
            let expected: u64 = rows.iter().map(|(_, c)| c).sum();
            let buckets = bucketize(rows, scale).unwrap();
            prop_assert_eq!(buckets.len(), BUCKET_COUNT);
            prop_assert_eq!(buckets.iter().map(|b| b.count).sum::<u64>(), expected);
        }

        #[test]
        fn prop_bins_are_ordered(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(bucket_index(lo).unwrap() <= bucket_index(hi).unwrap());
        }

        #[test]
        fn prop_labels_are_contiguous(scale in 0.5f64..1000.0) {
            let labels = bucket_labels(scale).unwrap();
            let bounds: Vec<(u64, u64)> = labels
                .iter()
                .map(|l| {
                    let (lo, hi) = l.split_once('-').unwrap();
                    (lo.parse().unwrap(), hi.parse().unwrap())
                })
                .collect();
            prop_assert_eq!(bounds[0].0, 0);
            for pair in bounds.windows(2) {
                prop_assert_eq!(pair[0].1, pair[1].0);
                prop_assert!(pair[0].0 <= pair[0].1);
            }
        }
    }
}
