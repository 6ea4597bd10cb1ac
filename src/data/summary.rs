use serde::Serialize;

use super::filter::{category_indices, ValueRange};
use super::model::{Dataset, Selection};

/// Step of the mark rounding rule.
const MARK_STEP: f64 = 0.1;

// ---------------------------------------------------------------------------
// Mark rounding
// ---------------------------------------------------------------------------

/// Remainder with the sign of the divisor (floored modulo).
fn floored_rem(value: f64, divisor: f64) -> f64 {
    let r = value % divisor;
    if r != 0.0 && (r < 0.0) != (divisor < 0.0) {
        r + divisor
    } else {
        r
    }
}

/// Truncate to an integer when `value mod 0.1 < 0.1`, otherwise keep as-is.
///
/// The floored remainder lies in `[0, 0.1)` for nearly every finite value, so
/// this truncates almost always. NaN and infinities pass through unchanged, as
/// do tiny negative values whose remainder rounds up to exactly `0.1`.
pub fn round_mark(value: f64) -> f64 {
    if floored_rem(value, MARK_STEP) < MARK_STEP {
        value.trunc()
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// RangeSummary
// ---------------------------------------------------------------------------

/// A labelled slider mark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    pub value: f64,
    pub label: String,
}

impl Mark {
    fn at(value: f64) -> Self {
        Self {
            value,
            label: format!("{value}"),
        }
    }
}

/// Summary bounds over the measurements of the selected categories.
/// Holds `min ≤ low ≤ high ≤ max`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeBounds {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub low: f64,
    pub high: f64,
    /// Marks at `min` and `max`.
    pub marks: Vec<Mark>,
}

impl RangeBounds {
    /// Default slider selection `[low, high]`.
    pub fn default_range(&self) -> ValueRange {
        ValueRange::new(self.low, self.high)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RangeSummary {
    Bounds(RangeBounds),
    /// Nothing selected, or no numeric measurement in the selection.
    Empty,
}

impl RangeSummary {
    pub fn bounds(&self) -> Option<&RangeBounds> {
        match self {
            RangeSummary::Bounds(b) => Some(b),
            RangeSummary::Empty => None,
        }
    }

    pub fn default_range(&self) -> Option<ValueRange> {
        self.bounds().map(RangeBounds::default_range)
    }
}

/// Compute the summary bounds for the records whose category is selected.
/// NaN measurements are skipped.
pub fn compute(dataset: &Dataset, selection: &Selection) -> RangeSummary {
    let values: Vec<f64> = category_indices(dataset, selection)
        .into_iter()
        .map(|i| dataset.records[i].measurement)
        .filter(|v| !v.is_nan())
        .collect();

    if values.is_empty() {
        return RangeSummary::Empty;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    let min = round_mark(min);
    let max = round_mark(max);
    let mean = round_mark(mean);

    // Values the rule leaves unrounded can escape [min, max]; clamp them back.
    let low = round_mark((min + mean) / 2.0).max(min).min(max);
    let high = round_mark((max + mean) / 2.0).max(low).min(max);

    RangeSummary::Bounds(RangeBounds {
        min,
        max,
        mean,
        low,
        high,
        marks: vec![Mark::at(min), Mark::at(max)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(ds: &Dataset) -> Selection {
        ds.all_categories()
    }

    #[test]
    fn round_mark_truncates_finite_values() {
        assert_eq!(round_mark(8.3), 8.0);
        assert_eq!(round_mark(11.8), 11.0);
        assert_eq!(round_mark(18.0), 18.0);
        assert_eq!(round_mark(-2.7), -2.0);
    }

    #[test]
    fn round_mark_passes_through_non_finite() {
        assert!(round_mark(f64::NAN).is_nan());
        assert_eq!(round_mark(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn round_mark_keeps_value_when_remainder_reaches_step() {
        // -1e-20 mod 0.1 rounds up to exactly 0.1, so the rule leaves it alone.
        assert_eq!(round_mark(-1e-20), -1e-20);
    }

    #[test]
    fn worked_example() {
        let ds = Dataset::from_pairs(&[(Some("a"), 8.3), (Some("a"), 9.1), (Some("b"), 18.0)]);
        let summary = compute(&ds, &all(&ds));
        let b = summary.bounds().expect("non-empty selection");
        assert_eq!(b.min, 8.0);
        assert_eq!(b.max, 18.0);
        assert_eq!(b.mean, 11.0);
        assert_eq!(b.low, 9.0);
        assert_eq!(b.high, 14.0);
        assert_eq!(b.marks[0].label, "8");
        assert_eq!(b.marks[1].label, "18");
        assert_eq!(summary.default_range(), Some(ValueRange::new(9.0, 14.0)));
    }

    #[test]
    fn empty_selection_is_empty() {
        let ds = Dataset::from_pairs(&[(Some("a"), 1.0)]);
        assert_eq!(compute(&ds, &Selection::new()), RangeSummary::Empty);
    }

    #[test]
    fn all_nan_selection_is_empty() {
        let ds = Dataset::from_pairs(&[(Some("a"), f64::NAN), (Some("b"), 3.0)]);
        let only_a: Selection = ["a".to_string()].into();
        assert_eq!(compute(&ds, &only_a), RangeSummary::Empty);
    }

    #[test]
    fn bounds_are_ordered_for_varied_inputs() {
        let cases: &[&[f64]] = &[
            &[0.0],
            &[-5.5, 3.2, 100.9],
            &[1e-20, -1e-20],
            &[-0.3, -0.2, -0.1],
            &[42.42, 42.42],
            &[-1000.0, 0.05, 999.99],
        ];
        for values in cases {
            let pairs: Vec<(Option<&str>, f64)> = values.iter().map(|&v| (Some("a"), v)).collect();
            let ds = Dataset::from_pairs(&pairs);
            let summary = compute(&ds, &all(&ds));
            let b = summary.bounds().expect("non-empty selection");
            assert!(
                b.min <= b.low && b.low <= b.high && b.high <= b.max,
                "{values:?} -> {b:?}"
            );
        }
    }

    #[test]
    fn only_selected_categories_count() {
        let ds = Dataset::from_pairs(&[(Some("a"), 2.0), (Some("b"), 50.0), (None, 90.0)]);
        let only_a: Selection = ["a".to_string()].into();
        let b = compute(&ds, &only_a).bounds().cloned().unwrap();
        assert_eq!((b.min, b.max), (2.0, 2.0));
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_value(RangeSummary::Empty).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "empty" }));
    }
}
