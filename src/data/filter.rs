use serde::Serialize;
use thiserror::Error;

use super::model::{Dataset, Selection};

// ---------------------------------------------------------------------------
// Range bounds
// ---------------------------------------------------------------------------

/// Why a bound list could not be turned into a [`ValueRange`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoundsError {
    #[error("range bounds are missing")]
    Missing,
    #[error("range bounds must have exactly two elements, got {0}")]
    Arity(usize),
}

/// Inclusive `[low, high]` interval on the measurement column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub low: f64,
    pub high: f64,
}

impl ValueRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Build a range from two ends given in either order.
    pub fn ordered(a: f64, b: f64) -> Self {
        if b < a {
            Self::new(b, a)
        } else {
            Self::new(a, b)
        }
    }

    /// Parse a two-element bound list as sent by a range slider.
    pub fn from_bounds(bounds: Option<&[f64]>) -> Result<Self, BoundsError> {
        match bounds {
            None => Err(BoundsError::Missing),
            Some(&[low, high]) => Ok(Self::new(low, high)),
            Some(other) => Err(BoundsError::Arity(other.len())),
        }
    }

    /// Inclusive at both ends. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// The full `[min, max]` extent of the dataset's measurements.
    pub fn full(dataset: &Dataset) -> Option<Self> {
        dataset
            .measurement_extent()
            .map(|(low, high)| Self::new(low, high))
    }
}

/// Resolve slider bounds, falling back to the dataset's full extent when
/// they are absent or malformed. `None` only if no measurement is numeric.
pub fn resolve_range(dataset: &Dataset, bounds: Option<&[f64]>) -> Option<ValueRange> {
    match ValueRange::from_bounds(bounds) {
        Ok(range) => Some(range),
        Err(e) => {
            log::debug!("{e}; falling back to the full measurement range");
            ValueRange::full(dataset)
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Indices of records whose category is in `selection`.
/// Records with a null category never match; an empty selection matches nothing.
pub fn category_indices(dataset: &Dataset, selection: &Selection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            r.category
                .as_ref()
                .is_some_and(|c| selection.contains(c))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Indices of records with `low ≤ measurement ≤ high`.
///
/// Absent or malformed bounds fall back to the dataset's own `[min, max]`.
pub fn range_indices(dataset: &Dataset, bounds: Option<&[f64]>) -> Vec<usize> {
    let Some(range) = resolve_range(dataset, bounds) else {
        return Vec::new();
    };
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| range.contains(r.measurement))
        .map(|(i, _)| i)
        .collect()
}

/// Records passing both the category selection and, when present, the range.
pub fn visible_indices(
    dataset: &Dataset,
    selection: &Selection,
    range: Option<ValueRange>,
) -> Vec<usize> {
    let in_category = category_indices(dataset, selection);
    let Some(range) = range else {
        return in_category;
    };
    // Both index lists are ascending.
    let in_range = range_indices(dataset, Some(&[range.low, range.high]));
    in_category
        .into_iter()
        .filter(|i| in_range.binary_search(i).is_ok())
        .collect()
}
