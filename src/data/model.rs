use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single row of the source dataset, reduced to the fields the dashboard uses.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Zero-based row number in the source file.
    pub row: usize,
    /// Grouping value; `None` when the cell was empty or spelled a missing value.
    pub category: Option<String>,
    /// Numeric measurement; NaN when missing.
    pub measurement: f64,
    /// Optional secondary numeric column used as scatter abscissa.
    pub x: Option<f64>,
}

impl Record {
    /// Scatter abscissa: the secondary column, or the row number without one.
    pub fn abscissa(&self) -> f64 {
        self.x.unwrap_or(self.row as f64)
    }
}

// ---------------------------------------------------------------------------
// ColumnSpec – which source columns feed the record fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub category: String,
    pub measurement: String,
    pub x: Option<String>,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            category: "continent".to_string(),
            measurement: "lifeExp".to_string(),
            x: Some("gdpPercap".to_string()),
        }
    }
}

/// User-chosen set of category values.
pub type Selection = BTreeSet<String>;

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub columns: ColumnSpec,
    /// Sorted distinct non-null categories.
    pub categories: BTreeSet<String>,
}

impl Dataset {
    /// Build the category index from the loaded records.
    pub fn from_records(records: Vec<Record>, columns: ColumnSpec) -> Self {
        let categories = records
            .iter()
            .filter_map(|r| r.category.clone())
            .collect();
        Dataset {
            records,
            columns,
            categories,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// A selection containing every known category.
    pub fn all_categories(&self) -> Selection {
        self.categories.clone()
    }

    /// 1-based position of a category in sorted order, used as a shared
    /// x position across the bar and box charts.
    pub fn category_position(&self, category: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|c| c == category)
            .map(|i| i + 1)
    }

    /// `(min, max)` of all non-NaN measurements, or `None` if there are none.
    pub fn measurement_extent(&self) -> Option<(f64, f64)> {
        self.records
            .iter()
            .map(|r| r.measurement)
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
impl Dataset {
    /// Small in-memory dataset: `(category, measurement)` pairs, x = 10 * row.
    pub fn from_pairs(pairs: &[(Option<&str>, f64)]) -> Self {
        let records = pairs
            .iter()
            .enumerate()
            .map(|(row, (category, measurement))| Record {
                row,
                category: category.map(str::to_string),
                measurement: *measurement,
                x: Some(row as f64 * 10.0),
            })
            .collect();
        Dataset::from_records(records, ColumnSpec::default())
    }
}
