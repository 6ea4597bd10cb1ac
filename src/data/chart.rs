use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::{visible_indices, ValueRange};
use super::model::{Dataset, Record, Selection};
use super::summary::{self, RangeSummary};

// ---------------------------------------------------------------------------
// Chart-ready structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Bar,
    Scatter,
    Box,
}

/// One labelled data series (one category).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

/// Everything the rendering layer needs for one state of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub summary: RangeSummary,
    pub range: Option<ValueRange>,
    pub visible_records: usize,
    pub bar: Figure,
    pub scatter: Figure,
    pub box_plot: Figure,
}

impl DashboardView {
    /// Derive the view for a selection and range. `range` is only applied
    /// when the summary is non-empty.
    pub fn build(
        title: &str,
        dataset: &Dataset,
        selection: &Selection,
        summary: RangeSummary,
        range: Option<ValueRange>,
    ) -> Self {
        let range = summary.bounds().and(range);
        let indices = visible_indices(dataset, selection, range);
        log::debug!(
            "Rebuilding view: {} categories selected, {} records visible",
            selection.len(),
            indices.len()
        );

        DashboardView {
            title: title.to_string(),
            summary,
            range,
            visible_records: indices.len(),
            bar: bar_figure(dataset, &indices),
            scatter: scatter_figure(dataset, &indices),
            box_plot: box_figure(dataset, &indices),
        }
    }

    /// Convenience for a fresh selection: summary computed, range at its default.
    pub fn for_selection(title: &str, dataset: &Dataset, selection: &Selection) -> Self {
        let summary = summary::compute(dataset, selection);
        let range = summary.default_range();
        Self::build(title, dataset, selection, summary, range)
    }
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Group records by category, in sorted category order. Null categories and
/// NaN measurements are dropped.
pub fn group_by_category<'a>(
    dataset: &'a Dataset,
    indices: &[usize],
) -> BTreeMap<&'a str, Vec<&'a Record>> {
    let mut groups: BTreeMap<&str, Vec<&Record>> = BTreeMap::new();
    for &i in indices {
        let record = &dataset.records[i];
        if record.measurement.is_nan() {
            continue;
        }
        if let Some(category) = record.category.as_deref() {
            groups.entry(category).or_default().push(record);
        }
    }
    groups
}

fn position(dataset: &Dataset, category: &str) -> f64 {
    dataset.category_position(category).unwrap_or(0) as f64
}

// ---------------------------------------------------------------------------
// Figures
// ---------------------------------------------------------------------------

/// Mean measurement per category.
pub fn bar_figure(dataset: &Dataset, indices: &[usize]) -> Figure {
    let series = group_by_category(dataset, indices)
        .into_iter()
        .map(|(category, records)| {
            let mean =
                records.iter().map(|r| r.measurement).sum::<f64>() / records.len() as f64;
            Series {
                name: category.to_string(),
                kind: SeriesKind::Bar,
                x: vec![position(dataset, category)],
                y: vec![mean],
            }
        })
        .collect();

    Figure {
        title: format!("Mean {} by {}", dataset.columns.measurement, dataset.columns.category),
        x_label: dataset.columns.category.clone(),
        y_label: format!("mean {}", dataset.columns.measurement),
        series,
    }
}

/// Measurement against the secondary column (or row number) per category.
pub fn scatter_figure(dataset: &Dataset, indices: &[usize]) -> Figure {
    let series = group_by_category(dataset, indices)
        .into_iter()
        .map(|(category, records)| Series {
            name: category.to_string(),
            kind: SeriesKind::Scatter,
            x: records.iter().map(|r| r.abscissa()).collect(),
            y: records.iter().map(|r| r.measurement).collect(),
        })
        .collect();

    let x_label = dataset
        .columns
        .x
        .clone()
        .unwrap_or_else(|| "row".to_string());
    Figure {
        title: format!("{} vs {x_label}", dataset.columns.measurement),
        x_label,
        y_label: dataset.columns.measurement.clone(),
        series,
    }
}

/// Distribution of the measurement per category.
pub fn box_figure(dataset: &Dataset, indices: &[usize]) -> Figure {
    let series = group_by_category(dataset, indices)
        .into_iter()
        .map(|(category, records)| Series {
            name: category.to_string(),
            kind: SeriesKind::Box,
            x: vec![position(dataset, category); records.len()],
            y: records.iter().map(|r| r.measurement).collect(),
        })
        .collect();

    Figure {
        title: format!("{} distribution", dataset.columns.measurement),
        x_label: dataset.columns.category.clone(),
        y_label: dataset.columns.measurement.clone(),
        series,
    }
}

// ---------------------------------------------------------------------------
// Box statistics
// ---------------------------------------------------------------------------

/// Five-number summary used to draw a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Quartiles with linear interpolation; `None` for no finite values.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    Some(BoxStats {
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_pairs(&[
            (Some("Europe"), 70.0),
            (Some("Asia"), 40.0),
            (Some("Europe"), 74.0),
            (None, 55.0),
            (Some("Africa"), f64::NAN),
        ])
    }

    #[test]
    fn one_series_per_category_in_sorted_order() {
        let ds = dataset();
        let indices: Vec<usize> = (0..ds.len()).collect();
        let fig = bar_figure(&ds, &indices);
        let names: Vec<&str> = fig.series.iter().map(|s| s.name.as_str()).collect();
        // Africa only has a NaN measurement, the null category is dropped.
        assert_eq!(names, ["Asia", "Europe"]);
        assert_eq!(fig.series[1].y, vec![72.0]);
        assert_eq!(fig.series[1].x, vec![3.0]);
    }

    #[test]
    fn scatter_uses_secondary_column() {
        let ds = dataset();
        let fig = scatter_figure(&ds, &[0, 2]);
        assert_eq!(fig.series.len(), 1);
        assert_eq!(fig.series[0].x, vec![0.0, 20.0]);
        assert_eq!(fig.series[0].y, vec![70.0, 74.0]);
        assert_eq!(fig.x_label, "gdpPercap");
    }

    #[test]
    fn box_series_repeats_position() {
        let ds = dataset();
        let fig = box_figure(&ds, &[0, 1, 2]);
        let europe = fig.series.iter().find(|s| s.name == "Europe").unwrap();
        assert_eq!(europe.x, vec![3.0, 3.0]);
        assert_eq!(europe.kind, SeriesKind::Box);
    }

    #[test]
    fn box_stats_interpolates() {
        let stats = box_stats(&[4.0, 1.0, 3.0, 2.0, f64::NAN]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
        assert_eq!(stats.max, 4.0);
        assert_eq!(box_stats(&[]), None);
    }

    #[test]
    fn empty_selection_yields_empty_view() {
        let ds = dataset();
        let view = DashboardView::for_selection("t", &ds, &Selection::new());
        assert_eq!(view.summary, RangeSummary::Empty);
        assert_eq!(view.range, None);
        assert_eq!(view.visible_records, 0);
        assert!(view.bar.series.is_empty());
        assert!(view.scatter.series.is_empty());
    }

    #[test]
    fn view_applies_default_range() {
        let ds = dataset();
        let view = DashboardView::for_selection("t", &ds, &ds.all_categories());
        // min 40, max 74, mean 61 -> [50, 67], which none of 40, 70, 74 fall in.
        assert_eq!(view.range, Some(ValueRange::new(50.0, 67.0)));
        assert_eq!(view.visible_records, 0);

        let wide = DashboardView::build(
            "t",
            &ds,
            &ds.all_categories(),
            summary::compute(&ds, &ds.all_categories()),
            Some(ValueRange::new(0.0, 100.0)),
        );
        assert_eq!(wide.visible_records, 3);
        let json = serde_json::to_value(&wide).unwrap();
        assert_eq!(json["bar"]["series"][0]["type"], "bar");
        assert_eq!(json["summary"]["status"], "bounds");
    }
}
