use crate::color::ColorMap;
use crate::data::chart::DashboardView;
use crate::data::filter::ValueRange;
use crate::data::model::{Dataset, Selection};

// ---------------------------------------------------------------------------
// Actions – the only way widgets change state
// ---------------------------------------------------------------------------

/// A user interaction. Widgets emit these; [`AppState::dispatch`] applies
/// them and recomputes everything derived.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleCategory(String),
    SelectAll,
    SelectNone,
    /// New slider ends, in either order.
    SetRange(f64, f64),
    /// Back to the summary's default `[low, high]`.
    ResetRange,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, never mutated.
    pub dataset: Dataset,

    pub title: String,

    /// Categories currently chosen in the dropdown.
    pub selection: Selection,

    /// Summary, range and figures for the current selection.
    pub view: DashboardView,

    /// Category → colour, shared by all charts.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Start with `initial` (restricted to known categories), or everything.
    pub fn new(dataset: Dataset, title: String, initial: Option<Selection>) -> Self {
        let selection = match initial {
            Some(requested) => {
                for unknown in requested.difference(&dataset.categories) {
                    log::warn!("Ignoring unknown category {unknown:?}");
                }
                requested
                    .intersection(&dataset.categories)
                    .cloned()
                    .collect()
            }
            None => dataset.all_categories(),
        };
        let view = DashboardView::for_selection(&title, &dataset, &selection);
        let color_map = ColorMap::new(&dataset.categories);

        Self {
            dataset,
            title,
            selection,
            view,
            color_map,
            status_message: None,
        }
    }

    /// Current slider range; `None` while the summary is empty.
    pub fn range(&self) -> Option<ValueRange> {
        self.view.range
    }

    /// Apply one action and recompute derived values.
    pub fn dispatch(&mut self, action: Action) {
        log::debug!("dispatch {action:?}");
        match action {
            Action::ToggleCategory(category) => {
                if !self.selection.remove(&category) && self.dataset.categories.contains(&category) {
                    self.selection.insert(category);
                }
                self.selection_changed();
            }
            Action::SelectAll => {
                self.selection = self.dataset.all_categories();
                self.selection_changed();
            }
            Action::SelectNone => {
                self.selection.clear();
                self.selection_changed();
            }
            Action::SetRange(a, b) => self.rebuild(Some(ValueRange::ordered(a, b))),
            Action::ResetRange => self.rebuild(self.view.summary.default_range()),
        }
    }

    /// New selection: summary recomputed, range reset to its default.
    fn selection_changed(&mut self) {
        self.view = DashboardView::for_selection(&self.title, &self.dataset, &self.selection);
    }

    /// Same selection, new range.
    fn rebuild(&mut self, range: Option<ValueRange>) {
        let summary = self.view.summary.clone();
        self.view = DashboardView::build(&self.title, &self.dataset, &self.selection, summary, range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::summary::RangeSummary;

    fn state() -> AppState {
        let ds = Dataset::from_pairs(&[
            (Some("a"), 8.3),
            (Some("a"), 9.1),
            (Some("b"), 18.0),
            (Some("c"), 100.0),
        ]);
        let initial: Selection = ["a".to_string(), "b".to_string(), "zzz".to_string()].into();
        AppState::new(ds, "Test".to_string(), Some(initial))
    }

    #[test]
    fn unknown_initial_categories_are_dropped() {
        let s = state();
        let sel: Vec<&str> = s.selection.iter().map(String::as_str).collect();
        assert_eq!(sel, ["a", "b"]);
        assert_eq!(s.range(), Some(ValueRange::new(9.0, 14.0)));
    }

    #[test]
    fn toggling_recomputes_summary_and_resets_range() {
        let mut s = state();
        s.dispatch(Action::SetRange(8.0, 18.0));
        s.dispatch(Action::ToggleCategory("b".to_string()));
        let b = s.view.summary.bounds().unwrap();
        assert_eq!((b.min, b.max), (8.0, 9.0));
        assert_eq!(s.range(), b.default_range().into());

        s.dispatch(Action::ToggleCategory("b".to_string()));
        assert!(s.selection.contains("b"));
    }

    #[test]
    fn toggling_unknown_category_is_ignored() {
        let mut s = state();
        s.dispatch(Action::ToggleCategory("nope".to_string()));
        assert!(!s.selection.contains("nope"));
    }

    #[test]
    fn set_range_normalises_order_and_filters() {
        let mut s = state();
        s.dispatch(Action::SetRange(18.0, 9.0));
        assert_eq!(s.range(), Some(ValueRange::new(9.0, 18.0)));
        assert_eq!(s.view.visible_records, 2);

        s.dispatch(Action::ResetRange);
        assert_eq!(s.range(), Some(ValueRange::new(9.0, 14.0)));
    }

    #[test]
    fn select_none_gives_neutral_view() {
        let mut s = state();
        s.dispatch(Action::SelectNone);
        assert_eq!(s.view.summary, RangeSummary::Empty);
        assert_eq!(s.range(), None);
        s.dispatch(Action::SetRange(0.0, 1.0));
        assert_eq!(s.range(), None);

        s.dispatch(Action::SelectAll);
        assert_eq!(s.selection.len(), 3);
        assert!(s.range().is_some());
    }
}
