use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::{Action, AppState};

/// Reference links shown under the title.
const REFERENCES: &[(&str, &str)] = &[
    ("egui widgets", "https://docs.rs/egui/latest/egui/widgets/index.html"),
    ("egui_plot charts", "https://docs.rs/egui_plot/latest/egui_plot/"),
    ("Gapminder dataset", "https://github.com/plotly/datasets"),
];

// ---------------------------------------------------------------------------
// Header – title and references
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui, state: &AppState) {
    ui.heading(&state.title);
    ui.label(RichText::new("Some references").strong());
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (label, url) in REFERENCES {
            ui.hyperlink_to(*label, *url);
        }
    });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Left side panel – dropdown, range slider, summary
// ---------------------------------------------------------------------------

/// Render the control panel. Returns the actions the user triggered this frame.
pub fn side_panel(ui: &mut Ui, state: &AppState) -> Vec<Action> {
    let mut actions = Vec::new();
    let dataset = &state.dataset;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Category dropdown ----
            ui.strong(&dataset.columns.category);
            let selected_text = format!(
                "{} of {} selected",
                state.selection.len(),
                dataset.categories.len()
            );
            egui::ComboBox::from_id_salt("categories")
                .selected_text(selected_text)
                .show_ui(ui, |ui: &mut Ui| {
                    for category in &dataset.categories {
                        let mut checked = state.selection.contains(category);
                        let text = RichText::new(category).color(state.color_map.color_for(category));
                        if ui.checkbox(&mut checked, text).changed() {
                            actions.push(Action::ToggleCategory(category.clone()));
                        }
                    }
                });
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    actions.push(Action::SelectAll);
                }
                if ui.small_button("None").clicked() {
                    actions.push(Action::SelectNone);
                }
            });
            ui.separator();

            // ---- Range slider ----
            ui.strong(format!("{} range", dataset.columns.measurement));
            match (state.view.summary.bounds(), state.range()) {
                (Some(bounds), Some(range)) => {
                    let (mut low, mut high) = (range.low, range.high);
                    let low_changed = ui
                        .add(egui::Slider::new(&mut low, bounds.min..=bounds.max).text("low"))
                        .changed();
                    let high_changed = ui
                        .add(egui::Slider::new(&mut high, bounds.min..=bounds.max).text("high"))
                        .changed();
                    if low_changed || high_changed {
                        actions.push(Action::SetRange(low, high));
                    }

                    ui.horizontal(|ui: &mut Ui| {
                        if let Some(first) = bounds.marks.first() {
                            ui.small(&first.label);
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                            if let Some(last) = bounds.marks.last() {
                                ui.small(&last.label);
                            }
                        });
                    });

                    if ui.button("Reset range").clicked() {
                        actions.push(Action::ResetRange);
                    }
                }
                _ => {
                    ui.add_enabled_ui(false, |ui: &mut Ui| {
                        let mut placeholder = 0.0_f64;
                        ui.add(egui::Slider::new(&mut placeholder, 0.0..=1.0).text("low"));
                        ui.add(egui::Slider::new(&mut placeholder, 0.0..=1.0).text("high"));
                        let _ = ui.button("Reset range");
                    });
                    ui.label("No numeric data for the current selection.");
                }
            }
            ui.separator();

            // ---- Summary table ----
            ui.strong("Summary");
            summary_table(ui, state);
        });

    actions
}

fn summary_table(ui: &mut Ui, state: &AppState) {
    let Some(bounds) = state.view.summary.bounds() else {
        ui.label("–");
        return;
    };
    let rows = [
        ("min", bounds.min),
        ("max", bounds.max),
        ("mean", bounds.mean),
        ("low", bounds.low),
        ("high", bounds.high),
    ];

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .body(|mut body| {
            for (name, value) in rows {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(name);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.monospace(format!("{value}"));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export JSON…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records loaded, {} visible",
            state.dataset.len(),
            state.view.visible_records
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export dashboard view")
        .set_file_name("dashboard.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match crate::export::export_view(&path, &state.view) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export view: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
