use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::chart::{box_stats, Figure};
use crate::data::summary::RangeSummary;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Dashboard plots (central panel)
// ---------------------------------------------------------------------------

/// Bar chart on top, scatter and box plot side by side underneath.
pub fn dashboard_plots(ui: &mut Ui, state: &AppState) {
    if state.view.summary == RangeSummary::Empty {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Select at least one category with numeric data");
        });
        return;
    }

    let view = &state.view;
    let colors = &state.color_map;
    let bar_height = ui.available_height() * 0.4;

    bar_chart(ui, &view.bar, colors, bar_height);
    ui.separator();
    ui.columns(2, |columns: &mut [Ui]| {
        scatter_plot(&mut columns[0], &view.scatter, colors);
        box_plot(&mut columns[1], &view.box_plot, colors);
    });
}

fn bar_chart(ui: &mut Ui, figure: &Figure, colors: &ColorMap, height: f32) {
    ui.strong(&figure.title);
    Plot::new("bar_chart")
        .legend(Legend::default())
        .x_axis_label(figure.x_label.as_str())
        .y_axis_label(figure.y_label.as_str())
        .allow_boxed_zoom(true)
        .height(height)
        .show(ui, |plot_ui| {
            for series in &figure.series {
                let color = colors.color_for(&series.name);
                let bars: Vec<Bar> = series
                    .x
                    .iter()
                    .zip(&series.y)
                    .map(|(&x, &y)| Bar::new(x, y).width(0.6).fill(color))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&series.name).color(color));
            }
        });
}

fn scatter_plot(ui: &mut Ui, figure: &Figure, colors: &ColorMap) {
    ui.strong(&figure.title);
    Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label(figure.x_label.as_str())
        .y_axis_label(figure.y_label.as_str())
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for series in &figure.series {
                let points: PlotPoints = series
                    .x
                    .iter()
                    .zip(&series.y)
                    .map(|(&x, &y)| [x, y])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.name)
                        .color(colors.color_for(&series.name))
                        .radius(2.5),
                );
            }
        });
}

fn box_plot(ui: &mut Ui, figure: &Figure, colors: &ColorMap) {
    ui.strong(&figure.title);
    Plot::new("box_plot")
        .legend(Legend::default())
        .x_axis_label(figure.x_label.as_str())
        .y_axis_label(figure.y_label.as_str())
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for series in &figure.series {
                let (Some(stats), Some(&x)) = (box_stats(&series.y), series.x.first()) else {
                    continue;
                };
                let color: Color32 = colors.color_for(&series.name);
                let spread = BoxSpread::new(stats.min, stats.q1, stats.median, stats.q3, stats.max);
                let elem = BoxElem::new(x, spread).name(&series.name).box_width(0.5);
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&series.name).color(color));
            }
        });
}
