mod app;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use anyhow::Result;
use app::RangeDashApp;
use clap::Parser;
use eframe::egui;

use config::Args;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let source = args.source();
    let dataset = data::loader::load_source(&source, &args.columns(), args.timeout())
        .inspect_err(|e| log::error!("Failed to load dataset from {source}: {e:#}"))?;
    log::info!(
        "Loaded {} records with {} categories {:?}",
        dataset.len(),
        dataset.categories.len(),
        dataset.categories
    );

    let state = AppState::new(dataset, args.title.clone(), args.initial_selection());

    if let Some(target) = &args.export {
        return export::export_view(target, &state.view);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &args.title,
        options,
        Box::new(|_cc| Ok(Box::new(RangeDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
