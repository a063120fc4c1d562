mod app;
mod color;
mod config;
mod data;
mod render;
mod state;
mod ui;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use app::RecommenderApp;
use config::Config;
use eframe::egui;

fn load_dataset(config: &Config) -> anyhow::Result<data::model::Dataset> {
    let dataset = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    log::info!(
        "Loaded {} transactions: {} genders, {} age groups, {} categories, {} malls",
        dataset.len(),
        dataset.genders.len(),
        dataset.age_brackets.len(),
        dataset.categories.len(),
        dataset.malls.len()
    );
    Ok(dataset)
}

fn main() -> ExitCode {
    env_logger::init();

    let config = Config::from_env();
    let dataset = match load_dataset(&config) {
        Ok(ds) => Arc::new(ds),
        Err(e) => {
            log::error!("Failed to load dataset: {e:#}");
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Shopping Recommender",
        options,
        Box::new(move |_cc| Ok(Box::new(RecommenderApp::new(dataset)))),
    );
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("UI terminated: {e}");
            ExitCode::FAILURE
        }
    }
}
