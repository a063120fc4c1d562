use std::sync::Arc;

use eframe::egui;

use crate::data::model::Dataset;
use crate::state::AppState;
use crate::ui::{chart, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RecommenderApp {
    pub state: AppState,
}

impl RecommenderApp {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            state: AppState::new(dataset),
        }
    }
}

impl eframe::App for RecommenderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: form ----
        egui::SidePanel::left("form_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::form_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: text output and table ----
        egui::TopBottomPanel::bottom("results_panel")
            .resizable(true)
            .default_height(380.0)
            .show(ctx, |ui| {
                panels::results_panel(ui, &self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            chart::recommendation_chart(ui, &self.state);
        });
    }
}
