use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Total-price bar chart of the current recommendations
// ---------------------------------------------------------------------------

pub fn recommendation_chart(ui: &mut Ui, state: &AppState) {
    let indices = match &state.result {
        Some(result) if !result.indices().is_empty() => result.indices(),
        _ => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Pick filters and press \"Get Recommendations\"");
            });
            return;
        }
    };

    let bars: Vec<Bar> = indices
        .iter()
        .enumerate()
        .map(|(rank, &idx)| {
            let tx = &state.dataset.records[idx];
            Bar::new((rank + 1) as f64, tx.total_price)
                .name(format!("Item {} – {}", rank + 1, tx.category))
                .fill(state.colors.color_for(&tx.category))
                .width(0.6)
        })
        .collect();

    Plot::new("recommendation_chart")
        .legend(Legend::default())
        .x_axis_label("Item")
        .y_axis_label("Total price")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Total price"));
        });
}
