use eframe::egui::{self, ComboBox, RichText, Slider, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::AgeBracket;
use crate::state::{AppState, PRICE_MAX_RANGE, PRICE_MIN_RANGE, PRICE_STEP};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Title and dataset summary.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("🛒 Real-Time Shopping Recommendation System");
        ui.separator();
        ui.label(format!("{} transactions loaded", state.dataset.len()));
    });
}

// ---------------------------------------------------------------------------
// Left side panel – the form
// ---------------------------------------------------------------------------

fn string_choice(ui: &mut Ui, label: &str, current: &mut Option<String>, choices: &[String]) {
    ui.strong(label);
    ComboBox::from_id_salt(label)
        .width(ui.available_width())
        .selected_text(current.as_deref().unwrap_or("–"))
        .show_ui(ui, |ui: &mut Ui| {
            for choice in choices {
                ui.selectable_value(current, Some(choice.clone()), choice.as_str());
            }
        });
    ui.add_space(4.0);
}

fn bracket_choice(ui: &mut Ui, current: &mut Option<AgeBracket>, choices: &[AgeBracket]) {
    ui.strong("Age Group");
    ComboBox::from_id_salt("age_group")
        .width(ui.available_width())
        .selected_text(current.map(AgeBracket::label).unwrap_or("–"))
        .show_ui(ui, |ui: &mut Ui| {
            for &bracket in choices {
                ui.selectable_value(current, Some(bracket), bracket.label());
            }
        });
    ui.add_space(4.0);
}

/// Render the filter form and the "Get Recommendations" button.
pub fn form_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = state.dataset.clone();
    let inputs = &mut state.inputs;

    string_choice(ui, "Gender", &mut inputs.gender, &dataset.genders);
    bracket_choice(ui, &mut inputs.age_bracket, &dataset.age_brackets);
    string_choice(ui, "Category", &mut inputs.category, &dataset.categories);
    string_choice(ui, "Shopping Mall", &mut inputs.mall, &dataset.malls);

    ui.separator();

    ui.strong("Price Range (Min)");
    ui.add(Slider::new(&mut inputs.price_min, PRICE_MIN_RANGE).step_by(PRICE_STEP));
    ui.strong("Price Range (Max)");
    ui.add(Slider::new(&mut inputs.price_max, PRICE_MAX_RANGE).step_by(PRICE_STEP));
    ui.strong("Minimum Quantity");
    ui.add(egui::DragValue::new(&mut inputs.min_quantity).range(0..=10_000));

    ui.add_space(8.0);
    if ui.button("Get Recommendations").clicked() {
        state.request_recommendations();
    }
}

// ---------------------------------------------------------------------------
// Central panel – results
// ---------------------------------------------------------------------------

/// Text block plus a table of the recommended records.
pub fn results_panel(ui: &mut Ui, state: &AppState) {
    ui.strong("Recommendations");
    egui::ScrollArea::vertical()
        .id_salt("recommendations_text")
        .max_height(220.0)
        .show(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::multiline(&mut state.output.as_str())
                    .desired_rows(10)
                    .desired_width(f32::INFINITY),
            );
        });

    let Some(result) = &state.result else {
        return;
    };
    ui.label(
        RichText::new(format!("{} matching transactions", state.match_count)).weak(),
    );
    if result.indices().is_empty() {
        return;
    }

    ui.separator();
    TableBuilder::new(ui)
        .id_salt("recommendations_table")
        .striped(true)
        .column(Column::auto())
        .columns(Column::auto().at_least(70.0), 7)
        .header(20.0, |mut header| {
            for title in [
                "#", "Category", "Price", "Quantity", "Total", "Shopping Mall", "Date",
                "Payment",
            ] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (rank, &idx) in result.indices().iter().enumerate() {
                let tx = &state.dataset.records[idx];
                body.row(18.0, |mut row| {
                    let cells = [
                        (rank + 1).to_string(),
                        tx.category.clone(),
                        format!("{:.2}", tx.price),
                        tx.quantity.to_string(),
                        format!("{:.2}", tx.total_price),
                        tx.mall.clone(),
                        tx.invoice_date.to_string(),
                        tx.payment_method.clone(),
                    ];
                    for text in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(text);
                        });
                    }
                });
            }
        });
}
