use std::sync::Arc;

use crate::color::CategoryColors;
use crate::data::filter::{matching_indices, recommend, Criteria, Recommendation};
use crate::data::model::{AgeBracket, Dataset};
use crate::render::render;

// ---------------------------------------------------------------------------
// Form inputs
// ---------------------------------------------------------------------------

pub const PRICE_MIN_RANGE: std::ops::RangeInclusive<f64> = 0.0..=5000.0;
pub const PRICE_MAX_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10000.0;
pub const PRICE_STEP: f64 = 50.0;

/// Current values of the form controls.
///
/// Dropdowns start on the first choice the dataset offers, and stay `None`
/// only when the dataset has no rows.
#[derive(Debug, Clone, PartialEq)]
pub struct FormInputs {
    pub gender: Option<String>,
    pub age_bracket: Option<AgeBracket>,
    pub category: Option<String>,
    pub mall: Option<String>,
    pub price_min: f64,
    pub price_max: f64,
    pub min_quantity: u32,
}

impl FormInputs {
    pub fn for_dataset(dataset: &Dataset) -> Self {
        FormInputs {
            gender: dataset.genders.first().cloned(),
            age_bracket: dataset.age_brackets.first().copied(),
            category: dataset.categories.first().cloned(),
            mall: dataset.malls.first().cloned(),
            price_min: 100.0,
            price_max: 3000.0,
            min_quantity: 1,
        }
    }

    /// All dropdowns chosen → a complete set of criteria.
    pub fn criteria(&self) -> Option<Criteria> {
        Some(Criteria {
            gender: self.gender.clone()?,
            age_bracket: self.age_bracket?,
            category: self.category.clone()?,
            mall: self.mall.clone()?,
            price_min: self.price_min,
            price_max: self.price_max,
            min_quantity: self.min_quantity,
        })
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, never replaced.
    pub dataset: Arc<Dataset>,

    pub inputs: FormInputs,

    /// Result of the last button press (None before the first one).
    pub result: Option<Recommendation>,

    /// Text shown in the "Recommendations" box.
    pub output: String,

    /// How many records passed the filter on the last request.
    pub match_count: usize,

    pub colors: CategoryColors,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            inputs: FormInputs::for_dataset(&dataset),
            colors: CategoryColors::new(&dataset.categories),
            result: None,
            output: String::new(),
            match_count: 0,
            dataset,
        }
    }

    /// "Get Recommendations": run the engine on the current inputs.
    pub fn request_recommendations(&mut self) {
        let result = match self.inputs.criteria() {
            Some(criteria) => {
                self.match_count = matching_indices(&self.dataset, &criteria).len();
                recommend(&self.dataset, &criteria)
            }
            None => {
                self.match_count = 0;
                Recommendation::NoMatch
            }
        };
        self.output = render(&self.dataset, &result);
        self.result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::{Transaction, TransactionRow};
    use crate::render::NO_MATCH_MESSAGE;

    fn dataset() -> Arc<Dataset> {
        let row = |gender: &str, age: f64, price: f64, quantity: u32| -> Transaction {
            TransactionRow {
                gender: gender.into(),
                age,
                category: "Clothing".into(),
                shopping_mall: "Kanyon".into(),
                price,
                quantity,
                total_price: price * quantity as f64,
                invoice_date: NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
                payment_method: "Cash".into(),
            }
            .into()
        };
        Arc::new(Dataset::from_records(vec![
            row("Female", 45.0, 300.0, 2),
            row("Male", 22.0, 1200.0, 3),
            row("Female", 41.0, 900.0, 4),
        ]))
    }

    #[test]
    fn form_starts_on_first_choices() {
        let state = AppState::new(dataset());
        assert_eq!(state.inputs.gender.as_deref(), Some("Female"));
        assert_eq!(state.inputs.age_bracket, Some(AgeBracket::Twenties));
        assert_eq!(state.inputs.price_min, 100.0);
        assert_eq!(state.inputs.price_max, 3000.0);
        assert_eq!(state.inputs.min_quantity, 1);
        assert!(state.result.is_none());
    }

    #[test]
    fn request_fills_output() {
        let mut state = AppState::new(dataset());
        state.inputs.age_bracket = Some(AgeBracket::Forties);
        state.request_recommendations();

        assert_eq!(state.match_count, 2);
        assert_eq!(state.result, Some(Recommendation::Top(vec![2, 0])));
        assert!(state.output.starts_with("\n🛍️ **Item 1**\n"));

        state.inputs.min_quantity = 10;
        state.request_recommendations();
        assert_eq!(state.result, Some(Recommendation::NoMatch));
        assert_eq!(state.output, NO_MATCH_MESSAGE);
    }

    #[test]
    fn empty_dataset_yields_no_match() {
        let mut state = AppState::new(Arc::new(Dataset::default()));
        assert!(state.inputs.criteria().is_none());
        state.request_recommendations();
        assert_eq!(state.output, NO_MATCH_MESSAGE);
    }
}
