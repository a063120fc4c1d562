use std::cmp::Ordering;

use super::model::{AgeBracket, Dataset, Transaction};

/// Number of records a recommendation returns at most.
pub const TOP_K: usize = 3;

// ---------------------------------------------------------------------------
// Criteria: the user's selection for one request
// ---------------------------------------------------------------------------

/// Every field is a required constraint; a record must satisfy all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    pub gender: String,
    pub age_bracket: AgeBracket,
    pub category: String,
    pub mall: String,
    /// Inclusive lower bound on unit price.
    pub price_min: f64,
    /// Inclusive upper bound on unit price.
    pub price_max: f64,
    /// Inclusive lower bound on quantity.
    pub min_quantity: u32,
}

impl Criteria {
    /// Whether a single transaction satisfies every constraint.
    pub fn matches(&self, tx: &Transaction) -> bool {
        tx.gender == self.gender
            && tx.age_bracket == self.age_bracket
            && tx.category == self.category
            && tx.mall == self.mall
            && tx.price >= self.price_min
            && tx.price <= self.price_max
            && tx.quantity >= self.min_quantity
    }
}

// ---------------------------------------------------------------------------
// Filter-and-rank
// ---------------------------------------------------------------------------

/// Outcome of one recommendation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    /// Indices into `Dataset::records`, best first. Never empty.
    Top(Vec<usize>),
    /// Nothing satisfied the criteria.
    NoMatch,
}

impl Recommendation {
    pub fn indices(&self) -> &[usize] {
        match self {
            Recommendation::Top(indices) => indices,
            Recommendation::NoMatch => &[],
        }
    }
}

/// Return indices of records that pass every constraint, in dataset order.
pub fn matching_indices(dataset: &Dataset, criteria: &Criteria) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, tx)| criteria.matches(tx))
        .map(|(i, _)| i)
        .collect()
}

/// Descending order with NaN after every number.
fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.total_cmp(&a),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    }
}

/// Pick the [`TOP_K`] matching records with the highest total price.
///
/// Equal totals keep their dataset order (`sort_by` is stable); a NaN total
/// ranks below every number.
pub fn recommend(dataset: &Dataset, criteria: &Criteria) -> Recommendation {
    let mut matched = matching_indices(dataset, criteria);

    log::debug!("{} of {} records match {criteria:?}", matched.len(), dataset.len());

    if matched.is_empty() {
        return Recommendation::NoMatch;
    }

    matched.sort_by(|&a, &b| {
        descending_nan_last(dataset.records[a].total_price, dataset.records[b].total_price)
    });
    matched.truncate(TOP_K);
    Recommendation::Top(matched)
}
