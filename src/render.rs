use std::fmt::Write;

use crate::data::filter::Recommendation;
use crate::data::model::Dataset;

/// Shown instead of a list when nothing matched.
pub const NO_MATCH_MESSAGE: &str = "No matching products found. Try adjusting filters.";

/// Format a recommendation as the text block shown in the output box.
///
/// Prices use `{:?}` so whole numbers keep their decimal point (`600.0`).
pub fn render(dataset: &Dataset, recommendation: &Recommendation) -> String {
    let indices = match recommendation {
        Recommendation::NoMatch => return NO_MATCH_MESSAGE.to_string(),
        Recommendation::Top(indices) => indices,
    };

    let mut out = String::new();
    for (rank, &idx) in indices.iter().enumerate() {
        let tx = &dataset.records[idx];
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "\n🛍️ **Item {}**\n\
             Category: {}\n\
             Price: {:?}\n\
             Quantity: {}\n\
             Shopping Mall: {}\n\
             Date: {}\n\
             Payment: {}\n\
             ---\n",
            rank + 1,
            tx.category,
            tx.price,
            tx.quantity,
            tx.mall,
            tx.invoice_date,
            tx.payment_method,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::filter::{recommend, Criteria};
    use crate::data::model::{AgeBracket, TransactionRow};

    fn dataset() -> Dataset {
        let row = |category: &str, total_price: f64| TransactionRow {
            gender: "Female".into(),
            age: 31.0,
            category: category.into(),
            shopping_mall: "Mall A".into(),
            price: 150.5,
            quantity: 2,
            total_price,
            invoice_date: NaiveDate::from_ymd_opt(2022, 8, 5).unwrap(),
            payment_method: "Credit Card".into(),
        };
        Dataset::from_records(vec![
            row("Shoes", 301.0).into(),
            row("Clothing", 301.0).into(),
        ])
    }

    #[test]
    fn no_match_renders_the_hint() {
        let ds = dataset();
        let criteria = Criteria {
            gender: "Female".into(),
            age_bracket: AgeBracket::Thirties,
            category: "Clothing".into(),
            mall: "Mall A".into(),
            price_min: 100.0,
            price_max: 3000.0,
            min_quantity: 3,
        };
        let result = recommend(&ds, &criteria);
        assert_eq!(
            render(&ds, &result),
            "No matching products found. Try adjusting filters."
        );
    }

    #[test]
    fn items_render_in_rank_order() {
        let ds = dataset();
        let text = render(&ds, &Recommendation::Top(vec![1, 0]));

        let expected = "\n🛍️ **Item 1**\n\
                        Category: Clothing\n\
                        Price: 150.5\n\
                        Quantity: 2\n\
                        Shopping Mall: Mall A\n\
                        Date: 2022-08-05\n\
                        Payment: Credit Card\n\
                        ---\n\
                        \n🛍️ **Item 2**\n\
                        Category: Shoes\n\
                        Price: 150.5\n\
                        Quantity: 2\n\
                        Shopping Mall: Mall A\n\
                        Date: 2022-08-05\n\
                        Payment: Credit Card\n\
                        ---\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn whole_number_price_keeps_decimal_point() {
        let mut ds = dataset();
        ds.records[0].price = 600.0;
        let text = render(&ds, &Recommendation::Top(vec![0]));
        assert!(text.contains("\nPrice: 600.0\n"), "{text}");
    }
}
