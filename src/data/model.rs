use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// AgeBracket – derived from the numeric age column
// ---------------------------------------------------------------------------

/// One of six fixed, contiguous age buckets.
///
/// Variant order is ascending age, so the derived `Ord` sorts brackets the
/// way the form lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBracket {
    Under20,
    Twenties,
    Thirties,
    Forties,
    Fifties,
    SixtyPlus,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 6] = [
        AgeBracket::Under20,
        AgeBracket::Twenties,
        AgeBracket::Thirties,
        AgeBracket::Forties,
        AgeBracket::Fifties,
        AgeBracket::SixtyPlus,
    ];

    /// Bucket an age. Upper bounds are exclusive and tested in ascending order.
    pub fn from_age(age: f64) -> Self {
        if age < 20.0 {
            AgeBracket::Under20
        } else if age < 30.0 {
            AgeBracket::Twenties
        } else if age < 40.0 {
            AgeBracket::Thirties
        } else if age < 50.0 {
            AgeBracket::Forties
        } else if age < 60.0 {
            AgeBracket::Fifties
        } else {
            AgeBracket::SixtyPlus
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBracket::Under20 => "<20",
            AgeBracket::Twenties => "20-29",
            AgeBracket::Thirties => "30-39",
            AgeBracket::Forties => "40-49",
            AgeBracket::Fifties => "50-59",
            AgeBracket::SixtyPlus => "60+",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown age bracket '{0}'")]
pub struct UnknownAgeBracket(pub String);

impl FromStr for AgeBracket {
    type Err = UnknownAgeBracket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        AgeBracket::ALL
            .into_iter()
            .find(|b| b.label() == s)
            .ok_or_else(|| UnknownAgeBracket(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Invoice dates
// ---------------------------------------------------------------------------

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// Parse an invoice date in any of the layouts seen in exported datasets.
pub fn parse_invoice_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn deserialize_invoice_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_invoice_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised invoice date '{raw}'")))
}

// ---------------------------------------------------------------------------
// Transaction – one row of the source table
// ---------------------------------------------------------------------------

/// A row as it appears in the source file, before derived columns are added.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRow {
    pub gender: String,
    pub age: f64,
    pub category: String,
    #[serde(alias = "mall")]
    pub shopping_mall: String,
    pub price: f64,
    pub quantity: u32,
    pub total_price: f64,
    #[serde(deserialize_with = "deserialize_invoice_date")]
    pub invoice_date: NaiveDate,
    pub payment_method: String,
}

/// A single retail transaction with its age bracket resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub gender: String,
    pub age: f64,
    pub age_bracket: AgeBracket,
    pub category: String,
    pub mall: String,
    /// Unit price.
    pub price: f64,
    pub quantity: u32,
    pub total_price: f64,
    pub invoice_date: NaiveDate,
    pub payment_method: String,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Transaction {
            age_bracket: AgeBracket::from_age(row.age),
            gender: row.gender,
            age: row.age,
            category: row.category,
            mall: row.shopping_mall,
            price: row.price,
            quantity: row.quantity,
            total_price: row.total_price,
            invoice_date: row.invoice_date,
            payment_method: row.payment_method,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded transactions plus the choice lists offered by the form.
///
/// Built once and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All records, in file order.
    pub records: Vec<Transaction>,
    /// Distinct genders in first-appearance order.
    pub genders: Vec<String>,
    /// Distinct brackets present in the data, ascending.
    pub age_brackets: Vec<AgeBracket>,
    /// Distinct categories in first-appearance order.
    pub categories: Vec<String>,
    /// Distinct malls in first-appearance order.
    pub malls: Vec<String>,
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

impl Dataset {
    /// Build the choice lists from the loaded records.
    pub fn from_records(records: Vec<Transaction>) -> Self {
        let mut genders = Vec::new();
        let mut categories = Vec::new();
        let mut malls = Vec::new();
        let mut age_brackets = Vec::new();

        for tx in &records {
            push_unique(&mut genders, &tx.gender);
            push_unique(&mut categories, &tx.category);
            push_unique(&mut malls, &tx.mall);
            if !age_brackets.contains(&tx.age_bracket) {
                age_brackets.push(tx.age_bracket);
            }
        }
        age_brackets.sort();

        Dataset {
            records,
            genders,
            age_brackets,
            categories,
            malls,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_boundaries() {
        let cases = [
            (0.0, "<20"),
            (19.0, "<20"),
            (19.9, "<20"),
            (20.0, "20-29"),
            (29.0, "20-29"),
            (30.0, "30-39"),
            (39.0, "30-39"),
            (40.0, "40-49"),
            (50.0, "50-59"),
            (59.0, "50-59"),
            (60.0, "60+"),
            (99.0, "60+"),
        ];
        for (age, label) in cases {
            assert_eq!(AgeBracket::from_age(age).label(), label, "age {age}");
        }
    }

    #[test]
    fn every_age_lands_in_exactly_one_bracket() {
        for age in 0..120 {
            let age = age as f64;
            let hits = AgeBracket::ALL
                .iter()
                .filter(|b| **b == AgeBracket::from_age(age))
                .count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn brackets_are_contiguous_and_ordered() {
        // Walking ages upward never skips a bracket or goes backwards.
        let mut seen = vec![AgeBracket::from_age(0.0)];
        for age in 1..100 {
            let b = AgeBracket::from_age(age as f64);
            let last = *seen.last().unwrap();
            assert!(b >= last);
            if b != last {
                let last_pos = AgeBracket::ALL.iter().position(|x| *x == last).unwrap();
                assert_eq!(AgeBracket::ALL[last_pos + 1], b);
                seen.push(b);
            }
        }
        assert_eq!(seen, AgeBracket::ALL.to_vec());
    }

    #[test]
    fn bracket_label_round_trips_through_from_str() {
        assert_eq!("30-39".parse::<AgeBracket>(), Ok(AgeBracket::Thirties));
        assert_eq!(" 60+ ".parse::<AgeBracket>(), Ok(AgeBracket::SixtyPlus));
        assert_eq!(
            "30s".parse::<AgeBracket>(),
            Err(UnknownAgeBracket("30s".to_string()))
        );
    }

    #[test]
    fn invoice_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2022, 8, 5).unwrap();
        assert_eq!(parse_invoice_date("2022-08-05"), Some(expected));
        assert_eq!(parse_invoice_date("5/8/2022"), Some(expected));
        assert_eq!(parse_invoice_date("05-08-2022"), Some(expected));
        assert_eq!(parse_invoice_date("05.08.2022"), Some(expected));
        assert_eq!(parse_invoice_date("yesterday"), None);
    }

    fn tx(gender: &str, age: f64, category: &str, mall: &str) -> Transaction {
        TransactionRow {
            gender: gender.into(),
            age,
            category: category.into(),
            shopping_mall: mall.into(),
            price: 10.0,
            quantity: 1,
            total_price: 10.0,
            invoice_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            payment_method: "Cash".into(),
        }
        .into()
    }

    #[test]
    fn choice_lists_keep_first_appearance_order() {
        let ds = Dataset::from_records(vec![
            tx("Male", 65.0, "Shoes", "Kanyon"),
            tx("Female", 25.0, "Clothing", "Metrocity"),
            tx("Male", 18.0, "Shoes", "Kanyon"),
            tx("Female", 33.0, "Books", "Kanyon"),
        ]);
        assert_eq!(ds.genders, vec!["Male", "Female"]);
        assert_eq!(ds.categories, vec!["Shoes", "Clothing", "Books"]);
        assert_eq!(ds.malls, vec!["Kanyon", "Metrocity"]);
        assert_eq!(
            ds.age_brackets,
            vec![
                AgeBracket::Under20,
                AgeBracket::Twenties,
                AgeBracket::Thirties,
                AgeBracket::SixtyPlus
            ]
        );
        assert_eq!(ds.len(), 4);
        assert!(!ds.is_empty());
    }

    #[test]
    fn dataset_can_be_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dataset>();
    }
}
