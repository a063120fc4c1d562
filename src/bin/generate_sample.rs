//! Writes a deterministic synthetic transaction table as
//! `sample_shopping_data.csv` and `sample_shopping_data.parquet`.
//!
//! Usage: `generate_sample [ROWS]` (default 2000).

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// (category, typical unit price)
const CATEGORIES: &[(&str, f64)] = &[
    ("Clothing", 300.08),
    ("Shoes", 600.17),
    ("Books", 15.15),
    ("Cosmetics", 40.66),
    ("Food & Beverage", 5.23),
    ("Toys", 35.84),
    ("Technology", 1050.0),
    ("Souvenir", 11.73),
];

const MALLS: &[&str] = &[
    "Kanyon",
    "Forum Istanbul",
    "Metrocity",
    "Metropol AVM",
    "Istinye Park",
    "Mall of Istanbul",
    "Emaar Square Mall",
    "Cevahir AVM",
    "Viaport Outlet",
    "Zorlu Center",
];

const GENDERS: &[&str] = &["Female", "Male"];
const PAYMENTS: &[&str] = &["Cash", "Credit Card", "Debit Card"];

#[derive(Debug, Serialize)]
struct Row {
    invoice_no: String,
    customer_id: String,
    gender: &'static str,
    age: i64,
    category: &'static str,
    quantity: i64,
    price: f64,
    payment_method: &'static str,
    invoice_date: String,
    shopping_mall: &'static str,
    total_price: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.below(items.len())]
    }
}

fn generate_rows(n: usize, rng: &mut SimpleRng) -> Vec<Row> {
    let first_day = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default();

    (0..n)
        .map(|i| {
            let (category, unit_price) = rng.pick(CATEGORIES);
            let quantity = 1 + rng.below(5) as i64;
            let date = first_day + Duration::days(rng.below(800) as i64);
            Row {
                invoice_no: format!("I{:06}", 100_000 + i),
                customer_id: format!("C{:06}", 100_000 + rng.below(900_000)),
                gender: rng.pick(GENDERS),
                age: 18 + rng.below(52) as i64,
                category,
                quantity,
                price: unit_price,
                payment_method: rng.pick(PAYMENTS),
                invoice_date: date.format("%d/%m/%Y").to_string(),
                shopping_mall: rng.pick(MALLS),
                total_price: ((unit_price * quantity as f64) * 100.0).round() / 100.0,
            }
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let strings = |f: fn(&Row) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("gender", DataType::Utf8, false),
        Field::new("age", DataType::Int64, false),
        Field::new("category", DataType::Utf8, false),
        Field::new("quantity", DataType::Int64, false),
        Field::new("price", DataType::Float64, false),
        Field::new("payment_method", DataType::Utf8, false),
        Field::new("invoice_date", DataType::Utf8, false),
        Field::new("shopping_mall", DataType::Utf8, false),
        Field::new("total_price", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            strings(|r| r.gender),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.age))),
            strings(|r| r.category),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.quantity))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.price))),
            strings(|r| r.payment_method),
            strings(|r| r.invoice_date.as_str()),
            strings(|r| r.shopping_mall),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.total_price))),
        ],
    )?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let n_rows = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<usize>()
            .with_context(|| format!("'{arg}' is not a row count"))?,
        None => 2000,
    };

    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(n_rows, &mut rng);

    let csv_path = "sample_shopping_data.csv";
    let parquet_path = "sample_shopping_data.parquet";
    write_csv(&rows, csv_path)?;
    write_parquet(&rows, parquet_path)?;

    println!("Wrote {} transactions to {csv_path} and {parquet_path}", rows.len());
    Ok(())
}
