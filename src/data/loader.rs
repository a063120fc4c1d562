use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use arrow::array::{
    Array, ArrayRef, Date32Array, Date64Array, Float32Array, Float64Array, Int32Array,
    Int64Array, LargeStringArray, StringArray, TimestampMicrosecondArray,
    TimestampMillisecondArray, TimestampNanosecondArray, TimestampSecondArray,
};
use arrow::datatypes::{DataType, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{parse_invoice_date, Dataset, Transaction, TransactionRow};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The dataset could not be read or does not match the expected schema.
#[derive(Debug, thiserror::Error)]
pub enum DataUnavailable {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("column '{0}' appears more than once (directly or under an alias)")]
    DuplicateColumn(&'static str),
    #[error("CSV row {row}: {source}")]
    Csv { row: usize, source: csv::Error },
    #[error("reading CSV header: {0}")]
    CsvHeader(csv::Error),
    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("JSON row {row}: {source}")]
    JsonRow {
        row: usize,
        source: serde_json::Error,
    },
    #[error("JSON row {row} is not an object")]
    JsonNotObject { row: usize },
    #[error("reading parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("reading arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("row {row}, column '{column}': {reason}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Required columns, in the order `resolve_columns` reports their positions,
/// with the alternative header names each one may appear under.
const COLUMNS: [(&str, &[&str]); 9] = [
    ("gender", &[]),
    ("age", &[]),
    ("category", &[]),
    ("shopping_mall", &["mall"]),
    ("price", &[]),
    ("quantity", &[]),
    ("total_price", &[]),
    ("invoice_date", &[]),
    ("payment_method", &[]),
];

/// Locate every required column among `headers`. Each must appear exactly
/// once, counting its aliases.
fn resolve_columns(headers: &[String]) -> Result<[usize; 9], DataUnavailable> {
    let mut positions = [0usize; 9];
    for (slot, (name, aliases)) in positions.iter_mut().zip(COLUMNS) {
        let mut found = headers.iter().enumerate().filter(|(_, h)| {
            let h = h.trim();
            h == name || aliases.contains(&h)
        });
        let (first, _) = found.next().ok_or(DataUnavailable::MissingColumn(name))?;
        if found.next().is_some() {
            return Err(DataUnavailable::DuplicateColumn(name));
        }
        *slot = first;
    }
    Ok(positions)
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the transaction table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one transaction per line
/// * `.json`    – `[{ "gender": "Female", "age": 28, ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<Dataset, DataUnavailable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let open = || {
        File::open(path).map_err(|source| DataUnavailable::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    match ext.as_str() {
        "csv" => load_csv_reader(open()?),
        "json" => load_json_reader(open()?),
        "parquet" | "pq" => load_parquet(open()?),
        other => Err(DataUnavailable::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV text. Extra columns are ignored; cells are trimmed.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Dataset, DataUnavailable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(DataUnavailable::CsvHeader)?
        .iter()
        .map(|h| h.to_string())
        .collect();
    resolve_columns(&headers)?;

    let records = reader
        .deserialize::<TransactionRow>()
        .enumerate()
        .map(|(row, result)| {
            result
                .map(Transaction::from)
                .map_err(|source| DataUnavailable::Csv { row, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')` layout.
pub fn load_json_reader<R: Read>(reader: R) -> Result<Dataset, DataUnavailable> {
    let rows: Vec<JsonValue> = serde_json::from_reader(reader)?;

    let mut records = Vec::with_capacity(rows.len());
    for (row, value) in rows.into_iter().enumerate() {
        let obj = value
            .as_object()
            .ok_or(DataUnavailable::JsonNotObject { row })?;
        let keys: Vec<String> = obj.keys().cloned().collect();
        resolve_columns(&keys)?;

        let parsed = TransactionRow::deserialize(value)
            .map_err(|source| DataUnavailable::JsonRow { row, source })?;
        records.push(parsed.into());
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); `invoice_date` may be a string, a date
/// or a timestamp column. The schema is checked up front, so a file without
/// row groups still has to carry the right columns.
fn load_parquet(file: File) -> Result<Dataset, DataUnavailable> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let columns = resolve_columns(&names)?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let global_row = records.len();
            records.push(batch_row(&batch, &columns, row, global_row)?);
        }
    }

    Ok(Dataset::from_records(records))
}

fn batch_row(
    batch: &RecordBatch,
    columns: &[usize; 9],
    row: usize,
    global_row: usize,
) -> Result<Transaction, DataUnavailable> {
    let cell = move |slot: usize| Cell {
        array: batch.column(columns[slot]),
        column: COLUMNS[slot].0,
        row,
        global_row,
    };

    let raw = TransactionRow {
        gender: cell(0).string()?,
        age: cell(1).float()?,
        category: cell(2).string()?,
        shopping_mall: cell(3).string()?,
        price: cell(4).float()?,
        quantity: cell(5).count()?,
        total_price: cell(6).float()?,
        invoice_date: cell(7).date()?,
        payment_method: cell(8).string()?,
    };
    Ok(raw.into())
}

// -- Parquet / Arrow helpers --

/// One cell of an Arrow column, with enough context to report failures.
struct Cell<'a> {
    array: &'a ArrayRef,
    column: &'static str,
    row: usize,
    global_row: usize,
}

impl Cell<'_> {
    fn invalid(&self, reason: impl Into<String>) -> DataUnavailable {
        DataUnavailable::InvalidValue {
            row: self.global_row,
            column: self.column,
            reason: reason.into(),
        }
    }

    fn check_null(&self) -> Result<(), DataUnavailable> {
        if self.array.is_null(self.row) {
            return Err(self.invalid("null value"));
        }
        Ok(())
    }

    fn downcast<T: 'static>(&self) -> Option<&T> {
        self.array.as_any().downcast_ref::<T>()
    }

    fn string(&self) -> Result<String, DataUnavailable> {
        self.check_null()?;
        let value = match self.array.data_type() {
            DataType::Utf8 => self
                .downcast::<StringArray>()
                .map(|a| a.value(self.row).trim().to_string()),
            DataType::LargeUtf8 => self
                .downcast::<LargeStringArray>()
                .map(|a| a.value(self.row).trim().to_string()),
            _ => None,
        };
        value.ok_or_else(|| self.invalid(format!("expected text, got {:?}", self.array.data_type())))
    }

    fn float(&self) -> Result<f64, DataUnavailable> {
        self.check_null()?;
        let value = match self.array.data_type() {
            DataType::Float64 => self.downcast::<Float64Array>().map(|a| a.value(self.row)),
            DataType::Float32 => self
                .downcast::<Float32Array>()
                .map(|a| a.value(self.row) as f64),
            DataType::Int64 => self
                .downcast::<Int64Array>()
                .map(|a| a.value(self.row) as f64),
            DataType::Int32 => self
                .downcast::<Int32Array>()
                .map(|a| a.value(self.row) as f64),
            _ => None,
        };
        value.ok_or_else(|| {
            self.invalid(format!("expected a number, got {:?}", self.array.data_type()))
        })
    }

    /// Non-negative integer. Whole floats are accepted since Pandas widens
    /// integer columns that once held a NaN.
    fn count(&self) -> Result<u32, DataUnavailable> {
        let value = self.float()?;
        if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
            return Err(self.invalid(format!("expected a non-negative integer, got {value}")));
        }
        Ok(value as u32)
    }

    fn date(&self) -> Result<NaiveDate, DataUnavailable> {
        self.check_null()?;
        let parsed = match self.array.data_type() {
            DataType::Date32 => self
                .downcast::<Date32Array>()
                .and_then(|a| a.value_as_date(self.row)),
            DataType::Date64 => self
                .downcast::<Date64Array>()
                .and_then(|a| a.value_as_date(self.row)),
            DataType::Timestamp(unit, _) => self.timestamp_date(unit),
            DataType::Utf8 | DataType::LargeUtf8 => parse_invoice_date(&self.string()?),
            other => return Err(self.invalid(format!("expected a date, got {other:?}"))),
        };
        parsed.ok_or_else(|| self.invalid("unrecognised invoice date"))
    }

    /// Calendar date of a timestamp cell, as Pandas writes `datetime64` columns.
    fn timestamp_date(&self, unit: &TimeUnit) -> Option<NaiveDate> {
        let datetime = match unit {
            TimeUnit::Second => self
                .downcast::<TimestampSecondArray>()?
                .value_as_datetime(self.row),
            TimeUnit::Millisecond => self
                .downcast::<TimestampMillisecondArray>()?
                .value_as_datetime(self.row),
            TimeUnit::Microsecond => self
                .downcast::<TimestampMicrosecondArray>()?
                .value_as_datetime(self.row),
            TimeUnit::Nanosecond => self
                .downcast::<TimestampNanosecondArray>()?
                .value_as_datetime(self.row),
        };
        datetime.map(|dt| dt.date())
    }
}
