/// Data layer: core types, loading, and filter-and-rank.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (age brackets derived)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Transaction>, form choice lists
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Criteria → top-3 indices by total price, or NoMatch
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
