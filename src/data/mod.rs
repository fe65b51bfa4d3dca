//! Data layer: core types, loading, schema normalisation and aggregation.
//!
//! Architecture:
//! ```text
//!  .xlsx / .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse file → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  schema  │  rename aliases, check required columns → NormalizedTable
//!   └──────────┘
//!        │   (pipeline: scale + classify → LabeledTable)
//!        ▼
//!   ┌──────────┐
//!   │ summary  │  category counts, sorted projections
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod schema;
pub mod summary;
