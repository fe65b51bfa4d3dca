//! Harvest Lens
//!
//! Loads a pre-fitted scaler and support-vector classifier, labels uploaded
//! district production sheets as Tinggi / Sedang / Rendah, and summarises the
//! result for the dashboard.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod ml;
pub mod pipeline;
pub mod state;
pub mod ui;

pub use config::AppConfig;
pub use data::model::{CategoryLabel, LabeledRecord, Table};
pub use error::{ArtifactError, BatchError, PredictionError, ValidationError};
pub use ml::ArtifactStore;
pub use pipeline::{analyze, Analysis, PredictionPipeline};
