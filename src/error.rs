use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Startup: artifact loading (fatal)
// ---------------------------------------------------------------------------

/// Failure to load the pre-fitted scaler or classifier.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {artifact} artifact: {reason}")]
    Invalid {
        artifact: &'static str,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Per-upload: schema validation (recoverable, user may re-upload)
// ---------------------------------------------------------------------------

/// The uploaded table does not have the columns the pipeline needs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Kolom yang dibutuhkan tidak ditemukan dalam dataset! (missing: {})", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Kolom '{0}' muncul lebih dari sekali dalam dataset!")]
    DuplicateColumn(String),

    #[error("Kolom '{0}' tidak ditemukan dalam dataset!")]
    MissingRegion(String),
}

// ---------------------------------------------------------------------------
// Per-upload: prediction (unrecovered, no imputation)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("row {row}: column '{column}' is empty")]
    MissingValue { row: usize, column: String },

    #[error("row {row}: column '{column}' is not numeric ({value:?})")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("model expects {expected} features per row, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("model returned {actual} labels for {expected} rows")]
    LabelCount { expected: usize, actual: usize },
}

/// Anything that can fail one uploaded batch after it has been read.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("prediction failed: {0}")]
    Prediction(#[from] PredictionError),
}
