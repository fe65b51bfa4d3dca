//! Pre-fitted model artifacts and the narrow contracts the pipeline uses.
//!
//! ```text
//!  scaler.json        best_svm.json
//!       │                   │
//!       ▼                   ▼
//!  ┌─────────┐        ┌────────────┐
//!  │ Scaler  │        │ Classifier │   loaded once by ArtifactStore
//!  └─────────┘        └────────────┘
//!       │ transform         │ predict
//!       ▼                   ▼
//!   FeatureMatrix  ──▶  Vec<CategoryLabel>
//! ```

pub mod scaler;
pub mod store;
pub mod svm;

use crate::data::model::CategoryLabel;
use crate::error::PredictionError;

pub use store::ArtifactStore;

// ---------------------------------------------------------------------------
// FeatureMatrix
// ---------------------------------------------------------------------------

/// Dense row-major matrix of `f64` features.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    n_features: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    pub fn with_capacity(n_features: usize, n_rows: usize) -> Self {
        Self {
            n_features,
            data: Vec::with_capacity(n_features * n_rows),
        }
    }

    pub fn from_rows(n_features: usize, rows: &[&[f64]]) -> Self {
        let mut m = Self::with_capacity(n_features, rows.len());
        for row in rows {
            m.push_row(row);
        }
        m
    }

    /// Append one row. Callers guarantee `row.len() == n_features`.
    pub fn push_row(&mut self, row: &[f64]) {
        debug_assert_eq!(row.len(), self.n_features);
        self.data.extend_from_slice(row);
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_rows(&self) -> usize {
        if self.n_features == 0 {
            0
        } else {
            self.data.len() / self.n_features
        }
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n_features..(i + 1) * self.n_features]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // `chunks_exact(0)` panics; a zero-width matrix has no rows.
        self.data.chunks_exact(self.n_features.max(1))
    }

    /// Build a matrix of the same shape by mapping each row.
    pub fn map_rows(&self, mut f: impl FnMut(&[f64], &mut Vec<f64>)) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for row in self.rows() {
            f(row, &mut data);
        }
        Self {
            n_features: self.n_features,
            data,
        }
    }
}

// ---------------------------------------------------------------------------
// Fitted-model contracts
// ---------------------------------------------------------------------------

/// A fitted feature normalisation step.
pub trait Scaler: Send + Sync {
    fn n_features(&self) -> usize;

    fn transform(&self, features: &FeatureMatrix) -> Result<FeatureMatrix, PredictionError>;
}

/// A fitted classifier producing one production level per row.
pub trait Classifier: Send + Sync {
    fn n_features(&self) -> usize;

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<CategoryLabel>, PredictionError>;
}

/// Reject a matrix whose width does not match what the model was fitted on.
pub(crate) fn check_width(expected: usize, features: &FeatureMatrix) -> Result<(), PredictionError> {
    if features.n_features() == expected {
        Ok(())
    } else {
        Err(PredictionError::FeatureCount {
            expected,
            actual: features.n_features(),
        })
    }
}
