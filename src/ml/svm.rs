use serde::{Deserialize, Serialize};

use super::{check_width, Classifier, FeatureMatrix};
use crate::data::model::CategoryLabel;
use crate::error::PredictionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {
    Linear,
    Rbf,
    Poly,
    Sigmoid,
}

/// Fitted support-vector classifier in scikit-learn's `SVC` layout.
///
/// Support vectors are grouped by class (`n_support[c]` consecutive rows per
/// class). `dual_coef` has `n_classes - 1` rows and one column per support
/// vector; `intercept` holds one entry per class pair `(i, j)`, `i < j`, in
/// lexicographic order.
///
/// For binary models scikit-learn exports `dual_coef_` and `intercept_` with
/// the opposite sign of libsvm's internal values, so a positive decision picks
/// the second class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportVectorClassifier {
    pub classes: Vec<String>,
    pub kernel: Kernel,
    #[serde(default)]
    pub gamma: f64,
    #[serde(default)]
    pub coef0: f64,
    #[serde(default = "default_degree")]
    pub degree: u32,
    pub support_vectors: Vec<Vec<f64>>,
    pub n_support: Vec<usize>,
    pub dual_coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

fn default_degree() -> u32 {
    3
}

impl SupportVectorClassifier {
    /// Check array shapes and map every class onto a production level.
    pub fn validate(&self) -> Result<Vec<CategoryLabel>, String> {
        let n_classes = self.classes.len();
        if n_classes < 2 {
            return Err(format!("need at least 2 classes, got {n_classes}"));
        }
        let labels = self
            .classes
            .iter()
            .map(|c| c.parse::<CategoryLabel>())
            .collect::<Result<Vec<_>, _>>()?;

        let n_sv = self.support_vectors.len();
        if self.n_support.len() != n_classes {
            return Err(format!(
                "`n_support` has {} entries for {n_classes} classes",
                self.n_support.len()
            ));
        }
        if self.n_support.iter().sum::<usize>() != n_sv {
            return Err(format!(
                "`n_support` sums to {} but there are {n_sv} support vectors",
                self.n_support.iter().sum::<usize>()
            ));
        }
        let width = self.support_vectors.first().map(Vec::len).unwrap_or(0);
        if width == 0 || self.support_vectors.iter().any(|sv| sv.len() != width) {
            return Err("support vectors must be non-empty and equally sized".to_string());
        }
        if self.dual_coef.len() != n_classes - 1 || self.dual_coef.iter().any(|r| r.len() != n_sv) {
            return Err(format!(
                "`dual_coef` must be {} x {n_sv}",
                n_classes - 1
            ));
        }
        let n_pairs = n_classes * (n_classes - 1) / 2;
        if self.intercept.len() != n_pairs {
            return Err(format!(
                "`intercept` has {} entries, expected {n_pairs}",
                self.intercept.len()
            ));
        }
        if self.kernel != Kernel::Linear && self.gamma <= 0.0 {
            return Err(format!("{:?} kernel needs a positive `gamma`", self.kernel));
        }
        Ok(labels)
    }

    fn kernel(&self, a: &[f64], b: &[f64]) -> f64 {
        let dot = || a.iter().zip(b).map(|(x, y)| x * y).sum::<f64>();
        match self.kernel {
            Kernel::Linear => dot(),
            Kernel::Rbf => {
                let sq: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
                (-self.gamma * sq).exp()
            }
            Kernel::Poly => (self.gamma * dot() + self.coef0).powi(self.degree as i32),
            Kernel::Sigmoid => (self.gamma * dot() + self.coef0).tanh(),
        }
    }

    /// Index of the winning class for one row (one-vs-one voting).
    pub fn predict_index(&self, x: &[f64]) -> usize {
        let n_classes = self.classes.len();
        let k: Vec<f64> = self.support_vectors.iter().map(|sv| self.kernel(sv, x)).collect();

        let mut start = Vec::with_capacity(n_classes);
        let mut offset = 0;
        for &n in &self.n_support {
            start.push(offset);
            offset += n;
        }

        let mut votes = vec![0usize; n_classes];
        let mut pair = 0;
        for i in 0..n_classes {
            for j in (i + 1)..n_classes {
                let si = start[i]..start[i] + self.n_support[i];
                let sj = start[j]..start[j] + self.n_support[j];
                let sum_i: f64 = si.map(|s| self.dual_coef[j - 1][s] * k[s]).sum();
                let sum_j: f64 = sj.map(|s| self.dual_coef[i][s] * k[s]).sum();
                let mut decision = sum_i + sum_j + self.intercept[pair];
                if n_classes == 2 {
                    decision = -decision;
                }
                if decision > 0.0 {
                    votes[i] += 1;
                } else {
                    votes[j] += 1;
                }
                pair += 1;
            }
        }

        // First maximum wins.
        let mut best = 0;
        for (c, &v) in votes.iter().enumerate() {
            if v > votes[best] {
                best = c;
            }
        }
        best
    }
}

/// A validated classifier with its classes resolved to labels.
#[derive(Debug, Clone)]
pub struct LabeledSvc {
    model: SupportVectorClassifier,
    labels: Vec<CategoryLabel>,
}

impl LabeledSvc {
    pub fn new(model: SupportVectorClassifier) -> Result<Self, String> {
        let labels = model.validate()?;
        Ok(Self { model, labels })
    }
}

impl Classifier for LabeledSvc {
    fn n_features(&self) -> usize {
        self.model.support_vectors.first().map(Vec::len).unwrap_or(0)
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<CategoryLabel>, PredictionError> {
        check_width(self.n_features(), features)?;
        Ok(features
            .rows()
            .map(|row| self.labels[self.model.predict_index(row)])
            .collect())
    }
}
