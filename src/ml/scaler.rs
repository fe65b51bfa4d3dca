use serde::{Deserialize, Serialize};

use super::{check_width, FeatureMatrix, Scaler};
use crate::error::PredictionError;

/// On-disk scaler artifact, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

impl ScalerArtifact {
    /// Check the fitted parameters and hand back the runnable scaler.
    pub fn into_scaler(self) -> Result<Box<dyn Scaler>, String> {
        match self {
            ScalerArtifact::Standard(s) => {
                check_params(&s.mean, &s.scale, "mean")?;
                Ok(Box::new(s))
            }
            ScalerArtifact::MinMax(s) => {
                check_params(&s.min, &s.scale, "min")?;
                Ok(Box::new(s))
            }
        }
    }
}

fn check_params(offset: &[f64], scale: &[f64], offset_name: &str) -> Result<(), String> {
    if offset.is_empty() {
        return Err(format!("`{offset_name}` is empty"));
    }
    if offset.len() != scale.len() {
        return Err(format!(
            "`{offset_name}` has {} entries but `scale` has {}",
            offset.len(),
            scale.len()
        ));
    }
    if offset.iter().chain(scale).any(|v| !v.is_finite()) {
        return Err("parameters must be finite".to_string());
    }
    if scale.iter().any(|v| *v == 0.0) {
        return Err("`scale` contains zero".to_string());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// StandardScaler: (x - mean) / scale
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, features: &FeatureMatrix) -> Result<FeatureMatrix, PredictionError> {
        check_width(self.n_features(), features)?;
        Ok(features.map_rows(|row, out| {
            out.extend(
                row.iter()
                    .zip(self.mean.iter().zip(&self.scale))
                    .map(|(x, (m, s))| (x - m) / s),
            )
        }))
    }
}

// ---------------------------------------------------------------------------
// MinMaxScaler: x * scale + min
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub min: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Scaler for MinMaxScaler {
    fn n_features(&self) -> usize {
        self.min.len()
    }

    fn transform(&self, features: &FeatureMatrix) -> Result<FeatureMatrix, PredictionError> {
        check_width(self.n_features(), features)?;
        Ok(features.map_rows(|row, out| {
            out.extend(
                row.iter()
                    .zip(self.min.iter().zip(&self.scale))
                    .map(|(x, (m, s))| x * s + m),
            )
        }))
    }
}
