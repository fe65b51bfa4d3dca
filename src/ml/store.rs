use std::fmt;
use std::path::Path;

use log::info;
use serde::de::DeserializeOwned;

use super::scaler::ScalerArtifact;
use super::svm::{LabeledSvc, SupportVectorClassifier};
use super::{Classifier, Scaler};
use crate::config::ArtifactPaths;
use crate::data::schema::REQUIRED_FEATURES;
use crate::error::ArtifactError;

/// The pre-fitted scaler and classifier, loaded once at startup and only
/// read afterwards.
pub struct ArtifactStore {
    scaler: Box<dyn Scaler>,
    classifier: Box<dyn Classifier>,
}

impl fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("n_features", &self.scaler.n_features())
            .finish_non_exhaustive()
    }
}

impl ArtifactStore {
    /// Load both artifacts. Any failure here means the dashboard cannot
    /// serve predictions at all.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let scaler = read_json::<ScalerArtifact>(&paths.scaler)?
            .into_scaler()
            .map_err(|reason| ArtifactError::Invalid {
                artifact: "scaler",
                reason,
            })?;
        info!("Loaded scaler from {}", paths.scaler.display());

        let svc = read_json::<SupportVectorClassifier>(&paths.classifier)?;
        let n_sv = svc.support_vectors.len();
        let classifier = LabeledSvc::new(svc).map_err(|reason| ArtifactError::Invalid {
            artifact: "classifier",
            reason,
        })?;
        info!(
            "Loaded classifier from {} ({n_sv} support vectors)",
            paths.classifier.display()
        );

        Self::from_parts(scaler, Box::new(classifier))
    }

    /// Assemble a store from already-fitted parts, checking that both agree on
    /// the pipeline's feature layout.
    pub fn from_parts(
        scaler: Box<dyn Scaler>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self, ArtifactError> {
        let expected = REQUIRED_FEATURES.len();
        if scaler.n_features() != expected {
            return Err(ArtifactError::Invalid {
                artifact: "scaler",
                reason: format!(
                    "fitted on {} features, expected {expected}",
                    scaler.n_features()
                ),
            });
        }
        if classifier.n_features() != expected {
            return Err(ArtifactError::Invalid {
                artifact: "classifier",
                reason: format!(
                    "fitted on {} features, expected {expected}",
                    classifier.n_features()
                ),
            });
        }
        Ok(Self { scaler, classifier })
    }

    pub fn scaler(&self) -> &dyn Scaler {
        self.scaler.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let text = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::fixtures;
    use crate::ml::scaler::StandardScaler;
    use std::path::PathBuf;

    fn write_artifacts(dir: &Path, scaler: &str, classifier: &str) -> ArtifactPaths {
        let paths = ArtifactPaths {
            scaler: dir.join("scaler.json"),
            classifier: dir.join("best_svm.json"),
        };
        std::fs::write(&paths.scaler, scaler).unwrap();
        std::fs::write(&paths.classifier, classifier).unwrap();
        paths
    }

    fn scaler_json() -> String {
        serde_json::to_string(&ScalerArtifact::Standard(fixtures::scaler())).unwrap()
    }

    fn classifier_json() -> String {
        serde_json::to_string(&fixtures::classifier()).unwrap()
    }

    #[test]
    fn loads_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_artifacts(dir.path(), &scaler_json(), &classifier_json());
        let store = ArtifactStore::load(&paths).unwrap();
        assert_eq!(store.scaler().n_features(), 2);
        assert_eq!(store.classifier().n_features(), 2);
    }

    #[test]
    fn missing_file_is_fatal() {
        let paths = ArtifactPaths {
            scaler: PathBuf::from("/nonexistent/scaler.json"),
            classifier: PathBuf::from("/nonexistent/best_svm.json"),
        };
        assert!(matches!(
            ArtifactStore::load(&paths),
            Err(ArtifactError::Io { .. })
        ));
    }

    #[test]
    fn corrupt_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_artifacts(dir.path(), &scaler_json(), "{not json");
        assert!(matches!(
            ArtifactStore::load(&paths),
            Err(ArtifactError::Parse { .. })
        ));
    }

    #[test]
    fn feature_layout_must_match_pipeline() {
        let scaler = StandardScaler {
            mean: vec![0.0; 3],
            scale: vec![1.0; 3],
        };
        let dir = tempfile::tempdir().unwrap();
        let paths = write_artifacts(
            dir.path(),
            &serde_json::to_string(&ScalerArtifact::Standard(scaler)).unwrap(),
            &classifier_json(),
        );
        let err = ArtifactStore::load(&paths).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { artifact: "scaler", .. }));
    }
}
