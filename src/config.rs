//! Configuration for the dashboard.
//!
//! Built-in defaults, optionally overridden by a JSON file and then by
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;

/// Config file read when `HARVEST_LENS_CONFIG` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "harvest-lens.json";

pub const ENV_CONFIG: &str = "HARVEST_LENS_CONFIG";
pub const ENV_SCALER: &str = "HARVEST_LENS_SCALER";
pub const ENV_CLASSIFIER: &str = "HARVEST_LENS_CLASSIFIER";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub artifacts: ArtifactPaths,
    pub window: WindowConfig,
}

/// Fixed locations of the pre-fitted artifacts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    pub scaler: PathBuf,
    pub classifier: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            scaler: PathBuf::from("artifacts/scaler.json"),
            classifier: PathBuf::from("artifacts/best_svm.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 860.0,
        }
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load using `env` to look up variables.
    pub fn load_with(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match env(ENV_CONFIG) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        if let Some(scaler) = env(ENV_SCALER) {
            config.artifacts.scaler = PathBuf::from(scaler);
        }
        if let Some(classifier) = env(ENV_CLASSIFIER) {
            config.artifacts.classifier = PathBuf::from(classifier);
        }

        debug!("Effective configuration: {config:?}");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"artifacts": {"scaler": "models/s.json"}}"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.artifacts.scaler, PathBuf::from("models/s.json"));
        assert_eq!(
            config.artifacts.classifier,
            ArtifactPaths::default().classifier
        );
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"artifacts": {"classifier": "a.json"}}"#).unwrap();

        let env: HashMap<&str, String> = HashMap::from([
            (ENV_CONFIG, path.display().to_string()),
            (ENV_CLASSIFIER, "b.json".to_string()),
        ]);
        let config = AppConfig::load_with(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.artifacts.classifier, PathBuf::from("b.json"));
    }

    #[test]
    fn explicit_missing_config_file_is_an_error() {
        let result = AppConfig::load_with(|k| {
            (k == ENV_CONFIG).then(|| "/nonexistent/harvest-lens.json".to_string())
        });
        assert!(result.is_err());
    }
}
