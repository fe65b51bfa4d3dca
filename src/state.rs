use std::path::Path;

use crate::data::loader::load_file;
use crate::data::model::Table;
use crate::ml::ArtifactStore;
use crate::pipeline::{analyze, Analysis};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Message shown under the top bar after an upload.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Success(String),
    Error(String),
}

/// The labeled result of the most recent successful upload.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub analysis: Analysis,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Pre-fitted artifacts, loaded once before the window opens.
    artifacts: ArtifactStore,

    /// Result of the current upload (None until a file is processed).
    pub upload: Option<Upload>,

    /// Status / error message shown in the UI.
    pub status: Option<Status>,
}

impl AppState {
    pub fn new(artifacts: ArtifactStore) -> Self {
        Self {
            artifacts,
            upload: None,
            status: None,
        }
    }

    /// Read and process an uploaded file, replacing any previous result.
    pub fn ingest_file(&mut self, path: &Path) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match load_file(path) {
            Ok(table) => {
                log::info!(
                    "Read {} rows with columns {:?} from {}",
                    table.len(),
                    table.columns,
                    path.display()
                );
                self.ingest_table(file_name, table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.upload = None;
                self.status = Some(Status::Error(format!("Error: {e:#}")));
            }
        }
    }

    /// Run the prediction pipeline on an already-read table.
    pub fn ingest_table(&mut self, file_name: String, table: Table) {
        match analyze(table, &self.artifacts) {
            Ok(analysis) => {
                self.status = Some(Status::Success(
                    "Prediksi berhasil dilakukan! Berikut hasilnya:".to_string(),
                ));
                self.upload = Some(Upload {
                    file_name,
                    analysis,
                });
            }
            Err(e) => {
                log::error!("Prediction failed for {file_name}: {e}");
                self.upload = None;
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CategoryLabel;
    use crate::ml::fixtures;
    use std::io::Write;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn upload_produces_labeled_result() {
        let mut state = AppState::new(fixtures::store());
        let file = csv_file("Kecamatan,Total produksi,Produksi per satuan luas\nA,100,5\nB,50,2\n");
        state.ingest_file(file.path());

        assert!(matches!(state.status, Some(Status::Success(_))));
        let upload = state.upload.as_ref().unwrap();
        assert_eq!(upload.analysis.records.len(), 2);
        assert_eq!(upload.analysis.summary.counts.get(CategoryLabel::Tinggi), 1);
    }

    #[test]
    fn failed_upload_clears_previous_result() {
        let mut state = AppState::new(fixtures::store());
        let good = csv_file("Kecamatan,Total Produksi,Produksi per Satuan Luas\nA,100,5\n");
        state.ingest_file(good.path());
        assert!(state.upload.is_some());

        let bad = csv_file("Kecamatan,Total produksi\nA,100\n");
        state.ingest_file(bad.path());
        assert!(state.upload.is_none());
        match &state.status {
            Some(Status::Error(msg)) => {
                assert!(msg.contains("Kolom yang dibutuhkan tidak ditemukan"))
            }
            other => panic!("expected error status, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_file_reports_error() {
        let mut state = AppState::new(fixtures::store());
        state.ingest_file(Path::new("/nonexistent/data.xlsx"));
        assert!(matches!(state.status, Some(Status::Error(_))));
        assert!(state.upload.is_none());
    }
}
