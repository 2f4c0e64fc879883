// storage holds the export record and the flat JSON data file

pub mod models;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::models::{ArtifactResponse, LandscapeRecord};

pub const DEFAULT_DATA_PATH: &str = "data/loss_data.json";

#[derive(Error, Debug)]
pub enum StorageError {
    // No data file yet
    #[error("Data file not found. Please run the export tool to generate it.")]
    Missing(PathBuf),
    // File exists but is not a landscape record
    #[error("Invalid JSON data in data file.")]
    Malformed(#[source] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("could not encode record: {0}")]
    Encode(#[source] serde_json::Error),
    // JSON has no encoding for NaN or ±inf, they would come back as null
    #[error("record holds a non-finite value in `{0}`")]
    NonFinite(&'static str),
}

// A single JSON artifact on disk
pub struct LandscapeStore {
    path: PathBuf,
}

impl LandscapeStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Write the record, creating parent directories as needed
    pub fn save(&self, record: &LandscapeRecord) -> Result<(), StorageError> {
        if let Some(field) = record.non_finite_field() {
            return Err(StorageError::NonFinite(field));
        }
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let bytes = serde_json::to_vec(record).map_err(StorageError::Encode)?;
        fs::write(&self.path, bytes)?;
        info!("saved {0}x{0} landscape to {1}", record.size(), self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<LandscapeRecord, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::Missing(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes).map_err(StorageError::Malformed)
    }

    // Never fails: load problems become `{"error": ...}`
    pub fn load_response(&self) -> ArtifactResponse {
        match self.load() {
            Ok(record) => ArtifactResponse::Data(Box::new(record)),
            Err(e) => {
                warn!("serving error record for {}: {e}", self.path.display());
                ArtifactResponse::Error {
                    error: e.to_string(),
                }
            }
        }
    }
}
