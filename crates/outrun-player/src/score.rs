//! Best-lap persistence via a small JSON file
//!
//! Layout on disk:
//!
//! ```json
//! { "fast_lap_time": 45.3 }
//! ```
//!
//! Loaded once at startup and rewritten whenever a lap beats the record.

use std::path::{Path, PathBuf};

use outrun_core::LapRecordStore;
use serde::{Deserialize, Serialize};

const SCORE_FILE: &str = "score.json";

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Score JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast_lap_time: Option<f32>,
}

#[derive(Debug)]
pub struct ScoreStore {
    path: PathBuf,
    pub scores: ScoreFile,
}

impl ScoreStore {
    /// Open the score file in `dir`, starting fresh when it is absent or unreadable.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(SCORE_FILE);

        let scores = if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str::<ScoreFile>(&json) {
                    Ok(scores) => {
                        tracing::info!("Loaded best lap {:?} from {}", scores.fast_lap_time, path.display());
                        scores
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse score file: {}", e);
                        ScoreFile::default()
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read score file: {}", e);
                    ScoreFile::default()
                }
            }
        } else {
            tracing::info!("No score file found, starting fresh");
            ScoreFile::default()
        };

        Self { path, scores }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current scores to disk
    pub fn save(&self) -> Result<(), ScoreError> {
        let json = serde_json::to_string_pretty(&self.scores)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ScoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, json).map_err(|source| ScoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!("Saved scores to {}", self.path.display());
        Ok(())
    }
}

impl LapRecordStore for ScoreStore {
    fn load(&self) -> Option<f32> {
        self.scores.fast_lap_time
    }

    fn store(&mut self, seconds: f32) {
        self.scores.fast_lap_time = Some(seconds);
        if let Err(e) = self.save() {
            tracing::error!("Failed to save best lap: {}", e);
        }
    }
}
