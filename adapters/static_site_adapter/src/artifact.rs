use log::{info, warn};
use rank_core::domain::{RankRecord, SourceError};
use rank_core::ports::{ArtifactReader, ArtifactWriter, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The JSON artifact on disk, usually `assets/data/leetcode.json` under the site root
pub struct JsonArtifactStore {
    path: PathBuf,
}

impl JsonArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArtifactWriter for JsonArtifactStore {
    fn write(&self, record: &RankRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // The write below replaces the file anyway
        if self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                warn!("Could not remove previous {}: {}", self.path.display(), e);
            }
        }

        let mut json = serde_json::to_string_pretty(record)?;
        json.push('\n');
        fs::write(&self.path, json)?;

        info!("Wrote {}", self.path.display());
        Ok(())
    }
}

impl ArtifactReader for JsonArtifactStore {
    fn read(&self) -> std::result::Result<RankRecord, SourceError> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| SourceError::Transport(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| SourceError::Malformed(format!("{}: {}", self.path.display(), e)))
    }
}
