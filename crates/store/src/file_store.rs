//! JSON file backend for [`RunStore`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};

use tile_swap_core::{RunStore, SavedRun};

use crate::record::PersistedRun;

/// Saves the run as one pretty-printed JSON document.
///
/// Writes go to a sibling `.tmp` file first and are renamed into place, so a
/// crash mid-write leaves the previous save intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the save file. Missing files are fine.
    pub fn clear(&mut self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow!("failed to remove {}: {}", self.path.display(), e)),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RunStore for JsonFileStore {
    type Error = anyhow::Error;

    fn load(&mut self) -> anyhow::Result<Option<SavedRun>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(anyhow!("failed to read {}: {}", self.path.display(), e));
            }
        };
        if text.trim().is_empty() {
            return Ok(None);
        }

        let persisted: PersistedRun = serde_json::from_str(&text)
            .with_context(|| format!("malformed save file {}", self.path.display()))?;
        let saved = SavedRun::try_from(persisted)
            .with_context(|| format!("unusable save file {}", self.path.display()))?;
        Ok(Some(saved))
    }

    fn save(&mut self, run: &SavedRun) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        let json = serde_json::to_vec_pretty(&PersistedRun::from(run))?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        log::debug!("saved run to {}", self.path.display());
        Ok(())
    }
}
