//! Screenshot folder preference
//!
//! The folder is never read from process-wide state: callers resolve it
//! through a [`SavePathProvider`] and pass it to the writer explicitly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PreviewError, Result};

/// Source of the directory screenshots are saved into.
pub trait SavePathProvider {
    /// The current folder. May be empty when nothing has been chosen.
    fn get(&self) -> PathBuf;

    /// Lets the operator pick a folder. `None` when the choice was cancelled.
    fn browse(&mut self) -> Option<PathBuf>;
}

/// Returns the stored folder, asking the provider to browse when it is empty.
pub fn resolve_save_dir(provider: &mut dyn SavePathProvider) -> Result<PathBuf> {
    let current = provider.get();
    if !current.as_os_str().is_empty() {
        return Ok(current);
    }
    provider
        .browse()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(PreviewError::NoSaveDirectory)
}

/// A provider that always answers with the same folder.
#[derive(Debug, Clone, Default)]
pub struct FixedSavePath(pub PathBuf);

impl SavePathProvider for FixedSavePath {
    fn get(&self) -> PathBuf {
        self.0.clone()
    }

    fn browse(&mut self) -> Option<PathBuf> {
        None
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SavePathPrefs {
    save_path: PathBuf,
}

type FolderChooser = Box<dyn FnMut(&Path) -> Option<PathBuf>>;

/// Folder preference persisted as JSON, falling back to a default folder.
pub struct StoredSavePath {
    prefs_file: PathBuf,
    default_dir: PathBuf,
    chooser: Option<FolderChooser>,
}

impl StoredSavePath {
    #[must_use]
    pub fn new(prefs_file: impl Into<PathBuf>, default_dir: impl Into<PathBuf>) -> Self {
        Self {
            prefs_file: prefs_file.into(),
            default_dir: default_dir.into(),
            chooser: None,
        }
    }

    /// Installs the interactive folder picker used by [`browse`](SavePathProvider::browse).
    /// It receives the current folder as the starting location.
    #[must_use]
    pub fn with_chooser(mut self, chooser: impl FnMut(&Path) -> Option<PathBuf> + 'static) -> Self {
        self.chooser = Some(Box::new(chooser));
        self
    }

    /// Stores `path` as the new preference.
    pub fn set(&self, path: &Path) -> Result<()> {
        if let Some(parent) = self.prefs_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let prefs = SavePathPrefs {
            save_path: path.to_path_buf(),
        };
        std::fs::write(&self.prefs_file, serde_json::to_string_pretty(&prefs)?)?;
        Ok(())
    }

    fn load(&self) -> Option<PathBuf> {
        let text = std::fs::read_to_string(&self.prefs_file).ok()?;
        match serde_json::from_str::<SavePathPrefs>(&text) {
            Ok(prefs) => Some(prefs.save_path),
            Err(err) => {
                log::warn!(
                    "Ignoring unreadable save path preference {}: {err}",
                    self.prefs_file.display()
                );
                None
            }
        }
    }
}

impl SavePathProvider for StoredSavePath {
    fn get(&self) -> PathBuf {
        self.load().unwrap_or_else(|| self.default_dir.clone())
    }

    fn browse(&mut self) -> Option<PathBuf> {
        let current = self.get();
        let chooser = self.chooser.as_mut()?;
        let chosen = chooser(&current)?;
        if chosen.as_os_str().is_empty() {
            return None;
        }
        if let Err(err) = self.set(&chosen) {
            log::error!("Failed to store save folder: {err}");
            return Some(current);
        }
        Some(chosen)
    }
}
