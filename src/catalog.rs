//! Motion catalog
//!
//! A named, ordered list of [`MotionEntry`] records, each pairing display
//! metadata with an optional [`AnimationSource`]. The preview shows one entry
//! at a time through [`PreviewSession::show_entry`](crate::preview::PreviewSession::show_entry).
//!
//! Editing follows a snapshot-then-save flow: [`MotionCatalog::snapshot`]
//! hands out an independent copy to edit, and [`MotionCatalog::save_from`]
//! replaces the stored entries with the edited ones.

use std::path::PathBuf;

use uuid::Uuid;

use crate::animation::AnimationSource;

pub const DEFAULT_ENTRY_NAME: &str = "Motion Name";
pub const DEFAULT_ENTRY_DESCRIPTION: &str = "Motion Description";

/// One previewable motion with its display metadata.
#[derive(Debug, Clone)]
pub struct MotionEntry {
    pub id: Uuid,
    pub display_name: String,
    pub description: String,
    pub thumbnail: Option<PathBuf>,
    animation_source: Option<AnimationSource>,
    revision: u64,
}

impl MotionEntry {
    #[must_use]
    pub fn new(display_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            description: description.into(),
            thumbnail: None,
            animation_source: None,
            revision: 0,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: AnimationSource) -> Self {
        self.set_animation_source(Some(source));
        self
    }

    #[must_use]
    pub fn with_thumbnail(mut self, path: impl Into<PathBuf>) -> Self {
        self.thumbnail = Some(path.into());
        self
    }

    #[must_use]
    pub fn animation_source(&self) -> Option<&AnimationSource> {
        self.animation_source.as_ref()
    }

    /// Replaces the animation and bumps [`revision`](Self::revision), so a
    /// preview showing this entry can tell it went stale.
    pub fn set_animation_source(&mut self, source: Option<AnimationSource>) {
        self.animation_source = source;
        self.revision += 1;
    }

    /// Counts animation changes since the entry was created.
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for MotionEntry {
    fn default() -> Self {
        Self::new(DEFAULT_ENTRY_NAME, DEFAULT_ENTRY_DESCRIPTION)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MotionCatalog {
    pub name: String,
    entries: Vec<MotionEntry>,
}

impl MotionCatalog {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn list(&self) -> &[MotionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry with placeholder name and description.
    pub fn add(&mut self) -> &mut MotionEntry {
        self.add_entry(MotionEntry::default())
    }

    pub fn add_entry(&mut self, entry: MotionEntry) -> &mut MotionEntry {
        let index = self.entries.len();
        self.entries.push(entry);
        &mut self.entries[index]
    }

    /// Removes the entry with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: Uuid) -> Option<MotionEntry> {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            log::warn!("Motion entry {id} is not in catalog '{}'", self.name);
            return None;
        };
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn find(&self, id: Uuid) -> Option<&MotionEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn find_mut(&mut self, id: Uuid) -> Option<&mut MotionEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// An independent copy for editing.
    #[must_use]
    pub fn snapshot(&self) -> MotionCatalog {
        self.clone()
    }

    /// Replaces every entry with the entries of `edited`.
    pub fn save_from(&mut self, edited: &MotionCatalog) {
        self.entries.clear();
        self.entries.extend(edited.entries.iter().cloned());
        log::debug!("Catalog '{}' saved with {} entries", self.name, self.entries.len());
    }
}
