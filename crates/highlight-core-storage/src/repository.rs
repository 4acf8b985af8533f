//! Repositories for highlight levels and per-document spans.

use crate::adapter::StorageAdapter;
use crate::error::StorageError;
use highlight_core::{HighlightLevels, HighlightStore, LevelId, LevelUpdate, SpanRecord};

/// Storage key of the highlight level configuration.
pub const LEVELS_KEY: &str = "cardcutter_highlight_levels";

/// Key prefix of per-document span lists.
pub const HIGHLIGHTS_PREFIX: &str = "cardcutter_highlights";

/// Loads and saves the highlight level configuration.
#[derive(Debug)]
pub struct LevelRepository<A> {
    adapter: A,
}

impl<A: StorageAdapter> LevelRepository<A> {
    /// Create a repository backed by `adapter`.
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    /// Load the stored levels.
    ///
    /// Falls back to [`HighlightLevels::defaults`] when nothing is stored or the
    /// stored value cannot be decoded. Adapter failures are returned as errors.
    pub fn load(&self) -> Result<HighlightLevels, StorageError> {
        let Some(stored) = self.adapter.get_item(LEVELS_KEY)? else {
            return Ok(HighlightLevels::defaults());
        };
        match serde_json::from_str(&stored) {
            Ok(levels) => Ok(levels),
            Err(err) => {
                log::warn!("failed to decode highlight levels, using defaults: {err}");
                Ok(HighlightLevels::defaults())
            }
        }
    }

    /// Persist `levels`.
    pub fn save(&mut self, levels: &HighlightLevels) -> Result<(), StorageError> {
        let json = serde_json::to_string(levels)?;
        self.adapter.set_item(LEVELS_KEY, &json)
    }

    /// Consume the repository, returning the adapter.
    pub fn into_inner(self) -> A {
        self.adapter
    }
}

/// Level configuration that saves itself after every change.
#[derive(Debug)]
pub struct LevelConfig<A> {
    levels: HighlightLevels,
    repository: LevelRepository<A>,
}

impl<A: StorageAdapter> LevelConfig<A> {
    /// Load the configuration through `adapter`.
    pub fn load(adapter: A) -> Result<Self, StorageError> {
        let repository = LevelRepository::new(adapter);
        let levels = repository.load()?;
        Ok(Self { levels, repository })
    }

    /// The current levels.
    pub fn levels(&self) -> &HighlightLevels {
        &self.levels
    }

    /// Apply a partial update and save. Returns `false` (without saving) if `id` is unknown.
    pub fn update_level(&mut self, id: LevelId, update: LevelUpdate) -> Result<bool, StorageError> {
        if !self.levels.update(id, update) {
            return Ok(false);
        }
        self.repository.save(&self.levels)?;
        Ok(true)
    }

    /// Add a plain level and save. Returns `None` (without saving) if no id is left.
    pub fn add_level(&mut self) -> Result<Option<LevelId>, StorageError> {
        let Some(id) = self.levels.add_level() else {
            return Ok(None);
        };
        self.repository.save(&self.levels)?;
        Ok(Some(id))
    }

    /// Remove a level and save.
    ///
    /// Spans that still reference `id` are left alone; callers that want them gone
    /// should also call [`HighlightStore::remove_level`].
    pub fn remove_level(&mut self, id: LevelId) -> Result<bool, StorageError> {
        let removed = self.levels.remove_level(id).is_some();
        if removed {
            self.repository.save(&self.levels)?;
        }
        Ok(removed)
    }

    /// Restore the built-in levels and save.
    pub fn reset_to_defaults(&mut self) -> Result<(), StorageError> {
        self.levels.reset_to_defaults();
        self.repository.save(&self.levels)
    }
}

/// Loads and saves the span list of each document.
#[derive(Debug)]
pub struct SpanRepository<A> {
    adapter: A,
}

impl<A: StorageAdapter> SpanRepository<A> {
    /// Create a repository backed by `adapter`.
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    fn key(document: &str) -> String {
        format!("{HIGHLIGHTS_PREFIX}/{document}")
    }

    /// Load the spans of `document`. A document with no stored spans loads empty.
    ///
    /// Unlike level configuration, corrupt span data is an error: there is no
    /// meaningful default for user highlights.
    pub fn load(&self, document: &str) -> Result<HighlightStore, StorageError> {
        let Some(stored) = self.adapter.get_item(&Self::key(document))? else {
            return Ok(HighlightStore::new());
        };
        let records: Vec<SpanRecord> = serde_json::from_str(&stored)?;
        let store = HighlightStore::from_records(records)?;
        log::debug!("loaded {} highlights for {document}", store.len());
        Ok(store)
    }

    /// Save the spans of `document` as a flat ordered record list.
    pub fn save(&mut self, document: &str, store: &HighlightStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(&store.to_records())?;
        self.adapter.set_item(&Self::key(document), &json)
    }

    /// Forget the spans of `document`.
    pub fn remove(&mut self, document: &str) -> Result<(), StorageError> {
        self.adapter.remove_item(&Self::key(document))
    }

    /// Consume the repository, returning the adapter.
    pub fn into_inner(self) -> A {
        self.adapter
    }
}
