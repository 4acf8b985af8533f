//! A text buffer paired with its highlight store.
//!
//! [`HighlightedText`] is the minimal editing surface: every edit it performs is
//! turned into an [`EditDelta`], applied to the store, and followed by a snapshot
//! refresh, so spans and text can never drift apart.

use crate::delta::EditDelta;
use crate::error::HighlightError;
use crate::runs::{self, LevelPrecedence, TextRun};
use crate::span::{LevelId, SpanId, SpanRange};
use crate::store::HighlightStore;
use crate::transform::TransformOutcome;
use ropey::Rope;
use std::ops::Range;

/// A buffer and the spans highlighting it.
#[derive(Debug, Clone)]
pub struct HighlightedText {
    text: Rope,
    store: HighlightStore,
}

impl HighlightedText {
    /// Create an unhighlighted document.
    pub fn new(text: &str) -> Self {
        Self {
            text: Rope::from_str(text),
            store: HighlightStore::new(),
        }
    }

    /// Pair `text` with an existing store (e.g. loaded from persisted state).
    ///
    /// Span bounds are checked against the buffer length.
    pub fn with_store(text: &str, mut store: HighlightStore) -> Result<Self, HighlightError> {
        let text = Rope::from_str(text);
        let len = text.len_chars();
        if let Some(span) = store.all().iter().find(|s| s.end() > len) {
            return Err(HighlightError::OutOfBounds {
                offset: span.end(),
                len,
            });
        }
        store.refresh_text(&text);
        Ok(Self { text, store })
    }

    /// The current text.
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// The underlying rope.
    pub fn rope(&self) -> &Rope {
        &self.text
    }

    /// Buffer length in characters.
    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    /// The highlight store.
    pub fn store(&self) -> &HighlightStore {
        &self.store
    }

    /// Mutable access to the store, for operations that do not move text.
    pub fn store_mut(&mut self) -> &mut HighlightStore {
        &mut self.store
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), HighlightError> {
        let len = self.len_chars();
        if range.start > range.end || range.end > len {
            return Err(HighlightError::OutOfBounds {
                offset: range.end.max(range.start),
                len,
            });
        }
        Ok(())
    }

    /// Highlight `range` with `level`. The snapshot is taken from the buffer.
    pub fn highlight(
        &mut self,
        range: Range<usize>,
        level: LevelId,
    ) -> Result<SpanId, HighlightError> {
        let span_range = SpanRange::try_from(range.clone())?;
        self.check_range(&range)?;
        let snapshot = self.text.slice(range).to_string();
        self.store.highlight(span_range, level, snapshot)
    }

    /// Insert `text` at character `offset`.
    pub fn insert(
        &mut self,
        offset: usize,
        text: &str,
    ) -> Result<TransformOutcome, HighlightError> {
        self.replace(offset..offset, text)
    }

    /// Delete the characters in `range`.
    pub fn delete(&mut self, range: Range<usize>) -> Result<TransformOutcome, HighlightError> {
        self.replace(range, "")
    }

    /// Replace the characters in `range` with `text`.
    pub fn replace(
        &mut self,
        range: Range<usize>,
        text: &str,
    ) -> Result<TransformOutcome, HighlightError> {
        self.check_range(&range)?;
        let delta = EditDelta::replace(range.start, range.len(), text.chars().count());

        if delta.delete_count > 0 {
            self.text.remove(range.clone());
        }
        if delta.insert_count > 0 {
            self.text.insert(range.start, text);
        }

        let outcome = self.store.apply_delta(&delta);
        self.store.refresh_text(&self.text);
        Ok(outcome)
    }

    /// Replace the buffer with `new_text` as a single edit.
    ///
    /// The edit region is derived with [`EditDelta::diff`], so highlights outside the
    /// changed region survive.
    pub fn sync_text(&mut self, new_text: &str) -> TransformOutcome {
        let delta = EditDelta::diff(&self.text.to_string(), new_text);
        self.text = Rope::from_str(new_text);
        let outcome = self.store.apply_delta(&delta);
        self.store.refresh_text(&self.text);
        outcome
    }

    /// Replace the buffer wholesale and drop every highlight.
    pub fn set_text(&mut self, text: &str) {
        self.text = Rope::from_str(text);
        self.store.clear();
    }

    /// Render runs for the current text.
    pub fn runs(&self, precedence: LevelPrecedence) -> Vec<TextRun> {
        runs::styled_runs(&self.text.to_string(), self.store.all(), precedence)
    }
}
