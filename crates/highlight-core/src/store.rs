//! Highlight Store: the authoritative span set for one text buffer.
//!
//! The store only holds spans and enforces their invariants. It knows nothing about
//! how edits happen; positional updates go through [`HighlightStore::apply_delta`],
//! which delegates to the [transformer](crate::transform).
//!
//! Spans may overlap, nest or duplicate each other. Iteration order is insertion
//! order, which carries no meaning beyond making rendering reproducible.

use crate::delta::EditDelta;
use crate::error::HighlightError;
use crate::span::{HighlightSpan, LevelId, SpanId, SpanRange};
use crate::transform::{self, TransformOutcome};
use ropey::Rope;

/// The span set of one buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightStore {
    /// Spans in insertion order.
    spans: Vec<HighlightSpan>,
    /// Next id handed out by `next_id`. Only ever grows.
    next_id: u64,
}

impl HighlightStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh span id.
    ///
    /// Ids are never reused by the same store, including after `remove_by_id` and `clear`.
    /// Fails with [`HighlightError::IdsExhausted`] once [`SpanId::MAX`] has been handed
    /// out or reserved.
    pub fn next_id(&mut self) -> Result<SpanId, HighlightError> {
        let next = self
            .next_id
            .checked_add(1)
            .ok_or(HighlightError::IdsExhausted)?;
        let id = SpanId(self.next_id);
        self.next_id = next;
        Ok(id)
    }

    // Span ids never exceed `SpanId::MAX`, so the counter stays at or below `u64::MAX`.
    fn reserve_id(&mut self, id: SpanId) {
        self.next_id = self.next_id.max(id.get().saturating_add(1));
    }

    /// Insert a span.
    ///
    /// No deduplication is performed: overlapping spans of any level are kept as
    /// separate entries.
    pub fn add(&mut self, span: HighlightSpan) {
        self.reserve_id(span.id());
        self.spans.push(span);
    }

    /// Validate `start..end` and insert a span with explicit bounds.
    pub fn add_bounds(
        &mut self,
        id: SpanId,
        start: usize,
        end: usize,
        level: LevelId,
        text: impl Into<String>,
    ) -> Result<(), HighlightError> {
        let span = HighlightSpan::new(id, start, end, level, text)?;
        self.add(span);
        Ok(())
    }

    /// Highlight `range` with `level` under a freshly allocated id.
    pub fn highlight(
        &mut self,
        range: SpanRange,
        level: LevelId,
        text: impl Into<String>,
    ) -> Result<SpanId, HighlightError> {
        let id = self.next_id()?;
        self.add(HighlightSpan::with_range(id, range, level, text));
        Ok(id)
    }

    /// Remove a span by id. Returns the removed span; absent ids are not an error.
    pub fn remove_by_id(&mut self, id: SpanId) -> Option<HighlightSpan> {
        let pos = self.spans.iter().position(|s| s.id() == id)?;
        Some(self.spans.remove(pos))
    }

    /// Remove every span of `level`, returning how many were removed.
    pub fn remove_level(&mut self, level: LevelId) -> usize {
        let before = self.spans.len();
        self.spans.retain(|s| s.level != level);
        before - self.spans.len()
    }

    /// All spans in insertion order.
    pub fn all(&self) -> &[HighlightSpan] {
        &self.spans
    }

    /// Look up a span by id.
    pub fn get(&self, id: SpanId) -> Option<&HighlightSpan> {
        self.spans.iter().find(|s| s.id() == id)
    }

    /// Spans containing `offset`.
    pub fn query_point(&self, offset: usize) -> Vec<&HighlightSpan> {
        self.spans
            .iter()
            .filter(|s| s.range().contains(offset))
            .collect()
    }

    /// Spans overlapping `start..end`.
    pub fn query_range(&self, start: usize, end: usize) -> Vec<&HighlightSpan> {
        if start >= end {
            return Vec::new();
        }
        self.spans
            .iter()
            .filter(|s| s.range().overlaps(start, end))
            .collect()
    }

    /// Spans carrying `level`.
    pub fn spans_for_level(&self, level: LevelId) -> Vec<&HighlightSpan> {
        self.spans.iter().filter(|s| s.level == level).collect()
    }

    /// Number of spans.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Check if the store holds no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Remove all spans. Id allocation continues where it left off.
    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Replace the whole span set (bulk load from persisted state).
    ///
    /// Items are validated before anything is replaced; on error the store is
    /// left untouched.
    pub fn replace_all<I>(&mut self, spans: I) -> Result<(), HighlightError>
    where
        I: IntoIterator<Item = (SpanId, usize, usize, LevelId, String)>,
    {
        let spans = spans
            .into_iter()
            .map(|(id, start, end, level, text)| HighlightSpan::new(id, start, end, level, text))
            .collect::<Result<Vec<_>, _>>()?;

        self.spans.clear();
        for span in spans {
            self.add(span);
        }
        Ok(())
    }

    /// Move every span across one edit.
    ///
    /// Spans whose content the edit destroyed are removed. Surviving spans keep
    /// their snapshot text; refresh it with [`HighlightStore::refresh_text`].
    pub fn apply_delta(&mut self, delta: &EditDelta) -> TransformOutcome {
        let outcome = transform::transform(&self.spans, delta);
        self.spans.clone_from(&outcome.spans);
        outcome
    }

    /// Apply several deltas strictly in order.
    pub fn apply_deltas<'a>(
        &mut self,
        deltas: impl IntoIterator<Item = &'a EditDelta>,
    ) -> TransformOutcome {
        let outcome = transform::transform_all(&self.spans, deltas);
        self.spans.clone_from(&outcome.spans);
        outcome
    }

    /// Recompute every span's snapshot from the live buffer.
    ///
    /// Bounds past the end of the buffer are clamped for the snapshot only.
    pub fn refresh_text(&mut self, buffer: &Rope) {
        let len = buffer.len_chars();
        for span in &mut self.spans {
            let start = span.start().min(len);
            let end = span.end().min(len);
            span.text = buffer.slice(start..end).to_string();
        }
    }
}
