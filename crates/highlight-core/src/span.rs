//! Highlight spans: the unit of state tracked by the engine.
//!
//! A span marks the half-open character range `start..end` of one buffer with a
//! highlight level. Offsets are counted in Unicode scalar values (`char`), the
//! same unit used by [`EditDelta`](crate::delta::EditDelta).

use crate::error::HighlightError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Highlight level id (see [`HighlightLevel`](crate::level::HighlightLevel)).
///
/// The engine never checks that a level exists; unknown levels render unstyled.
pub type LevelId = u32;

/// Opaque, stable span identifier.
///
/// Ids are allocated by [`HighlightStore::next_id`](crate::store::HighlightStore::next_id)
/// and never change for the lifetime of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpanId(pub u64);

impl SpanId {
    /// Largest id a span may carry. `u64::MAX` is never a valid id.
    pub const MAX: SpanId = SpanId(u64::MAX - 1);

    /// Create a span id from a raw numeric identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A validated, non-empty half-open character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanRange {
    start: usize,
    end: usize,
}

impl SpanRange {
    /// Create a range, failing with [`HighlightError::InvalidSpan`] if `start >= end`.
    pub fn new(start: usize, end: usize) -> Result<Self, HighlightError> {
        if start >= end {
            return Err(HighlightError::invalid_span(start, end));
        }
        Ok(Self { start, end })
    }

    /// Start offset (inclusive).
    pub fn start(&self) -> usize {
        self.start
    }

    /// End offset (exclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of characters covered. Always at least one.
    pub fn len_chars(&self) -> usize {
        self.end - self.start
    }

    /// Check if the range contains a specific offset.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Check if the range overlaps `start..end`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }

    /// The range as a standard library range.
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl TryFrom<Range<usize>> for SpanRange {
    type Error = HighlightError;

    fn try_from(range: Range<usize>) -> Result<Self, Self::Error> {
        Self::new(range.start, range.end)
    }
}

/// A highlighted region of a text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    id: SpanId,
    range: SpanRange,
    /// Level applied to the range.
    pub level: LevelId,
    /// Snapshot of the covered text at last write.
    ///
    /// Only used for debugging and assertions; never consulted for positioning.
    pub text: String,
}

impl HighlightSpan {
    /// Create a span over `start..end`.
    ///
    /// Fails with [`HighlightError::InvalidId`] if `id` is above [`SpanId::MAX`].
    pub fn new(
        id: SpanId,
        start: usize,
        end: usize,
        level: LevelId,
        text: impl Into<String>,
    ) -> Result<Self, HighlightError> {
        let range = SpanRange::new(start, end)?;
        Ok(Self::with_range(check_id(id)?, range, level, text))
    }

    /// Create a span from an already validated range and id.
    pub(crate) fn with_range(
        id: SpanId,
        range: SpanRange,
        level: LevelId,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            range,
            level,
            text: text.into(),
        }
    }

    /// The span's stable id.
    pub fn id(&self) -> SpanId {
        self.id
    }

    /// The covered range.
    pub fn range(&self) -> SpanRange {
        self.range
    }

    /// Start offset (inclusive).
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// End offset (exclusive).
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Move the span, keeping its id, level and snapshot.
    pub(crate) fn set_range(&mut self, range: SpanRange) {
        self.range = range;
    }
}

/// Reject ids the store's counter could never allocate past.
pub(crate) fn check_id(id: SpanId) -> Result<SpanId, HighlightError> {
    if id > SpanId::MAX {
        return Err(HighlightError::InvalidId { id: id.get() });
    }
    Ok(id)
}
