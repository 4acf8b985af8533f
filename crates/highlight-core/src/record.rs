//! Persisted span layout and validation of externally produced ranges.
//!
//! Spans are persisted as a flat ordered list of [`SpanRecord`]s. Offsets are
//! signed on the wire so that corrupt data is rejected with
//! [`HighlightError::InvalidSpan`] instead of wrapping around.

use crate::error::{HighlightError, saturating_i64};
use crate::level::HighlightLevels;
use crate::span::{self, HighlightSpan, LevelId, SpanId, SpanRange};
use crate::store::HighlightStore;
use serde::{Deserialize, Serialize};

/// One persisted span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanRecord {
    /// Span id.
    pub id: SpanId,
    /// Start offset (inclusive).
    pub start: i64,
    /// End offset (exclusive).
    pub end: i64,
    /// Level id.
    pub level: LevelId,
    /// Snapshot of the covered text.
    #[serde(default)]
    pub text: String,
}

impl From<&HighlightSpan> for SpanRecord {
    fn from(span: &HighlightSpan) -> Self {
        Self {
            id: span.id(),
            start: saturating_i64(span.start()),
            end: saturating_i64(span.end()),
            level: span.level,
            text: span.text.clone(),
        }
    }
}

fn signed_range(start: i64, end: i64) -> Result<SpanRange, HighlightError> {
    let invalid = || HighlightError::InvalidSpan { start, end };
    let start_u = usize::try_from(start).map_err(|_| invalid())?;
    let end_u = usize::try_from(end).map_err(|_| invalid())?;
    SpanRange::new(start_u, end_u).map_err(|_| invalid())
}

impl TryFrom<SpanRecord> for HighlightSpan {
    type Error = HighlightError;

    fn try_from(record: SpanRecord) -> Result<Self, Self::Error> {
        let range = signed_range(record.start, record.end)?;
        Ok(HighlightSpan::with_range(
            span::check_id(record.id)?,
            range,
            record.level,
            record.text,
        ))
    }
}

impl HighlightStore {
    /// Snapshot the store as persisted records, in insertion order.
    pub fn to_records(&self) -> Vec<SpanRecord> {
        self.all().iter().map(SpanRecord::from).collect()
    }

    /// Build a store from persisted records.
    ///
    /// Fails on the first malformed record; no partial store is returned.
    pub fn from_records(
        records: impl IntoIterator<Item = SpanRecord>,
    ) -> Result<Self, HighlightError> {
        let mut store = HighlightStore::new();
        for record in records {
            store.add(HighlightSpan::try_from(record)?);
        }
        Ok(store)
    }
}

/// A highlight range suggested by an untrusted producer (e.g. an automatic highlighter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedRange {
    /// Start offset (inclusive).
    pub start: i64,
    /// End offset (exclusive).
    pub end: i64,
    /// Level id.
    pub level: LevelId,
}

/// Clamp suggested ranges to `0..=text_len` and keep the usable ones.
///
/// Ranges that are empty after clamping, or that name a level missing from
/// `levels`, are dropped. The result is sorted by start offset; ranges with the
/// same start keep their input order.
pub fn sanitize_ranges(
    ranges: impl IntoIterator<Item = SuggestedRange>,
    text_len: usize,
    levels: &HighlightLevels,
) -> Vec<(SpanRange, LevelId)> {
    let max = i64::try_from(text_len).unwrap_or(i64::MAX);
    let mut valid = Vec::new();

    for range in ranges {
        let start = range.start.clamp(0, max);
        let end = range.end.clamp(start, max);

        if !levels.contains(range.level) {
            log::warn!("skipping suggested range with unknown level: {range:?}");
            continue;
        }
        match signed_range(start, end) {
            Ok(span_range) => valid.push((span_range, range.level)),
            Err(_) => log::warn!("skipping empty suggested range: {range:?}"),
        }
    }

    valid.sort_by_key(|(range, _)| range.start());
    valid
}

impl HighlightStore {
    /// Sanitize suggested ranges against `text` and highlight each under a fresh id.
    ///
    /// Returns the ids in the order the spans were added. Fails only when the id
    /// counter runs out; spans added before that point are kept.
    pub fn import_suggestions(
        &mut self,
        text: &str,
        ranges: impl IntoIterator<Item = SuggestedRange>,
        levels: &HighlightLevels,
    ) -> Result<Vec<SpanId>, HighlightError> {
        let chars: Vec<char> = text.chars().collect();
        sanitize_ranges(ranges, chars.len(), levels)
            .into_iter()
            .map(|(range, level)| {
                let snapshot: String = chars[range.as_range()].iter().collect();
                self.highlight(range, level, snapshot)
            })
            .collect()
    }
}
