//! Render runs: the buffer sliced into pieces with one resolved level each.
//!
//! Renderers (rich text, HTML) consume runs instead of raw spans so they never
//! deal with overlap themselves. Where spans overlap, a [`LevelPrecedence`]
//! decides which level wins at each character.

use crate::level::{HighlightLevel, HighlightLevels};
use crate::span::{HighlightSpan, LevelId};
use std::ops::Range;

/// Rule for choosing a level where spans overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelPrecedence {
    /// The smallest level id wins (level 1 is the most important).
    #[default]
    LowestLevelId,
    /// The largest level id wins.
    HighestLevelId,
    /// The span added last wins.
    LatestSpan,
}

/// A maximal piece of text with a single resolved level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    /// Character range in the buffer.
    pub range: Range<usize>,
    /// The text of the run.
    pub text: String,
    /// Winning level, or `None` for unhighlighted text.
    pub level: Option<LevelId>,
}

impl TextRun {
    /// Look up this run's level. Unknown levels resolve to `None` and render unstyled.
    pub fn resolve_level<'a>(&self, levels: &'a HighlightLevels) -> Option<&'a HighlightLevel> {
        self.level.and_then(|id| levels.get(id))
    }
}

fn winner(covering: impl Iterator<Item = LevelId>, precedence: LevelPrecedence) -> Option<LevelId> {
    match precedence {
        LevelPrecedence::LowestLevelId => covering.min(),
        LevelPrecedence::HighestLevelId => covering.max(),
        LevelPrecedence::LatestSpan => covering.last(),
    }
}

/// Slice `text` into runs covering the whole buffer, in order.
///
/// `spans` are in store order (relevant for [`LevelPrecedence::LatestSpan`]).
/// Span bounds past the end of `text` are clamped. An empty buffer yields no runs.
pub fn styled_runs(
    text: &str,
    spans: &[HighlightSpan],
    precedence: LevelPrecedence,
) -> Vec<TextRun> {
    // Byte offset of every char boundary, including the end.
    let byte_offsets: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let len = byte_offsets.len() - 1;
    if len == 0 {
        return Vec::new();
    }

    let mut boundaries: Vec<usize> = vec![0, len];
    for span in spans {
        boundaries.push(span.start().min(len));
        boundaries.push(span.end().min(len));
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut runs: Vec<TextRun> = Vec::new();
    for window in boundaries.windows(2) {
        let (start, end) = (window[0], window[1]);
        let covering = spans
            .iter()
            .filter(|s| s.start() <= start && end <= s.end())
            .map(|s| s.level);
        let level = winner(covering, precedence);
        let slice = &text[byte_offsets[start]..byte_offsets[end]];

        match runs.last_mut() {
            Some(last) if last.level == level => {
                last.range.end = end;
                last.text.push_str(slice);
            }
            _ => runs.push(TextRun {
                range: start..end,
                text: slice.to_string(),
                level,
            }),
        }
    }

    runs
}
