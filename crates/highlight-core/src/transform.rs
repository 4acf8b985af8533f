//! Delta Transformer: maps highlight spans across a single edit.
//!
//! Every span is classified by how the edit region `position..deleted_end`
//! relates to the span range `start..end`, then moved, resized or dropped:
//!
//! | relation        | condition                                         | result                                      |
//! |-----------------|---------------------------------------------------|---------------------------------------------|
//! | `Before`        | `deleted_end <= start`                            | both bounds shifted by `shift`              |
//! | `After`         | `position >= end`                                 | unchanged                                   |
//! | `Covers`        | `position <= start && deleted_end >= end`         | dropped                                     |
//! | `LeadingEdge`   | `position < start < deleted_end < end`            | `start = position + insert_count`, `end += shift` |
//! | `TrailingEdge`  | `start <= position < end <= deleted_end`          | `end = position`                            |
//! | `Inside`        | `start <= position && deleted_end < end`          | `end += shift`                              |
//!
//! Adjacent edits never merge into a span: text inserted exactly at `start`
//! shifts the span, text inserted exactly at `end` stays outside it. Text
//! inserted strictly inside a span joins the highlight.

use crate::delta::EditDelta;
use crate::span::{HighlightSpan, SpanId, SpanRange};

/// How an edit region relates to a span range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditRelation {
    /// The edit ends at or before the span start.
    Before,
    /// The edit starts at or after the span end.
    After,
    /// The deleted region covers the whole span.
    Covers,
    /// The deleted region eats the span's leading edge.
    LeadingEdge,
    /// The deleted region eats the span's trailing edge.
    TrailingEdge,
    /// The edit lies strictly inside the span.
    Inside,
}

/// Classify `delta` against `range`.
pub fn classify(range: SpanRange, delta: &EditDelta) -> EditRelation {
    let (start, end) = (range.start(), range.end());
    let position = delta.position;
    let deleted_end = delta.deleted_end();

    if deleted_end <= start {
        EditRelation::Before
    } else if position >= end {
        EditRelation::After
    } else if position <= start && deleted_end >= end {
        EditRelation::Covers
    } else if position < start {
        EditRelation::LeadingEdge
    } else if deleted_end >= end {
        EditRelation::TrailingEdge
    } else {
        EditRelation::Inside
    }
}

/// Result of transforming a span set across one edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOutcome {
    /// Surviving spans, in their original relative order.
    pub spans: Vec<HighlightSpan>,
    /// Ids of spans removed because the edit destroyed their content.
    pub dropped: Vec<SpanId>,
    /// Ids of surviving spans whose covered text changed.
    ///
    /// Their `text` snapshots should be refreshed from the live buffer.
    pub stale: Vec<SpanId>,
}

/// Bounds of a span after the edit, or `None` if it is dropped.
fn map_range(range: SpanRange, delta: &EditDelta) -> (EditRelation, Option<(usize, usize)>) {
    let (start, end) = (range.start(), range.end());
    let relation = classify(range, delta);

    // `start`/`end` are at least `deleted_end` wherever `delete_count` is
    // subtracted below, so none of these subtractions can underflow.
    let bounds = match relation {
        EditRelation::Before => Some((
            start - delta.delete_count + delta.insert_count,
            end - delta.delete_count + delta.insert_count,
        )),
        EditRelation::After => Some((start, end)),
        EditRelation::Covers => None,
        EditRelation::LeadingEdge => Some((
            delta.inserted_end(),
            end - delta.delete_count + delta.insert_count,
        )),
        EditRelation::TrailingEdge => Some((start, delta.position)),
        EditRelation::Inside => Some((start, end - delta.delete_count + delta.insert_count)),
    };

    (relation, bounds)
}

/// Transform `spans` across `delta`.
///
/// Spans are never reordered and surviving spans keep their ids and levels.
/// Snapshot text is carried over unchanged; see [`TransformOutcome::stale`].
pub fn transform(spans: &[HighlightSpan], delta: &EditDelta) -> TransformOutcome {
    let mut outcome = TransformOutcome {
        spans: Vec::with_capacity(spans.len()),
        dropped: Vec::new(),
        stale: Vec::new(),
    };

    if delta.is_noop() {
        outcome.spans.extend_from_slice(spans);
        return outcome;
    }

    for span in spans {
        let (relation, bounds) = map_range(span.range(), delta);
        log::trace!(
            "span {} {}..{} is {:?} edit {:?}",
            span.id(),
            span.start(),
            span.end(),
            relation,
            delta
        );

        let Some(range) = bounds.and_then(|(start, end)| SpanRange::new(start, end).ok()) else {
            log::debug!(
                "dropping span {} ({}..{}, level {}): content removed by {:?}",
                span.id(),
                span.start(),
                span.end(),
                span.level,
                delta
            );
            outcome.dropped.push(span.id());
            continue;
        };

        if !matches!(relation, EditRelation::Before | EditRelation::After) {
            outcome.stale.push(span.id());
        }

        let mut moved = span.clone();
        moved.set_range(range);
        outcome.spans.push(moved);
    }

    outcome
}

/// Apply a sequence of deltas in order, accumulating drops and stale ids.
///
/// A span listed as stale and later dropped only appears in `dropped`.
pub fn transform_all<'a>(
    spans: &[HighlightSpan],
    deltas: impl IntoIterator<Item = &'a EditDelta>,
) -> TransformOutcome {
    let mut acc = TransformOutcome {
        spans: spans.to_vec(),
        dropped: Vec::new(),
        stale: Vec::new(),
    };

    for delta in deltas {
        let step = transform(&acc.spans, delta);
        acc.spans = step.spans;
        acc.dropped.extend(step.dropped);
        for id in step.stale {
            if !acc.stale.contains(&id) {
                acc.stale.push(id);
            }
        }
    }

    acc.stale.retain(|id| !acc.dropped.contains(id));
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn span(id: u64, start: usize, end: usize, level: u32) -> HighlightSpan {
        HighlightSpan::new(SpanId(id), start, end, level, "").unwrap()
    }

    fn bounds(outcome: &TransformOutcome) -> Vec<(u64, usize, usize)> {
        outcome
            .spans
            .iter()
            .map(|s| (s.id().get(), s.start(), s.end()))
            .collect()
    }

    fn range(start: usize, end: usize) -> SpanRange {
        SpanRange::new(start, end).unwrap()
    }

    #[test]
    fn test_classify_every_relation() {
        let r = range(4, 9);
        assert_eq!(classify(r, &EditDelta::delete(0, 4)), EditRelation::Before);
        assert_eq!(classify(r, &EditDelta::insert(4, 3)), EditRelation::Before);
        assert_eq!(classify(r, &EditDelta::insert(9, 3)), EditRelation::After);
        assert_eq!(classify(r, &EditDelta::delete(12, 3)), EditRelation::After);
        assert_eq!(classify(r, &EditDelta::delete(4, 5)), EditRelation::Covers);
        assert_eq!(classify(r, &EditDelta::delete(0, 20)), EditRelation::Covers);
        assert_eq!(classify(r, &EditDelta::delete(2, 4)), EditRelation::LeadingEdge);
        assert_eq!(classify(r, &EditDelta::delete(6, 3)), EditRelation::TrailingEdge);
        assert_eq!(classify(r, &EditDelta::delete(6, 10)), EditRelation::TrailingEdge);
        assert_eq!(classify(r, &EditDelta::delete(6, 2)), EditRelation::Inside);
        assert_eq!(classify(r, &EditDelta::insert(6, 2)), EditRelation::Inside);
        assert_eq!(classify(r, &EditDelta::delete(4, 2)), EditRelation::Inside);
    }

    #[test]
    fn test_insert_before_span_shifts() {
        // "the quick brown fox" -> "the very quick brown fox"
        let outcome = transform(&[span(1, 4, 9, 1)], &EditDelta::insert(4, 5));
        assert_eq!(bounds(&outcome), vec![(1, 9, 14)]);
        assert!(outcome.stale.is_empty());
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn test_delete_before_span_shifts_back() {
        // Delete "the ".
        let outcome = transform(&[span(1, 4, 9, 1)], &EditDelta::delete(0, 4));
        assert_eq!(bounds(&outcome), vec![(1, 0, 5)]);
    }

    #[test]
    fn test_delete_inside_span_shrinks() {
        let outcome = transform(&[span(1, 4, 9, 1)], &EditDelta::delete(6, 2));
        assert_eq!(bounds(&outcome), vec![(1, 4, 7)]);
        assert_eq!(outcome.stale, vec![SpanId(1)]);
    }

    #[test]
    fn test_insert_inside_span_inherits() {
        let outcome = transform(&[span(1, 4, 9, 1)], &EditDelta::insert(6, 3));
        assert_eq!(bounds(&outcome), vec![(1, 4, 12)]);
    }

    #[test]
    fn test_delete_everything_drops_span() {
        let outcome = transform(&[span(1, 4, 9, 1)], &EditDelta::delete(0, 20));
        assert!(outcome.spans.is_empty());
        assert_eq!(outcome.dropped, vec![SpanId(1)]);
    }

    #[test]
    fn test_replace_covering_span_drops_it() {
        let outcome = transform(&[span(1, 4, 9, 1)], &EditDelta::replace(4, 5, 5));
        assert!(outcome.spans.is_empty());
        assert_eq!(outcome.dropped, vec![SpanId(1)]);
    }

    #[test]
    fn test_edit_after_overlapping_spans_is_noop() {
        let spans = [span(1, 0, 10, 1), span(2, 5, 15, 2)];
        let outcome = transform(&spans, &EditDelta::insert(20, 3));
        assert_eq!(bounds(&outcome), vec![(1, 0, 10), (2, 5, 15)]);
    }

    #[test]
    fn test_insert_at_trailing_boundary_is_not_inherited() {
        let outcome = transform(&[span(1, 4, 9, 1)], &EditDelta::insert(9, 4));
        assert_eq!(bounds(&outcome), vec![(1, 4, 9)]);
    }

    #[test]
    fn test_leading_edge_replacement() {
        // Replace 2..6 (4 chars) with 1 char: start pulled to 3, end 9 - 3 = 6.
        let outcome = transform(&[span(1, 4, 9, 1)], &EditDelta::replace(2, 4, 1));
        assert_eq!(bounds(&outcome), vec![(1, 3, 6)]);
        assert_eq!(outcome.stale, vec![SpanId(1)]);
    }

    #[test]
    fn test_trailing_edge_replacement_excludes_inserted_text() {
        let outcome = transform(&[span(1, 4, 9, 1)], &EditDelta::replace(7, 5, 10));
        assert_eq!(bounds(&outcome), vec![(1, 4, 7)]);
    }

    #[test]
    fn test_trailing_edge_delete_from_start_is_full_cover() {
        let outcome = transform(&[span(1, 4, 9, 1)], &EditDelta::delete(4, 8));
        assert_eq!(outcome.dropped, vec![SpanId(1)]);
    }

    #[test]
    fn test_noop_delta_preserves_spans() {
        let spans = [span(1, 0, 3, 1), span(2, 2, 8, 3)];
        let outcome = transform(&spans, &EditDelta::replace(5, 0, 0));
        assert_eq!(outcome.spans, spans.to_vec());
        assert!(outcome.stale.is_empty());
    }

    #[test]
    fn test_order_and_levels_preserved() {
        let spans = [span(3, 20, 25, 2), span(1, 0, 5, 1), span(2, 8, 12, 3)];
        let outcome = transform(&spans, &EditDelta::delete(1, 9));
        assert_eq!(bounds(&outcome), vec![(3, 11, 16), (1, 0, 1), (2, 1, 3)]);
        let levels: Vec<u32> = outcome.spans.iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![2, 1, 3]);
    }

    #[test]
    fn test_transform_all_applies_in_order() {
        let spans = [span(1, 4, 9, 1), span(2, 10, 12, 2)];
        let deltas = [
            EditDelta::insert(0, 2),
            EditDelta::delete(12, 2),
            EditDelta::insert(8, 1),
        ];
        let outcome = transform_all(&spans, &deltas);
        // After insert: (6,11), (12,14). Delete 12..14 drops #2. Insert at 8 grows #1.
        assert_eq!(bounds(&outcome), vec![(1, 6, 12)]);
        assert_eq!(outcome.dropped, vec![SpanId(2)]);
        assert_eq!(outcome.stale, vec![SpanId(1)]);
    }
}
