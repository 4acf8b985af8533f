//! Concrete edit scenarios and the transformer's documented properties.

use highlight_core::{
    EditDelta, HighlightError, HighlightSpan, HighlightStore, SpanId, SpanRange, TransformOutcome,
    transform,
};
use pretty_assertions::assert_eq;

fn store_with(spans: &[(usize, usize, u32)]) -> (HighlightStore, Vec<SpanId>) {
    let mut store = HighlightStore::new();
    let ids = spans
        .iter()
        .map(|&(start, end, level)| {
            let range = SpanRange::new(start, end).unwrap();
            store.highlight(range, level, "").unwrap()
        })
        .collect();
    (store, ids)
}

fn bounds(store: &HighlightStore) -> Vec<(usize, usize)> {
    store.all().iter().map(|s| (s.start(), s.end())).collect()
}

#[test]
fn test_insert_before_highlighted_word() {
    // "the quick brown fox" -> "the very quick brown fox"
    let (mut store, _) = store_with(&[(4, 9, 1)]);
    store.apply_delta(&EditDelta::insert(4, 5));
    assert_eq!(bounds(&store), vec![(9, 14)]);
}

#[test]
fn test_delete_leading_word() {
    // Delete "the ".
    let (mut store, _) = store_with(&[(4, 9, 1)]);
    store.apply_delta(&EditDelta::delete(0, 4));
    assert_eq!(bounds(&store), vec![(0, 5)]);
}

#[test]
fn test_delete_inside_highlight() {
    let (mut store, _) = store_with(&[(4, 9, 1)]);
    store.apply_delta(&EditDelta::delete(6, 2));
    assert_eq!(bounds(&store), vec![(4, 7)]);
}

#[test]
fn test_delete_everything() {
    let (mut store, ids) = store_with(&[(4, 9, 1)]);
    let outcome = store.apply_delta(&EditDelta::delete(0, 20));
    assert!(store.is_empty());
    assert_eq!(outcome.dropped, ids);
}

#[test]
fn test_edit_after_overlapping_spans() {
    let (mut store, _) = store_with(&[(0, 10, 1), (5, 15, 2)]);
    store.apply_delta(&EditDelta::insert(20, 3));
    assert_eq!(bounds(&store), vec![(0, 10), (5, 15)]);
}

#[test]
fn test_noop_delta_keeps_every_span() {
    let (mut store, _) = store_with(&[(0, 3, 1), (2, 9, 2), (12, 13, 3)]);
    let before = store.clone();
    for position in [0, 2, 5, 9, 13, 40] {
        let outcome = store.apply_delta(&EditDelta::replace(position, 0, 0));
        assert_eq!(outcome.dropped, Vec::new());
    }
    assert_eq!(store.all(), before.all());
}

#[test]
fn test_pure_insert_shifts_spans_at_or_after_position() {
    let (mut store, _) = store_with(&[(0, 2, 1), (3, 6, 1), (6, 8, 2), (10, 12, 3)]);
    store.apply_delta(&EditDelta::insert(3, 7));
    assert_eq!(bounds(&store), vec![(0, 2), (10, 13), (13, 15), (17, 19)]);
}

#[test]
fn test_ids_and_levels_survive_edits() {
    let (mut store, ids) = store_with(&[(0, 5, 1), (6, 11, 2), (12, 20, 3)]);
    store.apply_delta(&EditDelta::replace(3, 4, 1));
    store.apply_delta(&EditDelta::insert(0, 2));

    let survivors: Vec<(SpanId, u32)> = store.all().iter().map(|s| (s.id(), s.level)).collect();
    assert_eq!(survivors, vec![(ids[0], 1), (ids[1], 2), (ids[2], 3)]);
}

#[test]
fn test_transform_is_pure() {
    let spans = vec![HighlightSpan::new(SpanId(1), 4, 9, 1, "quick").unwrap()];
    let outcome: TransformOutcome = transform(&spans, &EditDelta::delete(0, 4));
    assert_eq!(spans[0].start(), 4);
    assert_eq!(outcome.spans[0].start(), 0);
    // Shifted spans keep their snapshot and are not stale.
    assert_eq!(outcome.spans[0].text, "quick");
    assert!(outcome.stale.is_empty());
}

#[test]
fn test_invalid_inputs_are_rejected_before_mutation() {
    let (mut store, ids) = store_with(&[(4, 9, 1)]);

    assert!(matches!(
        EditDelta::try_from_signed(-1, 0, 1),
        Err(HighlightError::InvalidDelta { .. })
    ));
    assert_eq!(
        store.add_bounds(SpanId(100), 9, 4, 1, ""),
        Err(HighlightError::InvalidSpan { start: 9, end: 4 })
    );
    assert_eq!(store.len(), 1);
    assert_eq!(store.all()[0].id(), ids[0]);
}
