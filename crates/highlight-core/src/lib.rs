#![warn(missing_docs)]
//! Highlight Core - Position-Tracked Multi-Level Text Highlighting
//!
//! # Overview
//!
//! `highlight-core` keeps a set of highlighted spans anchored to an editable text buffer.
//! Spans are defined purely by character offsets; when the text changes, each edit is
//! described by a single [`EditDelta`] and the engine maps every span to its new position
//! without re-scanning or re-matching text.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  HighlightedText (buffer + store bridge)    │  ← Editing surface
//! ├─────────────────────────────────────────────┤
//! │  Render runs / persisted records            │  ← Rendering & persistence data
//! ├─────────────────────────────────────────────┤
//! │  Delta Transformer                          │  ← Span mapping across edits
//! ├─────────────────────────────────────────────┤
//! │  Highlight Store                            │  ← Span set + invariants
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use highlight_core::{EditDelta, HighlightStore, SpanRange};
//!
//! let mut store = HighlightStore::new();
//! // "quick" in "the quick brown fox"
//! let id = store.highlight(SpanRange::new(4, 9).unwrap(), 1, "quick").unwrap();
//!
//! // The user typed "very " in front of "quick".
//! store.apply_delta(&EditDelta::insert(4, 5));
//!
//! let span = store.get(id).unwrap();
//! assert_eq!((span.start(), span.end()), (9, 14));
//! ```
//!
//! # Edit Policy
//!
//! - Text inserted strictly inside a span joins the highlight.
//! - Text inserted exactly at a span's start or end stays outside it.
//! - A span whose whole range is deleted (or replaced) is dropped.
//!
//! # Module Description
//!
//! - [`span`] - Span ids, ranges and the span type
//! - [`store`] - The per-buffer span set
//! - [`delta`] - Single-region edit deltas
//! - [`transform`] - The span transformation algorithm
//! - [`level`] - Highlight level configuration
//! - [`runs`] - Slicing text into styled runs for renderers
//! - [`record`] - Persisted layout and untrusted range sanitizing
//! - [`document`] - Buffer + store bridge

pub mod delta;
pub mod document;
mod error;
pub mod level;
pub mod record;
pub mod runs;
pub mod span;
pub mod store;
pub mod transform;

pub use delta::EditDelta;
pub use document::HighlightedText;
pub use error::HighlightError;
pub use level::{HighlightLevel, HighlightLevels, LevelUpdate};
pub use record::{SpanRecord, SuggestedRange, sanitize_ranges};
pub use runs::{LevelPrecedence, TextRun, styled_runs};
pub use span::{HighlightSpan, LevelId, SpanId, SpanRange};
pub use store::HighlightStore;
pub use transform::{EditRelation, TransformOutcome, classify, transform, transform_all};
