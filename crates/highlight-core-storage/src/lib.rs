#![warn(missing_docs)]
//! `highlight-core-storage` - Persistence for `highlight-core`.
//!
//! The engine itself holds no persistence concerns. This crate provides a small
//! key/value [`StorageAdapter`] abstraction plus repositories that load and save
//! highlight level configuration and per-document span lists as JSON.
//!
//! ```rust
//! use highlight_core::HighlightedText;
//! use highlight_core_storage::{MemoryStorage, SpanRepository};
//!
//! let mut doc = HighlightedText::new("the quick brown fox");
//! doc.highlight(4..9, 1).unwrap();
//!
//! let mut repo = SpanRepository::new(MemoryStorage::new());
//! repo.save("card-1", doc.store()).unwrap();
//!
//! let store = repo.load("card-1").unwrap();
//! assert_eq!(store.all()[0].text, "quick");
//! ```

mod adapter;
mod error;
mod repository;

pub use adapter::{FileStorage, MemoryStorage, StorageAdapter};
pub use error::StorageError;
pub use repository::{HIGHLIGHTS_PREFIX, LEVELS_KEY, LevelConfig, LevelRepository, SpanRepository};
