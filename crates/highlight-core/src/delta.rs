//! Single-region edit deltas.
//!
//! An [`EditDelta`] says that at character offset `position`, `delete_count`
//! characters were removed and `insert_count` characters were inserted in their
//! place. Offsets count Unicode scalar values (`char`).
//!
//! Deltas describe exactly one contiguous edit. A batch of edits must be
//! expressed as a sequence of deltas, each relative to the buffer produced by
//! the previous one, and applied in that order.

use crate::error::HighlightError;

/// One contiguous edit expressed in character offsets of the pre-edit buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EditDelta {
    /// Offset where the edit starts.
    pub position: usize,
    /// Number of characters removed at `position`.
    pub delete_count: usize,
    /// Number of characters inserted at `position` after the removal.
    pub insert_count: usize,
}

impl EditDelta {
    /// Create a delta from its three components.
    pub const fn replace(position: usize, delete_count: usize, insert_count: usize) -> Self {
        Self {
            position,
            delete_count,
            insert_count,
        }
    }

    /// A pure insertion of `count` characters at `position`.
    pub const fn insert(position: usize, count: usize) -> Self {
        Self::replace(position, 0, count)
    }

    /// A pure deletion of `count` characters starting at `position`.
    pub const fn delete(position: usize, count: usize) -> Self {
        Self::replace(position, count, 0)
    }

    /// Build a delta from the exact deleted and inserted text.
    pub fn from_edit(position: usize, deleted_text: &str, inserted_text: &str) -> Self {
        Self::replace(
            position,
            deleted_text.chars().count(),
            inserted_text.chars().count(),
        )
    }

    /// Parse a delta coming from a signed source (persisted data, another runtime).
    ///
    /// Fails with [`HighlightError::InvalidDelta`] if any field is negative or does
    /// not fit in `usize`. The end of the deleted region is not checked against
    /// any buffer length.
    pub fn try_from_signed(
        position: i64,
        delete_count: i64,
        insert_count: i64,
    ) -> Result<Self, HighlightError> {
        let invalid = || HighlightError::InvalidDelta {
            position,
            delete_count,
            insert_count,
        };
        let position = usize::try_from(position).map_err(|_| invalid())?;
        let delete_count = usize::try_from(delete_count).map_err(|_| invalid())?;
        let insert_count = usize::try_from(insert_count).map_err(|_| invalid())?;
        Ok(Self::replace(position, delete_count, insert_count))
    }

    /// Exclusive end of the deleted region, in pre-edit offsets.
    pub fn deleted_end(&self) -> usize {
        self.position.saturating_add(self.delete_count)
    }

    /// Exclusive end of the inserted region, in post-edit offsets.
    pub fn inserted_end(&self) -> usize {
        self.position.saturating_add(self.insert_count)
    }

    /// Net change in buffer length.
    pub fn shift(&self) -> i64 {
        self.insert_count as i64 - self.delete_count as i64
    }

    /// Returns `true` if the delta neither deletes nor inserts anything.
    pub fn is_noop(&self) -> bool {
        self.delete_count == 0 && self.insert_count == 0
    }

    /// Derive the single delta that turns `old` into `new`.
    ///
    /// The edit region is found by trimming the longest common prefix and then the
    /// longest common suffix of what remains. Returns a no-op delta at offset 0 if
    /// the texts are equal.
    pub fn diff(old: &str, new: &str) -> Self {
        let old_chars: Vec<char> = old.chars().collect();
        let new_chars: Vec<char> = new.chars().collect();

        let prefix = old_chars
            .iter()
            .zip(new_chars.iter())
            .take_while(|(a, b)| a == b)
            .count();

        if prefix == old_chars.len() && prefix == new_chars.len() {
            return Self::default();
        }

        let max_suffix = (old_chars.len() - prefix).min(new_chars.len() - prefix);
        let suffix = old_chars
            .iter()
            .rev()
            .zip(new_chars.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        Self::replace(
            prefix,
            old_chars.len() - prefix - suffix,
            new_chars.len() - prefix - suffix,
        )
    }
}
