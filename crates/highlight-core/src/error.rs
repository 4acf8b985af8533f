use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced by the highlight store, delta parsing and the document bridge.
///
/// All variants are local input errors: the operation that returned one left
/// its store untouched.
pub enum HighlightError {
    #[error("invalid span: start {start} must be non-negative and less than end {end}")]
    /// A span had negative bounds or `start >= end`.
    InvalidSpan {
        /// Requested start offset.
        start: i64,
        /// Requested end offset.
        end: i64,
    },

    #[error(
        "invalid delta: position {position}, delete count {delete_count} and insert count {insert_count} must be non-negative"
    )]
    /// An edit delta carried a negative field.
    InvalidDelta {
        /// Requested edit position.
        position: i64,
        /// Requested number of deleted characters.
        delete_count: i64,
        /// Requested number of inserted characters.
        insert_count: i64,
    },

    #[error("span id {id} is out of range")]
    /// A span id above [`SpanId::MAX`](crate::span::SpanId::MAX).
    InvalidId {
        /// The rejected id.
        id: u64,
    },

    #[error("no span ids left to allocate")]
    /// The store's id counter is exhausted.
    IdsExhausted,

    #[error("offset {offset} is out of bounds for a buffer of {len} characters")]
    /// An edit addressed characters past the end of the buffer.
    OutOfBounds {
        /// The first offending offset.
        offset: usize,
        /// Buffer length in characters.
        len: usize,
    },
}

impl HighlightError {
    pub(crate) fn invalid_span(start: usize, end: usize) -> Self {
        Self::InvalidSpan {
            start: saturating_i64(start),
            end: saturating_i64(end),
        }
    }
}

/// `value` as `i64`, saturating at `i64::MAX`.
pub(crate) fn saturating_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
