//! Error taxonomy for cursor-stack construction and mutation.
//!
//! Everything here is synchronous and local: an operation either succeeds or
//! fails immediately. Pointer interaction itself never produces an error —
//! out-of-range pointer coordinates are resolved by clamping.

use thiserror::Error;

/// Errors raised by [`SnapCursorStack`](crate::SnapCursorStack) construction
/// and its mutating calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapCursorError {
    /// Raised at construction when the pane set is empty.
    #[error("at least one pane is required")]
    NoPanes,

    /// Raised at construction when panes draw to more than one surface.
    /// All panes of a stack must share one drawing surface.
    #[error("all panes must draw to the same surface")]
    MixedSurfaces,

    /// Raised at construction when the shared x-data sequence is empty.
    #[error("x-data must contain at least one sample")]
    EmptyXData,

    /// Raised at construction when a pane's y-data column is non-empty but
    /// does not match the x-data length.
    #[error("y-data for pane {pane} has {got} samples, x-data has {expected}")]
    YDataLengthMismatch {
        pane: usize,
        got: usize,
        expected: usize,
    },

    /// Raised by `add_cursor` when the index does not address a sample of
    /// the shared x-data sequence.
    #[error("cursor index {index} is out of range (x-data has {len} samples)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Raised by `add_cursor` when another cursor already occupies the index.
    #[error("a cursor already exists at index {index}")]
    DuplicateIndex { index: usize },

    /// Raised by `annotate` when the number of texts does not match the
    /// number of cursors.
    #[error("expected {expected} annotation texts, got {got}")]
    AnnotationCountMismatch { expected: usize, got: usize },
}
