//! Domain-level errors

use std::fmt;

use thiserror::Error;

/// Errors reported by tree operations.
///
/// A failed operation never leaves a partial mutation behind: the tree is in
/// the same state it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("no comparator supplied")]
    MissingComparator,

    #[error("element not found")]
    NotFound,

    #[error("tree is full: capacity of {capacity} nodes reached")]
    CapacityExhausted { capacity: usize },

    #[error("unknown traversal order: {0} (expected in, pre or post)")]
    UnknownOrder(String),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Insertion failed for lack of node storage.
///
/// Carries the rejected element so ownership goes back to the caller.
#[derive(Error)]
#[error("tree is full: capacity of {capacity} nodes reached")]
pub struct CapacityError<T> {
    pub element: T,
    pub capacity: usize,
}

impl<T> CapacityError<T> {
    pub fn into_element(self) -> T {
        self.element
    }
}

impl<T> fmt::Debug for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapacityError")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<T> From<CapacityError<T>> for TreeError {
    fn from(err: CapacityError<T>) -> Self {
        TreeError::CapacityExhausted {
            capacity: err.capacity,
        }
    }
}
