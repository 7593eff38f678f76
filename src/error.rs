//! The error type shared by every container in this crate.

use thiserror::Error;

/// Errors raised by the containers. They are returned at the point of
/// violation and never recovered from internally.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A position was outside of an [`OrderedList`][crate::list::OrderedList].
    #[error("index {index} is out of range for a list of length {len}")]
    OutOfRange {
        /// The requested position.
        index: usize,
        /// The length of the list at the time of the request.
        len: usize,
    },
    /// A value was requested from a tree that holds none.
    #[error("the tree is empty")]
    EmptyTree,
    /// The branching factor of a tree without internal nodes was requested.
    #[error("the tree has no internal nodes")]
    NoInternalNodes,
    /// Branches were limited to zero children per node.
    #[error("a branch limit must allow at least one child")]
    ZeroBranchLimit,
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
