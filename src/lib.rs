//! This crate exposes a handful of classic recursive containers, mostly for
//! educational purposes.
//!
//! ## Ordered List
//!
//! [`list::OrderedList`] is a singly linked list addressed by position. It is
//! also what [`bst::flatten`] produces from a tree.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are defined recursively: a
//! tree is either empty or a node holding a value and two subtrees. The
//! invariants of [`bst::Tree`] are:
//!
//! 1. For every node, all the values in its left subtree are less than or
//!    equal to its own value.
//! 2. For every node, all the values in its right subtree are greater than its
//!    own value.
//!
//! > Note that some nodes have two empty subtrees. These nodes are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is the
//! longest path from the root to a leaf). Nothing here rebalances, so sorted
//! input produces a tree as tall as it is large. BSTs also naturally support
//! sorted iteration by visiting the left subtree, then the subtree root, then
//! the right subtree.
//!
//! ## General Tree
//!
//! [`nary::Tree`] lets every node own any number of ordered children and
//! keeps no ordering among values. Its [`insert`][nary::Tree::insert] places
//! values at random positions.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod bst;
pub mod error;
pub mod list;
pub mod nary;

pub use error::{Error, Result};

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}
