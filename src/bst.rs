//! A mutable Binary Search Tree where every subtree is itself a full
//! [`Tree`]. An empty subtree is the [`Empty`][Tree::Empty] variant rather
//! than a missing pointer, so a [`Node`] always has two children.
//!
//! Values are kept so that every node is `>=` everything in its left subtree
//! and `<` everything in its right subtree. Equal values therefore sort to the
//! left. The tree never rebalances itself.
//!
//! # Examples
//!
//! ```
//! use arbor::bst::Tree;
//!
//! let mut tree = Tree::new();
//! for x in [5, 3, 8, 3] {
//!     tree.insert(x);
//! }
//!
//! assert_eq!(tree.in_order(), [&3, &3, &5, &8]);
//! assert_eq!(tree.count(&3), 2);
//! assert_eq!(tree.range_count(&3, &5), 3);
//!
//! // Deleting the root promotes the largest value of the left subtree.
//! assert_eq!(tree.delete_root(), Ok(5));
//! assert_eq!(tree.root(), Some(&3));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::Mul;

use num_traits::One;

use crate::error::{Error, Result};
use crate::list::OrderedList;

/// A Binary Search Tree. Each value is either empty or a [`Node`] holding a
/// value and two subtrees.
#[derive(Debug, PartialEq, Eq)]
pub enum Tree<T> {
    /// A tree holding nothing.
    Empty,
    /// A value with its left and right subtrees.
    Node(Node<T>),
}

/// The occupied state of a [`Tree`]. Both children are always present
/// although either may be [`Empty`][Tree::Empty].
#[derive(Debug, PartialEq, Eq)]
pub struct Node<T> {
    value: T,
    left: Box<Tree<T>>,
    right: Box<Tree<T>>,
}

/// Which order a traversal visits the root relative to its subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Root, then left, then right.
    Pre,
    /// Left, then root, then right.
    In,
    /// Left, then right, then root.
    Post,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        deep_copy(self)
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self::Empty
    }

    /// A tree holding only `value`.
    pub fn leaf(value: T) -> Self {
        Self::branch(value, Self::Empty, Self::Empty)
    }

    /// Assembles a tree from a root value and two subtrees. The ordering of
    /// the result is not checked; see [`is_bst`].
    pub fn branch(value: T, left: Self, right: Self) -> Self {
        Self::Node(Node {
            value,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Returns `true` if this tree holds no value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` if this tree holds exactly one value.
    pub fn is_leaf(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Node(n) => n.left.is_empty() && n.right.is_empty(),
        }
    }

    /// The value at the root, if any.
    pub fn root(&self) -> Option<&T> {
        self.node().map(|n| &n.value)
    }

    /// The left subtree, if this tree is occupied.
    pub fn left(&self) -> Option<&Self> {
        self.node().map(|n| n.left.as_ref())
    }

    /// The right subtree, if this tree is occupied.
    pub fn right(&self) -> Option<&Self> {
        self.node().map(|n| n.right.as_ref())
    }

    /// Returns `true` if a value equal to `item` is stored in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&42));
    /// ```
    pub fn contains(&self, item: &T) -> bool
    where
        T: Ord,
    {
        match self {
            Self::Empty => false,
            Self::Node(n) => match item.cmp(&n.value) {
                Ordering::Less => n.left.contains(item),
                Ordering::Equal => true,
                Ordering::Greater => n.right.contains(item),
            },
        }
    }

    /// Inserts `item` below the existing nodes. Values equal to a node go to
    /// its left.
    pub fn insert(&mut self, item: T)
    where
        T: Ord,
    {
        match self {
            Self::Empty => *self = Self::leaf(item),
            Self::Node(n) => {
                if item <= n.value {
                    n.left.insert(item)
                } else {
                    n.right.insert(item)
                }
            }
        }
    }

    /// Deletes one node holding `item`. Returns whether a node was deleted;
    /// a missing item leaves the tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// assert!(tree.delete(&2));
    /// assert!(!tree.delete(&2));
    /// assert_eq!(tree.in_order(), [&1]);
    /// ```
    pub fn delete(&mut self, item: &T) -> bool
    where
        T: Ord,
    {
        let Self::Node(n) = self else {
            return false;
        };
        match item.cmp(&n.value) {
            Ordering::Less => n.left.delete(item),
            Ordering::Greater => n.right.delete(item),
            Ordering::Equal => self.delete_root().is_ok(),
        }
    }

    /// Removes the root value and returns it. The largest value of the left
    /// subtree takes its place; without a left subtree the smallest value of
    /// the right subtree does.
    pub fn delete_root(&mut self) -> Result<T> {
        let Self::Node(n) = self else {
            return Err(Error::EmptyTree);
        };

        let promoted = if !n.left.is_empty() {
            n.left.extract_max()?
        } else if !n.right.is_empty() {
            n.right.extract_min()?
        } else {
            return self.take_node().map(|n| n.value).ok_or(Error::EmptyTree);
        };
        tracing::trace!("promoted a descendant into the deleted root");

        Ok(std::mem::replace(&mut n.value, promoted))
    }

    /// Removes and returns the largest (right-most) value.
    pub fn extract_max(&mut self) -> Result<T> {
        self.extract_max_if(|_| true).ok_or(Error::EmptyTree)
    }

    /// Removes and returns the smallest (left-most) value.
    pub fn extract_min(&mut self) -> Result<T> {
        self.extract_min_if(|_| true).ok_or(Error::EmptyTree)
    }

    /// Removes the largest value if `accept` holds for it.
    fn extract_max_if<F>(&mut self, accept: F) -> Option<T>
    where
        F: FnOnce(&T) -> bool,
    {
        let Self::Node(n) = self else {
            return None;
        };
        if !n.right.is_empty() {
            return n.right.extract_max_if(accept);
        }
        if !accept(&n.value) {
            return None;
        }

        let node = self.take_node()?;
        *self = *node.left;
        Some(node.value)
    }

    /// Removes the smallest value if `accept` holds for it.
    fn extract_min_if<F>(&mut self, accept: F) -> Option<T>
    where
        F: FnOnce(&T) -> bool,
    {
        let Self::Node(n) = self else {
            return None;
        };
        if !n.left.is_empty() {
            return n.left.extract_min_if(accept);
        }
        if !accept(&n.value) {
            return None;
        }

        let node = self.take_node()?;
        *self = *node.right;
        Some(node.value)
    }

    /// Drops the smallest value.
    pub fn remove_smallest(&mut self) -> Result<()> {
        self.extract_min().map(drop)
    }

    /// Counts the values equal to `item` by visiting every node.
    pub fn count(&self, item: &T) -> usize
    where
        T: PartialEq,
    {
        match self {
            Self::Empty => 0,
            Self::Node(n) => {
                usize::from(n.value == *item) + n.left.count(item) + n.right.count(item)
            }
        }
    }

    /// Counts the values equal to `item` along the search path only. Since
    /// duplicates sort left, a match continues into the left subtree.
    pub fn count_on_path(&self, item: &T) -> usize
    where
        T: Ord,
    {
        match self {
            Self::Empty => 0,
            Self::Node(n) => match item.cmp(&n.value) {
                Ordering::Equal => 1 + n.left.count_on_path(item),
                Ordering::Less => n.left.count_on_path(item),
                Ordering::Greater => n.right.count_on_path(item),
            },
        }
    }

    /// Counts the values between `low` and `high`, inclusive. Every node is
    /// visited, so values moved out of order by
    /// [`map_values`][Self::map_values] are still counted.
    pub fn range_count(&self, low: &T, high: &T) -> usize
    where
        T: Ord,
    {
        match self {
            Self::Empty => 0,
            Self::Node(n) => {
                let inside = usize::from(*low <= n.value && n.value <= *high);
                n.left.range_count(low, high) + inside + n.right.range_count(low, high)
            }
        }
    }

    /// Lists the values between `low` and `high`, inclusive, with duplicates,
    /// in the tree's in-order. That is sorted as long as the tree is ordered.
    /// Like [`range_count`][Self::range_count] it visits every node.
    pub fn list_range(&self, low: &T, high: &T) -> Vec<&T>
    where
        T: Ord,
    {
        let mut values = Vec::new();
        self.collect_range(low, high, &mut values);
        values
    }

    fn collect_range<'a>(&'a self, low: &T, high: &T, values: &mut Vec<&'a T>)
    where
        T: Ord,
    {
        let Self::Node(n) = self else {
            return;
        };
        n.left.collect_range(low, high, values);
        if *low <= n.value && n.value <= *high {
            values.push(&n.value);
        }
        n.right.collect_range(low, high, values);
    }

    /// Lists the values `>= threshold` in sorted order. Left subtrees of
    /// nodes below the threshold are skipped.
    pub fn list_at_least(&self, threshold: &T) -> Vec<&T>
    where
        T: Ord,
    {
        match self {
            Self::Empty => Vec::new(),
            Self::Node(n) if n.value >= *threshold => {
                let mut values = n.left.list_at_least(threshold);
                values.push(&n.value);
                values.extend(n.right.list_at_least(threshold));
                values
            }
            Self::Node(n) => n.right.list_at_least(threshold),
        }
    }

    /// Collects every value in the given traversal order.
    pub fn traverse(&self, order: Order) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.size());
        self.walk(order, &mut values);
        values
    }

    fn walk<'a>(&'a self, order: Order, values: &mut Vec<&'a T>) {
        let Self::Node(n) = self else {
            return;
        };
        if order == Order::Pre {
            values.push(&n.value);
        }
        n.left.walk(order, values);
        if order == Order::In {
            values.push(&n.value);
        }
        n.right.walk(order, values);
        if order == Order::Post {
            values.push(&n.value);
        }
    }

    /// Root, left, right.
    pub fn pre_order(&self) -> Vec<&T> {
        self.traverse(Order::Pre)
    }

    /// Left, root, right. For a valid BST this is sorted.
    pub fn in_order(&self) -> Vec<&T> {
        self.traverse(Order::In)
    }

    /// Left, right, root.
    pub fn post_order(&self) -> Vec<&T> {
        self.traverse(Order::Post)
    }

    /// Iterates in order without recursion, so it is safe on degenerate
    /// trees of any depth.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self);
        iter
    }

    /// The number of values in the tree.
    pub fn size(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Node(n) => n.left.size() + 1 + n.right.size(),
        }
    }

    /// The number of nodes on the longest path from the root to a leaf.
    pub fn depth(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Node(n) => 1 + n.left.depth().max(n.right.depth()),
        }
    }

    /// Values of the nodes without children, left to right.
    pub fn list_leaves(&self) -> Vec<&T> {
        match self {
            Self::Empty => Vec::new(),
            Self::Node(n) if self.is_leaf() => vec![&n.value],
            Self::Node(n) => {
                let mut leaves = n.left.list_leaves();
                leaves.extend(n.right.list_leaves());
                leaves
            }
        }
    }

    /// The product of the leaf values. An empty tree yields one.
    pub fn multiply_leaves(&self) -> T
    where
        T: Clone + One + Mul<Output = T>,
    {
        match self {
            Self::Empty => T::one(),
            Self::Node(n) if self.is_leaf() => n.value.clone(),
            Self::Node(n) => n.left.multiply_leaves() * n.right.multiply_leaves(),
        }
    }

    /// The product of the values of nodes with at least one child.
    pub fn multiply_non_leaves(&self) -> T
    where
        T: Clone + One + Mul<Output = T>,
    {
        match self {
            Self::Empty => T::one(),
            Self::Node(_) if self.is_leaf() => T::one(),
            Self::Node(n) => {
                n.value.clone() * n.left.multiply_non_leaves() * n.right.multiply_non_leaves()
            }
        }
    }

    /// Lists each node whose value equals the last in-order value of its
    /// left subtree, i.e. its in-order predecessor. Duplicates only ever
    /// chain this way, but a node whose equal value sits deeper in another
    /// branch is not reported.
    pub fn list_duplicates(&self) -> Vec<&T>
    where
        T: PartialEq,
    {
        let Self::Node(n) = self else {
            return Vec::new();
        };

        let mut duplicates = n.left.list_duplicates();
        if get_max(&n.left) == Some(&n.value) {
            duplicates.push(&n.value);
        }
        duplicates.extend(n.right.list_duplicates());
        duplicates
    }

    /// The `k`-th largest value, counting from one. `None` when `k` is zero
    /// or larger than the tree.
    pub fn kth_largest(&self, k: usize) -> Option<&T> {
        let Self::Node(n) = self else {
            return None;
        };

        let rank = n.right.size() + 1;
        match k.cmp(&rank) {
            Ordering::Equal => Some(&n.value),
            Ordering::Greater => n.left.kth_largest(k - rank),
            Ordering::Less => n.right.kth_largest(k),
        }
    }

    /// Replaces every value with `f` applied to it, in pre-order. The shape is
    /// kept and the ordering is not re-checked, so `f` should preserve order.
    pub fn map_values<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> T,
    {
        self.map_values_with(&mut f);
    }

    fn map_values_with<F>(&mut self, f: &mut F)
    where
        F: FnMut(&T) -> T,
    {
        if let Self::Node(n) = self {
            n.value = f(&n.value);
            n.left.map_values_with(f);
            n.right.map_values_with(f);
        }
    }

    /// Rotates the right child up into the root. Returns `false`, leaving the
    /// tree as is, when there is no right child.
    ///
    /// ```text
    ///   old_root                 new_root
    ///    /    \                   /    \
    ///   x   new_root   ->    old_root   z
    ///         /  \             /  \
    ///        y    z           x    y
    /// ```
    pub fn rotate_left(&mut self) -> bool {
        let Some(mut old_root) = self.take_node() else {
            return false;
        };
        let Some(mut new_root) = old_root.right.take_node() else {
            *self = Self::Node(old_root);
            return false;
        };

        old_root.right = std::mem::take(&mut new_root.left);
        new_root.left = Box::new(Self::Node(old_root));
        *self = Self::Node(new_root);
        true
    }

    /// Rotates the left child up into the root. The mirror image of
    /// [`rotate_left`][Self::rotate_left].
    pub fn rotate_right(&mut self) -> bool {
        let Some(mut old_root) = self.take_node() else {
            return false;
        };
        let Some(mut new_root) = old_root.left.take_node() else {
            *self = Self::Node(old_root);
            return false;
        };

        old_root.left = std::mem::take(&mut new_root.right);
        new_root.right = Box::new(Self::Node(old_root));
        *self = Self::Node(new_root);
        true
    }

    /// Overwrites the root value with `item`, then moves values between the
    /// subtrees until the root is `>=` its whole left subtree and `<` its whole
    /// right subtree again.
    pub fn replace_root(&mut self, item: T)
    where
        T: Ord,
    {
        let Self::Node(Node { value, left, right }) = self else {
            *self = Self::leaf(item);
            return;
        };
        *value = item;

        loop {
            if let Some(moved) = left.extract_max_if(|max| *max > *value) {
                right.insert(moved);
            } else if let Some(moved) = right.extract_min_if(|min| *min <= *value) {
                left.insert(moved);
            } else {
                break;
            }
        }
    }

    /// Adapter that displays one value per line in pre-order, indented by two
    /// spaces per level.
    pub fn indented(&self) -> Indented<'_, T> {
        Indented(self)
    }

    /// Prints the [`indented`][Self::indented] form to standard output.
    pub fn print_tree(&self)
    where
        T: fmt::Display,
    {
        print!("{}", self.indented());
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result
    where
        T: fmt::Display,
    {
        if let Self::Node(n) = self {
            writeln!(f, "{}{}", "  ".repeat(depth), n.value)?;
            n.left.fmt_indented(f, depth + 1)?;
            n.right.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }

    fn node(&self) -> Option<&Node<T>> {
        match self {
            Self::Empty => None,
            Self::Node(n) => Some(n),
        }
    }

    /// Leaves `Empty` behind and hands back the occupied state, if any.
    fn take_node(&mut self) -> Option<Node<T>> {
        match std::mem::take(self) {
            Self::Empty => None,
            Self::Node(n) => Some(n),
        }
    }
}

/// See [`Tree::indented`].
pub struct Indented<'a, T>(&'a Tree<T>);

impl<T: fmt::Display> fmt::Display for Indented<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_indented(f, 0)
    }
}

/// In-order iterator over a [`Tree`]. Holds the path of nodes whose value
/// hasn't been yielded yet.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut tree: &'a Tree<T>) {
        while let Tree::Node(n) = tree {
            self.stack.push(n);
            tree = &n.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        self.push_left_spine(&n.right);
        Some(&n.value)
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Checks the ordering at every node against its two children only. A value
/// deeper in a subtree can still be on the wrong side of an ancestor; see
/// [`is_bst_strict`] for the full check.
pub fn is_bst<T: Ord>(tree: &Tree<T>) -> bool {
    let Tree::Node(n) = tree else {
        return true;
    };

    let left_ok = n.left.root().map_or(true, |left| n.value >= *left);
    let right_ok = n.right.root().map_or(true, |right| n.value < *right);
    left_ok && right_ok && is_bst(&n.left) && is_bst(&n.right)
}

/// Checks that every node is `>=` the maximum of its left subtree and `<` the
/// minimum of its right subtree. This is stricter than bounding only the root
/// this way and running [`is_bst`] on its subtrees: every node below is held
/// to its full subtree bounds too.
pub fn is_bst_strict<T: Ord>(tree: &Tree<T>) -> bool {
    let Tree::Node(n) = tree else {
        return true;
    };

    let left_ok = get_max(&n.left).map_or(true, |max| *max <= n.value);
    let right_ok = get_min(&n.right).map_or(true, |min| *min > n.value);
    left_ok && right_ok && is_bst_strict(&n.left) && is_bst_strict(&n.right)
}

/// The right-most value, or `None` for an empty tree.
pub fn get_max<T>(tree: &Tree<T>) -> Option<&T> {
    let n = tree.node()?;
    get_max(&n.right).or(Some(&n.value))
}

/// The left-most value, or `None` for an empty tree.
pub fn get_min<T>(tree: &Tree<T>) -> Option<&T> {
    let n = tree.node()?;
    get_min(&n.left).or(Some(&n.value))
}

/// Builds an independent tree of the same shape and values.
pub fn deep_copy<T: Clone>(tree: &Tree<T>) -> Tree<T> {
    match tree {
        Tree::Empty => Tree::Empty,
        Tree::Node(n) => Tree::branch(n.value.clone(), deep_copy(&n.left), deep_copy(&n.right)),
    }
}

/// Makes `target` equal to `source`. Nodes occupied in both trees are
/// overwritten in place; the rest are dropped or built.
pub fn copy_into<T: Clone>(source: &Tree<T>, target: &mut Tree<T>) {
    match (source, target) {
        (Tree::Empty, target) => {
            if !target.is_empty() {
                tracing::trace!("clearing a subtree missing from the source");
            }
            *target = Tree::Empty;
        }
        (Tree::Node(src), Tree::Node(dst)) => {
            dst.value.clone_from(&src.value);
            copy_into(&src.left, &mut dst.left);
            copy_into(&src.right, &mut dst.right);
        }
        (source, target) => *target = deep_copy(source),
    }
}

/// Copies the values into an [`OrderedList`] in sorted order.
pub fn flatten<T: Clone>(tree: &Tree<T>) -> OrderedList<T> {
    tree.iter().cloned().collect()
}

/// Inserts many values at once. An empty tree takes the *last* item as its
/// root; the remaining items are split by `<= root` and inserted into the
/// left and right subtrees the same way. The resulting shape generally differs
/// from inserting the items one by one.
///
/// # Examples
///
/// ```
/// use arbor::bst::{insert_all, Tree};
///
/// let mut tree = Tree::new();
/// insert_all(&mut tree, vec![1, 2, 3]);
///
/// assert_eq!(tree.pre_order(), [&3, &2, &1]);
/// ```
#[tracing::instrument(skip_all, fields(items = items.len()))]
pub fn insert_all<T: Ord>(tree: &mut Tree<T>, mut items: Vec<T>) {
    if items.is_empty() {
        return;
    }
    if tree.is_empty() {
        if let Some(root) = items.pop() {
            *tree = Tree::leaf(root);
        }
    }

    let Tree::Node(n) = tree else {
        return;
    };
    let (left, right): (Vec<T>, Vec<T>) = items.into_iter().partition(|item| *item <= n.value);
    tracing::trace!(left = left.len(), right = right.len(), "partitioned bulk insert");
    insert_all(&mut n.left, left);
    insert_all(&mut n.right, right);
}


#[cfg(test)]
mod quicktests {
    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a sorted vector.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes we hold the same multiset of values.
    fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, model: &mut Vec<T>)
    where
        T: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(x) => {
                    bst.insert(x.clone());
                    model.push(x.clone());
                    model.sort();
                }
                Op::Delete(x) => {
                    let expected = model.iter().position(|y| y == x).map(|pos| model.remove(pos));
                    assert_eq!(bst.delete(x), expected.is_some());
                }
                Op::ExtractMax => {
                    assert_eq!(bst.extract_max().ok(), model.pop());
                }
                Op::Iter => {
                    assert!(bst.iter().eq(model.iter()));
                }
            }
            assert!(is_bst_strict(bst));
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut model = Vec::new();

            do_ops(&ops, &mut tree, &mut model);
            tree.size() == model.len() && tree.in_order().into_iter().eq(model.iter())
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x);
            }

            xs.iter().all(|x| tree.contains(x))
        }
    }

    quickcheck::quickcheck! {
        fn bulk_insert_holds_the_same_values(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            insert_all(&mut tree, xs.clone());

            let mut sorted = xs;
            sorted.sort();
            is_bst_strict(&tree) && tree.iter().eq(sorted.iter())
        }
    }
}
