//! A general tree where each node keeps an ordered list of child trees. Like
//! [`bst::Tree`][crate::bst::Tree], every subtree is a full [`Tree`] and an
//! empty tree is the [`Empty`][Tree::Empty] variant. There is no ordering
//! among values.
//!
//! Occupied nodes never hold empty children: constructors drop them and
//! deletions remove children they empty.
//!
//! # Examples
//!
//! ```
//! use arbor::nary::Tree;
//!
//! let mut tree = Tree::with_children(1, vec![Tree::leaf(2), Tree::leaf(3)]);
//! assert_eq!(tree.height(), 2);
//!
//! // The last child moves up and the rest stay below it.
//! assert_eq!(tree.delete_root(), Some(1));
//! assert_eq!(tree, Tree::with_children(3, vec![Tree::leaf(2)]));
//! ```

use std::fmt;
use std::ops::Add;

use num_traits::Zero;
use rand::Rng;

use crate::error::{Error, Result};

/// A tree with any number of ordered children per node.
///
/// `PartialEq` compares the whole structure. [`Tree::equals`] is the looser
/// comparison that only looks at children both trees have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tree<T> {
    /// A tree holding nothing.
    Empty,
    /// A value with its children.
    Node(Node<T>),
}

/// The occupied state of a [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    value: T,
    children: Vec<Tree<T>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self::Empty
    }

    /// A tree holding only `value`.
    pub fn leaf(value: T) -> Self {
        Self::with_children(value, Vec::new())
    }

    /// A tree with `value` at the root and the given subtrees below it, in
    /// order. Empty subtrees are dropped.
    pub fn with_children(value: T, children: Vec<Self>) -> Self {
        let children = children.into_iter().filter(|c| !c.is_empty()).collect();
        Self::Node(Node { value, children })
    }

    /// Returns `true` if this tree holds no value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` if this tree is a single node.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Node(n) if n.children.is_empty())
    }

    /// The value at the root, if any.
    pub fn root(&self) -> Option<&T> {
        match self {
            Self::Empty => None,
            Self::Node(n) => Some(&n.value),
        }
    }

    /// The subtrees of the root. Empty for both a leaf and an empty tree.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Empty => &[],
            Self::Node(n) => &n.children,
        }
    }

    /// Appends `trees` after the existing children, skipping empty ones. An
    /// empty tree has no root to hang them from.
    pub fn add_subtrees(&mut self, trees: Vec<Self>) -> Result<()> {
        let Self::Node(n) = self else {
            return Err(Error::EmptyTree);
        };
        n.children.extend(trees.into_iter().filter(|t| !t.is_empty()));
        Ok(())
    }

    /// The number of values in the tree.
    pub fn size(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Node(n) => 1 + n.children.iter().map(Self::size).sum::<usize>(),
        }
    }

    /// Returns `true` if some node holds a value equal to `item`.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self {
            Self::Empty => false,
            Self::Node(n) => n.value == *item || n.children.iter().any(|c| c.contains(item)),
        }
    }

    /// Inserts `item` somewhere in the tree using the thread-local RNG. See
    /// [`insert_with`][Self::insert_with].
    pub fn insert(&mut self, item: T) {
        self.insert_with(item, &mut rand::rng());
    }

    /// Inserts `item` at a random position. An empty tree takes it as its
    /// root and a leaf takes it as its first child. Otherwise, with
    /// probability 1/3 it becomes a new last child, and with probability 2/3 it
    /// is inserted into a uniformly chosen child the same way.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::nary::Tree;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let mut tree = Tree::new();
    /// for x in 0..20 {
    ///     tree.insert_with(x, &mut rng);
    /// }
    ///
    /// assert_eq!(tree.root(), Some(&0));
    /// assert_eq!(tree.size(), 20);
    /// ```
    pub fn insert_with<R>(&mut self, item: T, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Empty => *self = Self::leaf(item),
            Self::Node(n) => {
                if n.children.is_empty() || rng.random_range(1..=3) == 3 {
                    n.children.push(Self::leaf(item));
                } else {
                    let index = rng.random_range(0..n.children.len());
                    tracing::trace!(index, "descending into a random child");
                    n.children[index].insert_with(item, rng);
                }
            }
        }
    }

    /// Removes the root value and returns it. The last child's value moves up
    /// and that child's own children are appended to the remaining ones. A
    /// single node becomes empty.
    pub fn delete_root(&mut self) -> Option<T> {
        let Self::Node(n) = self else {
            return None;
        };

        match n.children.pop() {
            None => self.take_node().map(|n| n.value),
            Some(Self::Node(last)) => {
                n.children.extend(last.children);
                Some(std::mem::replace(&mut n.value, last.value))
            }
            Some(Self::Empty) => self.delete_root(),
        }
    }

    /// Deletes the first occurrence of `item` in pre-order using
    /// [`delete_root`][Self::delete_root]. Returns whether anything was
    /// deleted.
    pub fn delete_item(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        let Self::Node(n) = self else {
            return false;
        };
        if n.value == *item {
            self.delete_root();
            return true;
        }

        n.delete_in_children(|child| child.delete_item(item))
    }

    /// Deletes the first occurrence of `item` in pre-order. Unlike
    /// [`delete_item`][Self::delete_item], the deleted node keeps its
    /// children and takes the value of the first leaf below it instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::nary::Tree;
    ///
    /// let mut tree = Tree::with_children(
    ///     1,
    ///     vec![Tree::with_children(2, vec![Tree::leaf(4)]), Tree::leaf(3)],
    /// );
    ///
    /// assert!(tree.delete_item_alt(&1));
    /// assert_eq!(
    ///     tree,
    ///     Tree::with_children(4, vec![Tree::leaf(2), Tree::leaf(3)])
    /// );
    /// ```
    pub fn delete_item_alt(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        let Self::Node(n) = self else {
            return false;
        };
        if n.value == *item {
            match n.delete_leaf_below() {
                Some(leaf) => n.value = leaf,
                None => *self = Self::Empty,
            }
            return true;
        }

        n.delete_in_children(|child| child.delete_item_alt(item))
    }

    /// Removes and returns the first leaf found depth-first, left to right.
    pub fn delete_leaf(&mut self) -> Option<T> {
        let Self::Node(n) = self else {
            return None;
        };
        if n.children.is_empty() {
            return self.take_node().map(|n| n.value);
        }
        n.delete_leaf_below()
    }

    /// Every value in pre-order: the root, then each subtree in turn.
    pub fn list_all(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.size());
        self.collect_all(&mut values);
        values
    }

    fn collect_all<'a>(&'a self, values: &mut Vec<&'a T>) {
        if let Self::Node(n) = self {
            values.push(&n.value);
            for child in &n.children {
                child.collect_all(values);
            }
        }
    }

    /// Values of the nodes without children, left to right.
    pub fn list_leaves(&self) -> Vec<&T> {
        match self {
            Self::Empty => Vec::new(),
            Self::Node(n) if n.children.is_empty() => vec![&n.value],
            Self::Node(n) => n.children.iter().flat_map(Self::list_leaves).collect(),
        }
    }

    /// Values of the nodes with at least one child, in pre-order.
    pub fn list_non_leaves(&self) -> Vec<&T> {
        match self {
            Self::Empty => Vec::new(),
            Self::Node(n) if n.children.is_empty() => Vec::new(),
            Self::Node(n) => {
                let mut values = vec![&n.value];
                values.extend(n.children.iter().flat_map(Self::list_non_leaves));
                values
            }
        }
    }

    /// The number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Node(n) => 1 + n.children.iter().map(Self::height).max().unwrap_or(0),
        }
    }

    /// Same as [`height`][Self::height], computed by folding the children's
    /// heights into a running maximum that starts at one.
    pub fn height_alt(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Node(n) => n
                .children
                .iter()
                .fold(1, |tallest, child| tallest.max(1 + child.height())),
        }
    }

    /// The average number of children of the nodes that have any. A tree
    /// without such nodes (empty, or a single node) has no branching factor.
    pub fn branching_factor(&self) -> Result<f64> {
        match self.branching_totals() {
            (_, 0) => Err(Error::NoInternalNodes),
            (children, internal) => Ok(children as f64 / internal as f64),
        }
    }

    /// Sum of the child counts of internal nodes, and the number of internal
    /// nodes.
    fn branching_totals(&self) -> (usize, usize) {
        match self {
            Self::Node(n) if !n.children.is_empty() => {
                n.children
                    .iter()
                    .map(Self::branching_totals)
                    .fold((n.children.len(), 1), |(c, i), (child_c, child_i)| {
                        (c + child_c, i + child_i)
                    })
            }
            _ => (0, 0),
        }
    }

    /// The sum of the leaf values. An empty tree sums to zero.
    pub fn sum_leaves(&self) -> T
    where
        T: Clone + Zero + Add<Output = T>,
    {
        match self {
            Self::Empty => T::zero(),
            Self::Node(n) if n.children.is_empty() => n.value.clone(),
            Self::Node(n) => n
                .children
                .iter()
                .fold(T::zero(), |sum, child| sum + child.sum_leaves()),
        }
    }

    /// Compares root values and then children pairwise.
    ///
    /// The pairing stops at the shorter list of children, so trees that only
    /// differ by extra trailing children compare equal. Use `==` for a full
    /// structural comparison.
    pub fn equals(&self, other: &Self) -> bool
    where
        T: PartialEq,
    {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Node(a), Self::Node(b)) => {
                a.value == b.value
                    && a.children
                        .iter()
                        .zip(&b.children)
                        .all(|(x, y)| x.equals(y))
            }
            _ => false,
        }
    }

    /// Values that are equal at the same position in both trees, pairing
    /// children the same way as [`equals`][Self::equals].
    pub fn common_items<'a>(&'a self, other: &Self) -> Vec<&'a T>
    where
        T: PartialEq,
    {
        let (Self::Node(a), Self::Node(b)) = (self, other) else {
            return Vec::new();
        };

        let mut common = Vec::new();
        if a.value == b.value {
            common.push(&a.value);
        }
        for (x, y) in a.children.iter().zip(&b.children) {
            common.extend(x.common_items(y));
        }
        common
    }

    /// Removes children whose value repeats their parent's. A repeated child
    /// is replaced via [`delete_root`][Self::delete_root] until its new value
    /// differs, then its own children are purged.
    pub fn purge_clones(&mut self)
    where
        T: PartialEq,
    {
        let Self::Node(n) = self else {
            return;
        };

        for child in &mut n.children {
            while child.root() == Some(&n.value) {
                child.delete_root();
            }
        }
        n.children.retain(|child| !child.is_empty());
        for child in &mut n.children {
            child.purge_clones();
        }
    }

    /// Adapter that displays one value per line in pre-order, indented by two
    /// spaces per level.
    pub fn indented(&self) -> Indented<'_, T> {
        Indented {
            tree: self,
            step: "  ",
        }
    }

    /// Prints every value on its own line, root before subtrees, without
    /// indentation.
    pub fn print_tree(&self)
    where
        T: fmt::Display,
    {
        print!("{}", self.unindented());
    }

    fn unindented(&self) -> Indented<'_, T> {
        Indented {
            tree: self,
            step: "",
        }
    }

    /// Prints the [`indented`][Self::indented] form to standard output.
    pub fn print_tree_indent(&self)
    where
        T: fmt::Display,
    {
        print!("{}", self.indented());
    }

    fn fmt_lines(&self, f: &mut fmt::Formatter<'_>, indent: &str, depth: usize) -> fmt::Result
    where
        T: fmt::Display,
    {
        if let Self::Node(n) = self {
            writeln!(f, "{}{}", indent.repeat(depth), n.value)?;
            for child in &n.children {
                child.fmt_lines(f, indent, depth + 1)?;
            }
        }
        Ok(())
    }

    fn take_node(&mut self) -> Option<Node<T>> {
        match std::mem::take(self) {
            Self::Empty => None,
            Self::Node(n) => Some(n),
        }
    }
}

impl<T> Node<T> {
    /// Runs `delete` on each child until one reports a deletion. A child left
    /// empty by it is removed.
    fn delete_in_children<F>(&mut self, delete: F) -> bool
    where
        F: FnMut(&mut Tree<T>) -> bool,
    {
        let Some(index) = self.children.iter_mut().position(delete) else {
            return false;
        };
        if self.children[index].is_empty() {
            self.children.remove(index);
        }
        true
    }

    /// Removes the first leaf under the first child.
    fn delete_leaf_below(&mut self) -> Option<T> {
        let first = self.children.first_mut()?;
        let leaf = first.delete_leaf();
        if first.is_empty() {
            self.children.remove(0);
        }
        leaf
    }
}

/// See [`Tree::indented`].
pub struct Indented<'a, T> {
    tree: &'a Tree<T>,
    step: &'static str,
}

impl<T: fmt::Display> fmt::Display for Indented<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.fmt_lines(f, self.step, 0)
    }
}

/// Number of nodes with at least one child.
pub fn count_internal_nodes<T>(tree: &Tree<T>) -> usize {
    match tree {
        Tree::Node(n) if !n.children.is_empty() => {
            1 + n.children.iter().map(count_internal_nodes).sum::<usize>()
        }
        _ => 0,
    }
}

/// Number of nodes at depth `depth` or shallower, with the root at depth one.
/// A `depth` of zero places no limit and counts the whole tree.
pub fn count_to_depth<T>(tree: &Tree<T>, depth: usize) -> usize {
    match tree {
        Tree::Empty => 0,
        Tree::Node(_) if depth == 1 => 1,
        Tree::Node(n) => {
            1 + n
                .children
                .iter()
                .map(|child| count_to_depth(child, depth.saturating_sub(1)))
                .sum::<usize>()
        }
    }
}

/// Like [`count_to_depth`], except that a `depth` of zero counts nothing.
/// Only the root is checked: the children are counted by [`count_to_depth`],
/// so a `depth` of one still reaches the whole tree.
pub fn count_to_depth_checked<T>(tree: &Tree<T>, depth: usize) -> usize {
    match tree {
        Tree::Node(n) if depth >= 1 => {
            1 + n
                .children
                .iter()
                .map(|child| count_to_depth(child, depth - 1))
                .sum::<usize>()
        }
        _ => 0,
    }
}

/// Number of nodes at depth `depth` or deeper, with the root at depth one.
pub fn count_from_depth<T>(tree: &Tree<T>, depth: usize) -> usize {
    let Tree::Node(n) = tree else {
        return 0;
    };

    usize::from(depth <= 1)
        + n.children
            .iter()
            .map(|child| count_from_depth(child, depth.saturating_sub(1)))
            .sum::<usize>()
}

/// Number of nodes holding a value equal to `item`.
pub fn count_item<T: PartialEq>(tree: &Tree<T>, item: &T) -> usize {
    match tree {
        Tree::Empty => 0,
        Tree::Node(n) => {
            usize::from(n.value == *item)
                + n.children
                    .iter()
                    .map(|child| count_item(child, item))
                    .sum::<usize>()
        }
    }
}

/// The sum of every value. An empty tree sums to zero.
pub fn sum_values<T>(tree: &Tree<T>) -> T
where
    T: Clone + Zero + Add<Output = T>,
{
    match tree {
        Tree::Empty => T::zero(),
        Tree::Node(n) => n
            .children
            .iter()
            .fold(n.value.clone(), |sum, child| sum + sum_values(child)),
    }
}

/// How many nodes are surplus copies of a value held elsewhere in the tree.
/// A value stored three times contributes two.
pub fn count_duplicates<T: PartialEq>(tree: &Tree<T>) -> usize {
    let mut seen: Vec<&T> = Vec::new();
    let mut duplicates = 0;
    for item in tree.list_all() {
        if seen.contains(&item) {
            continue;
        }
        let count = count_item(tree, item);
        if count > 1 {
            duplicates += count - 1;
            seen.push(item);
        }
    }
    duplicates
}

/// [`limit_branches`] with a limit of two.
pub fn make_binary<T>(tree: &mut Tree<T>) {
    rehome_excess_children(tree, 2);
}

/// Trims nodes with more than `limit` children. Surplus children are taken
/// off the end, last first, and appended to the first remaining child; the
/// children of a trimmed node are then trimmed the same way.
///
/// A node already within the limit is left alone together with everything
/// below it, so an over-wide node under such a node survives.
///
/// # Examples
///
/// ```
/// use arbor::nary::{limit_branches, satisfies_branching_limit, Tree};
///
/// let mut tree = Tree::with_children(0, (1..=4).map(Tree::leaf).collect());
/// limit_branches(&mut tree, 2).unwrap();
///
/// assert!(satisfies_branching_limit(&tree, 2));
/// assert_eq!(tree.list_all(), [&0, &1, &4, &3, &2]);
/// ```
pub fn limit_branches<T>(tree: &mut Tree<T>, limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(Error::ZeroBranchLimit);
    }
    rehome_excess_children(tree, limit);
    Ok(())
}

#[tracing::instrument(level = "trace", skip(tree))]
fn rehome_excess_children<T>(tree: &mut Tree<T>, limit: usize) {
    let Tree::Node(n) = tree else {
        return;
    };

    if n.children.len() <= limit {
        return;
    }

    let mut extra = n.children.split_off(limit);
    extra.reverse();
    tracing::debug!(moved = extra.len(), "re-homing children under the first child");
    // Children are never empty, so the first one can adopt.
    if let Some(Tree::Node(first)) = n.children.first_mut() {
        first.children.extend(extra);
    }
    for child in &mut n.children {
        rehome_excess_children(child, limit);
    }
}

/// Returns `true` if no node has more than two children.
pub fn is_binary<T>(tree: &Tree<T>) -> bool {
    satisfies_branching_limit(tree, 2)
}

/// Returns `true` if no node has more than `limit` children.
pub fn satisfies_branching_limit<T>(tree: &Tree<T>, limit: usize) -> bool {
    match tree {
        Tree::Empty => true,
        Tree::Node(n) => {
            n.children.len() <= limit
                && n.children
                    .iter()
                    .all(|child| satisfies_branching_limit(child, limit))
        }
    }
}

/// Pushes every subtree one level down: each node gets a single child holding
/// a copy of its value, and that child takes over the original children.
///
/// # Examples
///
/// ```
/// use arbor::nary::{deepen, Tree};
///
/// let mut tree = Tree::with_children(1, vec![Tree::leaf(2)]);
/// deepen(&mut tree);
///
/// assert_eq!(
///     tree,
///     Tree::with_children(
///         1,
///         vec![Tree::with_children(
///             1,
///             vec![Tree::with_children(2, vec![Tree::leaf(2)])]
///         )]
///     )
/// );
/// ```
pub fn deepen<T: Clone>(tree: &mut Tree<T>) {
    let Tree::Node(n) = tree else {
        return;
    };

    let mut copy = Node {
        value: n.value.clone(),
        children: std::mem::take(&mut n.children),
    };
    for child in &mut copy.children {
        deepen(child);
    }
    n.children.push(Tree::Node(copy));
}

/// Number of values equal at the same position in both trees. Counts what
/// [`Tree::common_items`] lists.
pub fn common_items_count<T: PartialEq>(a: &Tree<T>, b: &Tree<T>) -> usize {
    let (Tree::Node(x), Tree::Node(y)) = (a, b) else {
        return 0;
    };

    usize::from(x.value == y.value)
        + x.children
            .iter()
            .zip(&y.children)
            .map(|(x, y)| common_items_count(x, y))
            .sum::<usize>()
}

/// Number of nodes in `a` whose value occurs anywhere in `b`.
pub fn count_shared_items<T: PartialEq>(a: &Tree<T>, b: &Tree<T>) -> usize {
    let Tree::Node(n) = a else {
        return 0;
    };

    usize::from(b.contains(&n.value))
        + n.children
            .iter()
            .map(|child| count_shared_items(child, b))
            .sum::<usize>()
}
