//! A singly linked list addressed by position. Every element owns its
//! successor, so the list is walked from the front for every positional
//! operation.
//!
//! # Examples
//!
//! ```
//! use arbor::list::OrderedList;
//!
//! let mut list = OrderedList::from(vec![1, 2, 3]);
//! assert_eq!(list.to_string(), "[1 -> 2 -> 3]");
//!
//! // Positions past the end are rejected.
//! assert!(list.get(3).is_err());
//!
//! list.set(1, 100).unwrap();
//! assert_eq!(list.to_string(), "[1 -> 100 -> 3]");
//!
//! // Inserting at the length appends.
//! list.insert(3, 4).unwrap();
//! assert_eq!(list.pop_last(), Ok(4));
//! ```

use std::fmt;

use crate::error::{Error, Result};

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    item: T,
    next: Link<T>,
}

impl<T> Node<T> {
    fn new(item: T) -> Self {
        Self { item, next: None }
    }
}

/// A positional sequence of owned elements.
pub struct OrderedList<T> {
    head: Link<T>,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for OrderedList<T> {
    fn drop(&mut self) {
        // Unlink one node at a time so long lists don't recurse in `Box::drop`.
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<T> OrderedList<T> {
    /// Generates a new, empty `OrderedList`.
    pub fn new() -> Self {
        Self { head: None }
    }

    /// Counts the elements by walking the list.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` when the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Borrows the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.iter().nth(index).ok_or_else(|| self.out_of_range(index))
    }

    /// Overwrites the element at `index` and returns the previous one.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::list::OrderedList;
    ///
    /// let mut list = OrderedList::from(vec!["a", "b"]);
    /// assert_eq!(list.set(0, "z"), Ok("a"));
    /// assert_eq!(list.to_string(), "[z -> b]");
    /// ```
    pub fn set(&mut self, index: usize, item: T) -> Result<T> {
        let len = self.len();
        let node = self
            .link_mut(index)
            .and_then(|link| link.as_deref_mut())
            .ok_or(Error::OutOfRange { index, len })?;

        Ok(std::mem::replace(&mut node.item, item))
    }

    /// Inserts `item` so that it ends up at `index`. An `index` equal to the
    /// length appends.
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        let len = self.len();
        let link = self
            .link_mut(index)
            .ok_or(Error::OutOfRange { index, len })?;

        let next = link.take();
        *link = Some(Box::new(Node { item, next }));
        Ok(())
    }

    /// Unlinks the element at `index` and returns it.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let len = self.len();
        let link = self
            .link_mut(index)
            .ok_or(Error::OutOfRange { index, len })?;
        let node = link.take().ok_or(Error::OutOfRange { index, len })?;

        let Node { item, next } = *node;
        *link = next;
        Ok(item)
    }

    /// Removes the elements at positions `low..high`.
    pub fn remove_range(&mut self, low: usize, high: usize) -> Result<()> {
        let len = self.len();
        if low > high || high > len {
            return Err(Error::OutOfRange { index: high, len });
        }

        let link = self
            .link_mut(low)
            .ok_or(Error::OutOfRange { index: low, len })?;
        for _ in low..high {
            if let Some(node) = link.take() {
                *link = node.next;
            }
        }
        Ok(())
    }

    /// Adds `item` after the last element.
    pub fn append(&mut self, item: T) {
        *self.tail_mut() = Some(Box::new(Node::new(item)));
    }

    /// Removes and returns the last element.
    pub fn pop_last(&mut self) -> Result<T> {
        match self.len() {
            0 => Err(Error::OutOfRange { index: 0, len: 0 }),
            len => self.remove_at(len - 1),
        }
    }

    /// Removes the first element equal to `item`. Returns whether anything
    /// was removed.
    pub fn remove_first(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self.iter().position(|candidate| candidate == item) {
            Some(index) => self.remove_at(index).is_ok(),
            None => false,
        }
    }

    /// Returns `true` if any element equals `item`.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|candidate| candidate == item)
    }

    /// Builds a new list from `f` applied to every element, in order. The
    /// receiver is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::list::OrderedList;
    ///
    /// let words = OrderedList::from(vec!["Hello", "Goodbye"]);
    /// assert_eq!(words.map(|w| w.len()).to_string(), "[5 -> 7]");
    ///
    /// let empty: OrderedList<&str> = OrderedList::new();
    /// assert!(empty.map(|w| w.len()).is_empty());
    /// ```
    pub fn map<U, F>(&self, f: F) -> OrderedList<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(f).collect()
    }

    /// Iterates over borrowed elements from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Walks `index` links from the head. `None` means the list is shorter
    /// than `index`; `index == len` yields the trailing empty link.
    fn link_mut(&mut self, index: usize) -> Option<&mut Link<T>> {
        let mut link = &mut self.head;
        for _ in 0..index {
            link = &mut link.as_mut()?.next;
        }
        Some(link)
    }

    fn tail_mut(&mut self) -> &mut Link<T> {
        let mut link = &mut self.head;
        while let Some(node) = link {
            link = &mut node.next;
        }
        link
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::OutOfRange {
            index,
            len: self.len(),
        }
    }
}

/// Borrowing iterator over an [`OrderedList`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.item
        })
    }
}

impl<'a, T> IntoIterator for &'a OrderedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for OrderedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        let mut link = &mut list.head;
        for item in iter {
            let node = link.insert(Box::new(Node::new(item)));
            link = &mut node.next;
        }
        list
    }
}

impl<T> From<Vec<T>> for OrderedList<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Clone> Clone for OrderedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for OrderedList<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut mine = self.iter();
        let mut theirs = other.iter();
        loop {
            match (mine.next(), theirs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a == b => {}
                _ => return false,
            }
        }
    }
}

impl<T: Eq> Eq for OrderedList<T> {}

impl<T: fmt::Debug> fmt::Debug for OrderedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for OrderedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (position, item) in self.iter().enumerate() {
            if position > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}
