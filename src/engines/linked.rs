//! Unbounded queue over singly-linked heap nodes.
//!
//! The queue owns the whole chain from `oldest` to `newest`; nodes carry no
//! back-references. Nodes are leaked boxes while linked and are reclaimed with
//! `Box::from_raw` when unlinked.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::{Error, Result};
use crate::queue::{Queue, QueueIter};

struct Node<T> {
    value: T,
    next: Option<NonNull<Node<T>>>,
}

pub struct LinkedQueue<T> {
    oldest: Option<NonNull<Node<T>>>,
    newest: Option<NonNull<Node<T>>>,
    size: usize,
    _owns: PhantomData<Box<Node<T>>>,
}

// The raw links are uniquely owned by the queue.
unsafe impl<T: Send> Send for LinkedQueue<T> {}
unsafe impl<T: Sync> Sync for LinkedQueue<T> {}

impl<T> LinkedQueue<T> {
    pub const fn new() -> Self {
        Self {
            oldest: None,
            newest: None,
            size: 0,
            _owns: PhantomData,
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cursor: self.oldest,
            remaining: self.size,
            _marker: PhantomData,
        }
    }

    /// Mutable access to the oldest element.
    pub fn peek_first_mut(&mut self) -> Result<&mut T> {
        match self.oldest {
            // SAFETY: the node is linked, hence alive, and `&mut self` is unique.
            Some(node) => Ok(unsafe { &mut (*node.as_ptr()).value }),
            None => Err(Error::Empty),
        }
    }

    /// Mutable access to the newest element.
    pub fn peek_last_mut(&mut self) -> Result<&mut T> {
        match self.newest {
            // SAFETY: as in `peek_first_mut`.
            Some(node) => Ok(unsafe { &mut (*node.as_ptr()).value }),
            None => Err(Error::Empty),
        }
    }

    /// Appends `item` and returns a handle to it. Never fails.
    pub(crate) fn push_back(&mut self, item: T) -> &mut T {
        let node = NonNull::from(Box::leak(Box::new(Node {
            value: item,
            next: None,
        })));
        match self.newest {
            // SAFETY: `tail` is the live newest node; nothing else borrows it.
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
            None => self.oldest = Some(node),
        }
        self.newest = Some(node);
        self.size += 1;
        // SAFETY: the node was just linked and `&mut self` is unique.
        unsafe { &mut (*node.as_ptr()).value }
    }

    fn pop_node(&mut self) -> Option<Box<Node<T>>> {
        let head = self.oldest?;
        // SAFETY: `head` came from `Box::leak` in `push_back` and is unlinked here,
        // so ownership returns to this box exactly once.
        let node = unsafe { Box::from_raw(head.as_ptr()) };
        self.oldest = node.next;
        if self.oldest.is_none() {
            self.newest = None;
        }
        self.size -= 1;
        Some(node)
    }
}

impl<T> Queue<T> for LinkedQueue<T> {
    fn enqueue(&mut self, item: T) -> Result<()> {
        self.push_back(item);
        Ok(())
    }

    fn dequeue(&mut self) -> Result<T> {
        self.pop_node().map(|node| node.value).ok_or(Error::Underflow)
    }

    fn peek_first(&self) -> Result<&T> {
        match self.oldest {
            // SAFETY: linked nodes live as long as `&self`.
            Some(node) => Ok(unsafe { &(*node.as_ptr()).value }),
            None => Err(Error::Empty),
        }
    }

    fn peek_last(&self) -> Result<&T> {
        match self.newest {
            // SAFETY: linked nodes live as long as `&self`.
            Some(node) => Ok(unsafe { &(*node.as_ptr()).value }),
            None => Err(Error::Empty),
        }
    }

    fn size(&self) -> usize {
        self.size
    }

    fn clear(&mut self) {
        // Iterative so that long chains do not recurse on drop.
        while self.pop_node().is_some() {}
    }

    fn iter(&self) -> QueueIter<'_, T> {
        Box::new(LinkedQueue::iter(self))
    }
}

impl<T> Drop for LinkedQueue<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for LinkedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedQueue<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedQueue<T> {}

impl<T> Extend<T> for LinkedQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for LinkedQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

/// Ordered traversal following the node chain.
pub struct Iter<'a, T> {
    cursor: Option<NonNull<Node<T>>>,
    remaining: usize,
    _marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.cursor?;
        // SAFETY: the queue is borrowed for `'a`, so every linked node stays alive.
        let node = unsafe { &*node.as_ptr() };
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> IntoIterator for &'a LinkedQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Owning traversal, oldest first.
pub struct IntoIter<T> {
    queue: LinkedQueue<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.dequeue().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.size, Some(self.queue.size))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { queue: self }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for LinkedQueue<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for LinkedQueue<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let items = <Vec<T> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}
