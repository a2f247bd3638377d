//! Unbounded queue built from a linked chain of fixed-size ring chunks.
//!
//! # Design
//!
//! - Outer structure: a [`LinkedQueue`] of chunks, oldest chunk first
//! - Each chunk is a [`CyclicQueue`] of `chunk_size` slots
//! - A chunk is allocated only when the newest one is full, and dropped as
//!   soon as the oldest one is emptied
//!
//! Every chunk between the oldest and the newest is full, which lets `size`
//! run in O(1) without walking the chain. An empty queue holds no chunks.

use std::fmt;
use std::iter::{Flatten, FusedIterator};

use log::trace;

use crate::engines::cyclic::CyclicQueue;
use crate::engines::linked::{self, LinkedQueue};
use crate::error::{Error, Result};
use crate::queue::{Queue, QueueIter};

/// Chunk size used by [`ChunkedQueue::default`].
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

pub struct ChunkedQueue<T> {
    chunks: LinkedQueue<CyclicQueue<T>>,
    chunk_size: usize,
}

impl<T> ChunkedQueue<T> {
    /// # Errors
    ///
    /// - `Error::InvalidArgument`: `chunk_size` is zero
    pub fn new(chunk_size: usize) -> Result<Self> {
        let chunk_size = Error::check_above("chunk_size", chunk_size, 0)?;
        Ok(Self {
            chunks: LinkedQueue::new(),
            chunk_size,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of chunks currently allocated.
    pub fn chunk_count(&self) -> usize {
        self.chunks.size()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.chunks.iter().flatten(),
            remaining: self.size(),
        }
    }

    /// Appends to the newest chunk, allocating one if it is missing or full.
    fn push(&mut self, item: T) {
        if let Ok(tail) = self.chunks.peek_last_mut() {
            if !tail.is_full() {
                tail.push(item);
                return;
            }
        }
        self.chunks
            .push_back(CyclicQueue::with_capacity(self.chunk_size))
            .push(item);
        trace!(
            "allocated chunk #{} ({} slots)",
            self.chunks.size(),
            self.chunk_size
        );
    }
}

impl<T> Queue<T> for ChunkedQueue<T> {
    fn enqueue(&mut self, item: T) -> Result<()> {
        self.push(item);
        Ok(())
    }

    fn dequeue(&mut self) -> Result<T> {
        if self.chunks.is_empty() {
            return Err(Error::Empty);
        }
        let head = self.chunks.peek_first_mut()?;
        let item = head.dequeue()?;
        if head.is_empty() {
            self.chunks.dequeue()?;
            trace!("released chunk, {} left", self.chunks.size());
        }
        Ok(item)
    }

    fn peek_first(&self) -> Result<&T> {
        self.chunks.peek_first()?.peek_first()
    }

    fn peek_last(&self) -> Result<&T> {
        self.chunks.peek_last()?.peek_last()
    }

    fn size(&self) -> usize {
        match self.chunks.size() {
            0 => 0,
            1 => self.chunks.peek_last().map_or(0, |chunk| chunk.size()),
            count => {
                let newest = self.chunks.peek_last().map_or(0, |chunk| chunk.size());
                let oldest = self.chunks.peek_first().map_or(0, |chunk| chunk.size());
                newest + oldest + (count - 2) * self.chunk_size
            }
        }
    }

    fn clear(&mut self) {
        self.chunks.clear();
    }

    fn iter(&self) -> QueueIter<'_, T> {
        Box::new(ChunkedQueue::iter(self))
    }
}

impl<T> Default for ChunkedQueue<T> {
    fn default() -> Self {
        Self {
            chunks: LinkedQueue::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl<T: Clone> Clone for ChunkedQueue<T> {
    fn clone(&self) -> Self {
        Self {
            chunks: self.chunks.clone(),
            chunk_size: self.chunk_size,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ChunkedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ChunkedQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for ChunkedQueue<T> {}

impl<T> Extend<T> for ChunkedQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for ChunkedQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::default();
        queue.extend(iter);
        queue
    }
}

/// Ordered traversal: the chunk chain in order, each chunk oldest first.
pub struct Iter<'a, T> {
    inner: Flatten<linked::Iter<'a, CyclicQueue<T>>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a ChunkedQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Owning traversal: drains each chunk in turn.
pub struct IntoIter<T> {
    inner: Flatten<linked::IntoIter<CyclicQueue<T>>>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }
}

impl<T> IntoIterator for ChunkedQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.chunks.into_iter().flatten(),
        }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for ChunkedQueue<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for ChunkedQueue<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let items = <Vec<T> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}
