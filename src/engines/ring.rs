//! Circular slot array shared by the cyclic engines.
//!
//! Invariants:
//! - `size <= slots.len()`
//! - `first` and `last` are in `0..slots.len()`
//! - for `size > 0`, stepping `size - 1` times forward from `first`
//!   (mod capacity) lands on `last`, and every visited slot is occupied
//! - every other slot is `None`
//!
//! Cursor values mean nothing while `size == 0`; callers check `size` first.

use std::fmt;
use std::iter::FusedIterator;

pub(crate) struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    size: usize,
    first: usize,
    last: usize,
}

impl<T> RingBuffer<T> {
    /// `capacity` must be non-zero; engines validate before calling.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            size: 0,
            first: 0,
            last: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.size == self.slots.len()
    }

    #[inline]
    fn increase_mod(&self, index: usize) -> usize {
        if index + 1 == self.slots.len() {
            0
        } else {
            index + 1
        }
    }

    /// Writes one past `last`. The caller guarantees the buffer is not full.
    pub(crate) fn push(&mut self, item: T) {
        debug_assert!(!self.is_full());
        if self.size == 0 {
            self.first = 0;
            self.last = 0;
        } else {
            self.last = self.increase_mod(self.last);
        }
        self.slots[self.last] = Some(item);
        self.size += 1;
    }

    /// Takes the slot at `first`, leaving it vacant.
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }
        let item = self.slots[self.first].take();
        self.first = self.increase_mod(self.first);
        self.size -= 1;
        item
    }

    pub(crate) fn first(&self) -> Option<&T> {
        if self.size == 0 {
            return None;
        }
        self.slots[self.first].as_ref()
    }

    pub(crate) fn last(&self) -> Option<&T> {
        if self.size == 0 {
            return None;
        }
        self.slots[self.last].as_ref()
    }

    /// Drops every element; the slot array keeps its length.
    pub(crate) fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.size = 0;
        self.first = 0;
        self.last = 0;
    }

    /// Rotates the slots so the oldest element sits at index 0.
    pub(crate) fn normalize(&mut self) {
        if self.first != 0 {
            self.slots.rotate_left(self.first);
        }
        self.first = 0;
        self.last = self.size.saturating_sub(1);
    }

    /// Normalizes, then sets the slot array length to `capacity`.
    ///
    /// `capacity` must be at least `len()`; only vacant tail slots are cut.
    pub(crate) fn resize(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.size && capacity > 0);
        self.normalize();
        if capacity > self.slots.len() {
            self.slots.reserve_exact(capacity - self.slots.len());
            self.slots.resize_with(capacity, || None);
        } else {
            self.slots.truncate(capacity);
            self.slots.shrink_to_fit();
        }
    }

    pub(crate) fn iter(&self) -> RingIter<'_, T> {
        RingIter {
            slots: &self.slots,
            index: self.first,
            remaining: self.size,
        }
    }
}

impl<T: Clone> Clone for RingBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            size: self.size,
            first: self.first,
            last: self.last,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Live cursor over the occupied slots, independent of the ring's own cursors.
pub(crate) struct RingIter<'a, T> {
    slots: &'a [Option<T>],
    index: usize,
    remaining: usize,
}

impl<'a, T> Iterator for RingIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.slots[self.index].as_ref();
        self.index = if self.index + 1 == self.slots.len() {
            0
        } else {
            self.index + 1
        };
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for RingIter<'_, T> {}

impl<T> FusedIterator for RingIter<'_, T> {}

impl<T> Clone for RingIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            index: self.index,
            remaining: self.remaining,
        }
    }
}
