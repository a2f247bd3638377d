//! Bounded queue over a fixed-length ring buffer.

use std::fmt;
use std::iter::FusedIterator;

use crate::engines::ring::{RingBuffer, RingIter};
use crate::error::{Error, Result};
use crate::queue::{BoundedQueue, Queue, QueueIter};

/// Capacity used by [`CyclicQueue::default`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Fixed-capacity FIFO. `enqueue` fails with [`Error::Overflow`] once
/// `size() == capacity()`.
pub struct CyclicQueue<T> {
    ring: RingBuffer<T>,
}

impl<T> CyclicQueue<T> {
    /// Creates a queue holding at most `capacity` elements.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument`: `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = Error::check_above("capacity", capacity, 0)?;
        Ok(Self::with_capacity(capacity))
    }

    pub fn with_default_capacity() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Unchecked constructor; `capacity` must be non-zero.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            ring: RingBuffer::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::from_ring(&self.ring)
    }

    /// Appends to a queue the caller knows is not full.
    pub(crate) fn push(&mut self, item: T) {
        debug_assert!(!self.is_full());
        self.ring.push(item);
    }
}

impl<T> Queue<T> for CyclicQueue<T> {
    fn enqueue(&mut self, item: T) -> Result<()> {
        if self.ring.is_full() {
            return Err(Error::Overflow {
                capacity: self.ring.capacity(),
            });
        }
        self.ring.push(item);
        Ok(())
    }

    fn dequeue(&mut self) -> Result<T> {
        self.ring.pop().ok_or(Error::Underflow)
    }

    fn peek_first(&self) -> Result<&T> {
        self.ring.first().ok_or(Error::Empty)
    }

    fn peek_last(&self) -> Result<&T> {
        self.ring.last().ok_or(Error::Empty)
    }

    fn size(&self) -> usize {
        self.ring.len()
    }

    fn clear(&mut self) {
        self.ring.clear();
    }

    fn iter(&self) -> QueueIter<'_, T> {
        Box::new(CyclicQueue::iter(self))
    }
}

impl<T> BoundedQueue<T> for CyclicQueue<T> {
    fn capacity(&self) -> usize {
        self.ring.capacity()
    }
}

impl<T> Default for CyclicQueue<T> {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl<T: Clone> Clone for CyclicQueue<T> {
    fn clone(&self) -> Self {
        Self {
            ring: self.ring.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CyclicQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.ring, f)
    }
}

impl<T: PartialEq> PartialEq for CyclicQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ring.len() == other.ring.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for CyclicQueue<T> {}

/// Ordered traversal from `first_index`, wrapping at the end of the slots.
pub struct Iter<'a, T> {
    inner: RingIter<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn from_ring(ring: &'a RingBuffer<T>) -> Self {
        Self { inner: ring.iter() }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> IntoIterator for &'a CyclicQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Owning traversal, oldest first.
pub struct IntoIter<T> {
    ring: RingBuffer<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.ring.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ring.len(), Some(self.ring.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for CyclicQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { ring: self.ring }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for CyclicQueue<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        let err = CyclicQueue::<u8>::new(0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidArgument {
                name: "capacity",
                value: 0,
                floor: 0
            }
        ));
    }

    #[test]
    fn default_capacity() {
        let queue: CyclicQueue<u8> = CyclicQueue::default();
        assert_eq!(queue.capacity(), DEFAULT_CAPACITY);
        assert!(queue.is_empty());
    }

    #[test]
    fn overflow_only_at_capacity() {
        let mut queue = CyclicQueue::new(3).unwrap();
        for v in 0..3 {
            assert!(queue.enqueue(v).is_ok());
        }
        let err = queue.enqueue(99).unwrap_err();
        assert!(matches!(err, Error::Overflow { capacity: 3 }));
        // Failed enqueue leaves state untouched.
        assert_eq!(queue.to_vec(), vec![0, 1, 2]);
        assert_eq!(*queue.peek_last().unwrap(), 2);

        queue.dequeue().unwrap();
        queue.enqueue(3).unwrap();
        assert_eq!(queue.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn capacity_one_alternates() {
        let mut queue = CyclicQueue::new(1).unwrap();
        for v in 0..10 {
            queue.enqueue(v).unwrap();
            assert_eq!(*queue.peek_first().unwrap(), v);
            assert_eq!(*queue.peek_last().unwrap(), v);
            assert_eq!(queue.dequeue().unwrap(), v);
        }
        assert!(matches!(queue.dequeue(), Err(Error::Underflow)));
    }

    #[test]
    fn iter_is_independent_of_queue_cursors() {
        let mut queue = CyclicQueue::new(4).unwrap();
        for v in 0..4 {
            queue.enqueue(v).unwrap();
        }
        queue.dequeue().unwrap();
        queue.dequeue().unwrap();
        queue.enqueue(4).unwrap();
        let mut iter = queue.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(&2));
        let rest: Vec<_> = iter.clone().copied().collect();
        assert_eq!(rest, vec![3, 4]);
        assert_eq!(queue.size(), 3);
    }

    #[test]
    fn clear_then_reuse() {
        let mut queue = CyclicQueue::new(2).unwrap();
        queue.enqueue('a').unwrap();
        queue.enqueue('b').unwrap();
        queue.clear();
        assert!(matches!(queue.peek_first(), Err(Error::Empty)));
        assert_eq!(queue.capacity(), 2);
        queue.enqueue('c').unwrap();
        assert_eq!(queue.into_iter().collect::<String>(), "c");
    }
}
