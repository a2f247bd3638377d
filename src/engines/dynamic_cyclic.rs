//! Ring-buffer queue that grows when full and shrinks when sparse.
//!
//! Growth happens inside `enqueue` once every slot is taken: the ring is
//! normalized (oldest element moved to slot 0) and extended by half its length.
//! Shrinking happens after `dequeue` once at most a third of the slots are
//! occupied: the ring is normalized and cut by a third, never below the initial
//! capacity. The gap between the two thresholds keeps alternating
//! enqueue/dequeue sequences from resizing on every call.

use std::fmt;

use log::debug;

use crate::engines::cyclic::Iter;
use crate::engines::ring::RingBuffer;
use crate::error::{Error, Result};
use crate::queue::{Queue, QueueIter};

/// Initial capacity used by [`DynamicCyclicQueue::default`].
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;
/// The initial capacity must be strictly greater than this.
pub const MIN_INITIAL_CAPACITY: usize = 4;
/// Largest backing length the queue will allocate.
pub const MAX_CAPACITY: usize = u32::MAX as usize;

/// Unbounded FIFO with amortized O(1) operations.
pub struct DynamicCyclicQueue<T> {
    ring: RingBuffer<T>,
    initial_capacity: usize,
    max_capacity: usize,
}

impl<T> DynamicCyclicQueue<T> {
    /// # Errors
    ///
    /// - `Error::InvalidArgument`: `initial_capacity <= MIN_INITIAL_CAPACITY`
    pub fn new(initial_capacity: usize) -> Result<Self> {
        let initial_capacity =
            Error::check_above("initial_capacity", initial_capacity, MIN_INITIAL_CAPACITY)?;
        Ok(Self::build(initial_capacity, MAX_CAPACITY))
    }

    #[cfg(test)]
    pub(crate) fn with_max_capacity(initial_capacity: usize, max_capacity: usize) -> Self {
        Self::build(initial_capacity, max_capacity)
    }

    fn build(initial_capacity: usize, max_capacity: usize) -> Self {
        Self {
            ring: RingBuffer::with_capacity(initial_capacity),
            initial_capacity,
            max_capacity,
        }
    }

    /// Current length of the backing ring. Changes as the queue grows and shrinks.
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::from_ring(&self.ring)
    }

    /// Enqueues every item in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// - `Error::CapacityExhausted`: the queue cannot grow past its maximum;
    ///   the items enqueued before the failure stay in the queue
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<()> {
        for item in iter {
            self.enqueue(item)?;
        }
        Ok(())
    }

    fn grow(&mut self) -> Result<()> {
        let old = self.ring.capacity();
        let new = old.saturating_add(old / 2).min(self.max_capacity);
        if new <= old {
            return Err(Error::CapacityExhausted { capacity: old });
        }
        self.ring.resize(new);
        debug!("queue grew {} -> {} slots (size {})", old, new, self.ring.len());
        Ok(())
    }

    fn shrink_if_sparse(&mut self) {
        let old = self.ring.capacity();
        if old <= self.initial_capacity || self.ring.len() > old / 3 {
            return;
        }
        let new = (old - old / 3).max(self.initial_capacity);
        self.ring.resize(new);
        debug!("queue shrank {} -> {} slots (size {})", old, new, self.ring.len());
    }
}

impl<T> Queue<T> for DynamicCyclicQueue<T> {
    fn enqueue(&mut self, item: T) -> Result<()> {
        if self.ring.is_full() {
            self.grow()?;
        }
        self.ring.push(item);
        Ok(())
    }

    fn dequeue(&mut self) -> Result<T> {
        let item = self.ring.pop().ok_or(Error::Underflow)?;
        self.shrink_if_sparse();
        Ok(item)
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

    /// Drops every element and restores the initial capacity.
    fn clear(&mut self) {
        self.ring = RingBuffer::with_capacity(self.initial_capacity);
    }

    fn iter(&self) -> QueueIter<'_, T> {
        Box::new(DynamicCyclicQueue::iter(self))
    }
}

impl<T> Default for DynamicCyclicQueue<T> {
    fn default() -> Self {
        Self::build(DEFAULT_INITIAL_CAPACITY, MAX_CAPACITY)
    }
}

impl<T: Clone> Clone for DynamicCyclicQueue<T> {
    fn clone(&self) -> Self {
        Self {
            ring: self.ring.clone(),
            initial_capacity: self.initial_capacity,
            max_capacity: self.max_capacity,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicCyclicQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.ring, f)
    }
}

impl<T: PartialEq> PartialEq for DynamicCyclicQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ring.len() == other.ring.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DynamicCyclicQueue<T> {}

/// Truncates: items past [`MAX_CAPACITY`] are dropped. Use
/// [`DynamicCyclicQueue::try_extend`] to observe the failure.
impl<T> Extend<T> for DynamicCyclicQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            if self.enqueue(item).is_err() {
                break;
            }
        }
    }
}

impl<T> FromIterator<T> for DynamicCyclicQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::default();
        queue.extend(iter);
        queue
    }
}

impl<'a, T> IntoIterator for &'a DynamicCyclicQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Owning traversal, oldest first. Does not shrink while consuming.
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

impl<T> IntoIterator for DynamicCyclicQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { ring: self.ring }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for DynamicCyclicQueue<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for DynamicCyclicQueue<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let items = <Vec<T> as serde::Deserialize>::deserialize(deserializer)?;
        fill(Self::default(), items)
    }
}

/// Enqueues `items` into `queue`, surfacing `CapacityExhausted` as a
/// deserialization error instead of dropping the overflow.
#[cfg(feature = "serde")]
fn fill<T, E: serde::de::Error>(
    mut queue: DynamicCyclicQueue<T>,
    items: Vec<T>,
) -> std::result::Result<DynamicCyclicQueue<T>, E> {
    queue.try_extend(items).map_err(E::custom)?;
    Ok(queue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_capacity_floor() {
        for bad in [0, 2, MIN_INITIAL_CAPACITY] {
            let err = DynamicCyclicQueue::<u8>::new(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument { floor: MIN_INITIAL_CAPACITY, .. }));
        }
        let queue = DynamicCyclicQueue::<u8>::new(MIN_INITIAL_CAPACITY + 1).unwrap();
        assert_eq!(queue.capacity(), 5);
    }

    #[test]
    fn grows_by_half_when_full() {
        let mut queue = DynamicCyclicQueue::new(8).unwrap();
        for v in 0..8 {
            queue.enqueue(v).unwrap();
        }
        assert_eq!(queue.capacity(), 8);
        queue.enqueue(8).unwrap();
        assert_eq!(queue.capacity(), 12);
        assert_eq!(queue.to_vec(), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn growth_normalizes_wrapped_ring() {
        let mut queue = DynamicCyclicQueue::new(6).unwrap();
        for v in 0..6 {
            queue.enqueue(v).unwrap();
        }
        queue.dequeue().unwrap();
        queue.dequeue().unwrap();
        queue.enqueue(6).unwrap();
        queue.enqueue(7).unwrap();
        // Full and wrapped: first slot is 2.
        queue.enqueue(8).unwrap();
        assert_eq!(queue.capacity(), 9);
        assert_eq!(queue.to_vec(), (2..9).collect::<Vec<_>>());
        assert_eq!(*queue.peek_first().unwrap(), 2);
        assert_eq!(*queue.peek_last().unwrap(), 8);
    }

    #[test]
    fn shrinks_at_one_third_but_not_below_initial() {
        let mut queue = DynamicCyclicQueue::new(6).unwrap();
        for v in 0..30 {
            queue.enqueue(v).unwrap();
        }
        let peak = queue.capacity();
        assert!(peak >= 30);

        let mut shrank = false;
        let mut expected = 0;
        while !queue.is_empty() {
            let before = queue.capacity();
            assert_eq!(queue.dequeue().unwrap(), expected);
            expected += 1;
            if queue.capacity() < before {
                shrank = true;
                assert!(queue.size() <= queue.capacity());
            }
            assert!(queue.capacity() >= queue.initial_capacity());
        }
        assert!(shrank);
        assert_eq!(queue.capacity(), 6);
    }

    #[test]
    fn alternating_at_threshold_does_not_thrash() {
        let mut queue = DynamicCyclicQueue::new(8).unwrap();
        for v in 0..9 {
            queue.enqueue(v).unwrap();
        }
        assert_eq!(queue.capacity(), 12);
        for v in 9..100 {
            queue.dequeue().unwrap();
            queue.enqueue(v).unwrap();
            assert_eq!(queue.capacity(), 12);
        }
    }

    #[test]
    fn capacity_exhausted_leaves_queue_intact() {
        let mut queue = DynamicCyclicQueue::with_max_capacity(5, 7);
        for v in 0..5 {
            queue.enqueue(v).unwrap();
        }
        queue.enqueue(5).unwrap();
        queue.enqueue(6).unwrap();
        assert_eq!(queue.capacity(), 7);
        let err = queue.enqueue(7).unwrap_err();
        assert!(matches!(err, Error::CapacityExhausted { capacity: 7 }));
        assert_eq!(queue.size(), 7);
        assert_eq!(queue.to_vec(), (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn try_extend_reports_exhaustion() {
        let mut queue = DynamicCyclicQueue::with_max_capacity(5, 7);
        let err = queue.try_extend(0..10).unwrap_err();
        assert!(matches!(err, Error::CapacityExhausted { capacity: 7 }));
        assert_eq!(queue.to_vec(), (0..7).collect::<Vec<_>>());

        let mut truncated = DynamicCyclicQueue::with_max_capacity(5, 7);
        truncated.extend(0..10);
        assert_eq!(truncated, queue);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_overflow_is_an_error() {
        let queue = DynamicCyclicQueue::with_max_capacity(5, 7);
        let err = fill::<u32, serde_json::Error>(queue, (0..8).collect()).unwrap_err();
        assert_eq!(err.to_string(), "queue capacity exhausted at 7 slots");

        let queue = DynamicCyclicQueue::with_max_capacity(5, 7);
        let queue = fill::<u32, serde_json::Error>(queue, (0..7).collect()).unwrap();
        assert_eq!(queue.size(), 7);
    }

    #[test]
    fn clear_restores_initial_capacity() {
        let mut queue: DynamicCyclicQueue<u32> = (0..100).collect();
        assert!(queue.capacity() > DEFAULT_INITIAL_CAPACITY);
        queue.clear();
        assert_eq!(queue.capacity(), DEFAULT_INITIAL_CAPACITY);
        assert!(matches!(queue.dequeue(), Err(Error::Underflow)));
    }
}
