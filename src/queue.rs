//! The operation contract shared by every queue engine.
//!
//! All engines implement [`Queue`], so a caller written against the trait (or
//! against `Box<dyn Queue<T>>`) can swap engines without code changes.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::error::{Error, Result};

/// Boxed ordered traversal, returned by [`Queue::iter`].
pub type QueueIter<'a, T> = Box<dyn Iterator<Item = &'a T> + 'a>;

/// First-in-first-out queue contract.
///
/// Ordering is always oldest first: `dequeue`, `peek_first`, `iter`, `drain`,
/// `to_vec` and the serialized form all start from the oldest element that has
/// not been dequeued yet.
///
/// A failed call never changes the queue.
pub trait Queue<T> {
    /// Appends `item` as the newest element.
    fn enqueue(&mut self, item: T) -> Result<()>;

    /// Removes and returns the oldest element.
    fn dequeue(&mut self) -> Result<T>;

    /// Returns the oldest element without removing it.
    fn peek_first(&self) -> Result<&T>;

    /// Returns the newest element without removing it.
    fn peek_last(&self) -> Result<&T>;

    /// Number of elements currently held. O(1) for every engine.
    fn size(&self) -> usize;

    /// Drops every element and returns to the freshly constructed state.
    fn clear(&mut self);

    /// Walks the elements oldest to newest without mutating the queue.
    fn iter(&self) -> QueueIter<'_, T>;

    /// Alias for [`Queue::peek_first`].
    fn peek(&self) -> Result<&T> {
        self.peek_first()
    }

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Removes elements oldest to newest as they are visited.
    ///
    /// Equivalent to calling `dequeue` until the queue is empty. Dropping the
    /// iterator early keeps whatever has not been visited yet.
    fn drain(&mut self) -> Drain<'_, T, Self>
    where
        Self: Sized,
    {
        Drain::new(self)
    }

    /// Clones the elements into `target[start..start + size]`.
    ///
    /// Fails with [`Error::TargetTooSmall`] (and writes nothing) when the slice
    /// cannot hold every element.
    fn copy_to(&self, target: &mut [T], start: usize) -> Result<()>
    where
        T: Clone,
    {
        let required = start.saturating_add(self.size());
        if required > target.len() {
            return Err(Error::TargetTooSmall {
                required,
                available: target.len(),
            });
        }
        for (slot, item) in target[start..].iter_mut().zip(self.iter()) {
            slot.clone_from(item);
        }
        Ok(())
    }

    /// Clones the elements into a new vector, oldest first.
    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.size());
        out.extend(self.iter().cloned());
        out
    }

    /// Canonical JSON form: a flat array, oldest first.
    #[cfg(feature = "serde")]
    fn to_json(&self) -> Result<String>
    where
        T: serde::Serialize,
    {
        let items: Vec<&T> = self.iter().collect();
        Ok(serde_json::to_string(&items)?)
    }
}

/// Bounded engines also report their fixed capacity.
pub trait BoundedQueue<T>: Queue<T> {
    fn capacity(&self) -> usize;

    fn is_full(&self) -> bool {
        self.size() == self.capacity()
    }
}

impl<T, Q> Queue<T> for Box<Q>
where
    Q: Queue<T> + ?Sized,
{
    fn enqueue(&mut self, item: T) -> Result<()> {
        (**self).enqueue(item)
    }

    fn dequeue(&mut self) -> Result<T> {
        (**self).dequeue()
    }

    fn peek_first(&self) -> Result<&T> {
        (**self).peek_first()
    }

    fn peek_last(&self) -> Result<&T> {
        (**self).peek_last()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn iter(&self) -> QueueIter<'_, T> {
        (**self).iter()
    }
}

/// Draining traversal over any [`Queue`].
///
/// Each call to `next` is one `dequeue`; the queue can be inspected again as
/// soon as the iterator is dropped.
pub struct Drain<'a, T, Q>
where
    Q: Queue<T> + ?Sized,
{
    queue: &'a mut Q,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T, Q> Drain<'a, T, Q>
where
    Q: Queue<T> + ?Sized,
{
    pub fn new(queue: &'a mut Q) -> Self {
        Self {
            queue,
            _marker: PhantomData,
        }
    }
}

impl<T, Q> Iterator for Drain<'_, T, Q>
where
    Q: Queue<T> + ?Sized,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.queue.is_empty() {
            return None;
        }
        self.queue.dequeue().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.size();
        (len, Some(len))
    }
}

impl<T, Q> ExactSizeIterator for Drain<'_, T, Q> where Q: Queue<T> + ?Sized {}

impl<T, Q> FusedIterator for Drain<'_, T, Q> where Q: Queue<T> + ?Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::{CyclicQueue, LinkedQueue};

    #[test]
    fn boxed_queue_forwards_contract() {
        let mut queue: Box<dyn Queue<u32>> = Box::new(LinkedQueue::new());
        queue.enqueue(1).unwrap();
        queue.enqueue(2).unwrap();
        assert_eq!(*queue.peek().unwrap(), 1);
        assert_eq!(*queue.peek_last().unwrap(), 2);
        let drained: Vec<u32> = queue.drain().collect();
        assert_eq!(drained, vec![1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn drain_dropped_early_keeps_rest() {
        let mut queue = LinkedQueue::new();
        for v in 0..5 {
            queue.enqueue(v).unwrap();
        }
        let first_two: Vec<i32> = queue.drain().take(2).collect();
        assert_eq!(first_two, vec![0, 1]);
        assert_eq!(queue.to_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn copy_to_respects_start_and_bounds() {
        let mut queue = CyclicQueue::new(4).unwrap();
        queue.enqueue(7).unwrap();
        queue.enqueue(8).unwrap();

        let mut target = [0; 4];
        queue.copy_to(&mut target, 1).unwrap();
        assert_eq!(target, [0, 7, 8, 0]);

        let mut short = [0; 2];
        let err = queue.copy_to(&mut short, 1).unwrap_err();
        assert!(matches!(err, Error::TargetTooSmall { required: 3, available: 2 }));
        assert_eq!(short, [0, 0]);
    }

    #[test]
    fn bounded_queue_reports_full() {
        let mut queue = CyclicQueue::new(1).unwrap();
        assert!(!BoundedQueue::is_full(&queue));
        queue.enqueue("a").unwrap();
        assert!(BoundedQueue::is_full(&queue));
    }
}
