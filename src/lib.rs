//! FIFO queue engines behind one operation contract.
//!
//! Four engines trade memory footprint against throughput:
//!
//! | Engine | Storage | Capacity |
//! |---|---|---|
//! | [`LinkedQueue`] | singly-linked nodes | unbounded |
//! | [`CyclicQueue`] | fixed ring buffer | bounded |
//! | [`DynamicCyclicQueue`] | ring buffer, grows and shrinks | unbounded |
//! | [`ChunkedQueue`] | linked chain of ring chunks | unbounded |
//!
//! All of them implement [`Queue`], so they can be swapped freely, including
//! behind `Box<dyn Queue<T>>` built from a [`QueueConfig`].
//!
//! ```
//! use ringline::{ChunkedQueue, Queue};
//!
//! let mut queue = ChunkedQueue::new(2)?;
//! for v in [1, 2, 3, 4, 5] {
//!     queue.enqueue(v)?;
//! }
//! assert_eq!(queue.dequeue()?, 1);
//! assert_eq!(queue.to_vec(), vec![2, 3, 4, 5]);
//! # Ok::<(), ringline::Error>(())
//! ```
//!
//! None of the engines synchronize internally; share one across threads only
//! behind an external lock.

pub mod config;
pub mod engines;
pub mod error;
pub mod queue;

pub use config::{QueueConfig, QueueKind};
pub use engines::{ChunkedQueue, CyclicQueue, DynamicCyclicQueue, LinkedQueue};
pub use error::{Error, Result};
pub use queue::{BoundedQueue, Drain, Queue, QueueIter};
