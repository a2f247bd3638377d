//! Queue engines.
//!
//! Each engine trades memory footprint against throughput differently:
//!
//! - [`LinkedQueue`]: one heap node per element, strictly O(1)
//! - [`CyclicQueue`]: one fixed allocation, bounded
//! - [`DynamicCyclicQueue`]: one ring that grows and shrinks, amortized O(1)
//! - [`ChunkedQueue`]: one allocation per `chunk_size` elements, strictly O(1)

pub mod chunked;
pub mod cyclic;
pub mod dynamic_cyclic;
pub mod linked;
mod ring;

pub use chunked::{ChunkedQueue, DEFAULT_CHUNK_SIZE};
pub use cyclic::{CyclicQueue, DEFAULT_CAPACITY};
pub use dynamic_cyclic::{
    DynamicCyclicQueue, DEFAULT_INITIAL_CAPACITY, MAX_CAPACITY, MIN_INITIAL_CAPACITY,
};
pub use linked::LinkedQueue;

#[cfg(test)]
mod tests {
    use super::*;

    fn same<Q: Eq>(a: &Q, b: &Q) -> bool {
        a == b
    }

    #[test]
    fn every_engine_is_eq_over_elements() {
        let values = [3u8, 1, 4];
        assert!(same(
            &values.into_iter().collect::<LinkedQueue<_>>(),
            &values.into_iter().collect::<LinkedQueue<_>>()
        ));
        assert!(same(
            &values.into_iter().collect::<DynamicCyclicQueue<_>>(),
            &values.into_iter().collect::<DynamicCyclicQueue<_>>()
        ));
        let mut one_per_chunk = ChunkedQueue::new(1).unwrap();
        one_per_chunk.extend(values);
        assert!(same(
            &values.into_iter().collect::<ChunkedQueue<_>>(),
            &one_per_chunk
        ));

        let mut small = CyclicQueue::new(3).unwrap();
        let mut large = CyclicQueue::new(8).unwrap();
        for v in values {
            crate::Queue::enqueue(&mut small, v).unwrap();
            crate::Queue::enqueue(&mut large, v).unwrap();
        }
        assert!(same(&small, &large));
    }
}
