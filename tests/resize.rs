use ringline::{ChunkedQueue, DynamicCyclicQueue, Queue};

#[test]
fn dynamic_ten_thousand_round_trip() {
    let mut queue = DynamicCyclicQueue::default();
    let initial = queue.capacity();

    for v in 0..10_000u32 {
        queue.enqueue(v).unwrap();
    }
    let peak = queue.capacity();
    assert!(peak >= 10_000);
    assert!(peak > initial);

    let mut smallest = peak;
    for expected in 0..10_000u32 {
        assert_eq!(queue.dequeue().unwrap(), expected);
        assert!(queue.capacity() >= queue.size());
        smallest = smallest.min(queue.capacity());
    }
    assert!(smallest < peak);
    assert_eq!(queue.capacity(), initial);
    assert!(queue.dequeue().unwrap_err().is_empty_queue());
}

#[test]
fn dynamic_bursts_keep_order() {
    let mut queue = DynamicCyclicQueue::new(5).unwrap();
    let mut next_in = 0u64;
    let mut next_out = 0u64;
    for burst in [100u64, 30, 500, 570, 7, 7, 1_000, 1_000] {
        if next_in - next_out < burst {
            for _ in 0..burst {
                queue.enqueue(next_in).unwrap();
                next_in += 1;
            }
        } else {
            for _ in 0..burst {
                assert_eq!(queue.dequeue().unwrap(), next_out);
                next_out += 1;
            }
        }
        assert_eq!(queue.size() as u64, next_in - next_out);
    }
}

#[test]
fn chunked_allocates_one_chunk_per_chunk_size() {
    let mut queue = ChunkedQueue::new(64).unwrap();
    for v in 0..1_000u32 {
        queue.enqueue(v).unwrap();
        assert_eq!(queue.chunk_count(), v as usize / 64 + 1);
    }
    for v in 0..1_000u32 {
        assert_eq!(queue.dequeue().unwrap(), v);
    }
    assert_eq!(queue.chunk_count(), 0);
}
