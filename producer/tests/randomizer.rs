//! Test RangeRandomizer behaviour through the public API

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use producer::{Producer, ProducerError, RangeRandomizer};
use shared::{BoundedQueue, CompletionSignal, WorkerId, MAX_RANGE};

#[test]
fn test_values_stay_in_range() {
    let mut randomizer = RangeRandomizer::new(10, 20).unwrap();

    for _ in 0..10_000 {
        let value = randomizer.get_next();
        assert!((10..=20).contains(&value), "{value} outside [10, 20]");
    }
}

#[test]
fn test_every_value_eventually_drawn() {
    let mut randomizer = RangeRandomizer::up_to(50).unwrap();
    let seen: HashSet<u32> = (0..20_000).map(|_| randomizer.get_next()).collect();

    assert_eq!(seen.len(), 50, "small range should be fully covered");
}

#[test]
fn test_full_range_is_accepted() {
    let mut randomizer = RangeRandomizer::up_to(MAX_RANGE).unwrap();
    assert_eq!(randomizer.range(), (1, MAX_RANGE));

    let value = randomizer.get_next();
    assert!((1..=MAX_RANGE).contains(&value));
}

#[test]
fn test_empty_range_rejected() {
    match RangeRandomizer::new(7, 3) {
        Err(ProducerError::InvalidRange { first, last }) => assert_eq!((first, last), (7, 3)),
        other => panic!("expected InvalidRange, got {other:?}"),
    }
}

#[test]
fn test_seeded_producers_are_independent() {
    // Same seed gives the same stream; each producer owns its own generator
    let mut a = RangeRandomizer::with_seed(1, 1_000, 99).unwrap();
    let mut b = a.clone();
    let stream_a: Vec<u32> = (0..32).map(|_| a.get_next()).collect();
    let stream_b: Vec<u32> = (0..32).map(|_| b.get_next()).collect();
    assert_eq!(stream_a, stream_b);
}

#[test]
fn test_producer_fills_queue_until_completion() {
    let signal = Arc::new(CompletionSignal::new());
    let queue = Arc::new(BoundedQueue::new(16).unwrap());

    let worker = {
        let (queue, signal) = (Arc::clone(&queue), Arc::clone(&signal));
        thread::spawn(move || {
            let source = RangeRandomizer::up_to(100).unwrap();
            Producer::new(WorkerId::Producer(1), source).run(&queue, &signal)
        })
    };

    let mut drained = Vec::new();
    while drained.len() < 40 {
        drained.push(queue.pop(&signal).unwrap());
    }
    signal.request_completion();

    let stats = worker.join().unwrap();
    assert!(stats.produced >= 40);
    assert!(drained.iter().all(|v| (1..=100).contains(v)));
    assert!(queue.high_water_mark() <= 16);
}
