//! Tests for the blocking FIFO channel
//!
//! Covers direct use and the suspend/resume handshake with the scheduler,
//! including more than one consumer.

use queue_simulator_core_rs::{Channel, ProcessId, Scheduler};

#[test]
fn test_put_never_blocks_and_preserves_order() {
    let mut channel = Channel::new();
    for i in 0..1000u32 {
        assert_eq!(channel.put(i), None, "no waiter, nothing to wake");
    }
    assert_eq!(channel.len(), 1000);
    assert_eq!(channel.peak_len(), 1000);

    let consumer = ProcessId(0);
    for expected in 0..1000u32 {
        assert_eq!(channel.get(consumer), Some(expected));
    }
    assert!(channel.is_empty());
    assert_eq!(channel.total_put(), 1000);
    assert_eq!(channel.total_taken(), 1000);
}

#[test]
fn test_get_on_empty_registers_waiter() {
    let mut channel: Channel<&str> = Channel::new();
    let consumer = ProcessId(3);

    assert_eq!(channel.get(consumer), None);
    assert_eq!(channel.waiting_consumers(), 1);

    assert_eq!(channel.put("a"), Some(consumer));
    assert_eq!(channel.waiting_consumers(), 0);
    assert_eq!(channel.len(), 0, "handed-off record is not buffered");
    assert_eq!(channel.in_flight(), 1);

    assert_eq!(channel.take_delivered(consumer), Some("a"));
    assert_eq!(channel.in_flight(), 0);
}

#[test]
fn test_waiters_served_first_come_first_served() {
    let mut channel = Channel::new();
    let first = ProcessId(1);
    let second = ProcessId(2);
    let third = ProcessId(3);

    assert_eq!(channel.get(second), None);
    assert_eq!(channel.get(first), None);
    assert_eq!(channel.get(third), None);

    assert_eq!(channel.put(10), Some(second));
    assert_eq!(channel.put(20), Some(first));
    assert_eq!(channel.put(30), Some(third));
    assert_eq!(channel.put(40), None);

    // Each record goes to exactly one consumer
    assert_eq!(channel.take_delivered(first), Some(20));
    assert_eq!(channel.take_delivered(first), None);
    assert_eq!(channel.take_delivered(third), Some(30));
    assert_eq!(channel.take_delivered(second), Some(10));
    assert_eq!(channel.get(first), Some(40));
}

/// Producer (process 0) puts `count` records one time unit apart; every
/// other process is a consumer that takes a record and holds it for
/// `hold` time units before asking for the next one.
fn simulate(count: u32, consumers: usize, hold: f64) -> Vec<(usize, u32)> {
    #[derive(Clone, Copy, PartialEq)]
    enum Consumer {
        Idle,
        Waiting,
        Holding,
    }

    let producer = ProcessId(0);
    let mut scheduler = Scheduler::new();
    let mut channel: Channel<u32> = Channel::new();
    let mut states = vec![Consumer::Idle; consumers + 1];
    let mut produced = 0u32;
    let mut taken = Vec::new();

    for id in 0..=consumers {
        scheduler.schedule(ProcessId(id), 0.0).unwrap();
    }

    scheduler
        .run(|scheduler, event| {
            let id = event.process;
            if id == producer {
                if produced > 0 || scheduler.now() > 0.0 {
                    if let Some(waiter) = channel.put(produced) {
                        scheduler.schedule(waiter, 0.0)?;
                    }
                    produced += 1;
                }
                if produced < count {
                    scheduler.schedule(producer, 1.0)?;
                }
                return Ok(());
            }

            let record = match states[id.0] {
                Consumer::Waiting => channel.take_delivered(id),
                Consumer::Idle | Consumer::Holding => channel.get(id),
            };
            match record {
                Some(value) => {
                    taken.push((id.0, value));
                    states[id.0] = Consumer::Holding;
                    scheduler.schedule(id, hold)?;
                }
                None => states[id.0] = Consumer::Waiting,
            }
            Ok(())
        })
        .unwrap();

    taken
}

#[test]
fn test_single_consumer_end_to_end_fifo() {
    let taken = simulate(50, 1, 3.5);
    let values: Vec<u32> = taken.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, (0..50).collect::<Vec<_>>());
}

#[test]
fn test_multiple_consumers_each_record_once_in_order() {
    let taken = simulate(100, 3, 2.0);

    // Taken in global FIFO order, every record exactly once
    let values: Vec<u32> = taken.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, (0..100).collect::<Vec<_>>());

    // Work is actually shared
    for consumer in 1..=3 {
        assert!(taken.iter().any(|(c, _)| *c == consumer));
    }
}
