//! Blocking FIFO channel
//!
//! An unbounded first-in first-out handoff queue between processes of one
//! trial. Producers never block. A consumer that finds the channel empty is
//! registered as a waiter; the next [`Channel::put`] hands its record
//! directly to the longest-waiting consumer and returns that consumer's id
//! so the caller can schedule its wake-up.
//!
//! # Critical Invariants
//!
//! 1. **FIFO**: records leave in the order they were put
//! 2. **Exactly once**: every record is delivered to exactly one consumer
//! 3. **Fair wake-up**: waiters are served in the order they started waiting
//! 4. Buffered records and waiting consumers never coexist
//!
//! # Example
//!
//! ```rust
//! use queue_simulator_core_rs::events::ProcessId;
//! use queue_simulator_core_rs::models::Channel;
//!
//! let mut channel: Channel<u32> = Channel::new();
//! let consumer = ProcessId(1);
//!
//! // Empty: the consumer becomes a waiter
//! assert_eq!(channel.get(consumer), None);
//!
//! // The next put is handed straight to the waiter
//! assert_eq!(channel.put(7), Some(consumer));
//! assert_eq!(channel.take_delivered(consumer), Some(7));
//! ```

use crate::events::types::ProcessId;
use std::collections::VecDeque;

/// Unbounded FIFO handoff queue with suspend-on-empty consumers
#[derive(Debug)]
pub struct Channel<T> {
    /// Records waiting for a consumer
    buffer: VecDeque<T>,
    /// Consumers waiting for a record, oldest first
    waiters: VecDeque<ProcessId>,
    /// Records handed to a waiter that has not resumed yet
    delivered: VecDeque<(ProcessId, T)>,
    /// Total records put
    total_put: u64,
    /// Total records taken by consumers
    total_taken: u64,
    /// Largest buffer length observed
    peak_len: usize,
}

impl<T> Channel<T> {
    /// Create an empty channel
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::new(),
            waiters: VecDeque::new(),
            delivered: VecDeque::new(),
            total_put: 0,
            total_taken: 0,
            peak_len: 0,
        }
    }

    /// Put a record into the channel; never blocks
    ///
    /// If a consumer is waiting, the record is reserved for the
    /// longest-waiting one and its id is returned. The caller must arrange
    /// for that consumer to be resumed, which then collects the record with
    /// [`Channel::take_delivered`].
    pub fn put(&mut self, record: T) -> Option<ProcessId> {
        self.total_put += 1;
        match self.waiters.pop_front() {
            Some(waiter) => {
                self.delivered.push_back((waiter, record));
                Some(waiter)
            }
            None => {
                self.buffer.push_back(record);
                self.peak_len = self.peak_len.max(self.buffer.len());
                None
            }
        }
    }

    /// Take the oldest buffered record for `consumer`
    ///
    /// Returns `None` when the channel is empty, in which case `consumer`
    /// is registered as a waiter (once) and must suspend until it is
    /// resumed by a [`Channel::put`].
    pub fn get(&mut self, consumer: ProcessId) -> Option<T> {
        match self.buffer.pop_front() {
            Some(record) => {
                self.total_taken += 1;
                Some(record)
            }
            None => {
                if !self.waiters.contains(&consumer) {
                    self.waiters.push_back(consumer);
                }
                None
            }
        }
    }

    /// Collect the record reserved for a consumer woken by `put`
    pub fn take_delivered(&mut self, consumer: ProcessId) -> Option<T> {
        let position = self
            .delivered
            .iter()
            .position(|(waiter, _)| *waiter == consumer)?;
        let (_, record) = self.delivered.remove(position)?;
        self.total_taken += 1;
        Some(record)
    }

    /// Number of buffered records
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of consumers currently suspended on this channel
    pub fn waiting_consumers(&self) -> usize {
        self.waiters.len()
    }

    /// Records handed to a waiter that has not collected them yet
    pub fn in_flight(&self) -> usize {
        self.delivered.len()
    }

    /// Total records put since creation
    pub fn total_put(&self) -> u64 {
        self.total_put
    }

    /// Total records collected by consumers since creation
    pub fn total_taken(&self) -> u64 {
        self.total_taken
    }

    /// Largest number of records ever buffered at once
    pub fn peak_len(&self) -> usize {
        self.peak_len
    }
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}
