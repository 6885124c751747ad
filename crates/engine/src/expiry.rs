// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline tracking for open trades

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::time::Instant;
use tb_core::TradeId;

/// A scheduled trade deadline
#[derive(Debug, Clone)]
struct ExpiryEntry {
    trade_id: TradeId,
    deadline: Instant,
}

impl PartialEq for ExpiryEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.trade_id == other.trade_id
    }
}

impl Eq for ExpiryEntry {}

impl PartialOrd for ExpiryEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExpiryEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Min-heap: earliest deadline first, id as a stable tie-break
        Reverse((self.deadline, &self.trade_id.0)).cmp(&Reverse((other.deadline, &other.trade_id.0)))
    }
}

/// Tracks when open trades run out of time
///
/// Cancellation is lazy: a cancelled id stays in the heap and is
/// discarded when its deadline comes up.
pub struct ExpiryQueue {
    entries: BinaryHeap<ExpiryEntry>,
    cancelled: HashSet<TradeId>,
}

impl Default for ExpiryQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpiryQueue {
    pub fn new() -> Self {
        Self {
            entries: BinaryHeap::new(),
            cancelled: HashSet::new(),
        }
    }

    /// Arm the deadline for a trade
    pub fn schedule(&mut self, trade_id: TradeId, deadline: Instant) {
        self.cancelled.remove(&trade_id);
        self.entries.push(ExpiryEntry { trade_id, deadline });
    }

    /// Disarm a trade's deadline
    pub fn cancel(&mut self, trade_id: &TradeId) {
        self.cancelled.insert(trade_id.clone());
    }

    /// Drain every trade whose deadline has passed
    pub fn due(&mut self, now: Instant) -> Vec<TradeId> {
        let mut ready = Vec::new();

        while let Some(entry) = self.entries.peek() {
            if entry.deadline > now {
                break;
            }

            let Some(entry) = self.entries.pop() else {
                break;
            };

            // Skip cancelled entries
            if self.cancelled.remove(&entry.trade_id) {
                continue;
            }

            ready.push(entry.trade_id);
        }

        ready
    }

    /// Check if any deadline is still armed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The earliest armed deadline, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.peek().map(|entry| entry.deadline)
    }
}
