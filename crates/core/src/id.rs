// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trade id minting
//!
//! Ids come through [`IdGen`] so tests can pin them to a predictable
//! sequence while production mints UUIDs.

use crate::trade::TradeId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Mints identifiers for new trades
pub trait IdGen: Clone + Send + Sync {
    fn next(&self) -> TradeId;
}

/// UUID-based generator for production use
#[derive(Clone, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next(&self) -> TradeId {
        TradeId(uuid::Uuid::new_v4().to_string())
    }
}

/// Sequential generator for tests that assert on ids
#[derive(Clone)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("trade")
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> TradeId {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        TradeId(format!("{}-{}", self.prefix, n))
    }
}
