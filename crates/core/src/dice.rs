// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dice roll results, aggregation, and reveal staging
//!
//! A submission carries one or more results. Aggregate submissions fold
//! every die into one synthetic total; plain multi-die submissions queue
//! each die as its own reveal, preserving arrival order.

use serde::{Deserialize, Serialize};

/// One numeric dice outcome with an optional narrative label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceResult {
    pub value: i64,
    pub description: Option<String>,
}

impl DiceResult {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            description: None,
        }
    }

    pub fn described(value: i64, description: impl Into<String>) -> Self {
        Self {
            value,
            description: Some(description.into()),
        }
    }
}

/// One queued reveal destined for a viewer's portrait stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollEntry {
    pub result: DiceResult,
    /// Number of source dice folded into this entry (1 unless aggregated)
    pub dice_count: usize,
}

impl RollEntry {
    pub fn single(result: DiceResult) -> Self {
        Self {
            result,
            dice_count: 1,
        }
    }
}

/// Collapse a submission into queue entries
pub fn collapse(results: Vec<DiceResult>, aggregate: bool) -> Vec<RollEntry> {
    if aggregate && results.len() > 1 {
        let value = results.iter().map(|r| r.value).sum();
        vec![RollEntry {
            result: DiceResult::new(value),
            dice_count: results.len(),
        }]
    } else {
        results.into_iter().map(RollEntry::single).collect()
    }
}

/// Stages of one reveal cycle, in delivery order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealStage {
    /// Roll-intro animation is showing
    Rolling,
    /// Numeric value is on screen
    Value { value: i64 },
    /// Narrative label joined the value
    Description { text: String },
    /// Display cleared between entries
    Cleared,
    /// Queue drained; the stream went quiet
    Idle,
}

#[cfg(test)]
#[path = "dice_tests.rs"]
mod tests;
