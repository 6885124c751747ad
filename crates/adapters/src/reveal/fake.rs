// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake reveal sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{RevealError, RevealSink};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tb_core::{ParticipantId, RevealStage};

/// Recorded reveal stage
#[derive(Debug, Clone)]
pub struct RevealCall {
    pub viewer: ParticipantId,
    pub stage: RevealStage,
}

/// Fake reveal sink for testing
#[derive(Clone, Default)]
pub struct FakeRevealSink {
    calls: Arc<Mutex<Vec<RevealCall>>>,
}

impl FakeRevealSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded stages
    pub fn calls(&self) -> Vec<RevealCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Get recorded stages for one viewer
    pub fn stages_for(&self, viewer: ParticipantId) -> Vec<RevealStage> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|call| call.viewer == viewer)
            .map(|call| call.stage.clone())
            .collect()
    }
}

#[async_trait]
impl RevealSink for FakeRevealSink {
    async fn show(&self, viewer: ParticipantId, stage: RevealStage) -> Result<(), RevealError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RevealCall { viewer, stage });
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
