// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op reveal sink for when no presentation surface is attached.

use super::{RevealError, RevealSink};
use async_trait::async_trait;
use tb_core::{ParticipantId, RevealStage};

/// Reveal sink that does nothing.
///
/// Used in headless deployments and when a table has no portrait view.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpRevealSink;

impl NoOpRevealSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RevealSink for NoOpRevealSink {
    async fn show(&self, _viewer: ParticipantId, _stage: RevealStage) -> Result<(), RevealError> {
        Ok(())
    }
}
