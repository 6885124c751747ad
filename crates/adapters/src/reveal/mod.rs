// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reveal presentation surface
//!
//! The dice sequencer drives each roller's portrait through reveal
//! stages via this seam; the production sink forwards stages onto the
//! table bus.

mod noop;

pub use noop::NoOpRevealSink;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRevealSink, RevealCall};

use async_trait::async_trait;
use tb_core::{ParticipantId, RevealStage};
use thiserror::Error;

/// Errors from the reveal surface
#[derive(Debug, Error)]
pub enum RevealError {
    #[error("reveal surface unavailable: {0}")]
    Unavailable(String),
}

/// Adapter for presenting dice reveal stages
#[async_trait]
pub trait RevealSink: Clone + Send + Sync + 'static {
    /// Present a reveal stage on a roller's portrait
    async fn show(&self, viewer: ParticipantId, stage: RevealStage) -> Result<(), RevealError>;
}
