// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Participant name resolution

mod memory;

pub use memory::StaticDirectory;

use async_trait::async_trait;
use tb_core::ParticipantId;
use thiserror::Error;

/// Errors from directory lookups
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("unknown participant: {0}")]
    UnknownParticipant(ParticipantId),
}

/// Adapter for resolving participant display names
///
/// Trade proposals check their receiver exists here; prompt composition
/// falls back to a placeholder when the sender lookup fails.
#[async_trait]
pub trait ParticipantDirectory: Clone + Send + Sync + 'static {
    /// Resolve a participant's display name
    async fn resolve_name(&self, participant: ParticipantId) -> Result<String, DirectoryError>;
}
