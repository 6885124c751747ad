// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory participant directory

use super::{DirectoryError, ParticipantDirectory};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tb_core::ParticipantId;

/// Directory backed by an in-memory roster
///
/// Seeded at construction; entries can be added as participants join.
#[derive(Clone, Default)]
pub struct StaticDirectory {
    names: Arc<Mutex<HashMap<ParticipantId, String>>>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member to the roster
    pub fn with_member(self, participant: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        self.insert(participant.into(), name.into());
        self
    }

    /// Register or rename a member
    pub fn insert(&self, participant: ParticipantId, name: String) {
        self.names
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(participant, name);
    }
}

#[async_trait]
impl ParticipantDirectory for StaticDirectory {
    async fn resolve_name(&self, participant: ParticipantId) -> Result<String, DirectoryError> {
        self.names
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&participant)
            .cloned()
            .ok_or(DirectoryError::UnknownParticipant(participant))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
