// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ownership and catalog store adapters
//!
//! The store is the linearization point for object ownership: transfers
//! are conditional on the expected current owner and fail with a
//! conflict when it moved. `exchange` commits both sides of a swap or
//! neither side.

mod memory;

pub use memory::MemoryOwnershipStore;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeOwnershipStore, OwnershipCall};

use async_trait::async_trait;
use tb_core::{ObjectId, OwnedObject, ParticipantId};
use thiserror::Error;

/// Errors from ownership operations
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("object not found: {0}")]
    ObjectMissing(ObjectId),
    #[error("object {object} is owned by {actual}, expected {expected}")]
    OwnerConflict {
        object: ObjectId,
        expected: ParticipantId,
        actual: ParticipantId,
    },
}

/// One conditional ownership move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub object: ObjectId,
    pub from: ParticipantId,
    pub to: ParticipantId,
}

/// Adapter for the authoritative ownership/catalog store
#[async_trait]
pub trait OwnershipStore: Clone + Send + Sync + 'static {
    /// Fetch one object record
    async fn get(&self, object: ObjectId) -> Result<OwnedObject, StoreError>;

    /// Current owner of an object
    async fn owner_of(&self, object: ObjectId) -> Result<ParticipantId, StoreError>;

    /// Everything a participant currently owns, ordered by object id
    async fn objects_of(&self, participant: ParticipantId)
        -> Result<Vec<OwnedObject>, StoreError>;

    /// Add or replace an object record
    async fn upsert(&self, object: OwnedObject) -> Result<(), StoreError>;

    /// Remove an object record, returning it
    async fn remove(&self, object: ObjectId) -> Result<OwnedObject, StoreError>;

    /// Move one object to a new owner, conditional on the expected
    /// current owner
    async fn transfer(&self, transfer: Transfer) -> Result<OwnedObject, StoreError>;

    /// Apply both sides of a swap: both commit or neither does
    async fn exchange(
        &self,
        a: Transfer,
        b: Transfer,
    ) -> Result<(OwnedObject, OwnedObject), StoreError>;
}
