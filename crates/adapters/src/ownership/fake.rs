// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake ownership store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{MemoryOwnershipStore, OwnershipStore, StoreError, Transfer};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tb_core::{ObjectId, OwnedObject, ParticipantId};

/// Recorded store call
#[derive(Debug, Clone)]
pub enum OwnershipCall {
    Get { object: ObjectId },
    OwnerOf { object: ObjectId },
    ObjectsOf { participant: ParticipantId },
    Upsert { object: ObjectId },
    Remove { object: ObjectId },
    Transfer(Transfer),
    Exchange { a: Transfer, b: Transfer },
}

/// Fake ownership store for testing
///
/// Backed by the in-memory table so conflicts arise from real state;
/// records every call for assertion.
#[derive(Clone, Default)]
pub struct FakeOwnershipStore {
    inner: MemoryOwnershipStore,
    calls: Arc<Mutex<Vec<OwnershipCall>>>,
}

impl FakeOwnershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with initial objects
    pub fn with_objects(objects: impl IntoIterator<Item = OwnedObject>) -> Self {
        Self {
            inner: MemoryOwnershipStore::with_objects(objects),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<OwnershipCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: OwnershipCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

#[async_trait]
impl OwnershipStore for FakeOwnershipStore {
    async fn get(&self, object: ObjectId) -> Result<OwnedObject, StoreError> {
        self.record(OwnershipCall::Get { object });
        self.inner.get(object).await
    }

    async fn owner_of(&self, object: ObjectId) -> Result<ParticipantId, StoreError> {
        self.record(OwnershipCall::OwnerOf { object });
        self.inner.owner_of(object).await
    }

    async fn objects_of(
        &self,
        participant: ParticipantId,
    ) -> Result<Vec<OwnedObject>, StoreError> {
        self.record(OwnershipCall::ObjectsOf { participant });
        self.inner.objects_of(participant).await
    }

    async fn upsert(&self, object: OwnedObject) -> Result<(), StoreError> {
        self.record(OwnershipCall::Upsert { object: object.id });
        self.inner.upsert(object).await
    }

    async fn remove(&self, object: ObjectId) -> Result<OwnedObject, StoreError> {
        self.record(OwnershipCall::Remove { object });
        self.inner.remove(object).await
    }

    async fn transfer(&self, transfer: Transfer) -> Result<OwnedObject, StoreError> {
        self.record(OwnershipCall::Transfer(transfer));
        self.inner.transfer(transfer).await
    }

    async fn exchange(
        &self,
        a: Transfer,
        b: Transfer,
    ) -> Result<(OwnedObject, OwnedObject), StoreError> {
        self.record(OwnershipCall::Exchange { a, b });
        self.inner.exchange(a, b).await
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
