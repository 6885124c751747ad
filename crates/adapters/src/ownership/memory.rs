// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory ownership store
//!
//! Holds the authoritative object table for a running board. One mutex
//! covers the whole table, so `exchange` is both-or-neither by
//! construction.

use super::{OwnershipStore, StoreError, Transfer};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tb_core::{ObjectId, OwnedObject, ParticipantId};

/// In-memory authoritative ownership store
#[derive(Clone, Default)]
pub struct MemoryOwnershipStore {
    objects: Arc<Mutex<HashMap<ObjectId, OwnedObject>>>,
}

impl MemoryOwnershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with initial objects
    pub fn with_objects(objects: impl IntoIterator<Item = OwnedObject>) -> Self {
        let store = Self::new();
        {
            let mut table = store.objects.lock().unwrap_or_else(|e| e.into_inner());
            for object in objects {
                table.insert(object.id, object);
            }
        }
        store
    }

    fn apply_transfer(
        table: &mut HashMap<ObjectId, OwnedObject>,
        transfer: Transfer,
    ) -> Result<OwnedObject, StoreError> {
        let object = table
            .get_mut(&transfer.object)
            .ok_or(StoreError::ObjectMissing(transfer.object))?;
        if object.owner != transfer.from {
            return Err(StoreError::OwnerConflict {
                object: transfer.object,
                expected: transfer.from,
                actual: object.owner,
            });
        }
        object.owner = transfer.to;
        Ok(object.clone())
    }

    fn check_owner(
        table: &HashMap<ObjectId, OwnedObject>,
        transfer: Transfer,
    ) -> Result<(), StoreError> {
        let object = table
            .get(&transfer.object)
            .ok_or(StoreError::ObjectMissing(transfer.object))?;
        if object.owner != transfer.from {
            return Err(StoreError::OwnerConflict {
                object: transfer.object,
                expected: transfer.from,
                actual: object.owner,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl OwnershipStore for MemoryOwnershipStore {
    async fn get(&self, object: ObjectId) -> Result<OwnedObject, StoreError> {
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&object)
            .cloned()
            .ok_or(StoreError::ObjectMissing(object))
    }

    async fn owner_of(&self, object: ObjectId) -> Result<ParticipantId, StoreError> {
        self.get(object).await.map(|o| o.owner)
    }

    async fn objects_of(
        &self,
        participant: ParticipantId,
    ) -> Result<Vec<OwnedObject>, StoreError> {
        let table = self.objects.lock().unwrap_or_else(|e| e.into_inner());
        let mut owned: Vec<OwnedObject> = table
            .values()
            .filter(|o| o.owner == participant)
            .cloned()
            .collect();
        owned.sort_by_key(|o| o.id);
        Ok(owned)
    }

    async fn upsert(&self, object: OwnedObject) -> Result<(), StoreError> {
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(object.id, object);
        Ok(())
    }

    async fn remove(&self, object: ObjectId) -> Result<OwnedObject, StoreError> {
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&object)
            .ok_or(StoreError::ObjectMissing(object))
    }

    async fn transfer(&self, transfer: Transfer) -> Result<OwnedObject, StoreError> {
        let mut table = self.objects.lock().unwrap_or_else(|e| e.into_inner());
        Self::apply_transfer(&mut table, transfer)
    }

    async fn exchange(
        &self,
        a: Transfer,
        b: Transfer,
    ) -> Result<(OwnedObject, OwnedObject), StoreError> {
        let mut table = self.objects.lock().unwrap_or_else(|e| e.into_inner());

        // Validate both sides before touching either
        Self::check_owner(&table, a)?;
        Self::check_owner(&table, b)?;

        let first = Self::apply_transfer(&mut table, a)?;
        let second = Self::apply_transfer(&mut table, b)?;
        Ok((first, second))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
