// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::directory::{DirectoryError, ParticipantDirectory};
use crate::ownership::{OwnershipStore, StoreError, Transfer};
use async_trait::async_trait;
use tb_core::{ObjectId, OwnedObject, ParticipantId};

/// Wrapper that adds tracing to any OwnershipStore
#[derive(Clone)]
pub struct TracedOwnershipStore<S> {
    inner: S,
}

impl<S> TracedOwnershipStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: OwnershipStore> OwnershipStore for TracedOwnershipStore<S> {
    async fn get(&self, object: ObjectId) -> Result<OwnedObject, StoreError> {
        let result = self.inner.get(object).await;
        tracing::trace!(%object, found = result.is_ok(), "fetched object");
        result
    }

    async fn owner_of(&self, object: ObjectId) -> Result<ParticipantId, StoreError> {
        let result = self.inner.owner_of(object).await;
        tracing::trace!(%object, owner = ?result.as_ref().ok(), "resolved owner");
        result
    }

    async fn objects_of(
        &self,
        participant: ParticipantId,
    ) -> Result<Vec<OwnedObject>, StoreError> {
        let result = self.inner.objects_of(participant).await;
        tracing::trace!(
            %participant,
            count = result.as_ref().map(|v| v.len()).ok(),
            "listed objects"
        );
        result
    }

    async fn upsert(&self, object: OwnedObject) -> Result<(), StoreError> {
        let span = tracing::info_span!("store.upsert", object = %object.id, owner = %object.owner);
        let _guard = span.enter();

        let result = self.inner.upsert(object).await;
        match &result {
            Ok(()) => tracing::debug!("stored"),
            Err(e) => tracing::error!(error = %e, "upsert failed"),
        }

        result
    }

    async fn remove(&self, object: ObjectId) -> Result<OwnedObject, StoreError> {
        let span = tracing::info_span!("store.remove", %object);
        let _guard = span.enter();

        let result = self.inner.remove(object).await;
        match &result {
            Ok(removed) => tracing::info!(owner = %removed.owner, "removed"),
            Err(e) => tracing::warn!(error = %e, "remove failed"),
        }

        result
    }

    async fn transfer(&self, transfer: Transfer) -> Result<OwnedObject, StoreError> {
        let span = tracing::info_span!(
            "store.transfer",
            object = %transfer.object,
            from = %transfer.from,
            to = %transfer.to
        );
        let _guard = span.enter();

        tracing::info!("transferring");

        let start = std::time::Instant::now();
        let result = self.inner.transfer(transfer).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => tracing::info!(
                elapsed_ms = elapsed.as_millis() as u64,
                "ownership moved"
            ),
            // Conflicts are an expected outcome when trades race
            Err(e) => tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "transfer refused"
            ),
        }

        result
    }

    async fn exchange(
        &self,
        a: Transfer,
        b: Transfer,
    ) -> Result<(OwnedObject, OwnedObject), StoreError> {
        let span = tracing::info_span!(
            "store.exchange",
            offered = %a.object,
            requested = %b.object
        );
        let _guard = span.enter();

        tracing::info!("exchanging");

        let start = std::time::Instant::now();
        let result = self.inner.exchange(a, b).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => tracing::info!(
                elapsed_ms = elapsed.as_millis() as u64,
                "ownership swapped"
            ),
            Err(e) => tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "exchange refused"
            ),
        }

        result
    }
}

/// Wrapper that adds tracing to any ParticipantDirectory
#[derive(Clone)]
pub struct TracedDirectory<D> {
    inner: D,
}

impl<D> TracedDirectory<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<D: ParticipantDirectory> ParticipantDirectory for TracedDirectory<D> {
    async fn resolve_name(&self, participant: ParticipantId) -> Result<String, DirectoryError> {
        let result = self.inner.resolve_name(participant).await;
        tracing::trace!(%participant, resolved = result.is_ok(), "looked up name");
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
