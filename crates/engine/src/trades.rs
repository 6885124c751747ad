// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Authoritative trade table
//!
//! Owns every open trade and linearizes status transitions under one
//! lock: the first transition wins and evicts the slot, so later calls
//! answer `TradeNotFound`. The accept path suspends on the ownership
//! store, so it claims its slot under the lock first; a claimed slot is
//! spoken for and answers `TradeNotFound` to respond/cancel, and the
//! expiry sweep skips it.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tb_adapters::{OwnershipStore, ParticipantDirectory, StoreError, Transfer};
use tb_core::{
    Clock, Effect, IdGen, ObjectId, OwnedObject, ParticipantId, Trade, TradeError, TradeId,
    TradeInput, TradeProposal, TradeStatus,
};

struct TradeSlot {
    trade: Trade,
    /// An accept is in flight; the slot is spoken for
    resolving: bool,
}

#[derive(Default)]
struct OpenTrades {
    slots: HashMap<TradeId, TradeSlot>,
    /// At most one open trade references a given offered object
    offered: HashMap<ObjectId, TradeId>,
}

impl OpenTrades {
    fn evict(&mut self, trade: &Trade) {
        self.slots.remove(&trade.id);
        self.offered.remove(&trade.offered);
    }
}

/// The authoritative table of open trades
pub struct TradeEngine<S, D, C, I> {
    store: S,
    directory: D,
    clock: C,
    id_gen: I,
    ttl: Duration,
    open: Mutex<OpenTrades>,
}

impl<S, D, C, I> TradeEngine<S, D, C, I>
where
    S: OwnershipStore,
    D: ParticipantDirectory,
    C: Clock,
    I: IdGen,
{
    /// Create a trade engine with the given proposal time-to-live
    pub fn new(store: S, directory: D, clock: C, id_gen: I, ttl: Duration) -> Self {
        Self {
            store,
            directory,
            clock,
            id_gen,
            ttl,
            open: Mutex::new(OpenTrades::default()),
        }
    }

    /// Open a trade: validate ownership, mint the id, arm the expiry
    ///
    /// Ownership is re-validated at acceptance, so a proposal that goes
    /// stale while open resolves rejected instead of failing here.
    pub async fn propose(
        &self,
        proposal: TradeProposal,
    ) -> Result<(Trade, Vec<Effect>), TradeError> {
        if proposal.sender == proposal.receiver {
            return Err(TradeError::invalid_target("cannot trade with yourself"));
        }
        if proposal.requested == Some(proposal.offered) {
            return Err(TradeError::invalid_target(
                "cannot request the offered object back",
            ));
        }
        if self.directory.resolve_name(proposal.receiver).await.is_err() {
            return Err(TradeError::invalid_target(format!(
                "unknown receiver {}",
                proposal.receiver
            )));
        }

        let offered = self.owned_by(proposal.offered, proposal.sender).await?;
        if offered.kind != proposal.kind {
            return Err(TradeError::invalid_target(format!(
                "object {} is not a {}",
                offered.id, proposal.kind
            )));
        }
        let requested = match proposal.requested {
            Some(id) => {
                let record = self.owned_by(id, proposal.receiver).await?;
                if record.kind != proposal.kind {
                    return Err(TradeError::invalid_target(format!(
                        "object {} is not a {}",
                        record.id, proposal.kind
                    )));
                }
                Some(record)
            }
            None => None,
        };

        let prompt = self
            .compose_prompt(proposal.sender, &offered, requested.as_ref())
            .await;

        let trade = {
            let mut open = self.open.lock().unwrap_or_else(|e| e.into_inner());
            if open.offered.contains_key(&proposal.offered) {
                return Err(TradeError::ObjectAlreadyOffered {
                    object: proposal.offered,
                });
            }
            let trade = Trade::new(self.id_gen.next(), proposal, self.ttl, &self.clock);
            open.offered.insert(trade.offered, trade.id.clone());
            open.slots.insert(
                trade.id.clone(),
                TradeSlot {
                    trade: trade.clone(),
                    resolving: false,
                },
            );
            trade
        };

        tracing::info!(
            trade_id = %trade.id,
            sender = %trade.sender,
            receiver = %trade.receiver,
            swap = trade.is_swap(),
            "trade proposed"
        );

        let effects = trade.open_effects(prompt);
        Ok((trade, effects))
    }

    /// Receiver's answer to an open trade
    ///
    /// Returns the resolved trade; an acceptance that found stale
    /// ownership resolves rejected rather than erroring.
    pub async fn respond(
        &self,
        trade_id: &TradeId,
        responder: ParticipantId,
        accept: bool,
    ) -> Result<(Trade, Vec<Effect>), TradeError> {
        if accept {
            self.accept(trade_id, responder).await
        } else {
            self.decline(trade_id, responder)
        }
    }

    /// Sender withdraws a still-open trade
    pub fn cancel(
        &self,
        trade_id: &TradeId,
        requester: ParticipantId,
    ) -> Result<(Trade, Vec<Effect>), TradeError> {
        let mut open = self.open.lock().unwrap_or_else(|e| e.into_inner());
        let slot = open
            .slots
            .get(trade_id)
            .filter(|slot| !slot.resolving)
            .ok_or_else(|| TradeError::TradeNotFound(trade_id.clone()))?;
        if slot.trade.sender != requester {
            return Err(TradeError::NotAuthorized {
                trade_id: trade_id.clone(),
                participant: requester,
            });
        }

        let (resolved, effects) = slot.trade.transition(TradeInput::Cancel, &self.clock);
        open.evict(&resolved);

        tracing::info!(trade_id = %resolved.id, "trade cancelled");
        Ok((resolved, effects))
    }

    /// Resolve one trade whose deadline fired
    ///
    /// Returns `None` when the trade already resolved or an acceptance
    /// claimed it; the race loser simply stands down.
    pub fn expire(&self, trade_id: &TradeId) -> Option<(Trade, Vec<Effect>)> {
        let mut open = self.open.lock().unwrap_or_else(|e| e.into_inner());
        let slot = open.slots.get(trade_id).filter(|slot| !slot.resolving)?;

        let (resolved, effects) = slot.trade.transition(TradeInput::Expire, &self.clock);
        open.evict(&resolved);

        tracing::info!(trade_id = %resolved.id, "trade expired");
        Some((resolved, effects))
    }

    /// Status of a trade still on the table
    ///
    /// Resolved trades are evicted, so this answers `TradeNotFound` for
    /// them; a reconnecting client treats that as "dismiss the prompt".
    pub fn status(&self, trade_id: &TradeId) -> Result<TradeStatus, TradeError> {
        let open = self.open.lock().unwrap_or_else(|e| e.into_inner());
        open.slots
            .get(trade_id)
            .map(|slot| slot.trade.status)
            .ok_or_else(|| TradeError::TradeNotFound(trade_id.clone()))
    }

    /// Snapshot of every open trade, ordered by id
    pub fn open_trades(&self) -> Vec<Trade> {
        let open = self.open.lock().unwrap_or_else(|e| e.into_inner());
        let mut trades: Vec<Trade> = open.slots.values().map(|slot| slot.trade.clone()).collect();
        trades.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        trades
    }

    fn decline(
        &self,
        trade_id: &TradeId,
        responder: ParticipantId,
    ) -> Result<(Trade, Vec<Effect>), TradeError> {
        let mut open = self.open.lock().unwrap_or_else(|e| e.into_inner());
        let slot = open
            .slots
            .get(trade_id)
            .filter(|slot| !slot.resolving)
            .ok_or_else(|| TradeError::TradeNotFound(trade_id.clone()))?;
        if slot.trade.receiver != responder {
            return Err(TradeError::NotAuthorized {
                trade_id: trade_id.clone(),
                participant: responder,
            });
        }

        let (resolved, effects) = slot.trade.transition(TradeInput::Decline, &self.clock);
        open.evict(&resolved);

        tracing::info!(trade_id = %resolved.id, "trade declined");
        Ok((resolved, effects))
    }

    async fn accept(
        &self,
        trade_id: &TradeId,
        responder: ParticipantId,
    ) -> Result<(Trade, Vec<Effect>), TradeError> {
        // Claim the slot before suspending; from here on the trade is
        // spoken for and no other transition can reach it.
        let claimed = {
            let mut open = self.open.lock().unwrap_or_else(|e| e.into_inner());
            let slot = open
                .slots
                .get_mut(trade_id)
                .filter(|slot| !slot.resolving)
                .ok_or_else(|| TradeError::TradeNotFound(trade_id.clone()))?;
            if slot.trade.receiver != responder {
                return Err(TradeError::NotAuthorized {
                    trade_id: trade_id.clone(),
                    participant: responder,
                });
            }
            slot.resolving = true;
            slot.trade.clone()
        };

        // The store is the linearization point for the objects: the
        // conditional transfer refuses to apply when ownership moved
        // since proposal, and the trade resolves stale instead.
        let input = match self.apply_ownership(&claimed).await {
            Ok(updated) => TradeInput::Accept { updated },
            Err(error) => {
                tracing::warn!(
                    trade_id = %claimed.id,
                    %error,
                    "acceptance found stale ownership"
                );
                TradeInput::Invalidate
            }
        };

        let (resolved, effects) = claimed.transition(input, &self.clock);
        {
            let mut open = self.open.lock().unwrap_or_else(|e| e.into_inner());
            open.evict(&resolved);
        }

        if resolved.status == TradeStatus::Accepted {
            tracing::info!(trade_id = %resolved.id, "trade accepted");
        }
        Ok((resolved, effects))
    }

    async fn apply_ownership(&self, trade: &Trade) -> Result<Vec<OwnedObject>, StoreError> {
        match trade.requested {
            Some(requested) => {
                let (offered, requested) = self
                    .store
                    .exchange(
                        Transfer {
                            object: trade.offered,
                            from: trade.sender,
                            to: trade.receiver,
                        },
                        Transfer {
                            object: requested,
                            from: trade.receiver,
                            to: trade.sender,
                        },
                    )
                    .await?;
                Ok(vec![offered, requested])
            }
            None => {
                let moved = self
                    .store
                    .transfer(Transfer {
                        object: trade.offered,
                        from: trade.sender,
                        to: trade.receiver,
                    })
                    .await?;
                Ok(vec![moved])
            }
        }
    }

    async fn owned_by(
        &self,
        object: ObjectId,
        owner: ParticipantId,
    ) -> Result<OwnedObject, TradeError> {
        match self.store.get(object).await {
            Ok(record) if record.owner == owner => Ok(record),
            _ => Err(TradeError::ObjectNotOwned {
                object,
                participant: owner,
            }),
        }
    }

    async fn compose_prompt(
        &self,
        sender: ParticipantId,
        offered: &OwnedObject,
        requested: Option<&OwnedObject>,
    ) -> String {
        let name = match self.directory.resolve_name(sender).await {
            Ok(name) => name,
            Err(error) => {
                tracing::debug!(%sender, %error, "falling back to placeholder name");
                "Someone".to_string()
            }
        };
        match requested {
            Some(wanted) => format!(
                "{} offers you {} in exchange for {}",
                name, offered.name, wanted.name
            ),
            None => format!("{} offers you {}", name, offered.name),
        }
    }
}

#[cfg(test)]
#[path = "trades_tests.rs"]
mod tests;
