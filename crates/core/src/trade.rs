// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trade negotiation state machine
//!
//! A trade is a proposed ownership transfer between two participants:
//! a swap when the sender requests a specific object back, a gift when
//! not. The machine is pure; the engine owns the trade table lock,
//! ownership checks, and effect execution. A trade leaves `Proposed`
//! exactly once and never moves again.

use crate::clock::Clock;
use crate::effect::Effect;
use crate::event::TableEvent;
use crate::object::{ObjectId, ObjectKind, OwnedObject};
use crate::participant::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Unique identifier for a trade
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeId(pub String);

impl std::fmt::Display for TradeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TradeId {
    fn from(s: String) -> Self {
        TradeId(s)
    }
}

impl From<&str> for TradeId {
    fn from(s: &str) -> Self {
        TradeId(s.to_string())
    }
}

/// The status of a trade; every status except `Proposed` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    /// Offer is in front of the receiver
    Proposed,
    /// Receiver accepted and ownership moved
    Accepted,
    /// Receiver declined, or acceptance found stale ownership
    Rejected,
    /// Sender withdrew the offer
    Cancelled,
    /// Deadline elapsed while still open
    Expired,
}

/// Why a trade resolved the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveReason {
    Accepted,
    Declined,
    Cancelled,
    Expired,
    /// Ownership changed between proposal and acceptance
    Stale,
}

/// What a sender asks for when opening a trade
#[derive(Clone, Debug)]
pub struct TradeProposal {
    pub kind: ObjectKind,
    pub sender: ParticipantId,
    pub receiver: ParticipantId,
    /// Object the sender puts on the table
    pub offered: ObjectId,
    /// Object requested back; a gift when `None`
    pub requested: Option<ObjectId>,
}

/// Inputs that can move a trade out of `Proposed`
#[derive(Clone, Debug)]
pub enum TradeInput {
    /// Receiver accepted; ownership has already moved and `updated`
    /// carries the re-homed objects
    Accept { updated: Vec<OwnedObject> },
    /// Receiver declined
    Decline,
    /// Sender withdrew the offer
    Cancel,
    /// Expiry deadline fired
    Expire,
    /// Acceptance found stale ownership; auto-reject
    Invalidate,
}

/// A proposed ownership transfer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub kind: ObjectKind,
    pub sender: ParticipantId,
    pub receiver: ParticipantId,
    /// Object the sender puts on the table
    pub offered: ObjectId,
    /// Object requested back; a gift when `None`
    pub requested: Option<ObjectId>,
    pub status: TradeStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(skip, default = "Instant::now")]
    pub expires_at: Instant,
}

// The monotonic deadline is process-local and re-defaults on parse;
// equality covers the wire fields only.
impl PartialEq for Trade {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.sender == other.sender
            && self.receiver == other.receiver
            && self.offered == other.offered
            && self.requested == other.requested
            && self.status == other.status
            && self.created_at == other.created_at
            && self.resolved_at == other.resolved_at
    }
}

impl Eq for Trade {}

impl Trade {
    /// Create a new trade in the Proposed state
    pub fn new(
        id: impl Into<TradeId>,
        proposal: TradeProposal,
        ttl: Duration,
        clock: &impl Clock,
    ) -> Self {
        Trade {
            id: id.into(),
            kind: proposal.kind,
            sender: proposal.sender,
            receiver: proposal.receiver,
            offered: proposal.offered,
            requested: proposal.requested,
            status: TradeStatus::Proposed,
            created_at: clock.wall(),
            resolved_at: None,
            expires_at: clock.now() + ttl,
        }
    }

    /// Effects that open the negotiation: arm the expiry timer and put
    /// the offer in front of the receiver
    pub fn open_effects(&self, prompt: impl Into<String>) -> Vec<Effect> {
        vec![
            Effect::SetExpiry {
                trade_id: self.id.clone(),
                deadline: self.expires_at,
            },
            Effect::Emit(TableEvent::TradeRequested {
                trade: self.clone(),
                prompt: prompt.into(),
            }),
        ]
    }

    /// Pure transition function - returns the new trade and effects
    pub fn transition(&self, input: TradeInput, clock: &impl Clock) -> (Trade, Vec<Effect>) {
        match (self.status, input) {
            // Proposed → Accepted
            (TradeStatus::Proposed, TradeInput::Accept { updated }) => {
                let trade = Trade {
                    status: TradeStatus::Accepted,
                    resolved_at: Some(clock.wall()),
                    ..self.clone()
                };
                let effects = vec![
                    Effect::CancelExpiry {
                        trade_id: self.id.clone(),
                    },
                    Effect::Emit(TableEvent::TradeResolved {
                        trade: trade.clone(),
                        accepted: true,
                        reason: ResolveReason::Accepted,
                        updated,
                    }),
                ];
                (trade, effects)
            }

            // Proposed → Rejected
            (TradeStatus::Proposed, TradeInput::Decline) => {
                self.resolve(TradeStatus::Rejected, ResolveReason::Declined, true, clock)
            }

            // Proposed → Cancelled
            (TradeStatus::Proposed, TradeInput::Cancel) => {
                self.resolve(TradeStatus::Cancelled, ResolveReason::Cancelled, true, clock)
            }

            // Proposed → Expired; the timer already fired, nothing to disarm
            (TradeStatus::Proposed, TradeInput::Expire) => {
                self.resolve(TradeStatus::Expired, ResolveReason::Expired, false, clock)
            }

            // Proposed → Rejected on stale ownership
            (TradeStatus::Proposed, TradeInput::Invalidate) => {
                self.resolve(TradeStatus::Rejected, ResolveReason::Stale, true, clock)
            }

            // Terminal statuses never move again
            _ => (self.clone(), vec![]),
        }
    }

    fn resolve(
        &self,
        status: TradeStatus,
        reason: ResolveReason,
        disarm_timer: bool,
        clock: &impl Clock,
    ) -> (Trade, Vec<Effect>) {
        let trade = Trade {
            status,
            resolved_at: Some(clock.wall()),
            ..self.clone()
        };
        let mut effects = Vec::new();
        if disarm_timer {
            effects.push(Effect::CancelExpiry {
                trade_id: self.id.clone(),
            });
        }
        effects.push(Effect::Emit(TableEvent::TradeResolved {
            trade: trade.clone(),
            accepted: false,
            reason,
            updated: vec![],
        }));
        (trade, effects)
    }

    /// Check if the trade is still open for responses
    pub fn is_open(&self) -> bool {
        matches!(self.status, TradeStatus::Proposed)
    }

    /// Check if the trade reached a terminal status
    pub fn is_terminal(&self) -> bool {
        !self.is_open()
    }

    /// A swap requests a specific object back; otherwise it is a gift
    pub fn is_swap(&self) -> bool {
        self.requested.is_some()
    }
}

#[cfg(test)]
#[path = "trade_tests.rs"]
mod tests;
