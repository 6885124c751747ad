// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Table events published on the room bus
//!
//! Delivery is best-effort to currently-connected subscribers and never
//! rolls back the authoritative state that produced the event.

use crate::dice::{DiceResult, RevealStage};
use crate::object::OwnedObject;
use crate::participant::{ParticipantId, RoomId};
use crate::trade::{ResolveReason, Trade};
use serde::{Deserialize, Serialize};

/// Events delivered to room participants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableEvent {
    // Trade events
    TradeRequested {
        trade: Trade,
        /// Human-readable offer line for the receiver's confirmation prompt
        prompt: String,
    },
    TradeResolved {
        trade: Trade,
        accepted: bool,
        reason: ResolveReason,
        /// Re-homed objects; empty unless the trade was accepted
        updated: Vec<OwnedObject>,
    },

    // Dice events
    DiceRollAnnounced {
        roller: ParticipantId,
    },
    DiceRollResult {
        roller: ParticipantId,
        results: Vec<DiceResult>,
        aggregate: bool,
    },
    DiceReveal {
        viewer: ParticipantId,
        stage: RevealStage,
    },

    // Sheet events
    EquipmentOwnershipChanged {
        participant: ParticipantId,
        object: OwnedObject,
        removed: bool,
    },

    // Room events
    ParticipantJoined {
        room: RoomId,
        participant: ParticipantId,
    },
    ParticipantLeft {
        room: RoomId,
        participant: ParticipantId,
    },
}

impl TableEvent {
    /// Get the event name for routing decisions and logs
    /// Format: "category:action"
    pub fn name(&self) -> &'static str {
        match self {
            TableEvent::TradeRequested { .. } => "trade:requested",
            TableEvent::TradeResolved { .. } => "trade:resolved",
            TableEvent::DiceRollAnnounced { .. } => "dice:announced",
            TableEvent::DiceRollResult { .. } => "dice:result",
            TableEvent::DiceReveal { .. } => "dice:reveal",
            TableEvent::EquipmentOwnershipChanged { .. } => "sheet:equipment",
            TableEvent::ParticipantJoined { .. } => "room:joined",
            TableEvent::ParticipantLeft { .. } => "room:left",
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
