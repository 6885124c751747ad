// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects requested by the trade state machine
//!
//! The engine executes these after the owning transition commits: events
//! go to the room router, expiry changes go to the deadline queue.

use crate::event::TableEvent;
use crate::trade::TradeId;
use std::time::Instant;

/// Side effects a transition asks the engine to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver an event through the room router
    Emit(TableEvent),
    /// Arm the expiry timer for a trade
    SetExpiry { trade_id: TradeId, deadline: Instant },
    /// Disarm the expiry timer for a trade
    CancelExpiry { trade_id: TradeId },
}
