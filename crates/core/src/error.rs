// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for trade operations
//!
//! Precondition violations surface synchronously to the caller; everyone
//! else learns of outcomes via bus events. `TradeNotFound` deliberately
//! covers both "never existed" and "already terminal" so callers cannot
//! probe resolution timing. A stale-ownership acceptance is not an error
//! at all: it auto-resolves the trade to rejected.

use crate::object::ObjectId;
use crate::participant::ParticipantId;
use crate::trade::TradeId;
use thiserror::Error;

/// Errors returned by trade engine operations
#[derive(Debug, Clone, Error)]
pub enum TradeError {
    #[error("participant {participant} may not act on trade {trade_id}")]
    NotAuthorized {
        trade_id: TradeId,
        participant: ParticipantId,
    },
    #[error("object {object} is not owned by participant {participant}")]
    ObjectNotOwned {
        object: ObjectId,
        participant: ParticipantId,
    },
    #[error("object {object} is already offered in an open trade")]
    ObjectAlreadyOffered { object: ObjectId },
    #[error("invalid trade target: {reason}")]
    InvalidTarget { reason: String },
    #[error("trade not found: {0}")]
    TradeNotFound(TradeId),
}

impl TradeError {
    pub fn invalid_target(reason: impl Into<String>) -> Self {
        TradeError::InvalidTarget {
            reason: reason.into(),
        }
    }
}
