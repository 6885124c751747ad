//! tb-core: Domain types for the tabletop board realtime core
//!
//! This crate provides:
//! - A pure state machine for player-to-player trades
//! - Dice roll results, aggregation, and reveal staging
//! - Typed table events and the effects that request them
//! - Clock and ID abstractions for deterministic tests

pub mod clock;
pub mod id;

pub mod config;
pub mod error;

// Domain types (order matters for dependencies)
pub mod participant;
pub mod object;
pub mod dice;
pub mod event;
pub mod effect;
pub mod trade;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{BoardConfig, ConfigError, RevealTiming, TradeConfig};
pub use dice::{DiceResult, RevealStage, RollEntry};
pub use effect::Effect;
pub use error::TradeError;
pub use event::TableEvent;
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use object::{Ammo, ObjectId, ObjectKind, OwnedObject};
pub use participant::{ParticipantId, RoomId};
pub use trade::{ResolveReason, Trade, TradeId, TradeInput, TradeProposal, TradeStatus};
