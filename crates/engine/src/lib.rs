// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Tabletop board execution engine
//!
//! The live half of the board core: the room bus, the authoritative
//! trade table, the dice reveal sequencer, and the sheet projection,
//! wired together by [`Board`].

mod board;
mod bus;
mod error;
mod expiry;
mod projection;
mod sequencer;
mod trades;

pub use board::{Board, BoardDeps, BusRevealSink};
pub use bus::{EventReceiver, EventSender, TableBus};
pub use error::EngineError;
pub use expiry::ExpiryQueue;
pub use projection::SheetProjection;
pub use sequencer::DiceSequencer;
pub use trades::TradeEngine;
