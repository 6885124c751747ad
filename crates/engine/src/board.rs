// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The assembled game board
//!
//! One [`Board`] is one table: it owns the trade engine, the room bus,
//! the dice sequencer, the sheet projection, and the expiry queue, and
//! routes the effects each operation produces to the right place. The
//! session layer talks to this type only.

use crate::bus::{EventReceiver, TableBus};
use crate::error::EngineError;
use crate::expiry::ExpiryQueue;
use crate::projection::SheetProjection;
use crate::sequencer::DiceSequencer;
use crate::trades::TradeEngine;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tb_adapters::{OwnershipStore, ParticipantDirectory, RevealError, RevealSink};
use tb_core::{
    BoardConfig, Clock, DiceResult, Effect, IdGen, ObjectId, OwnedObject, ParticipantId,
    RevealStage, RoomId, TableEvent, Trade, TradeId, TradeProposal, TradeStatus,
};
use tokio::task::JoinHandle;

/// External collaborators a board is assembled from
pub struct BoardDeps<S, D> {
    pub store: S,
    pub directory: D,
}

/// Reveal surface that presents stages as room bus events
#[derive(Clone)]
pub struct BusRevealSink {
    bus: TableBus,
}

impl BusRevealSink {
    pub fn new(bus: TableBus) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl RevealSink for BusRevealSink {
    async fn show(&self, viewer: ParticipantId, stage: RevealStage) -> Result<(), RevealError> {
        // A viewer who left mid-drain simply has nowhere to render
        let Some(room) = self.bus.room_of(viewer) else {
            return Ok(());
        };
        self.bus
            .publish(&room, TableEvent::DiceReveal { viewer, stage });
        Ok(())
    }
}

/// One game table: trades, dice, sheets, and the bus that fans them out
pub struct Board<S, D, K, C, I> {
    trades: TradeEngine<S, D, C, I>,
    bus: TableBus,
    sequencer: DiceSequencer<K>,
    projection: Mutex<SheetProjection>,
    expiry: Mutex<ExpiryQueue>,
    store: S,
    clock: C,
    sweep_interval: Duration,
}

impl<S, D, C, I> Board<S, D, BusRevealSink, C, I>
where
    S: OwnershipStore,
    D: ParticipantDirectory,
    C: Clock,
    I: IdGen,
{
    /// Assemble a board that presents dice reveals on the room bus
    pub fn new(deps: BoardDeps<S, D>, config: BoardConfig, clock: C, id_gen: I) -> Self {
        let bus = TableBus::new();
        let reveal = BusRevealSink::new(bus.clone());
        Self::assemble(deps, reveal, bus, config, clock, id_gen)
    }
}

impl<S, D, K, C, I> Board<S, D, K, C, I>
where
    S: OwnershipStore,
    D: ParticipantDirectory,
    K: RevealSink,
    C: Clock,
    I: IdGen,
{
    /// Assemble a board with a custom reveal surface
    pub fn with_reveal(
        deps: BoardDeps<S, D>,
        reveal: K,
        config: BoardConfig,
        clock: C,
        id_gen: I,
    ) -> Self {
        Self::assemble(deps, reveal, TableBus::new(), config, clock, id_gen)
    }

    fn assemble(
        deps: BoardDeps<S, D>,
        reveal: K,
        bus: TableBus,
        config: BoardConfig,
        clock: C,
        id_gen: I,
    ) -> Self {
        let trades = TradeEngine::new(
            deps.store.clone(),
            deps.directory,
            clock.clone(),
            id_gen,
            config.trade.ttl,
        );
        Self {
            trades,
            bus,
            sequencer: DiceSequencer::new(reveal, config.reveal),
            projection: Mutex::new(SheetProjection::new()),
            expiry: Mutex::new(ExpiryQueue::new()),
            store: deps.store,
            clock,
            sweep_interval: config.trade.sweep_interval,
        }
    }

    /// Seat a participant at a table and hand back their event stream
    ///
    /// Their sheet projection seeds from a store snapshot, and the room
    /// hears about the arrival.
    pub async fn join(
        &self,
        room: RoomId,
        participant: ParticipantId,
    ) -> Result<EventReceiver, EngineError> {
        let objects = self.store.objects_of(participant).await?;
        let receiver = self.bus.join(room.clone(), participant);
        {
            let mut projection = self.projection.lock().unwrap_or_else(|e| e.into_inner());
            projection.seed(participant, objects);
        }
        tracing::info!(%room, %participant, "participant joined");
        self.route(TableEvent::ParticipantJoined { room, participant });
        Ok(receiver)
    }

    /// Unseat a participant
    ///
    /// Their reveal lane drains and their sheet drops, but any open
    /// trade of theirs stays on the normal expiry clock.
    pub fn leave(&self, participant: ParticipantId) -> Option<RoomId> {
        let room = self.bus.leave(participant)?;
        self.sequencer.detach(participant);
        tracing::info!(%room, %participant, "participant left");
        self.route(TableEvent::ParticipantLeft {
            room: room.clone(),
            participant,
        });
        Some(room)
    }

    /// Open a trade and deliver the prompt
    pub async fn propose_trade(&self, proposal: TradeProposal) -> Result<Trade, EngineError> {
        let (trade, effects) = self.trades.propose(proposal).await?;
        self.run_effects(effects);
        Ok(trade)
    }

    /// Answer an open trade as its receiver
    pub async fn respond_trade(
        &self,
        trade_id: &TradeId,
        responder: ParticipantId,
        accept: bool,
    ) -> Result<Trade, EngineError> {
        let (trade, effects) = self.trades.respond(trade_id, responder, accept).await?;
        self.run_effects(effects);
        Ok(trade)
    }

    /// Withdraw an open trade as its sender
    pub fn cancel_trade(
        &self,
        trade_id: &TradeId,
        requester: ParticipantId,
    ) -> Result<Trade, EngineError> {
        let (trade, effects) = self.trades.cancel(trade_id, requester)?;
        self.run_effects(effects);
        Ok(trade)
    }

    /// Status of an open trade; resolved trades answer `TradeNotFound`
    pub fn trade_status(&self, trade_id: &TradeId) -> Result<TradeStatus, EngineError> {
        Ok(self.trades.status(trade_id)?)
    }

    /// Every open trade on the table
    pub fn open_trades(&self) -> Vec<Trade> {
        self.trades.open_trades()
    }

    /// Announce a roll to the room and queue its reveal
    pub fn roll_dice(&self, roller: ParticipantId, results: Vec<DiceResult>, aggregate: bool) {
        if results.is_empty() {
            return;
        }
        let Some(room) = self.bus.room_of(roller) else {
            tracing::debug!(%roller, "dice roll from outside any room dropped");
            return;
        };
        tracing::info!(%roller, dice = results.len(), aggregate, "dice roll submitted");
        self.bus
            .publish(&room, TableEvent::DiceRollAnnounced { roller });
        self.bus.publish(
            &room,
            TableEvent::DiceRollResult {
                roller,
                results: results.clone(),
                aggregate,
            },
        );
        self.sequencer.submit(roller, results, aggregate);
    }

    /// Fold an external equipment create/delete acknowledgement in
    pub fn equipment_changed(
        &self,
        participant: ParticipantId,
        object: OwnedObject,
        removed: bool,
    ) {
        self.route(TableEvent::EquipmentOwnershipChanged {
            participant,
            object,
            removed,
        });
    }

    /// Locally adjust an ammo count ahead of server confirmation
    pub fn set_ammo(&self, participant: ParticipantId, object: ObjectId, rounds: u32) -> bool {
        let mut projection = self.projection.lock().unwrap_or_else(|e| e.into_inner());
        projection.set_ammo_local(participant, object, rounds)
    }

    /// Snapshot of a participant's projected sheet
    pub fn sheet_snapshot(&self, participant: ParticipantId) -> Vec<OwnedObject> {
        self.projection
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .sheet_of(participant)
    }

    /// Resolve every open trade whose deadline has passed
    pub fn sweep_expired(&self) -> Vec<Trade> {
        let due = {
            let mut expiry = self.expiry.lock().unwrap_or_else(|e| e.into_inner());
            expiry.due(self.clock.now())
        };
        let mut expired = Vec::new();
        for trade_id in due {
            // An acceptance that won the race makes this a no-op
            if let Some((trade, effects)) = self.trades.expire(&trade_id) {
                self.run_effects(effects);
                expired.push(trade);
            }
        }
        expired
    }

    /// Drive the expiry sweep on an interval until the handle is aborted
    pub fn spawn_sweeper(self: &Arc<Self>) -> JoinHandle<()>
    where
        C: 'static,
        I: 'static,
    {
        let board = Arc::clone(self);
        let mut ticker = tokio::time::interval(self.sweep_interval);
        tokio::spawn(async move {
            loop {
                ticker.tick().await;
                let expired = board.sweep_expired();
                if !expired.is_empty() {
                    tracing::debug!(count = expired.len(), "expiry sweep resolved trades");
                }
            }
        })
    }

    /// The room bus behind this board
    pub fn bus(&self) -> &TableBus {
        &self.bus
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Emit(event) => self.route(event),
                Effect::SetExpiry { trade_id, deadline } => {
                    let mut expiry = self.expiry.lock().unwrap_or_else(|e| e.into_inner());
                    expiry.schedule(trade_id, deadline);
                }
                Effect::CancelExpiry { trade_id } => {
                    let mut expiry = self.expiry.lock().unwrap_or_else(|e| e.into_inner());
                    expiry.cancel(&trade_id);
                }
            }
        }
    }

    /// Deliver one event to its audience
    ///
    /// Trade events go to the two parties; everything else fans out to
    /// the room, keyed by whichever participant the event is about. A
    /// party outside any room just misses the delivery. Events that
    /// change a sheet fold into the projection before they go out.
    fn route(&self, event: TableEvent) {
        match &event {
            TableEvent::TradeRequested { trade, .. } => {
                let (sender, receiver) = (trade.sender, trade.receiver);
                self.bus.publish_to(receiver, event.clone());
                self.bus.publish_to(sender, event);
            }
            TableEvent::TradeResolved { trade, .. } => {
                let (sender, receiver) = (trade.sender, trade.receiver);
                {
                    let mut projection = self.projection.lock().unwrap_or_else(|e| e.into_inner());
                    projection.apply(&event);
                }
                self.bus.publish_to(sender, event.clone());
                self.bus.publish_to(receiver, event);
            }
            TableEvent::EquipmentOwnershipChanged { participant, .. } => {
                let participant = *participant;
                {
                    let mut projection = self.projection.lock().unwrap_or_else(|e| e.into_inner());
                    projection.apply(&event);
                }
                if let Some(room) = self.bus.room_of(participant) {
                    self.bus.publish(&room, event);
                }
            }
            TableEvent::DiceRollAnnounced { roller }
            | TableEvent::DiceRollResult { roller, .. } => {
                if let Some(room) = self.bus.room_of(*roller) {
                    self.bus.publish(&room, event);
                }
            }
            TableEvent::DiceReveal { viewer, .. } => {
                if let Some(room) = self.bus.room_of(*viewer) {
                    self.bus.publish(&room, event);
                }
            }
            TableEvent::ParticipantJoined { room, .. }
            | TableEvent::ParticipantLeft { room, .. } => {
                let room = room.clone();
                {
                    let mut projection = self.projection.lock().unwrap_or_else(|e| e.into_inner());
                    projection.apply(&event);
                }
                self.bus.publish(&room, event);
            }
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
