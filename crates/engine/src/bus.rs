// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Room bus for routing table events to connected participants
//!
//! Delivery is best-effort: a disconnected participant misses events,
//! and the authoritative state that produced them is unaffected. Each
//! member's channel preserves publish order per publisher.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tb_core::{ParticipantId, RoomId, TableEvent};
use tokio::sync::mpsc;

/// Sender for event delivery
pub type EventSender = mpsc::UnboundedSender<TableEvent>;
/// Receiver for event delivery
pub type EventReceiver = mpsc::UnboundedReceiver<TableEvent>;

struct Member {
    room: RoomId,
    sender: EventSender,
}

/// The bus routes events to the members of a room
pub struct TableBus {
    members: Arc<RwLock<HashMap<ParticipantId, Member>>>,
}

impl TableBus {
    pub fn new() -> Self {
        Self {
            members: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Join a room and receive its events
    ///
    /// A participant is in at most one room; joining again replaces the
    /// previous subscription (a reconnect takes over the slot).
    pub fn join(&self, room: RoomId, participant: ParticipantId) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut members = self.members.write().unwrap_or_else(|e| e.into_inner());
        members.insert(participant, Member { room, sender: tx });

        rx
    }

    /// Leave the bus, returning the room that was left
    pub fn leave(&self, participant: ParticipantId) -> Option<RoomId> {
        let mut members = self.members.write().unwrap_or_else(|e| e.into_inner());
        members.remove(&participant).map(|m| m.room)
    }

    /// The room a participant is currently in
    pub fn room_of(&self, participant: ParticipantId) -> Option<RoomId> {
        let members = self.members.read().unwrap_or_else(|e| e.into_inner());
        members.get(&participant).map(|m| m.room.clone())
    }

    /// Current members of a room, ordered by participant id
    pub fn members_of(&self, room: &RoomId) -> Vec<ParticipantId> {
        let members = self.members.read().unwrap_or_else(|e| e.into_inner());
        let mut ids: Vec<ParticipantId> = members
            .iter()
            .filter(|(_, m)| m.room == *room)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// Publish an event to every member of a room
    pub fn publish(&self, room: &RoomId, event: TableEvent) {
        let dead = {
            let members = self.members.read().unwrap_or_else(|e| e.into_inner());
            let mut dead = Vec::new();
            for (id, member) in members.iter() {
                if member.room == *room && member.sender.send(event.clone()).is_err() {
                    dead.push(*id);
                }
            }
            dead
        };
        self.prune(dead);
    }

    /// Deliver an event to one participant
    ///
    /// Returns whether the event reached a live subscriber.
    pub fn publish_to(&self, participant: ParticipantId, event: TableEvent) -> bool {
        let delivered = {
            let members = self.members.read().unwrap_or_else(|e| e.into_inner());
            match members.get(&participant) {
                Some(member) => member.sender.send(event).is_ok(),
                None => false,
            }
        };
        if !delivered {
            self.prune(vec![participant]);
        }
        delivered
    }

    /// Get count of connected members
    pub fn subscriber_count(&self) -> usize {
        self.members
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Drop members whose receiver is gone
    ///
    /// Re-checks the channel before removing so a fresh subscription
    /// under the same id survives a racing rejoin.
    fn prune(&self, dead: Vec<ParticipantId>) {
        if dead.is_empty() {
            return;
        }
        let mut members = self.members.write().unwrap_or_else(|e| e.into_inner());
        for id in dead {
            if members.get(&id).is_some_and(|m| m.sender.is_closed()) {
                members.remove(&id);
            }
        }
    }
}

impl Default for TableBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TableBus {
    fn clone(&self) -> Self {
        Self {
            members: Arc::clone(&self.members),
        }
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
