// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-participant sheet projection
//!
//! A read model of who holds what, fed by the same events the bus
//! delivers to clients. Trade-affecting fields only ever change on a
//! confirmed event; ammo counts may be edited locally and reconcile
//! when the confirmed record arrives.

use std::collections::HashMap;
use tb_core::{ObjectId, OwnedObject, ParticipantId, TableEvent};

/// Event-fed mirror of each participant's equipment sheet
#[derive(Debug, Default, Clone)]
pub struct SheetProjection {
    sheets: HashMap<ParticipantId, HashMap<ObjectId, OwnedObject>>,
}

impl SheetProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a participant's sheet with a store snapshot
    pub fn seed(&mut self, participant: ParticipantId, objects: Vec<OwnedObject>) {
        let sheet = objects
            .into_iter()
            .map(|object| (object.id, object))
            .collect();
        self.sheets.insert(participant, sheet);
    }

    /// Fold one confirmed event into the projection
    pub fn apply(&mut self, event: &TableEvent) {
        match event {
            TableEvent::TradeResolved {
                accepted: true,
                updated,
                ..
            } => {
                for object in updated {
                    self.rehome(object);
                }
            }
            TableEvent::EquipmentOwnershipChanged {
                participant,
                object,
                removed,
            } => {
                if *removed {
                    if let Some(sheet) = self.sheets.get_mut(participant) {
                        sheet.remove(&object.id);
                    }
                } else {
                    self.rehome(object);
                }
            }
            TableEvent::ParticipantJoined { participant, .. } => {
                self.sheets.entry(*participant).or_default();
            }
            TableEvent::ParticipantLeft { participant, .. } => {
                self.sheets.remove(participant);
            }
            _ => {}
        }
    }

    /// Locally adjust a weapon's ammo count, clamped to its maximum
    ///
    /// Returns false when the object is unknown or carries no ammo. The
    /// next confirmed record for the object overwrites this edit.
    pub fn set_ammo_local(
        &mut self,
        participant: ParticipantId,
        object: ObjectId,
        rounds: u32,
    ) -> bool {
        let Some(record) = self
            .sheets
            .get_mut(&participant)
            .and_then(|sheet| sheet.get_mut(&object))
        else {
            return false;
        };
        match record.ammo.as_mut() {
            Some(ammo) => {
                ammo.set(rounds);
                true
            }
            None => false,
        }
    }

    /// A participant's sheet, ordered by object id
    pub fn sheet_of(&self, participant: ParticipantId) -> Vec<OwnedObject> {
        let mut objects: Vec<OwnedObject> = self
            .sheets
            .get(&participant)
            .map(|sheet| sheet.values().cloned().collect())
            .unwrap_or_default();
        objects.sort_by_key(|object| object.id);
        objects
    }

    /// One object on a participant's sheet
    pub fn object(&self, participant: ParticipantId, object: ObjectId) -> Option<&OwnedObject> {
        self.sheets.get(&participant)?.get(&object)
    }

    /// The confirmed record wins over any sheet it previously sat on
    fn rehome(&mut self, object: &OwnedObject) {
        for sheet in self.sheets.values_mut() {
            sheet.remove(&object.id);
        }
        self.sheets
            .entry(object.owner)
            .or_default()
            .insert(object.id, object.clone());
    }
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;
