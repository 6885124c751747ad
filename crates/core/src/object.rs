// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Owned equipment records
//!
//! An [`OwnedObject`] is one weapon/armor/item instance bound to a
//! participant. Ownership transfer is the only mutation the trade engine
//! performs; every other edit belongs to the external CRUD layer and
//! arrives as an acknowledgement event.

use crate::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Identifier for a catalog object instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ObjectId {
    fn from(n: u64) -> Self {
        ObjectId(n)
    }
}

/// Which catalog an object belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Weapon,
    Armor,
    Item,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Weapon => "weapon",
            ObjectKind::Armor => "armor",
            ObjectKind::Item => "item",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remaining ammunition on a weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ammo {
    pub current: u32,
    pub max: u32,
}

impl Ammo {
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    /// Set the current count, clamped to the catalog maximum
    pub fn set(&mut self, current: u32) {
        self.current = current.min(self.max);
    }

    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }
}

/// A weapon/armor/item instance bound to a participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub name: String,
    pub owner: ParticipantId,
    /// Stack size; 1 for non-stackable gear
    pub quantity: u32,
    pub ammo: Option<Ammo>,
    pub description: Option<String>,
}

impl OwnedObject {
    pub fn new(
        id: impl Into<ObjectId>,
        kind: ObjectKind,
        name: impl Into<String>,
        owner: impl Into<ParticipantId>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            owner: owner.into(),
            quantity: 1,
            ammo: None,
            description: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_ammo(mut self, ammo: Ammo) -> Self {
        self.ammo = Some(ammo);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The same object re-homed to a new owner
    pub fn with_owner(mut self, owner: ParticipantId) -> Self {
        self.owner = owner;
        self
    }
}
