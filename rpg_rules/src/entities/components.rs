//! Equipment carried by characters.

use serde::{Deserialize, Serialize};

use super::ItemId;
use crate::mechanics::EquipmentSlot;

/// A weapon; its attack power is the damage dealt by an equipped attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: ItemId,
    pub name: String,
    pub attack: u32,
}

impl Weapon {
    pub fn new(name: impl Into<String>, attack: u32) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            attack,
        }
    }
}

/// A piece of armor. Defense is carried for display; attacks ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub id: ItemId,
    pub name: String,
    pub defense: u32,
}

impl Armor {
    pub fn new(name: impl Into<String>, defense: u32) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            defense,
        }
    }
}

/// A character's equipped weapon/armor bundle. Either slot may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Weapon>,
    pub armor: Option<Armor>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_armor(mut self, armor: Armor) -> Self {
        self.armor = Some(armor);
        self
    }

    /// Names of the equipped items, weapon first.
    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.weapon
            .iter()
            .map(|w| w.name.as_str())
            .chain(self.armor.iter().map(|a| a.name.as_str()))
    }

    /// The slot holding an item with exactly this name, weapon checked first.
    pub fn slot_of(&self, name: &str) -> Option<EquipmentSlot> {
        if self.weapon.as_ref().is_some_and(|w| w.name == name) {
            Some(EquipmentSlot::Weapon)
        } else if self.armor.as_ref().is_some_and(|a| a.name == name) {
            Some(EquipmentSlot::Armor)
        } else {
            None
        }
    }

    /// Check if an item with exactly this name is equipped.
    pub fn has_item_named(&self, name: &str) -> bool {
        self.item_names().any(|n| n == name)
    }
}
