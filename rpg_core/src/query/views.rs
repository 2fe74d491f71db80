//! Read-only views handed to the presentation layer.

use rpg_rules::{AbilityType, Character, CharacterKind, Direction, EquipmentSlot, Room};
use serde::{Deserialize, Serialize};

/// One exit of a room as it should be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitView {
    pub direction: Direction,
    /// Name of the room on the other side; `None` when there is no exit.
    pub room: Option<String>,
}

impl std::fmt::Display for ExitView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.room {
            Some(room) => write!(f, "{}: {}", self.direction, room),
            None => write!(f, "{}: no exit", self.direction),
        }
    }
}

/// Everything needed to describe a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetails {
    pub name: String,
    pub description: String,
    /// Always four entries, in N/S/E/W order.
    pub exits: Vec<ExitView>,
    pub players: Vec<String>,
    pub monsters: Vec<String>,
}

/// A room together with the characters in it.
#[derive(Debug, Clone)]
pub struct RoomRoster<'w> {
    pub room: &'w Room,
    pub players: Vec<&'w Character>,
    pub monsters: Vec<&'w Character>,
}

impl RoomRoster<'_> {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.monsters.is_empty()
    }
}

/// Where an equipped item was found.
#[derive(Debug, Clone)]
pub struct EquipmentLocation<'w> {
    pub character: &'w Character,
    pub slot: EquipmentSlot,
    /// `None` when the holder is not in any room.
    pub room: Option<&'w Room>,
}

/// Summary of one held ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySummary {
    pub name: String,
    pub description: String,
    pub ability_type: AbilityType,
    pub damage: u32,
}

/// A character's stats, gear, and abilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub name: String,
    pub kind: CharacterKind,
    pub health: i32,
    pub experience: u32,
    pub room: Option<String>,
    pub weapon: Option<String>,
    pub armor: Option<String>,
    pub abilities: Vec<AbilitySummary>,
}
