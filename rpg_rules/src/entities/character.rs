//! Character definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{AbilityId, EntityId, Equipment, RoomId};
use crate::mechanics::CharacterKind;

/// A player or monster.
///
/// The room back-reference is read-only here; relocation goes through
/// [`WorldState::move_character`](crate::WorldState::move_character) so that the
/// room's occupant list stays in step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    id: EntityId,
    pub kind: CharacterKind,
    pub name: String,
    /// May drop to zero or below; that means defeated.
    pub health: i32,
    pub experience: u32,
    pub equipment: Option<Equipment>,

    pub(crate) room: Option<RoomId>,
    abilities: HashSet<AbilityId>,
}

impl Character {
    fn new(kind: CharacterKind, name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            kind,
            name: name.into(),
            health: 10,
            experience: 0,
            equipment: None,
            room: None,
            abilities: HashSet::new(),
        }
    }

    /// Create a new player with the given name.
    pub fn new_player(name: impl Into<String>) -> Self {
        Self::new(CharacterKind::Player, name)
    }

    /// Create a new monster with the given name.
    pub fn new_monster(name: impl Into<String>) -> Self {
        Self::new(CharacterKind::Monster, name)
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    pub fn with_experience(mut self, experience: u32) -> Self {
        self.experience = experience;
        self
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = Some(equipment);
        self
    }

    /// Place the character in a room before it is added to the world.
    pub fn in_room(mut self, room: RoomId) -> Self {
        self.room = Some(room);
        self
    }

    /// Fixed at creation; the world keys characters by it.
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn is_player(&self) -> bool {
        self.kind == CharacterKind::Player
    }

    pub fn is_monster(&self) -> bool {
        self.kind == CharacterKind::Monster
    }

    /// Check if the character has been defeated.
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// The room the character is in, if any.
    pub fn room(&self) -> Option<RoomId> {
        self.room
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_health(&mut self, health: i32) {
        self.health = health;
    }

    /// Add `delta` to health, saturating at the `i32` bounds.
    pub fn adjust_health(&mut self, delta: i32) -> i32 {
        self.health = self.health.saturating_add(delta);
        self.health
    }

    /// Reduce health by `amount` and return what is left.
    pub fn take_damage(&mut self, amount: u32) -> i32 {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    /// Raise health to `floor` if it has dropped below it.
    pub fn clamp_health(&mut self, floor: i32) -> i32 {
        self.health = self.health.max(floor);
        self.health
    }

    pub fn set_experience(&mut self, experience: u32) {
        self.experience = experience;
    }

    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        self.experience
    }

    /// Add an ability to the character's set.
    ///
    /// Returns `false` if it was already held; the set is left unchanged.
    pub fn learn_ability(&mut self, ability: AbilityId) -> bool {
        self.abilities.insert(ability)
    }

    pub fn has_ability(&self, ability: AbilityId) -> bool {
        self.abilities.contains(&ability)
    }

    pub fn ability_ids(&self) -> impl Iterator<Item = AbilityId> + '_ {
        self.abilities.iter().copied()
    }

    pub fn ability_count(&self) -> usize {
        self.abilities.len()
    }

    /// Equip a bundle, returning whatever was equipped before.
    pub fn equip(&mut self, equipment: Equipment) -> Option<Equipment> {
        self.equipment.replace(equipment)
    }

    pub fn unequip(&mut self) -> Option<Equipment> {
        self.equipment.take()
    }
}
