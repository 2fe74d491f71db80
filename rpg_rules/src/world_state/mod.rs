//! World state management - the central structure holding all game data.
//!
//! Rooms own the occupant index; characters only carry a back-reference to
//! their room. [`WorldState::move_character`] is the single place both sides
//! change, so they cannot drift apart. Deserialized snapshots are reconciled
//! against the back-references before use.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::entities::{Ability, AbilityId, Character, EntityId, RoomId};
use crate::error::{Result, RulesError};
use crate::mechanics::{CharacterKind, Direction};

/// The four optional exits of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Exits {
    pub north: Option<RoomId>,
    pub south: Option<RoomId>,
    pub east: Option<RoomId>,
    pub west: Option<RoomId>,
}

impl Exits {
    pub fn get(&self, direction: Direction) -> Option<RoomId> {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    pub fn set(&mut self, direction: Direction, target: Option<RoomId>) {
        let slot = match direction {
            Direction::North => &mut self.north,
            Direction::South => &mut self.south,
            Direction::East => &mut self.east,
            Direction::West => &mut self.west,
        };
        *slot = target;
    }

    /// Present exits in N/S/E/W order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, RoomId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.get(dir).map(|room| (dir, room)))
    }
}

/// A room in the game world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    pub name: String,
    pub description: String,
    pub exits: Exits,
    /// Characters present, in arrival order.
    occupants: Vec<EntityId>,
}

impl Room {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: RoomId::new(),
            name: name.into(),
            description: description.into(),
            exits: Exits::default(),
            occupants: Vec::new(),
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn occupants(&self) -> &[EntityId] {
        &self.occupants
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }
}

/// The complete state of the game world at any point in time.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(from = "WorldSnapshot")]
pub struct WorldState {
    /// All characters in the world, players and monsters alike.
    characters: HashMap<EntityId, Character>,

    rooms: HashMap<RoomId, Room>,

    /// Ability catalog; characters refer to entries by ID.
    abilities: HashMap<AbilityId, Ability>,
}

/// Serialized form of [`WorldState`], trusted only after reconciliation.
#[derive(Deserialize)]
struct WorldSnapshot {
    #[serde(default)]
    characters: HashMap<EntityId, Character>,
    #[serde(default)]
    rooms: HashMap<RoomId, Room>,
    #[serde(default)]
    abilities: HashMap<AbilityId, Ability>,
}

impl From<WorldSnapshot> for WorldState {
    fn from(snapshot: WorldSnapshot) -> Self {
        let mut state = Self {
            characters: snapshot
                .characters
                .into_values()
                .map(|c| (c.id(), c))
                .collect(),
            rooms: snapshot.rooms.into_values().map(|r| (r.id, r)).collect(),
            abilities: snapshot
                .abilities
                .into_values()
                .map(|a| (a.id, a))
                .collect(),
        };
        state.reconcile_occupants();
        state
    }
}

impl WorldState {
    /// Create a new empty world state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a room to the world.
    ///
    /// Occupants the new room claims are discarded; characters are placed through
    /// [`add_character`](Self::add_character). Re-adding an existing ID replaces
    /// name, description and exits but keeps the current occupants.
    pub fn add_room(&mut self, mut room: Room) -> RoomId {
        let id = room.id;
        room.occupants = self
            .rooms
            .remove(&id)
            .map(|existing| existing.occupants)
            .unwrap_or_default();
        self.rooms.insert(id, room);
        id
    }

    /// Make every occupant list agree with the characters' back-references.
    ///
    /// Characters pointing at unknown rooms become unlocated. Occupants that agree
    /// keep their stored order; missing ones are appended in ID order.
    fn reconcile_occupants(&mut self) {
        for character in self.characters.values_mut() {
            if let Some(room_id) = character.room {
                if !self.rooms.contains_key(&room_id) {
                    warn!(character = %character.name, room = %room_id, "unknown room in snapshot, character unlocated");
                    character.room = None;
                }
            }
        }

        let characters = &self.characters;
        for room in self.rooms.values_mut() {
            let room_id = room.id;
            let mut seen = HashSet::new();
            room.occupants.retain(|id| {
                characters
                    .get(id)
                    .is_some_and(|c| c.room == Some(room_id))
                    && seen.insert(*id)
            });
        }

        let mut placed: Vec<_> = self
            .characters
            .values()
            .filter_map(|c| c.room.map(|room| (room, c.id())))
            .collect();
        placed.sort();
        for (room_id, id) in placed {
            if let Some(room) = self.rooms.get_mut(&room_id) {
                if !room.occupants.contains(&id) {
                    room.occupants.push(id);
                }
            }
        }
    }

    /// Add an ability to the catalog.
    pub fn add_ability(&mut self, ability: Ability) -> AbilityId {
        let id = ability.id;
        self.abilities.insert(id, ability);
        id
    }

    /// Add a character to the world.
    ///
    /// A character that names an existing room joins that room's occupants; one
    /// naming an unknown room is added unlocated. Re-adding an ID replaces the
    /// previous character and its room placement.
    pub fn add_character(&mut self, mut character: Character) -> EntityId {
        let id = character.id();

        if let Some(previous) = self.characters.remove(&id) {
            if let Some(room) = previous.room.and_then(|r| self.rooms.get_mut(&r)) {
                room.occupants.retain(|o| *o != id);
            }
        }

        if let Some(room_id) = character.room {
            match self.rooms.get_mut(&room_id) {
                Some(room) => room.occupants.push(id),
                None => {
                    warn!(character = %character.name, room = %room_id, "unknown room, adding character unlocated");
                    character.room = None;
                }
            }
        }

        self.characters.insert(id, character);
        id
    }

    /// Get character by ID.
    pub fn character(&self, id: EntityId) -> Result<&Character> {
        self.characters
            .get(&id)
            .ok_or(RulesError::CharacterNotFound(id))
    }

    /// Get mutable character by ID.
    pub fn character_mut(&mut self, id: EntityId) -> Result<&mut Character> {
        self.characters
            .get_mut(&id)
            .ok_or(RulesError::CharacterNotFound(id))
    }

    pub fn room(&self, id: RoomId) -> Result<&Room> {
        self.rooms.get(&id).ok_or(RulesError::RoomNotFound(id))
    }

    pub fn ability(&self, id: AbilityId) -> Result<&Ability> {
        self.abilities
            .get(&id)
            .ok_or(RulesError::AbilityNotFound(id))
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn abilities(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.values()
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Give a catalog ability to a character.
    ///
    /// Returns `false` if the character already held it.
    pub fn grant_ability(&mut self, character: EntityId, ability: AbilityId) -> Result<bool> {
        let ability_name = self.ability(ability)?.name.clone();
        let character = self.character_mut(character)?;
        let added = character.learn_ability(ability);
        debug!(character = %character.name, ability = %ability_name, added, "granted ability");
        Ok(added)
    }

    /// Catalog abilities held by a character, sorted by name.
    pub fn abilities_of(&self, character: EntityId) -> Result<Vec<&Ability>> {
        let character = self.character(character)?;
        let mut held: Vec<_> = character
            .ability_ids()
            .filter_map(|id| self.abilities.get(&id))
            .collect();
        held.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(held)
    }

    /// Move a character into `destination`, or out of every room with `None`.
    ///
    /// Both the prior room's and the new room's occupant lists are updated along
    /// with the character's back-reference. Nothing changes on error.
    pub fn move_character(&mut self, id: EntityId, destination: Option<RoomId>) -> Result<()> {
        let current = self.character(id)?.room;
        if let Some(dest) = destination {
            self.room(dest)?;
        }
        if current == destination {
            return Ok(());
        }

        if let Some(room) = current.and_then(|r| self.rooms.get_mut(&r)) {
            room.occupants.retain(|o| *o != id);
        }
        if let Some(room) = destination.and_then(|r| self.rooms.get_mut(&r)) {
            room.occupants.push(id);
        }
        if let Some(character) = self.characters.get_mut(&id) {
            character.room = destination;
            debug!(character = %character.name, from = ?current, to = ?destination, "moved character");
        }
        Ok(())
    }

    /// Set (or clear, with `None`) one exit of a room.
    pub fn set_exit(
        &mut self,
        from: RoomId,
        direction: Direction,
        target: Option<RoomId>,
    ) -> Result<()> {
        if let Some(target) = target {
            self.room(target)?;
        }
        let room = self
            .rooms
            .get_mut(&from)
            .ok_or(RulesError::RoomNotFound(from))?;
        room.exits.set(direction, target);
        Ok(())
    }

    /// Link `a` to `b` in `direction`, and `b` back to `a` in the opposite one.
    pub fn connect_rooms(&mut self, a: RoomId, direction: Direction, b: RoomId) -> Result<()> {
        self.room(a)?;
        self.room(b)?;
        self.set_exit(a, direction, Some(b))?;
        self.set_exit(b, direction.opposite(), Some(a))
    }

    /// The room reached by leaving `room` in `direction`, if there is an exit.
    pub fn exit(&self, room: RoomId, direction: Direction) -> Result<Option<&Room>> {
        let room = self.room(room)?;
        Ok(room
            .exits
            .get(direction)
            .and_then(|target| self.rooms.get(&target)))
    }

    /// All existing exits of a room, in N/S/E/W order.
    pub fn neighbors(&self, room: RoomId) -> Result<Vec<(Direction, &Room)>> {
        let room = self.room(room)?;
        Ok(room
            .exits
            .iter()
            .filter_map(|(dir, target)| self.rooms.get(&target).map(|r| (dir, r)))
            .collect())
    }

    /// Characters in a room, in room-scan order.
    pub fn characters_in(&self, room: RoomId) -> Result<Vec<&Character>> {
        let room = self.room(room)?;
        Ok(room
            .occupants
            .iter()
            .filter_map(|id| self.characters.get(id))
            .collect())
    }

    pub fn players_in(&self, room: RoomId) -> Result<Vec<&Character>> {
        self.occupants_of_kind(room, CharacterKind::Player)
    }

    pub fn monsters_in(&self, room: RoomId) -> Result<Vec<&Character>> {
        self.occupants_of_kind(room, CharacterKind::Monster)
    }

    fn occupants_of_kind(&self, room: RoomId, kind: CharacterKind) -> Result<Vec<&Character>> {
        let mut occupants = self.characters_in(room)?;
        occupants.retain(|c| c.kind == kind);
        Ok(occupants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rooms() -> (WorldState, RoomId, RoomId) {
        let mut state = WorldState::new();
        let hall = state.add_room(Room::new("Hall", "A draughty hall"));
        let cellar = state.add_room(Room::new("Cellar", "Damp and dark"));
        (state, hall, cellar)
    }

    #[test]
    fn test_add_character_in_room() {
        let (mut state, hall, _) = two_rooms();
        let aria = state.add_character(Character::new_player("Aria").in_room(hall));

        assert_eq!(state.room(hall).unwrap().occupants(), &[aria]);
        assert_eq!(state.character(aria).unwrap().room(), Some(hall));
    }

    #[test]
    fn test_add_character_with_unknown_room() {
        let mut state = WorldState::new();
        let id = state.add_character(Character::new_player("Lost").in_room(RoomId::new()));
        assert!(state.character(id).unwrap().room().is_none());
    }

    #[test]
    fn test_re_adding_character_moves_placement() {
        let (mut state, hall, cellar) = two_rooms();
        let aria = Character::new_player("Aria").in_room(hall);
        let id = state.add_character(aria.clone());

        state.add_character(aria.in_room(cellar));

        assert!(state.room(hall).unwrap().is_empty());
        assert_eq!(state.room(cellar).unwrap().occupants(), &[id]);
        assert_eq!(state.character_count(), 1);
    }

    #[test]
    fn test_move_character_updates_both_sides() {
        let (mut state, hall, cellar) = two_rooms();
        let aria = state.add_character(Character::new_player("Aria").in_room(hall));

        state.move_character(aria, Some(cellar)).unwrap();

        assert!(!state.room(hall).unwrap().occupants().contains(&aria));
        assert!(state.room(cellar).unwrap().occupants().contains(&aria));
        assert_eq!(state.character(aria).unwrap().room(), Some(cellar));

        state.move_character(aria, None).unwrap();
        assert!(state.room(cellar).unwrap().is_empty());
        assert!(state.character(aria).unwrap().room().is_none());
    }

    #[test]
    fn test_move_to_same_room_does_not_duplicate() {
        let (mut state, hall, _) = two_rooms();
        let aria = state.add_character(Character::new_player("Aria").in_room(hall));

        state.move_character(aria, Some(hall)).unwrap();
        assert_eq!(state.room(hall).unwrap().occupants().len(), 1);
    }

    #[test]
    fn test_failed_move_changes_nothing() {
        let (mut state, hall, _) = two_rooms();
        let aria = state.add_character(Character::new_player("Aria").in_room(hall));

        let err = state.move_character(aria, Some(RoomId::new())).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(state.room(hall).unwrap().occupants(), &[aria]);
        assert_eq!(state.character(aria).unwrap().room(), Some(hall));

        let err = state.move_character(EntityId::new(), Some(hall)).unwrap_err();
        assert!(matches!(err, RulesError::CharacterNotFound(_)));
    }

    #[test]
    fn test_players_and_monsters_in_room() {
        let (mut state, hall, _) = two_rooms();
        let aria = state.add_character(Character::new_player("Aria").in_room(hall));
        let goblin = state.add_character(Character::new_monster("Goblin").in_room(hall));
        let bram = state.add_character(Character::new_player("Bram").in_room(hall));

        let players: Vec<_> = state.players_in(hall).unwrap().iter().map(|c| c.id()).collect();
        let monsters: Vec<_> = state.monsters_in(hall).unwrap().iter().map(|c| c.id()).collect();

        assert_eq!(players, vec![aria, bram]);
        assert_eq!(monsters, vec![goblin]);
    }

    #[test]
    fn test_connect_rooms() {
        let (mut state, hall, cellar) = two_rooms();
        state.connect_rooms(hall, Direction::South, cellar).unwrap();

        assert_eq!(state.exit(hall, Direction::South).unwrap().unwrap().id(), cellar);
        assert_eq!(state.exit(cellar, Direction::North).unwrap().unwrap().id(), hall);
        assert!(state.exit(hall, Direction::East).unwrap().is_none());
    }

    #[test]
    fn test_self_loop_and_cycle() {
        let (mut state, hall, cellar) = two_rooms();
        state.set_exit(hall, Direction::West, Some(hall)).unwrap();
        state.set_exit(hall, Direction::North, Some(cellar)).unwrap();
        state.set_exit(cellar, Direction::East, Some(hall)).unwrap();

        assert_eq!(state.exit(hall, Direction::West).unwrap().unwrap().id(), hall);

        let neighbors: Vec<_> = state
            .neighbors(hall)
            .unwrap()
            .into_iter()
            .map(|(dir, room)| (dir, room.id()))
            .collect();
        assert_eq!(neighbors, vec![(Direction::North, cellar), (Direction::West, hall)]);

        state.set_exit(hall, Direction::West, None).unwrap();
        assert!(state.exit(hall, Direction::West).unwrap().is_none());
    }

    #[test]
    fn test_set_exit_to_unknown_room() {
        let (mut state, hall, _) = two_rooms();
        let err = state
            .set_exit(hall, Direction::North, Some(RoomId::new()))
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(state.room(hall).unwrap().exits.north.is_none());
    }

    #[test]
    fn test_grant_ability() {
        let mut state = WorldState::new();
        let bram = state.add_character(Character::new_player("Bram"));
        let firebolt = state.add_ability(Ability::magic("Firebolt", 8));
        let shove = state.add_ability(Ability::shove("Shove", 2, 5));

        assert!(state.grant_ability(bram, firebolt).unwrap());
        assert!(!state.grant_ability(bram, firebolt).unwrap());
        assert!(state.grant_ability(bram, shove).unwrap());

        let names: Vec<_> = state
            .abilities_of(bram)
            .unwrap()
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["Firebolt", "Shove"]);

        let err = state.grant_ability(bram, AbilityId::new()).unwrap_err();
        assert!(matches!(err, RulesError::AbilityNotFound(_)));
        assert_eq!(state.character(bram).unwrap().ability_count(), 2);
    }

    #[test]
    fn test_re_adding_room_keeps_occupants() {
        let (mut state, hall, cellar) = two_rooms();
        let aria = state.add_character(Character::new_player("Aria").in_room(hall));
        let renamed = state.room(hall).unwrap().clone();

        state.add_room(Room {
            name: "Great Hall".into(),
            ..renamed
        });

        assert_eq!(state.room(hall).unwrap().name, "Great Hall");
        assert_eq!(state.room(hall).unwrap().occupants(), &[aria]);
        assert_eq!(state.characters_in(hall).unwrap().len(), 1);
        assert!(state.room(cellar).unwrap().is_empty());
    }

    #[test]
    fn test_new_room_ignores_claimed_occupants() {
        let mut state = WorldState::new();
        let mut room = Room::new("Attic", "Dusty");
        room.occupants.push(EntityId::new());

        let attic = state.add_room(room);
        assert!(state.room(attic).unwrap().is_empty());
    }

    #[test]
    fn test_character_edits_keep_id() {
        let (mut state, hall, _) = two_rooms();
        let aria = state.add_character(Character::new_player("Aria").in_room(hall));

        let character = state.character_mut(aria).unwrap();
        character.set_name("Aria the Bold");
        character.take_damage(3);

        assert_eq!(state.character(aria).unwrap().id(), aria);
        assert_eq!(state.room(hall).unwrap().occupants(), &[aria]);
        assert_eq!(state.room(hall).unwrap().id(), hall);
    }

    #[test]
    fn test_snapshot_missing_occupant_is_restored() {
        let (mut state, hall, _) = two_rooms();
        let aria = state.add_character(Character::new_player("Aria").in_room(hall));

        let mut json = serde_json::to_value(&state).unwrap();
        json["rooms"][hall.to_string().as_str()]["occupants"] = serde_json::json!([]);
        let restored: WorldState = serde_json::from_value(json).unwrap();

        assert_eq!(restored.character(aria).unwrap().room(), Some(hall));
        assert_eq!(restored.room(hall).unwrap().occupants(), &[aria]);
    }

    #[test]
    fn test_snapshot_stale_occupant_is_dropped() {
        let (mut state, hall, cellar) = two_rooms();
        let aria = state.add_character(Character::new_player("Aria").in_room(hall));

        let mut json = serde_json::to_value(&state).unwrap();
        json["rooms"][cellar.to_string().as_str()]["occupants"] =
            serde_json::to_value(vec![aria, aria, EntityId::new()]).unwrap();
        let restored: WorldState = serde_json::from_value(json).unwrap();

        assert!(restored.room(cellar).unwrap().is_empty());
        assert_eq!(restored.room(hall).unwrap().occupants(), &[aria]);
    }

    #[test]
    fn test_snapshot_unknown_room_becomes_unlocated() {
        let (mut state, hall, _) = two_rooms();
        let aria = state.add_character(Character::new_player("Aria").in_room(hall));

        let mut json = serde_json::to_value(&state).unwrap();
        json["characters"][aria.to_string().as_str()]["room"] =
            serde_json::to_value(RoomId::new()).unwrap();
        let restored: WorldState = serde_json::from_value(json).unwrap();

        assert!(restored.character(aria).unwrap().room().is_none());
        assert!(restored.room(hall).unwrap().is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let (mut state, hall, cellar) = two_rooms();
        state.connect_rooms(hall, Direction::East, cellar).unwrap();
        let aria = state.add_character(Character::new_player("Aria").in_room(hall));

        let json = serde_json::to_string(&state).unwrap();
        let restored: WorldState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.room(hall).unwrap().occupants(), &[aria]);
        assert_eq!(restored.exit(hall, Direction::East).unwrap().unwrap().id(), cellar);
    }
}
