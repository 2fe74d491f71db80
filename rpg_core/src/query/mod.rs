//! Query Engine - attribute filters and roster reports over the world.
//!
//! Name matching follows two policies:
//! - **Room filter** ([`Criterion::Name`]): exact, case-sensitive
//! - **Population search** ([`QueryEngine::search_by_name`]): case-insensitive substring
//!
//! An empty result is a normal outcome, never an error.

mod criterion;
mod views;

pub use criterion::*;
pub use views::*;

use rpg_rules::{Character, Direction, EntityId, Result, RoomId, WorldState};
use tracing::debug;

/// Read-only queries over a [`WorldState`].
pub struct QueryEngine<'w> {
    world: &'w WorldState,
}

impl<'w> QueryEngine<'w> {
    pub fn new(world: &'w WorldState) -> Self {
        Self { world }
    }

    /// Characters in `room` that satisfy `criterion`, in room-scan order.
    pub fn filter_characters_in_room(
        &self,
        room: RoomId,
        criterion: &Criterion,
    ) -> Result<Vec<&'w Character>> {
        let world = self.world;
        let matches: Vec<_> = world
            .characters_in(room)?
            .into_iter()
            .filter(|c| criterion.matches(c, world))
            .collect();

        debug!(
            room = %room,
            criterion = criterion.attribute(),
            matches = matches.len(),
            "filtered characters in room"
        );
        Ok(matches)
    }

    /// Every character whose name contains `fragment`, ignoring case.
    ///
    /// Sorted by name.
    pub fn search_by_name(&self, fragment: &str) -> Vec<&'w Character> {
        let needle = fragment.to_lowercase();
        let mut found: Vec<_> = self
            .world
            .characters()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect();
        sort_by_name(&mut found);
        found
    }

    /// All rooms, sorted by name, each with its players and monsters.
    pub fn rooms_with_characters(&self) -> Vec<RoomRoster<'w>> {
        let mut rooms: Vec<_> = self.world.rooms().collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name).then(a.id().cmp(&b.id())));

        rooms
            .into_iter()
            .map(|room| {
                let (players, monsters): (Vec<&Character>, Vec<&Character>) = room
                    .occupants()
                    .iter()
                    .filter_map(|id| self.world.character(*id).ok())
                    .partition(|c| c.is_player());
                RoomRoster {
                    room,
                    players,
                    monsters,
                }
            })
            .collect()
    }

    /// Who has an item called `item_name` equipped, and where they are.
    ///
    /// Sorted by holder name; empty if nobody has it equipped.
    pub fn find_equipment(&self, item_name: &str) -> Vec<EquipmentLocation<'w>> {
        let mut holders: Vec<_> = self
            .world
            .characters()
            .filter_map(|character| {
                let slot = character.equipment.as_ref()?.slot_of(item_name)?;
                Some((character, slot))
            })
            .collect();
        holders.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name).then(a.id().cmp(&b.id())));

        holders
            .into_iter()
            .map(|(character, slot)| EquipmentLocation {
                character,
                slot,
                room: character.room().and_then(|r| self.world.room(r).ok()),
            })
            .collect()
    }

    /// Name, description, exits and occupants of a room.
    pub fn room_details(&self, room: RoomId) -> Result<RoomDetails> {
        let world = self.world;
        let details = world.room(room)?;

        let exits = Direction::ALL
            .into_iter()
            .map(|direction| -> Result<ExitView> {
                Ok(ExitView {
                    direction,
                    room: world.exit(room, direction)?.map(|r| r.name.clone()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RoomDetails {
            name: details.name.clone(),
            description: details.description.clone(),
            exits,
            players: names(world.players_in(room)?),
            monsters: names(world.monsters_in(room)?),
        })
    }

    /// Stats, gear, location and abilities of one character.
    pub fn character_sheet(&self, id: EntityId) -> Result<CharacterSheet> {
        let world = self.world;
        let character = world.character(id)?;
        let equipment = character.equipment.as_ref();

        let abilities = world
            .abilities_of(id)?
            .into_iter()
            .map(|a| AbilitySummary {
                name: a.name.clone(),
                description: a.description.clone(),
                ability_type: a.ability_type(),
                damage: a.damage,
            })
            .collect();

        Ok(CharacterSheet {
            name: character.name.clone(),
            kind: character.kind,
            health: character.health,
            experience: character.experience,
            room: character
                .room()
                .and_then(|r| world.room(r).ok())
                .map(|r| r.name.clone()),
            weapon: equipment
                .and_then(|e| e.weapon.as_ref())
                .map(|w| w.name.clone()),
            armor: equipment
                .and_then(|e| e.armor.as_ref())
                .map(|a| a.name.clone()),
            abilities,
        })
    }
}

fn sort_by_name(characters: &mut [&Character]) {
    characters.sort_by(|a, b| a.name.cmp(&b.name).then(a.id().cmp(&b.id())));
}

fn names(characters: Vec<&Character>) -> Vec<String> {
    characters.into_iter().map(|c| c.name.clone()).collect()
}
