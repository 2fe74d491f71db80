//! Game mechanics: character kinds, ability types, equipment slots, and directions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RulesError;

/// The two kinds of character that populate the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    Player,
    Monster,
}

/// Tag identifying an ability variant.
///
/// Used both for dispatch reporting and for filtering characters by the
/// kinds of ability they hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityType {
    Shove,
    Magic,
    Phys,
}

impl AbilityType {
    pub const ALL: [AbilityType; 3] = [AbilityType::Shove, AbilityType::Magic, AbilityType::Phys];

    pub fn as_str(&self) -> &'static str {
        match self {
            AbilityType::Shove => "ShoveAbility",
            AbilityType::Magic => "MagicAbility",
            AbilityType::Phys => "PhysAbility",
        }
    }
}

impl std::fmt::Display for AbilityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AbilityType {
    type Err = RulesError;

    /// Accepts both the short ("magic") and the stored ("MagicAbility") spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shove" | "shoveability" => Ok(AbilityType::Shove),
            "magic" | "magicability" => Ok(AbilityType::Magic),
            "phys" | "physical" | "physability" => Ok(AbilityType::Phys),
            _ => Err(RulesError::UnknownAbilityType(s.to_string())),
        }
    }
}

/// Equipment slots for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

/// Exit directions out of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The direction leading back.
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            _ => Err(RulesError::UnknownDirection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
    }

    #[test]
    fn test_parse_ability_type() {
        assert_eq!("MagicAbility".parse::<AbilityType>().unwrap(), AbilityType::Magic);
        assert_eq!(" shove ".parse::<AbilityType>().unwrap(), AbilityType::Shove);
        assert_eq!("PHYS".parse::<AbilityType>().unwrap(), AbilityType::Phys);

        let err = "Healing".parse::<AbilityType>().unwrap_err();
        assert_eq!(err, RulesError::UnknownAbilityType("Healing".into()));
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("W".parse::<Direction>().unwrap(), Direction::West);
        assert_eq!("north".parse::<Direction>().unwrap(), Direction::North);
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn test_ability_type_display_round_trips() {
        for ty in AbilityType::ALL {
            assert_eq!(ty.to_string().parse::<AbilityType>().unwrap(), ty);
        }
    }
}
