//! Filter criteria for character queries.

use rpg_rules::{AbilityType, Character, Result, RulesError, WorldState};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One attribute filter applied to the characters of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion {
    /// Exact, case-sensitive name equality.
    Name(String),
    MinHealth(i32),
    MinExperience(u32),
    /// A weapon or armor with exactly this name is equipped.
    EquipmentName(String),
    /// At least one held ability is of this type.
    AbilityType(AbilityType),
}

impl Criterion {
    /// Build a criterion from an attribute name and a raw value, as typed at a prompt.
    ///
    /// Attribute names are case-insensitive: `name`, `health`, `experience`,
    /// `equipment name`, `ability type` (plus a few aliases). Name and equipment
    /// values are kept verbatim for exact matching; numbers and ability types may
    /// carry surrounding whitespace.
    pub fn parse(attribute: &str, value: &str) -> Result<Self> {
        let attribute_key = attribute.trim().to_ascii_lowercase();

        let criterion = match attribute_key.as_str() {
            "name" => Criterion::Name(value.to_string()),
            "health" | "min health" | "minhealth" => {
                Criterion::MinHealth(parse_number(&attribute_key, value.trim())?)
            }
            "experience" | "min experience" | "minexperience" => {
                Criterion::MinExperience(parse_number(&attribute_key, value.trim())?)
            }
            "equipment name" | "equipment" | "item" => Criterion::EquipmentName(value.to_string()),
            "ability type" | "ability" | "abilitytype" => Criterion::AbilityType(value.parse()?),
            _ => {
                warn!(attribute, "unknown filter criterion");
                return Err(RulesError::UnknownCriterion(attribute.to_string()));
            }
        };
        Ok(criterion)
    }

    /// Canonical attribute name.
    pub fn attribute(&self) -> &'static str {
        match self {
            Criterion::Name(_) => "name",
            Criterion::MinHealth(_) => "health",
            Criterion::MinExperience(_) => "experience",
            Criterion::EquipmentName(_) => "equipment name",
            Criterion::AbilityType(_) => "ability type",
        }
    }

    /// Check a character against this criterion. Ability types are looked up in
    /// the world's ability catalog.
    pub fn matches(&self, character: &Character, world: &WorldState) -> bool {
        match self {
            Criterion::Name(name) => character.name == *name,
            Criterion::MinHealth(threshold) => character.health >= *threshold,
            Criterion::MinExperience(threshold) => character.experience >= *threshold,
            Criterion::EquipmentName(item) => character
                .equipment
                .as_ref()
                .is_some_and(|e| e.has_item_named(item)),
            Criterion::AbilityType(ability_type) => character
                .ability_ids()
                .filter_map(|id| world.ability(id).ok())
                .any(|a| a.ability_type() == *ability_type),
        }
    }
}

fn parse_number<T: std::str::FromStr>(criterion: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| RulesError::InvalidCriterionValue {
            criterion: criterion.to_string(),
            value: value.to_string(),
        })
}
