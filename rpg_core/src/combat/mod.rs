//! Combat Resolver - resolves attacks and ability use between characters.
//!
//! Damage is deterministic:
//! - **Unarmed** (no equipment, or equipment without a weapon): `unarmed_damage`
//! - **Armed**: the weapon's attack power
//! - **Ability**: the ability's damage, see [`Ability::activate`]
//!
//! Every operation validates all IDs before touching health, so a failed
//! request leaves the world unchanged.

use rpg_rules::{
    Ability, AbilityId, AbilityOutcome, Character, EntityId, Result, RulesConfig, WorldState,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of a basic attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub attacker: String,
    pub target: String,
    /// Weapon used; `None` for a bare-handed attack.
    pub weapon: Option<String>,
    pub damage: u32,
    pub remaining_health: i32,
}

impl AttackOutcome {
    /// Describe the blow.
    pub fn narrative(&self) -> String {
        match &self.weapon {
            Some(weapon) => format!(
                "{} attacks {} with a {} dealing {} damage!",
                self.attacker, self.target, weapon, self.damage
            ),
            None => format!(
                "{} attacks {} with their fist dealing {} damage!",
                self.attacker, self.target, self.damage
            ),
        }
    }

    /// Describe the target's condition afterwards.
    pub fn report(&self) -> String {
        format!(
            "{} has {} health remaining.",
            self.target, self.remaining_health
        )
    }
}

/// Resolves combat actions against a [`WorldState`].
pub struct CombatResolver {
    config: RulesConfig,
}

impl CombatResolver {
    /// Create a new resolver with the given rules.
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    /// Create a resolver with default rules.
    pub fn with_defaults() -> Self {
        Self::new(RulesConfig::default())
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// `attacker` strikes `target` with whatever weapon it has equipped.
    pub fn attack(
        &self,
        world: &mut WorldState,
        attacker: EntityId,
        target: EntityId,
    ) -> Result<AttackOutcome> {
        let attacker = world.character(attacker)?;
        let attacker_name = attacker.name.clone();
        let weapon = attacker
            .equipment
            .as_ref()
            .and_then(|e| e.weapon.as_ref())
            .map(|w| (w.name.clone(), w.attack));

        let target = world.character_mut(target)?;
        let damage = weapon
            .as_ref()
            .map_or(self.config.unarmed_damage, |(_, attack)| *attack);
        target.take_damage(damage);
        let remaining_health = self.apply_floor(target);

        debug!(
            attacker = %attacker_name,
            target = %target.name,
            damage,
            remaining_health,
            "attack resolved"
        );

        Ok(AttackOutcome {
            attacker: attacker_name,
            target: target.name.clone(),
            weapon: weapon.map(|(name, _)| name),
            damage,
            remaining_health,
        })
    }

    /// `attacker` uses one of its abilities on `target`.
    ///
    /// Fails with `AbilityNotHeld` when the attacker does not hold the ability.
    pub fn use_ability(
        &self,
        world: &mut WorldState,
        attacker: EntityId,
        ability: AbilityId,
        target: EntityId,
    ) -> Result<AbilityOutcome> {
        let ability: Ability = world.ability(ability)?.clone();
        // Snapshot so the attacker may also be the target.
        let user: Character = world.character(attacker)?.clone();
        let target = world.character_mut(target)?;

        let mut outcome = ability.activate(&user, target)?;
        outcome.remaining_health = self.apply_floor(target);
        Ok(outcome)
    }

    fn apply_floor(&self, target: &mut Character) -> i32 {
        match self.config.health_floor {
            Some(floor) => target.clamp_health(floor),
            None => target.health,
        }
    }
}
