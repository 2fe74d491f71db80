//! Abilities and their activation.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{AbilityId, Character};
use crate::error::{Result, RulesError};
use crate::mechanics::AbilityType;

/// Variant-specific ability data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Push the target away. Distance is descriptive only; no range check is made.
    Shove { distance: u32 },
    Magic,
    Phys,
}

impl AbilityKind {
    pub fn ability_type(&self) -> AbilityType {
        match self {
            AbilityKind::Shove { .. } => AbilityType::Shove,
            AbilityKind::Magic => AbilityType::Magic,
            AbilityKind::Phys => AbilityType::Phys,
        }
    }
}

/// A named combat action a character can hold and activate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,
    pub description: String,
    pub damage: u32,
    pub kind: AbilityKind,
}

/// What happened when an ability was activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityOutcome {
    pub ability: String,
    pub ability_type: AbilityType,
    pub user: String,
    pub target: String,
    pub damage: u32,
    pub remaining_health: i32,
    pub narrative: String,
}

impl Ability {
    fn new(name: impl Into<String>, damage: u32, kind: AbilityKind) -> Self {
        Self {
            id: AbilityId::new(),
            name: name.into(),
            description: String::new(),
            damage,
            kind,
        }
    }

    pub fn shove(name: impl Into<String>, damage: u32, distance: u32) -> Self {
        Self::new(name, damage, AbilityKind::Shove { distance })
    }

    pub fn magic(name: impl Into<String>, damage: u32) -> Self {
        Self::new(name, damage, AbilityKind::Magic)
    }

    pub fn phys(name: impl Into<String>, damage: u32) -> Self {
        Self::new(name, damage, AbilityKind::Phys)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn ability_type(&self) -> AbilityType {
        self.kind.ability_type()
    }

    /// Activate this ability from `user` against `target`.
    ///
    /// Fails with [`RulesError::AbilityNotHeld`] and leaves `target` untouched if
    /// `user` does not hold the ability.
    pub fn activate(&self, user: &Character, target: &mut Character) -> Result<AbilityOutcome> {
        if !user.has_ability(self.id) {
            warn!(user = %user.name, ability = %self.name, "ability not held");
            return Err(RulesError::AbilityNotHeld {
                character: user.name.clone(),
                ability: self.name.clone(),
            });
        }

        let damage = self.damage;
        let narrative = match self.kind {
            AbilityKind::Shove { distance } => format!(
                "{} shoves {} back {} feet, dealing {} damage!",
                user.name, target.name, distance, damage
            ),
            AbilityKind::Magic => format!(
                "{} targets {}, dealing {} damage!",
                user.name, target.name, damage
            ),
            AbilityKind::Phys => format!(
                "{} attacks {}, dealing {} damage!",
                user.name, target.name, damage
            ),
        };

        let remaining_health = target.take_damage(damage);
        debug!(
            user = %user.name,
            target = %target.name,
            ability = %self.name,
            damage,
            remaining_health,
            "ability activated"
        );

        Ok(AbilityOutcome {
            ability: self.name.clone(),
            ability_type: self.ability_type(),
            user: user.name.clone(),
            target: target.name.clone(),
            damage,
            remaining_health,
            narrative,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_activation() {
        let firebolt = Ability::magic("Firebolt", 8);
        let mut bram = Character::new_player("Bram");
        bram.learn_ability(firebolt.id);
        let mut goblin = Character::new_monster("Goblin").with_health(20);

        let outcome = firebolt.activate(&bram, &mut goblin).unwrap();

        assert_eq!(goblin.health, 12);
        assert_eq!(outcome.remaining_health, 12);
        assert_eq!(outcome.ability_type, AbilityType::Magic);
        assert_eq!(outcome.narrative, "Bram targets Goblin, dealing 8 damage!");
    }

    #[test]
    fn test_phys_and_shove_narratives() {
        let slam = Ability::phys("Slam", 3);
        let push = Ability::shove("Push", 2, 10);
        let mut ogre = Character::new_monster("Ogre");
        ogre.learn_ability(slam.id);
        ogre.learn_ability(push.id);
        let mut aria = Character::new_player("Aria").with_health(10);

        let outcome = slam.activate(&ogre, &mut aria).unwrap();
        assert_eq!(outcome.narrative, "Ogre attacks Aria, dealing 3 damage!");

        let outcome = push.activate(&ogre, &mut aria).unwrap();
        assert_eq!(outcome.narrative, "Ogre shoves Aria back 10 feet, dealing 2 damage!");
        assert_eq!(outcome.ability_type, AbilityType::Shove);
        assert_eq!(aria.health, 5);
    }

    #[test]
    fn test_unheld_ability_is_rejected() {
        let shove = Ability::shove("Shove", 4, 5);
        let bram = Character::new_player("Bram");
        let mut goblin = Character::new_monster("Goblin").with_health(5);

        let err = shove.activate(&bram, &mut goblin).unwrap_err();

        assert!(err.is_invalid_operation());
        assert_eq!(goblin.health, 5);
    }

    #[test]
    fn test_zero_damage_ability() {
        let feint = Ability::phys("Feint", 0).with_description("A harmless distraction");
        let mut rogue = Character::new_player("Rogue");
        rogue.learn_ability(feint.id);
        let mut guard = Character::new_monster("Guard").with_health(7);

        let outcome = feint.activate(&rogue, &mut guard).unwrap();
        assert_eq!(outcome.damage, 0);
        assert_eq!(guard.health, 7);
    }
}
