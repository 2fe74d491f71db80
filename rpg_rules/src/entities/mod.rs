//! Entity definitions for the game world.

mod ability;
mod character;
mod components;

pub use ability::*;
pub use character::*;
pub use components::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from a specific UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Create a nil/empty ID (useful for defaults).
            pub fn nil() -> Self {
                Self(Uuid::nil())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for characters (players and monsters).
    EntityId
);

entity_id!(
    /// Unique identifier for abilities in the ability catalog.
    AbilityId
);

entity_id!(
    /// Unique identifier for weapons and armor.
    ItemId
);

entity_id!(
    /// Unique identifier for rooms.
    RoomId
);
