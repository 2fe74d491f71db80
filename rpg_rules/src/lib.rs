//! # RPG Rules
//!
//! The world model for the console RPG: characters, rooms, equipment, and abilities.
//! This crate is the single source of truth for game state. It knows how an ability
//! activates and how rooms link together, but holds no menu, storage, or rendering logic.

pub mod config;
pub mod entities;
pub mod error;
pub mod mechanics;
pub mod world_state;

pub use config::*;
pub use entities::*;
pub use error::*;
pub use mechanics::*;
pub use world_state::*;
