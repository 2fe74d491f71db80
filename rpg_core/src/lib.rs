//! # RPG Core
//!
//! Combat and query logic for the console RPG. This crate works over the
//! `rpg_rules` world model and returns structured outcomes; rendering them is
//! left to the caller.
//!
//! ## Core Components
//!
//! - **combat**: Resolves bare-handed, armed, and ability attacks
//! - **query**: Filters a room's characters by attribute and builds roster reports

pub mod combat;
pub mod query;

pub use combat::*;
pub use query::*;
