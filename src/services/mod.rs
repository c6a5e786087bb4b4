//! Game services
//!
//! Frame-step rules that act on the [`World`](crate::models::world::World):
//! spawning, movement, weapons fire, collisions, scoring progression and
//! cosmetic effects. The engine calls them in a fixed order each tick;
//! `game` owns the terminal frame loop that drives the engine.

pub mod collision;
pub mod combat;
pub mod effects;
pub mod game;
pub mod movement;
pub mod progression;
pub mod spawning;
