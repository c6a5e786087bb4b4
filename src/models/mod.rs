//! Domain models
//!
//! This module contains all domain models representing game entities
//! and concepts. Models are plain data with the small amount of per-entity
//! logic that only touches the entity itself.

pub mod boss;
pub mod constants;
pub mod effects;
pub mod enemy;
pub mod errors;
pub mod events;
pub mod geometry;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod settings;
pub mod ship;
pub mod world;
