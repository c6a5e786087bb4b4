//! Space Shooter
//!
//! A single-player arcade space shooter played in the terminal.
//!
//! # Overview
//!
//! The player picks a starfighter and survives waves of enemies that
//! grow tougher with each level. Power-ups drift down the screen, bosses
//! arrive as the score climbs, and destroying enough bosses wins the run.
//! Everything runs in one synchronous frame loop: poll input, step the
//! simulation in fixed 16 ms steps, render, sleep to the frame rate.
//!
//! # Modules
//!
//! - [`game_engine`] - State machine: splash, menus, play, pause, end screens
//! - [`models`] - Game records (player, enemies, bosses, projectiles, world)
//! - [`services`] - Frame-step rules and the terminal frame loop
//! - [`audio`] - Sound cue selection, volume mixing and music fades
//! - [`io`] - Keyboard and display abstractions for testing
//! - [`ui`] - Frame buffer, presenters and the terminal renderer
//! - [`cli`] - Command-line arguments
//!
//! # Example
//!
//! ```rust
//! use space_shooter::{Controls, GameEngine, GameState, Settings, ShipClass};
//! use space_shooter::io::{InputFrame, Key};
//!
//! let mut engine = GameEngine::new(Settings::default(), ShipClass::Fighter, 42);
//! for _ in 0..3 {
//!     engine.handle_input(&InputFrame::pressing(&[Key::Confirm]));
//! }
//! assert_eq!(engine.state(), GameState::Playing);
//! engine.tick(16, Controls::default());
//! ```

pub mod audio;
pub mod cli;
pub mod game_engine;
pub mod io;
pub mod models;
pub mod services;
pub mod ui;

// Re-export commonly used types
pub use game_engine::{Flow, GameEngine, GameState};
pub use models::errors::{GameError, GameResult};
pub use models::player::Controls;
pub use models::settings::Settings;
pub use models::ship::ShipClass;
pub use models::world::World;
