//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod actor;
pub mod body;
pub mod level;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use actor::{Astronaut, Combatant, Ship};
pub use body::{Alien, Meteor, Shot};
pub use level::{LevelConfig, Platform, generate_platforms, max_jump_distance, max_jump_height};
pub use rect::Rect;
pub use spawner::MeteorSpawner;
pub use state::{GameEvent, GamePhase, GameState, PlayerMode, WaveTracker};
pub use tick::{TickInput, tick};
