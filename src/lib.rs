//! Astro Assault - a two-mode space arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, levels, game state)
//! - `audio`: Sound-cue sink interface fed by simulation events
//! - `settings`: User preferences
//!
//! Rendering, window management and raw input polling belong to a frontend;
//! the simulation only ever sees a `TickInput` snapshot per fixed timestep and
//! only ever talks back through public state and drained `GameEvent`s.

pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// World dimensions
    pub const WORLD_WIDTH: i32 = 800;
    pub const WORLD_HEIGHT: i32 = 600;
    /// Extra off-screen band to the right where meteors spawn
    pub const SPAWN_MARGIN: i32 = 680;
    /// Height of the full-width ground platform
    pub const GROUND_HEIGHT: i32 = 50;

    /// Ship defaults - the ship operates in the left part of the world
    pub const SHIP_SIZE: (i32, i32) = (60, 40);
    pub const SHIP_SPEED: f32 = 350.0;
    pub const SHIP_COOLDOWN: f32 = 0.25;
    pub const SHIP_LANE_FRACTION: f32 = 0.4;
    pub const SHIP_SHOT_SPEED: f32 = 500.0;
    pub const SHIP_SHOT_SIZE: (i32, i32) = (18, 6);

    /// Astronaut defaults
    pub const ASTRONAUT_SIZE: (i32, i32) = (30, 50);
    pub const ASTRONAUT_SPEED: f32 = 250.0;
    pub const ASTRONAUT_JUMP_STRENGTH: f32 = 600.0;
    pub const ASTRONAUT_GRAVITY: f32 = 800.0;
    pub const ASTRONAUT_COOLDOWN: f32 = 0.3;
    pub const ASTRONAUT_SHOT_SPEED: f32 = 400.0;
    pub const ASTRONAUT_SHOT_SIZE: (i32, i32) = (12, 4);
    /// Horizontal velocity decay per tick while no direction is held
    pub const FRICTION: f32 = 0.8;
    /// Below this horizontal speed friction snaps velocity to zero
    pub const FRICTION_STOP: f32 = 10.0;
    /// Respawn point after falling out of the world (top-left)
    pub const RESPAWN_POS: (i32, i32) = (WORLD_WIDTH / 2, 100);

    /// Invulnerability window granted after a hit (seconds)
    pub const INVULNERABILITY_TIME: f32 = 2.0;

    /// Meteor defaults; per-level config scales the speed range
    pub const METEOR_BASE_MIN_SPEED: f32 = 80.0;
    pub const METEOR_BASE_MAX_SPEED: f32 = 220.0;
    pub const METEOR_BASE_SPAWN_INTERVAL: f32 = 0.9;
    pub const METEOR_SIZE_MIN: (i32, i32) = (30, 30);
    pub const METEOR_SIZE_MAX: (i32, i32) = (100, 100);
    /// Symmetric vertical drift range for meteor velocity
    pub const METEOR_DRIFT: f32 = 60.0;

    /// Alien defaults; per-level config scales the speed
    pub const ALIEN_SIZE: (i32, i32) = (40, 40);
    pub const ALIEN_BASE_SPEED: f32 = 50.0;
    pub const ALIEN_PATROL_DISTANCE: i32 = 100;

    /// Mode-switch proximity gates
    pub const LANDING_DISTANCE: i32 = 100;
    pub const BOARDING_DISTANCE: f32 = 120.0;

    /// Time-based difficulty ramp, independent of level progression
    pub const DIFFICULTY_STEP: f32 = 0.02;
    pub const DIFFICULTY_MIN_INTERVAL: f32 = 0.35;
    pub const DIFFICULTY_RAMP_SECS: f32 = 10.0;

    /// Delay between clearing the objectives and the next level loading
    pub const LEVEL_CLEAR_DELAY: f32 = 2.0;
    /// Layouts are reproducible: generator seed = level number * this factor
    pub const LEVEL_SEED_FACTOR: u64 = 42;

    /// Score awards
    pub const METEOR_SCORE: u32 = 10;
    pub const ALIEN_SCORE: u32 = 20;
    pub const LEVEL_BONUS_PER_LEVEL: u32 = 50;
}
