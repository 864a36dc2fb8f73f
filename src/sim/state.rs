//! Session state: phases, modes, objectives and entity collections
//!
//! Everything the frontend needs to draw a frame is public here; everything
//! that mutates goes through `tick`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::{Astronaut, Ship};
use super::body::Alien;
use super::level::{self, LevelConfig, Platform};
use super::spawner::MeteorSpawner;
use crate::consts::*;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Which actor the player is currently controlling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMode {
    Ship,
    Platformer,
}

/// Things that happened during a tick that a frontend may react to (sound
/// cues, HUD flashes). Drained by the caller, never read back by the sim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired,
    MeteorDestroyed,
    AlienKilled,
    PlayerHit,
    LevelCleared { next_level: u32 },
    ModeSwitched(PlayerMode),
    GameOver,
}

/// Advisory wave bookkeeping. Display only: it never gates spawning or level
/// completion, so a plain spawn counter is all it takes.
#[derive(Debug, Clone)]
pub struct WaveTracker {
    /// 1-based wave index shown on the HUD
    pub current: u32,
    pub wave_count: u32,
    spawned_in_wave: u32,
    per_wave: u32,
}

impl WaveTracker {
    pub fn for_config(cfg: &LevelConfig) -> Self {
        let per_wave = (cfg.required_kills / cfg.wave_count.max(1)).max(1);
        Self {
            current: 1,
            wave_count: cfg.wave_count,
            spawned_in_wave: 0,
            per_wave,
        }
    }

    /// Count spawned hazards toward the displayed wave
    pub fn record_spawns(&mut self, n: u32) {
        self.spawned_in_wave += n;
        while self.spawned_in_wave >= self.per_wave && self.current < self.wave_count {
            self.spawned_in_wave -= self.per_wave;
            self.current += 1;
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed; feeds the non-reproducible randomness (meteor jitter).
    /// Level layouts are seeded separately from the level number.
    pub seed: u64,
    pub phase: GamePhase,
    pub mode: PlayerMode,
    pub score: u32,
    pub lives: i32,
    pub config: LevelConfig,
    pub ship: Ship,
    pub astronaut: Astronaut,
    pub spawner: MeteorSpawner,
    pub platforms: Vec<Platform>,
    pub aliens: Vec<Alien>,
    pub wave: WaveTracker,
    /// Countdown between completing the objectives and the next level
    pub clear_timer: Option<f32>,
    pub time_ticks: u64,
    pub(crate) difficulty_timer: f32,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh session sitting at the menu
    pub fn new(seed: u64) -> Self {
        let config = LevelConfig::for_level(1);
        let mut state = Self {
            seed,
            phase: GamePhase::Menu,
            mode: PlayerMode::Ship,
            score: 0,
            lives: 3,
            wave: WaveTracker::for_config(&config),
            spawner: MeteorSpawner::new(config.spawn_interval),
            config,
            ship: Ship::new(ship_start()),
            astronaut: Astronaut::new(astronaut_start()),
            platforms: Vec::new(),
            aliens: Vec::new(),
            clear_timer: None,
            time_ticks: 0,
            difficulty_timer: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.load_level(1);
        state
    }

    /// Restart the session: score, lives, level one, fresh entities
    pub fn reset(&mut self) {
        self.mode = PlayerMode::Ship;
        self.score = 0;
        self.lives = 3;
        self.ship = Ship::new(ship_start());
        self.astronaut = Astronaut::new(astronaut_start());
        self.time_ticks = 0;
        self.difficulty_timer = 0.0;
        self.events.clear();
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.load_level(1);
    }

    /// Install a level: config, layout, aliens, spawner pacing, objectives
    pub(crate) fn load_level(&mut self, level: u32) {
        self.config = LevelConfig::for_level(level);
        self.platforms = level::generate_platforms(level);
        self.aliens = spawn_aliens(&self.platforms, &self.config);
        self.spawner = MeteorSpawner::new(self.config.spawn_interval);
        self.wave = WaveTracker::for_config(&self.config);
        self.clear_timer = None;
        log::info!(
            "level {} loaded: {} aliens, {} kills required, {} waves",
            level,
            self.aliens.len(),
            self.config.required_kills,
            self.config.wave_count
        );
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

fn ship_start() -> (i32, i32) {
    ((WORLD_WIDTH as f32 * 0.15) as i32, WORLD_HEIGHT / 2)
}

fn astronaut_start() -> (i32, i32) {
    (WORLD_WIDTH / 2, 100)
}

/// Distribute aliens round-robin over the non-ground platforms, so placement
/// is as reproducible as the layout itself.
fn spawn_aliens(platforms: &[Platform], cfg: &LevelConfig) -> Vec<Alien> {
    let mut aliens = Vec::with_capacity(cfg.alien_count as usize);
    if platforms.is_empty() {
        return aliens;
    }
    let uppers = platforms.len() - 1;
    for i in 0..cfg.alien_count as usize {
        let idx = if uppers > 0 { 1 + i % uppers } else { 0 };
        let platform = &platforms[idx];
        aliens.push(Alien::new(
            platform.rect.center_x(),
            idx,
            platform,
            cfg.alien_speed,
        ));
    }
    aliens
}
