//! Meteor spawning and the time-based difficulty ramp
//!
//! The spawner owns pacing only. The kill-target gate that stops production
//! near the end of a level belongs to the session; it arrives here as the
//! `allow_spawn` flag so bodies already in flight keep integrating either way.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::body::Meteor;
use super::level::LevelConfig;
use super::rect::Rect;
use crate::consts::*;

/// Throttled generator of falling meteors
#[derive(Debug, Clone)]
pub struct MeteorSpawner {
    pub spawn_interval: f32,
    pub meteors: Vec<Meteor>,
    timer: f32,
}

impl MeteorSpawner {
    pub fn new(spawn_interval: f32) -> Self {
        Self {
            spawn_interval,
            meteors: Vec::new(),
            timer: 0.0,
        }
    }

    /// Accumulate toward the next spawn, emit one meteor per elapsed interval
    /// while spawning is allowed, then advance and prune every body. Returns
    /// how many meteors were spawned this tick.
    pub fn update(&mut self, dt: f32, rng: &mut Pcg32, cfg: &LevelConfig, allow_spawn: bool) -> u32 {
        let mut spawned = 0;
        if allow_spawn {
            self.timer += dt;
            if self.timer >= self.spawn_interval {
                self.timer = 0.0;
                self.spawn_meteor(rng, cfg);
                spawned = 1;
            }
        }

        for meteor in &mut self.meteors {
            meteor.update(dt);
        }
        self.meteors.retain(|meteor| !meteor.is_offscreen());
        spawned
    }

    /// One meteor at a jittered position in the off-screen band to the right,
    /// sized and paced from the level config.
    fn spawn_meteor(&mut self, rng: &mut Pcg32, cfg: &LevelConfig) {
        let w = rng.random_range(METEOR_SIZE_MIN.0..=METEOR_SIZE_MAX.0);
        let h = rng.random_range(METEOR_SIZE_MIN.1..=METEOR_SIZE_MAX.1);
        let buffer = ((SPAWN_MARGIN as f32 * 0.4) as i32).max(60);
        let x = WORLD_WIDTH + SPAWN_MARGIN + rng.random_range(-buffer..=buffer);
        let y = rng.random_range(0..=WORLD_HEIGHT - h);
        let vx = -rng.random_range(cfg.meteor_min_speed..cfg.meteor_max_speed);
        let vy = rng.random_range(-METEOR_DRIFT..METEOR_DRIFT);
        self.meteors
            .push(Meteor::new(Rect::new(x, y, w, h), Vec2::new(vx, vy)));
    }

    /// Step the spawn interval down toward its floor
    pub fn increase_difficulty(&mut self) {
        self.spawn_interval = (self.spawn_interval - DIFFICULTY_STEP).max(DIFFICULTY_MIN_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(1234)
    }

    #[test]
    fn test_spawn_throttled_by_interval() {
        let cfg = LevelConfig::for_level(1);
        let mut spawner = MeteorSpawner::new(cfg.spawn_interval);
        let mut rng = rng();

        let spawned = spawner.update(cfg.spawn_interval - 0.1, &mut rng, &cfg, true);
        assert_eq!(spawned, 0);
        assert!(spawner.meteors.is_empty());

        let spawned = spawner.update(0.1, &mut rng, &cfg, true);
        assert_eq!(spawned, 1);
        assert_eq!(spawner.meteors.len(), 1);
    }

    #[test]
    fn test_spawn_position_and_speed_in_band() {
        let cfg = LevelConfig::for_level(1);
        let mut spawner = MeteorSpawner::new(0.1);
        let mut rng = rng();
        for _ in 0..50 {
            spawner.update(0.1, &mut rng, &cfg, true);
        }
        assert!(!spawner.meteors.is_empty());
        for meteor in &spawner.meteors {
            // Everything still in flight moves leftward
            assert!(meteor.vel.x <= -cfg.meteor_min_speed);
            assert!(meteor.vel.x >= -cfg.meteor_max_speed);
            assert!(meteor.vel.y.abs() <= METEOR_DRIFT);
            assert!(meteor.rect.w >= METEOR_SIZE_MIN.0 && meteor.rect.w <= METEOR_SIZE_MAX.0);
        }
    }

    #[test]
    fn test_gate_stops_production_but_not_motion() {
        let cfg = LevelConfig::for_level(1);
        let mut spawner = MeteorSpawner::new(0.5);
        let mut rng = rng();
        spawner.update(0.5, &mut rng, &cfg, true);
        assert_eq!(spawner.meteors.len(), 1);
        let x_before = spawner.meteors[0].rect.x;

        for _ in 0..20 {
            spawner.update(0.5, &mut rng, &cfg, false);
        }
        assert_eq!(spawner.meteors.len(), 1);
        assert!(spawner.meteors[0].rect.x < x_before);
    }

    #[test]
    fn test_meteors_pruned_past_left_edge() {
        let cfg = LevelConfig::for_level(1);
        let mut spawner = MeteorSpawner::new(1000.0);
        let mut rng = rng();
        spawner
            .meteors
            .push(Meteor::new(Rect::new(40, 100, 30, 30), Vec2::new(-200.0, 0.0)));
        for _ in 0..30 {
            spawner.update(0.1, &mut rng, &cfg, true);
        }
        assert!(spawner.meteors.is_empty());
    }

    #[test]
    fn test_difficulty_floor() {
        let mut spawner = MeteorSpawner::new(METEOR_BASE_SPAWN_INTERVAL);
        for _ in 0..100 {
            spawner.increase_difficulty();
        }
        assert_eq!(spawner.spawn_interval, DIFFICULTY_MIN_INTERVAL);
    }
}
