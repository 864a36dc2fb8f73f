//! Level configuration and the procedural platform generator
//!
//! Layouts are reproducible: the generator RNG is seeded from the level
//! number alone, so the same level always yields the same platform set.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::consts::*;

pub const PLATFORM_COLOR: (u8, u8, u8) = (120, 100, 80);

/// Platform thickness in pixels (the ground uses `GROUND_HEIGHT` instead)
const PLATFORM_HEIGHT: i32 = 18;
/// Vertical spacing between upper layers
const LAYER_SPACING: i32 = 110;
/// Upper bound on placement retries per platform
const PLACE_ATTEMPTS: usize = 24;
const FIRST_LAYER_COUNT: usize = 3;
const PLATFORMS_PER_LAYER: usize = 2;

/// A static platform. Immutable once the level is generated; aliens and the
/// astronaut refer to platforms by index, never by ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub rect: Rect,
    pub color: (u8, u8, u8),
}

/// Per-level balance knobs, derived deterministically from the level number
#[derive(Debug, Clone, PartialEq)]
pub struct LevelConfig {
    pub level: u32,
    pub alien_count: u32,
    pub alien_speed: f32,
    pub spawn_interval: f32,
    pub meteor_min_speed: f32,
    pub meteor_max_speed: f32,
    pub required_kills: u32,
    pub wave_count: u32,
    /// Kills scored so far this level; may transiently exceed the target
    pub kills: u32,
}

impl LevelConfig {
    /// Every curve is monotonic in `level`, so later levels are never easier.
    pub fn for_level(level: u32) -> Self {
        let n = level.saturating_sub(1);
        Self {
            level,
            alien_count: (2 + level).min(8),
            alien_speed: ALIEN_BASE_SPEED + 6.0 * n as f32,
            spawn_interval: (METEOR_BASE_SPAWN_INTERVAL - 0.05 * n as f32)
                .max(DIFFICULTY_MIN_INTERVAL),
            meteor_min_speed: METEOR_BASE_MIN_SPEED + 8.0 * n as f32,
            meteor_max_speed: METEOR_BASE_MAX_SPEED + 12.0 * n as f32,
            required_kills: 5 + 3 * n,
            wave_count: 1 + n / 3,
            kills: 0,
        }
    }

    /// The kill half of the level objective
    pub fn target_met(&self) -> bool {
        self.kills >= self.required_kills
    }
}

/// Peak height of a full jump: v^2 / 2g
pub fn max_jump_height() -> f32 {
    ASTRONAUT_JUMP_STRENGTH * ASTRONAUT_JUMP_STRENGTH / (2.0 * ASTRONAUT_GRAVITY)
}

/// Horizontal reach of a full jump, as a jump-arc approximation
pub fn max_jump_distance() -> f32 {
    max_jump_height() * 1.5
}

/// Generate the platform set for a level. Same level number, same layout.
///
/// The ground is always present and full-width. A first layer sits loosely
/// just above it; the rest is distributed over 2-4 upper layers, each
/// placement retried until it neither overlaps nor floats out of jump reach
/// of everything below. Exhausted retries fall back to hugging the last
/// platform, which may itself be skipped - a slightly sparser level is fine.
pub fn generate_platforms(level: u32) -> Vec<Platform> {
    let mut rng = Pcg32::seed_from_u64(level as u64 * LEVEL_SEED_FACTOR);
    let ground_top = WORLD_HEIGHT - GROUND_HEIGHT;
    let mut platforms = vec![Platform {
        rect: Rect::new(0, ground_top, WORLD_WIDTH, GROUND_HEIGHT),
        color: PLATFORM_COLOR,
    }];

    // First layer: anywhere above the ground within jump reach, loosely packed
    for _ in 0..FIRST_LAYER_COUNT {
        for _ in 0..PLACE_ATTEMPTS {
            let w = rng.random_range(90..=180);
            let x = rng.random_range(0..=WORLD_WIDTH - w);
            let y = rng.random_range(ground_top - 140..=ground_top - 70);
            let candidate = Rect::new(x, y, w, PLATFORM_HEIGHT);
            if !overlaps_any(&platforms, &candidate) {
                platforms.push(Platform {
                    rect: candidate,
                    color: PLATFORM_COLOR,
                });
                break;
            }
        }
    }

    let upper_layers = rng.random_range(2..=4);
    for layer in 1..=upper_layers {
        let band_bottom = (ground_top - 140 - LAYER_SPACING * layer).max(40);
        let band_top = (band_bottom - 60).max(30);
        for _ in 0..PLATFORMS_PER_LAYER {
            let mut placed = false;
            for _ in 0..PLACE_ATTEMPTS {
                let w = rng.random_range(80..=160);
                let x = rng.random_range(0..=WORLD_WIDTH - w);
                let y = rng.random_range(band_top..=band_bottom);
                let candidate = Rect::new(x, y, w, PLATFORM_HEIGHT);
                if overlaps_any(&platforms, &candidate) {
                    continue;
                }
                if reachable(&platforms, &candidate) {
                    platforms.push(Platform {
                        rect: candidate,
                        color: PLATFORM_COLOR,
                    });
                    placed = true;
                    break;
                }
            }
            if !placed {
                // Hug the most recently placed platform so the path upward
                // never dead-ends; skipped silently if even that spot is taken
                let last = match platforms.last() {
                    Some(p) => p.rect,
                    None => continue,
                };
                let w = 100;
                let dir = if rng.random_bool(0.5) { 1 } else { -1 };
                let x = (last.center_x() + dir * 130 - w / 2).clamp(0, WORLD_WIDTH - w);
                let y = (last.top() - 90).max(30);
                let candidate = Rect::new(x, y, w, PLATFORM_HEIGHT);
                if overlaps_any(&platforms, &candidate) {
                    log::debug!("level {level}: dropped a fallback platform, no room left");
                } else {
                    platforms.push(Platform {
                        rect: candidate,
                        color: PLATFORM_COLOR,
                    });
                }
            }
        }
    }

    log::info!("level {}: generated {} platforms", level, platforms.len());
    platforms
}

fn overlaps_any(platforms: &[Platform], candidate: &Rect) -> bool {
    platforms.iter().any(|p| p.rect.overlaps(candidate))
}

/// Forward reachability only: some already placed platform must sit below the
/// candidate within the jump arc. Descent has no height limit, so the reverse
/// path needs no check.
fn reachable(platforms: &[Platform], candidate: &Rect) -> bool {
    platforms.iter().any(|p| {
        let rise = (p.rect.top() - candidate.top()) as f32;
        (0.0..=max_jump_height()).contains(&rise)
            && horizontal_gap(&p.rect, candidate) as f32 <= max_jump_distance()
    })
}

/// Gap between two rects' horizontal spans; zero when the spans overlap
fn horizontal_gap(a: &Rect, b: &Rect) -> i32 {
    if a.right() < b.left() {
        b.left() - a.right()
    } else if b.right() < a.left() {
        a.left() - b.right()
    } else {
        0
    }
}
