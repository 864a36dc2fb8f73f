//! Kinematic bodies: shots, meteors and patrolling aliens
//!
//! Pure position integrators with simple lifetime rules. Each body keeps a
//! float position alongside its integer rect so sub-pixel velocities
//! accumulate across ticks instead of truncating away.

use glam::Vec2;

use super::level::Platform;
use super::rect::Rect;
use crate::consts::*;

/// A projectile fired by either actor. Moves on the horizontal axis only.
#[derive(Debug, Clone)]
pub struct Shot {
    pub rect: Rect,
    pub vel: Vec2,
    pos_x: f32,
}

impl Shot {
    pub fn new(rect: Rect, vel: Vec2) -> Self {
        Self {
            rect,
            vel,
            pos_x: rect.x as f32,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos_x += self.vel.x * dt;
        self.rect.x = self.pos_x as i32;
    }

    /// Expired once fully past either horizontal world edge
    pub fn is_offscreen(&self) -> bool {
        self.rect.left() > WORLD_WIDTH || self.rect.right() < 0
    }
}

/// A falling hazard drifting in from the right
#[derive(Debug, Clone)]
pub struct Meteor {
    pub rect: Rect,
    pub vel: Vec2,
    pos: Vec2,
}

impl Meteor {
    pub fn new(rect: Rect, vel: Vec2) -> Self {
        Self {
            rect,
            vel,
            pos: Vec2::new(rect.x as f32, rect.y as f32),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.rect.x = self.pos.x as i32;
        self.rect.y = self.pos.y as i32;
    }

    /// Expired once fully past the left world edge
    pub fn is_offscreen(&self) -> bool {
        self.rect.right() < 0
    }
}

/// A patrolling hazard bound to one platform. Killed aliens stay in their
/// collection with `alive = false` so identity is stable after the kill.
#[derive(Debug, Clone)]
pub struct Alien {
    pub rect: Rect,
    /// Index of the owning platform in the level's platform list (weak ref)
    pub platform: usize,
    pub speed: f32,
    /// +1 walking right, -1 walking left
    pub direction: i32,
    pub start_x: i32,
    pub patrol_distance: i32,
    pub alive: bool,
    pos_x: f32,
}

impl Alien {
    pub fn new(center_x: i32, platform_index: usize, platform: &Platform, speed: f32) -> Self {
        let (w, h) = ALIEN_SIZE;
        let mut rect = Rect::new(0, 0, w, h);
        rect.set_center(center_x, 0);
        rect.set_bottom(platform.rect.top());
        Self {
            pos_x: rect.x as f32,
            start_x: rect.center_x(),
            rect,
            platform: platform_index,
            speed,
            direction: 1,
            patrol_distance: ALIEN_PATROL_DISTANCE,
            alive: true,
        }
    }

    /// Walk back and forth around the spawn point, never leaving the owning
    /// platform's span. Dead aliens are frozen in place.
    pub fn update(&mut self, dt: f32, platforms: &[Platform]) {
        if !self.alive {
            return;
        }

        self.pos_x += self.direction as f32 * self.speed * dt;
        self.rect.x = self.pos_x as i32;

        let offset = self.rect.center_x() - self.start_x;
        // Only bounce while walking outward; the truncated center can sit on
        // the boundary for a tick and must not flip the direction twice.
        if offset.abs() >= self.patrol_distance && offset.signum() == self.direction {
            self.direction = -self.direction;
            if let Some(platform) = platforms.get(self.platform) {
                if self.rect.left() < platform.rect.left() {
                    self.rect.set_left(platform.rect.left());
                    self.direction = 1;
                } else if self.rect.right() > platform.rect.right() {
                    self.rect.set_right(platform.rect.right());
                    self.direction = -1;
                }
            }
            self.pos_x = self.rect.x as f32;
        }
    }
}
