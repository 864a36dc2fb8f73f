//! Player actors: the ship and the astronaut
//!
//! Two concrete actor types behind the small `Combatant` capability seam; the
//! session holds both and dispatches on the active mode. Each actor owns its
//! shot collection and advances it as part of its own update.

use glam::Vec2;

use super::body::Shot;
use super::level::Platform;
use super::rect::Rect;
use crate::consts::*;

/// Capabilities shared by both player actors
pub trait Combatant {
    /// Attempt to fire; fails while the weapon is still cooling down
    fn try_shoot(&mut self) -> bool;
    fn set_invulnerable(&mut self);
    fn is_invulnerable(&self) -> bool;
    fn shots_mut(&mut self) -> &mut Vec<Shot>;
}

/// The free-roaming ship. No gravity, no platform interaction; movement is
/// clamped to its operating lane on the left side of the world.
#[derive(Debug, Clone)]
pub struct Ship {
    pub rect: Rect,
    pub speed: f32,
    pub shots: Vec<Shot>,
    pos: Vec2,
    cooldown_timer: f32,
    invulnerable_timer: f32,
}

impl Ship {
    pub fn new(center: (i32, i32)) -> Self {
        let (w, h) = SHIP_SIZE;
        let rect = Rect::from_center(center.0, center.1, w, h);
        Self {
            pos: Vec2::new(rect.x as f32, rect.y as f32),
            rect,
            speed: SHIP_SPEED,
            shots: Vec::new(),
            cooldown_timer: 0.0,
            invulnerable_timer: 0.0,
        }
    }

    /// Advance the ship and its shots. `axis` is the normalized movement
    /// input for this tick.
    pub fn update(&mut self, dt: f32, axis: Vec2) {
        let movement = axis * self.speed * dt;
        let lane_right = ((WORLD_WIDTH as f32 * SHIP_LANE_FRACTION) as i32 - self.rect.w).max(0);
        self.pos.x = (self.pos.x + movement.x).clamp(0.0, lane_right as f32);
        self.pos.y = (self.pos.y + movement.y).clamp(0.0, (WORLD_HEIGHT - self.rect.h) as f32);
        self.rect.x = self.pos.x as i32;
        self.rect.y = self.pos.y as i32;

        for shot in &mut self.shots {
            shot.update(dt);
        }
        self.shots.retain(|shot| !shot.is_offscreen());

        if self.cooldown_timer > 0.0 {
            self.cooldown_timer -= dt;
        }
        if self.invulnerable_timer > 0.0 {
            self.invulnerable_timer -= dt;
        }
    }
}

impl Combatant for Ship {
    fn try_shoot(&mut self) -> bool {
        if self.cooldown_timer > 0.0 {
            return false;
        }
        let (w, h) = SHIP_SHOT_SIZE;
        let muzzle = Rect::new(self.rect.right(), self.rect.center_y() - h / 2, w, h);
        self.shots.push(Shot::new(muzzle, Vec2::new(SHIP_SHOT_SPEED, 0.0)));
        self.cooldown_timer = SHIP_COOLDOWN;
        true
    }

    fn set_invulnerable(&mut self) {
        self.invulnerable_timer = INVULNERABILITY_TIME;
    }

    fn is_invulnerable(&self) -> bool {
        self.invulnerable_timer > 0.0
    }

    fn shots_mut(&mut self) -> &mut Vec<Shot> {
        &mut self.shots
    }
}

/// The on-foot actor: gravity, friction, jumping, and per-axis collision
/// resolution against the level's platform set.
#[derive(Debug, Clone)]
pub struct Astronaut {
    pub rect: Rect,
    pub vel: Vec2,
    pub speed: f32,
    pub jump_strength: f32,
    pub gravity: f32,
    pub on_ground: bool,
    pub facing_right: bool,
    pub shots: Vec<Shot>,
    pos: Vec2,
    cooldown_timer: f32,
    invulnerable_timer: f32,
}

impl Astronaut {
    pub fn new(center: (i32, i32)) -> Self {
        let (w, h) = ASTRONAUT_SIZE;
        let rect = Rect::from_center(center.0, center.1, w, h);
        Self {
            pos: Vec2::new(rect.x as f32, rect.y as f32),
            rect,
            vel: Vec2::ZERO,
            speed: ASTRONAUT_SPEED,
            jump_strength: ASTRONAUT_JUMP_STRENGTH,
            gravity: ASTRONAUT_GRAVITY,
            on_ground: false,
            facing_right: true,
            shots: Vec::new(),
            cooldown_timer: 0.0,
            invulnerable_timer: 0.0,
        }
    }

    /// Drop the astronaut at a ground point, standing still (used when
    /// stepping out of the landed ship).
    pub fn place_at(&mut self, center_x: i32, bottom: i32) {
        self.rect.x = center_x - self.rect.w / 2;
        self.rect.set_bottom(bottom);
        self.pos = Vec2::new(self.rect.x as f32, self.rect.y as f32);
        self.vel = Vec2::ZERO;
        self.on_ground = false;
    }

    /// One physics step: gravity and input resolve into velocity, then each
    /// axis is integrated and swept against the platforms in turn. The first
    /// overlapping platform wins on each axis.
    pub fn update(
        &mut self,
        dt: f32,
        platforms: &[Platform],
        move_left: bool,
        move_right: bool,
        jump: bool,
    ) {
        self.vel.y += self.gravity * dt;

        if move_left {
            self.vel.x = -self.speed;
            self.facing_right = false;
        } else if move_right {
            self.vel.x = self.speed;
            self.facing_right = true;
        } else {
            self.vel.x *= FRICTION;
            if self.vel.x.abs() < FRICTION_STOP {
                self.vel.x = 0.0;
            }
        }

        if jump && self.on_ground {
            self.vel.y = -self.jump_strength;
            self.on_ground = false;
        }

        // Horizontal axis
        self.pos.x += self.vel.x * dt;
        self.rect.x = self.pos.x as i32;
        for platform in platforms {
            if self.rect.overlaps(&platform.rect) {
                if self.vel.x > 0.0 {
                    self.rect.set_right(platform.rect.left());
                } else if self.vel.x < 0.0 {
                    self.rect.set_left(platform.rect.right());
                }
                self.vel.x = 0.0;
                self.pos.x = self.rect.x as f32;
                break;
            }
        }

        // Vertical axis
        self.pos.y += self.vel.y * dt;
        self.rect.y = self.pos.y as i32;
        self.on_ground = false;
        for platform in platforms {
            if self.rect.overlaps(&platform.rect) {
                if self.vel.y > 0.0 {
                    self.rect.set_bottom(platform.rect.top());
                    self.vel.y = 0.0;
                    self.on_ground = true;
                } else if self.vel.y < 0.0 {
                    self.rect.set_top(platform.rect.bottom());
                    self.vel.y = 0.0;
                }
                self.pos.y = self.rect.y as f32;
                break;
            }
        }

        // World bounds apply after collision resolution
        self.rect.x = self.rect.x.clamp(0, WORLD_WIDTH - self.rect.w);
        self.pos.x = self.rect.x as f32;

        // Death pit: falling out of the world respawns, it does not cost a life
        if self.rect.top() > WORLD_HEIGHT {
            self.rect.x = RESPAWN_POS.0;
            self.rect.y = RESPAWN_POS.1;
            self.pos = Vec2::new(self.rect.x as f32, self.rect.y as f32);
            self.vel = Vec2::ZERO;
        }

        if self.invulnerable_timer > 0.0 {
            self.invulnerable_timer -= dt;
        }

        for shot in &mut self.shots {
            shot.update(dt);
        }
        self.shots.retain(|shot| !shot.is_offscreen());

        if self.cooldown_timer > 0.0 {
            self.cooldown_timer -= dt;
        }
    }
}

impl Combatant for Astronaut {
    fn try_shoot(&mut self) -> bool {
        if self.cooldown_timer > 0.0 {
            return false;
        }
        let (w, h) = ASTRONAUT_SHOT_SIZE;
        let (muzzle, vel) = if self.facing_right {
            (
                Rect::new(self.rect.right(), self.rect.center_y() - h / 2, w, h),
                Vec2::new(ASTRONAUT_SHOT_SPEED, 0.0),
            )
        } else {
            (
                Rect::new(self.rect.left() - w, self.rect.center_y() - h / 2, w, h),
                Vec2::new(-ASTRONAUT_SHOT_SPEED, 0.0),
            )
        };
        self.shots.push(Shot::new(muzzle, vel));
        self.cooldown_timer = ASTRONAUT_COOLDOWN;
        true
    }

    fn set_invulnerable(&mut self) {
        self.invulnerable_timer = INVULNERABILITY_TIME;
    }

    fn is_invulnerable(&self) -> bool {
        self.invulnerable_timer > 0.0
    }

    fn shots_mut(&mut self) -> &mut Vec<Shot> {
        &mut self.shots
    }
}
