//! Fixed timestep simulation tick
//!
//! Advances the active mode, resolves cross-entity collisions, tracks the
//! level objective and drives mode switches. Deterministic given the same
//! state and inputs: all randomness flows through the session's seeded RNG.

use glam::Vec2;

use super::actor::Combatant;
use super::state::{GameEvent, GamePhase, GameState, PlayerMode};
use crate::consts::*;

/// Input snapshot for a single tick (the frontend polls once per tick and
/// hands the held keys over; one-shot keys arrive edge-triggered)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Vertical thrust in ship mode, jump in platformer mode
    pub up: bool,
    pub down: bool,
    pub shoot: bool,
    /// Toggle pause
    pub pause: bool,
    /// Confirm / start from the menu and game-over screens
    pub start: bool,
    /// Back out to the menu from the pause and game-over screens
    pub menu: bool,
    /// Request a ship<->platformer switch (proximity gated)
    pub switch_mode: bool,
}

/// Advance the game by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Menu => {
            if input.start {
                state.reset();
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::GameOver => {
            if input.menu {
                state.phase = GamePhase::Menu;
            } else if input.start {
                state.reset();
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Paused => {
            if input.menu {
                state.phase = GamePhase::Menu;
            } else if input.pause {
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                return;
            }
        }
    }

    state.time_ticks += 1;

    if input.switch_mode {
        try_switch_mode(state);
    }

    match state.mode {
        PlayerMode::Ship => update_ship_mode(state, input, dt),
        PlayerMode::Platformer => update_platformer_mode(state, input, dt),
    }

    // A fatal hit ends the tick right here; no further systems run
    if state.phase == GamePhase::GameOver {
        return;
    }

    update_difficulty_ramp(state, dt);
    update_level_completion(state, dt);
}

fn movement_axis(input: &TickInput) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if input.left {
        axis.x -= 1.0;
    }
    if input.right {
        axis.x += 1.0;
    }
    if input.up {
        axis.y -= 1.0;
    }
    if input.down {
        axis.y += 1.0;
    }
    axis.normalize_or_zero()
}

fn update_ship_mode(state: &mut GameState, input: &TickInput, dt: f32) {
    state.ship.update(dt, movement_axis(input));
    if input.shoot && state.ship.try_shoot() {
        state.push_event(GameEvent::ShotFired);
    }

    // Spawning runs unconditionally until the kill target is met; after that
    // only the bodies already in flight keep integrating
    let allow_spawn = !state.config.target_met();
    let spawned = state
        .spawner
        .update(dt, &mut state.rng, &state.config, allow_spawn);
    state.wave.record_spawns(spawned);

    resolve_shot_meteor_hits(state);
    resolve_meteor_ship_contact(state);
}

fn update_platformer_mode(state: &mut GameState, input: &TickInput, dt: f32) {
    state
        .astronaut
        .update(dt, &state.platforms, input.left, input.right, input.up);
    if input.shoot && state.astronaut.try_shoot() {
        state.push_event(GameEvent::ShotFired);
    }

    for alien in &mut state.aliens {
        alien.update(dt, &state.platforms);
    }

    resolve_shot_alien_hits(state);
    resolve_alien_contact(state);
}

/// Shots vs meteors: each shot takes out at most one meteor, both disappear,
/// score and the kill counter advance. Marked first, compacted after the scan.
fn resolve_shot_meteor_hits(state: &mut GameState) {
    let mut dead_shots: Vec<usize> = Vec::new();
    let mut dead_meteors: Vec<usize> = Vec::new();
    for (si, shot) in state.ship.shots.iter().enumerate() {
        for (mi, meteor) in state.spawner.meteors.iter().enumerate() {
            if dead_meteors.contains(&mi) {
                continue;
            }
            if shot.rect.overlaps(&meteor.rect) {
                dead_shots.push(si);
                dead_meteors.push(mi);
                break;
            }
        }
    }
    if dead_meteors.is_empty() {
        return;
    }

    let kills = dead_meteors.len() as u32;
    remove_indices(&mut state.ship.shots, &dead_shots);
    remove_indices(&mut state.spawner.meteors, &dead_meteors);
    state.score += kills * METEOR_SCORE;
    state.config.kills += kills;
    for _ in 0..kills {
        state.push_event(GameEvent::MeteorDestroyed);
    }
}

/// Shots vs aliens: the shot is consumed; the alien is marked dead but stays
/// in its collection so identity is stable after the kill.
fn resolve_shot_alien_hits(state: &mut GameState) {
    let mut dead_shots: Vec<usize> = Vec::new();
    let mut kills = 0u32;
    for (si, shot) in state.astronaut.shots.iter().enumerate() {
        for alien in state.aliens.iter_mut() {
            if alien.alive && shot.rect.overlaps(&alien.rect) {
                alien.alive = false;
                dead_shots.push(si);
                kills += 1;
                break;
            }
        }
    }
    if kills == 0 {
        return;
    }

    remove_indices(&mut state.astronaut.shots, &dead_shots);
    state.score += kills * ALIEN_SCORE;
    state.config.kills += kills;
    for _ in 0..kills {
        state.push_event(GameEvent::AlienKilled);
    }
}

/// Meteor hitting the ship: first contact per tick only. The meteor is always
/// consumed; damage applies only while the ship is vulnerable.
fn resolve_meteor_ship_contact(state: &mut GameState) {
    let hit = state
        .spawner
        .meteors
        .iter()
        .position(|meteor| meteor.rect.overlaps(&state.ship.rect));
    if let Some(index) = hit {
        state.spawner.meteors.remove(index);
        apply_player_hit(state);
    }
}

/// Live alien touching the astronaut: first contact per tick only. Aliens are
/// not consumed by contact.
fn resolve_alien_contact(state: &mut GameState) {
    let touched = state
        .aliens
        .iter()
        .any(|alien| alien.alive && alien.rect.overlaps(&state.astronaut.rect));
    if touched {
        apply_player_hit(state);
    }
}

/// Shared damage path for both actors: invulnerability gates the life loss,
/// and running out of lives ends the game within the same tick.
fn apply_player_hit(state: &mut GameState) {
    {
        let actor: &mut dyn Combatant = match state.mode {
            PlayerMode::Ship => &mut state.ship,
            PlayerMode::Platformer => &mut state.astronaut,
        };
        if actor.is_invulnerable() {
            return;
        }
        actor.set_invulnerable();
    }
    state.lives -= 1;
    state.push_event(GameEvent::PlayerHit);
    if state.lives <= 0 {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::GameOver);
        log::info!("game over at level {} with score {}", state.config.level, state.score);
    }
}

/// Mode switches are proximity gated: the ship must be near the ground line
/// to land, the astronaut near the parked ship to board. A switch clears the
/// departed mode's transient entities.
fn try_switch_mode(state: &mut GameState) {
    match state.mode {
        PlayerMode::Ship => {
            let ground_top = WORLD_HEIGHT - GROUND_HEIGHT;
            if (ground_top - state.ship.rect.bottom()).abs() > LANDING_DISTANCE {
                return;
            }
            state.spawner.meteors.clear();
            state.ship.shots.clear();
            // Step out right where the ship touched down
            state
                .astronaut
                .place_at(state.ship.rect.center_x(), ground_top);
            state.mode = PlayerMode::Platformer;
            state.push_event(GameEvent::ModeSwitched(PlayerMode::Platformer));
            log::debug!("landed, switched to platformer");
        }
        PlayerMode::Platformer => {
            let dx = (state.astronaut.rect.center_x() - state.ship.rect.center_x()) as f32;
            let dy = (state.astronaut.rect.center_y() - state.ship.rect.center_y()) as f32;
            if (dx * dx + dy * dy).sqrt() > BOARDING_DISTANCE {
                return;
            }
            state.astronaut.shots.clear();
            state.mode = PlayerMode::Ship;
            state.push_event(GameEvent::ModeSwitched(PlayerMode::Ship));
            log::debug!("boarded, switched to ship");
        }
    }
}

/// Time-based spawn pacing ramp, independent of level progression
fn update_difficulty_ramp(state: &mut GameState, dt: f32) {
    state.difficulty_timer += dt;
    if state.difficulty_timer >= DIFFICULTY_RAMP_SECS {
        state.difficulty_timer = 0.0;
        state.spawner.increase_difficulty();
    }
}

/// Objective check and the end-of-level countdown. Both halves must hold:
/// every alien dead AND the kill target met.
fn update_level_completion(state: &mut GameState, dt: f32) {
    if let Some(timer) = &mut state.clear_timer {
        *timer -= dt;
        if *timer <= 0.0 {
            let next = state.config.level + 1;
            state.score += LEVEL_BONUS_PER_LEVEL * next;
            state.load_level(next);
        }
        return;
    }

    let aliens_cleared = state.aliens.iter().all(|alien| !alien.alive);
    if aliens_cleared && state.config.target_met() {
        state.clear_timer = Some(LEVEL_CLEAR_DELAY);
        state.push_event(GameEvent::LevelCleared {
            next_level: state.config.level + 1,
        });
        log::info!("level {} objectives complete", state.config.level);
    }
}

/// Remove the marked indices from a collection after a scan has finished
fn remove_indices<T>(items: &mut Vec<T>, dead: &[usize]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !dead.contains(&index);
        index += 1;
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::{Meteor, Shot};
    use crate::sim::rect::Rect;

    const DT: f32 = SIM_DT;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..TickInput::default()
            },
            DT,
        );
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    /// A meteor parked on top of the ship
    fn meteor_on_ship(state: &GameState) -> Meteor {
        let r = state.ship.rect;
        Meteor::new(Rect::new(r.x, r.y, 40, 40), Vec2::ZERO)
    }

    #[test]
    fn test_menu_starts_on_confirm() {
        let mut state = GameState::new(42);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::Menu);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..TickInput::default()
            },
            DT,
        );
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pause_toggles_and_freezes_time() {
        let mut state = playing_state();
        let ticks = state.time_ticks;
        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..TickInput::default()
            },
            DT,
        );
        assert_eq!(state.phase, GamePhase::Paused);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.time_ticks, ticks);

        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..TickInput::default()
            },
            DT,
        );
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pause_and_game_over_can_back_out_to_menu() {
        let mut state = playing_state();
        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..TickInput::default()
            },
            DT,
        );
        tick(
            &mut state,
            &TickInput {
                menu: true,
                ..TickInput::default()
            },
            DT,
        );
        assert_eq!(state.phase, GamePhase::Menu);

        let mut state = playing_state();
        state.lives = 1;
        state.spawner.meteors.clear();
        state.spawner.meteors.push(meteor_on_ship(&state));
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        tick(
            &mut state,
            &TickInput {
                menu: true,
                ..TickInput::default()
            },
            DT,
        );
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_meteor_kill_scores_ten() {
        let mut state = playing_state();
        state.spawner.meteors.clear();
        let meteor = Meteor::new(Rect::new(400, 290, 50, 50), Vec2::ZERO);
        state.spawner.meteors.push(meteor);
        state
            .ship
            .shots
            .push(Shot::new(Rect::new(400, 300, 18, 6), Vec2::new(SHIP_SHOT_SPEED, 0.0)));

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, METEOR_SCORE);
        assert_eq!(state.config.kills, 1);
        assert!(state.spawner.meteors.is_empty());
        assert!(state.ship.shots.is_empty());
        assert!(state.drain_events().contains(&GameEvent::MeteorDestroyed));
    }

    #[test]
    fn test_alien_kill_scores_twenty_and_keeps_the_body() {
        let mut state = playing_state();
        state.mode = PlayerMode::Platformer;
        let alien_rect = state.aliens[0].rect;
        let alien_count = state.aliens.len();
        state.astronaut.shots.push(Shot::new(
            Rect::new(alien_rect.x, alien_rect.center_y(), 12, 4),
            Vec2::new(ASTRONAUT_SHOT_SPEED, 0.0),
        ));

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.score, ALIEN_SCORE);
        assert_eq!(state.config.kills, 1);
        assert!(!state.aliens[0].alive);
        assert_eq!(state.aliens.len(), alien_count);
        assert!(state.astronaut.shots.is_empty());
    }

    #[test]
    fn test_hazard_contact_costs_a_life_once() {
        let mut state = playing_state();
        state.spawner.meteors.clear();
        state.spawner.meteors.push(meteor_on_ship(&state));

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.lives, 2);
        assert!(state.ship.is_invulnerable());
        assert!(state.spawner.meteors.is_empty());

        // A second hazard during the invulnerability window costs nothing
        state.spawner.meteors.push(meteor_on_ship(&state));
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_fatal_hit_ends_the_game_this_tick() {
        let mut state = playing_state();
        state.lives = 1;
        state.spawner.meteors.clear();
        state.spawner.meteors.push(meteor_on_ship(&state));

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver));

        // Terminal until reset: plain ticks change nothing
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_game_over_restarts_on_confirm() {
        let mut state = playing_state();
        state.lives = 1;
        state.spawner.meteors.clear();
        state.spawner.meteors.push(meteor_on_ship(&state));
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..TickInput::default()
            },
            DT,
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_completion_needs_both_halves() {
        let mut state = playing_state();
        state.mode = PlayerMode::Platformer;
        for alien in &mut state.aliens {
            alien.alive = false;
        }
        state.config.kills = state.config.required_kills - 1;

        tick(&mut state, &TickInput::default(), DT);
        assert!(state.clear_timer.is_none(), "kill target not met yet");

        state.config.kills = state.config.required_kills;
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.clear_timer.is_some());
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::LevelCleared { next_level: 2 })
        );
    }

    #[test]
    fn test_completion_countdown_loads_next_level_with_bonus() {
        let mut state = playing_state();
        state.mode = PlayerMode::Platformer;
        for alien in &mut state.aliens {
            alien.alive = false;
        }
        state.config.kills = state.config.required_kills;
        let score_before = state.score;

        let countdown_ticks = (LEVEL_CLEAR_DELAY / DT) as u32 + 2;
        for _ in 0..countdown_ticks {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.config.level, 2);
        assert_eq!(state.score, score_before + LEVEL_BONUS_PER_LEVEL * 2);
        assert_eq!(state.config.kills, 0);
        assert!(state.aliens.iter().all(|alien| alien.alive));
        assert!(state.clear_timer.is_none());
    }

    #[test]
    fn test_kill_gate_stops_meteor_production() {
        let mut state = playing_state();
        state.config.kills = state.config.required_kills;
        state.spawner.meteors.clear();
        // Two full spawn intervals with the target already met: nothing new,
        // aliens still alive so the level does not complete either
        let ticks = (2.0 * state.spawner.spawn_interval / DT) as u32 + 2;
        for _ in 0..ticks {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.spawner.meteors.is_empty());
        assert_eq!(state.config.level, 1);
    }

    #[test]
    fn test_mode_switch_gated_by_landing_distance() {
        let mut state = playing_state();
        // Mid-air: far above the ground line, switch refused
        tick(
            &mut state,
            &TickInput {
                switch_mode: true,
                ..TickInput::default()
            },
            DT,
        );
        assert_eq!(state.mode, PlayerMode::Ship);

        // Dive to the bottom of the lane, then the switch goes through
        for _ in 0..240 {
            tick(
                &mut state,
                &TickInput {
                    down: true,
                    ..TickInput::default()
                },
                DT,
            );
        }
        state.spawner.meteors.push(Meteor::new(
            Rect::new(700, 100, 40, 40),
            Vec2::new(-100.0, 0.0),
        ));
        tick(
            &mut state,
            &TickInput {
                switch_mode: true,
                ..TickInput::default()
            },
            DT,
        );
        assert_eq!(state.mode, PlayerMode::Platformer);
        assert!(state.spawner.meteors.is_empty(), "landing clears meteors");
        assert_eq!(
            state.astronaut.rect.center_x(),
            state.ship.rect.center_x()
        );
    }

    #[test]
    fn test_boarding_gated_by_distance_to_ship() {
        let mut state = playing_state();
        for _ in 0..240 {
            tick(
                &mut state,
                &TickInput {
                    down: true,
                    ..TickInput::default()
                },
                DT,
            );
        }
        tick(
            &mut state,
            &TickInput {
                switch_mode: true,
                ..TickInput::default()
            },
            DT,
        );
        assert_eq!(state.mode, PlayerMode::Platformer);

        // The astronaut starts where the ship landed, so boarding is in range
        tick(
            &mut state,
            &TickInput {
                switch_mode: true,
                ..TickInput::default()
            },
            DT,
        );
        assert_eq!(state.mode, PlayerMode::Ship);

        // March out of boarding range and the switch is refused
        tick(
            &mut state,
            &TickInput {
                switch_mode: true,
                ..TickInput::default()
            },
            DT,
        );
        assert_eq!(state.mode, PlayerMode::Platformer);
        for _ in 0..120 {
            tick(
                &mut state,
                &TickInput {
                    right: true,
                    ..TickInput::default()
                },
                DT,
            );
        }
        tick(
            &mut state,
            &TickInput {
                switch_mode: true,
                ..TickInput::default()
            },
            DT,
        );
        assert_eq!(state.mode, PlayerMode::Platformer);
    }

    #[test]
    fn test_difficulty_ramp_tightens_spawn_interval() {
        let mut state = playing_state();
        // Gate spawning off so no meteor can reach the ship during the wait;
        // the ramp is time based and ticks on regardless
        state.config.kills = state.config.required_kills;
        let before = state.spawner.spawn_interval;
        let ticks = (DIFFICULTY_RAMP_SECS / DT) as u32 + 2;
        for _ in 0..ticks {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.spawner.spawn_interval < before);
    }

    #[test]
    fn test_sessions_with_same_seed_are_identical() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        let script = |i: u64| TickInput {
            start: i == 0,
            up: (i / 40) % 2 == 0,
            down: (i / 40) % 2 == 1,
            shoot: true,
            ..TickInput::default()
        };
        for i in 0..600 {
            let input = script(i);
            tick(&mut a, &input, DT);
            tick(&mut b, &input, DT);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.spawner.meteors.len(), b.spawner.meteors.len());
        for (ma, mb) in a.spawner.meteors.iter().zip(&b.spawner.meteors) {
            assert_eq!(ma.rect, mb.rect);
        }
    }

    #[test]
    fn test_remove_indices_compacts_after_scan() {
        let mut items = vec![10, 11, 12, 13, 14];
        remove_indices(&mut items, &[0, 3]);
        assert_eq!(items, vec![11, 12, 14]);
    }
}
