//! Astro Assault entry point
//!
//! This build has no windowed frontend: the binary drives a scripted session
//! through the same fixed-timestep accumulator loop a renderer would use,
//! which doubles as a smoke run of the whole simulation stack.

use astro_assault::Settings;
use astro_assault::audio::{AudioSink, NullAudio, cue_for};
use astro_assault::consts::*;
use astro_assault::sim::{GamePhase, GameState, TickInput, tick};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(7);
    let settings = Settings::load();
    log::info!(
        "astro-assault (headless) starting, seed {}, sfx gain {:.2}",
        seed,
        settings.sfx_gain()
    );

    let mut state = GameState::new(seed);
    let mut audio = NullAudio;

    // Out of the menu
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..TickInput::default()
        },
        SIM_DT,
    );

    // Thirty scripted seconds at a pretend 30 Hz frame rate: the accumulator
    // runs two sim ticks per frame, drifting up and down the lane while
    // holding the trigger
    let frame_dt = 1.0 / 30.0;
    let mut accumulator = 0.0f32;
    let mut ticks: u64 = 0;
    'frames: for _ in 0..(30.0 / frame_dt) as u32 {
        accumulator += frame_dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                up: (ticks / 120) % 2 == 0,
                down: (ticks / 120) % 2 == 1,
                shoot: true,
                ..TickInput::default()
            };
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
            ticks += 1;

            for event in state.drain_events() {
                log::debug!("event: {event:?}");
                if let Some(cue) = cue_for(&event) {
                    audio.play(cue);
                }
            }
            if state.phase == GamePhase::GameOver {
                break 'frames;
            }
        }
    }

    println!(
        "session over: score {}, lives {}, level {}, wave {}/{}, {} meteors in flight",
        state.score,
        state.lives,
        state.config.level,
        state.wave.current,
        state.wave.wave_count,
        state.spawner.meteors.len()
    );
}
