//! Per-frame simulation update
//!
//! Order within a frame: apply queued input, advance time, spawn, move the
//! player, steer the swarm, hit-test. Frame deltas are variable; spawning
//! catches up on long frames.

use std::mem;

use super::intent::movement_intent;
use super::state::{GamePhase, GameState, Player};
use crate::platform::input::{InputEvent, Key};

/// Advance the game by one host frame of `delta_ms` milliseconds
pub fn tick(state: &mut GameState, delta_ms: f32) {
    // Input first so the frame sees the latest key and joystick state
    if !state.events.is_empty() {
        let mut events = mem::take(&mut state.events);
        for event in events.drain() {
            apply_event(state, event);
        }
    }

    // Frozen world after game over
    if state.phase != GamePhase::Playing {
        return;
    }

    let delta_ms = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
    let dt = delta_ms / 1000.0;

    state.elapsed_ms += delta_ms as f64;

    // Difficulty ramp
    let t = state.elapsed_secs();
    let interval_ms = state.tuning.difficulty.spawn_interval_ms(t);
    let speed_bonus = state.tuning.difficulty.speed_bonus(t);

    // Spawn bots
    let spawns = state.spawner.advance(
        delta_ms,
        interval_ms,
        state.swarm.len(),
        state.tuning.max_pursuers,
    );
    for _ in 0..spawns {
        state.spawn_pursuer();
    }
    if spawns > 0 {
        log::debug!(
            "Spawned {} pursuer(s) at {} (interval {}ms, {} live)",
            spawns,
            state.uptime(),
            interval_ms,
            state.swarm.len()
        );
    }

    // Player movement (keyboard + joystick)
    let intent = movement_intent(&state.keys, state.joystick.dir);
    let arena = state.tuning.arena();
    state.player.step(intent, dt, arena);

    // Chase and collide
    if let Some(id) = state.swarm.step_all(
        state.player.pos,
        dt,
        speed_bonus,
        state.tuning.collision_threshold,
    ) {
        game_over(state, id);
    }
}

/// Apply one input event immediately
///
/// Pointer-down and the restart key restart the round while game over;
/// otherwise pointer events drive the joystick.
pub fn apply_event(state: &mut GameState, event: InputEvent) {
    match event {
        InputEvent::KeyDown(key) => {
            state.keys.press(key);
            if key == Key::R && state.is_game_over() {
                restart(state);
            }
        }
        InputEvent::KeyUp(key) => state.keys.release(key),
        InputEvent::PointerDown { id, pos } => {
            if state.is_game_over() {
                restart(state);
            } else {
                let playing = state.phase == GamePhase::Playing;
                state.joystick.pointer_down(id, pos, playing);
            }
        }
        InputEvent::PointerMove { id, pos } => state.joystick.pointer_move(id, pos),
        InputEvent::PointerUp { id, .. } | InputEvent::PointerCancel { id } => {
            state.joystick.pointer_up(id)
        }
        InputEvent::FocusLost => state.keys.clear(),
    }
}

fn game_over(state: &mut GameState, pursuer_id: u32) {
    state.phase = GamePhase::GameOver;
    log::info!(
        "Game over: survived {} with {} pursuers (caught by #{})",
        state.uptime(),
        state.swarm.len(),
        pursuer_id
    );
}

/// Start a fresh round: empty swarm, centered player, zeroed timers
///
/// The RNG stream and joystick ownership carry over.
pub fn restart(state: &mut GameState) {
    state.swarm.clear();
    state.player = Player::new(&state.tuning);
    state.spawner.reset();
    state.elapsed_ms = 0.0;
    state.phase = GamePhase::Playing;
    log::info!("Game restarted (seed {})", state.seed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    const FRAME_MS: f32 = 1000.0 / 60.0;

    fn no_spawns() -> GameState {
        GameState::with_tuning(
            1,
            Tuning {
                max_pursuers: 0,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_fresh_session() {
        let mut state = GameState::new(12345);
        tick(&mut state, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::new(400.0, 225.0));
        assert!(state.swarm.is_empty());
        assert_eq!(state.elapsed_secs(), 0);
    }

    #[test]
    fn test_first_spawn_after_interval() {
        let mut state = GameState::new(12345);
        tick(&mut state, 899.0);
        assert_eq!(state.swarm.len(), 0);
        tick(&mut state, 1.0);
        assert_eq!(state.swarm.len(), 1);
    }

    #[test]
    fn test_long_frame_catch_up() {
        let mut state = GameState::new(12345);
        // After 9.0s the interval is 810ms, so 9000ms holds 11 whole intervals
        tick(&mut state, 9000.0);
        let interval = state.tuning.difficulty.spawn_interval_ms(9);
        assert_eq!(interval, 810.0);
        assert_eq!(state.swarm.len(), (9000.0 / interval).floor() as usize);
    }

    #[test]
    fn test_cap_respected() {
        let mut state = GameState::with_tuning(
            7,
            Tuning {
                max_pursuers: 5,
                ..Default::default()
            },
        );
        tick(&mut state, 60_000.0);
        assert_eq!(state.swarm.len(), 5);
    }

    #[test]
    fn test_negative_and_nan_delta_ignored() {
        let mut state = GameState::new(1);
        tick(&mut state, -5000.0);
        tick(&mut state, f32::NAN);
        assert_eq!(state.elapsed_ms, 0.0);
        assert_eq!(state.spawner.timer_ms(), 0.0);
    }

    #[test]
    fn test_keyboard_moves_player() {
        let mut state = no_spawns();
        state.push_event(InputEvent::KeyDown(Key::D));
        tick(&mut state, 500.0);
        assert!((state.player.pos.x - 510.0).abs() < 1e-3);
        assert_eq!(state.player.pos.y, 225.0);

        state.push_event(InputEvent::KeyUp(Key::D));
        tick(&mut state, 500.0);
        assert!((state.player.pos.x - 510.0).abs() < 1e-3);
    }

    #[test]
    fn test_joystick_moves_player() {
        let mut state = no_spawns();
        state.push_event(InputEvent::PointerDown {
            id: 1,
            pos: Vec2::new(100.0, 200.0),
        });
        // Small deflection straight up still moves at full speed
        state.push_event(InputEvent::PointerMove {
            id: 1,
            pos: Vec2::new(100.0, 190.0),
        });
        tick(&mut state, 100.0);
        assert!((state.player.pos.y - 203.0).abs() < 1e-3);
        assert!((state.player.pos.x - 400.0).abs() < 1e-3);

        state.push_event(InputEvent::PointerCancel { id: 1 });
        tick(&mut state, 100.0);
        assert!((state.player.pos.y - 203.0).abs() < 1e-3);
    }

    #[test]
    fn test_focus_lost_releases_keys() {
        let mut state = no_spawns();
        state.push_event(InputEvent::KeyDown(Key::D));
        state.push_event(InputEvent::KeyDown(Key::ArrowUp));
        tick(&mut state, 100.0);
        let moved = state.player.pos;
        assert_ne!(moved, Vec2::new(400.0, 225.0));

        state.push_event(InputEvent::FocusLost);
        tick(&mut state, 500.0);
        assert_eq!(state.player.pos, moved);
        assert_eq!(state.keys, Default::default());
    }

    #[test]
    fn test_bad_tuning_is_clamped_before_ticking() {
        let mut state = GameState::with_tuning(
            3,
            Tuning {
                arena_height: -5.0,
                arena_width: f32::NAN,
                joystick_radius: 0.0,
                ..Default::default()
            },
        );
        assert_eq!(state.tuning.arena(), Vec2::new(800.0, 450.0));
        assert_eq!(state.tuning.joystick_radius, 44.0);

        // Spawns draw edge positions from the arena size
        tick(&mut state, 1000.0);
        assert_eq!(state.swarm.len(), 1);

        // A pointer resting on its anchor leaves the player still
        let mut state = GameState::with_tuning(
            3,
            Tuning {
                joystick_radius: 0.0,
                max_pursuers: 0,
                ..Default::default()
            },
        );
        let start = state.player.pos;
        let anchor = Vec2::new(200.0, 200.0);
        state.push_event(InputEvent::PointerDown { id: 1, pos: anchor });
        state.push_event(InputEvent::PointerMove { id: 1, pos: anchor });
        tick(&mut state, 1000.0);
        assert!(state.joystick.active);
        assert_eq!(state.joystick.dir, Vec2::ZERO);
        assert_eq!(state.player.pos, start);
    }

    #[test]
    fn test_events_wait_for_tick() {
        let mut state = no_spawns();
        state.push_event(InputEvent::KeyDown(Key::W));
        assert_eq!(state.pending_events(), 1);
        assert!(!state.keys.is_held(Key::W));
        tick(&mut state, 0.0);
        assert_eq!(state.pending_events(), 0);
        assert!(state.keys.is_held(Key::W));
    }

    #[test]
    fn test_collision_ends_game_and_freezes_world() {
        let mut state = no_spawns();
        let player = state.player.pos;
        state
            .swarm
            .spawn(player + Vec2::new(30.0, 0.0), 70.0, 9.0, 0);

        let mut frames = 0;
        while !state.is_game_over() && frames < 600 {
            tick(&mut state, FRAME_MS);
            frames += 1;
        }
        assert!(state.is_game_over());

        let frozen_player = state.player.pos;
        let frozen: Vec<_> = state.swarm.iter().map(|p| p.pos).collect();
        let elapsed = state.elapsed_ms;

        state.push_event(InputEvent::KeyDown(Key::A));
        for _ in 0..30 {
            tick(&mut state, FRAME_MS);
        }
        assert_eq!(state.player.pos, frozen_player);
        assert_eq!(state.swarm.iter().map(|p| p.pos).collect::<Vec<_>>(), frozen);
        assert_eq!(state.elapsed_ms, elapsed);
    }

    #[test]
    fn test_restart_key_only_when_game_over() {
        let mut state = GameState::new(9);
        tick(&mut state, 2000.0);
        let live = state.swarm.len();
        assert!(live > 0);

        state.push_event(InputEvent::KeyDown(Key::R));
        tick(&mut state, 0.0);
        assert_eq!(state.swarm.len(), live);

        state.phase = GamePhase::GameOver;
        state.push_event(InputEvent::KeyUp(Key::R));
        state.push_event(InputEvent::KeyDown(Key::R));
        tick(&mut state, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.swarm.is_empty());
        assert_eq!(state.elapsed_secs(), 0);
    }

    #[test]
    fn test_pointer_down_restarts_without_grabbing_joystick() {
        let mut state = GameState::new(9);
        tick(&mut state, 3000.0);
        state.player.pos = Vec2::new(50.0, 50.0);
        state.phase = GamePhase::GameOver;

        state.push_event(InputEvent::PointerDown {
            id: 4,
            pos: Vec2::new(100.0, 100.0),
        });
        tick(&mut state, 0.0);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::new(400.0, 225.0));
        assert!(state.swarm.is_empty());
        assert_eq!(state.spawner.timer_ms(), 0.0);
        assert!(!state.joystick.active);
    }

    #[test]
    fn test_restart_resets_difficulty() {
        let mut state = GameState::new(9);
        tick(&mut state, 30_000.0);
        assert_eq!(state.elapsed_secs(), 30);

        restart(&mut state);
        assert_eq!(state.elapsed_secs(), 0);
        assert_eq!(
            state.tuning.difficulty.spawn_interval_ms(state.elapsed_secs()),
            900.0
        );
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            Some(InputEvent::KeyDown(Key::W)),
            None,
            Some(InputEvent::KeyDown(Key::A)),
            Some(InputEvent::KeyUp(Key::W)),
            None,
        ];

        for input in inputs.iter().cycle().take(200) {
            if let Some(event) = input {
                state1.push_event(*event);
                state2.push_event(*event);
            }
            tick(&mut state1, 37.0);
            tick(&mut state2, 37.0);
        }

        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.player.pos, state2.player.pos);
        let p1: Vec<_> = state1.swarm.iter().map(|p| p.pos).collect();
        let p2: Vec<_> = state2.swarm.iter().map(|p| p.pos).collect();
        assert_eq!(p1, p2);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_arena(
            deltas in prop::collection::vec(0.0f32..5000.0, 1..40),
            keys in prop::collection::vec(0usize..8, 0..4),
            joy in (0.0f32..800.0, 0.0f32..450.0),
        ) {
            let mut state = no_spawns();
            for k in keys {
                state.push_event(InputEvent::KeyDown(Key::DIRECTIONAL[k]));
            }
            state.push_event(InputEvent::PointerDown { id: 1, pos: Vec2::new(200.0, 200.0) });
            state.push_event(InputEvent::PointerMove { id: 1, pos: Vec2::new(joy.0, joy.1) });

            for delta in deltas {
                tick(&mut state, delta);
                let p = state.player.pos;
                prop_assert!((12.0..=788.0).contains(&p.x));
                prop_assert!((12.0..=438.0).contains(&p.y));
            }
        }

        #[test]
        fn prop_population_capped(deltas in prop::collection::vec(0.0f32..100_000.0, 1..30)) {
            let mut state = GameState::new(1);
            for delta in deltas {
                tick(&mut state, delta);
                prop_assert!(state.swarm.len() <= state.tuning.max_pursuers);
                if state.is_game_over() {
                    restart(&mut state);
                }
            }
        }
    }
}
