//! One simulation frame
//!
//! The host calls [`run_frame`] once per animation frame and decides from the
//! returned [`LoopControl`] whether to schedule another.

use super::collision::resolve_collisions;
use super::state::{GameEvent, GamePhase, GameState};
use super::timestep::frame_scale;

/// Input commands collected since the previous frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Jump requested (any number of presses collapse into one)
    pub jump: bool,
}

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Request another frame
    Continue,
    /// Stop requesting frames
    Stop,
}

/// Advance the session by `delta_ms` (already clamped by the timestep)
pub fn run_frame(state: &mut GameState, input: &FrameInput, delta_ms: f32) -> LoopControl {
    if state.phase != GamePhase::Running {
        return LoopControl::Stop;
    }

    let delta_ms = delta_ms.max(0.0);
    let scale = frame_scale(delta_ms);
    let ground_line = state.ground_line();
    state.frame_count += 1;

    if input.jump && state.player.jump() {
        state.events.push(GameEvent::Jumped);
    }
    state
        .player
        .update(scale, state.tuning.gravity, ground_line);

    if let Some(kind) = state.spawner.tick(delta_ms, &mut state.rng) {
        let id = state.spawn_obstacle(kind);
        log::debug!("Spawned {} #{}", kind.as_str(), id);
        state.events.push(GameEvent::Spawned { id, kind });
    }
    let scroll_speed = state.tuning.scroll_speed;
    for obs in &mut state.obstacles {
        obs.update(scale, scroll_speed);
    }

    let report = resolve_collisions(state);
    if report.removed() > 0 {
        log::debug!(
            "Frame {}: removed {} obstacles ({} collected)",
            state.frame_count,
            report.removed(),
            report.collected.len()
        );
    }

    if state.game_over {
        state.phase = GamePhase::Over;
        log::info!(
            "Game over after {} frames, score {}",
            state.frame_count,
            state.score
        );
        LoopControl::Stop
    } else {
        LoopControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::REFERENCE_FRAME_MS;
    use crate::sim::obstacle::ObstacleKind;
    use glam::Vec2;
    use proptest::prelude::*;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        state.restart(seed);
        state
    }

    fn settle(state: &mut GameState) {
        // Let the player land, keeping the spawner quiet
        for _ in 0..30 {
            state.spawner.countdown_ms = f32::MAX;
            run_frame(state, &FrameInput::default(), REFERENCE_FRAME_MS);
        }
        state.obstacles.clear();
        state.events.clear();
        assert!(state.player.is_grounded());
    }

    #[test]
    fn test_waiting_and_over_do_not_advance() {
        let mut state = GameState::new(3, Tuning::default());
        let before = state.player.clone();
        assert_eq!(
            run_frame(&mut state, &FrameInput { jump: true }, 16.0),
            LoopControl::Stop
        );
        assert_eq!(state.player, before);
        assert_eq!(state.frame_count, 0);

        state.phase = GamePhase::Over;
        assert_eq!(run_frame(&mut state, &FrameInput::default(), 16.0), LoopControl::Stop);
        assert_eq!(state.frame_count, 0);
    }

    #[test]
    fn test_first_frame_spawns_at_right_edge() {
        let mut state = running(5);
        assert_eq!(run_frame(&mut state, &FrameInput::default(), 0.0), LoopControl::Continue);
        assert_eq!(state.obstacles.len(), 1);
        // Zero delta: spawned but not yet moved
        assert_eq!(state.obstacles[0].pos.x, 800.0);
        assert!(matches!(state.events[0], GameEvent::Spawned { .. }));
    }

    #[test]
    fn test_zero_delta_is_motionless() {
        let mut state = running(9);
        run_frame(&mut state, &FrameInput::default(), REFERENCE_FRAME_MS);
        run_frame(&mut state, &FrameInput::default(), REFERENCE_FRAME_MS);
        let player = state.player.clone();
        let obstacles = state.obstacles.clone();

        run_frame(&mut state, &FrameInput::default(), 0.0);
        assert_eq!(state.player, player);
        assert_eq!(state.obstacles, obstacles);
    }

    #[test]
    fn test_jump_input_applies_once() {
        let mut state = running(11);
        settle(&mut state);

        run_frame(&mut state, &FrameInput { jump: true }, REFERENCE_FRAME_MS);
        assert!(!state.player.is_grounded());
        let vel_after_jump = state.player.vel_y;
        assert!(vel_after_jump < 0.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);

        // Holding jump in the air has no effect beyond gravity
        run_frame(&mut state, &FrameInput { jump: true }, REFERENCE_FRAME_MS);
        assert!((state.player.vel_y - (vel_after_jump + 0.6)).abs() < 1e-4);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_obstacles_scroll_with_frame_scale() {
        let mut state = running(13);
        settle(&mut state);
        state.spawn_obstacle(ObstacleKind::Burger);
        run_frame(&mut state, &FrameInput::default(), REFERENCE_FRAME_MS * 2.0);
        assert!((state.obstacles[0].pos.x - 792.0).abs() < 1e-3);
    }

    #[test]
    fn test_hazard_collision_stops_loop() {
        let mut state = running(17);
        settle(&mut state);
        let id = state.spawn_obstacle(ObstacleKind::Crate);
        let player_x = state.player.pos.x;
        state.obstacles[0].pos.x = player_x + 10.0;

        assert_eq!(
            run_frame(&mut state, &FrameInput::default(), REFERENCE_FRAME_MS),
            LoopControl::Stop
        );
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.obstacles[0].id, id);
        assert!(state.events.contains(&GameEvent::GameOver { final_score: 0 }));
    }

    #[test]
    fn test_collect_on_the_run() {
        let mut state = running(19);
        settle(&mut state);
        state.spawn_obstacle(ObstacleKind::Chocolate);
        state.obstacles[0].pos = Vec2::new(120.0, 350.0);

        // Scrolls 4 px per frame into the player's right edge at 114
        let mut frames = 0;
        while state.score == 0 && frames < 10 {
            state.spawner.countdown_ms = f32::MAX;
            assert_eq!(
                run_frame(&mut state, &FrameInput::default(), REFERENCE_FRAME_MS),
                LoopControl::Continue
            );
            frames += 1;
        }
        assert_eq!(state.score, 10);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_offscreen_obstacle_removed_next_frame() {
        let mut state = running(23);
        settle(&mut state);
        state.spawn_obstacle(ObstacleKind::Crate);
        // Right edge at -1
        state.obstacles[0].pos.x = -31.0;
        state.player.pos.x = -20.0;

        assert_eq!(
            run_frame(&mut state, &FrameInput::default(), REFERENCE_FRAME_MS),
            LoopControl::Continue
        );
        assert!(state.obstacles.is_empty());
        assert!(!state.game_over);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = running(99);
        let mut b = running(99);
        for i in 0..600 {
            let input = FrameInput { jump: i % 45 == 0 };
            run_frame(&mut a, &input, 16.0);
            run_frame(&mut b, &input, 16.0);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.player, b.player);
    }

    fn kind_strategy() -> impl Strategy<Value = ObstacleKind> {
        prop_oneof![
            Just(ObstacleKind::Burger),
            Just(ObstacleKind::Chocolate),
            Just(ObstacleKind::Crate),
        ]
    }

    proptest! {
        #[test]
        fn prop_zero_delta_moves_nothing(
            y in 0.0f32..330.0,
            vel_y in -12.0f32..12.0,
            countdown in 1.0f32..1500.0,
            placed in prop::collection::vec((kind_strategy(), -100.0f32..900.0), 0..6),
        ) {
            let mut state = running(31);
            state.player.pos.y = y;
            state.player.vel_y = vel_y;
            state.spawner.countdown_ms = countdown;
            for (kind, x) in placed {
                let id = state.spawn_obstacle(kind);
                if let Some(obs) = state.obstacles.iter_mut().find(|o| o.id == id) {
                    obs.pos.x = x;
                }
            }
            let player = state.player.clone();
            let obstacles = state.obstacles.clone();

            run_frame(&mut state, &FrameInput::default(), 0.0);

            prop_assert_eq!(state.player.pos, player.pos);
            prop_assert_eq!(state.player.vel_y, player.vel_y);
            prop_assert_eq!(state.spawner.countdown_ms, countdown);
            for obs in &state.obstacles {
                let before = obstacles.iter().find(|o| o.id == obs.id);
                prop_assert_eq!(before.map(|o| o.pos), Some(obs.pos));
            }
        }
    }
}
