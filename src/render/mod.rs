//! Rendering boundary
//!
//! The simulation never draws. Each frame it is turned into an ordered list
//! of [`DrawCommand`]s that a [`RenderSink`] consumes. On the web the sink is
//! a Canvas 2D backend.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Aabb, GameState, ObstacleKind};

/// One drawing instruction, in back-to-front order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DrawCommand {
    /// Clear and paint the backdrop and ground strip
    Background { size: Vec2, ground_line: f32 },
    /// Player sprite covering `rect`
    Player { rect: Aabb, grounded: bool },
    /// Obstacle sprite covering `rect`
    Obstacle { rect: Aabb, kind: ObstacleKind },
}

/// Consumer of per-frame draw lists
pub trait RenderSink {
    fn present(&mut self, commands: &[DrawCommand]);
}

/// Keeps the most recent draw list (tests, debugging)
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: u64,
    pub last: Vec<DrawCommand>,
}

impl RenderSink for RecordingRenderer {
    fn present(&mut self, commands: &[DrawCommand]) {
        self.frames += 1;
        self.last.clear();
        self.last.extend_from_slice(commands);
    }
}

/// Build the draw list for the current state: background, player, obstacles in spawn order
pub fn build_draw_list(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(state.obstacles.len() + 2);
    commands.push(DrawCommand::Background {
        size: state.tuning.playfield,
        ground_line: state.ground_line(),
    });
    commands.push(DrawCommand::Player {
        rect: state.player.bounds(),
        grounded: state.player.is_grounded(),
    });
    commands.extend(state.obstacles.iter().map(|obs| DrawCommand::Obstacle {
        rect: obs.bounds(),
        kind: obs.kind,
    }));
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn test_draw_order() {
        let mut state = GameState::new(1, Tuning::default());
        state.spawn_obstacle(ObstacleKind::Burger);
        state.spawn_obstacle(ObstacleKind::Crate);

        let commands = build_draw_list(&state);
        assert_eq!(commands.len(), 4);
        assert!(matches!(commands[0], DrawCommand::Background { ground_line, .. } if ground_line == 380.0));
        assert!(matches!(commands[1], DrawCommand::Player { grounded: false, .. }));
        assert!(matches!(commands[2], DrawCommand::Obstacle { kind: ObstacleKind::Burger, .. }));
        assert!(matches!(commands[3], DrawCommand::Obstacle { kind: ObstacleKind::Crate, .. }));
    }

    #[test]
    fn test_player_rect_matches_entity() {
        let state = GameState::new(1, Tuning::default());
        let commands = build_draw_list(&state);
        let DrawCommand::Player { rect, .. } = commands[1] else {
            panic!("expected player command");
        };
        assert_eq!(rect.min, state.player.pos);
        assert_eq!(rect.size, state.player.size);
    }
}
