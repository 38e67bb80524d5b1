//! The player character: vertical physics with a single jump command

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Vertical movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Subject to gravity, cannot jump
    Airborne,
    /// Resting on the ground line, may jump
    Grounded,
}

/// The player entity (pure data plus its own integration step)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity per reference frame (negative is up)
    pub vel_y: f32,
    pub jump_impulse: f32,
    pub state: PlayerState,
}

impl Player {
    /// A player dropped in at `pos`; the first update settles it onto the ground
    pub fn new(pos: Vec2, size: Vec2, jump_impulse: f32) -> Self {
        Self {
            pos,
            size,
            vel_y: 0.0,
            jump_impulse,
            state: PlayerState::Airborne,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.state == PlayerState::Grounded
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Integrate one frame. `scale` is the frame's fraction of a reference frame.
    pub fn update(&mut self, scale: f32, gravity: f32, ground_line: f32) {
        match self.state {
            PlayerState::Airborne => self.vel_y += gravity * scale,
            PlayerState::Grounded => self.vel_y = 0.0,
        }
        self.pos.y += self.vel_y * scale;

        if self.pos.y + self.size.y >= ground_line {
            self.pos.y = ground_line - self.size.y;
            self.state = PlayerState::Grounded;
        } else {
            self.state = PlayerState::Airborne;
        }
    }

    /// Leave the ground. Returns false (and changes nothing) while airborne.
    pub fn jump(&mut self) -> bool {
        if self.state != PlayerState::Grounded {
            return false;
        }
        self.vel_y = -self.jump_impulse;
        self.state = PlayerState::Airborne;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const GROUND: f32 = 380.0;
    const GRAVITY: f32 = 0.6;

    fn player() -> Player {
        Player::new(Vec2::new(50.0, 320.0), Vec2::new(64.0, 40.0), 12.0)
    }

    fn grounded_player() -> Player {
        let mut p = player();
        for _ in 0..60 {
            p.update(1.0, GRAVITY, GROUND);
        }
        assert!(p.is_grounded());
        p
    }

    #[test]
    fn test_falls_and_lands_on_ground() {
        let p = grounded_player();
        assert_eq!(p.pos.y, GROUND - p.size.y);
        assert_eq!(p.vel_y, 0.0);
    }

    #[test]
    fn test_jump_from_ground() {
        let mut p = grounded_player();
        assert!(p.jump());
        assert_eq!(p.vel_y, -12.0);
        assert_eq!(p.state, PlayerState::Airborne);
    }

    #[test]
    fn test_no_double_jump() {
        let mut p = grounded_player();
        p.jump();
        p.update(1.0, GRAVITY, GROUND);
        let before = p.clone();
        assert!(!p.jump());
        assert_eq!(p, before);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut p = grounded_player();
        p.jump();
        let mut peak = p.pos.y;
        for _ in 0..120 {
            p.update(1.0, GRAVITY, GROUND);
            peak = peak.min(p.pos.y);
        }
        assert!(p.is_grounded());
        // v²/2g = 144/1.2 = 120 px in the continuous limit
        assert!(GROUND - p.size.y - peak > 100.0);
    }

    #[test]
    fn test_zero_delta_changes_nothing() {
        let mut airborne = player();
        airborne.vel_y = -3.0;
        let before = airborne.clone();
        airborne.update(0.0, GRAVITY, GROUND);
        assert_eq!(airborne, before);

        let mut grounded = grounded_player();
        let before = grounded.clone();
        grounded.update(0.0, GRAVITY, GROUND);
        assert_eq!(grounded, before);
    }

    proptest! {
        #[test]
        fn prop_never_sinks_below_ground(
            scales in prop::collection::vec(0.0f32..20.0, 1..50),
            jump_at in 0usize..50,
        ) {
            let mut p = player();
            for (i, scale) in scales.iter().enumerate() {
                if i == jump_at {
                    p.jump();
                }
                p.update(*scale, GRAVITY, GROUND);
                prop_assert!(p.pos.y <= GROUND - p.size.y);
                prop_assert_eq!(p.is_grounded(), p.pos.y == GROUND - p.size.y);
            }
        }
    }
}
