//! Scrolling obstacles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// What touching an obstacle does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    /// Collectible, the common one
    Burger,
    /// Collectible, less common
    Chocolate,
    /// Hazard: ends the run
    Crate,
}

impl ObstacleKind {
    pub fn is_collectible(self) -> bool {
        matches!(self, Self::Burger | Self::Chocolate)
    }

    pub fn is_hazard(self) -> bool {
        self == Self::Crate
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Burger => "burger",
            Self::Chocolate => "chocolate",
            Self::Crate => "crate",
        }
    }
}

/// An obstacle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    /// Place a new obstacle just past the right edge with its base on the ground
    pub fn spawn(id: u32, kind: ObstacleKind, size: Vec2, playfield_width: f32, ground_line: f32) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(playfield_width, ground_line - size.y),
            size,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Scroll left by `scroll_speed` per reference frame
    pub fn update(&mut self, scale: f32, scroll_speed: f32) {
        self.pos.x -= scroll_speed * scale;
    }

    /// Right edge has passed the left edge of the playfield
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_sits_on_ground_at_right_edge() {
        let obs = Obstacle::spawn(1, ObstacleKind::Burger, Vec2::splat(30.0), 800.0, 380.0);
        assert_eq!(obs.pos, Vec2::new(800.0, 350.0));
        assert_eq!(obs.pos.y + obs.size.y, 380.0);
    }

    #[test]
    fn test_update_is_pure_translation() {
        let mut obs = Obstacle::spawn(1, ObstacleKind::Crate, Vec2::splat(30.0), 800.0, 380.0);
        obs.update(2.0, 4.0);
        assert_eq!(obs.pos, Vec2::new(792.0, 350.0));
        obs.update(0.0, 4.0);
        assert_eq!(obs.pos.x, 792.0);
    }

    #[test]
    fn test_offscreen_uses_right_edge() {
        let mut obs = Obstacle::spawn(1, ObstacleKind::Chocolate, Vec2::splat(30.0), 800.0, 380.0);
        obs.pos.x = -30.0;
        assert!(!obs.is_offscreen());
        obs.pos.x = -31.0;
        assert!(obs.is_offscreen());
    }

    #[test]
    fn test_kind_classification() {
        assert!(ObstacleKind::Burger.is_collectible());
        assert!(ObstacleKind::Chocolate.is_collectible());
        assert!(ObstacleKind::Crate.is_hazard());
        assert!(!ObstacleKind::Crate.is_collectible());
    }
}
