//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives in [`Tuning`]. The
//! defaults reproduce the canonical game; a JSON document can override any
//! subset of fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;
use crate::sim::ObstacleKind;

/// One row of the spawn classification table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnWeight {
    pub kind: ObstacleKind,
    pub weight: f32,
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield size in pixels
    pub playfield: Vec2,
    /// Height of the ground strip; the ground line is `playfield.y - ground_thickness`
    pub ground_thickness: f32,
    /// Downward acceleration per reference frame
    pub gravity: f32,
    /// Leftward obstacle speed per reference frame
    pub scroll_speed: f32,
    /// Player top-left corner at session start
    pub player_start: Vec2,
    pub player_size: Vec2,
    pub jump_impulse: f32,
    pub obstacle_size: Vec2,
    pub spawn_interval_ms: f32,
    pub collect_reward: u32,
    /// Weighted classification of spawned obstacles
    pub spawn_table: Vec<SpawnWeight>,
    /// Frame deltas above this are capped
    pub max_frame_delta_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield: Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
            ground_thickness: GROUND_THICKNESS,
            gravity: GRAVITY,
            scroll_speed: SCROLL_SPEED,
            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            jump_impulse: JUMP_IMPULSE,
            obstacle_size: Vec2::splat(OBSTACLE_SIZE),
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            collect_reward: COLLECT_REWARD,
            spawn_table: vec![
                SpawnWeight { kind: ObstacleKind::Burger, weight: 0.5 },
                SpawnWeight { kind: ObstacleKind::Chocolate, weight: 0.3 },
                SpawnWeight { kind: ObstacleKind::Crate, weight: 0.2 },
            ],
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// y-coordinate of the playfield floor
    pub fn ground_line(&self) -> f32 {
        self.playfield.y - self.ground_thickness
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("playfield.x", self.playfield.x),
            ("playfield.y", self.playfield.y),
            ("player_size.x", self.player_size.x),
            ("player_size.y", self.player_size.y),
            ("obstacle_size.x", self.obstacle_size.x),
            ("obstacle_size.y", self.obstacle_size.y),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("max_frame_delta_ms", self.max_frame_delta_ms),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        let ground_line = self.ground_line();
        if ground_line.is_nan() || ground_line <= 0.0 || ground_line > self.playfield.y {
            return Err(TuningError::GroundOutsidePlayfield {
                ground_line,
                height: self.playfield.y,
            });
        }

        if let Some(bad) = self.spawn_table.iter().find(|w| w.weight < 0.0) {
            return Err(TuningError::NegativeWeight {
                kind: bad.kind.as_str().to_string(),
                weight: bad.weight,
            });
        }
        if !self.spawn_table.iter().any(|w| w.weight > 0.0) {
            return Err(TuningError::EmptySpawnTable);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.ground_line(), 380.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "scroll_speed": 6.5, "collect_reward": 25 }"#).unwrap();
        assert_eq!(tuning.scroll_speed, 6.5);
        assert_eq!(tuning.collect_reward, 25);
        assert_eq!(tuning.gravity, GRAVITY);
        assert_eq!(tuning.spawn_table.len(), 3);
    }

    #[test]
    fn test_spawn_table_from_json() {
        let tuning = Tuning::from_json(
            r#"{ "spawn_table": [ { "kind": "crate", "weight": 1.0 } ] }"#,
        )
        .unwrap();
        assert_eq!(tuning.spawn_table[0].kind, ObstacleKind::Crate);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_interval_ms": 0 }"#),
            Err(TuningError::NotPositive { field: "spawn_interval_ms", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_table": [] }"#),
            Err(TuningError::EmptySpawnTable)
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_table": [ { "kind": "burger", "weight": -1 } ] }"#),
            Err(TuningError::NegativeWeight { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "ground_thickness": 500 }"#),
            Err(TuningError::GroundOutsidePlayfield { .. })
        ));
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_json_roundtrip_preserves_table() {
        let tuning = Tuning::default();
        let parsed = Tuning::from_json(&tuning.to_json().unwrap()).unwrap();
        assert_eq!(parsed, tuning);
    }
}
