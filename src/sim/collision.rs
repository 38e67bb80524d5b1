//! Axis-aligned collision detection and the scoring rules applied on contact

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleKind;
use super::state::{GameEvent, GameState};

/// Axis-aligned bounding box (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: boxes that only share an edge do not touch
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.min.x + other.size.x
            && self.min.x + self.size.x > other.min.x
            && self.min.y < other.min.y + other.size.y
            && self.min.y + self.size.y > other.min.y
    }
}

/// What one collision pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Collectibles consumed this frame, in evaluation order
    pub collected: Vec<ObstacleKind>,
    /// Obstacles that scrolled off the left edge
    pub despawned: usize,
    /// At least one hazard overlapped the player
    pub hazard_hit: bool,
}

impl CollisionReport {
    /// Number of obstacles removed from the live set
    pub fn removed(&self) -> usize {
        self.collected.len() + self.despawned
    }
}

/// Test the player against every live obstacle and apply the consequences.
///
/// Walks the set back to front so in-place removal never skips an entry.
/// Off-screen obstacles are removed before any overlap test. Collectibles
/// add the reward and disappear; any number of overlapping hazards set
/// `game_over` once.
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let player = state.player.bounds();
    let reward = state.tuning.collect_reward;
    let mut report = CollisionReport::default();

    for i in (0..state.obstacles.len()).rev() {
        let obs = &state.obstacles[i];

        if obs.is_offscreen() {
            state.obstacles.remove(i);
            report.despawned += 1;
            continue;
        }

        if !player.overlaps(&obs.bounds()) {
            continue;
        }

        let kind = obs.kind;
        if kind.is_collectible() {
            let obs = state.obstacles.remove(i);
            state.score = state.score.saturating_add(reward);
            report.collected.push(kind);
            log::debug!("Collected {} #{} (score {})", kind.as_str(), obs.id, state.score);
            state.events.push(GameEvent::Collected {
                kind,
                score: state.score,
            });
        } else {
            report.hazard_hit = true;
        }
    }

    if !report.collected.is_empty() {
        state.events.push(GameEvent::ScoreChanged(state.score));
    }

    if report.hazard_hit && !state.game_over {
        state.game_over = true;
        state.events.push(GameEvent::GameOver {
            final_score: state.score,
        });
    }

    report
}
