//! Session state and core simulation types
//!
//! Everything one run mutates lives in [`GameState`]; restarting a run means
//! replacing it with a fresh one.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleKind};
use super::player::Player;
use super::spawner::{SpawnTable, Spawner};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started yet (start screen, assets loading)
    Waiting,
    /// Frames advance the simulation
    Running,
    /// A hazard was hit; frozen until restart
    Over,
}

/// Notifications produced by the simulation for UI/audio collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player left the ground
    Jumped,
    /// A new obstacle entered at the right edge
    Spawned { id: u32, kind: ObstacleKind },
    /// A collectible was consumed; `score` is the new total
    Collected { kind: ObstacleKind, score: u32 },
    /// Score changed this frame (at most once per frame)
    ScoreChanged(u32),
    /// The run ended
    GameOver { final_score: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    /// Set by the collision engine; the loop controller turns it into `Over`
    pub game_over: bool,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub spawner: Spawner,
    /// Frames simulated this run
    pub frame_count: u64,
    /// Pending notifications, drained by the loop controller
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh session in the `Waiting` phase
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(tuning.player_start, tuning.player_size, tuning.jump_impulse);
        let spawner = Spawner::new(tuning.spawn_interval_ms, SpawnTable::new(&tuning.spawn_table));
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Waiting,
            score: 0,
            game_over: false,
            player,
            obstacles: Vec::new(),
            spawner,
            frame_count: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// y-coordinate of the floor
    pub fn ground_line(&self) -> f32 {
        self.tuning.ground_line()
    }

    /// Reinitialize for a new run with `seed`, keeping the tuning, and enter `Running`
    pub fn restart(&mut self, seed: u64) {
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::new(seed, tuning);
        self.phase = GamePhase::Running;
    }

    /// Spawn an obstacle of `kind` at the right edge
    pub fn spawn_obstacle(&mut self, kind: ObstacleKind) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle::spawn(
            id,
            kind,
            self.tuning.obstacle_size,
            self.tuning.playfield.x,
            self.ground_line(),
        ));
        id
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
