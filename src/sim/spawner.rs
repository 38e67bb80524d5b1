//! Timed obstacle generation with weighted classification

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleKind;
use crate::tuning::SpawnWeight;

/// Source of uniform draws in `[0, 1)`
pub trait UnitDraw {
    fn next_unit(&mut self) -> f32;
}

impl UnitDraw for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Always returns the same value (deterministic tests, replays)
#[derive(Debug, Clone, Copy)]
pub struct FixedDraw(pub f32);

impl UnitDraw for FixedDraw {
    fn next_unit(&mut self) -> f32 {
        self.0
    }
}

/// Cumulative weight table for categorical sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTable {
    /// (cumulative upper bound in [0, 1], kind), ascending
    bounds: Vec<(f32, ObstacleKind)>,
}

impl SpawnTable {
    /// Build from raw weights; they need not sum to 1.
    ///
    /// Zero-weight rows never get picked. Callers validate the table first
    /// (see [`Tuning::validate`](crate::Tuning::validate)); an all-zero table
    /// falls back to always picking a hazard.
    pub fn new(weights: &[SpawnWeight]) -> Self {
        let total: f32 = weights.iter().map(|w| w.weight.max(0.0)).sum();
        if total <= 0.0 {
            return Self {
                bounds: vec![(1.0, ObstacleKind::Crate)],
            };
        }

        let mut acc = 0.0;
        let bounds = weights
            .iter()
            .filter(|w| w.weight > 0.0)
            .map(|w| {
                acc += w.weight / total;
                (acc, w.kind)
            })
            .collect();
        Self { bounds }
    }

    /// Map a uniform draw to a kind: the first row whose cumulative bound exceeds `r`
    pub fn pick(&self, r: f32) -> ObstacleKind {
        self.bounds
            .iter()
            .find(|(bound, _)| r < *bound)
            .or(self.bounds.last())
            .map(|(_, kind)| *kind)
            .unwrap_or(ObstacleKind::Crate)
    }

    /// Probability of each configured kind, logged when a game is created
    pub fn probabilities(&self) -> Vec<(ObstacleKind, f32)> {
        let mut prev = 0.0;
        self.bounds
            .iter()
            .map(|&(bound, kind)| {
                let p = bound - prev;
                prev = bound;
                (kind, p)
            })
            .collect()
    }
}

/// Countdown-driven spawn scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Milliseconds until the next spawn; at or below zero means spawn now
    pub countdown_ms: f32,
    pub interval_ms: f32,
    pub table: SpawnTable,
}

impl Spawner {
    /// A fresh spawner fires on its first tick
    pub fn new(interval_ms: f32, table: SpawnTable) -> Self {
        Self {
            countdown_ms: 0.0,
            interval_ms,
            table,
        }
    }

    /// Advance the countdown by `delta_ms`. Emits at most one kind per tick.
    ///
    /// On expiry the countdown restarts at the full interval and any overshoot
    /// is dropped. At exactly 60 Hz the f32 remainder stays just above zero
    /// after 90 frames, so spawns land 91 frames (about 1517 ms) apart.
    pub fn tick(&mut self, delta_ms: f32, draw: &mut impl UnitDraw) -> Option<ObstacleKind> {
        self.countdown_ms -= delta_ms.max(0.0);
        if self.countdown_ms > 0.0 {
            return None;
        }
        self.countdown_ms = self.interval_ms;
        Some(self.table.pick(draw.next_unit()))
    }
}
