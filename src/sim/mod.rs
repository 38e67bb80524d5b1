//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform code:
//! - Motion scaled by frame delta relative to a 60 Hz reference frame
//! - Seeded RNG only
//! - Obstacles evaluated in spawn order, removed back to front

pub mod collision;
pub mod frame;
pub mod obstacle;
pub mod player;
pub mod spawner;
pub mod state;
pub mod timestep;

pub use collision::{Aabb, CollisionReport, resolve_collisions};
pub use frame::{FrameInput, LoopControl, run_frame};
pub use obstacle::{Obstacle, ObstacleKind};
pub use player::{Player, PlayerState};
pub use spawner::{FixedDraw, SpawnTable, Spawner, UnitDraw};
pub use state::{GameEvent, GamePhase, GameState};
pub use timestep::{TimeStep, clamp_delta, frame_scale};
