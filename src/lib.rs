//! Snack Dash - A side-scrolling snack runner
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (player physics, obstacles, spawning, collisions)
//! - `game`: Loop controller (lifecycle commands, timestep, render/HUD sinks)
//! - `render`: Draw command lists (and the Canvas 2D backend on web)
//! - `assets`: Counting gate that releases the loop once assets are ready
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (mute, volumes)

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod game;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, PlatformError, TuningError};
pub use game::{Command, Game, HudSink};
pub use render::{DrawCommand, RenderSink};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// These are the baseline values; gameplay code reads them through [`Tuning`].
pub mod consts {
    /// Duration of one nominal display frame (60 Hz) in milliseconds.
    /// All per-frame motion is scaled by `delta / REFERENCE_FRAME_MS`.
    pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;
    /// Largest frame delta fed to the simulation (tab switches, debugger pauses)
    pub const MAX_FRAME_DELTA_MS: f32 = 250.0;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;
    /// Height of the ground strip at the bottom of the playfield
    pub const GROUND_THICKNESS: f32 = 20.0;

    /// Downward acceleration per reference frame
    pub const GRAVITY: f32 = 0.6;
    /// Obstacle scroll speed per reference frame
    pub const SCROLL_SPEED: f32 = 4.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = PLAYFIELD_HEIGHT - 80.0;
    pub const PLAYER_WIDTH: f32 = 64.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const JUMP_IMPULSE: f32 = 12.0;

    /// Obstacles share one square footprint regardless of kind
    pub const OBSTACLE_SIZE: f32 = 30.0;
    /// Time between spawns in milliseconds
    pub const SPAWN_INTERVAL_MS: f32 = 1500.0;
    /// Points awarded for touching a collectible
    pub const COLLECT_REWARD: u32 = 10;
}
