//! Error types for configuration and platform glue.
//!
//! The simulation itself is total and never fails; these cover everything
//! around it: tuning files, DOM lookups and asset loading.

use std::io;

/// Top-level error for the binary and the web entry point.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Tuning error: {0}")]
    Tuning(#[from] TuningError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Problems with a [`Tuning`](crate::Tuning) document.
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("Malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("Spawn table has no entry with a positive weight")]
    EmptySpawnTable,

    #[error("Spawn weight for {kind} is negative ({weight})")]
    NegativeWeight { kind: String, weight: f32 },

    #[error("Ground line {ground_line} lies outside the playfield (height {height})")]
    GroundOutsidePlayfield { ground_line: f32, height: f32 },
}

/// Browser-side failures. These only surface before the loop starts.
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("Missing DOM element: #{0}")]
    MissingElement(String),

    #[error("2D canvas context unavailable")]
    NoCanvasContext,

    #[error("Asset failed to load: {0}")]
    AssetLoad(String),

    #[error("JavaScript error: {0}")]
    Js(String),
}
