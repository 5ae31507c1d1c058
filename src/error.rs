//! Error types for the simulation core.
//!
//! Hard configuration problems are `ConfigError`s and stop a session from
//! being created. Problems that can be fixed by clamping become a
//! `ConfigWarning` that travels with the validated config.

/// A configuration the simulation cannot run with.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("spawn interval must be at least 1 ms")]
    ZeroSpawnInterval,

    #[error("restitution must lie in (0, 1), got {0}")]
    Restitution(f32),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A configuration value that was clamped into range.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// Gap did not fit between the two margins
    #[error("gap size {requested} clamped to {clamped}")]
    GapClamped { requested: f32, clamped: f32 },

    /// Margin was negative or left no room for any gap
    #[error("gap margin {requested} clamped to {clamped}")]
    MarginClamped { requested: f32, clamped: f32 },

    /// Fixed player size was negative or taller than the stage
    #[error("player size {requested:?} clamped to {clamped:?}")]
    PlayerSizeClamped { requested: (f32, f32), clamped: (f32, f32) },

    /// Frame step cap was not positive
    #[error("max frame step {requested} reset to default")]
    MaxFrameDtReset { requested: f32 },
}

/// Misuse of a session operation. The session state is left untouched.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    #[error("restart is only valid after game over")]
    RestartWhilePlaying,

    #[error("session is not playing")]
    NotPlaying,
}
