//! Stick Flap - simulation core of a side-scrolling stickman game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, obstacles, collisions, game state)
//! - `settings`: Game configuration and its one-time validation
//! - `error`: Configuration and misuse errors
//!
//! Rendering, styling and input wiring live outside this crate. The core only
//! talks to them through the traits in `sim` (`Clock`, `BoundsProvider`,
//! `ObstacleHooks`).

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, ConfigWarning, SimError};
pub use settings::GameConfig;

/// Game configuration constants
pub mod consts {
    /// Stage dimensions
    pub const STAGE_WIDTH: f32 = 800.0;
    pub const STAGE_HEIGHT: f32 = 600.0;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 400.0;
    /// Upward speed set by a jump (pixels/s)
    pub const JUMP_VELOCITY: f32 = 250.0;

    /// Player spawn point (top-left of the stickman group)
    pub const PLAYER_SPAWN_X: f32 = 10.0;
    pub const PLAYER_SPAWN_Y: f32 = 10.0;

    /// Player collider box
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Stickman geometry
    pub const STICKMAN_HEIGHT: f32 = 70.0;
    pub const ARM_LENGTH: f32 = 40.0;
    /// Shoulder position as a fraction of the collider size
    pub const SHOULDER_X_FRAC: f32 = 0.5;
    pub const SHOULDER_Y_FRAC: f32 = 0.4;

    /// Obstacle defaults
    pub const OBSTACLE_SPEED: f32 = 120.0;
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    /// Gap is exactly one stickman tall
    pub const OBSTACLE_GAP: f32 = STICKMAN_HEIGHT;
    /// Keep gaps at least this far from the top and bottom edges
    pub const MIN_GAP_MARGIN: f32 = 100.0;
    pub const SPAWN_INTERVAL_MS: u64 = 5000;

    /// Arm swing
    pub const LIMB_ANGULAR_SPEED: f32 = 3.5;
    pub const LIMB_MAX_ANGLE: f32 = std::f32::consts::FRAC_PI_6;

    /// Bounce mode defaults
    pub const RESTITUTION: f32 = 0.8;
    pub const STOP_EPSILON: f32 = 10.0;
    pub const REST_EPSILON: f32 = 0.5;

    /// Platformer landing
    pub const LANDING_DAMPING: f32 = 0.6;
    pub const LANDING_STOP_SPEED: f32 = 10.0;

    /// Largest frame step fed to the integrator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
