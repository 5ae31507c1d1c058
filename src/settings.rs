//! Game configuration
//!
//! One `GameConfig` describes a whole session: stage, physics, obstacles and
//! the cosmetic arm swing. It is validated once when a session is created.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ConfigWarning};
use crate::sim::kinematics::{BoundaryPolicy, Integrator};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Stage ===
    pub stage_width: f32,
    pub stage_height: f32,

    // === Player ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Speed set (not added) by a jump
    pub jump_velocity: f32,
    pub integrator: Integrator,
    pub boundary: BoundaryPolicy,
    /// Leaving the stage sideways ends the run
    pub lethal_side_walls: bool,
    pub player_spawn: Vec2,
    /// Collider size. `None` means ask the `BoundsProvider` at runtime.
    pub player_size: Option<Vec2>,

    // === Obstacles ===
    pub obstacle_width: f32,
    /// Scroll speed (pixels/s)
    pub obstacle_speed: f32,
    pub gap_size: f32,
    /// Minimum distance between a gap and the top/bottom edge
    pub min_gap_margin: f32,
    pub spawn_interval_ms: u64,

    // === Arms (cosmetic) ===
    pub limb_angular_speed: f32,
    pub limb_max_angle: f32,
    pub arm_length: f32,

    /// Frame steps above this are clamped before integration
    pub max_frame_dt: f32,
    /// Seed for gap randomization
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            stage_width: STAGE_WIDTH,
            stage_height: STAGE_HEIGHT,

            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            integrator: Integrator::SemiImplicit,
            boundary: BoundaryPolicy::Lethal,
            lethal_side_walls: false,
            player_spawn: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            player_size: Some(Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_speed: OBSTACLE_SPEED,
            gap_size: OBSTACLE_GAP,
            min_gap_margin: MIN_GAP_MARGIN,
            spawn_interval_ms: SPAWN_INTERVAL_MS,

            limb_angular_speed: LIMB_ANGULAR_SPEED,
            limb_max_angle: LIMB_MAX_ANGLE,
            arm_length: ARM_LENGTH,

            max_frame_dt: MAX_FRAME_DT,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Largest gap that fits between the two margins
    pub fn max_gap(&self) -> f32 {
        self.stage_height - 2.0 * self.min_gap_margin
    }

    /// Check every precondition once.
    ///
    /// Values that can be fixed are clamped and reported as warnings; anything
    /// else is an error. The returned config is safe to hand to a session.
    pub fn validate(mut self) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        let mut warnings = Vec::new();

        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            warnings.push(ConfigWarning::MaxFrameDtReset {
                requested: self.max_frame_dt,
            });
            self.max_frame_dt = MAX_FRAME_DT;
        }

        let finite = [
            ("stage_width", self.stage_width),
            ("stage_height", self.stage_height),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("player_spawn.x", self.player_spawn.x),
            ("player_spawn.y", self.player_spawn.y),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_speed", self.obstacle_speed),
            ("gap_size", self.gap_size),
            ("min_gap_margin", self.min_gap_margin),
            ("limb_angular_speed", self.limb_angular_speed),
            ("limb_max_angle", self.limb_max_angle),
            ("arm_length", self.arm_length),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        if let Some(size) = self.player_size {
            if !size.is_finite() {
                return Err(ConfigError::NonFinite {
                    field: "player_size",
                    value: if size.x.is_finite() { size.y } else { size.x },
                });
            }
        }

        let positive = [
            ("stage_width", self.stage_width),
            ("stage_height", self.stage_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_speed", self.obstacle_speed),
            ("gap_size", self.gap_size),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if let BoundaryPolicy::Bounce { restitution, .. } = self.boundary {
            if !(restitution > 0.0 && restitution < 1.0) {
                return Err(ConfigError::Restitution(restitution));
            }
        }

        // Margin must leave some room for a gap
        let margin = self.min_gap_margin.clamp(0.0, self.stage_height / 4.0);
        if margin != self.min_gap_margin {
            warnings.push(ConfigWarning::MarginClamped {
                requested: self.min_gap_margin,
                clamped: margin,
            });
            self.min_gap_margin = margin;
        }

        let max_gap = self.max_gap();
        if self.gap_size > max_gap {
            warnings.push(ConfigWarning::GapClamped {
                requested: self.gap_size,
                clamped: max_gap,
            });
            self.gap_size = max_gap;
        }

        if let Some(size) = self.player_size {
            let clamped = Vec2::new(size.x.max(0.0), size.y.clamp(0.0, self.stage_height));
            if clamped != size {
                warnings.push(ConfigWarning::PlayerSizeClamped {
                    requested: (size.x, size.y),
                    clamped: (clamped.x, clamped.y),
                });
                self.player_size = Some(clamped);
            }
        }

        for warning in &warnings {
            log::warn!("Config: {}", warning);
        }

        Ok((self, warnings))
    }
}
