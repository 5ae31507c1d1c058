//! Cosmetic arm swing
//!
//! Each arm swings as a triangle wave between `-max` and `+max`. Nothing here
//! feeds back into collision or scoring.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Angle and swing direction of one arm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimbState {
    /// Radians from horizontal
    pub angle: f32,
    /// +1.0 or -1.0
    pub direction: f32,
}

impl LimbState {
    pub fn new(angle: f32, direction: f32) -> Self {
        Self {
            angle,
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
        }
    }

    /// Advance the swing, reversing at either limit
    #[must_use]
    pub fn step(self, angular_speed: f32, dt: f32, max: f32) -> Self {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut next = self;
        next.angle += angular_speed * dt * self.direction;
        if next.angle > max {
            next.angle = max;
            next.direction = -1.0;
        } else if next.angle < -max {
            next.angle = -max;
            next.direction = 1.0;
        }
        next
    }
}

/// Where the arms end up, in stage coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbPose {
    pub shoulder: Vec2,
    pub left_hand: Vec2,
    pub right_hand: Vec2,
}

/// Both arms of the stickman
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limbs {
    pub left: LimbState,
    pub right: LimbState,
    pub angular_speed: f32,
    pub max_angle: f32,
}

impl Limbs {
    /// Arms start at opposite limits, swinging toward each other
    pub fn new(angular_speed: f32, max_angle: f32) -> Self {
        Self {
            left: LimbState::new(max_angle, -1.0),
            right: LimbState::new(-max_angle, 1.0),
            angular_speed,
            max_angle,
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.left = self.left.step(self.angular_speed, dt, self.max_angle);
        self.right = self.right.step(self.angular_speed, dt, self.max_angle);
    }

    /// Hand positions for arms of `arm_length` hanging off `shoulder`.
    /// The left arm points to -x, the right arm to +x.
    pub fn pose(&self, shoulder: Vec2, arm_length: f32) -> LimbPose {
        let (left_sin, left_cos) = self.left.angle.sin_cos();
        let (right_sin, right_cos) = self.right.angle.sin_cos();
        LimbPose {
            shoulder,
            left_hand: shoulder - Vec2::new(left_cos, left_sin) * arm_length,
            right_hand: shoulder + Vec2::new(right_cos, right_sin) * arm_length,
        }
    }
}
