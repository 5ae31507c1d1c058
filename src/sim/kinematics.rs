//! Player body integration under constant gravity
//!
//! One body, one axis of gravity (screen y, downward). The floor is the bottom
//! of the stage; what happens there depends on the `BoundaryPolicy`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::*;

/// Euler flavour used to advance position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Integrator {
    /// Update velocity first, then move with the new velocity
    #[default]
    SemiImplicit,
    /// Move with the old velocity, then update velocity
    Explicit,
}

/// What the floor does to the body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Elastic-ish bounce; comes to rest once slow enough near the floor
    Bounce {
        restitution: f32,
        stop_epsilon: f32,
        rest_epsilon: f32,
    },
    /// Damped landing that sets `on_ground`
    Platformer,
    /// Floor and ceiling end the run instead of pushing back
    Lethal,
}

impl BoundaryPolicy {
    /// Bounce mode with the tuned defaults
    pub fn bounce() -> Self {
        BoundaryPolicy::Bounce {
            restitution: RESTITUTION,
            stop_epsilon: STOP_EPSILON,
            rest_epsilon: REST_EPSILON,
        }
    }

    /// Whether the floor physically stops the body
    pub fn solid_floor(&self) -> bool {
        !matches!(self, BoundaryPolicy::Lethal)
    }
}

/// Floor interaction reported by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorContact {
    None,
    /// Hit the floor and rebounded
    Bounced,
    /// Platformer landing; `on_ground` is now set
    Landed,
    /// At rest on the floor, integration skipped until perturbed
    Settled,
}

/// The player's physical body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Resting on the floor in bounce mode
    #[serde(default)]
    pub settled: bool,
    /// Standing on the floor in platformer mode
    #[serde(default)]
    pub on_ground: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: size.max(Vec2::ZERO),
            settled: false,
            on_ground: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Position and velocity are free of NaN/Infinity
    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite()
    }

    /// Set vertical speed directly (a jump is not additive)
    pub fn apply_impulse(&mut self, vy: f32) {
        self.vel.y = vy;
        self.settled = false;
    }
}

/// Integration parameters shared by every step of a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub gravity: f32,
    pub integrator: Integrator,
    pub policy: BoundaryPolicy,
    /// y coordinate of the floor (stage height)
    pub floor: f32,
}

impl Kinematics {
    /// Advance `body` by `dt` seconds. Non-finite or negative `dt` counts as 0.
    pub fn step(&self, body: &mut Body, dt: f32) -> FloorContact {
        if body.settled {
            return FloorContact::Settled;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        match self.integrator {
            Integrator::SemiImplicit => {
                body.vel.y += self.gravity * dt;
                body.pos += body.vel * dt;
            }
            Integrator::Explicit => {
                body.pos += body.vel * dt;
                body.vel.y += self.gravity * dt;
            }
        }

        self.resolve_floor(body)
    }

    fn resolve_floor(&self, body: &mut Body) -> FloorContact {
        let floor_y = self.floor - body.size.y;

        match self.policy {
            BoundaryPolicy::Bounce {
                restitution,
                stop_epsilon,
                rest_epsilon,
            } => {
                let mut contact = FloorContact::None;
                if body.pos.y > floor_y {
                    body.pos.y = floor_y;
                    body.vel.y *= -restitution;
                    contact = FloorContact::Bounced;
                }
                if body.vel.y.abs() <= stop_epsilon && (floor_y - body.pos.y).abs() <= rest_epsilon {
                    body.vel = Vec2::ZERO;
                    body.settled = true;
                    contact = FloorContact::Settled;
                }
                contact
            }
            BoundaryPolicy::Platformer => {
                if body.pos.y < floor_y {
                    body.on_ground = false;
                    return FloorContact::None;
                }
                body.pos.y = floor_y;
                if body.vel.y <= 0.0 {
                    return FloorContact::None;
                }
                body.vel.y *= -LANDING_DAMPING;
                if body.vel.y.abs() < LANDING_STOP_SPEED {
                    body.vel = Vec2::ZERO;
                    body.on_ground = true;
                    FloorContact::Landed
                } else {
                    FloorContact::Bounced
                }
            }
            BoundaryPolicy::Lethal => FloorContact::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinematics(integrator: Integrator, policy: BoundaryPolicy) -> Kinematics {
        Kinematics {
            gravity: 400.0,
            integrator,
            policy,
            floor: 600.0,
        }
    }

    #[test]
    fn test_semi_implicit_uses_new_velocity() {
        let k = kinematics(Integrator::SemiImplicit, BoundaryPolicy::Lethal);
        let mut body = Body::new(Vec2::new(10.0, 100.0), Vec2::new(40.0, 50.0));
        k.step(&mut body, 0.1);
        assert!((body.vel.y - 40.0).abs() < 1e-4);
        // 40 px/s * 0.1 s
        assert!((body.pos.y - 104.0).abs() < 1e-4);
    }

    #[test]
    fn test_explicit_uses_old_velocity() {
        let k = kinematics(Integrator::Explicit, BoundaryPolicy::Lethal);
        let mut body = Body::new(Vec2::new(10.0, 100.0), Vec2::new(40.0, 50.0));
        k.step(&mut body, 0.1);
        assert!((body.vel.y - 40.0).abs() < 1e-4);
        assert_eq!(body.pos.y, 100.0);

        k.step(&mut body, 0.1);
        assert!((body.vel.y - 80.0).abs() < 1e-4);
        assert!((body.pos.y - 104.0).abs() < 1e-4);
    }

    #[test]
    fn test_horizontal_velocity_moves_body() {
        let k = kinematics(Integrator::SemiImplicit, BoundaryPolicy::Lethal);
        let mut body = Body::new(Vec2::new(10.0, 100.0), Vec2::new(40.0, 50.0));
        body.vel.x = 50.0;
        k.step(&mut body, 0.5);
        assert!((body.pos.x - 35.0).abs() < 1e-4);
    }

    #[test]
    fn test_non_finite_dt_is_zero() {
        let k = kinematics(Integrator::SemiImplicit, BoundaryPolicy::Lethal);
        let mut body = Body::new(Vec2::new(10.0, 100.0), Vec2::new(40.0, 50.0));
        body.vel.y = 30.0;
        let before = body;
        k.step(&mut body, f32::NAN);
        k.step(&mut body, f32::INFINITY);
        k.step(&mut body, -1.0);
        assert_eq!(body, before);
    }

    #[test]
    fn test_bounce_restitution() {
        let mut k = kinematics(Integrator::SemiImplicit, BoundaryPolicy::bounce());
        k.gravity = 0.0;
        let mut body = Body::new(Vec2::new(10.0, 549.0), Vec2::new(40.0, 50.0));
        body.vel.y = 100.0;

        let contact = k.step(&mut body, 0.05);
        assert_eq!(contact, FloorContact::Bounced);
        assert_eq!(body.vel.y, -80.0);
        assert_eq!(body.pos.y, 550.0);
        assert!(!body.settled);
    }

    #[test]
    fn test_bounce_settles_and_stays_put() {
        let k = kinematics(Integrator::SemiImplicit, BoundaryPolicy::bounce());
        let mut body = Body::new(Vec2::new(10.0, 550.0), Vec2::new(40.0, 50.0));

        // Resting on the floor: one frame of gravity is below the stop speed
        let contact = k.step(&mut body, 1.0 / 60.0);
        assert_eq!(contact, FloorContact::Settled);
        assert!(body.settled);
        assert_eq!(body.vel, Vec2::ZERO);

        let settled = body;
        for _ in 0..100 {
            assert_eq!(k.step(&mut body, 1.0 / 60.0), FloorContact::Settled);
        }
        assert_eq!(body.pos.to_array().map(f32::to_bits), settled.pos.to_array().map(f32::to_bits));
        assert_eq!(body.vel.to_array().map(f32::to_bits), settled.vel.to_array().map(f32::to_bits));
    }

    #[test]
    fn test_impulse_wakes_settled_body() {
        let k = kinematics(Integrator::SemiImplicit, BoundaryPolicy::bounce());
        let mut body = Body::new(Vec2::new(10.0, 550.0), Vec2::new(40.0, 50.0));
        k.step(&mut body, 1.0 / 60.0);
        assert!(body.settled);

        body.apply_impulse(-250.0);
        assert!(!body.settled);
        k.step(&mut body, 1.0 / 60.0);
        assert!(body.pos.y < 550.0);
    }

    #[test]
    fn test_platformer_damped_landing() {
        let mut k = kinematics(Integrator::SemiImplicit, BoundaryPolicy::Platformer);
        k.gravity = 0.0;
        let mut body = Body::new(Vec2::new(10.0, 549.0), Vec2::new(40.0, 50.0));
        body.vel.y = 100.0;

        assert_eq!(k.step(&mut body, 0.05), FloorContact::Bounced);
        assert!((body.vel.y + 60.0).abs() < 1e-4);
        assert_eq!(body.pos.y, 550.0);
        assert!(!body.on_ground);
    }

    #[test]
    fn test_platformer_slow_landing_sets_on_ground() {
        let k = kinematics(Integrator::SemiImplicit, BoundaryPolicy::Platformer);
        let mut body = Body::new(Vec2::new(10.0, 550.0), Vec2::new(40.0, 50.0));

        assert_eq!(k.step(&mut body, 1.0 / 60.0), FloorContact::Landed);
        assert!(body.on_ground);
        assert_eq!(body.vel, Vec2::ZERO);

        // Leaving the floor clears the flag immediately
        body.apply_impulse(-250.0);
        k.step(&mut body, 1.0 / 60.0);
        assert!(!body.on_ground);
    }

    #[test]
    fn test_lethal_floor_does_not_push_back() {
        let k = kinematics(Integrator::SemiImplicit, BoundaryPolicy::Lethal);
        let mut body = Body::new(Vec2::new(10.0, 590.0), Vec2::new(40.0, 50.0));
        assert_eq!(k.step(&mut body, 1.0 / 60.0), FloorContact::None);
        assert!(body.bounds().bottom() > 600.0);
    }

    #[test]
    fn test_impulse_replaces_velocity() {
        let mut body = Body::new(Vec2::ZERO, Vec2::new(40.0, 50.0));
        body.vel.y = 300.0;
        body.apply_impulse(-250.0);
        assert_eq!(body.vel.y, -250.0);
    }
}
