//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering:
//! - Seeded RNG only
//! - Timers are polled, never threaded
//! - Visuals are reached only through `ObstacleHooks` and `BoundsProvider`

pub mod aabb;
pub mod collision;
pub mod kinematics;
pub mod limb;
pub mod obstacle;
pub mod score;
pub mod state;
pub mod tick;
pub mod timer;

pub use aabb::Aabb;
pub use collision::{check_collision, first_collision, overlap};
pub use kinematics::{Body, BoundaryPolicy, FloorContact, Integrator, Kinematics};
pub use limb::{LimbPose, LimbState, Limbs};
pub use obstacle::{NoopHooks, ObstacleHooks, ObstacleId, ObstaclePair, ObstacleSpawner, gap_layout};
pub use score::score_increment;
pub use state::{BoundsProvider, Epitaph, GamePhase, Session, SessionBuilder, TerminalCause};
pub use tick::{TickInput, TickOutcome, sanitize_dt, tick};
pub use timer::{Clock, IntervalTimer, ManualClock, MonotonicClock};
