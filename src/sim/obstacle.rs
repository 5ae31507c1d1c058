//! Obstacle pairs and their spawner
//!
//! A pair is two full-width columns, one hanging from the top edge and one
//! standing on the bottom edge, with a gap between them. Pairs enter at the
//! right edge of the stage and scroll left until they are fully off-screen.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::timer::IntervalTimer;

/// Session-unique obstacle id; never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

/// An upper/lower column pair sharing one x position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub id: ObstacleId,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub gap_center_y: f32,
    pub gap_size: f32,
    /// Height of the upper column (it starts at y = 0)
    pub upper_height: f32,
    /// Height of the lower column (it ends at the stage bottom)
    pub lower_height: f32,
    /// Set once the player has cleared this pair
    pub passed: bool,
}

impl ObstaclePair {
    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn upper_box(&self) -> Aabb {
        Aabb::new(self.x, 0.0, self.width, self.upper_height)
    }

    pub fn lower_box(&self) -> Aabb {
        Aabb::new(self.x, self.upper_height + self.gap_size, self.width, self.lower_height)
    }

    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }
}

/// Presentation-side callbacks for obstacle visuals.
///
/// The renderer creates and removes its own shapes here; the simulation never
/// draws anything.
pub trait ObstacleHooks {
    fn on_obstacle_created(&mut self, _pair: &ObstaclePair) {}
    fn on_obstacle_destroyed(&mut self, _id: ObstacleId) {}
}

/// Hooks that do nothing (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl ObstacleHooks for NoopHooks {}

/// Vertical layout of one pair: (upper height, gap, lower height).
///
/// `roll` in [0, 1) picks the gap position uniformly. A gap that does not fit
/// between the margins is clamped to the largest one that does.
pub fn gap_layout(stage_height: f32, gap_size: f32, min_margin: f32, roll: f32) -> (f32, f32, f32) {
    let max_gap = (stage_height - 2.0 * min_margin).max(0.0);
    let gap = if gap_size > max_gap {
        log::warn!("Gap {} does not fit stage {}, clamped to {}", gap_size, stage_height, max_gap);
        max_gap
    } else {
        gap_size.max(0.0)
    };

    let slack = (stage_height - gap - 2.0 * min_margin).max(0.0);
    let upper = min_margin + roll.clamp(0.0, 1.0) * slack;
    let lower = stage_height - (upper + gap);
    (upper, gap, lower)
}

/// Creates, scrolls and disposes obstacle pairs
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    stage_width: f32,
    stage_height: f32,
    width: f32,
    gap_size: f32,
    min_margin: f32,
    interval: Duration,
    rng: Pcg32,
    timer: IntervalTimer,
    /// Live pairs, oldest first
    pairs: Vec<ObstaclePair>,
    next_id: u32,
}

impl ObstacleSpawner {
    pub fn new(
        stage_width: f32,
        stage_height: f32,
        width: f32,
        gap_size: f32,
        min_margin: f32,
        interval: Duration,
        seed: u64,
    ) -> Self {
        Self {
            stage_width,
            stage_height,
            width,
            gap_size,
            min_margin,
            interval,
            rng: Pcg32::seed_from_u64(seed),
            timer: IntervalTimer::new(),
            pairs: Vec::new(),
            next_id: 1,
        }
    }

    /// Live pairs, oldest first
    pub fn pairs(&self) -> &[ObstaclePair] {
        &self.pairs
    }

    pub fn pairs_mut(&mut self) -> &mut [ObstaclePair] {
        &mut self.pairs
    }

    /// Upper and lower boxes of every live pair
    pub fn live_bounds(&self) -> Vec<Aabb> {
        self.pairs
            .iter()
            .flat_map(|p| [p.upper_box(), p.lower_box()])
            .collect()
    }

    pub fn is_spawning(&self) -> bool {
        self.timer.is_active()
    }

    /// Create one pair at the right edge of a `stage_width` x `stage_height` stage
    pub fn spawn(
        &mut self,
        stage_width: f32,
        stage_height: f32,
        gap_size: f32,
        hooks: &mut dyn ObstacleHooks,
    ) -> ObstaclePair {
        let roll: f32 = self.rng.random();
        let (upper, gap, lower) = gap_layout(stage_height, gap_size, self.min_margin, roll);

        let id = ObstacleId(self.next_id);
        self.next_id += 1;

        let pair = ObstaclePair {
            id,
            x: stage_width,
            width: self.width,
            gap_center_y: upper + gap / 2.0,
            gap_size: gap,
            upper_height: upper,
            lower_height: lower,
            passed: false,
        };
        log::debug!("Spawned obstacle {} with gap at {:.1}", id.0, pair.gap_center_y);

        hooks.on_obstacle_created(&pair);
        self.pairs.push(pair);
        pair
    }

    /// Spawn one pair now and arm the timer for the rest
    pub fn start_spawning(&mut self, now: Duration, hooks: &mut dyn ObstacleHooks) {
        self.spawn(self.stage_width, self.stage_height, self.gap_size, hooks);
        self.timer.start(now, self.interval);
    }

    /// Cancel the timer. Safe to call when already stopped.
    pub fn stop_spawning(&mut self) {
        if self.timer.cancel() {
            log::debug!("Obstacle spawning stopped");
        }
    }

    /// Spawn every pair whose timer fire came due by `now`
    pub fn pump(&mut self, now: Duration, hooks: &mut dyn ObstacleHooks) -> u32 {
        let due = self.timer.fire_count(now);
        for _ in 0..due {
            self.spawn(self.stage_width, self.stage_height, self.gap_size, hooks);
        }
        due
    }

    /// Scroll every pair left by `speed * dt` without disposing any
    pub fn scroll(&mut self, dt: f32, speed: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let displacement = speed * dt;
        for pair in &mut self.pairs {
            pair.x -= displacement;
        }
    }

    /// Drop the pairs that left the stage. Returns how many were removed.
    pub fn dispose_off_screen(&mut self, hooks: &mut dyn ObstacleHooks) -> usize {
        let before = self.pairs.len();
        self.pairs.retain(|pair| {
            if pair.is_off_screen() {
                log::debug!("Obstacle {} left the stage", pair.id.0);
                hooks.on_obstacle_destroyed(pair.id);
                false
            } else {
                true
            }
        });
        before - self.pairs.len()
    }

    /// Scroll, then drop the pairs that left the stage.
    /// Returns how many were removed.
    pub fn advance(&mut self, dt: f32, speed: f32, hooks: &mut dyn ObstacleHooks) -> usize {
        self.scroll(dt, speed);
        self.dispose_off_screen(hooks)
    }

    /// Stop spawning and dispose of every live pair. Idempotent.
    pub fn cleanup(&mut self, hooks: &mut dyn ObstacleHooks) {
        self.stop_spawning();
        for pair in self.pairs.drain(..) {
            hooks.on_obstacle_destroyed(pair.id);
        }
    }
}
