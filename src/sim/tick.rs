//! Per-frame simulation step
//!
//! The external driver calls `tick` once per display frame with the frame's
//! elapsed time. Order matters: everything moves first, then terminal
//! conditions are checked against the new positions, and score is only
//! awarded on frames that did not end the run. Pairs that scrolled off the
//! stage are disposed last, after they had their chance to score.

use super::collision::first_collision;
use super::kinematics::BoundaryPolicy;
use super::score::score_increment;
use super::state::{GamePhase, Session, TerminalCause};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key went down this frame
    pub jump_pressed: bool,
    /// Jump key went up this frame
    pub jump_released: bool,
    /// Restart request (ignored while playing)
    pub restart: bool,
}

/// What a frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing simulated
    Idle,
    /// Player bounds not available yet; retry next frame
    Skipped,
    /// Simulated one frame
    Advanced { scored: u32 },
    /// This frame ended the run
    Ended(TerminalCause),
}

/// Clamp a raw frame step into something safe to integrate
pub fn sanitize_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() {
        log::warn!("Non-finite frame step {}, treating as 0", dt);
        return 0.0;
    }
    if dt < 0.0 {
        log::warn!("Negative frame step {}, treating as 0", dt);
        return 0.0;
    }
    if dt > max_dt {
        log::debug!("Frame step {:.3}s clamped to {:.3}s", dt, max_dt);
        return max_dt;
    }
    dt
}

/// Apply one frame of input, then advance the session by `dt` seconds
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) -> TickOutcome {
    if input.restart && session.phase == GamePhase::GameOver {
        if let Err(err) = session.restart() {
            log::warn!("Restart failed: {}", err);
        }
    }
    if input.jump_released {
        session.release_jump();
    }
    if input.jump_pressed {
        session.press_jump();
    }

    session.tick(dt)
}

impl Session {
    /// Advance the session by one frame of `dt` seconds
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        if self.phase != GamePhase::Playing {
            return TickOutcome::Idle;
        }

        if self.player_size.is_none() {
            let measured = self.bounds.as_ref().and_then(|b| b.player_box());
            match measured {
                Some(bounds) if bounds.is_finite() => {
                    let size = bounds.size().max(glam::Vec2::ZERO);
                    log::info!("Player measured at {}x{}", size.x, size.y);
                    self.player_size = Some(size);
                    self.body.size = size;
                }
                _ => return TickOutcome::Skipped,
            }
        }

        let dt = sanitize_dt(dt, self.config.max_frame_dt);
        self.time_ticks += 1;

        // Move everything
        self.kinematics.step(&mut self.body, dt);
        self.limbs.step(dt);
        let now = self.clock.now();
        self.spawner.pump(now, self.hooks.as_mut());
        self.spawner.scroll(dt, self.config.obstacle_speed);

        // Check the new positions
        if let Some(cause) = self.terminal_condition() {
            self.end_run(cause);
            self.spawner.dispose_off_screen(self.hooks.as_mut());
            return TickOutcome::Ended(cause);
        }

        // Pairs that left the stage this frame still count if they were cleared
        let scored = score_increment(self.spawner.pairs_mut(), self.body.pos.x);
        if scored > 0 {
            self.score += u64::from(scored);
            log::debug!("Score {}", self.score);
        }
        self.spawner.dispose_off_screen(self.hooks.as_mut());
        TickOutcome::Advanced { scored }
    }

    fn terminal_condition(&self) -> Option<TerminalCause> {
        if !self.body.is_finite() {
            return Some(TerminalCause::NonFinite);
        }

        let player = self.body.bounds();
        if let Some(id) = first_collision(&player, self.spawner.pairs()) {
            return Some(TerminalCause::Collision(id));
        }
        if player.top() <= 0.0 {
            return Some(TerminalCause::Ceiling);
        }
        if matches!(self.kinematics.policy, BoundaryPolicy::Lethal)
            && player.bottom() >= self.config.stage_height
        {
            return Some(TerminalCause::Floor);
        }
        if self.config.lethal_side_walls {
            if player.left() < 0.0 {
                return Some(TerminalCause::LeftWall);
            }
            if player.right() > self.config.stage_width {
                return Some(TerminalCause::RightWall);
            }
        }
        None
    }
}
