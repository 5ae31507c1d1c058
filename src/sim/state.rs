//! Session state and the playing / game-over state machine
//!
//! A `Session` owns everything one run needs: the body, the arms, the obstacle
//! spawner and the score. Sessions share nothing, so any number can run side
//! by side.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::kinematics::{Body, Kinematics};
use super::limb::{LimbPose, Limbs};
use super::obstacle::{NoopHooks, ObstacleHooks, ObstacleId, ObstaclePair, ObstacleSpawner};
use super::timer::{Clock, MonotonicClock};
use crate::consts::*;
use crate::error::{ConfigError, ConfigWarning, SimError};
use crate::settings::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; only `restart` leaves this phase
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalCause {
    Collision(ObstacleId),
    /// Top of the player reached the top of the stage
    Ceiling,
    /// Bottom of the player reached the bottom of the stage (lethal floor only)
    Floor,
    LeftWall,
    RightWall,
    /// Body position or velocity became NaN/Infinity
    NonFinite,
}

/// What is left to report once a run is over
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Epitaph {
    pub score: u64,
    pub cause: TerminalCause,
    /// Final top-left corner of the player
    pub position: Vec2,
}

/// Source for the player's bounding box when its size is not configured
pub trait BoundsProvider {
    /// `None` until the presentation layer has measured the player
    fn player_box(&self) -> Option<Aabb>;
}

impl<F> BoundsProvider for F
where
    F: Fn() -> Option<Aabb>,
{
    fn player_box(&self) -> Option<Aabb> {
        self()
    }
}

/// Collaborators a session talks to, with headless defaults
pub struct SessionBuilder {
    config: GameConfig,
    clock: Box<dyn Clock>,
    hooks: Box<dyn ObstacleHooks>,
    bounds: Option<Box<dyn BoundsProvider>>,
}

impl SessionBuilder {
    /// Time source for the spawn timer (wall clock by default)
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Obstacle visual callbacks (none by default)
    pub fn hooks(mut self, hooks: impl ObstacleHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Where to measure the player when `player_size` is not configured
    pub fn bounds(mut self, bounds: impl BoundsProvider + 'static) -> Self {
        self.bounds = Some(Box::new(bounds));
        self
    }

    /// Validate the config and start the first run
    pub fn build(self) -> Result<Session, ConfigError> {
        let (config, warnings) = self.config.validate()?;

        let kinematics = Kinematics {
            gravity: config.gravity,
            integrator: config.integrator,
            policy: config.boundary,
            floor: config.stage_height,
        };
        let spawner = ObstacleSpawner::new(
            config.stage_width,
            config.stage_height,
            config.obstacle_width,
            config.gap_size,
            config.min_gap_margin,
            Duration::from_millis(config.spawn_interval_ms),
            config.seed,
        );
        let player_size = config.player_size;

        let mut session = Session {
            body: Body::new(config.player_spawn, player_size.unwrap_or(Vec2::ZERO)),
            limbs: Limbs::new(config.limb_angular_speed, config.limb_max_angle),
            kinematics,
            spawner,
            phase: GamePhase::Playing,
            score: 0,
            time_ticks: 0,
            terminal: None,
            jump_held: false,
            player_size,
            clock: self.clock,
            hooks: self.hooks,
            bounds: self.bounds,
            warnings,
            config,
        };

        let now = session.clock.now();
        session.spawner.start_spawning(now, session.hooks.as_mut());
        log::info!(
            "Session started: stage {}x{}, seed {}",
            session.config.stage_width,
            session.config.stage_height,
            session.config.seed
        );

        Ok(session)
    }
}

/// One simulation session
pub struct Session {
    pub(super) config: GameConfig,
    pub(super) warnings: Vec<ConfigWarning>,
    pub(super) phase: GamePhase,
    pub(super) body: Body,
    pub(super) kinematics: Kinematics,
    pub(super) limbs: Limbs,
    pub(super) spawner: ObstacleSpawner,
    pub(super) score: u64,
    /// Frames simulated in the current run
    pub(super) time_ticks: u64,
    pub(super) terminal: Option<TerminalCause>,
    /// Jump key is down; another press needs a release first
    pub(super) jump_held: bool,
    /// Player collider size, once known
    pub(super) player_size: Option<Vec2>,
    pub(super) clock: Box<dyn Clock>,
    pub(super) hooks: Box<dyn ObstacleHooks>,
    pub(super) bounds: Option<Box<dyn BoundsProvider>>,
}

impl Session {
    pub fn builder(config: GameConfig) -> SessionBuilder {
        SessionBuilder {
            config,
            clock: Box::new(MonotonicClock::new()),
            hooks: Box::new(NoopHooks),
            bounds: None,
        }
    }

    /// Headless session on the wall clock
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::builder(config).build()
    }

    // === Queries ===

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_bounds(&self) -> Aabb {
        self.body.bounds()
    }

    pub fn obstacles(&self) -> &[ObstaclePair] {
        self.spawner.pairs()
    }

    /// Upper and lower column boxes of every live obstacle
    pub fn live_obstacle_bounds(&self) -> Vec<Aabb> {
        self.spawner.live_bounds()
    }

    pub fn is_spawning(&self) -> bool {
        self.spawner.is_spawning()
    }

    pub fn terminal_cause(&self) -> Option<TerminalCause> {
        self.terminal
    }

    /// Score, cause and final position of a finished run
    pub fn epitaph(&self) -> Option<Epitaph> {
        self.terminal.map(|cause| Epitaph {
            score: self.score,
            cause,
            position: self.body.pos,
        })
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Arm positions for the presentation layer
    pub fn limb_pose(&self) -> LimbPose {
        let shoulder = self.body.pos + self.body.size * Vec2::new(SHOULDER_X_FRAC, SHOULDER_Y_FRAC);
        self.limbs.pose(shoulder, self.config.arm_length)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Clamps applied while validating the config
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    // === Control ===

    /// Set the body's vertical speed to the jump velocity
    pub fn jump(&mut self) -> Result<(), SimError> {
        if self.phase != GamePhase::Playing {
            return Err(SimError::NotPlaying);
        }
        self.body.apply_impulse(-self.config.jump_velocity);
        log::trace!("Jump, vy = {}", self.body.vel.y);
        Ok(())
    }

    /// Key-down edge: jumps only if the key was not already held.
    /// Returns whether a jump happened.
    pub fn press_jump(&mut self) -> bool {
        if self.jump_held || self.phase != GamePhase::Playing {
            return false;
        }
        self.jump_held = true;
        self.jump().is_ok()
    }

    pub fn release_jump(&mut self) {
        self.jump_held = false;
    }

    /// Start a fresh run after game over.
    ///
    /// Calling this while playing is reported and changes nothing.
    pub fn restart(&mut self) -> Result<(), SimError> {
        if self.phase == GamePhase::Playing {
            return Err(SimError::RestartWhilePlaying);
        }

        self.spawner.cleanup(self.hooks.as_mut());
        self.score = 0;
        self.time_ticks = 0;
        self.terminal = None;
        self.jump_held = false;
        self.body = Body::new(self.config.player_spawn, self.player_size.unwrap_or(Vec2::ZERO));
        self.limbs = Limbs::new(self.config.limb_angular_speed, self.config.limb_max_angle);
        self.phase = GamePhase::Playing;

        let now = self.clock.now();
        self.spawner.start_spawning(now, self.hooks.as_mut());
        log::info!("Restarted");
        Ok(())
    }

    /// Stop spawning and dispose of every obstacle. Safe in any phase and
    /// safe to repeat.
    ///
    /// Called while playing, the run goes on with an empty stage: spawning
    /// stays off until the next `restart`, which needs a game over first.
    pub fn cleanup(&mut self) {
        self.spawner.cleanup(self.hooks.as_mut());
    }

    /// Enter game over. Obstacles and body stay where they are for reporting.
    pub(super) fn end_run(&mut self, cause: TerminalCause) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.terminal = Some(cause);
        self.spawner.stop_spawning();
        log::info!(
            "Game over ({:?}) with score {} at ({:.1}, {:.1})",
            cause,
            self.score,
            self.body.pos.x,
            self.body.pos.y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::timer::ManualClock;

    fn session() -> Session {
        Session::builder(GameConfig::default())
            .clock(ManualClock::new())
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_session_is_playing_with_one_obstacle() {
        let s = session();
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.score(), 0);
        assert_eq!(s.obstacles().len(), 1);
        assert_eq!(s.obstacles()[0].x, STAGE_WIDTH);
        assert!(s.is_spawning());
        assert!(s.epitaph().is_none());
    }

    #[test]
    fn test_jump_sets_velocity() {
        let mut s = session();
        s.jump().unwrap();
        assert_eq!(s.body().vel.y, -JUMP_VELOCITY);
    }

    #[test]
    fn test_jump_rejected_after_game_over() {
        let mut s = session();
        s.end_run(TerminalCause::Ceiling);
        assert_eq!(s.jump(), Err(SimError::NotPlaying));
        assert!(!s.press_jump());
    }

    #[test]
    fn test_press_jump_needs_release() {
        let mut s = session();
        assert!(s.press_jump());
        assert!(!s.press_jump());
        s.release_jump();
        assert!(s.press_jump());
    }

    #[test]
    fn test_restart_while_playing_is_rejected() {
        let mut s = session();
        s.jump().unwrap();
        let before = *s.body();
        assert_eq!(s.restart(), Err(SimError::RestartWhilePlaying));
        assert_eq!(*s.body(), before);
        assert_eq!(s.obstacles().len(), 1);
    }

    #[test]
    fn test_end_run_stops_spawning_and_keeps_epitaph() {
        let mut s = session();
        s.score = 3;
        s.end_run(TerminalCause::Collision(ObstacleId(1)));
        assert_eq!(s.phase(), GamePhase::GameOver);
        assert!(!s.is_spawning());
        assert_eq!(s.obstacles().len(), 1);

        let epitaph = s.epitaph().unwrap();
        assert_eq!(epitaph.score, 3);
        assert_eq!(epitaph.cause, TerminalCause::Collision(ObstacleId(1)));

        // A second terminal event does not overwrite the first
        s.end_run(TerminalCause::Ceiling);
        assert_eq!(s.terminal_cause(), Some(TerminalCause::Collision(ObstacleId(1))));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut s = session();
        let first_id = s.obstacles()[0].id;
        s.score = 5;
        s.body.pos = Vec2::new(10.0, 590.0);
        s.body.vel = Vec2::new(0.0, 300.0);
        s.end_run(TerminalCause::Floor);

        s.restart().unwrap();
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.score(), 0);
        assert_eq!(s.body().pos, Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y));
        assert_eq!(s.body().vel, Vec2::ZERO);
        assert!(s.terminal_cause().is_none());
        assert!(s.is_spawning());
        // Fresh first obstacle with a new id
        assert_eq!(s.obstacles().len(), 1);
        assert_ne!(s.obstacles()[0].id, first_id);
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let mut s = session();
        s.cleanup();
        s.cleanup();
        assert!(s.obstacles().is_empty());
        assert!(!s.is_spawning());
        assert_eq!(s.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_cleanup_while_playing_keeps_spawning_off_until_restart() {
        let clock = ManualClock::new();
        let mut s = Session::builder(GameConfig {
            gravity: 0.0,
            player_spawn: Vec2::new(10.0, 300.0),
            ..Default::default()
        })
        .clock(clock.clone())
        .build()
        .unwrap();
        s.cleanup();

        clock.advance_secs(20.0);
        s.tick(1.0 / 60.0);
        assert!(s.obstacles().is_empty());
        assert!(!s.is_spawning());
        assert_eq!(s.restart(), Err(SimError::RestartWhilePlaying));

        s.end_run(TerminalCause::Ceiling);
        s.restart().unwrap();
        assert!(s.is_spawning());
        assert_eq!(s.obstacles().len(), 1);
    }

    #[test]
    fn test_limb_pose_hangs_off_body() {
        let s = session();
        let pose = s.limb_pose();
        let expected = s.body().pos + Vec2::new(PLAYER_WIDTH * 0.5, PLAYER_HEIGHT * 0.4);
        assert!((pose.shoulder - expected).length() < 1e-4);
        assert!(pose.left_hand.x < pose.shoulder.x);
        assert!(pose.right_hand.x > pose.shoulder.x);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = session();
        let b = session();
        a.jump().unwrap();
        a.end_run(TerminalCause::Ceiling);
        assert_eq!(b.phase(), GamePhase::Playing);
        assert_eq!(b.body().vel, Vec2::ZERO);
    }
}
