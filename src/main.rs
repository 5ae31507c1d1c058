//! Stick Flap headless runner
//!
//! Drives a session the way a renderer would (one tick per frame at 60 Hz)
//! with a simple autopilot, then reports how the run went. Pass a JSON config
//! path as the first argument to override the defaults.

use std::time::Duration;

use stick_flap::GameConfig;
use stick_flap::sim::{GamePhase, ManualClock, Session, TickInput, TickOutcome, tick};

const FRAME_DT: f32 = 1.0 / 60.0;
const MAX_SECONDS: u32 = 120;

/// Jump whenever the player sinks below the gap it is heading for
fn autopilot(session: &Session) -> TickInput {
    let body = session.body();
    let center_y = body.pos.y + body.size.y / 2.0;
    let target_y = session
        .obstacles()
        .iter()
        .find(|p| !p.passed)
        .map(|p| p.gap_center_y)
        .unwrap_or(session.config().stage_height / 2.0);

    let sinking = center_y > target_y + 10.0 && body.vel.y >= 0.0;
    TickInput {
        jump_pressed: sinking,
        jump_released: !sinking,
        restart: false,
    }
}

fn load_config() -> Result<GameConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            log::info!("Loaded config from {}", path);
            Ok(GameConfig::from_json(&json)?)
        }
        None => Ok(GameConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Stick Flap (headless) starting...");

    let config = load_config()?;
    let clock = ManualClock::new();
    let mut session = Session::builder(config).clock(clock.clone()).build()?;

    let max_frames = MAX_SECONDS * 60;
    for frame in 0..max_frames {
        clock.advance(Duration::from_secs_f32(FRAME_DT));
        let input = autopilot(&session);
        match tick(&mut session, &input, FRAME_DT) {
            TickOutcome::Advanced { scored } if scored > 0 => {
                log::info!("Frame {}: score {}", frame, session.score());
            }
            TickOutcome::Ended(cause) => {
                log::info!("Frame {}: run ended ({:?})", frame, cause);
                break;
            }
            _ => {}
        }
    }

    match session.epitaph() {
        Some(epitaph) => println!(
            "Game over: score {} ({:?}) at ({:.1}, {:.1})",
            epitaph.score, epitaph.cause, epitaph.position.x, epitaph.position.y
        ),
        None => {
            debug_assert_eq!(session.phase(), GamePhase::Playing);
            println!("Survived {}s with score {}", MAX_SECONDS, session.score());
        }
    }
    Ok(())
}
