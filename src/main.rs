//! Glitch Runner headless runner
//!
//! Plays one level with a scripted input track (run right, hop on a fixed
//! cadence), logs every game event and prints the final snapshot as JSON.
//!
//! Usage: `glitch-runner [LEVEL_ID] [FRAMES] [TUNING_JSON]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by a host page; there is nothing to run here
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    use glitch_runner::input::{Key, KeyState};
    use glitch_runner::{AppPhase, LevelCatalog, Session, Tuning};

    /// Hold jump for this many frames out of every cadence window
    const JUMP_CADENCE: u64 = 45;
    const JUMP_HOLD: u64 = 12;

    let mut args = std::env::args().skip(1);
    let level_id: u32 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(1);
    let frames: u64 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(1200);
    let tuning = match args.next() {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
        None => Tuning::default(),
    };

    log::info!("Glitch Runner (headless) starting level {level_id} for {frames} frames");

    let mut session = Session::new(LevelCatalog::builtin(), tuning)?;
    session.start_level(level_id);

    let mut keys = KeyState::new();
    keys.key_down(Key::MoveRight);
    for frame in 0..frames {
        if frame % JUMP_CADENCE == 0 {
            keys.key_down(Key::Jump);
        } else if frame % JUMP_CADENCE == JUMP_HOLD {
            keys.key_up(Key::Jump);
        }

        for event in session.frame(&keys) {
            log::info!("frame {frame}: {event:?}");
        }
        keys.end_frame();

        if session.phase() != AppPhase::Playing {
            break;
        }
    }

    log::info!(
        "Finished in phase {:?} with {} death(s)",
        session.phase(),
        session.deaths()
    );
    if let Some(game) = session.game() {
        println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    }
    Ok(())
}
