//! Maze Chase entry point
//!
//! Headless run of the engine: `maze-chase [seed] [ticks] [settings.json]`.
//! An autopilot picks a random heading every few ticks and the final board
//! is printed along with a JSON snapshot.

use std::error::Error;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use maze_chase::sim::{Direction, GameEvent, GamePhase, GameState, REFERENCE_LAYOUT};
use maze_chase::{Settings, TickDriver};

/// Ticks between autopilot heading changes
const AUTOPILOT_PERIOD: u64 = 6;
const DEFAULT_TICKS: u64 = 2_000;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => arg.parse()?,
        None => clock_seed(),
    };
    let ticks = match args.next() {
        Some(arg) => arg.parse()?,
        None => DEFAULT_TICKS,
    };
    let settings = args.next().map(Settings::load).unwrap_or_default();

    log::info!("Maze Chase starting (seed {}, {} ticks)", seed, ticks);

    let mut state = GameState::with_layout(&REFERENCE_LAYOUT, settings, seed)?;
    let mut driver = TickDriver::new();
    let mut pilot = Pcg32::seed_from_u64(seed.wrapping_add(1));

    driver.request_start();
    while state.time_ticks() < ticks {
        if state.time_ticks() % AUTOPILOT_PERIOD == 0 {
            let dir = Direction::ALL[pilot.random_range(0..Direction::ALL.len())];
            driver.request_direction(dir);
        }

        // One frame per tick of the current level
        let frame = state.settings().tick_interval(state.level());
        for event in driver.advance(&mut state, frame) {
            log_event(&event);
        }

        if state.phase() == GamePhase::GameOver {
            break;
        }
    }

    println!("{}", state.maze());
    println!(
        "Level {}  Score {}  Lives {}  Phase {:?}",
        state.level(),
        state.score(),
        state.lives(),
        state.phase()
    );
    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);

    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::ItemConsumed { .. } => log::trace!("{:?}", event),
        GameEvent::AgentCaught { .. } | GameEvent::LifeLost { .. } => log::info!("{:?}", event),
        _ => log::debug!("{:?}", event),
    }
}
