//! Smart Pipes headless driver
//!
//! Stands in for the window/input layer: feeds fixed ticks to a session,
//! jumps with a simple autopilot, and prints the final snapshot as JSON.
//!
//! Usage: `smart-pipes [seed] [ticks] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
use smart_pipes::{Session, Tuning, TuningError};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SEED: u64 = 12345;
/// One minute at the target tick rate
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_TICKS: u64 = 60 * smart_pipes::consts::TICK_RATE as u64;

#[cfg(not(target_arch = "wasm32"))]
fn parse_arg<T: std::str::FromStr>(arg: Option<&String>, name: &str, default: T) -> T {
    match arg {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {} {:?}", name, raw);
            default
        }),
    }
}

/// Jump when falling past the middle of the next gap
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_wants_jump(session: &Session) -> bool {
    let world = session.world();
    let gap_height = world.track.shape.gap_height;
    let trailing = world.tuning.body_x - world.track.shape.width;
    let target = world
        .track
        .obstacles
        .iter()
        .find(|o| o.x > trailing)
        .map(|o| o.gap_mid(gap_height))
        .unwrap_or(world.tuning.height / 2.0);
    world.body.velocity >= 0.0 && world.body.y > target + gap_height / 4.0
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), TuningError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = parse_arg(args.first(), "seed", DEFAULT_SEED);
    let ticks = parse_arg(args.get(1), "tick count", DEFAULT_TICKS);
    let tuning = match args.get(2) {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let mut session = Session::new(tuning, seed)?;
    let mut over = false;
    for _ in 0..ticks {
        if over || autopilot_wants_jump(&session) {
            session.request_jump();
        }
        over = session.tick().terminal;
    }

    log::info!(
        "Finished {} ticks: {} run(s) ended, best score {}, current score {}",
        ticks,
        session.runs_finished(),
        session.best_score(),
        session.world().score
    );
    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Smart Pipes (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives `Session` directly; nothing to do here
}
