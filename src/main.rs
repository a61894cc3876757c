use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::{debug, error, info, warn};
use steppingstone::game::GameSession;
use steppingstone::resources::gameconfig::{FallPolicy, GameConfig};
use steppingstone::resources::input::GameKey;
use steppingstone::resources::worldtime::REFERENCE_TICK;

#[cfg(feature = "frontend")]
mod frontend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HoldKey {
    Up,
    Down,
    Left,
    Right,
}

impl From<HoldKey> for GameKey {
    fn from(key: HoldKey) -> Self {
        match key {
            HoldKey::Up => GameKey::Up,
            HoldKey::Down => GameKey::Down,
            HoldKey::Left => GameKey::Left,
            HoldKey::Right => GameKey::Right,
        }
    }
}

/// Stepping Stone: walk the bridge, don't fall off.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON file where player records are kept between runs.
    #[arg(long, value_name = "PATH")]
    records: Option<PathBuf>,

    /// What happens when the player falls: respawn or gameover.
    #[arg(long, value_name = "POLICY")]
    fall_policy: Option<FallPolicy>,

    /// Run the simulation without a window and print host messages as JSON
    /// lines.
    #[arg(long)]
    headless: bool,

    /// Write the effective configuration back to the INI file and exit.
    #[arg(long)]
    write_config: bool,

    /// Number of 60 Hz ticks to simulate in headless mode.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Directions held down during the headless run.
    #[arg(long, value_enum)]
    hold: Vec<HoldKey>,

    /// Press jump every N ticks in headless mode.
    #[arg(long, value_name = "N")]
    jump_every: Option<u32>,
}

/// Whether the headless driver taps jump on this tick. The tap is released
/// right after the tick, so even `--jump-every 1` sees a fresh press each time.
fn jump_due(tick: u32, every: Option<u32>) -> bool {
    every.is_some_and(|n| n > 0 && tick % n == 0)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(policy) = cli.fall_policy {
        config.fall_policy = policy;
    }
    config.records_path = cli.records.clone();

    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    let session = match GameSession::new(config.clone()) {
        Ok(session) => session,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    #[cfg(feature = "frontend")]
    if !cli.headless {
        frontend::run(session, &config);
        return;
    }
    #[cfg(not(feature = "frontend"))]
    if !cli.headless {
        info!("Built without the frontend feature; running headless");
    }

    run_headless(session, &cli);
}

fn run_headless(mut session: GameSession, cli: &Cli) {
    info!(
        "Headless run: {} ticks, holding {:?}, jump every {:?}",
        cli.ticks, cli.hold, cli.jump_every
    );
    let input = session.input_sender();
    let host = session.host_messages();
    for key in &cli.hold {
        input.key((*key).into(), true);
    }

    for tick in 0..cli.ticks {
        let tap = jump_due(tick, cli.jump_every);
        if tap {
            input.key(GameKey::Jump, true);
        }
        session.tick(REFERENCE_TICK);
        if tap {
            input.key(GameKey::Jump, false);
        }
        for cue in session.drain_audio_cues() {
            debug!("Audio cue {:?}", cue);
        }
        print_messages(&host);
    }

    session.shutdown();
    print_messages(&host);
    let score = session.score();
    info!(
        "Finished: score {}, best {}, distance {:.2}",
        score.score, score.best_score, score.max_distance
    );
}

fn print_messages(host: &crossbeam_channel::Receiver<steppingstone::events::host::HostEnvelope>) {
    for envelope in host.try_iter() {
        match envelope.to_json() {
            Ok(line) => println!("{}", line),
            Err(e) => warn!("Could not serialize host message: {}", e),
        }
    }
}
