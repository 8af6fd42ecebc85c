//! Headless Script Runner
//!
//! Replays a JSON script of player intents against a fresh match and prints
//! the resulting event log as JSON.

use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};
use squad_tactics::dice::{DiceFace, DiceSource, RandomDice, ScriptedDice};
use squad_tactics::game::events::GameEvent;
use squad_tactics::{GameConfig, GameError, HeadlessPresenter, PlayerIntent, TurnController};

/// Replay a scripted match and dump its event log
#[derive(Parser, Debug)]
#[command(name = "script_runner")]
#[command(about = "Replay a JSON intent script and output the event log")]
struct Args {
    /// Script file (JSON)
    script: PathBuf,

    /// Match config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds of simulated time per scheduler tick
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Ticks allowed for the match to settle after each intent
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct Script {
    seed: Option<u64>,
    /// Deploy both armies automatically before the intents run
    quick_start: bool,
    /// Fixed die faces, drawn in order; random dice when empty
    dice: Vec<DiceFace>,
    intents: Vec<PlayerIntent>,
}

#[derive(Serialize)]
struct Report {
    phase: String,
    winner: Option<u8>,
    ticks: u64,
    rejected: usize,
    events: Vec<GameEvent>,
}

fn main() -> Result<(), GameError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "squad_tactics=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let script: Script = serde_json::from_str(&std::fs::read_to_string(&args.script)?)?;

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = script.seed {
        config = config.with_seed(seed);
    }

    let dice: Box<dyn DiceSource> = if script.dice.is_empty() {
        Box::new(RandomDice::new(&config.dice, config.seed)?)
    } else {
        Box::new(ScriptedDice::new(script.dice.clone()))
    };

    let mut controller = TurnController::with_dice(config, dice)?;
    let mut presenter = HeadlessPresenter::new();
    if script.quick_start {
        controller.quick_start()?;
    }
    presenter.run_until_settled(&mut controller, args.dt, args.max_ticks)?;

    let mut rejected = 0;
    for intent in &script.intents {
        if let Err(e) = controller.handle_intent(*intent) {
            match e.as_illegal() {
                Some(reason) => {
                    tracing::warn!("intent {:?} rejected: {}", intent, reason);
                    rejected += 1;
                }
                None => return Err(e),
            }
        }
        presenter.run_until_settled(&mut controller, args.dt, args.max_ticks)?;
    }

    let report = Report {
        phase: controller.phase().to_string(),
        winner: controller.winner().map(|p| p.0 + 1),
        ticks: controller.tick_count(),
        rejected,
        events: controller.events().to_vec(),
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for event in &report.events {
            println!("[{:>5}] {}", event.tick, event.description);
        }
        println!("Final phase: {} ({} intents rejected)", report.phase, report.rejected);
    }
    Ok(())
}
