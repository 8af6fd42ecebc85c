//! Squad Tactics - interactive console match
//!
//! Plays a hot-seat match in the terminal with the headless presenter
//! standing in for a renderer.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use squad_tactics::board::Orientation;
use squad_tactics::core::error::Result;
use squad_tactics::game::events::GameEvent;
use squad_tactics::squad::UnitClass;
use squad_tactics::{
    GameConfig, GamePhase, HeadlessPresenter, PlayerId, PlayerIntent, SquadId, TilePos,
    TurnController,
};

#[derive(Parser, Debug)]
#[command(name = "squad-tactics")]
#[command(about = "Play a hot-seat match of Squad Tactics in the terminal")]
struct Args {
    /// Match config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for a reproducible match
    #[arg(long)]
    seed: Option<u64>,

    /// Deploy both armies automatically
    #[arg(long)]
    quick_start: bool,

    /// Seconds of simulated time per scheduler tick
    #[arg(long, default_value_t = 0.1)]
    dt: f32,
}

const MAX_SETTLE_TICKS: u64 = 10_000;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "squad_tactics=info".into()),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut controller = TurnController::new(config)?;
    let mut presenter = HeadlessPresenter::new();
    if args.quick_start {
        controller.quick_start()?;
    }
    presenter.run_until_settled(&mut controller, args.dt, MAX_SETTLE_TICKS)?;

    println!("\n=== SQUAD TACTICS ===");
    print_help();

    let mut shown = 0;
    loop {
        shown = print_new_events(controller.events(), shown);
        display_board(&controller);

        if let GamePhase::GameOver { winner } = controller.phase() {
            println!("Player {} wins!", winner.0 + 1);
            break;
        }

        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let intent = match parse_command(input) {
            Command::Quit => break,
            Command::Help => {
                print_help();
                continue;
            }
            Command::Quick => {
                if let Err(e) = controller.quick_start() {
                    println!("Cannot quick start: {}", e);
                }
                presenter.run_until_settled(&mut controller, args.dt, MAX_SETTLE_TICKS)?;
                continue;
            }
            Command::Unknown(text) => {
                println!("Unknown command: {} (type 'help')", text);
                continue;
            }
            Command::Intent(intent) => intent,
        };

        if let Err(e) = controller.handle_intent(intent) {
            if e.as_illegal().is_none() {
                return Err(e);
            }
        }
        presenter.run_until_settled(&mut controller, args.dt, MAX_SETTLE_TICKS)?;
        for message in presenter.take_messages() {
            println!("! {}", message);
        }
    }

    Ok(())
}

enum Command {
    Intent(PlayerIntent),
    Quick,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(input: &str) -> Command {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let number = |i: usize| parts.get(i).and_then(|s| s.parse::<usize>().ok());

    match parts.first().copied() {
        Some("click") | Some("c") => match (number(1), number(2)) {
            (Some(row), Some(col)) => {
                Command::Intent(PlayerIntent::TileClicked(TilePos::new(row, col)))
            }
            _ => Command::Unknown(input.to_string()),
        },
        Some("squad") => match number(1) {
            Some(id) => Command::Intent(PlayerIntent::SquadClicked(SquadId(id as u32))),
            None => Command::Unknown(input.to_string()),
        },
        Some("rotate") | Some("r") => {
            let facing = match parts.get(2).copied() {
                Some("n") | Some("north") => Some(Orientation::North),
                Some("e") | Some("east") => Some(Orientation::East),
                Some("s") | Some("south") => Some(Orientation::South),
                Some("w") | Some("west") => Some(Orientation::West),
                _ => None,
            };
            match (number(1), facing) {
                (Some(id), Some(facing)) => {
                    Command::Intent(PlayerIntent::RotationArrowClicked(SquadId(id as u32), facing))
                }
                _ => Command::Unknown(input.to_string()),
            }
        }
        Some("roll") => Command::Intent(PlayerIntent::DiceRollRequested),
        Some("done") => Command::Intent(PlayerIntent::EndPlacementRequested),
        Some("end") => Command::Intent(PlayerIntent::EndTurnRequested),
        Some("quick") => Command::Quick,
        Some("help") | Some("h") => Command::Help,
        Some("quit") | Some("q") => Command::Quit,
        _ => Command::Unknown(input.to_string()),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  click <row> <col>      - Click a tile (place, select, move or attack)");
    println!("  squad <id>             - Click a squad");
    println!("  rotate <id> <n|e|s|w>  - Turn a squad");
    println!("  roll                   - Roll for turn order");
    println!("  done                   - Finish placing your army");
    println!("  end                    - End your turn");
    println!("  quick                  - Deploy both armies automatically");
    println!("  quit / q               - Exit");
    println!();
}

fn print_new_events(events: &[GameEvent], shown: usize) -> usize {
    for event in events.iter().skip(shown) {
        println!("[{:>5}] {}", event.tick, event.description);
    }
    events.len()
}

fn symbol(class: UnitClass, owner: PlayerId) -> char {
    let c = match class {
        UnitClass::King => 'K',
        UnitClass::Knight => 'N',
        UnitClass::Infantry => 'I',
        UnitClass::Archer => 'A',
        UnitClass::Mercenary => 'M',
        UnitClass::HeavyInfantry => 'H',
        UnitClass::Peasant => 'P',
    };
    if owner == PlayerId::ONE {
        c
    } else {
        c.to_ascii_lowercase()
    }
}

fn display_board(controller: &TurnController) {
    let board = controller.board();
    let active = controller.active_player();

    println!();
    print!("    ");
    for col in 0..board.width() {
        print!("{:>3}", col);
    }
    println!();
    for row in 0..board.height() {
        print!("{:>3} ", row);
        for col in 0..board.width() {
            let pos = TilePos::new(row, col);
            let mark = match controller.squad_at(pos) {
                Some(squad) => symbol(squad.class(), squad.owner()),
                None if board.is_valid_attack_target(pos) => 'x',
                None if board.is_valid_move_target(pos) => '+',
                None => '.',
            };
            print!("{:>3}", mark);
        }
        println!();
    }

    println!(
        "\nPhase: {} | Player {} to act | AP: {}",
        controller.phase(),
        active.0 + 1,
        controller.ap_remaining(active)
    );
    for squad in controller.roster().iter().filter(|s| !s.is_eliminated()) {
        if let Some(tile) = squad.tile() {
            println!(
                "  #{:<3} P{} {:<15} {} facing {:?}, {} units",
                squad.id().0,
                squad.owner().0 + 1,
                squad.class().name(),
                tile,
                squad.orientation(),
                squad.units_remaining()
            );
        }
    }
}
