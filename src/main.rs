//! Conquista -- a turn-based territory-conquest game for the terminal.
//!
//! Registers territories (interactively or from a JSON config), then runs
//! the attack loop on stdin/stdout. Diagnostics go to stderr.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use conquista::combat::{CombatRule, RandomDice};
use conquista::config::{load_config, GameConfig, PlayMode};
use conquista::console::{ConsoleError, Prompter};
use conquista::session::{setup_board, Session, SessionEnd};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON game config with pre-registered territories and missions
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of territories to register interactively
    #[arg(short, long)]
    territories: Option<usize>,

    /// Combat rule
    #[arg(long, value_enum)]
    rule: Option<CombatRule>,

    /// Play mode
    #[arg(long, value_enum)]
    mode: Option<PlayMode>,

    /// Color of the player's army, used by missions
    #[arg(long)]
    player_color: Option<String>,

    /// RNG seed for dice and the mission draw (0 = entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    /// Applies command-line overrides on top of the file config.
    fn apply(&self, config: &mut GameConfig) {
        if let Some(n) = self.territories {
            config.territory_count = Some(n);
        }
        if let Some(rule) = self.rule {
            config.rule = rule;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(color) = &self.player_color {
            config.player_color = color.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Warn);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("could not load game config {}", path.display()))?,
        None => GameConfig::default(),
    };
    args.apply(&mut config);
    config.validate().context("invalid game settings")?;
    log::debug!("config: {:?}", config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());
    writeln!(prompter.out(), "=== WAR -- Territory Conquest ===")?;
    writeln!(prompter.out(), "Combat rule: {}", config.rule.name())?;

    let board = match config.initial_board() {
        Some(board) => board,
        None => match setup_board(&mut prompter, config.territory_count) {
            Ok(board) => board,
            Err(ConsoleError::Closed) => {
                log::info!("input closed during setup");
                return Ok(());
            }
            Err(e) => return Err(e).context("territory registration failed"),
        },
    };

    let mut dice = RandomDice::from_seed(config.seed);
    let mission = match config.mode {
        PlayMode::Campaign => config.mission_pool().draw(dice.rng_mut()),
        PlayMode::Skirmish => None,
    };

    let mut session = Session::new(board, config.rule, dice)
        .with_mode(config.mode)
        .with_player_color(config.player_color.clone());
    if let Some(mission) = mission {
        log::debug!("mission drawn: {:?}", mission);
        session = session.with_mission(mission);
    }

    let end = session.run(&mut prompter)?;
    log::info!("session ended: {:?}", end);
    if end == SessionEnd::InputClosed {
        writeln!(prompter.out())?;
    }
    writeln!(prompter.out(), "Game over.")?;
    Ok(())
}
