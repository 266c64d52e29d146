use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use tile_merge::core::{Direction, Position, SessionConfig};
use tile_merge::session::{Checkpoint, GameSession, SwapReport};

#[derive(Debug, Parser)]
#[command(author, version, about = "Play the sliding-tile merge game in a terminal")]
struct Cli {
    /// TOML session config; command-line flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Grid side length
    #[arg(long, value_name = "N")]
    size: Option<usize>,

    /// RNG seed (omit for a random game)
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Where the best score and time are kept
    #[arg(long, value_name = "FILE")]
    score_file: Option<PathBuf>,

    /// Unlock swaps available per game
    #[arg(long, value_name = "N")]
    unlocks: Option<u32>,
}

const HELP: &str = "\
commands:
  up | down | left | right (or w a s d, h j k l)
  swap R C R C      exchange two cells (uses one unlock)
  restart           start a new game
  unlocks N         set unlock credits and restart
  reset-best        forget the best record
  save FILE         write a checkpoint
  load FILE         resume from a checkpoint
  help | quit";

fn load_config(cli: &Cli) -> Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SessionConfig::default(),
    };

    if let Some(size) = cli.size {
        config = config.with_size(size);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(path) = &cli.score_file {
        config = config.with_score_file(path);
    }
    if let Some(unlocks) = cli.unlocks {
        config = config.with_unlock_credits(unlocks);
    }
    Ok(config)
}

fn parse_position(row: Option<&str>, col: Option<&str>) -> Result<Position> {
    let (Some(row), Some(col)) = (row, col) else {
        bail!("expected a row and a column");
    };
    Ok(Position::new(
        row.parse().context("row must be a number")?,
        col.parse().context("column must be a number")?,
    ))
}

fn render(session: &GameSession) {
    let snapshot = session.snapshot();
    println!("{}", snapshot.grid);
    println!(
        "unlocks: {}  best: {}  best time: {:.1}s  elapsed: {:.1}s",
        snapshot.unlock_credits,
        snapshot.best.best_score,
        snapshot.best.best_time_seconds,
        snapshot.elapsed.as_secs_f64()
    );
    if snapshot.is_over {
        println!("game over (swap to continue, or restart)");
    }
}

/// Run one command line. Returns `false` when the player quits.
fn execute(session: &mut GameSession, config: &SessionConfig, line: &str) -> Result<bool> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(true);
    };

    match command {
        "quit" | "q" | "exit" => return Ok(false),
        "help" | "?" => println!("{HELP}"),
        "restart" => session.restart()?,
        "reset-best" => session.reset_best(),
        "unlocks" => {
            let credits = words
                .next()
                .context("expected a number")?
                .parse()
                .context("unlocks must be a number")?;
            session.set_unlock_credits(credits)?;
        }
        "swap" => {
            let from = parse_position(words.next(), words.next())?;
            let to = parse_position(words.next(), words.next())?;
            session.swap_start(from)?;
            match session.swap_commit(to)? {
                SwapReport::Cancelled => println!("swap cancelled"),
                SwapReport::Swapped { .. } => {}
            }
        }
        "save" => {
            let path = words.next().context("expected a file name")?;
            let bytes = session.checkpoint().to_bytes()?;
            std::fs::write(path, bytes).with_context(|| format!("writing {path}"))?;
            info!("saved checkpoint to {path}");
        }
        "load" => {
            let path = words.next().context("expected a file name")?;
            let bytes = std::fs::read(path).with_context(|| format!("reading {path}"))?;
            let checkpoint = Checkpoint::from_bytes(&bytes)?;
            *session = GameSession::builder(config.clone())
                .resume(checkpoint)
                .build()?;
        }
        other => {
            let direction: Direction = other.parse()?;
            let report = session.play_move(direction)?;
            if !report.moved() {
                println!("nothing moves {direction}");
            }
        }
    }

    render(session);
    Ok(true)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config(&cli)?;
    let mut session = GameSession::new(config.clone()).context("starting session")?;
    println!("{HELP}\n");
    render(&session);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        match execute(&mut session, &config, &line?) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("error: {e:#}"),
        }
    }

    Ok(())
}
