mod harness;
mod level_file;
mod report;

use std::{path::Path, process::ExitCode};

use argh::FromArgs;
use eyre::eyre;
use harness::PlayHarness;
use level_file::LevelFile;
use pathology_checker::{
  format_moves, parse_moves, Level, SearchLimits, SolveOutcome, Verdict,
};

fn main() -> eyre::Result<ExitCode> {
  let args: ArgsEntrypoint = argh::from_env();
  init_logging(args.verbose);

  match args.sub {
    Subcommands::Play(play) => play.run(),
    Subcommands::Check(check) => check.run(),
    Subcommands::Solve(solve) => solve.run(),
  }
}

#[derive(FromArgs, Debug)]
/// Check, solve, and play Pathology and Sokopath levels.
struct ArgsEntrypoint {
  /// log every move to stderr.
  #[argh(switch, short = 'v')]
  verbose: bool,

  #[argh(subcommand)]
  sub: Subcommands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Subcommands {
  Play(CmdPlay),
  Check(CmdCheck),
  Solve(CmdSolve),
}

/// Play a level in the terminal.
///
/// Controls:
/// - Arrow keys or HJKL to move.
/// - U to undo, R to restart.
/// - Ctrl+C to quit.
/// - Ctrl+L to redraw the screen.
///
/// The moves played are printed on the way out.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "play")]
struct CmdPlay {
  /// path to a `.toml` level file.
  #[argh(positional)]
  path: String,
}

impl CmdPlay {
  fn run(&self) -> eyre::Result<ExitCode> {
    let (file, level) = load_level(&self.path)?;
    let moves = PlayHarness::enter(file.byline(), level.clone())?;
    println!("{}", format_moves(&moves));
    Ok(exit_code(level.check_moves(&moves)))
  }
}

/// Check whether a move sequence solves a level.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "check")]
struct CmdCheck {
  /// path to a `.toml` level file.
  #[argh(positional)]
  path: String,
  /// moves as letters (`RRDU`) or numeric codes (`3,3,4,2`).
  #[argh(positional)]
  moves: String,
}

impl CmdCheck {
  fn run(&self) -> eyre::Result<ExitCode> {
    let (_, level) = load_level(&self.path)?;
    let moves = match parse_moves(&self.moves) {
      Ok(moves) => moves,
      Err(e) => {
        report::moves_error(&self.moves, &e)?;
        return Err(eyre!("{}", e));
      }
    };

    let verdict = level.check_moves(&moves);
    match verdict {
      Verdict::Solved => println!("solved in {} moves", moves.len()),
      Verdict::Illegal {
        index,
        direction,
        reason,
      } => println!("move #{} ({}) is illegal: {}", index, direction, reason),
      Verdict::Incomplete => println!(
        "all {} moves are legal, but the level isn't solved",
        moves.len()
      ),
    }
    Ok(exit_code(verdict))
  }
}

/// Find a shortest solution by brute force.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "solve")]
struct CmdSolve {
  /// path to a `.toml` level file.
  #[argh(positional)]
  path: String,
  /// give up after seeing this many states.
  #[argh(option, default = "SearchLimits::default().max_states")]
  max_states: usize,
}

impl CmdSolve {
  fn run(&self) -> eyre::Result<ExitCode> {
    let (_, level) = load_level(&self.path)?;
    let limits = SearchLimits {
      max_states: self.max_states,
    };
    match level.solve(limits) {
      SolveOutcome::Solved(moves) => {
        println!("{} ({} moves)", format_moves(&moves), moves.len());
        Ok(ExitCode::SUCCESS)
      }
      SolveOutcome::Unsolvable => {
        println!("no solution");
        Ok(ExitCode::FAILURE)
      }
      SolveOutcome::LimitReached => Err(eyre!(
        "no solution within {} states, try a larger --max-states",
        self.max_states
      )),
    }
  }
}

fn load_level(path: &str) -> eyre::Result<(LevelFile, Level)> {
  let file = LevelFile::load(Path::new(path))?;
  match file.level() {
    Ok(level) => Ok((file, level)),
    Err(e) => {
      report::level_error(&file, &e)?;
      Err(eyre!("{}: {}", path, e))
    }
  }
}

fn exit_code(verdict: Verdict) -> ExitCode {
  if verdict.is_solved() {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  }
}

fn init_logging(verbose: bool) {
  let level = if verbose {
    tracing::Level::DEBUG
  } else {
    tracing::Level::WARN
  };
  tracing_subscriber::fmt()
    .with_max_level(level)
    .with_writer(std::io::stderr)
    .init();
}
