use tracing::debug;

use crate::{Direction, IllegalMove, Level, ParseError, Variant};

/// The outcome of playing a move sequence through a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
  /// Every move was legal and the last one left the level won.
  Solved,
  /// The move at `index` was rejected. Nothing after it was played.
  Illegal {
    index: usize,
    direction: Direction,
    reason: IllegalMove,
  },
  /// Every move was legal but the level isn't won.
  Incomplete,
}

impl Verdict {
  pub fn is_solved(self) -> bool {
    self == Verdict::Solved
  }
}

impl Level {
  /// Play `moves` from the start of the level.
  pub fn check_moves(&self, moves: &[Direction]) -> Verdict {
    let mut state = self.start();
    for (index, &direction) in moves.iter().enumerate() {
      match state.apply(direction) {
        Ok(step) => debug!(index, %direction, ?step, "applied move"),
        Err(reason) => {
          debug!(index, %direction, %reason, "illegal move");
          return Verdict::Illegal {
            index,
            direction,
            reason,
          };
        }
      }
    }

    let verdict = if state.is_won() {
      Verdict::Solved
    } else {
      Verdict::Incomplete
    };
    debug!(moves = moves.len(), ?verdict, "checked moves");
    verdict
  }
}

/// Parse a level and play `moves` through it.
///
/// A level that fails to parse is an error, never a verdict: it says the
/// level is broken, not that the moves are wrong.
pub fn check_solution(
  encoding: &str,
  width: u32,
  height: u32,
  variant: Variant,
  moves: &[Direction],
) -> Result<Verdict, ParseError> {
  let level = Level::parse(encoding, width, height, variant)?;
  Ok(level.check_moves(moves))
}

/// Whether `moves` solves the level.
pub fn validate(
  encoding: &str,
  width: u32,
  height: u32,
  variant: Variant,
  moves: &[Direction],
) -> Result<bool, ParseError> {
  check_solution(encoding, width, height, variant, moves)
    .map(Verdict::is_solved)
}
