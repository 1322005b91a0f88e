//! The two rule sets a level can be played under.

use std::{fmt, str::FromStr};

use ahash::AHashSet;
use aglet::Coord;
use serde::{Deserialize, Serialize};

use crate::{state::SimulationState, Grid, ParseError, Tile};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
  /// One exit, holes that swallow blocks. Won by standing on the exit.
  Pathology,
  /// Any number of exits, no holes. Won once every exit holds a block.
  Sokopath,
}

/// What happens to a block pushed onto some tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Landing {
  Rest { on_exit: bool },
  Sink,
  Refused,
}

impl Variant {
  /// Reject grids this variant can't play.
  pub fn admit(self, grid: &Grid) -> Result<(), ParseError> {
    for y in 0..grid.height() {
      for x in 0..grid.width() {
        let coord = Coord::new(x, y);
        let tile = match grid.get_tile(coord) {
          Some(tile) => tile,
          None => continue,
        };
        let unsupported = match self {
          Variant::Pathology => {
            tile.block().map_or(false, |b| b.on_exit)
              || (coord == grid.start() && tile == Tile::Exit)
          }
          Variant::Sokopath => {
            matches!(tile, Tile::Hole | Tile::FilledHole)
          }
        };
        if unsupported {
          return Err(ParseError::UnsupportedTile {
            variant: self,
            tile,
            coord,
          });
        }
      }
    }

    if self == Variant::Pathology && grid.exits().len() != 1 {
      return Err(ParseError::ExitCount {
        variant: self,
        found: grid.exits().len(),
      });
    }
    Ok(())
  }

  /// Exits that start out needing a block.
  pub(crate) fn seed_exits(self, grid: &Grid) -> AHashSet<Coord> {
    match self {
      Variant::Pathology => AHashSet::new(),
      Variant::Sokopath => grid
        .exits()
        .iter()
        .copied()
        .filter(|&exit| grid.get_tile(exit) == Some(Tile::Exit))
        .collect(),
    }
  }

  pub(crate) fn landing(self, target: Tile) -> Landing {
    match (self, target) {
      (_, Tile::Floor | Tile::Start) => Landing::Rest { on_exit: false },
      (Variant::Sokopath, Tile::Exit) => Landing::Rest { on_exit: true },
      (Variant::Pathology, Tile::Exit) => Landing::Refused,
      (Variant::Pathology, Tile::Hole) => Landing::Sink,
      (Variant::Sokopath, Tile::Hole) => Landing::Refused,
      (_, Tile::Wall | Tile::FilledHole | Tile::Block(_)) => Landing::Refused,
    }
  }

  pub fn is_won(self, state: &SimulationState) -> bool {
    match self {
      Variant::Pathology => state.tile(state.player()) == Some(Tile::Exit),
      Variant::Sokopath => state.remaining_exits().is_empty(),
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Variant::Pathology => "pathology",
      Variant::Sokopath => "sokopath",
    }
  }
}

impl fmt::Display for Variant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant {0:?}, expected `pathology` or `sokopath`")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
  type Err = UnknownVariant;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "pathology" => Ok(Variant::Pathology),
      "sokopath" => Ok(Variant::Sokopath),
      _ => Err(UnknownVariant(s.to_string())),
    }
  }
}
