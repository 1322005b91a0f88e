pub mod checker;
mod parse;
pub mod rules;
pub mod solve;
pub mod state;
pub mod tile;

pub use checker::{check_solution, validate, Verdict};
pub use parse::{
  format_moves, parse_moves, Mismatch, MoveParseError, ParseError,
};
pub use rules::{UnknownVariant, Variant};
pub use solve::{SearchLimits, SolveOutcome};
pub use state::{IllegalMove, SimulationState, Step};
pub use tile::{Block, BlockKind, Direction, Directions, Tile};

use aglet::Coord;

/// A parsed level layout, before any rule variant is applied.
#[derive(Debug, Clone)]
pub struct Grid {
  tiles: aglet::Grid<Tile>,
  start: Coord,
  exits: Vec<Coord>,
  blocks: Vec<(Coord, Block)>,
}

impl Grid {
  /// Every cell of `tiles` must be filled.
  fn new(tiles: aglet::Grid<Tile>, start: Coord) -> Self {
    let mut exits = Vec::new();
    let mut blocks = Vec::new();
    for y in 0..tiles.height() {
      for x in 0..tiles.width() {
        let coord = Coord::new(x, y);
        let tile = match tiles.get(coord) {
          Some(tile) => *tile,
          None => continue,
        };
        if tile.is_exit() {
          exits.push(coord);
        }
        if let Tile::Block(block) = tile {
          blocks.push((coord, block));
        }
      }
    }
    Self {
      tiles,
      start,
      exits,
      blocks,
    }
  }

  pub fn width(&self) -> u32 {
    self.tiles.width()
  }

  pub fn height(&self) -> u32 {
    self.tiles.height()
  }

  pub fn get_tile(&self, coord: Coord) -> Option<Tile> {
    if coord.x >= self.width() || coord.y >= self.height() {
      return None;
    }
    self.tiles.get(coord).copied()
  }

  pub fn start(&self) -> Coord {
    self.start
  }

  /// Exit coordinates in row-major order, including those under blocks.
  pub fn exits(&self) -> &[Coord] {
    &self.exits
  }

  /// Blocks in row-major order.
  pub fn blocks(&self) -> &[(Coord, Block)] {
    &self.blocks
  }

  pub(crate) fn tiles(&self) -> &aglet::Grid<Tile> {
    &self.tiles
  }
}

/// A grid that has been checked against the rule variant it is played
/// under.
#[derive(Debug, Clone)]
pub struct Level {
  grid: Grid,
  variant: Variant,
}

impl Level {
  pub fn new(grid: Grid, variant: Variant) -> Result<Self, ParseError> {
    variant.admit(&grid)?;
    Ok(Self { grid, variant })
  }

  /// Parse `encoding` and check it against `variant`.
  pub fn parse(
    encoding: &str,
    width: u32,
    height: u32,
    variant: Variant,
  ) -> Result<Self, ParseError> {
    let grid = Grid::parse(encoding, width, height)?;
    Self::new(grid, variant)
  }

  pub fn grid(&self) -> &Grid {
    &self.grid
  }

  pub fn variant(&self) -> Variant {
    self.variant
  }

  /// Fresh simulation state for one run through the level.
  pub fn start(&self) -> SimulationState {
    SimulationState::new(self)
  }
}
