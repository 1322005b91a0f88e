//! Per-run simulation state and the move applier.

use ahash::AHashSet;
use aglet::Coord;

use crate::{
  rules::{Landing, Variant},
  Block, Direction, Level, Tile,
};

/// Why a single move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum IllegalMove {
  #[error("move leaves the grid")]
  OutOfBounds,
  #[error("way is blocked")]
  Blocked,
  #[error("block can't be pushed in that direction")]
  BlockCannotMove,
}

/// What a successful move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
  Walked { to: Coord },
  /// `block` is the block as it lies after the push.
  Pushed { block: Block, from: Coord, to: Coord },
  /// The block fell into the hole at `hole` and is gone.
  Sank { block: Block, hole: Coord },
}

/// The mutable side of one validation run.
///
/// Built by [`Level::start`] and owned by whoever drives the run.
#[derive(Debug, Clone)]
pub struct SimulationState {
  variant: Variant,
  player: Coord,
  tiles: aglet::Grid<Tile>,
  remaining_exits: AHashSet<Coord>,
}

impl SimulationState {
  pub(crate) fn new(level: &Level) -> Self {
    let grid = level.grid();
    Self {
      variant: level.variant(),
      player: grid.start(),
      tiles: grid.tiles().clone(),
      remaining_exits: level.variant().seed_exits(grid),
    }
  }

  pub fn variant(&self) -> Variant {
    self.variant
  }

  pub fn player(&self) -> Coord {
    self.player
  }

  pub fn width(&self) -> u32 {
    self.tiles.width()
  }

  pub fn height(&self) -> u32 {
    self.tiles.height()
  }

  /// Tile contents, not counting the player.
  pub fn tile(&self, coord: Coord) -> Option<Tile> {
    if coord.x >= self.width() || coord.y >= self.height() {
      return None;
    }
    self.tiles.get(coord).copied()
  }

  /// Exits still waiting for a block. Always empty under
  /// [`Variant::Pathology`].
  pub fn remaining_exits(&self) -> &AHashSet<Coord> {
    &self.remaining_exits
  }

  pub fn is_won(&self) -> bool {
    self.variant.is_won(self)
  }

  /// Move the player one step, pushing a block if one is in the way.
  ///
  /// On error the state is left untouched.
  pub fn apply(&mut self, dir: Direction) -> Result<Step, IllegalMove> {
    let (width, height) = (self.width(), self.height());
    let next = dir
      .step(self.player, width, height)
      .ok_or(IllegalMove::OutOfBounds)?;

    let block = match self.cell(next) {
      Tile::Block(block) => block,
      tile if tile.is_walkable() => {
        self.player = next;
        return Ok(Step::Walked { to: next });
      }
      _ => return Err(IllegalMove::Blocked),
    };

    // The mask wins over whatever lies beyond the block.
    if !block.can_move(dir) {
      return Err(IllegalMove::BlockCannotMove);
    }
    let beyond = dir
      .step(next, width, height)
      .ok_or(IllegalMove::OutOfBounds)?;

    let step = match self.variant.landing(self.cell(beyond)) {
      Landing::Refused => return Err(IllegalMove::Blocked),
      Landing::Sink => {
        self.tiles.insert(beyond, Tile::FilledHole);
        Step::Sank {
          block,
          hole: beyond,
        }
      }
      Landing::Rest { on_exit } => {
        let moved = Block {
          kind: block.kind,
          on_exit,
        };
        self.tiles.insert(beyond, Tile::Block(moved));
        if on_exit {
          self.remaining_exits.remove(&beyond);
        }
        Step::Pushed {
          block: moved,
          from: next,
          to: beyond,
        }
      }
    };

    self.tiles.insert(next, block.underneath());
    if block.on_exit {
      self.remaining_exits.insert(next);
    }
    self.player = next;
    Ok(step)
  }

  /// Everything that distinguishes this state from another run of the same
  /// level.
  pub(crate) fn key(&self) -> StateKey {
    let mut tiles = Vec::with_capacity((self.width() * self.height()) as usize);
    for y in 0..self.height() {
      for x in 0..self.width() {
        tiles.push(self.cell(Coord::new(x, y)));
      }
    }
    StateKey {
      player: self.player,
      tiles,
    }
  }

  fn cell(&self, coord: Coord) -> Tile {
    self.tiles.get(coord).copied().unwrap_or(Tile::Wall)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct StateKey {
  player: Coord,
  tiles: Vec<Tile>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::BlockKind;

  fn start(variant: Variant, encoding: &str) -> SimulationState {
    let rows = encoding.lines().collect::<Vec<_>>();
    Level::parse(encoding, rows[0].len() as u32, rows.len() as u32, variant)
      .unwrap()
      .start()
  }

  #[test]
  fn walking() {
    let mut state = start(Variant::Pathology, "403");
    assert_eq!(state.player(), Coord::new(0, 0));
    assert_eq!(
      state.apply(Direction::Right),
      Ok(Step::Walked {
        to: Coord::new(1, 0)
      })
    );
    assert!(!state.is_won());
    state.apply(Direction::Right).unwrap();
    assert!(state.is_won());
    assert_eq!(state.apply(Direction::Right), Err(IllegalMove::OutOfBounds));
    assert_eq!(state.apply(Direction::Up), Err(IllegalMove::OutOfBounds));
    assert_eq!(state.player(), Coord::new(2, 0));
  }

  #[test]
  fn walls_and_holes_stop_the_player() {
    let mut state = start(Variant::Pathology, "415\n053\n000");
    assert_eq!(state.apply(Direction::Right), Err(IllegalMove::Blocked));
    state.apply(Direction::Down).unwrap();
    assert_eq!(state.apply(Direction::Right), Err(IllegalMove::Blocked));
    assert_eq!(state.player(), Coord::new(0, 1));
  }

  #[test]
  fn pushing_moves_exactly_one_block() {
    let mut state = start(Variant::Pathology, "42003");
    assert_eq!(
      state.apply(Direction::Right),
      Ok(Step::Pushed {
        block: Block::new(BlockKind::Omni),
        from: Coord::new(1, 0),
        to: Coord::new(2, 0),
      })
    );
    assert_eq!(state.player(), Coord::new(1, 0));
    assert_eq!(state.tile(Coord::new(1, 0)), Some(Tile::Floor));
    assert_eq!(
      state.tile(Coord::new(2, 0)),
      Some(Tile::Block(Block::new(BlockKind::Omni)))
    );
  }

  #[test]
  fn failed_moves_change_nothing() {
    let mut state = start(Variant::Pathology, "4221\n0003");
    let before = state.key();
    assert_eq!(state.apply(Direction::Right), Err(IllegalMove::Blocked));
    assert_eq!(state.key(), before);
  }

  #[test]
  fn mask_is_checked_before_the_destination() {
    // The block sits against the edge and may only go left.
    let mut state = start(Variant::Pathology, "46\n30");
    assert_eq!(
      state.apply(Direction::Right),
      Err(IllegalMove::BlockCannotMove)
    );
    // An omni block in the same spot runs off the grid instead.
    let mut state = start(Variant::Pathology, "42\n30");
    assert_eq!(state.apply(Direction::Right), Err(IllegalMove::OutOfBounds));
    // A disallowed push into open floor is still refused.
    let mut state = start(Variant::Pathology, "4700\n3000");
    assert_eq!(
      state.apply(Direction::Right),
      Err(IllegalMove::BlockCannotMove)
    );
  }

  #[test]
  fn restricted_blocks_follow_their_mask() {
    let mut state = start(Variant::Sokopath, "4I03");
    assert!(state.apply(Direction::Right).is_ok());
    assert!(state.apply(Direction::Right).is_ok());
    assert!(state.is_won());

    let mut state = start(Variant::Sokopath, "0\nJ\n4");
    assert!(state.apply(Direction::Up).is_ok());
  }

  #[test]
  fn holes_swallow_blocks_for_good() {
    let mut state = start(Variant::Pathology, "4253\n0000");
    assert_eq!(
      state.apply(Direction::Right),
      Ok(Step::Sank {
        block: Block::new(BlockKind::Omni),
        hole: Coord::new(2, 0),
      })
    );
    assert_eq!(state.tile(Coord::new(2, 0)), Some(Tile::FilledHole));
    assert_eq!(state.tile(Coord::new(1, 0)), Some(Tile::Floor));
    state.apply(Direction::Right).unwrap();
    state.apply(Direction::Right).unwrap();
    assert!(state.is_won());
  }

  #[test]
  fn pathology_exit_refuses_blocks() {
    let mut state = start(Variant::Pathology, "423\n000");
    assert_eq!(state.apply(Direction::Right), Err(IllegalMove::Blocked));
  }

  #[test]
  fn sokopath_exits_toggle() {
    let mut state = start(Variant::Sokopath, "42300");
    assert_eq!(state.remaining_exits().len(), 1);
    assert!(!state.is_won());

    let step = state.apply(Direction::Right).unwrap();
    assert_eq!(step, Step::Pushed {
      block: Block::on_exit(BlockKind::Omni),
      from: Coord::new(1, 0),
      to: Coord::new(2, 0),
    });
    assert!(state.is_won());

    state.apply(Direction::Right).unwrap();
    assert!(!state.is_won());
    assert!(state.remaining_exits().contains(&Coord::new(2, 0)));
    assert_eq!(state.tile(Coord::new(2, 0)), Some(Tile::Exit));
  }

  #[test]
  fn player_on_a_bare_exit_wins_nothing_in_sokopath() {
    let mut state = start(Variant::Sokopath, "4302");
    state.apply(Direction::Right).unwrap();
    assert_eq!(state.tile(state.player()), Some(Tile::Exit));
    assert!(!state.is_won());
  }
}
