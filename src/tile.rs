//! Tile kinds, the four move directions, and block push permissions.

use std::fmt;

use aglet::{Coord, CoordVec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
  Floor,
  Wall,
  Start,
  Exit,
  /// Swallows the first block pushed into it. The player can't step in.
  Hole,
  /// A hole that has swallowed a block. Walkable, but no block may enter it
  /// again.
  FilledHole,
  Block(Block),
}

impl Tile {
  pub fn block(self) -> Option<Block> {
    match self {
      Tile::Block(block) => Some(block),
      _ => None,
    }
  }

  pub fn is_exit(self) -> bool {
    match self {
      Tile::Exit => true,
      Tile::Block(block) => block.on_exit,
      _ => false,
    }
  }

  /// Can the player walk onto this tile without pushing anything?
  pub fn is_walkable(self) -> bool {
    match self {
      Tile::Floor | Tile::Start | Tile::Exit | Tile::FilledHole => true,
      Tile::Wall | Tile::Hole | Tile::Block(_) => false,
    }
  }
}

/// A pushable block as it sits in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
  pub kind: BlockKind,
  /// Whether the block currently rests on an exit.
  /// Level content can start a block this way.
  pub on_exit: bool,
}

impl Block {
  pub fn new(kind: BlockKind) -> Self {
    Self {
      kind,
      on_exit: false,
    }
  }

  pub fn on_exit(kind: BlockKind) -> Self {
    Self {
      kind,
      on_exit: true,
    }
  }

  pub fn can_move(self, dir: Direction) -> bool {
    self.kind.permissions().contains(dir)
  }

  /// What's left behind once the block moves away.
  pub fn underneath(self) -> Tile {
    if self.on_exit {
      Tile::Exit
    } else {
      Tile::Floor
    }
  }
}

/// Every block kind, named after the directions it can be pushed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
  Omni,
  Left,
  Up,
  Right,
  Down,
  UpLeft,
  UpRight,
  DownRight,
  DownLeft,
  NotLeft,
  NotUp,
  NotRight,
  NotDown,
  LeftRight,
  UpDown,
}

impl BlockKind {
  /// In encoding order.
  pub const ALL: [BlockKind; 15] = [
    BlockKind::Omni,
    BlockKind::Left,
    BlockKind::Up,
    BlockKind::Right,
    BlockKind::Down,
    BlockKind::UpLeft,
    BlockKind::UpRight,
    BlockKind::DownRight,
    BlockKind::DownLeft,
    BlockKind::NotLeft,
    BlockKind::NotUp,
    BlockKind::NotRight,
    BlockKind::NotDown,
    BlockKind::LeftRight,
    BlockKind::UpDown,
  ];

  pub fn permissions(self) -> Directions {
    use Direction::*;
    match self {
      BlockKind::Omni => Directions::ALL,
      BlockKind::Left => Directions::only(Left),
      BlockKind::Up => Directions::only(Up),
      BlockKind::Right => Directions::only(Right),
      BlockKind::Down => Directions::only(Down),
      BlockKind::UpLeft => Directions::only(Up).with(Left),
      BlockKind::UpRight => Directions::only(Up).with(Right),
      BlockKind::DownRight => Directions::only(Down).with(Right),
      BlockKind::DownLeft => Directions::only(Down).with(Left),
      BlockKind::NotLeft => Directions::ALL.without(Left),
      BlockKind::NotUp => Directions::ALL.without(Up),
      BlockKind::NotRight => Directions::ALL.without(Right),
      BlockKind::NotDown => Directions::ALL.without(Down),
      BlockKind::LeftRight => Directions::HORIZONTAL,
      BlockKind::UpDown => Directions::VERTICAL,
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  Up,
  Down,
  Left,
  Right,
}

impl Direction {
  pub const ALL: [Direction; 4] =
    [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

  /// Unit step, `x` being the column and `y` the row.
  /// Rows grow downwards.
  pub fn delta(self) -> CoordVec {
    match self {
      Direction::Up => CoordVec::new(0, -1),
      Direction::Down => CoordVec::new(0, 1),
      Direction::Left => CoordVec::new(-1, 0),
      Direction::Right => CoordVec::new(1, 0),
    }
  }

  pub fn opposite(self) -> Direction {
    match self {
      Direction::Up => Direction::Down,
      Direction::Down => Direction::Up,
      Direction::Left => Direction::Right,
      Direction::Right => Direction::Left,
    }
  }

  /// Step from `coord`, or `None` when that would leave a
  /// `width` by `height` grid.
  pub fn step(self, coord: Coord, width: u32, height: u32) -> Option<Coord> {
    (coord.to_icoord() + self.delta())
      .to_coord()
      .filter(|c| c.x < width && c.y < height)
  }

  /// Numeric code used by stored checkpoints.
  pub fn code(self) -> u8 {
    match self {
      Direction::Left => 1,
      Direction::Up => 2,
      Direction::Right => 3,
      Direction::Down => 4,
    }
  }

  pub fn from_code(code: u8) -> Option<Direction> {
    match code {
      1 => Some(Direction::Left),
      2 => Some(Direction::Up),
      3 => Some(Direction::Right),
      4 => Some(Direction::Down),
      _ => None,
    }
  }

  pub fn letter(self) -> char {
    match self {
      Direction::Up => 'U',
      Direction::Down => 'D',
      Direction::Left => 'L',
      Direction::Right => 'R',
    }
  }

  pub fn from_letter(c: char) -> Option<Direction> {
    match c.to_ascii_uppercase() {
      'U' => Some(Direction::Up),
      'D' => Some(Direction::Down),
      'L' => Some(Direction::Left),
      'R' => Some(Direction::Right),
      _ => None,
    }
  }

  fn bit(self) -> u8 {
    match self {
      Direction::Up => 0b0001,
      Direction::Down => 0b0010,
      Direction::Left => 0b0100,
      Direction::Right => 0b1000,
    }
  }
}

impl fmt::Display for Direction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Direction::Up => "up",
      Direction::Down => "down",
      Direction::Left => "left",
      Direction::Right => "right",
    };
    f.write_str(name)
  }
}

/// A set of directions, stored as a bitmask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Directions(u8);

impl Directions {
  pub const NONE: Directions = Directions(0);
  pub const ALL: Directions = Directions(0b1111);
  pub const HORIZONTAL: Directions = Directions(0b1100);
  pub const VERTICAL: Directions = Directions(0b0011);

  pub fn only(dir: Direction) -> Self {
    Directions(dir.bit())
  }

  pub fn with(self, dir: Direction) -> Self {
    Directions(self.0 | dir.bit())
  }

  pub fn without(self, dir: Direction) -> Self {
    Directions(self.0 & !dir.bit())
  }

  pub fn contains(self, dir: Direction) -> bool {
    self.0 & dir.bit() != 0
  }

  pub fn len(self) -> usize {
    self.0.count_ones() as usize
  }

  pub fn is_empty(self) -> bool {
    self.0 == 0
  }

  pub fn iter(self) -> impl Iterator<Item = Direction> {
    Direction::ALL.into_iter().filter(move |&d| self.contains(d))
  }
}

impl fmt::Debug for Directions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}
