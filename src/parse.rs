use std::fmt;

use aglet::Coord;
use nom::{
  bytes::complete::{take_till, take_while},
  character::complete::{anychar, line_ending},
  combinator::map_opt,
  error::{context, VerboseError},
  multi::{many0, separated_list1},
  sequence::{preceded, terminated},
  Finish, IResult, Offset,
};

use crate::{Block, BlockKind, Direction, Grid, Tile, Variant};

/// Why a level encoding could not become a playable level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
  #[error("level is not {width}x{height}: {mismatch}")]
  MalformedDimensions {
    width: u32,
    height: u32,
    mismatch: Mismatch,
  },
  #[error("unknown tile {ch:?} at {coord}")]
  UnknownTile {
    ch: char,
    coord: Coord,
    /// Byte offset into the encoding.
    offset: usize,
  },
  #[error("expected exactly one start, found {found}")]
  MissingStart { found: usize },
  #[error("{variant} levels need exactly one exit, found {found}")]
  ExitCount { variant: Variant, found: usize },
  #[error("{tile:?} at {coord} is not part of {variant} levels")]
  UnsupportedTile {
    variant: Variant,
    tile: Tile,
    coord: Coord,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
  RowCount(usize),
  RowWidth { row: u32, found: usize },
}

impl fmt::Display for Mismatch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Mismatch::RowCount(found) => write!(f, "found {} rows", found),
      Mismatch::RowWidth { row, found } => {
        write!(f, "row {} has {} cells", row, found)
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
  #[error("unknown move code {ch:?} for move #{index}")]
  UnknownCode {
    ch: char,
    /// Index the move would have had.
    index: usize,
    offset: usize,
  },
}

impl Grid {
  /// Parse a level encoding, one row per line, one character per cell.
  pub fn parse(
    encoding: &str,
    width: u32,
    height: u32,
  ) -> Result<Self, ParseError> {
    let (rest, rows) = match rows(encoding).finish() {
      Ok(it) => it,
      Err(e) => (e.errors.first().map_or("", |(s, _)| *s), Vec::new()),
    };
    if !rest.is_empty() {
      // Only a stray carriage return can stop the row splitter.
      let last = rows.last().copied().unwrap_or("");
      return Err(ParseError::UnknownTile {
        ch: rest.chars().next().unwrap_or('\r'),
        coord: Coord::new(
          last.chars().count() as u32,
          rows.len().saturating_sub(1) as u32,
        ),
        offset: encoding.offset(rest),
      });
    }

    let malformed = |mismatch| ParseError::MalformedDimensions {
      width,
      height,
      mismatch,
    };
    if rows.len() != height as usize {
      return Err(malformed(Mismatch::RowCount(rows.len())));
    }

    // Every row is checked against `width` before anything sized by it is
    // allocated.
    let mut decoded = Vec::with_capacity(rows.len());
    for (y, row) in rows.into_iter().enumerate() {
      let y = y as u32;
      let (rest, cells) = match many0(cell)(row).finish() {
        Ok(it) => it,
        Err(e) => (e.errors.first().map_or(row, |(s, _)| *s), Vec::new()),
      };
      if let Some(ch) = rest.chars().next() {
        return Err(ParseError::UnknownTile {
          ch,
          coord: Coord::new(cells.len() as u32, y),
          offset: encoding.offset(rest),
        });
      }
      if cells.len() != width as usize {
        return Err(malformed(Mismatch::RowWidth {
          row: y,
          found: cells.len(),
        }));
      }
      decoded.push(cells);
    }

    let mut tiles = aglet::Grid::new(width, height);
    let mut starts = Vec::new();
    for (y, cells) in decoded.into_iter().enumerate() {
      for (x, cell) in cells.into_iter().enumerate() {
        let coord = Coord::new(x as u32, y as u32);
        if cell.start {
          starts.push(coord);
        }
        tiles.insert(coord, cell.tile);
      }
    }

    match starts.as_slice() {
      [start] => Ok(Grid::new(tiles, *start)),
      _ => Err(ParseError::MissingStart {
        found: starts.len(),
      }),
    }
  }
}

/// Parse a move sequence.
///
/// Accepts the letters `UDLR` in either case and the numeric codes `1`
/// (left) to `4` (down). Moves may be run together (`"RRDD"`) or separated
/// by commas and whitespace (`"3, 3, 4"`).
pub fn parse_moves(text: &str) -> Result<Vec<Direction>, MoveParseError> {
  let (rest, moves) = match moves(text).finish() {
    Ok(it) => it,
    Err(e) => (e.errors.first().map_or(text, |(s, _)| *s), Vec::new()),
  };
  match rest.chars().next() {
    None => Ok(moves),
    Some(ch) => Err(MoveParseError::UnknownCode {
      ch,
      index: moves.len(),
      offset: text.offset(rest),
    }),
  }
}

/// Letter form of a move sequence, readable by [`parse_moves`].
pub fn format_moves(moves: &[Direction]) -> String {
  moves.iter().map(|dir| dir.letter()).collect()
}

fn rows(s: &str) -> IResult<&str, Vec<&str>, VerboseError<&str>> {
  let (s, mut rows) = separated_list1(
    line_ending,
    take_till(|c: char| c == '\r' || c == '\n'),
  )(s)?;
  // One trailing line ending closes the last row instead of opening another.
  if rows.len() > 1 && rows.last() == Some(&"") {
    rows.pop();
  }
  Ok((s, rows))
}

struct Cell {
  tile: Tile,
  start: bool,
}

impl Cell {
  fn tile(tile: Tile) -> Option<Self> {
    Some(Self { tile, start: false })
  }

  fn decode(c: char) -> Option<Self> {
    match c {
      '0' => Cell::tile(Tile::Floor),
      '1' => Cell::tile(Tile::Wall),
      '3' => Cell::tile(Tile::Exit),
      '4' => Some(Cell {
        tile: Tile::Start,
        start: true,
      }),
      '5' => Cell::tile(Tile::Hole),
      'Z' => Some(Cell {
        tile: Tile::Exit,
        start: true,
      }),
      '2' => Cell::tile(Tile::Block(Block::new(BlockKind::Omni))),
      '6'..='9' => {
        let kind = BlockKind::ALL[c as usize - '6' as usize + 1];
        Cell::tile(Tile::Block(Block::new(kind)))
      }
      'A'..='J' => {
        let kind = BlockKind::ALL[c as usize - 'A' as usize + 5];
        Cell::tile(Tile::Block(Block::new(kind)))
      }
      'K'..='Y' => {
        let kind = BlockKind::ALL[c as usize - 'K' as usize];
        Cell::tile(Tile::Block(Block::on_exit(kind)))
      }
      _ => None,
    }
  }
}

fn cell(s: &str) -> IResult<&str, Cell, VerboseError<&str>> {
  context("tile", map_opt(anychar, Cell::decode))(s)
}

fn move_code(s: &str) -> IResult<&str, Direction, VerboseError<&str>> {
  context(
    "move",
    map_opt(anychar, |c| {
      Direction::from_letter(c).or_else(|| {
        c.to_digit(10).and_then(|code| Direction::from_code(code as u8))
      })
    }),
  )(s)
}

fn separators(s: &str) -> IResult<&str, &str, VerboseError<&str>> {
  take_while(|c: char| c == ',' || c.is_whitespace())(s)
}

fn moves(s: &str) -> IResult<&str, Vec<Direction>, VerboseError<&str>> {
  preceded(separators, many0(terminated(move_code, separators)))(s)
}
