//! Pretty error reports against the offending text.

use std::{io, ops::Range};

use aglet::Coord;
use ariadne::{Color, Label, Report, ReportKind, Source};
use pathology_checker::{Mismatch, MoveParseError, ParseError};

use crate::level_file::LevelFile;

pub fn level_error(file: &LevelFile, err: &ParseError) -> io::Result<()> {
  let span = level_span(&file.data, err);
  Report::build(ReportKind::Error, (), span.start)
    .with_message(format!("{:?} is not a valid level", file.title))
    .with_label(
      Label::new(span)
        .with_message(err.to_string())
        .with_color(Color::Red),
    )
    .finish()
    .eprint(Source::from(file.data.as_str()))
}

pub fn moves_error(moves: &str, err: &MoveParseError) -> io::Result<()> {
  let MoveParseError::UnknownCode { ch, offset, .. } = *err;
  let span = offset..offset + ch.len_utf8();
  Report::build(ReportKind::Error, (), span.start)
    .with_message("couldn't read the moves")
    .with_label(
      Label::new(span)
        .with_message(err.to_string())
        .with_color(Color::Red),
    )
    .with_note("moves are U, D, L, R or the codes 1 to 4")
    .finish()
    .eprint(Source::from(moves))
}

fn level_span(data: &str, err: &ParseError) -> Range<usize> {
  match *err {
    ParseError::UnknownTile { ch, offset, .. } => {
      offset..offset + ch.len_utf8()
    }
    ParseError::MalformedDimensions {
      mismatch: Mismatch::RowWidth { row, .. },
      ..
    } => row_span(data, row).unwrap_or(0..data.len()),
    ParseError::UnsupportedTile { coord, .. } => cell_span(data, coord),
    ParseError::MalformedDimensions { .. }
    | ParseError::MissingStart { .. }
    | ParseError::ExitCount { .. } => 0..data.len(),
  }
}

fn row_span(data: &str, row: u32) -> Option<Range<usize>> {
  let mut start = 0;
  for (y, line) in data.split('\n').enumerate() {
    if y == row as usize {
      return Some(start..start + line.trim_end_matches('\r').len());
    }
    start += line.len() + 1;
  }
  None
}

fn cell_span(data: &str, coord: Coord) -> Range<usize> {
  match row_span(data, coord.y) {
    // Every tile character is one byte.
    Some(row) => {
      let at = row.start + coord.x as usize;
      at..at + 1
    }
    None => 0..data.len(),
  }
}
