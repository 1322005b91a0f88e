//! Play harness

use std::io::{self, Stdout, Write};

use aglet::Coord;
use crossterm::{
  cursor::{Hide, MoveTo, Show},
  event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
  style::{
    Attribute, Attributes, Color, Colors, Print, ResetColor, SetAttributes,
    SetColors, SetForegroundColor,
  },
  terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
  },
  QueueableCommand,
};
use pathology_checker::{
  BlockKind, Direction, IllegalMove, Level, SimulationState, Step, Tile,
};

const START_X: u16 = 2;
const START_Y: u16 = 2;

const TILE_STRIDE_X: u16 = 2;
const TILE_STRIDE_Y: u16 = 1;

const BOARD_X: u16 = 4;
const BOARD_Y: u16 = 4;

pub struct PlayHarness {
  title: String,
  level: Level,
  state: SimulationState,
  /// States before each move, for undo.
  history: Vec<SimulationState>,
  moves: Vec<Direction>,

  status: Status,

  must_redraw: bool,
}

impl PlayHarness {
  /// Transfer runtime to the harness.
  /// Returns the moves played once the player quits.
  pub fn enter(title: String, level: Level) -> io::Result<Vec<Direction>> {
    let state = level.start();
    let mut harness = Self {
      title,
      level,
      state,
      history: Vec::new(),
      moves: Vec::new(),
      status: Status::JustStarted,
      must_redraw: false,
    };

    harness.spin()?;

    Ok(harness.moves)
  }

  fn spin(&mut self) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.queue(EnterAlternateScreen)?.queue(Hide)?.flush()?;

    loop {
      self.draw(&mut stdout)?;

      if let Event::Key(ev) = event::read()? {
        if matches!(ev.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
          let quit = self.update(ev.code, ev.modifiers);
          if quit {
            break;
          }
        }
      }
    }

    stdout.queue(Show)?.queue(LeaveAlternateScreen)?.flush()?;
    disable_raw_mode()?;

    Ok(())
  }

  /// return whether to quit
  fn update(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
    if key == KeyCode::Char('c') && mods.contains(KeyModifiers::CONTROL) {
      return true;
    }

    // Whatever was left over is cleared by the redraw this leads to.
    self.must_redraw = true;
    if key == KeyCode::Char('l') && mods.contains(KeyModifiers::CONTROL) {
      return false;
    }

    let dir = match key {
      KeyCode::Left | KeyCode::Char('h') => Some(Direction::Left),
      KeyCode::Right | KeyCode::Char('l') => Some(Direction::Right),
      KeyCode::Up | KeyCode::Char('k') => Some(Direction::Up),
      KeyCode::Down | KeyCode::Char('j') => Some(Direction::Down),
      _ => None,
    };
    if let Some(dir) = dir {
      let before = self.state.clone();
      self.status = match self.state.apply(dir) {
        Ok(step) => {
          self.history.push(before);
          self.moves.push(dir);
          if self.state.is_won() {
            Status::Won
          } else {
            Status::Moved(step)
          }
        }
        Err(why) => Status::Rejected(dir, why),
      };
      return false;
    }

    match key {
      KeyCode::Char('u') => {
        if let Some(prev) = self.history.pop() {
          self.state = prev;
          self.moves.pop();
          self.status = Status::Undone;
        }
      }
      KeyCode::Char('r') => {
        self.state = self.level.start();
        self.history.clear();
        self.moves.clear();
        self.status = Status::JustStarted;
      }
      _ => {}
    }
    false
  }

  fn draw(&mut self, stdout: &mut Stdout) -> io::Result<()> {
    if self.must_redraw {
      stdout.queue(Clear(ClearType::All))?;
      self.must_redraw = false;
    }

    stdout
      .queue(MoveTo(START_X, START_Y))?
      .queue(ResetColor)?
      .queue(Print(&self.title))?
      .queue(Print(format!(" ({})", self.level.variant())))?;

    for y in 0..self.state.height() {
      for x in 0..self.state.width() {
        let coord = Coord::new(x, y);
        let (ch, cols, fmt) = if coord == self.state.player() {
          player_display()
        } else {
          tile_display(self.state.tile(coord).unwrap_or(Tile::Wall))
        };
        let screenpos = grid_to_screen(coord);
        stdout
          .queue(MoveTo(screenpos.0, screenpos.1))?
          .queue(SetColors(cols))?
          .queue(SetAttributes(fmt))?
          .queue(Print(ch))?;
      }
    }

    let below = grid_to_screen(Coord::new(0, self.state.height())).1 + 1;
    stdout
      .queue(MoveTo(BOARD_X, below))?
      .queue(ResetColor)?
      .queue(SetAttributes(Attribute::Reset.into()))?
      .queue(Print(format!("moves: {}", self.moves.len())))?
      .queue(MoveTo(BOARD_X, below + 1))?;
    match self.status {
      Status::JustStarted => {
        stdout.queue(Print("arrows/hjkl move, u undo, r restart"))?;
      }
      Status::Moved(Step::Sank { .. }) => {
        stdout.queue(Print("the hole swallowed the block"))?;
      }
      Status::Moved(_) | Status::Undone => {}
      Status::Rejected(dir, why) => {
        stdout
          .queue(SetForegroundColor(Color::Red))?
          .queue(Print(format!("can't go {}: {}", dir, why)))?;
      }
      Status::Won => {
        stdout
          .queue(SetForegroundColor(Color::Green))?
          .queue(Print("solved!"))?;
      }
    }

    stdout.flush()?;
    Ok(())
  }
}

#[derive(Debug, Clone, Copy)]
enum Status {
  JustStarted,
  Moved(Step),
  Undone,
  /// Temporarily display to the player
  Rejected(Direction, IllegalMove),
  Won,
}

fn player_display() -> (char, Colors, Attributes) {
  (
    '@',
    Colors::new(Color::Yellow, Color::Reset),
    Attributes::default() | Attribute::Bold,
  )
}

fn tile_display(tile: Tile) -> (char, Colors, Attributes) {
  match tile {
    Tile::Floor | Tile::Start => (
      '.',
      Colors::new(Color::DarkGrey, Color::Reset),
      Attribute::NormalIntensity.into(),
    ),
    Tile::Wall => (
      '#',
      Colors::new(Color::White, Color::DarkGrey),
      Attribute::Bold.into(),
    ),
    Tile::Exit => (
      'x',
      Colors::new(Color::Green, Color::Reset),
      Attribute::Bold.into(),
    ),
    Tile::Hole => (
      'O',
      Colors::new(Color::DarkRed, Color::Reset),
      Attribute::Bold.into(),
    ),
    Tile::FilledHole => (
      '_',
      Colors::new(Color::DarkGrey, Color::Reset),
      Attribute::NormalIntensity.into(),
    ),
    Tile::Block(block) => {
      let bg = if block.on_exit {
        Color::DarkGreen
      } else {
        Color::Reset
      };
      (
        block_glyph(block.kind),
        Colors::new(Color::Cyan, bg),
        Attribute::Bold.into(),
      )
    }
  }
}

/// Box-drawing arms point the ways a block can be pushed.
fn block_glyph(kind: BlockKind) -> char {
  match kind {
    BlockKind::Omni => '┼',
    BlockKind::Left => '<',
    BlockKind::Up => '^',
    BlockKind::Right => '>',
    BlockKind::Down => 'v',
    BlockKind::UpLeft => '┘',
    BlockKind::UpRight => '└',
    BlockKind::DownRight => '┌',
    BlockKind::DownLeft => '┐',
    BlockKind::NotLeft => '├',
    BlockKind::NotUp => '┬',
    BlockKind::NotRight => '┤',
    BlockKind::NotDown => '┴',
    BlockKind::LeftRight => '─',
    BlockKind::UpDown => '│',
  }
}

fn grid_to_screen(coord: Coord) -> (u16, u16) {
  (
    coord.x as u16 * TILE_STRIDE_X + BOARD_X,
    coord.y as u16 * TILE_STRIDE_Y + BOARD_Y,
  )
}
