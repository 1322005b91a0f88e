//! Level files on disk.
//!
//! ```toml
//! title = "Hole in one"
//! author = "someone"
//! variant = "pathology"
//! width = 3
//! height = 3
//! data = """
//! 453
//! 020
//! 000"""
//! ```

use std::{fs, path::Path};

use eyre::WrapErr;
use pathology_checker::{Level, ParseError, Variant};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LevelFile {
  pub title: String,
  #[serde(default)]
  pub author: Option<String>,
  pub variant: Variant,
  pub width: u32,
  pub height: u32,
  pub data: String,
}

impl LevelFile {
  pub fn load(path: &Path) -> eyre::Result<Self> {
    let text = fs::read_to_string(path)
      .wrap_err_with(|| format!("couldn't read {}", path.display()))?;
    Self::from_toml(&text)
      .wrap_err_with(|| format!("{} is not a level file", path.display()))
  }

  pub fn from_toml(text: &str) -> eyre::Result<Self> {
    Ok(toml::from_str(text)?)
  }

  pub fn level(&self) -> Result<Level, ParseError> {
    Level::parse(&self.data, self.width, self.height, self.variant)
  }

  /// Title with the author, if there is one.
  pub fn byline(&self) -> String {
    match &self.author {
      Some(author) => format!("{} by {}", self.title, author),
      None => self.title.clone(),
    }
  }
}
