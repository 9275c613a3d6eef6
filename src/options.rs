use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Gameplay options chosen before a game starts.  Both mode flags can be
/// changed mid-game as well.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Options {
    /// Side length of the square playing field
    pub(crate) grid_size: GridSize,

    /// Start with walls on: leaving the field ends the game
    pub(crate) walls: bool,

    /// Start with the autopilot steering
    pub(crate) autopilot: bool,
}

/// Side length of the playing field
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "u16", into = "u16")]
pub(crate) struct GridSize(u16);

impl GridSize {
    /// Smallest field that fits a starting snake with room to turn
    pub(crate) const MIN: u16 = 4;

    /// Largest field that fits in the display area along with the status
    /// bar and message lines
    pub(crate) const MAX: u16 = 19;

    pub(crate) fn new(size: u16) -> Result<GridSize, GridSizeError> {
        if (Self::MIN..=Self::MAX).contains(&size) {
            Ok(GridSize(size))
        } else {
            Err(GridSizeError::OutOfRange(size))
        }
    }

    pub(crate) fn get(self) -> u16 {
        self.0
    }
}

impl Default for GridSize {
    fn default() -> GridSize {
        GridSize(18)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.to_string())
    }
}

impl TryFrom<u16> for GridSize {
    type Error = GridSizeError;

    fn try_from(value: u16) -> Result<GridSize, GridSizeError> {
        GridSize::new(value)
    }
}

impl From<GridSize> for u16 {
    fn from(value: GridSize) -> u16 {
        value.0
    }
}

impl FromStr for GridSize {
    type Err = GridSizeError;

    fn from_str(s: &str) -> Result<GridSize, GridSizeError> {
        GridSize::new(s.parse::<u16>()?)
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridSizeError {
    #[error("grid size must be between {min} and {max}; got {0}", min = GridSize::MIN, max = GridSize::MAX)]
    OutOfRange(u16),
    #[error("invalid grid size")]
    Parse(#[from] ParseIntError),
}
