#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use session::*;
pub use turnlog::*;
pub use types::*;
pub use view::*;

mod board;
mod cell;
mod error;
mod generator;
mod reveal;
mod session;
mod turnlog;
mod types;
mod view;

/// How flag placement is limited, if at all.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FlagRule {
    /// Flags toggle freely on any hidden cell.
    Unlimited,
    /// Placing a flag is refused once `mines` cells are already flagged.
    /// Removing a flag is always allowed.
    CapAtMineCount,
}

impl Default for FlagRule {
    fn default() -> Self {
        Self::Unlimited
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
    pub flag_rule: FlagRule,
}

impl GameConfig {
    pub const fn new(size: Coord, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            flag_rule: FlagRule::Unlimited,
        }
    }

    pub const fn with_flag_rule(mut self, flag_rule: FlagRule) -> Self {
        self.flag_rule = flag_rule;
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }

    /// The board must have at least one mine and at least one safe cell.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 || self.mines == 0 || self.mines >= self.total_cells() {
            Err(GameError::InvalidConfig)
        } else {
            Ok(())
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(10, 10)
    }
}
