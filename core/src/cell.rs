use serde::{Deserialize, Serialize};

/// Per-cell board state. `mined` and `adjacent_count` are fixed once the
/// board is generated; `visible` and `flagged` change as the game is played.
/// A visible cell is never flagged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub mined: bool,
    pub adjacent_count: u8,
    pub visible: bool,
    pub flagged: bool,
}

impl Cell {
    pub const fn is_hidden(self) -> bool {
        !self.visible
    }
}
