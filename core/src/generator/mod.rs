use ndarray::Array2;

use crate::*;

pub use shuffle::*;

mod shuffle;

/// Strategy that produces the mine mask for a fresh board.
pub trait MinePlacer {
    fn place(&mut self, config: &GameConfig) -> Array2<bool>;
}
