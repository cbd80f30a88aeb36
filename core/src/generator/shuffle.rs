use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Shuffles the full coordinate list and mines the first `mines` entries, so
/// placement cost stays proportional to the board area at any mine density.
#[derive(Clone, Debug)]
pub struct ShufflePlacer {
    rng: SmallRng,
}

impl ShufflePlacer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinePlacer for ShufflePlacer {
    fn place(&mut self, config: &GameConfig) -> Array2<bool> {
        let mut coords: Vec<Coord2> = (0..config.size)
            .flat_map(|x| (0..config.size).map(move |y| (x, y)))
            .collect();
        coords.shuffle(&mut self.rng);

        let mut mask: Array2<bool> = Array2::default((config.size, config.size).to_nd_index());
        for &pos in coords.iter().take(config.mines as usize) {
            mask[pos.to_nd_index()] = true;
        }

        log::debug!(
            "placed {} mines on a {}x{} board",
            config.mines,
            config.size,
            config.size
        );
        mask
    }
}
