use alloc::collections::BTreeSet;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of cells plus the counts that describe it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    size: Coord,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from the placer's mine mask and derives every cell's
    /// adjacent mine count.
    pub fn generate(config: &GameConfig, placer: &mut impl MinePlacer) -> Result<Self> {
        config.validate()?;
        let mask = placer.place(config);
        Ok(Self::from_mine_mask(config.size, &mask))
    }

    /// Builds a board with mines at fixed coordinates. Duplicate coordinates
    /// collapse into a single mine.
    pub fn with_mines_at(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mask: Array2<bool> = Array2::default((size, size).to_nd_index());
        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfBounds);
            }
            mask[coords.to_nd_index()] = true;
        }

        let board = Self::from_mine_mask(size, &mask);
        if usize::from(board.mine_count) != mine_coords.len() {
            log::warn!(
                "duplicate mine coordinates collapsed, requested {} but placed {}",
                mine_coords.len(),
                board.mine_count
            );
        }
        Ok(board)
    }

    fn from_mine_mask(size: Coord, mask: &Array2<bool>) -> Self {
        let mut cells: Array2<Cell> = Array2::default((size, size).to_nd_index());
        let mut mine_count: CellCount = 0;

        for x in 0..size {
            for y in 0..size {
                let coords = (x, y);
                let mined = mask[coords.to_nd_index()];
                if mined {
                    mine_count += 1;
                }

                let adjacent_count = neighbors(coords, size)
                    .filter(|&pos| mask[pos.to_nd_index()])
                    .count()
                    .try_into()
                    .unwrap();

                cells[coords.to_nd_index()] = Cell {
                    mined,
                    adjacent_count,
                    visible: false,
                    flagged: false,
                };
            }
        }

        Self {
            cells,
            size,
            mine_count,
        }
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.size)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    pub fn is_mined(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell_at(coords)?.mined)
    }

    pub fn is_visible(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell_at(coords)?.visible)
    }

    pub fn is_flagged(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell_at(coords)?.flagged)
    }

    /// Marks a cell visible. Any flag on it is removed, so a visible cell is
    /// never flagged.
    pub fn reveal(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.visible = true;
        cell.flagged = false;
    }

    pub fn set_flag(&mut self, coords: Coord2, flagged: bool) {
        self.cells[coords.to_nd_index()].flagged = flagged;
    }

    pub(crate) fn set_visible(&mut self, coords: Coord2, visible: bool) {
        self.cells[coords.to_nd_index()].visible = visible;
    }

    pub fn count_visible(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.visible)
            .count()
            .try_into()
            .unwrap()
    }

    pub fn count_flagged(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.flagged)
            .count()
            .try_into()
            .unwrap()
    }

    /// Coordinates of every hidden cell.
    pub fn hidden_coords(&self) -> BTreeSet<Coord2> {
        self.iter_coords()
            .filter(|&coords| self[coords].is_hidden())
            .collect()
    }

    /// Coordinates of every flagged cell.
    pub fn flagged_coords(&self) -> BTreeSet<Coord2> {
        self.iter_coords()
            .filter(|&coords| self[coords].flagged)
            .collect()
    }

    /// End-of-game projection: every cell visible, no flags left.
    pub fn reveal_all(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.visible = true;
            cell.flagged = false;
        }
    }

    /// All coordinates in row-major order, `x` outermost.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let size = self.size;
        (0..size).flat_map(move |x| (0..size).map(move |y| (x, y)))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        neighbors(coords, self.size)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
