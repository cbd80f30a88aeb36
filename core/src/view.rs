use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::*;

/// What a cell looks like from the outside. `Hidden` carries no mine or
/// count data, so serializing a view cannot leak board internals.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ViewCell {
    Hidden,
    Flagged,
    Mined,
    Open(u8),
}

impl Default for ViewCell {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Information-hiding projection of a board, in the same layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    size: Coord,
    cells: Array2<ViewCell>,
}

impl BoardView {
    pub fn project(board: &Board) -> Self {
        let size = board.size();
        let mut cells: Array2<ViewCell> = Array2::default((size, size).to_nd_index());

        for coords in board.iter_coords() {
            cells[coords.to_nd_index()] = match board[coords] {
                Cell {
                    visible: true,
                    mined: true,
                    ..
                } => ViewCell::Mined,
                Cell {
                    visible: true,
                    adjacent_count,
                    ..
                } => ViewCell::Open(adjacent_count),
                Cell { flagged: true, .. } => ViewCell::Flagged,
                _ => ViewCell::Hidden,
            };
        }

        Self { size, cells }
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn cell_at(&self, coords: Coord2) -> ViewCell {
        self.cells[coords.to_nd_index()]
    }

    /// Rows in `x` order, each row running along `y`.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, ViewCell>> {
        self.cells.outer_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn board(size: Coord, mines: &[Coord2]) -> Board {
        Board::with_mines_at(size, mines).unwrap()
    }

    #[test]
    fn hidden_cells_expose_no_mine_or_count_data() {
        let board = board(3, &[(1, 1)]);

        let view = BoardView::project(&board);

        for coords in board.iter_coords() {
            assert_eq!(view.cell_at(coords), ViewCell::Hidden);
        }
    }

    #[test]
    fn projection_distinguishes_all_four_shapes() {
        let mut board = board(3, &[(1, 1)]);
        board.reveal((0, 0));
        board.reveal((1, 1));
        board.set_flag((2, 2), true);

        let view = BoardView::project(&board);

        assert_eq!(view.cell_at((0, 0)), ViewCell::Open(1));
        assert_eq!(view.cell_at((1, 1)), ViewCell::Mined);
        assert_eq!(view.cell_at((2, 2)), ViewCell::Flagged);
        assert_eq!(view.cell_at((0, 2)), ViewCell::Hidden);
    }

    #[test]
    fn rows_iterate_x_outermost() {
        let mut board = board(2, &[(0, 0)]);
        board.reveal((1, 0));

        let view = BoardView::project(&board);
        let rows: Vec<_> = view.rows().map(|row| row.to_vec()).collect();

        assert_eq!(rows[0], [ViewCell::Hidden, ViewCell::Hidden]);
        assert_eq!(rows[1], [ViewCell::Open(1), ViewCell::Hidden]);
    }

    #[test]
    fn lost_boards_surface_every_mine() {
        let mut board = board(3, &[(0, 2), (2, 0)]);
        board.reveal_all();

        let view = BoardView::project(&board);

        assert_eq!(view.cell_at((0, 2)), ViewCell::Mined);
        assert_eq!(view.cell_at((2, 0)), ViewCell::Mined);
        assert_eq!(view.cell_at((1, 1)), ViewCell::Open(2));
    }
}
