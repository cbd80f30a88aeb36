use alloc::collections::VecDeque;
use hashbrown::HashSet;

use crate::*;

/// Outcome of a clear move.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of a flag move.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Move semantics over a board: clearing with the zero cascade, flag
/// toggling, and the win predicate. Status transitions are the caller's job;
/// a mined clear is only reported as `HitMine`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RevealEngine {
    flag_rule: FlagRule,
}

impl RevealEngine {
    pub const fn new(flag_rule: FlagRule) -> Self {
        Self { flag_rule }
    }

    /// Reveals a hidden cell. A zero-count cell floods outward over its
    /// connected zero region and that region's border.
    pub fn apply_clear(&self, board: &mut Board, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = board.validate_coords(coords)?;
        let cell = board[coords];

        if cell.visible || cell.flagged {
            return Ok(NoChange);
        }

        if cell.mined {
            log::debug!("clear at {:?} hit a mine", coords);
            return Ok(HitMine);
        }

        board.reveal(coords);
        log::debug!("cleared {:?}, adjacent mines: {}", coords, cell.adjacent_count);

        if cell.adjacent_count == 0 {
            cascade(board, coords);
        }

        Ok(Revealed)
    }

    /// Toggles the flag on a hidden cell, subject to the configured rule.
    pub fn apply_flag(&self, board: &mut Board, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        let coords = board.validate_coords(coords)?;
        let cell = board[coords];

        if cell.visible {
            return Ok(NoChange);
        }

        if cell.flagged {
            board.set_flag(coords, false);
            return Ok(Changed);
        }

        if matches!(self.flag_rule, FlagRule::CapAtMineCount)
            && board.count_flagged() >= board.mine_count()
        {
            log::debug!("flag at {:?} refused, flag cap reached", coords);
            return Ok(NoChange);
        }

        board.set_flag(coords, true);
        Ok(Changed)
    }

    /// Win predicate: the hidden cells are exactly the mines.
    pub fn check_win(&self, board: &Board) -> bool {
        board.total_cells() - board.count_visible() == board.mine_count()
    }
}

/// Breadth-first sweep from a zero cell. The visited set bounds the sweep to
/// one visit per cell. Swept cells lose their flags; a zero cell never has a
/// mined neighbor, so the sweep cannot reveal a mine.
fn cascade(board: &mut Board, origin: Coord2) {
    let mut visited: HashSet<Coord2> = HashSet::from([origin]);
    let mut frontier: VecDeque<Coord2> = board
        .iter_neighbors(origin)
        .filter(|&pos| board[pos].is_hidden())
        .collect();
    log::trace!("cascade from {:?}, initial frontier: {:?}", origin, frontier);

    while let Some(coords) = frontier.pop_front() {
        if !visited.insert(coords) {
            continue;
        }

        if !board[coords].is_hidden() {
            continue;
        }

        board.reveal(coords);
        let adjacent_count = board[coords].adjacent_count;
        log::trace!("cascade revealed {:?}, adjacent mines: {}", coords, adjacent_count);

        if adjacent_count == 0 {
            frontier.extend(
                board
                    .iter_neighbors(coords)
                    .filter(|&pos| board[pos].is_hidden())
                    .filter(|pos| !visited.contains(pos)),
            );
        }
    }
}
