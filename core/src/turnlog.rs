use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// The two move kinds that leave a history entry.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MoveKind {
    Clear,
    Flag,
}

/// One played move plus the pre-move state needed to take it back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    number: u32,
    kind: MoveKind,
    target: Coord2,
    hidden_before: BTreeSet<Coord2>,
    flagged_before: BTreeSet<Coord2>,
    status_before: GameStatus,
    undone: bool,
}

impl Turn {
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    pub fn target(&self) -> Coord2 {
        self.target
    }

    pub fn status_before(&self) -> GameStatus {
        self.status_before
    }

    pub fn is_undone(&self) -> bool {
        self.undone
    }
}

/// Append-only move history. Only the newest entry is ever a candidate for
/// undo; once taken back it blocks further undo instead of exposing older
/// turns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnLog {
    turns: Vec<Turn>,
}

impl TurnLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn. Call this before the move mutates the board, so the
    /// snapshots describe the pre-move state.
    pub fn record(
        &mut self,
        kind: MoveKind,
        target: Coord2,
        board: &Board,
        status_before: GameStatus,
    ) -> &Turn {
        let number = self.turns.last().map_or(0, Turn::number) + 1;
        self.turns.push(Turn {
            number,
            kind,
            target,
            hidden_before: board.hidden_coords(),
            flagged_before: board.flagged_coords(),
            status_before,
            undone: false,
        });

        log::debug!("recorded turn {} ({:?} at {:?})", number, kind, target);
        self.turns.last().unwrap()
    }

    /// The newest turn while it is still eligible for undo.
    pub fn last_undoable(&self) -> Option<&Turn> {
        self.turns.last().filter(|turn| !turn.undone)
    }

    /// Takes back the newest turn and returns the status the session held
    /// before it.
    ///
    /// A `Clear` turn restores the full hidden and flagged sets. A `Flag`
    /// turn only clears the flag on its target cell, deliberately leaving
    /// the rest of the board alone.
    pub fn undo_last(&mut self, board: &mut Board) -> Result<GameStatus> {
        let turn = match self.turns.last_mut() {
            Some(turn) if !turn.undone => turn,
            _ => return Err(GameError::NothingToUndo),
        };

        match turn.kind {
            MoveKind::Clear => {
                for coords in board.iter_coords() {
                    board.set_visible(coords, !turn.hidden_before.contains(&coords));
                    board.set_flag(coords, turn.flagged_before.contains(&coords));
                }
            }
            MoveKind::Flag => board.set_flag(turn.target, false),
        }

        turn.undone = true;
        log::debug!("undid turn {}", turn.number);
        Ok(turn.status_before)
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
