//! Wire types shared between the engine and whatever transports board state
//! to a client. A hidden cell serializes to `null`, so a payload built from a
//! public view can never leak mine positions or adjacency counts.

use demine_core::{BoardView, GameSession, GameStatus, Move, ViewCell};
use serde::{Deserialize, Serialize};

/// JSON projection of a single view cell: the adjacent-mine count when open,
/// `"mined"` or `"flagged"` for the marker states, `null` while hidden.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireCell {
    Open(u8),
    Marker(CellMarker),
    Hidden,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellMarker {
    Mined,
    Flagged,
}

impl From<ViewCell> for WireCell {
    fn from(cell: ViewCell) -> Self {
        match cell {
            ViewCell::Hidden => Self::Hidden,
            ViewCell::Flagged => Self::Marker(CellMarker::Flagged),
            ViewCell::Mined => Self::Marker(CellMarker::Mined),
            ViewCell::Open(count) => Self::Open(count),
        }
    }
}

impl From<WireCell> for ViewCell {
    fn from(cell: WireCell) -> Self {
        match cell {
            WireCell::Hidden => Self::Hidden,
            WireCell::Marker(CellMarker::Flagged) => Self::Flagged,
            WireCell::Marker(CellMarker::Mined) => Self::Mined,
            WireCell::Open(count) => Self::Open(count),
        }
    }
}

/// Full board snapshot in row-major order, `x` outermost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardState(pub Vec<Vec<WireCell>>);

impl From<&BoardView> for BoardState {
    fn from(view: &BoardView) -> Self {
        Self(
            view.rows()
                .map(|row| row.iter().map(|&cell| WireCell::from(cell)).collect())
                .collect(),
        )
    }
}

/// Numeric status encoding: 0 in progress, 1 won, 2 lost.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum StatusCode {
    InProgress = 0,
    Won = 1,
    Lost = 2,
}

impl From<StatusCode> for u8 {
    fn from(code: StatusCode) -> Self {
        code as u8
    }
}

impl TryFrom<u8> for StatusCode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::InProgress),
            1 => Ok(Self::Won),
            2 => Ok(Self::Lost),
            other => Err(format!("unknown status code {other}")),
        }
    }
}

impl From<GameStatus> for StatusCode {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::InProgress => Self::InProgress,
            GameStatus::Won => Self::Won,
            GameStatus::Lost => Self::Lost,
        }
    }
}

impl From<StatusCode> for GameStatus {
    fn from(code: StatusCode) -> Self {
        match code {
            StatusCode::InProgress => Self::InProgress,
            StatusCode::Won => Self::Won,
            StatusCode::Lost => Self::Lost,
        }
    }
}

/// Move kinds as a client submits them.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireMove {
    Clear,
    Flag,
    Undo,
}

impl From<WireMove> for Move {
    fn from(mv: WireMove) -> Self {
        match mv {
            WireMove::Clear => Self::Clear,
            WireMove::Flag => Self::Flag,
            WireMove::Undo => Self::Undo,
        }
    }
}

impl From<Move> for WireMove {
    fn from(mv: Move) -> Self {
        match mv {
            Move::Clear => Self::Clear,
            Move::Flag => Self::Flag,
            Move::Undo => Self::Undo,
        }
    }
}

/// Payload returned after every processed move or reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub board_state: BoardState,
    pub game_status: StatusCode,
}

impl StateUpdate {
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            board_state: BoardState::from(&session.public_view()),
            game_status: session.status().into(),
        }
    }

    /// The update as a JSON string, the form a transport hands to clients.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
