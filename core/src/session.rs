use serde::{Deserialize, Serialize};

use crate::*;

/// Session status. Terminal states only exit through `reset` or by undoing
/// the move that ended the game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// A submitted move: the two board moves plus taking back the newest turn.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Move {
    Clear,
    Flag,
    Undo,
}

/// One playthrough: a board, its move history, and the status state machine,
/// behind a single move-processing entry point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    config: GameConfig,
    seed: u64,
    board: Board,
    log: TurnLog,
    status: GameStatus,
}

impl GameSession {
    /// Validates the config and deals a fresh board. The seed is the
    /// caller's entropy; equal seeds produce equal mine layouts.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let board = Board::generate(&config, &mut ShufflePlacer::new(seed))?;
        Ok(Self {
            config,
            seed,
            board,
            log: TurnLog::new(),
            status: GameStatus::InProgress,
        })
    }

    /// Wraps an existing board, deriving the config from its dimensions.
    pub fn with_board(board: Board, flag_rule: FlagRule) -> Result<Self> {
        let config = GameConfig {
            size: board.size(),
            mines: board.mine_count(),
            flag_rule,
        };
        config.validate()?;
        Ok(Self {
            config,
            seed: 0,
            board,
            log: TurnLog::new(),
            status: GameStatus::InProgress,
        })
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn turns(&self) -> &TurnLog {
        &self.log
    }

    /// The information-hiding projection handed to whatever renders the
    /// board.
    pub fn public_view(&self) -> BoardView {
        BoardView::project(&self.board)
    }

    /// Processes one move and returns the resulting status. Clear and flag
    /// moves are rejected once the game has ended; undo stays available so
    /// the finishing move can be taken back.
    pub fn submit_move(&mut self, coords: Coord2, mv: Move) -> Result<GameStatus> {
        match mv {
            Move::Clear => self.play(coords, MoveKind::Clear),
            Move::Flag => self.play(coords, MoveKind::Flag),
            Move::Undo => self.undo(),
        }
    }

    /// Starts the game over: same configuration, freshly derived seed, empty
    /// history.
    pub fn reset(&mut self) -> Result<GameStatus> {
        self.seed = next_seed(self.seed);
        self.board = Board::generate(&self.config, &mut ShufflePlacer::new(self.seed))?;
        self.log.clear();
        self.status = GameStatus::InProgress;
        log::debug!("session reset, new board dealt");
        Ok(self.status)
    }

    fn play(&mut self, coords: Coord2, kind: MoveKind) -> Result<GameStatus> {
        if self.status.is_terminal() {
            return Err(GameError::AlreadyEnded);
        }
        let coords = self.board.validate_coords(coords)?;
        let engine = RevealEngine::new(self.config.flag_rule);

        self.log.record(kind, coords, &self.board, self.status);

        match kind {
            MoveKind::Clear => {
                if engine.apply_clear(&mut self.board, coords)? == RevealOutcome::HitMine {
                    return Ok(self.end_game(GameStatus::Lost));
                }
            }
            MoveKind::Flag => {
                engine.apply_flag(&mut self.board, coords)?;
            }
        }

        if engine.check_win(&self.board) {
            return Ok(self.end_game(GameStatus::Won));
        }

        Ok(self.status)
    }

    fn end_game(&mut self, status: GameStatus) -> GameStatus {
        log::debug!("game over: {:?}", status);
        self.status = status;
        self.board.reveal_all();
        self.status
    }

    fn undo(&mut self) -> Result<GameStatus> {
        self.status = self.log.undo_last(&mut self.board)?;
        Ok(self.status)
    }
}

/// Seed derivation for `reset`, a SplitMix64 step over the previous seed.
fn next_seed(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: Coord, mines: &[Coord2]) -> GameSession {
        let board = Board::with_mines_at(size, mines).unwrap();
        GameSession::with_board(board, FlagRule::Unlimited).unwrap()
    }

    #[test]
    fn construction_rejects_invalid_configs() {
        assert_eq!(
            GameSession::new(GameConfig::new(3, 9), 1).unwrap_err(),
            GameError::InvalidConfig
        );
        assert_eq!(
            GameSession::new(GameConfig::new(0, 1), 1).unwrap_err(),
            GameError::InvalidConfig
        );
    }

    #[test]
    fn equal_seeds_deal_equal_boards() {
        let config = GameConfig::new(9, 10);

        let first = GameSession::new(config, 5).unwrap();
        let second = GameSession::new(config, 5).unwrap();

        assert_eq!(first.board(), second.board());
    }

    #[test]
    fn clearing_a_mine_loses_and_reveals_everything() {
        let mut session = session(3, &[(1, 1)]);

        let status = session.submit_move((1, 1), Move::Clear).unwrap();

        assert_eq!(status, GameStatus::Lost);
        assert_eq!(session.board().count_visible(), 9);
        assert_eq!(session.public_view().cell_at((1, 1)), ViewCell::Mined);
    }

    #[test]
    fn clearing_every_safe_cell_wins_and_reveals_everything() {
        let mut session = session(2, &[(0, 0)]);

        session.submit_move((0, 1), Move::Clear).unwrap();
        session.submit_move((1, 0), Move::Clear).unwrap();
        let status = session.submit_move((1, 1), Move::Clear).unwrap();

        assert_eq!(status, GameStatus::Won);
        assert_eq!(session.board().count_visible(), 4);
        assert_eq!(session.public_view().cell_at((0, 0)), ViewCell::Mined);
    }

    #[test]
    fn terminal_sessions_reject_board_moves() {
        let mut session = session(3, &[(1, 1)]);
        session.submit_move((1, 1), Move::Clear).unwrap();

        assert_eq!(
            session.submit_move((0, 0), Move::Clear).unwrap_err(),
            GameError::AlreadyEnded
        );
        assert_eq!(
            session.submit_move((0, 0), Move::Flag).unwrap_err(),
            GameError::AlreadyEnded
        );
    }

    #[test]
    fn undo_takes_back_the_losing_move() {
        let mut session = session(3, &[(1, 1)]);
        session.submit_move((0, 0), Move::Clear).unwrap();
        let before = session.board().clone();

        session.submit_move((1, 1), Move::Clear).unwrap();
        let status = session.submit_move((0, 0), Move::Undo).unwrap();

        assert_eq!(status, GameStatus::InProgress);
        assert_eq!(session.board(), &before);
    }

    #[test]
    fn undo_of_a_cascade_restores_the_hidden_set() {
        let mut session = session(3, &[(2, 2)]);
        let before = session.board().clone();

        session.submit_move((0, 0), Move::Clear).unwrap();
        assert_eq!(session.board().count_visible(), 8);

        session.submit_move((0, 0), Move::Undo).unwrap();

        assert_eq!(session.board(), &before);
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn flag_then_undo_only_touches_the_target() {
        let mut session = session(3, &[(2, 2)]);

        session.submit_move((1, 1), Move::Flag).unwrap();
        assert_eq!(session.public_view().cell_at((1, 1)), ViewCell::Flagged);

        session.submit_move((1, 1), Move::Undo).unwrap();

        let view = session.public_view();
        for coords in session.board().iter_coords() {
            assert_eq!(view.cell_at(coords), ViewCell::Hidden);
        }
    }

    #[test]
    fn undo_without_a_newer_move_is_rejected() {
        let mut session = session(3, &[(2, 2)]);

        assert_eq!(
            session.submit_move((0, 0), Move::Undo).unwrap_err(),
            GameError::NothingToUndo
        );

        session.submit_move((1, 1), Move::Flag).unwrap();
        session.submit_move((1, 1), Move::Undo).unwrap();
        assert_eq!(
            session.submit_move((1, 1), Move::Undo).unwrap_err(),
            GameError::NothingToUndo
        );
    }

    #[test]
    fn out_of_bounds_moves_leave_the_session_untouched() {
        let mut session = session(3, &[(2, 2)]);

        assert_eq!(
            session.submit_move((7, 7), Move::Clear).unwrap_err(),
            GameError::OutOfBounds
        );

        assert_eq!(session.status(), GameStatus::InProgress);
        assert!(session.turns().is_empty());
        assert_eq!(session.board().count_visible(), 0);
    }

    #[test]
    fn reset_deals_a_fresh_board_with_the_same_config() {
        let config = GameConfig::new(4, 3);
        let mut session = GameSession::new(config, 11).unwrap();
        session.submit_move((0, 0), Move::Flag).unwrap();

        let status = session.reset().unwrap();

        assert_eq!(status, GameStatus::InProgress);
        assert_eq!(session.config(), config);
        assert_eq!(session.board().mine_count(), 3);
        assert_eq!(session.board().count_visible(), 0);
        assert_eq!(session.board().count_flagged(), 0);
        assert!(session.turns().is_empty());
    }

    #[test]
    fn reset_recovers_a_lost_session() {
        let mut session = session(3, &[(1, 1)]);
        session.submit_move((1, 1), Move::Clear).unwrap();
        assert_eq!(session.status(), GameStatus::Lost);

        session.reset().unwrap();

        assert_eq!(session.status(), GameStatus::InProgress);
        assert!(session.submit_move((0, 0), Move::Flag).is_ok());
    }

    #[test]
    fn capped_sessions_refuse_extra_flags() {
        let board = Board::with_mines_at(3, &[(2, 2)]).unwrap();
        let mut session = GameSession::with_board(board, FlagRule::CapAtMineCount).unwrap();

        session.submit_move((0, 0), Move::Flag).unwrap();
        session.submit_move((0, 1), Move::Flag).unwrap();

        assert_eq!(session.board().count_flagged(), 1);
        assert!(session.board().is_flagged((0, 0)).unwrap());
    }

    #[test]
    fn snapshot_round_trips_through_serde() {
        let mut session = session(3, &[(2, 2)]);
        session.submit_move((1, 1), Move::Flag).unwrap();
        session.submit_move((0, 0), Move::Clear).unwrap();

        let encoded = serde_json::to_string(&session).unwrap();
        let decoded: GameSession = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, session);
    }
}
