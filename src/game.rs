//! The engine's boundary with the I/O layer: turn order, verdicts, and
//! terminal-state gating. All rule knowledge lives in [`Board`]; this layer
//! only decides whether a request may reach it.

use log::debug;

use crate::board::{Board, GameStatus};
use crate::error::MoveError;
use crate::moves::Move;
use crate::piece::PieceKind;

/// A game in progress: the live position plus the status of the side to move.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            status: GameStatus::Normal,
        }
    }

    /// The current position, for rendering or analysis.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Status of the side currently to move.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Attempt a move for the side to move. `promotion` is consulted only
    /// when a pawn reaches the far rank; `None` (or an invalid kind) promotes
    /// to Queen.
    ///
    /// On acceptance the move is applied and the returned status describes
    /// the opponent's situation (now the side to move). On rejection the
    /// position is untouched and the caller may retry.
    pub fn try_move(
        &mut self,
        from: (usize, usize),
        to: (usize, usize),
        promotion: Option<PieceKind>,
    ) -> Result<GameStatus, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }
        for (rank, file) in [from, to] {
            if rank > 7 || file > 7 {
                return Err(MoveError::OutOfBounds { rank, file });
            }
        }

        let mover = self.board.squares[from.0][from.1];
        if !mover.is_some_and(|p| p.color == self.board.side_to_move) {
            debug!("rejected {from:?} -> {to:?}: not a {:?} piece", self.board.side_to_move);
            return Err(MoveError::IllegalMove);
        }
        if !self.board.is_legal(from, to) {
            debug!("rejected {from:?} -> {to:?}: illegal");
            return Err(MoveError::IllegalMove);
        }

        self.board.apply_move(&Move {
            from,
            to,
            promotion,
        });
        self.status = self.board.status(self.board.side_to_move);
        debug!(
            "applied {from:?} -> {to:?}; {:?} to move, status {:?}",
            self.board.side_to_move, self.status
        );
        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Color;
    use rand::prelude::*;

    fn play(game: &mut Game, s: &str) -> Result<GameStatus, MoveError> {
        let m = Move::from_uci(s).expect("valid uci");
        game.try_move(m.from, m.to, m.promotion)
    }

    #[test]
    fn accepts_opening_moves_and_alternates_turns() {
        let mut game = Game::new();
        assert_eq!(play(&mut game, "e2e4"), Ok(GameStatus::Normal));
        assert_eq!(game.board().side_to_move, Color::Black);
        assert_eq!(play(&mut game, "e7e5"), Ok(GameStatus::Normal));
        assert_eq!(game.board().side_to_move, Color::White);
    }

    #[test]
    fn rejects_moving_out_of_turn() {
        let mut game = Game::new();
        let m = Move::from_uci("e7e5").unwrap();
        assert_eq!(game.try_move(m.from, m.to, None), Err(MoveError::IllegalMove));
        assert_eq!(game.board().side_to_move, Color::White);
    }

    #[test]
    fn rejects_out_of_bounds_coordinates() {
        let mut game = Game::new();
        assert_eq!(
            game.try_move((6, 4), (8, 4), None),
            Err(MoveError::OutOfBounds { rank: 8, file: 4 })
        );
    }

    #[test]
    fn rejects_empty_origin() {
        let mut game = Game::new();
        let m = Move::from_uci("e4e5").unwrap();
        assert_eq!(game.try_move(m.from, m.to, None), Err(MoveError::IllegalMove));
    }

    #[test]
    fn rejection_leaves_position_untouched() {
        let mut game = Game::new();
        let snapshot = game.board().clone();
        let m = Move::from_uci("e2e5").unwrap(); // pawn cannot triple-step
        assert_eq!(game.try_move(m.from, m.to, None), Err(MoveError::IllegalMove));
        assert_eq!(game.board(), &snapshot);
        assert_eq!(game.status(), GameStatus::Normal);
    }

    #[test]
    fn reports_check_after_a_checking_move() {
        let mut game = Game::new();
        for m in ["e2e4", "e7e5", "d1h5", "b8c6"] {
            play(&mut game, m).unwrap();
        }
        // Qxf7+ is check but not mate: the king recaptures the queen.
        assert_eq!(play(&mut game, "h5f7"), Ok(GameStatus::Check));
        assert!(!game.is_over());
        assert_eq!(play(&mut game, "e8f7"), Ok(GameStatus::Normal));
    }

    #[test]
    fn fools_mate_ends_the_game() {
        let mut game = Game::new();
        for m in ["f2f3", "e7e5", "g2g4"] {
            assert_eq!(play(&mut game, m).unwrap().is_terminal(), false);
        }
        assert_eq!(play(&mut game, "d8h4"), Ok(GameStatus::Checkmate));
        assert!(game.is_over());

        // Terminal: nothing further is accepted, not even a legal shape.
        assert_eq!(play(&mut game, "e1e2"), Err(MoveError::GameOver));
    }

    #[test]
    fn promotion_choice_crosses_the_boundary() {
        let mut game = Game::new();
        for m in [
            "h2h4", "g7g5", "h4g5", "g8f6", "g5g6", "f6e4", "g6g7", "e4c5",
        ] {
            play(&mut game, m).unwrap();
        }
        // g7g8 with an explicit rook choice.
        play(&mut game, "b8c6").unwrap_err(); // black is not to move
        let m = Move::from_uci("g7g8").unwrap();
        game.try_move(m.from, m.to, Some(PieceKind::Rook)).unwrap();
        let (r, c) = (0usize, 6usize);
        assert_eq!(
            game.board().squares[r][c].map(|p| (p.kind, p.color)),
            Some((PieceKind::Rook, Color::White))
        );
    }

    /// Seeded random playout through the public boundary: every move offered
    /// by the enumerator must be accepted, and the game must stop cleanly if
    /// a terminal status appears.
    #[test]
    fn seeded_random_game_is_self_consistent() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let mut game = Game::new();

        for _ in 0..60 {
            if game.is_over() {
                break;
            }
            let side = game.board().side_to_move;
            let moves = game.board().legal_moves(side);
            assert!(!moves.is_empty(), "non-terminal position must offer a move");
            let m = &moves[rng.gen_range(0..moves.len())];
            let status = game
                .try_move(m.from, m.to, m.promotion)
                .expect("enumerated move must be accepted");
            assert_eq!(status, game.status());
        }

        if game.is_over() {
            let m = Move::from_uci("e2e4").unwrap();
            assert_eq!(game.try_move(m.from, m.to, None), Err(MoveError::GameOver));
        }
    }
}
