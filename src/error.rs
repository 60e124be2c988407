//! Error types for move requests crossing the engine boundary.

use std::fmt;

/// Why a move request was rejected. All variants are recoverable: the
/// position is left untouched and the caller may retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// A coordinate is outside the 8x8 board
    OutOfBounds { rank: usize, file: usize },
    /// The move is not legal in the current position (empty origin, wrong
    /// side, bad shape, blocked path, or it would leave the king in check)
    IllegalMove,
    /// The game has already ended in checkmate or stalemate
    GameOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfBounds { rank, file } => {
                write!(f, "Square ({rank}, {file}) is off the board (must be 0-7)")
            }
            MoveError::IllegalMove => write!(f, "Illegal move"),
            MoveError::GameOver => write!(f, "The game is over; no further moves are accepted"),
        }
    }
}

impl std::error::Error for MoveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_names_the_square() {
        let err = MoveError::OutOfBounds { rank: 9, file: 3 };
        assert!(err.to_string().contains("(9, 3)"));
    }

    #[test]
    fn errors_compare_equal() {
        assert_eq!(MoveError::IllegalMove, MoveError::IllegalMove);
        assert_ne!(MoveError::IllegalMove, MoveError::GameOver);
    }
}
