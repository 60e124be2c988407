//! A rules engine for standard chess: board state, move legality (including
//! castling, en passant, and promotion), and check / checkmate / stalemate
//! classification. No AI, no notation export, no I/O — callers feed in
//! coordinate pairs and consume verdicts.

pub mod board;
pub mod error;
pub mod game;
pub mod moves;
pub mod piece;

pub use board::{Board, GameStatus};
pub use error::MoveError;
pub use game::Game;
pub use moves::Move;
pub use piece::{Color, Piece, PieceKind};
