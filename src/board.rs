// =============================================================================
// Chess rules engine
//
// The board is an 8x8 grid of optional pieces addressed by (rank, file), with
// rank 0 at Black's back rank (rank 8 in algebraic notation). White pawns
// advance toward decreasing rank index.
//
// Move legality is decided in two stages: a pure pseudo-legal shape check
// (piece geometry, path clearance, pawn special cases), then a simulation on
// a cloned successor position to verify the mover's king is not left in
// check. Attack detection reuses the pseudo-legal classifier for the
// attacking side, which is why the classifier must never itself consult
// king safety — that would recurse forever.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::moves::Move;
use crate::piece::{Color, Piece, PieceKind};

/// Outcome of classifying a position for the side to move.
/// `Checkmate` and `Stalemate` are terminal.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum GameStatus {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Board {
    pub squares: [[Option<Piece>; 8]; 8],
    pub side_to_move: Color,
    /// Square skipped by the most recent double-step pawn advance. Valid
    /// only until the next move is applied, whatever that move is.
    pub en_passant_target: Option<(usize, usize)>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Construction
// =============================================================================

impl Board {
    /// An empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
            side_to_move: Color::White,
            en_passant_target: None,
        }
    }

    /// The standard initial position, White to move.
    pub fn new() -> Self {
        let mut squares = [[None; 8]; 8];

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        // Black on ranks 0-1, White on ranks 6-7.
        for (file, &kind) in back_rank.iter().enumerate() {
            squares[0][file] = Some(Piece::new(kind, Color::Black));
            squares[7][file] = Some(Piece::new(kind, Color::White));
        }
        for file in 0..8 {
            squares[1][file] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            squares[6][file] = Some(Piece::new(PieceKind::Pawn, Color::White));
        }

        Board {
            squares,
            side_to_move: Color::White,
            en_passant_target: None,
        }
    }

    fn in_bounds(rank: i32, file: i32) -> bool {
        (0..8).contains(&rank) && (0..8).contains(&file)
    }

    pub fn find_king(&self, color: Color) -> Option<(usize, usize)> {
        for r in 0..8 {
            for c in 0..8 {
                if let Some(p) = self.squares[r][c] {
                    if p.kind == PieceKind::King && p.color == color {
                        return Some((r, c));
                    }
                }
            }
        }
        None
    }

    /// Location of `color`'s king.
    ///
    /// # Panics
    ///
    /// Panics if that king is not on the board. Exactly one king per side is
    /// a position invariant; a missing king means the position was corrupted
    /// and masking that behind a non-check answer would hide the defect.
    pub fn king_square(&self, color: Color) -> (usize, usize) {
        match self.find_king(color) {
            Some(sq) => sq,
            None => panic!("position invariant violated: no {color:?} king on the board"),
        }
    }
}

// =============================================================================
// Pseudo-legal move classification
//
// Shape rules only: is this move geometrically valid for the piece, with a
// clear path where the piece slides? King safety is deliberately ignored
// here so the attack detector can call into this without recursing.
// =============================================================================

impl Board {
    /// Every square strictly between the endpoints is empty. The endpoints
    /// themselves are not examined.
    fn path_clear(&self, from: (usize, usize), to: (usize, usize)) -> bool {
        let dr = (to.0 as i32 - from.0 as i32).signum();
        let dc = (to.1 as i32 - from.1 as i32).signum();

        let mut r = from.0 as i32 + dr;
        let mut c = from.1 as i32 + dc;
        while (r, c) != (to.0 as i32, to.1 as i32) {
            if !Self::in_bounds(r, c) || self.squares[r as usize][c as usize].is_some() {
                return false;
            }
            r += dr;
            c += dc;
        }
        true
    }

    /// Shape-legality of `from` -> `to` for whatever piece sits on `from`,
    /// ignoring whether the move would leave the mover's king in check.
    /// False when `from` is empty or either square is off the board.
    pub fn pseudo_legal(&self, from: (usize, usize), to: (usize, usize)) -> bool {
        if from.0 > 7 || from.1 > 7 || to.0 > 7 || to.1 > 7 {
            return false;
        }
        let piece = match self.squares[from.0][from.1] {
            Some(p) => p,
            None => return false,
        };
        // Capturing one's own piece is never legal. This also rules out
        // from == to for every piece shape below.
        if let Some(dest) = self.squares[to.0][to.1] {
            if dest.color == piece.color {
                return false;
            }
        }

        let dr = (to.0 as i32 - from.0 as i32).abs();
        let dc = (to.1 as i32 - from.1 as i32).abs();

        match piece.kind {
            PieceKind::Knight => (dr == 2 && dc == 1) || (dr == 1 && dc == 2),
            PieceKind::Bishop => dr == dc && self.path_clear(from, to),
            PieceKind::Rook => (dr == 0 || dc == 0) && self.path_clear(from, to),
            PieceKind::Queen => (dr == dc || dr == 0 || dc == 0) && self.path_clear(from, to),
            PieceKind::King => {
                if dr <= 1 && dc <= 1 {
                    true
                } else if dr == 0 && dc == 2 && !piece.has_moved {
                    self.castle_shape_legal(piece, from, to)
                } else {
                    false
                }
            }
            PieceKind::Pawn => self.pawn_shape_legal(piece, from, to),
        }
    }

    fn pawn_shape_legal(&self, pawn: Piece, from: (usize, usize), to: (usize, usize)) -> bool {
        let dir: i32 = match pawn.color {
            Color::White => -1,
            Color::Black => 1,
        };
        let start_rank = match pawn.color {
            Color::White => 6,
            Color::Black => 1,
        };

        let (fr, fc) = (from.0 as i32, from.1 as i32);
        let (tr, tc) = (to.0 as i32, to.1 as i32);
        let dest = self.squares[to.0][to.1];

        // Single step forward onto an empty square.
        if tc == fc && tr == fr + dir && dest.is_none() {
            return true;
        }

        // Double step from the starting rank over two empty squares.
        if from.0 == start_rank && tc == fc && tr == fr + 2 * dir && dest.is_none() {
            let mid = (fr + dir) as usize;
            if self.squares[mid][from.1].is_none() {
                return true;
            }
        }

        // Diagonal step: ordinary capture, or en passant onto the empty
        // target square with the double-stepped enemy pawn directly behind.
        if (tc - fc).abs() == 1 && tr == fr + dir {
            if let Some(target) = dest {
                return target.color != pawn.color;
            }
            if self.en_passant_target == Some(to) {
                let behind = tr - dir;
                if Self::in_bounds(behind, tc) {
                    return matches!(
                        self.squares[behind as usize][to.1],
                        Some(p) if p.kind == PieceKind::Pawn && p.color != pawn.color
                    );
                }
            }
        }

        false
    }

    /// Castling geometry: unmoved friendly rook on the corresponding corner,
    /// every square strictly between king and rook empty. The caller has
    /// already verified the king is unmoved. Check safety of the king's path
    /// is the legality filter's concern, not handled here.
    fn castle_shape_legal(&self, king: Piece, from: (usize, usize), to: (usize, usize)) -> bool {
        let rank = from.0;
        let rook_file = if to.1 > from.1 { 7 } else { 0 };
        match self.squares[rank][rook_file] {
            Some(p) if p.kind == PieceKind::Rook && p.color == king.color && !p.has_moved => {}
            _ => return false,
        }
        let (lo, hi) = if rook_file > from.1 {
            (from.1 + 1, rook_file)
        } else {
            (rook_file + 1, from.1)
        };
        (lo..hi).all(|file| self.squares[rank][file].is_none())
    }
}

// =============================================================================
// Attack detection
// =============================================================================

impl Board {
    /// Whether any piece of `by` has a pseudo-legal move landing on `target`.
    /// The attacking side is an explicit parameter; the side-to-move field is
    /// never touched, so probing the opponent needs no scratch state.
    pub fn is_square_attacked(&self, target: (usize, usize), by: Color) -> bool {
        for r in 0..8 {
            for c in 0..8 {
                let occupied_by_attacker = self.squares[r][c].is_some_and(|p| p.color == by);
                if occupied_by_attacker && self.pseudo_legal((r, c), target) {
                    return true;
                }
            }
        }
        false
    }

    /// Whether `color`'s king is attacked by the opponent.
    ///
    /// # Panics
    ///
    /// Panics if `color` has no king on the board (see [`Board::king_square`]).
    pub fn in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opposite())
    }
}

// =============================================================================
// Legality filter
//
// A pseudo-legal move is legal iff executing it does not leave the mover's
// own king in check. Instead of mutating the live position and restoring it
// afterward, the filter applies the move to a clone and discards it — the
// original position is never touched, so a rejected query cannot corrupt
// state no matter which branch returns.
// =============================================================================

impl Board {
    /// Full legality of `from` -> `to` for the piece on `from`. Turn order is
    /// not enforced here; the verdict is the same whoever is to move.
    pub fn is_legal(&self, from: (usize, usize), to: (usize, usize)) -> bool {
        if from.0 > 7 || from.1 > 7 || to.0 > 7 || to.1 > 7 {
            return false;
        }
        let piece = match self.squares[from.0][from.1] {
            Some(p) => p,
            None => return false,
        };
        if !self.pseudo_legal(from, to) {
            return false;
        }

        // Castling may not start from check, and the king may not cross or
        // land on an attacked square.
        if piece.kind == PieceKind::King && from.1.abs_diff(to.1) == 2 {
            let enemy = piece.color.opposite();
            if self.in_check(piece.color) {
                return false;
            }
            let transit = (from.0, (from.1 + to.1) / 2);
            if self.is_square_attacked(transit, enemy) || self.is_square_attacked(to, enemy) {
                return false;
            }
        }

        // Simulate on a successor position, side effects included, and ask
        // whether the mover's king is attacked there.
        let mut next = self.clone();
        next.apply_move(&Move {
            from,
            to,
            promotion: None,
        });
        !next.in_check(piece.color)
    }
}

// =============================================================================
// Move application
// =============================================================================

impl Board {
    /// Permanently apply a move that has already been confirmed legal:
    /// remove an en-passant-captured pawn, relocate a castling rook, move the
    /// piece (marking it moved), promote a pawn reaching the far rank, set or
    /// clear the en-passant target, and flip the side to move.
    ///
    /// An absent or invalid promotion choice defaults to Queen, matching the
    /// engine boundary contract.
    pub fn apply_move(&mut self, m: &Move) {
        let (fr, fc) = m.from;
        let (tr, tc) = m.to;

        let mut piece = match self.squares[fr][fc] {
            Some(p) => p,
            None => return,
        };
        let is_pawn = piece.kind == PieceKind::Pawn;

        // The target is invalidated by every move; only the check below may
        // consume it.
        let prev_target = self.en_passant_target.take();

        // En passant: a pawn moving diagonally onto the empty target square
        // captures the pawn beside it.
        if is_pawn && fc != tc && self.squares[tr][tc].is_none() && prev_target == Some((tr, tc)) {
            self.squares[fr][tc] = None;
        }

        // Castling: relocate the rook from its corner to the king's far side.
        if piece.kind == PieceKind::King && fc.abs_diff(tc) == 2 {
            let (rook_from, rook_to) = if tc > fc { (7, tc - 1) } else { (0, tc + 1) };
            if let Some(mut rook) = self.squares[fr][rook_from].take() {
                rook.has_moved = true;
                self.squares[fr][rook_to] = Some(rook);
            }
        }

        piece.has_moved = true;

        let last_rank = match piece.color {
            Color::White => 0,
            Color::Black => 7,
        };
        if is_pawn && tr == last_rank {
            piece.kind = match m.promotion {
                Some(
                    kind @ (PieceKind::Queen
                    | PieceKind::Rook
                    | PieceKind::Bishop
                    | PieceKind::Knight),
                ) => kind,
                _ => PieceKind::Queen,
            };
        }

        self.squares[tr][tc] = Some(piece);
        self.squares[fr][fc] = None;

        // A double step arms en passant for the opponent's next move.
        if is_pawn && fr.abs_diff(tr) == 2 {
            self.en_passant_target = Some(((fr + tr) / 2, fc));
        }

        self.side_to_move = piece.color.opposite();
    }
}

// =============================================================================
// Legal-move enumeration and game-state classification
// =============================================================================

impl Board {
    /// Every legal move for `color`, by exhaustive scan of all origin and
    /// destination pairs. Pawn moves reaching the far rank expand into the
    /// four promotion variants.
    ///
    /// This is the shared primitive behind checkmate and stalemate detection.
    /// The scan is O(64 x 64) legality checks; fine for a once-per-move call.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        let last_rank = match color {
            Color::White => 0,
            Color::Black => 7,
        };

        for fr in 0..8 {
            for fc in 0..8 {
                let piece = match self.squares[fr][fc] {
                    Some(p) if p.color == color => p,
                    _ => continue,
                };
                for tr in 0..8 {
                    for tc in 0..8 {
                        if !self.is_legal((fr, fc), (tr, tc)) {
                            continue;
                        }
                        if piece.kind == PieceKind::Pawn && tr == last_rank {
                            for kind in [
                                PieceKind::Queen,
                                PieceKind::Rook,
                                PieceKind::Bishop,
                                PieceKind::Knight,
                            ] {
                                moves.push(Move {
                                    from: (fr, fc),
                                    to: (tr, tc),
                                    promotion: Some(kind),
                                });
                            }
                        } else {
                            moves.push(Move {
                                from: (fr, fc),
                                to: (tr, tc),
                                promotion: None,
                            });
                        }
                    }
                }
            }
        }

        moves
    }

    /// Classify the position for `color` (normally the side to move):
    /// check, checkmate, stalemate, or nothing special.
    pub fn status(&self, color: Color) -> GameStatus {
        let in_check = self.in_check(color);
        let has_moves = !self.legal_moves(color).is_empty();
        match (in_check, has_moves) {
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Normal,
        }
    }
}
