use serde::{Deserialize, Serialize};

use crate::piece::PieceKind;

/// A move request: origin and destination as `(rank, file)` indices, plus an
/// optional promotion choice consulted only when a pawn reaches the far rank.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Move {
    pub from: (usize, usize),
    pub to: (usize, usize),
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Convert to coordinate notation, e.g. "e2e4", "a7a8q".
    ///
    /// Rank index 0 is Black's back rank (rank 8), so the printed digit is
    /// `8 - rank_index`.
    pub fn to_uci(&self) -> String {
        let fc = (b'a' + self.from.1 as u8) as char;
        let fr = (b'8' - self.from.0 as u8) as char;
        let tc = (b'a' + self.to.1 as u8) as char;
        let tr = (b'8' - self.to.0 as u8) as char;
        let promo = match self.promotion {
            Some(PieceKind::Queen) => "q",
            Some(PieceKind::Rook) => "r",
            Some(PieceKind::Bishop) => "b",
            Some(PieceKind::Knight) => "n",
            _ => "",
        };
        format!("{fc}{fr}{tc}{tr}{promo}")
    }

    /// Parse from coordinate notation. Returns `None` for strings that are
    /// too short or name squares off the board.
    pub fn from_uci(s: &str) -> Option<Move> {
        let bytes = s.as_bytes();
        if bytes.len() < 4 {
            return None;
        }
        let fc = bytes[0].checked_sub(b'a')? as usize;
        let fr = b'8'.checked_sub(bytes[1])? as usize;
        let tc = bytes[2].checked_sub(b'a')? as usize;
        let tr = b'8'.checked_sub(bytes[3])? as usize;
        if fc > 7 || fr > 7 || tc > 7 || tr > 7 {
            return None;
        }
        let promotion = if bytes.len() > 4 {
            match bytes[4] {
                b'q' => Some(PieceKind::Queen),
                b'r' => Some(PieceKind::Rook),
                b'b' => Some(PieceKind::Bishop),
                b'n' => Some(PieceKind::Knight),
                _ => None,
            }
        } else {
            None
        };
        Some(Move {
            from: (fr, fc),
            to: (tr, tc),
            promotion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uci_round_trip() {
        for s in ["e2e4", "a7a8q", "h1h8", "b8c6"] {
            let mv = Move::from_uci(s).expect("should parse");
            assert_eq!(mv.to_uci(), s);
        }
    }

    #[test]
    fn e2_maps_to_rank_six() {
        // Rank 2 on the board is index 6 under the rank-0-at-top convention.
        let mv = Move::from_uci("e2e4").unwrap();
        assert_eq!(mv.from, (6, 4));
        assert_eq!(mv.to, (4, 4));
        assert_eq!(mv.promotion, None);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Move::from_uci(""), None);
        assert_eq!(Move::from_uci("e2"), None);
        assert_eq!(Move::from_uci("z9z9"), None);
        assert_eq!(Move::from_uci("e2e9"), None);
    }

    #[test]
    fn unknown_promotion_char_is_none() {
        let mv = Move::from_uci("a7a8x").unwrap();
        assert_eq!(mv.promotion, None);
    }
}
