//! `Move`: the plain, caller-facing move record. Unlike `pleco`'s packed
//! 16-bit `BitMove` (`board/piece_move.rs`), spec.md's data model wants a
//! plain struct with an `int` score slot for move ordering, so this stays a
//! handful of fields rather than a bitfield.

use crate::core::sq::{parse_square, square_name, Square};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Promotion {
    None,
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    pub fn to_char(self) -> Option<char> {
        match self {
            Promotion::None => None,
            Promotion::Queen => Some('q'),
            Promotion::Rook => Some('r'),
            Promotion::Bishop => Some('b'),
            Promotion::Knight => Some('n'),
        }
    }

    pub fn from_char(c: char) -> Option<Promotion> {
        match c {
            'q' => Some(Promotion::Queen),
            'r' => Some(Promotion::Rook),
            'b' => Some(Promotion::Bishop),
            'n' => Some(Promotion::Knight),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Promotion,
    pub score: i32,
}

impl Move {
    pub fn quiet(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: Promotion::None,
            score: 0,
        }
    }

    pub fn promoting(from: Square, to: Square, promotion: Promotion) -> Move {
        Move {
            from,
            to,
            promotion,
            score: 0,
        }
    }

    /// A king move of exactly two files is always a castle in this engine;
    /// there is no separate castling flag, matching spec.md §3.
    pub fn is_castle_distance(self) -> bool {
        let df = (self.from as i16 % 8 - self.to as i16 % 8).abs();
        df == 2
    }

    pub fn to_uci(self) -> String {
        let mut s = String::with_capacity(5);
        s.push_str(&square_name(self.from));
        s.push_str(&square_name(self.to));
        if let Some(c) = self.promotion.to_char() {
            s.push(c);
        }
        s
    }

    pub fn from_uci(s: &str) -> Option<Move> {
        if s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = parse_square(&s[0..2])?;
        let to = parse_square(&s[2..4])?;
        let promotion = if s.len() == 5 {
            Promotion::from_char(s.as_bytes()[4] as char)?
        } else {
            Promotion::None
        };
        Some(Move {
            from,
            to,
            promotion,
            score: 0,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uci_roundtrip_quiet() {
        let m = Move::quiet(0, 63);
        assert_eq!(m.to_uci(), "a1h8");
        assert_eq!(Move::from_uci("a1h8").unwrap().from, 0);
    }

    #[test]
    fn test_uci_roundtrip_promotion() {
        let m = Move::promoting(48, 56, Promotion::Queen);
        assert_eq!(m.to_uci(), "a7a8q");
        let parsed = Move::from_uci("a7a8q").unwrap();
        assert_eq!(parsed.promotion, Promotion::Queen);
    }

    #[test]
    fn test_castle_distance() {
        let king_side = Move::quiet(4, 6);
        assert!(king_side.is_castle_distance());
        let normal = Move::quiet(4, 12);
        assert!(!normal.is_castle_distance());
    }
}
