//! Opening book probe. Reads the line-oriented format from spec.md §6:
//! `zhash_hex,N,uci1,uci2,...,uciN`, `#`-prefixed lines are comments.
//! Grounded on `examples/original_source/src/main.c`'s `openings_db` (the
//! file format and the "first N full moves" window) for semantics, and on
//! `pleco`'s `tools::prng` for the idea of a dedicated PRNG type, though the
//! uniform pick itself uses the `rand` crate's thread-local generator since
//! this selection is not required to be reproducible.

use crate::board::Move;
use crate::error::BookError;
use rand::Rng;
use std::collections::HashMap;

/// Fullmove window (inclusive) during which `play`/`fancy` consult the book
/// before searching, per spec.md §4.7 step 1 and the original's `fullmoves
/// <= 5` guard.
pub const BOOK_WINDOW_FULLMOVES: u32 = 5;

pub struct OpeningBook {
    records: HashMap<u64, Vec<Move>>,
}

impl OpeningBook {
    pub fn empty() -> OpeningBook {
        OpeningBook {
            records: HashMap::new(),
        }
    }

    /// Parses the book text format, skipping blank lines and `#` comments.
    pub fn parse(text: &str) -> Result<OpeningBook, BookError> {
        let mut records = HashMap::new();
        for (lineno, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() < 2 {
                return Err(BookError::BadRecord(lineno + 1, line.to_string()));
            }
            let hash = u64::from_str_radix(fields[0], 16)
                .map_err(|_| BookError::BadHash(fields[0].to_string()))?;
            let n_options: usize = fields[1]
                .parse()
                .map_err(|_| BookError::BadRecord(lineno + 1, line.to_string()))?;
            let moves_raw = &fields[2..];
            if n_options == 0 || moves_raw.len() != n_options {
                return Err(BookError::BadRecord(lineno + 1, line.to_string()));
            }
            let mut moves = Vec::with_capacity(n_options);
            for uci in moves_raw {
                let mv = Move::from_uci(uci.trim())
                    .ok_or_else(|| BookError::BadRecord(lineno + 1, line.to_string()))?;
                moves.push(mv);
            }
            records.insert(hash, moves);
        }
        Ok(OpeningBook { records })
    }

    /// Uniformly selects one of the book's moves for `zhash`, or `None` if
    /// the hash has no entry.
    pub fn probe(&self, zhash: u64) -> Option<Move> {
        let moves = self.records.get(&zhash)?;
        let idx = rand::thread_rng().gen_range(0..moves.len());
        Some(moves[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let text = "# a comment\n\nabc123,2,e2e4,d2d4\n";
        let book = OpeningBook::parse(text).unwrap();
        assert_eq!(book.records.len(), 1);
    }

    #[test]
    fn test_probe_returns_one_of_the_listed_moves() {
        let book = OpeningBook::parse("abc123,2,e2e4,d2d4\n").unwrap();
        let hash = u64::from_str_radix("abc123", 16).unwrap();
        let mv = book.probe(hash).unwrap();
        assert!(mv.to_uci() == "e2e4" || mv.to_uci() == "d2d4");
    }

    #[test]
    fn test_probe_miss_returns_none() {
        let book = OpeningBook::parse("abc123,1,e2e4\n").unwrap();
        assert!(book.probe(0xdead_beef).is_none());
    }

    #[test]
    fn test_mismatched_option_count_rejected() {
        let err = OpeningBook::parse("abc123,3,e2e4,d2d4\n");
        assert!(err.is_err());
    }
}
