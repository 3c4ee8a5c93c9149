//! FEN parsing and emission. Grounded on `pleco`'s `board/fen.rs` and
//! `examples/original_source/src/main.c`'s `Chess_from_fen` for exact field
//! semantics (en-passant rank depends on side to move, castling field order).

use super::state::{Castling, GameState};
use super::Position;
use crate::core::masks::NO_SQUARE;
use crate::core::sq::{make_square, parse_square, square_name};
use crate::core::{Bitboard, Piece, Player};
use crate::error::FenError;

impl Position {
    pub fn from_fen(s: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount(fields.len()));
        }

        let mut pos = Position::empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top as u8;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if skip == 0 || skip > 8 {
                        return Err(FenError::BadEmptySkip(c));
                    }
                    file += skip as u8;
                } else {
                    let piece = Piece::from_char(c).ok_or(FenError::BadPieceChar(c))?;
                    if file >= 8 {
                        return Err(FenError::RankLength(rank_from_top));
                    }
                    let sq = make_square(file, rank);
                    pos.board[sq as usize] = piece;
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::RankLength(rank_from_top));
            }
        }

        pos.side_to_move = match fields[1] {
            "w" => Player::White,
            "b" => Player::Black,
            other => return Err(FenError::BadTurnChar(other.to_string())),
        };

        let mut castling = Castling::empty();
        if fields[2] != "-" {
            for c in fields[2].chars() {
                match c {
                    'K' => castling |= Castling::WK,
                    'Q' => castling |= Castling::WQ,
                    'k' => castling |= Castling::BK,
                    'q' => castling |= Castling::BQ,
                    _ => return Err(FenError::BadCastling(fields[2].to_string())),
                }
            }
        }
        pos.state.set_castling(castling);

        if fields[3] != "-" {
            let sq = parse_square(fields[3]).ok_or_else(|| FenError::BadEpSquare(fields[3].to_string()))?;
            pos.state.set_ep_file(sq % 8);
        }

        pos.halfmoves = fields[4]
            .parse::<u16>()
            .ok()
            .filter(|&h| h <= 99)
            .ok_or_else(|| FenError::BadHalfmoves(fields[4].to_string()))?;

        pos.fullmoves = fields[5]
            .parse::<u32>()
            .ok()
            .filter(|&f| (1..=255).contains(&f))
            .ok_or_else(|| FenError::BadFullmoves(fields[5].to_string()))?;

        for sq in 0u8..64 {
            let piece = pos.board[sq as usize];
            match piece.player() {
                Some(Player::White) => pos.occ_white |= Bitboard::from_sq(sq),
                Some(Player::Black) => pos.occ_black |= Bitboard::from_sq(sq),
                None => {}
            }
            if piece == Piece::WhiteKing {
                pos.king_white = sq;
            } else if piece == Piece::BlackKing {
                pos.king_black = sq;
            }
        }
        if pos.king_white == NO_SQUARE {
            return Err(FenError::MissingKing("white"));
        }
        if pos.king_black == NO_SQUARE {
            return Err(FenError::MissingKing("black"));
        }

        pos.eval_acc = pos.recompute_eval_acc();
        pos.pawn_row_sum = pos.recompute_pawn_row_sum();
        pos.zhash = pos.recompute_zhash();
        pos.push_hash();

        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(80);
        for rank_from_top in 0..8u8 {
            let rank = 7 - rank_from_top;
            let mut empties = 0u8;
            for file in 0..8u8 {
                let sq = make_square(file, rank);
                let piece = self.board[sq as usize];
                if piece.is_none() {
                    empties += 1;
                } else {
                    if empties > 0 {
                        out.push((b'0' + empties) as char);
                        empties = 0;
                    }
                    out.push(piece.to_char());
                }
            }
            if empties > 0 {
                out.push((b'0' + empties) as char);
            }
            if rank_from_top != 7 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push_str(if self.side_to_move == Player::White { "w" } else { "b" });

        out.push(' ');
        let rights = self.state.castling();
        if rights.is_empty() {
            out.push('-');
        } else {
            if rights.contains(Castling::WK) {
                out.push('K');
            }
            if rights.contains(Castling::WQ) {
                out.push('Q');
            }
            if rights.contains(Castling::BK) {
                out.push('k');
            }
            if rights.contains(Castling::BQ) {
                out.push('q');
            }
        }

        out.push(' ');
        match self.state.ep_file() {
            Some(file) => {
                let rank = if self.side_to_move == Player::White { 5 } else { 2 };
                out.push_str(&square_name(make_square(file, rank)));
            }
            None => out.push('-'),
        }

        out.push(' ');
        out.push_str(&self.halfmoves.to_string());
        out.push(' ');
        out.push_str(&self.fullmoves.to_string());

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::masks::START_FEN;

    #[test]
    fn test_start_fen_roundtrip() {
        let pos = Position::from_fen(START_FEN).unwrap();
        assert_eq!(pos.to_fen(), START_FEN);
    }

    #[test]
    fn test_ep_rank_depends_on_side() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn test_wrong_field_count() {
        assert_eq!(
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"),
            Err(FenError::WrongFieldCount(5))
        );
    }

    #[test]
    fn test_bad_piece_char() {
        let err = Position::from_fen("xnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(err, Err(FenError::BadPieceChar('x')));
    }

    #[test]
    fn test_overlong_halfmoves_rejected() {
        let err = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 150 1");
        assert!(matches!(err, Err(FenError::BadHalfmoves(_))));
    }

    #[test]
    fn test_missing_king_rejected() {
        let err = Position::from_fen("8/8/8/8/8/8/8/7k w - - 0 1");
        assert_eq!(err, Err(FenError::MissingKing("white")));
    }
}
