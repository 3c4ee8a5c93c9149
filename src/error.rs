//! Typed errors, grounded in the error kinds spec.md §7 enumerates. `pleco`
//! itself returns bare `Result<_, String>` from its FEN parser
//! (`board/fen.rs`); this crate uses `thiserror` instead, matching the error
//! style `catchesstrophy` and `XFChess` use elsewhere in the example pack.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 6 whitespace-separated FEN fields, got {0}")]
    WrongFieldCount(usize),
    #[error("unrecognized piece character '{0}'")]
    BadPieceChar(char),
    #[error("empty-square digit '{0}' is out of range")]
    BadEmptySkip(char),
    #[error("rank {0} does not sum to 8 files")]
    RankLength(usize),
    #[error("expected 8 ranks, got {0}")]
    RankCount(usize),
    #[error("turn field must be 'w' or 'b', got '{0}'")]
    BadTurnChar(String),
    #[error("malformed castling field '{0}'")]
    BadCastling(String),
    #[error("malformed en-passant square '{0}'")]
    BadEpSquare(String),
    #[error("halfmove counter '{0}' is not a valid 0..=99 integer")]
    BadHalfmoves(String),
    #[error("fullmove counter '{0}' is not a valid 1..=255 integer")]
    BadFullmoves(String),
    #[error("position has no {0} king")]
    MissingKing(&'static str),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("move string '{0}' is not a well-formed UCI move")]
    BadUci(String),
    #[error("no piece belonging to the side to move at the origin square")]
    NoFriendlyPieceAtOrigin,
    #[error("destination square holds a friendly piece")]
    CaptureOwnPiece,
    #[error("move is not legal in this position")]
    Illegal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("malformed opening book record on line {0}: '{1}'")]
    BadRecord(usize, String),
    #[error("opening book hash field '{0}' is not valid hex")]
    BadHash(String),
}
