//! Chess-independent and chess-primitive building blocks: bit twiddling,
//! squares, bitboards, pieces, Zobrist keys, magic sliding attacks, and
//! piece-square tables. Grounded on `pleco`'s `core/` module layout.

pub mod bit_twiddles;
pub mod bitboard;
pub mod magics;
pub mod masks;
pub mod piece;
pub mod psqt;
pub mod sq;

pub use bitboard::Bitboard;
pub use piece::{Piece, PieceType, Player};
pub use sq::Square;
pub mod zobrist;
