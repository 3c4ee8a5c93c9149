//! Move path enumeration, used both to validate move generation and to back
//! the `moves` CLI command. Grounded on `pleco`'s `board/perft.rs` for the
//! recursive shape; simplified to the single `nodes` count spec.md §2 item 9
//! and §8's perft laws actually ask for (pleco's per-category capture/check/
//! castle/promotion counters have no counterpart named in the spec).

use crate::board::{Move, Position};
use crate::movegen::legal_moves;
use rayon::prelude::*;

/// Recursive node count at `depth`. `depth == 0` is one (the leaf itself).
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut moves = Vec::new();
    legal_moves(pos, &mut moves, false);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|mv| {
            let mut child = *pos;
            child.make_move(mv);
            perft(&child, depth - 1)
        })
        .sum()
}

/// Same count as `perft`, but splits the root move list across a rayon
/// thread pool. Only worth the overhead at `depth >= 2` (grounded on
/// pleco's `board/perft.rs`, which recurses single-threaded below the root).
pub fn perft_parallel(pos: &Position, depth: u32) -> u64 {
    if depth < 2 {
        return perft(pos, depth);
    }
    let mut moves = Vec::new();
    legal_moves(pos, &mut moves, false);
    moves
        .par_iter()
        .map(|&mv| {
            let mut child = *pos;
            child.make_move(mv);
            perft(&child, depth - 1)
        })
        .sum()
}

/// The `moves <FEN> 1` case: the root move list itself, rather than a count.
pub fn root_moves(pos: &Position) -> Vec<Move> {
    let mut moves = Vec::new();
    legal_moves(pos, &mut moves, false);
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perft_depth1_start_pos() {
        let pos = Position::start_pos();
        assert_eq!(perft(&pos, 1), 20);
    }

    #[test]
    fn test_perft_depth2_start_pos() {
        let pos = Position::start_pos();
        assert_eq!(perft(&pos, 2), 400);
    }

    #[test]
    fn test_perft_depth3_start_pos() {
        let pos = Position::start_pos();
        assert_eq!(perft(&pos, 3), 8902);
    }

    #[test]
    fn test_perft_kiwipete_depth4() {
        let pos = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(perft(&pos, 4), 4_085_603);
    }

    #[test]
    fn test_perft_parallel_matches_serial() {
        let pos = Position::start_pos();
        assert_eq!(perft_parallel(&pos, 3), perft(&pos, 3));
    }

    #[test]
    fn test_stalemate_zero_nodes_zero_moves() {
        let pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(perft(&pos, 1), 0);
        assert!(root_moves(&pos).is_empty());
    }
}
