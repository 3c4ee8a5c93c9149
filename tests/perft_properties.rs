//! Perft laws and concrete scenarios from spec.md §8, kept as integration
//! tests (rather than inline unit tests) since they cross the `board`,
//! `movegen`, and `perft` modules and run at depths too slow to want in
//! every `cargo test` invocation of a single module.

use harrier::board::Position;
use harrier::perft::{perft, root_moves};

#[test]
fn initial_position_perft_depth4() {
    let pos = Position::start_pos();
    assert_eq!(perft(&pos, 4), 197_281);
}

#[test]
fn initial_position_perft_depth5() {
    let pos = Position::start_pos();
    assert_eq!(perft(&pos, 5), 4_865_609);
}

#[test]
fn kiwipete_perft_depth4() {
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    assert_eq!(perft(&pos, 4), 4_085_603);
}

#[test]
fn position_3_perft_depth5() {
    let pos = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
    assert_eq!(perft(&pos, 5), 674_624);
}

#[test]
fn position_4_perft_depth4() {
    let pos =
        Position::from_fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2pP/R2Q1RK1 w kq - 0 1")
            .unwrap();
    assert_eq!(perft(&pos, 4), 422_333);
}

#[test]
fn position_5_perft_depth3() {
    let pos =
        Position::from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8").unwrap();
    assert_eq!(perft(&pos, 3), 62_379);
}

#[test]
fn rook_and_king_move_count() {
    let pos = Position::from_fen("1k6/8/8/4R3/8/8/4K3/8 w - - 0 1").unwrap();
    assert_eq!(perft(&pos, 1), 18);
}

#[test]
fn promotion_move_count_plus_king_moves() {
    let pos = Position::from_fen("8/P7/8/8/8/8/8/7k w - - 0 1").unwrap();
    let moves = root_moves(&pos);
    let promotions: Vec<_> = moves
        .iter()
        .filter(|m| m.from == 48 && m.to == 56)
        .collect();
    assert_eq!(promotions.len(), 4);
}

#[test]
fn stalemate_has_no_moves() {
    let pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(perft(&pos, 1), 0);
    assert!(root_moves(&pos).is_empty());
}

#[test]
fn en_passant_discovered_check_has_no_b5c6() {
    let pos = Position::from_fen("8/8/8/KPp4r/8/8/8/5k2 w - c6 0 1").unwrap();
    let moves = root_moves(&pos);
    assert!(!moves.iter().any(|m| m.to_uci() == "b5c6"));
}

#[test]
fn fen_round_trip() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2pP/R2Q1RK1 w kq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "1k6/8/8/4R3/8/8/4K3/8 w - - 0 1",
        "8/P7/8/8/8/8/8/7k w - - 0 1",
        "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
        "8/8/8/KPp4r/8/8/8/5k2 w - c6 0 1",
    ];
    for fen in fens {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen, "round trip mismatch for {}", fen);
    }
}
