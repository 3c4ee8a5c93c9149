//! Legal move generation. Grounded on `pleco`'s `board/movegen.rs` for the
//! overall per-piece dispatch shape, and on `examples/original_source/src/main.c`'s
//! `ADD_MOVE_IF`/`PAWN_ADD_MOVE*`/`PAWN_EN_PASSANT` macros for exact pawn and
//! castling edge cases. Unlike `pleco`'s generic `mono_traits`-dispatched
//! generator, this is a direct, non-generic implementation per spec.md §9's
//! redesign note against macro/code-generated directional logic.

pub mod analyzer;

pub use analyzer::Analyzer;
use analyzer::square_attacked;

use crate::board::{king_attacks, knight_attacks_from, Castling, Move, Position, Promotion};
use crate::core::magics;
use crate::core::sq::{file_of, make_square, rank_of, Square};
use crate::core::{Bitboard, Player};

/// Generates every legal move for `pos.side_to_move` into `out`, returning
/// the count. When `captures_only` is set, only captures (and capturing
/// promotions) are produced — used by quiescence search.
pub fn legal_moves(pos: &Position, out: &mut Vec<Move>, captures_only: bool) -> usize {
    out.clear();
    let analyzer = Analyzer::compute(pos);
    let side = pos.side_to_move;
    let enemy = side.other();

    generate_king_moves(pos, &analyzer, side, enemy, out, captures_only);

    if analyzer.n_checks >= 2 {
        return out.len();
    }

    let occ_all = pos.occ_all();
    let occ_friendly = pos.occ(side);
    let occ_enemy = pos.occ(enemy);
    let king_sq = pos.king_sq(side);

    for from in occ_friendly {
        if from == king_sq {
            continue;
        }
        let piece = pos.board[from as usize];
        match piece.piece_type().unwrap() {
            crate::core::PieceType::Pawn => {
                generate_pawn_moves(pos, &analyzer, from, side, out, captures_only)
            }
            crate::core::PieceType::Knight => generate_piece_moves(
                &analyzer,
                from,
                knight_attacks_from(from),
                occ_friendly,
                occ_enemy,
                out,
                captures_only,
            ),
            crate::core::PieceType::Bishop => generate_piece_moves(
                &analyzer,
                from,
                magics::bishop_attacks(from, occ_all),
                occ_friendly,
                occ_enemy,
                out,
                captures_only,
            ),
            crate::core::PieceType::Rook => generate_piece_moves(
                &analyzer,
                from,
                magics::rook_attacks(from, occ_all),
                occ_friendly,
                occ_enemy,
                out,
                captures_only,
            ),
            crate::core::PieceType::Queen => generate_piece_moves(
                &analyzer,
                from,
                magics::queen_attacks(from, occ_all),
                occ_friendly,
                occ_enemy,
                out,
                captures_only,
            ),
            crate::core::PieceType::King => unreachable!("king handled separately"),
        }
    }

    out.len()
}

fn destination_legal(analyzer: &Analyzer, from: Square, to: Square) -> bool {
    if analyzer.pinned_mask.contains(from) {
        if !analyzer.pin_ray[from as usize].contains(to) {
            return false;
        }
        if analyzer.n_checks != 0 {
            return false;
        }
        return true;
    }
    if analyzer.n_checks == 1 {
        return analyzer.block_mask.contains(to);
    }
    true
}

#[allow(clippy::too_many_arguments)]
fn generate_piece_moves(
    analyzer: &Analyzer,
    from: Square,
    attacks: Bitboard,
    occ_friendly: Bitboard,
    occ_enemy: Bitboard,
    out: &mut Vec<Move>,
    captures_only: bool,
) {
    let mut targets = attacks & !occ_friendly;
    if captures_only {
        targets &= occ_enemy;
    }
    for to in targets {
        if destination_legal(analyzer, from, to) {
            out.push(Move::quiet(from, to));
        }
    }
}

fn push_pawn_move(from: Square, to: Square, is_promo: bool, analyzer: &Analyzer, out: &mut Vec<Move>) {
    if !destination_legal(analyzer, from, to) {
        return;
    }
    if is_promo {
        for &promo in &[Promotion::Queen, Promotion::Rook, Promotion::Bishop, Promotion::Knight] {
            out.push(Move::promoting(from, to, promo));
        }
    } else {
        out.push(Move::quiet(from, to));
    }
}

fn generate_pawn_moves(
    pos: &Position,
    analyzer: &Analyzer,
    from: Square,
    side: Player,
    out: &mut Vec<Move>,
    captures_only: bool,
) {
    let push_rank: i8 = if side.is_white() { 1 } else { -1 };
    let start_rank: i8 = if side.is_white() { 1 } else { 6 };
    let promo_rank: i8 = if side.is_white() { 7 } else { 0 };
    let from_file = file_of(from) as i8;
    let from_rank = rank_of(from) as i8;

    if !captures_only {
        let one_rank = from_rank + push_rank;
        if (0..8).contains(&one_rank) {
            let to = make_square(from_file as u8, one_rank as u8);
            if pos.board[to as usize].is_none() {
                push_pawn_move(from, to, one_rank == promo_rank, analyzer, out);
                if from_rank == start_rank {
                    let two_rank = from_rank + 2 * push_rank;
                    let to2 = make_square(from_file as u8, two_rank as u8);
                    if pos.board[to2 as usize].is_none() && destination_legal(analyzer, from, to2) {
                        out.push(Move::quiet(from, to2));
                    }
                }
            }
        }
    }

    for &df in &[-1i8, 1i8] {
        let cap_file = from_file + df;
        let cap_rank = from_rank + push_rank;
        if !(0..8).contains(&cap_file) || !(0..8).contains(&cap_rank) {
            continue;
        }
        let to = make_square(cap_file as u8, cap_rank as u8);
        let target = pos.board[to as usize];
        if !target.is_none() && target.player() == Some(side.other()) {
            push_pawn_move(from, to, cap_rank == promo_rank, analyzer, out);
        } else if target.is_none() && pos.ep_target() == Some(to) {
            generate_en_passant(pos, from, to, side, out);
        }
    }
}

/// En-passant legality bypasses the pin/block fast path entirely and uses a
/// full make/unmake probe, per spec.md §4.4: the analyzer's ray walk does
/// not model the rare horizontal discovered check created by removing two
/// pawns from the same rank at once.
fn generate_en_passant(pos: &Position, from: Square, to: Square, side: Player, out: &mut Vec<Move>) {
    let mv = Move::quiet(from, to);
    let mut probe = *pos;
    let _ = probe.make_move(mv);
    let king_sq = probe.king_sq(side);
    let enemy = side.other();
    if !square_attacked(&probe, king_sq, enemy, probe.occ_all()) {
        out.push(mv);
    }
}

fn generate_king_moves(
    pos: &Position,
    analyzer: &Analyzer,
    side: Player,
    enemy: Player,
    out: &mut Vec<Move>,
    captures_only: bool,
) {
    let from = pos.king_sq(side);
    let occ_friendly = pos.occ(side);
    let occ_enemy = pos.occ(enemy);
    let occ_without_king = pos.occ_all() & !Bitboard::from_sq(from);

    let mut safe_adjacent = Bitboard::EMPTY;
    let mut targets = king_attacks(from) & !occ_friendly;
    if captures_only {
        targets &= occ_enemy;
    }
    for to in targets {
        if !square_attacked(pos, to, enemy, occ_without_king) {
            safe_adjacent |= Bitboard::from_sq(to);
            out.push(Move::quiet(from, to));
        }
    }

    if captures_only || analyzer.n_checks != 0 {
        return;
    }

    try_castle(pos, side, enemy, from, safe_adjacent, out);
}

fn try_castle(
    pos: &Position,
    side: Player,
    enemy: Player,
    king_from: Square,
    safe_adjacent: Bitboard,
    out: &mut Vec<Move>,
) {
    let rank = if side.is_white() { 0u8 } else { 7u8 };
    let (king_side_right, queen_side_right) = match side {
        Player::White => (Castling::WK, Castling::WQ),
        Player::Black => (Castling::BK, Castling::BQ),
    };
    let rights = pos.state.castling();
    let occ_without_king = pos.occ_all() & !Bitboard::from_sq(king_from);

    if rights.contains(king_side_right) {
        let transit = make_square(5, rank);
        let dest = make_square(6, rank);
        if pos.board[transit as usize].is_none()
            && pos.board[dest as usize].is_none()
            && safe_adjacent.contains(transit)
            && !square_attacked(pos, dest, enemy, occ_without_king)
        {
            out.push(Move::quiet(king_from, dest));
        }
    }
    if rights.contains(queen_side_right) {
        let transit = make_square(3, rank);
        let knight_sq = make_square(1, rank);
        let dest = make_square(2, rank);
        if pos.board[transit as usize].is_none()
            && pos.board[dest as usize].is_none()
            && pos.board[knight_sq as usize].is_none()
            && safe_adjacent.contains(transit)
            && !square_attacked(pos, dest, enemy, occ_without_king)
        {
            out.push(Move::quiet(king_from, dest));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(fen: &str, captures_only: bool) -> usize {
        let pos = Position::from_fen(fen).unwrap();
        let mut out = Vec::new();
        legal_moves(&pos, &mut out, captures_only)
    }

    #[test]
    fn test_start_pos_move_count() {
        assert_eq!(count(crate::core::masks::START_FEN, false), 20);
    }

    #[test]
    fn test_rook_king_scenario() {
        // 1k6/8/8/4R3/8/8/4K3/8 w - - 0 1: 14 rook moves + 4 king moves = 18.
        assert_eq!(count("1k6/8/8/4R3/8/8/4K3/8 w - - 0 1", false), 18);
    }

    #[test]
    fn test_promotion_depth1() {
        let pos = Position::from_fen("8/P7/8/8/8/8/8/7k w - - 0 1").unwrap();
        let mut out = Vec::new();
        legal_moves(&pos, &mut out, false);
        let promo_moves: Vec<_> = out.iter().filter(|m| m.from == 48).collect();
        assert_eq!(promo_moves.len(), 4);
    }

    #[test]
    fn test_stalemate_no_moves() {
        assert_eq!(count("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", false), 0);
    }

    #[test]
    fn test_en_passant_discovered_check_rejected() {
        let pos = Position::from_fen("8/8/8/KPp4r/8/8/8/5k2 w - c6 0 1").unwrap();
        let mut out = Vec::new();
        legal_moves(&pos, &mut out, false);
        assert!(!out.iter().any(|m| m.to_uci() == "b5c6"));
    }

    #[test]
    fn test_double_check_king_only() {
        let pos = Position::from_fen("4k3/8/5N2/8/4R3/8/8/4K3 b - - 0 1").unwrap();
        let mut out = Vec::new();
        legal_moves(&pos, &mut out, false);
        assert!(out.iter().all(|m| m.from == pos.king_sq(Player::Black)));
    }
}
