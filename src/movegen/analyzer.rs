//! Attack/pin analyzer: computes, once per node, how many checks the side to
//! move is under, the block/capture mask for a single check, and which
//! friendly pieces are pinned (and along which ray). Grounded on
//! `examples/original_source/src/main.c` lines 1372-1610 (the
//! `ENEMY_ATTACK`/`ENEMY_CHECK`/`SLIDING_PIECE_CHECK` macros), reimplemented
//! as direction-table ray walks per spec.md §9's "macro-heavy directional
//! move code" redesign note rather than ported macro-for-macro.

use crate::board::{king_attacks, knight_attacks_from, pawn_attacks_from, Position};
use crate::core::sq::{file_of, make_square, rank_of, Square};
use crate::core::{Bitboard, PieceType, Player};

const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[derive(Clone)]
pub struct Analyzer {
    pub n_checks: u8,
    pub block_mask: Bitboard,
    pub pinned_mask: Bitboard,
    pub pin_ray: [Bitboard; 64],
}

#[inline(always)]
fn in_bounds(f: i8, r: i8) -> bool {
    (0..8).contains(&f) && (0..8).contains(&r)
}

impl Analyzer {
    /// Computes the snapshot for `pos.side_to_move`. Does not special-case
    /// enemy-king adjacency (spec.md §4.3 step 4 / §9): that contact check
    /// only matters for king-move destination safety, which `legal_moves`
    /// re-verifies directly via `Position::attacked_by` on a board with the
    /// king temporarily relocated, rather than trusting this snapshot.
    pub fn compute(pos: &Position) -> Analyzer {
        let side = pos.side_to_move;
        let enemy = side.other();
        let k = pos.king_sq(side);

        let mut n_checks = 0u8;
        let mut block_mask = Bitboard::EMPTY;
        let mut pinned_mask = Bitboard::EMPTY;
        let mut pin_ray = [Bitboard::EMPTY; 64];

        let pawn_checkers = pawn_attacks_from(k, side) & pieces_bb(pos, enemy, PieceType::Pawn);
        if !pawn_checkers.is_empty() {
            n_checks += 1;
            block_mask |= pawn_checkers;
        }

        let knight_checkers = knight_attacks_from(k) & pieces_bb(pos, enemy, PieceType::Knight);
        if !knight_checkers.is_empty() {
            n_checks += 1;
            block_mask |= knight_checkers;
        }

        for &dir in ROOK_DIRS.iter() {
            if n_checks >= 2 {
                break;
            }
            scan_ray(pos, k, dir, enemy, true, &mut n_checks, &mut block_mask, &mut pinned_mask, &mut pin_ray);
        }
        for &dir in BISHOP_DIRS.iter() {
            if n_checks >= 2 {
                break;
            }
            scan_ray(pos, k, dir, enemy, false, &mut n_checks, &mut block_mask, &mut pinned_mask, &mut pin_ray);
        }

        Analyzer {
            n_checks,
            block_mask,
            pinned_mask,
            pin_ray,
        }
    }

    #[inline(always)]
    pub fn in_check(&self) -> bool {
        self.n_checks > 0
    }
}

fn pieces_bb(pos: &Position, side: Player, pt: PieceType) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for sq in pos.occ(side) {
        if pos.board[sq as usize].piece_type() == Some(pt) {
            bb |= Bitboard::from_sq(sq);
        }
    }
    bb
}

#[allow(clippy::too_many_arguments)]
fn scan_ray(
    pos: &Position,
    k: Square,
    dir: (i8, i8),
    enemy: Player,
    is_rook_dir: bool,
    n_checks: &mut u8,
    block_mask: &mut Bitboard,
    pinned_mask: &mut Bitboard,
    pin_ray: &mut [Bitboard; 64],
) {
    let mut ray_bits = Bitboard::EMPTY;
    let mut f = file_of(k) as i8 + dir.0;
    let mut r = rank_of(k) as i8 + dir.1;
    let mut candidate: Option<Square> = None;

    while in_bounds(f, r) {
        let sq = make_square(f as u8, r as u8);
        ray_bits |= Bitboard::from_sq(sq);
        let piece = pos.board[sq as usize];

        if !piece.is_none() {
            let is_enemy = piece.player() == Some(enemy);
            let pt = piece.piece_type().unwrap();
            let matches_dir = if is_rook_dir {
                matches!(pt, PieceType::Rook | PieceType::Queen)
            } else {
                matches!(pt, PieceType::Bishop | PieceType::Queen)
            };

            match candidate {
                None => {
                    if is_enemy {
                        if matches_dir {
                            *n_checks += 1;
                            *block_mask |= ray_bits;
                        }
                        return;
                    }
                    candidate = Some(sq);
                }
                Some(c) => {
                    if is_enemy && matches_dir {
                        *pinned_mask |= Bitboard::from_sq(c);
                        pin_ray[c as usize] = ray_bits;
                    }
                    return;
                }
            }
        }

        f += dir.0;
        r += dir.1;
    }
}

/// Whether `sq` is attacked by `side` given `occupied`, used by king-move
/// and castling legality (a temporary relocation probe, not the snapshot
/// above).
pub fn square_attacked(pos: &Position, sq: Square, by: Player, occupied: Bitboard) -> bool {
    if !(pawn_attacks_from(sq, by.other()) & pieces_bb(pos, by, PieceType::Pawn)).is_empty() {
        return true;
    }
    if !(knight_attacks_from(sq) & pieces_bb(pos, by, PieceType::Knight)).is_empty() {
        return true;
    }
    if !(king_attacks(sq) & Bitboard::from_sq(pos.king_sq(by))).is_empty() {
        return true;
    }
    let rook_like = crate::core::magics::rook_attacks(sq, occupied);
    let bishop_like = crate::core::magics::bishop_attacks(sq, occupied);
    let enemy_rq = pieces_bb(pos, by, PieceType::Rook) | pieces_bb(pos, by, PieceType::Queen);
    let enemy_bq = pieces_bb(pos, by, PieceType::Bishop) | pieces_bb(pos, by, PieceType::Queen);
    if !(rook_like & enemy_rq).is_empty() {
        return true;
    }
    if !(bishop_like & enemy_bq).is_empty() {
        return true;
    }
    false
}
