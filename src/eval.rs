//! Static evaluation. Grounded on `pleco`'s `board/eval.rs` for the overall
//! material+PST shape and constant names (`INFINITY`/`NEG_INFINITY`), and on
//! `examples/original_source/src/main.c` lines 2280-2300 for the exact
//! pawn-advancement and king-tapering formula.

use crate::board::Position;
use crate::core::psqt::{king_psqt_value, FULLMOVES_ENDGAME};
use crate::core::Player;

/// Divisor for the pawn-row-sum term in `eval`. Absent from the filtered
/// original source; see SPEC_FULL.md §3.
pub const PAWN_RANK_BONUS: i32 = 10;

pub const MATE: i32 = 30_000;
pub const INFINITY: i32 = 30_002;
pub const NEG_INFINITY: i32 = -30_001;
pub const STALEMATE: i32 = 0;

/// Side-to-move-agnostic, white-positive evaluation in centipawns.
pub fn eval(pos: &Position) -> i32 {
    let fm = pos.fullmoves.min(FULLMOVES_ENDGAME);
    let mut e = pos.eval_acc + pos.pawn_row_sum * fm as i32 / PAWN_RANK_BONUS;

    e += king_psqt_value(pos.king_sq(Player::White), true, fm);
    e -= king_psqt_value(pos.king_sq(Player::Black), false, fm);

    e
}

/// `eval` from the perspective of the side to move, for negamax. The search
/// negates this for black so internal scores stay side-to-move-positive.
pub fn eval_relative(pos: &Position) -> i32 {
    let e = eval(pos);
    if pos.side_to_move == Player::White {
        e
    } else {
        -e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    #[test]
    fn test_start_pos_symmetric() {
        let pos = Position::start_pos();
        assert_eq!(eval(&pos), 0);
        assert_eq!(eval_relative(&pos), 0);
    }

    #[test]
    fn test_material_advantage_detected() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert!(eval(&pos) > 0);
    }

    #[test]
    fn test_relative_eval_flips_for_black() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 1").unwrap();
        assert!(eval_relative(&pos) < 0);
    }
}
