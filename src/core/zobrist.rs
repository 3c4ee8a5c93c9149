//! Zobrist key tables. Grounded on `pleco`'s `helper/zobrist.rs`, but built
//! with a safe `lazy_static` instead of `static mut` globals, and seeded with
//! `pleco`'s own xorshift `PRNG` (`tools/prng.rs`) rather than `rand`'s
//! thread-local generator, so the tables are reproducible across runs.

use super::masks::{FILE_CNT, PIECE_TYPE_CNT, PLAYER_CNT, SQ_CNT};
use lazy_static::lazy_static;

const ZOBRIST_SEED: u64 = 23_081;

/// Minimal xorshift64* generator, ported from `pleco`'s `tools::prng::PRNG`.
/// Deterministic given a seed; used only to build the static key tables.
struct Prng {
    seed: u64,
}

impl Prng {
    fn new(seed: u64) -> Self {
        assert_ne!(seed, 0);
        Prng { seed }
    }

    fn rand(&mut self) -> u64 {
        self.seed ^= self.seed >> 12;
        self.seed ^= self.seed << 25;
        self.seed ^= self.seed >> 27;
        self.seed.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

pub struct ZobristKeys {
    /// `[player][piece_type][square]`
    pub piece_sq: [[[u64; SQ_CNT]; PIECE_TYPE_CNT]; PLAYER_CNT],
    pub side: u64,
    /// One key per castling-rights bit (WK, WQ, BK, BQ), XORed in when set.
    pub castle: [u64; 4],
    pub ep_file: [u64; FILE_CNT],
}

lazy_static! {
    pub static ref ZOBRIST: ZobristKeys = {
        let mut prng = Prng::new(ZOBRIST_SEED);
        let mut piece_sq = [[[0u64; SQ_CNT]; PIECE_TYPE_CNT]; PLAYER_CNT];
        for player in piece_sq.iter_mut() {
            for pt in player.iter_mut() {
                for key in pt.iter_mut() {
                    *key = prng.rand();
                }
            }
        }
        let side = prng.rand();
        let mut castle = [0u64; 4];
        for key in castle.iter_mut() {
            *key = prng.rand();
        }
        let mut ep_file = [0u64; FILE_CNT];
        for key in ep_file.iter_mut() {
            *key = prng.rand();
        }
        ZobristKeys {
            piece_sq,
            side,
            castle,
            ep_file,
        }
    };
}
