//! The packed `GameState` byte: castling rights plus en-passant presence and
//! file. Grounded on `pleco`'s `board/castle_rights.rs` bitflags style, but
//! generalized to also carry en-passant per spec.md §3 — pleco keeps en
//! passant as a separate `SQ` field on `BoardState`; this crate's `Position`
//! wants the whole thing as one restorable byte so callers can snapshot and
//! restore it without touching history machinery.

use bitflags::bitflags;

bitflags! {
    #[derive(Default)]
    pub struct Castling: u8 {
        const WK = 0b0000_0001;
        const WQ = 0b0000_0010;
        const BK = 0b0000_0100;
        const BQ = 0b0000_1000;
    }
}

/// One packed byte: 4 castling-rights bits, 1 en-passant-present bit, 3
/// en-passant-file bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct GameState(pub u8);

const EP_PRESENT_BIT: u8 = 0b0001_0000;
const EP_FILE_SHIFT: u8 = 5;
const EP_FILE_MASK: u8 = 0b0000_0111;
const CASTLE_MASK: u8 = 0b0000_1111;

impl GameState {
    pub fn new() -> Self {
        GameState(Castling::all().bits())
    }

    #[inline(always)]
    pub fn castling(self) -> Castling {
        Castling::from_bits_truncate(self.0 & CASTLE_MASK)
    }

    #[inline(always)]
    pub fn set_castling(&mut self, rights: Castling) {
        self.0 = (self.0 & !CASTLE_MASK) | rights.bits();
    }

    #[inline(always)]
    pub fn clear_rights(&mut self, rights: Castling) {
        self.0 &= !rights.bits();
    }

    #[inline(always)]
    pub fn has_right(self, right: Castling) -> bool {
        self.castling().contains(right)
    }

    #[inline(always)]
    pub fn ep_present(self) -> bool {
        self.0 & EP_PRESENT_BIT != 0
    }

    #[inline(always)]
    pub fn ep_file(self) -> Option<u8> {
        if self.ep_present() {
            Some((self.0 >> EP_FILE_SHIFT) & EP_FILE_MASK)
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn set_ep_file(&mut self, file: u8) {
        self.0 = (self.0 & CASTLE_MASK) | EP_PRESENT_BIT | ((file & EP_FILE_MASK) << EP_FILE_SHIFT);
    }

    #[inline(always)]
    pub fn clear_ep(&mut self) {
        self.0 &= CASTLE_MASK;
    }

    /// Castling-rights-and-ep "fingerprint" used to key into the Zobrist
    /// castle-key array: four independent bits, XORed in when set.
    pub fn castle_key_bits(self) -> [bool; 4] {
        let c = self.castling();
        [
            c.contains(Castling::WK),
            c.contains(Castling::WQ),
            c.contains(Castling::BK),
            c.contains(Castling::BQ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_full_rights() {
        let s = GameState::new();
        assert!(s.has_right(Castling::WK));
        assert!(s.has_right(Castling::WQ));
        assert!(s.has_right(Castling::BK));
        assert!(s.has_right(Castling::BQ));
        assert!(!s.ep_present());
    }

    #[test]
    fn test_ep_roundtrip() {
        let mut s = GameState::new();
        s.set_ep_file(4);
        assert!(s.ep_present());
        assert_eq!(s.ep_file(), Some(4));
        s.clear_ep();
        assert!(!s.ep_present());
        assert_eq!(s.ep_file(), None);
        // Clearing ep must not disturb castling rights.
        assert!(s.has_right(Castling::WK));
    }

    #[test]
    fn test_clear_rights_preserves_ep() {
        let mut s = GameState::new();
        s.set_ep_file(2);
        s.clear_rights(Castling::WK);
        assert!(!s.has_right(Castling::WK));
        assert!(s.has_right(Castling::WQ));
        assert_eq!(s.ep_file(), Some(2));
    }
}
