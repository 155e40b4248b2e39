// -*- mode: rust; -*-
//
// This file is part of gf25519.
// See LICENSE for licensing information.

//! Constants of the field \\(\mathbb{GF}(2^{255} - 19)\\).
//!
//! The prime is the pseudo-Mersenne \\(p = 2^k - c\\) with \\(k = 255\\) and
//! \\(c = 19\\), which is what makes single-pass reduction possible: any
//! bits at position \\(k\\) and above fold back into the low words as a
//! multiple of \\(c\\), since \\(2^k \equiv c \pmod p\\).

use crate::field::FieldElement;
use crate::mpi::{DWord, Word, WSIZE};

/// The exponent \\(k\\) in \\(p = 2^k - c\\).
pub const K: usize = 255;

/// The subtrahend \\(c\\) in \\(p = 2^k - c\\).
pub const C: Word = 19;

/// The number of words in a field element.
pub const LEN: usize = (K + WSIZE - 1) / WSIZE;

/// The prime \\(p = 2^{255} - 19\\) itself.
///
/// `p` is a valid (incompletely reduced) representation of zero.
pub const P: FieldElement = FieldElement([
    0xFFFF_FFED,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0x7FFF_FFFF,
]);

/// Mask of the bits of a top word below bit position \\(k\\).
pub(crate) const MSW_MASK: Word = Word::MAX >> 1;

/// The bit of a top word at position \\(k\\) relative to its own base,
/// i.e. the top word of \\(2^k\\).
pub(crate) const TOP_BIT: Word = 1 << (WSIZE - 1);

/// The top word of \\(4p\\), a 33-bit value.
pub(crate) const FOUR_P_TOP: DWord = (MSW_MASK as DWord) << 2;

/// The all-ones word with the two lowest bits cleared (\\(-4\\) as a word);
/// the top-word bias of the conditional negation.
pub(crate) const MINUS_4_MASK: Word = 0u32.wrapping_sub(4);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn p_matches_its_hex_rendering() {
        let p = FieldElement::from_hex(
            "0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFED",
        )
        .unwrap();
        assert_eq!(p.to_words(), P.to_words());
    }

    #[test]
    fn p_is_congruent_to_zero() {
        assert_eq!(P.reduce().to_words(), FieldElement::ZERO.to_words());
    }

    #[test]
    fn derived_constants_are_consistent() {
        assert_eq!(LEN, 8);
        assert_eq!(P.to_words()[0], 0u32.wrapping_sub(C));
        assert_eq!(P.to_words()[LEN - 1], MSW_MASK);
        assert_eq!(FOUR_P_TOP, 0x1_FFFF_FFFC);
        assert_eq!(MINUS_4_MASK, 0xFFFF_FFFC);
        assert_eq!(TOP_BIT, 0x8000_0000);
    }
}
