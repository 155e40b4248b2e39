// -*- mode: rust; -*-
//
// This file is part of gf25519.
// See LICENSE for licensing information.

//! Field arithmetic modulo \\(p = 2^{255} - 19\\), fused with
//! pseudo-Mersenne reduction.
//!
//! A [`FieldElement`] is eight 32-bit words in little-endian word order.
//! Operands may be incompletely reduced: every operation accepts any value
//! in \\([0, 2^{256} - 1]\\) and produces a result in \\([0, 2p - 1]\\),
//! congruent to the mathematical result.  The reduction is not a separate
//! pass: each operation folds the bits above position 255 back into its own
//! carry chain, using \\(2^{255} \equiv 19 \pmod p\\), so the whole
//! operation completes in a single loop over the words.
//!
//! The subtraction-shaped operations keep their intermediate sums in a
//! signed double word and rely on Rust's guaranteed arithmetic right-shift
//! to propagate a signed carry; the additive offsets (\\(4p\\) for
//! subtraction and negation, \\(p\\) for halving) make the final result
//! land in range without a second loop.
//!
//! Everything here except [`FieldElement::invert`] runs in constant time
//! with respect to the operand words.

use core::cmp::Ordering;
use core::fmt;
use core::fmt::Debug;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::Neg;
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::constants::{C, FOUR_P_TOP, LEN, MINUS_4_MASK, MSW_MASK, P, TOP_BIT};
use crate::errors::ArithmeticError;
use crate::mpi;
use crate::mpi::{DWord, SDWord, Word, WSIZE};

/// A `FieldElement` represents an element of the field
/// \\(\mathbb{GF}(2^{255} - 19)\\).
///
/// The residue class is represented by any integer in
/// \\([0, 2^{256} - 1]\\) congruent to it; two bitwise-distinct encodings
/// may therefore represent the same field element.  `PartialEq`,
/// [`ConstantTimeEq`] and [`FieldElement::cmp`] compare residue classes,
/// not encodings; [`FieldElement::reduce`] produces the canonical
/// least-non-negative encoding.
#[derive(Copy, Clone)]
pub struct FieldElement(pub(crate) [Word; LEN]);

impl Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement: {:?}", &self.0[..])
    }
}

impl fmt::UpperHex for FieldElement {
    /// Formats the encoding (not the canonical residue) as 64 hex digits,
    /// most significant first; `{:#X}` adds the `0x` prefix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        for word in self.0.iter().rev() {
            write!(f, "{:08X}", word)?;
        }
        Ok(())
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &FieldElement, b: &FieldElement, choice: Choice) -> FieldElement {
        let mut r = *a;
        r.conditional_assign(b, choice);
        r
    }

    fn conditional_assign(&mut self, other: &FieldElement, choice: Choice) {
        let mask = 0u32.wrapping_sub(Word::from(choice.unwrap_u8()));
        for i in 0..LEN {
            self.0[i] ^= mask & (self.0[i] ^ other.0[i]);
        }
    }
}

impl ConstantTimeEq for FieldElement {
    /// Test equality between two `FieldElement`s.  Since the internal
    /// representation is not canonical, both operands are fully reduced
    /// before their words are compared.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.reduce().0[..].ct_eq(&other.reduce().0[..])
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        let (a, b) = (&self.0, &rhs.0);
        let mut r = [0; LEN];

        // The top-word sum is split into its low 31 bits and an up-to-2-bit
        // excess; the excess re-enters the carry chain at the bottom as a
        // multiple of c.
        let mut sum = DWord::from(a[LEN - 1]) + DWord::from(b[LEN - 1]);
        let msw = (sum as Word) & MSW_MASK;
        sum = DWord::from(C) * (sum >> (WSIZE - 1));
        // sum is in [0, 3c]

        for i in 0..LEN - 1 {
            sum += DWord::from(a[i]) + DWord::from(b[i]);
            r[i] = sum as Word;
            sum >>= WSIZE;
            // sum is in [0, 2]
        }
        r[LEN - 1] = msw + (sum as Word);

        FieldElement(r)
    }
}

impl<'b> AddAssign<&'b FieldElement> for FieldElement {
    fn add_assign(&mut self, rhs: &'b FieldElement) {
        *self = &*self + rhs;
    }
}

define_add_variants!(LHS = FieldElement, RHS = FieldElement, Output = FieldElement);
define_add_assign_variants!(LHS = FieldElement, RHS = FieldElement);

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: &'b FieldElement) -> FieldElement {
        let (a, b) = (&self.0, &rhs.0);
        let mut r = [0; LEN];

        // Computed as 4p + a - b, so the accumulator ends nonnegative.
        // The top word of 4p is split: 2^33 - 4 enters the top-word
        // difference here, the remaining 4 is added back after the loop.
        let mut sum = FOUR_P_TOP as SDWord + SDWord::from(a[LEN - 1]) - SDWord::from(b[LEN - 1]);
        let msw = (sum as Word) & MSW_MASK;
        sum = SDWord::from(C) * (sum >> (WSIZE - 1));
        sum -= SDWord::from(C) << 2;
        // sum is in [-3c, c]

        for i in 0..LEN - 1 {
            sum += SDWord::from(a[i]) - SDWord::from(b[i]);
            r[i] = sum as Word;
            sum >>= WSIZE;
            // sum is in [-2, 1]
        }
        r[LEN - 1] = msw.wrapping_add(sum as Word).wrapping_add(4);

        FieldElement(r)
    }
}

impl<'b> SubAssign<&'b FieldElement> for FieldElement {
    fn sub_assign(&mut self, rhs: &'b FieldElement) {
        *self = &*self - rhs;
    }
}

define_sub_variants!(LHS = FieldElement, RHS = FieldElement, Output = FieldElement);
define_sub_assign_variants!(LHS = FieldElement, RHS = FieldElement);

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        let mut t = [0; 2 * LEN];
        mpi::mul(&mut t, &self.0, &rhs.0);
        FieldElement::reduce_wide(&t)
    }
}

impl<'b> MulAssign<&'b FieldElement> for FieldElement {
    fn mul_assign(&mut self, rhs: &'b FieldElement) {
        *self = &*self * rhs;
    }
}

define_mul_variants!(LHS = FieldElement, RHS = FieldElement, Output = FieldElement);
define_mul_assign_variants!(LHS = FieldElement, RHS = FieldElement);

impl<'a> Neg for &'a FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        self.cneg(Choice::from(1))
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        -&self
    }
}

impl FieldElement {
    /// The zero element.
    pub const ZERO: FieldElement = FieldElement([0, 0, 0, 0, 0, 0, 0, 0]);

    /// The multiplicative identity.
    pub const ONE: FieldElement = FieldElement([1, 0, 0, 0, 0, 0, 0, 0]);

    /// The canonical encoding of \\(-1\\), i.e. \\(p - 1\\).
    pub const MINUS_ONE: FieldElement = FieldElement([
        0xFFFF_FFEC,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0x7FFF_FFFF,
    ]);

    /// Construct a `FieldElement` from its little-endian word encoding.
    ///
    /// Any word pattern is a valid encoding; no reduction is performed.
    pub const fn from_words(words: [Word; LEN]) -> FieldElement {
        FieldElement(words)
    }

    /// The little-endian word encoding of this element, as is (not
    /// canonicalized).
    pub const fn to_words(self) -> [Word; LEN] {
        self.0
    }

    /// Parse a `0x`-prefixed hex string into a `FieldElement`.
    ///
    /// A test/debug utility; see [`mpi::from_hex`].
    pub fn from_hex(s: &str) -> Result<FieldElement, ArithmeticError> {
        let mut words = [0; LEN];
        mpi::from_hex(&mut words, s)?;
        Ok(FieldElement(words))
    }

    /// Conditionally negate: \\(-a \bmod p\\) if `neg` is set, otherwise
    /// \\(a \bmod p\\).
    ///
    /// Both cases run the identical instruction sequence: the operand
    /// words are XORed with an all-ones/all-zeros mask derived from `neg`
    /// (yielding the one's complement or the identity), the accumulator is
    /// offset by \\(2c - 1\\) under the same mask, and the top-word
    /// folding of the subtraction closes the difference.  The unnegated
    /// result is congruent to `a` but not bitwise identical to it.
    pub fn cneg(&self, neg: Choice) -> FieldElement {
        let a = &self.0;
        let mut r = [0; LEN];
        let mask = 0u32.wrapping_sub(Word::from(neg.unwrap_u8()));

        let mut sum = SDWord::from(MINUS_4_MASK) + SDWord::from(mask ^ a[LEN - 1]);
        let msw = (sum as Word) & MSW_MASK;
        sum = SDWord::from(C) * (sum >> (WSIZE - 1));
        sum -= (SDWord::from(C) << 1) + SDWord::from(mask & (2 * C - 1));
        // sum is in [-3c+1, -c+1] when negating, [-c, c] otherwise

        for i in 0..LEN - 1 {
            sum += SDWord::from(mask ^ a[i]);
            r[i] = sum as Word;
            sum >>= WSIZE;
            // sum is in [-1, 1]
        }
        r[LEN - 1] = msw.wrapping_add(sum as Word).wrapping_add(4);

        FieldElement(r)
    }

    /// Halve: \\(a / 2 \bmod p\\).
    ///
    /// When the operand is odd, \\(p\\) is first added to make it even;
    /// the addition is masked into the same pass as the shift, so odd and
    /// even operands take the identical path.
    pub fn half(&self) -> FieldElement {
        let a = &self.0;
        let mut r = [0; LEN];
        let mask = 0u32.wrapping_sub(a[0] & 1);

        // Masked addition of p: subtract c from the low word, add 2^255
        // at the top, and fold the 1-bit right-shift into the same loop.
        let mut sum = SDWord::from(a[0]) - SDWord::from(C & mask);
        let mut tmp = sum as Word;
        sum >>= WSIZE;
        // sum is in [-1, 0]

        for i in 1..LEN - 1 {
            sum += SDWord::from(a[i]);
            r[i - 1] = ((sum as Word) << (WSIZE - 1)) | (tmp >> 1);
            tmp = sum as Word;
            sum >>= WSIZE;
        }
        sum += SDWord::from(a[LEN - 1]) + SDWord::from(TOP_BIT & mask);
        r[LEN - 2] = ((sum as Word) << (WSIZE - 1)) | (tmp >> 1);
        r[LEN - 1] = (sum >> 1) as Word;

        FieldElement(r)
    }

    /// Square: \\(a^2 \bmod p\\).
    ///
    /// Off-diagonal partial products \\(a_i a_j\\), \\(i < j\\), are
    /// computed once and doubled in a separate pass that also adds the
    /// diagonal squares; the reduction is the same two-pass fold as the
    /// multiplication's.
    pub fn square(&self) -> FieldElement {
        let a = &self.0;
        let mut t = [0; 2 * LEN];
        let mut prod: DWord = 0;

        // Upper-triangle products; the first outer iteration is peeled so
        // the array needs no zeroing pass.
        for j in 1..LEN {
            prod += DWord::from(a[j]) * DWord::from(a[0]);
            t[j] = prod as Word;
            prod >>= WSIZE;
        }
        t[LEN] = prod as Word;

        for i in 1..LEN {
            prod = 0;
            for j in i + 1..LEN {
                prod += DWord::from(a[j]) * DWord::from(a[i]) + DWord::from(t[i + j]);
                t[i + j] = prod as Word;
                prod >>= WSIZE;
            }
            t[i + LEN] = prod as Word;
        }

        // Double the triangle and add the diagonal squares a[i]^2.
        let mut sum: DWord = 0;
        for i in 0..LEN {
            prod = DWord::from(a[i]) * DWord::from(a[i]);
            sum += DWord::from(prod as Word);
            sum += DWord::from(t[2 * i]) + DWord::from(t[2 * i]);
            t[2 * i] = sum as Word;
            sum >>= WSIZE;
            sum += prod >> WSIZE;
            sum += DWord::from(t[2 * i + 1]) + DWord::from(t[2 * i + 1]);
            t[2 * i + 1] = sum as Word;
            sum >>= WSIZE;
        }

        FieldElement::reduce_wide(&t)
    }

    /// Multiply by a single 32-bit scalar: \\(a \cdot b \bmod p\\).
    ///
    /// The 9-word product is reduced by folding the high word times
    /// \\(2c\\), plus \\(c\\) for the top bit of the 8th word, into the
    /// low word, followed by one plain carry chain.
    pub fn mul32(&self, b: Word) -> FieldElement {
        let a = &self.0;
        let mut t = [0; LEN + 1];
        let mut r = [0; LEN];
        let mut prod: DWord = 0;

        for j in 0..LEN {
            prod += DWord::from(a[j]) * DWord::from(b);
            t[j] = prod as Word;
            prod >>= WSIZE;
        }
        t[LEN] = prod as Word;

        let msw = t[LEN - 1] & MSW_MASK;
        prod = DWord::from(C) * DWord::from(t[LEN - 1] >> (WSIZE - 1));
        // prod is either 0 or c

        prod += DWord::from(t[LEN]) * DWord::from(2 * C) + DWord::from(t[0]);
        r[0] = prod as Word;
        prod >>= WSIZE;

        for i in 1..LEN - 1 {
            prod += DWord::from(t[i]);
            r[i] = prod as Word;
            prod >>= WSIZE;
        }
        r[LEN - 1] = (prod as Word) + msw;

        FieldElement(r)
    }

    /// Reduce a double-length product modulo \\(p\\).
    ///
    /// First pass: fold the high half into the low half as a multiple of
    /// \\(2c\\) (because \\(2^{256} \equiv 2c\\)), leaving a 9-word value
    /// whose top double word is below \\(2^{63}\\).  Second pass: split
    /// that double word at bit 31 and fold the upper part back as a
    /// multiple of \\(c\\), exactly as the addition does.
    fn reduce_wide(t: &[Word; 2 * LEN]) -> FieldElement {
        let mut r = [0; LEN];
        let mut prod: DWord = 0;

        for i in 0..LEN - 1 {
            prod += DWord::from(t[i + LEN]) * DWord::from(2 * C) + DWord::from(t[i]);
            r[i] = prod as Word;
            prod >>= WSIZE;
        }
        prod += DWord::from(t[2 * LEN - 1]) * DWord::from(2 * C) + DWord::from(t[LEN - 1]);
        // prod is in [0, 2^63 - 1]

        let msw = (prod as Word) & MSW_MASK;
        prod = DWord::from(C) * (prod >> (WSIZE - 1));
        for i in 0..LEN - 1 {
            prod += DWord::from(r[i]);
            r[i] = prod as Word;
            prod >>= WSIZE;
        }
        r[LEN - 1] = msw + (prod as Word);

        FieldElement(r)
    }

    /// Fully reduce to the canonical encoding in \\([0, p - 1]\\).
    ///
    /// Two rounds of subtract-p/conditionally-re-add-p, because an
    /// externally assigned encoding may exceed \\(2p\\); both rounds
    /// always execute.
    pub fn reduce(&self) -> FieldElement {
        let p = &P.0;
        let mut r = self.0;

        let borrow = mpi::sub_assign(&mut r, p);
        mpi::cadd_assign(&mut r, p, Choice::from(borrow as u8));
        let borrow = mpi::sub_assign(&mut r, p);
        mpi::cadd_assign(&mut r, p, Choice::from(borrow as u8));

        FieldElement(r)
    }

    /// Constant-time three-way comparison of the residue classes of two
    /// field elements.
    ///
    /// Both operands are fully reduced, then compared as integers.
    pub fn cmp(&self, other: &FieldElement) -> Ordering {
        mpi::cmp(&self.reduce().0, &other.reduce().0)
    }

    /// Constant-time three-way comparison of this *encoding* with the
    /// prime \\(p\\).
    ///
    /// Unlike [`FieldElement::cmp`] the operand is not canonicalized:
    /// the 256-bit encoding itself is compared against \\(p\\).
    pub fn cmp_p(&self) -> Ordering {
        mpi::cmp(&self.0, &P.0)
    }

    /// Invert: \\(a^{-1} \bmod p\\), by the binary extended Euclidean
    /// algorithm.
    ///
    /// Returns [`ArithmeticError::InversionOfZero`] when the operand is
    /// congruent to zero.
    ///
    /// # Warning
    ///
    /// This is the one non-constant-time operation in this crate: the
    /// control flow of the Euclidean loop depends on the bit pattern of
    /// the operand.  To invert a secret value, apply multiplicative
    /// masking: pick a random field element \\(u\\), invert \\(a \cdot
    /// u\\), and multiply the result by \\(u\\) to obtain \\(a^{-1}\\).
    /// The mask must be fresh per inversion and come from the caller's
    /// entropy source, which is why it is not built in here.
    pub fn invert(&self) -> Result<FieldElement, ArithmeticError> {
        let mut ux = self.0;
        let mut vx = P.0;
        let mut x1 = FieldElement::ONE;
        let mut x2 = FieldElement::ZERO;

        // Bring ux below p; operands may be incompletely reduced.
        while mpi::cmp(&ux, &vx) != Ordering::Less {
            mpi::sub_assign(&mut ux, &vx);
        }
        if mpi::cmp_word(&ux, 0) == Ordering::Equal {
            return Err(ArithmeticError::InversionOfZero);
        }

        // Binary extended Euclid maintaining ux·a ≡ x1·2^j and
        // vx·a ≡ x2·2^j.  The working length shrinks as the top words of
        // both integers drain to zero, which speeds up the inner loops.
        let mut uvlen = LEN;
        while mpi::cmp_word(&ux[..uvlen], 1) != Ordering::Equal
            && mpi::cmp_word(&vx[..uvlen], 1) != Ordering::Equal
        {
            while ux[0] & 1 == 0 {
                mpi::shr_assign(&mut ux[..uvlen]);
                x1 = x1.half();
            }
            while vx[0] & 1 == 0 {
                mpi::shr_assign(&mut vx[..uvlen]);
                x2 = x2.half();
            }
            // Both ux and vx are odd now.
            if mpi::cmp(&ux[..uvlen], &vx[..uvlen]) != Ordering::Less {
                mpi::sub_assign(&mut ux[..uvlen], &vx[..uvlen]);
                x1 = &x1 - &x2;
            } else {
                mpi::sub_assign(&mut vx[..uvlen], &ux[..uvlen]);
                x2 = &x2 - &x1;
            }
            if ux[uvlen - 1] == 0 && vx[uvlen - 1] == 0 {
                uvlen -= 1;
            }
        }

        if mpi::cmp_word(&ux, 1) == Ordering::Equal {
            Ok(x1)
        } else {
            Ok(x2)
        }
    }
}
