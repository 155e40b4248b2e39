// -*- mode: rust; -*-
//
// This file is part of gf25519.
// See LICENSE for licensing information.

//! Errors which may occur during field arithmetic or operand parsing.

use core::fmt;
use core::fmt::Display;

/// Errors reported by the arithmetic core.
///
/// Every arithmetic operation except inversion is total over its input
/// domain; inversion fails exactly when its operand represents the zero
/// residue class.  Hex parsing is a test/debug utility and fails on
/// malformed input.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ArithmeticError {
    /// The operand of an inversion was congruent to zero, which has no
    /// multiplicative inverse.
    InversionOfZero,
    /// A hexadecimal string was missing its `0x` prefix or contained a
    /// non-hex character.
    HexFormat,
}

impl Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ArithmeticError::InversionOfZero => write!(f, "Cannot invert the zero field element"),
            ArithmeticError::HexFormat => write!(f, "Malformed hexadecimal string"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ArithmeticError {}
