// -*- mode: rust; -*-
//
// This file is part of gf25519.
// See LICENSE for licensing information.

#![no_std]
#![deny(missing_docs)]

//! # gf25519
//!
//! **Prime-field and multi-precision integer arithmetic over
//! \\(\mathbb{GF}(2^{255} - 19)\\) for lightweight X25519 key exchange and
//! Ed25519 signature implementations.**
//!
//! This crate is the arithmetic core of such an implementation: it provides
//! the field operations a Montgomery ladder, a fixed-base comb, or a point
//! (de)compression routine consume, and nothing above them.  Curve and point
//! arithmetic, scalar multiplication, hashing, and the protocol envelopes
//! are deliberately out of scope.
//!
//! ## Representation
//!
//! A field element is stored as eight 32-bit words in little-endian word
//! order, i.e. any integer in \\([0, 2^{256} - 1]\\) congruent to its value
//! modulo \\(p = 2^{255} - 19\\).  Operands do not need to be fully reduced:
//! every operation accepts arbitrary 256-bit inputs and produces a result in
//! \\([0, 2p - 1]\\), so the least non-negative residue is at most one
//! subtraction of \\(p\\) away.  [`FieldElement::reduce`] computes it.
//!
//! The 32-bit saturated-limb representation targets small (8/16/32-bit)
//! processors, where a radix-\\(2^{25.5}\\) unsaturated representation wastes
//! registers it does not have.
//!
//! ## Timing
//!
//! With the exception of [`FieldElement::invert`] (see its documentation for
//! the masking contract) and the raw multi-precision multiplication, every
//! operation in this crate executes an instruction sequence and memory
//! access pattern that do not depend on operand values.  Conditionals are
//! expressed through [`subtle::Choice`] and mask-and-select, never through
//! branches.

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

// Internal macros for the borrow/non-borrow operator variants.

#[macro_use]
mod macros;

// Low-level arithmetic: the variable-length integer kernel and the
// fixed-length field kernel built on top of it.

pub mod field;
pub mod mpi;

// Field constants and error types.

pub mod constants;
pub mod errors;

pub use crate::errors::ArithmeticError;
pub use crate::field::FieldElement;
