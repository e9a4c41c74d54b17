// Copyright 2025 Irreducible Inc.
//! The two constraint shapes understood by the solvers.

use crate::term::{CoeffId, Term};

/// An ordered sum of terms.
pub type LinearExpression = Vec<Term>;

/// Rank-1 constraint: `(Σ a) · (Σ b) = Σ c`.
///
/// When the constraint is scheduled for solving, at most one of the three
/// linear expressions may contain an unsolved, non-hint wire.
#[derive(Clone, Debug, Default)]
pub struct R1c {
	/// Left factor.
	pub a: LinearExpression,
	/// Right factor.
	pub b: LinearExpression,
	/// Product side.
	pub c: LinearExpression,
}

impl R1c {
	/// Creates a new rank-1 constraint.
	pub fn new(a: LinearExpression, b: LinearExpression, c: LinearExpression) -> Self {
		R1c { a, b, c }
	}
}

/// PLONK-style sparse constraint:
/// `qL·xL + qR·xR + qO·xO + qM·(xM0·xM1) + qK = 0`.
///
/// The multiplicative coefficient is split across the two `m` terms,
/// `qM = coeff(m[0]) · coeff(m[1])`; whenever an `m` term is active (its
/// coefficient is non-zero), `m[0]` must share its wire with `l` and `m[1]`
/// with `r`. At most one of `l`, `r`, `o` may be unsolved when the
/// constraint is scheduled.
#[derive(Clone, Copy, Debug, Default)]
pub struct SparseR1c {
	/// Left wire term, `qL·xL`.
	pub l: Term,
	/// Right wire term, `qR·xR`.
	pub r: Term,
	/// Output wire term, `qO·xO`.
	pub o: Term,
	/// The multiplicative term pair, `qM·(xM0·xM1)`.
	pub m: [Term; 2],
	/// Constant offset `qK`.
	pub k: CoeffId,
}
