// Copyright 2025 Irreducible Inc.
//! Terms, the atoms constraints are built from.

use std::fmt;

/// A type safe wrapper over an index into the value vector.
///
/// The value vector is laid out `[public | secret | internal]`; a `WireId` is
/// the dense position of one wire in it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct WireId(pub u32);

impl WireId {
	/// Position of the wire in the value vector.
	#[inline]
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for WireId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// A type safe wrapper over an index into the coefficient table.
///
/// The first [`CoeffId::NB_RESERVED`] entries of every table are fixed: 0,
/// 1, -1 and 2, in that order. Terms referencing those take fast paths that
/// never touch the table.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct CoeffId(pub u32);

impl CoeffId {
	/// The constant 0. A term scaled by it contributes nothing and carries
	/// no dependency on its wire.
	pub const ZERO: CoeffId = CoeffId(0);
	/// The constant 1.
	pub const ONE: CoeffId = CoeffId(1);
	/// The constant -1.
	pub const MINUS_ONE: CoeffId = CoeffId(2);
	/// The constant 2.
	pub const TWO: CoeffId = CoeffId(3);

	/// Number of reserved entries at the front of every coefficient table.
	pub const NB_RESERVED: usize = 4;

	/// Position of the coefficient in the table.
	#[inline]
	pub fn index(self) -> usize {
		self.0 as usize
	}

	/// Whether this is the reserved zero coefficient.
	#[inline]
	pub fn is_zero(self) -> bool {
		self == CoeffId::ZERO
	}
}

impl fmt::Display for CoeffId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Which section of the value vector a wire lives in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Visibility {
	/// Part of the public inputs, pre-populated from the witness.
	#[default]
	Public,
	/// Part of the secret inputs, pre-populated from the witness.
	Secret,
	/// Computed by the solver.
	Internal,
}

/// One multiplicative monomial of a constraint.
///
/// A term denotes the product `coefficients[coeff] * values[wire]`. A term
/// whose coefficient is [`CoeffId::ZERO`] evaluates to zero without reading
/// the wire, which therefore may legitimately be unsolved.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Term {
	/// Index of the scaling constant in the coefficient table.
	pub coeff: CoeffId,
	/// The wire the term reads.
	pub wire: WireId,
	/// Section of the value vector `wire` points into.
	pub visibility: Visibility,
}

impl Term {
	/// A term that contributes nothing regardless of wire values.
	pub const ZERO: Term = Term {
		coeff: CoeffId::ZERO,
		wire: WireId(0),
		visibility: Visibility::Public,
	};

	/// Creates a new term.
	pub fn new(coeff: CoeffId, wire: WireId, visibility: Visibility) -> Self {
		Term {
			coeff,
			wire,
			visibility,
		}
	}
}
