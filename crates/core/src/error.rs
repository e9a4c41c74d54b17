// Copyright 2025 Irreducible Inc.
//! Hosts error definitions for the core crate.

/// Structural validation errors for compiled constraint systems.
#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, thiserror::Error)]
pub enum ConstraintSystemError {
	#[error("the coefficient table must start with the reserved constants 0, 1, -1, 2")]
	MalformedReservedCoefficients,
	#[error(
		"constraint #{constraint} references wire {wire} >= wire count {nb_wires} in its {position} slot"
	)]
	WireOutOfRange {
		constraint: usize,
		position: &'static str,
		wire: u32,
		nb_wires: usize,
	},
	#[error(
		"constraint #{constraint} references coefficient {coeff} >= table size {nb_coeffs} in its {position} slot"
	)]
	CoeffOutOfRange {
		constraint: usize,
		position: &'static str,
		coeff: u32,
		nb_coeffs: usize,
	},
	#[error("level {level} references constraint {node} >= constraint count {nb_constraints}")]
	LevelNodeOutOfRange {
		level: usize,
		node: usize,
		nb_constraints: usize,
	},
	#[error("constraint #{constraint} appears in {count} levels, expected exactly one")]
	LevelCoverage { constraint: usize, count: usize },
	#[error("hint {hint} references an out-of-range wire or coefficient in its inputs")]
	HintTermOutOfRange { hint: crate::hint::HintId },
	#[error("hint output wire {wire} is not an internal wire")]
	HintOutputNotInternal { wire: u32 },
	#[error("mul term {index} of constraint #{constraint} does not share its wire with {with}")]
	MulTermWireMismatch {
		constraint: usize,
		index: usize,
		with: &'static str,
	},
}
