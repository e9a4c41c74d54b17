// Copyright 2025 Irreducible Inc.
//! Compiled constraint-system shapes consumed by the solvers.

use std::collections::HashMap;
use std::fmt::Write;

use ark_ff::{One, Zero};

use crate::{
	constraint::{R1c, SparseR1c},
	curve::CurveId,
	error::ConstraintSystemError,
	field::SolverField,
	hint::HintBindings,
	log::LogEntry,
	term::{CoeffId, Term, Visibility},
};

/// A compiled rank-1 constraint system over the scalar field `F`.
///
/// Produced by a front end; immutable during solving. The scheduling
/// `levels` are extracted once at compile time from the constraint
/// dependency DAG.
#[derive(Clone, Debug, Default)]
pub struct R1cs<F: SolverField> {
	/// Shared pool of constants referenced by terms. The first
	/// [`CoeffId::NB_RESERVED`] entries must hold 0, 1, -1 and 2.
	pub coefficients: Vec<F>,
	/// The constraints, in compilation order.
	pub constraints: Vec<R1c>,
	/// Number of public input wires.
	pub nb_public: usize,
	/// Number of secret input wires.
	pub nb_secret: usize,
	/// Number of internal wires, assigned by the solver.
	pub nb_internal: usize,
	/// Scheduling levels: `levels[k]` lists constraint ids whose
	/// dependencies all live in levels `< k`.
	pub levels: Vec<Vec<usize>>,
	/// Bindings of internal wires to prover-side hint callbacks.
	pub hints: HintBindings,
	/// Debug records attached to constraints, rendered on failure.
	pub debug_info: HashMap<usize, LogEntry>,
	/// Circuit print statements, rendered once solving succeeds.
	pub logs: Vec<LogEntry>,
}

/// A compiled sparse (PLONK-style) constraint system over the scalar field
/// `F`.
#[derive(Clone, Debug, Default)]
pub struct SparseR1cs<F: SolverField> {
	/// Shared pool of constants referenced by terms. The first
	/// [`CoeffId::NB_RESERVED`] entries must hold 0, 1, -1 and 2.
	pub coefficients: Vec<F>,
	/// The constraints, in compilation order.
	pub constraints: Vec<SparseR1c>,
	/// Number of public input wires.
	pub nb_public: usize,
	/// Number of secret input wires.
	pub nb_secret: usize,
	/// Number of internal wires, assigned by the solver.
	pub nb_internal: usize,
	/// Scheduling levels: `levels[k]` lists constraint ids whose
	/// dependencies all live in levels `< k`.
	pub levels: Vec<Vec<usize>>,
	/// Bindings of internal wires to prover-side hint callbacks.
	pub hints: HintBindings,
	/// Debug records attached to constraints, rendered on failure.
	pub debug_info: HashMap<usize, LogEntry>,
	/// Circuit print statements, rendered once solving succeeds.
	pub logs: Vec<LogEntry>,
}

macro_rules! common_system_api {
	($system:ident) => {
		impl<F: SolverField> $system<F> {
			/// Total wire count, `nb_public + nb_secret + nb_internal`.
			pub fn nb_wires(&self) -> usize {
				self.nb_public + self.nb_secret + self.nb_internal
			}

			/// Length of the witness prefix, `nb_public + nb_secret`.
			pub fn witness_len(&self) -> usize {
				self.nb_public + self.nb_secret
			}

			/// The curve this system is compiled over.
			pub fn curve(&self) -> CurveId {
				F::CURVE
			}

			/// Returns a coefficient table holding the four reserved
			/// constants followed by `extra`.
			pub fn coefficient_table(extra: impl IntoIterator<Item = F>) -> Vec<F> {
				let mut table = vec![F::zero(), F::one(), -F::one(), F::one() + F::one()];
				table.extend(extra);
				table
			}

			fn validate_common(&self) -> Result<(), ConstraintSystemError> {
				validate_reserved(&self.coefficients)?;
				validate_levels(&self.levels, self.constraints.len())?;
				validate_hints(
					&self.hints,
					self.witness_len(),
					self.nb_wires(),
					self.coefficients.len(),
				)
			}
		}
	};
}

common_system_api!(R1cs);
common_system_api!(SparseR1cs);

impl<F: SolverField> R1cs<F> {
	/// Checks that the system is structurally well-formed: the reserved
	/// coefficient prefix is in place, every referenced index is in range,
	/// the levels cover each constraint exactly once and hint outputs are
	/// internal wires.
	pub fn validate(&self) -> Result<(), ConstraintSystemError> {
		self.validate_common()?;
		for (i, constraint) in self.constraints.iter().enumerate() {
			for (position, lexp) in [("A", &constraint.a), ("B", &constraint.b), ("C", &constraint.c)]
			{
				for term in lexp {
					validate_term(term, i, position, self.nb_wires(), self.coefficients.len())?;
				}
			}
		}
		Ok(())
	}

	/// Renders constraint `i` as `(Σ a) ⋅ (Σ b) == Σ c` with symbolic wire
	/// names.
	pub fn constraint_to_string(&self, i: usize) -> String {
		let constraint = &self.constraints[i];
		let mut out = String::new();
		for (index, lexp) in [&constraint.a, &constraint.b, &constraint.c].into_iter().enumerate() {
			if index == 2 {
				out.push_str(" == ");
			} else if index == 1 {
				out.push_str(" ⋅ ");
			}
			out.push('(');
			for (j, term) in lexp.iter().enumerate() {
				if j > 0 {
					out.push_str(" + ");
				}
				self.fmt_term(term, false, &mut out);
			}
			if lexp.is_empty() {
				out.push('0');
			}
			out.push(')');
		}
		out
	}

	fn fmt_term(&self, term: &Term, v_only: bool, out: &mut String) {
		term_to_string(
			&self.coefficients,
			&self.hints,
			self.nb_public,
			self.nb_secret,
			term,
			v_only,
			out,
		)
	}
}

impl<F: SolverField> SparseR1cs<F> {
	/// Checks that the system is structurally well-formed; on top of the
	/// common checks this verifies that active `m` terms share their wire
	/// with `l` and `r` respectively.
	pub fn validate(&self) -> Result<(), ConstraintSystemError> {
		self.validate_common()?;
		for (i, constraint) in self.constraints.iter().enumerate() {
			let terms = [
				("L", &constraint.l),
				("R", &constraint.r),
				("O", &constraint.o),
				("M[0]", &constraint.m[0]),
				("M[1]", &constraint.m[1]),
			];
			for (position, term) in terms {
				validate_term(term, i, position, self.nb_wires(), self.coefficients.len())?;
			}
			if constraint.k.index() >= self.coefficients.len() {
				return Err(ConstraintSystemError::CoeffOutOfRange {
					constraint: i,
					position: "K",
					coeff: constraint.k.0,
					nb_coeffs: self.coefficients.len(),
				});
			}
			for (index, with, shared) in [
				(0usize, "L", constraint.l.wire),
				(1, "R", constraint.r.wire),
			] {
				let m = &constraint.m[index];
				if !m.coeff.is_zero() && m.wire != shared {
					return Err(ConstraintSystemError::MulTermWireMismatch {
						constraint: i,
						index,
						with,
					});
				}
			}
		}
		Ok(())
	}

	/// Renders constraint `i` decomposed as in the PLONK paper:
	/// `[qL⋅xa, qR⋅xb, qO⋅xc, qM⋅(xa×xb), qK]`.
	pub fn format_constraint(&self, i: usize) -> [String; 5] {
		let constraint = &self.constraints[i];
		let mut r: [String; 5] = Default::default();

		for (slot, term) in [&constraint.l, &constraint.r, &constraint.o].into_iter().enumerate() {
			let mut out = String::new();
			self.fmt_term(term, false, &mut out);
			r[slot] = out;
		}

		let is_zero_m = constraint.m[0].coeff.is_zero() && constraint.m[1].coeff.is_zero();
		if is_zero_m {
			r[3] = "0".to_string();
		} else {
			let q_m = self.coefficients[constraint.m[0].coeff.index()]
				* self.coefficients[constraint.m[1].coeff.index()];
			let mut out = String::new();
			let _ = write!(out, "{q_m}⋅(");
			self.fmt_term(&constraint.m[0], true, &mut out);
			out.push_str(" × ");
			self.fmt_term(&constraint.m[1], true, &mut out);
			out.push(')');
			r[3] = out;
		}

		r[4] = self.coefficients[constraint.k.index()].to_string();
		r
	}

	/// Renders every constraint via [`Self::format_constraint`].
	pub fn constraints_to_strings(&self) -> Vec<[String; 5]> {
		(0..self.constraints.len()).map(|i| self.format_constraint(i)).collect()
	}

	fn fmt_term(&self, term: &Term, v_only: bool, out: &mut String) {
		term_to_string(
			&self.coefficients,
			&self.hints,
			self.nb_public,
			self.nb_secret,
			term,
			v_only,
			out,
		)
	}
}

fn validate_reserved<F: SolverField>(coefficients: &[F]) -> Result<(), ConstraintSystemError> {
	let two = F::one() + F::one();
	let reserved_ok = coefficients.len() >= CoeffId::NB_RESERVED
		&& coefficients[CoeffId::ZERO.index()].is_zero()
		&& coefficients[CoeffId::ONE.index()].is_one()
		&& coefficients[CoeffId::MINUS_ONE.index()] == -F::one()
		&& coefficients[CoeffId::TWO.index()] == two;
	if reserved_ok {
		Ok(())
	} else {
		Err(ConstraintSystemError::MalformedReservedCoefficients)
	}
}

fn validate_term(
	term: &Term,
	constraint: usize,
	position: &'static str,
	nb_wires: usize,
	nb_coeffs: usize,
) -> Result<(), ConstraintSystemError> {
	if term.wire.index() >= nb_wires {
		return Err(ConstraintSystemError::WireOutOfRange {
			constraint,
			position,
			wire: term.wire.0,
			nb_wires,
		});
	}
	if term.coeff.index() >= nb_coeffs {
		return Err(ConstraintSystemError::CoeffOutOfRange {
			constraint,
			position,
			coeff: term.coeff.0,
			nb_coeffs,
		});
	}
	Ok(())
}

fn validate_levels(
	levels: &[Vec<usize>],
	nb_constraints: usize,
) -> Result<(), ConstraintSystemError> {
	let mut seen = vec![0usize; nb_constraints];
	for (level, nodes) in levels.iter().enumerate() {
		for &node in nodes {
			if node >= nb_constraints {
				return Err(ConstraintSystemError::LevelNodeOutOfRange {
					level,
					node,
					nb_constraints,
				});
			}
			seen[node] += 1;
		}
	}
	for (constraint, &count) in seen.iter().enumerate() {
		if count != 1 {
			return Err(ConstraintSystemError::LevelCoverage { constraint, count });
		}
	}
	Ok(())
}

fn validate_hints(
	hints: &HintBindings,
	witness_len: usize,
	nb_wires: usize,
	nb_coeffs: usize,
) -> Result<(), ConstraintSystemError> {
	for binding in hints.iter() {
		for term in &binding.inputs {
			validate_term(term, usize::MAX, "hint input", nb_wires, nb_coeffs).map_err(|_| {
				ConstraintSystemError::HintTermOutOfRange { hint: binding.hint }
			})?;
		}
		for &wire in &binding.outputs {
			if wire.index() < witness_len || wire.index() >= nb_wires {
				return Err(ConstraintSystemError::HintOutputNotInternal { wire: wire.0 });
			}
		}
	}
	Ok(())
}

fn term_to_string<F: SolverField>(
	coefficients: &[F],
	hints: &HintBindings,
	nb_public: usize,
	nb_secret: usize,
	term: &Term,
	v_only: bool,
	out: &mut String,
) {
	if !v_only {
		match term.coeff {
			CoeffId::ZERO => {
				out.push('0');
				return;
			}
			CoeffId::ONE => out.push('1'),
			CoeffId::MINUS_ONE => out.push_str("-1"),
			coeff => {
				let _ = write!(out, "{}", coefficients[coeff.index()]);
			}
		}
		out.push('⋅');
	}

	let wire = term.wire.index();
	match term.visibility {
		Visibility::Public => {
			let _ = write!(out, "p{wire}");
		}
		Visibility::Secret => {
			let _ = write!(out, "s{}", wire - nb_public);
		}
		Visibility::Internal => {
			let internal = wire - nb_public - nb_secret;
			if hints.contains(term.wire) {
				let _ = write!(out, "hv{internal}");
			} else {
				let _ = write!(out, "v{internal}");
			}
		}
	}
}
