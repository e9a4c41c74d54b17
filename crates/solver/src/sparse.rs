// Copyright 2025 Irreducible Inc.
//! Solving sparse (PLONK-style) constraint systems.

use std::time::Instant;

use ark_ff::{batch_inversion, Field, Zero};
use strata_core::{SolverField, SparseR1c, SparseR1cs, WireId};

use crate::{
	error::{SolverError, SolverFailure},
	options::SolverOptions,
	scheduler,
	solution::Solution,
	ConstraintSolver,
};

/// The wire slot of a sparse constraint left to solve for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Unknown {
	L,
	R,
	O,
}

impl<F: SolverField> ConstraintSolver<F> for SparseR1cs<F> {
	fn solve(
		&self,
		witness: &[F],
		mut options: SolverOptions<F>,
	) -> Result<Vec<F>, SolverFailure<F>> {
		let curve = F::CURVE;
		let _span = tracing::debug_span!(
			"solve",
			curve = %curve,
			nb_constraints = self.constraints.len(),
			backend = "plonk",
		)
		.entered();
		let start = Instant::now();

		let nb_wires = self.nb_wires();
		let expected = self.witness_len();
		if witness.len() != expected {
			return Err(SolverFailure {
				error: SolverError::WitnessSize {
					got: witness.len(),
					expected,
					nb_public: self.nb_public,
					nb_secret: self.nb_secret,
				},
				partial_values: vec![F::zero(); nb_wires],
			});
		}

		let solution =
			match Solution::new(nb_wires, &self.coefficients, &self.hints, &options.hints) {
				Ok(solution) => solution,
				Err(error) => {
					return Err(SolverFailure {
						error,
						partial_values: vec![F::zero(); nb_wires],
					})
				}
			};
		for (wire, value) in witness.iter().enumerate() {
			solution.set(WireId(wire as u32), *value);
		}

		// Batch-invert the coefficient table once so solving for the output
		// wire divides by multiplying. Zero coefficients stay zero by
		// convention.
		let mut coeffs_neg_inv = self.coefficients.clone();
		batch_inversion(&mut coeffs_neg_inv);
		for value in &mut coeffs_neg_inv {
			*value = -*value;
		}

		let force = options.force;
		for level in &self.levels {
			if let Err(error) = scheduler::run_level(level, |i| {
				self.solve_and_check(i, &solution, &coeffs_neg_inv, force)
			}) {
				tracing::error!(%error, "constraint system solver failed");
				return Err(SolverFailure {
					error,
					partial_values: solution.into_values(),
				});
			}
		}

		if !solution.is_valid() {
			let count = nb_wires - solution.nb_solved();
			tracing::error!(count, "solver did not assign all wires");
			return Err(SolverFailure {
				error: SolverError::UnsolvedWires { count },
				partial_values: solution.into_values(),
			});
		}

		if let Some(sink) = options.circuit_logger.as_mut() {
			if let Err(error) = solution.print_logs(sink.as_mut(), &self.logs) {
				tracing::warn!(%error, "failed to flush circuit logs");
			}
		}

		tracing::debug!(took = ?start.elapsed(), "constraint system solver done");
		Ok(solution.into_values())
	}
}

impl<F: SolverField> SparseR1cs<F> {
	fn solve_and_check(
		&self,
		i: usize,
		solution: &Solution<'_, F>,
		coeffs_neg_inv: &[F],
		force: bool,
	) -> Result<(), SolverError> {
		self.solve_constraint(i, solution, coeffs_neg_inv, force)?;
		if force {
			return Ok(());
		}
		if let Err(detail) = self.check_constraint(&self.constraints[i], solution) {
			return Err(self.unsatisfied(i, detail, solution));
		}
		Ok(())
	}

	/// Resolves hint-bound wires of the constraint and locates the
	/// remaining unknown, if any. A slot only counts when its coefficient
	/// path is active: `l` through `qL` or `qM`, `r` through `qR` or `qM`,
	/// `o` through `qO`.
	fn compute_hints(
		&self,
		constraint: &SparseR1c,
		solution: &Solution<'_, F>,
	) -> Result<Option<Unknown>, SolverError> {
		let mut unknown = None;

		if (!constraint.l.coeff.is_zero() || !constraint.m[0].coeff.is_zero())
			&& !solution.is_solved(constraint.l.wire)
		{
			if self.hints.contains(constraint.l.wire) {
				solution.solve_with_hint(constraint.l.wire)?;
			} else {
				unknown = Some(Unknown::L);
			}
		}

		if (!constraint.r.coeff.is_zero() || !constraint.m[1].coeff.is_zero())
			&& !solution.is_solved(constraint.r.wire)
		{
			if self.hints.contains(constraint.r.wire) {
				solution.solve_with_hint(constraint.r.wire)?;
			} else {
				unknown = Some(Unknown::R);
			}
		}

		if !constraint.o.coeff.is_zero() && !solution.is_solved(constraint.o.wire) {
			if self.hints.contains(constraint.o.wire) {
				solution.solve_with_hint(constraint.o.wire)?;
			} else {
				unknown = Some(Unknown::O);
			}
		}

		Ok(unknown)
	}

	/// Solves the remaining unknown wire of constraint `i`, if any, and
	/// assigns it.
	fn solve_constraint(
		&self,
		i: usize,
		solution: &Solution<'_, F>,
		coeffs_neg_inv: &[F],
		force: bool,
	) -> Result<(), SolverError> {
		let constraint = &self.constraints[i];
		let Some(unknown) = self.compute_hints(constraint, solution)? else {
			// fully determined, possibly by hint resolution alone
			return Ok(());
		};

		let q_m =
			self.coefficients[constraint.m[0].coeff.index()] * self.coefficients[constraint.m[1].coeff.index()];
		let q_k = self.coefficients[constraint.k.index()];

		match unknown {
			Unknown::O => {
				let l = solution.compute_term(&constraint.l);
				let r = solution.compute_term(&constraint.r);
				let m0 = solution.compute_term(&constraint.m[0]);
				let m1 = solution.compute_term(&constraint.m[1]);
				// o = -(m0·m1 + l + r + qK) / qO
				let o = (m0 * m1 + l + r + q_k) * coeffs_neg_inv[constraint.o.coeff.index()];
				solution.set(constraint.o.wire, o);
			}
			Unknown::R => {
				// xR·(qR + qM·xL) + qL·xL + qO·xO + qK = 0: the solved
				// wire's multiplicative contribution belongs in the
				// denominator, not the residue.
				debug_assert!(solution.is_solved(constraint.l.wire));
				let den = q_m * solution.value(constraint.l.wire)
					+ self.coefficients[constraint.r.coeff.index()];
				let num = solution.compute_term(&constraint.l)
					+ solution.compute_term(&constraint.o)
					+ q_k;
				self.set_quotient(i, constraint.r.wire, num, den, solution, force)?;
			}
			Unknown::L => {
				// xL·(qL + qM·xR) + qR·xR + qO·xO + qK = 0
				debug_assert!(solution.is_solved(constraint.r.wire));
				let den = q_m * solution.value(constraint.r.wire)
					+ self.coefficients[constraint.l.coeff.index()];
				let num = solution.compute_term(&constraint.r)
					+ solution.compute_term(&constraint.o)
					+ q_k;
				self.set_quotient(i, constraint.l.wire, num, den, solution, force)?;
			}
		}
		Ok(())
	}

	/// Assigns `wire ← -num/den`, reporting the constraint as unsatisfied
	/// when the denominator vanishes.
	fn set_quotient(
		&self,
		i: usize,
		wire: WireId,
		num: F,
		den: F,
		solution: &Solution<'_, F>,
		force: bool,
	) -> Result<(), SolverError> {
		match den.inverse() {
			Some(inverse) => {
				solution.set(wire, -(num * inverse));
				Ok(())
			}
			None if force => {
				solution.set(wire, F::zero());
				Ok(())
			}
			None => Err(self.unsatisfied(
				i,
				format!("wire {wire} is under-constrained (zero denominator)"),
				solution,
			)),
		}
	}

	/// Verifies `qL·xL + qR·xR + qO·xO + qM·(xM0·xM1) + qK = 0` once every
	/// wire of the constraint has a value.
	fn check_constraint(
		&self,
		constraint: &SparseR1c,
		solution: &Solution<'_, F>,
	) -> Result<(), String> {
		let l = solution.compute_term(&constraint.l);
		let r = solution.compute_term(&constraint.r);
		let o = solution.compute_term(&constraint.o);
		let m0 = solution.compute_term(&constraint.m[0]);
		let m1 = solution.compute_term(&constraint.m[1]);
		let q_k = self.coefficients[constraint.k.index()];

		let residue = m0 * m1 + l + r + o + q_k;
		if !residue.is_zero() {
			return Err(format!(
				"qL⋅xL + qR⋅xR + qO⋅xO + qM⋅(xM0⋅xM1) + qK != 0 → {l} + {r} + {o} + ({m0} × {m1}) + {q_k} != 0"
			));
		}
		Ok(())
	}

	fn unsatisfied(&self, i: usize, detail: String, solution: &Solution<'_, F>) -> SolverError {
		let debug = self.debug_info.get(&i).map(|entry| solution.log_value(entry));
		SolverError::Unsatisfied {
			constraint: i,
			detail,
			debug,
		}
	}
}
