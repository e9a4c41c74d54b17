// Copyright 2025 Irreducible Inc.
//! Solving rank-1 constraint systems.

use std::time::Instant;

use ark_ff::{Field, Zero};
use strata_core::{CoeffId, LinearExpression, R1c, R1cs, SolverField, Term, WireId};

use crate::{
	error::{SolverError, SolverFailure},
	options::SolverOptions,
	scheduler,
	solution::Solution,
	ConstraintSolver,
};

impl<F: SolverField> ConstraintSolver<F> for R1cs<F> {
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
			backend = "r1cs",
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

		let force = options.force;
		for level in &self.levels {
			if let Err(error) =
				scheduler::run_level(level, |i| self.solve_and_check(i, &solution, force))
			{
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

impl<F: SolverField> R1cs<F> {
	fn solve_and_check(
		&self,
		i: usize,
		solution: &Solution<'_, F>,
		force: bool,
	) -> Result<(), SolverError> {
		self.solve_constraint(i, solution, force)?;
		if force {
			return Ok(());
		}
		let constraint = &self.constraints[i];
		if let Err(detail) = check_r1c(constraint, solution) {
			return Err(self.unsatisfied(i, detail, solution));
		}
		Ok(())
	}

	/// Solves the at-most-one unsolved wire of constraint `i` and assigns
	/// it. Hint-bound wires encountered along the way are resolved first,
	/// so they never count as the unknown.
	fn solve_constraint(
		&self,
		i: usize,
		solution: &Solution<'_, F>,
		force: bool,
	) -> Result<(), SolverError> {
		let constraint = &self.constraints[i];

		// 1 = a, 2 = b, 3 = c
		let mut unknown: Option<(u8, Term)> = None;
		let mut process = |lexp: &LinearExpression,
		                   acc: &mut F,
		                   position: u8|
		 -> Result<(), SolverError> {
			for term in lexp {
				if term.coeff == CoeffId::ZERO || solution.is_solved(term.wire) {
					solution.accumulate_into(term, acc);
					continue;
				}
				if self.hints.contains(term.wire) {
					solution.solve_with_hint(term.wire)?;
					solution.accumulate_into(term, acc);
					continue;
				}
				assert!(
					unknown.is_none(),
					"constraint #{i} has more than one unsolved wire"
				);
				unknown = Some((position, *term));
			}
			Ok(())
		};

		let (mut a, mut b, mut c) = (F::zero(), F::zero(), F::zero());
		process(&constraint.a, &mut a, 1)?;
		process(&constraint.b, &mut b, 2)?;
		process(&constraint.c, &mut c, 3)?;

		let Some((position, term)) = unknown else {
			// plain assertion, nothing to compute
			return Ok(());
		};

		let coeff = self.coefficients[term.coeff.index()];
		let (num, den) = match position {
			// (a + coeff·x)·b = c
			1 => (c - a * b, coeff * b),
			// a·(b + coeff·x) = c
			2 => (c - a * b, coeff * a),
			// a·b = c + coeff·x
			_ => (a * b - c, coeff),
		};

		match den.inverse() {
			Some(inverse) => solution.set(term.wire, num * inverse),
			None if force => solution.set(term.wire, F::zero()),
			None => {
				return Err(self.unsatisfied(
					i,
					format!("wire {} is under-constrained (zero denominator)", term.wire),
					solution,
				))
			}
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

/// Verifies `(Σ a) · (Σ b) = Σ c` once every wire of the constraint has a
/// value.
fn check_r1c<F: SolverField>(constraint: &R1c, solution: &Solution<'_, F>) -> Result<(), String> {
	let eval = |lexp: &LinearExpression| {
		let mut acc = F::zero();
		for term in lexp {
			solution.accumulate_into(term, &mut acc);
		}
		acc
	};
	let a = eval(&constraint.a);
	let b = eval(&constraint.b);
	let c = eval(&constraint.c);
	if a * b != c {
		return Err(format!("{a} ⋅ {b} != {c}"));
	}
	Ok(())
}
