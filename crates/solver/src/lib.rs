// Copyright 2025 Irreducible Inc.
//! Parallel witness solvers for Strata constraint systems.
//!
//! Given a compiled constraint system, a witness for the public and secret
//! input wires and (optionally) hint callbacks for non-deterministic wires,
//! the solvers derive values for every internal wire and verify each
//! constraint along the way.
//!
//! Constraints are processed level by level following the schedule the
//! front end extracted from the dependency DAG: constraints within one
//! level touch disjoint unsolved wires, so each level is fanned out across
//! the rayon pool, with a barrier between levels.

mod error;
mod hints;
mod options;
mod r1cs;
mod scheduler;
mod solution;
mod sparse;

pub use error::{HintError, SolverError, SolverFailure};
pub use hints::{Hint, HintRegistry, InvZeroHint, IsZeroHint};
pub use options::SolverOptions;

use strata_core::SolverField;

/// Constraint systems that can derive the full wire assignment from a
/// witness.
pub trait ConstraintSolver<F: SolverField> {
	/// Solves every constraint in level order and returns the complete
	/// `[public | secret | internal]` value vector.
	///
	/// On failure the returned [`SolverFailure`] carries the wire values
	/// assigned up to that point, which is often enough to debug the
	/// offending constraint.
	fn solve(&self, witness: &[F], options: SolverOptions<F>) -> Result<Vec<F>, SolverFailure<F>>;

	/// Returns `Ok(())` iff `witness` satisfies the system.
	fn is_solved(&self, witness: &[F], options: SolverOptions<F>) -> Result<(), SolverError> {
		self.solve(witness, options)
			.map(|_| ())
			.map_err(|failure| failure.error)
	}
}
