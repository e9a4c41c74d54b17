// Copyright 2025 Irreducible Inc.
//! Solver error taxonomy. All of these are terminal; nothing is retried.

use strata_core::{HintId, SolverField, WireId};

/// Failure reported by a user hint callback.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct HintError(pub String);

impl HintError {
	/// Creates a new callback failure.
	pub fn new(message: impl Into<String>) -> Self {
		HintError(message.into())
	}
}

/// Everything that can go wrong while solving a constraint system.
///
/// The witness, hint-registration and post-condition errors are raised from
/// the controlling thread; the remaining ones originate in workers and are
/// forwarded through a bounded channel drained at the next level boundary.
#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
	#[error(
		"invalid witness size, got {got}, expected {expected} = {nb_public} (public) + {nb_secret} (secret)"
	)]
	WitnessSize {
		got: usize,
		expected: usize,
		nb_public: usize,
		nb_secret: usize,
	},
	#[error("constraint #{constraint} is not satisfied: {detail}")]
	Unsatisfied {
		constraint: usize,
		detail: String,
		/// The constraint's debug annotation, rendered against the wire
		/// values at the time of failure.
		debug: Option<String>,
	},
	#[error("hint {id} is not registered with the solver")]
	HintNotRegistered { id: HintId },
	#[error("hint input wire {wire} is not solved")]
	HintInputUnsolved { wire: WireId },
	#[error("hint declared {expected} outputs, its binding carries {got}")]
	HintOutputArity { expected: usize, got: usize },
	#[error("hint callback failed: {0}")]
	HintCallbackFailed(#[from] HintError),
	#[error("solver did not assign {count} wires")]
	UnsolvedWires { count: usize },
}

/// A failed solve, carrying the partially populated value vector.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct SolverFailure<F: SolverField> {
	/// What went wrong.
	pub error: SolverError,
	/// Wire values assigned before the failure; unsolved wires hold zero.
	pub partial_values: Vec<F>,
}
