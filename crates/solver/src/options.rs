// Copyright 2025 Irreducible Inc.
//! Per-call solver configuration.

use std::io::Write;

use strata_core::{HintId, SolverField};

use crate::hints::{Hint, HintRegistry};

/// Options for one solve call.
///
/// The default carries the built-in hints, no circuit logger and
/// verification enabled.
pub struct SolverOptions<F: SolverField> {
	pub(crate) hints: HintRegistry<F>,
	pub(crate) circuit_logger: Option<Box<dyn Write + Send>>,
	pub(crate) force: bool,
}

impl<F: SolverField> SolverOptions<F> {
	/// The default options.
	pub fn new() -> Self {
		SolverOptions {
			hints: HintRegistry::default(),
			circuit_logger: None,
			force: false,
		}
	}

	/// Registers a hint callback under `id`, replacing any previous
	/// registration (including a built-in).
	pub fn with_hint(mut self, id: HintId, hint: impl Hint<F> + 'static) -> Self {
		self.hints.register(id, hint);
		self
	}

	/// Sink for the circuit's deferred log records. Written only after a
	/// fully successful solve.
	pub fn with_circuit_logger(mut self, sink: impl Write + Send + 'static) -> Self {
		self.circuit_logger = Some(Box::new(sink));
		self
	}

	/// Disables the post-assignment verification pass and zero-denominator
	/// aborts; wires the solver cannot determine are assigned zero.
	///
	/// The resulting vector is best-effort and deterministic, which makes
	/// it useful for benchmarking the solving pass itself and useless for
	/// proving. Never feed a force-mode vector to a prover.
	pub fn with_force(mut self, force: bool) -> Self {
		self.force = force;
		self
	}
}

impl<F: SolverField> Default for SolverOptions<F> {
	fn default() -> Self {
		Self::new()
	}
}
