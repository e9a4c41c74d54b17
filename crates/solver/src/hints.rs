// Copyright 2025 Irreducible Inc.
//! Hint callbacks: prover-side resolution of non-deterministic wires.
//!
//! Hints compute values that would be expensive to derive inside the
//! constraint system (a field inverse, a zero test) and hand them to the
//! solver, which assigns and then verifies them like any other wire.

use std::{collections::HashMap, sync::Arc};

use ark_ff::{Field, One, Zero};
use strata_core::{hint::builtin, CurveId, HintId, SolverField};

use crate::error::HintError;

/// A registered hint callback.
///
/// The solver evaluates the binding's input terms, sizes `outputs` to the
/// binding's output arity and invokes the callback.
pub trait Hint<F: SolverField>: Send + Sync {
	/// Resolves the hint. `outputs` arrives zeroed and sized to the
	/// binding's output count.
	fn execute(&self, curve: CurveId, inputs: &[F], outputs: &mut [F]) -> Result<(), HintError>;

	/// Declared `(n_inputs, n_outputs)` shape, if fixed.
	///
	/// When present, bindings are checked against it before the callback
	/// runs.
	fn shape(&self) -> Option<(usize, usize)> {
		None
	}
}

struct FnHint<T>(T);

impl<F, T> Hint<F> for FnHint<T>
where
	F: SolverField,
	T: Fn(CurveId, &[F], &mut [F]) -> Result<(), HintError> + Send + Sync,
{
	fn execute(&self, curve: CurveId, inputs: &[F], outputs: &mut [F]) -> Result<(), HintError> {
		(self.0)(curve, inputs, outputs)
	}
}

/// The hint callbacks available to one solve call, keyed by [`HintId`].
pub struct HintRegistry<F: SolverField> {
	handlers: HashMap<HintId, Arc<dyn Hint<F>>>,
}

impl<F: SolverField> HintRegistry<F> {
	/// An empty registry.
	pub fn new() -> Self {
		HintRegistry {
			handlers: HashMap::new(),
		}
	}

	/// A registry pre-populated with the built-in hints under their
	/// well-known ids.
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		registry.register(builtin::INV_ZERO, InvZeroHint);
		registry.register(builtin::IS_ZERO, IsZeroHint);
		registry
	}

	/// Registers `hint` under `id`, replacing any previous registration.
	pub fn register(&mut self, id: HintId, hint: impl Hint<F> + 'static) {
		self.handlers.insert(id, Arc::new(hint));
	}

	/// Registers a closure under `id`.
	pub fn register_fn(
		&mut self,
		id: HintId,
		f: impl Fn(CurveId, &[F], &mut [F]) -> Result<(), HintError> + Send + Sync + 'static,
	) {
		self.register(id, FnHint(f));
	}

	/// Whether a callback is registered under `id`.
	pub fn contains(&self, id: HintId) -> bool {
		self.handlers.contains_key(&id)
	}

	pub(crate) fn get(&self, id: HintId) -> Option<&Arc<dyn Hint<F>>> {
		self.handlers.get(&id)
	}
}

impl<F: SolverField> Default for HintRegistry<F> {
	fn default() -> Self {
		Self::with_builtins()
	}
}

/// `x ↦ x⁻¹`, mapping zero to zero.
pub struct InvZeroHint;

impl<F: SolverField> Hint<F> for InvZeroHint {
	fn execute(&self, _curve: CurveId, inputs: &[F], outputs: &mut [F]) -> Result<(), HintError> {
		let [x] = inputs else {
			return Err(HintError::new("inv_zero expects exactly one input"));
		};
		outputs[0] = x.inverse().unwrap_or_else(F::zero);
		Ok(())
	}

	fn shape(&self) -> Option<(usize, usize)> {
		Some((1, 1))
	}
}

/// `x ↦ 1` if `x` is zero, `x ↦ 0` otherwise.
pub struct IsZeroHint;

impl<F: SolverField> Hint<F> for IsZeroHint {
	fn execute(&self, _curve: CurveId, inputs: &[F], outputs: &mut [F]) -> Result<(), HintError> {
		let [x] = inputs else {
			return Err(HintError::new("is_zero expects exactly one input"));
		};
		outputs[0] = if x.is_zero() { F::one() } else { F::zero() };
		Ok(())
	}

	fn shape(&self) -> Option<(usize, usize)> {
		Some((1, 1))
	}
}
