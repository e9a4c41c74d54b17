// Copyright 2025 Irreducible Inc.
//! Per-call solution state: the value vector under construction.

use std::{
	cell::UnsafeCell,
	io::{self, Write},
	sync::{
		atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering},
		Arc,
	},
};

use ark_ff::Zero;
use strata_core::{CoeffId, HintBinding, HintBindings, LogEntry, SolverField, Term, WireId};

use crate::{
	error::{HintError, SolverError},
	hints::{Hint, HintRegistry},
};

/// Per-binding resolution states. A binding moves `UNCLAIMED → RUNNING`
/// when a worker claims it and ends in `SOLVED` or `FAILED`; workers that
/// lose the claim wait for a terminal state, since a binding's outputs may
/// feed several constraints of the same level.
const HINT_UNCLAIMED: u8 = 0;
const HINT_RUNNING: u8 = 1;
const HINT_SOLVED: u8 = 2;
const HINT_FAILED: u8 = 3;

/// Flips the binding to failed on drop, so workers waiting on it are
/// released even if the callback panics. Defused on success.
struct FailBindingOnDrop<'s>(&'s AtomicU8);

impl Drop for FailBindingOnDrop<'_> {
	fn drop(&mut self) {
		self.0.store(HINT_FAILED, Ordering::Release);
	}
}

/// Dense wire-value storage shared across workers.
///
/// Safety rests on the level schedule: the DAG guarantees every wire is
/// written by exactly one constraint, constraints of one level touch
/// disjoint unsolved wires, and the barrier between levels orders each
/// write before any cross-worker read of it.
struct SharedValues<F>(Box<[UnsafeCell<F>]>);

unsafe impl<F: Send + Sync> Sync for SharedValues<F> {}

impl<F: SolverField> SharedValues<F> {
	fn new(len: usize) -> Self {
		SharedValues((0..len).map(|_| UnsafeCell::new(F::zero())).collect())
	}

	#[inline]
	fn get(&self, index: usize) -> F {
		unsafe { *self.0[index].get() }
	}

	#[inline]
	fn set(&self, index: usize, value: F) {
		unsafe { *self.0[index].get() = value }
	}

	fn into_vec(self) -> Vec<F> {
		self.0.into_vec().into_iter().map(UnsafeCell::into_inner).collect()
	}
}

/// Tracks which wires have values while a solve call is in flight.
///
/// Constructed per call, never shared across calls.
pub(crate) struct Solution<'a, F: SolverField> {
	values: SharedValues<F>,
	solved: Box<[AtomicBool]>,
	nb_solved: AtomicU64,
	coefficients: &'a [F],
	hints: &'a HintBindings,
	/// Callback per binding, resolved up front; indexed like `hints`.
	handlers: Vec<Arc<dyn Hint<F>>>,
	/// Resolution state per binding, indexed like `hints`.
	hint_state: Box<[AtomicU8]>,
}

impl<'a, F: SolverField> Solution<'a, F> {
	/// Fails with [`SolverError::HintNotRegistered`] if a binding references
	/// a callback the registry does not know.
	pub(crate) fn new(
		nb_wires: usize,
		coefficients: &'a [F],
		hints: &'a HintBindings,
		registry: &HintRegistry<F>,
	) -> Result<Self, SolverError> {
		let mut handlers = Vec::with_capacity(hints.len());
		for binding in hints.iter() {
			match registry.get(binding.hint) {
				Some(handler) => handlers.push(handler.clone()),
				None => return Err(SolverError::HintNotRegistered { id: binding.hint }),
			}
		}
		Ok(Solution {
			values: SharedValues::new(nb_wires),
			solved: (0..nb_wires).map(|_| AtomicBool::new(false)).collect(),
			nb_solved: AtomicU64::new(0),
			coefficients,
			hints,
			handlers,
			hint_state: (0..hints.len()).map(|_| AtomicU8::new(HINT_UNCLAIMED)).collect(),
		})
	}

	#[inline]
	pub(crate) fn is_solved(&self, wire: WireId) -> bool {
		self.solved[wire.index()].load(Ordering::Acquire)
	}

	/// Assigns `wire`. Writing a wire that already has a value is a
	/// programming error.
	pub(crate) fn set(&self, wire: WireId, value: F) {
		debug_assert!(!self.is_solved(wire), "wire {wire} assigned twice");
		self.values.set(wire.index(), value);
		self.solved[wire.index()].store(true, Ordering::Release);
		self.nb_solved.fetch_add(1, Ordering::Relaxed);
	}

	#[inline]
	pub(crate) fn value(&self, wire: WireId) -> F {
		self.values.get(wire.index())
	}

	/// Evaluates `coefficients[term.coeff] * values[term.wire]`, with fast
	/// paths for the reserved coefficients. A zero coefficient evaluates to
	/// zero without reading the wire.
	pub(crate) fn compute_term(&self, term: &Term) -> F {
		if term.coeff == CoeffId::ZERO {
			return F::zero();
		}
		debug_assert!(self.is_solved(term.wire), "computing a term with unsolved wire {}", term.wire);
		let value = self.value(term.wire);
		match term.coeff {
			CoeffId::ONE => value,
			CoeffId::MINUS_ONE => -value,
			CoeffId::TWO => value + value,
			coeff => self.coefficients[coeff.index()] * value,
		}
	}

	/// Adds the term's value into `acc`.
	pub(crate) fn accumulate_into(&self, term: &Term, acc: &mut F) {
		*acc += self.compute_term(term);
	}

	/// Resolves the hint binding producing `wire`, assigning every output
	/// wire of the binding. A binding already resolved earlier is a no-op.
	///
	/// Sibling constraints of one level may each consume a different output
	/// of the same binding from different workers; whichever claims the
	/// binding runs the callback, the others wait until every output is
	/// assigned before returning.
	pub(crate) fn solve_with_hint(&self, wire: WireId) -> Result<(), SolverError> {
		if self.is_solved(wire) {
			return Ok(());
		}
		let (index, binding) = self.hints.get(wire).expect("wire has a hint binding");
		let state = &self.hint_state[index];
		if state
			.compare_exchange(HINT_UNCLAIMED, HINT_RUNNING, Ordering::AcqRel, Ordering::Acquire)
			.is_err()
		{
			return self.wait_for_hint(state);
		}

		let failed = FailBindingOnDrop(state);
		let result = self.resolve_hint(index, binding);
		if result.is_ok() {
			std::mem::forget(failed);
			// orders every output `set` before the waiters' acquire load
			state.store(HINT_SOLVED, Ordering::Release);
		}
		result
	}

	/// Runs the callback of the claimed binding and assigns its outputs.
	fn resolve_hint(&self, index: usize, binding: &HintBinding) -> Result<(), SolverError> {
		let handler = &self.handlers[index];

		if let Some((_, n_outputs)) = handler.shape() {
			if n_outputs != binding.outputs.len() {
				return Err(SolverError::HintOutputArity {
					expected: n_outputs,
					got: binding.outputs.len(),
				});
			}
		}

		let mut inputs = Vec::with_capacity(binding.inputs.len());
		for term in &binding.inputs {
			if term.coeff != CoeffId::ZERO && !self.is_solved(term.wire) {
				return Err(SolverError::HintInputUnsolved { wire: term.wire });
			}
			inputs.push(self.compute_term(term));
		}

		let mut outputs = vec![F::zero(); binding.outputs.len()];
		handler.execute(F::CURVE, &inputs, &mut outputs)?;

		for (&output, value) in binding.outputs.iter().zip(outputs) {
			self.set(output, value);
		}
		Ok(())
	}

	/// Spins until a binding claimed by another worker reaches a terminal
	/// state. The claimant runs straight-line arithmetic, so the wait is
	/// short.
	#[cold]
	fn wait_for_hint(&self, state: &AtomicU8) -> Result<(), SolverError> {
		loop {
			match state.load(Ordering::Acquire) {
				HINT_SOLVED => return Ok(()),
				HINT_FAILED => {
					return Err(SolverError::HintCallbackFailed(HintError::new(
						"hint binding failed on a sibling constraint",
					)))
				}
				_ => std::hint::spin_loop(),
			}
		}
	}

	pub(crate) fn nb_solved(&self) -> usize {
		self.nb_solved.load(Ordering::Relaxed) as usize
	}

	/// Whether every wire has a value.
	pub(crate) fn is_valid(&self) -> bool {
		self.nb_solved() == self.solved.len()
	}

	/// Renders a deferred record against the current assignment. Wires
	/// without a value print as `<unsolved>`.
	pub(crate) fn log_value(&self, entry: &LogEntry) -> String {
		let mut out = String::with_capacity(entry.format.len());
		let mut args = entry.args.iter();
		let mut rest = entry.format.as_str();
		while let Some(position) = rest.find("{}") {
			out.push_str(&rest[..position]);
			match args.next() {
				Some(term) if term.coeff == CoeffId::ZERO || self.is_solved(term.wire) => {
					out.push_str(&self.compute_term(term).to_string());
				}
				_ => out.push_str("<unsolved>"),
			}
			rest = &rest[position + 2..];
		}
		out.push_str(rest);
		out
	}

	/// Renders every deferred record and writes it to `sink`, one line
	/// each. Only called after a fully successful solve.
	pub(crate) fn print_logs(&self, sink: &mut dyn Write, entries: &[LogEntry]) -> io::Result<()> {
		for entry in entries {
			writeln!(sink, "{}", self.log_value(entry))?;
		}
		Ok(())
	}

	pub(crate) fn into_values(self) -> Vec<F> {
		self.values.into_vec()
	}
}

#[cfg(test)]
mod tests {
	use ark_bn254::Fr;
	use ark_ff::One;
	use strata_core::{HintBinding, Visibility};

	use super::*;

	fn term(coeff: CoeffId, wire: u32) -> Term {
		Term::new(coeff, WireId(wire), Visibility::Internal)
	}

	fn coefficients() -> Vec<Fr> {
		vec![
			Fr::zero(),
			Fr::one(),
			-Fr::one(),
			Fr::from(2u64),
			Fr::from(5u64),
		]
	}

	#[test]
	fn compute_term_fast_paths() {
		let coefficients = coefficients();
		let hints = HintBindings::new();
		let registry = HintRegistry::new();
		let solution = Solution::new(1, &coefficients, &hints, &registry).unwrap();
		solution.set(WireId(0), Fr::from(3u64));

		assert_eq!(solution.compute_term(&term(CoeffId::ZERO, 0)), Fr::zero());
		assert_eq!(solution.compute_term(&term(CoeffId::ONE, 0)), Fr::from(3u64));
		assert_eq!(solution.compute_term(&term(CoeffId::MINUS_ONE, 0)), -Fr::from(3u64));
		assert_eq!(solution.compute_term(&term(CoeffId::TWO, 0)), Fr::from(6u64));
		assert_eq!(solution.compute_term(&term(CoeffId(4), 0)), Fr::from(15u64));
	}

	#[test]
	fn zero_coefficient_ignores_unsolved_wire() {
		let coefficients = coefficients();
		let hints = HintBindings::new();
		let registry = HintRegistry::new();
		let solution = Solution::new(1, &coefficients, &hints, &registry).unwrap();
		// wire 0 has no value, the zero coefficient must not read it
		assert_eq!(solution.compute_term(&term(CoeffId::ZERO, 0)), Fr::zero());
	}

	#[test]
	fn solved_count_tracks_assignments() {
		let coefficients = coefficients();
		let hints = HintBindings::new();
		let registry = HintRegistry::new();
		let solution = Solution::new(2, &coefficients, &hints, &registry).unwrap();
		assert!(!solution.is_valid());
		solution.set(WireId(0), Fr::one());
		solution.set(WireId(1), Fr::one());
		assert!(solution.is_valid());
		assert_eq!(solution.into_values(), vec![Fr::one(), Fr::one()]);
	}

	#[cfg(debug_assertions)]
	#[test]
	#[should_panic(expected = "assigned twice")]
	fn double_assignment_panics() {
		let coefficients = coefficients();
		let hints = HintBindings::new();
		let registry = HintRegistry::new();
		let solution = Solution::new(1, &coefficients, &hints, &registry).unwrap();
		solution.set(WireId(0), Fr::one());
		solution.set(WireId(0), Fr::one());
	}

	#[test]
	fn unknown_hint_is_rejected_up_front() {
		let coefficients = coefficients();
		let mut hints = HintBindings::new();
		hints.push(HintBinding {
			hint: 999,
			inputs: vec![],
			outputs: vec![WireId(0)],
		});
		let registry = HintRegistry::<Fr>::with_builtins();
		let result = Solution::new(1, &coefficients, &hints, &registry);
		assert!(matches!(result, Err(SolverError::HintNotRegistered { id: 999 })));
	}

	#[test]
	fn hint_input_must_be_solved() {
		let coefficients = coefficients();
		let mut hints = HintBindings::new();
		hints.push(HintBinding {
			hint: strata_core::hint::builtin::INV_ZERO,
			inputs: vec![term(CoeffId::ONE, 0)],
			outputs: vec![WireId(1)],
		});
		let registry = HintRegistry::with_builtins();
		let solution = Solution::<Fr>::new(2, &coefficients, &hints, &registry).unwrap();
		let result = solution.solve_with_hint(WireId(1));
		assert!(matches!(result, Err(SolverError::HintInputUnsolved { wire: WireId(0) })));
	}

	#[test]
	fn hint_arity_mismatch_is_reported() {
		let coefficients = coefficients();
		let mut hints = HintBindings::new();
		hints.push(HintBinding {
			hint: strata_core::hint::builtin::INV_ZERO,
			inputs: vec![term(CoeffId::ONE, 0)],
			outputs: vec![WireId(1), WireId(2)],
		});
		let registry = HintRegistry::with_builtins();
		let solution = Solution::<Fr>::new(3, &coefficients, &hints, &registry).unwrap();
		solution.set(WireId(0), Fr::from(7u64));
		let result = solution.solve_with_hint(WireId(1));
		assert!(matches!(
			result,
			Err(SolverError::HintOutputArity { expected: 1, got: 2 })
		));
	}

	#[test]
	fn log_rendering_substitutes_terms() {
		let coefficients = coefficients();
		let hints = HintBindings::new();
		let registry = HintRegistry::new();
		let solution = Solution::<Fr>::new(2, &coefficients, &hints, &registry).unwrap();
		solution.set(WireId(0), Fr::from(4u64));

		let entry = LogEntry::new("x = {}, y = {}", vec![term(CoeffId::ONE, 0), term(CoeffId::ONE, 1)]);
		assert_eq!(solution.log_value(&entry), "x = 4, y = <unsolved>");
	}
}
