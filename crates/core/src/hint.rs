// Copyright 2025 Irreducible Inc.
//! Hint bindings: compiled call sites of prover-side callbacks.
//!
//! A hint resolves one or more internal wires by running a registered
//! callback over already-solved input terms. The binding recorded here is
//! pure data; the callbacks themselves are supplied per solve call through
//! the solver options.

use std::collections::HashMap;

use crate::term::{Term, WireId};

/// Identifier of a hint function, assigned by the front end.
pub type HintId = u32;

/// Well-known ids of the hints every solver registers by default.
pub mod builtin {
	use super::HintId;

	/// `x ↦ x⁻¹`, mapping zero to zero.
	pub const INV_ZERO: HintId = 1;
	/// `x ↦ 1` if `x` is zero, `x ↦ 0` otherwise.
	pub const IS_ZERO: HintId = 2;
}

/// One compiled hint call site.
#[derive(Clone, Debug)]
pub struct HintBinding {
	/// The callback resolving this binding.
	pub hint: HintId,
	/// Input terms, evaluated against already-solved wires.
	pub inputs: Vec<Term>,
	/// Output wires, assigned in the order the callback writes them.
	pub outputs: Vec<WireId>,
}

/// All hint bindings of a constraint system, indexed by output wire.
#[derive(Clone, Debug, Default)]
pub struct HintBindings {
	bindings: Vec<HintBinding>,
	by_wire: HashMap<WireId, u32>,
}

impl HintBindings {
	/// Creates an empty set of bindings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a binding. Every output wire must be bound at most once.
	pub fn push(&mut self, binding: HintBinding) {
		let index = self.bindings.len() as u32;
		for &wire in &binding.outputs {
			let previous = self.by_wire.insert(wire, index);
			assert!(previous.is_none(), "wire {wire} bound to two hints");
		}
		self.bindings.push(binding);
	}

	/// Looks up the binding resolving `wire`, along with its dense index.
	pub fn get(&self, wire: WireId) -> Option<(usize, &HintBinding)> {
		let index = *self.by_wire.get(&wire)? as usize;
		Some((index, &self.bindings[index]))
	}

	/// Whether `wire` is resolved by a hint.
	pub fn contains(&self, wire: WireId) -> bool {
		self.by_wire.contains_key(&wire)
	}

	/// Number of bindings.
	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	/// Whether there are no bindings.
	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}

	/// Iterates the bindings in registration order, matching the dense
	/// indices returned by [`Self::get`].
	pub fn iter(&self) -> impl Iterator<Item = &HintBinding> {
		self.bindings.iter()
	}
}
