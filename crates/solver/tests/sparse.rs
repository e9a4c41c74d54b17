// Copyright 2025 Irreducible Inc.
//! End-to-end tests of the sparse (PLONK-style) solver.

mod common;

use ark_bn254::Fr;
use ark_ff::{Field, Zero};
use common::{internal, public, MINUS_ONE, ONE, TWO, ZERO};
use strata_core::{
	hint::builtin, CoeffId, HintBinding, SolverField, SparseR1c, SparseR1cs, Term, WireId,
};
use strata_solver::{ConstraintSolver, SolverError, SolverOptions};

fn empty_sparse<F: SolverField>(
	nb_public: usize,
	nb_internal: usize,
	extra_coeffs: Vec<F>,
) -> SparseR1cs<F> {
	SparseR1cs {
		coefficients: SparseR1cs::<F>::coefficient_table(extra_coeffs),
		nb_public,
		nb_internal,
		..Default::default()
	}
}

#[test]
fn affine_constraint_is_checked_against_the_witness() {
	// 2·p0 + 1 = 0, with p0 forced to 0 by the witness
	let mut cs = empty_sparse::<Fr>(1, 0, vec![]);
	cs.constraints.push(SparseR1c {
		l: public(TWO, 0),
		k: CoeffId(ONE),
		..Default::default()
	});
	cs.levels = vec![vec![0]];
	cs.validate().unwrap();

	let failure = cs.solve(&[Fr::zero()], SolverOptions::new()).unwrap_err();
	assert!(matches!(failure.error, SolverError::Unsatisfied { constraint: 0, .. }));
}

#[test]
fn addition_chain_solves_the_output_wires() {
	// x0 = p0 + 1, x_{i+1} = x_i + 1
	let nb = 5usize;
	let mut cs = empty_sparse::<Fr>(1, nb, vec![]);
	for i in 0..nb {
		let input = if i == 0 { public(ONE, 0) } else { internal(ONE, i as u32) };
		cs.constraints.push(SparseR1c {
			l: input,
			o: internal(MINUS_ONE, 1 + i as u32),
			k: CoeffId(ONE),
			..Default::default()
		});
	}
	cs.levels = (0..nb).map(|i| vec![i]).collect();
	cs.validate().unwrap();

	let values = cs.solve(&[Fr::zero()], SolverOptions::new()).unwrap();
	assert_eq!(values[nb], Fr::from(nb as u64));
}

#[test]
fn multiplication_solves_for_the_output() {
	// x1·x1 - x2 = 0 with x1 = p0 + 1
	let mut cs = empty_sparse::<Fr>(1, 2, vec![]);
	cs.constraints.push(SparseR1c {
		l: public(ONE, 0),
		o: internal(MINUS_ONE, 1),
		k: CoeffId(ONE),
		..Default::default()
	});
	cs.constraints.push(SparseR1c {
		m: [internal(ONE, 1), internal(ONE, 1)],
		l: Term::new(CoeffId(ZERO), WireId(1), strata_core::Visibility::Internal),
		r: Term::new(CoeffId(ZERO), WireId(1), strata_core::Visibility::Internal),
		o: internal(MINUS_ONE, 2),
		..Default::default()
	});
	cs.levels = vec![vec![0], vec![1]];
	cs.validate().unwrap();

	let values = cs.solve(&[Fr::from(14u64)], SolverOptions::new()).unwrap();
	assert_eq!(values[1], Fr::from(15u64));
	assert_eq!(values[2], Fr::from(225u64));
}

#[test]
fn hint_driven_wire_solves_and_verifies() {
	// qM·(x·q) - 1 = 0 where x is bound to the inverse hint over q
	let mut cs = empty_sparse::<Fr>(1, 1, vec![]);
	cs.constraints.push(SparseR1c {
		l: Term::new(CoeffId(ZERO), WireId(1), strata_core::Visibility::Internal),
		r: Term::new(CoeffId(ZERO), WireId(0), strata_core::Visibility::Public),
		m: [internal(ONE, 1), public(ONE, 0)],
		k: CoeffId(MINUS_ONE),
		..Default::default()
	});
	cs.levels = vec![vec![0]];
	cs.hints.push(HintBinding {
		hint: builtin::INV_ZERO,
		inputs: vec![public(ONE, 0)],
		outputs: vec![WireId(1)],
	});
	cs.validate().unwrap();

	let q = Fr::from(7u64);
	let values = cs.solve(&[q], SolverOptions::new()).unwrap();
	assert_eq!(values[1], q.inverse().unwrap());
}

#[test]
fn solving_left_folds_the_known_wire_into_the_denominator() {
	// x·p0 - 6 = 0 with p0 = 2: solving for x divides by qM·p0
	let mut cs = empty_sparse::<Fr>(1, 1, vec![-Fr::from(6u64)]);
	cs.constraints.push(SparseR1c {
		l: Term::new(CoeffId(ZERO), WireId(1), strata_core::Visibility::Internal),
		r: Term::new(CoeffId(ZERO), WireId(0), strata_core::Visibility::Public),
		m: [internal(ONE, 1), public(ONE, 0)],
		k: CoeffId(4),
		..Default::default()
	});
	cs.levels = vec![vec![0]];
	cs.validate().unwrap();

	let values = cs.solve(&[Fr::from(2u64)], SolverOptions::new()).unwrap();
	assert_eq!(values[1], Fr::from(3u64));
}

#[test]
fn degenerate_denominator_is_unsatisfied() {
	// qM·(p0·x) + 1 = 0 with p0 = 0: x stays unknown, qM·xL + qR = 0
	let mut cs = empty_sparse::<Fr>(1, 1, vec![]);
	cs.constraints.push(SparseR1c {
		l: public(ONE, 0),
		r: Term::new(CoeffId(ZERO), WireId(1), strata_core::Visibility::Internal),
		m: [public(ONE, 0), internal(ONE, 1)],
		k: CoeffId(ONE),
		..Default::default()
	});
	cs.levels = vec![vec![0]];
	cs.validate().unwrap();

	let failure = cs.solve(&[Fr::zero()], SolverOptions::new()).unwrap_err();
	assert!(matches!(failure.error, SolverError::Unsatisfied { constraint: 0, .. }));
}

#[test]
fn force_mode_suppresses_verification() {
	let mut cs = empty_sparse::<Fr>(1, 0, vec![]);
	cs.constraints.push(SparseR1c {
		l: public(TWO, 0),
		k: CoeffId(ONE),
		..Default::default()
	});
	cs.levels = vec![vec![0]];

	let values = cs
		.solve(&[Fr::zero()], SolverOptions::new().with_force(true))
		.unwrap();
	assert_eq!(values, vec![Fr::zero()]);
}

/// The addition chain again, over every supported scalar field.
fn addition_chain_for<F: SolverField>() {
	let nb = 4usize;
	let mut cs = empty_sparse::<F>(1, nb, vec![]);
	for i in 0..nb {
		let input = if i == 0 { public(ONE, 0) } else { internal(ONE, i as u32) };
		cs.constraints.push(SparseR1c {
			l: input,
			o: internal(MINUS_ONE, 1 + i as u32),
			k: CoeffId(ONE),
			..Default::default()
		});
	}
	cs.levels = (0..nb).map(|i| vec![i]).collect();
	cs.validate().unwrap();

	let values = cs.solve(&[F::from(10u64)], SolverOptions::new()).unwrap();
	assert_eq!(values[nb], F::from(10u64 + nb as u64));
}

#[test]
fn every_supported_curve_solves() {
	addition_chain_for::<ark_bn254::Fr>();
	addition_chain_for::<ark_bls12_377::Fr>();
	addition_chain_for::<ark_bls12_381::Fr>();
	addition_chain_for::<ark_bls24_317::Fr>();
	addition_chain_for::<ark_bw6_761::Fr>();
	addition_chain_for::<ark_mnt4_298::Fr>();
}
