// Copyright 2025 Irreducible Inc.
//! The scalar-field capability bundle the solvers are generic over.

use ark_ff::PrimeField;

use crate::curve::CurveId;

/// Scalar field of one of the supported curves.
///
/// Everything the per-constraint arithmetic needs (addition, multiplication,
/// inversion, batch inversion, equality) already comes with [`PrimeField`];
/// implementations only pin the runtime [`CurveId`] so monomorphized code
/// can be reached from curve-generic entry points. The solvers are generic
/// over this trait rather than dynamically dispatched so the hot inner loop
/// inlines.
pub trait SolverField: PrimeField {
	/// The curve this scalar field belongs to.
	const CURVE: CurveId;
}

impl SolverField for ark_bn254::Fr {
	const CURVE: CurveId = CurveId::Bn254;
}

impl SolverField for ark_bls12_377::Fr {
	const CURVE: CurveId = CurveId::Bls12_377;
}

impl SolverField for ark_bls12_381::Fr {
	const CURVE: CurveId = CurveId::Bls12_381;
}

impl SolverField for ark_bls24_317::Fr {
	const CURVE: CurveId = CurveId::Bls24_317;
}

impl SolverField for ark_bw6_761::Fr {
	const CURVE: CurveId = CurveId::Bw6_761;
}

impl SolverField for ark_mnt4_298::Fr {
	const CURVE: CurveId = CurveId::Mnt4_298;
}
