// Copyright 2025 Irreducible Inc.
//! Runtime identifiers for the supported scalar fields.

use std::fmt;

use ark_ff::PrimeField;

/// Identifies the pairing-friendly curve whose scalar field a constraint
/// system is compiled over.
///
/// All per-element arithmetic is monomorphized over [`SolverField`]; this
/// enum only exists so that curve-generic entry points (witness parsing,
/// hint callbacks) can dispatch at runtime, via [`with_curve_field!`].
///
/// [`SolverField`]: crate::field::SolverField
/// [`with_curve_field!`]: crate::with_curve_field
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CurveId {
	/// BN254, the Ethereum precompile curve.
	Bn254,
	/// BLS12-377, inner curve of the BW6-761 two-chain.
	Bls12_377,
	/// BLS12-381.
	Bls12_381,
	/// BLS24-317.
	Bls24_317,
	/// BW6-761, outer curve over BLS12-377.
	Bw6_761,
	/// MNT4-298, half of the MNT recursion cycle.
	Mnt4_298,
}

impl CurveId {
	/// Every curve known to the toolchain.
	pub const ALL: [CurveId; 6] = [
		CurveId::Bn254,
		CurveId::Bls12_377,
		CurveId::Bls12_381,
		CurveId::Bls24_317,
		CurveId::Bw6_761,
		CurveId::Mnt4_298,
	];

	/// Human readable curve name.
	pub fn name(self) -> &'static str {
		match self {
			CurveId::Bn254 => "BN254",
			CurveId::Bls12_377 => "BLS12-377",
			CurveId::Bls12_381 => "BLS12-381",
			CurveId::Bls24_317 => "BLS24-317",
			CurveId::Bw6_761 => "BW6-761",
			CurveId::Mnt4_298 => "MNT4-298",
		}
	}

	/// Size in bytes of one canonical scalar-field element of this curve.
	pub fn fr_byte_len(self) -> usize {
		crate::with_curve_field!(self, F => (F::MODULUS_BIT_SIZE as usize).div_ceil(8))
	}
}

impl fmt::Display for CurveId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Monomorphizes an expression over the scalar field of a runtime
/// [`CurveId`].
///
/// `$f` is bound to the concrete `Fr` type in each arm:
///
/// ```
/// use strata_core::{with_curve_field, CurveId};
///
/// let len = with_curve_field!(CurveId::Bn254, F => std::mem::size_of::<F>());
/// assert_eq!(len, 32);
/// ```
#[macro_export]
macro_rules! with_curve_field {
	($curve:expr, $f:ident => $body:expr) => {
		match $curve {
			$crate::curve::CurveId::Bn254 => {
				type $f = ::ark_bn254::Fr;
				$body
			}
			$crate::curve::CurveId::Bls12_377 => {
				type $f = ::ark_bls12_377::Fr;
				$body
			}
			$crate::curve::CurveId::Bls12_381 => {
				type $f = ::ark_bls12_381::Fr;
				$body
			}
			$crate::curve::CurveId::Bls24_317 => {
				type $f = ::ark_bls24_317::Fr;
				$body
			}
			$crate::curve::CurveId::Bw6_761 => {
				type $f = ::ark_bw6_761::Fr;
				$body
			}
			$crate::curve::CurveId::Mnt4_298 => {
				type $f = ::ark_mnt4_298::Fr;
				$body
			}
		}
	};
}
