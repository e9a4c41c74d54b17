// Copyright 2025 Irreducible Inc.
//! Witness vectors.

use bytes::{Buf, BufMut};

use crate::{
	field::SolverField,
	serialization::{
		read_field_element, write_field_element, DeserializeBytes, SerializationError,
		SerializeBytes,
	},
};

/// Assignments to the input wires, in `[public | secret]` order.
///
/// This is the dense prefix of the value vector a solve call starts from;
/// its length must equal `nb_public + nb_secret` of the constraint system
/// it is fed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witness<F: SolverField>(pub Vec<F>);

impl<F: SolverField> Witness<F> {
	/// Wraps a dense assignment vector.
	pub fn new(values: Vec<F>) -> Self {
		Witness(values)
	}

	/// The assignments as a slice.
	pub fn as_slice(&self) -> &[F] {
		&self.0
	}

	/// Number of assigned wires.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the witness assigns no wires.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<F: SolverField> From<Vec<F>> for Witness<F> {
	fn from(values: Vec<F>) -> Self {
		Witness(values)
	}
}

impl<F: SolverField> SerializeBytes for Witness<F> {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
		self.0.len().serialize(&mut write_buf)?;
		for value in &self.0 {
			write_field_element(value, &mut write_buf)?;
		}
		Ok(())
	}
}

impl<F: SolverField> DeserializeBytes for Witness<F> {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
		let len = usize::deserialize(&mut read_buf)?;
		let mut values = Vec::with_capacity(len);
		for _ in 0..len {
			values.push(read_field_element(&mut read_buf)?);
		}
		Ok(Witness(values))
	}
}

#[cfg(test)]
mod tests {
	use ark_bn254::Fr;

	use super::*;

	#[test]
	fn witness_round_trip() {
		let witness = Witness::new(vec![Fr::from(5u64), Fr::from(0u64), Fr::from(u64::MAX)]);
		let mut buf = Vec::new();
		witness.serialize(&mut buf).unwrap();
		assert_eq!(buf.len(), 4 + 3 * 32);

		let back = Witness::<Fr>::deserialize(buf.as_slice()).unwrap();
		assert_eq!(witness, back);
	}
}
