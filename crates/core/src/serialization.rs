// Copyright 2025 Irreducible Inc.
//! Byte-level serialization for the data crossing the witness boundary.
//!
//! Field elements are encoded in canonical (non-Montgomery) little-endian
//! form, [`CurveId::fr_byte_len`] bytes each; decoding rejects
//! non-canonical encodings.
//!
//! [`CurveId::fr_byte_len`]: crate::curve::CurveId::fr_byte_len

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use bytes::{Buf, BufMut};

use crate::field::SolverField;

/// Serialize data into a byte buffer.
pub trait SerializeBytes {
	/// Appends the canonical encoding of `self` to `write_buf`.
	fn serialize(&self, write_buf: impl BufMut) -> Result<(), SerializationError>;
}

/// Deserialize data from a byte buffer.
pub trait DeserializeBytes {
	/// Reads one value off the front of `read_buf`.
	fn deserialize(read_buf: impl Buf) -> Result<Self, SerializationError>
	where
		Self: Sized;
}

/// Errors of the byte-level serialization boundary.
#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, Clone, thiserror::Error)]
pub enum SerializationError {
	#[error("write buffer is full")]
	WriteBufferFull,
	#[error("not enough data in read buffer to deserialize")]
	NotEnoughBytes,
	#[error("byte stream is not a canonical field element")]
	NonCanonicalFieldElement,
	#[error("usize {size} is too large to serialize (max is {max})", max = u32::MAX)]
	UsizeTooLarge { size: usize },
}

impl SerializeBytes for u32 {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
		if write_buf.remaining_mut() < std::mem::size_of::<Self>() {
			return Err(SerializationError::WriteBufferFull);
		}
		write_buf.put_u32_le(*self);
		Ok(())
	}
}

impl DeserializeBytes for u32 {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
		if read_buf.remaining() < std::mem::size_of::<Self>() {
			return Err(SerializationError::NotEnoughBytes);
		}
		Ok(read_buf.get_u32_le())
	}
}

impl SerializeBytes for usize {
	fn serialize(&self, write_buf: impl BufMut) -> Result<(), SerializationError> {
		let value: u32 = (*self)
			.try_into()
			.map_err(|_| SerializationError::UsizeTooLarge { size: *self })?;
		value.serialize(write_buf)
	}
}

impl DeserializeBytes for usize {
	fn deserialize(read_buf: impl Buf) -> Result<Self, SerializationError> {
		let value = u32::deserialize(read_buf)?;
		Ok(value as usize)
	}
}

/// Appends one canonical little-endian field element to `write_buf`.
pub fn write_field_element<F: SolverField>(
	value: &F,
	mut write_buf: impl BufMut,
) -> Result<(), SerializationError> {
	let mut bytes = Vec::with_capacity(F::CURVE.fr_byte_len());
	value
		.serialize_compressed(&mut bytes)
		.map_err(|_| SerializationError::WriteBufferFull)?;
	if write_buf.remaining_mut() < bytes.len() {
		return Err(SerializationError::WriteBufferFull);
	}
	write_buf.put_slice(&bytes);
	Ok(())
}

/// Reads one canonical little-endian field element off the front of
/// `read_buf`.
pub fn read_field_element<F: SolverField>(
	mut read_buf: impl Buf,
) -> Result<F, SerializationError> {
	let len = F::CURVE.fr_byte_len();
	if read_buf.remaining() < len {
		return Err(SerializationError::NotEnoughBytes);
	}
	let mut bytes = vec![0u8; len];
	read_buf.copy_to_slice(&mut bytes);
	F::deserialize_compressed(bytes.as_slice())
		.map_err(|_| SerializationError::NonCanonicalFieldElement)
}
