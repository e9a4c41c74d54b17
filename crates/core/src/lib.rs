// Copyright 2025 Irreducible Inc.
//! Core datatypes shared by the Strata constraint-system solvers.
//!
//! Most importantly it hosts the two compiled constraint-system shapes,
//! [`R1cs`] (rank-1, Groth16-style) and [`SparseR1cs`] (PLONK-style), plus
//! the terms, coefficient-table indices, hint bindings and witness vectors
//! they are made of.

#![warn(missing_docs)]

pub mod constraint;
pub mod curve;
pub mod error;
pub mod field;
pub mod hint;
pub mod log;
pub mod serialization;
pub mod system;
pub mod term;
pub mod witness;

pub use constraint::{LinearExpression, R1c, SparseR1c};
pub use curve::CurveId;
pub use error::ConstraintSystemError;
pub use field::SolverField;
pub use hint::{HintBinding, HintBindings, HintId};
pub use log::LogEntry;
pub use system::{R1cs, SparseR1cs};
pub use term::{CoeffId, Term, Visibility, WireId};
pub use witness::Witness;
