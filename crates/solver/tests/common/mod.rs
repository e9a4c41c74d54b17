// Copyright 2025 Irreducible Inc.
//! Helpers shared by the solver integration tests.
#![allow(dead_code)] // each test binary uses a different subset

use strata_core::{CoeffId, Term, Visibility, WireId};

pub fn public(coeff: u32, wire: u32) -> Term {
	Term::new(CoeffId(coeff), WireId(wire), Visibility::Public)
}

pub fn internal(coeff: u32, wire: u32) -> Term {
	Term::new(CoeffId(coeff), WireId(wire), Visibility::Internal)
}

pub const ZERO: u32 = 0;
pub const ONE: u32 = 1;
pub const MINUS_ONE: u32 = 2;
pub const TWO: u32 = 3;
