// Copyright 2025 Glyph Contributors

//! Prover and verifier runtimes.
//!
//! The prover runtime walks the rounds of a [`crate::constraint_system::ConstraintSystem`],
//! sampling the round's coins and running the round's registered actions,
//! and finally emits a [`Proof`]. The commitment scheme is out of scope for
//! this crate, so the proof carries the committed columns directly; the
//! verifier re-derives every check from them.

mod prover;
mod verifier;

pub use prover::{prove, Proof, ProverRuntime};
pub use verifier::{verify, VerifierRuntime};
