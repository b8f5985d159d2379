// Copyright 2025 Glyph Contributors

//! Protocol layer of the glyph proof system.
//!
//! The crate is organized around a [`constraint_system::ConstraintSystem`]:
//! a round-structured description of committed columns, verifier coins,
//! algebraic constraints, and opening queries. High-level relations, such as
//! table-inclusion queries, are declared against the constraint system and
//! then lowered by compilers into that committed vocabulary.
//!
//! The flagship compiler lives in [`lookup`]: it reduces every pending
//! inclusion query to the log-derivative sum argument, committing only a
//! handful of multiplicity and running-sum columns per lookup table.

pub mod constraint_system;
pub mod expression;
pub mod lookup;
pub mod runtime;
