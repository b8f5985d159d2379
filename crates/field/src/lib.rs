// Copyright 2025 Glyph Contributors

//! Prime-field arithmetic for the glyph proof system.
//!
//! The whole protocol layer is generic over nothing: it works over the single
//! 64-bit field [`Fp`] defined here. The modulus is the Goldilocks prime
//! `p = 2^64 - 2^32 + 1`, chosen for its cheap reduction on 64-bit targets.

mod batch_invert;
mod fp;

pub use batch_invert::batch_invert;
pub use fp::Fp;
