// Copyright 2025 Glyph Contributors

use glyph_field::Fp;

/// Failures reported while verifying a proof.
///
/// Verification never panics on witness-dependent data; every mismatch is
/// surfaced as a value of this type and folded into the overall "invalid
/// proof" outcome.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
	#[error("column {name} has {got} rows in the proof, expected {expected}")]
	ColumnSizeMismatch {
		name: String,
		expected: usize,
		got: usize,
	},

	#[error("precomputed column {name} does not match its declared values")]
	PrecomputedMismatch { name: String },

	#[error("opening {name} claims {claimed} but column row holds {actual}")]
	OpeningMismatch {
		name: String,
		claimed: Fp,
		actual: Fp,
	},

	#[error("constraint {name} is not satisfied at row {row}")]
	ConstraintNotSatisfied { name: String, row: usize },

	#[error("log-derivative sum mismatch: expected {expected}, summed openings give {got}")]
	LogDerivativeSumMismatch { expected: Fp, got: Fp },

	#[error("proof shape mismatch: {0}")]
	ProofShape(String),
}
