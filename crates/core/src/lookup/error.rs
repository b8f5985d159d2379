// Copyright 2025 Glyph Contributors

use glyph_field::Fp;

/// Fatal prover-side failures raised while counting multiplicities.
///
/// Both variants mean the inclusion claim itself is false or malformed, so
/// proof generation aborts: no amount of retrying can change the truth value
/// of the constraint.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("row {row} of checked table #{checked} has no match in lookup table {table}")]
	MissingInTable {
		table: String,
		checked: usize,
		row: usize,
	},

	#[error("filter column {filter} has a non-binary value {value} at row {row}")]
	NonBinaryFilter {
		filter: String,
		row: usize,
		value: Fp,
	},
}
