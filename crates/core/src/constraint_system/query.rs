// Copyright 2025 Glyph Contributors

use crate::expression::Expression;

use super::column::ColumnId;

/// Identifier for a local-opening query.
pub type OpeningId = usize;

/// Identifier for a [`LogDerivativeSumClaim`].
pub type ClaimId = usize;

/// A query binding the value of one column at one specific row. The prover
/// assigns the value during proving; the verifier reads it from the proof.
#[derive(Clone, Debug)]
pub struct LocalOpening {
	pub name: String,
	pub round: usize,
	pub column: ColumnId,
	pub row: usize,
}

/// A not-yet-compiled table-inclusion query: every row of `included`
/// (where `included_filter` is 1, if present) must appear as a row of one of
/// the `including` fragments (where that fragment's filter is 1, if present).
#[derive(Clone, Debug)]
pub struct Inclusion {
	pub name: String,
	pub round: usize,
	/// The including table, as a list of fragments of identical width.
	pub including: Vec<Vec<ColumnId>>,
	pub included: Vec<ColumnId>,
	/// One optional filter column per fragment of `including`.
	pub including_filter: Option<Vec<ColumnId>>,
	pub included_filter: Option<ColumnId>,
	/// Set once a compiler has consumed the query. Compiled queries are
	/// skipped by later compilation passes.
	pub compiled: bool,
}

/// One rational term `num / den` of a log-derivative sum, defined over
/// `size` rows.
#[derive(Clone, Debug)]
pub struct LogDerivativeSumPart {
	/// Row count; must be a power of two.
	pub size: usize,
	pub num: Expression,
	pub den: Expression,
}

/// A standalone claim that `Σ_parts Σ_rows num/den` equals a prover-assigned
/// parameter. This is the general-purpose primitive behind the lookup
/// compiler's zero-sum instantiation.
#[derive(Clone, Debug)]
pub struct LogDerivativeSumClaim {
	pub name: String,
	pub round: usize,
	pub parts: Vec<LogDerivativeSumPart>,
	pub compiled: bool,
}
