// Copyright 2025 Glyph Contributors

use std::collections::HashMap;

use glyph_field::Fp;
use itertools::Itertools;

use crate::constraint_system::{ColumnId, ConstraintSystem};

/// The including side of an inclusion claim, after normalization: an ordered
/// list of fragments of identical width.
#[derive(Clone, Debug)]
pub struct LookupTable {
	pub fragments: Vec<Vec<ColumnId>>,
}

/// One checked (included) table, with its optional row filter.
#[derive(Clone, Debug)]
pub struct CheckedTable {
	pub columns: Vec<ColumnId>,
	pub filter: Option<ColumnId>,
}

/// Everything captured about one lookup table: the table itself, every
/// checked table claimed to be included in it, and the latest round at which
/// any of those claims was declared.
#[derive(Clone, Debug)]
pub struct CapturedTable {
	pub name: String,
	pub table: LookupTable,
	pub checked: Vec<CheckedTable>,
	pub round: usize,
}

/// Scans every still-pending inclusion query, marks it compiled, and groups
/// the queries by canonical table identity.
///
/// Filters on the including side are absorbed here: the filter column is
/// prepended to every fragment and a constant-one column is prepended to the
/// checked side. A filtered-out table row then reads `(0, …)` while every
/// active checked row reads `(1, …)`, so the rest of the pipeline only ever
/// sees unconditional inclusion over the augmented table.
///
/// Re-invoking capture on an already-compiled query set is a no-op.
pub fn capture_tables(cs: &mut ConstraintSystem) -> Vec<CapturedTable> {
	let mut captured: Vec<CapturedTable> = Vec::new();
	let mut by_name: HashMap<String, usize> = HashMap::new();

	for idx in 0..cs.inclusions.len() {
		if cs.inclusions[idx].compiled {
			continue;
		}
		cs.inclusions[idx].compiled = true;
		let query = cs.inclusions[idx].clone();

		let (fragments, checked_columns) = match &query.including_filter {
			Some(filters) => {
				let fragments = query
					.including
					.iter()
					.zip(filters)
					.map(|(frag, &filter)| {
						let mut augmented = Vec::with_capacity(frag.len() + 1);
						augmented.push(filter);
						augmented.extend_from_slice(frag);
						augmented
					})
					.collect_vec();
				let included_size = cs.columns.size_of(query.included[0]);
				let ones = ones_column(cs, included_size);
				let mut checked = Vec::with_capacity(query.included.len() + 1);
				checked.push(ones);
				checked.extend_from_slice(&query.included);
				(fragments, checked)
			}
			None => (query.including.clone(), query.included.clone()),
		};

		let name = table_name(cs, &fragments);
		let slot = *by_name.entry(name.clone()).or_insert_with(|| {
			captured.push(CapturedTable {
				name,
				table: LookupTable { fragments },
				checked: Vec::new(),
				round: 0,
			});
			captured.len() - 1
		});
		captured[slot].checked.push(CheckedTable {
			columns: checked_columns,
			filter: query.included_filter,
		});
		captured[slot].round = captured[slot].round.max(query.round);
	}

	captured
}

/// Canonical identity of a lookup table, derived from its column names.
/// Queries against the same columns in the same fragment layout share one
/// compiled table.
fn table_name(cs: &ConstraintSystem, fragments: &[Vec<ColumnId>]) -> String {
	let joined = fragments
		.iter()
		.map(|frag| frag.iter().map(|&col| cs.columns.name_of(col)).join("_"))
		.join("__");
	format!("TABLE_{joined}")
}

/// Fetches or declares the shared constant-one column of a given size.
fn ones_column(cs: &mut ConstraintSystem, size: usize) -> ColumnId {
	let name = format!("LOOKUP_ONES_{size}");
	match cs.columns.id_of(&name) {
		Some(id) => id,
		None => cs.insert_precomputed(name, vec![Fp::ONE; size]),
	}
}
