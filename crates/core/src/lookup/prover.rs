// Copyright 2025 Glyph Contributors

use std::{collections::HashMap, iter, sync::Arc};

use glyph_field::{batch_invert, Fp};
use rand::{rngs::OsRng, Rng};
use rayon::prelude::*;
use tracing::trace;

use super::{
	capture::{CheckedTable, LookupTable},
	error::Error,
	packing::ZCtx,
};
use crate::{
	constraint_system::{ColumnId, OpeningId, ProverAction},
	runtime::ProverRuntime,
};

/// Restricts which rows of a column carry meaningful data.
///
/// The returned `[start, end)` range may extend past the column on either
/// side; out-of-range positions stand for repetitions of the nearest real
/// row. Rows of a checked table outside the range are not looked up at all.
pub trait ColumnSegmenter: Send + Sync {
	fn segment_of(&self, run: &ProverRuntime<'_>, column: ColumnId) -> (isize, isize);
}

/// Counts, for every row of one lookup table, how many checked-table rows
/// equal it.
///
/// Rows are compared through a keyed collapse: each row maps to
/// `Σ_k col_k · r^k` for a fresh coefficient `r` drawn from the OS entropy
/// source at proving time. The coefficient only ever feeds this private
/// counting pass, so it is deliberately not a verifier coin: a collision
/// would yield a wrong M that the Z argument then rejects.
pub struct MAssignmentTask {
	pub table: String,
	pub m: Vec<ColumnId>,
	pub fragments: Vec<Vec<ColumnId>>,
	pub checked: Vec<CheckedTable>,
	pub segmenter: Option<Arc<dyn ColumnSegmenter>>,
}

impl MAssignmentTask {
	pub fn new(
		table: String,
		m: Vec<ColumnId>,
		fragments: &LookupTable,
		checked: Vec<CheckedTable>,
		segmenter: Option<Arc<dyn ColumnSegmenter>>,
	) -> Self {
		Self {
			table,
			m,
			fragments: fragments.fragments.clone(),
			checked,
			segmenter,
		}
	}

	/// Computes the multiplicity vectors, one per fragment. Does not write
	/// into the runtime; the caller applies the result after every parallel
	/// task of the round has finished.
	pub fn compute(&self, run: &ProverRuntime<'_>) -> Result<Vec<Vec<Fp>>, Error> {
		let width = self.fragments[0].len();
		let collapse_coeff: Fp = if width > 1 { OsRng.gen() } else { Fp::ONE };

		// Map each table row to its (fragment, row) position. The first
		// occurrence of a duplicated row absorbs every match.
		let mut positions: HashMap<Fp, (usize, usize)> = HashMap::new();
		for (frag_no, frag) in self.fragments.iter().enumerate() {
			let cols: Vec<_> = frag.iter().map(|&id| run.column(id)).collect();
			let size = cols[0].len();
			let (lo, hi) = self.clamped_segment(run, frag[0], size);
			for row in lo..hi {
				let key = collapse_row(&cols, row, collapse_coeff);
				positions.entry(key).or_insert((frag_no, row));
			}
		}

		let mut mults: Vec<Vec<Fp>> = self
			.fragments
			.iter()
			.map(|frag| vec![Fp::ZERO; run.cs.columns.size_of(frag[0])])
			.collect();

		for (checked_no, checked) in self.checked.iter().enumerate() {
			let cols: Vec<_> = checked.columns.iter().map(|&id| run.column(id)).collect();
			let filter = checked.filter.map(|id| run.column(id));
			let size = cols[0].len();

			let (start, end) = match &self.segmenter {
				Some(segmenter) => segmenter.segment_of(run, checked.columns[0]),
				None => (0, size as isize),
			};
			let (lo, hi) = clamp_segment(start, end, size);

			for row in lo..hi {
				if let Some(filter) = &filter {
					let flag = filter[row];
					if flag.is_zero() {
						continue;
					}
					if flag != Fp::ONE {
						return Err(Error::NonBinaryFilter {
							filter: run
								.cs
								.columns
								.name_of(checked.filter.expect("filter column present"))
								.to_string(),
							row,
							value: flag,
						});
					}
					// Filtered tables pad with inactive rows, so segment
					// overhang never repeats a counted row.
				}

				// Rows hanging over either end of the column repeat the
				// nearest real row, which counts once per repetition.
				let mut count = 1u64;
				if filter.is_none() {
					if row == lo && start < 0 {
						count += (-start) as u64;
					}
					if row + 1 == hi && end > size as isize {
						count += (end as usize - size) as u64;
					}
				}

				let key = collapse_row(&cols, row, collapse_coeff);
				let Some(&(frag_no, table_row)) = positions.get(&key) else {
					return Err(Error::MissingInTable {
						table: self.table.clone(),
						checked: checked_no,
						row,
					});
				};
				mults[frag_no][table_row] += Fp::from(count);
			}
		}

		trace!(table = %self.table, "computed lookup multiplicities");
		Ok(mults)
	}

	fn clamped_segment(
		&self,
		run: &ProverRuntime<'_>,
		column: ColumnId,
		size: usize,
	) -> (usize, usize) {
		let (start, end) = match &self.segmenter {
			Some(segmenter) => segmenter.segment_of(run, column),
			None => (0, size as isize),
		};
		clamp_segment(start, end, size)
	}
}

fn clamp_segment(start: isize, end: isize, size: usize) -> (usize, usize) {
	let lo = start.clamp(0, size as isize) as usize;
	let hi = end.clamp(0, size as isize) as usize;
	(lo, hi.max(lo))
}

fn collapse_row(cols: &[Arc<Vec<Fp>>], row: usize, coeff: Fp) -> Fp {
	cols.iter()
		.rev()
		.fold(Fp::ZERO, |acc, col| acc * coeff + col[row])
}

/// The witness of one Z bundle, ready to be written into the runtime.
pub struct ZAssignment {
	pub z: ColumnId,
	pub values: Vec<Fp>,
	pub opening: OpeningId,
	pub final_value: Fp,
}

impl ZCtx {
	/// Evaluates the running sum `Z(k) = Σ_{i≤k} Σ_j num_j(i)/den_j(i)`.
	/// Denominators are inverted in one batch per part.
	pub fn compute(&self, run: &ProverRuntime<'_>) -> ZAssignment {
		let mut ratios = vec![Fp::ZERO; self.size];
		for part in &self.parts {
			let dens = part.den.eval_column(self.size, run);
			let inverses = batch_invert(&dens);
			let nums = part.num.eval_column(self.size, run);
			for ((ratio, num), inv) in iter::zip(iter::zip(&mut ratios, nums), inverses) {
				*ratio += num * inv;
			}
		}

		let mut acc = Fp::ZERO;
		let values: Vec<Fp> = ratios
			.into_iter()
			.map(|ratio| {
				acc += ratio;
				acc
			})
			.collect();

		ZAssignment {
			z: self.z,
			values,
			opening: self.opening,
			final_value: acc,
		}
	}
}

/// Every lookup-related prover task scheduled at one round: multiplicity
/// assignments first, running-sum assignments second.
///
/// Each phase computes over the immutable runtime in parallel, then applies
/// its outputs sequentially. Failures surface one at a time, always the
/// failure of the lowest-indexed task, so a run over a broken witness
/// reports the same error on every execution.
pub struct ProverTaskAtRound {
	pub m_tasks: Vec<MAssignmentTask>,
	pub z_tasks: Vec<ZCtx>,
}

impl ProverAction for ProverTaskAtRound {
	fn run(&self, run: &mut ProverRuntime<'_>) -> anyhow::Result<()> {
		let shared: &ProverRuntime<'_> = run;
		let m_outputs = self
			.m_tasks
			.par_iter()
			.map(|task| task.compute(shared))
			.collect::<Vec<_>>()
			.into_iter()
			.collect::<Result<Vec<_>, Error>>()?;
		for (task, mults) in iter::zip(&self.m_tasks, m_outputs) {
			for (&id, values) in iter::zip(&task.m, mults) {
				run.assign_column(id, values);
			}
		}

		let shared: &ProverRuntime<'_> = run;
		let z_outputs: Vec<ZAssignment> = self
			.z_tasks
			.par_iter()
			.map(|task| task.compute(shared))
			.collect();
		for assignment in z_outputs {
			run.assign_column(assignment.z, assignment.values);
			run.assign_local_opening(assignment.opening, assignment.final_value);
		}

		Ok(())
	}
}

/// Assigns a claimed-sum parameter as the total of the final-row openings
/// backing it. Runs after the task that assigns those openings.
pub struct ClaimTotalTask {
	pub claim: usize,
	pub openings: Vec<OpeningId>,
}

impl ProverAction for ClaimTotalTask {
	fn run(&self, run: &mut ProverRuntime<'_>) -> anyhow::Result<()> {
		let total = self.openings.iter().map(|&id| run.opening(id)).sum();
		run.assign_claimed_sum(self.claim, total);
		Ok(())
	}
}
