// Copyright 2025 Glyph Contributors

use std::{collections::BTreeMap, sync::Arc};

use tracing::{debug, instrument};

use super::{
	capture::{capture_tables, CapturedTable},
	packing::{ZCatalog, DEFAULT_PACKING_ARITY},
	prover::{ColumnSegmenter, MAssignmentTask, ProverTaskAtRound},
	verifier::{Expected, FinalSumCheck},
};
use crate::{
	constraint_system::{CoinId, ColumnId, ConstraintSystem, LogDerivativeSumPart},
	expression::Expression,
};

/// The compiled protocol surface of one lookup table: the coins that collapse
/// and shift its rows, the multiplicity columns, and the collapsed row
/// expressions of both sides.
struct SingleTableCtx {
	name: String,
	round: usize,
	m: Vec<ColumnId>,
	gamma: CoinId,
	t: Vec<Expression>,
	t_sizes: Vec<usize>,
	s: Vec<Expression>,
	s_sizes: Vec<usize>,
	s_filter: Vec<Option<ColumnId>>,
}

impl SingleTableCtx {
	/// Declares everything the table contributes to the constraint system.
	///
	/// The multiplicity columns land at the table's own round so their values
	/// cannot depend on any coin. Gamma, and Alpha for tables wider than one
	/// column, are sampled one round later, after every column feeding the
	/// argument is fixed.
	fn new(cs: &mut ConstraintSystem, cap: &CapturedTable) -> Self {
		let name = &cap.name;
		let round = cap.round;
		let width = cap.table.fragments[0].len();

		let alpha =
			(width > 1).then(|| cs.insert_coin(round + 1, format!("{name}_ALPHA")));
		let gamma = cs.insert_coin(round + 1, format!("{name}_GAMMA"));

		let collapse = |cols: &[ColumnId]| match alpha {
			Some(alpha) => Expression::random_linear_combination(alpha, cols),
			None => Expression::column(cols[0]),
		};

		let mut m = Vec::with_capacity(cap.table.fragments.len());
		let mut t = Vec::with_capacity(cap.table.fragments.len());
		let mut t_sizes = Vec::with_capacity(cap.table.fragments.len());
		for (frag_no, frag) in cap.table.fragments.iter().enumerate() {
			let size = cs.columns.size_of(frag[0]);
			m.push(cs.insert_commit(round, format!("{name}_M_{frag_no}"), size));
			t.push(collapse(frag));
			t_sizes.push(size);
		}

		let mut s = Vec::with_capacity(cap.checked.len());
		let mut s_sizes = Vec::with_capacity(cap.checked.len());
		let mut s_filter = Vec::with_capacity(cap.checked.len());
		for checked in &cap.checked {
			s.push(collapse(&checked.columns));
			s_sizes.push(cs.columns.size_of(checked.columns[0]));
			s_filter.push(checked.filter);
		}

		Self {
			name: name.clone(),
			round,
			m,
			gamma,
			t,
			t_sizes,
			s,
			s_sizes,
			s_filter,
		}
	}

	/// Feeds the table's rational terms into the shared catalog. T-side terms
	/// contribute `-M / (Gamma + T)` and each checked table contributes
	/// `filter / (Gamma + S)`, so the grand total telescopes to zero exactly
	/// when every active checked row appears in the table.
	fn push_parts(&self, catalog: &mut ZCatalog) {
		let gamma = Expression::coin(self.gamma);

		for (frag_no, t) in self.t.iter().enumerate() {
			catalog.push(
				self.round + 1,
				LogDerivativeSumPart {
					size: self.t_sizes[frag_no],
					num: -Expression::column(self.m[frag_no]),
					den: gamma.clone() + t.clone(),
				},
			);
		}

		for (checked_no, s) in self.s.iter().enumerate() {
			let num = match self.s_filter[checked_no] {
				Some(filter) => Expression::column(filter),
				None => Expression::one(),
			};
			catalog.push(
				self.round + 1,
				LogDerivativeSumPart {
					size: self.s_sizes[checked_no],
					num,
					den: gamma.clone() + s.clone(),
				},
			);
		}
	}

	fn m_assignment_task(
		&self,
		cap: &CapturedTable,
		segmenter: Option<Arc<dyn ColumnSegmenter>>,
	) -> MAssignmentTask {
		MAssignmentTask::new(
			self.name.clone(),
			self.m.clone(),
			&cap.table,
			cap.checked.clone(),
			segmenter,
		)
	}
}

/// Compiles every pending inclusion query into a log-derivative argument.
pub struct LookupCompiler {
	pub packing_arity: usize,
	pub segmenter: Option<Arc<dyn ColumnSegmenter>>,
}

impl Default for LookupCompiler {
	fn default() -> Self {
		Self {
			packing_arity: DEFAULT_PACKING_ARITY,
			segmenter: None,
		}
	}
}

impl LookupCompiler {
	#[instrument(skip_all, level = "debug")]
	pub fn compile(&self, cs: &mut ConstraintSystem) {
		let captured = capture_tables(cs);
		if captured.is_empty() {
			return;
		}

		let mut catalog = ZCatalog::new(self.packing_arity);
		let mut m_tasks: BTreeMap<usize, Vec<MAssignmentTask>> = BTreeMap::new();

		for cap in &captured {
			debug!(table = %cap.name, checked = cap.checked.len(), "compiling lookup table");
			let ctx = SingleTableCtx::new(cs, cap);
			ctx.push_parts(&mut catalog);
			m_tasks
				.entry(cap.round)
				.or_default()
				.push(ctx.m_assignment_task(cap, self.segmenter.clone()));
		}

		let (mut bundles, openings) = catalog.compile(cs, "LOOKUP");

		let rounds: Vec<usize> = m_tasks
			.keys()
			.chain(bundles.keys())
			.copied()
			.collect::<std::collections::BTreeSet<_>>()
			.into_iter()
			.collect();
		for round in rounds {
			let task = ProverTaskAtRound {
				m_tasks: m_tasks.remove(&round).unwrap_or_default(),
				z_tasks: bundles.remove(&round).unwrap_or_default(),
			};
			cs.register_prover_action(round, Box::new(task));
		}

		let check_round = openings
			.iter()
			.map(|&id| cs.local_openings[id].round)
			.max()
			.expect("at least one table was captured");
		cs.register_verifier_action(
			check_round,
			Box::new(FinalSumCheck {
				openings,
				expected: Expected::Zero,
			}),
		);
	}
}

/// Compiles pending inclusion queries with the default packing arity and no
/// segmenter.
pub fn compile_lookups(cs: &mut ConstraintSystem) {
	LookupCompiler::default().compile(cs)
}
