// Copyright 2025 Glyph Contributors

use std::sync::Arc;

use glyph_field::Fp;
use rand::Rng;
use tracing::debug_span;

use crate::{
	constraint_system::{ClaimId, CoinId, ColumnId, ConstraintSystem, OpeningId},
	expression::EvalContext,
};

/// The output of a proving run.
///
/// Columns are carried in the clear: committing to them is the job of a
/// downstream polynomial-commitment layer, which this crate treats as an
/// external collaborator.
#[derive(Clone, Debug)]
pub struct Proof {
	/// Assignment of every column, indexed by [`ColumnId`].
	pub columns: Vec<Vec<Fp>>,
	/// Sampled value of every coin, indexed by [`CoinId`].
	pub coins: Vec<Fp>,
	/// Value of every local opening, indexed by [`OpeningId`].
	pub openings: Vec<Fp>,
	/// Claimed total of every log-derivative sum claim, indexed by
	/// [`ClaimId`].
	pub claimed_sums: Vec<Fp>,
}

/// Mutable state of one proving run.
pub struct ProverRuntime<'cs> {
	pub cs: &'cs ConstraintSystem,
	columns: Vec<Option<Arc<Vec<Fp>>>>,
	coins: Vec<Option<Fp>>,
	openings: Vec<Option<Fp>>,
	claimed_sums: Vec<Option<Fp>>,
	round: usize,
}

impl<'cs> ProverRuntime<'cs> {
	fn new(cs: &'cs ConstraintSystem) -> Self {
		let mut columns = vec![None; cs.columns.len()];
		for (id, info) in cs.columns.iter() {
			if let Some(values) = &info.precomputed {
				columns[id] = Some(values.clone());
			}
		}
		Self {
			cs,
			columns,
			coins: vec![None; cs.coins.len()],
			openings: vec![None; cs.local_openings.len()],
			claimed_sums: vec![None; cs.log_derivative_sums.len()],
			round: 0,
		}
	}

	/// The round currently being proven.
	pub fn round(&self) -> usize {
		self.round
	}

	/// Assigns the witness of a committed column. Assigning twice, assigning
	/// a precomputed column, or assigning the wrong number of rows is a bug
	/// in the calling prover and panics.
	pub fn assign_column(&mut self, id: ColumnId, values: Vec<Fp>) {
		let info = self.cs.columns.info(id);
		assert!(info.is_committed(), "cannot assign precomputed column {}", info.name);
		assert_eq!(values.len(), info.size, "wrong size for column {}", info.name);
		assert!(
			self.columns[id].is_none(),
			"column {} is already assigned",
			info.name,
		);
		self.columns[id] = Some(Arc::new(values));
	}

	/// The current witness of a column. Panics when the column has not been
	/// assigned yet, since that means the round scheduling is broken.
	pub fn column(&self, id: ColumnId) -> Arc<Vec<Fp>> {
		self.columns[id]
			.clone()
			.unwrap_or_else(|| panic!("column {} is not assigned", self.cs.columns.name_of(id)))
	}

	/// The sampled value of a coin whose round has been reached.
	pub fn coin(&self, id: CoinId) -> Fp {
		self.coins[id]
			.unwrap_or_else(|| panic!("coin {} is not sampled yet", self.cs.coins.info(id).name))
	}

	/// The value of an already-assigned local opening.
	pub fn opening(&self, id: OpeningId) -> Fp {
		self.openings[id].unwrap_or_else(|| {
			panic!("opening {} is not assigned", self.cs.local_openings[id].name)
		})
	}

	pub fn assign_local_opening(&mut self, id: OpeningId, value: Fp) {
		assert!(
			self.openings[id].is_none(),
			"opening {} is already assigned",
			self.cs.local_openings[id].name,
		);
		self.openings[id] = Some(value);
	}

	pub fn assign_claimed_sum(&mut self, id: ClaimId, value: Fp) {
		assert!(
			self.claimed_sums[id].is_none(),
			"claim {} is already assigned",
			self.cs.log_derivative_sums[id].name,
		);
		self.claimed_sums[id] = Some(value);
	}

	fn sample_coins(&mut self, round: usize, rng: &mut impl Rng) {
		for (id, info) in self.cs.coins.iter() {
			if info.round == round {
				self.coins[id] = Some(rng.gen());
			}
		}
	}

	fn into_proof(self) -> Proof {
		let columns = self
			.columns
			.into_iter()
			.enumerate()
			.map(|(id, values)| {
				values
					.map(|v| v.as_ref().clone())
					.unwrap_or_else(|| {
						panic!("column {} was never assigned", self.cs.columns.name_of(id))
					})
			})
			.collect();
		let openings = self
			.openings
			.into_iter()
			.enumerate()
			.map(|(id, value)| {
				value.unwrap_or_else(|| {
					panic!("opening {} was never assigned", self.cs.local_openings[id].name)
				})
			})
			.collect();
		let claimed_sums = self
			.claimed_sums
			.into_iter()
			.enumerate()
			.map(|(id, value)| {
				value.unwrap_or_else(|| {
					panic!("claim {} was never assigned", self.cs.log_derivative_sums[id].name)
				})
			})
			.collect();
		Proof {
			columns,
			coins: self
				.coins
				.into_iter()
				.map(|coin| coin.expect("every round was walked"))
				.collect(),
			openings,
			claimed_sums,
		}
	}
}

impl EvalContext for ProverRuntime<'_> {
	fn column_value(&self, id: ColumnId, row: usize) -> Fp {
		self.columns[id]
			.as_ref()
			.unwrap_or_else(|| panic!("column {} is not assigned", self.cs.columns.name_of(id)))[row]
	}

	fn coin_value(&self, id: CoinId) -> Fp {
		self.coin(id)
	}
}

/// Runs the prover: `main` assigns the caller's own columns at round 0, and
/// the actions registered by compilers run at their scheduled rounds.
///
/// Coins are sampled at the opening of their round, after every column of
/// the previous rounds has been assigned. The transcript mechanics that
/// would make this non-interactive live outside this crate, so the sampled
/// values travel with the proof.
pub fn prove(
	cs: &ConstraintSystem,
	main: impl FnOnce(&mut ProverRuntime<'_>),
) -> anyhow::Result<Proof> {
	let mut rng = rand::thread_rng();
	let mut run = ProverRuntime::new(cs);
	let mut main = Some(main);

	for round in 0..cs.num_rounds() {
		let _span = debug_span!("prover_round", round).entered();
		run.round = round;
		run.sample_coins(round, &mut rng);
		if round == 0 {
			(main.take().expect("round 0 runs once"))(&mut run);
		}
		for action in cs.prover_actions_at(round) {
			action.run(&mut run)?;
		}
	}

	Ok(run.into_proof())
}
