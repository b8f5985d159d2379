// Copyright 2025 Glyph Contributors

//! The compiled description of a protocol: columns, coins, constraints,
//! queries, and the prover/verifier actions scheduled per round.
//!
//! A [`ConstraintSystem`] is built once, mutated only by compilers, and then
//! treated as immutable by the [`crate::runtime`] during proving and
//! verification. All `insert_*` methods enforce their structural contracts
//! with assertions: a shape violation is a bug in the calling compiler, not
//! a property of any witness.

mod coin;
mod column;
mod constraint;
mod error;
mod query;
pub mod validate;

use glyph_field::Fp;

pub use coin::{CoinId, CoinInfo, CoinRegistry};
pub use column::{ColumnId, ColumnInfo, ColumnRegistry};
pub use constraint::{BoundaryConstraint, GlobalConstraint};
pub use error::VerificationError;
pub use query::{
	ClaimId, Inclusion, LocalOpening, LogDerivativeSumClaim, LogDerivativeSumPart, OpeningId,
};

use crate::{
	expression::Expression,
	runtime::{ProverRuntime, VerifierRuntime},
};

/// A prover-side unit of work scheduled at a fixed round.
///
/// Actions registered for the same round may be run in any order by the
/// runtime; they must only write columns, openings, and parameters they
/// exclusively own.
pub trait ProverAction: Send + Sync {
	fn run(&self, run: &mut ProverRuntime<'_>) -> anyhow::Result<()>;
}

/// A verifier-side check scheduled at a fixed round. Never mutates state.
pub trait VerifierAction: Send + Sync {
	fn run(&self, run: &VerifierRuntime<'_>) -> Result<(), VerificationError>;
}

#[derive(Default)]
pub struct ConstraintSystem {
	pub columns: ColumnRegistry,
	pub coins: CoinRegistry,
	pub inclusions: Vec<Inclusion>,
	pub log_derivative_sums: Vec<LogDerivativeSumClaim>,
	pub local_openings: Vec<LocalOpening>,
	pub boundary_constraints: Vec<BoundaryConstraint>,
	pub global_constraints: Vec<GlobalConstraint>,
	prover_actions: Vec<Vec<Box<dyn ProverAction>>>,
	verifier_actions: Vec<Vec<Box<dyn VerifierAction>>>,
}

impl ConstraintSystem {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares a committed column of `size` rows at `round`.
	pub fn insert_commit(
		&mut self,
		round: usize,
		name: impl Into<String>,
		size: usize,
	) -> ColumnId {
		self.columns.insert_committed(round, name, size)
	}

	/// Declares a precomputed column whose assignment is fixed at
	/// declaration time.
	pub fn insert_precomputed(&mut self, name: impl Into<String>, values: Vec<Fp>) -> ColumnId {
		self.columns.insert_precomputed(name, values)
	}

	/// Declares a verifier coin sampled at the opening of `round`.
	pub fn insert_coin(&mut self, round: usize, name: impl Into<String>) -> CoinId {
		self.coins.insert(round, name)
	}

	/// Declares a plain inclusion query: one fragment, no filters.
	pub fn insert_inclusion(
		&mut self,
		round: usize,
		name: impl Into<String>,
		including: Vec<ColumnId>,
		included: Vec<ColumnId>,
	) -> &Inclusion {
		self.insert_fragmented_conditional_inclusion(
			round,
			name,
			vec![including],
			included,
			None,
			None,
		)
	}

	/// Declares the fully general inclusion query: a fragmented including
	/// table with optional per-fragment filters, and an optional filter on
	/// the included side.
	pub fn insert_fragmented_conditional_inclusion(
		&mut self,
		round: usize,
		name: impl Into<String>,
		including: Vec<Vec<ColumnId>>,
		included: Vec<ColumnId>,
		including_filter: Option<Vec<ColumnId>>,
		included_filter: Option<ColumnId>,
	) -> &Inclusion {
		let name = name.into();
		assert!(!including.is_empty(), "inclusion {name} has no fragments");
		let width = including[0].len();
		assert!(width > 0, "inclusion {name} has zero-width fragments");
		for frag in &including {
			assert_eq!(frag.len(), width, "ragged fragments in inclusion {name}");
			let size = self.columns.size_of(frag[0]);
			for &col in frag {
				assert_eq!(self.columns.size_of(col), size, "ragged fragment in inclusion {name}");
			}
		}
		assert_eq!(included.len(), width, "included width mismatch in inclusion {name}");
		let included_size = self.columns.size_of(included[0]);
		for &col in &included {
			assert_eq!(self.columns.size_of(col), included_size, "ragged included table in inclusion {name}");
		}
		if let Some(filters) = &including_filter {
			assert_eq!(filters.len(), including.len(), "one filter per fragment expected in inclusion {name}");
			for (frag, &filter) in including.iter().zip(filters) {
				assert_eq!(
					self.columns.size_of(filter),
					self.columns.size_of(frag[0]),
					"filter size mismatch in inclusion {name}",
				);
			}
		}
		if let Some(filter) = included_filter {
			assert_eq!(
				self.columns.size_of(filter),
				included_size,
				"filter size mismatch in inclusion {name}",
			);
		}

		self.inclusions.push(Inclusion {
			name,
			round,
			including,
			included,
			including_filter,
			included_filter,
			compiled: false,
		});
		self.inclusions.last().expect("just pushed")
	}

	/// Declares a standalone log-derivative sum claim. The claimed total is
	/// a runtime parameter assigned by the prover.
	pub fn insert_log_derivative_sum(
		&mut self,
		round: usize,
		name: impl Into<String>,
		parts: Vec<LogDerivativeSumPart>,
	) -> ClaimId {
		let name = name.into();
		assert!(!parts.is_empty(), "claim {name} has no parts");
		let id = self.log_derivative_sums.len();
		self.log_derivative_sums.push(LogDerivativeSumClaim {
			name,
			round,
			parts,
			compiled: false,
		});
		id
	}

	/// Declares a local opening of `column` at `row`.
	pub fn insert_local_opening(
		&mut self,
		round: usize,
		name: impl Into<String>,
		column: ColumnId,
		row: usize,
	) -> OpeningId {
		assert!(row < self.columns.size_of(column), "opening row out of range");
		let id = self.local_openings.len();
		self.local_openings.push(LocalOpening {
			name: name.into(),
			round,
			column,
			row,
		});
		id
	}

	/// Registers a constraint that must vanish at row 0.
	pub fn insert_boundary(&mut self, round: usize, name: impl Into<String>, expr: Expression) {
		self.boundary_constraints.push(BoundaryConstraint {
			name: name.into(),
			round,
			expr,
		});
	}

	/// Registers a constraint that must vanish at every in-range row.
	pub fn insert_global(&mut self, round: usize, name: impl Into<String>, expr: Expression) {
		self.global_constraints.push(GlobalConstraint {
			name: name.into(),
			round,
			expr,
		});
	}

	pub fn register_prover_action(&mut self, round: usize, action: Box<dyn ProverAction>) {
		if self.prover_actions.len() <= round {
			self.prover_actions.resize_with(round + 1, Vec::new);
		}
		self.prover_actions[round].push(action);
	}

	pub fn register_verifier_action(&mut self, round: usize, action: Box<dyn VerifierAction>) {
		if self.verifier_actions.len() <= round {
			self.verifier_actions.resize_with(round + 1, Vec::new);
		}
		self.verifier_actions[round].push(action);
	}

	pub fn prover_actions_at(&self, round: usize) -> &[Box<dyn ProverAction>] {
		self.prover_actions.get(round).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn verifier_actions(&self) -> impl Iterator<Item = &dyn VerifierAction> {
		self.verifier_actions
			.iter()
			.flatten()
			.map(Box::as_ref)
	}

	/// Total number of interaction rounds implied by everything declared so
	/// far.
	pub fn num_rounds(&self) -> usize {
		let mut last = 0;
		for (_, info) in self.columns.iter() {
			last = last.max(info.round);
		}
		for (_, info) in self.coins.iter() {
			last = last.max(info.round);
		}
		for opening in &self.local_openings {
			last = last.max(opening.round);
		}
		for claim in &self.log_derivative_sums {
			last = last.max(claim.round);
		}
		for inclusion in &self.inclusions {
			last = last.max(inclusion.round);
		}
		last = last.max(self.prover_actions.len().saturating_sub(1));
		last = last.max(self.verifier_actions.len().saturating_sub(1));
		last + 1
	}
}
