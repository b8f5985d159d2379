// Copyright 2025 Glyph Contributors

//! Compilation of table-inclusion queries and standalone log-derivative sum
//! claims into committed columns, algebraic constraints, and openings.
//!
//! An inclusion of table S in table T reduces to the identity
//!
//! ```text
//! Σ_rows M(r) / (Gamma + T(r))  =  Σ_rows filter(r) / (Gamma + S(r))
//! ```
//!
//! over a verifier coin Gamma, where M counts how many checked rows match
//! each table row. The compiler turns both sides into rational terms, packs
//! terms of equal round and length into shared running-sum columns, and
//! leaves the verifier one final comparison: the opened sums must cancel.
//!
//! [`compile_lookups`] handles inclusion queries; standalone claims declared
//! with [`ConstraintSystem::insert_log_derivative_sum`] go through
//! [`compile_log_derivative_sums`] and compare against a prover-assigned
//! parameter instead of zero.

mod capture;
mod compiler;
mod error;
mod packing;
mod prover;
mod verifier;

#[cfg(test)]
mod tests;

pub use capture::{capture_tables, CapturedTable, CheckedTable, LookupTable};
pub use compiler::{compile_lookups, LookupCompiler};
pub use error::Error;
pub use packing::{ZCatalog, ZCtx, DEFAULT_PACKING_ARITY};
pub use prover::{
	ClaimTotalTask, ColumnSegmenter, MAssignmentTask, ProverTaskAtRound, ZAssignment,
};
pub use verifier::{Expected, FinalSumCheck};

use crate::constraint_system::ConstraintSystem;

/// Compiles every pending standalone log-derivative sum claim.
///
/// Each claim gets its own catalog of Z bundles, a prover task that assigns
/// them, and a verifier check comparing the opened total against the claim's
/// runtime parameter.
pub fn compile_log_derivative_sums(cs: &mut ConstraintSystem) {
	for id in 0..cs.log_derivative_sums.len() {
		if cs.log_derivative_sums[id].compiled {
			continue;
		}
		cs.log_derivative_sums[id].compiled = true;
		let claim = cs.log_derivative_sums[id].clone();

		let mut catalog = ZCatalog::new(DEFAULT_PACKING_ARITY);
		for part in claim.parts {
			catalog.push(claim.round, part);
		}
		let (bundles, openings) = catalog.compile(cs, &claim.name);

		for (round, z_tasks) in bundles {
			cs.register_prover_action(
				round,
				Box::new(ProverTaskAtRound {
					m_tasks: Vec::new(),
					z_tasks,
				}),
			);
		}

		let check_round = openings
			.iter()
			.map(|&opening| cs.local_openings[opening].round)
			.max()
			.expect("claims always carry parts");
		cs.register_prover_action(
			check_round,
			Box::new(ClaimTotalTask {
				claim: id,
				openings: openings.clone(),
			}),
		);
		cs.register_verifier_action(
			check_round,
			Box::new(FinalSumCheck {
				openings,
				expected: Expected::Claim(id),
			}),
		);
	}
}
