// Copyright 2025 Glyph Contributors

use glyph_field::Fp;
use glyph_utils::bail;

use super::Proof;
use crate::{
	constraint_system::{
		validate, ClaimId, CoinId, ColumnId, ConstraintSystem, OpeningId, VerificationError,
	},
	expression::EvalContext,
};

/// Read-only view of a proof during verification.
pub struct VerifierRuntime<'a> {
	pub cs: &'a ConstraintSystem,
	pub proof: &'a Proof,
}

impl VerifierRuntime<'_> {
	pub fn opening(&self, id: OpeningId) -> Fp {
		self.proof.openings[id]
	}

	pub fn coin(&self, id: CoinId) -> Fp {
		self.proof.coins[id]
	}

	pub fn claimed_sum(&self, id: ClaimId) -> Fp {
		self.proof.claimed_sums[id]
	}
}

impl EvalContext for VerifierRuntime<'_> {
	fn column_value(&self, id: ColumnId, row: usize) -> Fp {
		self.proof.columns[id][row]
	}

	fn coin_value(&self, id: CoinId) -> Fp {
		self.coin(id)
	}
}

/// Verifies a proof against a compiled constraint system.
///
/// Any mismatch yields a recoverable [`VerificationError`]; the verifier
/// never panics on adversarial proof data.
pub fn verify(cs: &ConstraintSystem, proof: &Proof) -> Result<(), VerificationError> {
	check_shape(cs, proof)?;

	let run = VerifierRuntime { cs, proof };

	// Re-check every opening against the column row it binds.
	for (id, opening) in cs.local_openings.iter().enumerate() {
		let actual = proof.columns[opening.column][opening.row];
		let claimed = proof.openings[id];
		if claimed != actual {
			bail!(VerificationError::OpeningMismatch {
				name: opening.name.clone(),
				claimed,
				actual,
			});
		}
	}

	validate::check_constraints(cs, &run)?;

	for action in cs.verifier_actions() {
		action.run(&run)?;
	}

	Ok(())
}

fn check_shape(cs: &ConstraintSystem, proof: &Proof) -> Result<(), VerificationError> {
	if proof.columns.len() != cs.columns.len()
		|| proof.coins.len() != cs.coins.len()
		|| proof.openings.len() != cs.local_openings.len()
		|| proof.claimed_sums.len() != cs.log_derivative_sums.len()
	{
		bail!(VerificationError::ProofShape(
			"registry and proof lengths differ".into()
		));
	}

	for (id, info) in cs.columns.iter() {
		let got = proof.columns[id].len();
		if got != info.size {
			bail!(VerificationError::ColumnSizeMismatch {
				name: info.name.clone(),
				expected: info.size,
				got,
			});
		}
		if let Some(precomputed) = &info.precomputed {
			if proof.columns[id] != **precomputed {
				bail!(VerificationError::PrecomputedMismatch {
					name: info.name.clone(),
				});
			}
		}
	}

	Ok(())
}
