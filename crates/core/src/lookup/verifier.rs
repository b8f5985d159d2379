// Copyright 2025 Glyph Contributors

use glyph_field::Fp;
use glyph_utils::bail;

use crate::{
	constraint_system::{ClaimId, OpeningId, VerificationError, VerifierAction},
	runtime::VerifierRuntime,
};

/// What the grand total of the final-row openings must equal.
#[derive(Clone, Copy, Debug)]
pub enum Expected {
	/// Inclusion arguments cancel exactly.
	Zero,
	/// Standalone sum claims equal their prover-assigned parameter.
	Claim(ClaimId),
}

/// The terminal verifier check of a compiled log-derivative argument.
///
/// The constraints already force each opening to equal its bundle's rational
/// sum, so comparing the total against the expected value is all that is
/// left.
pub struct FinalSumCheck {
	pub openings: Vec<OpeningId>,
	pub expected: Expected,
}

impl VerifierAction for FinalSumCheck {
	fn run(&self, run: &VerifierRuntime<'_>) -> Result<(), VerificationError> {
		let got: Fp = self.openings.iter().map(|&id| run.opening(id)).sum();
		let expected = match self.expected {
			Expected::Zero => Fp::ZERO,
			Expected::Claim(id) => run.claimed_sum(id),
		};
		if got != expected {
			bail!(VerificationError::LogDerivativeSumMismatch { expected, got });
		}
		Ok(())
	}
}
