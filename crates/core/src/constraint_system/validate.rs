// Copyright 2025 Glyph Contributors

//! Direct evaluation of the declared constraints against a witness view.
//!
//! Verification uses this to check the columns carried in a proof; tests use
//! it against a prover runtime to catch compiler bugs before a proof ever
//! exists.

use glyph_field::Fp;
use rayon::prelude::*;

use super::{ConstraintSystem, VerificationError};
use crate::expression::EvalContext;

/// Checks every boundary and global constraint of `cs` over `ctx`.
///
/// Reports the first offending row of the first offending constraint.
pub fn check_constraints<C>(cs: &ConstraintSystem, ctx: &C) -> Result<(), VerificationError>
where
	C: EvalContext + Sync,
{
	for constraint in &cs.boundary_constraints {
		let (min_shift, _) = constraint.expr.shift_range();
		assert!(min_shift >= 0, "boundary constraint {} reaches before row 0", constraint.name);
		if constraint.expr.eval_at(0, ctx) != Fp::ZERO {
			return Err(VerificationError::ConstraintNotSatisfied {
				name: constraint.name.clone(),
				row: 0,
			});
		}
	}

	for constraint in &cs.global_constraints {
		let size = constraint_domain_size(cs, constraint);
		constraint
			.row_range(size)
			.into_par_iter()
			.try_for_each(|row| {
				if constraint.expr.eval_at(row, ctx) != Fp::ZERO {
					return Err(VerificationError::ConstraintNotSatisfied {
						name: constraint.name.clone(),
						row,
					});
				}
				Ok(())
			})?;
	}

	Ok(())
}

/// The common row count of every column referenced by a global constraint.
/// Mixed sizes within one constraint are a compiler bug.
fn constraint_domain_size(
	cs: &ConstraintSystem,
	constraint: &super::GlobalConstraint,
) -> usize {
	let mut cols = Vec::new();
	constraint.expr.collect_columns(&mut cols);
	let first = *cols
		.first()
		.unwrap_or_else(|| panic!("global constraint {} references no column", constraint.name));
	let size = cs.columns.size_of(first);
	for col in cols {
		assert_eq!(
			cs.columns.size_of(col),
			size,
			"global constraint {} mixes column sizes",
			constraint.name,
		);
	}
	size
}
