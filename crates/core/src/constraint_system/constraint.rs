// Copyright 2025 Glyph Contributors

use std::ops::Range;

use crate::expression::Expression;

/// A single-row constraint: `expr` must vanish at row 0.
#[derive(Clone, Debug)]
pub struct BoundaryConstraint {
	pub name: String,
	pub round: usize,
	pub expr: Expression,
}

/// A cross-row constraint: `expr` must vanish at every row where all of its
/// shifted column accesses stay in range.
#[derive(Clone, Debug)]
pub struct GlobalConstraint {
	pub name: String,
	pub round: usize,
	pub expr: Expression,
}

impl GlobalConstraint {
	/// The rows of a column of `size` rows on which the constraint applies.
	pub fn row_range(&self, size: usize) -> Range<usize> {
		let (min_shift, max_shift) = self.expr.shift_range();
		let start = (-min_shift).max(0) as usize;
		let end = (size as isize - max_shift.max(0)).max(0) as usize;
		start..end
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_row_range_of_transition() {
		let expr = Expression::column(0) - Expression::shifted(0, -1);
		let constraint = GlobalConstraint {
			name: "diff".into(),
			round: 0,
			expr,
		};
		assert_eq!(constraint.row_range(8), 1..8);
		assert_eq!(constraint.row_range(1), 1..1);
	}

	#[test]
	fn test_row_range_of_unshifted() {
		let constraint = GlobalConstraint {
			name: "plain".into(),
			round: 0,
			expr: Expression::column(0),
		};
		assert_eq!(constraint.row_range(4), 0..4);
	}
}
