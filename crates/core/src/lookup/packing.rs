// Copyright 2025 Glyph Contributors

use std::{collections::BTreeMap, mem};

use glyph_utils::checked_arithmetics::checked_log_2;

use crate::{
	constraint_system::{ColumnId, ConstraintSystem, LogDerivativeSumPart, OpeningId},
	expression::Expression,
};

/// How many rational terms share one committed Z column by default.
///
/// Packing trades committed columns for constraint degree: a bundle of `k`
/// terms costs one column instead of `k`, while its transition constraint
/// has degree `k + 1` in the committed columns.
pub const DEFAULT_PACKING_ARITY: usize = 3;

/// One packed bundle of log-derivative terms: a committed running-sum column
/// together with the opening query that exposes its final row.
///
/// The bundle enforces `Σ_j num_j · Π_{k≠j} den_k = ΔZ · Π_k den_k` row by
/// row, which telescopes the column into `Z(last) = Σ_rows Σ_j num_j/den_j`.
#[derive(Clone, Debug)]
pub struct ZCtx {
	pub round: usize,
	pub size: usize,
	pub z: ColumnId,
	pub opening: OpeningId,
	pub parts: Vec<LogDerivativeSumPart>,
}

/// Global pool of log-derivative terms, grouped by `(round, size)` and
/// flushed into [`ZCtx`] bundles by [`ZCatalog::compile`].
pub struct ZCatalog {
	packing_arity: usize,
	pools: BTreeMap<(usize, usize), Vec<LogDerivativeSumPart>>,
}

impl ZCatalog {
	pub fn new(packing_arity: usize) -> Self {
		assert!(packing_arity >= 1, "packing arity must be positive");
		Self {
			packing_arity,
			pools: BTreeMap::new(),
		}
	}

	/// Adds one term to the pool of the given round.
	pub fn push(&mut self, round: usize, part: LogDerivativeSumPart) {
		checked_log_2(part.size);
		self.pools.entry((round, part.size)).or_default().push(part);
	}

	/// Drains the pool, declaring one Z column, one boundary constraint, one
	/// transition constraint (for sizes above 1), and one final-row opening
	/// per bundle. Returns the bundles grouped by round, plus every opening
	/// in declaration order.
	pub fn compile(
		&mut self,
		cs: &mut ConstraintSystem,
		prefix: &str,
	) -> (BTreeMap<usize, Vec<ZCtx>>, Vec<OpeningId>) {
		let mut bundles: BTreeMap<usize, Vec<ZCtx>> = BTreeMap::new();
		let mut openings = Vec::new();

		for ((round, size), parts) in mem::take(&mut self.pools) {
			for (bundle_no, chunk) in parts.chunks(self.packing_arity).enumerate() {
				let z_name = format!("{prefix}_{round}_{size}_Z_{bundle_no}");
				let z = cs.insert_commit(round, &z_name, size);

				let num = combined_numerator(chunk);
				let den = combined_denominator(chunk);

				// Z(0) · Den(0) = Num(0)
				cs.insert_boundary(
					round,
					format!("{z_name}_LOCAL"),
					num.clone() - Expression::column(z) * den.clone(),
				);

				// (Z(k) - Z(k-1)) · Den(k) = Num(k); vacuous for size 1 where
				// the boundary constraint already pins the only row.
				if size > 1 {
					cs.insert_global(
						round,
						format!("{z_name}_GLOBAL"),
						num - (Expression::column(z) - Expression::shifted(z, -1)) * den,
					);
				}

				let opening =
					cs.insert_local_opening(round, format!("{z_name}_FINAL"), z, size - 1);
				openings.push(opening);

				bundles.entry(round).or_default().push(ZCtx {
					round,
					size,
					z,
					opening,
					parts: chunk.to_vec(),
				});
			}
		}

		(bundles, openings)
	}
}

/// `Σ_j num_j · Π_{k≠j} den_k` — the numerator of the bundle's terms put
/// over their common denominator.
fn combined_numerator(parts: &[LogDerivativeSumPart]) -> Expression {
	parts
		.iter()
		.enumerate()
		.map(|(j, part)| {
			parts
				.iter()
				.enumerate()
				.filter(|(k, _)| *k != j)
				.fold(part.num.clone(), |acc, (_, other)| acc * other.den.clone())
		})
		.reduce(|acc, term| acc + term)
		.expect("bundles are never empty")
}

/// `Π_k den_k`.
fn combined_denominator(parts: &[LogDerivativeSumPart]) -> Expression {
	parts
		.iter()
		.map(|part| part.den.clone())
		.reduce(|acc, den| acc * den)
		.expect("bundles are never empty")
}

#[cfg(test)]
mod tests {
	use glyph_field::Fp;

	use super::*;
	use crate::expression::EvalContext;

	struct FixedCtx {
		columns: Vec<Vec<Fp>>,
	}

	impl EvalContext for FixedCtx {
		fn column_value(&self, id: ColumnId, row: usize) -> Fp {
			self.columns[id][row]
		}

		fn coin_value(&self, _id: usize) -> Fp {
			unreachable!("no coins in this test")
		}
	}

	fn part(size: usize, num: Expression, den: Expression) -> LogDerivativeSumPart {
		LogDerivativeSumPart { size, num, den }
	}

	#[test]
	fn test_bundle_counts() {
		let mut cs = ConstraintSystem::new();
		let col = cs.insert_commit(0, "X", 8);
		let mut catalog = ZCatalog::new(3);
		for _ in 0..7 {
			catalog.push(1, part(8, Expression::one(), Expression::column(col)));
		}
		let (bundles, openings) = catalog.compile(&mut cs, "PACK");
		assert_eq!(bundles[&1].len(), 3);
		assert_eq!(openings.len(), 3);
		assert_eq!(bundles[&1][0].parts.len(), 3);
		assert_eq!(bundles[&1][2].parts.len(), 1);
	}

	#[test]
	fn test_terms_split_by_size_and_round() {
		let mut cs = ConstraintSystem::new();
		let small = cs.insert_commit(0, "SMALL", 4);
		let large = cs.insert_commit(0, "LARGE", 8);
		let mut catalog = ZCatalog::new(3);
		catalog.push(1, part(4, Expression::one(), Expression::column(small)));
		catalog.push(1, part(8, Expression::one(), Expression::column(large)));
		catalog.push(2, part(4, Expression::one(), Expression::column(small)));
		let (bundles, openings) = catalog.compile(&mut cs, "PACK");
		assert_eq!(bundles[&1].len(), 2);
		assert_eq!(bundles[&2].len(), 1);
		assert_eq!(openings.len(), 3);
	}

	#[test]
	fn test_combined_fraction_matches_rational_sum() {
		// 3 parts with numerators n_j and denominators d_j over one row.
		let ctx = FixedCtx {
			columns: vec![
				vec![Fp::new(2)],
				vec![Fp::new(3)],
				vec![Fp::new(5)],
				vec![Fp::new(7)],
				vec![Fp::new(11)],
				vec![Fp::new(13)],
			],
		};
		let parts = [
			part(1, Expression::column(0), Expression::column(3)),
			part(1, Expression::column(1), Expression::column(4)),
			part(1, Expression::column(2), Expression::column(5)),
		];
		let num = combined_numerator(&parts).eval_at(0, &ctx);
		let den = combined_denominator(&parts).eval_at(0, &ctx);

		let expected = Fp::new(2) * Fp::new(7).invert().unwrap()
			+ Fp::new(3) * Fp::new(11).invert().unwrap()
			+ Fp::new(5) * Fp::new(13).invert().unwrap();
		assert_eq!(num * den.invert().unwrap(), expected);
	}
}
