// Copyright 2025 Glyph Contributors

use crate::Fp;

/// Inverts a whole vector with a single field inversion (Montgomery's trick).
///
/// Zero entries are left as zero rather than treated as an error, so callers
/// can invert sparse vectors without pre-filtering.
pub fn batch_invert(values: &[Fp]) -> Vec<Fp> {
	let mut prefix = Vec::with_capacity(values.len());
	let mut acc = Fp::ONE;
	for &v in values {
		prefix.push(acc);
		if !v.is_zero() {
			acc *= v;
		}
	}

	let mut inv_acc = acc
		.invert()
		.expect("product of non-zero elements is non-zero");

	let mut out = vec![Fp::ZERO; values.len()];
	for i in (0..values.len()).rev() {
		if values[i].is_zero() {
			continue;
		}
		out[i] = inv_acc * prefix[i];
		inv_acc *= values[i];
	}
	out
}
