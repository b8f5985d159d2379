// Copyright 2025 Glyph Contributors

/// log2 implementation that fails when `val` is not a power of 2.
///
/// Column and accumulator sizes must be powers of two everywhere in the
/// protocol layer; a failure here means the calling compiler is buggy.
pub const fn checked_log_2(val: usize) -> usize {
	assert!(val.is_power_of_two(), "value is not a power of two");
	val.trailing_zeros() as usize
}
