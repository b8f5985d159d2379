// Copyright 2025 Glyph Contributors

/// Returns early with the given error, converting it with `into()`.
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		return Err($err.into());
	};
}

/// Returns early with the given error unless the condition holds.
#[macro_export]
macro_rules! ensure {
	($cond:expr, $err:expr) => {
		if !$cond {
			$crate::bail!($err);
		}
	};
}
