// Copyright 2025 Glyph Contributors

use std::{
	fmt,
	iter::{Product, Sum},
	ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use rand::{
	distributions::{Distribution, Standard},
	Rng,
};

/// The Goldilocks prime `2^64 - 2^32 + 1`.
pub const MODULUS: u64 = 0xffff_ffff_0000_0001;

/// `2^64 mod p`, used by the reduction of 128-bit products.
const EPSILON: u64 = 0xffff_ffff;

/// An element of the prime field of order [`MODULUS`].
///
/// The inner representative is always canonical (strictly below the modulus),
/// so derived `Eq` and `Hash` agree with field equality. That property is
/// load-bearing: the lookup prover uses `Fp` as a hash-map key.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fp(u64);

impl Fp {
	pub const ZERO: Self = Self(0);
	pub const ONE: Self = Self(1);

	/// Creates a field element from an arbitrary `u64`, reducing mod p.
	pub const fn new(val: u64) -> Self {
		// val < 2^64 < 2p, so a single conditional subtraction is enough.
		if val >= MODULUS {
			Self(val - MODULUS)
		} else {
			Self(val)
		}
	}

	/// Returns the canonical representative in `[0, p)`.
	pub const fn as_u64(self) -> u64 {
		self.0
	}

	pub const fn is_zero(self) -> bool {
		self.0 == 0
	}

	/// Raises the element to the power `exp` by square-and-multiply.
	pub fn pow(self, mut exp: u64) -> Self {
		let mut base = self;
		let mut acc = Self::ONE;
		while exp != 0 {
			if exp & 1 == 1 {
				acc *= base;
			}
			base *= base;
			exp >>= 1;
		}
		acc
	}

	/// Returns the multiplicative inverse, or `None` for zero.
	pub fn invert(self) -> Option<Self> {
		if self.is_zero() {
			return None;
		}
		// p is prime, so a^(p-2) = a^-1 by Fermat.
		Some(self.pow(MODULUS - 2))
	}

	pub fn square(self) -> Self {
		self * self
	}

	pub fn double(self) -> Self {
		self + self
	}
}

/// Reduces a 128-bit product using `2^64 ≡ EPSILON` and
/// `2^96 ≡ -1 (mod p)`.
const fn reduce128(x: u128) -> u64 {
	let x_lo = x as u64;
	let x_hi = (x >> 64) as u64;
	let x_hi_hi = x_hi >> 32;
	let x_hi_lo = x_hi & EPSILON;

	let (mut t0, borrow) = x_lo.overflowing_sub(x_hi_hi);
	if borrow {
		t0 = t0.wrapping_sub(EPSILON);
	}
	let t1 = x_hi_lo * EPSILON;
	let (t2, carry) = t0.overflowing_add(t1);
	let t2 = t2.wrapping_add(EPSILON * carry as u64);
	if t2 >= MODULUS {
		t2 - MODULUS
	} else {
		t2
	}
}

impl Add for Fp {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		// Canonical operands sum to less than 2p, so folding the carry back in
		// as EPSILON cannot overflow a second time.
		let (sum, over) = self.0.overflowing_add(rhs.0);
		Self::new(sum.wrapping_add(over as u64 * EPSILON))
	}
}

impl Sub for Fp {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		if self.0 >= rhs.0 {
			Self(self.0 - rhs.0)
		} else {
			Self(self.0 + (MODULUS - rhs.0))
		}
	}
}

impl Mul for Fp {
	type Output = Self;

	fn mul(self, rhs: Self) -> Self {
		Self(reduce128(self.0 as u128 * rhs.0 as u128))
	}
}

impl Neg for Fp {
	type Output = Self;

	fn neg(self) -> Self {
		Self::ZERO - self
	}
}

impl AddAssign for Fp {
	fn add_assign(&mut self, rhs: Self) {
		*self = *self + rhs;
	}
}

impl SubAssign for Fp {
	fn sub_assign(&mut self, rhs: Self) {
		*self = *self - rhs;
	}
}

impl MulAssign for Fp {
	fn mul_assign(&mut self, rhs: Self) {
		*self = *self * rhs;
	}
}

impl Sum for Fp {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Self::ZERO, |acc, x| acc + x)
	}
}

impl Product for Fp {
	fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Self::ONE, |acc, x| acc * x)
	}
}

impl From<u64> for Fp {
	fn from(val: u64) -> Self {
		Self::new(val)
	}
}

impl From<u32> for Fp {
	fn from(val: u32) -> Self {
		Self(val as u64)
	}
}

impl From<bool> for Fp {
	fn from(val: bool) -> Self {
		Self(val as u64)
	}
}

impl fmt::Display for Fp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl fmt::Debug for Fp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Fp({})", self.0)
	}
}

impl Distribution<Fp> for Standard {
	fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Fp {
		// Rejection sampling keeps the distribution exactly uniform.
		loop {
			let val = rng.gen::<u64>();
			if val < MODULUS {
				return Fp(val);
			}
		}
	}
}
