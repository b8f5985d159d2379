// Copyright 2025 Glyph Contributors

//! Symbolic algebraic expressions over columns and coins.
//!
//! Compilers build constraints as [`Expression`] trees; the prover and the
//! verifier evaluate the same trees row by row against their respective
//! views of the witness. Column accesses may carry a row shift, which is how
//! transition ("global") constraints relate adjacent rows.

use std::ops::{Add, Mul, Neg, Sub};

use glyph_field::Fp;

use crate::constraint_system::{CoinId, ColumnId};

/// Resolves the leaves of an expression during evaluation.
///
/// Implemented by the prover runtime (over assigned witness vectors) and by
/// the verifier (over the column openings carried in the proof).
pub trait EvalContext {
	fn column_value(&self, id: ColumnId, row: usize) -> Fp;
	fn coin_value(&self, id: CoinId) -> Fp;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
	Constant(Fp),
	/// A committed or precomputed column accessed at `row + shift`.
	Column { id: ColumnId, shift: isize },
	Coin(CoinId),
	Add(Box<Expression>, Box<Expression>),
	Sub(Box<Expression>, Box<Expression>),
	Mul(Box<Expression>, Box<Expression>),
	Neg(Box<Expression>),
}

impl Expression {
	pub fn constant(val: impl Into<Fp>) -> Self {
		Self::Constant(val.into())
	}

	pub fn one() -> Self {
		Self::Constant(Fp::ONE)
	}

	pub fn column(id: ColumnId) -> Self {
		Self::Column { id, shift: 0 }
	}

	/// References a column at an offset of `shift` rows from the current one.
	pub fn shifted(id: ColumnId, shift: isize) -> Self {
		Self::Column { id, shift }
	}

	pub fn coin(id: CoinId) -> Self {
		Self::Coin(id)
	}

	/// Collapses a list of columns into `cols[0] + r·cols[1] + r²·cols[2] + …`
	/// where `r` is the value of `coin`, using a Horner evaluation so the
	/// tree stays linear in the number of columns.
	pub fn random_linear_combination(coin: CoinId, cols: &[ColumnId]) -> Self {
		let mut iter = cols.iter().rev();
		let last = *iter.next().expect("collapsing an empty column list");
		iter.fold(Self::column(last), |acc, &col| {
			Self::column(col) + Self::coin(coin) * acc
		})
	}

	/// Evaluates the expression at `row`.
	///
	/// The caller must guarantee that every shifted access stays in range;
	/// constraint iteration derives its row interval from [`Self::shift_range`].
	pub fn eval_at(&self, row: usize, ctx: &impl EvalContext) -> Fp {
		match self {
			Self::Constant(val) => *val,
			Self::Column { id, shift } => {
				let shifted_row = row as isize + shift;
				debug_assert!(shifted_row >= 0, "shifted access out of range");
				ctx.column_value(*id, shifted_row as usize)
			}
			Self::Coin(id) => ctx.coin_value(*id),
			Self::Add(a, b) => a.eval_at(row, ctx) + b.eval_at(row, ctx),
			Self::Sub(a, b) => a.eval_at(row, ctx) - b.eval_at(row, ctx),
			Self::Mul(a, b) => a.eval_at(row, ctx) * b.eval_at(row, ctx),
			Self::Neg(a) => -a.eval_at(row, ctx),
		}
	}

	/// Evaluates the expression over `size` consecutive rows.
	pub fn eval_column(&self, size: usize, ctx: &impl EvalContext) -> Vec<Fp> {
		(0..size).map(|row| self.eval_at(row, ctx)).collect()
	}

	/// The `(min, max)` row shift appearing anywhere in the tree.
	pub fn shift_range(&self) -> (isize, isize) {
		match self {
			Self::Constant(_) | Self::Coin(_) => (0, 0),
			Self::Column { shift, .. } => (*shift, *shift),
			Self::Add(a, b) | Self::Sub(a, b) | Self::Mul(a, b) => {
				let (a_min, a_max) = a.shift_range();
				let (b_min, b_max) = b.shift_range();
				(a_min.min(b_min), a_max.max(b_max))
			}
			Self::Neg(a) => a.shift_range(),
		}
	}

	/// Appends every column referenced by the tree to `out`, duplicates
	/// included.
	pub fn collect_columns(&self, out: &mut Vec<ColumnId>) {
		match self {
			Self::Constant(_) | Self::Coin(_) => {}
			Self::Column { id, .. } => out.push(*id),
			Self::Add(a, b) | Self::Sub(a, b) | Self::Mul(a, b) => {
				a.collect_columns(out);
				b.collect_columns(out);
			}
			Self::Neg(a) => a.collect_columns(out),
		}
	}
}

impl From<ColumnId> for Expression {
	fn from(id: ColumnId) -> Self {
		Self::column(id)
	}
}

impl From<Fp> for Expression {
	fn from(val: Fp) -> Self {
		Self::Constant(val)
	}
}

impl Add for Expression {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self::Add(Box::new(self), Box::new(rhs))
	}
}

impl Sub for Expression {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self::Sub(Box::new(self), Box::new(rhs))
	}
}

impl Mul for Expression {
	type Output = Self;

	fn mul(self, rhs: Self) -> Self {
		Self::Mul(Box::new(self), Box::new(rhs))
	}
}

impl Neg for Expression {
	type Output = Self;

	fn neg(self) -> Self {
		Self::Neg(Box::new(self))
	}
}
