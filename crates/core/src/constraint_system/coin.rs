// Copyright 2025 Glyph Contributors

use std::collections::HashMap;

/// Identifier for a verifier coin in a [`CoinRegistry`].
pub type CoinId = usize;

#[derive(Clone, Debug)]
pub struct CoinInfo {
	pub name: String,
	/// The coin's value becomes available at the opening of this round,
	/// after every column of the previous rounds has been committed.
	pub round: usize,
}

/// Registry of the field-valued random coins sampled by the verifier.
#[derive(Default)]
pub struct CoinRegistry {
	coins: Vec<CoinInfo>,
	by_name: HashMap<String, CoinId>,
}

impl CoinRegistry {
	pub fn insert(&mut self, round: usize, name: impl Into<String>) -> CoinId {
		let name = name.into();
		let id = self.coins.len();
		let prev = self.by_name.insert(name.clone(), id);
		assert!(prev.is_none(), "duplicate coin name {name}");
		self.coins.push(CoinInfo { name, round });
		id
	}

	pub fn info(&self, id: CoinId) -> &CoinInfo {
		&self.coins[id]
	}

	pub fn round_of(&self, id: CoinId) -> usize {
		self.coins[id].round
	}

	pub fn len(&self) -> usize {
		self.coins.len()
	}

	pub fn is_empty(&self) -> bool {
		self.coins.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (CoinId, &CoinInfo)> {
		self.coins.iter().enumerate()
	}
}
