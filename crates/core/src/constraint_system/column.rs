// Copyright 2025 Glyph Contributors

use std::{collections::HashMap, sync::Arc};

use glyph_field::Fp;
use glyph_utils::checked_arithmetics::checked_log_2;

/// Identifier for a column in a [`ColumnRegistry`].
pub type ColumnId = usize;

#[derive(Clone, Debug)]
pub struct ColumnInfo {
	pub name: String,
	/// Interaction round at which the column is committed.
	pub round: usize,
	/// Number of rows; always a power of two.
	pub size: usize,
	/// Constant assignment for precomputed columns. Committed columns are
	/// `None` and get their witness during proving.
	pub precomputed: Option<Arc<Vec<Fp>>>,
}

impl ColumnInfo {
	pub fn is_committed(&self) -> bool {
		self.precomputed.is_none()
	}
}

/// Registry of all columns declared in a constraint system.
///
/// Names must be unique; a duplicate declaration is a bug in the calling
/// compiler and panics.
#[derive(Default)]
pub struct ColumnRegistry {
	columns: Vec<ColumnInfo>,
	by_name: HashMap<String, ColumnId>,
}

impl ColumnRegistry {
	pub fn insert_committed(&mut self, round: usize, name: impl Into<String>, size: usize) -> ColumnId {
		self.insert(ColumnInfo {
			name: name.into(),
			round,
			size,
			precomputed: None,
		})
	}

	pub fn insert_precomputed(&mut self, name: impl Into<String>, values: Vec<Fp>) -> ColumnId {
		self.insert(ColumnInfo {
			name: name.into(),
			round: 0,
			size: values.len(),
			precomputed: Some(Arc::new(values)),
		})
	}

	fn insert(&mut self, info: ColumnInfo) -> ColumnId {
		checked_log_2(info.size);
		let id = self.columns.len();
		let prev = self.by_name.insert(info.name.clone(), id);
		assert!(prev.is_none(), "duplicate column name {}", info.name);
		self.columns.push(info);
		id
	}

	pub fn info(&self, id: ColumnId) -> &ColumnInfo {
		&self.columns[id]
	}

	pub fn size_of(&self, id: ColumnId) -> usize {
		self.columns[id].size
	}

	pub fn round_of(&self, id: ColumnId) -> usize {
		self.columns[id].round
	}

	pub fn name_of(&self, id: ColumnId) -> &str {
		&self.columns[id].name
	}

	pub fn id_of(&self, name: &str) -> Option<ColumnId> {
		self.by_name.get(name).copied()
	}

	pub fn len(&self) -> usize {
		self.columns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (ColumnId, &ColumnInfo)> {
		self.columns.iter().enumerate()
	}
}
