// Copyright 2025 Glyph Contributors

use std::{collections::HashMap, sync::Arc};

use assert_matches::assert_matches;
use glyph_field::Fp;

use super::*;
use crate::{
	constraint_system::{
		ColumnId, ConstraintSystem, LogDerivativeSumPart, ProverAction, VerificationError,
	},
	expression::Expression,
	runtime::{prove, verify, ProverRuntime},
};

fn fps(vals: &[u64]) -> Vec<Fp> {
	vals.iter().map(|&v| Fp::new(v)).collect()
}

/// Assigns fixed witness vectors at the round the action is registered for.
struct AssignColumns {
	assignments: Vec<(ColumnId, Vec<Fp>)>,
}

impl ProverAction for AssignColumns {
	fn run(&self, run: &mut ProverRuntime<'_>) -> anyhow::Result<()> {
		for (id, values) in &self.assignments {
			run.assign_column(*id, values.clone());
		}
		Ok(())
	}
}

#[test]
fn test_simple_inclusion() {
	let mut cs = ConstraintSystem::new();
	let a = cs.insert_commit(0, "A", 16);
	let b = cs.insert_commit(0, "B", 8);
	cs.insert_inclusion(0, "LOOKUP", vec![a], vec![b]);
	compile_lookups(&mut cs);

	let proof = prove(&cs, |run| {
		run.assign_column(a, fps(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]));
		run.assign_column(b, fps(&[0, 1, 2, 3, 4, 5, 6, 7]));
	})
	.unwrap();

	verify(&cs, &proof).unwrap();
}

#[test]
fn test_multiplicity_counting() {
	let mut cs = ConstraintSystem::new();
	let s = cs.insert_commit(0, "S", 16);
	let t = cs.insert_commit(0, "T", 4);
	cs.insert_inclusion(0, "LOOKUP", vec![t], vec![s]);
	compile_lookups(&mut cs);

	let proof = prove(&cs, |run| {
		run.assign_column(s, fps(&[1, 1, 1, 2, 3, 0, 0, 1, 1, 1, 1, 2, 3, 0, 0, 1]));
		run.assign_column(t, fps(&[0, 1, 2, 3]));
	})
	.unwrap();

	let m = cs.columns.id_of("TABLE_T_M_0").unwrap();
	assert_eq!(proof.columns[m], fps(&[4, 8, 2, 2]));
	verify(&cs, &proof).unwrap();
}

#[test]
fn test_duplicate_table_rows_fold_into_first_occurrence() {
	let mut cs = ConstraintSystem::new();
	let t = cs.insert_commit(0, "T", 4);
	let s = cs.insert_commit(0, "S", 4);
	cs.insert_inclusion(0, "LOOKUP", vec![t], vec![s]);
	compile_lookups(&mut cs);

	let proof = prove(&cs, |run| {
		run.assign_column(t, fps(&[5, 6, 1, 1]));
		run.assign_column(s, fps(&[5, 6, 1, 1]));
	})
	.unwrap();

	let m = cs.columns.id_of("TABLE_T_M_0").unwrap();
	assert_eq!(proof.columns[m], fps(&[1, 1, 2, 0]));
	verify(&cs, &proof).unwrap();
}

#[test]
fn test_many_checked_tables_share_one_table() {
	let mut cs = ConstraintSystem::new();
	let s1 = cs.insert_commit(0, "S1", 16);
	let s2 = cs.insert_commit(0, "S2", 16);
	let s3 = cs.insert_commit(0, "S3", 16);
	let t = cs.insert_commit(0, "T", 4);
	cs.insert_inclusion(0, "LOOKUP1", vec![t], vec![s1]);
	cs.insert_inclusion(0, "LOOKUP2", vec![t], vec![s2]);
	cs.insert_inclusion(0, "LOOKUP3", vec![t], vec![s3]);
	compile_lookups(&mut cs);

	let proof = prove(&cs, |run| {
		run.assign_column(s1, fps(&[1, 1, 1, 2, 3, 0, 0, 1, 1, 1, 1, 2, 3, 0, 0, 1]));
		run.assign_column(s2, fps(&[2, 2, 2, 1, 0, 3, 3, 2, 2, 2, 2, 1, 0, 3, 3, 2]));
		run.assign_column(s3, fps(&[2, 2, 2, 1, 0, 3, 3, 2, 2, 2, 2, 1, 0, 3, 3, 3]));
		run.assign_column(t, fps(&[0, 1, 2, 3]));
	})
	.unwrap();

	// All three queries target the same table, so one shared M absorbs them.
	let m = cs.columns.id_of("TABLE_T_M_0").unwrap();
	assert_eq!(proof.columns[m], fps(&[8, 12, 17, 11]));
	verify(&cs, &proof).unwrap();
}

#[test]
fn test_missing_row_rejected_by_prover() {
	let mut cs = ConstraintSystem::new();
	let t = cs.insert_commit(0, "T", 4);
	let s = cs.insert_commit(0, "S", 4);
	cs.insert_inclusion(0, "LOOKUP", vec![t], vec![s]);
	compile_lookups(&mut cs);

	let err = prove(&cs, |run| {
		run.assign_column(t, fps(&[0, 1, 2, 3]));
		run.assign_column(s, fps(&[0, 1, 9, 3]));
	})
	.unwrap_err();

	assert_matches!(
		err.downcast_ref::<Error>(),
		Some(Error::MissingInTable { checked: 0, row: 2, .. })
	);
}

#[test]
fn test_xor_lookup() {
	let mut cs = ConstraintSystem::new();
	let xor_x = cs.insert_commit(0, "XOR_X", 16);
	let xor_y = cs.insert_commit(0, "XOR_Y", 16);
	let xor_xy = cs.insert_commit(0, "XOR_XY", 16);
	let w_x = cs.insert_commit(0, "W_X", 4);
	let w_y = cs.insert_commit(0, "W_Y", 4);
	let w_xy = cs.insert_commit(0, "W_XY", 4);
	cs.insert_inclusion(0, "LOOKUP", vec![xor_x, xor_y, xor_xy], vec![w_x, w_y, w_xy]);
	compile_lookups(&mut cs);

	let proof = prove(&cs, |run| {
		run.assign_column(xor_x, fps(&[0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3]));
		run.assign_column(xor_y, fps(&[0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3]));
		run.assign_column(xor_xy, fps(&[0, 1, 2, 3, 1, 0, 3, 2, 2, 3, 0, 1, 3, 2, 1, 0]));
		run.assign_column(w_x, fps(&[0, 3, 2, 1]));
		run.assign_column(w_y, fps(&[1, 0, 3, 2]));
		run.assign_column(w_xy, fps(&[1, 3, 1, 3]));
	})
	.unwrap();

	let m = cs.columns.id_of("TABLE_XOR_X_XOR_Y_XOR_XY_M_0").unwrap();
	assert_eq!(
		proof.columns[m],
		fps(&[0, 0, 0, 1, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0])
	);
	verify(&cs, &proof).unwrap();
}

#[test]
fn test_xor_lookup_rejects_wrong_row() {
	let mut cs = ConstraintSystem::new();
	let xor_x = cs.insert_commit(0, "XOR_X", 16);
	let xor_y = cs.insert_commit(0, "XOR_Y", 16);
	let xor_xy = cs.insert_commit(0, "XOR_XY", 16);
	let w_x = cs.insert_commit(0, "W_X", 4);
	let w_y = cs.insert_commit(0, "W_Y", 4);
	let w_xy = cs.insert_commit(0, "W_XY", 4);
	cs.insert_inclusion(0, "LOOKUP", vec![xor_x, xor_y, xor_xy], vec![w_x, w_y, w_xy]);
	compile_lookups(&mut cs);

	let err = prove(&cs, |run| {
		run.assign_column(xor_x, fps(&[0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3]));
		run.assign_column(xor_y, fps(&[0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3]));
		run.assign_column(xor_xy, fps(&[0, 1, 2, 3, 1, 0, 3, 2, 2, 3, 0, 1, 3, 2, 1, 0]));
		run.assign_column(w_x, fps(&[0, 3, 2, 1]));
		run.assign_column(w_y, fps(&[1, 0, 3, 2]));
		// 2 ^ 3 is 1, not 2.
		run.assign_column(w_xy, fps(&[1, 3, 2, 3]));
	})
	.unwrap_err();

	assert_matches!(
		err.downcast_ref::<Error>(),
		Some(Error::MissingInTable { checked: 0, row: 2, .. })
	);
}

#[test]
fn test_included_filter_masks_rows() {
	let mut cs = ConstraintSystem::new();
	let t = cs.insert_commit(0, "T", 4);
	let s = cs.insert_commit(0, "S", 8);
	let filter = cs.insert_commit(0, "S_FILTER", 8);
	cs.insert_fragmented_conditional_inclusion(
		0,
		"LOOKUP",
		vec![vec![t]],
		vec![s],
		None,
		Some(filter),
	);
	compile_lookups(&mut cs);

	let proof = prove(&cs, |run| {
		run.assign_column(t, fps(&[0, 1, 2, 3]));
		// Rows 2 and 4 fall outside the table but their filter is off.
		run.assign_column(s, fps(&[1, 2, 9, 3, 7, 0, 1, 2]));
		run.assign_column(filter, fps(&[1, 1, 0, 1, 0, 1, 1, 1]));
	})
	.unwrap();

	let m = cs.columns.id_of("TABLE_T_M_0").unwrap();
	assert_eq!(proof.columns[m], fps(&[1, 2, 2, 1]));
	verify(&cs, &proof).unwrap();
}

#[test]
fn test_included_filter_active_on_missing_row_rejected() {
	let mut cs = ConstraintSystem::new();
	let t = cs.insert_commit(0, "T", 4);
	let s = cs.insert_commit(0, "S", 8);
	let filter = cs.insert_commit(0, "S_FILTER", 8);
	cs.insert_fragmented_conditional_inclusion(
		0,
		"LOOKUP",
		vec![vec![t]],
		vec![s],
		None,
		Some(filter),
	);
	compile_lookups(&mut cs);

	let err = prove(&cs, |run| {
		run.assign_column(t, fps(&[0, 1, 2, 3]));
		run.assign_column(s, fps(&[1, 2, 9, 3, 7, 0, 1, 2]));
		run.assign_column(filter, fps(&[1, 1, 1, 1, 0, 1, 1, 1]));
	})
	.unwrap_err();

	assert_matches!(
		err.downcast_ref::<Error>(),
		Some(Error::MissingInTable { checked: 0, row: 2, .. })
	);
}

#[test]
fn test_non_binary_filter_rejected() {
	let mut cs = ConstraintSystem::new();
	let t = cs.insert_commit(0, "T", 4);
	let s = cs.insert_commit(0, "S", 4);
	let filter = cs.insert_commit(0, "S_FILTER", 4);
	cs.insert_fragmented_conditional_inclusion(
		0,
		"LOOKUP",
		vec![vec![t]],
		vec![s],
		None,
		Some(filter),
	);
	compile_lookups(&mut cs);

	let err = prove(&cs, |run| {
		run.assign_column(t, fps(&[0, 1, 2, 3]));
		run.assign_column(s, fps(&[0, 1, 2, 3]));
		run.assign_column(filter, fps(&[1, 2, 1, 1]));
	})
	.unwrap_err();

	assert_matches!(
		err.downcast_ref::<Error>(),
		Some(Error::NonBinaryFilter { row: 1, .. })
	);
}

#[test]
fn test_including_filter_masks_table_rows() {
	let mut cs = ConstraintSystem::new();
	let t = cs.insert_commit(0, "T", 8);
	let t_filter = cs.insert_commit(0, "T_FILTER", 8);
	let s = cs.insert_commit(0, "S", 8);
	cs.insert_fragmented_conditional_inclusion(
		0,
		"LOOKUP",
		vec![vec![t]],
		vec![s],
		Some(vec![t_filter]),
		None,
	);
	compile_lookups(&mut cs);

	let proof = prove(&cs, |run| {
		run.assign_column(t, fps(&[0, 1, 2, 3, 9, 9, 9, 9]));
		run.assign_column(t_filter, fps(&[1, 1, 1, 1, 0, 0, 0, 0]));
		run.assign_column(s, fps(&[0, 1, 2, 3, 3, 2, 1, 0]));
	})
	.unwrap();

	verify(&cs, &proof).unwrap();
}

#[test]
fn test_including_filter_excludes_masked_rows() {
	let mut cs = ConstraintSystem::new();
	let t = cs.insert_commit(0, "T", 8);
	let t_filter = cs.insert_commit(0, "T_FILTER", 8);
	let s = cs.insert_commit(0, "S", 8);
	cs.insert_fragmented_conditional_inclusion(
		0,
		"LOOKUP",
		vec![vec![t]],
		vec![s],
		Some(vec![t_filter]),
		None,
	);
	compile_lookups(&mut cs);

	// 9 only appears in the masked-off part of the table.
	let err = prove(&cs, |run| {
		run.assign_column(t, fps(&[0, 1, 2, 3, 9, 9, 9, 9]));
		run.assign_column(t_filter, fps(&[1, 1, 1, 1, 0, 0, 0, 0]));
		run.assign_column(s, fps(&[0, 1, 2, 3, 3, 2, 1, 9]));
	})
	.unwrap_err();

	assert_matches!(
		err.downcast_ref::<Error>(),
		Some(Error::MissingInTable { checked: 0, row: 7, .. })
	);
}

#[test]
fn test_fragmented_table() {
	let mut cs = ConstraintSystem::new();
	let t0 = cs.insert_commit(0, "T0", 8);
	let t1 = cs.insert_commit(0, "T1", 4);
	let s = cs.insert_commit(0, "S", 8);
	cs.insert_fragmented_conditional_inclusion(
		0,
		"LOOKUP",
		vec![vec![t0], vec![t1]],
		vec![s],
		None,
		None,
	);
	compile_lookups(&mut cs);

	let proof = prove(&cs, |run| {
		run.assign_column(t0, fps(&[0, 1, 2, 3, 4, 5, 6, 7]));
		run.assign_column(t1, fps(&[8, 9, 10, 11]));
		run.assign_column(s, fps(&[0, 11, 8, 7, 9, 1, 10, 2]));
	})
	.unwrap();

	let m0 = cs.columns.id_of("TABLE_T0__T1_M_0").unwrap();
	let m1 = cs.columns.id_of("TABLE_T0__T1_M_1").unwrap();
	assert_eq!(proof.columns[m0], fps(&[1, 1, 1, 1, 0, 0, 0, 1]));
	assert_eq!(proof.columns[m1], fps(&[1, 1, 1, 1]));
	verify(&cs, &proof).unwrap();
}

#[test]
fn test_packing_arities_agree() {
	for (arity, expected_z_columns) in [(1, 4), (2, 3), (3, 2)] {
		let mut cs = ConstraintSystem::new();
		let s1 = cs.insert_commit(0, "S1", 16);
		let s2 = cs.insert_commit(0, "S2", 16);
		let s3 = cs.insert_commit(0, "S3", 16);
		let t = cs.insert_commit(0, "T", 4);
		cs.insert_inclusion(0, "LOOKUP1", vec![t], vec![s1]);
		cs.insert_inclusion(0, "LOOKUP2", vec![t], vec![s2]);
		cs.insert_inclusion(0, "LOOKUP3", vec![t], vec![s3]);
		LookupCompiler {
			packing_arity: arity,
			segmenter: None,
		}
		.compile(&mut cs);

		let z_columns = cs
			.columns
			.iter()
			.filter(|(_, info)| info.name.contains("_Z_"))
			.count();
		assert_eq!(z_columns, expected_z_columns, "arity {arity}");

		let proof = prove(&cs, |run| {
			run.assign_column(s1, fps(&[1, 1, 1, 2, 3, 0, 0, 1, 1, 1, 1, 2, 3, 0, 0, 1]));
			run.assign_column(s2, fps(&[2, 2, 2, 1, 0, 3, 3, 2, 2, 2, 2, 1, 0, 3, 3, 2]));
			run.assign_column(s3, fps(&[2, 2, 2, 1, 0, 3, 3, 2, 2, 2, 2, 1, 0, 3, 3, 3]));
			run.assign_column(t, fps(&[0, 1, 2, 3]));
		})
		.unwrap();
		verify(&cs, &proof).unwrap();
	}
}

#[test]
fn test_tampered_multiplicity_rejected() {
	let mut cs = ConstraintSystem::new();
	let t = cs.insert_commit(0, "T", 4);
	let s = cs.insert_commit(0, "S", 8);
	cs.insert_inclusion(0, "LOOKUP", vec![t], vec![s]);
	compile_lookups(&mut cs);

	let mut proof = prove(&cs, |run| {
		run.assign_column(t, fps(&[0, 1, 2, 3]));
		run.assign_column(s, fps(&[0, 1, 2, 3, 3, 2, 1, 0]));
	})
	.unwrap();

	let m = cs.columns.id_of("TABLE_T_M_0").unwrap();
	proof.columns[m][0] += Fp::ONE;

	assert_matches!(
		verify(&cs, &proof),
		Err(VerificationError::ConstraintNotSatisfied { .. })
	);
}

#[test]
fn test_tampered_opening_rejected() {
	let mut cs = ConstraintSystem::new();
	let t = cs.insert_commit(0, "T", 4);
	let s = cs.insert_commit(0, "S", 8);
	cs.insert_inclusion(0, "LOOKUP", vec![t], vec![s]);
	compile_lookups(&mut cs);

	let mut proof = prove(&cs, |run| {
		run.assign_column(t, fps(&[0, 1, 2, 3]));
		run.assign_column(s, fps(&[0, 1, 2, 3, 3, 2, 1, 0]));
	})
	.unwrap();

	proof.openings[0] += Fp::ONE;

	assert_matches!(
		verify(&cs, &proof),
		Err(VerificationError::OpeningMismatch { .. })
	);
}

#[test]
fn test_standalone_log_derivative_sum() {
	let mut cs = ConstraintSystem::new();
	let num = cs.insert_commit(0, "NUM", 8);
	let den = cs.insert_commit(0, "DEN", 8);
	let claim = cs.insert_log_derivative_sum(
		0,
		"SUM",
		vec![LogDerivativeSumPart {
			size: 8,
			num: Expression::column(num),
			den: Expression::column(den),
		}],
	);
	compile_log_derivative_sums(&mut cs);

	let num_vals = fps(&[1, 2, 3, 4, 5, 6, 7, 8]);
	let den_vals = fps(&[9, 10, 11, 12, 13, 14, 15, 16]);
	let expected: Fp = num_vals
		.iter()
		.zip(&den_vals)
		.map(|(&n, &d)| n * d.invert().unwrap())
		.sum();

	let proof = prove(&cs, |run| {
		run.assign_column(num, num_vals.clone());
		run.assign_column(den, den_vals.clone());
	})
	.unwrap();

	assert_eq!(proof.claimed_sums[claim], expected);
	verify(&cs, &proof).unwrap();
}

#[test]
fn test_standalone_claim_tamper_rejected() {
	let mut cs = ConstraintSystem::new();
	let num = cs.insert_commit(0, "NUM", 8);
	let den = cs.insert_commit(0, "DEN", 8);
	let claim = cs.insert_log_derivative_sum(
		0,
		"SUM",
		vec![LogDerivativeSumPart {
			size: 8,
			num: Expression::column(num),
			den: Expression::column(den),
		}],
	);
	compile_log_derivative_sums(&mut cs);

	let mut proof = prove(&cs, |run| {
		run.assign_column(num, fps(&[1, 2, 3, 4, 5, 6, 7, 8]));
		run.assign_column(den, fps(&[9, 10, 11, 12, 13, 14, 15, 16]));
	})
	.unwrap();

	proof.claimed_sums[claim] += Fp::ONE;

	assert_matches!(
		verify(&cs, &proof),
		Err(VerificationError::LogDerivativeSumMismatch { .. })
	);
}

/// Returns fixed per-column segments, defaulting to the full column.
struct FixedSegments {
	segments: HashMap<ColumnId, (isize, isize)>,
}

impl ColumnSegmenter for FixedSegments {
	fn segment_of(&self, run: &ProverRuntime<'_>, column: ColumnId) -> (isize, isize) {
		self.segments
			.get(&column)
			.copied()
			.unwrap_or((0, run.cs.columns.size_of(column) as isize))
	}
}

/// Runs a multiplicity count in-flight and compares it to a fixed vector.
struct ExpectMultiplicities {
	task: MAssignmentTask,
	expected: Vec<Vec<Fp>>,
}

impl ProverAction for ExpectMultiplicities {
	fn run(&self, run: &mut ProverRuntime<'_>) -> anyhow::Result<()> {
		let got = self.task.compute(run)?;
		assert_eq!(got, self.expected);
		Ok(())
	}
}

#[test]
fn test_segmenter_skips_out_of_range_rows() {
	let mut cs = ConstraintSystem::new();
	let t = cs.insert_commit(0, "T", 4);
	let s = cs.insert_commit(0, "S", 8);

	let mut segments = HashMap::new();
	segments.insert(s, (0isize, 4isize));

	let task = MAssignmentTask {
		table: "TABLE_T".into(),
		m: vec![],
		fragments: vec![vec![t]],
		checked: vec![CheckedTable {
			columns: vec![s],
			filter: None,
		}],
		segmenter: Some(Arc::new(FixedSegments { segments })),
	};
	cs.register_prover_action(
		0,
		Box::new(ExpectMultiplicities {
			task,
			expected: vec![fps(&[1, 1, 1, 1])],
		}),
	);

	prove(&cs, |run| {
		run.assign_column(t, fps(&[0, 1, 2, 3]));
		// Rows 4.. hold values outside the table; the segment excludes them.
		run.assign_column(s, fps(&[1, 2, 3, 0, 9, 9, 9, 9]));
	})
	.unwrap();
}

#[test]
fn test_segmenter_overhang_repeats_boundary_rows() {
	let mut cs = ConstraintSystem::new();
	let t = cs.insert_commit(0, "T", 4);
	let s = cs.insert_commit(0, "S", 8);

	let mut segments = HashMap::new();
	segments.insert(s, (-2isize, 9isize));

	let task = MAssignmentTask {
		table: "TABLE_T".into(),
		m: vec![],
		fragments: vec![vec![t]],
		checked: vec![CheckedTable {
			columns: vec![s],
			filter: None,
		}],
		segmenter: Some(Arc::new(FixedSegments { segments })),
	};
	// Row 0 stands for three copies (itself plus two before the column) and
	// row 7 for two (itself plus one past the column).
	cs.register_prover_action(
		0,
		Box::new(ExpectMultiplicities {
			task,
			expected: vec![fps(&[4, 2, 2, 3])],
		}),
	);

	prove(&cs, |run| {
		run.assign_column(t, fps(&[0, 1, 2, 3]));
		run.assign_column(s, fps(&[0, 1, 2, 3, 0, 1, 2, 3]));
	})
	.unwrap();
}

#[test]
fn test_recompilation_is_a_no_op() {
	let mut cs = ConstraintSystem::new();
	let t = cs.insert_commit(0, "T", 8);
	let s = cs.insert_commit(0, "S", 4);
	cs.insert_inclusion(0, "LOOKUP", vec![t], vec![s]);
	compile_lookups(&mut cs);

	let columns = cs.columns.len();
	let openings = cs.local_openings.len();
	compile_lookups(&mut cs);
	assert_eq!(cs.columns.len(), columns);
	assert_eq!(cs.local_openings.len(), openings);
}

#[test]
fn test_inclusion_declared_at_later_round() {
	let mut cs = ConstraintSystem::new();
	let t = cs.insert_commit(0, "T", 8);
	let s = cs.insert_commit(1, "S", 4);
	cs.register_prover_action(
		1,
		Box::new(AssignColumns {
			assignments: vec![(s, fps(&[1, 3, 5, 7]))],
		}),
	);
	cs.insert_inclusion(1, "LOOKUP", vec![t], vec![s]);
	compile_lookups(&mut cs);

	// Coins land one round after the table so every feeding column is fixed.
	let gamma_round = cs
		.coins
		.iter()
		.find(|(_, info)| info.name == "TABLE_T_GAMMA")
		.map(|(_, info)| info.round)
		.unwrap();
	assert_eq!(gamma_round, 2);

	let proof = prove(&cs, |run| {
		run.assign_column(t, fps(&[0, 1, 2, 3, 4, 5, 6, 7]));
	})
	.unwrap();

	verify(&cs, &proof).unwrap();
}
