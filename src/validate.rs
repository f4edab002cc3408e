//! This module contains the validation engine: a pure function from a
//! [Puzzle] to per-cell error flags and a valid/complete verdict.
//!
//! Validation checks uniqueness over three partition families - rows, columns
//! and boxes - plus any extra partitions the variant defines (the diagonals
//! for X boards, the five overlapping regions for Samurai boards). Cells
//! whose guess style is a small (pencil-mark) style act as wildcards: they
//! never conflict with anything and never satisfy completeness.

use crate::Puzzle;
use crate::geometry::{self, Partition};
use crate::variant::{SAMURAI_REGIONS, SAMURAI_REGION_SIZE, Variant};

use std::collections::HashSet;

/// The outcome of one validation pass: a per-cell error flag for every cell
/// of the board, plus the derived valid and complete signals. This is
/// transient derived state - it is recomputed on every pass and never
/// persisted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Validation {
    flags: Vec<Vec<bool>>,
    is_valid: bool,
    is_complete: bool
}

impl Validation {

    fn all_clear(height: usize, width: usize) -> Validation {
        Validation {
            flags: vec![vec![false; width]; height],
            is_valid: true,
            is_complete: false
        }
    }

    /// Indicates whether no uniqueness partition contains a conflict.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Indicates whether every validated cell holds a non-empty value that is
    /// not a pencil-mark annotation. On Samurai boards only the cells of the
    /// five regions count; for an unchecked board this is always `false`.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Indicates whether the board is solved, i.e. both valid and complete.
    pub fn is_solved(&self) -> bool {
        self.is_valid && self.is_complete
    }

    /// Indicates whether the cell at the given position is part of at least
    /// one conflicting partition. Out-of-range coordinates yield `false`.
    pub fn is_errored(&self, column: usize, row: usize) -> bool {
        self.flags.get(row)
            .and_then(|flags_row| flags_row.get(column))
            .copied()
            .unwrap_or(false)
    }

    /// Gets the error flags of all cells, as rows in top-to-bottom,
    /// left-to-right order.
    pub fn flags(&self) -> &Vec<Vec<bool>> {
        &self.flags
    }
}

/// Builds one partition per group of the document, containing the cells whose
/// stored group index references that group. Used for boards whose boxes are
/// not axis-aligned rectangles.
fn freeform_partitions(puzzle: &Puzzle) -> Vec<Partition> {
    let mut partitions = vec![Partition::new(); puzzle.groups().len()];

    for (row, cells_row) in puzzle.cells().iter().enumerate() {
        for (column, cell) in cells_row.iter().enumerate() {
            if let Some(partition) = partitions.get_mut(cell.group_index) {
                partition.push((column, row));
            }
        }
    }

    partitions
}

/// Checks whether the given partition contains two cells with the same
/// non-empty value, where pencil-mark cells are wildcards that never
/// conflict. Coordinates outside the board are skipped.
fn partition_has_conflict(puzzle: &Puzzle, partition: &Partition) -> bool {
    let mut seen = HashSet::new();

    for &(column, row) in partition {
        let cell = match puzzle.cell(column, row) {
            Ok(cell) => cell,
            Err(_) => continue
        };

        if cell.value.is_empty() || puzzle.is_small_entry(cell) {
            continue;
        }

        if !seen.insert(cell.value.as_str()) {
            return true;
        }
    }

    false
}

/// Builds every uniqueness partition the given variant defines on a board of
/// the given dimensions, and separately the row partitions that together
/// cover all validated cells (used for the completeness check). For Samurai
/// boards the row/column/box partitions are repeated per region; overlap
/// cells are deliberately contained in several partitions.
fn partitions(puzzle: &Puzzle) -> (Vec<Partition>, Vec<Partition>) {
    let variant = puzzle.variant();
    let width = puzzle.width();
    let height = puzzle.height();
    let mut uniqueness = Vec::new();
    let mut coverage = Vec::new();

    if variant == Variant::Samurai {
        let (box_width, box_height) = (3, 3);

        for &(column, row) in SAMURAI_REGIONS.iter() {
            let rows = geometry::row_partitions(column, row,
                SAMURAI_REGION_SIZE, SAMURAI_REGION_SIZE);
            coverage.extend(rows.iter().cloned());
            uniqueness.extend(rows);
            uniqueness.extend(geometry::column_partitions(column, row,
                SAMURAI_REGION_SIZE, SAMURAI_REGION_SIZE));
            uniqueness.extend(geometry::box_partitions(column, row,
                SAMURAI_REGION_SIZE, SAMURAI_REGION_SIZE, box_width,
                box_height));
        }
    }
    else {
        let rows = geometry::row_partitions(0, 0, width, height);
        coverage.extend(rows.iter().cloned());
        uniqueness.extend(rows);
        uniqueness.extend(geometry::column_partitions(0, 0, width, height));

        if variant.checks_freeform_groups() {
            uniqueness.extend(freeform_partitions(puzzle));
        }
        else if let Some((box_width, box_height)) = variant.box_dimensions() {
            uniqueness.extend(geometry::box_partitions(0, 0, width, height,
                box_width, box_height));
        }

        if variant.has_diagonals() {
            uniqueness.extend(geometry::diagonal_partitions(width, height));
        }
    }

    (uniqueness, coverage)
}

/// Runs one full validation pass over the given document. For an unchecked
/// board ([Variant::Other]) this returns all-clear flags that are neither
/// errored nor complete. Otherwise every uniqueness partition of the variant
/// is checked; any conflict marks every member cell of that partition, and
/// flags are additive across partitions.
///
/// Validation is deterministic and pure: two calls on the same document yield
/// identical results.
pub fn validate(puzzle: &Puzzle) -> Validation {
    let mut validation = Validation::all_clear(puzzle.height(),
        puzzle.width());

    if !puzzle.variant().is_checked() {
        return validation;
    }

    let (uniqueness, coverage) = partitions(puzzle);

    for partition in &uniqueness {
        if partition_has_conflict(puzzle, partition) {
            validation.is_valid = false;

            for &(column, row) in partition {
                if let Some(flag) = validation.flags.get_mut(row)
                        .and_then(|flags_row| flags_row.get_mut(column)) {
                    *flag = true;
                }
            }
        }
    }

    validation.is_complete = coverage.iter()
        .flatten()
        .all(|&(column, row)| match puzzle.cell(column, row) {
            Ok(cell) =>
                !cell.value.is_empty() && !puzzle.is_small_entry(cell),
            Err(_) => true
        });

    validation
}
