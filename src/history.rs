//! This module contains the undo/redo history: a single linear, truncating
//! log of edits with a cursor.
//!
//! Two granularities of edits are recorded: a full snapshot pair of the
//! entire cell grid (used for bulk operations such as clearing every cell of
//! a guess style) and a single-cell value diff. Recording a new edit while
//! the cursor is not at the end truncates the remaining redo records - the
//! standard "new edit invalidates redo" semantics. Undoing or redoing past
//! the ends of the log is a no-op, not an error.

use crate::{Cell, Puzzle};

/// One recorded edit of the cell grid, applicable in both directions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Edit {

    /// A full snapshot pair of the entire cell grid, recorded for bulk
    /// operations.
    Full {

        /// The complete grid before the edit.
        before: Vec<Vec<Cell>>,

        /// The complete grid after the edit.
        after: Vec<Vec<Cell>>
    },

    /// A single-cell value edit.
    Cell {

        /// The column (x-coordinate) of the edited cell.
        column: usize,

        /// The row (y-coordinate) of the edited cell.
        row: usize,

        /// The cell's value before the edit.
        before: String,

        /// The cell's value after the edit.
        after: String
    }
}

impl Edit {

    fn apply_backward(&self, puzzle: &mut Puzzle) {
        // Edits are only ever applied to the document they were recorded on,
        // whose grid shape cannot have changed since (the log is cleared on
        // any structural replacement), so these cannot fail.

        match self {
            Edit::Full { before, .. } =>
                puzzle.set_cells(before.clone()).unwrap(),
            Edit::Cell { column, row, before, .. } =>
                puzzle.cell_mut(*column, *row).unwrap().value =
                    before.clone()
        }
    }

    fn apply_forward(&self, puzzle: &mut Puzzle) {
        match self {
            Edit::Full { after, .. } =>
                puzzle.set_cells(after.clone()).unwrap(),
            Edit::Cell { column, row, after, .. } =>
                puzzle.cell_mut(*column, *row).unwrap().value = after.clone()
        }
    }
}

/// A linear history of [Edit]s with a cursor. The cursor counts the number
/// of records currently applied to the document, i.e. it points just past
/// "the last applied record"; zero is the sentinel "before everything".
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EditLog {
    edits: Vec<Edit>,
    cursor: usize
}

impl EditLog {

    /// Creates a new, empty history.
    pub fn new() -> EditLog {
        EditLog {
            edits: Vec::new(),
            cursor: 0
        }
    }

    /// Records an edit that has just been applied to the document: truncates
    /// any existing redo records beyond the cursor, appends the new record
    /// and advances the cursor to point at it.
    pub fn record(&mut self, edit: Edit) {
        self.edits.truncate(self.cursor);
        self.edits.push(edit);
        self.cursor = self.edits.len();
    }

    /// Records a bulk edit as a full snapshot pair of the entire cell grid.
    /// See [EditLog::record].
    pub fn record_full(&mut self, before: Vec<Vec<Cell>>,
            after: Vec<Vec<Cell>>) {
        self.record(Edit::Full {
            before,
            after
        });
    }

    /// Records a single-cell value edit. See [EditLog::record].
    pub fn record_cell(&mut self, column: usize, row: usize, before: String,
            after: String) {
        self.record(Edit::Cell {
            column,
            row,
            before,
            after
        });
    }

    /// Indicates whether there is a record to undo.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Indicates whether there is a record to redo.
    pub fn can_redo(&self) -> bool {
        self.cursor < self.edits.len()
    }

    /// Applies the inverse of the record at the cursor to the given document
    /// and decrements the cursor. Returns `true` if a record was undone and
    /// `false` if the cursor was already before the first record, in which
    /// case the document is untouched.
    pub fn undo(&mut self, puzzle: &mut Puzzle) -> bool {
        if !self.can_undo() {
            return false;
        }

        self.cursor -= 1;
        self.edits[self.cursor].apply_backward(puzzle);
        true
    }

    /// Advances the cursor and applies the forward direction of the new
    /// current record to the given document. Returns `true` if a record was
    /// redone and `false` if the cursor was already at the last record, in
    /// which case the document is untouched.
    pub fn redo(&mut self, puzzle: &mut Puzzle) -> bool {
        if !self.can_redo() {
            return false;
        }

        self.edits[self.cursor].apply_forward(puzzle);
        self.cursor += 1;
        true
    }

    /// Discards all records and resets the cursor. Called whenever the
    /// document is structurally replaced (variant change, dimension change,
    /// file load).
    pub fn clear(&mut self) {
        self.edits.clear();
        self.cursor = 0;
    }

    /// Gets the number of records currently in the log, including undone
    /// records that could still be redone.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Indicates whether the log holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::variant::Variant;

    fn test_puzzle() -> Puzzle {
        Puzzle::with_dimensions(Variant::Other, 2, 2).unwrap()
    }

    fn write_cell(puzzle: &mut Puzzle, log: &mut EditLog, column: usize,
            row: usize, value: &str) {
        let before = puzzle.cell(column, row).unwrap().value.clone();
        puzzle.cell_mut(column, row).unwrap().value = String::from(value);
        log.record_cell(column, row, before, String::from(value));
    }

    #[test]
    fn undo_redo_round_trip_is_exact() {
        let mut puzzle = test_puzzle();
        let mut log = EditLog::new();

        write_cell(&mut puzzle, &mut log, 0, 0, "1");
        write_cell(&mut puzzle, &mut log, 1, 1, "2");

        let after = puzzle.clone();

        assert!(log.undo(&mut puzzle));
        assert_eq!("", puzzle.cell(1, 1).unwrap().value);
        assert_eq!("1", puzzle.cell(0, 0).unwrap().value);

        assert!(log.redo(&mut puzzle));
        assert_eq!(after, puzzle);
    }

    #[test]
    fn undo_past_first_record_is_noop() {
        let mut puzzle = test_puzzle();
        let mut log = EditLog::new();

        assert!(!log.undo(&mut puzzle));

        write_cell(&mut puzzle, &mut log, 0, 0, "1");

        assert!(log.undo(&mut puzzle));
        assert!(!log.undo(&mut puzzle));
        assert_eq!("", puzzle.cell(0, 0).unwrap().value);
    }

    #[test]
    fn redo_past_last_record_is_noop() {
        let mut puzzle = test_puzzle();
        let mut log = EditLog::new();

        assert!(!log.redo(&mut puzzle));

        write_cell(&mut puzzle, &mut log, 0, 0, "1");

        assert!(!log.redo(&mut puzzle));
        assert_eq!("1", puzzle.cell(0, 0).unwrap().value);
    }

    #[test]
    fn new_edits_truncate_redo_records() {
        let mut puzzle = test_puzzle();
        let mut log = EditLog::new();

        write_cell(&mut puzzle, &mut log, 0, 0, "1");
        write_cell(&mut puzzle, &mut log, 0, 0, "2");
        write_cell(&mut puzzle, &mut log, 0, 0, "3");

        assert!(log.undo(&mut puzzle));
        assert!(log.undo(&mut puzzle));
        assert_eq!("1", puzzle.cell(0, 0).unwrap().value);

        write_cell(&mut puzzle, &mut log, 0, 0, "4");

        assert!(!log.can_redo());
        assert!(!log.redo(&mut puzzle));
        assert_eq!(2, log.len());

        assert!(log.undo(&mut puzzle));
        assert_eq!("1", puzzle.cell(0, 0).unwrap().value);
        assert!(log.redo(&mut puzzle));
        assert_eq!("4", puzzle.cell(0, 0).unwrap().value);
    }

    #[test]
    fn full_records_restore_the_entire_grid() {
        let mut puzzle = test_puzzle();
        let mut log = EditLog::new();

        let before = puzzle.cells().clone();
        let mut after = before.clone();
        after[0][0].value = String::from("9");
        after[1][1].value = String::from("8");
        after[1][1].guess_index = 1;

        puzzle.set_cells(after.clone()).unwrap();
        log.record_full(before.clone(), after.clone());

        assert!(log.undo(&mut puzzle));
        assert_eq!(&before, puzzle.cells());

        assert!(log.redo(&mut puzzle));
        assert_eq!(&after, puzzle.cells());
        assert_eq!(1, puzzle.cell(1, 1).unwrap().guess_index);
    }

    #[test]
    fn clear_resets_the_log() {
        let mut puzzle = test_puzzle();
        let mut log = EditLog::new();

        write_cell(&mut puzzle, &mut log, 0, 0, "1");
        log.clear();

        assert!(log.is_empty());
        assert!(!log.can_undo());
        assert!(!log.can_redo());
        assert!(!log.undo(&mut puzzle));
        assert_eq!("1", puzzle.cell(0, 0).unwrap().value);
    }

    #[test]
    fn mixed_granularities_interleave() {
        let mut puzzle = test_puzzle();
        let mut log = EditLog::new();

        write_cell(&mut puzzle, &mut log, 0, 0, "1");

        let before = puzzle.cells().clone();
        let mut after = before.clone();

        for row in after.iter_mut() {
            for cell in row.iter_mut() {
                cell.value.clear();
            }
        }

        puzzle.set_cells(after.clone()).unwrap();
        log.record_full(before, after);

        assert!(log.undo(&mut puzzle));
        assert_eq!("1", puzzle.cell(0, 0).unwrap().value);
        assert!(log.undo(&mut puzzle));
        assert_eq!("", puzzle.cell(0, 0).unwrap().value);
        assert!(log.redo(&mut puzzle));
        assert!(log.redo(&mut puzzle));
        assert_eq!("", puzzle.cell(0, 0).unwrap().value);
    }
}
