//! This module contains the [Session] type, the intended entry point for
//! applications. A session owns the current document, the undo/redo log, the
//! latest validation result and the focus/timer state, and exposes one
//! method per user gesture of the presentation layer.
//!
//! Every mutation follows the same control flow: the edit is applied to the
//! document, recorded in the [EditLog] where the edit granularities allow
//! it, and the mutated document is re-validated so the presentation layer
//! can always render the current per-cell error flags.

use crate::{GuessStyle, NORMAL_STYLE, Puzzle};
use crate::error::{BoardError, BoardResult, LoadResult};
use crate::history::EditLog;
use crate::migrate;
use crate::validate::{self, Validation};
use crate::variant::Variant;

use std::collections::HashSet;

/// The headline state of a session, surfaced to the presentation layer after
/// every validation pass.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {

    /// The board is valid and complete. Any running timer has been stopped.
    Solved {

        /// The play time accumulated until the solving edit, in seconds.
        elapsed_seconds: u64
    },

    /// At least one uniqueness partition contains a conflict.
    ErrorsPresent,

    /// No conflicts, but the board is not filled yet.
    InProgress
}

/// How a select gesture combines with the current selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SelectionMode {

    /// The given cells are added to the selection.
    Add,

    /// The given cells are removed from the selection.
    Subtract
}

/// Toggles every character of `text` in the sorted pencil-mark set `marks`:
/// characters already present are removed, new ones are inserted. The result
/// is kept sorted so that the stored representation is canonical.
fn toggle_marks(marks: &str, text: &str) -> String {
    let mut marks: Vec<char> = marks.chars().collect();

    for c in text.chars() {
        if let Some(position) = marks.iter().position(|&mark| mark == c) {
            marks.remove(position);
        }
        else {
            marks.push(c);
        }
    }

    marks.sort_unstable();
    marks.into_iter().collect()
}

/// An interactive editing session over a single [Puzzle] document.
///
/// The session is single-threaded and event-driven: every method call is one
/// atomic event step, and the one-second [tick](Session::tick) is the only
/// autonomous source of state change. The timer only runs while the hosting
/// window holds input focus *and* the solving timer is active; both flags
/// are session state and are never persisted.
pub struct Session {
    puzzle: Puzzle,
    log: EditLog,
    validation: Validation,
    active_guess: usize,
    selection: HashSet<(usize, usize)>,
    has_focus: bool,
    timer_active: bool
}

impl Session {

    /// Creates a session over a fresh default document (a classic 9x9
    /// board). The normal guess style is active and the timer is running.
    pub fn new() -> Session {
        Session::with_puzzle(Puzzle::new(Variant::Default))
    }

    /// Creates a session over the given document.
    pub fn with_puzzle(puzzle: Puzzle) -> Session {
        let validation = validate::validate(&puzzle);

        Session {
            puzzle,
            log: EditLog::new(),
            validation,
            active_guess: NORMAL_STYLE,
            selection: HashSet::new(),
            has_focus: true,
            timer_active: true
        }
    }

    /// Gets a reference to the current document.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Gets the validation result for the current document. This is updated
    /// after every mutation.
    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    /// Gets the headline verdict for the current document.
    pub fn verdict(&self) -> Verdict {
        if self.validation.is_solved() {
            Verdict::Solved {
                elapsed_seconds: self.puzzle.elapsed_seconds()
            }
        }
        else if !self.validation.is_valid() {
            Verdict::ErrorsPresent
        }
        else {
            Verdict::InProgress
        }
    }

    fn revalidate(&mut self) {
        let was_solved = self.validation.is_solved();
        self.validation = validate::validate(&self.puzzle);

        if self.validation.is_solved() && !was_solved {
            log::info!("puzzle solved after {} seconds",
                self.puzzle.elapsed_seconds());
            self.timer_active = false;
        }
    }

    /// Replaces the current document wholesale: the history is reset, the
    /// active guess style is clamped into range and the new document is
    /// validated.
    fn replace_document(&mut self, puzzle: Puzzle) {
        self.puzzle = puzzle;
        self.log.clear();
        self.selection.clear();
        self.active_guess =
            self.active_guess.min(self.puzzle.guesses().len() - 1);
        self.validation = validate::validate(&self.puzzle);
        log::debug!("document replaced: {:?} board of {}x{}",
            self.puzzle.variant(), self.puzzle.height(), self.puzzle.width());
    }

    /// Gets the index of the guess style new input is entered with.
    pub fn active_guess(&self) -> usize {
        self.active_guess
    }

    /// Selects the guess style new input is entered with.
    ///
    /// # Errors
    ///
    /// If `index` does not refer to an existing guess style. In that case,
    /// `BoardError::InvalidIndex` is returned.
    pub fn set_active_guess(&mut self, index: usize) -> BoardResult<()> {
        if index >= self.puzzle.guesses().len() {
            return Err(BoardError::InvalidIndex);
        }

        self.active_guess = index;
        Ok(())
    }

    /// Applies raw text input to the cell at the given position, stamping it
    /// with the active guess style. With a normal style active the text
    /// replaces the cell's value; with a small (pencil-mark) style active
    /// each input character is toggled in the cell's sorted annotation set.
    /// The edit is recorded as a single-cell diff and the document is
    /// re-validated. Writing a value identical to the current one records
    /// nothing.
    ///
    /// # Errors
    ///
    /// * `BoardError::OutOfBounds` if the coordinates lie outside the board.
    /// * `BoardError::NotEditable` if the cell's current guess style refuses
    /// edits.
    pub fn set_cell_value(&mut self, column: usize, row: usize, text: &str)
            -> BoardResult<()> {
        let small = self.puzzle.guesses()[self.active_guess].is_small;
        let cell = self.puzzle.cell(column, row)?;

        if cell.guess_index >= 0 {
            let editable = self.puzzle.guesses()
                .get(cell.guess_index as usize)
                .map(|style| style.editable)
                .unwrap_or(true);

            if !editable {
                return Err(BoardError::NotEditable);
            }
        }

        let before = cell.value.clone();
        let after = if small {
            toggle_marks(&before, text)
        }
        else {
            String::from(text)
        };

        if after == before {
            return Ok(());
        }

        let active_guess = self.active_guess;
        let cell = self.puzzle.cell_mut(column, row).unwrap();
        cell.value = after.clone();
        cell.guess_index = if after.is_empty() {
            -1
        }
        else {
            active_guess as i32
        };

        self.log.record_cell(column, row, before, after);
        self.revalidate();
        Ok(())
    }

    /// Clears the value of every cell bearing the guess style with the given
    /// index, resetting those cells to the unset style. The bulk edit is
    /// recorded as a full snapshot pair. Clearing a style no cell bears
    /// records nothing.
    ///
    /// # Errors
    ///
    /// If `index` does not refer to an existing guess style. In that case,
    /// `BoardError::InvalidIndex` is returned.
    pub fn clear_guess_cells(&mut self, index: usize) -> BoardResult<()> {
        if index >= self.puzzle.guesses().len() {
            return Err(BoardError::InvalidIndex);
        }

        let before = self.puzzle.cells().clone();
        let mut after = before.clone();
        let mut changed = false;

        for row in after.iter_mut() {
            for cell in row.iter_mut() {
                if cell.guess_index == index as i32 {
                    cell.value.clear();
                    cell.guess_index = -1;
                    changed = true;
                }
            }
        }

        if !changed {
            return Ok(());
        }

        // The snapshot has the current shape, so this cannot fail.
        self.puzzle.set_cells(after.clone()).unwrap();
        self.log.record_full(before, after);
        self.revalidate();
        Ok(())
    }

    /// Replaces the document with a fresh board of the given dimensions,
    /// keeping the current variant. The history is reset.
    ///
    /// # Errors
    ///
    /// If `height` or `width` is zero, `BoardError::InvalidDimensions` is
    /// returned.
    pub fn set_dimensions(&mut self, height: usize, width: usize)
            -> BoardResult<()> {
        let puzzle =
            Puzzle::with_dimensions(self.puzzle.variant(), height, width)?;
        self.replace_document(puzzle);
        Ok(())
    }

    /// Replaces the document with a fresh board of the given variant and
    /// that variant's default dimensions. The history is reset.
    pub fn set_variant(&mut self, variant: Variant) {
        self.replace_document(Puzzle::new(variant));
    }

    /// Appends a new group with the given color and returns its index.
    pub fn add_group(&mut self, color: &str) -> usize {
        self.puzzle.add_group(color)
    }

    /// Deletes the group with the given index, compacting every cell's group
    /// reference. The history is reset, since recorded snapshots may refer
    /// to the deleted index, and the document is re-validated.
    ///
    /// # Errors
    ///
    /// See [Puzzle::delete_group].
    pub fn delete_group(&mut self, index: usize) -> BoardResult<()> {
        self.puzzle.delete_group(index)?;
        self.log.clear();
        self.revalidate();
        Ok(())
    }

    /// Sets the display color of the group with the given index.
    ///
    /// # Errors
    ///
    /// If `index` does not refer to an existing group. In that case,
    /// `BoardError::InvalidIndex` is returned.
    pub fn set_group_color(&mut self, index: usize, color: &str)
            -> BoardResult<()> {
        self.puzzle.group_mut(index)?.color = String::from(color);
        Ok(())
    }

    /// Moves the cell at the given position into the group with the given
    /// index and re-validates, since freeform box partitions may have
    /// changed.
    ///
    /// # Errors
    ///
    /// * `BoardError::OutOfBounds` if the coordinates lie outside the board.
    /// * `BoardError::InvalidIndex` if `group_index` does not refer to an
    /// existing group.
    pub fn set_group_of_cell(&mut self, column: usize, row: usize,
            group_index: usize) -> BoardResult<()> {
        if group_index >= self.puzzle.groups().len() {
            return Err(BoardError::InvalidIndex);
        }

        self.puzzle.cell_mut(column, row)?.group_index = group_index;
        self.revalidate();
        Ok(())
    }

    /// Sets or clears the display color override of the cell at the given
    /// position.
    ///
    /// # Errors
    ///
    /// If the coordinates lie outside the board. In that case,
    /// `BoardError::OutOfBounds` is returned.
    pub fn set_cell_color(&mut self, column: usize, row: usize,
            color: Option<String>) -> BoardResult<()> {
        self.puzzle.cell_mut(column, row)?.color_override = color;
        Ok(())
    }

    /// Gets the coordinates of the currently selected cells, in
    /// `(column, row)` form.
    pub fn selection(&self) -> &HashSet<(usize, usize)> {
        &self.selection
    }

    /// Applies a select gesture: the given coordinates are added to or
    /// removed from the selection, depending on the mode. Coordinates outside
    /// the board are ignored, so the selection only ever contains valid
    /// cells.
    pub fn select_cells(&mut self, coordinates: &[(usize, usize)],
            mode: SelectionMode) {
        for &(column, row) in coordinates {
            if column >= self.puzzle.width() || row >= self.puzzle.height() {
                continue;
            }

            match mode {
                SelectionMode::Add => {
                    self.selection.insert((column, row));
                },
                SelectionMode::Subtract => {
                    self.selection.remove(&(column, row));
                }
            }
        }
    }

    /// Deselects all cells.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Moves every selected cell into the group with the given index and
    /// re-validates. The selection itself is kept, so further group edits can
    /// be applied to the same cells.
    ///
    /// # Errors
    ///
    /// If `group_index` does not refer to an existing group. In that case,
    /// `BoardError::InvalidIndex` is returned.
    pub fn set_group_of_selection(&mut self, group_index: usize)
            -> BoardResult<()> {
        if group_index >= self.puzzle.groups().len() {
            return Err(BoardError::InvalidIndex);
        }

        for &(column, row) in &self.selection {
            // Selected coordinates are bounds-checked on insertion and the
            // selection is cleared whenever the document is replaced, so
            // these lookups cannot fail.
            self.puzzle.cell_mut(column, row).unwrap().group_index =
                group_index;
        }

        self.revalidate();
        Ok(())
    }

    /// Appends a new guess style and returns its index.
    pub fn add_guess(&mut self, style: GuessStyle) -> usize {
        self.puzzle.add_guess(style)
    }

    /// Deletes the guess style with the given index, compacting every cell's
    /// guess reference. The history is reset, since recorded snapshots may
    /// refer to the deleted index, and the document is re-validated.
    ///
    /// # Errors
    ///
    /// See [Puzzle::delete_guess].
    pub fn delete_guess(&mut self, index: usize) -> BoardResult<()> {
        self.puzzle.delete_guess(index)?;
        self.log.clear();
        self.active_guess =
            self.active_guess.min(self.puzzle.guesses().len() - 1);
        self.revalidate();
        Ok(())
    }

    /// Sets the display color of the guess style with the given index.
    ///
    /// # Errors
    ///
    /// If `index` does not refer to an existing guess style. In that case,
    /// `BoardError::InvalidIndex` is returned.
    pub fn set_guess_color(&mut self, index: usize, color: &str)
            -> BoardResult<()> {
        self.puzzle.guess_mut(index)?.color = String::from(color);
        Ok(())
    }

    /// Sets whether the guess style with the given index is a small
    /// (pencil-mark) style, and re-validates, since the wildcard set may
    /// have changed.
    ///
    /// # Errors
    ///
    /// If `index` does not refer to an existing guess style. In that case,
    /// `BoardError::InvalidIndex` is returned.
    pub fn set_guess_small(&mut self, index: usize, is_small: bool)
            -> BoardResult<()> {
        self.puzzle.guess_mut(index)?.is_small = is_small;
        self.revalidate();
        Ok(())
    }

    /// Sets whether cells bearing the guess style with the given index
    /// accept further edits.
    ///
    /// # Errors
    ///
    /// If `index` does not refer to an existing guess style. In that case,
    /// `BoardError::InvalidIndex` is returned.
    pub fn set_guess_editable(&mut self, index: usize, editable: bool)
            -> BoardResult<()> {
        self.puzzle.guess_mut(index)?.editable = editable;
        Ok(())
    }

    /// Undoes the last applied edit, if any, and re-validates. Returns
    /// `true` if an edit was undone.
    pub fn undo(&mut self) -> bool {
        if self.log.undo(&mut self.puzzle) {
            self.revalidate();
            true
        }
        else {
            false
        }
    }

    /// Redoes the last undone edit, if any, and re-validates. Returns `true`
    /// if an edit was redone.
    pub fn redo(&mut self) -> bool {
        if self.log.redo(&mut self.puzzle) {
            self.revalidate();
            true
        }
        else {
            false
        }
    }

    /// Serializes the current document in the persisted JSON format, at the
    /// current schema version.
    pub fn save(&self) -> String {
        // The document model contains nothing serde_json cannot represent.
        serde_json::to_string(&self.puzzle)
            .expect("document serialization cannot fail")
    }

    /// Replaces the document with the one persisted in the given JSON
    /// string, migrating older schema versions. The history is reset.
    ///
    /// # Errors
    ///
    /// See [migrate::load].
    pub fn load(&mut self, contents: &str) -> LoadResult<()> {
        let puzzle = migrate::load(contents)?;
        self.replace_document(puzzle);
        Ok(())
    }

    /// Records whether the hosting window currently holds input focus. The
    /// timer is suspended while it does not.
    pub fn set_focus(&mut self, has_focus: bool) {
        self.has_focus = has_focus;
    }

    /// Starts or stops the solving timer. Stopping does not reset the
    /// accumulated elapsed time.
    pub fn set_timer_active(&mut self, timer_active: bool) {
        self.timer_active = timer_active;
    }

    /// Indicates whether the periodic tick currently accumulates play time:
    /// the window holds focus and the solving timer is active.
    pub fn is_timer_running(&self) -> bool {
        self.has_focus && self.timer_active
    }

    /// Advances the play time by one second. Called by the host on its
    /// periodic one-second timer; it is a no-op unless
    /// [Session::is_timer_running] holds and the puzzle is unsolved.
    pub fn tick(&mut self) {
        if self.is_timer_running() && !self.validation.is_solved() {
            self.puzzle
                .set_elapsed_seconds(self.puzzle.elapsed_seconds() + 1);
        }
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}
