// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_codeblock_attributes)]

//! This crate implements the core of an interactive Sudoku board editor and
//! player. It supports the following key features:
//!
//! * A versioned puzzle document with arbitrary dimensions, freeform cell
//! groups, and configurable guess styles (including pencil marks)
//! * Saving and loading documents as JSON, with a best-effort migration chain
//! for files written by older schema versions
//! * Checking validity and completeness of a board under several common rule
//! sets (see [Variant](variant::Variant)), producing per-cell error flags
//! * A linear undo/redo history over single-cell edits and bulk edits
//!
//! Rendering, input handling and file dialogs are deliberately not part of
//! this crate. A presentation layer drives an [edit session](session::Session)
//! and renders the resulting document and [validation](validate::Validation).
//!
//! # The document
//!
//! A [Puzzle] owns everything that is persisted: dimensions, cells, groups,
//! guess styles, the variant and the elapsed play time. Cells reference
//! groups and guess styles by dense indices, which are kept free of dangling
//! references by compacting them on every deletion.
//!
//! ```
//! use sudoku_board::Puzzle;
//! use sudoku_board::variant::Variant;
//!
//! let mut puzzle = Puzzle::new(Variant::Default);
//! assert_eq!(9, puzzle.width());
//! assert_eq!(9, puzzle.height());
//!
//! puzzle.cell_mut(3, 0).unwrap().value = String::from("5");
//! assert_eq!("5", puzzle.cell(3, 0).unwrap().value);
//! ```
//!
//! # Checking a board
//!
//! Validation is a pure function from a document to per-cell error flags and
//! a valid/complete verdict. Cells whose guess style is a pencil-mark style
//! never conflict with anything.
//!
//! ```
//! use sudoku_board::Puzzle;
//! use sudoku_board::validate::validate;
//! use sudoku_board::variant::Variant;
//!
//! let mut puzzle = Puzzle::new(Variant::Default);
//! puzzle.cell_mut(0, 0).unwrap().value = String::from("1");
//! puzzle.cell_mut(5, 0).unwrap().value = String::from("1");
//!
//! let validation = validate(&puzzle);
//! assert!(!validation.is_valid());
//! assert!(validation.is_errored(3, 0));
//! ```
//!
//! # Editing interactively
//!
//! The [Session](session::Session) type ties the document, the
//! [EditLog](history::EditLog) and validation together, one method per user
//! gesture, and is the intended entry point for applications.

pub mod error;
pub mod geometry;
pub mod history;
pub mod migrate;
pub mod session;
pub mod validate;
pub mod variant;

use crate::error::{BoardError, BoardResult};
use crate::variant::Variant;

use serde::{Deserialize, Serialize};

/// The schema version written by this crate. Documents declaring an older
/// version are upgraded by [migrate](migrate::migrate) on load.
pub const CURRENT_VERSION: f64 = 1.5;

/// The index of the permanent given/blank guess style. It can never be
/// deleted.
pub const GIVEN_STYLE: usize = 0;

/// The index of the default normal guess style.
pub const NORMAL_STYLE: usize = 1;

/// The index of the default small (pencil-mark) guess style.
pub const SMALL_STYLE: usize = 2;

const DEFAULT_GROUP_COLOR: &str = "#c0c0c0";
const GIVEN_STYLE_COLOR: &str = "#000000";
const NORMAL_STYLE_COLOR: &str = "#0000ff";
const SMALL_STYLE_COLOR: &str = "#808080";

/// The height and width of a board, in cells. Both are always positive.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Dimensions {

    /// The number of rows of the board.
    pub height: usize,

    /// The number of columns of the board.
    pub width: usize
}

fn unset_guess_index() -> i32 {
    -1
}

/// One cell of the board. The transient per-cell error flag is *not* part of
/// this type; it is derived state owned by a
/// [Validation](crate::validate::Validation).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {

    /// The textual content of the cell: empty, a single filled character for
    /// normal entries, or a sorted set of characters for pencil marks.
    #[serde(default)]
    pub value: String,

    /// The index of the [GuessStyle] this cell's value was entered with, or
    /// -1 if the cell has never been written and defers to whichever style is
    /// currently active.
    #[serde(default = "unset_guess_index")]
    pub guess_index: i32,

    /// The index of the [Group] this cell belongs to.
    #[serde(default)]
    pub group_index: usize,

    /// An optional display color overriding the group color, absent by
    /// default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_override: Option<String>
}

impl Cell {

    /// Creates a new, empty cell belonging to the group with the given index.
    pub fn new(group_index: usize) -> Cell {
        Cell {
            value: String::new(),
            guess_index: unset_guess_index(),
            group_index,
            color_override: None
        }
    }
}

/// A freeform group of cells, referenced by index from [Cell::group_index].
/// Groups only carry display data; which cells belong to a group is stored on
/// the cells themselves.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Group {

    /// The display color of the group, in `#rrggbb` form.
    pub color: String
}

fn editable_default() -> bool {
    true
}

/// An input style a cell's value is tagged with, referenced by index from
/// [Cell::guess_index].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessStyle {

    /// The display color of values entered with this style, in `#rrggbb`
    /// form.
    pub color: String,

    /// Whether this is a small (pencil-mark) style. Values entered with a
    /// small style are annotations: they are excluded from uniqueness checks
    /// and do not count towards completeness.
    pub is_small: bool,

    /// Whether cells bearing this style accept further edits.
    #[serde(default = "editable_default")]
    pub editable: bool
}

fn default_guesses() -> Vec<GuessStyle> {
    vec![
        GuessStyle {
            color: String::from(GIVEN_STYLE_COLOR),
            is_small: false,
            editable: true
        },
        GuessStyle {
            color: String::from(NORMAL_STYLE_COLOR),
            is_small: false,
            editable: true
        },
        GuessStyle {
            color: String::from(SMALL_STYLE_COLOR),
            is_small: true,
            editable: true
        }
    ]
}

fn current_version() -> f64 {
    CURRENT_VERSION
}

fn default_dimensions() -> Dimensions {
    Dimensions {
        height: 9,
        width: 9
    }
}

/// The root document of an editing session: everything that is persisted to
/// a file. A document is created fresh (via [Puzzle::new]) or by
/// deserializing a file (via [migrate](crate::migrate::migrate)), and is
/// fully replaced, not patched, on variant change, dimension change or file
/// load.
///
/// Cells reference [Group]s and [GuessStyle]s by dense indices. The mutators
/// on this type keep those indices valid: deleting an entry compacts every
/// cell reference before the deletion is considered complete.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    #[serde(default = "current_version")]
    version: f64,
    #[serde(default = "default_dimensions")]
    dimensions: Dimensions,
    #[serde(rename = "type", default)]
    variant: Variant,
    #[serde(default)]
    elapsed_seconds: u64,
    #[serde(default)]
    cells: Vec<Vec<Cell>>,
    #[serde(default)]
    groups: Vec<Group>,
    #[serde(default = "default_guesses")]
    guesses: Vec<GuessStyle>
}

impl Puzzle {

    /// Creates a fresh document of the given variant with that variant's
    /// default dimensions, default groups and the three default guess styles.
    pub fn new(variant: Variant) -> Puzzle {
        let (height, width) = variant.default_dimensions();

        // Default dimensions of every variant are positive, so this cannot
        // fail.
        Puzzle::with_dimensions(variant, height, width).unwrap()
    }

    /// Creates a fresh document of the given variant and dimensions. If the
    /// variant tiles the board into boxes, one group per box is created and
    /// cells are assigned to them; otherwise a single group holds every cell.
    ///
    /// # Errors
    ///
    /// If `height` or `width` is zero, `BoardError::InvalidDimensions` is
    /// returned.
    pub fn with_dimensions(variant: Variant, height: usize, width: usize)
            -> BoardResult<Puzzle> {
        if height == 0 || width == 0 {
            return Err(BoardError::InvalidDimensions);
        }

        let (groups, cells) = match variant.box_dimensions() {
            Some((box_width, box_height))
                    if width % box_width == 0 && height % box_height == 0 => {
                let group_count =
                    (width / box_width) * (height / box_height);
                let groups = vec![
                    Group {
                        color: String::from(DEFAULT_GROUP_COLOR)
                    };
                    group_count
                ];
                let cells = (0..height)
                    .map(|row| (0..width)
                        .map(|column| Cell::new(geometry::box_index(
                            column, row, box_width, box_height, width)))
                        .collect())
                    .collect();
                (groups, cells)
            },
            _ => {
                let groups = vec![
                    Group {
                        color: String::from(DEFAULT_GROUP_COLOR)
                    }
                ];
                let cells = vec![vec![Cell::new(0); width]; height];
                (groups, cells)
            }
        };

        Ok(Puzzle {
            version: CURRENT_VERSION,
            dimensions: Dimensions {
                height,
                width
            },
            variant,
            elapsed_seconds: 0,
            cells,
            groups,
            guesses: default_guesses()
        })
    }

    /// Gets the schema version this document declares.
    pub fn version(&self) -> f64 {
        self.version
    }

    /// Gets the dimensions of the board.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Gets the width (number of columns) of the board.
    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    /// Gets the height (number of rows) of the board.
    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    /// Gets the variant whose rules this board is played under.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Gets the accumulated play time, in seconds.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Sets the accumulated play time, in seconds.
    pub fn set_elapsed_seconds(&mut self, elapsed_seconds: u64) {
        self.elapsed_seconds = elapsed_seconds;
    }

    /// Gets a reference to the cell at the specified position.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the desired cell. Must be in
    /// the range `[0, width[`.
    /// * `row`: The row (y-coordinate) of the desired cell. Must be in the
    /// range `[0, height[`.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `BoardError::OutOfBounds` is returned.
    pub fn cell(&self, column: usize, row: usize) -> BoardResult<&Cell> {
        if column >= self.dimensions.width || row >= self.dimensions.height {
            Err(BoardError::OutOfBounds)
        }
        else {
            Ok(&self.cells[row][column])
        }
    }

    /// Gets a mutable reference to the cell at the specified position. See
    /// [Puzzle::cell] for the arguments and errors.
    pub fn cell_mut(&mut self, column: usize, row: usize)
            -> BoardResult<&mut Cell> {
        if column >= self.dimensions.width || row >= self.dimensions.height {
            Err(BoardError::OutOfBounds)
        }
        else {
            Ok(&mut self.cells[row][column])
        }
    }

    /// Gets a reference to the grid of cells, as rows of cells in top-to-
    /// bottom, left-to-right order. The grid always has exactly
    /// [Puzzle::height] rows of exactly [Puzzle::width] cells.
    pub fn cells(&self) -> &Vec<Vec<Cell>> {
        &self.cells
    }

    /// Replaces the entire grid of cells. The new grid must have the same
    /// shape as the current one.
    ///
    /// # Errors
    ///
    /// If the new grid does not have exactly [Puzzle::height] rows of exactly
    /// [Puzzle::width] cells. In that case, `BoardError::InvalidDimensions`
    /// is returned.
    pub fn set_cells(&mut self, cells: Vec<Vec<Cell>>) -> BoardResult<()> {
        if cells.len() != self.dimensions.height ||
                cells.iter().any(|row| row.len() != self.dimensions.width) {
            return Err(BoardError::InvalidDimensions);
        }

        self.cells = cells;
        Ok(())
    }

    /// Gets the groups of this document, in index order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Gets a mutable reference to the group with the given index.
    ///
    /// # Errors
    ///
    /// If `index` does not refer to an existing group. In that case,
    /// `BoardError::InvalidIndex` is returned.
    pub fn group_mut(&mut self, index: usize) -> BoardResult<&mut Group> {
        self.groups.get_mut(index).ok_or(BoardError::InvalidIndex)
    }

    /// Appends a new group with the given color and returns its index.
    pub fn add_group(&mut self, color: &str) -> usize {
        self.groups.push(Group {
            color: String::from(color)
        });
        self.groups.len() - 1
    }

    /// Deletes the group with the given index. Every cell whose group index
    /// was greater than or equal to `index` is decremented (clamped at 0), so
    /// group indices remain a dense compaction without dangling references.
    ///
    /// # Errors
    ///
    /// * `BoardError::InvalidIndex` if `index` does not refer to an existing
    /// group.
    /// * `BoardError::ProtectedIndex` if this is the last remaining group.
    pub fn delete_group(&mut self, index: usize) -> BoardResult<()> {
        if index >= self.groups.len() {
            return Err(BoardError::InvalidIndex);
        }

        if self.groups.len() == 1 {
            return Err(BoardError::ProtectedIndex);
        }

        self.groups.remove(index);

        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                if cell.group_index >= index {
                    cell.group_index = cell.group_index.saturating_sub(1);
                }
            }
        }

        Ok(())
    }

    /// Gets the guess styles of this document, in index order.
    pub fn guesses(&self) -> &[GuessStyle] {
        &self.guesses
    }

    /// Gets a mutable reference to the guess style with the given index.
    ///
    /// # Errors
    ///
    /// If `index` does not refer to an existing guess style. In that case,
    /// `BoardError::InvalidIndex` is returned.
    pub fn guess_mut(&mut self, index: usize) -> BoardResult<&mut GuessStyle> {
        self.guesses.get_mut(index).ok_or(BoardError::InvalidIndex)
    }

    /// Appends a new guess style and returns its index.
    pub fn add_guess(&mut self, style: GuessStyle) -> usize {
        self.guesses.push(style);
        self.guesses.len() - 1
    }

    /// Deletes the guess style with the given index. Every cell whose guess
    /// index was greater than or equal to `index` is decremented, so guess
    /// indices remain free of dangling references. Unset cells (index -1) are
    /// not affected.
    ///
    /// # Errors
    ///
    /// * `BoardError::InvalidIndex` if `index` does not refer to an existing
    /// guess style.
    /// * `BoardError::ProtectedIndex` if `index` is 0, the permanent
    /// given/blank style.
    pub fn delete_guess(&mut self, index: usize) -> BoardResult<()> {
        if index >= self.guesses.len() {
            return Err(BoardError::InvalidIndex);
        }

        if index == GIVEN_STYLE {
            return Err(BoardError::ProtectedIndex);
        }

        self.guesses.remove(index);

        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                if cell.guess_index >= index as i32 {
                    cell.guess_index -= 1;
                }
            }
        }

        Ok(())
    }

    /// Indicates whether the given cell's value is a pencil-mark annotation,
    /// i.e. whether the style it was entered with is a small style. Unset
    /// cells (guess index -1) are treated as normal entries.
    pub fn is_small_entry(&self, cell: &Cell) -> bool {
        cell.guess_index >= 0 &&
            self.guesses.get(cell.guess_index as usize)
                .map(|style| style.is_small)
                .unwrap_or(false)
    }

    /// Stamps this document with the current schema version. Used by the
    /// migration chain after all steps have been applied.
    pub(crate) fn stamp_current_version(&mut self) {
        self.version = CURRENT_VERSION;
    }

    /// Repairs a freshly deserialized document so that the repository-wide
    /// invariants hold: the cell grid has exactly the declared shape (missing
    /// cells are filled in empty, excess cells are dropped), at least one
    /// group and the default guess styles exist, and every cell's group and
    /// guess indices are within range. This is the best-effort tolerance for
    /// hand-edited or very old files.
    pub(crate) fn normalize(&mut self) {
        if self.dimensions.height == 0 {
            self.dimensions.height = 9;
        }

        if self.dimensions.width == 0 {
            self.dimensions.width = 9;
        }

        if self.groups.is_empty() {
            self.groups.push(Group {
                color: String::from(DEFAULT_GROUP_COLOR)
            });
        }

        if self.guesses.is_empty() {
            self.guesses = default_guesses();
        }

        self.cells.truncate(self.dimensions.height);

        for row in self.cells.iter_mut() {
            row.truncate(self.dimensions.width);

            while row.len() < self.dimensions.width {
                row.push(Cell::new(0));
            }
        }

        while self.cells.len() < self.dimensions.height {
            self.cells.push(vec![Cell::new(0); self.dimensions.width]);
        }

        let group_count = self.groups.len();
        let guess_count = self.guesses.len() as i32;

        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                if cell.group_index >= group_count {
                    cell.group_index = group_count - 1;
                }

                if cell.guess_index >= guess_count || cell.guess_index < -1 {
                    cell.guess_index = -1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn fresh_default_board_has_expected_shape() {
        let puzzle = Puzzle::new(Variant::Default);

        assert_eq!(9, puzzle.width());
        assert_eq!(9, puzzle.height());
        assert_eq!(9, puzzle.cells().len());
        assert_eq!(9, puzzle.groups().len());
        assert_eq!(3, puzzle.guesses().len());
        assert_eq!(CURRENT_VERSION, puzzle.version());
        assert_eq!(0, puzzle.elapsed_seconds());
    }

    #[test]
    fn fresh_board_assigns_cells_to_box_groups() {
        let puzzle = Puzzle::new(Variant::Default);

        assert_eq!(0, puzzle.cell(1, 1).unwrap().group_index);
        assert_eq!(1, puzzle.cell(3, 0).unwrap().group_index);
        assert_eq!(4, puzzle.cell(4, 4).unwrap().group_index);
        assert_eq!(8, puzzle.cell(8, 8).unwrap().group_index);
    }

    #[test]
    fn fresh_other_board_has_single_group() {
        let puzzle = Puzzle::new(Variant::Other);

        assert_eq!(1, puzzle.groups().len());
        assert!(puzzle.cells().iter()
            .all(|row| row.iter().all(|cell| cell.group_index == 0)));
    }

    #[test]
    fn fresh_samurai_board_is_21_by_21() {
        let puzzle = Puzzle::new(Variant::Samurai);

        assert_eq!(21, puzzle.width());
        assert_eq!(21, puzzle.height());
        assert_eq!(49, puzzle.groups().len());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(Err(BoardError::InvalidDimensions),
            Puzzle::with_dimensions(Variant::Other, 0, 9));
        assert_eq!(Err(BoardError::InvalidDimensions),
            Puzzle::with_dimensions(Variant::Other, 9, 0));
    }

    #[test]
    fn cell_access_is_bounds_checked() {
        let mut puzzle = Puzzle::new(Variant::Default);

        assert!(puzzle.cell(8, 8).is_ok());
        assert_eq!(Err(BoardError::OutOfBounds), puzzle.cell(9, 0));
        assert_eq!(Err(BoardError::OutOfBounds), puzzle.cell(0, 9));
        assert!(puzzle.cell_mut(9, 9).is_err());
    }

    #[test]
    fn delete_group_compacts_cell_references() {
        let mut puzzle = Puzzle::with_dimensions(Variant::Other, 2, 3)
            .unwrap();

        for _ in 0..4 {
            puzzle.add_group("#123456");
        }

        assert_eq!(5, puzzle.groups().len());

        puzzle.cell_mut(0, 0).unwrap().group_index = 4;
        puzzle.cell_mut(1, 0).unwrap().group_index = 2;
        puzzle.cell_mut(2, 0).unwrap().group_index = 1;

        puzzle.delete_group(2).unwrap();

        assert_eq!(4, puzzle.groups().len());
        assert_eq!(3, puzzle.cell(0, 0).unwrap().group_index);
        assert_eq!(1, puzzle.cell(1, 0).unwrap().group_index);
        assert_eq!(1, puzzle.cell(2, 0).unwrap().group_index);

        // All references must remain within range, with no gaps possible.

        assert!(puzzle.cells().iter()
            .all(|row| row.iter()
                .all(|cell| cell.group_index < puzzle.groups().len())));
    }

    #[test]
    fn delete_group_zero_clamps_references() {
        let mut puzzle = Puzzle::with_dimensions(Variant::Other, 1, 2)
            .unwrap();
        puzzle.add_group("#123456");
        puzzle.cell_mut(1, 0).unwrap().group_index = 1;

        puzzle.delete_group(0).unwrap();

        assert_eq!(1, puzzle.groups().len());
        assert_eq!(0, puzzle.cell(0, 0).unwrap().group_index);
        assert_eq!(0, puzzle.cell(1, 0).unwrap().group_index);
    }

    #[test]
    fn last_group_cannot_be_deleted() {
        let mut puzzle = Puzzle::with_dimensions(Variant::Other, 1, 1)
            .unwrap();

        assert_eq!(Err(BoardError::ProtectedIndex), puzzle.delete_group(0));
        assert_eq!(Err(BoardError::InvalidIndex), puzzle.delete_group(1));
    }

    #[test]
    fn delete_guess_compacts_cell_references() {
        let mut puzzle = Puzzle::with_dimensions(Variant::Other, 1, 4)
            .unwrap();

        puzzle.cell_mut(0, 0).unwrap().guess_index = -1;
        puzzle.cell_mut(1, 0).unwrap().guess_index = 1;
        puzzle.cell_mut(2, 0).unwrap().guess_index = 2;
        puzzle.cell_mut(3, 0).unwrap().guess_index = 0;

        puzzle.delete_guess(1).unwrap();

        assert_eq!(2, puzzle.guesses().len());
        assert_eq!(-1, puzzle.cell(0, 0).unwrap().guess_index);
        assert_eq!(0, puzzle.cell(1, 0).unwrap().guess_index);
        assert_eq!(1, puzzle.cell(2, 0).unwrap().guess_index);
        assert_eq!(0, puzzle.cell(3, 0).unwrap().guess_index);
    }

    #[test]
    fn given_style_cannot_be_deleted() {
        let mut puzzle = Puzzle::new(Variant::Default);

        assert_eq!(Err(BoardError::ProtectedIndex), puzzle.delete_guess(0));
        assert_eq!(Err(BoardError::InvalidIndex), puzzle.delete_guess(3));
    }

    #[test]
    fn set_cells_verifies_shape() {
        let mut puzzle = Puzzle::with_dimensions(Variant::Other, 2, 2)
            .unwrap();

        let wrong_rows = vec![vec![Cell::new(0); 2]; 3];
        assert_eq!(Err(BoardError::InvalidDimensions),
            puzzle.set_cells(wrong_rows));

        let wrong_columns = vec![vec![Cell::new(0); 3]; 2];
        assert_eq!(Err(BoardError::InvalidDimensions),
            puzzle.set_cells(wrong_columns));

        let mut cells = puzzle.cells().clone();
        cells[1][1].value = String::from("7");
        puzzle.set_cells(cells).unwrap();
        assert_eq!("7", puzzle.cell(1, 1).unwrap().value);
    }

    #[test]
    fn document_serializes_with_camel_case_fields() {
        let puzzle = Puzzle::new(Variant::X);
        let json = serde_json::to_string(&puzzle).unwrap();

        assert!(json.contains("\"elapsedSeconds\":0"));
        assert!(json.contains("\"type\":\"x\""));
        assert!(json.contains("\"guessIndex\":-1"));
        assert!(json.contains("\"groupIndex\":"));
        assert!(json.contains("\"isSmall\":true"));
        assert!(!json.contains("colorOverride"));
    }

    #[test]
    fn document_round_trips_through_json() {
        let mut puzzle = Puzzle::new(Variant::Squiggly);
        puzzle.cell_mut(2, 3).unwrap().value = String::from("4");
        puzzle.cell_mut(2, 3).unwrap().guess_index = 1;
        puzzle.cell_mut(0, 0).unwrap().color_override =
            Some(String::from("#ff0000"));
        puzzle.set_elapsed_seconds(42);

        let json = serde_json::to_string(&puzzle).unwrap();
        let parsed: Puzzle = serde_json::from_str(&json).unwrap();

        assert_eq!(puzzle, parsed);
    }

    #[test]
    fn small_entry_requires_small_style() {
        let mut puzzle = Puzzle::new(Variant::Default);
        puzzle.cell_mut(0, 0).unwrap().guess_index = SMALL_STYLE as i32;
        puzzle.cell_mut(1, 0).unwrap().guess_index = NORMAL_STYLE as i32;

        let small = puzzle.cell(0, 0).unwrap().clone();
        let normal = puzzle.cell(1, 0).unwrap().clone();
        let unset = puzzle.cell(2, 0).unwrap().clone();

        assert!(puzzle.is_small_entry(&small));
        assert!(!puzzle.is_small_entry(&normal));
        assert!(!puzzle.is_small_entry(&unset));
    }

    #[test]
    fn normalize_repairs_malformed_documents() {
        let mut puzzle = Puzzle::new(Variant::Default);
        puzzle.cells.truncate(5);
        puzzle.cells[0].truncate(3);
        puzzle.cells[1][2].group_index = 100;
        puzzle.cells[1][3].guess_index = 100;
        puzzle.groups.clear();

        puzzle.normalize();

        assert_eq!(9, puzzle.cells.len());
        assert!(puzzle.cells.iter().all(|row| row.len() == 9));
        assert_eq!(1, puzzle.groups.len());
        assert_eq!(0, puzzle.cells[1][2].group_index);
        assert_eq!(-1, puzzle.cells[1][3].guess_index);
    }
}
