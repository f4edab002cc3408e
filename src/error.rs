//! This module contains some error and result definitions used in this crate.

/// Miscellaneous errors that can occur when manipulating a puzzle document.
/// Errors raised while loading a persisted document are covered separately by
/// [LoadError](enum.LoadError.html).
#[derive(Debug, Eq, PartialEq)]
pub enum BoardError {

    /// Indicates that the dimensions specified for a created board are
    /// invalid. This is the case if the height or width is zero.
    InvalidDimensions,

    /// Indicates that the specified coordinates (column and row) lie outside
    /// the board in question. This is the case if the column is greater than
    /// or equal to the width or the row is greater than or equal to the
    /// height.
    OutOfBounds,

    /// Indicates that a group or guess style index does not refer to an
    /// existing entry.
    InvalidIndex,

    /// Indicates that a deletion was refused because it would leave the
    /// document inconsistent. The given/blank guess style at index 0 and the
    /// last remaining group can never be deleted.
    ProtectedIndex,

    /// Indicates that a cell refused an edit because its current guess style
    /// is marked as not editable.
    NotEditable
}

/// Syntactic sugar for `Result<V, BoardError>`.
pub type BoardResult<V> = Result<V, BoardError>;

/// An enumeration of the errors that may occur when loading a persisted
/// puzzle document. Note that old or incomplete documents are repaired by the
/// migration chain rather than rejected, so this only covers input that is
/// not a JSON document at all.
#[derive(Debug, Eq, PartialEq)]
pub enum LoadError {

    /// Indicates that the input could not be parsed as JSON, or that the
    /// migrated document could not be deserialized.
    MalformedJson,

    /// Indicates that the top-level JSON value is not an object and therefore
    /// cannot be a puzzle document.
    NotAnObject
}

impl From<serde_json::Error> for LoadError {
    fn from(_: serde_json::Error) -> Self {
        LoadError::MalformedJson
    }
}

/// Syntactic sugar for `Result<V, LoadError>`.
pub type LoadResult<V> = Result<V, LoadError>;
