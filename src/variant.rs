//! This module defines the [Variant] enumeration, which selects the rule set
//! a board is played and validated under. Each variant carries its geometry
//! and validation parameters as data, so the validation engine never has to
//! branch on anything but this type.

use serde::{Deserialize, Serialize};

/// The anchors of the five overlapping 9x9 regions of a Samurai board, in
/// `(column, row)` form: the four corner boards and the center board. These
/// are literal constants of the classic Samurai layout on a 21x21 board and
/// are not derived from any general rule.
pub const SAMURAI_REGIONS: [(usize, usize); 5] =
    [(0, 0), (12, 0), (0, 12), (12, 12), (6, 6)];

/// The side length of one Samurai region.
pub const SAMURAI_REGION_SIZE: usize = 9;

/// An enumeration of the supported rule sets. The variant determines the
/// default board dimensions, the geometry of the box partitions, and any
/// additional uniqueness partitions checked by the
/// [validation engine](crate::validate).
///
/// The serialized form is the string tag stored in the `type` field of the
/// persisted document (for example `"12x12"` or `"samurai"`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Variant {

    /// A classic 9x9 board with 3x3 boxes.
    #[serde(rename = "default")]
    Default,

    /// A 12x12 board with boxes 4 cells wide and 3 cells high.
    #[serde(rename = "12x12")]
    TwelveByTwelve,

    /// A 16x16 board with 4x4 boxes.
    #[serde(rename = "16x16")]
    SixteenBySixteen,

    /// Five overlapping 9x9 boards on a 21x21 grid. Each of the five regions
    /// anchored at [SAMURAI_REGIONS] is validated independently as a full
    /// classic board.
    #[serde(rename = "samurai")]
    Samurai,

    /// A 9x9 board whose boxes are not axis-aligned rectangles. The box
    /// partitions are read from each cell's stored group index instead of
    /// being derived geometrically.
    #[serde(rename = "squiggly")]
    Squiggly,

    /// A classic board with the additional rule that the two full diagonals
    /// may not contain duplicates either.
    #[serde(rename = "x")]
    X,

    /// A freeform board without any rules. Validation is disabled entirely.
    #[serde(rename = "other")]
    Other
}

impl Variant {

    /// Gets the board dimensions `(height, width)` a fresh document of this
    /// variant is created with.
    pub fn default_dimensions(self) -> (usize, usize) {
        match self {
            Variant::TwelveByTwelve => (12, 12),
            Variant::SixteenBySixteen => (16, 16),
            Variant::Samurai => (21, 21),
            _ => (9, 9)
        }
    }

    /// Gets the dimensions `(box_width, box_height)` of one geometrically
    /// tiled box, or `None` for variants whose boxes are not derived from the
    /// geometry ([Variant::Squiggly]) or which have no boxes at all
    /// ([Variant::Other]). For [Variant::Samurai] this is the box shape of
    /// one of the five regions.
    pub fn box_dimensions(self) -> Option<(usize, usize)> {
        match self {
            Variant::Default | Variant::X | Variant::Samurai => Some((3, 3)),
            Variant::TwelveByTwelve => Some((4, 3)),
            Variant::SixteenBySixteen => Some((4, 4)),
            Variant::Squiggly | Variant::Other => None
        }
    }

    /// Indicates whether the two full diagonals are checked as additional
    /// uniqueness partitions. This is only the case for [Variant::X].
    pub fn has_diagonals(self) -> bool {
        self == Variant::X
    }

    /// Indicates whether the box partitions are read from each cell's stored
    /// group index rather than derived from [Variant::box_dimensions]. This
    /// is only the case for [Variant::Squiggly].
    pub fn checks_freeform_groups(self) -> bool {
        self == Variant::Squiggly
    }

    /// Indicates whether boards of this variant are validated at all.
    /// [Variant::Other] disables validation entirely.
    pub fn is_checked(self) -> bool {
        self != Variant::Other
    }
}

impl Default for Variant {
    fn default() -> Variant {
        Variant::Default
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn serialized_tags_match_file_format() {
        assert_eq!("\"default\"",
            serde_json::to_string(&Variant::Default).unwrap());
        assert_eq!("\"12x12\"",
            serde_json::to_string(&Variant::TwelveByTwelve).unwrap());
        assert_eq!("\"16x16\"",
            serde_json::to_string(&Variant::SixteenBySixteen).unwrap());
        assert_eq!("\"samurai\"",
            serde_json::to_string(&Variant::Samurai).unwrap());
        assert_eq!("\"squiggly\"",
            serde_json::to_string(&Variant::Squiggly).unwrap());
        assert_eq!("\"x\"", serde_json::to_string(&Variant::X).unwrap());
        assert_eq!("\"other\"",
            serde_json::to_string(&Variant::Other).unwrap());
    }

    #[test]
    fn tags_round_trip() {
        let variants = [
            Variant::Default,
            Variant::TwelveByTwelve,
            Variant::SixteenBySixteen,
            Variant::Samurai,
            Variant::Squiggly,
            Variant::X,
            Variant::Other
        ];

        for &variant in variants.iter() {
            let json = serde_json::to_string(&variant).unwrap();
            let parsed: Variant = serde_json::from_str(&json).unwrap();
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn box_dimensions_divide_default_dimensions() {
        let variants = [
            Variant::Default,
            Variant::TwelveByTwelve,
            Variant::SixteenBySixteen,
            Variant::X
        ];

        for &variant in variants.iter() {
            let (height, width) = variant.default_dimensions();
            let (box_width, box_height) = variant.box_dimensions().unwrap();
            assert_eq!(0, width % box_width);
            assert_eq!(0, height % box_height);
        }
    }

    #[test]
    fn samurai_regions_fit_the_board() {
        let (height, width) = Variant::Samurai.default_dimensions();

        for &(column, row) in SAMURAI_REGIONS.iter() {
            assert!(column + SAMURAI_REGION_SIZE <= width);
            assert!(row + SAMURAI_REGION_SIZE <= height);
        }
    }

    #[test]
    fn only_x_checks_diagonals() {
        assert!(Variant::X.has_diagonals());
        assert!(!Variant::Default.has_diagonals());
        assert!(!Variant::Samurai.has_diagonals());
    }

    #[test]
    fn only_other_is_unchecked() {
        assert!(!Variant::Other.is_checked());
        assert!(Variant::Default.is_checked());
        assert!(Variant::Squiggly.is_checked());
    }
}
