//! This module contains the pure geometry of a board: mapping coordinates to
//! box indices and building the uniqueness partitions (rows, columns, boxes
//! and diagonals) that the [validation engine](crate::validate) checks.
//!
//! All partition builders take a `(column, row)` anchor so that the same
//! functions serve both whole boards and the region slices of a Samurai
//! board.

/// A partition of cells subject to a uniqueness constraint, represented by a
/// vector of their coordinates in the form `(column, row)`.
pub type Partition = Vec<(usize, usize)>;

/// Computes the 0-based index of the box containing the cell at `(column,
/// row)` on a board tiled into boxes of `box_width` x `box_height` cells.
/// Boxes are numbered row-major across the tiling.
///
/// The tiling is only well-formed if `box_width` divides `board_width` and
/// `box_height` divides the board height. This function does *not* validate
/// that and will silently produce overlapping or out-of-range indices if the
/// dimensions do not divide evenly.
pub fn box_index(column: usize, row: usize, box_width: usize,
        box_height: usize, board_width: usize) -> usize {
    column / box_width + (board_width / box_width) * (row / box_height)
}

/// Builds one partition per row of the region of the given dimensions
/// anchored at `(column, row)`.
pub fn row_partitions(column: usize, row: usize, width: usize, height: usize)
        -> Vec<Partition> {
    let mut partitions = Vec::new();

    for r in row..(row + height) {
        let mut partition = Partition::new();

        for c in column..(column + width) {
            partition.push((c, r));
        }

        partitions.push(partition);
    }

    partitions
}

/// Builds one partition per column of the region of the given dimensions
/// anchored at `(column, row)`.
pub fn column_partitions(column: usize, row: usize, width: usize,
        height: usize) -> Vec<Partition> {
    let mut partitions = Vec::new();

    for c in column..(column + width) {
        let mut partition = Partition::new();

        for r in row..(row + height) {
            partition.push((c, r));
        }

        partitions.push(partition);
    }

    partitions
}

/// Builds one partition per box of the region of the given dimensions
/// anchored at `(column, row)`, tiled into boxes of `box_width` x
/// `box_height` cells. The same non-dividing-dimensions caveat as for
/// [box_index] applies.
pub fn box_partitions(column: usize, row: usize, width: usize, height: usize,
        box_width: usize, box_height: usize) -> Vec<Partition> {
    let mut partitions = Vec::new();

    for base_row in (row..(row + height)).step_by(box_height) {
        for base_column in (column..(column + width)).step_by(box_width) {
            let mut partition = Partition::new();

            for r in base_row..(base_row + box_height) {
                for c in base_column..(base_column + box_width) {
                    partition.push((c, r));
                }
            }

            partitions.push(partition);
        }
    }

    partitions
}

/// Builds the two full diagonal partitions ( ╲ and ╱ ) of a board with the
/// given dimensions. Diagonals are only meaningful on square boards; on a
/// rectangular board the shorter dimension bounds both diagonals.
pub fn diagonal_partitions(width: usize, height: usize) -> Vec<Partition> {
    let size = width.min(height);
    let mut main_diagonal = Partition::new();
    let mut anti_diagonal = Partition::new();

    for i in 0..size {
        main_diagonal.push((i, i));
        anti_diagonal.push((size - i - 1, i));
    }

    vec![
        main_diagonal,
        anti_diagonal
    ]
}

#[cfg(test)]
mod tests {

    use super::*;

    use std::collections::HashSet;

    #[test]
    fn box_index_classic_board() {
        assert_eq!(0, box_index(0, 0, 3, 3, 9));
        assert_eq!(0, box_index(2, 2, 3, 3, 9));
        assert_eq!(1, box_index(3, 0, 3, 3, 9));
        assert_eq!(2, box_index(8, 2, 3, 3, 9));
        assert_eq!(3, box_index(0, 3, 3, 3, 9));
        assert_eq!(4, box_index(4, 4, 3, 3, 9));
        assert_eq!(8, box_index(8, 8, 3, 3, 9));
    }

    #[test]
    fn box_index_rectangular_boxes() {
        // 12x12 board with boxes 4 wide and 3 high

        assert_eq!(0, box_index(3, 2, 4, 3, 12));
        assert_eq!(1, box_index(4, 0, 4, 3, 12));
        assert_eq!(2, box_index(11, 2, 4, 3, 12));
        assert_eq!(3, box_index(0, 3, 4, 3, 12));
        assert_eq!(8, box_index(11, 11, 4, 3, 12));
    }

    fn assert_equal_disjoint_cover(partitions: &[Partition], width: usize,
            height: usize, expected_count: usize) {
        assert_eq!(expected_count, partitions.len());

        let expected_len = width * height / expected_count;
        let mut seen = HashSet::new();

        for partition in partitions {
            assert_eq!(expected_len, partition.len());

            for &coordinates in partition {
                assert!(seen.insert(coordinates));
            }
        }

        assert_eq!(width * height, seen.len());
    }

    #[test]
    fn box_partitions_cover_board_evenly() {
        let partitions = box_partitions(0, 0, 9, 9, 3, 3);
        assert_equal_disjoint_cover(&partitions, 9, 9, 9);

        let partitions = box_partitions(0, 0, 12, 12, 4, 3);
        assert_equal_disjoint_cover(&partitions, 12, 12, 12);

        let partitions = box_partitions(0, 0, 16, 16, 4, 4);
        assert_equal_disjoint_cover(&partitions, 16, 16, 16);
    }

    #[test]
    fn row_and_column_partitions_cover_board() {
        assert_equal_disjoint_cover(&row_partitions(0, 0, 9, 9), 9, 9, 9);
        assert_equal_disjoint_cover(&column_partitions(0, 0, 9, 9), 9, 9, 9);
    }

    #[test]
    fn box_partitions_are_contiguous() {
        // Every cell of a box is at most box_width + box_height - 2 steps
        // away from the box's first cell.

        for partition in box_partitions(0, 0, 12, 12, 4, 3) {
            let (first_column, first_row) = partition[0];

            for &(column, row) in &partition {
                assert!(column - first_column < 4);
                assert!(row - first_row < 3);
            }
        }
    }

    #[test]
    fn anchored_partitions_stay_in_region() {
        let partitions = box_partitions(12, 6, 9, 9, 3, 3);

        assert_eq!(9, partitions.len());

        for partition in partitions {
            for (column, row) in partition {
                assert!(column >= 12 && column < 21);
                assert!(row >= 6 && row < 15);
            }
        }
    }

    #[test]
    fn diagonal_partitions_meet_in_center() {
        let partitions = diagonal_partitions(9, 9);

        assert_eq!(2, partitions.len());
        assert!(partitions[0].contains(&(0, 0)));
        assert!(partitions[0].contains(&(8, 8)));
        assert!(partitions[1].contains(&(8, 0)));
        assert!(partitions[1].contains(&(0, 8)));
        assert!(partitions[0].contains(&(4, 4)));
        assert!(partitions[1].contains(&(4, 4)));
    }
}
