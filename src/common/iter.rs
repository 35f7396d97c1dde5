use std::ops::Not;

use super::metadata::Version;

// Direction
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    const fn step(self) -> i16 {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

impl Not for Direction {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

pub const VERT_TIMING_COL: i16 = 6;

/// Zig-zag walk over the matrix: column pairs right to left starting at the bottom-right
/// corner, alternating right and left cell, bouncing off the top and bottom edges and
/// hopping over the vertical timing column.
///
/// Yields every coordinate exactly once; the caller decides which ones are free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementCursor {
    row: i16,
    // Right column of the current pair
    col: i16,
    direction: Direction,
    // Set once the right cell of the current row has been visited
    next_row: bool,
    width: i16,
}

impl PlacementCursor {
    pub fn new(version: Version) -> Self {
        Self::with_width(version.width() as i16)
    }

    /// Rewinds to the bottom-right corner, ready for a fresh walk.
    pub fn reset(&mut self) {
        *self = Self::with_width(self.width);
    }

    fn with_width(w: i16) -> Self {
        Self { row: w - 1, col: w - 1, direction: Direction::Up, next_row: false, width: w }
    }

    pub fn row(&self) -> i16 {
        self.row
    }

    pub fn col(&self) -> i16 {
        self.col - self.next_row as i16
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn advance(&mut self) {
        if !self.next_row {
            self.next_row = true;
            return;
        }

        self.next_row = false;
        let next = self.row + self.direction.step();
        if (0..self.width).contains(&next) {
            self.row = next;
            return;
        }

        self.direction = !self.direction;
        self.col -= 2;
        if self.col == VERT_TIMING_COL {
            self.col -= 1;
        }
    }
}

impl Iterator for PlacementCursor {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.col < 0 {
            return None;
        }
        let res = (self.row(), self.col());
        self.advance();
        Some(res)
    }
}

#[cfg(test)]
mod iter_tests {
    use std::collections::HashSet;

    use super::{Direction, PlacementCursor};
    use crate::common::metadata::Version;

    #[test]
    fn test_first_moves() {
        let cursor = PlacementCursor::new(Version::new(1).unwrap());
        let coords = cursor.take(6).collect::<Vec<_>>();
        assert_eq!(coords, [(20, 20), (20, 19), (19, 20), (19, 19), (18, 20), (18, 19)]);
    }

    #[test]
    fn test_turn_at_top() {
        let coords = PlacementCursor::new(Version::new(1).unwrap()).collect::<Vec<_>>();
        // 21 rows of the first column pair, then down the next pair
        assert_eq!(coords[40], (0, 20));
        assert_eq!(coords[41], (0, 19));
        assert_eq!(coords[42], (0, 18));
        assert_eq!(coords[43], (0, 17));
        assert_eq!(coords[44], (1, 18));
    }

    #[test]
    fn test_skips_timing_column() {
        for v in 1..=5 {
            let coords = PlacementCursor::new(Version::new(v).unwrap()).collect::<Vec<_>>();
            assert!(coords.iter().all(|&(_, c)| c != 6), "Version {v}");
        }
    }

    #[test]
    fn test_visits_every_cell_once() {
        for v in 1..=40 {
            let version = Version::new(v).unwrap();
            let w = version.width() as i16;
            let coords = PlacementCursor::new(version).collect::<Vec<_>>();
            let unique = coords.iter().copied().collect::<HashSet<_>>();
            assert_eq!(coords.len(), (w * (w - 1)) as usize, "Version {v}");
            assert_eq!(unique.len(), coords.len(), "Version {v}");
            assert!(unique.iter().all(|&(r, c)| (0..w).contains(&r) && (0..w).contains(&c)));
        }
    }

    #[test]
    fn test_last_cell() {
        let coords = PlacementCursor::new(Version::new(1).unwrap()).collect::<Vec<_>>();
        assert_eq!(coords.last(), Some(&(20, 0)));
    }

    #[test]
    fn test_reset() {
        let mut cursor = PlacementCursor::new(Version::new(2).unwrap());
        let first = cursor.clone().take(50).collect::<Vec<_>>();
        cursor.by_ref().take(73).for_each(drop);
        assert_eq!(cursor.direction(), Direction::Down);
        cursor.reset();
        assert_eq!(cursor.direction(), Direction::Up);
        assert_eq!(cursor.take(50).collect::<Vec<_>>(), first);
    }
}
