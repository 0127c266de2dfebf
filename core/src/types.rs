use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board rows and columns.
pub type Coord = u8;

/// Row-major position of a cell on the board.
pub type CellIndex = u8;

/// Palette entry assigned to a cell.
pub type ColorId = u8;

/// Points accumulated by successful matches.
pub type Score = u32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells in a board of `rows` by `cols`, or `None` when it cannot be addressed by a [`CellIndex`].
pub const fn cell_count(rows: Coord, cols: Coord) -> Option<usize> {
    let count = rows as usize * cols as usize;
    if count == 0 || count > CellIndex::MAX as usize + 1 {
        None
    } else {
        Some(count)
    }
}

/// Unordered combination of two distinct cells, stored with `low < high`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPair {
    low: CellIndex,
    high: CellIndex,
}

impl CellPair {
    pub const fn new(a: CellIndex, b: CellIndex) -> Option<Self> {
        if a < b {
            Some(Self { low: a, high: b })
        } else if b < a {
            Some(Self { low: b, high: a })
        } else {
            None
        }
    }

    pub const fn low(self) -> CellIndex {
        self.low
    }

    pub const fn high(self) -> CellIndex {
        self.high
    }

    pub const fn contains(self, index: CellIndex) -> bool {
        self.low == index || self.high == index
    }

    pub const fn into_tuple(self) -> (CellIndex, CellIndex) {
        (self.low, self.high)
    }
}

impl fmt::Display for CellPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.low, self.high)
    }
}
