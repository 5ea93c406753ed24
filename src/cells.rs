use crate::units::ColumnsCount;

use smallvec::SmallVec;

/// A cell position on a rectangular grid, row 0 at the top, column 0 at the
/// left.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: u32,
    pub col: u32,
}

impl GridCoordinate {
    pub fn new(row: u32, col: u32) -> GridCoordinate {
        GridCoordinate { row, col }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, row_width: ColumnsCount) -> GridCoordinate {
        let ColumnsCount(width) = row_width;
        GridCoordinate::new((index / width) as u32, (index % width) as u32)
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(row_col_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(row_col_pair.0, row_col_pair.1)
    }
}

/// One of the four walls of a cell. North/South and East/West are bitwise
/// opposites of each other in the `WallSet` encoding.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum WallDirection {
    North,
    East,
    South,
    West,
}

impl WallDirection {
    /// All directions in the order neighbours are visited: N, E, S, W.
    pub const ALL: [WallDirection; 4] = [
        WallDirection::North,
        WallDirection::East,
        WallDirection::South,
        WallDirection::West,
    ];

    pub fn opposite(self) -> WallDirection {
        match self {
            WallDirection::North => WallDirection::South,
            WallDirection::South => WallDirection::North,
            WallDirection::East => WallDirection::West,
            WallDirection::West => WallDirection::East,
        }
    }

    fn bit(self) -> u8 {
        match self {
            WallDirection::North => 0b0001,
            WallDirection::East => 0b0010,
            WallDirection::South => 0b0100,
            WallDirection::West => 0b1000,
        }
    }
}

/// The 4-bit wall state of one cell. Bits are only ever cleared, and only by
/// `Grid::carve`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct WallSet(u8);

impl WallSet {
    pub fn all() -> WallSet {
        WallSet(0b1111)
    }

    #[inline]
    pub fn contains(self, direction: WallDirection) -> bool {
        self.0 & direction.bit() != 0
    }

    #[inline]
    pub(crate) fn remove(&mut self, direction: WallDirection) {
        self.0 &= !direction.bit();
    }

    /// How many of the four walls are still standing.
    pub fn standing_count(self) -> u32 {
        self.0.count_ones()
    }
}

/// An in-bounds neighbour of a cell together with the wall direction leading
/// to it from the source cell and the direction leading back.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Neighbour {
    pub coord: GridCoordinate,
    pub towards: WallDirection,
    pub opposite: WallDirection,
}

pub type NeighbourSmallVec = SmallVec<[Neighbour; 4]>;

/// The coordinate one cell away in the given direction.
/// Returns None if the coordinate is not representable (above row 0 or left
/// of column 0); bounds on the south and east sides are the grid's concern.
pub fn offset_coordinate(coord: GridCoordinate, direction: WallDirection) -> Option<GridCoordinate> {
    let GridCoordinate { row, col } = coord;
    match direction {
        WallDirection::North => {
            if row > 0 {
                Some(GridCoordinate::new(row - 1, col))
            } else {
                None
            }
        }
        WallDirection::East => Some(GridCoordinate::new(row, col + 1)),
        WallDirection::South => Some(GridCoordinate::new(row + 1, col)),
        WallDirection::West => {
            if col > 0 {
                Some(GridCoordinate::new(row, col - 1))
            } else {
                None
            }
        }
    }
}
