//! Precomputed ray lengths from every square to the board edges.

use chess_core::Square;

/// The eight ray directions, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    NorthWest = 0,
    North = 1,
    NorthEast = 2,
    West = 3,
    East = 4,
    SouthWest = 5,
    South = 6,
    SouthEast = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::West,
        Direction::East,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    pub const DIAGONALS: [Direction; 4] = [
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    pub const ORTHOGONALS: [Direction; 4] = [
        Direction::North,
        Direction::West,
        Direction::East,
        Direction::South,
    ];

    /// Index step for one square in this direction. North is toward row 0.
    #[inline]
    pub const fn offset(self) -> i8 {
        match self {
            Direction::NorthWest => -9,
            Direction::North => -8,
            Direction::NorthEast => -7,
            Direction::West => -1,
            Direction::East => 1,
            Direction::SouthWest => 7,
            Direction::South => 8,
            Direction::SouthEast => 9,
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthWest
                | Direction::NorthEast
                | Direction::SouthWest
                | Direction::SouthEast
        )
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Distances from each square to the edge in each [`Direction`].
///
/// Built once at compile time and shared read-only by every board and
/// search thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    edges: [[u8; 8]; 64],
}

/// The shared table.
pub static GEOMETRY: Geometry = Geometry::build();

impl Geometry {
    const fn build() -> Self {
        let mut edges = [[0u8; 8]; 64];
        let mut sq = 0;
        while sq < 64 {
            let row = (sq / 8) as u8;
            let col = (sq % 8) as u8;
            let down = 7 - row;
            let right = 7 - col;
            edges[sq] = [
                min(row, col),
                row,
                min(row, right),
                col,
                right,
                min(down, col),
                down,
                min(down, right),
            ];
            sq += 1;
        }
        Geometry { edges }
    }

    /// Number of squares between `sq` and the edge along `dir`.
    #[inline]
    pub fn distance(&self, sq: Square, dir: Direction) -> u8 {
        self.edges[sq.idx()][dir.index()]
    }

    /// All eight distances for a square, in [`Direction::ALL`] order.
    #[inline]
    pub fn distances(&self, sq: Square) -> &[u8; 8] {
        &self.edges[sq.idx()]
    }

    /// Iterates the squares along a ray, nearest first, up to the edge.
    pub fn ray(&self, from: Square, dir: Direction) -> impl Iterator<Item = Square> {
        let steps = self.distance(from, dir) as i8;
        let offset = dir.offset();
        (1..=steps).filter_map(move |n| from.offset(offset * n))
    }
}

/// The two rings of central squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenterZone {
    /// d4, e4, d5, e5.
    Main,
    /// The twelve squares surrounding the main center.
    Side,
}

/// Returns the central ring `sq` belongs to, if any.
pub fn center_zone(sq: Square) -> Option<CenterZone> {
    let (row, col) = (sq.row(), sq.col());
    if (3..=4).contains(&row) && (3..=4).contains(&col) {
        Some(CenterZone::Main)
    } else if (2..=5).contains(&row) && (2..=5).contains(&col) {
        Some(CenterZone::Side)
    } else {
        None
    }
}

const fn min(a: u8, b: u8) -> u8 {
    if a < b {
        a
    } else {
        b
    }
}
