//! The eight compass directions between neighbouring cells.

/// A step from a cell to one of its eight neighbours.
///
/// `North` is `+y`, `East` is `+x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `(+1, 0)`
    East,
    /// `(-1, 0)`
    West,
    /// `(0, +1)`
    North,
    /// `(0, -1)`
    South,
    /// `(+1, +1)`
    NorthEast,
    /// `(-1, +1)`
    NorthWest,
    /// `(+1, -1)`
    SouthEast,
    /// `(-1, -1)`
    SouthWest,
}

impl Direction {
    /// All directions in expansion order: the four orthogonals first
    /// (E, W, N, S), then the diagonals (NE, NW, SE, SW).
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Order used when following a single path depth first: north and
    /// south before east and west, then the diagonals (NE, NW, SE, SW).
    pub const PATH_ORDER: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// The `(dx, dy)` displacement of this step.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    /// Whether this step moves along both axes.
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::NorthWest
                | Direction::SouthEast
                | Direction::SouthWest
        )
    }

    /// For a diagonal step, the two orthogonal steps whose cells share an
    /// edge with both the origin and the diagonal target.
    ///
    /// The first element moves along x (reaching `(nx, y)`), the second
    /// along y (reaching `(x, ny)`). Orthogonal steps have no flanks.
    pub const fn flanks(self) -> Option<(Direction, Direction)> {
        match self {
            Direction::NorthEast => Some((Direction::East, Direction::North)),
            Direction::NorthWest => Some((Direction::West, Direction::North)),
            Direction::SouthEast => Some((Direction::East, Direction::South)),
            Direction::SouthWest => Some((Direction::West, Direction::South)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthogonals_come_first() {
        assert!(Direction::ALL[..4].iter().all(|d| !d.is_diagonal()));
        assert!(Direction::ALL[4..].iter().all(|d| d.is_diagonal()));
    }

    #[test]
    fn path_order_is_a_permutation() {
        for d in Direction::ALL {
            assert_eq!(Direction::PATH_ORDER.iter().filter(|&&p| p == d).count(), 1);
        }
        assert_eq!(Direction::PATH_ORDER[4..], Direction::ALL[4..]);
    }

    #[test]
    fn flanks_sum_to_diagonal() {
        for d in Direction::ALL {
            match d.flanks() {
                Some((a, b)) => {
                    let (ax, ay) = a.offset();
                    let (bx, by) = b.offset();
                    assert_eq!((ax + bx, ay + by), d.offset(), "{d:?}");
                    assert_eq!(ay, 0);
                    assert_eq!(bx, 0);
                }
                None => assert!(!d.is_diagonal()),
            }
        }
    }
}
