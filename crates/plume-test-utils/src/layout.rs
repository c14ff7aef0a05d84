//! ASCII grid layouts.
//!
//! ```text
//! #####
//! #.S.#
//! #####
//! ```
//!
//! `#` is an obstacle, `.` is open, and any other character is an open
//! cell remembered under that character. The first line is the top row,
//! i.e. the highest `y`. Leading and trailing whitespace and blank lines
//! are ignored.

use std::fmt;

use indexmap::IndexMap;
use plume_core::CellCoord;
use plume_space::{GridSpace, ObstacleMask, SpaceError, WorldPoint};

#[derive(Clone, Debug)]
pub struct Layout {
    pub space: GridSpace,
    pub obstacles: ObstacleMask,
    marks: IndexMap<char, CellCoord>,
}

impl Layout {
    /// Coordinate of the cell drawn as `mark`.
    pub fn mark(&self, mark: char) -> Option<CellCoord> {
        self.marks.get(&mark).copied()
    }

    /// Marked cells in reading order.
    pub fn marks(&self) -> impl Iterator<Item = (char, CellCoord)> + '_ {
        self.marks.iter().map(|(&c, &coord)| (c, coord))
    }
}

#[derive(Debug, PartialEq)]
pub enum LayoutError {
    Empty,
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    DuplicateMark(char),
    Space(SpaceError),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout has no rows"),
            Self::Ragged {
                row,
                expected,
                actual,
            } => write!(f, "row {row} has {actual} cells, expected {expected}"),
            Self::DuplicateMark(c) => write!(f, "mark '{c}' appears more than once"),
            Self::Space(e) => write!(f, "space: {e}"),
        }
    }
}

impl std::error::Error for LayoutError {}

impl From<SpaceError> for LayoutError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

/// Parse `text` into a unit-cell grid anchored at the world origin.
pub fn parse_layout(text: &str) -> Result<Layout, LayoutError> {
    let rows: Vec<Vec<char>> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| l.chars().collect())
        .collect();
    let width = rows.first().map(Vec::len).ok_or(LayoutError::Empty)?;
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != width {
            return Err(LayoutError::Ragged {
                row,
                expected: width,
                actual: cells.len(),
            });
        }
    }

    let height = rows.len();
    let space = GridSpace::new(width as u32, height as u32, 1.0, WorldPoint::ZERO)?;
    let mut blocked = Vec::new();
    let mut marks = IndexMap::new();
    for (row, cells) in rows.iter().enumerate() {
        let y = (height - 1 - row) as i32;
        for (x, &ch) in cells.iter().enumerate() {
            let coord = CellCoord::new(x as i32, y);
            match ch {
                '#' => blocked.push(coord),
                '.' => {}
                mark => {
                    if marks.insert(mark, coord).is_some() {
                        return Err(LayoutError::DuplicateMark(mark));
                    }
                }
            }
        }
    }
    let obstacles = ObstacleMask::from_coords(&space, blocked)?;
    Ok(Layout {
        space,
        obstacles,
        marks,
    })
}
