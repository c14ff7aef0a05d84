//! Dense per-cell storage indexed by bounds-checked coordinates.

use crate::grid::GridSpace;
use plume_core::CellCoord;
use std::ops::{Index, IndexMut};

/// A flat row-major index into a grid's cells.
///
/// Only produced by [`GridSpace::index_of`] (or the neighbour and
/// iteration helpers built on it), so holding a `CellIndex` means the
/// coordinate it came from was in bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(usize);

impl CellIndex {
    pub(crate) const fn new(i: usize) -> Self {
        Self(i)
    }

    /// The raw row-major offset.
    pub const fn get(self) -> usize {
        self.0
    }
}

/// One value of type `T` per grid cell, stored contiguously in row-major
/// order (`index = y * width + x`).
///
/// Indexing with a [`CellIndex`] cannot go out of range for a field built
/// from the same [`GridSpace`]. Coordinate-based accessors return `None`
/// for out-of-bounds coordinates instead of panicking.
#[derive(Clone, Debug, PartialEq)]
pub struct CellField<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T: Clone> CellField<T> {
    /// Create a field covering `space` with every cell set to `value`.
    pub fn new(space: &GridSpace, value: T) -> Self {
        Self {
            width: space.width(),
            height: space.height(),
            data: vec![value; space.cell_count()],
        }
    }

    /// Overwrite every cell with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> CellField<T> {
    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: grids have at least one cell.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `(width, height)` this field was built for.
    pub fn dims(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether this field was built for `space`.
    pub fn matches(&self, space: &GridSpace) -> bool {
        self.width == space.width() && self.height == space.height()
    }

    /// Bounds-check `coord` against this field's dimensions.
    pub fn index_of(&self, coord: CellCoord) -> Option<CellIndex> {
        if coord.x < 0
            || coord.y < 0
            || coord.x as u32 >= self.width
            || coord.y as u32 >= self.height
        {
            return None;
        }
        Some(CellIndex::new(
            coord.y as usize * self.width as usize + coord.x as usize,
        ))
    }

    /// Value at `coord`, or `None` if out of bounds.
    pub fn get(&self, coord: CellCoord) -> Option<&T> {
        self.index_of(coord).map(|i| &self.data[i.0])
    }

    /// Mutable value at `coord`, or `None` if out of bounds.
    pub fn get_mut(&mut self, coord: CellCoord) -> Option<&mut T> {
        self.index_of(coord).map(move |i| &mut self.data[i.0])
    }

    /// Raw row-major storage.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterate `(coord, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &T)> + '_ {
        let width = self.width as usize;
        self.data.iter().enumerate().map(move |(i, v)| {
            (
                CellCoord::new((i % width) as i32, (i / width) as i32),
                v,
            )
        })
    }
}

impl<T> Index<CellIndex> for CellField<T> {
    type Output = T;

    fn index(&self, index: CellIndex) -> &T {
        &self.data[index.0]
    }
}

impl<T> IndexMut<CellIndex> for CellField<T> {
    fn index_mut(&mut self, index: CellIndex) -> &mut T {
        &mut self.data[index.0]
    }
}
