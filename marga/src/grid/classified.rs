//! Classified occupancy grid.

use crate::core::CellState;

/// Cell counts by state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellCounts {
    /// Occupied cells
    pub occupied: usize,
    /// Free cells
    pub free: usize,
    /// Unknown cells
    pub unknown: usize,
}

impl CellCounts {
    /// Total cells
    pub fn total(&self) -> usize {
        self.occupied + self.free + self.unknown
    }
}

/// Decoded `width × height` grid, row-major, row 0 = top of the raster.
///
/// Each cell keeps its state and the grayscale value the decoder stored for it
/// (`max_val` for occupied, `0` for free, the scaled probability for unknown).
/// The grid is never edited; a new one is produced by decoding again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedGrid {
    width: usize,
    height: usize,
    states: Vec<CellState>,
    values: Vec<u8>,
}

impl ClassifiedGrid {
    pub(super) fn from_parts(
        width: usize,
        height: usize,
        states: Vec<CellState>,
        values: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(states.len(), width * height);
        debug_assert_eq!(values.len(), width * height);
        Self {
            width,
            height,
            states,
            values,
        }
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// State of cell (x, y), `None` outside the grid
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<CellState> {
        self.index(x, y).map(|i| self.states[i])
    }

    /// Stored grayscale value of cell (x, y)
    #[inline]
    pub fn stored_value(&self, x: usize, y: usize) -> Option<u8> {
        self.index(x, y).map(|i| self.values[i])
    }

    /// All cell states, row-major
    pub fn states(&self) -> &[CellState] {
        &self.states
    }

    /// Stored grayscale values, row-major; what the renderer draws as the map image
    pub fn to_gray_bytes(&self) -> &[u8] {
        &self.values
    }

    /// Count cells by state
    pub fn counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for state in &self.states {
            match state {
                CellState::Occupied => counts.occupied += 1,
                CellState::Free => counts.free += 1,
                CellState::Unknown => counts.unknown += 1,
            }
        }
        counts
    }

    /// Fraction of cells that are free or occupied, in `[0, 1]`
    pub fn known_fraction(&self) -> f32 {
        if self.states.is_empty() {
            return 0.0;
        }
        let known = self.states.iter().filter(|s| s.is_known()).count();
        known as f32 / self.states.len() as f32
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}
