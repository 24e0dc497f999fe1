//! Cell states of a classified occupancy grid.

use serde::{Deserialize, Serialize};

/// Tri-state occupancy of one raster cell.
///
/// Derived from a raw sample by thresholding its occupancy probability:
/// - `Occupied` - probability strictly above `occupied_thresh`
/// - `Free` - probability strictly below `free_thresh`
/// - `Unknown` - everything in between, including both thresholds themselves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// Neither free nor occupied
    #[default]
    Unknown = 0,

    /// Navigable space
    Free = 1,

    /// Obstacle
    Occupied = 2,
}

impl CellState {
    /// Is the state known (not Unknown)?
    #[inline]
    pub fn is_known(self) -> bool {
        self != CellState::Unknown
    }

    /// Lowercase name for display
    pub fn as_str(self) -> &'static str {
        match self {
            CellState::Unknown => "unknown",
            CellState::Free => "free",
            CellState::Occupied => "occupied",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_state_predicates() {
        assert!(CellState::Free.is_known());
        assert_eq!(CellState::Occupied.as_str(), "occupied");
        assert!(!CellState::Unknown.is_known());
        assert!(CellState::Occupied.is_known());
        assert_eq!(CellState::default(), CellState::Unknown);
    }
}
