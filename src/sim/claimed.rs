//! Claimed-cell set
//!
//! Cells visited by either actor. Append-only within a level; the only way
//! to shrink it is `reset`, which starts over from the origin.

use std::collections::HashSet;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Insertion-ordered set of claimed lattice cells.
/// Serialized as the plain claim list; the index is rebuilt on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<IVec2>", into = "Vec<IVec2>")]
pub struct ClaimedCells {
    /// Claim order, oldest first (stable draw order)
    order: Vec<IVec2>,
    lookup: HashSet<IVec2>,
}

impl From<Vec<IVec2>> for ClaimedCells {
    fn from(cells: Vec<IVec2>) -> Self {
        let mut claimed = Self::default();
        for cell in cells {
            claimed.claim(cell);
        }
        claimed
    }
}

impl From<ClaimedCells> for Vec<IVec2> {
    fn from(claimed: ClaimedCells) -> Self {
        claimed.order
    }
}

impl ClaimedCells {
    /// A fresh set holding only `origin`
    pub fn starting_at(origin: IVec2) -> Self {
        let mut cells = Self::default();
        cells.claim(origin);
        cells
    }

    /// Claim `cell`; returns false if it was already claimed
    pub fn claim(&mut self, cell: IVec2) -> bool {
        if !self.lookup.insert(cell) {
            return false;
        }
        self.order.push(cell);
        true
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        self.lookup.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.order.iter().copied()
    }

    /// Drop every claim and start over from `origin`
    pub fn reset(&mut self, origin: IVec2) {
        self.order.clear();
        self.lookup.clear();
        self.claim(origin);
    }
}
