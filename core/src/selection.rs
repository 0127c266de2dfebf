use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Cells picked by the player that have not been evaluated as a pair yet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    cells: SmallVec<[CellIndex; 2]>,
}

impl Selection {
    pub const CAPACITY: usize = 2;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cells.len() >= Self::CAPACITY
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        self.cells.contains(&index)
    }

    pub fn as_slice(&self) -> &[CellIndex] {
        &self.cells
    }

    /// Deselects `index` if present, returning whether it was removed.
    pub(crate) fn remove(&mut self, index: CellIndex) -> bool {
        let before = self.cells.len();
        self.cells.retain(|&mut selected| selected != index);
        self.cells.len() != before
    }

    /// Appends `index` unless it is already selected or the selection is full.
    pub(crate) fn push(&mut self, index: CellIndex) -> bool {
        if self.contains(index) || self.is_full() {
            return false;
        }
        self.cells.push(index);
        true
    }

    /// The pair formed once two cells are selected.
    pub fn pair(&self) -> Option<CellPair> {
        match self.cells.as_slice() {
            &[first, second] => CellPair::new(first, second),
            _ => None,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }
}
