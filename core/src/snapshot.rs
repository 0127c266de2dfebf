use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Plain copy of everything a renderer needs after a tap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub colors: Vec<ColorId>,
    pub selection: Vec<CellIndex>,
    pub score: Score,
    pub game_over: bool,
    pub matched: Vec<(CellIndex, CellIndex)>,
}

impl BoardSnapshot {
    pub fn from_engine<S: ColorSource>(engine: &PlayEngine<S>) -> Self {
        Self {
            size: engine.size(),
            colors: engine.colors().to_vec(),
            selection: engine.selection().as_slice().to_vec(),
            score: engine.score(),
            game_over: engine.is_over(),
            matched: engine.matched_pairs().map(CellPair::into_tuple).collect(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let total = cell_count(self.size.0, self.size.1).ok_or(GameError::InvalidBoardShape)?;
        if self.colors.len() != total {
            return Err(GameError::InvalidBoardShape);
        }

        let in_bounds = |index: CellIndex| usize::from(index) < total;
        if self.selection.len() > Selection::CAPACITY
            || !self.selection.iter().copied().all(in_bounds)
        {
            return Err(GameError::InvalidIndex);
        }
        if !self
            .matched
            .iter()
            .all(|&(low, high)| low < high && in_bounds(high))
        {
            return Err(GameError::InvalidIndex);
        }

        Ok(())
    }

    pub fn color_at(&self, index: CellIndex) -> Option<ColorId> {
        self.colors.get(usize::from(index)).copied()
    }

    pub fn is_selected(&self, index: CellIndex) -> bool {
        self.selection.contains(&index)
    }
}
