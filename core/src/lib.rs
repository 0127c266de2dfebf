#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use selection::*;
pub use snapshot::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod selection;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GameConfigFields")]
pub struct GameConfig {
    pub size: Coord2,
    pub palette: ColorId,
    pub score_increment: Score,
    pub max_reshuffle_attempts: u32,
}

impl GameConfig {
    pub const CLASSIC_SIZE: Coord2 = (3, 3);
    pub const CLASSIC_PALETTE: ColorId = 4;
    pub const SCORE_PER_MATCH: Score = 10;
    pub const MAX_RESHUFFLE_ATTEMPTS: u32 = 1000;

    pub const fn classic() -> Self {
        Self {
            size: Self::CLASSIC_SIZE,
            palette: Self::CLASSIC_PALETTE,
            score_increment: Self::SCORE_PER_MATCH,
            max_reshuffle_attempts: Self::MAX_RESHUFFLE_ATTEMPTS,
        }
    }

    pub fn new(size: Coord2, palette: ColorId) -> Result<Self> {
        cell_count(size.0, size.1).ok_or(GameError::InvalidBoardShape)?;
        if palette < 2 {
            return Err(GameError::PaletteTooSmall);
        }
        Ok(Self {
            size,
            palette,
            ..Self::classic()
        })
    }

    pub fn total_cells(&self) -> usize {
        cell_count(self.size.0, self.size.1).unwrap_or(0)
    }

    /// Rechecks size and palette, the public fields can be set to anything.
    pub fn validate(&self) -> Result<()> {
        Self::new(self.size, self.palette).map(|_| ())
    }
}

#[derive(Deserialize)]
struct GameConfigFields {
    size: Coord2,
    palette: ColorId,
    score_increment: Score,
    max_reshuffle_attempts: u32,
}

impl TryFrom<GameConfigFields> for GameConfig {
    type Error = GameError;

    fn try_from(fields: GameConfigFields) -> Result<Self> {
        Ok(Self {
            score_increment: fields.score_increment,
            max_reshuffle_attempts: fields.max_reshuffle_attempts,
            ..Self::new(fields.size, fields.palette)?
        })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Total assignment of a palette color to every cell, stored row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorMapFields")]
pub struct ColorMap {
    colors: Array2<ColorId>,
    palette: ColorId,
}

impl ColorMap {
    pub const CLASSIC: [ColorId; 9] = [
        0, 1, 2, // row 0
        3, 0, 1, // row 1
        2, 3, 0, // row 2
    ];

    pub fn classic() -> Self {
        let colors = Array2::from_shape_fn(GameConfig::CLASSIC_SIZE.to_nd_index(), |(row, col)| {
            Self::CLASSIC[row * usize::from(GameConfig::CLASSIC_SIZE.1) + col]
        });
        Self {
            colors,
            palette: GameConfig::CLASSIC_PALETTE,
        }
    }

    pub fn from_colors(size: Coord2, palette: ColorId, colors: &[ColorId]) -> Result<Self> {
        let total = cell_count(size.0, size.1).ok_or(GameError::InvalidBoardShape)?;
        if palette < 2 {
            return Err(GameError::PaletteTooSmall);
        }
        if colors.len() != total {
            return Err(GameError::InvalidBoardShape);
        }
        if colors.iter().any(|&color| color >= palette) {
            return Err(GameError::InvalidColor);
        }

        let colors = Array2::from_shape_vec(size.to_nd_index(), colors.to_vec())
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { colors, palette })
    }

    /// Builds a map cell by cell in row-major order, `color_fn` must stay within the palette.
    pub(crate) fn from_fn(
        size: Coord2,
        palette: ColorId,
        mut color_fn: impl FnMut(CellIndex) -> ColorId,
    ) -> Self {
        let cols = usize::from(size.1);
        let colors = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            color_fn((row * cols + col) as CellIndex)
        });
        Self { colors, palette }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.colors.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn palette(&self) -> ColorId {
        self.palette
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if usize::from(index) < self.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    pub fn coords_of(&self, index: CellIndex) -> Result<Coord2> {
        let index = self.validate_index(index)?;
        let cols = self.size().1;
        Ok((index / cols, index % cols))
    }

    pub fn index_of(&self, (row, col): Coord2) -> Result<CellIndex> {
        let (rows, cols) = self.size();
        if row < rows && col < cols {
            Ok(row * cols + col)
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    pub fn color_at(&self, index: CellIndex) -> Result<ColorId> {
        let coords = self.coords_of(index)?;
        Ok(self.colors[coords.to_nd_index()])
    }

    pub fn color_at_coords(&self, coords: Coord2) -> Result<ColorId> {
        self.index_of(coords)?;
        Ok(self.colors[coords.to_nd_index()])
    }

    /// Colors in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ColorId> + '_ {
        self.colors.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<ColorId> {
        self.iter().collect()
    }

    /// Cycles the color at `index` to the next palette entry.
    pub(crate) fn advance(&mut self, index: CellIndex) -> Result<()> {
        let coords = self.coords_of(index)?;
        let cell = &mut self.colors[coords.to_nd_index()];
        *cell = (*cell + 1) % self.palette;
        Ok(())
    }
}

#[derive(Deserialize)]
struct ColorMapFields {
    colors: Array2<ColorId>,
    palette: ColorId,
}

impl TryFrom<ColorMapFields> for ColorMap {
    type Error = GameError;

    fn try_from(fields: ColorMapFields) -> Result<Self> {
        let (rows, cols) = fields.colors.dim();
        let rows = Coord::try_from(rows).map_err(|_| GameError::InvalidBoardShape)?;
        let cols = Coord::try_from(cols).map_err(|_| GameError::InvalidBoardShape)?;
        let colors: Vec<ColorId> = fields.colors.iter().copied().collect();
        Self::from_colors((rows, cols), fields.palette, &colors)
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::classic()
    }
}

impl Index<CellIndex> for ColorMap {
    type Output = ColorId;

    fn index(&self, index: CellIndex) -> &Self::Output {
        let cols = self.colors.dim().1;
        let index = usize::from(index);
        &self.colors[[index / cols, index % cols]]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TapOutcome {
    NoChange,
    Selected,
    Deselected,
    AlreadyMatched,
    Matched,
    Mismatched,
}

impl TapOutcome {
    pub const fn has_update(self) -> bool {
        use TapOutcome::*;
        match self {
            NoChange => false,
            Selected => true,
            Deselected => true,
            AlreadyMatched => true,
            Matched => true,
            Mismatched => true,
        }
    }

    pub const fn ends_game(self) -> bool {
        matches!(self, Self::Mismatched)
    }
}
