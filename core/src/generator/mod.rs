use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;
pub use reshuffle::*;

mod random;
mod reshuffle;

/// Source of palette colors used whenever the board is redrawn.
pub trait ColorSource {
    /// Returns a color in `0..palette`.
    fn next_color(&mut self, palette: ColorId) -> ColorId;
}

/// Replays a fixed list of colors, then repeats the last one forever.
#[cfg(test)]
#[derive(Clone, Debug)]
pub(crate) struct ScriptedColorSource {
    colors: alloc::vec::Vec<ColorId>,
    next: usize,
    pub(crate) draws: usize,
}

#[cfg(test)]
impl ScriptedColorSource {
    pub(crate) fn new(colors: &[ColorId]) -> Self {
        Self {
            colors: colors.to_vec(),
            next: 0,
            draws: 0,
        }
    }
}

#[cfg(test)]
impl ColorSource for ScriptedColorSource {
    fn next_color(&mut self, _palette: ColorId) -> ColorId {
        self.draws += 1;
        let color = self.colors[self.next.min(self.colors.len() - 1)];
        self.next += 1;
        color
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum StartLayout {
    #[default]
    Classic,
    Random,
}

impl StartLayout {
    pub fn generate(self, config: GameConfig, source: &mut impl ColorSource) -> Result<ColorMap> {
        match self {
            Self::Classic if config.size == GameConfig::CLASSIC_SIZE => {
                let map = ColorMap::classic();
                if map.palette() == config.palette {
                    Ok(map)
                } else {
                    // classic colors need at least four palette entries
                    ColorMap::from_colors(config.size, config.palette, &ColorMap::CLASSIC)
                }
            }
            Self::Classic => {
                log::warn!("Classic layout only fits a 3x3 board, fallback to random");
                random_color_map(config.size, config.palette, source)
            }
            Self::Random => random_color_map(config.size, config.palette, source),
        }
    }
}
