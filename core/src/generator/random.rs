use rand::prelude::*;

use super::*;

/// Color source backed by a seeded small RNG, so a seed replays the same game.
#[derive(Clone, Debug)]
pub struct SeededColorSource {
    seed: u64,
    rng: SmallRng,
}

impl SeededColorSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl ColorSource for SeededColorSource {
    fn next_color(&mut self, palette: ColorId) -> ColorId {
        self.rng.random_range(0..palette)
    }
}

/// Draws every cell independently and uniformly from the palette.
pub fn random_color_map(
    size: Coord2,
    palette: ColorId,
    source: &mut impl ColorSource,
) -> Result<ColorMap> {
    cell_count(size.0, size.1).ok_or(GameError::InvalidBoardShape)?;
    if palette < 2 {
        return Err(GameError::PaletteTooSmall);
    }
    Ok(ColorMap::from_fn(size, palette, |_| {
        source.next_color(palette) % palette
    }))
}
