use super::*;

/// Redraws the whole board until it differs from `previous` in at least one cell.
///
/// Each attempt draws a complete assignment from `source` and compares it to `previous`; identical boards are thrown
/// away as a whole, cells are never resampled individually. The chance of an identical redraw is `palette^-N` per
/// attempt, so the loop is capped at `max_attempts`. Past the cap the first cell of `previous` is cycled to the next
/// color, which keeps the result valid and different.
pub fn reshuffle(
    previous: &ColorMap,
    source: &mut impl ColorSource,
    max_attempts: u32,
) -> ColorMap {
    let size = previous.size();
    let palette = previous.palette();

    for attempt in 1..=max_attempts {
        let candidate = ColorMap::from_fn(size, palette, |_| source.next_color(palette) % palette);
        if candidate != *previous {
            log::trace!("reshuffled after {} attempt(s)", attempt);
            return candidate;
        }
    }

    log::warn!(
        "Reshuffle still identical after {} attempts, fallback to cycling first cell",
        max_attempts
    );
    let mut fallback = previous.clone();
    if let Err(err) = fallback.advance(0) {
        // every map has at least one cell
        log::error!("failed to cycle first cell: {}", err);
    }
    fallback
}
