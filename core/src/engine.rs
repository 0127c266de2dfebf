use alloc::collections::BTreeSet;
use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Active,
    Over,
}

impl EngineState {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Active
    }
}

/// Board controller: owns the colors, the pending selection and the score, and applies taps.
#[derive(Clone, Debug)]
pub struct PlayEngine<S: ColorSource = SeededColorSource> {
    config: GameConfig,
    colors: ColorMap,
    selection: Selection,
    matched: BTreeSet<CellPair>,
    score: Saturating<Score>,
    state: EngineState,
    source: S,
    reshuffle_count: u32,
}

impl PlayEngine<SeededColorSource> {
    /// The 3x3, four color board every game starts from.
    pub fn classic(seed: u64) -> Self {
        Self {
            config: GameConfig::classic(),
            colors: ColorMap::classic(),
            selection: Selection::new(),
            matched: BTreeSet::new(),
            score: Saturating(0),
            state: Default::default(),
            source: SeededColorSource::new(seed),
            reshuffle_count: 0,
        }
    }

    pub fn with_layout(config: GameConfig, layout: StartLayout, seed: u64) -> Result<Self> {
        let mut source = SeededColorSource::new(seed);
        let colors = layout.generate(config, &mut source)?;
        Self::new(config, colors, source)
    }
}

impl<S: ColorSource> PlayEngine<S> {
    pub fn new(config: GameConfig, colors: ColorMap, source: S) -> Result<Self> {
        config.validate()?;
        if colors.size() != config.size || colors.palette() != config.palette {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self {
            config,
            colors,
            selection: Selection::new(),
            matched: BTreeSet::new(),
            score: Saturating(0),
            state: Default::default(),
            source,
            reshuffle_count: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn score(&self) -> Score {
        self.score.0
    }

    pub fn size(&self) -> Coord2 {
        self.colors.size()
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    pub fn color_at(&self, index: CellIndex) -> Result<ColorId> {
        self.colors.color_at(index)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected(&self, index: CellIndex) -> bool {
        self.selection.contains(index)
    }

    pub fn matched_pairs(&self) -> impl Iterator<Item = CellPair> + '_ {
        self.matched.iter().copied()
    }

    pub fn has_matched(&self, pair: CellPair) -> bool {
        self.matched.contains(&pair)
    }

    /// Number of reshuffles so far, one per successful match.
    pub fn reshuffle_count(&self) -> u32 {
        self.reshuffle_count
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_engine(self)
    }

    /// Taps the cell at `index` and returns the resulting board state.
    pub fn tap_cell(&mut self, index: CellIndex) -> Result<BoardSnapshot> {
        self.tap(index)?;
        Ok(self.snapshot())
    }

    pub fn tap_coords(&mut self, coords: Coord2) -> Result<TapOutcome> {
        let index = self.colors.index_of(coords)?;
        self.tap(index)
    }

    pub fn tap(&mut self, index: CellIndex) -> Result<TapOutcome> {
        use TapOutcome::*;

        let index = self.colors.validate_index(index)?;

        if self.state.is_over() {
            return Ok(NoChange);
        }

        if self.selection.remove(index) {
            log::trace!("deselected {}", index);
            return Ok(Deselected);
        }

        self.selection.push(index);
        log::trace!("selected {}", index);

        let Some(pair) = self.selection.pair() else {
            return Ok(Selected);
        };

        let outcome = if self.matched.contains(&pair) {
            log::debug!("pair {} already matched, ignoring", pair);
            AlreadyMatched
        } else if self.colors[pair.low()] == self.colors[pair.high()] {
            self.on_match(pair);
            Matched
        } else {
            log::debug!(
                "pair {} mismatched ({} vs {}), game over",
                pair,
                self.colors[pair.low()],
                self.colors[pair.high()]
            );
            self.state = EngineState::Over;
            Mismatched
        };

        self.selection.clear();
        Ok(outcome)
    }

    fn on_match(&mut self, pair: CellPair) {
        self.score += self.config.score_increment;
        self.matched.insert(pair);
        self.colors = reshuffle(
            &self.colors,
            &mut self.source,
            self.config.max_reshuffle_attempts,
        );
        self.reshuffle_count = self.reshuffle_count.saturating_add(1);
        log::debug!("pair {} matched, score {}", pair, self.score.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ScriptedColorSource;
    use alloc::vec::Vec;

    fn classic() -> PlayEngine {
        PlayEngine::classic(0x5eed)
    }

    fn engine_with(colors: &[ColorId]) -> PlayEngine {
        let map = ColorMap::from_colors((3, 3), 4, colors).unwrap();
        PlayEngine::new(GameConfig::classic(), map, SeededColorSource::new(1)).unwrap()
    }

    #[test]
    fn matching_pair_scores_and_reshuffles() {
        let mut engine = classic();
        let before = engine.colors().clone();

        assert_eq!(engine.tap(0).unwrap(), TapOutcome::Selected);
        assert_eq!(engine.tap(4).unwrap(), TapOutcome::Matched);

        assert_eq!(engine.score(), 10);
        assert!(engine.has_matched(CellPair::new(0, 4).unwrap()));
        assert_ne!(engine.colors(), &before);
        assert_eq!(engine.colors().len(), 9);
        assert!(engine.selection().is_empty());
        assert_eq!(engine.reshuffle_count(), 1);
        assert!(!engine.is_over());
    }

    #[test]
    fn every_matching_pair_on_classic_board_scores() {
        let board = ColorMap::CLASSIC;
        for a in 0..9u8 {
            for b in 0..9u8 {
                if a == b || board[usize::from(a)] != board[usize::from(b)] {
                    continue;
                }
                let mut engine = classic();
                engine.tap(a).unwrap();
                assert_eq!(engine.tap(b).unwrap(), TapOutcome::Matched);
                assert_eq!(engine.score(), 10);
                assert_ne!(engine.colors(), &ColorMap::classic());
            }
        }
    }

    #[test]
    fn every_mismatching_pair_on_classic_board_ends_game() {
        let board = ColorMap::CLASSIC;
        for a in 0..9u8 {
            for b in 0..9u8 {
                if board[usize::from(a)] == board[usize::from(b)] {
                    continue;
                }
                let mut engine = classic();
                engine.tap(a).unwrap();
                assert_eq!(engine.tap(b).unwrap(), TapOutcome::Mismatched);
                assert!(engine.is_over());
                assert_eq!(engine.score(), 0);
                assert_eq!(engine.colors(), &ColorMap::classic());
                assert!(engine.selection().is_empty());
            }
        }
    }

    #[test]
    fn tapping_selected_cell_twice_deselects() {
        let mut engine = classic();

        engine.tap(3).unwrap();
        assert_eq!(engine.tap(3).unwrap(), TapOutcome::Deselected);

        assert!(engine.selection().is_empty());
        assert_eq!(engine.score(), 0);
        assert!(!engine.is_over());
    }

    #[test]
    fn deselect_then_pick_another_cell() {
        let mut engine = classic();

        engine.tap(1).unwrap();
        engine.tap(1).unwrap();
        engine.tap(2).unwrap();

        assert_eq!(engine.selection().as_slice(), &[2]);
    }

    #[test]
    fn already_matched_pair_is_inert() {
        let mut engine = engine_with(&[0, 0, 1, 1, 2, 2, 3, 3, 0]);
        engine.tap(0).unwrap();
        engine.tap(1).unwrap();
        let score = engine.score();
        let colors = engine.colors().clone();

        engine.tap(1).unwrap();
        assert_eq!(engine.tap(0).unwrap(), TapOutcome::AlreadyMatched);

        assert_eq!(engine.score(), score);
        assert_eq!(engine.colors(), &colors);
        assert!(!engine.is_over());
        assert!(engine.selection().is_empty());
    }

    fn scripted_engine(colors: &[ColorId], script: &[ColorId]) -> PlayEngine<ScriptedColorSource> {
        let map = ColorMap::from_colors((3, 3), 4, colors).unwrap();
        PlayEngine::new(GameConfig::classic(), map, ScriptedColorSource::new(script)).unwrap()
    }

    #[test]
    fn already_matched_pair_is_inert_when_colors_now_differ() {
        let mut engine = scripted_engine(
            &[0, 0, 1, 1, 2, 2, 3, 3, 0],
            &[1, 2, 0, 1, 2, 3, 0, 1, 2],
        );
        engine.tap(0).unwrap();
        engine.tap(1).unwrap();
        assert_ne!(engine.colors()[0], engine.colors()[1]);

        assert_eq!(engine.tap(0).unwrap(), TapOutcome::Selected);
        assert_eq!(engine.tap(1).unwrap(), TapOutcome::AlreadyMatched);
        assert!(!engine.is_over());
        assert_eq!(engine.score(), 10);
    }

    #[test]
    fn already_matched_pair_is_inert_when_colors_match_again() {
        let mut engine = scripted_engine(
            &[0, 0, 1, 1, 2, 2, 3, 3, 0],
            &[3, 3, 0, 1, 2, 3, 0, 1, 2],
        );
        engine.tap(0).unwrap();
        engine.tap(1).unwrap();
        assert_eq!(engine.colors()[0], engine.colors()[1]);
        let colors = engine.colors().clone();

        engine.tap(1).unwrap();
        assert_eq!(engine.tap(0).unwrap(), TapOutcome::AlreadyMatched);
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.reshuffle_count(), 1);
        assert_eq!(engine.colors(), &colors);
    }

    #[test]
    fn game_over_freezes_all_state() {
        let mut engine = classic();
        engine.tap(0).unwrap();
        engine.tap(1).unwrap();
        assert!(engine.is_over());
        let frozen = engine.snapshot();

        for index in 0..9 {
            assert_eq!(engine.tap(index).unwrap(), TapOutcome::NoChange);
            assert_eq!(engine.snapshot(), frozen);
        }
    }

    #[test]
    fn invalid_index_is_rejected_without_change() {
        let mut engine = classic();
        engine.tap(2).unwrap();
        let before = engine.snapshot();

        assert_eq!(engine.tap(9), Err(GameError::InvalidIndex));
        assert_eq!(engine.tap(u8::MAX), Err(GameError::InvalidIndex));
        assert_eq!(engine.tap_coords((0, 3)), Err(GameError::InvalidIndex));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn invalid_index_is_still_rejected_after_game_over() {
        let mut engine = classic();
        engine.tap(0).unwrap();
        engine.tap(1).unwrap();

        assert_eq!(engine.tap(9), Err(GameError::InvalidIndex));
    }

    #[test]
    fn tap_coords_addresses_row_major_cells() {
        let mut engine = classic();

        engine.tap_coords((0, 0)).unwrap();
        assert_eq!(engine.tap_coords((1, 1)).unwrap(), TapOutcome::Matched);
        assert!(engine.has_matched(CellPair::new(0, 4).unwrap()));
    }

    #[test]
    fn classic_scenario_match_then_mismatch() {
        let mut engine = classic();

        let snapshot = engine.tap_cell(0).unwrap();
        assert_eq!(snapshot.selection, [0]);
        let snapshot = engine.tap_cell(4).unwrap();
        assert_eq!(snapshot.score, 10);
        assert_eq!(snapshot.matched, [(0, 4)]);
        assert_eq!(snapshot.colors.len(), 9);
        assert_ne!(snapshot.colors, ColorMap::CLASSIC.to_vec());
        assert!(!snapshot.game_over);

        let reshuffled = engine.colors().clone();
        let matched = CellPair::new(0, 4);
        let first = (0..9u8)
            .find_map(|a| {
                (0..9u8)
                    .filter(|&b| b != a && CellPair::new(a, b) != matched)
                    .find(|&b| reshuffled[a] != reshuffled[b])
                    .map(|b| (a, b))
            })
            .unwrap();

        engine.tap(first.0).unwrap();
        let snapshot = engine.tap_cell(first.1).unwrap();

        assert!(snapshot.game_over);
        assert_eq!(snapshot.score, 10);
        assert_eq!(engine.colors(), &reshuffled);
    }

    #[test]
    fn selection_never_exceeds_two() {
        let mut engine = engine_with(&[0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let taps: Vec<CellIndex> = (0..40).map(|i| (i * 7 % 9) as CellIndex).collect();

        for index in taps {
            engine.tap(index).unwrap();
            assert!(engine.selection().len() <= 2);
            if engine.is_over() {
                break;
            }
        }
    }

    #[test]
    fn engine_rejects_mismatched_config() {
        let map = ColorMap::from_colors((1, 2), 2, &[0, 1]).unwrap();

        assert_eq!(
            PlayEngine::new(GameConfig::classic(), map, SeededColorSource::new(1)).err(),
            Some(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn random_layout_engine_uses_config_size() {
        let config = GameConfig::new((2, 3), 3).unwrap();
        let engine = PlayEngine::with_layout(config, StartLayout::Random, 9).unwrap();

        assert_eq!(engine.size(), (2, 3));
        assert_eq!(engine.colors().palette(), 3);
    }

    #[test]
    fn engine_rejects_invalid_config_fields() {
        let mut config = GameConfig::classic();
        config.palette = 0;

        assert_eq!(
            PlayEngine::new(config, ColorMap::classic(), SeededColorSource::new(1)).err(),
            Some(GameError::PaletteTooSmall)
        );
    }

    #[test]
    fn engine_rejects_deserialized_zero_palette() {
        let config = r#"{"size":[3,3],"palette":0,"score_increment":10,"max_reshuffle_attempts":1000}"#;
        let map = r#"{"colors":{"v":1,"dim":[3,3],"data":[0,0,0,0,0,0,0,0,0]},"palette":0}"#;

        assert!(serde_json::from_str::<GameConfig>(config).is_err());
        assert!(serde_json::from_str::<ColorMap>(map).is_err());
    }

    #[test]
    fn score_saturates() {
        let mut config = GameConfig::classic();
        config.score_increment = Score::MAX;
        let map = ColorMap::from_colors((3, 3), 4, &[0, 0, 0, 0, 1, 1, 2, 2, 3]).unwrap();
        let source = ScriptedColorSource::new(&[1, 2, 2, 0, 0, 0, 0, 0, 0]);
        let mut engine = PlayEngine::new(config, map, source).unwrap();

        engine.tap(0).unwrap();
        assert_eq!(engine.tap(1).unwrap(), TapOutcome::Matched);
        assert_eq!(engine.score(), Score::MAX);

        engine.tap(1).unwrap();
        assert_eq!(engine.tap(2).unwrap(), TapOutcome::Matched);
        assert_eq!(engine.score(), Score::MAX);
        assert_eq!(engine.reshuffle_count(), 2);
    }
}
