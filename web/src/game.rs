use crate::theme::Theme;
use crate::utils::*;
use clap::{Args, ValueEnum};
use squaregame_core as game;
use yew::prelude::*;

/// CSS class for each palette color, in palette order.
const SWATCHES: [&str; 4] = ["red", "blue", "green", "yellow"];

fn swatch_class(color: game::ColorId) -> &'static str {
    SWATCHES
        .get(usize::from(color))
        .copied()
        .unwrap_or("unknown")
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCellState {
    Open(game::ColorId),
    Selected(game::ColorId),
    Locked(game::ColorId),
}

impl ViewCellState {
    fn of(engine: &game::PlayEngine, index: game::CellIndex) -> Self {
        let color = engine.colors()[index];
        if engine.is_over() {
            Self::Locked(color)
        } else if engine.is_selected(index) {
            Self::Selected(color)
        } else {
            Self::Open(color)
        }
    }

    fn color(self) -> game::ColorId {
        match self {
            Self::Open(color) | Self::Selected(color) | Self::Locked(color) => color,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewGameState {
    Playing(game::Score),
    Over(game::Score),
}

impl ViewGameState {
    fn of(engine: &game::PlayEngine) -> Self {
        if engine.is_over() {
            Self::Over(engine.score())
        } else {
            Self::Playing(engine.score())
        }
    }

    fn is_playable(self) -> bool {
        matches!(self, Self::Playing(_))
    }

    fn header_text(self) -> String {
        match self {
            Self::Playing(score) => format!("Score: {}", score),
            Self::Over(_) => "Game Over".to_string(),
        }
    }

    fn header_class(self) -> &'static str {
        match self {
            Self::Playing(_) => "score",
            Self::Over(_) => "game-over",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Tap(game::CellIndex),
    ToggleTheme,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: game::CellIndex,
    cell_state: ViewCellState,
    callback: Callback<game::CellIndex>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use ViewCellState::*;

    let CellProps {
        index,
        cell_state,
        callback,
    } = props.clone();

    let class = classes!(
        "cell",
        swatch_class(cell_state.color()),
        match cell_state {
            Open(_) => None,
            Selected(_) => Some("selected"),
            Locked(_) => Some("locked"),
        }
    );

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("cell {} clicked", index);
        callback.emit(index);
    });

    html! {
        <td {class} {onclick}/>
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum Layout {
    /// The fixed board the game has always started with
    #[default]
    Classic,
    /// A freshly drawn board
    Random,
}

impl From<Layout> for game::StartLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Classic => game::StartLayout::Classic,
            Layout::Random => game::StartLayout::Random,
        }
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    pub(crate) seed: Option<String>,

    /// Starting board
    #[arg(short, long, value_enum, default_value_t)]
    #[prop_or_default]
    pub(crate) layout: Layout,
}

fn new_engine(props: &GameProps) -> game::PlayEngine {
    let seed = props
        .seed
        .as_deref()
        .map_or_else(js_random_seed, parse_seed);
    log::debug!("seed: {}, layout: {:?}", seed, props.layout);

    game::PlayEngine::with_layout(game::GameConfig::classic(), props.layout.into(), seed)
        .unwrap_or_else(|err| {
            log::error!("could not build {:?} board: {}", props.layout, err);
            game::PlayEngine::classic(seed)
        })
}

#[derive(Debug)]
pub(crate) struct GameView {
    engine: game::PlayEngine,
    theme: Option<Theme>,
}

impl GameView {
    fn tap(&mut self, index: game::CellIndex) -> bool {
        if !ViewGameState::of(&self.engine).is_playable() {
            return false;
        }

        match self.engine.tap(index) {
            Ok(outcome) => {
                log::debug!("tap {}: {:?}", index, outcome);
                if outcome.ends_game() {
                    log::info!("game over with score {}", self.engine.score());
                }
                outcome.has_update()
            }
            Err(err) => {
                log::error!("tap {} rejected: {}", index, err);
                false
            }
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            engine: new_engine(ctx.props()),
            theme: Theme::current(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Tap(index) => self.tap(index),
            Msg::ToggleTheme => {
                self.theme = Theme::next(self.theme);
                Theme::apply(self.theme);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let (rows, cols) = self.engine.size();
        let game_state = ViewGameState::of(&self.engine);
        let header_class = classes!(game_state.header_class());
        let cb_toggle_theme = ctx.link().callback(|_| Msg::ToggleTheme);
        let cb_tap = ctx.link().callback(Msg::Tap);

        html! {
            <div class="squaregame">
                <small onclick={cb_toggle_theme}>{"◐"}</small>
                <h1 class={header_class}>{game_state.header_text()}</h1>
                <table class={game_state.is_playable().then_some("playable")}>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let index = row * cols + col;
                                        let cell_state = ViewCellState::of(&self.engine, index);
                                        let callback = cb_tap.clone();
                                        html! {
                                            <CellView {index} {cell_state} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
            </div>
        }
    }
}
