use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid cell index")]
    InvalidIndex,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Color is outside of the palette")]
    InvalidColor,
    #[error("Palette needs at least two colors")]
    PaletteTooSmall,
}

pub type Result<T> = core::result::Result<T, GameError>;
