/// Errors raised by the game core and the terminal front end.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Asteroid radius that doesn't map onto Small / Medium / Large.
    #[error("no asteroid tier for radius {radius}")]
    UnknownTier { radius: f32 },

    /// Terminal I/O failure
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
