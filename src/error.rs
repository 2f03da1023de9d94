/// Errors raised while loading a maze layout or a game configuration.
///
/// Nothing inside a tick can fail: out-of-bounds lookups are treated as walls
/// and removing an absent pickup does nothing.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// A layout character outside the known symbol set.
    #[error("unknown layout symbol {symbol:?} at row {row}, column {col}")]
    UnknownLayoutSymbol { row: usize, col: usize, symbol: char },

    #[error("layout has no cells")]
    EmptyLayout,

    /// A layout row whose width differs from the first row.
    #[error("layout row {row} has {found} columns, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;
