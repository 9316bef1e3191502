/// Errors returned by the rules engine and its callers' entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid player selected: {0}")]
    InvalidStrategy(String),

    #[error("invalid color value: {0}")]
    InvalidColor(i64),

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("move ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("illegal move ({row}, {col})")]
    IllegalMove { row: usize, col: usize },

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("game is already over")]
    GameOver,

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
