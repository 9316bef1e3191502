//! Othello rules engine and computer opponent.
//!
//! The free functions below are the surface used by the web page (see
//! [`wasm`]); [`board::Board`], [`ai::Engine`] and [`game::Game`] expose the
//! same rules with more control.

use once_cell::sync::Lazy;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod types;
pub mod wasm;

pub use ai::Engine;
pub use board::Board;
pub use config::EngineConfig;
pub use error::EngineError;
pub use game::Game;
pub use types::{Cell, Color, GameResult, Position, Strategy};

/// Engine with the default depth and weight table.
pub(crate) static DEFAULT_ENGINE: Lazy<Engine> = Lazy::new(Engine::default);

/// Number of `color` chips on `board`.
pub fn point_count(color: Color, board: &Board) -> usize {
    board.point_count(color)
}

pub fn winner(board: &Board, turn: Color) -> GameResult {
    board.winner(turn)
}

pub fn valid_moves(board: &Board, turn: Color) -> Vec<Position> {
    board.legal_moves(turn)
}

/// Unchecked move application; `mv` must come from [`valid_moves`].
pub fn apply_move(board: &Board, turn: Color, mv: Position) -> Board {
    board.apply_move(mv, turn)
}

/// Picks the computer's move with the named strategy (`"random"` or
/// `"minimax"`) using the default engine.
pub fn computer_move(
    board: &Board,
    turn: Color,
    strategy_name: &str,
) -> Result<Position, EngineError> {
    let strategy: Strategy = strategy_name.parse()?;
    DEFAULT_ENGINE.choose_move(board, turn, strategy)
}
