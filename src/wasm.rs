//! WASM bindings for the web page.
//!
//! Boards travel as `(number | null)[][]` with `0` for black, `1` for white
//! and `null` for an empty square. Turns use the same codes and moves are
//! `[row, col]` pairs.

use wasm_bindgen::prelude::*;

use crate::DEFAULT_ENGINE;
use crate::ai::Engine;
use crate::board::Board;
use crate::config::EngineConfig;
use crate::game::Game;
use crate::types::{Color, Position, Strategy};

fn board_from_js(squares: JsValue) -> Result<Board, JsError> {
    let squares: Vec<Vec<Option<u8>>> = serde_wasm_bindgen::from_value(squares)?;
    Ok(Board::from_squares(&squares)?)
}

fn board_to_js(board: &Board) -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(&board.to_squares())?)
}

fn color_from_js(code: i32) -> Result<Color, JsError> {
    Ok(Color::from_code(code as i64)?)
}

fn move_to_js(mv: Position) -> Result<JsValue, JsError> {
    Ok(serde_wasm_bindgen::to_value(&mv.to_pair())?)
}

#[wasm_bindgen(js_name = getPoints)]
pub fn get_points(color: i32, squares: JsValue) -> Result<usize, JsError> {
    let board = board_from_js(squares)?;
    Ok(board.point_count(color_from_js(color)?))
}

/// `0` black wins, `1` white wins, `-1` tie, `null` while in progress.
#[wasm_bindgen(js_name = getWinner)]
pub fn get_winner(squares: JsValue, turn: i32) -> Result<Option<i32>, JsError> {
    let board = board_from_js(squares)?;
    Ok(board.winner(color_from_js(turn)?).code())
}

#[wasm_bindgen(js_name = getValidMoves)]
pub fn get_valid_moves(squares: JsValue, turn: i32) -> Result<JsValue, JsError> {
    let board = board_from_js(squares)?;
    let moves: Vec<[usize; 2]> = board
        .legal_moves(color_from_js(turn)?)
        .into_iter()
        .map(Position::to_pair)
        .collect();
    Ok(serde_wasm_bindgen::to_value(&moves)?)
}

/// Applies a move returned by `getValidMoves` and returns the new board.
#[wasm_bindgen(js_name = flipChips)]
pub fn flip_chips(squares: JsValue, turn: i32, mv: JsValue) -> Result<JsValue, JsError> {
    let board = board_from_js(squares)?;
    let [row, col]: [usize; 2] = serde_wasm_bindgen::from_value(mv)?;
    let next = board.apply_move(Position::new(row, col), color_from_js(turn)?);
    board_to_js(&next)
}

#[wasm_bindgen(js_name = getComputerMove)]
pub fn get_computer_move(squares: JsValue, turn: i32, player: &str) -> Result<JsValue, JsError> {
    choose(&DEFAULT_ENGINE, squares, turn, player)
}

/// Like `getComputerMove` with a partial `{ searchDepth, positionWeights }`
/// config object.
#[wasm_bindgen(js_name = getComputerMoveWithConfig)]
pub fn get_computer_move_with_config(
    squares: JsValue,
    turn: i32,
    player: &str,
    config: JsValue,
) -> Result<JsValue, JsError> {
    let config: EngineConfig = serde_wasm_bindgen::from_value(config)?;
    let engine = Engine::new(config)?;
    choose(&engine, squares, turn, player)
}

#[wasm_bindgen(js_name = initialBoard)]
pub fn initial_board(size: usize) -> Result<JsValue, JsError> {
    board_to_js(&Board::initial(size)?)
}

fn choose(engine: &Engine, squares: JsValue, turn: i32, player: &str) -> Result<JsValue, JsError> {
    let strategy: Strategy = player.parse()?;
    let board = board_from_js(squares)?;
    let mv = engine.choose_move(&board, color_from_js(turn)?, strategy)?;
    move_to_js(mv)
}

/// A game against the computer kept on the Rust side. Snapshots come back as
/// `{ squares, turn, blackCount, whiteCount, isGameOver, isPass, flipped }`.
#[wasm_bindgen]
pub struct GameSession {
    game: Game,
}

#[wasm_bindgen]
impl GameSession {
    /// Black moves first on a `size` board (8 when omitted).
    #[wasm_bindgen(constructor)]
    pub fn new(player: &str, size: Option<usize>) -> Result<GameSession, JsError> {
        let strategy: Strategy = player.parse()?;
        let board = match size {
            Some(size) => Board::initial(size)?,
            None => Board::new(),
        };
        let game = Game::new(board, Color::Black, DEFAULT_ENGINE.selector(strategy));
        Ok(GameSession { game })
    }

    pub fn place(&mut self, row: usize, col: usize) -> Result<JsValue, JsError> {
        self.game.place(row, col)?;
        self.state()
    }

    /// Lets the computer move and returns its `[row, col]`.
    #[wasm_bindgen(js_name = computerMove)]
    pub fn computer_move(&mut self) -> Result<JsValue, JsError> {
        move_to_js(self.game.computer_move()?)
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.state())?)
    }

    /// `{ result, blackCount, whiteCount }`; `result` stays `"InProgress"`
    /// until the game is over.
    pub fn result(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.result())?)
    }
}
