use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::EngineError;

/// Contents of a single board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Returns the color of the chip on this square, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Side to move. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub fn to_cell(self) -> Cell {
        match self {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }

    /// Wire code used by the web page: 0 = black, 1 = white.
    pub fn code(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, EngineError> {
        match code {
            0 => Ok(Color::Black),
            1 => Ok(Color::White),
            other => Err(EngineError::InvalidColor(other)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("black"),
            Color::White => f.write_str("white"),
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Steps one square in direction `(dr, dc)`, or `None` when leaving a
    /// `size`x`size` board.
    pub fn offset(self, dr: i32, dc: i32, size: usize) -> Option<Position> {
        let row = self.row as i64 + dr as i64;
        let col = self.col as i64 + dc as i64;
        let bound = 0..size as i64;
        if bound.contains(&row) && bound.contains(&col) {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }

    pub fn to_pair(self) -> [usize; 2] {
        [self.row, self.col]
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

/// Outcome of a position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameResult {
    BlackWins,
    WhiteWins,
    Tie,
    InProgress,
}

impl GameResult {
    /// Decides a finished game from chip counts.
    pub fn from_counts(black: usize, white: usize) -> Self {
        if black > white {
            GameResult::BlackWins
        } else if white > black {
            GameResult::WhiteWins
        } else {
            GameResult::Tie
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::BlackWins => Some(Color::Black),
            GameResult::WhiteWins => Some(Color::White),
            GameResult::Tie | GameResult::InProgress => None,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameResult::InProgress
    }

    /// Wire code: winner color code, -1 for a tie, `None` while in progress.
    pub fn code(self) -> Option<i32> {
        match self {
            GameResult::BlackWins => Some(0),
            GameResult::WhiteWins => Some(1),
            GameResult::Tie => Some(-1),
            GameResult::InProgress => None,
        }
    }
}

/// How the computer picks its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Random,
    Minimax,
}

impl FromStr for Strategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Strategy::Random),
            "minimax" => Ok(Strategy::Minimax),
            other => Err(EngineError::InvalidStrategy(other.to_string())),
        }
    }
}

/// Snapshot of a game session returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub squares: Vec<Vec<Option<u8>>>,
    pub turn: Color,
    pub black_count: usize,
    pub white_count: usize,
    pub is_game_over: bool,
    /// `true` when the side that was due to move before `turn` had to pass.
    pub is_pass: bool,
    /// Cells flipped by the previous move. Empty after a pass.
    pub flipped: Vec<Position>,
}

/// Final tally after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalScore {
    pub result: GameResult,
    pub black_count: usize,
    pub white_count: usize,
}
