use crate::ai::{Engine, MoveSelector};
use crate::board::Board;
use crate::error::EngineError;
use crate::types::{Color, FinalScore, GameResult, GameState, Position, Strategy};

/// One game between a human and the computer, with passes handled
/// automatically. Only the current position is kept.
pub struct Game {
    board: Board,
    turn: Color,
    is_game_over: bool,
    is_pass: bool,
    flipped: Vec<Position>,
    selector: Box<dyn MoveSelector>,
}

impl Game {
    pub fn new(board: Board, turn: Color, selector: Box<dyn MoveSelector>) -> Self {
        let mut game = Self {
            board,
            turn,
            is_game_over: false,
            is_pass: false,
            flipped: Vec::new(),
            selector,
        };
        game.settle_turn();
        game
    }

    /// Standard 8x8 game, black to move.
    pub fn standard(engine: &Engine, strategy: Strategy) -> Self {
        Self::new(Board::new(), Color::Black, engine.selector(strategy))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        if self.is_game_over {
            return Vec::new();
        }
        self.board.legal_moves(self.turn)
    }

    /// Plays a human move for the side to move.
    pub fn place(&mut self, row: usize, col: usize) -> Result<(), EngineError> {
        if self.is_game_over {
            return Err(EngineError::GameOver);
        }
        self.apply(Position::new(row, col))
    }

    /// Lets the computer play for the side to move.
    pub fn computer_move(&mut self) -> Result<Position, EngineError> {
        if self.is_game_over {
            return Err(EngineError::GameOver);
        }

        let selected = self
            .selector
            .select_move(&self.board, self.turn)
            .ok_or(EngineError::NoLegalMoves)?;
        log::debug!(
            "{} computer ({}) plays ({}, {})",
            self.turn,
            self.selector.name(),
            selected.row,
            selected.col
        );

        self.apply(selected)?;
        Ok(selected)
    }

    pub fn state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        GameState {
            squares: self.board.to_squares(),
            turn: self.turn,
            black_count,
            white_count,
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    /// Final tally; `InProgress` until the game has ended.
    pub fn result(&self) -> FinalScore {
        let (black_count, white_count) = self.board.count();
        FinalScore {
            result: if self.is_game_over {
                GameResult::from_counts(black_count, white_count)
            } else {
                GameResult::InProgress
            },
            black_count,
            white_count,
        }
    }

    fn apply(&mut self, pos: Position) -> Result<(), EngineError> {
        let flipped = self.board.flips(pos, self.turn);
        self.board = self.board.play(pos, self.turn)?;
        self.flipped = flipped;
        self.turn = self.turn.opponent();
        self.settle_turn();
        Ok(())
    }

    /// Passes for a stalled side to move, or ends the game when neither side
    /// can move.
    fn settle_turn(&mut self) {
        self.is_pass = false;
        if self.board.is_full() {
            self.is_game_over = true;
            return;
        }
        if self.board.has_legal_move(self.turn) {
            return;
        }
        if self.board.has_legal_move(self.turn.opponent()) {
            log::debug!("{} has no legal move and passes", self.turn);
            self.turn = self.turn.opponent();
            self.is_pass = true;
            self.flipped.clear();
        } else {
            self.is_game_over = true;
        }
    }
}
