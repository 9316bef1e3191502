//! Computer players: move selection on top of the rules in [`crate::board`].

pub mod eval;
pub mod random;
pub mod search;

use rand::Rng;

use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::types::{Color, Position, Strategy};

use self::eval::Evaluator;
use self::random::RandomMover;
use self::search::{MinimaxMover, Searcher};

pub trait MoveSelector {
    /// Chooses a move for `player`, or `None` when it has no legal move.
    fn select_move(&mut self, board: &Board, player: Color) -> Option<Position>;

    fn name(&self) -> &str;
}

/// Validated configuration plus the evaluator built from it.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    evaluator: Evaluator,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let evaluator = Evaluator::new(&config.position_weights)?;
        Ok(Self { config, evaluator })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn searcher(&self) -> Searcher<'_> {
        Searcher::new(&self.evaluator, self.config.search_depth)
    }

    /// Builds a stateful selector for a game session.
    pub fn selector(&self, strategy: Strategy) -> Box<dyn MoveSelector> {
        match strategy {
            Strategy::Random => Box::new(RandomMover::new()),
            Strategy::Minimax => Box::new(MinimaxMover::new(
                self.evaluator.clone(),
                self.config.search_depth,
            )),
        }
    }

    /// Picks a move for `turn` with the thread-local RNG for [`Strategy::Random`].
    pub fn choose_move(
        &self,
        board: &Board,
        turn: Color,
        strategy: Strategy,
    ) -> Result<Position, EngineError> {
        self.choose_move_with_rng(board, turn, strategy, &mut rand::rng())
    }

    pub fn choose_move_with_rng<R: Rng + ?Sized>(
        &self,
        board: &Board,
        turn: Color,
        strategy: Strategy,
        rng: &mut R,
    ) -> Result<Position, EngineError> {
        let selected = match strategy {
            Strategy::Random => random::pick(&board.legal_moves(turn), rng),
            Strategy::Minimax => self.searcher().search(board, turn),
        };
        selected.ok_or(EngineError::NoLegalMoves)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            evaluator: Evaluator::default(),
        }
    }
}
