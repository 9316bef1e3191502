use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ai::MoveSelector;
use crate::board::Board;
use crate::types::{Color, Position};

/// Picks uniformly among `moves`, or `None` when there are none.
pub fn pick<R: Rng + ?Sized>(moves: &[Position], rng: &mut R) -> Option<Position> {
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.random_range(0..moves.len())])
}

/// An agent that selects uniformly at random from legal moves.
#[derive(Debug, Clone)]
pub struct RandomMover {
    rng: StdRng,
}

impl RandomMover {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for RandomMover {
    fn select_move(&mut self, board: &Board, player: Color) -> Option<Position> {
        pick(&board.legal_moves(player), &mut self.rng)
    }

    fn name(&self) -> &str {
        "random"
    }
}
