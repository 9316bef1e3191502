use crate::board::{Board, DIRECTIONS};
use crate::config::{STANDARD_WEIGHTS, validate_weights};
use crate::error::EngineError;
use crate::types::{Cell, Color, Position};

const CORNER_WEIGHT: i32 = 100;
const EDGE_WEIGHT: i32 = 10;
const CORNER_CONTROL: i32 = 25;
const MOBILITY_FACTOR: i32 = 2;
const STABLE_CORNER: i32 = 10;
const STABLE_RUN_CHIP: i32 = 2;
const EDGE_CHIP: i32 = 5;
const ENDGAME_PHASE: f64 = 0.8;
const EARLY_PHASE: f64 = 0.3;

/// Heuristic sub-scores from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Features {
    pub player_pieces: i32,
    pub opponent_pieces: i32,
    pub positional: i32,
    pub corners: i32,
    pub mobility: i32,
    pub stability: i32,
    pub edges: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Early,
    Middle,
    End,
}

impl Phase {
    /// Classifies a board by the share of occupied squares.
    pub fn of(board: &Board) -> Phase {
        let cells = board.size() * board.size();
        let filled = (cells - board.empty_count()) as f64 / cells as f64;
        if filled > ENDGAME_PHASE {
            Phase::End
        } else if filled < EARLY_PHASE {
            Phase::Early
        } else {
            Phase::Middle
        }
    }
}

/// Hand-tuned positional evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluator {
    table_size: usize,
    table: Vec<i32>,
}

impl Evaluator {
    /// Uses `weights` for boards of the same size. The table must be
    /// non-empty and square.
    pub fn new(weights: &[Vec<i32>]) -> Result<Self, EngineError> {
        validate_weights(weights)?;
        Ok(Self {
            table_size: weights.len(),
            table: weights.iter().flatten().copied().collect(),
        })
    }

    /// Score of `board` for `player`; higher is better.
    pub fn evaluate(&self, board: &Board, player: Color) -> i32 {
        let f = self.features(board, player);
        let ratio = |scale: f64| {
            let diff = (f.player_pieces - f.opponent_pieces) as f64;
            diff / (f.player_pieces + f.opponent_pieces).max(1) as f64 * scale
        };

        let score = match Phase::of(board) {
            Phase::End => {
                ratio(100.0) * 4.0
                    + f.positional as f64 * 0.5
                    + f.corners as f64 * 2.0
                    + f.mobility as f64 * 0.5
            }
            Phase::Early => {
                (f.positional * 2 + f.corners * 3 + f.mobility * 3 + f.stability * 2 + f.edges)
                    as f64
            }
            Phase::Middle => {
                ratio(50.0)
                    + (f.positional + f.corners * 2 + f.mobility * 2 + f.stability + f.edges)
                        as f64
            }
        };

        // Halves round up, like JavaScript's Math.round.
        (score + 0.5).floor() as i32
    }

    /// Computes every sub-score without combining them.
    pub fn features(&self, board: &Board, player: Color) -> Features {
        let me = player.to_cell();
        let opp = player.opponent().to_cell();
        let size = board.size();
        let mut f = Features::default();

        for row in 0..size {
            for col in 0..size {
                let pos = Position::new(row, col);
                let cell = board.get(pos);
                if cell == me {
                    f.player_pieces += 1;
                    f.positional += self.weight(size, pos);
                } else if cell == opp {
                    f.opponent_pieces += 1;
                    f.positional -= self.weight(size, pos);
                }
            }
        }

        for corner in board.corners() {
            f.corners += signed(board.get(corner), me, opp, CORNER_CONTROL);
        }

        let player_moves = board.legal_moves(player).len() as i32;
        let opponent_moves = board.legal_moves(player.opponent()).len() as i32;
        f.mobility = (player_moves - opponent_moves) * MOBILITY_FACTOR;

        f.stability = stability(board, player) - stability(board, player.opponent());

        let last = size - 1;
        for i in 0..size {
            for pos in [
                Position::new(0, i),
                Position::new(last, i),
                Position::new(i, 0),
                Position::new(i, last),
            ] {
                f.edges += signed(board.get(pos), me, opp, EDGE_CHIP);
            }
        }

        f
    }

    fn weight(&self, size: usize, pos: Position) -> i32 {
        if size == self.table_size {
            return self.table[pos.row * size + pos.col];
        }

        let last = size - 1;
        let row_edge = pos.row == 0 || pos.row == last;
        let col_edge = pos.col == 0 || pos.col == last;
        match (row_edge, col_edge) {
            (true, true) => CORNER_WEIGHT,
            (true, false) | (false, true) => EDGE_WEIGHT,
            (false, false) => 0,
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self {
            table_size: STANDARD_WEIGHTS.len(),
            table: STANDARD_WEIGHTS.iter().flatten().copied().collect(),
        }
    }
}

fn signed(cell: Cell, me: Cell, opp: Cell, value: i32) -> i32 {
    if cell == me {
        value
    } else if cell == opp {
        -value
    } else {
        0
    }
}

/// Approximate stable chips: owned corners plus unbroken same-color lines
/// running out of them.
fn stability(board: &Board, player: Color) -> i32 {
    let me = player.to_cell();
    let size = board.size();
    let mut stability = 0;

    for corner in board.corners() {
        if board.get(corner) != me {
            continue;
        }
        stability += STABLE_CORNER;

        for (dr, dc) in DIRECTIONS {
            let mut cursor = corner.offset(dr, dc, size);
            while let Some(pos) = cursor {
                if board.get(pos) != me {
                    break;
                }
                stability += STABLE_RUN_CHIP;
                cursor = pos.offset(dr, dc, size);
            }
        }
    }

    stability
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(rows: &[&str]) -> Board {
        let rows = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        'B' => Cell::Black,
                        'W' => Cell::White,
                        _ => Cell::Empty,
                    })
                    .collect()
            })
            .collect();
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn initial_position_is_balanced() {
        let evaluator = Evaluator::default();
        let board = Board::new();

        assert_eq!(evaluator.evaluate(&board, Color::Black), 0);
        assert_eq!(evaluator.evaluate(&board, Color::White), 0);
    }

    #[test]
    fn phase_follows_fill_ratio() {
        assert_eq!(Phase::of(&Board::new()), Phase::Early);
        let full = parse(&["BB", "WW"]);
        assert_eq!(Phase::of(&full), Phase::End);
        let half = parse(&["BB..", "WW..", "BB..", "WW.."]);
        assert_eq!(Phase::of(&half), Phase::Middle);
    }

    #[test]
    fn standard_table_scores_corner_against_x_square() {
        let evaluator = Evaluator::default();
        let mut board = Board::empty(8).unwrap();
        board.set(Position::new(0, 0), Cell::Black);
        board.set(Position::new(1, 1), Cell::White);

        let f = evaluator.features(&board, Color::Black);

        assert_eq!(f.positional, 100 - (-50));
        assert_eq!(f.corners, 25);
        // Corner +10; (1,1) is white so the diagonal run is empty.
        assert_eq!(f.stability, 10);
        // (0,0) lies on the top row and the left column.
        assert_eq!(f.edges, 10);
    }

    #[test]
    fn other_sizes_use_corner_and_edge_weights() {
        let evaluator = Evaluator::default();
        let board = parse(&[
            "B.W...", //
            "......", //
            "..B...", //
            "......", //
            "......", //
            "......",
        ]);

        let f = evaluator.features(&board, Color::Black);

        assert_eq!(f.positional, 100 - 10);
        assert_eq!(f.player_pieces, 2);
        assert_eq!(f.opponent_pieces, 1);
    }

    #[test]
    fn stability_counts_runs_from_owned_corners() {
        let board = parse(&[
            "BBBW", //
            "B...", //
            "..B.", //
            "....",
        ]);

        // Corner 10 + right run 2 + down run 1 + diagonal run ((1,1) empty) 0.
        assert_eq!(stability(&board, Color::Black), 10 + 2 * 2 + 2 + 0);
        // White corner (0,3): left neighbour is black.
        assert_eq!(stability(&board, Color::White), 10);
    }

    #[test]
    fn mobility_compares_move_counts() {
        let evaluator = Evaluator::default();
        let board = parse(&[
            "BW..", //
            "....", //
            "....", //
            "....",
        ]);

        let f = evaluator.features(&board, Color::Black);

        assert_eq!(f.mobility, (1 - 0) * 2);
    }

    #[test]
    fn endgame_weighs_piece_ratio() {
        let evaluator = Evaluator::default();
        // 4x4, fully black except one white in the middle of an edge.
        let board = parse(&[
            "BBBB", //
            "BBBB", //
            "BBBB", //
            "BWBB",
        ]);

        let f = evaluator.features(&board, Color::Black);
        let expected = (15.0 - 1.0) / 16.0 * 100.0 * 4.0
            + f.positional as f64 * 0.5
            + f.corners as f64 * 2.0
            + f.mobility as f64 * 0.5;

        assert_eq!(
            evaluator.evaluate(&board, Color::Black),
            (expected + 0.5).floor() as i32
        );
        assert!(evaluator.evaluate(&board, Color::Black) > 0);
        assert!(evaluator.evaluate(&board, Color::White) < 0);
    }

    #[test]
    fn custom_table_applies_only_to_matching_size() {
        let evaluator = Evaluator::new(&[vec![7, 0], vec![0, 0]]).unwrap();
        let small = parse(&["B.", ".."]);
        let large = parse(&["B..", "...", "..."]);

        assert_eq!(evaluator.features(&small, Color::Black).positional, 7);
        assert_eq!(evaluator.features(&large, Color::Black).positional, 100);
    }

    #[test]
    fn ragged_table_is_rejected_at_construction() {
        assert!(matches!(
            Evaluator::new(&[vec![1, 2, 3], vec![]]),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(Evaluator::new(&[]).is_err());
    }

    #[test]
    fn default_matches_standard_table() {
        let standard: Vec<Vec<i32>> = STANDARD_WEIGHTS.iter().map(|row| row.to_vec()).collect();
        assert_eq!(Evaluator::new(&standard).unwrap(), Evaluator::default());
    }
}
