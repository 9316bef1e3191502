use std::time::Duration;

use web_time::Instant;

use crate::ai::MoveSelector;
use crate::ai::eval::Evaluator;
use crate::board::Board;
use crate::types::{Color, GameResult, Position};

/// Score of a finished game won by the root player. Heuristic scores never
/// reach this magnitude.
pub const WIN_SCORE: i32 = 10_000;
const MIN_SCORE: i32 = i32::MIN;
const MAX_SCORE: i32 = i32::MAX;

/// What the side to move can do at one ply.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Ply {
    HasMoves(Vec<Position>),
    MustPass,
    GameOver,
}

impl Ply {
    fn classify(board: &Board, mover: Color) -> Self {
        let moves = board.legal_moves(mover);
        if !moves.is_empty() {
            Ply::HasMoves(moves)
        } else if board.has_legal_move(mover.opponent()) {
            Ply::MustPass
        } else {
            Ply::GameOver
        }
    }
}

/// Counters for the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
    pub elapsed: Duration,
}

/// Depth-limited minimax with alpha-beta pruning.
pub struct Searcher<'a> {
    evaluator: &'a Evaluator,
    max_depth: u8,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    /// Each root move is searched `max_depth` further plies.
    pub fn new(evaluator: &'a Evaluator, max_depth: u8) -> Self {
        Self {
            evaluator,
            max_depth,
            stats: SearchStats::default(),
        }
    }

    /// Searches the best move for `root`, or `None` when it has no legal move.
    ///
    /// Every root move is scored; the first move with the strictly highest
    /// score wins.
    pub fn search(&mut self, board: &Board, root: Color) -> Option<Position> {
        let start = Instant::now();
        self.stats = SearchStats::default();

        let moves = board.legal_moves(root);
        let mut best_move = *moves.first()?;
        let mut best_score = MIN_SCORE;
        let mut alpha = MIN_SCORE;

        for mv in moves {
            let next = board.apply_move(mv, root);
            let score = self.minimax(&next, root, false, self.max_depth, alpha, MAX_SCORE);
            log::trace!("root move ({}, {}) scored {score}", mv.row, mv.col);

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            alpha = alpha.max(score);
        }

        self.stats.elapsed = start.elapsed();
        log::debug!(
            "{root} search depth {} chose ({}, {}) score {best_score}: {} nodes, {} cutoffs, {:?}",
            self.max_depth,
            best_move.row,
            best_move.col,
            self.stats.nodes,
            self.stats.cutoffs,
            self.stats.elapsed
        );

        Some(best_move)
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn minimax(
        &mut self,
        board: &Board,
        root: Color,
        maximizing: bool,
        depth: u8,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        self.stats.nodes += 1;
        let mover = if maximizing { root } else { root.opponent() };

        let moves = match Ply::classify(board, mover) {
            Ply::GameOver => return terminal_score(board, root),
            Ply::MustPass if depth == 0 => return self.evaluator.evaluate(board, root),
            // The stalled side passes; the board is unchanged.
            Ply::MustPass => return self.minimax(board, root, !maximizing, depth - 1, alpha, beta),
            Ply::HasMoves(_) if depth == 0 => return self.evaluator.evaluate(board, root),
            Ply::HasMoves(moves) => moves,
        };

        let mut alpha = alpha;
        let mut beta = beta;

        if maximizing {
            let mut best = MIN_SCORE;
            for mv in moves {
                let next = board.apply_move(mv, mover);
                let score = self.minimax(&next, root, false, depth - 1, alpha, beta);
                best = best.max(score);
                alpha = alpha.max(best);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        } else {
            let mut best = MAX_SCORE;
            for mv in moves {
                let next = board.apply_move(mv, mover);
                let score = self.minimax(&next, root, true, depth - 1, alpha, beta);
                best = best.min(score);
                beta = beta.min(best);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        }
    }
}

/// Exact score of a finished game from `root`'s side.
fn terminal_score(board: &Board, root: Color) -> i32 {
    let (black, white) = board.count();
    match GameResult::from_counts(black, white).winner() {
        Some(winner) if winner == root => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None => 0,
    }
}

/// Computer player backed by [`Searcher`].
#[derive(Debug, Clone)]
pub struct MinimaxMover {
    evaluator: Evaluator,
    depth: u8,
}

impl MinimaxMover {
    pub fn new(evaluator: Evaluator, depth: u8) -> Self {
        Self { evaluator, depth }
    }
}

impl MoveSelector for MinimaxMover {
    fn select_move(&mut self, board: &Board, player: Color) -> Option<Position> {
        Searcher::new(&self.evaluator, self.depth).search(board, player)
    }

    fn name(&self) -> &str {
        "minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

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

    /// Unpruned reference with the same ply rules.
    fn full_minimax(
        evaluator: &Evaluator,
        board: &Board,
        root: Color,
        maximizing: bool,
        depth: u8,
    ) -> i32 {
        let mover = if maximizing { root } else { root.opponent() };
        match Ply::classify(board, mover) {
            Ply::GameOver => terminal_score(board, root),
            Ply::MustPass if depth == 0 => evaluator.evaluate(board, root),
            Ply::MustPass => full_minimax(evaluator, board, root, !maximizing, depth - 1),
            Ply::HasMoves(_) if depth == 0 => evaluator.evaluate(board, root),
            Ply::HasMoves(moves) => {
                let scores = moves.into_iter().map(|mv| {
                    let next = board.apply_move(mv, mover);
                    full_minimax(evaluator, &next, root, !maximizing, depth - 1)
                });
                if maximizing {
                    scores.max().unwrap()
                } else {
                    scores.min().unwrap()
                }
            }
        }
    }

    fn full_best_move(evaluator: &Evaluator, board: &Board, root: Color, depth: u8) -> Position {
        let mut best = None;
        for mv in board.legal_moves(root) {
            let next = board.apply_move(mv, root);
            let score = full_minimax(evaluator, &next, root, false, depth);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }
        best.unwrap().0
    }

    /// Plays `plies` random moves from the starting position.
    fn random_position(size: usize, plies: usize, rng: &mut StdRng) -> (Board, Color) {
        let mut board = Board::initial(size).unwrap();
        let mut turn = Color::Black;
        for _ in 0..plies {
            let moves = board.legal_moves(turn);
            if moves.is_empty() {
                if !board.has_legal_move(turn.opponent()) {
                    break;
                }
                turn = turn.opponent();
                continue;
            }
            let mv = moves[rng.random_range(0..moves.len())];
            board = board.apply_move(mv, turn);
            turn = turn.opponent();
        }
        (board, turn)
    }

    #[test]
    fn search_returns_none_without_legal_moves() {
        let evaluator = Evaluator::default();
        let board = parse(&["BW..", "....", "....", "...."]);

        assert_eq!(Searcher::new(&evaluator, 2).search(&board, Color::White), None);
    }

    #[test]
    fn search_returns_single_legal_move() {
        let evaluator = Evaluator::default();
        let board = parse(&["BW..", "....", "....", "...."]);

        let mv = Searcher::new(&evaluator, 3).search(&board, Color::Black);

        assert_eq!(mv, Some(Position::new(0, 2)));
    }

    #[test]
    fn search_tie_breaks_to_first_generated_move() {
        // The opening is symmetric, so every move scores the same at depth 0.
        let evaluator = Evaluator::default();
        let mut searcher = Searcher::new(&evaluator, 0);

        assert_eq!(
            searcher.search(&Board::new(), Color::Black),
            Some(Position::new(2, 3))
        );
    }

    #[test]
    fn search_prefers_immediate_wipeout() {
        let evaluator = Evaluator::default();
        let board = parse(&[
            "....", //
            "BWW.", //
            "..B.", //
            "....",
        ]);
        assert_eq!(
            board.legal_moves(Color::Black),
            vec![Position::new(0, 0), Position::new(0, 2), Position::new(1, 3)]
        );

        let mv = Searcher::new(&evaluator, 0).search(&board, Color::Black);

        assert_eq!(mv, Some(Position::new(1, 3)));
    }

    #[test]
    fn terminal_scores_dominate_heuristic_scores() {
        let evaluator = Evaluator::default();
        let mut rng = StdRng::seed_from_u64(7);

        for plies in [0, 10, 25, 40, 55] {
            let (board, turn) = random_position(8, plies, &mut rng);
            let score = evaluator.evaluate(&board, turn);
            assert!(score.abs() < WIN_SCORE, "heuristic {score} reached win range");
        }

        let wiped = parse(&["BB", "BB"]);
        assert_eq!(terminal_score(&wiped, Color::Black), WIN_SCORE);
        assert_eq!(terminal_score(&wiped, Color::White), -WIN_SCORE);
        assert_eq!(terminal_score(&parse(&["BW", "WB"]), Color::Black), 0);
    }

    #[test]
    fn alpha_beta_matches_exhaustive_minimax() {
        let evaluator = Evaluator::default();
        let mut rng = StdRng::seed_from_u64(2024);

        for case in 0..12 {
            let size = if case % 2 == 0 { 6 } else { 4 };
            let plies = 2 + case;
            let (board, turn) = random_position(size, plies, &mut rng);
            if !board.has_legal_move(turn) {
                continue;
            }

            for depth in 0..=2 {
                let pruned = Searcher::new(&evaluator, depth).search(&board, turn);
                let full = full_best_move(&evaluator, &board, turn, depth);
                assert_eq!(pruned, Some(full), "case {case} depth {depth}");
            }
        }
    }

    #[test]
    fn pruning_cuts_nodes_on_standard_board() {
        let evaluator = Evaluator::default();
        let board = Board::new()
            .apply_move(Position::new(2, 3), Color::Black)
            .apply_move(Position::new(2, 2), Color::White);
        let mut searcher = Searcher::new(&evaluator, 3);

        let mv = searcher.search(&board, Color::Black).unwrap();

        assert!(board.is_legal(mv, Color::Black));
        assert!(searcher.stats().nodes > 0);
        assert!(searcher.stats().cutoffs > 0);
    }

    #[test]
    fn stalled_side_passes_instead_of_losing() {
        // White has two chips to black's one but no move; black can still play.
        let evaluator = Evaluator::default();
        let board = parse(&[
            "BW..", //
            "W...", //
            "....", //
            "....",
        ]);
        assert_eq!(Ply::classify(&board, Color::White), Ply::MustPass);
        assert_eq!(terminal_score(&board, Color::Black), -WIN_SCORE);

        let mut searcher = Searcher::new(&evaluator, 1);
        let passed = searcher.minimax(&board, Color::Black, false, 1, MIN_SCORE, MAX_SCORE);

        // White passes and black's leaf is scored, not counted as a lost game.
        assert_eq!(passed, evaluator.evaluate(&board, Color::Black));
        assert!(passed > -WIN_SCORE);

        let deeper = searcher.minimax(&board, Color::Black, false, 2, MIN_SCORE, MAX_SCORE);
        assert!(deeper.abs() < WIN_SCORE);
    }

    #[test]
    fn double_pass_scores_the_finished_game() {
        let board = parse(&[
            "BBB.", //
            "....", //
            "....", //
            "....",
        ]);
        let evaluator = Evaluator::default();
        let mut searcher = Searcher::new(&evaluator, 3);

        assert_eq!(Ply::classify(&board, Color::White), Ply::GameOver);
        assert_eq!(
            searcher.minimax(&board, Color::Black, false, 3, MIN_SCORE, MAX_SCORE),
            WIN_SCORE
        );
    }
}
