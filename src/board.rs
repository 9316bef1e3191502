use crate::error::EngineError;
use crate::types::{Cell, Color, GameResult, Position};

pub const STANDARD_SIZE: usize = 8;
/// Largest side length accepted from callers.
pub const MAX_BOARD_SIZE: usize = 64;
const MIN_INITIAL_SIZE: usize = 4;
pub(crate) const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Square Othello board of any side length.
///
/// Boards are values: moves produce a new board and leave `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates the standard 8x8 starting position:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        Self::with_center(STANDARD_SIZE)
    }

    /// Starting position for an even `size` of at least 4.
    pub fn initial(size: usize) -> Result<Self, EngineError> {
        check_size(size)?;
        if size < MIN_INITIAL_SIZE || size % 2 != 0 {
            return Err(EngineError::InvalidBoard(format!(
                "starting position needs an even size of at least {MIN_INITIAL_SIZE}, got {size}"
            )));
        }
        Ok(Self::with_center(size))
    }

    /// All-empty board.
    pub fn empty(size: usize) -> Result<Self, EngineError> {
        check_size(size)?;
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Builds a board from rows; every row must have as many cells as there
    /// are rows.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, EngineError> {
        let size = rows.len();
        check_size(size)?;

        let mut cells = Vec::with_capacity(size * size);
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(EngineError::InvalidBoard(format!(
                    "row {row_idx} has {} cells, expected {size}",
                    row.len()
                )));
            }
            cells.extend(row);
        }

        Ok(Self { size, cells })
    }

    /// Builds a board from the web page format: `0` black, `1` white,
    /// `None` empty.
    pub fn from_squares(squares: &[Vec<Option<u8>>]) -> Result<Self, EngineError> {
        let rows = squares
            .iter()
            .map(|row| {
                row.iter()
                    .map(|square| match square {
                        None => Ok(Cell::Empty),
                        Some(code) => Color::from_code(*code as i64)
                            .map(Color::to_cell)
                            .map_err(|_| {
                                EngineError::InvalidBoard(format!("unknown cell value {code}"))
                            }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_rows(rows)
    }

    /// Inverse of [`Board::from_squares`].
    pub fn to_squares(&self) -> Vec<Vec<Option<u8>>> {
        self.cells
            .chunks(self.size)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.color().map(Color::code))
                    .collect()
            })
            .collect()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Cell at `pos`. Positions off the board read as empty.
    pub fn get(&self, pos: Position) -> Cell {
        if self.contains(pos) {
            self.cells[self.index(pos)]
        } else {
            Cell::Empty
        }
    }

    /// Writes one cell, ignoring positions off the board.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if self.contains(pos) {
            let idx = self.index(pos);
            self.cells[idx] = cell;
        }
    }

    /// The four corner squares (they coincide on a 1x1 board).
    pub fn corners(&self) -> [Position; 4] {
        let last = self.size - 1;
        [
            Position::new(0, 0),
            Position::new(0, last),
            Position::new(last, 0),
            Position::new(last, last),
        ]
    }

    /// Number of chips of `color`.
    pub fn point_count(&self, color: Color) -> usize {
        let target = color.to_cell();
        self.cells.iter().filter(|&&cell| cell == target).count()
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (usize, usize) {
        (
            self.point_count(Color::Black),
            self.point_count(Color::White),
        )
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Legal moves for `player` in row-major order.
    pub fn legal_moves(&self, player: Color) -> Vec<Position> {
        self.candidate_squares(player)
            .into_iter()
            .filter(|&pos| self.is_capturing(pos, player))
            .collect()
    }

    pub fn has_legal_move(&self, player: Color) -> bool {
        self.candidate_squares(player)
            .into_iter()
            .any(|pos| self.is_capturing(pos, player))
    }

    /// Whether `pos` is a legal move for `player`.
    pub fn is_legal(&self, pos: Position, player: Color) -> bool {
        self.contains(pos) && self.get(pos).is_empty() && self.is_capturing(pos, player)
    }

    /// Opponent chips that a move at `pos` would capture.
    pub fn flips(&self, pos: Position, player: Color) -> Vec<Position> {
        let mut flips = Vec::new();
        if !self.contains(pos) {
            return flips;
        }

        for (dr, dc) in DIRECTIONS {
            let run = self.sandwiched_run(pos, dr, dc, player);
            flips.extend(run);
        }

        flips
    }

    /// Places a chip for `player` at `pos` and flips captured chips.
    ///
    /// Caller contract: `pos` comes from [`Board::legal_moves`]. Other moves
    /// are not rejected and produce a board that is not a legal successor;
    /// use [`Board::play`] for untrusted input.
    pub fn apply_move(&self, pos: Position, player: Color) -> Board {
        let mut next = self.clone();
        if !self.contains(pos) {
            log::warn!(
                "ignoring move ({}, {}) outside a {}x{} board",
                pos.row,
                pos.col,
                self.size,
                self.size
            );
            return next;
        }

        let mover = player.to_cell();
        for flipped in self.flips(pos, player) {
            next.set(flipped, mover);
        }
        next.set(pos, mover);
        next
    }

    /// Checked variant of [`Board::apply_move`].
    pub fn play(&self, pos: Position, player: Color) -> Result<Board, EngineError> {
        if !self.contains(pos) {
            return Err(EngineError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                size: self.size,
            });
        }
        if !self.is_legal(pos, player) {
            return Err(EngineError::IllegalMove {
                row: pos.row,
                col: pos.col,
            });
        }
        Ok(self.apply_move(pos, player))
    }

    /// Game result with `turn` to move.
    ///
    /// The game counts as over when `turn` has no legal move or the board is
    /// full. Passing is left to the caller: a stalled side with a mobile
    /// opponent also reads as finished here.
    pub fn winner(&self, turn: Color) -> GameResult {
        let (black, white) = self.count();

        if !self.has_legal_move(turn) || black + white == self.size * self.size {
            return GameResult::from_counts(black, white);
        }

        GameResult::InProgress
    }

    fn with_center(size: usize) -> Self {
        let mut cells = vec![Cell::Empty; size * size];
        let lo = size / 2 - 1;
        let hi = size / 2;
        cells[lo * size + lo] = Cell::White;
        cells[lo * size + hi] = Cell::Black;
        cells[hi * size + lo] = Cell::Black;
        cells[hi * size + hi] = Cell::White;
        Self { size, cells }
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    /// Empty squares touching at least one opponent chip, row-major.
    fn candidate_squares(&self, player: Color) -> Vec<Position> {
        let opponent = player.opponent().to_cell();
        let mut out = Vec::new();

        for row in 0..self.size {
            for col in 0..self.size {
                let pos = Position::new(row, col);
                if !self.get(pos).is_empty() {
                    continue;
                }
                let touches_opponent = DIRECTIONS.iter().any(|&(dr, dc)| {
                    pos.offset(dr, dc, self.size)
                        .is_some_and(|next| self.get(next) == opponent)
                });
                if touches_opponent {
                    out.push(pos);
                }
            }
        }

        out
    }

    fn is_capturing(&self, pos: Position, player: Color) -> bool {
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| !self.sandwiched_run(pos, dr, dc, player).is_empty())
    }

    /// Maximal run of opponent chips next to `pos` in one direction, kept
    /// only when a `player` chip closes it.
    fn sandwiched_run(&self, pos: Position, dr: i32, dc: i32, player: Color) -> Vec<Position> {
        let me = player.to_cell();
        let opp = player.opponent().to_cell();
        let mut line = Vec::new();
        let mut cursor = pos.offset(dr, dc, self.size);

        while let Some(square) = cursor {
            let cell = self.get(square);
            if cell == opp {
                line.push(square);
            } else if cell == me {
                return line;
            } else {
                break;
            }
            cursor = square.offset(dr, dc, self.size);
        }

        line.clear();
        line
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn check_size(size: usize) -> Result<(), EngineError> {
    if size == 0 {
        return Err(EngineError::InvalidBoard("board has no rows".to_string()));
    }
    if size > MAX_BOARD_SIZE {
        return Err(EngineError::InvalidBoard(format!(
            "board size {size} exceeds {MAX_BOARD_SIZE}"
        )));
    }
    Ok(())
}
