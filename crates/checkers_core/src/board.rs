use crate::types::*;
use std::fmt;
use thiserror::Error;

const CELLS: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected 8 rows in board diagram, found {0}")]
    RowCount(usize),
    #[error("row {row} of board diagram has {len} squares, expected 8")]
    RowLength { row: usize, len: usize },
    #[error("unknown symbol {symbol:?} at {square}")]
    UnknownSymbol { symbol: char, square: Square },
    #[error("piece on light square {0}")]
    LightSquare(Square),
}

/// The 8x8 grid and its occupancy. Topology is fixed; only occupancy changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; CELLS],
    next_id: u8,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [None; CELLS],
            next_id: 0,
        }
    }

    /// Twelve men per side on the dark squares: p1 on rows 0-2, p2 on rows 5-7.
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        for idx in 0..CELLS {
            let sq = Square::from_index(idx);
            if !sq.is_dark() {
                continue;
            }
            match sq.row {
                0..=2 => {
                    board.spawn(Player::P1, Rank::Man, sq);
                }
                5..=7 => {
                    board.spawn(Player::P2, Rank::Man, sq);
                }
                _ => {}
            }
        }
        board
    }

    /// Parses an eight-line diagram, first line is row 0.
    ///
    /// `.` is an empty square, `x`/`X` a p1 man/king, `o`/`O` a p2 man/king.
    /// Whitespace inside a line is ignored.
    pub fn from_diagram(diagram: &str) -> Result<Self, BoardError> {
        let rows: Vec<&str> = diagram
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(BoardError::RowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE as usize {
                return Err(BoardError::RowLength {
                    row,
                    len: symbols.len(),
                });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                let sq = Square {
                    row: row as u8,
                    col: col as u8,
                };
                let (owner, rank) = match symbol {
                    '.' => continue,
                    'x' => (Player::P1, Rank::Man),
                    'X' => (Player::P1, Rank::King),
                    'o' => (Player::P2, Rank::Man),
                    'O' => (Player::P2, Rank::King),
                    _ => return Err(BoardError::UnknownSymbol { symbol, square: sq }),
                };
                if !sq.is_dark() {
                    return Err(BoardError::LightSquare(sq));
                }
                board.spawn(owner, rank, sq);
            }
        }
        Ok(board)
    }

    /// Bounds-checked lookup; out of range is a normal `None`.
    pub fn square_at(&self, row: i8, col: i8) -> Option<Square> {
        Square::new(row, col)
    }

    pub fn neighbor(&self, sq: Square, dr: i8, dc: i8) -> Option<Square> {
        sq.offset(dr, dc)
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.cells[sq.index()].is_none()
    }

    /// Creates a new piece with a fresh id. Only used while setting up a position.
    pub fn spawn(&mut self, owner: Player, rank: Rank, sq: Square) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.place(Piece { id, owner, rank }, sq);
        id
    }

    /// Puts a piece on an empty dark square.
    ///
    /// # Panics
    /// If the square is light or already occupied.
    pub fn place(&mut self, piece: Piece, sq: Square) {
        assert!(sq.is_dark(), "cannot place a piece on light square {sq}");
        let cell = &mut self.cells[sq.index()];
        if let Some(existing) = cell {
            panic!(
                "square {sq} already holds piece {:?}, cannot place {:?}",
                existing.id, piece.id
            );
        }
        *cell = Some(piece);
    }

    /// Takes the piece off a square.
    ///
    /// # Panics
    /// If the square is empty.
    pub fn remove(&mut self, sq: Square) -> Piece {
        match self.cells[sq.index()].take() {
            Some(piece) => piece,
            None => panic!("no piece to remove on {sq}"),
        }
    }

    /// Snapshot of a side's pieces with their squares, in no particular order.
    pub fn pieces_of(&self, player: Player) -> Vec<(Square, Piece)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| match cell {
                Some(pc) if pc.owner == player => Some((Square::from_index(idx), *pc)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Some(pc) if pc.owner == player))
            .count()
    }

    pub fn locate(&self, id: PieceId) -> Option<Square> {
        self.cells
            .iter()
            .position(|cell| matches!(cell, Some(pc) if pc.id == id))
            .map(Square::from_index)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let sq = Square { row, col };
                let symbol = match self.piece_at(sq) {
                    None => '.',
                    Some(pc) => match (pc.owner, pc.rank) {
                        (Player::P1, Rank::Man) => 'x',
                        (Player::P1, Rank::King) => 'X',
                        (Player::P2, Rank::Man) => 'o',
                        (Player::P2, Rank::King) => 'O',
                    },
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
