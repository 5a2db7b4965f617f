use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_SIZE: u8 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    P1,
    P2,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
        }
    }

    /// Row direction a man of this player moves in.
    pub fn forward(self) -> i8 {
        match self {
            Player::P1 => 1,
            Player::P2 => -1,
        }
    }

    /// Row on which a man of this player is crowned.
    pub fn promotion_row(self) -> u8 {
        match self {
            Player::P1 => BOARD_SIZE - 1,
            Player::P2 => 0,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::P1 => write!(f, "p1"),
            Player::P2 => write!(f, "p2"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Man,
    King,
}

/// Stable identity of a piece for the lifetime of one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub owner: Player,
    pub rank: Rank,
}

impl Piece {
    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    /// Crowns the piece. Returns false if it already was a king.
    pub fn promote(&mut self) -> bool {
        if self.is_king() {
            return false;
        }
        self.rank = Rank::King;
        true
    }

    /// Row directions this piece may move in.
    pub fn directions(&self) -> &'static [i8] {
        match (self.rank, self.owner) {
            (Rank::King, _) => &[1, -1],
            (Rank::Man, Player::P1) => &[1],
            (Rank::Man, Player::P2) => &[-1],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Returns `None` when the coordinates fall outside the board.
    pub fn new(row: i8, col: i8) -> Option<Square> {
        let size = BOARD_SIZE as i8;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Playable squares are the dark ones, where `row + col` is odd.
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        Square::new(self.row as i8 + dr, self.col as i8 + dc)
    }

    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    pub fn from_index(idx: usize) -> Square {
        Square {
            row: (idx / BOARD_SIZE as usize) as u8,
            col: (idx % BOARD_SIZE as usize) as u8,
        }
    }

    /// Square halfway between two squares two diagonal steps apart.
    pub fn midpoint(self, other: Square) -> Option<Square> {
        let dr = other.row as i8 - self.row as i8;
        let dc = other.col as i8 - self.col as i8;
        if dr.abs() != 2 || dc.abs() != 2 {
            return None;
        }
        self.offset(dr / 2, dc / 2)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
    /// Square of the jumped enemy piece, present iff the move is a capture.
    pub captured: Option<Square>,
}

impl Move {
    pub fn simple(piece: PieceId, from: Square, to: Square) -> Self {
        Self {
            piece,
            from,
            to,
            captured: None,
        }
    }

    pub fn capture(piece: PieceId, from: Square, to: Square, captured: Square) -> Self {
        Self {
            piece,
            from,
            to,
            captured: Some(captured),
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    P1Wins,
    P2Wins,
    Draw,
}

impl GameResult {
    pub fn win_for(player: Player) -> GameResult {
        match player {
            Player::P1 => GameResult::P1Wins,
            Player::P2 => GameResult::P2Wins,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::P1Wins => Some(Player::P1),
            GameResult::P2Wins => Some(Player::P2),
            GameResult::Draw => None,
        }
    }
}

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The side to move has no pieces left.
    Eliminated,
    /// The side to move has pieces but none of them can move.
    Blocked,
}
