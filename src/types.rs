use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Position of a row-major flat index. Callers keep `index < 64`.
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }

    /// Row-major flat index, or `None` when the position is off the board.
    pub fn index(self) -> Option<usize> {
        if self.is_on_board() {
            Some(self.row as usize * BOARD_SIZE + self.col as usize)
        } else {
            None
        }
    }

    pub fn is_on_board(self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// Dark squares are the only playable ones.
    pub fn is_dark(self) -> bool {
        (self.row as u16 + self.col as u16) % 2 == 1
    }

    /// Steps `(dr, dc)` away, staying on the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        let size = BOARD_SIZE as i16;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A side. "No winner yet" is expressed as `Option<Player>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Row delta of a pawn's simple move.
    pub fn forward(self) -> i8 {
        match self {
            Player::White => -1,
            Player::Black => 1,
        }
    }

    /// Row on which this side's pawns become queens.
    pub fn promotion_row(self) -> u8 {
        match self {
            Player::White => 0,
            Player::Black => (BOARD_SIZE - 1) as u8,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "white"),
            Player::Black => write!(f, "black"),
        }
    }
}

/// Contents of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Piece {
    #[default]
    Blank,
    WhitePawn,
    BlackPawn,
    WhiteQueen,
    BlackQueen,
}

impl Piece {
    pub fn pawn(player: Player) -> Self {
        match player {
            Player::White => Piece::WhitePawn,
            Player::Black => Piece::BlackPawn,
        }
    }

    pub fn queen(player: Player) -> Self {
        match player {
            Player::White => Piece::WhiteQueen,
            Player::Black => Piece::BlackQueen,
        }
    }

    pub fn color(self) -> Option<Player> {
        match self {
            Piece::Blank => None,
            Piece::WhitePawn | Piece::WhiteQueen => Some(Player::White),
            Piece::BlackPawn | Piece::BlackQueen => Some(Player::Black),
        }
    }

    pub fn is_blank(self) -> bool {
        self == Piece::Blank
    }

    pub fn is_queen(self) -> bool {
        matches!(self, Piece::WhiteQueen | Piece::BlackQueen)
    }

    pub fn is_pawn(self) -> bool {
        matches!(self, Piece::WhitePawn | Piece::BlackPawn)
    }

    pub fn belongs_to(self, player: Player) -> bool {
        self.color() == Some(player)
    }

    /// Queen of the same color. Queens and blanks are returned unchanged.
    pub fn promoted(self) -> Self {
        match self {
            Piece::WhitePawn => Piece::WhiteQueen,
            Piece::BlackPawn => Piece::BlackQueen,
            other => other,
        }
    }
}

/// Outcome of one `process` call, shaped for the presentation layer.
///
/// Contract:
/// - `is_correct == false` means nothing on the board changed and `message`
///   says why.
/// - `taken_pawns` lists captured squares in the order they were jumped.
/// - `winner` is `None` while the game goes on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResult {
    pub is_correct: bool,
    pub is_queen: bool,
    pub taken_pawns: Vec<Position>,
    pub winner: Option<Player>,
    pub message: String,
}

impl MoveResult {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            is_correct: false,
            is_queen: false,
            taken_pawns: Vec::new(),
            winner: None,
            message: message.into(),
        }
    }
}

/// Whole-board view for shells that redraw everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: Vec<Piece>,
    pub current_player: Player,
    pub white_count: u8,
    pub black_count: u8,
}
