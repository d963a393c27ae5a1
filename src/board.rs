use std::fmt;
use std::str::FromStr;

use crate::notation::{self, NotationError};
use crate::types::{BOARD_SIZE, NUM_SQUARES, Piece, Player, Position};

/// Rows each side fills at the start of a game.
const INITIAL_ROWS: usize = 3;

/// Diagonal steps in search order: NW, NE, SW, SE.
pub const DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Draughts board as 64 row-major cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Piece; NUM_SQUARES],
}

impl Board {
    /// Creates the standard opening layout:
    /// black pawns on the dark squares of rows 0-2, white pawns on rows 5-7.
    pub fn new() -> Self {
        let mut cells = [Piece::Blank; NUM_SQUARES];
        for (index, cell) in cells.iter_mut().enumerate() {
            let pos = Position::from_index(index);
            if !pos.is_dark() {
                continue;
            }
            let row = pos.row as usize;
            if row < INITIAL_ROWS {
                *cell = Piece::BlackPawn;
            } else if row >= BOARD_SIZE - INITIAL_ROWS {
                *cell = Piece::WhitePawn;
            }
        }
        Self { cells }
    }

    pub fn empty() -> Self {
        Self {
            cells: [Piece::Blank; NUM_SQUARES],
        }
    }

    /// Board holding exactly `cells`, row-major. No plausibility checks.
    pub fn from_cells(cells: [Piece; NUM_SQUARES]) -> Self {
        Self { cells }
    }

    /// Parses the 8x8 token grid used by fixtures (`--`, `Wp`, `Bp`, `Wq`, `Bq`).
    pub fn from_notation(text: &str) -> Result<Self, NotationError> {
        notation::decode(text).map(Self::from_cells)
    }

    /// Returns `None` only for off-board positions.
    pub fn get(&self, pos: Position) -> Option<Piece> {
        pos.index().map(|index| self.cells[index])
    }

    /// Overwrites one cell and returns what was there.
    /// Returns `None` and changes nothing for off-board positions.
    pub fn set(&mut self, pos: Position, piece: Piece) -> Option<Piece> {
        let index = pos.index()?;
        Some(std::mem::replace(&mut self.cells[index], piece))
    }

    /// True when `pos` is on the board and holds nothing.
    pub fn is_blank(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Piece::is_blank)
    }

    /// Number of pawns and queens of `player`.
    pub fn count_of(&self, player: Player) -> u8 {
        self.cells
            .iter()
            .filter(|piece| piece.belongs_to(player))
            .count() as u8
    }

    /// Returns `(white_count, black_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.count_of(Player::White), self.count_of(Player::Black))
    }

    pub fn cells(&self) -> &[Piece; NUM_SQUARES] {
        &self.cells
    }

    /// Iterates `(position, piece)` over every cell, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, piece)| (Position::from_index(index), *piece))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&notation::encode(&self.cells))
    }
}
