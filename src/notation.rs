//! Text form of a board, one row per line:
//!
//! ```text
//! -- Bp -- Bp -- Bp -- Bp
//! Bp -- Bp -- Bp -- Bp --
//! ...
//! ```
//!
//! Tokens are `--` (blank), `Wp`, `Bp`, `Wq` and `Bq`, separated by exactly
//! one space. Anything else, or a grid that is not exactly 8x8, is a decoding
//! error. Leading and trailing whitespace and blank lines are ignored.

use thiserror::Error;

use crate::types::{BOARD_SIZE, NUM_SQUARES, Piece};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("can't decode board token {token:?} at row {row}")]
    UnknownToken { token: String, row: usize },

    #[error("expected 8 rows, got {0}")]
    RowCount(usize),

    #[error("expected 8 tokens in row {row}, got {count}")]
    ColumnCount { row: usize, count: usize },
}

/// Decodes a token grid into row-major cells.
pub fn decode(text: &str) -> Result<[Piece; NUM_SQUARES], NotationError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if rows.len() != BOARD_SIZE {
        return Err(NotationError::RowCount(rows.len()));
    }

    let mut cells = [Piece::Blank; NUM_SQUARES];
    for (row, line) in rows.iter().enumerate() {
        let tokens: Vec<&str> = line.split(' ').collect();
        if tokens.len() != BOARD_SIZE {
            return Err(NotationError::ColumnCount {
                row,
                count: tokens.len(),
            });
        }
        for (col, token) in tokens.into_iter().enumerate() {
            cells[row * BOARD_SIZE + col] =
                decode_token(token).ok_or_else(|| NotationError::UnknownToken {
                    token: token.to_string(),
                    row,
                })?;
        }
    }

    Ok(cells)
}

/// Encodes row-major cells as a token grid with a trailing newline per row.
pub fn encode(cells: &[Piece; NUM_SQUARES]) -> String {
    let mut out = String::with_capacity(NUM_SQUARES * 3);
    for row in cells.chunks(BOARD_SIZE) {
        let line: Vec<&str> = row.iter().map(|piece| token(*piece)).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

pub fn decode_token(token: &str) -> Option<Piece> {
    match token {
        "--" => Some(Piece::Blank),
        "Wp" => Some(Piece::WhitePawn),
        "Bp" => Some(Piece::BlackPawn),
        "Wq" => Some(Piece::WhiteQueen),
        "Bq" => Some(Piece::BlackQueen),
        _ => None,
    }
}

pub fn token(piece: Piece) -> &'static str {
    match piece {
        Piece::Blank => "--",
        Piece::WhitePawn => "Wp",
        Piece::BlackPawn => "Bp",
        Piece::WhiteQueen => "Wq",
        Piece::BlackQueen => "Bq",
    }
}
