//! Move resolution: decides whether `(from, to)` is legal for the side to
//! move and, if it is, which pieces it captures.
//!
//! Three shapes are recognized, tried in this order:
//! 1. a chain of short jumps (two squares over an adjacent opponent piece),
//!    open to pawns and queens, in any direction, stoppable after any jump;
//! 2. a queen's long-range capture (blank squares, one opponent piece, then
//!    the landing square right behind it), which never continues;
//! 3. a simple move: one step forward for a pawn, a clear slide for a queen.

use thiserror::Error;

use crate::board::{Board, DIRECTIONS};
use crate::types::{Piece, Player, Position};

/// Why a requested move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("position is out of the board")]
    OutOfBoard,
    #[error("light squares are never playable")]
    LightSquare,
    #[error("source and destination are the same square")]
    SameSquare,
    #[error("there is no piece on the source square")]
    EmptySource,
    #[error("it is not {0}'s turn")]
    NotYourTurn(Player),
    #[error("destination is occupied")]
    DestinationOccupied,
    #[error("illegal move")]
    IllegalMove,
}

/// A validated move, not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    /// Captured squares, earliest jump first.
    pub captured: Vec<Position>,
    pub promotes: bool,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    /// Piece standing on `to` once the move is applied.
    pub fn landing_piece(&self) -> Piece {
        if self.promotes {
            self.piece.promoted()
        } else {
            self.piece
        }
    }
}

/// Validates `from -> to` for `player` on `board` without touching it.
pub fn resolve(
    board: &Board,
    from: Position,
    to: Position,
    player: Player,
) -> Result<Move, MoveError> {
    let piece = check_preconditions(board, from, to, player)?;

    let captured = if let Some(chain) = ChainSearch::new(board, player, to).run(from) {
        chain
    } else if piece.is_queen()
        && let Some(over) = long_range_capture(board, player, from, to)
    {
        vec![over]
    } else if is_simple_move(board, piece, player, from, to) {
        Vec::new()
    } else {
        return Err(MoveError::IllegalMove);
    };

    Ok(Move {
        from,
        to,
        piece,
        captured,
        promotes: piece.is_pawn() && to.row == player.promotion_row(),
    })
}

/// Every square `from` could legally move to for `player`, row-major.
pub fn legal_destinations(board: &Board, from: Position, player: Player) -> Vec<Position> {
    board
        .iter()
        .map(|(to, _)| to)
        .filter(|to| resolve(board, from, *to, player).is_ok())
        .collect()
}

fn check_preconditions(
    board: &Board,
    from: Position,
    to: Position,
    player: Player,
) -> Result<Piece, MoveError> {
    let (Some(piece), Some(target)) = (board.get(from), board.get(to)) else {
        return Err(MoveError::OutOfBoard);
    };
    if !from.is_dark() || !to.is_dark() {
        return Err(MoveError::LightSquare);
    }
    if from == to {
        return Err(MoveError::SameSquare);
    }
    match piece.color() {
        None => return Err(MoveError::EmptySource),
        Some(owner) if owner != player => return Err(MoveError::NotYourTurn(owner)),
        Some(_) => {}
    }
    if !target.is_blank() {
        return Err(MoveError::DestinationOccupied);
    }
    Ok(piece)
}

fn is_simple_move(
    board: &Board,
    piece: Piece,
    player: Player,
    from: Position,
    to: Position,
) -> bool {
    if piece.is_queen() {
        return DIRECTIONS.iter().any(|&(dr, dc)| {
            let mut cursor = from.offset(dr, dc);
            while let Some(pos) = cursor {
                if !board.is_blank(pos) {
                    return false;
                }
                if pos == to {
                    return true;
                }
                cursor = pos.offset(dr, dc);
            }
            false
        });
    }

    let dr = player.forward();
    [-1, 1]
        .into_iter()
        .any(|dc| from.offset(dr, dc) == Some(to))
}

/// Long-range queen capture landing on `to`. Returns the captured square.
fn long_range_capture(
    board: &Board,
    player: Player,
    from: Position,
    to: Position,
) -> Option<Position> {
    let opponent = player.opponent();

    for (dr, dc) in DIRECTIONS {
        let mut cursor = from.offset(dr, dc);
        let mut travelled = 0;
        while let Some(pos) = cursor
            && board.is_blank(pos)
        {
            travelled += 1;
            cursor = pos.offset(dr, dc);
        }

        // An adjacent piece is a short jump and belongs to the chain search.
        let Some(over) = cursor else { continue };
        if travelled == 0 || !board.get(over).is_some_and(|p| p.belongs_to(opponent)) {
            continue;
        }
        if over.offset(dr, dc) == Some(to) && board.is_blank(to) {
            return Some(over);
        }
    }

    None
}

/// Depth-first walk over short jumps from the moving piece's square.
///
/// Captured pieces stay on the board until the move is committed, so they
/// keep blocking landings; `captured` stops them from being jumped twice
/// and `visited` stops the chain from landing on a square twice. The moving
/// piece still occupies its source square for the whole walk.
struct ChainSearch<'a> {
    board: &'a Board,
    opponent: Player,
    target: Position,
    visited: Vec<Position>,
    captured: Vec<Position>,
}

impl<'a> ChainSearch<'a> {
    fn new(board: &'a Board, player: Player, target: Position) -> Self {
        Self {
            board,
            opponent: player.opponent(),
            target,
            visited: Vec::new(),
            captured: Vec::new(),
        }
    }

    /// Captures of the first chain, in direction order NW, NE, SW, SE, that
    /// lands on the target.
    fn run(mut self, from: Position) -> Option<Vec<Position>> {
        self.visited.push(from);
        if self.descend(from) {
            Some(self.captured)
        } else {
            None
        }
    }

    fn descend(&mut self, at: Position) -> bool {
        for (dr, dc) in DIRECTIONS {
            let Some(over) = at.offset(dr, dc) else { continue };
            let Some(landing) = over.offset(dr, dc) else { continue };
            if !self.can_jump(over, landing) {
                continue;
            }

            self.captured.push(over);
            self.visited.push(landing);
            if landing == self.target || self.descend(landing) {
                return true;
            }
            self.captured.pop();
            self.visited.pop();
        }

        false
    }

    fn can_jump(&self, over: Position, landing: Position) -> bool {
        self.board.get(over).is_some_and(|p| p.belongs_to(self.opponent))
            && self.board.is_blank(landing)
            && !self.captured.contains(&over)
            && !self.visited.contains(&landing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    fn board(text: &str) -> Board {
        text.parse().expect("fixture must decode")
    }

    const LONE_WHITE: &str = "
        -- -- -- -- -- -- -- --
        -- -- -- -- -- -- -- --
        -- -- -- -- -- -- -- --
        -- -- -- -- -- -- -- --
        -- -- -- Wp -- -- -- --
        -- -- -- -- -- -- -- --
        -- -- -- -- -- -- -- --
        -- -- -- -- -- -- -- --
    ";

    #[test]
    fn pawn_steps_forward_only() {
        let b = board(LONE_WHITE);

        assert!(resolve(&b, pos(4, 3), pos(3, 2), Player::White).is_ok());
        assert!(resolve(&b, pos(4, 3), pos(3, 4), Player::White).is_ok());
        assert_eq!(
            resolve(&b, pos(4, 3), pos(5, 2), Player::White),
            Err(MoveError::IllegalMove)
        );
        assert_eq!(
            resolve(&b, pos(4, 3), pos(2, 1), Player::White),
            Err(MoveError::IllegalMove)
        );
    }

    #[test]
    fn preconditions_have_distinct_errors() {
        let b = Board::new();

        assert_eq!(
            resolve(&b, pos(8, 1), pos(4, 3), Player::White),
            Err(MoveError::OutOfBoard)
        );
        assert_eq!(
            resolve(&b, pos(5, 2), pos(4, 2), Player::White),
            Err(MoveError::LightSquare)
        );
        assert_eq!(
            resolve(&b, pos(5, 2), pos(5, 2), Player::White),
            Err(MoveError::SameSquare)
        );
        assert_eq!(
            resolve(&b, pos(4, 3), pos(3, 2), Player::White),
            Err(MoveError::EmptySource)
        );
        assert_eq!(
            resolve(&b, pos(2, 1), pos(3, 2), Player::White),
            Err(MoveError::NotYourTurn(Player::Black))
        );
        assert_eq!(
            resolve(&b, pos(6, 1), pos(5, 2), Player::White),
            Err(MoveError::DestinationOccupied)
        );
    }

    #[test]
    fn pawn_captures_backwards() {
        let b = board(
            "
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- Wp -- -- -- --
            -- -- -- -- Bp -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            ",
        );

        let mv = resolve(&b, pos(4, 3), pos(6, 5), Player::White).expect("backward capture");

        assert_eq!(mv.captured, vec![pos(5, 4)]);
        assert!(!mv.promotes);
    }

    #[test]
    fn chain_may_stop_after_any_jump() {
        let b = board(
            "
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- Bp -- -- --
            -- -- -- -- -- -- -- --
            -- -- Bp -- -- -- -- --
            -- Wp -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            ",
        );

        let first = resolve(&b, pos(6, 1), pos(4, 3), Player::White).expect("single jump");
        let both = resolve(&b, pos(6, 1), pos(2, 5), Player::White).expect("double jump");

        assert_eq!(first.captured, vec![pos(5, 2)]);
        assert_eq!(both.captured, vec![pos(5, 2), pos(3, 4)]);
    }

    #[test]
    fn chain_does_not_jump_the_same_piece_twice() {
        // Jumping (3,2) again from (2,1) would lead back to the source square.
        let b = board(
            "
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- Bp -- -- -- -- --
            -- -- -- Wp -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            ",
        );

        assert_eq!(
            legal_destinations(&b, pos(4, 3), Player::White),
            vec![pos(2, 1), pos(3, 4)]
        );
    }

    #[test]
    fn chain_through_promotion_row_promotes_only_at_the_end() {
        let b = board(
            "
            -- -- -- -- -- -- -- --
            -- -- Bp -- Bp -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- Bq -- -- --
            -- -- -- Wp -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            ",
        );

        let stop = resolve(&b, pos(4, 3), pos(0, 3), Player::White).expect("stop on row 0");
        let through = resolve(&b, pos(4, 3), pos(2, 1), Player::White).expect("continue");

        assert!(stop.promotes);
        assert_eq!(stop.landing_piece(), Piece::WhiteQueen);
        assert!(!through.promotes);
        assert_eq!(through.captured, vec![pos(3, 4), pos(1, 4), pos(1, 2)]);
    }

    #[test]
    fn queen_slides_along_clear_diagonals() {
        let b = board(
            "
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- Wq -- -- -- --
            -- -- -- -- Wp -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            ",
        );

        assert!(resolve(&b, pos(4, 3), pos(0, 7), Player::White).is_ok());
        assert!(resolve(&b, pos(4, 3), pos(7, 0), Player::White).is_ok());
        assert!(resolve(&b, pos(4, 3), pos(1, 0), Player::White).is_ok());
        assert_eq!(
            resolve(&b, pos(4, 3), pos(6, 5), Player::White),
            Err(MoveError::IllegalMove)
        );
    }

    #[test]
    fn queen_long_capture_lands_right_behind_and_stops() {
        let b = board(
            "
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- Wq -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- Bp -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            ",
        );

        let mv = resolve(&b, pos(2, 5), pos(6, 1), Player::White).expect("long capture");

        assert_eq!(mv.captured, vec![pos(5, 2)]);
        assert!(!mv.promotes);
        assert_eq!(
            resolve(&b, pos(2, 5), pos(7, 0), Player::White),
            Err(MoveError::IllegalMove)
        );
    }

    #[test]
    fn queen_needs_a_single_piece_on_the_ray() {
        let b = board(
            "
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- Bq -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- Wp -- -- -- --
            -- -- -- -- Wp -- -- --
            -- -- -- -- -- -- -- --
            -- -- -- -- -- -- -- --
            ",
        );

        assert_eq!(
            resolve(&b, pos(2, 1), pos(6, 5), Player::Black),
            Err(MoveError::IllegalMove)
        );
        assert!(resolve(&b, pos(2, 1), pos(3, 2), Player::Black).is_ok());
    }

    #[test]
    fn simple_move_never_captures() {
        let b = Board::new();

        let mv = resolve(&b, pos(5, 2), pos(4, 3), Player::White).expect("opening move");

        assert!(!mv.is_capture());
        assert!(!mv.promotes);
    }
}
