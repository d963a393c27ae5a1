use log::{debug, info};

use crate::board::Board;
use crate::rules::{self, Move, MoveError};
use crate::types::{GameSnapshot, MoveResult, NUM_SQUARES, Piece, Player, Position};

/// One game: the board plus the side to move.
///
/// `process` is the only mutating move entry point and is all-or-nothing:
/// a rejected move leaves the board and the turn untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_player: Player,
}

impl Game {
    /// Standard opening layout, white to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::White,
        }
    }

    /// Seeds an arbitrary position. The cells are taken as given; nothing
    /// checks that they could arise from legal play.
    pub fn with_state(cells: [Piece; NUM_SQUARES], current_player: Player) -> Self {
        Self::from_board(Board::from_cells(cells), current_player)
    }

    pub fn from_board(board: Board, current_player: Player) -> Self {
        Self {
            board,
            current_player,
        }
    }

    /// Replaces the whole state with `cells` and `current_player`.
    pub fn init_with(&mut self, cells: [Piece; NUM_SQUARES], current_player: Player) {
        *self = Self::with_state(cells, current_player);
        info!(
            "game initialized from preset: {} white, {} black, {} to move",
            self.white_pawns_amount(),
            self.black_pawns_amount(),
            current_player
        );
    }

    /// Back to the opening layout with white to move.
    pub fn reset(&mut self) {
        *self = Self::new();
        info!("game reset");
    }

    /// Validates and plays `from -> to` for the side to move.
    pub fn process(&mut self, from: Position, to: Position) -> MoveResult {
        self.try_process(from, to)
            .unwrap_or_else(|err| MoveResult::rejected(err.to_string()))
    }

    /// Like [`Game::process`], with the rejection reason as a typed error.
    pub fn try_process(&mut self, from: Position, to: Position) -> Result<MoveResult, MoveError> {
        let mv = rules::resolve(&self.board, from, to, self.current_player).inspect_err(|err| {
            debug!("rejected {} move {from} -> {to}: {err}", self.current_player);
        })?;
        Ok(self.apply_move(mv))
    }

    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.board.get(pos)
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// White pawns and queens on the board.
    pub fn white_pawns_amount(&self) -> u8 {
        self.board.count_of(Player::White)
    }

    /// Black pawns and queens on the board.
    pub fn black_pawns_amount(&self) -> u8 {
        self.board.count_of(Player::Black)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Squares the piece on `from` may currently move to.
    pub fn legal_destinations(&self, from: Position) -> Vec<Position> {
        rules::legal_destinations(&self.board, from, self.current_player)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let (white_count, black_count) = self.board.count();
        GameSnapshot {
            board: self.board.cells().to_vec(),
            current_player: self.current_player,
            white_count,
            black_count,
        }
    }

    fn apply_move(&mut self, mv: Move) -> MoveResult {
        let mover = self.current_player;
        let opponent = mover.opponent();

        self.board.set(mv.from, Piece::Blank);
        self.board.set(mv.to, mv.landing_piece());
        for &square in &mv.captured {
            self.board.set(square, Piece::Blank);
        }
        self.current_player = opponent;

        debug!(
            "{mover} moved {} -> {}, captured {:?}",
            mv.from, mv.to, mv.captured
        );
        if mv.promotes {
            info!("{mover} pawn promoted on {}", mv.to);
        }

        let winner = (mv.is_capture() && self.board.count_of(opponent) == 0).then_some(mover);
        if let Some(winner) = winner {
            info!("{winner} wins: no {opponent} pieces left");
        }

        MoveResult {
            is_correct: true,
            is_queen: mv.promotes,
            taken_pawns: mv.captured,
            winner,
            message: String::new(),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
