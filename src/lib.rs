use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

pub mod board;
pub mod game;
pub mod notation;
pub mod rules;
pub mod selection;
pub mod types;

pub use board::Board;
pub use game::Game;
pub use notation::NotationError;
pub use rules::{Move, MoveError};
pub use selection::Selection;
pub use types::{GameSnapshot, MoveResult, Piece, Player, Position};

/// The single game behind the exported call surface. Every exported call
/// takes the lock for its whole duration.
#[derive(Debug, Default)]
struct Session {
    game: Game,
    selection: Selection,
}

static SESSION: Lazy<Mutex<Session>> = Lazy::new(|| Mutex::new(Session::default()));

fn session() -> MutexGuard<'static, Session> {
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

/// `None` goes out as `null`, which the shell reads as "game is ongoing".
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(Into::into)
}

fn position(row: u8, col: u8) -> Result<Position, JsValue> {
    let pos = Position::new(row, col);
    if pos.is_on_board() {
        Ok(pos)
    } else {
        Err(JsValue::from_str(&MoveError::OutOfBoard.to_string()))
    }
}

#[wasm_bindgen(js_name = wasmReady)]
pub fn wasm_ready() -> bool {
    true
}

/// Starts a fresh game: opening layout, white to move.
#[wasm_bindgen(js_name = initGame)]
pub fn init_game() {
    let mut session = session();
    session.game.reset();
    session.selection.unselect();
}

/// Seeds 64 row-major cells (`"Blank"`, `"WhitePawn"`, ...) and the side to
/// move (`"White"` or `"Black"`).
#[wasm_bindgen(js_name = initGameWith)]
pub fn init_game_with(state: JsValue, current_player: JsValue) -> Result<(), JsValue> {
    let pieces: Vec<Piece> = serde_wasm_bindgen::from_value(state)?;
    let cells: [Piece; types::NUM_SQUARES] = pieces.try_into().map_err(|pieces: Vec<Piece>| {
        JsValue::from_str(&format!("expected 64 cells, got {}", pieces.len()))
    })?;
    let player: Player = serde_wasm_bindgen::from_value(current_player)?;

    let mut session = session();
    session.game.init_with(cells, player);
    session.selection.unselect();
    Ok(())
}

/// Seeds the board from the 8x8 token notation.
#[wasm_bindgen(js_name = initGameFromNotation)]
pub fn init_game_from_notation(text: &str, current_player: JsValue) -> Result<(), JsValue> {
    let board = Board::from_notation(text).map_err(|err| JsValue::from_str(&err.to_string()))?;
    let player: Player = serde_wasm_bindgen::from_value(current_player)?;

    let mut session = session();
    session.game.init_with(*board.cells(), player);
    session.selection.unselect();
    Ok(())
}

#[wasm_bindgen]
pub fn process(from_row: u8, from_col: u8, to_row: u8, to_col: u8) -> Result<JsValue, JsValue> {
    let result = session().game.process(
        Position::new(from_row, from_col),
        Position::new(to_row, to_col),
    );
    to_js(&result)
}

#[wasm_bindgen]
pub fn get(row: u8, col: u8) -> Result<JsValue, JsValue> {
    let pos = position(row, col)?;
    let piece = session().game.get(pos).unwrap_or_default();
    to_js(&piece)
}

#[wasm_bindgen]
pub fn reset() {
    init_game();
}

#[wasm_bindgen(js_name = getCurrentPlayer)]
pub fn get_current_player() -> Result<JsValue, JsValue> {
    let player = session().game.current_player();
    to_js(&player)
}

/// White pawns and queens.
#[wasm_bindgen(js_name = getWhitePawnsAmount)]
pub fn get_white_pawns_amount() -> u8 {
    session().game.white_pawns_amount()
}

/// Black pawns and queens.
#[wasm_bindgen(js_name = getBlackPawnsAmount)]
pub fn get_black_pawns_amount() -> u8 {
    session().game.black_pawns_amount()
}

#[wasm_bindgen]
pub fn snapshot() -> Result<JsValue, JsValue> {
    let snapshot = session().game.snapshot();
    to_js(&snapshot)
}

#[wasm_bindgen(js_name = boardNotation)]
pub fn board_notation() -> String {
    session().game.board().to_string()
}

#[wasm_bindgen(js_name = legalDestinations)]
pub fn legal_destinations(row: u8, col: u8) -> Result<JsValue, JsValue> {
    let from = position(row, col)?;
    let destinations = session().game.legal_destinations(from);
    to_js(&destinations)
}

/// Click on a square. Returns `null` when the click only picked a source,
/// otherwise the result of the submitted move.
#[wasm_bindgen]
pub fn select(row: u8, col: u8) -> Result<JsValue, JsValue> {
    let pos = position(row, col)?;
    let mut session = session();
    let Session { game, selection } = &mut *session;
    let result = selection.select(game, pos);
    to_js(&result)
}

#[wasm_bindgen]
pub fn unselect() {
    session().selection.unselect();
}

#[wasm_bindgen(js_name = isSelected)]
pub fn is_selected(row: u8, col: u8) -> bool {
    session().selection.is_selected(Position::new(row, col))
}
