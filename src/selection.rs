use crate::game::Game;
use crate::types::{MoveResult, Position};

/// Two-click move entry: the first click picks a source, the second submits
/// the move. The pending source is dropped after every submitted move,
/// legal or not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    source: Option<Position>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `pos` as the source, or plays `source -> pos` if one is pending.
    pub fn select(&mut self, game: &mut Game, pos: Position) -> Option<MoveResult> {
        match self.source.take() {
            Some(from) => Some(game.process(from, pos)),
            None => {
                self.source = Some(pos);
                None
            }
        }
    }

    pub fn unselect(&mut self) {
        self.source = None;
    }

    /// True while the next click picks a source square.
    pub fn requires_source(&self) -> bool {
        self.source.is_none()
    }

    pub fn is_selected(&self, pos: Position) -> bool {
        self.source == Some(pos)
    }

    pub fn source(&self) -> Option<Position> {
        self.source
    }
}
