//! Engine abstraction for automated players.
//!
//! An engine looks at a `GameState` and proposes one move for the current
//! player; the caller submits it through `GameState::apply_move`.

use crate::errors::{ConfigurationError, EngineResult};
use crate::game_state::chess_types::{PieceKind, TileId};
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<(TileId, TileId)>,
    /// Piece to choose if the move ends on the far rank.
    pub promotion: Option<PieceKind>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, _value: &str) -> Result<(), ConfigurationError> {
        Err(ConfigurationError::UnknownOption(name.to_owned()))
    }

    fn choose_move(&mut self, game_state: &GameState) -> EngineResult<EngineOutput>;
}
