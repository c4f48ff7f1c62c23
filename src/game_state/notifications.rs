//! Outbound change notifications for a view layer.
//!
//! The engine never calls into view code. It queues plain values that the
//! caller drains after each input.

use crate::board::tile::Tile;
use crate::game_state::chess_types::{PieceKind, Team, TileId};

/// Observable state of one tile after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileChange {
    pub tile_id: TileId,
    pub occupant_kind: Option<PieceKind>,
    pub occupant_team: Option<Team>,
    pub selected: bool,
    pub highlighted: bool,
    pub checked: bool,
}

impl From<&Tile> for TileChange {
    fn from(tile: &Tile) -> Self {
        Self {
            tile_id: tile.id,
            occupant_kind: tile.occupant.map(|p| p.kind),
            occupant_team: tile.occupant.map(|p| p.team),
            selected: tile.selected,
            highlighted: tile.highlighted,
            checked: tile.occupant.is_some_and(|p| p.checked),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Continued,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeNotice {
    pub outcome: OutcomeKind,
    pub winning_team: Option<Team>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Tile(TileChange),
    Outcome(OutcomeNotice),
}
