use crate::game_state::chess_types::{Piece, TileId};
use crate::moves::steps::Step;

/// One board cell. Neighbor links are arena indices, indexed by `Step::index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub row: usize,
    pub col: usize,
    pub occupant: Option<Piece>,
    pub selected: bool,
    pub highlighted: bool,
    pub(crate) neighbors: [Option<TileId>; 4],
}

impl Tile {
    pub(crate) fn new(id: TileId, row: usize, col: usize) -> Self {
        Self {
            id,
            row,
            col,
            occupant: None,
            selected: false,
            highlighted: false,
            neighbors: [None; 4],
        }
    }

    #[inline]
    pub fn neighbor(&self, step: Step) -> Option<TileId> {
        self.neighbors[step.index()]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}
