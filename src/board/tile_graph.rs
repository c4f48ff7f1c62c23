//! Tile arena and four-directional adjacency.
//!
//! The board is built once per game. Tiles are created in row-major order with
//! ids equal to their arena slot, then each tile is linked to its orthogonal
//! neighbors. Topology never changes afterwards; only occupancy and the
//! selection/highlight flags are mutated.

use std::collections::BTreeSet;

use crate::board::tile::Tile;
use crate::errors::{ConfigurationError, EngineResult, InvariantViolation};
use crate::game_state::chess_types::{Piece, PieceId, PieceKind, Team, TileId};
use crate::moves::steps::{Direction, Step, ALL_STEPS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Builds and links a `width` x `height` board. All-or-nothing.
    pub fn build(width: usize, height: usize) -> EngineResult<Self> {
        let count = width
            .checked_mul(height)
            .filter(|&count| count > 0)
            .ok_or(ConfigurationError::InvalidDimensions { width, height })?;

        let mut board = Board {
            width,
            height,
            tiles: Vec::with_capacity(count),
        };

        for row in 0..height {
            for col in 0..width {
                board.tiles.push(Tile::new(row * width + col, row, col));
            }
        }

        board.link();
        board.validate()?;
        Ok(board)
    }

    fn link(&mut self) {
        for id in 0..self.tiles.len() {
            let (row, col) = (self.tiles[id].row, self.tiles[id].col);
            for step in ALL_STEPS {
                let (dr, dc) = step.delta();
                let target = match (row.checked_add_signed(dr), col.checked_add_signed(dc)) {
                    (Some(r), Some(c)) => self.tile_at(r, c),
                    _ => None,
                };
                self.tiles[id].neighbors[step.index()] = target;
            }
        }
    }

    /// Checks arena identity and neighbor symmetry.
    pub fn validate(&self) -> EngineResult<()> {
        for (slot, tile) in self.tiles.iter().enumerate() {
            if tile.id != slot {
                return Err(InvariantViolation::TileIdMismatch { slot, id: tile.id }.into());
            }
            for step in ALL_STEPS {
                let Some(other) = tile.neighbor(step) else {
                    continue;
                };
                let back = self
                    .tiles
                    .get(other)
                    .and_then(|t| t.neighbor(step.opposite()));
                if back != Some(tile.id) {
                    return Err(InvariantViolation::AsymmetricNeighbor {
                        from: tile.id,
                        to: other,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    #[inline]
    pub(crate) fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    pub fn tile_at(&self, row: usize, col: usize) -> Option<TileId> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    pub fn coordinates(&self, id: TileId) -> Option<(usize, usize)> {
        self.tile(id).map(|t| (t.row, t.col))
    }

    #[inline]
    pub fn step(&self, id: TileId, step: Step) -> Option<TileId> {
        self.tile(id).and_then(|t| t.neighbor(step))
    }

    pub fn neighbor(&self, id: TileId, direction: Direction) -> Option<TileId> {
        direction
            .steps()
            .iter()
            .try_fold(id, |current, &step| self.step(current, step))
    }

    /// Direct neighbors plus the tiles one lateral step beyond the `Up` and
    /// `Down` neighbors. Used for highlight fan-out, not move legality.
    pub fn all_neighbors(&self, id: TileId) -> BTreeSet<TileId> {
        let mut out = BTreeSet::new();
        let Some(tile) = self.tile(id) else {
            return out;
        };
        for step in ALL_STEPS {
            let Some(next) = tile.neighbor(step) else {
                continue;
            };
            out.insert(next);
            if matches!(step, Step::Up | Step::Down) {
                out.extend(self.step(next, Step::Left));
                out.extend(self.step(next, Step::Right));
            }
        }
        out
    }

    #[inline]
    pub fn occupant(&self, id: TileId) -> Option<&Piece> {
        self.tile(id).and_then(|t| t.occupant.as_ref())
    }

    #[inline]
    pub(crate) fn occupant_mut(&mut self, id: TileId) -> Option<&mut Piece> {
        self.tile_mut(id).and_then(|t| t.occupant.as_mut())
    }

    pub fn pieces_of(&self, team: Team) -> impl Iterator<Item = (TileId, &Piece)> {
        self.tiles.iter().filter_map(move |tile| {
            tile.occupant
                .as_ref()
                .filter(|piece| piece.team == team)
                .map(|piece| (tile.id, piece))
        })
    }

    pub fn find_piece(&self, piece_id: PieceId) -> Option<TileId> {
        self.tiles
            .iter()
            .find(|t| t.occupant.is_some_and(|p| p.id == piece_id))
            .map(|t| t.id)
    }

    pub fn king_tile(&self, team: Team) -> Option<TileId> {
        self.pieces_of(team)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(id, _)| id)
    }

    /// Puts a piece on an empty tile.
    pub(crate) fn place(&mut self, id: TileId, piece: Piece) -> EngineResult<()> {
        let tile = self.tile_mut(id).ok_or(InvariantViolation::UnknownTile(id))?;
        if tile.occupant.is_some() {
            return Err(ConfigurationError::PlacementOccupied(id).into());
        }
        tile.occupant = Some(piece);
        Ok(())
    }

    /// Closes the en-passant window of every pawn not on `keep`. Returns the
    /// tiles whose flag was cleared.
    pub(crate) fn expire_en_passant(&mut self, keep: Team) -> Vec<TileId> {
        let mut expired = Vec::new();
        for tile in &mut self.tiles {
            if let Some(piece) = tile.occupant.as_mut() {
                if piece.en_passant_eligible && piece.team != keep {
                    piece.en_passant_eligible = false;
                    expired.push(tile.id);
                }
            }
        }
        expired
    }
}
