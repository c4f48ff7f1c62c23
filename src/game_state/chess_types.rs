//! Core value types shared by the board, movement catalog, resolver and game layers.
//!
//! Tiles are addressed by a stable `TileId` into the board arena; pieces carry
//! their owner's team and play direction so the resolver can normalize paths
//! without reaching back into the player rotation.

use std::collections::BTreeSet;
use std::fmt;

/// Stable tile identity. Equal to the tile's slot in the board arena.
pub type TileId = usize;

/// Stable piece identity, assigned when a piece is created.
pub type PieceId = u32;

/// Owning side of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Team {
    Light,
    Dark,
}

impl Team {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Team::Light => Team::Dark,
            Team::Dark => Team::Light,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Light => write!(f, "light"),
            Team::Dark => write!(f, "dark"),
        }
    }
}

/// Direction of play. `Forward` advances toward row 0, `Backward` toward the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayDirection {
    Forward,
    Backward,
}

/// Piece kind. Movement behavior is looked up from the catalog, never dispatched virtually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may be promoted into.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        f.write_str(name)
    }
}

/// A piece standing on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub team: Team,
    pub direction: PlayDirection,
    /// Set on the first accepted move and never cleared.
    pub has_moved: bool,
    /// Only meaningful for kings.
    pub checked: bool,
    /// Only meaningful for pawns; lives for exactly one opponent turn.
    pub en_passant_eligible: bool,
}

impl Piece {
    pub fn new(id: PieceId, kind: PieceKind, team: Team, direction: PlayDirection) -> Self {
        Self {
            id,
            kind,
            team,
            direction,
            has_moved: false,
            checked: false,
            en_passant_eligible: false,
        }
    }

    #[inline]
    pub fn is_opponent_of(&self, team: Team) -> bool {
        self.team != team
    }
}

/// A seat in the turn rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub team: Team,
    pub direction: PlayDirection,
    /// Live pieces. Captured pieces are removed.
    pub pieces: BTreeSet<PieceId>,
}

impl Player {
    pub fn new(team: Team, direction: PlayDirection) -> Self {
        Self {
            team,
            direction,
            pieces: BTreeSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotion_targets_exclude_pawn_and_king() {
        assert!(!PieceKind::Pawn.is_promotion_target());
        assert!(!PieceKind::King.is_promotion_target());
        assert!(PieceKind::Queen.is_promotion_target());
        assert!(PieceKind::Knight.is_promotion_target());
    }

    #[test]
    fn new_piece_starts_unmoved_and_unflagged() {
        let piece = Piece::new(7, PieceKind::Pawn, Team::Dark, PlayDirection::Backward);
        assert!(!piece.has_moved);
        assert!(!piece.checked);
        assert!(!piece.en_passant_eligible);
        assert!(piece.is_opponent_of(Team::Light));
        assert!(!piece.is_opponent_of(Team::Dark));
    }
}
