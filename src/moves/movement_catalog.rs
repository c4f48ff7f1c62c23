//! Per-kind movement declarations.
//!
//! The catalog is a pure function of the piece kind (and, for pawns and kings,
//! whether the piece has moved). Paths are authored for a piece facing `Up`;
//! the resolver normalizes them by the owner's play direction.

use crate::game_state::chess_types::PieceKind;
use crate::moves::steps::{Path, Step};

use Step::{Down as D, Left as L, Right as R, Up as U};

const ORTHOGONAL: [&[Step]; 4] = [&[U], &[D], &[L], &[R]];
const DIAGONAL: [&[Step]; 4] = [&[U, L], &[U, R], &[D, L], &[D, R]];
const KNIGHT_JUMPS: [&[Step]; 8] = [
    &[U, U, L],
    &[U, U, R],
    &[D, D, L],
    &[D, D, R],
    &[L, L, U],
    &[L, L, D],
    &[R, R, U],
    &[R, R, D],
];
const PAWN_ADVANCE: &[Step] = &[U];
const PAWN_DOUBLE_ADVANCE: &[Step] = &[U, U];
const PAWN_CAPTURES: [&[Step]; 2] = [&[U, L], &[U, R]];
const CASTLING: [&[Step]; 2] = [&[R, R], &[L, L]];

/// Everything the resolver needs to know about how one kind moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogData {
    pub movement_paths: Vec<Path>,
    /// Legal only onto an opposing piece or the en-passant target.
    pub capture_only_paths: Vec<Path>,
    /// Sliding pieces re-walk a path until blocked.
    pub continuous: bool,
    /// Movement paths double as capture paths.
    pub movement_capturable: bool,
    /// Two-step lateral king paths, present only before the king's first move.
    pub castling_paths: Vec<Path>,
}

impl CatalogData {
    #[inline]
    pub fn movement_paths(&self) -> &[Path] {
        &self.movement_paths
    }

    #[inline]
    pub fn capture_only_paths(&self) -> &[Path] {
        &self.capture_only_paths
    }

    #[inline]
    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    #[inline]
    pub fn is_movement_capturable(&self) -> bool {
        self.movement_capturable
    }

    #[inline]
    pub fn castling_paths(&self) -> &[Path] {
        &self.castling_paths
    }
}

fn paths(declared: &[&[Step]]) -> Vec<Path> {
    declared.iter().map(|path| path.to_vec()).collect()
}

pub fn catalog(kind: PieceKind, has_moved: bool) -> CatalogData {
    match kind {
        PieceKind::Pawn => {
            let mut movement_paths = vec![PAWN_ADVANCE.to_vec()];
            if !has_moved {
                movement_paths.push(PAWN_DOUBLE_ADVANCE.to_vec());
            }
            CatalogData {
                movement_paths,
                capture_only_paths: paths(&PAWN_CAPTURES),
                continuous: false,
                movement_capturable: false,
                castling_paths: Vec::new(),
            }
        }
        PieceKind::Knight => CatalogData {
            movement_paths: paths(&KNIGHT_JUMPS),
            capture_only_paths: Vec::new(),
            continuous: false,
            movement_capturable: true,
            castling_paths: Vec::new(),
        },
        PieceKind::Bishop => CatalogData {
            movement_paths: paths(&DIAGONAL),
            capture_only_paths: Vec::new(),
            continuous: true,
            movement_capturable: true,
            castling_paths: Vec::new(),
        },
        PieceKind::Rook => CatalogData {
            movement_paths: paths(&ORTHOGONAL),
            capture_only_paths: Vec::new(),
            continuous: true,
            movement_capturable: true,
            castling_paths: Vec::new(),
        },
        PieceKind::Queen => CatalogData {
            movement_paths: paths(&ORTHOGONAL).into_iter().chain(paths(&DIAGONAL)).collect(),
            capture_only_paths: Vec::new(),
            continuous: true,
            movement_capturable: true,
            castling_paths: Vec::new(),
        },
        PieceKind::King => CatalogData {
            movement_paths: paths(&ORTHOGONAL).into_iter().chain(paths(&DIAGONAL)).collect(),
            capture_only_paths: Vec::new(),
            continuous: false,
            movement_capturable: true,
            castling_paths: if has_moved { Vec::new() } else { paths(&CASTLING) },
        },
    }
}
