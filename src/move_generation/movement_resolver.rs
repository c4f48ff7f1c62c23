//! Destination resolution by walking the tile graph.
//!
//! For the piece on a tile, every catalog path is normalized by the owner's
//! play direction and walked one step at a time. A path with an off-board
//! step is discarded. Occupancy is judged at the landing tile; sliding pieces
//! keep re-walking the same path from each empty landing tile until blocked.
//!
//! The resolver is pseudo-legal: it does not ask whether the mover's own king
//! is left attacked. `legal_move_checks::safe_destinations` adds that filter.

use std::collections::{BTreeMap, BTreeSet};

use crate::board::tile_graph::Board;
use crate::game_state::chess_types::{Piece, PieceKind, Team, TileId};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::movement_catalog::{catalog, CatalogData};
use crate::moves::steps::{normalize, Path, Step};

/// How a resolved destination is reached, and what applying it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Movement,
    /// Pawn advance over two empty tiles; arms the en-passant window.
    DoubleStep,
    Capture,
    /// Diagonal pawn move onto an empty tile, removing the pawn on `captured`.
    EnPassant { captured: TileId },
    Castling { rook_from: TileId, rook_to: TileId },
}

impl PathKind {
    #[inline]
    pub fn is_capture(self) -> bool {
        matches!(self, PathKind::Capture | PathKind::EnPassant { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Normalized steps from the source tile to the destination.
    pub steps: Path,
    pub kind: PathKind,
}

pub type DestinationMap = BTreeMap<TileId, ResolvedPath>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolveMode {
    /// Destinations the piece may move to.
    Moves,
    /// Tiles the piece threatens. Pawns contribute only their diagonals,
    /// whether or not anything stands there; castling is never included.
    Attacks,
}

/// Legal destinations (ignoring self-check) for the piece on `from`.
pub fn legal_destinations(board: &Board, from: TileId) -> DestinationMap {
    resolve(board, from, ResolveMode::Moves)
}

/// Tiles threatened by the piece on `from`.
pub fn attacked_tiles(board: &Board, from: TileId) -> BTreeSet<TileId> {
    resolve(board, from, ResolveMode::Attacks)
        .into_keys()
        .collect()
}

fn resolve(board: &Board, from: TileId, mode: ResolveMode) -> DestinationMap {
    let mut out = DestinationMap::new();
    let Some(piece) = board.occupant(from).copied() else {
        return out;
    };
    let data = catalog(piece.kind, piece.has_moved);

    if data.is_movement_capturable() {
        resolve_capturing_movement(board, from, &piece, &data, &mut out);
    } else if mode == ResolveMode::Moves {
        resolve_quiet_movement(board, from, &piece, &data, &mut out);
    }

    resolve_capture_only(board, from, &piece, &data, mode, &mut out);

    if mode == ResolveMode::Moves {
        resolve_castling(board, from, &piece, &data, &mut out);
    }

    out
}

/// Walks `steps` from `origin`. Returns the landing tile and whether every
/// tile passed before it was empty, or `None` when a step leaves the board.
fn walk(board: &Board, origin: TileId, steps: &[Step]) -> Option<(TileId, bool)> {
    let mut current = origin;
    let mut passed_clear = true;
    for (i, &step) in steps.iter().enumerate() {
        if i > 0 && board.occupant(current).is_some() {
            passed_clear = false;
        }
        current = board.step(current, step)?;
    }
    Some((current, passed_clear))
}

fn insert(out: &mut DestinationMap, to: TileId, steps: Path, kind: PathKind) {
    out.entry(to).or_insert(ResolvedPath { steps, kind });
}

fn resolve_capturing_movement(
    board: &Board,
    from: TileId,
    piece: &Piece,
    data: &CatalogData,
    out: &mut DestinationMap,
) {
    for declared in data.movement_paths() {
        let unit = normalize(declared, piece.direction);
        let mut origin = from;
        let mut steps = Path::new();

        loop {
            let Some((to, _)) = walk(board, origin, &unit) else {
                break;
            };
            steps.extend_from_slice(&unit);

            match board.occupant(to) {
                None => {
                    insert(out, to, steps.clone(), PathKind::Movement);
                    origin = to;
                }
                Some(other) => {
                    if other.is_opponent_of(piece.team) {
                        insert(out, to, steps.clone(), PathKind::Capture);
                    }
                    break;
                }
            }

            if !data.is_continuous() {
                break;
            }
        }
    }
}

fn resolve_quiet_movement(
    board: &Board,
    from: TileId,
    piece: &Piece,
    data: &CatalogData,
    out: &mut DestinationMap,
) {
    for declared in data.movement_paths() {
        let steps = normalize(declared, piece.direction);
        let Some((to, passed_clear)) = walk(board, from, &steps) else {
            continue;
        };
        if !passed_clear || board.occupant(to).is_some() {
            continue;
        }
        let kind = if steps.len() == 2 {
            PathKind::DoubleStep
        } else {
            PathKind::Movement
        };
        insert(out, to, steps, kind);
    }
}

fn resolve_capture_only(
    board: &Board,
    from: TileId,
    piece: &Piece,
    data: &CatalogData,
    mode: ResolveMode,
    out: &mut DestinationMap,
) {
    for declared in data.capture_only_paths() {
        let steps = normalize(declared, piece.direction);
        let Some((to, _)) = walk(board, from, &steps) else {
            continue;
        };
        match (board.occupant(to), mode) {
            (Some(other), _) if other.is_opponent_of(piece.team) => {
                insert(out, to, steps, PathKind::Capture);
            }
            (Some(_), _) => {}
            (None, ResolveMode::Attacks) => insert(out, to, steps, PathKind::Capture),
            (None, ResolveMode::Moves) => {
                if let Some(captured) = en_passant_victim(board, to, piece.team) {
                    insert(out, to, steps, PathKind::EnPassant { captured });
                }
            }
        }
    }
}

/// The opposing pawn that skipped over the empty tile `target` on its last
/// move, if its en-passant window is still open.
pub fn en_passant_victim(board: &Board, target: TileId, mover: Team) -> Option<TileId> {
    [Step::Up, Step::Down]
        .into_iter()
        .filter_map(|step| board.step(target, step))
        .find(|&candidate| {
            board.occupant(candidate).is_some_and(|pawn| {
                pawn.kind == PieceKind::Pawn
                    && pawn.en_passant_eligible
                    && pawn.is_opponent_of(mover)
                    && board.step(candidate, Step::Down.normalized(pawn.direction)) == Some(target)
            })
        })
}

fn resolve_castling(
    board: &Board,
    from: TileId,
    piece: &Piece,
    data: &CatalogData,
    out: &mut DestinationMap,
) {
    if data.castling_paths().is_empty() || is_square_attacked(board, from, piece.team) {
        return;
    }

    for declared in data.castling_paths() {
        let steps = normalize(declared, piece.direction);
        let Some(&lateral) = steps.first() else {
            continue;
        };
        let Some((to, passed_clear)) = walk(board, from, &steps) else {
            continue;
        };
        let Some(crossed) = board.step(from, lateral) else {
            continue;
        };
        if !passed_clear || board.occupant(to).is_some() {
            continue;
        }

        // Every tile between the king and its rook must be empty.
        let mut cursor = to;
        let rook_from = loop {
            match board.step(cursor, lateral) {
                None => break None,
                Some(next) if board.occupant(next).is_none() => cursor = next,
                Some(next) => break Some(next),
            }
        };
        let Some(rook_from) = rook_from else {
            continue;
        };
        let rook_ready = board.occupant(rook_from).is_some_and(|rook| {
            rook.kind == PieceKind::Rook && rook.team == piece.team && !rook.has_moved
        });
        if !rook_ready {
            continue;
        }

        if is_square_attacked(board, crossed, piece.team)
            || is_square_attacked(board, to, piece.team)
        {
            continue;
        }

        insert(
            out,
            to,
            steps,
            PathKind::Castling {
                rook_from,
                rook_to: crossed,
            },
        );
    }
}
