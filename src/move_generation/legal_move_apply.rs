//! Board-level move application with an exact undo record.
//!
//! `apply_on_board` performs the tile mutations of one resolved move (capture,
//! en-passant removal, castling rook hop, opening the mover's en-passant
//! window) and returns an `UndoRecord` that `revert` uses to restore the prior
//! board. Other pawns' windows are untouched; they close when the turn passes.
//! `ProbeGuard` wraps the pair as a scoped mutation for dry-run probing.

use crate::board::tile_graph::Board;
use crate::errors::{EngineResult, InvariantViolation};
use crate::game_state::chess_types::{Piece, TileId};
use crate::move_generation::movement_resolver::{PathKind, ResolvedPath};

/// Single undo record for `apply_on_board` / `revert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    pub from: TileId,
    pub to: TileId,
    /// The mover as it stood before the move.
    pub moved: Piece,
    /// Captured piece and the tile it was removed from.
    pub captured: Option<(TileId, Piece)>,
    /// Rook tile pair and the rook before the castling hop.
    pub castled_rook: Option<(TileId, TileId, Piece)>,
}

pub fn apply_on_board(
    board: &mut Board,
    from: TileId,
    to: TileId,
    path: &ResolvedPath,
) -> EngineResult<UndoRecord> {
    if board.tile(to).is_none() {
        return Err(InvariantViolation::UnknownTile(to).into());
    }
    let moved = take_piece(board, from).ok_or(InvariantViolation::MissingPiece(from))?;

    let captured_tile = match path.kind {
        PathKind::EnPassant { captured } => captured,
        _ => to,
    };
    let captured = take_piece(board, captured_tile).map(|piece| (captured_tile, piece));

    let mut landed = moved;
    landed.has_moved = true;
    landed.en_passant_eligible = path.kind == PathKind::DoubleStep;
    put_piece(board, to, landed);

    let mut castled_rook = None;
    if let PathKind::Castling { rook_from, rook_to } = path.kind {
        if let Some(rook) = take_piece(board, rook_from) {
            let mut hopped = rook;
            hopped.has_moved = true;
            put_piece(board, rook_to, hopped);
            castled_rook = Some((rook_from, rook_to, rook));
        }
    }

    Ok(UndoRecord {
        from,
        to,
        moved,
        captured,
        castled_rook,
    })
}

/// Restores the board exactly as it was before the recorded move.
pub fn revert(board: &mut Board, undo: UndoRecord) {
    if let Some((rook_from, rook_to, rook)) = undo.castled_rook {
        take_piece(board, rook_to);
        put_piece(board, rook_from, rook);
    }

    take_piece(board, undo.to);
    put_piece(board, undo.from, undo.moved);

    if let Some((tile, piece)) = undo.captured {
        put_piece(board, tile, piece);
    }
}

fn take_piece(board: &mut Board, tile: TileId) -> Option<Piece> {
    board.tile_mut(tile).and_then(|t| t.occupant.take())
}

fn put_piece(board: &mut Board, tile: TileId, piece: Piece) {
    if let Some(t) = board.tile_mut(tile) {
        t.occupant = Some(piece);
    }
}

/// A move applied for inspection only. The board is reverted when the guard
/// drops, on every exit path including unwinding.
pub struct ProbeGuard<'a> {
    board: &'a mut Board,
    undo: Option<UndoRecord>,
}

impl<'a> ProbeGuard<'a> {
    pub fn apply(
        board: &'a mut Board,
        from: TileId,
        to: TileId,
        path: &ResolvedPath,
    ) -> EngineResult<Self> {
        let undo = apply_on_board(board, from, to, path)?;
        Ok(Self {
            board,
            undo: Some(undo),
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        self.board
    }
}

impl Drop for ProbeGuard<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            revert(self.board, undo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{PieceKind, PlayDirection, Team};
    use crate::move_generation::movement_resolver::legal_destinations;

    fn board_with(pieces: &[(usize, usize, PieceKind, Team)]) -> Board {
        let mut board = Board::build(8, 8).expect("board should build");
        for (i, &(row, col, kind, team)) in pieces.iter().enumerate() {
            let direction = match team {
                Team::Light => PlayDirection::Forward,
                Team::Dark => PlayDirection::Backward,
            };
            let tile = board.tile_at(row, col).expect("tile on board");
            board
                .place(tile, Piece::new(i as u32, kind, team, direction))
                .expect("placement should succeed");
        }
        board
    }

    fn resolved(board: &Board, from: TileId, to: TileId) -> ResolvedPath {
        legal_destinations(board, from)
            .remove(&to)
            .expect("destination should be legal")
    }

    #[test]
    fn capture_then_revert_restores_board() {
        let mut board = board_with(&[
            (4, 4, PieceKind::Rook, Team::Light),
            (1, 4, PieceKind::Bishop, Team::Dark),
        ]);
        let before = board.clone();
        let (from, to) = (board.tile_at(4, 4).unwrap(), board.tile_at(1, 4).unwrap());
        let path = resolved(&board, from, to);

        let undo = apply_on_board(&mut board, from, to, &path).expect("apply should succeed");
        assert_eq!(undo.captured.map(|(_, p)| p.kind), Some(PieceKind::Bishop));
        assert!(board.occupant(from).is_none());
        let landed = board.occupant(to).expect("rook landed");
        assert_eq!(landed.kind, PieceKind::Rook);
        assert!(landed.has_moved);

        revert(&mut board, undo);
        assert_eq!(board, before);
    }

    #[test]
    fn double_step_opens_window_and_later_moves_leave_it_open() {
        let mut board = board_with(&[
            (6, 3, PieceKind::Pawn, Team::Light),
            (0, 0, PieceKind::Rook, Team::Dark),
        ]);
        let from = board.tile_at(6, 3).unwrap();
        let to = board.tile_at(4, 3).unwrap();
        let path = resolved(&board, from, to);
        apply_on_board(&mut board, from, to, &path).expect("apply should succeed");
        assert!(board.occupant(to).unwrap().en_passant_eligible);

        let rook_from = board.tile_at(0, 0).unwrap();
        let rook_to = board.tile_at(0, 1).unwrap();
        let path = resolved(&board, rook_from, rook_to);
        let before = board.clone();
        let undo = apply_on_board(&mut board, rook_from, rook_to, &path)
            .expect("apply should succeed");
        assert!(board.occupant(to).unwrap().en_passant_eligible);

        revert(&mut board, undo);
        assert_eq!(board, before);
    }

    #[test]
    fn en_passant_removes_the_skipping_pawn() {
        let mut board = board_with(&[
            (3, 4, PieceKind::Pawn, Team::Light),
            (1, 3, PieceKind::Pawn, Team::Dark),
        ]);
        let dark_from = board.tile_at(1, 3).unwrap();
        let dark_to = board.tile_at(3, 3).unwrap();
        let path = resolved(&board, dark_from, dark_to);
        apply_on_board(&mut board, dark_from, dark_to, &path).expect("apply should succeed");

        let before = board.clone();
        let from = board.tile_at(3, 4).unwrap();
        let target = board.tile_at(2, 3).unwrap();
        let path = resolved(&board, from, target);
        assert_eq!(path.kind, PathKind::EnPassant { captured: dark_to });

        let undo = apply_on_board(&mut board, from, target, &path).expect("apply should succeed");
        assert!(board.occupant(dark_to).is_none());
        assert_eq!(undo.captured.map(|(tile, _)| tile), Some(dark_to));

        revert(&mut board, undo);
        assert_eq!(board, before);
    }

    #[test]
    fn castling_moves_the_rook_and_reverts() {
        let mut board = board_with(&[
            (7, 4, PieceKind::King, Team::Light),
            (7, 7, PieceKind::Rook, Team::Light),
        ]);
        let before = board.clone();
        let from = board.tile_at(7, 4).unwrap();
        let to = board.tile_at(7, 6).unwrap();
        let path = resolved(&board, from, to);
        let undo = apply_on_board(&mut board, from, to, &path).expect("apply should succeed");
        let rook = board.occupant(board.tile_at(7, 5).unwrap()).expect("rook hopped");
        assert_eq!(rook.kind, PieceKind::Rook);
        assert!(rook.has_moved);

        revert(&mut board, undo);
        assert_eq!(board, before);
    }

    #[test]
    fn probe_guard_reverts_on_drop() {
        let mut board = board_with(&[(4, 4, PieceKind::Queen, Team::Light)]);
        let before = board.clone();
        let from = board.tile_at(4, 4).unwrap();
        let to = board.tile_at(0, 0).unwrap();
        let path = resolved(&board, from, to);
        {
            let probe = ProbeGuard::apply(&mut board, from, to, &path).expect("probe applies");
            assert!(probe.board().occupant(to).is_some());
            assert!(probe.board().occupant(from).is_none());
        }
        assert_eq!(board, before);
    }

    #[test]
    fn applying_from_empty_tile_fails_without_mutation() {
        let mut board = board_with(&[(4, 4, PieceKind::Queen, Team::Light)]);
        let before = board.clone();
        let path = ResolvedPath {
            steps: Vec::new(),
            kind: PathKind::Movement,
        };
        assert!(apply_on_board(&mut board, 0, 1, &path).is_err());
        assert_eq!(board, before);
    }
}
