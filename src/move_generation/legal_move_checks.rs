//! Check, checkmate and stalemate detection.
//!
//! Attacks are found by running the resolver in reverse: a tile is attacked
//! when some opposing piece threatens it. Self-check filtering probes each
//! candidate with a `ProbeGuard`, which reverts before the next candidate.

use crate::board::tile_graph::Board;
use crate::errors::EngineResult;
use crate::game_state::chess_types::{PieceKind, Team, TileId};
use crate::move_generation::legal_move_apply::ProbeGuard;
use crate::move_generation::movement_resolver::{
    attacked_tiles, legal_destinations, DestinationMap,
};

/// True when any piece not on `defender`'s team threatens `tile`.
pub fn is_square_attacked(board: &Board, tile: TileId, defender: Team) -> bool {
    board
        .tiles()
        .filter(|t| t.occupant.is_some_and(|p| p.is_opponent_of(defender)))
        .any(|t| attacked_tiles(board, t.id).contains(&tile))
}

pub fn attackers_to_square(
    board: &Board,
    tile: TileId,
    defender: Team,
) -> Vec<(TileId, PieceKind)> {
    board
        .tiles()
        .filter_map(|t| {
            t.occupant
                .filter(|p| p.is_opponent_of(defender))
                .map(|p| (t.id, p.kind))
        })
        .filter(|&(from, _)| attacked_tiles(board, from).contains(&tile))
        .collect()
}

/// A team without a king is never in check.
pub fn is_king_in_check(board: &Board, team: Team) -> bool {
    let Some(king) = board.king_tile(team) else {
        return false;
    };
    is_square_attacked(board, king, team)
}

/// Resolver destinations minus those that leave the mover's king attacked.
pub fn safe_destinations(board: &mut Board, from: TileId) -> EngineResult<DestinationMap> {
    let Some(team) = board.occupant(from).map(|p| p.team) else {
        return Ok(DestinationMap::new());
    };

    let mut safe = DestinationMap::new();
    for (to, path) in legal_destinations(board, from) {
        let exposed = {
            let probe = ProbeGuard::apply(board, from, to, &path)?;
            is_king_in_check(probe.board(), team)
        };
        if !exposed {
            safe.insert(to, path);
        }
    }
    Ok(safe)
}

pub fn has_any_safe_move(board: &mut Board, team: Team) -> EngineResult<bool> {
    let sources: Vec<TileId> = board.pieces_of(team).map(|(tile, _)| tile).collect();
    for from in sources {
        if !safe_destinations(board, from)?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// In check, and every candidate move still leaves the king in check.
pub fn is_checkmate(board: &mut Board, team: Team) -> EngineResult<bool> {
    if !is_king_in_check(board, team) {
        return Ok(false);
    }
    Ok(!has_any_safe_move(board, team)?)
}

/// Not in check, but no move is available.
pub fn is_stalemate(board: &mut Board, team: Team) -> EngineResult<bool> {
    if is_king_in_check(board, team) {
        return Ok(false);
    }
    Ok(!has_any_safe_move(board, team)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Piece, PlayDirection};

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

    #[test]
    fn back_rank_mate_is_detected() {
        let mut board = board_with(&[
            (7, 6, PieceKind::King, Team::Light),
            (6, 5, PieceKind::Pawn, Team::Light),
            (6, 6, PieceKind::Pawn, Team::Light),
            (6, 7, PieceKind::Pawn, Team::Light),
            (7, 3, PieceKind::Queen, Team::Dark),
            (0, 0, PieceKind::King, Team::Dark),
        ]);
        let before = board.clone();
        assert!(is_king_in_check(&board, Team::Light));
        assert!(is_checkmate(&mut board, Team::Light).expect("probe should run"));
        assert!(!is_stalemate(&mut board, Team::Light).expect("probe should run"));
        assert_eq!(board, before, "probing must leave no trace");
    }

    #[test]
    fn blockable_check_is_not_mate() {
        let mut board = board_with(&[
            (7, 6, PieceKind::King, Team::Light),
            (6, 5, PieceKind::Pawn, Team::Light),
            (6, 6, PieceKind::Pawn, Team::Light),
            (6, 7, PieceKind::Pawn, Team::Light),
            (5, 4, PieceKind::Rook, Team::Light),
            (7, 3, PieceKind::Queen, Team::Dark),
            (0, 0, PieceKind::King, Team::Dark),
        ]);
        assert!(is_king_in_check(&board, Team::Light));
        assert!(!is_checkmate(&mut board, Team::Light).expect("probe should run"));

        let rook = board.tile_at(5, 4).unwrap();
        let safe = safe_destinations(&mut board, rook).expect("probe should run");
        let blocks: Vec<TileId> = safe.keys().copied().collect();
        assert_eq!(blocks, vec![board.tile_at(7, 4).unwrap()]);
    }

    #[test]
    fn cornered_king_without_check_is_stalemate() {
        let mut board = board_with(&[
            (0, 0, PieceKind::King, Team::Dark),
            (2, 1, PieceKind::Queen, Team::Light),
            (7, 7, PieceKind::King, Team::Light),
        ]);
        assert!(!is_king_in_check(&board, Team::Dark));
        assert!(is_stalemate(&mut board, Team::Dark).expect("probe should run"));
        assert!(!is_checkmate(&mut board, Team::Dark).expect("probe should run"));
    }

    #[test]
    fn pinned_piece_has_no_safe_moves() {
        let mut board = board_with(&[
            (7, 4, PieceKind::King, Team::Light),
            (5, 4, PieceKind::Bishop, Team::Light),
            (0, 4, PieceKind::Rook, Team::Dark),
        ]);
        let bishop = board.tile_at(5, 4).unwrap();
        assert!(!legal_destinations(&board, bishop).is_empty());
        assert!(safe_destinations(&mut board, bishop)
            .expect("probe should run")
            .is_empty());
    }

    #[test]
    fn attackers_are_listed_by_kind() {
        let board = board_with(&[
            (4, 4, PieceKind::King, Team::Light),
            (0, 4, PieceKind::Rook, Team::Dark),
            (2, 3, PieceKind::Knight, Team::Dark),
            (3, 5, PieceKind::Pawn, Team::Dark),
        ]);
        let king = board.tile_at(4, 4).unwrap();
        let mut kinds: Vec<PieceKind> = attackers_to_square(&board, king, Team::Light)
            .into_iter()
            .map(|(_, kind)| kind)
            .collect();
        kinds.sort();
        assert_eq!(kinds, vec![PieceKind::Pawn, PieceKind::Knight, PieceKind::Rook]);
    }

    #[test]
    fn kingless_team_is_never_in_check() {
        let board = board_with(&[(0, 0, PieceKind::Queen, Team::Dark)]);
        assert!(!is_king_in_check(&board, Team::Light));
    }
}
