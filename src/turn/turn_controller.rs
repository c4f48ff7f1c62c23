//! Player rotation and click classification.
//!
//! The controller owns the rotating queue of players (front is current) and
//! at most one armed tile. It never derives move legality itself: the caller
//! passes the destination map for the armed tile and the controller only
//! checks membership.

use std::collections::VecDeque;

use crate::board::tile_graph::Board;
use crate::errors::{ConfigurationError, IllegalMoveRequest};
use crate::game_state::chess_types::{Player, Team, TileId};
use crate::move_generation::movement_resolver::{DestinationMap, ResolvedPath};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    NoSelection,
    Armed(TileId),
}

/// What a click on a tile means in the current selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    Select(TileId),
    Deselect(TileId),
    Reselect { from: TileId, to: TileId },
    Commit {
        from: TileId,
        to: TileId,
        path: ResolvedPath,
    },
    Invalid(IllegalMoveRequest),
}

#[derive(Debug, Clone)]
pub struct TurnController {
    players: VecDeque<Player>,
    selection: SelectionState,
    /// Armed piece must keep capturing or end its turn.
    locked: bool,
}

impl TurnController {
    pub fn new(players: Vec<Player>) -> Result<Self, ConfigurationError> {
        if players.is_empty() {
            return Err(ConfigurationError::NoSeats);
        }
        Ok(Self {
            players: players.into(),
            selection: SelectionState::NoSelection,
            locked: false,
        })
    }

    #[inline]
    pub fn current(&self) -> &Player {
        &self.players[0]
    }

    #[inline]
    pub fn current_team(&self) -> Team {
        self.current().team
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn player(&self, team: Team) -> Option<&Player> {
        self.players.iter().find(|p| p.team == team)
    }

    pub(crate) fn player_mut(&mut self, team: Team) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.team == team)
    }

    #[inline]
    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn armed(&self) -> Option<TileId> {
        match self.selection {
            SelectionState::Armed(tile) => Some(tile),
            SelectionState::NoSelection => None,
        }
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Classifies a click on `tile`. `destinations` must be the legal map of
    /// the armed tile (ignored when nothing is armed).
    pub fn classify(
        &self,
        board: &Board,
        tile: TileId,
        destinations: &DestinationMap,
    ) -> ClickAction {
        if board.tile(tile).is_none() {
            return ClickAction::Invalid(IllegalMoveRequest::UnknownTile(tile));
        }
        let team = self.current_team();
        let owns = board.occupant(tile).is_some_and(|p| p.team == team);

        match self.selection {
            SelectionState::NoSelection if owns => ClickAction::Select(tile),
            SelectionState::NoSelection => {
                ClickAction::Invalid(IllegalMoveRequest::NotCurrentPlayersPiece(tile))
            }
            SelectionState::Armed(armed) if armed == tile => ClickAction::Deselect(tile),
            SelectionState::Armed(armed) if self.locked => match destinations.get(&tile) {
                Some(path) if path.kind.is_capture() => ClickAction::Commit {
                    from: armed,
                    to: tile,
                    path: path.clone(),
                },
                _ => ClickAction::Invalid(IllegalMoveRequest::ContinuationLocked(armed)),
            },
            SelectionState::Armed(armed) if owns => ClickAction::Reselect {
                from: armed,
                to: tile,
            },
            SelectionState::Armed(armed) => match destinations.get(&tile) {
                Some(path) => ClickAction::Commit {
                    from: armed,
                    to: tile,
                    path: path.clone(),
                },
                None => ClickAction::Invalid(IllegalMoveRequest::UnreachableDestination {
                    from: armed,
                    to: tile,
                }),
            },
        }
    }

    pub fn arm(&mut self, tile: TileId) {
        self.selection = SelectionState::Armed(tile);
    }

    pub fn disarm(&mut self) {
        self.selection = SelectionState::NoSelection;
        self.locked = false;
    }

    /// Keeps the turn with the current player, pinned to `tile`.
    pub fn lock(&mut self, tile: TileId) {
        self.selection = SelectionState::Armed(tile);
        self.locked = true;
    }

    /// Rotates the queue and clears any selection. Returns the new current team.
    pub fn advance(&mut self) -> Team {
        self.disarm();
        self.players.rotate_left(1);
        self.current_team()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Piece, PieceKind, PlayDirection};
    use crate::move_generation::movement_resolver::legal_destinations;

    fn controller() -> TurnController {
        TurnController::new(vec![
            Player::new(Team::Light, PlayDirection::Forward),
            Player::new(Team::Dark, PlayDirection::Backward),
        ])
        .expect("two seats")
    }

    fn board() -> Board {
        let mut board = Board::build(8, 8).expect("board should build");
        let pieces = [
            (6, 0, PieceKind::Pawn, Team::Light, PlayDirection::Forward),
            (6, 1, PieceKind::Pawn, Team::Light, PlayDirection::Forward),
            (1, 0, PieceKind::Pawn, Team::Dark, PlayDirection::Backward),
        ];
        for (i, (row, col, kind, team, direction)) in pieces.into_iter().enumerate() {
            let tile = board.tile_at(row, col).expect("tile on board");
            board
                .place(tile, Piece::new(i as u32, kind, team, direction))
                .expect("placement should succeed");
        }
        board
    }

    #[test]
    fn empty_rotation_is_rejected() {
        assert!(matches!(
            TurnController::new(Vec::new()),
            Err(ConfigurationError::NoSeats)
        ));
    }

    #[test]
    fn rotation_returns_to_start_every_n_advances() {
        let mut turns = controller();
        let start = turns.current_team();
        for round in 1..=3 {
            assert_eq!(turns.advance(), start.opposite());
            assert_eq!(turns.advance(), start, "round {round}");
        }
    }

    #[test]
    fn clicks_in_no_selection() {
        let board = board();
        let turns = controller();
        let none = DestinationMap::new();
        let own = board.tile_at(6, 0).unwrap();
        let theirs = board.tile_at(1, 0).unwrap();
        let empty = board.tile_at(4, 4).unwrap();

        assert_eq!(turns.classify(&board, own, &none), ClickAction::Select(own));
        assert_eq!(
            turns.classify(&board, theirs, &none),
            ClickAction::Invalid(IllegalMoveRequest::NotCurrentPlayersPiece(theirs))
        );
        assert_eq!(
            turns.classify(&board, empty, &none),
            ClickAction::Invalid(IllegalMoveRequest::NotCurrentPlayersPiece(empty))
        );
        assert_eq!(
            turns.classify(&board, 999, &none),
            ClickAction::Invalid(IllegalMoveRequest::UnknownTile(999))
        );
    }

    #[test]
    fn clicks_while_armed() {
        let board = board();
        let mut turns = controller();
        let armed = board.tile_at(6, 0).unwrap();
        let other = board.tile_at(6, 1).unwrap();
        turns.arm(armed);
        let moves = legal_destinations(&board, armed);

        assert_eq!(turns.classify(&board, armed, &moves), ClickAction::Deselect(armed));
        assert_eq!(
            turns.classify(&board, other, &moves),
            ClickAction::Reselect {
                from: armed,
                to: other
            }
        );

        let target = board.tile_at(4, 0).unwrap();
        match turns.classify(&board, target, &moves) {
            ClickAction::Commit { from, to, .. } => assert_eq!((from, to), (armed, target)),
            other => panic!("expected commit, got {other:?}"),
        }

        let far = board.tile_at(2, 0).unwrap();
        assert_eq!(
            turns.classify(&board, far, &moves),
            ClickAction::Invalid(IllegalMoveRequest::UnreachableDestination {
                from: armed,
                to: far
            })
        );
        assert_eq!(turns.armed(), Some(armed), "invalid clicks keep the selection");
    }

    #[test]
    fn locked_selection_only_accepts_captures() {
        let board = board();
        let mut turns = controller();
        let armed = board.tile_at(6, 0).unwrap();
        turns.lock(armed);
        let moves = legal_destinations(&board, armed);
        let quiet = board.tile_at(5, 0).unwrap();
        let other = board.tile_at(6, 1).unwrap();

        assert_eq!(
            turns.classify(&board, quiet, &moves),
            ClickAction::Invalid(IllegalMoveRequest::ContinuationLocked(armed))
        );
        assert_eq!(
            turns.classify(&board, other, &moves),
            ClickAction::Invalid(IllegalMoveRequest::ContinuationLocked(armed))
        );
        assert_eq!(turns.classify(&board, armed, &moves), ClickAction::Deselect(armed));

        turns.advance();
        assert!(!turns.is_locked());
        assert_eq!(turns.selection(), SelectionState::NoSelection);
    }
}
