//! Game composition root.
//!
//! `GameState` owns the board, the turn controller and the move history, and
//! is the only writer of tile and piece state. Every inbound call runs to
//! completion and reports what happened as a value: clicks become
//! `TileAction`s, moves become `MoveOutcome`s, and view-facing changes are
//! queued for `drain_notifications`.

use std::collections::BTreeSet;

use chrono::Utc;
use tracing::{debug, instrument, trace};

use crate::board::tile_graph::Board;
use crate::errors::{ConfigurationError, EngineResult, IllegalMoveRequest, InvariantViolation};
use crate::game_state::chess_rules::{standard_dataset, Placement};
use crate::game_state::chess_types::{
    Piece, PieceId, PieceKind, PlayDirection, Player, Team, TileId,
};
use crate::game_state::game_config::{ContinuationRule, GameConfig};
use crate::game_state::move_history::{MoveHistory, MoveRecord};
use crate::game_state::notifications::{Notification, OutcomeKind, OutcomeNotice, TileChange};
use crate::move_generation::legal_move_apply::apply_on_board;
use crate::move_generation::legal_move_checks::{
    has_any_safe_move, is_king_in_check, safe_destinations,
};
use crate::move_generation::movement_resolver::{self, DestinationMap, PathKind, ResolvedPath};
use crate::turn::turn_controller::{ClickAction, SelectionState, TurnController};
use crate::utils::render_game_state::render_board;

/// Result of an accepted (or rejected) move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Continued,
    Check,
    Checkmate { winner: Team },
    Stalemate,
    /// Only lone kings remain.
    Draw,
    /// A player lost every piece, or its king was captured.
    Eliminated { winner: Team },
    /// Pawn on the far rank; waiting for `choose_promotion`.
    Promotion(TileId),
    /// Capture chain continues with the piece on this tile.
    Continuation(TileId),
    Rejected(IllegalMoveRequest),
}

/// What a tile click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileAction {
    Selected(TileId),
    Reselected(TileId),
    Deselected(TileId),
    Moved {
        from: TileId,
        to: TileId,
        outcome: MoveOutcome,
    },
    Captured {
        from: TileId,
        to: TileId,
        captured: PieceKind,
        outcome: MoveOutcome,
    },
    Invalid(IllegalMoveRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameOver {
    #[default]
    None,
    Checkmate(Team),
    Stalemate,
    DrawInsufficientMaterial,
    Elimination(Team),
}

#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    turns: TurnController,
    next_piece_id: PieceId,
    pending_promotion: Option<TileId>,
    status: GameOver,
    history: MoveHistory,
    dirty: BTreeSet<TileId>,
    outcomes: Vec<OutcomeNotice>,
}

impl GameState {
    /// Builds the board and seats the players. No pieces are placed.
    pub fn new(config: GameConfig) -> EngineResult<Self> {
        config.validate()?;
        let board = Board::build(config.width, config.height)?;
        let players = config
            .seats
            .iter()
            .map(|seat| Player::new(seat.team, seat.direction))
            .collect();
        let turns = TurnController::new(players)?;
        debug!(width = config.width, height = config.height, "board built");

        Ok(Self {
            config,
            board,
            turns,
            next_piece_id: 0,
            pending_promotion: None,
            status: GameOver::None,
            history: MoveHistory::new(),
            dirty: BTreeSet::new(),
            outcomes: Vec::new(),
        })
    }

    /// Standard chess: 8x8, both sides populated with the 16-piece set.
    pub fn standard() -> EngineResult<Self> {
        let mut game = Self::new(GameConfig::default())?;
        let dataset = standard_dataset();
        game.populate_player(Team::Light, &dataset)?;
        game.populate_player(Team::Dark, &dataset)?;
        Ok(game)
    }

    /// Places `dataset` for `team`, counting ranks from the team's home edge.
    /// All-or-nothing: nothing is placed if any entry is invalid.
    #[instrument(level = "debug", skip(self, dataset), fields(pieces = dataset.len()))]
    pub fn populate_player(&mut self, team: Team, dataset: &[Placement]) -> EngineResult<()> {
        let direction = self
            .turns
            .player(team)
            .map(|p| p.direction)
            .ok_or(ConfigurationError::UnknownTeam(team))?;

        let mut targets = Vec::with_capacity(dataset.len());
        let mut claimed = BTreeSet::new();
        for placement in dataset {
            let tile = self.home_tile(placement, direction).ok_or(
                ConfigurationError::PlacementOffBoard {
                    kind: placement.kind,
                    rank: placement.rank,
                    file: placement.file,
                },
            )?;
            if self.board.occupant(tile).is_some() || !claimed.insert(tile) {
                return Err(ConfigurationError::PlacementOccupied(tile).into());
            }
            targets.push((tile, placement.kind));
        }

        for (tile, kind) in targets {
            let piece = Piece::new(self.allocate_piece_id(), kind, team, direction);
            self.board.place(tile, piece)?;
            if let Some(player) = self.turns.player_mut(team) {
                player.pieces.insert(piece.id);
            }
            self.dirty.insert(tile);
        }

        self.refresh_check_flags();
        Ok(())
    }

    fn home_tile(&self, placement: &Placement, direction: PlayDirection) -> Option<TileId> {
        if placement.rank >= self.board.height() {
            return None;
        }
        let row = match direction {
            PlayDirection::Forward => self.board.height() - 1 - placement.rank,
            PlayDirection::Backward => placement.rank,
        };
        self.board.tile_at(row, placement.file)
    }

    fn allocate_piece_id(&mut self) -> PieceId {
        let id = self.next_piece_id;
        self.next_piece_id += 1;
        id
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn current_team(&self) -> Team {
        self.turns.current_team()
    }

    #[inline]
    pub fn selection(&self) -> SelectionState {
        self.turns.selection()
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.turns.players()
    }

    pub fn player(&self, team: Team) -> Option<&Player> {
        self.turns.player(team)
    }

    #[inline]
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    #[inline]
    pub fn pending_promotion(&self) -> Option<TileId> {
        self.pending_promotion
    }

    #[inline]
    pub fn is_game_over(&self) -> GameOver {
        self.status
    }

    /// Destinations the piece on `tile` may move to. The live board is never
    /// touched; self-check probing runs on a scratch copy.
    pub fn legal_destinations(&self, tile: TileId) -> EngineResult<DestinationMap> {
        if self.config.filter_self_check {
            let mut scratch = self.board.clone();
            safe_destinations(&mut scratch, tile)
        } else {
            Ok(movement_resolver::legal_destinations(&self.board, tile))
        }
    }

    /// Every `(from, to)` pair the current player may request right now.
    /// Empty while a promotion is pending or after the game ended.
    pub fn legal_moves(&self) -> EngineResult<Vec<(TileId, TileId)>> {
        if self.blocked().is_some() {
            return Ok(Vec::new());
        }
        let sources: Vec<TileId> = match self.turns.armed() {
            Some(armed) if self.turns.is_locked() => vec![armed],
            _ => self
                .board
                .pieces_of(self.current_team())
                .map(|(tile, _)| tile)
                .collect(),
        };

        let mut moves = Vec::new();
        for from in sources {
            for (to, path) in self.legal_destinations(from)? {
                if !self.turns.is_locked() || path.kind.is_capture() {
                    moves.push((from, to));
                }
            }
        }
        Ok(moves)
    }

    fn destinations_for(&mut self, tile: TileId) -> EngineResult<DestinationMap> {
        let mut destinations = if self.config.filter_self_check {
            safe_destinations(&mut self.board, tile)?
        } else {
            movement_resolver::legal_destinations(&self.board, tile)
        };
        if self.turns.is_locked() {
            destinations.retain(|_, path| path.kind.is_capture());
        }
        Ok(destinations)
    }

    fn blocked(&self) -> Option<IllegalMoveRequest> {
        if self.status != GameOver::None {
            return Some(IllegalMoveRequest::GameOver);
        }
        self.pending_promotion
            .map(IllegalMoveRequest::PromotionPending)
    }

    /// Drives the selection state machine with a click on `tile`.
    #[instrument(level = "debug", skip(self))]
    pub fn select_tile(&mut self, tile: TileId) -> EngineResult<TileAction> {
        if let Some(reason) = self.blocked() {
            return Ok(TileAction::Invalid(reason));
        }

        let destinations = match self.turns.armed() {
            Some(armed) => self.destinations_for(armed)?,
            None => DestinationMap::new(),
        };

        match self.turns.classify(&self.board, tile, &destinations) {
            ClickAction::Select(tile) => {
                self.arm(tile)?;
                Ok(TileAction::Selected(tile))
            }
            ClickAction::Reselect { to, .. } => {
                self.clear_marks();
                self.arm(to)?;
                Ok(TileAction::Reselected(to))
            }
            ClickAction::Deselect(tile) => {
                self.clear_marks();
                if self.turns.is_locked() {
                    let mover = self.turns.current_team();
                    debug!(%mover, tile, "capture chain ended");
                    self.finish_turn(mover)?;
                } else {
                    self.turns.disarm();
                }
                Ok(TileAction::Deselected(tile))
            }
            ClickAction::Commit { from, to, path } => {
                let (captured, outcome) = self.commit(from, to, &path)?;
                Ok(match captured {
                    Some(captured) => TileAction::Captured {
                        from,
                        to,
                        captured,
                        outcome,
                    },
                    None => TileAction::Moved { from, to, outcome },
                })
            }
            ClickAction::Invalid(reason) => {
                debug!(%reason, "click ignored");
                Ok(TileAction::Invalid(reason))
            }
        }
    }

    /// Moves the current player's piece from `from` to `to` in one call.
    #[instrument(level = "debug", skip(self))]
    pub fn apply_move(&mut self, from: TileId, to: TileId) -> EngineResult<MoveOutcome> {
        if let Some(reason) = self.blocked() {
            return Ok(MoveOutcome::Rejected(reason));
        }
        if self.turns.is_locked() && self.turns.armed() != Some(from) {
            let armed = self.turns.armed().unwrap_or(from);
            return Ok(MoveOutcome::Rejected(IllegalMoveRequest::ContinuationLocked(armed)));
        }
        let team = self.turns.current_team();
        if !self.board.occupant(from).is_some_and(|p| p.team == team) {
            return Ok(MoveOutcome::Rejected(
                IllegalMoveRequest::NotCurrentPlayersPiece(from),
            ));
        }

        let Some(path) = self.destinations_for(from)?.remove(&to) else {
            debug!(from, to, "destination rejected");
            return Ok(MoveOutcome::Rejected(
                IllegalMoveRequest::UnreachableDestination { from, to },
            ));
        };

        let (_, outcome) = self.commit(from, to, &path)?;
        Ok(outcome)
    }

    /// Replaces the pending promotion pawn with `kind` and resumes play.
    #[instrument(level = "debug", skip(self))]
    pub fn choose_promotion(&mut self, kind: PieceKind) -> EngineResult<MoveOutcome> {
        let Some(tile) = self.pending_promotion else {
            return Ok(MoveOutcome::Rejected(IllegalMoveRequest::NoPromotionPending));
        };
        if !kind.is_promotion_target() {
            return Ok(MoveOutcome::Rejected(
                IllegalMoveRequest::InvalidPromotionKind(kind),
            ));
        }

        let pawn = *self
            .board
            .occupant(tile)
            .ok_or(InvariantViolation::MissingPiece(tile))?;
        let mut promoted = Piece::new(self.allocate_piece_id(), kind, pawn.team, pawn.direction);
        promoted.has_moved = true;

        if let Some(t) = self.board.tile_mut(tile) {
            t.occupant = Some(promoted);
        }
        if let Some(player) = self.turns.player_mut(pawn.team) {
            player.pieces.remove(&pawn.id);
            player.pieces.insert(promoted.id);
        }
        self.history.record_promotion(kind);
        self.pending_promotion = None;
        self.dirty.insert(tile);
        debug!(tile, %kind, "pawn promoted");

        self.finish_turn(pawn.team)
    }

    fn arm(&mut self, tile: TileId) -> EngineResult<()> {
        let destinations = self.destinations_for(tile)?;
        self.turns.arm(tile);
        if let Some(t) = self.board.tile_mut(tile) {
            t.selected = true;
        }
        self.dirty.insert(tile);
        for &to in destinations.keys() {
            if let Some(t) = self.board.tile_mut(to) {
                t.highlighted = true;
            }
            self.dirty.insert(to);
        }
        Ok(())
    }

    fn clear_marks(&mut self) {
        for tile in self.board.tiles_mut() {
            if tile.selected || tile.highlighted {
                tile.selected = false;
                tile.highlighted = false;
                self.dirty.insert(tile.id);
            }
        }
    }

    /// Applies an already-validated move and settles what follows it.
    fn commit(
        &mut self,
        from: TileId,
        to: TileId,
        path: &ResolvedPath,
    ) -> EngineResult<(Option<PieceKind>, MoveOutcome)> {
        self.clear_marks();
        self.turns.disarm();

        let undo = apply_on_board(&mut self.board, from, to, path)?;
        let mover = undo.moved;
        let captured = undo.captured.map(|(_, piece)| piece);

        self.dirty.insert(from);
        self.dirty.insert(to);
        if let Some((tile, piece)) = undo.captured {
            self.dirty.insert(tile);
            if let Some(owner) = self.turns.player_mut(piece.team) {
                owner.pieces.remove(&piece.id);
            }
        }
        if let Some((rook_from, rook_to, _)) = undo.castled_rook {
            self.dirty.insert(rook_from);
            self.dirty.insert(rook_to);
        }

        self.history.push(MoveRecord {
            ply: self.history.next_ply(),
            team: mover.team,
            kind: mover.kind,
            from,
            to,
            captured: captured.map(|p| p.kind),
            castled: matches!(path.kind, PathKind::Castling { .. }),
            promotion: None,
            played_at: Utc::now(),
        });
        debug!(
            team = %mover.team,
            kind = %mover.kind,
            from,
            to,
            captured = ?captured.map(|p| p.kind),
            "move applied"
        );
        trace!("\n{}", render_board(&self.board));

        if captured.is_some_and(|p| p.kind == PieceKind::King) {
            self.refresh_check_flags();
            let outcome = self.conclude(GameOver::Elimination(mover.team));
            return Ok((captured.map(|p| p.kind), outcome));
        }

        if mover.kind == PieceKind::Pawn && self.is_far_rank(to, mover.direction) {
            self.pending_promotion = Some(to);
            self.refresh_check_flags();
            debug!(tile = to, "promotion pending");
            return Ok((captured.map(|p| p.kind), MoveOutcome::Promotion(to)));
        }

        if self.config.continuation == ContinuationRule::CaptureChain && captured.is_some() {
            let follow_ups = self.destinations_for(to)?;
            if follow_ups.values().any(|p| p.kind.is_capture()) {
                self.refresh_check_flags();
                self.turns.lock(to);
                if let Some(t) = self.board.tile_mut(to) {
                    t.selected = true;
                }
                for (&tile, p) in &follow_ups {
                    if p.kind.is_capture() {
                        if let Some(t) = self.board.tile_mut(tile) {
                            t.highlighted = true;
                        }
                        self.dirty.insert(tile);
                    }
                }
                debug!(tile = to, "capture chain continues");
                return Ok((captured.map(|p| p.kind), MoveOutcome::Continuation(to)));
            }
        }

        let outcome = self.finish_turn(mover.team)?;
        Ok((captured.map(|p| p.kind), outcome))
    }

    fn is_far_rank(&self, tile: TileId, direction: PlayDirection) -> bool {
        let Some((row, _)) = self.board.coordinates(tile) else {
            return false;
        };
        match direction {
            PlayDirection::Forward => row == 0,
            PlayDirection::Backward => row + 1 == self.board.height(),
        }
    }

    /// Passes the turn and evaluates the position for the new current player.
    fn finish_turn(&mut self, mover: Team) -> EngineResult<MoveOutcome> {
        self.clear_marks();
        let expired = self.board.expire_en_passant(mover);
        if !expired.is_empty() {
            trace!(?expired, "en-passant windows closed");
        }
        let next = self.turns.advance();
        self.refresh_check_flags();
        let outcome = self.evaluate(mover, next)?;
        debug!(%next, ?outcome, "turn passed");
        Ok(outcome)
    }

    fn evaluate(&mut self, mover: Team, team: Team) -> EngineResult<MoveOutcome> {
        if self.player(team).is_some_and(|p| p.pieces.is_empty()) {
            return Ok(self.conclude(GameOver::Elimination(mover)));
        }
        if self.is_insufficient_material() {
            return Ok(self.conclude(GameOver::DrawInsufficientMaterial));
        }

        let in_check = is_king_in_check(&self.board, team);
        let can_move = if self.config.filter_self_check {
            has_any_safe_move(&mut self.board, team)?
        } else {
            let sources: Vec<TileId> = self.board.pieces_of(team).map(|(t, _)| t).collect();
            sources
                .into_iter()
                .any(|t| !movement_resolver::legal_destinations(&self.board, t).is_empty())
        };

        let outcome = match (in_check, can_move) {
            (true, false) => self.conclude(GameOver::Checkmate(mover)),
            (false, false) => self.conclude(GameOver::Stalemate),
            (true, true) => MoveOutcome::Check,
            (false, true) => MoveOutcome::Continued,
        };
        if matches!(outcome, MoveOutcome::Check | MoveOutcome::Continued) {
            self.outcomes.push(OutcomeNotice {
                outcome: if in_check {
                    OutcomeKind::Check
                } else {
                    OutcomeKind::Continued
                },
                winning_team: None,
            });
        }
        Ok(outcome)
    }

    /// Every player still holding pieces holds only its king.
    fn is_insufficient_material(&self) -> bool {
        let mut remaining = self.turns.players().filter(|p| !p.pieces.is_empty()).peekable();
        remaining.peek().is_some()
            && remaining.all(|p| {
                p.pieces.len() == 1
                    && self
                        .board
                        .king_tile(p.team)
                        .and_then(|tile| self.board.occupant(tile))
                        .is_some_and(|king| p.pieces.contains(&king.id))
            })
    }

    fn conclude(&mut self, status: GameOver) -> MoveOutcome {
        self.status = status;
        self.turns.disarm();
        let (outcome, notice_kind, winner) = match status {
            GameOver::Checkmate(winner) => (
                MoveOutcome::Checkmate { winner },
                OutcomeKind::Checkmate,
                Some(winner),
            ),
            GameOver::Elimination(winner) => (
                MoveOutcome::Eliminated { winner },
                OutcomeKind::Checkmate,
                Some(winner),
            ),
            GameOver::Stalemate => (MoveOutcome::Stalemate, OutcomeKind::Stalemate, None),
            GameOver::DrawInsufficientMaterial => (MoveOutcome::Draw, OutcomeKind::Draw, None),
            GameOver::None => (MoveOutcome::Continued, OutcomeKind::Continued, None),
        };
        self.outcomes.push(OutcomeNotice {
            outcome: notice_kind,
            winning_team: winner,
        });
        debug!(?status, "game over");
        outcome
    }

    /// Updates every king's `checked` flag from the current board.
    fn refresh_check_flags(&mut self) {
        let teams: Vec<Team> = self.turns.players().map(|p| p.team).collect();
        for team in teams {
            let Some(king) = self.board.king_tile(team) else {
                continue;
            };
            let checked = is_king_in_check(&self.board, team);
            if let Some(piece) = self.board.occupant_mut(king) {
                if piece.checked != checked {
                    piece.checked = checked;
                    self.dirty.insert(king);
                }
            }
        }
    }

    /// Tile changes since the last drain, in tile order, then outcome notices.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        let dirty = std::mem::take(&mut self.dirty);
        let mut out: Vec<Notification> = dirty
            .into_iter()
            .filter_map(|id| self.board.tile(id))
            .map(|tile| Notification::Tile(TileChange::from(tile)))
            .collect();
        out.extend(self.outcomes.drain(..).map(Notification::Outcome));
        out
    }
}
