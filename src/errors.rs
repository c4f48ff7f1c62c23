//! Errors used throughout the rule engine.
//!
//! Construction and setup failures surface as `EngineError`; they are fatal
//! for the game being built. Illegal move attempts are a normal part of play
//! and are reported as `IllegalMoveRequest` values inside the action and
//! outcome types instead of crossing the engine boundary as errors.

use thiserror::Error;

use crate::game_state::chess_types::{PieceKind, Team, TileId};

pub type EngineResult<T> = Result<T, EngineError>;

/// Crate-wide error for fallible setup and internal consistency checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// Invalid caller-supplied setup. The engine does not start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("team {0} has no seat in the turn rotation")]
    UnknownTeam(Team),
    #[error("the turn rotation has no seats")]
    NoSeats,
    #[error("team {0} is seated twice")]
    DuplicateSeat(Team),
    #[error("{kind} placement at rank {rank}, file {file} is off the board")]
    PlacementOffBoard {
        kind: PieceKind,
        rank: usize,
        file: usize,
    },
    #[error("tile {0} is already occupied")]
    PlacementOccupied(TileId),
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("invalid value `{value}` for option `{name}`")]
    InvalidOptionValue { name: String, value: String },
}

/// Internal corruption. Indicates a construction or bookkeeping bug.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("tile stored in slot {slot} claims id {id}")]
    TileIdMismatch { slot: usize, id: TileId },
    #[error("tile {from} links to {to} but the reverse link is missing")]
    AsymmetricNeighbor { from: TileId, to: TileId },
    #[error("expected a piece on tile {0}")]
    MissingPiece(TileId),
    #[error("tile {0} does not exist")]
    UnknownTile(TileId),
}

/// Rejected player input. State is left unchanged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveRequest {
    #[error("tile {0} does not exist")]
    UnknownTile(TileId),
    #[error("tile {0} holds no piece of the current player")]
    NotCurrentPlayersPiece(TileId),
    #[error("tile {to} is not a legal destination from tile {from}")]
    UnreachableDestination { from: TileId, to: TileId },
    #[error("promotion on tile {0} must be resolved first")]
    PromotionPending(TileId),
    #[error("no promotion is pending")]
    NoPromotionPending,
    #[error("cannot promote into a {0}")]
    InvalidPromotionKind(PieceKind),
    #[error("the piece on tile {0} must continue capturing or end its turn")]
    ContinuationLocked(TileId),
    #[error("the game is over")]
    GameOver,
}
