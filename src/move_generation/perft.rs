//! Move-path enumeration for correctness checks and benchmarks.
//!
//! Walks every legal move sequence to `depth` plies through the public
//! `GameState` API. Each promotion counts once per promotion choice.

use crate::errors::EngineResult;
use crate::game_state::chess_rules::PROMOTION_CHOICES;
use crate::game_state::game_state::{GameState, MoveOutcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(game: &GameState, depth: u8) -> EngineResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for (from, to) in game.legal_moves()? {
        let landing_was_empty = game.board().occupant(to).is_none();
        let mut child = game.clone();
        match child.apply_move(from, to)? {
            MoveOutcome::Promotion(_) => {
                for kind in PROMOTION_CHOICES {
                    let mut promoted = child.clone();
                    let outcome = promoted.choose_promotion(kind)?;
                    descend(&mut total, &promoted, outcome, landing_was_empty, depth)?;
                }
            }
            outcome => descend(&mut total, &child, outcome, landing_was_empty, depth)?,
        }
    }
    Ok(total)
}

fn descend(
    total: &mut PerftCounts,
    child: &GameState,
    outcome: MoveOutcome,
    landing_was_empty: bool,
    depth: u8,
) -> EngineResult<()> {
    if depth > 1 {
        total.merge(perft(child, depth - 1)?);
        return Ok(());
    }

    total.nodes += 1;
    if let Some(record) = child.history().last() {
        if record.captured.is_some() {
            total.captures += 1;
            if landing_was_empty {
                total.en_passant += 1;
            }
        }
        if record.castled {
            total.castles += 1;
        }
        if record.promotion.is_some() {
            total.promotions += 1;
        }
    }
    match outcome {
        MoveOutcome::Check => total.checks += 1,
        MoveOutcome::Checkmate { .. } => {
            total.checks += 1;
            total.checkmates += 1;
        }
        _ => {}
    }
    Ok(())
}
