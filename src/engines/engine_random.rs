//! Random-move engine.
//!
//! Selects uniformly from legal moves and always promotes to a queen. Used for
//! diagnostics and randomized self-play tests.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::{ConfigurationError, EngineResult};
use crate::game_state::chess_types::PieceKind;
use crate::game_state::game_state::GameState;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible move sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "TileChess Random"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigurationError> {
        if name.eq_ignore_ascii_case("Seed") {
            let seed = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigurationError::InvalidOptionValue {
                    name: name.to_owned(),
                    value: value.to_owned(),
                })?;
            self.rng = StdRng::seed_from_u64(seed);
            return Ok(());
        }
        Err(ConfigurationError::UnknownOption(name.to_owned()))
    }

    fn choose_move(&mut self, game_state: &GameState) -> EngineResult<EngineOutput> {
        let legal_moves = game_state.legal_moves()?;

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        out.best_move = legal_moves.as_slice().choose(&mut self.rng).copied();
        out.promotion = Some(PieceKind::Queen);
        debug!(candidates = legal_moves.len(), picked = ?out.best_move, "random move chosen");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::Placement;

    fn place(kind: PieceKind, rank: usize, file: usize) -> Placement {
        Placement { kind, rank, file }
    }

    #[test]
    fn same_seed_picks_same_move() {
        let game = GameState::standard().expect("standard game");
        let mut a = RandomEngine::seeded(7);
        let mut b = RandomEngine::seeded(7);
        let first = a.choose_move(&game).expect("engine should choose");
        let second = b.choose_move(&game).expect("engine should choose");
        assert!(first.best_move.is_some());
        assert_eq!(first.best_move, second.best_move);

        let (from, to) = first.best_move.expect("move picked");
        assert!(game
            .legal_destinations(from)
            .expect("resolves")
            .contains_key(&to));
    }

    #[test]
    fn seed_option_is_parsed() {
        let mut engine = RandomEngine::new();
        assert!(engine.set_option("seed", " 42 ").is_ok());
        assert!(matches!(
            engine.set_option("Seed", "forty-two"),
            Err(ConfigurationError::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            engine.set_option("Depth", "3"),
            Err(ConfigurationError::UnknownOption(_))
        ));
    }

    #[test]
    fn no_move_when_game_is_over() {
        use crate::game_state::chess_types::Team;
        use crate::game_state::game_config::GameConfig;

        let mut game = GameState::new(GameConfig::default()).expect("game should build");
        let light = [
            place(PieceKind::King, 0, 7),
            place(PieceKind::Queen, 4, 1),
        ];
        let dark = [place(PieceKind::King, 0, 0)];
        game.populate_player(Team::Light, &light).expect("light placement");
        game.populate_player(Team::Dark, &dark).expect("dark placement");
        let b5 = game.board().tile_at(3, 1).expect("tile");
        let b6 = game.board().tile_at(2, 1).expect("tile");
        game.apply_move(b5, b6).expect("move");

        let mut engine = RandomEngine::seeded(1);
        assert_eq!(engine.choose_move(&game).expect("engine").best_move, None);
    }
}
