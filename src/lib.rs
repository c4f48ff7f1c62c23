//! Crate root module declarations for the tile-graph chess rule engine.
//!
//! The board is a graph of tiles linked in four directions; movement is
//! expressed as relative step paths resolved over that graph. `GameState`
//! is the entry point for callers: it accepts tile clicks or direct move
//! requests and reports outcomes and tile changes as plain values.

pub mod errors;

pub mod board {
    pub mod tile;
    pub mod tile_graph;
}

pub mod moves {
    pub mod movement_catalog;
    pub mod steps;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod movement_resolver;
    pub mod perft;
}

pub mod turn {
    pub mod turn_controller;
}

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_config;
    pub mod game_state;
    pub mod move_history;
    pub mod notifications;
}

pub mod engines {
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod render_game_state;
}
