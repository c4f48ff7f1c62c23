//! Canonical chess-rule constants and the standard starting dataset.

use crate::game_state::chess_types::PieceKind;

pub const STANDARD_WIDTH: usize = 8;
pub const STANDARD_HEIGHT: usize = 8;

/// Home rank from file 0 to file 7.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// One piece of a starting dataset. `rank` counts from the owner's home edge;
/// `file` is absolute so both sides' queens share a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind: PieceKind,
    pub rank: usize,
    pub file: usize,
}

pub type PieceDataset = Vec<Placement>;

/// The 16-piece set: back rank on rank 0, pawns on rank 1.
pub fn standard_dataset() -> PieceDataset {
    let back = BACK_RANK.iter().enumerate().map(|(file, &kind)| Placement {
        kind,
        rank: 0,
        file,
    });
    let pawns = (0..STANDARD_WIDTH).map(|file| Placement {
        kind: PieceKind::Pawn,
        rank: 1,
        file,
    });
    back.chain(pawns).collect()
}
