//! Terminal-oriented Unicode board renderer.
//!
//! Used for trace logging and test diagnostics. Row 0 is printed first, so a
//! standard game shows Dark at the top.

use crate::board::tile_graph::Board;
use crate::game_state::chess_types::{Piece, PieceKind, Team};

/// Render the board to a Unicode string for terminal output.
///
/// Files are lettered from `a`; boards wider than 26 columns fall back to `?`.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    let files = file_header(board.width());
    let label_width = board.height().to_string().len();

    out.push_str(&" ".repeat(label_width + 1));
    out.push_str(&files);
    out.push('\n');

    for row in 0..board.height() {
        let rank = board.height() - row;
        out.push_str(&format!("{rank:>label_width$} "));

        for col in 0..board.width() {
            let glyph = board
                .tile_at(row, col)
                .and_then(|id| board.occupant(id))
                .map(piece_to_unicode)
                .unwrap_or('·');
            out.push(glyph);
            if col + 1 < board.width() {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push_str(&rank.to_string());
        out.push('\n');
    }

    out.push_str(&" ".repeat(label_width + 1));
    out.push_str(&files);
    out
}

fn file_header(width: usize) -> String {
    (0..width)
        .map(|col| {
            u8::try_from(col)
                .ok()
                .filter(|c| *c < 26)
                .map(|c| char::from(b'a' + c))
                .unwrap_or('?')
        })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

fn piece_to_unicode(piece: &Piece) -> char {
    match (piece.team, piece.kind) {
        (Team::Light, PieceKind::Pawn) => '♙',
        (Team::Light, PieceKind::Knight) => '♘',
        (Team::Light, PieceKind::Bishop) => '♗',
        (Team::Light, PieceKind::Rook) => '♖',
        (Team::Light, PieceKind::Queen) => '♕',
        (Team::Light, PieceKind::King) => '♔',
        (Team::Dark, PieceKind::Pawn) => '♟',
        (Team::Dark, PieceKind::Knight) => '♞',
        (Team::Dark, PieceKind::Bishop) => '♝',
        (Team::Dark, PieceKind::Rook) => '♜',
        (Team::Dark, PieceKind::Queen) => '♛',
        (Team::Dark, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;

    #[test]
    fn standard_board_renders_dark_on_top() {
        let game = GameState::standard().expect("standard game");
        let text = render_board(game.board());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "  a b c d e f g h");
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[4], "5 · · · · · · · · 5");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
    }

    #[test]
    fn narrow_board_uses_its_own_width() {
        let board = Board::build(3, 2).expect("board should build");
        assert_eq!(render_board(&board), "  a b c\n2 · · · 2\n1 · · · 1\n  a b c");
    }
}
