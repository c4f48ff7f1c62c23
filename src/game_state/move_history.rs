//! Record of accepted moves in play order.

use chrono::{DateTime, Utc};

use crate::game_state::chess_types::{PieceKind, Team, TileId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// 1-based count of accepted moves.
    pub ply: u32,
    pub team: Team,
    pub kind: PieceKind,
    pub from: TileId,
    pub to: TileId,
    pub captured: Option<PieceKind>,
    pub castled: bool,
    pub promotion: Option<PieceKind>,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_ply(&self) -> u32 {
        self.records.len() as u32 + 1
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    /// Stamps the promotion onto the most recent move.
    pub fn record_promotion(&mut self, kind: PieceKind) {
        if let Some(last) = self.records.last_mut() {
            last.promotion = Some(kind);
        }
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Time between the first and last recorded move.
    pub fn elapsed(&self) -> chrono::Duration {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => last.played_at - first.played_at,
            _ => chrono::Duration::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ply: u32, played_at: DateTime<Utc>) -> MoveRecord {
        MoveRecord {
            ply,
            team: Team::Light,
            kind: PieceKind::Pawn,
            from: 52,
            to: 36,
            captured: None,
            castled: false,
            promotion: None,
            played_at,
        }
    }

    #[test]
    fn plies_count_from_one_and_promotion_stamps_last() {
        let mut history = MoveHistory::new();
        assert_eq!(history.next_ply(), 1);
        let start = Utc::now();
        history.push(record(1, start));
        history.push(record(2, start + chrono::Duration::seconds(3)));
        assert_eq!(history.next_ply(), 3);

        history.record_promotion(PieceKind::Queen);
        assert_eq!(history.records()[0].promotion, None);
        assert_eq!(history.last().and_then(|r| r.promotion), Some(PieceKind::Queen));
        assert_eq!(history.elapsed(), chrono::Duration::seconds(3));
    }

    #[test]
    fn empty_history_has_zero_elapsed() {
        let history = MoveHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.elapsed(), chrono::Duration::zero());
    }
}
