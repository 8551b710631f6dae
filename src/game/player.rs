//! Per-side bookkeeping: captured material, score, and the clock.

use std::time::Duration;

use crate::board::{Color, PieceKind};

/// Starting clock budget per side
pub(crate) const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(600);

/// One side's running tally: points for material captured, the captured
/// pieces themselves in capture order, and the time remaining on the clock.
#[derive(Clone, Debug)]
pub struct Player {
    color: Color,
    score: i32,
    captured: Vec<PieceKind>,
    time_left: Duration,
}

impl Player {
    pub(crate) fn new(color: Color) -> Self {
        Player {
            color,
            score: 0,
            captured: Vec::new(),
            time_left: DEFAULT_TIME_BUDGET,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.score = 0;
        self.captured.clear();
        self.time_left = DEFAULT_TIME_BUDGET;
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Material points captured so far (P=1, N/B=3, R=5, Q=10)
    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Captured piece kinds, oldest first
    #[must_use]
    pub fn captured(&self) -> &[PieceKind] {
        &self.captured
    }

    #[must_use]
    pub fn time_left(&self) -> Duration {
        self.time_left
    }

    pub(crate) fn consume_time(&mut self, elapsed: Duration) -> Duration {
        self.time_left = self.time_left.saturating_sub(elapsed);
        self.time_left
    }

    pub(crate) fn record_capture(&mut self, kind: PieceKind) {
        self.score += kind.value();
        self.captured.push(kind);
    }

    pub(crate) fn undo_capture(&mut self, kind: PieceKind) {
        self.score -= kind.value();
        self.captured.pop();
    }

    /// A promotion trades a pawn for the promoted piece
    pub(crate) fn record_promotion(&mut self, kind: PieceKind) {
        self.score += kind.value() - PieceKind::Pawn.value();
    }

    pub(crate) fn undo_promotion(&mut self, kind: PieceKind) {
        self.score -= kind.value() - PieceKind::Pawn.value();
    }

    /// Seed the score from a position set up mid-game: everything missing
    /// from the opponent's full set counts as captured by this side.
    pub(crate) fn seed_score(&mut self, opponent_material_on_board: i32) {
        const FULL_SET: i32 = 8 + 3 * 2 + 3 * 2 + 5 * 2 + 10;
        self.score = (FULL_SET - opponent_material_on_board).max(0);
    }
}
