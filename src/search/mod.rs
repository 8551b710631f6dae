//! Adversarial search: iterative-deepening alpha-beta with a transposition
//! table and static move ordering.
//!
//! The engine owns its transposition table and node counters; independent
//! engines (one per game, or one per test) never interfere. It always works
//! on a [`Position::clone_for_search`] copy, mutating it through apply and
//! unapply while exploring, so the live game is never touched.

mod eval;
mod pst;
pub mod tt;
mod worker;

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};

use crate::board::{Color, Move, MoveKind};
use crate::game::{GameState, Position};

pub use eval::{evaluate, MATE_SCORE};
pub use tt::{BoundType, TranspositionTable, TtEntry};
pub use worker::{SearchHandle, SearchWorker};

/// Default iterative-deepening depth cap
pub const DEFAULT_MAX_DEPTH: u8 = 4;

const ALPHA_START: i32 = -1_000_000;
const BETA_START: i32 = 1_000_000;

/// Static move-ordering score: promotions first, then castles, then
/// captures. Ties keep their list order (the sort is stable).
fn move_score(mv: &Move) -> i32 {
    match mv.kind {
        MoveKind::PromotionNormal | MoveKind::PromotionCapture => 3,
        MoveKind::Castle => 2,
        MoveKind::Capture | MoveKind::EnPassant => 1,
        MoveKind::Normal => 0,
    }
}

/// Order the current legal moves for searching: heuristic sort, with the
/// transposition-table move (if it is still legal here) moved to the front.
fn ordered_moves(game: &Position, tt_move: Option<Move>) -> Vec<Move> {
    let mut moves = game.legal_moves().to_vec();
    moves.sort_by(|a, b| move_score(b).cmp(&move_score(a)));
    if let Some(mv) = tt_move {
        if let Some(idx) = moves.iter().position(|m| *m == mv) {
            moves.remove(idx);
            moves.insert(0, mv);
        }
    }
    moves
}

/// Depth-limited minimax with alpha-beta pruning and a transposition table.
pub struct SearchEngine {
    tt: TranspositionTable,
    nodes_visited: u64,
}

impl SearchEngine {
    #[must_use]
    pub fn new() -> Self {
        SearchEngine {
            tt: TranspositionTable::new(),
            nodes_visited: 0,
        }
    }

    /// Nodes visited by the most recent search
    #[must_use]
    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    /// The engine's transposition table
    #[must_use]
    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Forget everything cached from previous searches
    pub fn reset(&mut self) {
        self.tt.clear();
        self.nodes_visited = 0;
    }

    /// Pick the best move for the side to move, deepening iteratively from
    /// 1 to `max_depth` plies. Returns `None` when no legal move exists.
    pub fn find_best_move(&mut self, position: &Position, max_depth: u8) -> Option<Move> {
        self.deepen(position, max_depth, None)
    }

    /// Like [`SearchEngine::find_best_move`], but checks the stop flag
    /// between depth increments. A cancelled search returns `None` so the
    /// caller publishes nothing.
    pub fn find_best_move_cancellable(
        &mut self,
        position: &Position,
        max_depth: u8,
        stop: &AtomicBool,
    ) -> Option<Move> {
        self.deepen(position, max_depth, Some(stop))
    }

    /// Evaluate a position to a fixed depth with a full window, without
    /// iterative deepening. Positive favors White.
    pub fn search_score(&mut self, position: &Position, depth: u8) -> i32 {
        let mut game = Self::search_copy(position);
        let maximizing = game.turn() == Color::White;
        self.alpha_beta(&mut game, ALPHA_START, BETA_START, 0, maximizing, depth)
    }

    fn search_copy(position: &Position) -> Position {
        let mut game = position.clone_for_search();
        if game.state() == GameState::ReadyToStart {
            game.start();
        }
        game
    }

    fn deepen(
        &mut self,
        position: &Position,
        max_depth: u8,
        stop: Option<&AtomicBool>,
    ) -> Option<Move> {
        if position.legal_moves().is_empty() {
            return None;
        }
        let mut game = Self::search_copy(position);
        if game.state() != GameState::InProgress {
            return None;
        }

        let maximizing = game.turn() == Color::White;
        self.nodes_visited = 0;
        let mut best = None;

        for depth in 1..=max_depth.max(1) {
            if let Some(flag) = stop {
                if flag.load(Ordering::Relaxed) {
                    debug!("search cancelled before depth {depth}");
                    return None;
                }
            }
            best = self.root_search(&mut game, maximizing, depth);
            debug!(
                "depth {depth} done: best {} ({} nodes so far)",
                best.map_or_else(|| "-".to_string(), |m| m.to_string()),
                self.nodes_visited
            );
        }

        info!(
            "search finished at depth {max_depth}: best {} after {} nodes",
            best.map_or_else(|| "-".to_string(), |m| m.to_string()),
            self.nodes_visited
        );
        best
    }

    /// One root iteration at a fixed depth: standard alpha-beta root
    /// bookkeeping over the ordered legal moves.
    fn root_search(&mut self, game: &mut Position, maximizing: bool, max_depth: u8) -> Option<Move> {
        let mut alpha = ALPHA_START;
        let mut beta = BETA_START;
        let (original_alpha, original_beta) = (alpha, beta);

        let hash = game.zobrist_hash();
        let tt_move = self.tt.probe(hash).and_then(|entry| entry.best_move);
        let moves = ordered_moves(game, tt_move);

        let mut best = None;
        for mv in &moves {
            game.apply_move_inner(*mv);
            let score = self.alpha_beta(game, alpha, beta, 1, !maximizing, max_depth);
            game.unapply_move();

            if maximizing {
                if score > alpha {
                    alpha = score;
                    best = Some(*mv);
                }
            } else if score < beta {
                beta = score;
                best = Some(*mv);
            }

            if alpha >= beta {
                break;
            }
        }

        // Every real score beats the starting window, so a scan over a
        // non-empty list always selects something.
        let best = best.or_else(|| moves.first().copied());

        let score = if maximizing { alpha } else { beta };
        let bound = BoundType::classify(score, original_alpha, original_beta);
        self.tt.store(hash, score, best, max_depth, bound);
        best
    }

    /// Recursive alpha-beta. `depth` counts plies already played from the
    /// root; transposition-table entries are keyed on the depth still
    /// remaining below the node.
    fn alpha_beta(
        &mut self,
        game: &mut Position,
        mut alpha: i32,
        mut beta: i32,
        depth: u8,
        maximizing: bool,
        max_depth: u8,
    ) -> i32 {
        self.nodes_visited += 1;

        let hash = game.zobrist_hash();
        let remaining = max_depth.saturating_sub(depth);

        let mut tt_move = None;
        if let Some(entry) = self.tt.probe(hash) {
            tt_move = entry.best_move;
            if entry.depth >= remaining {
                match entry.bound {
                    BoundType::Exact => return entry.score,
                    BoundType::LowerBound => alpha = alpha.max(entry.score),
                    BoundType::UpperBound => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    return if maximizing { alpha } else { beta };
                }
            }
        }

        if depth == max_depth || game.state() != GameState::InProgress {
            return evaluate(game);
        }

        let (original_alpha, original_beta) = (alpha, beta);
        let moves = ordered_moves(game, tt_move);
        let mut best = None;

        for mv in &moves {
            game.apply_move_inner(*mv);
            let score = self.alpha_beta(game, alpha, beta, depth + 1, !maximizing, max_depth);
            game.unapply_move();

            if maximizing {
                if score > alpha {
                    alpha = score;
                    best = Some(*mv);
                }
            } else if score < beta {
                beta = score;
                best = Some(*mv);
            }

            if alpha >= beta {
                break;
            }
        }

        let score = if maximizing { alpha } else { beta };
        let bound = BoundType::classify(score, original_alpha, original_beta);
        self.tt.store(hash, score, best, remaining, bound);
        score
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    #[test]
    fn test_no_move_on_empty_legal_list() {
        let position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(position.legal_moves().is_empty());
        let mut engine = SearchEngine::new();
        assert_eq!(engine.find_best_move(&position, 3), None);
    }

    #[test]
    fn test_move_ordering_prefers_promotions() {
        let position =
            Position::from_fen("4k3/P7/8/8/8/8/6p1/R3K2R w KQ - 0 1").unwrap();
        let moves = ordered_moves(&position, None);
        assert!(moves[0].is_promotion());
        let first_castle = moves.iter().position(|m| m.is_castle()).unwrap();
        let first_normal = moves
            .iter()
            .position(|m| m.kind == MoveKind::Normal)
            .unwrap();
        assert!(first_castle < first_normal);
    }

    #[test]
    fn test_tt_move_goes_first() {
        let mut position = Position::new();
        position.start();
        let quiet = position
            .find_move("e2".parse().unwrap(), "e4".parse().unwrap(), None)
            .unwrap();
        let moves = ordered_moves(&position, Some(quiet));
        assert_eq!(moves[0], quiet);
    }

    #[test]
    fn test_takes_free_queen() {
        // White rook can capture an undefended queen
        let position = Position::from_fen("3q3k/8/8/8/8/8/8/3R3K w - - 0 1").unwrap();
        let mut engine = SearchEngine::new();
        let best = engine.find_best_move(&position, 3).unwrap();
        assert_eq!(best.origin, Square(7, 3));
        assert_eq!(best.destination, Square(0, 3));
        assert!(best.is_capture());
    }

    #[test]
    fn test_search_leaves_position_untouched() {
        let position = Position::from_fen("3q3k/8/8/8/8/8/8/3R3K w - - 0 1").unwrap();
        let hash = position.zobrist_hash();
        let fen = position.to_fen();
        let mut engine = SearchEngine::new();
        engine.find_best_move(&position, 3);
        assert_eq!(position.zobrist_hash(), hash);
        assert_eq!(position.to_fen(), fen);
    }

    #[test]
    fn test_cancelled_search_returns_nothing() {
        let mut position = Position::new();
        position.start();
        let stop = AtomicBool::new(true);
        let mut engine = SearchEngine::new();
        assert_eq!(
            engine.find_best_move_cancellable(&position, 4, &stop),
            None
        );
    }

    #[test]
    fn test_root_stores_entry_for_position() {
        let mut position = Position::new();
        position.start();
        let mut engine = SearchEngine::new();
        engine.find_best_move(&position, 2);
        let entry = engine
            .transposition_table()
            .probe(position.zobrist_hash())
            .expect("root entry stored");
        assert_eq!(entry.depth, 2);
        assert!(entry.best_move.is_some());
    }
}
