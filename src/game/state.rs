//! Position state: the game the engine and collaborators operate on.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{
    Board, CastlingRights, Color, Move, Piece, PieceKind, Square, CASTLING_SIDES,
};
use crate::zobrist;

use super::player::Player;

/// Game state machine.
///
/// `ReadyToStart -> InProgress -> {terminal}`; terminal states are absorbing
/// and only an explicit reset returns to `ReadyToStart`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameState {
    ReadyToStart,
    InProgress,
    Checkmate,
    Stalemate,
    DrawBy75MoveRule,
    InsufficientMaterial,
    Timeout,
}

impl GameState {
    /// Returns true for any finished-game state
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameState::Checkmate
                | GameState::Stalemate
                | GameState::DrawBy75MoveRule
                | GameState::InsufficientMaterial
                | GameState::Timeout
        )
    }
}

/// Everything needed to invert one applied move.
///
/// Pushed by `apply_move`, popped by `unapply_move`; the stack length always
/// equals the number of moves played since the game started (or was reset).
#[derive(Clone, Debug)]
pub(crate) struct Snapshot {
    pub(crate) mv: Move,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) state: GameState,
    pub(crate) hash: u64,
    pub(crate) captured: Option<Piece>,
    pub(crate) promoted_pawn: Option<Piece>,
    pub(crate) mover_had_moved: bool,
    pub(crate) valid_moves: Vec<Move>,
}

/// A chess position plus everything needed to play a game on it: side to
/// move, castling rights, en-passant target, move clocks, per-side
/// bookkeeping, the precomputed legal-move list, the incremental Zobrist
/// hash, and the snapshot stack that makes every move reversible.
///
/// Single-threaded and non-reentrant: apply/unapply must be strictly
/// paired on one instance. Search runs on a [`Position::clone_for_search`]
/// copy, never on the live game.
#[derive(Clone, Debug)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) turn: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_count: u32,
    pub(crate) hash: u64,
    pub(crate) valid_moves: Vec<Move>,
    pub(crate) players: [Player; 2],
    pub(crate) state: GameState,
    pub(crate) history: Vec<Snapshot>,
}

impl Position {
    /// Standard starting position, `ReadyToStart`.
    #[must_use]
    pub fn new() -> Self {
        let mut position = Position {
            board: Board::new(),
            turn: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_count: 1,
            hash: 0,
            valid_moves: Vec::new(),
            players: [Player::new(Color::White), Player::new(Color::Black)],
            state: GameState::ReadyToStart,
            history: Vec::new(),
        };
        position.hash = position.compute_hash();
        position.valid_moves = position.generate_legal_moves(Color::White);
        position
    }

    /// Return to the standard starting position and `ReadyToStart`.
    pub fn reset(&mut self) {
        self.board.reset();
        self.turn = Color::White;
        self.castling = CastlingRights::all();
        self.en_passant = None;
        self.halfmove_clock = 0;
        self.fullmove_count = 1;
        self.players[0].reset();
        self.players[1].reset();
        self.state = GameState::ReadyToStart;
        self.history.clear();
        self.hash = self.compute_hash();
        self.valid_moves = self.generate_legal_moves(Color::White);
    }

    /// Begin play: `ReadyToStart -> InProgress`. A position already past
    /// the start is reset first.
    pub fn start(&mut self) {
        if self.state != GameState::ReadyToStart {
            self.reset();
        }
        self.state = GameState::InProgress;
    }

    /// Independent deep copy for the search task.
    #[must_use]
    pub fn clone_for_search(&self) -> Position {
        self.clone()
    }

    /// Current game state
    #[inline]
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Side to move
    #[inline]
    #[must_use]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The board itself
    #[inline]
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Legal moves for the side to move, precomputed after every apply/unapply.
    ///
    /// Callers must not rely on the ordering.
    #[inline]
    #[must_use]
    pub fn legal_moves(&self) -> &[Move] {
        &self.valid_moves
    }

    /// Incrementally maintained Zobrist hash of the position
    #[inline]
    #[must_use]
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_count(&self) -> u32 {
        self.fullmove_count
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// The square skipped by the last double pawn advance, if any
    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns true if the side to move's king is attacked
    #[must_use]
    pub fn is_check(&self) -> bool {
        self.board.is_in_check(self.turn)
    }

    /// Material points the given side has captured so far
    #[must_use]
    pub fn material_score(&self, color: Color) -> i32 {
        self.players[color.index()].score()
    }

    /// Pieces the given side has captured, oldest first
    #[must_use]
    pub fn captured_pieces(&self, color: Color) -> &[PieceKind] {
        self.players[color.index()].captured()
    }

    /// Clock remaining for one side
    #[must_use]
    pub fn time_left(&self, color: Color) -> Duration {
        self.players[color.index()].time_left()
    }

    /// Charge thinking time to one side's clock. Flips the state to
    /// `Timeout` when the clock empties while the game is in progress.
    ///
    /// Never called from search; search clones do not tick clocks.
    pub fn consume_time(&mut self, color: Color, elapsed: Duration) {
        if self.state != GameState::InProgress {
            return;
        }
        if self.players[color.index()].consume_time(elapsed).is_zero() {
            self.state = GameState::Timeout;
        }
    }

    /// Look up the legal move matching the given coordinates and promotion
    /// choice, the lookup GUI and network collaborators drive moves with.
    #[must_use]
    pub fn find_move(
        &self,
        origin: Square,
        destination: Square,
        promotion: Option<PieceKind>,
    ) -> Option<Move> {
        self.valid_moves
            .iter()
            .find(|m| m.origin == origin && m.destination == destination && m.promotion == promotion)
            .copied()
    }

    /// Full-board hash recomputation; the incremental updates in
    /// `apply_move` must always agree with this.
    pub(crate) fn compute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for piece in self.board.pieces() {
            hash ^= zobrist::piece_key(piece.kind, piece.color, piece.square);
        }
        if self.turn == Color::White {
            hash ^= zobrist::side_to_move_key();
        }
        for (color, kingside) in CASTLING_SIDES {
            if self.castling.has(color, kingside) {
                hash ^= zobrist::castling_key(color, kingside);
            }
        }
        if let Some(ep) = self.en_passant {
            hash ^= zobrist::en_passant_key(ep.file());
        }
        hash
    }

    /// Re-evaluate terminal conditions after a move. Leaves `InProgress`
    /// untouched when the game goes on.
    pub(crate) fn update_state(&mut self) {
        if self.valid_moves.is_empty() {
            self.state = if self.board.is_in_check(self.turn) {
                GameState::Checkmate
            } else {
                GameState::Stalemate
            };
        } else if self.halfmove_clock >= 75 {
            self.state = GameState::DrawBy75MoveRule;
        } else if self.insufficient_material() {
            self.state = GameState::InsufficientMaterial;
        }
    }

    /// Closed-form insufficient-material check: no sequence of legal moves
    /// can deliver checkmate, even with cooperation.
    #[must_use]
    pub fn insufficient_material(&self) -> bool {
        let mut minors: [Vec<Piece>; 2] = [Vec::new(), Vec::new()];
        for piece in self.board.pieces() {
            match piece.kind {
                PieceKind::King => {}
                PieceKind::Bishop | PieceKind::Knight => {
                    minors[piece.color.index()].push(piece);
                }
                // Any pawn, rook or queen is mating material
                _ => return false,
            }
        }

        if minors[0].len() >= 2 || minors[1].len() >= 2 {
            return false;
        }

        match (minors[0].first(), minors[1].first()) {
            // Bare kings, or king + one minor vs bare king
            (None, None) | (Some(_), None) | (None, Some(_)) => true,
            (Some(a), Some(b)) => match (a.kind, b.kind) {
                (PieceKind::Knight, PieceKind::Knight) => true,
                (PieceKind::Bishop, PieceKind::Knight)
                | (PieceKind::Knight, PieceKind::Bishop) => true,
                // Bishops can only cooperate on a mate when they disagree
                // about square color
                _ => a.square.is_light() == b.square.is_light(),
            },
        }
    }

    /// Seed both players' capture scores from the material actually on the
    /// board (used when setting up a position from FEN mid-game).
    pub(crate) fn seed_material_scores(&mut self) {
        let remaining = |color: Color| -> i32 {
            self.board
                .pieces_of(color)
                .filter(|p| p.kind != PieceKind::King)
                .map(|p| p.kind.value())
                .sum()
        };
        let white_remaining = remaining(Color::White);
        let black_remaining = remaining(Color::Black);
        self.players[Color::White.index()].seed_score(black_remaining);
        self.players[Color::Black.index()].seed_score(white_remaining);
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}
