//! Reversible move application at the game level.
//!
//! `apply_move` validates against the precomputed legal list, updates rights
//! and clocks, keeps the Zobrist hash incrementally consistent, regenerates
//! the legal-move list for the new side to move, re-evaluates terminal
//! conditions, and pushes a snapshot. `unapply_move` inverts all of it
//! exactly, restoring the pre-move hash bit for bit.

use crate::board::{Color, Move, MoveKind, PieceKind, Square, CASTLING_SIDES};
use crate::zobrist;

use super::error::GameError;
use super::state::{GameState, Position, Snapshot};

impl Position {
    /// Validate and apply a move for the side to move.
    ///
    /// Fails with [`GameError::GameNotInProgress`] before touching anything
    /// when the game is not running, and with [`GameError::InvalidMove`]
    /// when the move is not in the current legal list. On error the
    /// position is unchanged.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), GameError> {
        if self.state != GameState::InProgress {
            return Err(GameError::GameNotInProgress);
        }
        if !self.valid_moves.contains(&mv) {
            return Err(GameError::InvalidMove);
        }
        self.apply_move_inner(mv);
        Ok(())
    }

    /// Apply a move known to be a member of the current legal list.
    ///
    /// Search and perft call this directly on positions they drive
    /// themselves; the public entry point is [`Position::apply_move`].
    pub(crate) fn apply_move_inner(&mut self, mv: Move) {
        let turn = self.turn;
        let mover = self
            .board
            .piece_at(mv.origin)
            .expect("apply_move: legal move from an empty square");

        let prior_castling = self.castling;
        let prior_en_passant = self.en_passant;
        let prior_halfmove = self.halfmove_clock;
        let prior_state = self.state;
        let prior_hash = self.hash;
        let prior_moves = std::mem::take(&mut self.valid_moves);

        if mover.kind == PieceKind::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if turn == Color::Black {
            self.fullmove_count += 1;
        }

        let (promoted_pawn, captured) = self.board.apply_move(&mv);

        let mut hash = self.hash;
        hash ^= zobrist::piece_key(mover.kind, turn, mv.origin);
        let placed_kind = mv.promotion.unwrap_or(mover.kind);
        hash ^= zobrist::piece_key(placed_kind, turn, mv.destination);
        if let Some(piece) = captured {
            hash ^= zobrist::piece_key(piece.kind, piece.color, piece.square);
        }
        if mv.kind == MoveKind::Castle {
            let rank = mv.origin.rank();
            let (rook_from, rook_to) = if mv.destination.file() == 6 {
                (7, 5)
            } else {
                (0, 3)
            };
            hash ^= zobrist::piece_key(PieceKind::Rook, turn, Square(rank, rook_from));
            hash ^= zobrist::piece_key(PieceKind::Rook, turn, Square(rank, rook_to));
        }

        if let Some(piece) = captured {
            self.players[turn.index()].record_capture(piece.kind);
        }
        if let Some(kind) = mv.promotion {
            self.players[turn.index()].record_promotion(kind);
        }

        self.revoke_castling_rights(turn, &mv, mover.kind, captured.map(|p| (p.color, p.kind, p.square)));
        for (color, kingside) in CASTLING_SIDES {
            if prior_castling.has(color, kingside) != self.castling.has(color, kingside) {
                hash ^= zobrist::castling_key(color, kingside);
            }
        }

        // A double pawn advance opens a one-move en-passant window on the
        // square it skipped; anything else closes any open window.
        let new_en_passant = if mover.kind == PieceKind::Pawn
            && mv.origin.rank().abs_diff(mv.destination.rank()) == 2
        {
            Some(Square(
                (mv.origin.rank() + mv.destination.rank()) / 2,
                mv.origin.file(),
            ))
        } else {
            None
        };
        if prior_en_passant.map(Square::file) != new_en_passant.map(Square::file) {
            if let Some(ep) = prior_en_passant {
                hash ^= zobrist::en_passant_key(ep.file());
            }
            if let Some(ep) = new_en_passant {
                hash ^= zobrist::en_passant_key(ep.file());
            }
        }
        self.en_passant = new_en_passant;

        hash ^= zobrist::side_to_move_key();

        self.turn = turn.opponent();
        self.hash = hash;
        self.valid_moves = self.generate_legal_moves(self.turn);
        self.update_state();

        self.history.push(Snapshot {
            mv,
            castling: prior_castling,
            en_passant: prior_en_passant,
            halfmove_clock: prior_halfmove,
            state: prior_state,
            hash: prior_hash,
            captured,
            promoted_pawn,
            mover_had_moved: mover.moved,
            valid_moves: prior_moves,
        });
    }

    /// Undo the last applied move, restoring the position exactly.
    /// No-op when there is nothing to undo.
    pub fn unapply_move(&mut self) {
        let Some(snapshot) = self.history.pop() else {
            return;
        };

        self.turn = self.turn.opponent();
        if self.turn == Color::Black {
            self.fullmove_count -= 1;
        }

        self.board
            .undo_move(&snapshot.mv, snapshot.promoted_pawn, snapshot.captured);
        self.board
            .set_moved(snapshot.mv.origin, snapshot.mover_had_moved);

        if let Some(piece) = snapshot.captured {
            self.players[self.turn.index()].undo_capture(piece.kind);
        }
        if let Some(kind) = snapshot.mv.promotion {
            self.players[self.turn.index()].undo_promotion(kind);
        }

        self.castling = snapshot.castling;
        self.en_passant = snapshot.en_passant;
        self.halfmove_clock = snapshot.halfmove_clock;
        self.state = snapshot.state;
        self.hash = snapshot.hash;
        self.valid_moves = snapshot.valid_moves;
    }

    /// Rights are revoked when the king moves, a rook leaves its home
    /// square, or a capture lands on an enemy rook's home square. They
    /// never come back except through snapshot restore in undo.
    fn revoke_castling_rights(
        &mut self,
        turn: Color,
        mv: &Move,
        mover_kind: PieceKind,
        captured: Option<(Color, PieceKind, Square)>,
    ) {
        match mover_kind {
            PieceKind::King => {
                self.castling.revoke(turn, true);
                self.castling.revoke(turn, false);
            }
            PieceKind::Rook => {
                let rank = turn.back_rank();
                if mv.origin == Square(rank, 0) {
                    self.castling.revoke(turn, false);
                } else if mv.origin == Square(rank, 7) {
                    self.castling.revoke(turn, true);
                }
            }
            _ => {}
        }

        if let Some((color, PieceKind::Rook, square)) = captured {
            let rank = color.back_rank();
            if square == Square(rank, 0) {
                self.castling.revoke(color, false);
            } else if square == Square(rank, 7) {
                self.castling.revoke(color, true);
            }
        }
    }
}
