//! Legal-move assembly: pseudo-legal moves filtered by king safety, plus
//! en passant and castling reconstructed from game context.

use crate::board::{Color, Move, MoveKind, PieceKind, Square};

use super::state::Position;

impl Position {
    /// Compute the full legal-move list for `turn` in the current position.
    ///
    /// Every pseudo-legal candidate is simulated on the board
    /// (apply, check own king, undo) and kept only when the king stays safe.
    pub(crate) fn generate_legal_moves(&mut self, turn: Color) -> Vec<Move> {
        let mut legal = Vec::new();

        for mv in self.board.pseudo_legal_moves_for(turn) {
            if self.king_safe_after(turn, &mv) {
                legal.push(mv);
            }
        }

        self.push_en_passant_moves(turn, &mut legal);
        self.push_castling_moves(turn, &mut legal);

        legal
    }

    /// Simulate a move mechanically and report whether `turn`'s king is
    /// left unattacked.
    fn king_safe_after(&mut self, turn: Color, mv: &Move) -> bool {
        let (promoted_pawn, captured) = self.board.apply_move(mv);
        let safe = !self.board.is_in_check(turn);
        self.board.undo_move(mv, promoted_pawn, captured);
        safe
    }

    /// Reconstruct en-passant captures from the target square: for each
    /// file adjacent to it, a `turn` pawn standing beside the advanced
    /// enemy pawn may capture onto the target.
    fn push_en_passant_moves(&mut self, turn: Color, legal: &mut Vec<Move>) {
        let Some(target) = self.en_passant else {
            return;
        };

        // The capturing pawn sits one step "behind" the target from the
        // mover's point of view, i.e. on the enemy pawn's rank.
        let capture_rank = target.rank() as isize - turn.pawn_direction();
        if !(0..8).contains(&capture_rank) {
            return;
        }
        let capture_rank = capture_rank as usize;

        for df in [-1isize, 1] {
            let file = target.file() as isize + df;
            if !(0..8).contains(&file) {
                continue;
            }
            let origin = Square(capture_rank, file as usize);
            let Some(piece) = self.board.piece_at(origin) else {
                continue;
            };
            if piece.color != turn || piece.kind != PieceKind::Pawn {
                continue;
            }
            let mv = Move::en_passant(origin, target);
            if self.king_safe_after(turn, &mv) {
                legal.push(mv);
            }
        }
    }

    /// Castling needs the right to still be live, king and rook on their
    /// home squares, the path between them empty, and the king's start,
    /// transit and landing squares all unattacked.
    fn push_castling_moves(&mut self, turn: Color, legal: &mut Vec<Move>) {
        let rank = turn.back_rank();
        let king_home = Square(rank, 4);

        let king_ok = self
            .board
            .piece_at(king_home)
            .is_some_and(|p| p.color == turn && p.kind == PieceKind::King);
        if !king_ok {
            return;
        }

        let enemy = turn.opponent();

        for kingside in [true, false] {
            if !self.castling.has(turn, kingside) {
                continue;
            }

            let rook_home = Square(rank, if kingside { 7 } else { 0 });
            let rook_ok = self
                .board
                .piece_at(rook_home)
                .is_some_and(|p| p.color == turn && p.kind == PieceKind::Rook);
            if !rook_ok {
                continue;
            }

            let between: &[usize] = if kingside { &[5, 6] } else { &[1, 2, 3] };
            if between.iter().any(|&f| !self.board.is_empty(Square(rank, f))) {
                continue;
            }

            let king_path: [usize; 3] = if kingside { [4, 5, 6] } else { [4, 3, 2] };
            if king_path
                .iter()
                .any(|&f| self.board.is_square_attacked(Square(rank, f), enemy))
            {
                continue;
            }

            let destination = Square(rank, if kingside { 6 } else { 2 });
            legal.push(Move::castle(king_home, destination));
        }
    }

    /// Count the moves of a given kind in the current legal list (used by
    /// tests and collaborators displaying hints).
    #[must_use]
    pub fn count_moves_of_kind(&self, kind: MoveKind) -> usize {
        self.valid_moves.iter().filter(|m| m.kind == kind).count()
    }
}
