//! Mechanical move application and its exact inverse.
//!
//! No legality checking happens here; the game layer validates moves before
//! they reach the board. Calling `apply_move` with an empty origin square is
//! a programming error and fails fast.

use super::state::Board;
use super::types::{Move, MoveKind, Piece, Square};

/// Rook home and landing files for a castle, keyed by the king's landing file
const fn castle_rook_files(king_dest_file: usize) -> (usize, usize) {
    if king_dest_file == 6 {
        (7, 5)
    } else {
        (0, 3)
    }
}

impl Board {
    /// Apply a single move and return `(promoted_pawn, captured)`:
    /// the original pawn for promotions, and the removed piece (with its
    /// pre-capture identity) for captures. Both are exactly what
    /// [`Board::undo_move`] needs to invert the move.
    pub fn apply_move(&mut self, m: &Move) -> (Option<Piece>, Option<Piece>) {
        let mut piece = self
            .take(m.origin)
            .expect("apply_move: origin square is empty");

        let mut promoted_pawn = None;
        let mut captured = None;

        match m.kind {
            MoveKind::Normal => {}
            MoveKind::Capture => {
                captured = self.take(m.destination);
            }
            MoveKind::EnPassant => {
                // The captured pawn stands beside the origin, on the
                // destination file, not on the destination square.
                captured = self.take(Square(m.origin.rank(), m.destination.file()));
            }
            MoveKind::Castle => {
                let rank = m.origin.rank();
                let (rook_from, rook_to) = castle_rook_files(m.destination.file());
                let mut rook = self
                    .take(Square(rank, rook_from))
                    .expect("apply_move: castling without a rook");
                rook.square = Square(rank, rook_to);
                rook.moved = true;
                self.put(rook);
            }
            MoveKind::PromotionNormal | MoveKind::PromotionCapture => {
                if m.kind == MoveKind::PromotionCapture {
                    captured = self.take(m.destination);
                }
                promoted_pawn = Some(piece);
                let kind = m
                    .promotion
                    .expect("apply_move: promotion move without a piece kind");
                piece = Piece::new(piece.color, kind, m.destination);
            }
        }

        piece.square = m.destination;
        piece.moved = true;
        self.put(piece);

        (promoted_pawn, captured)
    }

    /// Exact inverse of [`Board::apply_move`].
    ///
    /// Restores the moving piece's prior square, puts any captured piece
    /// back with its original identity, and for castling returns the rook
    /// home with its `moved` flag cleared. The mover's own `moved` flag is
    /// restored by the game layer from its snapshot.
    pub fn undo_move(
        &mut self,
        m: &Move,
        promoted_pawn: Option<Piece>,
        captured: Option<Piece>,
    ) {
        match m.kind {
            MoveKind::PromotionNormal | MoveKind::PromotionCapture => {
                self.take(m.destination);
                let mut pawn = promoted_pawn.expect("undo_move: promotion without the pawn");
                pawn.square = m.origin;
                self.put(pawn);
            }
            _ => {
                let mut piece = self
                    .take(m.destination)
                    .expect("undo_move: destination square is empty");
                piece.square = m.origin;
                self.put(piece);
            }
        }

        if let Some(piece) = captured {
            self.put(piece);
        }

        if m.kind == MoveKind::Castle {
            let rank = m.origin.rank();
            let (rook_home, rook_to) = castle_rook_files(m.destination.file());
            let mut rook = self
                .take(Square(rank, rook_to))
                .expect("undo_move: castling rook is missing");
            rook.square = Square(rank, rook_home);
            rook.moved = false;
            self.put(rook);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::{Color, PieceKind};

    #[test]
    fn test_normal_move_round_trip() {
        let mut board = Board::new();
        let before = board.clone();
        let m = Move::normal(Square(6, 4), Square(4, 4));
        let (promoted, captured) = board.apply_move(&m);
        assert!(promoted.is_none() && captured.is_none());
        assert!(board.is_empty(Square(6, 4)));
        board.undo_move(&m, promoted, captured);
        board.set_moved(m.origin, false);
        assert_eq!(board, before);
    }

    #[test]
    fn test_capture_returns_identity() {
        let mut board = Board::empty();
        board.put(Piece::new(Color::White, PieceKind::Rook, Square(4, 0)));
        let mut victim = Piece::new(Color::Black, PieceKind::Knight, Square(4, 7));
        victim.moved = true;
        board.put(victim);
        let before = board.clone();

        let m = Move::capture(Square(4, 0), Square(4, 7));
        let (promoted, captured) = board.apply_move(&m);
        assert_eq!(captured, Some(victim));

        board.undo_move(&m, promoted, captured);
        board.set_moved(m.origin, false);
        assert_eq!(board, before);
    }

    #[test]
    fn test_en_passant_removes_adjacent_pawn() {
        let mut board = Board::empty();
        let mut white = Piece::new(Color::White, PieceKind::Pawn, Square(3, 4));
        white.moved = true;
        let mut black = Piece::new(Color::Black, PieceKind::Pawn, Square(3, 3));
        black.moved = true;
        board.put(white);
        board.put(black);
        let before = board.clone();

        let m = Move::en_passant(Square(3, 4), Square(2, 3));
        let (promoted, captured) = board.apply_move(&m);
        assert_eq!(captured, Some(black));
        assert!(board.is_empty(Square(3, 3)));
        assert!(board.is_empty(Square(3, 4)));

        board.undo_move(&m, promoted, captured);
        assert_eq!(board, before);
    }

    #[test]
    fn test_castle_moves_rook_and_undo_clears_flag() {
        let mut board = Board::empty();
        board.put(Piece::new(Color::White, PieceKind::King, Square(7, 4)));
        board.put(Piece::new(Color::White, PieceKind::Rook, Square(7, 7)));
        let before = board.clone();

        let m = Move::castle(Square(7, 4), Square(7, 6));
        let (promoted, captured) = board.apply_move(&m);
        assert_eq!(
            board.piece_at(Square(7, 5)).map(|p| p.kind),
            Some(PieceKind::Rook)
        );
        assert!(board.is_empty(Square(7, 7)));

        board.undo_move(&m, promoted, captured);
        board.set_moved(m.origin, false);
        assert_eq!(board, before);
    }

    #[test]
    fn test_promotion_round_trip_restores_pawn() {
        let mut board = Board::empty();
        let mut pawn = Piece::new(Color::White, PieceKind::Pawn, Square(1, 0));
        pawn.moved = true;
        board.put(pawn);
        let before = board.clone();

        let m = Move::promotion(Square(1, 0), Square(0, 0), PieceKind::Queen);
        let (promoted, captured) = board.apply_move(&m);
        assert_eq!(
            board.piece_at(Square(0, 0)).map(|p| p.kind),
            Some(PieceKind::Queen)
        );
        assert_eq!(promoted, Some(pawn));

        board.undo_move(&m, promoted, captured);
        assert_eq!(board, before);
    }
}
