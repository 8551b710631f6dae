//! Pseudo-legal move generation per piece kind.
//!
//! Generates geometrically valid moves only: castling and en passant need
//! rights/last-move context and are assembled at the game level.

use super::state::Board;
use super::types::{Color, Move, Piece, PieceKind, Square, PROMOTION_KINDS};

pub(crate) const ROOK_DIRECTIONS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub(crate) const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub(crate) const ALL_DIRECTIONS: [(isize, isize); 8] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
];

pub(crate) const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

impl Board {
    /// All pseudo-legal moves for one piece.
    #[must_use]
    pub fn pseudo_legal_moves(&self, piece: Piece) -> Vec<Move> {
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(piece),
            PieceKind::Knight => self.offset_moves(piece, &KNIGHT_OFFSETS),
            PieceKind::Bishop => self.slider_moves(piece, &BISHOP_DIRECTIONS),
            PieceKind::Rook => self.slider_moves(piece, &ROOK_DIRECTIONS),
            PieceKind::Queen => self.slider_moves(piece, &ALL_DIRECTIONS),
            PieceKind::King => self.offset_moves(piece, &ALL_DIRECTIONS),
        }
    }

    /// All pseudo-legal moves for every piece of one color.
    #[must_use]
    pub fn pseudo_legal_moves_for(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for piece in self.pieces_of(color) {
            moves.extend(self.pseudo_legal_moves(piece));
        }
        moves
    }

    /// Walk each direction square by square, stopping at the first occupied
    /// square (included as a capture when it holds an enemy).
    fn slider_moves(&self, piece: Piece, directions: &[(isize, isize)]) -> Vec<Move> {
        let mut moves = Vec::new();
        for &(dr, df) in directions {
            let mut current = piece.square;
            while let Some(next) = current.offset(dr, df) {
                current = next;
                match self.piece_at(current) {
                    None => moves.push(Move::normal(piece.square, current)),
                    Some(other) => {
                        if other.color != piece.color {
                            moves.push(Move::capture(piece.square, current));
                        }
                        break;
                    }
                }
            }
        }
        moves
    }

    /// Test each fixed offset once (knight and king).
    fn offset_moves(&self, piece: Piece, offsets: &[(isize, isize)]) -> Vec<Move> {
        let mut moves = Vec::new();
        for &(dr, df) in offsets {
            let Some(to) = piece.square.offset(dr, df) else {
                continue;
            };
            match self.piece_at(to) {
                None => moves.push(Move::normal(piece.square, to)),
                Some(other) if other.color != piece.color => {
                    moves.push(Move::capture(piece.square, to));
                }
                Some(_) => {}
            }
        }
        moves
    }

    fn pawn_moves(&self, piece: Piece) -> Vec<Move> {
        let color = piece.color;
        let dir = color.pawn_direction();
        let rank = piece.square.rank();

        // One rank short of promotion: every advance or diagonal capture
        // turns into one move per promotable kind.
        let promoting = rank as isize + dir == color.pawn_promotion_rank() as isize;

        let mut moves = Vec::new();

        for df in [-1, 1] {
            let Some(to) = piece.square.offset(dir, df) else {
                continue;
            };
            let Some(target) = self.piece_at(to) else {
                continue;
            };
            if target.color == color {
                continue;
            }
            if promoting {
                for kind in PROMOTION_KINDS {
                    moves.push(Move::promotion_capture(piece.square, to, kind));
                }
            } else {
                moves.push(Move::capture(piece.square, to));
            }
        }

        if let Some(forward) = piece.square.offset(dir, 0) {
            if self.is_empty(forward) {
                if promoting {
                    for kind in PROMOTION_KINDS {
                        moves.push(Move::promotion(piece.square, forward, kind));
                    }
                } else {
                    moves.push(Move::normal(piece.square, forward));
                    if rank == color.pawn_start_rank() {
                        if let Some(double) = piece.square.offset(2 * dir, 0) {
                            if self.is_empty(double) {
                                moves.push(Move::normal(piece.square, double));
                            }
                        }
                    }
                }
            }
        }

        moves
    }
}
