//! Mailbox board: an 8x8 grid of optional pieces, with attack detection.

use std::fmt;

use super::movegen::{ALL_DIRECTIONS, BISHOP_DIRECTIONS, KNIGHT_OFFSETS, ROOK_DIRECTIONS};
use super::types::{Color, Piece, PieceKind, Square};

/// Standard back-rank layout, queenside rook first
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// 8x8 mailbox board.
///
/// Invariants: at most one piece per square, and a piece's `square` field
/// always matches the cell it sits in. The board trusts its caller for move
/// legality; it only performs mechanical piece geometry.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Create an empty board
    #[must_use]
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Create a board with the standard starting position
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            board.put(Piece::new(Color::Black, *kind, Square(0, file)));
            board.put(Piece::new(Color::Black, PieceKind::Pawn, Square(1, file)));
            board.put(Piece::new(Color::White, PieceKind::Pawn, Square(6, file)));
            board.put(Piece::new(Color::White, *kind, Square(7, file)));
        }
        board
    }

    /// Reset to the standard starting position
    pub fn reset(&mut self) {
        *self = Board::new();
    }

    /// Piece on a square, if any
    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank()][sq.file()]
    }

    /// Returns true if the square holds no piece
    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.rank()][sq.file()].is_none()
    }

    /// Place a piece on the square recorded in its `square` field
    #[inline]
    pub(crate) fn put(&mut self, piece: Piece) {
        self.squares[piece.square.rank()][piece.square.file()] = Some(piece);
    }

    /// Remove and return the piece on a square
    #[inline]
    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank()][sq.file()].take()
    }

    /// Overwrite the `moved` flag of the piece on `sq` (used by move undo)
    pub(crate) fn set_moved(&mut self, sq: Square, moved: bool) {
        if let Some(piece) = self.squares[sq.rank()][sq.file()].as_mut() {
            piece.moved = moved;
        }
    }

    /// Iterate over every piece on the board
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().filter_map(|cell| *cell)
    }

    /// Iterate over the pieces of one color
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    /// The square of the given color's king, if present
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.square)
    }

    /// Returns true if the given color's king is attacked
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.is_square_attacked(king, color.opponent()),
            None => false,
        }
    }

    /// Returns true if a piece of `by` could capture on `sq` by geometry
    /// alone (ignores pins and whose turn it is).
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        // Pawns: a `by` pawn one rank behind (from its own perspective),
        // one file to either side, attacks this square.
        for df in [-1, 1] {
            if let Some(from) = sq.offset(-by.pawn_direction(), df) {
                if let Some(p) = self.piece_at(from) {
                    if p.color == by && p.kind == PieceKind::Pawn {
                        return true;
                    }
                }
            }
        }

        for (dr, df) in KNIGHT_OFFSETS {
            if let Some(from) = sq.offset(dr, df) {
                if let Some(p) = self.piece_at(from) {
                    if p.color == by && p.kind == PieceKind::Knight {
                        return true;
                    }
                }
            }
        }

        for (dr, df) in ALL_DIRECTIONS {
            if let Some(from) = sq.offset(dr, df) {
                if let Some(p) = self.piece_at(from) {
                    if p.color == by && p.kind == PieceKind::King {
                        return true;
                    }
                }
            }
        }

        self.ray_attacked(sq, by, &ROOK_DIRECTIONS, PieceKind::Rook)
            || self.ray_attacked(sq, by, &BISHOP_DIRECTIONS, PieceKind::Bishop)
    }

    /// Walk each direction outward from `sq`; the first piece met attacks
    /// if it is a `by`-colored queen or the given slider kind.
    fn ray_attacked(
        &self,
        sq: Square,
        by: Color,
        directions: &[(isize, isize)],
        slider: PieceKind,
    ) -> bool {
        for &(dr, df) in directions {
            let mut current = sq;
            while let Some(next) = current.offset(dr, df) {
                current = next;
                if let Some(p) = self.piece_at(current) {
                    if p.color == by && (p.kind == slider || p.kind == PieceKind::Queen) {
                        return true;
                    }
                    break;
                }
            }
        }
        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    /// ASCII rendering, uppercase = White, rank 8 at the top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    a   b   c   d   e   f   g   h")?;
        writeln!(f, "  +---+---+---+---+---+---+---+---+")?;
        for rank in 0..8 {
            write!(f, "{} |", 8 - rank)?;
            for file in 0..8 {
                match self.squares[rank][file] {
                    Some(p) => write!(f, " {} |", p.kind.to_fen_char(p.color))?,
                    None => write!(f, "   |")?,
                }
            }
            writeln!(f, " {}", 8 - rank)?;
            writeln!(f, "  +---+---+---+---+---+---+---+---+")?;
        }
        writeln!(f, "    a   b   c   d   e   f   g   h")
    }
}
