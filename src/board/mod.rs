//! 8x8 mailbox board: piece geometry, attack detection, and mechanical
//! (unvalidated) move application.
//!
//! Everything here trusts its caller for legality; the game layer in
//! [`crate::game`] is the legal-move authority.

mod error;
mod make_unmake;
mod movegen;
mod state;
mod types;

pub use error::SquareError;
pub use state::Board;
pub use types::{
    CastlingRights, Color, Move, MoveKind, Piece, PieceKind, Square, WireMove, PROMOTION_KINDS,
};

pub(crate) use types::CASTLING_SIDES;
