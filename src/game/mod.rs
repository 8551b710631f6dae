//! Game-level position handling: the legal-move authority, the reversible
//! apply/unapply protocol, draw and terminal detection, and FEN setup.
//!
//! # Example
//! ```
//! use chesscore::game::Position;
//!
//! let mut position = Position::new();
//! position.start();
//! let moves = position.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod error;
mod fen;
mod make_unmake;
mod movegen;
mod perft;
mod player;
mod state;

#[cfg(test)]
mod tests;

pub use error::{FenError, GameError};
pub use fen::START_FEN;
pub use player::Player;
pub use state::{GameState, Position};
