pub mod board;
pub mod game;
pub mod search;
pub mod zobrist;

pub use board::{Board, CastlingRights, Color, Move, MoveKind, Piece, PieceKind, Square};
pub use game::{FenError, GameError, GameState, Position};
pub use search::{SearchEngine, SearchHandle, SearchWorker, TranspositionTable};
