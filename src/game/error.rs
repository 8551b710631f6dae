//! Error types for game-level operations.

use std::fmt;

/// Errors a caller can recover from when driving a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// The proposed move is not in the current legal-move list
    InvalidMove,
    /// The game is over or has not been started yet
    GameNotInProgress,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidMove => write!(f, "move is not legal in the current position"),
            GameError::GameNotInProgress => write!(f, "game is not in progress"),
        }
    }
}

impl std::error::Error for GameError {}

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few parts (needs at least 4)
    TooFewParts { found: usize },
    /// Invalid piece character in the placement string
    InvalidPiece { piece: char },
    /// Invalid castling character
    InvalidCastling { castling: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Wrong number of ranks in the placement string
    WrongRankCount { found: usize },
    /// A rank does not describe exactly 8 files
    BadRankWidth { rank: usize, files: usize },
    /// Halfmove clock or fullmove counter is not a number
    InvalidCounter { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::InvalidPiece { piece } => {
                write!(f, "Invalid piece character '{piece}' in FEN")
            }
            FenError::InvalidCastling { castling } => {
                write!(f, "Invalid castling character '{castling}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::BadRankWidth { rank, files } => {
                write!(f, "Rank {rank} describes {files} files, expected 8")
            }
            FenError::InvalidCounter { found } => {
                write!(f, "Invalid move counter '{found}' in FEN")
            }
        }
    }
}

impl std::error::Error for FenError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_messages() {
        assert!(GameError::InvalidMove.to_string().contains("not legal"));
        assert!(GameError::GameNotInProgress
            .to_string()
            .contains("not in progress"));
    }

    #[test]
    fn test_fen_error_messages() {
        let err = FenError::TooFewParts { found: 2 };
        assert!(err.to_string().contains('2'));
        let err = FenError::InvalidPiece { piece: 'z' };
        assert!(err.to_string().contains("'z'"));
        let err = FenError::BadRankWidth { rank: 3, files: 9 };
        assert!(err.to_string().contains('9'));
    }
}
