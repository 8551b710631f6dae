//! FEN import and export.
//!
//! The en-passant field holds the skipped square, matching the internal
//! representation. A parsed position is `InProgress` unless terminal
//! detection immediately says otherwise (e.g. a stalemate FEN).

use crate::board::{Board, CastlingRights, Color, Piece, PieceKind, Square};

use super::error::FenError;
use super::player::Player;
use super::state::{GameState, Position};

/// The standard starting position in FEN
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parse a FEN string into a playable position.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewParts {
                found: parts.len(),
            });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount {
                found: ranks.len(),
            });
        }

        let mut board = Board::empty();
        // FEN lists rank 8 first, which is internal rank 0.
        for (rank, row) in ranks.iter().enumerate() {
            let mut file = 0usize;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let kind = PieceKind::from_char(c).ok_or(FenError::InvalidPiece { piece: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                if file >= 8 {
                    return Err(FenError::BadRankWidth {
                        rank,
                        files: file + 1,
                    });
                }
                board.put(Piece::new(color, kind, Square(rank, file)));
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadRankWidth { rank, files: file });
            }
        }

        let turn = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut castling = CastlingRights::none();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.grant(Color::White, true),
                    'Q' => castling.grant(Color::White, false),
                    'k' => castling.grant(Color::Black, true),
                    'q' => castling.grant(Color::Black, false),
                    _ => return Err(FenError::InvalidCastling { castling: c }),
                }
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            s => Some(s.parse::<Square>().map_err(|_| FenError::InvalidEnPassant {
                found: s.to_string(),
            })?),
        };

        let halfmove_clock = match parts.get(4) {
            None => 0,
            Some(s) => s.parse().map_err(|_| FenError::InvalidCounter {
                found: (*s).to_string(),
            })?,
        };
        let fullmove_count = match parts.get(5) {
            None => 1,
            Some(s) => s.parse().map_err(|_| FenError::InvalidCounter {
                found: (*s).to_string(),
            })?,
        };

        let mut position = Position {
            board,
            turn,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_count,
            hash: 0,
            valid_moves: Vec::new(),
            players: [Player::new(Color::White), Player::new(Color::Black)],
            state: GameState::InProgress,
            history: Vec::new(),
        };
        position.hash = position.compute_hash();
        position.valid_moves = position.generate_legal_moves(turn);
        position.seed_material_scores();
        position.update_state();
        Ok(position)
    }

    /// Serialize the position to FEN.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in 0..8 {
            let mut empty = 0;
            for file in 0..8 {
                match self.board.piece_at(Square(rank, file)) {
                    None => empty += 1,
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.kind.to_fen_char(piece.color));
                    }
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank < 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.turn == Color::White { 'w' } else { 'b' });

        fen.push(' ');
        let mut any_right = false;
        for (c, color, kingside) in [
            ('K', Color::White, true),
            ('Q', Color::White, false),
            ('k', Color::Black, true),
            ('q', Color::Black, false),
        ] {
            if self.castling.has(color, kingside) {
                fen.push(c);
                any_right = true;
            }
        }
        if !any_right {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_count));
        fen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_fen_round_trip() {
        let position = Position::from_fen(START_FEN).unwrap();
        assert_eq!(position.to_fen(), START_FEN);
        assert_eq!(position.legal_moves().len(), 20);
        assert_eq!(position.state(), GameState::InProgress);
    }

    #[test]
    fn test_start_fen_matches_new() {
        let parsed = Position::from_fen(START_FEN).unwrap();
        let fresh = Position::new();
        assert_eq!(parsed.zobrist_hash(), fresh.zobrist_hash());
        assert_eq!(parsed.board(), fresh.board());
    }

    #[test]
    fn test_en_passant_field() {
        let position =
            Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        assert_eq!(position.en_passant_target(), Some("f6".parse().unwrap()));
    }

    #[test]
    fn test_counters_default_when_missing() {
        let err = Position::from_fen("8/8/8/4k3/8/4K3/8/7R w -").unwrap_err();
        assert!(matches!(err, FenError::TooFewParts { found: 3 }));

        let position = Position::from_fen("8/8/8/4k3/8/4K3/8/7R w - -").unwrap();
        assert_eq!(position.halfmove_clock(), 0);
        assert_eq!(position.fullmove_count(), 1);
    }

    #[test]
    fn test_rejects_malformed_fens() {
        assert!(matches!(
            Position::from_fen("8/8/8/8 w - -"),
            Err(FenError::WrongRankCount { found: 4 })
        ));
        assert!(matches!(
            Position::from_fen("x7/8/8/8/8/8/8/8 w - -"),
            Err(FenError::InvalidPiece { piece: 'x' })
        ));
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/8 z - -"),
            Err(FenError::InvalidSideToMove { .. })
        ));
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/8 w X -"),
            Err(FenError::InvalidCastling { castling: 'X' })
        ));
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/8 w - e9"),
            Err(FenError::InvalidEnPassant { .. })
        ));
    }

    #[test]
    fn test_material_seeding() {
        // Black is missing a queen (10) and a rook (5)
        let position =
            Position::from_fen("1nb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQk - 0 1").unwrap();
        assert_eq!(position.material_score(Color::White), 15);
        assert_eq!(position.material_score(Color::Black), 0);
    }
}
