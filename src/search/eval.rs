//! Static evaluation: material + check pressure + piece placement.
//!
//! Positive scores favor White. Terminal positions short-circuit: checkmate
//! is a large constant signed by which side is mated, every other finished
//! state is a dead draw.

use crate::board::Color;
use crate::game::{GameState, Position};

use super::pst::pst_bonus;

/// Score for a delivered checkmate, far above any material swing
pub const MATE_SCORE: i32 = 100_000;

/// Flat penalty against a side whose king is currently in check
const CHECK_PENALTY: i32 = 30;

/// Evaluate a position from White's point of view.
#[must_use]
pub fn evaluate(position: &Position) -> i32 {
    match position.state() {
        GameState::Checkmate => {
            // The side to move is the side that got mated.
            return if position.turn() == Color::Black {
                MATE_SCORE
            } else {
                -MATE_SCORE
            };
        }
        GameState::InProgress => {}
        _ => return 0,
    }

    let mut score =
        (position.material_score(Color::White) - position.material_score(Color::Black)) * 100;

    if position.is_check() {
        score += if position.turn() == Color::White {
            -CHECK_PENALTY
        } else {
            CHECK_PENALTY
        };
    }

    for piece in position.board().pieces() {
        score += pst_bonus(piece);
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_is_balanced() {
        let mut position = Position::new();
        position.start();
        assert_eq!(evaluate(&position), 0);
    }

    #[test]
    fn test_material_advantage_dominates() {
        // White is up a queen
        let position =
            Position::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                .unwrap();
        assert!(evaluate(&position) >= 900);
    }

    #[test]
    fn test_checkmate_is_signed_by_victim() {
        // Fool's mate: White is mated, White to move
        let mated_white =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert_eq!(mated_white.state(), GameState::Checkmate);
        assert_eq!(evaluate(&mated_white), -MATE_SCORE);
    }

    #[test]
    fn test_terminal_draws_are_zero() {
        let stalemate = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(stalemate.state(), GameState::Stalemate);
        assert_eq!(evaluate(&stalemate), 0);
    }

    #[test]
    fn test_check_penalty_applies_to_side_to_move() {
        // Same material; White to move, in check from the rook in one
        let checked = Position::from_fen("4k3/8/8/8/4r3/8/8/4K3 w - - 0 1").unwrap();
        let quiet = Position::from_fen("4k3/8/8/8/3r4/8/8/4K3 w - - 0 1").unwrap();
        assert!(evaluate(&checked) < evaluate(&quiet));
    }
}
