//! Rules edge cases: mates, the en-passant window, castling legality, and
//! the public error taxonomy.

use crate::board::{Color, Move, MoveKind, PieceKind, Square};
use crate::game::{GameError, GameState, Position};

fn find(position: &Position, from: &str, to: &str, promotion: Option<PieceKind>) -> Move {
    position
        .find_move(from.parse().unwrap(), to.parse().unwrap(), promotion)
        .expect("expected move to be legal")
}

fn apply(game: &mut Position, from: &str, to: &str) {
    let mv = find(game, from, to, None);
    game.apply_move(mv).unwrap();
}

#[test]
fn test_fools_mate_by_coordinates() {
    let mut game = Position::new();
    game.start();

    apply(&mut game, "f2", "f3");
    apply(&mut game, "e7", "e5");
    apply(&mut game, "g2", "g4");
    apply(&mut game, "d8", "h4");

    assert_eq!(game.state(), GameState::Checkmate);
    assert!(game.legal_moves().is_empty());
    assert!(game.is_check());
    assert_eq!(game.turn(), Color::White);
}

#[test]
fn test_stalemate_vs_checkmate_disambiguation() {
    // Same corner, queen one step apart: one is mate, one is stalemate
    let mate = Position::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(mate.state(), GameState::Checkmate);

    let stale = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(stale.state(), GameState::Stalemate);
}

#[test]
fn test_en_passant_window_is_one_move() {
    let mut game =
        Position::from_fen("rnbqkbnr/pppppppp/8/4P3/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2")
            .unwrap();

    apply(&mut game, "d7", "d5");
    assert_eq!(game.en_passant_target(), Some("d6".parse().unwrap()));
    let capture = game.find_move(
        "e5".parse().unwrap(),
        "d6".parse().unwrap(),
        None,
    );
    assert_eq!(capture.map(|m| m.kind), Some(MoveKind::EnPassant));

    // Playing any other move closes the window for good
    apply(&mut game, "h2", "h3");
    apply(&mut game, "a7", "a6");
    assert_eq!(game.en_passant_target(), None);
    assert!(game
        .find_move("e5".parse().unwrap(), "d6".parse().unwrap(), None)
        .is_none());
}

#[test]
fn test_en_passant_reopens_on_a_new_double_push() {
    let mut game =
        Position::from_fen("rnbqkbnr/pppppppp/8/4P3/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2")
            .unwrap();
    apply(&mut game, "d7", "d5");
    apply(&mut game, "h2", "h3");
    apply(&mut game, "f7", "f5");
    // New window on f6, old one on d6 stays closed
    assert_eq!(game.en_passant_target(), Some("f6".parse().unwrap()));
    assert!(game
        .find_move("e5".parse().unwrap(), "f6".parse().unwrap(), None)
        .is_some());
    assert!(game
        .find_move("e5".parse().unwrap(), "d6".parse().unwrap(), None)
        .is_none());
}

#[test]
fn test_castling_both_wings_when_clear() {
    let game = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    assert!(game
        .find_move("e1".parse().unwrap(), "g1".parse().unwrap(), None)
        .is_some());
    assert!(game
        .find_move("e1".parse().unwrap(), "c1".parse().unwrap(), None)
        .is_some());
    assert_eq!(game.count_moves_of_kind(MoveKind::Castle), 2);
}

#[test]
fn test_castling_blocked_by_a_piece() {
    let game = Position::from_fen("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1").unwrap();
    assert!(game
        .find_move("e1".parse().unwrap(), "g1".parse().unwrap(), None)
        .is_some());
    assert!(game
        .find_move("e1".parse().unwrap(), "c1".parse().unwrap(), None)
        .is_none());
}

#[test]
fn test_castling_through_attacked_square() {
    // Black rook on f3 covers f1: kingside is out, queenside is fine
    let game = Position::from_fen("r3k2r/8/8/8/8/5r2/8/R3K2R w KQkq - 0 1").unwrap();
    assert!(game
        .find_move("e1".parse().unwrap(), "g1".parse().unwrap(), None)
        .is_none());
    assert!(game
        .find_move("e1".parse().unwrap(), "c1".parse().unwrap(), None)
        .is_some());
}

#[test]
fn test_no_castling_out_of_check() {
    let game = Position::from_fen("r3k2r/8/8/8/8/4r3/8/R3K2R w KQkq - 0 1").unwrap();
    assert_eq!(game.count_moves_of_kind(MoveKind::Castle), 0);
}

#[test]
fn test_castling_rights_gone_after_king_trip() {
    let mut game = Position::from_fen("r3k2r/7p/8/8/8/8/7P/R3K2R w KQkq - 0 1").unwrap();
    apply(&mut game, "e1", "e2");
    apply(&mut game, "h7", "h6");
    apply(&mut game, "e2", "e1");
    apply(&mut game, "h6", "h5");

    // King is back home but the rights are spent
    assert!(!game.castling_rights().has(Color::White, true));
    assert!(!game.castling_rights().has(Color::White, false));
    assert_eq!(game.count_moves_of_kind(MoveKind::Castle), 0);

    // Undo the whole trip and the rights come back
    for _ in 0..4 {
        game.unapply_move();
    }
    assert!(game.castling_rights().has(Color::White, true));
    assert!(game.castling_rights().has(Color::White, false));
}

#[test]
fn test_rook_move_revokes_one_wing() {
    let mut game = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    apply(&mut game, "a1", "a2");
    assert!(!game.castling_rights().has(Color::White, false));
    assert!(game.castling_rights().has(Color::White, true));
}

#[test]
fn test_rook_capture_revokes_victims_right() {
    // White rook takes the rook on h8; Black loses the kingside right
    let mut game = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mv = find(&game, "h1", "h8", None);
    game.apply_move(mv).unwrap();
    assert!(!game.castling_rights().has(Color::Black, true));
    assert!(game.castling_rights().has(Color::Black, false));
}

#[test]
fn test_promotion_offers_all_four_kinds() {
    let game = Position::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
    let promotions: Vec<PieceKind> = game
        .legal_moves()
        .iter()
        .filter(|m| m.origin == "a7".parse::<Square>().unwrap())
        .filter_map(|m| m.promotion)
        .collect();
    assert_eq!(promotions.len(), 4);
    for kind in [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ] {
        assert!(promotions.contains(&kind));
    }
}

#[test]
fn test_underpromotion_applies() {
    let mut game = Position::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
    let mv = find(&game, "a7", "a8", Some(PieceKind::Knight));
    game.apply_move(mv).unwrap();
    assert_eq!(
        game.board()
            .piece_at("a8".parse().unwrap())
            .map(|p| p.kind),
        Some(PieceKind::Knight)
    );
}

#[test]
fn test_pinned_piece_cannot_move() {
    // The knight on e4 is pinned against the king by the rook on e8
    let game = Position::from_fen("4r1k1/8/8/8/4N3/8/8/4K3 w - - 0 1").unwrap();
    assert!(!game.legal_moves().iter().any(|m| m.origin == "e4".parse::<Square>().unwrap()));
}

#[test]
fn test_invalid_move_is_rejected_without_side_effects() {
    let mut game = Position::new();
    game.start();
    let hash = game.zobrist_hash();

    let bogus = Move::normal("e2".parse().unwrap(), "e5".parse().unwrap());
    assert_eq!(game.apply_move(bogus), Err(GameError::InvalidMove));
    assert_eq!(game.zobrist_hash(), hash);
    assert_eq!(game.turn(), Color::White);
    assert_eq!(game.state(), GameState::InProgress);
}

#[test]
fn test_wrong_promotion_choice_is_invalid() {
    let mut game = Position::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
    // A bare advance without naming the promotion piece is not legal
    let bogus = Move::normal("a7".parse().unwrap(), "a8".parse().unwrap());
    assert_eq!(game.apply_move(bogus), Err(GameError::InvalidMove));
}

#[test]
fn test_apply_before_start_fails() {
    let mut game = Position::new();
    let mv = game
        .find_move("e2".parse().unwrap(), "e4".parse().unwrap(), None)
        .unwrap();
    assert_eq!(game.apply_move(mv), Err(GameError::GameNotInProgress));
    assert_eq!(game.state(), GameState::ReadyToStart);
}

#[test]
fn test_start_after_finish_resets() {
    let mut game = Position::new();
    game.start();
    apply(&mut game, "f2", "f3");
    apply(&mut game, "e7", "e5");
    apply(&mut game, "g2", "g4");
    apply(&mut game, "d8", "h4");
    assert_eq!(game.state(), GameState::Checkmate);

    game.start();
    assert_eq!(game.state(), GameState::InProgress);
    assert_eq!(game.legal_moves().len(), 20);
    assert_eq!(game.fullmove_count(), 1);
    assert_eq!(game.zobrist_hash(), game.compute_hash());
}

#[test]
fn test_moves_survive_the_wire_format() {
    let mut game = Position::new();
    game.start();
    for mv in game.legal_moves().to_vec() {
        assert_eq!(Move::from_wire(mv.to_wire()), Some(mv));
    }
    // And a decoded move is accepted by the game
    let mv = find(&game, "e2", "e4", None);
    let decoded = Move::from_wire(mv.to_wire()).unwrap();
    game.apply_move(decoded).unwrap();
}
