use super::*;
use crate::movegen::{legal_moves, pseudo_legal_moves_into};
use crate::notation::parse_uci_move;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

#[test]
fn test_startpos_matches_fen() {
    assert_eq!(Position::from_fen(START_FEN).unwrap(), Position::startpos());
}

#[test]
fn test_fen_clock_fields_optional() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b -").err();
    assert_eq!(pos, Some(FenError::MissingFields(3)));

    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
    assert_eq!(pos.side_to_move, Color::Black);
    assert_eq!(pos.halfmove_clock, 0);
    assert_eq!(pos.fullmove_number, 1);
}

#[test]
fn test_fen_errors() {
    let cases = [
        ("8/8/8/8/8/8/8 w - - 0 1", FenError::RankCount(7)),
        ("9/8/8/8/8/8/8/8 w - - 0 1", FenError::RankWidth { rank: 8 }),
        ("7/8/8/8/8/8/8/8 w - - 0 1", FenError::RankWidth { rank: 8 }),
        ("8/8/8/8/8/8/8/4X3 w - - 0 1", FenError::InvalidPiece('X')),
        (
            "8/8/8/8/8/8/8/8 x - - 0 1",
            FenError::InvalidSideToMove("x".into()),
        ),
        ("8/8/8/8/8/8/8/8 w KZ - 0 1", FenError::InvalidCastling('Z')),
        (
            "8/8/8/8/8/8/8/8 w - e9 0 1",
            FenError::InvalidEnPassant("e9".into()),
        ),
        (
            "8/8/8/8/8/8/8/8 w - - x 1",
            FenError::InvalidCounter("x".into()),
        ),
    ];
    for (fen, expected) in cases {
        assert_eq!(Position::from_fen(fen), Err(expected), "{fen}");
    }
}

#[test]
fn test_make_unmake_every_move_nested() {
    let original = Position::from_fen(KIWIPETE).unwrap();
    let mut pos = original.clone();
    let mut outer = Vec::new();
    pseudo_legal_moves_into(&pos, &mut outer);
    assert!(outer.len() >= 48);

    let mut inner = Vec::new();
    for mv in outer {
        let before = pos.clone();
        let undo = pos.make_move(mv);
        pseudo_legal_moves_into(&pos, &mut inner);
        for reply in inner.iter().copied() {
            let mid = pos.clone();
            let u = pos.make_move(reply);
            pos.unmake_move(reply, u);
            assert_eq!(pos, mid, "{mv} {reply}");
        }
        pos.unmake_move(mv, undo);
        assert_eq!(pos, before, "{mv}");
    }
    assert_eq!(pos, original);
}

#[test]
fn test_castling_moves_rook_and_clears_rights() {
    let mut pos = Position::from_fen(KIWIPETE).unwrap();
    let mv = parse_uci_move(&pos, "e1g1").unwrap();
    let undo = pos.make_move(mv);
    assert_eq!(pos.piece_at(5), Some(Piece::new(Color::White, PieceKind::Rook)));
    assert_eq!(pos.piece_at(7), None);
    assert!(!pos.castling.wk && !pos.castling.wq);
    assert!(pos.castling.bk && pos.castling.bq);
    pos.unmake_move(mv, undo);
    assert_eq!(pos, Position::from_fen(KIWIPETE).unwrap());
}

#[test]
fn test_en_passant_capture_and_undo() {
    let original = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
    let mut pos = original.clone();
    let mv = parse_uci_move(&pos, "e5d6").unwrap();
    let undo = pos.make_move(mv);
    assert_eq!(pos.piece_at(35), None); // d5 pawn removed
    assert_eq!(pos.piece_at(43), Some(Piece::new(Color::White, PieceKind::Pawn)));
    assert_eq!(pos.halfmove_clock, 0);
    pos.unmake_move(mv, undo);
    assert_eq!(pos, original);
}

#[test]
fn test_promotion_and_undo() {
    let original = Position::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 3 40").unwrap();
    let mut pos = original.clone();
    let mv = parse_uci_move(&pos, "a7b8n").unwrap();
    let undo = pos.make_move(mv);
    assert_eq!(pos.piece_at(57), Some(Piece::new(Color::White, PieceKind::Knight)));
    pos.unmake_move(mv, undo);
    assert_eq!(pos, original);
}

#[test]
fn test_rook_capture_on_home_square_clears_right() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mv = parse_uci_move(&pos, "a1a8").unwrap();
    pos.make_move(mv);
    assert!(!pos.castling.wq);
    assert!(!pos.castling.bq);
    assert!(pos.castling.wk && pos.castling.bk);
}

#[test]
fn test_clocks_advance() {
    let mut pos = Position::startpos();
    for uci in ["g1f3", "g8f6"] {
        let mv = parse_uci_move(&pos, uci).unwrap();
        pos.make_move(mv);
    }
    assert_eq!(pos.halfmove_clock, 2);
    assert_eq!(pos.fullmove_number, 2);
    assert_eq!(pos.side_to_move, Color::White);
}

#[test]
fn test_in_check() {
    let pos =
        Position::from_fen("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2").unwrap();
    assert!(pos.in_check(Color::Black));
    assert!(!pos.in_check(Color::White));
    assert!(!legal_moves(&pos).is_empty());
}

#[test]
fn test_insufficient_material() {
    let insufficient = [
        "8/8/8/4k3/8/4K3/8/8 w - - 0 1",
        "8/8/8/4k3/8/4KB2/8/8 w - - 0 1",
        "8/8/8/4k3/8/4KN2/8/8 w - - 0 1",
        "8/8/4n3/4k3/8/4K3/8/8 w - - 0 1",
        "5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1",
    ];
    for fen in insufficient {
        assert!(Position::from_fen(fen).unwrap().is_insufficient_material(), "{fen}");
    }

    let sufficient = [
        "2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1",
        "8/8/8/4k3/8/4K3/4P3/8 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4R3 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4Q3 w - - 0 1",
        "8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1",
    ];
    for fen in sufficient {
        assert!(!Position::from_fen(fen).unwrap().is_insufficient_material(), "{fen}");
    }
}

#[test]
fn test_has_queens() {
    assert!(Position::startpos().has_queens());
    assert!(!Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1")
        .unwrap()
        .has_queens());
}

#[test]
fn test_clocks_saturate() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R b - - 4294967295 4294967295").unwrap();
    let before = pos.clone();
    let mv = Move::new(60, 59); // e8d8
    let undo = pos.make_move(mv);
    assert_eq!(pos.fullmove_number, u32::MAX);
    assert_eq!(pos.halfmove_clock, u32::MAX);
    pos.unmake_move(mv, undo);
    assert_eq!(pos, before);
}
