use super::*;
use crate::config::CandidateSet;
use chess_core::{legal_moves, legal_moves_into};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn searcher(leaf_sign: LeafSign, candidates: CandidateSet) -> AlphaBeta {
    AlphaBeta::new(SearchConfig {
        depth: 3,
        leaf_sign,
        candidates,
    })
}

/// Plain minimax over legal moves without pruning.
fn brute_force(
    pos: &mut Position,
    depth: u8,
    maximizing: bool,
    leaf_sign: LeafSign,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;
    if depth == 0 {
        let eval = evaluate(pos);
        return match leaf_sign {
            LeafSign::Legacy if maximizing => -eval,
            LeafSign::Legacy => eval,
            LeafSign::Consistent => -eval,
        };
    }
    let mut moves = Vec::new();
    legal_moves_into(pos, &mut moves);
    let mut best = if maximizing {
        -SCORE_INFINITY
    } else {
        SCORE_INFINITY
    };
    for mv in moves {
        let undo = pos.make_move(mv);
        let value = brute_force(pos, depth - 1, !maximizing, leaf_sign, nodes);
        pos.unmake_move(mv, undo);
        best = if maximizing {
            best.max(value)
        } else {
            best.min(value)
        };
    }
    best
}

// =============================================================================
// search
// =============================================================================

#[test]
fn test_depth_zero_is_signed_evaluation() {
    let mut p = pos(KIWIPETE);
    let eval = evaluate(&p);

    let mut legacy = AlphaBeta::default();
    assert_eq!(legacy.search(&mut p, 0, true, -5, 5), -eval);
    assert_eq!(legacy.nodes(), 1);
    assert_eq!(legacy.search(&mut p, 0, false, -5, 5), eval);

    let mut consistent = searcher(LeafSign::Consistent, CandidateSet::Legal);
    assert_eq!(consistent.search(&mut p, 0, true, 0, 0), -eval);
    assert_eq!(consistent.search(&mut p, 0, false, 0, 0), -eval);
}

#[test]
fn test_matches_brute_force_minimax() {
    let cases = [
        (Position::startpos(), 3),
        (pos(KIWIPETE), 2),
        (pos("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"), 3),
    ];
    for (start, depth) in cases {
        for leaf_sign in [LeafSign::Legacy, LeafSign::Consistent] {
            for maximizing in [true, false] {
                let mut p = start.clone();
                let mut brute_nodes = 0;
                let expected = brute_force(&mut p, depth, maximizing, leaf_sign, &mut brute_nodes);

                let mut ab = searcher(leaf_sign, CandidateSet::Legal);
                let got = ab.search(&mut p, depth, maximizing, -SCORE_INFINITY, SCORE_INFINITY);

                assert_eq!(got, expected, "{leaf_sign:?} maximizing={maximizing}");
                assert!(ab.nodes() <= brute_nodes);
                assert_eq!(p, start);
            }
        }
    }
}

#[test]
fn test_startpos_brute_force_node_count() {
    let mut p = Position::startpos();
    let mut nodes = 0;
    brute_force(&mut p, 3, false, LeafSign::Legacy, &mut nodes);
    assert_eq!(nodes, 1 + 20 + 400 + 8_902);
}

#[test]
fn test_no_candidates_returns_seed() {
    let mut mate = pos("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    let mut ab = AlphaBeta::default();
    assert_eq!(ab.search(&mut mate, 2, true, -10, 10), -SCORE_INFINITY);
    assert_eq!(ab.search(&mut mate, 2, false, -10, 10), SCORE_INFINITY);
}

#[test]
fn test_pseudo_legal_candidates_search_without_panicking() {
    let start = pos("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
    for leaf_sign in [LeafSign::Legacy, LeafSign::Consistent] {
        for depth in [2, 3] {
            let mut p = start.clone();
            let mut union = searcher(leaf_sign, CandidateSet::LegalAndPseudoLegal);
            union.search(&mut p, depth, false, -SCORE_INFINITY, SCORE_INFINITY);
            assert_eq!(p, start);
            assert!(union.nodes() > 1);
            assert!(union.best_move(&mut p, depth).is_some());
            assert_eq!(p, start);
        }
    }
}

// =============================================================================
// best_move
// =============================================================================

#[test]
fn test_single_legal_move() {
    let start = pos("k7/8/8/8/8/8/1r6/K7 w - - 0 1");
    let only = legal_moves(&start);
    assert_eq!(only.len(), 1);

    let mut p = start.clone();
    let mut ab = AlphaBeta::default();
    assert_eq!(ab.best_move(&mut p, 3), Some(only[0]));
    let root_nodes = ab.nodes();

    let mut direct = AlphaBeta::default();
    let undo = p.make_move(only[0]);
    direct.search(&mut p, 2, true, -SCORE_INFINITY, SCORE_INFINITY);
    p.unmake_move(only[0], undo);

    assert_eq!(root_nodes, direct.nodes());
    assert_eq!(p, start);
}

#[test]
fn test_no_legal_moves() {
    let mut ab = AlphaBeta::default();
    let mut stalemate = pos("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert_eq!(ab.best_move(&mut stalemate, 3), None);
    let mut mate = pos("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert_eq!(ab.best_move(&mut mate, 3), None);
    assert_eq!(ab.nodes(), 0);
}

#[test]
fn test_startpos_depth_two_white() {
    let mut p = Position::startpos();
    let mut ab = AlphaBeta::default();
    let mv = ab.best_move(&mut p, 2).unwrap();

    assert!(legal_moves(&p).contains(&mv));
    assert_eq!(p.piece_at(mv.from).map(|pc| pc.color), Some(Color::White));
    // 20 root moves, each searched with a full window: 20 + 20 * 20.
    assert_eq!(ab.nodes(), 420);
}

#[test]
fn test_search_with_maxed_out_counters() {
    let fen = "4k3/8/8/8/8/8/8/4K2R b - - 0 4294967295";
    let mut p = pos(fen);
    let mv = AlphaBeta::default().best_move(&mut p, 2);

    assert!(mv.is_some());
    assert_eq!(p, pos(fen));
}

#[test]
fn test_node_counter_resets_per_call() {
    let mut p = Position::startpos();
    let mut ab = AlphaBeta::default();
    ab.best_move(&mut p, 2);
    let first = ab.nodes();
    ab.best_move(&mut p, 2);
    assert_eq!(ab.nodes(), first);
}

#[test]
fn test_white_takes_hanging_rook() {
    for leaf_sign in [LeafSign::Legacy, LeafSign::Consistent] {
        let mut p = pos("4k3/8/8/3r4/8/8/8/3QK3 w - - 0 1");
        let mut ab = searcher(leaf_sign, CandidateSet::Legal);
        let mv = ab.best_move(&mut p, 1).unwrap();
        assert_eq!(mv.to_string(), "d1d5", "{leaf_sign:?}");
    }
}

#[test]
fn test_black_capture_depends_on_leaf_sign() {
    let fen = "3qk3/8/8/8/3R4/8/8/4K3 b - - 0 1";

    let mut consistent = searcher(LeafSign::Consistent, CandidateSet::Legal);
    let mv = consistent.best_move(&mut pos(fen), 1).unwrap();
    assert_eq!(mv.to_string(), "d8d4");

    // The legacy leaf sign scores Black's depth-1 children from White's side.
    let mut legacy = searcher(LeafSign::Legacy, CandidateSet::Legal);
    let mv = legacy.best_move(&mut pos(fen), 1).unwrap();
    assert_ne!(mv.to_string(), "d8d4");
}

#[test]
fn test_ties_go_to_last_generated_move() {
    // h1h2, h1g2, h1g1 all leave bare kings scoring the same.
    let mut p = pos("k7/8/8/8/8/8/8/7K w - - 0 1");
    let mut ab = AlphaBeta::default();
    let (mv, _) = ab.best_move_scored(&mut p, 1).unwrap();
    assert_eq!(mv.to_string(), "h1g1");
}

#[test]
fn test_depth_zero_root_saturates() {
    let mut p = Position::startpos();
    let mut ab = AlphaBeta::default();
    assert!(ab.best_move(&mut p, 0).is_some());
    assert_eq!(ab.nodes(), 20);
}

#[test]
fn test_best_move_leaves_board_untouched() {
    let start = pos(KIWIPETE);
    for candidates in [CandidateSet::Legal, CandidateSet::LegalAndPseudoLegal] {
        let mut p = start.clone();
        let mut ab = searcher(LeafSign::Legacy, candidates);
        ab.best_move(&mut p, 2);
        assert_eq!(p, start, "{candidates:?}");
    }
}
