use cozy_chess::Color;
use knightline::board::{Game, Outcome};
use knightline::search::{mate_score, search, Searcher, SearchParams, INF};
use knightline::search::eval::evaluate;

// Reference minimax without pruning, same leaf scoring as the engine.
fn minimax(game: &mut Game, depth: i32, maximizing: bool) -> i32 {
    match game.outcome() {
        Outcome::Checkmate => return mate_score(game.turn(), depth),
        Outcome::Draw => return evaluate(game.board()),
        Outcome::Ongoing => {}
    }
    if depth <= 0 { return evaluate(game.board()); }
    let scores = game.legal_moves().into_iter().map(|mv| {
        game.make(mv);
        let s = minimax(game, depth - 1, !maximizing);
        game.undo_move();
        s
    });
    if maximizing { scores.max().unwrap() } else { scores.min().unwrap() }
}

const POSITIONS: [&str; 4] = [
    "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 2 3",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1",
    "k7/8/8/8/8/8/3qQ3/7K b - - 0 1",
];

#[test]
fn search_returns_legal_move_startpos() {
    let mut game = Game::new();
    let mut searcher = Searcher::with_seed(7);
    let res = searcher.search_root(&mut game, 3);
    let bm = res.bestmove.expect("no move found at depth 3");
    assert!(game.legal_moves().contains(&bm));
    assert!(res.nodes > 20);
}

#[test]
fn search_prefers_winning_queen_capture() {
    // Position where Qe2xd2 wins a queen (and is legal)
    let mut game = Game::from_fen("k7/8/8/8/8/8/3qQ3/7K w - - 0 1").unwrap();
    let mut searcher = Searcher::with_seed(1);
    let bm = searcher.select_move(&mut game, 2).expect("expected a best move");
    assert_eq!(game.to_uci(bm), "e2d2", "expected Qe2xd2 as best move");
}

#[test]
fn black_minimizes() {
    // Same trade with Black to move: Qd2xe2.
    let mut game = Game::from_fen("k7/8/8/8/8/8/3qQ3/7K b - - 0 1").unwrap();
    let mut searcher = Searcher::with_seed(1);
    let res = searcher.search_root(&mut game, 2);
    assert_eq!(res.bestmove.map(|m| game.to_uci(m)).as_deref(), Some("d2e2"));
    assert!(res.score < 0, "black-favoured score expected, got {}", res.score);
}

#[test]
fn alphabeta_matches_plain_minimax() {
    for fen in POSITIONS {
        let mut game = Game::from_fen(fen).unwrap();
        let maximizing = game.turn() == Color::White;
        let pruned = search(&mut game, 3, -INF, INF, maximizing);
        let full = minimax(&mut game, 3, maximizing);
        assert_eq!(pruned, full, "pruning changed the value of {fen}");
    }
}

#[test]
fn search_restores_the_position() {
    for fen in POSITIONS {
        let mut game = Game::from_fen(fen).unwrap();
        let before = game.fen();
        let ply = game.ply();
        let mut searcher = Searcher::with_seed(3);
        searcher.search_root(&mut game, 3);
        let maximizing = game.turn() == Color::White;
        search(&mut game, 2, -INF, INF, maximizing);
        assert_eq!(game.fen(), before);
        assert_eq!(game.ply(), ply);
    }
}

#[test]
fn root_parallel_bestmove_equals_single_thread() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 2 3";
    let mut g1 = Game::from_fen(fen).unwrap();
    let mut g2 = g1.clone();
    let mut s1 = Searcher::new(SearchParams { depth: 3, threads: 1, seed: Some(11) });
    let mut s2 = Searcher::new(SearchParams { depth: 3, threads: 4, seed: Some(11) });
    let r1 = s1.search_root(&mut g1, 3);
    let r2 = s2.search_root(&mut g2, 3);
    assert_eq!(r2.score, r1.score, "score differs between single and multi-thread at fixed depth");
    assert_eq!(r2.bestmove, r1.bestmove);
    assert_eq!(g2.fen(), fen);
}

#[test]
fn deeper_search_prefers_the_faster_mate() {
    // Ra1-a8 mates now; the engine must not drift into a slower mate at depth 3.
    let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    let mut searcher = Searcher::with_seed(5);
    let res = searcher.search_root(&mut game, 3);
    assert_eq!(res.score, mate_score(Color::Black, 2));
}
