//! Property-based tests using proptest.

use cozy_chess::Color;
use knightline::board::Game;
use knightline::search::{search, INF};
use knightline::tracking::TrackedPieces;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Play `plies` random legal moves from the start position.
fn random_game(seed: u64, plies: usize) -> Game {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new();
    for _ in 0..plies {
        let moves = game.legal_moves();
        if moves.is_empty() { break; }
        game.make(moves[rng.gen_range(0..moves.len())]);
    }
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: undoing every applied move restores the starting position
    #[test]
    fn prop_apply_undo_restores_state(seed in any::<u64>(), plies in 1..40usize) {
        let mut game = random_game(seed, plies);
        while game.undo_move().is_some() {}
        prop_assert_eq!(game.fen(), Game::new().fen());
        prop_assert_eq!(game.ply(), 0);
    }

    /// Property: search hands back the position it was given
    #[test]
    fn prop_search_leaves_position_unchanged(seed in any::<u64>(), plies in 0..30usize, depth in 0..3i32) {
        let mut game = random_game(seed, plies);
        let fen = game.fen();
        let ply = game.ply();
        let maximizing = game.turn() == Color::White;
        search(&mut game, depth, -INF, INF, maximizing);
        prop_assert_eq!(game.fen(), fen);
        prop_assert_eq!(game.ply(), ply);
    }

    /// Property: identities stay consistent with the board move after move
    #[test]
    fn prop_tracking_follows_random_games(seed in any::<u64>(), plies in 1..80usize) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new();
        let mut pieces = TrackedPieces::from_game(&game);
        for _ in 0..plies {
            let moves = game.legal_moves();
            if moves.is_empty() { break; }
            let applied = game.apply_move(moves[rng.gen_range(0..moves.len())]).unwrap();
            let next = pieces.advance(&applied);
            let expected_len = if applied.is_capture() { pieces.len() - 1 } else { pieces.len() };
            prop_assert_eq!(next.len(), expected_len);
            for p in next.iter() {
                let prev = pieces.get(p.id);
                prop_assert!(prev.is_some(), "new identity {} appeared", p.id);
            }
            prop_assert!(next.matches_board(game.board()));
            pieces = next;
        }
    }
}
