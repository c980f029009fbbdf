use crate::board::Game;

/// Leaf count of the legal move tree, walked with make/undo on one game.
pub fn perft(game: &mut Game, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let mut nodes = 0u64;
    for mv in game.legal_moves() {
        game.make(mv);
        nodes += perft(game, depth - 1);
        game.undo_move();
    }
    nodes
}
