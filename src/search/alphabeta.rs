use cozy_chess::{Color, Move};
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use crate::board::{Game, Outcome};
use crate::search::eval::{evaluate, MATE_SCORE};

pub const DEFAULT_DEPTH: i32 = 3;

// Window bound; negating it stays in range.
pub const INF: i32 = i32::MAX;

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub depth: i32,
    pub threads: usize,
    pub seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self { Self { depth: DEFAULT_DEPTH, threads: 1, seed: None } }
}

#[derive(Default, Debug, Clone)]
pub struct SearchResult {
    pub bestmove: Option<Move>,
    pub score: i32,
    pub nodes: u64,
}

/// Minimax searcher with alpha-beta pruning.
///
/// Root moves are shuffled before scoring so that equally scored moves are
/// chosen at random; a seeded searcher replays the same choices.
pub struct Searcher {
    nodes: u64,
    threads: usize,
    rng: SmallRng,
}

impl Default for Searcher {
    fn default() -> Self { Self::new(SearchParams::default()) }
}

impl Searcher {
    pub fn new(params: SearchParams) -> Self {
        let rng = match params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self { nodes: 0, threads: params.threads.max(1), rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(SearchParams { seed: Some(seed), ..SearchParams::default() })
    }

    pub fn nodes(&self) -> u64 { self.nodes }

    pub fn set_threads(&mut self, threads: usize) { self.threads = threads.max(1); }

    pub fn reseed(&mut self, seed: u64) { self.rng = SmallRng::seed_from_u64(seed); }

    /// Score `game` to `depth` plies, White maximizing. The game is mutated
    /// through make/undo and handed back in the state it arrived in.
    pub fn alphabeta(&mut self, game: &mut Game, depth: i32, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
        self.nodes += 1;
        match game.outcome() {
            Outcome::Checkmate => return mate_score(game.turn(), depth),
            Outcome::Draw => return evaluate(game.board()),
            Outcome::Ongoing => {}
        }
        if depth <= 0 { return evaluate(game.board()); }

        let moves = game.legal_moves();
        if maximizing {
            let mut best = -INF;
            for mv in moves {
                game.make(mv);
                let score = self.alphabeta(game, depth - 1, alpha, beta, false);
                game.undo_move();
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha { break; }
            }
            best
        } else {
            let mut best = INF;
            for mv in moves {
                game.make(mv);
                let score = self.alphabeta(game, depth - 1, alpha, beta, true);
                game.undo_move();
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha { break; }
            }
            best
        }
    }

    pub fn select_move(&mut self, game: &mut Game, depth: i32) -> Option<Move> {
        self.search_root(game, depth).bestmove
    }

    /// Try every legal move in shuffled order, search each reply tree to
    /// `depth - 1` and keep the first move with the extremal score.
    pub fn search_root(&mut self, game: &mut Game, depth: i32) -> SearchResult {
        // Non-positive depths all mean one greedy ply; clamping keeps `depth - 1` in range.
        let depth = depth.max(0);
        self.nodes = 0;
        let maximizing = game.turn() == Color::White;
        let mut moves = game.legal_moves();
        if moves.is_empty() {
            let score = self.alphabeta(game, 0, -INF, INF, maximizing);
            return SearchResult { bestmove: None, score, nodes: self.nodes };
        }
        moves.shuffle(&mut self.rng);

        let scored = if self.threads > 1 && moves.len() > 1 {
            self.score_parallel(game, &moves, depth)
        } else {
            let mut out = Vec::with_capacity(moves.len());
            for &mv in &moves {
                game.make(mv);
                let score = self.alphabeta(game, depth - 1, -INF, INF, !maximizing);
                game.undo_move();
                out.push((mv, score));
            }
            out
        };

        let mut best: Option<(Move, i32)> = None;
        for (mv, score) in scored {
            debug!("root {} score {}", game.to_uci(mv), score);
            let better = match best {
                None => true,
                Some((_, b)) => if maximizing { score > b } else { score < b },
            };
            if better { best = Some((mv, score)); }
        }
        let (bestmove, score) = match best {
            Some((mv, score)) => (Some(mv), score),
            None => (None, evaluate(game.board())),
        };
        if let Some(mv) = bestmove {
            info!("bestmove {} score {} depth {} nodes {}", game.to_uci(mv), score, depth, self.nodes);
        }
        SearchResult { bestmove, score, nodes: self.nodes }
    }

    // Root split: each branch searches its own copy of the game. Scores come
    // back in shuffled order so the fold above picks the same move as serial.
    fn score_parallel(&mut self, game: &Game, moves: &[Move], depth: i32) -> Vec<(Move, i32)> {
        let maximizing = game.turn() == Color::White;
        let results: Vec<(Move, i32, u64)> = moves.par_iter().map(|&mv| {
            let mut child = game.clone();
            child.make(mv);
            let mut w = Searcher::with_seed(0);
            let score = w.alphabeta(&mut child, depth - 1, -INF, INF, !maximizing);
            (mv, score, w.nodes)
        }).collect();
        self.nodes += results.iter().map(|&(_, _, n)| n).sum::<u64>();
        results.into_iter().map(|(mv, score, _)| (mv, score)).collect()
    }
}

/// Score of a mated position; shallower mates (more depth left) score higher.
pub fn mate_score(mated: Color, depth: i32) -> i32 {
    let score = MATE_SCORE + depth.max(0);
    if mated == Color::White { -score } else { score }
}

/// Alpha-beta search of `game` with a throwaway searcher.
pub fn search(game: &mut Game, depth: i32, alpha: i32, beta: i32, maximizing: bool) -> i32 {
    Searcher::with_seed(0).alphabeta(game, depth, alpha, beta, maximizing)
}

/// Pick a move for the side to move, or `None` when it has no legal move.
pub fn select_move(game: &mut Game, depth: i32) -> Option<Move> {
    Searcher::default().select_move(game, depth)
}
