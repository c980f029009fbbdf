//! Move selection: static evaluation and alpha-beta minimax.
pub mod alphabeta;
pub mod eval;

pub use alphabeta::{mate_score, search, select_move, SearchParams, SearchResult, Searcher, DEFAULT_DEPTH, INF};
pub use eval::evaluate;
