// Chess opponent: alpha-beta minimax over cozy-chess plus stable piece identities
pub mod board;
pub mod error;
pub mod perft;
pub mod search;
pub mod selfplay;
pub mod session;
pub mod tracking;
pub mod uci;

pub use board::{AppliedMove, Game, MoveFlags, Outcome};
pub use error::{GameError, Result};
pub use search::{search, select_move, SearchParams, Searcher};
pub use tracking::{advance, initialize_tracking, PieceId, TrackedPiece, TrackedPieces};
