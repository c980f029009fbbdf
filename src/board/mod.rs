//! Reversible game wrapper over the cozy-chess rules engine.
pub mod cozy;
pub mod zobrist;

pub use cozy::{AppliedMove, Game, MoveFlags, Outcome};
