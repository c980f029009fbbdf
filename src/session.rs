//! A game in progress: the board, its tracked pieces and an optional
//! computer opponent.

use cozy_chess::{Color, Move, Piece, Rank, Square};
use log::{info, warn};
use crate::board::{AppliedMove, Game, Outcome};
use crate::error::{GameError, Result};
use crate::search::{SearchParams, Searcher};
use crate::tracking::TrackedPieces;
use std::thread;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum GameMode {
    VsPlayer,
    VsComputer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameStatus {
    pub turn: Color,
    pub check: bool,
    pub checkmate: bool,
    pub draw: bool,
    pub game_over: bool,
}

pub struct GameSession {
    game: Game,
    pieces: TrackedPieces,
    history: Vec<String>,
    mode: GameMode,
    computer: Color,
    depth: i32,
    searcher: Searcher,
}

impl GameSession {
    pub fn new(mode: GameMode, params: SearchParams) -> Self {
        Self::with_game(Game::new(), mode, params)
    }

    pub fn from_fen(fen: &str, mode: GameMode, params: SearchParams) -> Result<Self> {
        Ok(Self::with_game(Game::from_fen(fen)?, mode, params))
    }

    fn with_game(game: Game, mode: GameMode, params: SearchParams) -> Self {
        let pieces = TrackedPieces::from_game(&game);
        Self {
            game,
            pieces,
            history: Vec::new(),
            mode,
            computer: Color::Black,
            depth: params.depth,
            searcher: Searcher::new(params),
        }
    }

    pub fn game(&self) -> &Game { &self.game }
    pub fn pieces(&self) -> &TrackedPieces { &self.pieces }
    pub fn history(&self) -> &[String] { &self.history }
    pub fn mode(&self) -> GameMode { self.mode }
    pub fn computer_color(&self) -> Color { self.computer }
    pub fn set_computer_color(&mut self, color: Color) { self.computer = color; }

    pub fn status(&self) -> GameStatus {
        let outcome = self.game.outcome();
        GameStatus {
            turn: self.game.turn(),
            check: self.game.is_check(),
            checkmate: outcome == Outcome::Checkmate,
            draw: outcome == Outcome::Draw,
            game_over: outcome.is_terminal(),
        }
    }

    /// Play `from`-`to` for the side to move. A pawn reaching the last rank
    /// promotes to `promotion`, or to a queen when none is given.
    pub fn play(&mut self, from: Square, to: Square, promotion: Option<Piece>) -> Result<AppliedMove> {
        let candidates = self.game.legal_moves_from(from);
        let last_rank = if self.game.turn() == Color::White { Rank::Eighth } else { Rank::First };
        let promotes = self.game.board().piece_on(from) == Some(Piece::Pawn) && to.rank() == last_rank;
        let wanted = if promotes { Some(promotion.unwrap_or(Piece::Queen)) } else { None };
        let mv = candidates.into_iter()
            .find(|&m| m.promotion == wanted && (m.to == to || self.game.to_uci(m).ends_with(&to.to_string())))
            .ok_or_else(|| GameError::IllegalMove { notation: format!("{from}{to}") })?;
        self.commit(mv)
    }

    pub fn play_uci(&mut self, uci: &str) -> Result<AppliedMove> {
        let mv = self.game.find_move(uci).ok_or_else(|| GameError::IllegalMove { notation: uci.to_string() })?;
        self.commit(mv)
    }

    pub fn is_computer_turn(&self) -> bool {
        self.mode == GameMode::VsComputer && self.game.turn() == self.computer && !self.game.outcome().is_terminal()
    }

    /// Let the engine move if it is its turn. Returns the committed move.
    pub fn computer_move(&mut self) -> Option<AppliedMove> {
        self.computer_move_while(|| {})
    }

    /// Like `computer_move`, but the search runs on a scoped worker over a
    /// copy of the game while `tick` keeps running on this thread.
    pub fn computer_move_while(&mut self, mut tick: impl FnMut()) -> Option<AppliedMove> {
        if !self.is_computer_turn() { return None; }
        let mut scratch = self.game.clone();
        let depth = self.depth;
        let searcher = &mut self.searcher;
        let searched = thread::scope(|s| {
            let worker = s.spawn(move || searcher.select_move(&mut scratch, depth));
            while !worker.is_finished() {
                tick();
                thread::sleep(Duration::from_millis(20));
            }
            worker.join()
        });
        let mv = match searched {
            Ok(mv) => mv?,
            Err(_) => {
                warn!("search thread panicked");
                return None;
            }
        };
        match self.commit(mv) {
            Ok(applied) => Some(applied),
            Err(e) => {
                warn!("engine move rejected: {e}");
                None
            }
        }
    }

    pub fn commit(&mut self, mv: Move) -> Result<AppliedMove> {
        let applied = self.game.apply_move(mv)?;
        self.pieces = self.pieces.advance(&applied);
        self.history.push(applied.to_string());
        info!("{} played {}", if applied.color == Color::White { "white" } else { "black" }, applied);
        Ok(applied)
    }

    pub fn reset(&mut self) {
        self.game = Game::new();
        self.pieces = TrackedPieces::from_game(&self.game);
        self.history.clear();
    }
}
