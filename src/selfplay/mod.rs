use cozy_chess::{Color, Move};
use rand::{SeedableRng, Rng};
use rand::rngs::SmallRng;
use serde::Serialize;
use crate::board::{Game, Outcome};
use crate::error::Result;
use crate::search::{SearchParams, Searcher};
use crate::tracking::TrackedPieces;
use std::fs::{File, create_dir_all};
use std::io::{Write, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    pub threads: usize,
    pub use_engine: bool,
    pub depth: i32,
    pub seed: u64,
    pub openings_path: Option<PathBuf>, // optional path to FEN list (one per line)
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self { games: 1, max_plies: 80, threads: 1, use_engine: true, depth: 2, seed: 42, openings_path: None }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub start_fen: String,
    pub moves: Vec<String>,
    pub result: i8, // 1 white win, 0 draw or unfinished, -1 black win
    pub final_fen: String,
    pub pieces: TrackedPieces,
}

pub fn generate_games(params: &SelfPlayParams) -> Vec<GameRecord> {
    let mut rng = SmallRng::seed_from_u64(params.seed);
    let openings = load_openings(params);
    let mut games = Vec::with_capacity(params.games);
    for gi in 0..params.games {
        let game = if !openings.is_empty() {
            let idx = (rng.gen::<u64>() ^ (gi as u64)) as usize % openings.len();
            openings[idx].clone()
        } else { Game::new() };
        let mut searcher = Searcher::new(SearchParams {
            depth: params.depth,
            threads: params.threads,
            seed: Some(rng.gen()),
        });
        games.push(play_game(game, params, &mut searcher, &mut rng));
    }
    games
}

fn play_game(mut game: Game, params: &SelfPlayParams, searcher: &mut Searcher, rng: &mut SmallRng) -> GameRecord {
    let start_fen = game.fen();
    let mut pieces = TrackedPieces::from_game(&game);
    let mut moves = Vec::new();
    let mut result = 0;
    for _ in 0..params.max_plies {
        match game.outcome() {
            Outcome::Checkmate => {
                result = if game.turn() == Color::White { -1 } else { 1 };
                break;
            }
            Outcome::Draw => break,
            Outcome::Ongoing => {}
        }
        let mv = if params.use_engine {
            searcher.select_move(&mut game, params.depth)
        } else {
            select_random_move(&game, rng)
        };
        let Some(mv) = mv else { break };
        match game.apply_move(mv) {
            Ok(applied) => {
                pieces = pieces.advance(&applied);
                moves.push(applied.to_string());
            }
            Err(e) => {
                log::warn!("self-play move rejected: {e}");
                break;
            }
        }
    }
    if !pieces.matches_board(game.board()) {
        log::warn!("tracked pieces diverged from board {}", game.fen());
    }
    GameRecord { start_fen, moves, result, final_fen: game.fen(), pieces }
}

fn select_random_move(game: &Game, rng: &mut SmallRng) -> Option<Move> {
    let moves = game.legal_moves();
    if moves.is_empty() { None } else { Some(moves[rng.gen_range(0..moves.len())]) }
}

fn load_openings(params: &SelfPlayParams) -> Vec<Game> {
    let mut out = Vec::new();
    let Some(ref p) = params.openings_path else { return out };
    let text = match std::fs::read_to_string(p) {
        Ok(t) => t,
        Err(e) => {
            log::warn!("cannot read openings {}: {e}", p.display());
            return out;
        }
    };
    for line in text.lines() {
        let raw = line.trim();
        if raw.is_empty() || raw.starts_with('#') { continue; }
        // Support EPD (4 fields) by padding halfmove/fullmove
        let parts: Vec<&str> = raw.split_whitespace().collect();
        let fen = if parts.len() >= 6 {
            parts[0..6].join(" ")
        } else if parts.len() >= 4 {
            let mut v = parts[0..4].to_vec();
            v.push("0"); v.push("1"); v.join(" ")
        } else { raw.to_string() };
        match Game::from_fen(&fen) {
            Ok(g) => out.push(g),
            Err(e) => log::warn!("skipping opening: {e}"),
        }
    }
    out
}

/// Write one JSON object per game to `out_dir/games.jsonl`.
pub fn write_jsonl<P: AsRef<Path>>(games: &[GameRecord], out_dir: P) -> Result<PathBuf> {
    create_dir_all(&out_dir)?;
    let path = out_dir.as_ref().join("games.jsonl");
    let mut w = BufWriter::new(File::create(&path)?);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(path)
}
