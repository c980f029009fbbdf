use std::io::{self, BufRead, Write};
use crate::board::Game;
use crate::search::{Searcher, DEFAULT_DEPTH};

pub struct UciEngine {
    game: Game,
    searcher: Searcher,
}

impl Default for UciEngine {
    fn default() -> Self { Self::new(Searcher::default()) }
}

impl UciEngine {
    pub fn new(searcher: Searcher) -> Self { Self { game: Game::new(), searcher } }

    pub fn game(&self) -> &Game { &self.game }

    fn cmd_uci(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "id name Knightline")?;
        writeln!(out, "id author Knightline Team")?;
        writeln!(out, "option name Threads type spin default 1 min 1 max 512")?;
        writeln!(out, "option name Seed type spin default 0 min 0 max 2147483647")?;
        writeln!(out, "uciok")
    }

    fn cmd_position(&mut self, args: &str) {
        // Supports: 'position startpos [moves ...]' and 'position fen <fen> [moves ...]'
        let mut tokens = args.split_whitespace().peekable();
        let game = match tokens.next() {
            Some("startpos") => Game::new(),
            Some("fen") => {
                let mut fields = Vec::with_capacity(6);
                while let Some(tok) = tokens.peek() {
                    if *tok == "moves" { break; }
                    fields.push(*tok);
                    tokens.next();
                }
                match Game::from_fen(&fields.join(" ")) {
                    Ok(g) => g,
                    Err(e) => { log::warn!("{e}"); return; }
                }
            }
            _ => return,
        };
        self.game = game;
        if let Some("moves") = tokens.next() {
            for tok in tokens {
                match self.game.find_move(tok) {
                    Some(mv) => self.game.make(mv),
                    None => { log::warn!("illegal move in position command: {tok}"); break; }
                }
            }
        }
    }

    fn cmd_go(&mut self, args: &str, out: &mut impl Write) -> io::Result<()> {
        // Only 'go depth N' is honoured; clock arguments are ignored.
        let mut depth = DEFAULT_DEPTH;
        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            if tok == "depth" {
                if let Some(d) = tokens.next().and_then(|s| s.parse::<i32>().ok()) { depth = d; }
            }
        }
        let res = self.searcher.search_root(&mut self.game, depth);
        writeln!(out, "info depth {} score cp {} nodes {}", depth, res.score, res.nodes)?;
        match res.bestmove {
            Some(mv) => writeln!(out, "bestmove {}", self.game.to_uci(mv)),
            None => writeln!(out, "bestmove 0000"),
        }
    }

    fn cmd_setoption(&mut self, args: &str) {
        // setoption name <Name> value <V>
        let mut tokens = args.split_whitespace();
        let (mut name, mut value) = (None, None);
        while let Some(tok) = tokens.next() {
            match tok {
                "name" => name = tokens.next(),
                "value" => value = tokens.next(),
                _ => {}
            }
        }
        match (name.map(str::to_ascii_lowercase).as_deref(), value.and_then(|v| v.parse::<u64>().ok())) {
            (Some("threads"), Some(v)) => self.searcher.set_threads(v as usize),
            (Some("seed"), Some(v)) => self.searcher.reseed(v),
            _ => log::debug!("ignored option: {args}"),
        }
    }

    /// Handle one command line. Returns `false` once the engine should quit.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let line = line.trim();
        if line.is_empty() { return Ok(true); }
        match line {
            "uci" => self.cmd_uci(out)?,
            "isready" => writeln!(out, "readyok")?,
            "ucinewgame" => self.game = Game::new(),
            "quit" => return Ok(false),
            "go" => self.cmd_go("", out)?,
            "stop" => {}
            _ => {
                if let Some(rest) = line.strip_prefix("position ") { self.cmd_position(rest); }
                else if let Some(rest) = line.strip_prefix("go ") { self.cmd_go(rest, out)?; }
                else if let Some(rest) = line.strip_prefix("setoption ") { self.cmd_setoption(rest); }
                else { log::debug!("unknown command: {line}"); }
            }
        }
        out.flush()?;
        Ok(true)
    }

    pub fn run_loop(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for line in stdin.lock().lines() {
            let line = line?;
            if !self.handle(&line, &mut out)? { break; }
        }
        Ok(())
    }
}
