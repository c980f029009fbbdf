use anyhow::{Context, Result};
use clap::Parser;
use cozy_chess::{Board, Color, File, Rank, Square};
use indicatif::{ProgressBar, ProgressStyle};
use knightline::search::{SearchParams, DEFAULT_DEPTH};
use knightline::session::{GameMode, GameSession};
use knightline::uci::UciEngine;
use knightline::Searcher;
use std::io::{self, Write};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against a minimax opponent", long_about = None)]
struct Args {
    /// Opponent: another human at this terminal or the engine
    #[arg(long, value_enum, default_value_t = GameMode::VsComputer)]
    mode: GameMode,

    /// Your color: 'w' for white, 'b' for black
    #[arg(long, default_value = "w")]
    color: String,

    /// Search depth in plies
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: i32,

    /// Seed for the engine's tie-breaking shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Threads for root-split search
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Starting FEN position
    #[arg(long)]
    fen: Option<String>,

    /// Print tracked piece identities as JSON after every move
    #[arg(long)]
    show_pieces: bool,

    /// Speak UCI on stdin/stdout instead of playing interactively
    #[arg(long)]
    uci: bool,
}

fn parse_color(color_str: &str) -> Result<Color> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Color::White),
        "b" | "black" => Ok(Color::Black),
        _ => anyhow::bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn print_board(board: &Board) {
    println!();
    for &rank in Rank::ALL.iter().rev() {
        print!("{} ", rank as u8 + 1);
        for file in File::ALL {
            let sq = Square::new(file, rank);
            let c = match (board.piece_on(sq), board.color_on(sq)) {
                (Some(p), Some(Color::White)) => knightline::board::cozy::piece_char(p).to_ascii_uppercase(),
                (Some(p), Some(Color::Black)) => knightline::board::cozy::piece_char(p),
                _ => '.',
            };
            print!(" {c}");
        }
        println!();
    }
    println!("\n   a b c d e f g h");
}

fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 { return Ok(None); }
    Ok(Some(input.trim().to_string()))
}

fn computer_turn(session: &mut GameSession) -> bool {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()));
    spinner.set_message("Computer is thinking...");
    let start = Instant::now();
    let applied = session.computer_move_while(|| spinner.tick());
    spinner.finish_and_clear();
    match applied {
        Some(m) => {
            println!("Computer plays: {} ({:.2}s)", m, start.elapsed().as_secs_f32());
            true
        }
        None => {
            println!("No legal moves available!");
            false
        }
    }
}

fn announce_result(session: &GameSession) {
    let status = session.status();
    if status.checkmate {
        let winner = if status.turn == Color::White { "Black" } else { "White" };
        println!("\nCheckmate! {winner} wins!");
    } else if status.draw {
        println!("\nGame is a draw!");
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let params = SearchParams { depth: args.depth, threads: args.threads, seed: args.seed };

    if args.uci {
        let mut engine = UciEngine::new(Searcher::new(params));
        return engine.run_loop().context("UCI loop");
    }

    let human_color = parse_color(&args.color)?;
    let mut session = match args.fen.as_deref() {
        Some(fen) => GameSession::from_fen(fen, args.mode, params)?,
        None => GameSession::new(args.mode, params),
    };
    session.set_computer_color(!human_color);

    println!("Enter moves in UCI format (e.g. e2e4); 'new' restarts, 'quit' exits.");
    loop {
        let status = session.status();
        print_board(session.game().board());
        if args.show_pieces {
            println!("{}", serde_json::to_string(session.pieces())?);
        }
        if status.game_over {
            announce_result(&session);
            break;
        }
        println!("\n{}'s turn{}", if status.turn == Color::White { "White" } else { "Black" }, if status.check { " (check)" } else { "" });

        if session.is_computer_turn() {
            if computer_turn(&mut session) { continue; }
            break;
        }

        let Some(input) = read_line("Your move: ")? else { break };
        match input.as_str() {
            "quit" => {
                println!("Thanks for playing!");
                break;
            }
            "new" => session.reset(),
            "" => {}
            uci => {
                if let Err(e) = session.play_uci(uci) {
                    println!("{e}");
                    let legal: Vec<String> = session.game().legal_moves().into_iter().map(|m| session.game().to_uci(m)).collect();
                    println!("Legal moves: {}", legal.join(" "));
                }
            }
        }
    }

    Ok(())
}
