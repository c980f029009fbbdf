use anyhow::Context;
use clap::Parser;
use knightline::selfplay::{SelfPlayParams, generate_games, write_jsonl};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "knightline-selfplay", about = "Play engine-vs-engine games and write JSON records")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 120)]
    max_plies: usize,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long, default_value_t = 2)]
    depth: i32,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value = "out/selfplay")]
    out: PathBuf,
    /// Pick moves at random instead of searching
    #[arg(long)]
    random: bool,
    #[arg(long)]
    openings: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let params = SelfPlayParams {
        games: a.games,
        max_plies: a.max_plies,
        threads: a.threads,
        use_engine: !a.random,
        depth: a.depth,
        seed: a.seed,
        openings_path: a.openings,
    };
    eprintln!("Generating {} games (depth={}, threads={}, engine={})", a.games, a.depth, a.threads, params.use_engine);
    let games = generate_games(&params);
    let path = write_jsonl(&games, &a.out).with_context(|| format!("write records to {}", a.out.display()))?;
    eprintln!("Wrote {} games to {}", games.len(), path.display());
    Ok(())
}
