//! Match driver for the 4x4 reversi engine.
//!
//! Alternates two configurable move sources on one authoritative board,
//! swapping colors between games, and reports aggregate win/loss/draw
//! statistics. Optionally writes the full match record as JSON.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use reversi_board::Board;
use reversi_core::{Action, Color};
use reversi_search::{
    DiskCountEvaluator, MonteCarloSearch, NegaMaxSearch, RandomSearch, UctConfig, UctSearch,
};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// 4x4 reversi match runner.
#[derive(Parser)]
#[command(name = "reversi-selfplay")]
#[command(about = "Play matches between reversi search strategies")]
struct Cli {
    /// Strategy for the first player (black in game 0).
    #[arg(long, value_enum, default_value = "uct")]
    first: StrategyKind,

    /// Strategy for the second player (white in game 0).
    #[arg(long, value_enum, default_value = "random")]
    second: StrategyKind,

    /// Number of games to play; colors swap every game.
    #[arg(short, long, default_value = "10")]
    games: usize,

    /// Random seed for reproducibility.
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Negamax search depth.
    #[arg(long, default_value = "15")]
    depth: usize,

    /// Monte Carlo playouts per root move.
    #[arg(long, default_value = "100")]
    try_num: usize,

    /// UCT simulations per move.
    #[arg(long, default_value = "300")]
    playouts: u32,

    /// Write the match record to this JSON file.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyKind {
    Random,
    Negamax,
    Montecarlo,
    Uct,
}

impl StrategyKind {
    fn name(self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::Negamax => "negamax",
            StrategyKind::Montecarlo => "montecarlo",
            StrategyKind::Uct => "uct",
        }
    }

    fn build(self, cli: &Cli, seed: u64) -> Player {
        match self {
            StrategyKind::Random => Player::Random(RandomSearch::new(ChaCha8Rng::seed_from_u64(seed))),
            StrategyKind::Negamax => {
                Player::NegaMax(NegaMaxSearch::new(DiskCountEvaluator, cli.depth))
            }
            StrategyKind::Montecarlo => Player::MonteCarlo(MonteCarloSearch::new(
                cli.try_num,
                ChaCha8Rng::seed_from_u64(seed),
            )),
            StrategyKind::Uct => Player::Uct(UctSearch::new(
                DiskCountEvaluator,
                UctConfig::with_playouts(cli.playouts),
                ChaCha8Rng::seed_from_u64(seed),
            )),
        }
    }
}

/// A constructed move source.
enum Player {
    Random(RandomSearch<ChaCha8Rng>),
    NegaMax(NegaMaxSearch<DiskCountEvaluator>),
    MonteCarlo(MonteCarloSearch<ChaCha8Rng>),
    Uct(UctSearch<DiskCountEvaluator, ChaCha8Rng>),
}

impl Player {
    fn act(&mut self, board: &mut Board) -> Action {
        match self {
            Player::Random(search) => search.act(board),
            Player::NegaMax(search) => search.act(board),
            Player::MonteCarlo(search) => search.act(board),
            Player::Uct(search) => search.act(board),
        }
    }
}

/// Outcome of one game from the first player's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
enum GameOutcome {
    FirstWins,
    SecondWins,
    Draw,
}

#[derive(Serialize)]
struct GameRecord {
    /// Which color the first player held this game.
    first_plays: &'static str,
    outcome: GameOutcome,
    plies: u8,
    black_disks: u32,
    white_disks: u32,
    /// Set when a player lost by returning an inapplicable action.
    forfeited_by: Option<&'static str>,
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::Black => "black",
        Color::White => "white",
    }
}

#[derive(Serialize)]
struct MatchRecord {
    first: &'static str,
    second: &'static str,
    seed: u64,
    games: Vec<GameRecord>,
}

/// Plays one game to completion. An inapplicable action forfeits the game
/// to the opponent; it is a missed move, not an engine invariant.
fn play_game(first: &mut Player, second: &mut Player, first_plays: Color) -> GameRecord {
    let mut board = Board::new();
    let mut forfeited_by = None;

    while !board.is_game_over() {
        let mover = board.mover();
        let player = if mover == first_plays { &mut *first } else { &mut *second };
        let action = player.act(&mut board);
        if board.apply(action).is_err() {
            forfeited_by = Some(mover);
            break;
        }
    }

    let outcome = match forfeited_by {
        Some(color) => {
            if color == first_plays {
                GameOutcome::SecondWins
            } else {
                GameOutcome::FirstWins
            }
        }
        None => {
            // Loop only exits unforfeited when the game is over.
            let winner = board.winner().expect("BUG: unfinished game left the loop");
            match winner.color() {
                Some(color) if color == first_plays => GameOutcome::FirstWins,
                Some(_) => GameOutcome::SecondWins,
                None => GameOutcome::Draw,
            }
        }
    };

    GameRecord {
        first_plays: color_name(first_plays),
        outcome,
        plies: board.ply(),
        black_disks: board.count(Color::Black),
        white_disks: board.count(Color::White),
        forfeited_by: forfeited_by.map(color_name),
    }
}

fn run_match(cli: &Cli) -> MatchRecord {
    let mut first = cli.first.build(cli, cli.seed);
    let mut second = cli.second.build(cli, cli.seed.wrapping_add(1));

    let mut games = Vec::with_capacity(cli.games);
    for i in 0..cli.games {
        // Swap colors every game for fairness.
        let first_plays = if i % 2 == 0 { Color::Black } else { Color::White };
        let record = play_game(&mut first, &mut second, first_plays);
        games.push(record);

        let (wins, losses, draws) = tally(&games);
        println!(
            "Game {}/{}: {} {} - {} {} ({} draws)",
            i + 1,
            cli.games,
            cli.first.name(),
            wins,
            losses,
            cli.second.name(),
            draws
        );
    }

    MatchRecord {
        first: cli.first.name(),
        second: cli.second.name(),
        seed: cli.seed,
        games,
    }
}

fn tally(games: &[GameRecord]) -> (usize, usize, usize) {
    let wins = games
        .iter()
        .filter(|g| g.outcome == GameOutcome::FirstWins)
        .count();
    let losses = games
        .iter()
        .filter(|g| g.outcome == GameOutcome::SecondWins)
        .count();
    (wins, losses, games.len() - wins - losses)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    println!(
        "Playing {} games: {} vs {} (seed {})",
        cli.games,
        cli.first.name(),
        cli.second.name(),
        cli.seed
    );
    let record = run_match(&cli);

    let (wins, losses, draws) = tally(&record.games);
    println!("================================");
    println!(
        "{}: {} wins, {}: {} wins, {} draws",
        record.first, wins, record.second, losses, draws
    );

    if let Some(path) = &cli.output {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &record)
            .with_context(|| format!("failed to write match record to {}", path.display()))?;
        println!("Match record written to {}", path.display());
    }
    Ok(())
}
