//! cafe-sim - headless CafeWars match between two greedy players
//!
//! Seat 0 is played by calling the greedy policy directly, seat 1 by the
//! board's built-in AI. Queued attacks are ticked out between turns.

use clap::Parser;
use log::info;
use std::path::PathBuf;

use cafe_wars::{ai::TurnPolicy, error::PersistResult, Board, BoardConfig, GreedyPolicy, PlayerId};

#[derive(Parser, Debug)]
#[command(name = "cafe-sim", author, version, about, long_about = None)]
struct Args {
    /// Shuffle seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many rounds if nobody has won
    #[arg(short, long, default_value_t = 50)]
    turns: u32,

    /// Seconds per update tick
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Slots per seat
    #[arg(long, default_value_t = 4)]
    width: usize,

    /// Resume from a text save instead of dealing a new game
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write a text save (plus deck files) when the run ends
    #[arg(long)]
    save: Option<PathBuf>,

    /// Write a binary snapshot when the run ends
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

/// Tick until nothing is queued or in flight, or the game ends.
fn drain(board: &mut Board, dt: f32) {
    while !board.queue().is_idle() && !board.is_game_over() {
        board.update(dt);
    }
    // One more tick so a lethal hit that emptied the queue is noticed
    board.update(dt);
}

fn main() -> PersistResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = BoardConfig::default()
        .with_seed(args.seed)
        .with_board_width(args.width)
        .with_ai()
        .with_player_names("Greedy", "House");
    let mut board = Board::new(config);
    if let Some(path) = &args.load {
        board.load_game(path)?;
    }

    info!("starting match: seed {}, up to {} rounds", args.seed, args.turns);
    let dt = args.dt.max(0.01);

    let mut rounds = 0;
    while !board.is_game_over() && rounds < args.turns {
        let player = board.current_player();
        if board.config().ai_player != Some(player) {
            GreedyPolicy.take_turn(&mut board, player);
            drain(&mut board, dt);
        }
        if board.is_game_over() || board.end_turn().is_err() {
            break;
        }
        // The built-in AI played during end_turn; let its attacks land
        drain(&mut board, dt);
        rounds += 1;
    }

    let state = board.state();
    for player in PlayerId::all() {
        let seat = state.player(player);
        info!(
            "{} ({player}): {} hp, {} cards in hand, {} in deck",
            seat.name,
            seat.health,
            seat.hand.len(),
            seat.deck.len()
        );
    }
    match board.winner() {
        Some(winner) => info!("{} wins after {rounds} rounds", state.player(winner).name),
        None => info!("no winner after {rounds} rounds"),
    }

    if let Some(path) = &args.save {
        board.save_game(path)?;
    }
    if let Some(path) = &args.snapshot {
        board.save_snapshot(path)?;
    }
    Ok(())
}
