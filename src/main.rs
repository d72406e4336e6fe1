#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::path::PathBuf;

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use naval_battle::{
    init_logging,
    interface::{coord_to_string, help_text, parse_input, render_board, render_status, Input},
    read_history, CellState, FileRecorder, GameConfig, GameController, GameRecorder, LogNotifier,
    NullRecorder, Phase, Snapshot, DEFAULT_MINES, DEFAULT_TIMER_SECS,
};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the AI in the terminal.
    Play {
        #[arg(long, default_value_t = DEFAULT_MINES, help = "Number of mines (clamped to 1-10)")]
        mines: usize,
        #[arg(long, default_value_t = DEFAULT_TIMER_SECS, help = "Seconds per turn (clamped to 1-10)")]
        timer: u8,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Append finished matches to this file")]
        history: Option<PathBuf>,
        #[arg(long, help = "Send a victory notice to this address when you win")]
        recipient: Option<String>,
    },
    /// Print the matches stored in a history file.
    History { path: PathBuf },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            mines,
            timer,
            seed,
            history,
            recipient,
        } => play(GameConfig::new(mines, timer), seed, history, recipient).await,
        Commands::History { path } => {
            let records = read_history(&path).await?;
            if records.is_empty() {
                println!("No matches recorded in {}", path.display());
            }
            for record in records {
                let s = &record.summary;
                println!(
                    "{}  winner: {:<6} score: {:>2}  player {:>2} / AI {:>2}  moves: {:>3}{}",
                    record.match_id,
                    s.winner.as_deref().unwrap_or("none"),
                    s.winner_score,
                    s.player_score,
                    s.ai_score,
                    s.total_moves,
                    if s.ended_by_mine { "  (mine)" } else { "" }
                );
            }
            Ok(())
        }
    }
}

#[cfg(feature = "std")]
fn print_snapshot(snapshot: &Snapshot) {
    let reveal = snapshot.view.phase == Phase::GameOver;
    print!("\n{}", render_board(snapshot, reveal));
    print!("{}", render_status(snapshot));
}

#[cfg(feature = "std")]
async fn play(
    config: GameConfig,
    seed: Option<u64>,
    history: Option<PathBuf>,
    recipient: Option<String>,
) -> anyhow::Result<()> {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let rng = if let Some(s) = seed {
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    };
    let recorder: Box<dyn GameRecorder> = match history {
        Some(path) => Box::new(FileRecorder::new(path)),
        None => Box::new(NullRecorder),
    };
    let mut controller = GameController::new(config, rng, recorder, Box::new(LogNotifier))?;
    if let Some(r) = recipient {
        controller = controller.with_recipient(r);
    }

    println!("{}", help_text(&config));
    let handle = controller.spawn();

    let mut updates = handle.subscribe();
    let renderer = tokio::spawn(async move {
        let mut last_key = None;
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            let view = &snapshot.view;
            let key = (
                snapshot.match_id,
                view.moves.len(),
                view.phase,
                view.paused,
                snapshot.advisory.clone(),
            );
            if last_key.as_ref() != Some(&key) {
                print_snapshot(&snapshot);
                last_key = Some(key);
            } else if view.phase == Phase::PlayerTurn && !view.paused && view.time_left <= 3 {
                println!("    {}s left", view.time_left);
            }
        }
    });

    print_snapshot(&handle.snapshot());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_input(&line) {
            Ok(Input::Fire(r, c)) => {
                let snapshot = handle.snapshot();
                let view = &snapshot.view;
                if view.phase != Phase::PlayerTurn {
                    println!("Not your turn right now.");
                    continue;
                }
                if matches!(view.cells[r][c], CellState::Hit | CellState::Miss) {
                    println!("You already fired at {}.", coord_to_string(r, c));
                    continue;
                }
                handle.submit_move(r, c).await?;
            }
            Ok(Input::Pause) => handle.pause().await?,
            Ok(Input::Resume) => handle.resume().await?,
            Ok(Input::Restart) => handle.restart(config).await?,
            Ok(Input::Help) => println!("{}", help_text(&config)),
            Ok(Input::Quit) => break,
            Err(e) => println!("{}", e),
        }
    }

    handle.shutdown().await?;
    renderer.abort();
    Ok(())
}
