#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use naval_battle::{Game, GameConfig, GameSummary, Phase, RandomOpponent, Tick, DEFAULT_MINES, DEFAULT_TIMER_SECS};
#[cfg(feature = "std")]
use rand::{rngs::SmallRng, SeedableRng};
#[cfg(feature = "std")]
use serde_json::json;

/// Headless game: the player never acts, so every player move is the one
/// forced by the turn timer.
#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        eprintln!("Usage: {} <seed> [mines] [timer]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let mines: usize = args.get(2).map(|s| s.parse()).transpose()?.unwrap_or(DEFAULT_MINES);
    let timer: u8 = args.get(3).map(|s| s.parse()).transpose()?.unwrap_or(DEFAULT_TIMER_SECS);
    let config = GameConfig::new(mines, timer);

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut opponent = RandomOpponent::new();
    let mut game = Game::new(config);
    game.start(&mut rng)?;

    let mut seconds = 0u64;
    loop {
        match game.phase() {
            Phase::PlayerTurn => {
                seconds += 1;
                if let Tick::Forced(res) = game.tick(&mut rng)? {
                    if let Some(name) = res.sunk {
                        eprintln!("Player sank the {}", name);
                    }
                }
            }
            Phase::AiTurn => {
                let res = game.play_ai_turn(&mut opponent, &mut rng)?;
                if let Some(name) = res.sunk {
                    eprintln!("AI sank the {}", name);
                }
            }
            Phase::GameOver | Phase::Setup => break,
        }
    }

    let summary = GameSummary::from_game(&game);
    let result = json!({
        "seed": seed,
        "mines": config.mines(),
        "timer": config.timer_secs(),
        "seconds": seconds,
        "summary": summary,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
