//! Headless AI-vs-AI simulation.
//!
//! ```text
//! ludo-sim --games 500 --players 4 --difficulties easy,medium,hard,hard
//! ludo-sim --config table.toml --seed 9
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use ludo_engine::ai::{play_out, seat_strategies};
use ludo_engine::{AiDifficulty, BoardLayout, GameConfig, GameEngine, GameRng, PlayerColor, PlayerConfig};

#[derive(Parser)]
#[command(version, about = "Play AI-vs-AI Ludo games and report win counts", long_about = None)]
struct Args {
    /// Number of games to play.
    #[arg(short, long, default_value_t = 100)]
    games: usize,

    /// Seats at the table (ignored with --config).
    #[arg(short, long, default_value_t = 4)]
    players: usize,

    /// Comma-separated difficulty per seat: easy, medium or hard.
    #[arg(short, long, value_delimiter = ',', default_value = "easy,medium,hard,hard")]
    difficulties: Vec<String>,

    /// TOML game configuration. Every seat is played by the AI.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the first game; game `i` uses `seed + i`.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Give unusable rolls to the next seat that can use them.
    #[arg(long)]
    pass_dice: bool,

    /// Transition cap per game.
    #[arg(long, default_value_t = 100_000)]
    max_steps: usize,
}

fn parse_difficulty(name: &str) -> Result<AiDifficulty> {
    match name.trim().to_ascii_lowercase().as_str() {
        "easy" => Ok(AiDifficulty::Easy),
        "medium" => Ok(AiDifficulty::Medium),
        "hard" => Ok(AiDifficulty::Hard),
        other => bail!("unknown difficulty '{other}'"),
    }
}

fn build_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            let seats = PlayerColor::ALL
                .iter()
                .take(args.players)
                .enumerate()
                .map(|(i, &color)| -> Result<PlayerConfig> {
                    let name = args.difficulties.get(i).map_or("medium", String::as_str);
                    let difficulty = parse_difficulty(name)?;
                    Ok(PlayerConfig::ai(color, format!("{color} ({name})"), difficulty))
                })
                .collect::<Result<Vec<_>>>()?;
            GameConfig::new(seats)
        }
    };
    if args.pass_dice {
        config.pass_dice_to_next_player = true;
    }
    config.validate().context("invalid game configuration")?;
    Ok(config)
}

fn report(wins: &BTreeMap<PlayerColor, usize>, config: &GameConfig, played: usize, unfinished: usize) {
    for seat in &config.player_configs {
        let count = wins.get(&seat.color).copied().unwrap_or(0);
        println!(
            "{:<20} {:>6}/{} ratio: {:.3}",
            seat.name,
            count,
            played,
            count as f64 / played.max(1) as f64
        );
    }
    if unfinished > 0 {
        println!("{unfinished} game(s) hit the step cap");
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = build_config(&args)?;
    let engine = GameEngine::new(Arc::new(BoardLayout::standard()), config.clone())
        .context("building engine")?;

    log::info!(
        "Running {} games with {} players",
        args.games,
        config.player_count()
    );

    let mut wins: BTreeMap<PlayerColor, usize> = BTreeMap::new();
    let mut unfinished = 0;
    for game in 0..args.games {
        let mut rng = GameRng::new(args.seed.wrapping_add(game as u64));
        let start = engine.create_initial_state();
        let strategies = seat_strategies(&start);
        let end = play_out(&engine, &start, &strategies, &mut rng, args.max_steps);

        match end.winner {
            Some(color) => *wins.entry(color).or_default() += 1,
            None => unfinished += 1,
        }
        log::debug!("game {game}: winner {:?} after {} rolls", end.winner, end.roll_count);
    }

    report(&wins, &config, args.games, unfinished);
    Ok(())
}
