use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use concentration::{Game, Player};
use itertools::Itertools;
use judge::{
    play_game, play_matchup, print_tournament_results, seat_interactive_players,
    validate_board_size, Console, GameResult, PlayerConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Path to the config JSON files of players. Without any, the players
    /// and board size are asked for interactively.
    #[clap(num_args(0..), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// Number of rows of the board
    #[arg(long, default_value_t = 4)]
    rows: i32,

    /// Number of columns of the board
    #[arg(long, default_value_t = 4)]
    columns: i32,

    /// How many games to play per matchup of automated players
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// How long to show the cards flipped by the computer, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let player_configs = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<Result<Vec<PlayerConfig>, anyhow::Error>>()?;

    let delay = Duration::from_millis(args.delay_ms);
    let mut console = Console::new(std::io::stdin().lock(), std::io::stdout(), delay);

    match player_configs.len() {
        0 => play_interactive(&mut console, &mut rng, |console| {
            let (rows, columns) = console.prompt_board_size()?;
            let players = console.prompt_players()?;
            Ok((rows, columns, players))
        }),
        1 => anyhow::bail!("At least two players are needed"),
        _ => {
            validate_board_size(args.rows, args.columns)?;
            if player_configs.iter().any(|c| !c.strategy.is_automated()) {
                let seated = seat_interactive_players(&player_configs);
                if player_configs.len() > 2 {
                    let nicks = seated.iter().map(|c| c.nick.as_str()).join(" and ");
                    info!("Only {} take part in the interactive game", nicks);
                }
                play_interactive(&mut console, &mut rng, |_| {
                    let players = seated.iter().map(|c| c.to_player()).collect();
                    Ok((args.rows, args.columns, players))
                })
            } else {
                run_tournament(&player_configs, &args, &mut rng)
            }
        }
    }
}

/// Plays rounds on the console until the players have had enough.
fn play_interactive<R, W, F>(
    console: &mut Console<R, W>,
    rng: &mut StdRng,
    mut setup: F,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&mut Console<R, W>) -> anyhow::Result<(i32, i32, Vec<Player>)>,
{
    loop {
        console.clear_screen()?;
        let (rows, columns, players) = setup(console)?;
        let mut game = Game::new(rows, columns, players, StdRng::seed_from_u64(rng.gen()))?;
        match play_game(&mut game, console)? {
            GameResult::WonByPlayer { player_idx } => {
                info!(winner = game.players()[player_idx].name(), "Game over")
            }
            GameResult::Tie => info!("Tie"),
            GameResult::Quit => info!("Game abandoned"),
        }
        if !console.prompt_yes_no("Would you like to start a new game? (yes/no): ")? {
            console.say_goodbye()?;
            return Ok(());
        }
    }
}

fn run_tournament(
    player_configs: &[PlayerConfig],
    args: &Args,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    let matchups: Vec<(usize, usize)> = (0..player_configs.len()).tuple_combinations().collect();

    let mut match_results = HashMap::new();
    for (i1, i2) in matchups {
        let match_score = play_matchup(
            &player_configs[i1],
            &player_configs[i2],
            args.rows,
            args.columns,
            args.num_games,
            rng,
        )?;
        match_results.insert((i1, i2), match_score);
    }

    if player_configs.len() > 2 {
        print_tournament_results(player_configs, &match_results);
    }

    Ok(())
}

/// `RUST_LOG` takes precedence over `--log-level`, e.g. `RUST_LOG=concentration=trace`.
fn initialize_logging(level: LevelFilter) {
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    // stdout belongs to the console
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}
