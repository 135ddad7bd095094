use std::collections::HashMap;

use concentration::Game;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::{play_game, GameResult, Headless, PlayerConfig};

#[derive(Debug, Default)]
pub struct MatchScore {
    pub wins: [usize; 2],
    pub ties: usize,
    /// Pairs found by each player, summed over all games.
    pub pairs: [u32; 2],
}

impl MatchScore {
    pub fn num_games(&self) -> usize {
        self.wins[0] + self.wins[1] + self.ties
    }

    pub fn average_pairs(&self, player: usize) -> f32 {
        match self.num_games() {
            0 => 0.0,
            n => self.pairs[player] as f32 / n as f32,
        }
    }

    fn percentage(&self, count: usize) -> f32 {
        match self.num_games() {
            0 => 0.0,
            n => count as f32 / n as f32 * 100.0,
        }
    }
}

/// Plays `num_games` games between two automated players on a fresh board
/// each time. The starting player is picked randomly for every game.
pub fn play_matchup(
    player_1: &PlayerConfig,
    player_2: &PlayerConfig,
    rows: i32,
    columns: i32,
    num_games: usize,
    rng: &mut StdRng,
) -> anyhow::Result<MatchScore> {
    let player_names = [player_1.nick.as_str(), player_2.nick.as_str()];
    let mut match_score = MatchScore::default();

    for game_idx in 0..num_games {
        // seats[i] is the index into `player_names` of the player in seat i
        let seats = if rng.gen::<bool>() { [1, 0] } else { [0, 1] };
        let configs = [player_1, player_2];
        let players = seats.iter().map(|&idx| configs[idx].to_player()).collect();
        let game_rng = StdRng::seed_from_u64(rng.gen());
        let mut game = Game::new(rows, columns, players, game_rng)?;

        match play_game(&mut game, &mut Headless)? {
            GameResult::WonByPlayer { player_idx } => {
                let winner = seats[player_idx];
                debug!(winner = player_names[winner], game_idx);
                match_score.wins[winner] += 1;
            }
            GameResult::Tie => {
                debug!(game_idx, "Tie");
                match_score.ties += 1;
            }
            GameResult::Quit => anyhow::bail!("An automated player quit game {}", game_idx),
        }
        for (seat, player) in game.players().iter().enumerate() {
            match_score.pairs[seats[seat]] += player.score();
        }
    }

    eprintln!(
        "{} vs {} on {}x{}: {}",
        player_names[0],
        player_names[1],
        rows,
        columns,
        format_score(&match_score)
    );

    Ok(match_score)
}

fn format_score(score: &MatchScore) -> String {
    format!(
        "{:5.1}% {:5.1}% {:5.1}% | {:6.2} {:6.2}",
        score.percentage(score.wins[0]),
        score.percentage(score.wins[1]),
        score.percentage(score.ties),
        score.average_pairs(0),
        score.average_pairs(1),
    )
}

/// Prints one line per matchup, in the order the matchups were played.
pub fn print_tournament_results(
    player_configs: &[PlayerConfig],
    match_results: &HashMap<(usize, usize), MatchScore>,
) {
    let width = player_configs
        .iter()
        .map(|c| c.nick.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);
    let mut keys: Vec<_> = match_results.keys().copied().collect();
    keys.sort_unstable();

    println!("\nTournament results (win %, tie %, average pairs found):\n");
    println!(
        "{:w$}   {:w$} | {:>6} {:>6} {:>6} | {:>6} {:>6}",
        "p1", "p2", "p1", "p2", "tie", "p1", "p2",
        w = width
    );
    for (i, j) in keys {
        println!(
            "{:w$} - {:w$} | {}",
            player_configs[i].nick,
            player_configs[j].nick,
            format_score(&match_results[&(i, j)]),
            w = width
        );
    }
}
