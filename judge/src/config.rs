use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use concentration::{is_valid_board, Player, Strategy};
use serde::{Deserialize, Serialize};

/// The smallest number of rows or columns offered to players.
pub const MIN_BOARD_SIZE: i32 = 4;
/// The largest number of rows or columns offered to players.
///
/// Positions are typed as a letter and a single digit, so this must stay below 10.
pub const MAX_BOARD_SIZE: i32 = 6;

/// A player as described in a JSON config file, e.g.
///
/// ```json
/// { "nick": "Computer", "strategy": "memory" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub nick: String,
    pub strategy: Strategy,
}

impl PlayerConfig {
    pub fn new(nick: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            nick: nick.into(),
            strategy,
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Cannot open player config '{}'", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid player config '{}'", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid player config '{}'", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.nick.trim().is_empty() {
            anyhow::bail!("The nick is empty");
        }
        Ok(())
    }

    /// A fresh player with a score of zero.
    pub fn to_player(&self) -> Player {
        Player::new(self.nick.clone(), self.strategy)
    }
}

/// Picks the two players of an interactive game. Humans are seated first,
/// otherwise the order of `configs` is kept.
pub fn seat_interactive_players(configs: &[PlayerConfig]) -> Vec<&PlayerConfig> {
    let (humans, automated): (Vec<_>, Vec<_>) =
        configs.iter().partition(|c| !c.strategy.is_automated());
    humans.into_iter().chain(automated).take(2).collect()
}

pub fn is_board_size_in_range(size: i32) -> bool {
    (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size)
}

pub fn validate_board_size(rows: i32, columns: i32) -> anyhow::Result<()> {
    if !is_board_size_in_range(rows) || !is_board_size_in_range(columns) {
        anyhow::bail!(
            "The board must have between {} and {} rows and columns, not {}x{}",
            MIN_BOARD_SIZE,
            MAX_BOARD_SIZE,
            rows,
            columns
        );
    }
    if !is_valid_board(rows, columns) {
        anyhow::bail!("A {}x{} board has an odd number of cards", rows, columns);
    }
    Ok(())
}
