use serde::{Deserialize, Serialize};

/// How a player picks the cards to flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Moves come from outside the engine, e.g. from the keyboard.
    Human,
    /// Flips a uniformly random face-down card every time.
    #[serde(rename = "random")]
    RandomAutomated,
    /// Flips random cards too, but completes every pair it has seen.
    #[serde(rename = "memory")]
    MemoryAutomated,
}

impl Strategy {
    pub fn is_automated(self) -> bool {
        !matches!(self, Strategy::Human)
    }
}

/// A participant in one game, together with their score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    name: String,
    score: u32,
    strategy: Strategy,
}

impl Player {
    pub fn new(name: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            score: 0,
            strategy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of pairs this player has found.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub(crate) fn increase_score(&mut self) {
        self.score += 1;
    }
}
