use concentration::{Game, GameState, Position, Slot};
use tracing::debug;

pub enum GameResult {
    WonByPlayer { player_idx: usize },
    Tie,
    Quit,
}

/// Everything a game needs from the outside world: moves of human players,
/// and somewhere to show what is going on.
///
/// Only [`Self::human_flip()`] is required, the notifications do nothing by default.
pub trait Frontend {
    /// Asks the current (human) player for a card to flip.
    ///
    /// `None` means the player wants to quit.
    fn human_flip(&mut self, game: &Game, slot: Slot) -> anyhow::Result<Option<Position>>;

    fn game_started(&mut self, _game: &Game) -> anyhow::Result<()> {
        Ok(())
    }

    fn turn_started(&mut self, _game: &Game) -> anyhow::Result<()> {
        Ok(())
    }

    fn flipped(&mut self, _game: &Game, _pos: Position, _slot: Slot) -> anyhow::Result<()> {
        Ok(())
    }

    fn turn_resolved(&mut self, _game: &Game, _is_match: bool) -> anyhow::Result<()> {
        Ok(())
    }

    fn game_over(&mut self, _game: &Game) -> anyhow::Result<()> {
        Ok(())
    }
}

/// A frontend for games between automated players only.
pub struct Headless;

impl Frontend for Headless {
    fn human_flip(&mut self, _game: &Game, _slot: Slot) -> anyhow::Result<Option<Position>> {
        anyhow::bail!("A human player needs a console to play")
    }
}

/// Plays the game until it is over.
///
/// Returns an error only when the frontend fails or breaks the turn
/// protocol, not when the game ends early.
pub fn play_game<F: Frontend>(game: &mut Game, frontend: &mut F) -> anyhow::Result<GameResult> {
    frontend.game_started(game)?;

    'game: while game.state() == GameState::Playing {
        frontend.turn_started(game)?;
        for slot in [Slot::First, Slot::Second] {
            let pos = if game.current_player().strategy().is_automated() {
                game.get_move()?
            } else {
                match frontend.human_flip(game, slot)? {
                    Some(pos) => pos,
                    None => {
                        game.quit();
                        break 'game;
                    }
                }
            };
            game.make_move(pos, slot)?;
            frontend.flipped(game, pos, slot)?;
        }
        let is_match = game.check_move()?;
        frontend.turn_resolved(game, is_match)?;
    }

    frontend.game_over(game)?;

    let scores: Vec<u32> = game.players().iter().map(|p| p.score()).collect();
    debug!(state = ?game.state(), ?scores, "Game over");
    let game_result = match (game.state(), game.winner_idx()) {
        (GameState::Quit, _) => GameResult::Quit,
        (_, Some(player_idx)) => GameResult::WonByPlayer { player_idx },
        (_, None) => GameResult::Tie,
    };
    Ok(game_result)
}

#[cfg(test)]
mod tests {
    use concentration::{Player, Strategy};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    /// Flips the cards row by row and quits after a number of flips.
    struct Scripted {
        flips_left: usize,
        flips_seen: usize,
        turns_resolved: usize,
    }

    impl Frontend for Scripted {
        fn human_flip(&mut self, game: &Game, _slot: Slot) -> anyhow::Result<Option<Position>> {
            if self.flips_left == 0 {
                return Ok(None);
            }
            self.flips_left -= 1;
            Ok(game.board().hidden_positions().next())
        }

        fn flipped(&mut self, _game: &Game, _pos: Position, _slot: Slot) -> anyhow::Result<()> {
            self.flips_seen += 1;
            Ok(())
        }

        fn turn_resolved(&mut self, _game: &Game, _is_match: bool) -> anyhow::Result<()> {
            self.turns_resolved += 1;
            Ok(())
        }
    }

    fn new_game(players: Vec<Player>, seed: u64) -> Game {
        Game::new(4, 4, players, StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn automated_game_ends_with_a_result() {
        let mut game = new_game(
            vec![
                Player::new("Memory", Strategy::MemoryAutomated),
                Player::new("Random", Strategy::RandomAutomated),
            ],
            11,
        );
        let result = play_game(&mut game, &mut Headless).unwrap();
        match result {
            GameResult::WonByPlayer { player_idx } => {
                assert_eq!(game.winner_idx(), Some(player_idx));
                assert_eq!(game.state(), GameState::Win);
            }
            GameResult::Tie => assert_eq!(game.state(), GameState::Draw),
            GameResult::Quit => panic!("Nobody can quit a headless game"),
        }
    }

    #[test]
    fn headless_game_cannot_ask_humans() {
        let mut game = new_game(vec![Player::new("Ada", Strategy::Human)], 0);
        assert!(play_game(&mut game, &mut Headless).is_err());
    }

    #[test]
    fn human_can_quit_mid_turn() {
        let mut game = new_game(
            vec![
                Player::new("Ada", Strategy::Human),
                Player::new("Grace", Strategy::Human),
            ],
            5,
        );
        let mut frontend = Scripted {
            flips_left: 3,
            flips_seen: 0,
            turns_resolved: 0,
        };
        let result = play_game(&mut game, &mut frontend).unwrap();
        assert!(matches!(result, GameResult::Quit));
        assert_eq!(game.state(), GameState::Quit);
        assert_eq!(frontend.flips_seen, 3);
        assert_eq!(frontend.turns_resolved, 1);
    }
}
