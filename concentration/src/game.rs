use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    random_hidden_position, Board, Card, IllegalFlip, IllegalMove, MoveMemory, OutOfRange, Player,
    Position, SetupError, Strategy, Symbol,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    /// All pairs are found and one player has the most.
    Win,
    /// All pairs are found and the top score is shared.
    Draw,
    /// A player left before all pairs were found.
    Quit,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        self != GameState::Playing
    }
}

/// Which of the two flips of a turn a move is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

impl TryFrom<u8> for Slot {
    type Error = IllegalMove;

    fn try_from(slot: u8) -> Result<Self, Self::Error> {
        match slot {
            1 => Ok(Slot::First),
            2 => Ok(Slot::Second),
            _ => Err(IllegalMove::InvalidSlot(slot)),
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::First => write!(f, "first"),
            Slot::Second => write!(f, "second"),
        }
    }
}

/// One round of the game, from dealing the board until all pairs are found
/// or somebody quits.
///
/// A turn consists of two calls to [`Self::make_move()`], one per [`Slot`],
/// followed by [`Self::check_move()`]. Moves of automated players are
/// obtained with [`Self::get_move()`]; moves of human players should be
/// checked with [`Self::check_move_validation()`] first.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    players: Vec<Player>,
    current_player_idx: usize,
    first_flip: Option<Position>,
    second_flip: Option<Position>,
    state: GameState,
    memory: MoveMemory,
    /// Whether any automated player takes part, in which case every flip is
    /// remembered, including those of human players.
    remember_flips: bool,
    rng: StdRng,
}

impl Game {
    /// Deals a new board and seats the players in the given order.
    pub fn new(
        rows: i32,
        columns: i32,
        players: Vec<Player>,
        mut rng: StdRng,
    ) -> Result<Self, SetupError> {
        // Checked before dealing, so a rejected setup leaves the rng untouched.
        if players.is_empty() {
            return Err(SetupError::NoPlayers);
        }
        let board = Board::new(rows, columns, &mut rng)?;
        Self::with_board(board, players, rng)
    }

    /// Starts a game on a board that has already been dealt.
    pub fn with_board(board: Board, players: Vec<Player>, rng: StdRng) -> Result<Self, SetupError> {
        if players.is_empty() {
            return Err(SetupError::NoPlayers);
        }
        let remember_flips = players.iter().any(|p| p.strategy().is_automated());
        Ok(Self {
            board,
            players,
            current_player_idx: 0,
            first_flip: None,
            second_flip: None,
            state: GameState::Playing,
            memory: MoveMemory::new(),
            remember_flips,
            rng,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_idx]
    }

    pub fn current_player_idx(&self) -> usize {
        self.current_player_idx
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn memory(&self) -> &MoveMemory {
        &self.memory
    }

    /// The cards flipped so far in the current turn.
    pub fn pending_flips(&self) -> (Option<Position>, Option<Position>) {
        (self.first_flip, self.second_flip)
    }

    /// Checks whether the card at `pos` may be flipped.
    ///
    /// The bounds are checked before the card itself.
    pub fn check_move_validation(&self, pos: Position) -> Result<(), IllegalFlip> {
        match self.board.get(pos) {
            None => Err(IllegalFlip::OutOfBounds),
            Some(card) if card.is_revealed() => Err(IllegalFlip::CardAlreadyRevealed),
            Some(_) => Ok(()),
        }
    }

    /// Flips the card at `pos` as the first or second card of this turn and
    /// returns its value.
    ///
    /// This does not check whether the card is already face up, see
    /// [`Self::check_move_validation()`].
    pub fn make_move(&mut self, pos: Position, slot: Slot) -> Result<Symbol, IllegalMove> {
        self.ensure_playing()?;
        let value = self.board.reveal_card(pos)?;
        if self.remember_flips {
            self.memory.remember(pos, value);
        }
        match slot {
            Slot::First => self.first_flip = Some(pos),
            Slot::Second => self.second_flip = Some(pos),
        }
        trace!(player = self.current_player().name(), %pos, %value, %slot, "Flipped");
        Ok(value)
    }

    /// Resolves the turn once both cards are flipped, and returns whether
    /// they match.
    ///
    /// On a match the player scores and keeps the turn. Otherwise both cards
    /// are turned face down again and the next player is up.
    pub fn check_move(&mut self) -> Result<bool, IllegalMove> {
        self.ensure_playing()?;
        let first = self.first_flip.ok_or(IllegalMove::MissingFlip(Slot::First))?;
        let second = self.second_flip.ok_or(IllegalMove::MissingFlip(Slot::Second))?;
        let first_value = self.value_at(first)?;
        let second_value = self.value_at(second)?;
        self.first_flip = None;
        self.second_flip = None;

        let is_match = first_value == second_value;
        if is_match {
            let player = &mut self.players[self.current_player_idx];
            player.increase_score();
            debug!(player = player.name(), value = %first_value, score = player.score(), "Match");
            self.memory.forget(first_value);
        } else {
            debug!(player = self.current_player().name(), "No match");
            self.board.hide_card(first)?;
            self.board.hide_card(second)?;
            self.switch_player();
        }

        if self.board.all_revealed() {
            self.update_game_state();
        }
        Ok(is_match)
    }

    /// Hands the turn to the next player in seating order.
    pub fn switch_player(&mut self) {
        self.current_player_idx = (self.current_player_idx + 1) % self.players.len();
    }

    /// The player with the strictly highest score, if there is one.
    pub fn determine_winner(&self) -> Option<&Player> {
        self.winner_idx().map(|idx| &self.players[idx])
    }

    pub fn winner_idx(&self) -> Option<usize> {
        let top_score = self.players.iter().map(Player::score).max()?;
        let mut leaders = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.score() == top_score);
        match (leaders.next(), leaders.next()) {
            (Some((idx, _)), None) => Some(idx),
            _ => None,
        }
    }

    /// Ends the game early. Has no effect on a game that is already over.
    pub fn quit(&mut self) {
        if self.state == GameState::Playing {
            debug!(player = self.current_player().name(), "Quit");
            self.state = GameState::Quit;
        }
    }

    /// Picks the next card to flip for the current player, who must be an
    /// automated player.
    pub fn get_move(&mut self) -> Result<Position, IllegalMove> {
        self.ensure_playing()?;
        let pos = match self.current_player().strategy() {
            Strategy::Human => return Err(IllegalMove::HumanToMove),
            Strategy::RandomAutomated => random_hidden_position(&self.board, &mut self.rng),
            Strategy::MemoryAutomated => self.memory.next_move(&self.board, &mut self.rng),
        };
        pos.ok_or(IllegalMove::NoHiddenCards)
    }

    fn ensure_playing(&self) -> Result<(), IllegalMove> {
        match self.state {
            GameState::Playing => Ok(()),
            _ => Err(IllegalMove::GameOver),
        }
    }

    fn value_at(&self, pos: Position) -> Result<Symbol, OutOfRange> {
        self.board
            .get(pos)
            .map(Card::value)
            .ok_or(OutOfRange { position: pos })
    }

    fn update_game_state(&mut self) {
        self.state = match self.winner_idx() {
            Some(_) => GameState::Win,
            None => GameState::Draw,
        };
        debug!(state = ?self.state, "Game ended");
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn layout(rows: i32, columns: i32, values: &[u32]) -> Board {
        let values: Vec<Symbol> = values.iter().copied().map(Symbol).collect();
        Board::from_values(rows, columns, &values).unwrap()
    }

    /// (0, 0) and (1, 3) hold the same value, (0, 1) holds another one.
    fn board_4x4() -> Board {
        #[rustfmt::skip]
        let board = layout(4, 4, &[
            0, 1, 2, 3,
            4, 5, 6, 0,
            1, 2, 3, 4,
            5, 6, 7, 7,
        ]);
        board
    }

    fn humans(n: usize) -> Vec<Player> {
        (1..=n)
            .map(|i| Player::new(format!("Player {}", i), Strategy::Human))
            .collect()
    }

    fn game(board: Board, players: Vec<Player>) -> Game {
        Game::with_board(board, players, StdRng::seed_from_u64(0)).unwrap()
    }

    fn flip_pair(game: &mut Game, first: (i32, i32), second: (i32, i32)) -> bool {
        game.make_move(first.into(), Slot::First).unwrap();
        game.make_move(second.into(), Slot::Second).unwrap();
        game.check_move().unwrap()
    }

    /// Lets the automated players play until the game is over.
    fn play_out(game: &mut Game) {
        while game.state() == GameState::Playing {
            let first = game.get_move().unwrap();
            assert_eq!(game.check_move_validation(first), Ok(()));
            game.make_move(first, Slot::First).unwrap();
            let second = game.get_move().unwrap();
            assert_eq!(game.check_move_validation(second), Ok(()));
            game.make_move(second, Slot::Second).unwrap();
            game.check_move().unwrap();
        }
    }

    #[test]
    fn mismatch_hides_cards_and_passes_the_turn() {
        let mut game = game(board_4x4(), humans(2));
        assert!(!flip_pair(&mut game, (0, 0), (0, 1)));
        assert!(!game.board().is_revealed(Position::new(0, 0)));
        assert!(!game.board().is_revealed(Position::new(0, 1)));
        assert_eq!(game.current_player().name(), "Player 2");
        assert_eq!(game.players()[0].score(), 0);
        assert_eq!(game.pending_flips(), (None, None));
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn match_scores_and_keeps_the_turn() {
        let mut game = game(board_4x4(), humans(2));
        assert!(flip_pair(&mut game, (0, 0), (1, 3)));
        assert_eq!(game.current_player().name(), "Player 1");
        assert_eq!(game.current_player().score(), 1);
        assert!(game.board().is_revealed(Position::new(0, 0)));
        assert!(game.board().is_revealed(Position::new(1, 3)));
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn last_pair_by_the_leader_wins() {
        let mut game = game(layout(2, 2, &[0, 0, 1, 1]), humans(2));
        assert!(flip_pair(&mut game, (0, 0), (0, 1)));
        assert_eq!(game.state(), GameState::Playing);
        assert!(flip_pair(&mut game, (1, 0), (1, 1)));
        assert!(game.board().all_revealed());
        assert_eq!(game.state(), GameState::Win);
        assert_eq!(game.determine_winner().map(Player::name), Some("Player 1"));
    }

    #[test]
    fn shared_top_score_is_a_draw() {
        let mut game = game(layout(2, 4, &[0, 0, 1, 1, 2, 3, 2, 3]), humans(2));
        assert!(flip_pair(&mut game, (0, 0), (0, 1)));
        assert!(flip_pair(&mut game, (0, 2), (0, 3)));
        assert!(!flip_pair(&mut game, (1, 0), (1, 1)));
        assert!(flip_pair(&mut game, (1, 0), (1, 2)));
        assert!(flip_pair(&mut game, (1, 1), (1, 3)));
        assert_eq!(game.state(), GameState::Draw);
        assert!(game.determine_winner().is_none());
        assert_eq!(game.winner_idx(), None);
    }

    #[test]
    fn no_moves_after_the_game_ended() {
        let mut game = game(layout(1, 2, &[0, 0]), humans(1));
        assert!(flip_pair(&mut game, (0, 0), (0, 1)));
        assert_eq!(game.state(), GameState::Win);
        assert_eq!(
            game.make_move(Position::new(0, 0), Slot::First),
            Err(IllegalMove::GameOver)
        );
        assert_eq!(game.check_move(), Err(IllegalMove::GameOver));
        game.quit();
        assert_eq!(game.state(), GameState::Win);
    }

    #[test]
    fn quitting_ends_a_running_game() {
        let mut game = game(board_4x4(), humans(2));
        game.quit();
        assert_eq!(game.state(), GameState::Quit);
        assert!(game.state().is_terminal());
        assert_eq!(game.get_move(), Err(IllegalMove::GameOver));
    }

    #[test]
    fn slots_are_one_and_two() {
        assert_eq!(Slot::try_from(1), Ok(Slot::First));
        assert_eq!(Slot::try_from(2), Ok(Slot::Second));
        assert_eq!(Slot::try_from(0), Err(IllegalMove::InvalidSlot(0)));
        assert_eq!(Slot::try_from(3), Err(IllegalMove::InvalidSlot(3)));
    }

    #[test]
    fn validation_checks_bounds_first() {
        let mut game = game(board_4x4(), humans(2));
        assert_eq!(
            game.check_move_validation(Position::new(-1, 0)),
            Err(IllegalFlip::OutOfBounds)
        );
        assert_eq!(
            game.check_move_validation(Position::new(0, 4)),
            Err(IllegalFlip::OutOfBounds)
        );
        game.make_move(Position::new(2, 2), Slot::First).unwrap();
        assert_eq!(
            game.check_move_validation(Position::new(2, 2)),
            Err(IllegalFlip::CardAlreadyRevealed)
        );
        assert_eq!(game.check_move_validation(Position::new(3, 3)), Ok(()));
    }

    #[test]
    fn off_board_flip_changes_nothing() {
        let mut game = game(board_4x4(), humans(2));
        let pos = Position::new(4, 4);
        assert_eq!(
            game.make_move(pos, Slot::First),
            Err(IllegalMove::OutOfRange(OutOfRange { position: pos }))
        );
        assert_eq!(game.pending_flips(), (None, None));
    }

    #[test]
    fn turn_needs_both_flips() {
        let mut game = game(board_4x4(), humans(2));
        assert_eq!(game.check_move(), Err(IllegalMove::MissingFlip(Slot::First)));
        game.make_move(Position::new(0, 0), Slot::First).unwrap();
        assert_eq!(
            game.check_move(),
            Err(IllegalMove::MissingFlip(Slot::Second))
        );
    }

    #[test]
    fn humans_pick_their_own_moves() {
        let mut game = game(board_4x4(), humans(2));
        assert_eq!(game.get_move(), Err(IllegalMove::HumanToMove));
    }

    #[test]
    fn setup_needs_players_and_an_even_board() {
        let rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Game::new(4, 4, vec![], rng.clone()).unwrap_err(),
            SetupError::NoPlayers
        );
        assert!(matches!(
            Game::new(3, 3, humans(2), rng.clone()),
            Err(SetupError::InvalidBoardSize(_))
        ));
        // Missing players are reported before the board is dealt.
        assert_eq!(
            Game::new(3, 3, vec![], rng.clone()).unwrap_err(),
            SetupError::NoPlayers
        );
        assert_eq!(
            Game::with_board(board_4x4(), vec![], rng).unwrap_err(),
            SetupError::NoPlayers
        );
    }

    #[test]
    fn players_take_turns_round_robin() {
        let mut game = game(board_4x4(), humans(3));
        for expected in [1, 2, 0, 1] {
            game.switch_player();
            assert_eq!(game.current_player_idx(), expected);
        }
    }

    #[test]
    fn human_flips_teach_the_automated_player() {
        let mut players = humans(2);
        players.push(Player::new("Computer", Strategy::MemoryAutomated));
        let mut game = game(board_4x4(), players);

        assert!(!flip_pair(&mut game, (0, 0), (0, 1)));
        assert!(!flip_pair(&mut game, (1, 3), (2, 0)));
        assert_eq!(game.current_player().name(), "Computer");

        // Both pairs are known now; the most recently completed one is played
        let first = game.get_move().unwrap();
        assert_eq!(first, Position::new(0, 1));
        game.make_move(first, Slot::First).unwrap();
        let second = game.get_move().unwrap();
        assert_eq!(second, Position::new(2, 0));
        game.make_move(second, Slot::Second).unwrap();
        assert!(game.check_move().unwrap());
        assert_eq!(game.current_player().score(), 1);
    }

    #[test]
    fn humans_only_games_do_not_remember() {
        let mut game = game(board_4x4(), humans(2));
        flip_pair(&mut game, (0, 0), (0, 1));
        assert_eq!(game.memory().recall(Symbol(0)), crate::Remembered::Empty);
    }

    #[test]
    fn automated_games_run_to_completion() {
        for seed in 0..20 {
            let players = vec![
                Player::new("Memory", Strategy::MemoryAutomated),
                Player::new("Random", Strategy::RandomAutomated),
            ];
            let mut game = Game::new(4, 4, players, StdRng::seed_from_u64(seed)).unwrap();
            play_out(&mut game);
            assert!(matches!(game.state(), GameState::Win | GameState::Draw));
            let total: u32 = game.players().iter().map(Player::score).sum();
            assert_eq!(total, 8);
        }
    }

    #[test]
    fn memory_beats_random_more_often_than_not() {
        let mut memory_wins = 0;
        let mut random_wins = 0;
        for seed in 0..100 {
            // Alternate who goes first
            let mut players = vec![
                Player::new("Memory", Strategy::MemoryAutomated),
                Player::new("Random", Strategy::RandomAutomated),
            ];
            if seed % 2 == 1 {
                players.reverse();
            }
            let mut game = Game::new(6, 6, players, StdRng::seed_from_u64(seed)).unwrap();
            play_out(&mut game);
            match game.determine_winner().map(Player::strategy) {
                Some(Strategy::MemoryAutomated) => memory_wins += 1,
                Some(_) => random_wins += 1,
                None => {}
            }
        }
        assert!(memory_wins > random_wins, "{memory_wins} vs {random_wins}");
    }
}
