use std::io::{BufRead, Write};
use std::time::Duration;

use concentration::{Board, Game, GameState, Player, Position, Slot};

use crate::{
    column_label, format_position, is_board_size_in_range, parse_position, Frontend,
    MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};

const QUIT: &str = "Q";

/// Draws the board with column letters on top and row numbers on the left.
///
/// Face-down cards are blank, unless `reveal_all` is set.
pub fn render_board(board: &Board, reveal_all: bool) -> String {
    let separator = format!(" {}=\n", "==".repeat(board.columns() as usize));

    let mut result = String::from("  ");
    for col in 0..board.columns() {
        result += &format!("{} ", column_label(col));
    }
    result += "\n";
    result += &separator;
    for (row, cards) in board.card_rows().enumerate() {
        result += &format!("{}|", row + 1);
        for card in cards {
            if card.is_revealed() || reveal_all {
                result += &format!("{}|", card.value());
            } else {
                result += " |";
            }
        }
        result += "\n";
        result += &separator;
    }
    result
}

/// A text console for human players.
///
/// Reads from any [`BufRead`] and writes to any [`Write`], which is stdin and
/// stdout in the judge.
pub struct Console<R, W> {
    input: R,
    output: W,
    /// How long to show the cards flipped by an automated player.
    delay: Duration,
    // A re-usable buffer for reading lines.
    buf: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, delay: Duration) -> Self {
        Self {
            input,
            output,
            delay,
            buf: String::new(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, text: &str) -> anyhow::Result<&str> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.buf.clear();
        if self.input.read_line(&mut self.buf)? == 0 {
            anyhow::bail!("Input ended");
        }
        Ok(self.buf.trim())
    }

    fn complain(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{}. Please try again.\n", message)?;
        Ok(())
    }

    pub fn prompt_name(&mut self, text: &str) -> anyhow::Result<String> {
        loop {
            let name = self.prompt(text)?.to_owned();
            if !name.is_empty() {
                return Ok(name);
            }
            self.complain("Player name cannot be empty")?;
        }
    }

    pub fn prompt_yes_no(&mut self, text: &str) -> anyhow::Result<bool> {
        loop {
            match self.prompt(text)?.to_lowercase().as_str() {
                "yes" => return Ok(true),
                "no" => return Ok(false),
                _ => self.complain("Please enter 'yes' or 'no'")?,
            }
        }
    }

    fn prompt_dimension(&mut self, what: &str) -> anyhow::Result<i32> {
        let text = format!(
            "Enter the number of {} ({}-{}): ",
            what, MIN_BOARD_SIZE, MAX_BOARD_SIZE
        );
        loop {
            match self.prompt(&text)?.parse::<i32>() {
                Ok(size) if is_board_size_in_range(size) => return Ok(size),
                _ => self.complain(&format!("Invalid number of {}", what))?,
            }
        }
    }

    /// Asks for the board dimensions until they describe a valid board.
    pub fn prompt_board_size(&mut self) -> anyhow::Result<(i32, i32)> {
        let rows = self.prompt_dimension("rows")?;
        loop {
            let columns = self.prompt_dimension("columns")?;
            if concentration::is_valid_board(rows, columns) {
                return Ok((rows, columns));
            }
            self.complain("The number of cards has to be even")?;
        }
    }

    /// Asks for the players: the first is always human, the second is either
    /// human or the computer at one of two difficulties.
    pub fn prompt_players(&mut self) -> anyhow::Result<Vec<Player>> {
        use concentration::Strategy;

        let first = Player::new(self.prompt_name("Enter player 1 name: ")?, Strategy::Human);
        let second = if self.prompt_yes_no("Do you want to play against the computer? (yes/no): ")? {
            let strategy =
                if self.prompt_yes_no("Should the computer play on hard difficulty? (yes/no): ")? {
                    Strategy::MemoryAutomated
                } else {
                    Strategy::RandomAutomated
                };
            Player::new("Computer", strategy)
        } else {
            Player::new(self.prompt_name("Enter player 2 name: ")?, Strategy::Human)
        };
        Ok(vec![first, second])
    }

    /// Asks for a card until one that can be flipped is given. Returns `None`
    /// if the player quits.
    pub fn read_flip(&mut self, game: &Game) -> anyhow::Result<Option<Position>> {
        loop {
            let input = self.prompt(&format!(
                "Enter a card to reveal (e.g. A1, or {} to quit): ",
                QUIT
            ))?;
            if input.eq_ignore_ascii_case(QUIT) {
                return Ok(None);
            }
            let pos = match parse_position(input) {
                Ok(pos) => pos,
                Err(err) => {
                    self.complain(&err.to_string())?;
                    continue;
                }
            };
            match game.check_move_validation(pos) {
                Ok(()) => return Ok(Some(pos)),
                Err(err) => self.complain(&err.to_string())?,
            }
        }
    }

    pub fn clear_screen(&mut self) -> anyhow::Result<()> {
        write!(self.output, "\x1B[2J\x1B[1;1H")?;
        Ok(())
    }

    pub fn show_board(&mut self, board: &Board, reveal_all: bool) -> anyhow::Result<()> {
        write!(self.output, "{}", render_board(board, reveal_all))?;
        Ok(())
    }

    fn show_turn(&mut self, player: &Player) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "{}'s turn. Score: {}",
            player.name(),
            player.score()
        )?;
        Ok(())
    }

    fn redraw(&mut self, game: &Game) -> anyhow::Result<()> {
        self.clear_screen()?;
        self.show_board(game.board(), false)
    }

    fn pause(&mut self) {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }

    pub fn say_goodbye(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\nExiting game. Thank you for playing!")?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Frontend for Console<R, W> {
    fn human_flip(&mut self, game: &Game, _slot: Slot) -> anyhow::Result<Option<Position>> {
        self.read_flip(game)
    }

    fn game_started(&mut self, game: &Game) -> anyhow::Result<()> {
        self.redraw(game)
    }

    fn turn_started(&mut self, game: &Game) -> anyhow::Result<()> {
        self.show_turn(game.current_player())
    }

    fn flipped(&mut self, game: &Game, pos: Position, slot: Slot) -> anyhow::Result<()> {
        self.redraw(game)?;
        let player = game.current_player();
        self.show_turn(player)?;
        if let Some(card) = game.board().get(pos) {
            let slot = match slot {
                Slot::First => "First",
                Slot::Second => "Second",
            };
            writeln!(
                self.output,
                "{} card: {} ({})",
                slot,
                card.value(),
                format_position(pos)
            )?;
        }
        if player.strategy().is_automated() {
            self.pause();
        }
        Ok(())
    }

    fn turn_resolved(&mut self, game: &Game, is_match: bool) -> anyhow::Result<()> {
        if is_match {
            writeln!(
                self.output,
                "It's a match! {} gets another turn.",
                game.current_player().name()
            )?;
        } else {
            writeln!(self.output, "Not a match.")?;
        }
        self.pause();
        self.redraw(game)
    }

    fn game_over(&mut self, game: &Game) -> anyhow::Result<()> {
        self.clear_screen()?;
        self.show_board(game.board(), true)?;
        writeln!(self.output, "Game over. Thank you for playing!")?;
        writeln!(self.output, "\nFinal scores:")?;
        for player in game.players() {
            writeln!(self.output, "{}: {}", player.name(), player.score())?;
        }
        match (game.state(), game.determine_winner()) {
            (GameState::Win, Some(winner)) => writeln!(
                self.output,
                "The winner is {} with {} points!",
                winner.name(),
                winner.score()
            )?,
            (GameState::Quit, _) => writeln!(
                self.output,
                "{} left the game.",
                game.current_player().name()
            )?,
            _ => writeln!(self.output, "The game is a draw!")?,
        }
        Ok(())
    }
}
