use serde::{Deserialize, Serialize};

/// A cell on the board, addressed by row and column.
///
/// The coordinates are signed so that callers can hand in whatever the
/// player typed and let [`Game::check_move_validation()`](crate::Game::check_move_validation)
/// reject it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The value printed on the face of a card.
///
/// A board with `n` pairs uses the symbols `0..n`. They are rendered as
/// letters, starting with `A`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(pub u32);

impl Symbol {
    /// The letter shown to players, e.g. `Symbol(2).letter() == 'C'`.
    ///
    /// Symbols past `Z` continue into the following code points, which is
    /// fine for the board sizes anyone plays.
    pub fn letter(self) -> char {
        u32::from('A')
            .checked_add(self.0)
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A single card lying on the [`Board`](crate::Board).
///
/// Only the board can turn a card face up or face down.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Card {
    position: Position,
    value: Symbol,
    revealed: bool,
}

impl Card {
    pub(crate) fn new(position: Position, value: Symbol) -> Self {
        Self {
            position,
            value,
            revealed: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn row(&self) -> i32 {
        self.position.row
    }

    pub fn column(&self) -> i32 {
        self.position.col
    }

    pub fn value(&self) -> Symbol {
        self.value
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub(crate) fn set_revealed(&mut self, revealed: bool) {
        self.revealed = revealed;
    }
}
