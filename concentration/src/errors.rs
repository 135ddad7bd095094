use crate::{Position, Slot};

/// The board dimensions cannot hold a whole number of pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidBoardSize {
    pub rows: i32,
    pub columns: i32,
}

impl std::error::Error for InvalidBoardSize {}

impl std::fmt::Display for InvalidBoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "A {}x{} board does not have a positive, even number of cards",
            self.rows, self.columns
        )
    }
}

/// The error type for [`Board::from_values()`](crate::Board::from_values).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidLayout {
    Size(InvalidBoardSize),
    WrongNumberOfValues { expected: usize, actual: usize },
    NotAPair { value: crate::Symbol, count: usize },
}

impl std::error::Error for InvalidLayout {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvalidLayout::Size(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvalidLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidLayout::Size(_) => write!(f, "The layout has an invalid size"),
            InvalidLayout::WrongNumberOfValues { expected, actual } => write!(
                f,
                "The layout needs {} values, but {} were given",
                expected, actual
            ),
            InvalidLayout::NotAPair { value, count } => write!(
                f,
                "Every value must appear exactly twice, but {} appears {} time(s)",
                value, count
            ),
        }
    }
}

impl From<InvalidBoardSize> for InvalidLayout {
    fn from(err: InvalidBoardSize) -> Self {
        InvalidLayout::Size(err)
    }
}

/// A board operation was given a position that is not on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange {
    pub position: Position,
}

impl std::error::Error for OutOfRange {}

impl std::fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position {} is not on the board", self.position)
    }
}

/// Why a card cannot be flipped, as reported by
/// [`Game::check_move_validation()`](crate::Game::check_move_validation).
///
/// These are expected outcomes of reading player input, so callers should
/// re-prompt rather than abort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalFlip {
    OutOfBounds,
    CardAlreadyRevealed,
}

impl std::error::Error for IllegalFlip {}

impl std::fmt::Display for IllegalFlip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalFlip::OutOfBounds => write!(f, "Position out of bounds"),
            IllegalFlip::CardAlreadyRevealed => write!(f, "Card has already been revealed"),
        }
    }
}

/// The error type for the mutating [`Game`](crate::Game) operations.
///
/// Each of these means the caller broke the turn protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    InvalidSlot(u8),
    GameOver,
    MissingFlip(Slot),
    HumanToMove,
    NoHiddenCards,
    OutOfRange(OutOfRange),
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMove::OutOfRange(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::InvalidSlot(slot) => {
                write!(f, "Flip slot {} does not exist, only 1 and 2 do", slot)
            }
            IllegalMove::GameOver => write!(f, "The game is already over"),
            IllegalMove::MissingFlip(slot) => {
                write!(f, "The {} card of this turn has not been flipped", slot)
            }
            IllegalMove::HumanToMove => {
                write!(f, "The current player is human and picks their own moves")
            }
            IllegalMove::NoHiddenCards => write!(f, "There is no face-down card left"),
            IllegalMove::OutOfRange(_) => write!(f, "Tried to flip a card outside the board"),
        }
    }
}

impl From<OutOfRange> for IllegalMove {
    fn from(err: OutOfRange) -> Self {
        IllegalMove::OutOfRange(err)
    }
}

/// The error type for setting up a [`Game`](crate::Game).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupError {
    InvalidBoardSize(InvalidBoardSize),
    NoPlayers,
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::InvalidBoardSize(err) => Some(err),
            SetupError::NoPlayers => None,
        }
    }
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::InvalidBoardSize(_) => write!(f, "Cannot create the board"),
            SetupError::NoPlayers => write!(f, "A game needs at least one player"),
        }
    }
}

impl From<InvalidBoardSize> for SetupError {
    fn from(err: InvalidBoardSize) -> Self {
        SetupError::InvalidBoardSize(err)
    }
}
