use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::trace;

use crate::{Board, Position, Symbol};

/// What is known about the two cards carrying one value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Remembered {
    #[default]
    Empty,
    One(Position),
    /// Both cards have been seen, in the order they were (last) seen.
    Pair(Position, Position),
}

impl Remembered {
    #[must_use]
    fn without(self, pos: Position) -> Self {
        match self {
            Remembered::One(p) if p == pos => Remembered::Empty,
            Remembered::Pair(a, b) if a == pos => Remembered::One(b),
            Remembered::Pair(a, b) if b == pos => Remembered::One(a),
            other => other,
        }
    }

    #[must_use]
    fn with(self, pos: Position) -> Self {
        match self.without(pos) {
            Remembered::Empty => Remembered::One(pos),
            Remembered::One(p) => Remembered::Pair(p, pos),
            // Only reachable with a board that deals a value more than twice.
            Remembered::Pair(_, b) => Remembered::Pair(b, pos),
        }
    }

    pub fn positions(self) -> impl Iterator<Item = Position> {
        let (first, second) = match self {
            Remembered::Empty => (None, None),
            Remembered::One(a) => (Some(a), None),
            Remembered::Pair(a, b) => (Some(a), Some(b)),
        };
        first.into_iter().chain(second)
    }
}

/// The memory of the automated player: where each value has been seen
/// face up, for all pairs that are not matched yet.
///
/// Cards are learned through [`Self::remember()`] whenever one is flipped,
/// no matter who flipped it. Once both cards of a value are known, that
/// value becomes the *known pair* and [`Self::next_move()`] plays it out.
#[derive(Clone, Debug, Default)]
pub struct MoveMemory {
    seen: BTreeMap<Symbol, Remembered>,
    /// A value whose entry in `seen` is a `Pair`.
    known_pair: Option<Symbol>,
}

impl MoveMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the card at `pos` shows `value`.
    ///
    /// Remembering the same card again only moves it to the back.
    pub fn remember(&mut self, pos: Position, value: Symbol) {
        let entry = self.seen.entry(value).or_default();
        *entry = entry.with(pos);
        if let Remembered::Pair(first, second) = *entry {
            trace!(%value, %first, %second, "Known pair");
            self.known_pair = Some(value);
        }
    }

    /// Drops everything known about a value, after its pair has been matched.
    pub fn forget(&mut self, value: Symbol) {
        self.seen.remove(&value);
        if self.known_pair == Some(value) {
            self.known_pair = None;
        }
    }

    pub fn recall(&self, value: Symbol) -> Remembered {
        self.seen.get(&value).copied().unwrap_or_default()
    }

    /// The positions of the pair that will be played next, if any.
    pub fn known_pair(&self) -> Option<(Position, Position)> {
        match self.recall(self.known_pair?) {
            Remembered::Pair(first, second) => Some((first, second)),
            _ => None,
        }
    }

    /// Picks the next card to flip.
    ///
    /// A known pair is played out first card first. Without one, a random
    /// face-down card is picked and remembered. Returns `None` only when every
    /// card is face up.
    pub fn next_move(&mut self, board: &Board, rng: &mut StdRng) -> Option<Position> {
        if let Some(value) = self.known_pair {
            self.drop_positions_off_board(value, board);
        }
        match self.known_pair() {
            Some((first, _)) if is_hidden(board, first) => return Some(first),
            Some((_, second)) if is_hidden(board, second) => {
                self.known_pair = None;
                return Some(second);
            }
            _ => self.known_pair = None,
        }

        let pos = random_hidden_position(board, rng)?;
        if let Some(card) = board.get(pos) {
            self.remember(pos, card.value());
        }
        Some(pos)
    }

    fn drop_positions_off_board(&mut self, value: Symbol, board: &Board) {
        if let Some(entry) = self.seen.get_mut(&value) {
            for pos in entry.positions() {
                if !board.contains(pos) {
                    *entry = entry.without(pos);
                }
            }
        }
    }
}

fn is_hidden(board: &Board, pos: Position) -> bool {
    board.get(pos).is_some_and(|card| !card.is_revealed())
}

/// Samples a uniformly random face-down card by drawing positions until one
/// is face down. Returns `None` if there is none.
pub fn random_hidden_position(board: &Board, rng: &mut StdRng) -> Option<Position> {
    if board.all_revealed() {
        return None;
    }
    loop {
        let pos = Position::new(
            rng.gen_range(0..board.rows()),
            rng.gen_range(0..board.columns()),
        );
        if !board.is_revealed(pos) {
            return Some(pos);
        }
    }
}
