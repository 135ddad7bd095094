use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::{Card, InvalidBoardSize, InvalidLayout, OutOfRange, Position, Symbol};

/// Whether a `rows` x `columns` board can be dealt.
///
/// Both dimensions must be positive and the number of cards must be even,
/// since every value is dealt as a pair.
pub fn is_valid_board(rows: i32, columns: i32) -> bool {
    rows > 0
        && columns > 0
        && rows
            .checked_mul(columns)
            .is_some_and(|num_cards| num_cards % 2 == 0)
}

/// A rectangular grid of cards in which every value appears exactly twice.
#[derive(Clone, Debug)]
pub struct Board {
    rows: i32,
    columns: i32,
    /// Row-major, exactly `rows * columns` entries.
    cards: Vec<Card>,
}

impl Board {
    /// Deals a new board, placing each of the `rows * columns / 2` values at
    /// two random cells.
    pub fn new(rows: i32, columns: i32, rng: &mut StdRng) -> Result<Self, InvalidBoardSize> {
        if !is_valid_board(rows, columns) {
            return Err(InvalidBoardSize { rows, columns });
        }
        let num_pairs = (rows * columns / 2) as u32;
        let mut values: Vec<Symbol> = (0..num_pairs)
            .flat_map(|value| [Symbol(value), Symbol(value)])
            .collect();
        values.shuffle(rng);
        Ok(Self::deal(rows, columns, values))
    }

    /// Creates a board with a fixed layout, given row by row.
    ///
    /// The values do not have to be `0..n`, but each must appear exactly twice.
    pub fn from_values(rows: i32, columns: i32, values: &[Symbol]) -> Result<Self, InvalidLayout> {
        if !is_valid_board(rows, columns) {
            return Err(InvalidBoardSize { rows, columns }.into());
        }
        let expected = (rows * columns) as usize;
        if values.len() != expected {
            return Err(InvalidLayout::WrongNumberOfValues {
                expected,
                actual: values.len(),
            });
        }
        let mut counts = BTreeMap::<Symbol, usize>::new();
        for &value in values {
            *counts.entry(value).or_default() += 1;
        }
        if let Some((&value, &count)) = counts.iter().find(|&(_, &count)| count != 2) {
            return Err(InvalidLayout::NotAPair { value, count });
        }
        Ok(Self::deal(rows, columns, values.to_vec()))
    }

    fn deal(rows: i32, columns: i32, values: Vec<Symbol>) -> Self {
        let positions =
            (0..rows).flat_map(|row| (0..columns).map(move |col| Position::new(row, col)));
        let cards = positions
            .zip(values)
            .map(|(position, value)| Card::new(position, value))
            .collect();
        Self {
            rows,
            columns,
            cards,
        }
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn num_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.rows).contains(&pos.row) && (0..self.columns).contains(&pos.col)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| (pos.row * self.columns + pos.col) as usize)
    }

    /// The card at the given position, if it is on the board.
    pub fn get(&self, pos: Position) -> Option<&Card> {
        self.index(pos).map(|idx| &self.cards[idx])
    }

    /// All cards in row-major order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The cards grouped into rows, top to bottom.
    pub fn card_rows(&self) -> impl Iterator<Item = &[Card]> + '_ {
        self.cards.chunks(self.columns as usize)
    }

    /// Positions outside the board count as not revealed.
    pub fn is_revealed(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Card::is_revealed)
    }

    /// Turns the card face up and returns its value.
    pub fn reveal_card(&mut self, pos: Position) -> Result<Symbol, OutOfRange> {
        let card = self.card_mut(pos)?;
        card.set_revealed(true);
        Ok(card.value())
    }

    /// Turns the card face down again.
    pub fn hide_card(&mut self, pos: Position) -> Result<(), OutOfRange> {
        self.card_mut(pos)?.set_revealed(false);
        Ok(())
    }

    pub fn all_revealed(&self) -> bool {
        self.cards.iter().all(Card::is_revealed)
    }

    pub fn hidden_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cards
            .iter()
            .filter(|card| !card.is_revealed())
            .map(Card::position)
    }

    fn card_mut(&mut self, pos: Position) -> Result<&mut Card, OutOfRange> {
        let idx = self.index(pos).ok_or(OutOfRange { position: pos })?;
        Ok(&mut self.cards[idx])
    }
}
