use quickcheck::{Arbitrary, Gen};

use crate::is_valid_board;

/// Dimensions of a board that can be dealt, between 1x2 and 8x8.
#[derive(Clone, Copy, Debug)]
pub struct BoardDimensions {
    pub rows: i32,
    pub columns: i32,
}

impl Arbitrary for BoardDimensions {
    fn arbitrary(g: &mut Gen) -> Self {
        let rows = (u8::arbitrary(g) % 8) as i32 + 1;
        let mut columns = (u8::arbitrary(g) % 8) as i32 + 1;
        // Make the number of cards even
        if rows % 2 == 1 && columns % 2 == 1 {
            columns += 1;
        }
        debug_assert!(is_valid_board(rows, columns));
        BoardDimensions { rows, columns }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let BoardDimensions { rows, columns } = *self;
        Box::new(
            [(rows - 1, columns), (rows, columns - 1), (rows - 1, columns - 1)]
                .into_iter()
                .filter(|&(rows, columns)| is_valid_board(rows, columns))
                .map(|(rows, columns)| BoardDimensions { rows, columns }),
        )
    }
}
