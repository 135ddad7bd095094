use concentration::Position;

use crate::NotationError;

/// The letter naming a column, `0 → 'A'`.
pub fn column_label(col: i32) -> char {
    u32::try_from(col)
        .ok()
        .and_then(|col| char::from_u32(u32::from('A') + col))
        .unwrap_or('?')
}

/// Parses a position like `B3`: the column letter followed by the row,
/// counting from 1.
///
/// Only checks the notation. Whether the position is on the board is up to
/// [`Game::check_move_validation()`](concentration::Game::check_move_validation).
pub fn parse_position(s: &str) -> Result<Position, NotationError> {
    let mut chars = s.trim().chars();
    let column_char = chars.next().ok_or(NotationError::WrongLength)?;
    let row_char = chars.next().ok_or(NotationError::WrongLength)?;
    if chars.next().is_some() {
        return Err(NotationError::WrongLength);
    }
    if !column_char.is_ascii_alphabetic() {
        return Err(NotationError::InvalidColumn);
    }
    let row = row_char.to_digit(10).ok_or(NotationError::InvalidRow)?;
    let col = u32::from(column_char.to_ascii_uppercase()) - u32::from('A');
    Ok(Position::new(row as i32 - 1, col as i32))
}

/// The inverse of [`parse_position()`].
pub fn format_position(pos: Position) -> String {
    format!("{}{}", column_label(pos.col), pos.row + 1)
}
