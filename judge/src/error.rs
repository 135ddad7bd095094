/// The error type for [`parse_position()`](crate::parse_position).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotationError {
    WrongLength,
    InvalidColumn,
    InvalidRow,
}

impl std::error::Error for NotationError {}

impl std::fmt::Display for NotationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotationError::WrongLength => {
                write!(f, "Invalid input length (has to be 2)")
            }
            NotationError::InvalidColumn => write!(f, "Invalid column letter"),
            NotationError::InvalidRow => write!(f, "Invalid row number"),
        }
    }
}
