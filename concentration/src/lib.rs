pub use board::*;
pub use cards::*;
pub use errors::*;
pub use game::*;
pub use memory::*;
pub use player::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod cards;
mod errors;
mod game;
mod memory;
mod player;
