mod config;
mod console;
mod error;
mod game;
mod notation;
mod tournament;
pub use config::*;
pub use console::*;
pub use error::*;
pub use game::*;
pub use notation::*;
pub use tournament::*;
