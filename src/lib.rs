//! Grid snake arcade game: a snake that wraps around the board, a wandering
//! mouse, food, and a five-state game flow driven at a fixed simulation rate.

pub mod config;
pub mod error;
pub mod food;
pub mod game_loop;
pub mod grid;
pub mod input;
pub mod mouse;
pub mod palette;
pub mod render;
pub mod scoreboard;
pub mod session;
pub mod snake;
pub mod state;
pub mod surface;
pub mod timer;

pub use config::Config;
pub use error::{GameError, Result};
pub use game_loop::GameLoop;
pub use session::Session;
pub use state::GameState;
