//! Rules of Xiangqi: the board, the pieces and what counts as a legal move.
//!
//! Nothing here knows about the game session around the board (concessions,
//! history, I/O). [`crate::Engine`] takes care of that.

pub mod attacks;
pub mod board;
pub mod core;
pub mod error;
pub mod moves;

pub use board::{Board, Contest};
pub use error::{Error, Result};
pub use moves::{classify, Classification, MoveRequest, Rejection};
