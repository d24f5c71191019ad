//! Errors reported by the rules engine.
//!
//! Everything except [`Error::Invariant`] is an expected, recoverable
//! condition: the request is rejected, the [`crate::rules::board::Board`] is
//! left untouched and the caller may simply ask again.

use thiserror::Error;

use crate::rules::moves::{MoveRequest, Rejection};

#[allow(missing_docs)]
pub type Result<T> = std::result::Result<T, Error>;

/// All the ways an operation of the rules engine can fail.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The coordinate pair is neither a square on the board nor the
    /// off-board sentinel pair.
    #[allow(missing_docs)]
    #[error("({col},{row}) is neither on the board nor the off-board sentinel")]
    Construction { col: i32, row: i32 },
    /// The move request text does not describe two on-board squares.
    #[error("malformed move request: {0}")]
    MalformedRequest(String),
    /// The request was understood but is not a legal move in the current
    /// position.
    #[allow(missing_docs)]
    #[error("illegal move {request}: {reason}")]
    IllegalMove {
        request: MoveRequest,
        reason: Rejection,
    },
    /// A piece that must always exist is missing. The board is corrupted and
    /// the session using it can not continue.
    #[error("corrupted board: {0}")]
    Invariant(String),
    /// The serialized frame can not be turned into a board.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),
    /// A piece can not be placed or removed at the requested square.
    #[error("placement rejected: {0}")]
    Placement(String),
}

impl Error {
    /// Returns `true` unless the error indicates corrupted state.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Invariant(_))
    }
}
