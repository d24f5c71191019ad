//! Move requests and their classification against a [`Board`].

use std::fmt;

use itertools::Itertools;

use crate::rules::board::Board;
use crate::rules::core::Square;
use crate::rules::error::{Error, Result};

/// A request to move whatever stands on `from` to `to`. It is only a proposal:
/// [`classify`] decides what, if anything, it means in a given position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    from: Square,
    to: Square,
}

impl MoveRequest {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn to(&self) -> Square {
        self.to
    }
}

fn parse_coordinate(token: &str) -> Result<i32> {
    token
        .parse::<i32>()
        .map_err(|e| Error::MalformedRequest(format!("'{token}' is not a coordinate: {e}")))
}

fn parse_square(col: &str, row: &str) -> Result<Square> {
    let (col, row) = (parse_coordinate(col)?, parse_coordinate(row)?);
    if !Square::on_board(col, row) {
        return Err(Error::MalformedRequest(format!(
            "({col},{row}) is outside the board"
        )));
    }
    Square::new(col, row)
}

impl TryFrom<&str> for MoveRequest {
    type Error = Error;

    /// Parses a request in the `<x1> <y1> -> <x2> <y2>` form. Both squares
    /// have to be on the board.
    fn try_from(input: &str) -> Result<Self> {
        let Some((from_col, from_row, arrow, to_col, to_row)) =
            input.split_whitespace().collect_tuple()
        else {
            return Err(Error::MalformedRequest(format!(
                "expected '<x1> <y1> -> <x2> <y2>', got '{}'",
                input.trim()
            )));
        };
        if arrow != "->" {
            return Err(Error::MalformedRequest(format!(
                "expected '->' between the squares, got '{arrow}'"
            )));
        }
        Ok(Self::new(
            parse_square(from_col, from_row)?,
            parse_square(to_col, to_row)?,
        ))
    }
}

impl fmt::Display for MoveRequest {
    /// Prints the request in the same form `MoveRequest::try_from` accepts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} {}",
            self.from.col(),
            self.from.row(),
            self.to.col(),
            self.to.row()
        )
    }
}

/// Why a request was classified as invalid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// There is nothing to move on the origin square.
    EmptyOrigin,
    /// The piece on the origin square belongs to the side not to move.
    NotYourTurn,
    /// The destination holds a piece of the moving side.
    FriendlyFire,
    /// The piece can not reach or capture on the destination.
    Unreachable,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EmptyOrigin => "there is no piece on the origin square",
            Self::NotYourTurn => "the piece belongs to the side not to move",
            Self::FriendlyFire => "the destination is occupied by a friendly piece",
            Self::Unreachable => "the piece can not get to the destination",
        })
    }
}

/// Meaning of a [`MoveRequest`] in a specific position. Pieces are identified
/// by their index in [`Board::pieces`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// The piece moves to an empty square.
    Move {
        #[allow(missing_docs)]
        piece: usize,
    },
    /// The piece captures `target` and takes its square.
    Capture {
        #[allow(missing_docs)]
        piece: usize,
        #[allow(missing_docs)]
        target: usize,
    },
    #[allow(missing_docs)]
    Invalid(Rejection),
}

/// Classifies `request` against the current state of `board`.
///
/// The checks run in a fixed order: the origin piece and the side to move are
/// looked at before any geometry, so a geometry problem never masks the wrong
/// actor.
#[must_use]
pub fn classify(board: &Board, request: MoveRequest) -> Classification {
    let Some(piece) = board.piece_index_at(request.from) else {
        return Classification::Invalid(Rejection::EmptyOrigin);
    };
    let mover = &board.pieces()[piece];
    if mover.side() != board.side_to_move() {
        return Classification::Invalid(Rejection::NotYourTurn);
    }
    let Some(target) = board.piece_index_at(request.to) else {
        return if mover.can_move_to(request.to, board) {
            Classification::Move { piece }
        } else {
            Classification::Invalid(Rejection::Unreachable)
        };
    };
    let victim = &board.pieces()[target];
    if victim.side() == mover.side() {
        return Classification::Invalid(Rejection::FriendlyFire);
    }
    if mover.can_capture(victim, board) {
        Classification::Capture { piece, target }
    } else {
        Classification::Invalid(Rejection::Unreachable)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn square(col: i32, row: i32) -> Square {
        Square::new(col, row).unwrap()
    }

    fn request(input: &str) -> MoveRequest {
        MoveRequest::try_from(input).unwrap()
    }

    #[test]
    fn parse_request() {
        assert_eq!(
            request("2 1 -> 3 3"),
            MoveRequest::new(square(2, 1), square(3, 3))
        );
        assert_eq!(
            request("  9   10 ->  9 9 \n"),
            MoveRequest::new(square(9, 10), square(9, 9))
        );
        assert_eq!(request("1 4 -> 1 5").to_string(), "1 4 -> 1 5");
    }

    #[test]
    fn malformed_requests() {
        for input in [
            "",
            "2 1 3 3",
            "2 1 => 3 3",
            "2 1 -> 3",
            "2 1 -> 3 3 4",
            "a 1 -> 3 3",
            "2 1 -> 3 3.5",
            "0 1 -> 3 3",
            "2 1 -> 10 3",
            "-1 -1 -> 3 3",
            "99999999999 1 -> 3 3",
        ] {
            assert!(
                matches!(MoveRequest::try_from(input), Err(Error::MalformedRequest(_))),
                "input: {input}"
            );
        }
    }

    #[test]
    fn classification_order() {
        let board = Board::starting();
        assert_eq!(
            classify(&board, request("5 5 -> 5 6")),
            Classification::Invalid(Rejection::EmptyOrigin)
        );
        // Green horse, legal geometry, but Red is to move.
        assert_eq!(
            classify(&board, request("2 10 -> 3 8")),
            Classification::Invalid(Rejection::NotYourTurn)
        );
        // Green horse, illegal geometry: still reported as the wrong actor.
        assert_eq!(
            classify(&board, request("2 10 -> 2 5")),
            Classification::Invalid(Rejection::NotYourTurn)
        );
        assert_eq!(
            classify(&board, request("1 1 -> 2 1")),
            Classification::Invalid(Rejection::FriendlyFire)
        );
        assert_eq!(
            classify(&board, request("2 1 -> 2 3")),
            Classification::Invalid(Rejection::FriendlyFire)
        );
        assert_eq!(
            classify(&board, request("2 1 -> 2 2")),
            Classification::Invalid(Rejection::Unreachable)
        );
        assert_eq!(
            classify(&board, request("2 1 -> 3 3")),
            Classification::Move { piece: 1 }
        );
        // Red cannon jumps the Green cannon onto the Green horse.
        assert_eq!(
            classify(&board, request("2 3 -> 2 10")),
            Classification::Capture {
                piece: 9,
                target: 12
            }
        );
    }

    #[test]
    fn classification_does_not_mutate() {
        let mut board = Board::starting();
        assert!(board.apply_move(request("2 1 -> 3 3"), true).is_ok());
        let before = board.clone();
        // Green to move now: the Red Car is the wrong actor, the Green horse
        // may not move diagonally.
        assert_eq!(
            classify(&board, request("1 1 -> 1 2")),
            Classification::Invalid(Rejection::NotYourTurn)
        );
        assert_eq!(
            classify(&board, request("2 10 -> 3 9")),
            Classification::Invalid(Rejection::Unreachable)
        );
        assert_eq!(
            classify(&board, request("2 10 -> 1 8")),
            Classification::Move { piece: 12 }
        );
        assert_eq!(board, before);
    }
}
