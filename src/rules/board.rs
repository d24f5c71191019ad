//! The [`Board`]: every piece of both sides (captured ones included) and the
//! side to move. It has 1:1 relationship with the frame notation which is used
//! to store and restore games.
//!
//! The only ways to change the board during normal play are
//! [`Board::apply_move`] and [`Board::skip_turn`]. The remaining mutations
//! ([`Board::place`], [`Board::remove`], [`Board::clear`]) exist for setting
//! up positions by hand.

use std::collections::HashSet;
use std::fmt;

use itertools::Itertools;
use log::{debug, trace, warn};

use crate::rules::core::{Piece, PieceKind, Side, Square, MIDDLE_COL};
use crate::rules::error::{Error, Result};
use crate::rules::moves::{classify, Classification, MoveRequest};

/// State of the game. See the [module documentation](self) for the frame
/// notation.
///
/// Pieces are stored in insertion order (the standard setup or the order of a
/// parsed frame) and a piece is identified by its index. Captured pieces are
/// never dropped: they are kept with [`Square::OFF_BOARD`] so that they can be
/// listed and placed back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pieces: Vec<Piece>,
    side_to_move: Side,
}

/// Number of pieces each side starts with.
const PIECES_PER_SIDE: usize = 16;

/// Non-Soldier pieces of the back row, from left to right.
const BACK_ROW: [PieceKind; 9] = [
    PieceKind::Chariot,
    PieceKind::Horse,
    PieceKind::Elephant,
    PieceKind::Advisor,
    PieceKind::General,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Horse,
    PieceKind::Chariot,
];

/// How many pieces of each side can capture on a square.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Contest {
    #[allow(missing_docs)]
    pub red: usize,
    #[allow(missing_docs)]
    pub green: usize,
}

impl Contest {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn of(&self, side: Side) -> usize {
        match side {
            Side::Red => self.red,
            Side::Green => self.green,
        }
    }

    fn count(&mut self, side: Side) {
        match side {
            Side::Red => self.red += 1,
            Side::Green => self.green += 1,
        }
    }
}

impl Board {
    /// Creates the standard starting position with Red to move.
    ///
    /// ```
    /// use xiangqi::rules::board::Board;
    ///
    /// let board = Board::starting();
    /// assert_eq!(board.pieces().len(), 32);
    /// assert!(board.to_string().starts_with("RED|Car R 1 1|Horse R 2 1|"));
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        let mut pieces = Vec::with_capacity(2 * PIECES_PER_SIDE);
        let mut put = |kind, side, col, row| {
            pieces.push(Piece::new(kind, side, Square::at(col, row)));
        };
        for side in Side::BOTH {
            let home = side.home_row();
            for (col, kind) in (1..).zip(BACK_ROW) {
                put(kind, side, col, home);
            }
            // Cannons stand two rows in front of the back row.
            let cannon_row = home + 2 * side.forward();
            put(PieceKind::Cannon, side, 2, cannon_row);
            put(PieceKind::Cannon, side, 8, cannon_row);
        }
        for col in (1..=9).step_by(2) {
            for side in Side::BOTH {
                put(PieceKind::Soldier, side, col, side.home_row() + 3 * side.forward());
            }
        }
        Self {
            pieces,
            side_to_move: Side::Red,
        }
    }

    /// Creates a board out of piece records.
    ///
    /// # Errors
    ///
    /// Two pieces that are not captured can not stand on the same square.
    pub fn new(pieces: Vec<Piece>, side_to_move: Side) -> Result<Self> {
        let mut occupied = HashSet::with_capacity(pieces.len());
        for piece in pieces.iter().filter(|piece| !piece.is_captured()) {
            if !occupied.insert(piece.square()) {
                return Err(Error::MalformedFrame(format!(
                    "more than one piece stands on {}",
                    piece.square()
                )));
            }
        }
        Ok(Self {
            pieces,
            side_to_move,
        })
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// All piece records in insertion order, captured ones included.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Returns the index of the piece standing on `square`. Captured pieces
    /// are never found: the off-board square is not a square of the board.
    #[must_use]
    pub fn piece_index_at(&self, square: Square) -> Option<usize> {
        if !square.is_valid() {
            return None;
        }
        self.pieces.iter().position(|piece| piece.square() == square)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.piece_index_at(square).map(|index| &self.pieces[index])
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_index_at(square).is_some()
    }

    /// Applies the move and describes what happened, e.g. "Red Horse moved to
    /// (3,3)" or "Red Cannon ate Green Horse".
    ///
    /// The request is always checked with [`classify`]. When `enforce_rules`
    /// is unset, the move is forced: the side to move is left as it is, so the
    /// same side moves again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalMove`] if the request is invalid in the current
    /// position. The board is not modified in that case.
    pub fn apply_move(&mut self, request: MoveRequest, enforce_rules: bool) -> Result<String> {
        let description = match classify(self, request) {
            Classification::Invalid(reason) => {
                trace!("rejected {request}: {reason}");
                return Err(Error::IllegalMove { request, reason });
            },
            Classification::Move { piece } => {
                self.pieces[piece].set_square(request.to());
                format!("{} moved to {}", self.pieces[piece], request.to())
            },
            Classification::Capture { piece, target } => {
                self.pieces[target].capture();
                self.pieces[piece].set_square(request.to());
                format!("{} ate {}", self.pieces[piece], self.pieces[target])
            },
        };
        if enforce_rules {
            self.side_to_move = !self.side_to_move;
        }
        debug!("{description}");
        Ok(description)
    }

    /// Passes the turn to the other side without moving.
    pub fn skip_turn(&mut self) {
        debug!("{} skipped a turn", self.side_to_move);
        self.side_to_move = !self.side_to_move;
    }

    /// Checks whether the General of `side` has not been captured yet. A frame
    /// may carry more than one General record per side: any of them standing
    /// on the board keeps the side alive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invariant`] if the side has no General at all.
    pub fn is_king_alive(&self, side: Side) -> Result<bool> {
        let mut generals = self
            .pieces
            .iter()
            .filter(|piece| piece.kind() == PieceKind::General && piece.side() == side)
            .peekable();
        if generals.peek().is_none() {
            warn!("{side} General is missing from the board");
            return Err(Error::Invariant(format!("{side} General is missing")));
        }
        Ok(generals.any(|general| !general.is_captured()))
    }

    /// Returns the side whose opponent has lost the General, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invariant`] if a General is missing or if both have
    /// been captured.
    pub fn winner(&self) -> Result<Option<Side>> {
        match (self.is_king_alive(Side::Red)?, self.is_king_alive(Side::Green)?) {
            (true, true) => Ok(None),
            (true, false) => Ok(Some(Side::Red)),
            (false, true) => Ok(Some(Side::Green)),
            (false, false) => Err(Error::Invariant("both Generals are captured".into())),
        }
    }

    /// Counts, for each side, the pieces that could capture on `square`.
    ///
    /// If the square is occupied, the attackers are counted against its
    /// occupant regardless of the side the occupant belongs to (friendly
    /// pieces "protect" it). An empty square is tested with a detached
    /// stand-in Soldier: capture geometry depends on the attacker, the only
    /// exception being the Generals facing each other which requires a real
    /// General on the square.
    #[must_use]
    pub fn contested_count(&self, square: Square) -> Contest {
        let occupant = self.piece_index_at(square);
        let stand_in = Piece::new(PieceKind::Soldier, Side::Red, square);
        let target = occupant.map_or(&stand_in, |index| &self.pieces[index]);
        let mut contest = Contest::default();
        for (index, attacker) in self.pieces.iter().enumerate() {
            if attacker.is_captured() || occupant == Some(index) {
                continue;
            }
            if attacker.can_capture(target, self) {
                contest.count(attacker.side());
            }
        }
        contest
    }

    /// Kinds of the captured pieces of `side` in insertion order.
    pub fn eaten(&self, side: Side) -> impl Iterator<Item = PieceKind> + '_ {
        self.pieces
            .iter()
            .filter(move |piece| piece.is_captured() && piece.side() == side)
            .map(Piece::kind)
    }

    /// Puts a previously captured piece back on an empty square. If several
    /// pieces of that kind were captured, the first one on record returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Placement`] if the square is occupied or off the board,
    /// or if no such piece has been captured.
    pub fn place(&mut self, side: Side, kind: PieceKind, square: Square) -> Result<String> {
        if !square.is_valid() {
            return Err(Error::Placement("pieces can only be placed on the board".into()));
        }
        if let Some(occupant) = self.piece_at(square) {
            return Err(Error::Placement(format!(
                "{square} is already occupied by {occupant}"
            )));
        }
        let piece = self
            .pieces
            .iter_mut()
            .find(|piece| piece.is_captured() && piece.side() == side && piece.kind() == kind)
            .ok_or_else(|| Error::Placement(format!("no {side} {kind} has been captured")))?;
        piece.set_square(square);
        let description = format!("{piece} placed @ {square}");
        debug!("{description}");
        Ok(description)
    }

    /// Takes the piece standing on `square` off the board as if it was
    /// captured.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Placement`] if there is no piece on the square.
    pub fn remove(&mut self, square: Square) -> Result<String> {
        let index = self
            .piece_index_at(square)
            .ok_or_else(|| Error::Placement(format!("there is no piece on {square}")))?;
        self.pieces[index].capture();
        let description = format!("{} @ {square} was removed", self.pieces[index]);
        debug!("{description}");
        Ok(description)
    }

    /// Captures everything except the Generals, which return to the middle of
    /// their back rows.
    pub fn clear(&mut self) {
        let mut returned = HashSet::new();
        for piece in &mut self.pieces {
            let side = piece.side();
            if piece.kind() == PieceKind::General && returned.insert(side) {
                piece.set_square(Square::at(MIDDLE_COL, side.home_row()));
            } else {
                piece.capture();
            }
        }
        debug!("board cleared except for the Generals");
    }

    /// Parses a board from its frame:
    ///
    /// ```text
    /// FRAME  ::= SIDE ( '|' RECORD )*
    /// SIDE   ::= 'RED' | 'GREEN'
    /// RECORD ::= KIND ' ' ('R' | 'G') ' ' COL ' ' ROW
    /// ```
    ///
    /// Captured pieces are recorded with `-1 -1` as their coordinates. Fields
    /// of a record may be separated by more than one space.
    ///
    /// NOTE: This expects the frame without surrounding whitespace. Use
    /// `Board::try_from` to clean up the input first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedFrame`] if any token is unknown, a record has
    /// the wrong number of fields, a coordinate pair is neither on the board
    /// nor the sentinel, or two pieces share a square.
    pub fn from_frame(input: &str) -> Result<Self> {
        let mut records = input.split('|');
        let side_to_move = match records.next() {
            Some("RED") => Side::Red,
            Some("GREEN") => Side::Green,
            Some(token) => {
                return Err(Error::MalformedFrame(format!(
                    "side to move should be 'RED' or 'GREEN', got '{token}'"
                )))
            },
            None => return Err(Error::MalformedFrame("missing side to move".into())),
        };
        let pieces = records.map(parse_record).collect::<Result<Vec<_>>>()?;
        Self::new(pieces, side_to_move)
    }
}

fn parse_record(record: &str) -> Result<Piece> {
    let malformed = |message: String| Error::MalformedFrame(format!("{message} in '{record}'"));
    let Some((kind, side, col, row)) = record.split_whitespace().collect_tuple() else {
        return Err(malformed("expected '<Kind> <R|G> <col> <row>'".into()));
    };
    let kind = PieceKind::ALL
        .into_iter()
        .find(|candidate| candidate.name() == kind)
        .ok_or_else(|| malformed(format!("unknown piece kind '{kind}'")))?;
    let side = Side::BOTH
        .into_iter()
        .find(|candidate| candidate.frame_token() == side)
        .ok_or_else(|| malformed(format!("side should be 'R' or 'G', got '{side}'")))?;
    let coordinate = |token: &str| {
        token
            .parse::<i32>()
            .map_err(|e| malformed(format!("bad coordinate '{token}': {e}")))
    };
    let square = Square::new(coordinate(col)?, coordinate(row)?).map_err(|e| malformed(e.to_string()))?;
    Ok(Piece::new(kind, side, square))
}

impl TryFrom<&str> for Board {
    type Error = Error;

    /// Trims the input and parses it with [`Board::from_frame`].
    fn try_from(input: &str) -> Result<Self> {
        Self::from_frame(input.trim())
    }
}

impl fmt::Display for Board {
    /// Prints the board as a frame.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.side_to_move.turn_token())?;
        for piece in &self.pieces {
            write!(
                f,
                "|{} {} {} {}",
                piece.kind().name(),
                piece.side().frame_token(),
                piece.square().col(),
                piece.square().row()
            )?;
        }
        Ok(())
    }
}
