//! Xiangqi primitives commonly used within [`crate::rules`].

use std::fmt;
use std::ops::{Not, RangeInclusive};

use crate::rules::attacks;
use crate::rules::board::Board;
use crate::rules::error::{Error, Result};

/// Number of columns (vertical lines) of the board.
pub const COLS: i32 = 9;
/// Number of rows (horizontal lines) of the board.
pub const ROWS: i32 = 10;
/// Value of both coordinates of [`Square::OFF_BOARD`].
pub const OFF_BOARD: i32 = -1;

/// Both palaces are centered on this column.
pub(crate) const MIDDLE_COL: i32 = (COLS + 1) / 2;
/// The last row of Red's half of the board. Green's half starts right after.
const RIVER_ROW: i32 = ROWS / 2;

/// A point of the board where a piece can stand, or the sentinel for pieces
/// that are no longer on the board.
///
/// Columns and rows are 1-based: columns go from left to right, rows from
/// Red's back edge to Green's back edge.
///
/// ```
/// use xiangqi::rules::core::Square;
///
/// let square = Square::new(5, 1).unwrap();
/// assert_eq!((square.col(), square.row()), (5, 1));
/// assert!(Square::new(-1, -1).unwrap().is_off_board());
/// assert!(Square::new(-1, 3).is_err());
/// assert!(Square::new(10, 3).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    col: i32,
    row: i32,
}

impl Square {
    /// Where captured pieces are kept.
    pub const OFF_BOARD: Self = Self {
        col: OFF_BOARD,
        row: OFF_BOARD,
    };

    /// Creates a square from its coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] unless both coordinates are within the
    /// board or both are equal to [`OFF_BOARD`].
    pub fn new(col: i32, row: i32) -> Result<Self> {
        if Self::on_board(col, row) || (col == OFF_BOARD && row == OFF_BOARD) {
            Ok(Self { col, row })
        } else {
            Err(Error::Construction { col, row })
        }
    }

    /// Checks whether a coordinate pair lies within the board.
    #[must_use]
    pub const fn on_board(col: i32, row: i32) -> bool {
        1 <= col && col <= COLS && 1 <= row && row <= ROWS
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn col(self) -> i32 {
        self.col
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn row(self) -> i32 {
        self.row
    }

    /// Returns `true` for every square except [`Square::OFF_BOARD`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        Self::on_board(self.col, self.row)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_off_board(self) -> bool {
        self.col == OFF_BOARD && self.row == OFF_BOARD
    }

    /// Creates a square known to be on the board.
    pub(crate) const fn at(col: i32, row: i32) -> Self {
        debug_assert!(Self::on_board(col, row));
        Self { col, row }
    }

    /// Moves the square by the given offset. The result has to stay on the
    /// board: this is only used for squares lying between two valid ones.
    pub(crate) const fn shifted(self, dcol: i32, drow: i32) -> Self {
        Self::at(self.col + dcol, self.row + drow)
    }

    /// Iterates over all squares of the board, row by row starting from Red's
    /// back edge.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=ROWS).flat_map(|row| (1..=COLS).map(move |col| Self { col, row }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// Xiangqi is played between Red (moving first) and Green. Green is the
/// traditional Black: it is easier to tell apart on a terminal.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Green,
}

impl Side {
    #[allow(missing_docs)]
    pub const BOTH: [Self; 2] = [Self::Red, Self::Green];

    /// Row delta of a single step towards the opponent.
    #[must_use]
    pub const fn forward(self) -> i32 {
        match self {
            Self::Red => 1,
            Self::Green => -1,
        }
    }

    /// The row of the side's back edge, where its General starts.
    #[must_use]
    pub const fn home_row(self) -> i32 {
        match self {
            Self::Red => 1,
            Self::Green => ROWS,
        }
    }

    fn palace_rows(self) -> RangeInclusive<i32> {
        match self {
            Self::Red => 1..=3,
            Self::Green => ROWS - 2..=ROWS,
        }
    }

    /// Checks whether the square is in the 3x3 palace of this side.
    #[must_use]
    pub fn palace_contains(self, square: Square) -> bool {
        square.is_valid()
            && (MIDDLE_COL - 1..=MIDDLE_COL + 1).contains(&square.col())
            && self.palace_rows().contains(&square.row())
    }

    /// Checks whether the row lies on the opponent's half of the board.
    #[must_use]
    pub const fn across_river(self, row: i32) -> bool {
        match self {
            Self::Red => row > RIVER_ROW,
            Self::Green => row <= RIVER_ROW,
        }
    }

    /// Single-letter token used for piece records in frames.
    #[must_use]
    pub const fn frame_token(self) -> &'static str {
        match self {
            Self::Red => "R",
            Self::Green => "G",
        }
    }

    /// Token used for the side to move in frames.
    #[must_use]
    pub const fn turn_token(self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Green => "GREEN",
        }
    }
}

impl Not for Side {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Red => Self::Green,
            Self::Green => Self::Red,
        }
    }
}

impl TryFrom<&str> for Side {
    type Error = Error;

    /// Parses a side name as typed by a player: `Red`, `Green` or their first
    /// letters, in any case.
    fn try_from(side: &str) -> Result<Self> {
        if side.eq_ignore_ascii_case("red") || side.eq_ignore_ascii_case("r") {
            Ok(Self::Red)
        } else if side.eq_ignore_ascii_case("green") || side.eq_ignore_ascii_case("g") {
            Ok(Self::Green)
        } else {
            Err(Error::Placement(format!(
                "side should be 'Red' or 'Green', got '{side}'"
            )))
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Red => "Red",
            Self::Green => "Green",
        })
    }
}

/// The seven kinds of Xiangqi pieces. The set is closed: movement and capture
/// rules for each kind live in [`crate::rules::attacks`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// Moves any distance along a line without jumping. Known as "Car".
    Chariot,
    /// Moves in an L shape unless its leg is blocked.
    Horse,
    /// Moves exactly two points diagonally, never across the river.
    Elephant,
    /// Moves one point diagonally inside the palace. Known as "Guard".
    Advisor,
    /// Moves one point orthogonally inside the palace. Losing it loses the
    /// game.
    General,
    /// Moves like a [`PieceKind::Chariot`] but captures by jumping over
    /// exactly one piece.
    Cannon,
    /// Moves forward; sideways too once it has crossed the river. Known as
    /// "Footman".
    Soldier,
}

impl PieceKind {
    #[allow(missing_docs)]
    pub const ALL: [Self; 7] = [
        Self::Chariot,
        Self::Horse,
        Self::Elephant,
        Self::Advisor,
        Self::General,
        Self::Cannon,
        Self::Soldier,
    ];

    /// Name used in frames, commands and move descriptions.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chariot => "Car",
            Self::Horse => "Horse",
            Self::Elephant => "Elephant",
            Self::Advisor => "Guard",
            Self::General => "General",
            Self::Cannon => "Cannon",
            Self::Soldier => "Footman",
        }
    }

    /// The traditional character of the piece. Elephants, Generals and
    /// Soldiers are written differently for each side.
    #[must_use]
    pub const fn glyph(self, side: Side) -> char {
        match (self, side) {
            (Self::Chariot, _) => '车',
            (Self::Horse, _) => '马',
            (Self::Elephant, Side::Red) => '相',
            (Self::Elephant, Side::Green) => '象',
            (Self::Advisor, _) => '士',
            (Self::General, Side::Red) => '帅',
            (Self::General, Side::Green) => '将',
            (Self::Cannon, _) => '炮',
            (Self::Soldier, Side::Red) => '兵',
            (Self::Soldier, Side::Green) => '卒',
        }
    }
}

impl TryFrom<&str> for PieceKind {
    type Error = Error;

    fn try_from(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| Error::Placement(format!("unknown piece kind '{name}'")))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece record. Its identity is its slot in the owning [`Board`]: the kind
/// and the side never change, only the square does. Captured pieces stay on
/// record with [`Square::OFF_BOARD`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    side: Side,
    square: Square,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(kind: PieceKind, side: Side, square: Square) -> Self {
        Self { kind, side, square }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_captured(&self) -> bool {
        self.square.is_off_board()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn glyph(&self) -> char {
        self.kind.glyph(self.side)
    }

    pub(crate) fn set_square(&mut self, square: Square) {
        self.square = square;
    }

    pub(crate) fn capture(&mut self) {
        self.square = Square::OFF_BOARD;
    }

    /// Checks whether the piece may move to an empty `destination` given the
    /// current occupancy of the `board`. Whatever stands on `destination`
    /// itself is ignored.
    #[must_use]
    pub fn can_move_to(&self, destination: Square, board: &Board) -> bool {
        attacks::can_move_to(self, destination, board)
    }

    /// Checks whether the piece may capture `target` from where it stands.
    #[must_use]
    pub fn can_capture(&self, target: &Self, board: &Board) -> bool {
        attacks::can_capture(self, target, board)
    }
}

impl fmt::Display for Piece {
    /// Prints the side and the kind, e.g. "Red Cannon".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.side, self.kind)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn square_construction() {
        for col in 1..=COLS {
            for row in 1..=ROWS {
                let square = Square::new(col, row).unwrap();
                assert_eq!((square.col(), square.row()), (col, row));
                assert!(square.is_valid());
                assert!(!square.is_off_board());
            }
        }
        let sentinel = Square::new(OFF_BOARD, OFF_BOARD).unwrap();
        assert_eq!(sentinel, Square::OFF_BOARD);
        assert!(sentinel.is_off_board());
        assert!(!sentinel.is_valid());
    }

    #[test]
    fn partial_sentinel_is_rejected() {
        assert_eq!(
            Square::new(OFF_BOARD, 4),
            Err(Error::Construction { col: -1, row: 4 })
        );
        assert!(Square::new(3, OFF_BOARD).is_err());
        assert!(Square::new(0, 0).is_err());
        assert!(Square::new(COLS + 1, 1).is_err());
        assert!(Square::new(1, ROWS + 1).is_err());
        assert!(Square::new(-2, -2).is_err());
    }

    #[test]
    fn all_squares() {
        assert_eq!(Square::all().count(), (COLS * ROWS) as usize);
        assert!(Square::all().all(Square::is_valid));
    }

    #[test]
    fn palaces() {
        let palace = |side: Side| {
            Square::all()
                .filter(|square| side.palace_contains(*square))
                .map(|square| (square.col(), square.row()))
                .collect::<Vec<_>>()
        };
        assert_eq!(
            palace(Side::Red),
            vec![
                (4, 1),
                (5, 1),
                (6, 1),
                (4, 2),
                (5, 2),
                (6, 2),
                (4, 3),
                (5, 3),
                (6, 3)
            ]
        );
        assert_eq!(palace(Side::Green).len(), 9);
        assert!(Side::Green.palace_contains(Square::new(4, 8).unwrap()));
        assert!(!Side::Green.palace_contains(Square::new(4, 7).unwrap()));
        assert!(!Side::Red.palace_contains(Square::OFF_BOARD));
    }

    #[test]
    fn river() {
        assert!(!Side::Red.across_river(5));
        assert!(Side::Red.across_river(6));
        assert!(!Side::Green.across_river(6));
        assert!(Side::Green.across_river(5));
    }

    #[test]
    fn names() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::try_from(kind.name()), Ok(kind));
        }
        assert!(PieceKind::try_from("Queen").is_err());
        assert_eq!(Side::try_from("green"), Ok(Side::Green));
        assert_eq!(Side::try_from("R"), Ok(Side::Red));
        assert!(Side::try_from("Black").is_err());
        assert_eq!(!Side::Red, Side::Green);
        let piece = Piece::new(PieceKind::Advisor, Side::Green, Square::OFF_BOARD);
        assert_eq!(piece.to_string(), "Green Guard");
        assert_eq!(Square::new(9, 10).unwrap().to_string(), "(9,10)");
        assert!(piece.is_captured());
        assert_eq!(piece.glyph(), '士');
        assert_eq!(PieceKind::General.glyph(Side::Green), '将');
    }
}
