//! Movement and capture geometry for each [`PieceKind`].
//!
//! Every predicate looks at the board as it stands before the move: the
//! moving piece's own square matters for the path math, the occupant of the
//! destination (if any) does not.

use crate::rules::board::Board;
use crate::rules::core::{Piece, PieceKind, Square};

/// Checks whether `piece` may move to `to`. Captured pieces and off-board
/// destinations never qualify.
pub(super) fn can_move_to(piece: &Piece, to: Square, board: &Board) -> bool {
    let from = piece.square();
    if !from.is_valid() || !to.is_valid() {
        return false;
    }
    let (dcol, drow) = (to.col() - from.col(), to.row() - from.row());
    match piece.kind() {
        PieceKind::Chariot | PieceKind::Cannon => obstacles_between(from, to, board) == Some(0),
        PieceKind::Horse => {
            matches!((dcol.abs(), drow.abs()), (1, 2) | (2, 1))
                // The leg is the orthogonal neighbour along the long side of
                // the L: halving the deltas rounds the short side to zero.
                && !board.is_occupied(from.shifted(dcol / 2, drow / 2))
        },
        PieceKind::Elephant => {
            !piece.side().across_river(to.row())
                && dcol.abs() == 2
                && drow.abs() == 2
                && !board.is_occupied(from.shifted(dcol / 2, drow / 2))
        },
        PieceKind::Advisor => {
            piece.side().palace_contains(to) && dcol.abs() == 1 && drow.abs() == 1
        },
        PieceKind::General => {
            piece.side().palace_contains(to) && dcol.abs() + drow.abs() == 1
        },
        PieceKind::Soldier => {
            let forward = dcol == 0 && drow == piece.side().forward();
            let sideways =
                piece.side().across_river(from.row()) && drow == 0 && dcol.abs() == 1;
            forward || sideways
        },
    }
}

/// Checks whether `attacker` may capture `target` from where it stands.
pub(super) fn can_capture(attacker: &Piece, target: &Piece, board: &Board) -> bool {
    let (from, to) = (attacker.square(), target.square());
    if !from.is_valid() || !to.is_valid() {
        return false;
    }
    match attacker.kind() {
        // The cannon jumps over exactly one screen.
        PieceKind::Cannon => obstacles_between(from, to, board) == Some(1),
        PieceKind::General => {
            can_move_to(attacker, to, board)
                || (target.kind() == PieceKind::General
                    && from.col() == to.col()
                    && obstacles_between(from, to, board) == Some(0))
        },
        _ => can_move_to(attacker, to, board),
    }
}

/// Counts the occupied squares strictly between `from` and `to`. Returns
/// `None` when the squares are distinct but do not share a row or a column,
/// or when they are the same square.
pub fn obstacles_between(from: Square, to: Square, board: &Board) -> Option<usize> {
    let (dcol, drow) = (to.col() - from.col(), to.row() - from.row());
    if (dcol != 0 && drow != 0) || (dcol == 0 && drow == 0) {
        return None;
    }
    let (step_col, step_row) = (dcol.signum(), drow.signum());
    let distance = dcol.abs().max(drow.abs());
    Some(
        (1..distance)
            .filter(|&i| board.is_occupied(from.shifted(step_col * i, step_row * i)))
            .count(),
    )
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn square(col: i32, row: i32) -> Square {
        Square::new(col, row).unwrap()
    }

    fn board(frame: &str) -> Board {
        Board::from_frame(frame).unwrap()
    }

    #[test]
    fn obstacles() {
        let board = board("RED|Car R 1 1|Footman R 1 3|Footman G 1 4|Horse R 4 1");
        assert_eq!(obstacles_between(square(1, 1), square(1, 2), &board), Some(0));
        assert_eq!(obstacles_between(square(1, 1), square(1, 4), &board), Some(1));
        assert_eq!(obstacles_between(square(1, 1), square(1, 5), &board), Some(2));
        assert_eq!(obstacles_between(square(1, 5), square(1, 1), &board), Some(2));
        assert_eq!(obstacles_between(square(1, 1), square(9, 1), &board), Some(1));
        assert_eq!(obstacles_between(square(1, 1), square(2, 2), &board), None);
        assert_eq!(obstacles_between(square(1, 1), square(1, 1), &board), None);
    }

    #[test]
    fn captured_pieces_do_not_move() {
        let board = board("RED|Car R -1 -1");
        let car = board.pieces()[0];
        assert!(!car.can_move_to(square(1, 1), &board));
    }

    #[test]
    fn soldier_before_and_after_river() {
        let board = board("RED|Footman R 5 5|Footman R 1 6|Footman G 9 6|Footman G 3 5");
        let [red_home, red_across, green_home, green_across] = [0, 1, 2, 3].map(|i| board.pieces()[i]);

        assert!(red_home.can_move_to(square(5, 6), &board));
        assert!(!red_home.can_move_to(square(4, 5), &board));
        assert!(!red_home.can_move_to(square(5, 4), &board));

        assert!(red_across.can_move_to(square(1, 7), &board));
        assert!(red_across.can_move_to(square(2, 6), &board));
        assert!(!red_across.can_move_to(square(1, 5), &board));
        assert!(!red_across.can_move_to(square(2, 7), &board));

        assert!(green_home.can_move_to(square(9, 5), &board));
        assert!(!green_home.can_move_to(square(8, 6), &board));
        assert!(!green_home.can_move_to(square(9, 7), &board));

        assert!(green_across.can_move_to(square(3, 4), &board));
        assert!(green_across.can_move_to(square(2, 5), &board));
        assert!(green_across.can_move_to(square(4, 5), &board));
        assert!(!green_across.can_move_to(square(3, 6), &board));
    }

    #[test]
    fn elephant_stays_home() {
        let board = board("RED|Elephant R 3 5|Elephant G 7 6|Footman R 4 4");
        let red = board.pieces()[0];
        let green = board.pieces()[1];
        assert!(!red.can_move_to(square(5, 7), &board));
        assert!(!red.can_move_to(square(1, 7), &board));
        assert!(red.can_move_to(square(1, 3), &board));
        // The eye of the elephant is blocked.
        assert!(!red.can_move_to(square(5, 3), &board));
        assert!(!green.can_move_to(square(5, 4), &board));
        assert!(green.can_move_to(square(9, 8), &board));
        assert!(!green.can_move_to(square(8, 7), &board));
    }

    #[test]
    fn advisor_and_general_stay_in_palace() {
        let board = board("RED|Guard R 4 1|General R 4 2|Guard G 6 10|General G 6 8");
        let [advisor, general, green_advisor, green_general] = [0, 1, 2, 3].map(|i| board.pieces()[i]);
        assert!(advisor.can_move_to(square(5, 2), &board));
        assert!(!advisor.can_move_to(square(3, 2), &board));
        assert!(!advisor.can_move_to(square(4, 2), &board));
        assert!(general.can_move_to(square(5, 2), &board));
        assert!(general.can_move_to(square(4, 3), &board));
        assert!(!general.can_move_to(square(3, 2), &board));
        assert!(!general.can_move_to(square(5, 3), &board));
        assert!(green_advisor.can_move_to(square(5, 9), &board));
        assert!(!green_advisor.can_move_to(square(7, 9), &board));
        assert!(green_general.can_move_to(square(5, 8), &board));
        assert!(!green_general.can_move_to(square(6, 7), &board));
    }
}
