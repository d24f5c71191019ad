use pretty_assertions::assert_eq;
use xiangqi::rules::core::Side;
use xiangqi::rules::{Board, Error, MoveRequest};

// A short opening followed by a few captures of both sides.
const GAME: [&str; 12] = [
    "8 3 -> 5 3",
    "2 10 -> 3 8",
    "8 1 -> 7 3",
    "1 10 -> 2 10",
    "9 1 -> 8 1",
    "2 8 -> 2 4",
    "5 3 -> 5 7",
    "3 10 -> 5 8",
    "5 7 -> 9 7",
    "9 10 -> 9 7",
    "8 1 -> 8 8",
    "2 4 -> 2 1",
];

#[test]
fn round_trip_during_a_game() {
    let mut board = Board::starting();
    for (ply, input) in GAME.into_iter().enumerate() {
        let request = MoveRequest::try_from(input).unwrap();
        let description = board
            .apply_move(request, true)
            .unwrap_or_else(|e| panic!("ply {ply}: {e}"));
        assert!(!description.is_empty());
        let frame = board.to_string();
        assert_eq!(Board::from_frame(&frame), Ok(board.clone()), "ply {ply}");
    }
    assert_eq!(board.side_to_move(), Side::Red);
    assert_eq!(board.winner(), Ok(None));
    assert_eq!(board.eaten(Side::Red).count() + board.eaten(Side::Green).count(), 5);
    assert!(board.to_string().contains("|Horse R -1 -1|"));
}

#[test]
fn round_trip_after_forced_moves_and_edits() {
    let mut board = Board::starting();
    let forced = MoveRequest::try_from("8 3 -> 8 10").unwrap();
    assert!(board.apply_move(forced, false).is_ok());
    assert!(board.remove(Board::starting().pieces()[4].square()).is_ok());
    board.skip_turn();
    let frame = board.to_string();
    assert!(frame.starts_with("GREEN|Car R 1 1|"));
    assert!(frame.contains("|General R -1 -1|"));
    assert_eq!(Board::try_from(frame.as_str()), Ok(board));
}

#[test]
fn captured_records_keep_their_order() {
    let frame = "GREEN|General R 5 1|Car G -1 -1|General G 5 10|Car G -1 -1|Footman R 3 6";
    let board = Board::from_frame(frame).unwrap();
    assert_eq!(board.to_string(), frame);
    assert_eq!(board.pieces().len(), 5);
}

#[test]
fn malformed_frames_are_rejected() {
    for frame in [
        "WHITE|General R 5 1",
        "RED|General R 5 1|General G 5 1",
        "RED|General X 5 1",
        "RED|King R 5 1",
        "RED|General R 5 11",
        "RED|General R 5 -1",
        "RED|General R 5",
        "RED||General R 5 1",
    ] {
        assert!(
            matches!(Board::try_from(frame), Err(Error::MalformedFrame(_))),
            "{frame}"
        );
    }
}
