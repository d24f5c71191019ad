#![no_main]
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use xiangqi::rules::{Board, MoveRequest};

// Each line is a move request, the ones that fail to parse or are illegal
// are skipped.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let mut board = Board::starting();
    for line in s.lines() {
        let Ok(request) = MoveRequest::try_from(line) else {
            continue;
        };
        let before = board.clone();
        if board.apply_move(request, true).is_err() {
            assert_eq!(board, before);
        } else if board.winner().is_ok_and(|winner| winner.is_some()) {
            break;
        }
    }
    assert_eq!(Board::from_frame(&board.to_string()), Ok(board));
});
