#![no_main]
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use xiangqi::rules::Board;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(board) = Board::try_from(s) {
            assert_eq!(Board::from_frame(&board.to_string()), Ok(board));
        }
    }
});
