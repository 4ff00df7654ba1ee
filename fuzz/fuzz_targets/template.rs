#![no_main]

use libfuzzer_sys::fuzz_target;
use knook::template::{board_template, parse_board, Registry};

fuzz_target!(|data: &str| {
    let registry = Registry::default();
    if let Ok(board) = parse_board(data, &registry) {
        let template = board_template(&board, &registry).expect("registered");
        let roundtripped = parse_board(&template, &registry).expect("roundtrip");
        assert_eq!(board, roundtripped);
    }
});
