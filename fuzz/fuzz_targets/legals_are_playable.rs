#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use knook::{Game, Move, Pos};

#[derive(Arbitrary, Debug)]
struct Input {
    choices: Vec<u8>,
    probes: Vec<(Pos, Pos)>,
}

fuzz_target!(|input: Input| {
    let mut game: Game = Game::default();

    for (from, to) in input.probes.into_iter().take(8) {
        let m = Move::new(from, to);
        if game.is_valid_move(&m) {
            game.clone().play(&m).expect("valid move is playable");
        }
    }

    for choice in input.choices.into_iter().take(16) {
        let side = game.side_to_move();
        let legals = game.legal_moves(side);
        if legals.is_empty() {
            assert!(game.outcome().is_some());
            break;
        }
        let m = &legals[usize::from(choice) % legals.len()];
        game.play(m).expect("legal move is playable");
        assert!(!game.is_check(side));
    }
});
