use knook::{
    perft,
    template::{parse_board, Registry},
    Game,
};

fn game(template: &str) -> Game {
    Game::new(parse_board(template, &Registry::default()).expect("valid template"))
}

#[test]
fn test_opening() {
    let game: Game = Game::default();
    assert_eq!(perft(&game, 1), 20);
    assert_eq!(perft(&game, 2), 400);
    assert_eq!(perft(&game, 3), 8_902);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_opening_deep() {
    let game: Game = Game::default();
    assert_eq!(perft(&game, 4), 197_281);
}

#[test]
fn test_castling_rooks() {
    let game = game("4k3/8/8/8/8/8/8/R3K2R");
    assert_eq!(perft(&game, 1), 26);
}

#[test]
fn test_knook() {
    let game = game("4k3/8/8/8/8/8/8/Ñ3K3");
    assert_eq!(perft(&game, 1), 17);
}

#[test]
fn test_small_board() {
    // Kings in opposite corners of a 3x3 board. The center is never
    // available, and each reply has exactly one safe square.
    let game = game("2k/3/K2");
    assert_eq!(perft(&game, 1), 2);
    assert_eq!(perft(&game, 2), 2);
}
