use iai::black_box;
use knook::{
    perft,
    template::{board_template, parse_board, Registry},
    Board, Game, Move, Side,
};

const MIDDLEGAME: &str = "rn1qkb1r/pbp2ppp/1p2p3/3n4/8/2N2NP1/PP1PPPBP/R1BQ1RK1";

fn middlegame() -> Game {
    Game::new(parse_board(MIDDLEGAME, &Registry::default()).expect("valid template"))
}

fn bench_shallow_perft() {
    let game: Game = Game::default();
    assert_eq!(black_box(perft(black_box(&game), 2)), 400);
}

fn bench_perft() {
    let game: Game = Game::default();
    assert_eq!(perft(black_box(&game), 3), 8_902);
}

fn bench_generate_moves() -> usize {
    let game = middlegame();
    black_box(&game).all_moves(Side::Black).len()
}

fn bench_legal_moves() -> usize {
    let game = middlegame();
    black_box(&game).legal_moves(Side::Black).len()
}

fn bench_apply_move() -> Game {
    let mut game = middlegame();
    let m = Move::new("f8".parse().expect("pos"), "e7".parse().expect("pos")).capture();
    black_box(&mut game).apply_move(&m).expect("applied");
    game
}

fn bench_parse_template() -> Board {
    parse_board(black_box(MIDDLEGAME), &Registry::default()).expect("valid template")
}

fn bench_board_template() -> String {
    let board = Board::standard();
    board_template(black_box(&board), &Registry::default()).expect("registered")
}

iai::main!(
    bench_shallow_perft,
    bench_perft,
    bench_generate_moves,
    bench_legal_moves,
    bench_apply_move,
    bench_parse_template,
    bench_board_template,
);
