use knook::{
    template::{parse_board, Registry},
    Game, Side,
};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

#[serde_as]
#[derive(Deserialize)]
struct Record {
    template: String,
    #[serde_as(as = "DisplayFromStr")]
    side: Side,
    legal: usize,
    check: bool,
}

#[test]
fn test_positions() {
    let registry = Registry::default();
    let mut reader = csv::Reader::from_path("tests/positions.csv").expect("reader");

    for (i, record) in reader.deserialize().enumerate() {
        let record: Record = record.expect("record");
        let board = parse_board(&record.template, &registry).expect("valid template");
        let game = Game::new(board);

        let legals = game.legal_moves(record.side);
        assert_eq!(legals.len(), record.legal, "line {}: {}", i + 1, record.template);
        assert_eq!(game.is_check(record.side), record.check, "line {}", i + 1);
        assert_eq!(game.is_mate(record.side), legals.is_empty(), "line {}", i + 1);
        assert_eq!(
            game.is_checkmate(record.side),
            legals.is_empty() && record.check,
            "line {}",
            i + 1
        );
    }
}
