// This file is part of the knook library.
// Copyright (C) 2025 The knook developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.


use std::{error::Error, fmt, str::FromStr, sync::Arc};

use tracing::debug;

use crate::{
    board::Board,
    errors::{BoardError, PlayError},
    listener::{Event, Listener},
    m::{Move, MoveList},
    movegen::{gen_moves, piece_moves, Situation},
    piece::Piece,
    pos::Pos,
    role::Role,
    side::{BySide, Side},
    validator::{StandardValidator, Validator},
};

/// A move as it was played.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct PlayedMove {
    /// Side of the piece that moved.
    pub side: Side,
    /// Type of the piece that moved, before any promotion.
    pub role: Role,
    pub m: Move,
    /// Pieces removed by the move, and where they were.
    pub captured: Vec<(Pos, Piece)>,
}

/// Outcome of a game.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Outcome {
    Decisive { winner: Side },
    Draw,
}

impl Outcome {
    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw => None,
        }
    }

    pub const fn from_winner(winner: Option<Side>) -> Outcome {
        match winner {
            Some(winner) => Outcome::Decisive { winner },
            None => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Outcome::Decisive { winner: Side::White } => "1-0",
            Outcome::Decisive { winner: Side::Black } => "0-1",
            Outcome::Draw => "1/2-1/2",
        })
    }
}

/// Error when parsing an [`Outcome`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseOutcomeError;

impl fmt::Display for ParseOutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid outcome")
    }
}

impl Error for ParseOutcomeError {}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Outcome, ParseOutcomeError> {
        match s {
            "1-0" => Ok(Outcome::Decisive { winner: Side::White }),
            "0-1" => Ok(Outcome::Decisive { winner: Side::Black }),
            "1/2-1/2" => Ok(Outcome::Draw),
            _ => Err(ParseOutcomeError),
        }
    }
}

/// A board together with the rules it is played by, the moves played so
/// far, and the score of each side.
///
/// All changes to the board go through the game, which notifies subscribed
/// [`Listener`]s.
///
/// # Examples
///
/// ```
/// use knook::{Game, Outcome, Pos, Side};
///
/// let mut game: Game = Game::default();
/// for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
///     let m = game
///         .moves_from(from.parse()?)
///         .into_iter()
///         .find(|m| m.to() == to.parse::<Pos>().unwrap())
///         .expect("generated");
///     game.play(&m)?;
/// }
///
/// assert!(game.is_checkmate(Side::White));
/// assert_eq!(game.outcome(), Some(Outcome::Decisive { winner: Side::Black }));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub struct Game<V = StandardValidator> {
    board: Board,
    validator: V,
    history: Vec<Arc<PlayedMove>>,
    scores: BySide<u32>,
    listeners: Vec<Box<dyn Listener>>,
}

fn emit(listeners: &mut [Box<dyn Listener>], event: Event) {
    for listener in listeners {
        event.dispatch(listener.as_mut());
    }
}

impl Game<StandardValidator> {
    /// Creates a game played by the rules of chess.
    pub fn new(board: Board) -> Game<StandardValidator> {
        Game::with_validator(board, StandardValidator::default())
    }
}

impl Default for Game<StandardValidator> {
    fn default() -> Game<StandardValidator> {
        Game::new(Board::standard())
    }
}

impl<V: Validator> Game<V> {
    pub fn with_validator(board: Board, validator: V) -> Game<V> {
        Game {
            board,
            validator,
            history: Vec::new(),
            scores: BySide::default(),
            listeners: Vec::new(),
        }
    }

    /// Registers a listener for all future changes.
    pub fn subscribe<L: Listener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    /// Announces the game to listeners, typically once all of them have
    /// subscribed.
    pub fn create(&mut self) {
        emit(&mut self.listeners, Event::GameCreated);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Moves played so far, oldest first.
    pub fn history(&self) -> &[Arc<PlayedMove>] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&PlayedMove> {
        self.history.last().map(Arc::as_ref)
    }

    pub fn scores(&self) -> &BySide<u32> {
        &self.scores
    }

    /// Total cost of the opposing pieces the side has captured.
    pub fn score(&self, side: Side) -> u32 {
        *self.scores.get(side)
    }

    pub fn situation(&self) -> Situation<'_> {
        Situation::new(&self.board, self.last_move())
    }

    /// # Errors
    ///
    /// Returns [`BoardError::OccupiedSquare`] or [`BoardError::OutOfBounds`]
    /// and leaves the board unchanged.
    pub fn add_piece(&mut self, pos: Pos, piece: Piece) -> Result<(), BoardError> {
        self.board.add_piece(pos, piece)?;
        emit(&mut self.listeners, Event::PieceAdded { pos, piece });
        Ok(())
    }

    pub fn remove_piece(&mut self, pos: Pos) -> Option<Piece> {
        let piece = self.board.remove_piece(pos)?;
        emit(&mut self.listeners, Event::PieceRemoved { pos, piece });
        Some(piece)
    }

    /// Plays a move without validating it.
    ///
    /// Pieces on the capture squares are removed first and their cost is
    /// credited to the opponent of their side. Then the steps are executed
    /// in order. Each relocated piece has its move count incremented, and
    /// a promoting step replaces the piece with one of the target type that
    /// keeps side and move count.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptySquare`] if there is no piece on the
    /// origin, in which case nothing changes. Other errors come from
    /// [`Board::apply_steps`] and leave the game in an unspecified state.
    pub fn apply_move(&mut self, m: &Move) -> Result<(), BoardError> {
        let mover = self
            .board
            .get(m.from())
            .ok_or(BoardError::EmptySquare { pos: m.from() })?;

        let mut captured = Vec::new();
        for &pos in m.captures() {
            if let Some(piece) = self.remove_piece(pos) {
                let score = self.scores.get_mut(!piece.side);
                *score = score.saturating_add(piece.role.cost());
                captured.push((pos, piece));
            }
        }

        let listeners = &mut self.listeners;
        self.board.apply_steps(m.steps(), |board, step| {
            let piece = board
                .get_mut(step.to)
                .ok_or(BoardError::EmptySquare { pos: step.to })?;
            piece.move_count += 1;

            match step.promotion {
                None => emit(listeners, Event::PieceMoved { step: *step }),
                Some(role) => {
                    let promoted = piece.promoted(role);
                    board.replace_piece(step.to, promoted)?;
                    emit(listeners, Event::PiecePromoted { step: *step, piece: promoted });
                }
            }
            Ok(())
        })?;

        debug!(%m, side = %mover.side, captures = captured.len(), "applied move");
        self.history.push(Arc::new(PlayedMove {
            side: mover.side,
            role: mover.role,
            m: m.clone(),
            captured,
        }));
        Ok(())
    }

    /// Moves of the piece on `pos`, legal or not.
    pub fn moves_from(&self, pos: Pos) -> MoveList {
        piece_moves(&self.situation(), pos)
    }

    /// Moves of all pieces of the side, legal or not.
    pub fn all_moves(&self, side: Side) -> MoveList {
        let situation = self.situation();
        let mut moves = MoveList::new();
        for (pos, piece) in self.board.pieces() {
            if piece.side == side {
                gen_moves(&situation, pos, &mut moves);
            }
        }
        moves
    }

    pub fn legal_moves(&self, side: Side) -> MoveList {
        let mut moves = self.all_moves(side);
        moves.retain(|m| self.is_valid_move(m));
        moves
    }

    pub fn has_legal_move(&self, side: Side) -> bool {
        self.all_moves(side).iter().any(|m| self.is_valid_move(m))
    }

    pub fn is_valid_move(&self, m: &Move) -> bool {
        self.validator.validate(self, m)
    }

    /// Validates and applies a move.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::IllegalMove`] if the validator rejects the move.
    /// The game is unchanged in that case.
    pub fn play(&mut self, m: &Move) -> Result<(), PlayError> {
        if !self.is_valid_move(m) {
            return Err(PlayError::IllegalMove { m: m.clone() });
        }
        Ok(self.apply_move(m)?)
    }

    /// Checks if any opposing piece could capture a king of `side`. A side
    /// without a king is never attacked.
    pub fn is_attacked(&self, side: Side) -> bool {
        let situation = self.situation();
        let mut moves = MoveList::new();
        self.board
            .pieces()
            .filter(|(_, piece)| piece.side != side)
            .any(|(pos, _)| {
                moves.clear();
                gen_moves(&situation, pos, &mut moves);
                moves.iter().flat_map(|m| m.captures()).any(|&target| {
                    self.board
                        .get(target)
                        .is_some_and(|piece| piece.side == side && piece.role == Role::King)
                })
            })
    }

    pub fn is_check(&self, side: Side) -> bool {
        self.is_attacked(side)
    }

    /// The side has no legal move.
    pub fn is_mate(&self, side: Side) -> bool {
        !self.has_legal_move(side)
    }

    pub fn is_checkmate(&self, side: Side) -> bool {
        self.is_mate(side) && self.is_attacked(side)
    }

    pub fn is_stalemate(&self, side: Side) -> bool {
        self.is_mate(side) && !self.is_attacked(side)
    }

    /// The opponent of the side that made the last move, or White if no
    /// move has been played. Turn order is not enforced when playing moves.
    pub fn side_to_move(&self) -> Side {
        self.history.last().map_or(Side::White, |last| !last.side)
    }

    /// Checkmate or stalemate of the side to move.
    pub fn outcome(&self) -> Option<Outcome> {
        let side = self.side_to_move();
        if self.has_legal_move(side) {
            None
        } else if self.is_attacked(side) {
            Some(Outcome::Decisive { winner: !side })
        } else {
            Some(Outcome::Draw)
        }
    }
}

impl<V: Clone> Clone for Game<V> {
    /// Copies board, history, and scores. Listeners stay with the
    /// original.
    fn clone(&self) -> Game<V> {
        Game {
            board: self.board.clone(),
            validator: self.validator.clone(),
            history: self.history.clone(),
            scores: self.scores,
            listeners: Vec::new(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Game<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board)
            .field("validator", &self.validator)
            .field("history", &self.history)
            .field("scores", &self.scores)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::m::Step;

    fn pos(s: &str) -> Pos {
        s.parse().expect("valid pos")
    }

    fn find(game: &Game, from: &str, to: &str) -> Move {
        game.moves_from(pos(from))
            .into_iter()
            .find(|m| m.to() == pos(to) && m.promotion().map_or(true, |r| r == Role::Queen))
            .expect("move generated")
    }

    #[test]
    fn test_outcome_parse() {
        for s in ["1-0", "0-1", "1/2-1/2"] {
            assert_eq!(s.parse::<Outcome>().map(|o| o.to_string()).as_deref(), Ok(s));
        }
        assert_eq!("*".parse::<Outcome>(), Err(ParseOutcomeError));
        assert_eq!(Outcome::from_winner(Some(Side::Black)).winner(), Some(Side::Black));
    }

    #[test]
    fn test_apply_move_counts_and_history() {
        let mut game: Game = Game::default();
        let m = find(&game, "e2", "e3");
        game.play(&m).unwrap();

        let pawn = game.board().get(pos("e3")).expect("pawn");
        assert_eq!(pawn.move_count, 1);
        assert_eq!(game.board().get(pos("e2")), None);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.last_move().map(|l| l.role), Some(Role::Pawn));
        assert_eq!(game.side_to_move(), Side::Black);
        assert!(game.board().pieces().filter(|&(p, _)| p != pos("e3")).all(|(_, piece)| piece.move_count == 0));
    }

    #[test]
    fn test_illegal_move_leaves_game_unchanged() {
        let mut game: Game = Game::default();
        let m = Move::new(pos("e2"), pos("e5"));
        assert_eq!(game.play(&m), Err(PlayError::IllegalMove { m: m.clone() }));
        assert_eq!(game.board(), &Board::standard());
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_capture_scores() {
        let mut board = Board::new(8, 8);
        board.add_piece(pos("d4"), Side::White.piece(Role::Knook)).unwrap();
        board.add_piece(pos("d8"), Side::Black.piece(Role::Queen)).unwrap();
        let mut game = Game::new(board);

        game.play(&find(&game, "d4", "d8")).unwrap();
        assert_eq!(game.score(Side::White), 9);
        assert_eq!(game.score(Side::Black), 0);
        let last = game.last_move().expect("history");
        assert_eq!(last.captured.as_slice(), &[(pos("d8"), Side::Black.piece(Role::Queen))]);
    }

    #[test]
    fn test_king_capture_saturates() {
        let mut board = Board::new(4, 4);
        board.add_piece(pos("a1"), Side::White.piece(Role::Rook)).unwrap();
        board.add_piece(pos("a4"), Side::Black.piece(Role::King)).unwrap();
        board.add_piece(pos("d4"), Side::Black.piece(Role::King)).unwrap();
        let mut game = Game::new(board);
        game.apply_move(&Move::new(pos("a1"), pos("a4")).capture()).unwrap();
        game.apply_move(&Move::new(pos("a4"), pos("d4")).capture()).unwrap();
        assert_eq!(game.score(Side::White), u32::MAX);
    }

    #[test]
    fn test_promotion_keeps_move_count() {
        let mut board = Board::new(8, 8);
        let mut pawn = Side::White.piece(Role::Pawn);
        pawn.move_count = 5;
        board.add_piece(pos("b7"), pawn).unwrap();
        let mut game = Game::new(board);

        let m = game
            .moves_from(pos("b7"))
            .into_iter()
            .find(|m| m.to() == pos("b8") && m.promotion() == Some(Role::Knook))
            .expect("promotion");
        game.play(&m).unwrap();

        let knook = game.board().get(pos("b8")).expect("promoted");
        assert_eq!(knook.role, Role::Knook);
        assert_eq!(knook.side, Side::White);
        assert_eq!(knook.move_count, 6);
        assert_eq!(game.last_move().map(|l| l.role), Some(Role::Pawn));
    }

    #[test]
    fn test_events_in_order() {
        let mut board = Board::new(8, 8);
        board.add_piece(pos("e1"), Side::White.piece(Role::King)).unwrap();
        board.add_piece(pos("h1"), Side::White.piece(Role::Rook)).unwrap();
        board.add_piece(pos("g7"), Side::White.piece(Role::Pawn)).unwrap();
        board.add_piece(pos("h8"), Side::Black.piece(Role::Knight)).unwrap();
        let mut game = Game::new(board);

        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        game.subscribe(move |event: Event| sink.borrow_mut().push(event));
        game.create();
        game.add_piece(pos("a2"), Side::White.piece(Role::Pawn)).unwrap();
        assert!(game.add_piece(pos("a2"), Side::Black.piece(Role::Pawn)).is_err());

        let castle = game
            .moves_from(pos("e1"))
            .into_iter()
            .find(|m| m.follow_up().is_some())
            .expect("castling");
        game.play(&castle).unwrap();

        let promote = Move::new(pos("g7"), pos("h8"))
            .must_capture()
            .capture()
            .promote_to(Role::Queen);
        game.play(&promote).unwrap();

        let knight = Side::Black.piece(Role::Knight);
        let mut queen = Side::White.piece(Role::Queen);
        queen.move_count = 1;
        assert_eq!(
            *log.borrow(),
            [
                Event::GameCreated,
                Event::PieceAdded { pos: pos("a2"), piece: Side::White.piece(Role::Pawn) },
                Event::PieceMoved { step: Step::new(pos("e1"), pos("g1")) },
                Event::PieceMoved { step: Step::new(pos("h1"), pos("f1")) },
                Event::PieceRemoved { pos: pos("h8"), piece: knight },
                Event::PiecePromoted {
                    step: Step::new(pos("g7"), pos("h8")).with_promotion(Role::Queen),
                    piece: queen,
                },
            ]
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let mut game: Game = Game::default();
        game.play(&find(&game, "g1", "f3")).unwrap();

        let mut clone = game.clone();
        assert_eq!(clone.board(), game.board());
        assert_eq!(clone.scores(), game.scores());
        assert!(Arc::ptr_eq(&clone.history()[0], &game.history()[0]));

        clone.play(&find(&clone, "e7", "e5")).unwrap();
        clone.remove_piece(pos("a1"));
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.board().get(pos("e7")).map(|p| p.role), Some(Role::Pawn));
        assert!(game.board().get(pos("a1")).is_some());
    }

    #[test]
    fn test_check_and_mate() {
        let mut board = Board::new(8, 8);
        board.add_piece(pos("a1"), Side::White.piece(Role::King)).unwrap();
        board.add_piece(pos("c2"), Side::Black.piece(Role::Queen)).unwrap();
        board.add_piece(pos("c3"), Side::Black.piece(Role::King)).unwrap();
        let game = Game::new(board.clone());
        assert!(!game.is_check(Side::White));
        assert!(game.is_stalemate(Side::White));
        assert!(!game.is_checkmate(Side::White));
        assert_eq!(game.outcome(), Some(Outcome::Draw));

        board.remove_piece(pos("c2"));
        board.add_piece(pos("b2"), Side::Black.piece(Role::Queen)).unwrap();
        let game = Game::new(board);
        assert!(game.is_check(Side::White));
        assert!(game.is_checkmate(Side::White));
        assert_eq!(game.outcome(), Some(Outcome::Decisive { winner: Side::Black }));
        assert!(!game.is_check(Side::Black));
    }

    #[test]
    fn test_no_king_is_never_attacked() {
        let mut board = Board::new(8, 8);
        board.add_piece(pos("a1"), Side::White.piece(Role::Rook)).unwrap();
        board.add_piece(pos("a8"), Side::Black.piece(Role::Queen)).unwrap();
        let game = Game::new(board);
        assert!(!game.is_attacked(Side::White));
    }
}
