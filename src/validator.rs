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


//! Move legality.
//!
//! A [`StandardValidator`] runs a fixed pipeline of predicates, cheapest
//! first, and stops at the first one that rejects the move:
//!
//! 1. [`is_generated_move`]
//! 2. [`validate_bounds`]
//! 3. [`validate_overlap`]
//! 4. [`validate_forced_capture`]
//! 5. [`validate_no_self_check`]
//!
//! Rejection is an expected outcome, so validation returns `bool` rather
//! than an error.

use bitflags::bitflags;
use tracing::trace;

use crate::{game::Game, m::Move};

/// Decides whether a move may be played in a game.
///
/// Validators are cloned together with the game when a move is simulated.
pub trait Validator: Clone {
    fn validate(&self, game: &Game<Self>, m: &Move) -> bool;
}

bitflags! {
    /// Selects the predicates a [`StandardValidator`] runs.
    ///
    /// Predicates always run in the same order, regardless of the order in
    /// which flags were combined.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Checks: u8 {
        const GENERATED = 1 << 0;
        const BOUNDS = 1 << 1;
        const OVERLAP = 1 << 2;
        const FORCED_CAPTURE = 1 << 3;
        const NO_SELF_CHECK = 1 << 4;
    }
}

impl Default for Checks {
    fn default() -> Checks {
        Checks::all()
    }
}

/// The rules of chess, applied to whatever pieces are on the board.
///
/// # Examples
///
/// ```
/// use knook::{Checks, Game, Move, StandardValidator};
///
/// let game: Game = Game::default();
/// let jump = Move::new("e2".parse()?, "e5".parse()?);
/// assert!(!game.is_valid_move(&jump));
///
/// // Without the generator check, only occupancy and self-check are
/// // looked at.
/// let lax = StandardValidator::new(Checks::all() - Checks::GENERATED);
/// let game = Game::with_validator(game.board().clone(), lax);
/// assert!(game.is_valid_move(&jump));
/// # Ok::<_, knook::ParsePosError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct StandardValidator {
    checks: Checks,
}

impl StandardValidator {
    pub const fn new(checks: Checks) -> StandardValidator {
        StandardValidator { checks }
    }

    pub const fn checks(&self) -> Checks {
        self.checks
    }
}

type Predicate<V> = fn(&Game<V>, &Move) -> bool;

impl Validator for StandardValidator {
    fn validate(&self, game: &Game<StandardValidator>, m: &Move) -> bool {
        let pipeline: [(Checks, &str, Predicate<StandardValidator>); 5] = [
            (Checks::GENERATED, "generated", is_generated_move),
            (Checks::BOUNDS, "bounds", validate_bounds),
            (Checks::OVERLAP, "overlap", validate_overlap),
            (Checks::FORCED_CAPTURE, "forced capture", validate_forced_capture),
            (Checks::NO_SELF_CHECK, "no self check", validate_no_self_check),
        ];

        pipeline.into_iter().all(|(check, name, predicate)| {
            if !self.checks.contains(check) || predicate(game, m) {
                true
            } else {
                trace!(%m, check = name, "move rejected");
                false
            }
        })
    }
}

/// The move is one of the moves generated for the piece on its origin.
pub fn is_generated_move<V: Validator>(game: &Game<V>, m: &Move) -> bool {
    game.moves_from(m.from()).contains(m)
}

/// Every step ends on the board.
pub fn validate_bounds<V: Validator>(game: &Game<V>, m: &Move) -> bool {
    m.steps().all(|step| game.board().contains(step.to))
}

/// Every step starts on a piece, and ends either on an empty square or on
/// an opposing piece that the move captures.
pub fn validate_overlap<V: Validator>(game: &Game<V>, m: &Move) -> bool {
    let board = game.board();
    m.steps().all(|step| {
        let Some(moving) = board.get(step.from) else {
            return false;
        };
        match board.get(step.to) {
            None => true,
            Some(target) => target.side != moving.side && m.captures().contains(&step.to),
        }
    })
}

/// A move that must capture has an opposing piece on every capture square.
pub fn validate_forced_capture<V: Validator>(game: &Game<V>, m: &Move) -> bool {
    if !m.is_must_capture() {
        return true;
    }
    let board = game.board();
    let Some(moving) = board.get(m.from()) else {
        return false;
    };
    m.captures()
        .iter()
        .all(|&pos| board.get(pos).is_some_and(|target| target.side != moving.side))
}

/// The mover's king is not attacked after the move. The move is played on a
/// clone of the game.
pub fn validate_no_self_check<V: Validator>(game: &Game<V>, m: &Move) -> bool {
    let Some(moving) = game.board().get(m.from()) else {
        return false;
    };
    let mut simulation = game.clone();
    simulation.apply_move(m).is_ok() && !simulation.is_attacked(moving.side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Pos, Role, Side};

    fn pos(s: &str) -> Pos {
        s.parse().expect("valid pos")
    }

    fn game_with(pieces: &[(&str, Side, Role)]) -> Game {
        let mut board = Board::new(8, 8);
        for &(at, side, role) in pieces {
            board.add_piece(pos(at), side.piece(role)).unwrap();
        }
        Game::new(board)
    }

    #[test]
    fn test_generated() {
        let game: Game = Game::default();
        assert!(is_generated_move(&game, &Move::new(pos("g1"), pos("f3")).capture()));
        assert!(!is_generated_move(&game, &Move::new(pos("g1"), pos("f3"))));
        assert!(!is_generated_move(&game, &Move::new(pos("e4"), pos("e5"))));
    }

    #[test]
    fn test_bounds() {
        let game = game_with(&[("a1", Side::White, Role::Rook)]);
        assert!(validate_bounds(&game, &Move::new(pos("a1"), pos("a8"))));
        assert!(!validate_bounds(&game, &Move::new(pos("a1"), Pos::new(0, 8))));
        assert!(!validate_bounds(&game, &Move::new(pos("a1"), pos("a2")).then(pos("a2"), Pos::new(-1, 1))));
    }

    #[test]
    fn test_overlap() {
        let game = game_with(&[
            ("a1", Side::White, Role::Rook),
            ("a2", Side::White, Role::Pawn),
            ("b1", Side::Black, Role::Knight),
        ]);
        assert!(!validate_overlap(&game, &Move::new(pos("a1"), pos("a2")).capture()));
        assert!(!validate_overlap(&game, &Move::new(pos("a1"), pos("b1"))));
        assert!(validate_overlap(&game, &Move::new(pos("a1"), pos("b1")).capture()));
        assert!(!validate_overlap(&game, &Move::new(pos("c1"), pos("c2"))));
    }

    #[test]
    fn test_forced_capture() {
        let game = game_with(&[
            ("e4", Side::White, Role::Pawn),
            ("d5", Side::Black, Role::Pawn),
            ("e5", Side::White, Role::Knight),
        ]);
        let take = Move::new(pos("e4"), pos("d5")).must_capture().capture();
        let miss = Move::new(pos("e4"), pos("f5")).must_capture().capture();
        let own = Move::new(pos("e4"), pos("d5")).must_capture().capture().capture_at(pos("e5"));
        assert!(validate_forced_capture(&game, &take));
        assert!(!validate_forced_capture(&game, &miss));
        assert!(!validate_forced_capture(&game, &own), "every capture square must hold an opponent");
        assert!(validate_forced_capture(&game, &Move::new(pos("e4"), pos("f5")).capture()));
    }

    #[test]
    fn test_no_self_check() {
        let game = game_with(&[
            ("e1", Side::White, Role::King),
            ("e2", Side::White, Role::Bishop),
            ("e8", Side::Black, Role::Rook),
        ]);
        assert!(!validate_no_self_check(&game, &Move::new(pos("e2"), pos("d3")).capture()));
        assert!(validate_no_self_check(&game, &Move::new(pos("e1"), pos("f1")).capture()));
        assert_eq!(game.board().get(pos("e2")).map(|p| p.role), Some(Role::Bishop));
    }

    #[test]
    fn test_pipeline_flags() {
        let game = game_with(&[("e1", Side::White, Role::King), ("e8", Side::Black, Role::Rook)]);
        let stay = Move::new(pos("e1"), pos("e2")).capture();
        assert!(!game.is_valid_move(&stay));

        let lax = Game::with_validator(game.board().clone(), StandardValidator::new(Checks::GENERATED));
        assert!(lax.is_valid_move(&stay));
        assert_eq!(StandardValidator::default().checks(), Checks::all());
    }
}
