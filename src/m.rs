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

use std::fmt::{self, Write as _};

use crate::{pos::Pos, role::Role};

/// Squares whose occupants are removed by a move.
pub type Captures = Vec<Pos>;

/// A container for candidate moves.
///
/// Boards have no fixed size, so unlike the capture set this is not bounded.
pub type MoveList = Vec<Move>;

/// One atomic relocation of a single piece, optionally promoting it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub from: Pos,
    pub to: Pos,
    pub promotion: Option<Role>,
}

impl Step {
    #[inline]
    pub const fn new(from: Pos, to: Pos) -> Step {
        Step {
            from,
            to,
            promotion: None,
        }
    }

    #[must_use]
    #[inline]
    pub const fn with_promotion(self, role: Role) -> Step {
        Step {
            promotion: Some(role),
            ..self
        }
    }

    /// Relative movement of the step.
    #[inline]
    pub fn offset(&self) -> Pos {
        self.to - self.from
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "={}", role.upper_char())?;
        }
        Ok(())
    }
}

/// A step that is executed after the previous step of a [`Move`].
///
/// Follow-ups cannot declare captures: only the first step of a move may.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FollowUp {
    step: Step,
    next: Option<Box<FollowUp>>,
}

impl FollowUp {
    pub const fn step(&self) -> &Step {
        &self.step
    }

    pub fn next(&self) -> Option<&FollowUp> {
        self.next.as_deref()
    }

    fn append(&mut self, step: Step) {
        match self.next {
            Some(ref mut next) => next.append(step),
            None => {
                self.next = Some(Box::new(FollowUp { step, next: None }));
            }
        }
    }
}

/// A candidate move: a first [`Step`] that may capture, followed by a chain
/// of zero or more follow-up steps.
///
/// Castling is a king step with a rook follow-up. En passant is a single
/// step whose capture set holds a square other than its destination.
///
/// # Examples
///
/// ```
/// use knook::{Move, Pos};
///
/// let e5: Pos = "e5".parse()?;
/// let d5: Pos = "d5".parse()?;
/// let en_passant = Move::relative(e5, Pos::new(-1, 1)).must_capture().capture_at(d5);
///
/// assert_eq!(en_passant.to(), "d6".parse::<Pos>()?);
/// assert_eq!(en_passant.captures(), &[d5]);
/// assert_eq!(en_passant.to_string(), "e5-d6xd5");
/// # Ok::<_, knook::ParsePosError>(())
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    step: Step,
    captures: Captures,
    must_capture: bool,
    follow_up: Option<Box<FollowUp>>,
}

impl Move {
    /// A move from one position to another that captures nothing.
    pub fn new(from: Pos, to: Pos) -> Move {
        Move {
            step: Step::new(from, to),
            captures: Captures::new(),
            must_capture: false,
            follow_up: None,
        }
    }

    /// A move by an offset relative to its origin.
    pub fn relative(from: Pos, offset: Pos) -> Move {
        Move::new(from, from + offset)
    }

    /// Declares the destination as a capture square.
    #[must_use]
    pub fn capture(self) -> Move {
        let to = self.step.to;
        self.capture_at(to)
    }

    /// Declares a capture square. Declaring a square twice has no effect.
    #[must_use]
    pub fn capture_at(mut self, pos: Pos) -> Move {
        if !self.captures.contains(&pos) {
            self.captures.push(pos);
        }
        self
    }

    /// Marks the move as legal only if every capture square holds an
    /// opposing piece.
    #[must_use]
    pub fn must_capture(mut self) -> Move {
        self.must_capture = true;
        self
    }

    /// Promotes the piece relocated by the first step.
    #[must_use]
    pub fn promote_to(mut self, role: Role) -> Move {
        self.step.promotion = Some(role);
        self
    }

    /// Appends a follow-up step to the end of the chain.
    #[must_use]
    pub fn then(self, from: Pos, to: Pos) -> Move {
        self.then_step(Step::new(from, to))
    }

    /// Appends a follow-up step, which may carry its own promotion, to the
    /// end of the chain.
    #[must_use]
    pub fn then_step(mut self, step: Step) -> Move {
        match self.follow_up {
            Some(ref mut follow_up) => follow_up.append(step),
            None => self.follow_up = Some(Box::new(FollowUp { step, next: None })),
        }
        self
    }

    /// The first step.
    pub const fn step(&self) -> &Step {
        &self.step
    }

    /// Origin of the first step.
    pub const fn from(&self) -> Pos {
        self.step.from
    }

    /// Destination of the first step.
    pub const fn to(&self) -> Pos {
        self.step.to
    }

    /// Promotion of the first step.
    pub const fn promotion(&self) -> Option<Role> {
        self.step.promotion
    }

    pub fn captures(&self) -> &[Pos] {
        &self.captures
    }

    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    pub const fn is_must_capture(&self) -> bool {
        self.must_capture
    }

    pub fn follow_up(&self) -> Option<&FollowUp> {
        self.follow_up.as_deref()
    }

    /// Checks if any step of the move promotes.
    pub fn is_promotion(&self) -> bool {
        self.steps().any(|step| step.promotion.is_some())
    }

    /// Breaks the move down into the steps that are executed in order.
    pub fn steps(&self) -> Steps<'_> {
        Steps {
            first: Some(&self.step),
            next: self.follow_up(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write!(f, "{step}")?;
        }
        for capture in self.captures.iter().filter(|&&pos| pos != self.step.to) {
            write!(f, "x{capture}")?;
        }
        Ok(())
    }
}

/// Iterator over the steps of a [`Move`].
#[derive(Clone, Debug)]
pub struct Steps<'a> {
    first: Option<&'a Step>,
    next: Option<&'a FollowUp>,
}

impl<'a> Iterator for Steps<'a> {
    type Item = &'a Step;

    fn next(&mut self) -> Option<&'a Step> {
        if let Some(step) = self.first.take() {
            return Some(step);
        }
        let follow_up = self.next?;
        self.next = follow_up.next();
        Some(&follow_up.step)
    }
}

impl std::iter::FusedIterator for Steps<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Pos {
        s.parse().expect("valid pos")
    }

    #[test]
    fn test_steps_in_order() {
        let castle = Move::new(pos("e1"), pos("g1"))
            .then(pos("h1"), pos("f1"))
            .then_step(Step::new(pos("a1"), pos("a2")).with_promotion(Role::Knook));

        let steps: Vec<Step> = castle.steps().copied().collect();
        assert_eq!(
            steps,
            [
                Step::new(pos("e1"), pos("g1")),
                Step::new(pos("h1"), pos("f1")),
                Step::new(pos("a1"), pos("a2")).with_promotion(Role::Knook),
            ]
        );
        assert!(castle.is_promotion());
        assert!(!castle.is_capture());
        assert_eq!(castle.to_string(), "e1-g1,h1-f1,a1-a2=Ñ");
    }

    #[test]
    fn test_captures() {
        let m = Move::relative(pos("b2"), Pos::new(1, 1)).capture().capture();
        assert_eq!(m.captures(), &[pos("c3")]);
        assert!(!m.is_must_capture());
        assert_eq!(m.to_string(), "b2-c3");

        let m = m.must_capture().capture_at(pos("c2"));
        assert_eq!(m.captures(), &[pos("c3"), pos("c2")]);
        assert!(m.is_must_capture());
        assert_eq!(m.to_string(), "b2-c3xc2");
    }

    #[test]
    fn test_promotion_display() {
        let m = Move::new(pos("e7"), pos("e8")).promote_to(Role::Queen);
        assert_eq!(m.promotion(), Some(Role::Queen));
        assert_eq!(m.to_string(), "e7-e8=Q");
    }

    #[test]
    fn test_many_captures() {
        use crate::{Board, Game, Side};

        let mut board = Board::new(12, 8);
        board.add_piece(pos("a1"), Side::White.piece(Role::Rook)).unwrap();
        let mut m = Move::new(pos("a1"), pos("a2"));
        for x in 0..12 {
            board.add_piece(Pos::new(x, 5), Side::Black.piece(Role::Pawn)).unwrap();
            m = m.capture_at(Pos::new(x, 5));
        }
        assert_eq!(m.captures().len(), 12);

        let mut game = Game::new(board);
        game.apply_move(&m).unwrap();
        assert_eq!(game.board().len(), 1);
        assert_eq!(game.score(Side::White), 12);
        assert_eq!(game.last_move().map(|last| last.captured.len()), Some(12));
    }

    #[test]
    fn test_step_offset() {
        assert_eq!(Step::new(pos("d7"), pos("d5")).offset(), Pos::new(0, -2));
    }
}
