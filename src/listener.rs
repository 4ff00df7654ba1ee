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


use crate::{m::Step, piece::Piece, pos::Pos};

/// A change made to a [`Game`](crate::Game), in the order it happened.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Event {
    GameCreated,
    PieceAdded { pos: Pos, piece: Piece },
    PieceRemoved { pos: Pos, piece: Piece },
    /// A piece was relocated. It is on `step.to` now.
    PieceMoved { step: Step },
    /// A piece was relocated and replaced by `piece`.
    PiecePromoted { step: Step, piece: Piece },
}

impl Event {
    /// Calls the matching method of the listener.
    pub fn dispatch(&self, listener: &mut dyn Listener) {
        match *self {
            Event::GameCreated => listener.on_game_created(),
            Event::PieceAdded { pos, piece } => listener.on_piece_added(pos, piece),
            Event::PieceRemoved { pos, piece } => listener.on_piece_removed(pos, piece),
            Event::PieceMoved { ref step } => listener.on_piece_moved(step),
            Event::PiecePromoted { ref step, piece } => listener.on_piece_promoted(step, piece),
        }
    }
}

/// Receives notifications from a [`Game`](crate::Game), synchronously and
/// in the order the effects occur.
///
/// All methods do nothing by default. Closures taking an [`Event`] are
/// listeners, too.
///
/// # Examples
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use knook::{Event, Game, Pos, Role};
///
/// let log = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&log);
///
/// let mut game: Game = Game::default();
/// game.subscribe(move |event: Event| sink.borrow_mut().push(event));
/// game.remove_piece(Pos::new(0, 0));
///
/// assert!(matches!(
///     log.borrow()[..],
///     [Event::PieceRemoved { piece, .. }] if piece.role == Role::Rook
/// ));
/// ```
pub trait Listener {
    fn on_game_created(&mut self) {}

    fn on_piece_added(&mut self, _pos: Pos, _piece: Piece) {}

    fn on_piece_removed(&mut self, _pos: Pos, _piece: Piece) {}

    fn on_piece_moved(&mut self, _step: &Step) {}

    fn on_piece_promoted(&mut self, _step: &Step, _piece: Piece) {}
}

impl<F> Listener for F
where
    F: FnMut(Event),
{
    fn on_game_created(&mut self) {
        self(Event::GameCreated)
    }

    fn on_piece_added(&mut self, pos: Pos, piece: Piece) {
        self(Event::PieceAdded { pos, piece })
    }

    fn on_piece_removed(&mut self, pos: Pos, piece: Piece) {
        self(Event::PieceRemoved { pos, piece })
    }

    fn on_piece_moved(&mut self, step: &Step) {
        self(Event::PieceMoved { step: *step })
    }

    fn on_piece_promoted(&mut self, step: &Step, piece: Piece) {
        self(Event::PiecePromoted { step: *step, piece })
    }
}
