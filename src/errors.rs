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

use std::{error::Error, fmt};

use crate::{m::Move, pos::Pos};

/// Error when mutating a [`Board`](crate::Board).
///
/// `TooManyOverlapping` and `UnresolvedOverlap` indicate a malformed
/// compound move. They never occur for moves produced by the built-in
/// generators, and the board is left in an unspecified state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BoardError {
    /// Tried to add a piece to a square that is already occupied.
    OccupiedSquare {
        #[allow(missing_docs)]
        pos: Pos,
    },
    /// The position is outside of the board.
    OutOfBounds {
        #[allow(missing_docs)]
        pos: Pos,
    },
    /// Tried to replace or move a piece from a square that is empty.
    EmptySquare {
        #[allow(missing_docs)]
        pos: Pos,
    },
    /// A third piece arrived on a square during a compound move.
    TooManyOverlapping {
        #[allow(missing_docs)]
        pos: Pos,
    },
    /// A displaced piece had no square of its own after the last step.
    UnresolvedOverlap {
        #[allow(missing_docs)]
        pos: Pos,
    },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OccupiedSquare { pos } => write!(f, "square {pos} is already occupied"),
            BoardError::OutOfBounds { pos } => write!(f, "{pos} is not on the board"),
            BoardError::EmptySquare { pos } => write!(f, "square {pos} is empty"),
            BoardError::TooManyOverlapping { pos } => {
                write!(f, "more than two pieces overlap on {pos}")
            }
            BoardError::UnresolvedOverlap { pos } => {
                write!(f, "piece displaced from {pos} has no square at the end of the move")
            }
        }
    }
}

impl Error for BoardError {}

/// Error when a promotion target is not a piece type that pieces may
/// promote to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidPromotionTarget;

impl fmt::Display for InvalidPromotionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid promotion target")
    }
}

impl Error for InvalidPromotionTarget {}

/// Error when playing a move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlayError {
    /// The validator rejected the move. The game is unchanged.
    IllegalMove {
        #[allow(missing_docs)]
        m: Move,
    },
    /// The move was accepted but could not be applied to the board.
    Board {
        #[allow(missing_docs)]
        error: BoardError,
    },
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::IllegalMove { m } => write!(f, "illegal move {m}"),
            PlayError::Board { error } => write!(f, "failed to apply move: {error}"),
        }
    }
}

impl Error for PlayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlayError::Board { error } => Some(error),
            PlayError::IllegalMove { .. } => None,
        }
    }
}

impl From<BoardError> for PlayError {
    fn from(error: BoardError) -> PlayError {
        PlayError::Board { error }
    }
}
