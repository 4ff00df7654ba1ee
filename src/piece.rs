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

use std::fmt;

use crate::{role::Role, side::Side};

/// A piece on the board: a [`Side`], a [`Role`], and the number of steps
/// in which it has been relocated.
///
/// The move count is the only memory a piece has. It decides whether a pawn
/// may advance two rows, whether a king or rook may castle, and whether a
/// pawn that just advanced two rows may be captured en passant.
///
/// # Examples
///
/// ```
/// use knook::{Piece, Role, Side};
///
/// let pawn = Piece::new(Side::White, Role::Pawn);
/// assert_eq!(pawn.move_count, 0);
/// assert_eq!(pawn.char(), 'P');
/// assert!(!pawn.has_moved());
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub side: Side,
    pub role: Role,
    pub move_count: u32,
}

impl Piece {
    /// Creates a piece that has not moved yet.
    #[inline]
    pub const fn new(side: Side, role: Role) -> Piece {
        Piece {
            side,
            role,
            move_count: 0,
        }
    }

    #[inline]
    pub const fn has_moved(self) -> bool {
        self.move_count > 0
    }

    /// Turns this piece into another piece type, keeping its side and move
    /// count.
    #[must_use]
    #[inline]
    pub const fn promoted(self, role: Role) -> Piece {
        Piece { role, ..self }
    }

    /// Gets the default letter of the piece: uppercase for White,
    /// lowercase for Black.
    pub fn char(self) -> char {
        self.side.fold(self.role.upper_char(), self.role.char())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.side, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promoted_keeps_history() {
        let mut pawn = Side::Black.piece(Role::Pawn);
        pawn.move_count = 6;
        let queen = pawn.promoted(Role::Queen);
        assert_eq!(queen.side, Side::Black);
        assert_eq!(queen.role, Role::Queen);
        assert_eq!(queen.move_count, 6);
        assert_eq!(queen.char(), 'q');
    }

    #[test]
    fn test_display() {
        assert_eq!(Role::Knook.of(Side::White).to_string(), "white Knook");
    }
}
