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

use std::{error::Error, fmt, ops, str::FromStr};

use crate::{piece::Piece, role::Role};

/// `White` or `Black`.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn from_char(ch: char) -> Option<Side> {
        match ch {
            'w' => Some(Side::White),
            'b' => Some(Side::Black),
            _ => None,
        }
    }

    #[inline]
    pub const fn from_white(white: bool) -> Side {
        if white {
            Side::White
        } else {
            Side::Black
        }
    }

    #[inline]
    pub fn fold<T>(self, white: T, black: T) -> T {
        match self {
            Side::White => white,
            Side::Black => black,
        }
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Side::White)
    }

    #[inline]
    pub const fn is_black(self) -> bool {
        matches!(self, Side::Black)
    }

    /// Row direction in which pawns of this side advance: `1` for White,
    /// `-1` for Black.
    #[inline]
    pub const fn forward(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    pub fn char(self) -> char {
        self.fold('w', 'b')
    }

    /// Creates a fresh, unmoved piece of this side.
    #[inline]
    pub const fn piece(self, role: Role) -> Piece {
        Piece::new(self, role)
    }

    /// `White` and `Black`, in this order.
    pub const ALL: [Side; 2] = [Side::White, Side::Black];
}

impl ops::Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.fold(Side::Black, Side::White)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fold("white", "black"))
    }
}

/// Error when parsing an invalid side name.
#[derive(Clone, Debug)]
pub struct ParseSideError;

impl fmt::Display for ParseSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid side")
    }
}

impl Error for ParseSideError {}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Side, ParseSideError> {
        Ok(match s {
            "white" | "w" => Side::White,
            "black" | "b" => Side::Black,
            _ => return Err(ParseSideError),
        })
    }
}

/// Container with values for each [`Side`].
#[derive(Clone, Copy, Default, Eq, PartialEq, Debug, Hash)]
pub struct BySide<T> {
    pub white: T,
    pub black: T,
}

impl<T> BySide<T> {
    #[inline]
    pub fn new_with<F>(mut init: F) -> BySide<T>
    where
        F: FnMut(Side) -> T,
    {
        BySide {
            white: init(Side::White),
            black: init(Side::Black),
        }
    }

    #[inline]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }

    #[inline]
    pub fn map<U, F>(self, mut f: F) -> BySide<U>
    where
        F: FnMut(T) -> U,
    {
        BySide {
            white: f(self.white),
            black: f(self.black),
        }
    }

    #[inline]
    pub fn find<F>(&self, mut predicate: F) -> Option<Side>
    where
        F: FnMut(&T) -> bool,
    {
        if predicate(&self.white) {
            Some(Side::White)
        } else if predicate(&self.black) {
            Some(Side::Black)
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::White, &self.white), (Side::Black, &self.black)].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not() {
        assert_eq!(!Side::White, Side::Black);
        assert_eq!(!Side::Black, Side::White);
    }

    #[test]
    fn test_parse() {
        for side in Side::ALL {
            assert_eq!(side.to_string().parse::<Side>().ok(), Some(side));
            assert_eq!(Side::from_char(side.char()), Some(side));
        }
        assert!("red".parse::<Side>().is_err());
    }

    #[test]
    fn test_by_side() {
        let mut scores = BySide::<u32>::default();
        *scores.get_mut(Side::Black) += 3;
        assert_eq!(*scores.get(Side::White), 0);
        assert_eq!(scores.black, 3);
        assert_eq!(scores.find(|s| *s > 0), Some(Side::Black));
        assert_eq!(scores.map(|s| s * 2).black, 6);
    }
}
