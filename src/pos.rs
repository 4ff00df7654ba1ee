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

/// A coordinate on a board, also usable as a 2D integer vector.
///
/// `x` counts columns from the left, `y` counts rows from the bottom, so
/// `a1` is `Pos::new(0, 0)` and `d3` is `Pos::new(3, 2)`. Positions are not
/// tied to a board size: whether a position exists on a board is the
/// concern of [`Board::contains`](crate::Board::contains).
///
/// # Examples
///
/// ```
/// use knook::Pos;
///
/// let e2: Pos = "E2".parse()?;
/// assert_eq!(e2, Pos::new(4, 1));
/// assert_eq!(e2 + Pos::new(0, 2), "e4".parse::<Pos>()?);
/// assert_eq!(e2.to_string(), "e2");
/// # Ok::<_, knook::ParsePosError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Pos {
        Pos { x, y }
    }

    /// Parses a position in chess notation: a column letter followed by a
    /// one-based row number.
    pub fn from_ascii(s: &[u8]) -> Result<Pos, ParsePosError> {
        let (&letter, row) = s.split_first().ok_or(ParsePosError)?;
        if !letter.is_ascii_alphabetic() || row.is_empty() || row[0] == b'0' {
            return Err(ParsePosError);
        }
        let row = btoi::btou::<u32>(row).map_err(|_| ParsePosError)?;
        let y = i32::try_from(row).map_err(|_| ParsePosError)? - 1;
        Ok(Pos::new(i32::from(letter.to_ascii_uppercase() - b'A'), y))
    }

    #[must_use]
    #[inline]
    pub const fn abs(self) -> Pos {
        Pos::new(self.x.abs(), self.y.abs())
    }

    /// Reduces each component to `-1`, `0` or `1`.
    #[must_use]
    #[inline]
    pub const fn signum(self) -> Pos {
        Pos::new(self.x.signum(), self.y.signum())
    }

    #[must_use]
    #[inline]
    pub const fn add_x(self, x: i32) -> Pos {
        Pos::new(self.x + x, self.y)
    }

    #[must_use]
    #[inline]
    pub const fn add_y(self, y: i32) -> Pos {
        Pos::new(self.x, self.y + y)
    }

    #[must_use]
    #[inline]
    pub const fn with_x(self, x: i32) -> Pos {
        Pos::new(x, self.y)
    }

    #[must_use]
    #[inline]
    pub const fn with_y(self, y: i32) -> Pos {
        Pos::new(self.x, y)
    }

    /// Chebyshev distance, i.e. the number of king steps between two
    /// positions.
    pub fn distance(self, other: Pos) -> u32 {
        let d = (other - self).abs();
        d.x.max(d.y).unsigned_abs()
    }
}

impl ops::Add for Pos {
    type Output = Pos;

    #[inline]
    fn add(self, other: Pos) -> Pos {
        Pos::new(self.x + other.x, self.y + other.y)
    }
}

impl ops::AddAssign for Pos {
    #[inline]
    fn add_assign(&mut self, other: Pos) {
        *self = *self + other;
    }
}

impl ops::Sub for Pos {
    type Output = Pos;

    #[inline]
    fn sub(self, other: Pos) -> Pos {
        Pos::new(self.x - other.x, self.y - other.y)
    }
}

impl ops::Neg for Pos {
    type Output = Pos;

    #[inline]
    fn neg(self) -> Pos {
        Pos::new(-self.x, -self.y)
    }
}

impl ops::Mul<i32> for Pos {
    type Output = Pos;

    #[inline]
    fn mul(self, factor: i32) -> Pos {
        Pos::new(self.x * factor, self.y * factor)
    }
}

impl From<(i32, i32)> for Pos {
    #[inline]
    fn from((x, y): (i32, i32)) -> Pos {
        Pos::new(x, y)
    }
}

impl fmt::Display for Pos {
    /// Uses chess notation where it exists. Other positions, like
    /// `Pos::new(-1, 4)`, are written as a tuple.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match u8::try_from(self.x) {
            Ok(x) if x < 26 && self.y >= 0 => {
                write!(f, "{}{}", char::from(b'a' + x), i64::from(self.y) + 1)
            }
            _ => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

/// Error when parsing an invalid position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsePosError;

impl fmt::Display for ParsePosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid position")
    }
}

impl Error for ParsePosError {}

impl FromStr for Pos {
    type Err = ParsePosError;

    fn from_str(s: &str) -> Result<Pos, ParsePosError> {
        Pos::from_ascii(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("a1".parse(), Ok(Pos::new(0, 0)));
        assert_eq!("D3".parse(), Ok(Pos::new(3, 2)));
        assert_eq!("h8".parse(), Ok(Pos::new(7, 7)));
        assert_eq!("b12".parse(), Ok(Pos::new(1, 11)));
        assert_eq!("".parse::<Pos>(), Err(ParsePosError));
        assert_eq!("e".parse::<Pos>(), Err(ParsePosError));
        assert_eq!("e0".parse::<Pos>(), Err(ParsePosError));
        assert_eq!("5e".parse::<Pos>(), Err(ParsePosError));
        assert_eq!("e2x".parse::<Pos>(), Err(ParsePosError));
    }

    #[test]
    fn test_display() {
        for s in ["a1", "e2", "h8", "z26", "c10"] {
            assert_eq!(s.parse::<Pos>().unwrap().to_string(), s);
        }
        assert_eq!(Pos::new(-1, 4).to_string(), "(-1, 4)");
        assert_eq!(Pos::new(2, -3).to_string(), "(2, -3)");
        assert_eq!(Pos::new(0, i32::MAX).to_string(), "a2147483648");
        assert_eq!(Pos::new(i32::MAX, i32::MIN).to_string(), "(2147483647, -2147483648)");
    }

    #[test]
    fn test_arithmetic() {
        let a = Pos::new(3, -2);
        let b = Pos::new(-1, 5);
        assert_eq!(a + b, Pos::new(2, 3));
        assert_eq!(a - b, Pos::new(4, -7));
        assert_eq!(-a, Pos::new(-3, 2));
        assert_eq!(a * 2, Pos::new(6, -4));
        assert_eq!(a.abs(), Pos::new(3, 2));
        assert_eq!(b.signum(), Pos::new(-1, 1));
        assert_eq!(a.add_x(1).add_y(1), Pos::new(4, -1));
        assert_eq!(a.with_x(0).with_y(0), Pos::default());
        assert_eq!(a.distance(b), 7);
        assert_eq!(Pos::new(0, -1) - Pos::new(0, i32::MIN), Pos::new(0, i32::MAX));
    }
}
