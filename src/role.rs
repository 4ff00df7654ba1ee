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

use std::{array, num};

use bitflags::bitflags;

use crate::{piece::Piece, side::Side, util::overflow_error};

bitflags! {
    /// Cross-cutting abilities of a piece type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Capabilities: u8 {
        /// Turns into another piece type when reaching the last row.
        const PROMOTABLE = 1;
        /// May take part in castling as the partner of an unmoved king.
        const CASTLING_PARTNER = 2;
    }
}

/// Piece types: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`, and the
/// compound `Knook`, which moves like a rook or a knight.
///
/// # Examples
///
/// ```
/// use knook::Role;
///
/// // Piece types are indexed from 1 to 7.
/// assert_eq!(u32::from(Role::Pawn), 1);
/// assert_eq!(u32::from(Role::Knook), 7);
///
/// assert_eq!(Role::Queen.cost(), 9);
/// assert!(Role::Pawn.is_promotable());
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
    Knook = 7,
}

impl Role {
    /// Gets the default letter for the piece type. Symbols used in board
    /// templates come from a [`Registry`](crate::template::Registry)
    /// instead.
    pub const fn char(self) -> char {
        match self {
            Role::Pawn => 'p',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Rook => 'r',
            Role::Queen => 'q',
            Role::King => 'k',
            Role::Knook => 'ñ',
        }
    }

    /// Gets the uppercase default letter for the piece type.
    pub const fn upper_char(self) -> char {
        match self {
            Role::Pawn => 'P',
            Role::Knight => 'N',
            Role::Bishop => 'B',
            Role::Rook => 'R',
            Role::Queen => 'Q',
            Role::King => 'K',
            Role::Knook => 'Ñ',
        }
    }

    /// Gets a fresh [`Piece`] of the given side.
    #[inline]
    pub const fn of(self, side: Side) -> Piece {
        Piece::new(side, self)
    }

    /// The amount added to the capturing side's score when a piece of this
    /// type is captured. Kings are priceless.
    pub const fn cost(self) -> u32 {
        match self {
            Role::Pawn => 1,
            Role::Knight | Role::Bishop => 3,
            Role::Rook => 5,
            Role::Knook => 7,
            Role::Queen => 9,
            Role::King => u32::MAX,
        }
    }

    pub const fn capabilities(self) -> Capabilities {
        match self {
            Role::Pawn => Capabilities::PROMOTABLE,
            Role::Rook => Capabilities::CASTLING_PARTNER,
            _ => Capabilities::empty(),
        }
    }

    #[inline]
    pub const fn is_promotable(self) -> bool {
        self.capabilities().contains(Capabilities::PROMOTABLE)
    }

    #[inline]
    pub const fn is_castling_partner(self) -> bool {
        self.capabilities().contains(Capabilities::CASTLING_PARTNER)
    }

    /// Checks if a promotable piece may turn into this piece type.
    pub const fn is_promotion_target(self) -> bool {
        !matches!(self, Role::Pawn | Role::King)
    }

    /// Promotion targets, in the order promotion moves are generated.
    pub const PROMOTIONS: [Role; 5] = [
        Role::Queen,
        Role::Rook,
        Role::Knight,
        Role::Bishop,
        Role::Knook,
    ];

    /// `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`, and `Knook`, in
    /// this order.
    pub const ALL: [Role; 7] = [
        Role::Pawn,
        Role::Knight,
        Role::Bishop,
        Role::Rook,
        Role::Queen,
        Role::King,
        Role::Knook,
    ];
}

macro_rules! int_from_role_impl {
    ($($t:ty)+) => {
        $(impl From<Role> for $t {
            #[inline]
            fn from(role: Role) -> $t {
                role as $t
            }
        })+
    }
}

int_from_role_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

macro_rules! try_role_from_int_impl {
    ($($t:ty)+) => {
        $(impl TryFrom<$t> for Role {
            type Error = num::TryFromIntError;

            #[inline]
            fn try_from(value: $t) -> Result<Role, Self::Error> {
                Ok(match value {
                    1 => Role::Pawn,
                    2 => Role::Knight,
                    3 => Role::Bishop,
                    4 => Role::Rook,
                    5 => Role::Queen,
                    6 => Role::King,
                    7 => Role::Knook,
                    _ => return Err(overflow_error()),
                })
            }
        })+
    }
}

try_role_from_int_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

/// Container with values for each [`Role`].
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct ByRole<T> {
    pub pawn: T,
    pub knight: T,
    pub bishop: T,
    pub rook: T,
    pub queen: T,
    pub king: T,
    pub knook: T,
}

impl<T> ByRole<T> {
    pub fn new_with<F>(mut init: F) -> ByRole<T>
    where
        F: FnMut(Role) -> T,
    {
        ByRole {
            pawn: init(Role::Pawn),
            knight: init(Role::Knight),
            bishop: init(Role::Bishop),
            rook: init(Role::Rook),
            queen: init(Role::Queen),
            king: init(Role::King),
            knook: init(Role::Knook),
        }
    }

    #[inline]
    pub fn get(&self, role: Role) -> &T {
        match role {
            Role::Pawn => &self.pawn,
            Role::Knight => &self.knight,
            Role::Bishop => &self.bishop,
            Role::Rook => &self.rook,
            Role::Queen => &self.queen,
            Role::King => &self.king,
            Role::Knook => &self.knook,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, role: Role) -> &mut T {
        match role {
            Role::Pawn => &mut self.pawn,
            Role::Knight => &mut self.knight,
            Role::Bishop => &mut self.bishop,
            Role::Rook => &mut self.rook,
            Role::Queen => &mut self.queen,
            Role::King => &mut self.king,
            Role::Knook => &mut self.knook,
        }
    }

    #[inline]
    pub fn find<F>(&self, mut predicate: F) -> Option<Role>
    where
        F: FnMut(&T) -> bool,
    {
        Role::ALL.into_iter().find(|&role| predicate(self.get(role)))
    }

    pub fn iter(&self) -> array::IntoIter<&T, 7> {
        [
            &self.pawn,
            &self.knight,
            &self.bishop,
            &self.rook,
            &self.queen,
            &self.king,
            &self.knook,
        ]
        .into_iter()
    }
}
