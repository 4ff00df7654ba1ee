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


//! Board templates: rows of piece symbols separated by `/`, top row first.
//!
//! Uppercase symbols are White pieces, lowercase symbols Black pieces. A run
//! of digits skips that many squares, and so does each `.`. The board is as
//! tall as the number of rows and as wide as the longest row.
//!
//! Templates do not encode move counts: every parsed piece is unmoved.
//!
//! # Examples
//!
//! ```
//! use knook::{
//!     template::{board_template, parse_board, Registry},
//!     Board, Pos, Role, Side,
//! };
//!
//! let registry = Registry::default();
//! let board = parse_board("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", &registry)?;
//! assert_eq!(board, Board::standard());
//!
//! let board = parse_board("Ñ2/3/..k", &registry)?;
//! assert_eq!((board.width(), board.height()), (3, 3));
//! assert_eq!(board.get(Pos::new(0, 2)), Some(Side::White.piece(Role::Knook)));
//! assert_eq!(board_template(&board, &registry)?, "Ñ2/3/2k");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt};

use tracing::debug;

use crate::{
    board::Board,
    errors::InvalidPromotionTarget,
    piece::Piece,
    pos::Pos,
    role::{ByRole, Role},
    side::Side,
};

/// Largest number of squares a parsed board may have.
pub const MAX_SQUARES: u64 = 1 << 16;

/// Error when registering a symbol that cannot be used in templates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegistryError {
    /// Symbols must be letters with distinct single-character upper and
    /// lower case forms.
    InvalidSymbol {
        #[allow(missing_docs)]
        symbol: char,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::InvalidSymbol { symbol } => {
                write!(f, "{symbol:?} cannot be used as a piece symbol")
            }
        }
    }
}

impl Error for RegistryError {}

/// Two-way mapping between piece types and symbols.
///
/// Lookups are case-insensitive. Symbols are stored in uppercase, which
/// stands for White.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Registry {
    symbols: ByRole<Option<char>>,
}

fn single_char(mut chars: impl Iterator<Item = char>) -> Option<char> {
    let ch = chars.next()?;
    chars.next().is_none().then_some(ch)
}

fn to_upper(ch: char) -> Option<char> {
    single_char(ch.to_uppercase())
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Registry {
        Registry {
            symbols: ByRole::default(),
        }
    }

    /// `K`, `P`, `N`, `B`, `R`, and `Q`.
    pub fn standard() -> Registry {
        Registry {
            symbols: ByRole {
                pawn: Some('P'),
                knight: Some('N'),
                bishop: Some('B'),
                rook: Some('R'),
                queen: Some('Q'),
                king: Some('K'),
                knook: None,
            },
        }
    }

    /// Maps `role` to `symbol`, replacing previous mappings of either.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidSymbol`] for symbols that are not
    /// letters, or that have no distinct single-character upper and lower
    /// case forms.
    pub fn register(&mut self, role: Role, symbol: char) -> Result<(), RegistryError> {
        let upper = to_upper(symbol)
            .filter(|upper| single_char(upper.to_lowercase()).is_some_and(|lower| lower != *upper))
            .filter(|upper| upper.is_alphabetic())
            .ok_or(RegistryError::InvalidSymbol { symbol })?;

        if let Some(previous) = self.role(upper) {
            *self.symbols.get_mut(previous) = None;
        }
        *self.symbols.get_mut(role) = Some(upper);
        Ok(())
    }

    /// Builder-style [`Registry::register()`].
    ///
    /// # Errors
    ///
    /// See [`Registry::register()`].
    pub fn with(mut self, role: Role, symbol: char) -> Result<Registry, RegistryError> {
        self.register(role, symbol)?;
        Ok(self)
    }

    /// Removes the mapping of `role`, returning its symbol.
    pub fn deregister(&mut self, role: Role) -> Option<char> {
        self.symbols.get_mut(role).take()
    }

    /// Gets the piece type of a symbol, in either case.
    pub fn role(&self, symbol: char) -> Option<Role> {
        let upper = to_upper(symbol)?;
        self.symbols.find(|&registered| registered == Some(upper))
    }

    /// Gets the unmoved piece a symbol stands for. The case of the symbol
    /// decides the side.
    pub fn piece(&self, symbol: char) -> Option<Piece> {
        let side = if symbol.is_uppercase() {
            Side::White
        } else if symbol.is_lowercase() {
            Side::Black
        } else {
            return None;
        };
        self.role(symbol).map(|role| side.piece(role))
    }

    /// Gets the symbol of a piece, uppercase for White and lowercase for
    /// Black.
    pub fn symbol(&self, piece: Piece) -> Option<char> {
        let upper = (*self.symbols.get(piece.role))?;
        match piece.side {
            Side::White => Some(upper),
            Side::Black => single_char(upper.to_lowercase()),
        }
    }

    /// Gets the piece type a promotion symbol stands for.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPromotionTarget`] if the symbol is not registered,
    /// or if pieces cannot be promoted to its type.
    pub fn promotion(&self, symbol: char) -> Result<Role, InvalidPromotionTarget> {
        self.role(symbol)
            .filter(|role| role.is_promotion_target())
            .ok_or(InvalidPromotionTarget)
    }
}

impl Default for Registry {
    /// The standard symbols and `Ñ` for the Knook.
    fn default() -> Registry {
        let mut registry = Registry::standard();
        registry.symbols.knook = Some('Ñ');
        registry
    }
}

/// Error when parsing a board template.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseTemplateError {
    /// The symbol is not in the registry.
    UnknownSymbol {
        #[allow(missing_docs)]
        symbol: char,
    },
    /// The template describes a board without squares.
    Empty,
    /// A run of digits is too large.
    InvalidGap,
    /// The board would have more than [`MAX_SQUARES`] squares.
    TooLarge,
}

impl fmt::Display for ParseTemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTemplateError::UnknownSymbol { symbol } => write!(f, "unknown piece symbol {symbol:?}"),
            ParseTemplateError::Empty => f.write_str("template has no squares"),
            ParseTemplateError::InvalidGap => f.write_str("invalid gap in template"),
            ParseTemplateError::TooLarge => f.write_str("template board is too large"),
        }
    }
}

impl Error for ParseTemplateError {}

/// Error when writing a template for a piece type that has no symbol.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnregisteredRole {
    pub role: Role,
}

impl fmt::Display for UnregisteredRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no symbol registered for {:?}", self.role)
    }
}

impl Error for UnregisteredRole {}

/// Parses a template into a board.
///
/// # Errors
///
/// See [`ParseTemplateError`].
pub fn parse_board(template: &str, registry: &Registry) -> Result<Board, ParseTemplateError> {
    let mut rows: Vec<Vec<(u32, Piece)>> = Vec::new();
    let mut width: u32 = 0;

    for row in template.split('/') {
        let mut pieces = Vec::new();
        let mut x: u32 = 0;
        let mut chars = row.char_indices().peekable();

        while let Some((start, ch)) = chars.next() {
            if ch.is_ascii_digit() {
                let mut end = start + 1;
                while let Some(&(i, next)) = chars.peek() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    end = i + 1;
                    chars.next();
                }
                let gap: u32 = btoi::btou(&row.as_bytes()[start..end])
                    .map_err(|_| ParseTemplateError::InvalidGap)?;
                x = x.checked_add(gap).ok_or(ParseTemplateError::InvalidGap)?;
            } else if ch == '.' {
                x = x.checked_add(1).ok_or(ParseTemplateError::InvalidGap)?;
            } else {
                let piece = registry
                    .piece(ch)
                    .ok_or(ParseTemplateError::UnknownSymbol { symbol: ch })?;
                pieces.push((x, piece));
                x = x.checked_add(1).ok_or(ParseTemplateError::InvalidGap)?;
            }

            if u64::from(x) > MAX_SQUARES {
                return Err(ParseTemplateError::TooLarge);
            }
        }

        width = width.max(x);
        rows.push(pieces);
    }

    let height = u32::try_from(rows.len()).map_err(|_| ParseTemplateError::TooLarge)?;
    if width == 0 {
        return Err(ParseTemplateError::Empty);
    }
    if u64::from(width) * u64::from(height) > MAX_SQUARES {
        return Err(ParseTemplateError::TooLarge);
    }

    let mut board = Board::new(width, height);
    for (y, pieces) in (0..height as i32).rev().zip(rows) {
        for (x, piece) in pieces {
            let added = board.add_piece(Pos::new(x as i32, y), piece);
            debug_assert!(added.is_ok(), "columns within a row are distinct and on the board");
        }
    }

    debug!(width, height, pieces = board.len(), "parsed board template");
    Ok(board)
}

/// Writes the template of a board, top row first, with digit runs for empty
/// squares.
///
/// # Errors
///
/// Returns [`UnregisteredRole`] if a piece on the board has no symbol.
pub fn board_template(board: &Board, registry: &Registry) -> Result<String, UnregisteredRole> {
    let mut template = String::new();
    for y in (0..board.height() as i32).rev() {
        if y + 1 < board.height() as i32 {
            template.push('/');
        }
        let mut gap = 0;
        for x in 0..board.width() as i32 {
            match board.get(Pos::new(x, y)) {
                None => gap += 1,
                Some(piece) => {
                    if gap > 0 {
                        template.push_str(&gap.to_string());
                        gap = 0;
                    }
                    let symbol = registry
                        .symbol(piece)
                        .ok_or(UnregisteredRole { role: piece.role })?;
                    template.push(symbol);
                }
            }
        }
        if gap > 0 {
            template.push_str(&gap.to_string());
        }
    }
    Ok(template)
}
