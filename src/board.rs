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

use tracing::warn;

use crate::{
    errors::BoardError,
    m::Step,
    piece::Piece,
    pos::Pos,
    role::Role,
    side::Side,
};

/// A rectangular grid holding zero or one [`Piece`] per square.
///
/// The dimensions are fixed at construction. Row `0` is White's back rank.
///
/// # Examples
///
/// ```
/// use knook::{Board, Pos, Role, Side};
///
/// let board = Board::standard();
/// assert_eq!(board.get(Pos::new(4, 0)), Some(Side::White.piece(Role::King)));
/// assert_eq!(board.get(Pos::new(4, 4)), None);
/// assert_eq!(board.get(Pos::new(8, 0)), None); // out of bounds
/// assert!(format!("{board:?}").starts_with("r n b q k b n r\n"));
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    width: u32,
    height: u32,
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(width: u32, height: u32) -> Board {
        Board {
            width,
            height,
            squares: vec![None; width as usize * height as usize],
        }
    }

    /// Creates the 8×8 opening position.
    pub fn standard() -> Board {
        const BACK_RANK: [Role; 8] = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];

        let mut board = Board::new(8, 8);
        for (x, role) in (0..).zip(BACK_RANK) {
            board.squares[x as usize] = Some(Side::White.piece(role));
            board.squares[8 + x as usize] = Some(Side::White.piece(Role::Pawn));
            board.squares[48 + x as usize] = Some(Side::Black.piece(Role::Pawn));
            board.squares[56 + x as usize] = Some(Side::Black.piece(role));
        }
        board
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Checks if the position is on the board.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        self.index(pos).is_some()
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        let x = u32::try_from(pos.x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(pos.y).ok().filter(|&y| y < self.height)?;
        Some(y as usize * self.width as usize + x as usize)
    }

    fn pos_at(&self, index: usize) -> Pos {
        let width = self.width as usize;
        Pos::new((index % width) as i32, (index / width) as i32)
    }

    /// Gets the piece on a square, or `None` if the square is empty or not
    /// on the board.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Piece> {
        self.index(pos).and_then(|i| self.squares[i])
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut Piece> {
        let i = self.index(pos)?;
        self.squares[i].as_mut()
    }

    /// Puts a piece on an empty square.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OccupiedSquare`] if there already is a piece,
    /// or [`BoardError::OutOfBounds`].
    pub fn add_piece(&mut self, pos: Pos, piece: Piece) -> Result<(), BoardError> {
        let i = self.index(pos).ok_or(BoardError::OutOfBounds { pos })?;
        match self.squares[i] {
            Some(_) => Err(BoardError::OccupiedSquare { pos }),
            None => {
                self.squares[i] = Some(piece);
                Ok(())
            }
        }
    }

    /// Takes the piece off a square.
    pub fn remove_piece(&mut self, pos: Pos) -> Option<Piece> {
        let i = self.index(pos)?;
        self.squares[i].take()
    }

    /// Swaps the piece on an occupied square for another one, returning the
    /// previous occupant.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptySquare`] if there is no piece to replace.
    pub fn replace_piece(&mut self, pos: Pos, piece: Piece) -> Result<Piece, BoardError> {
        self.get_mut(pos)
            .map(|square| std::mem::replace(square, piece))
            .ok_or(BoardError::EmptySquare { pos })
    }

    /// Relocates pieces step by step, calling `after_step` after each step
    /// with the board and the step that was just executed. The relocated
    /// piece is on `step.to` at that point.
    ///
    /// Within one call a square may transiently hold two pieces: a piece
    /// arriving on an occupied square displaces the occupant into an
    /// overlap table. A later step from that square moves the displaced
    /// piece, and displaced pieces return to their square as soon as it is
    /// empty again. This lets a castling king land on its rook.
    ///
    /// Captures are not handled here. Remove captured pieces first.
    ///
    /// # Errors
    ///
    /// * [`BoardError::EmptySquare`] if a step starts on an empty square.
    /// * [`BoardError::OutOfBounds`] if a step leaves the board.
    /// * [`BoardError::TooManyOverlapping`] if a piece arrives on a square
    ///   that already holds a displaced piece.
    /// * [`BoardError::UnresolvedOverlap`] if a displaced piece has no
    ///   square of its own after the last step.
    ///
    /// Errors from `after_step` are passed through. After an error the board
    /// is left in an unspecified state.
    pub fn apply_steps<'a, I, F>(&mut self, steps: I, mut after_step: F) -> Result<(), BoardError>
    where
        I: IntoIterator<Item = &'a Step>,
        F: FnMut(&mut Board, &Step) -> Result<(), BoardError>,
    {
        let mut overlap: Vec<(Pos, Piece)> = Vec::new();

        for step in steps {
            let to = self.index(step.to).ok_or(BoardError::OutOfBounds { pos: step.to })?;

            let piece = match overlap.iter().position(|&(pos, _)| pos == step.from) {
                Some(i) => overlap.swap_remove(i).1,
                None => self
                    .remove_piece(step.from)
                    .ok_or(BoardError::EmptySquare { pos: step.from })?,
            };

            if let Some(occupant) = self.squares[to].replace(piece) {
                if overlap.iter().any(|&(pos, _)| pos == step.to) {
                    warn!(pos = %step.to, %step, "too many pieces overlapping");
                    return Err(BoardError::TooManyOverlapping { pos: step.to });
                }
                overlap.push((step.to, occupant));
            }

            let mut i = 0;
            while i < overlap.len() {
                let (pos, displaced) = overlap[i];
                match self.index(pos) {
                    Some(square) if self.squares[square].is_none() => {
                        self.squares[square] = Some(displaced);
                        overlap.swap_remove(i);
                    }
                    _ => i += 1,
                }
            }

            after_step(self, step)?;
        }

        match overlap.first() {
            Some(&(pos, piece)) => {
                warn!(%pos, %piece, "displaced piece has no square");
                Err(BoardError::UnresolvedOverlap { pos })
            }
            None => Ok(()),
        }
    }

    /// Iterates over all occupied squares, row by row from row `0`.
    pub fn pieces(&self) -> Pieces<'_> {
        Pieces {
            board: self,
            index: 0,
        }
    }

    /// Positions of the kings of the given side.
    pub fn kings(&self, side: Side) -> impl Iterator<Item = Pos> + '_ {
        self.pieces()
            .filter(move |(_, piece)| piece.side == side && piece.role == Role::King)
            .map(|(pos, _)| pos)
    }

    pub fn is_empty(&self) -> bool {
        self.squares.iter().all(Option::is_none)
    }

    /// Number of pieces on the board.
    pub fn len(&self) -> usize {
        self.squares.iter().filter(|square| square.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::standard()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height as i32).rev() {
            for x in 0..self.width as i32 {
                f.write_char(self.get(Pos::new(x, y)).map_or('.', Piece::char))?;
                f.write_char(if x + 1 < self.width as i32 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Iterator over the pieces of a [`Board`] and their positions.
#[derive(Clone, Debug)]
pub struct Pieces<'a> {
    board: &'a Board,
    index: usize,
}

impl Iterator for Pieces<'_> {
    type Item = (Pos, Piece);

    fn next(&mut self) -> Option<(Pos, Piece)> {
        while let Some(square) = self.board.squares.get(self.index) {
            let index = self.index;
            self.index += 1;
            if let Some(piece) = *square {
                return Some((self.board.pos_at(index), piece));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.board.squares.len().saturating_sub(self.index)))
    }
}

impl std::iter::FusedIterator for Pieces<'_> {}
