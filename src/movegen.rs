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


//! Geometric move generation.
//!
//! Generators enumerate the moves a piece could make from its square,
//! looking only at the board and the previous move. Whether a move is legal
//! is decided by a [`Validator`](crate::Validator).

use arrayvec::ArrayVec;

use crate::{
    board::Board,
    castling_side::CastlingSide,
    game::PlayedMove,
    m::{Move, MoveList},
    pos::Pos,
    role::Role,
    side::Side,
};

/// Unit steps along rows and columns.
pub const ORTHOGONAL: [Pos; 4] = [
    Pos::new(1, 0),
    Pos::new(-1, 0),
    Pos::new(0, 1),
    Pos::new(0, -1),
];

/// Unit steps along diagonals.
pub const DIAGONAL: [Pos; 4] = [
    Pos::new(1, 1),
    Pos::new(1, -1),
    Pos::new(-1, 1),
    Pos::new(-1, -1),
];

/// The eight neighbouring squares.
pub const ADJACENT: [Pos; 8] = [
    Pos::new(1, 0),
    Pos::new(-1, 0),
    Pos::new(0, 1),
    Pos::new(0, -1),
    Pos::new(1, 1),
    Pos::new(1, -1),
    Pos::new(-1, 1),
    Pos::new(-1, -1),
];

/// The eight L-shaped jumps.
pub const KNIGHT_DELTAS: [Pos; 8] = [
    Pos::new(1, 2),
    Pos::new(2, 1),
    Pos::new(2, -1),
    Pos::new(1, -2),
    Pos::new(-1, -2),
    Pos::new(-2, -1),
    Pos::new(-2, 1),
    Pos::new(-1, 2),
];

/// The part of a game that move generation depends on.
#[derive(Copy, Clone, Debug)]
pub struct Situation<'a> {
    pub board: &'a Board,
    /// The most recently played move, used to detect en passant.
    pub last_move: Option<&'a PlayedMove>,
}

impl<'a> Situation<'a> {
    pub const fn new(board: &'a Board, last_move: Option<&'a PlayedMove>) -> Situation<'a> {
        Situation { board, last_move }
    }
}

/// Walks from `from` in `direction` until leaving the board, adding a
/// capturing move for every square visited. The first occupied square is
/// included, the squares behind it are not.
pub fn run_line(board: &Board, from: Pos, direction: Pos, moves: &mut MoveList) {
    let mut to = from + direction;
    while board.contains(to) {
        moves.push(Move::new(from, to).capture());
        if board.get(to).is_some() {
            break;
        }
        to += direction;
    }
}

/// Pieces that jump to fixed offsets.
pub trait Stepper {
    const DELTAS: &'static [Pos];

    fn gen_moves(board: &Board, from: Pos, moves: &mut MoveList) {
        moves.extend(
            Self::DELTAS
                .iter()
                .map(|&delta| from + delta)
                .filter(|&to| board.contains(to))
                .map(|to| Move::new(from, to).capture()),
        );
    }
}

/// Pieces that slide along lines until blocked.
pub trait Slider {
    const DIRECTIONS: &'static [Pos];

    fn gen_moves(board: &Board, from: Pos, moves: &mut MoveList) {
        for &direction in Self::DIRECTIONS {
            run_line(board, from, direction, moves);
        }
    }
}

#[derive(Debug)]
pub struct KingTag;
#[derive(Debug)]
pub struct KnightTag;
#[derive(Debug)]
pub struct BishopTag;
#[derive(Debug)]
pub struct RookTag;
#[derive(Debug)]
pub struct QueenTag;

impl Stepper for KingTag {
    const DELTAS: &'static [Pos] = &ADJACENT;
}

impl Stepper for KnightTag {
    const DELTAS: &'static [Pos] = &KNIGHT_DELTAS;
}

impl Slider for BishopTag {
    const DIRECTIONS: &'static [Pos] = &DIAGONAL;
}

impl Slider for RookTag {
    const DIRECTIONS: &'static [Pos] = &ORTHOGONAL;
}

impl Slider for QueenTag {
    const DIRECTIONS: &'static [Pos] = &ADJACENT;
}

/// Generates the moves of the piece on `from`, or nothing if the square is
/// empty.
pub fn gen_moves(situation: &Situation<'_>, from: Pos, moves: &mut MoveList) {
    let board = situation.board;
    let Some(piece) = board.get(from) else {
        return;
    };

    match piece.role {
        Role::Pawn => pawn_moves(situation, from, moves),
        Role::Knight => KnightTag::gen_moves(board, from, moves),
        Role::Bishop => BishopTag::gen_moves(board, from, moves),
        Role::Rook => RookTag::gen_moves(board, from, moves),
        Role::Queen => QueenTag::gen_moves(board, from, moves),
        Role::King => {
            KingTag::gen_moves(board, from, moves);
            moves.extend(
                CastlingSide::ALL
                    .into_iter()
                    .filter_map(|side| castling(board, from, side)),
            );
        }
        Role::Knook => {
            RookTag::gen_moves(board, from, moves);
            KnightTag::gen_moves(board, from, moves);
        }
    }
}

/// Collects the moves of the piece on `from`.
pub fn piece_moves(situation: &Situation<'_>, from: Pos) -> MoveList {
    let mut moves = MoveList::new();
    gen_moves(situation, from, &mut moves);
    moves
}

/// Generates pawn pushes, diagonal captures, and en passant. If the piece
/// is promotable, moves that end on the first or last row are expanded into
/// one move per promotion target.
pub fn pawn_moves(situation: &Situation<'_>, from: Pos, moves: &mut MoveList) {
    let board = situation.board;
    let Some(pawn) = board.get(from) else {
        return;
    };
    let forward = pawn.side.forward();
    // Two pushes, two diagonals, and two en passant captures at most.
    let mut candidates: ArrayVec<Move, 6> = ArrayVec::new();

    let single = from.add_y(forward);
    if board.contains(single) {
        candidates.push(Move::new(from, single));
        let double = single.add_y(forward);
        if !pawn.has_moved() && board.get(single).is_none() && board.contains(double) {
            candidates.push(Move::new(from, double));
        }
    }

    for dx in [-1, 1] {
        let to = from + Pos::new(dx, forward);
        if !board.contains(to) {
            continue;
        }
        candidates.push(Move::new(from, to).must_capture().capture());

        let neighbour = from.add_x(dx);
        if is_en_passant_victim(situation, pawn.side, neighbour) {
            candidates.push(Move::new(from, to).must_capture().capture_at(neighbour));
        }
    }

    let last_row = board.height() as i32 - 1;
    for m in candidates {
        if pawn.role.is_promotable() && (m.to().y == 0 || m.to().y == last_row) {
            moves.extend(Role::PROMOTIONS.into_iter().map(|role| m.clone().promote_to(role)));
        } else {
            moves.push(m);
        }
    }
}

/// An opposing pawn that advanced two rows onto `pos` in the previous move,
/// and has not moved otherwise.
fn is_en_passant_victim(situation: &Situation<'_>, side: Side, pos: Pos) -> bool {
    let Some(victim) = situation.board.get(pos) else {
        return false;
    };
    victim.role == Role::Pawn
        && victim.side != side
        && victim.move_count == 1
        && situation.last_move.is_some_and(|last| {
            let m = &last.m;
            m.follow_up().is_none()
                && m.to() == pos
                && m.step().offset().abs() == Pos::new(0, 2)
        })
}

/// Generates castling of the unmoved king on `king` with the unmoved
/// castling partner on the edge of the row.
///
/// The king moves two files towards the partner, which then moves to the
/// square the king passed. All squares between king and partner must be
/// empty. Whether the king passes through an attacked square is not
/// checked.
pub fn castling(board: &Board, king: Pos, side: CastlingSide) -> Option<Move> {
    let piece = board
        .get(king)
        .filter(|piece| piece.role == Role::King && !piece.has_moved())?;

    let direction = side.direction();
    let partner_pos = king.with_x(side.edge_x(board.width()));
    if (partner_pos.x - king.x) * direction.x < 2 {
        return None;
    }

    let partner = board.get(partner_pos)?;
    if partner.side != piece.side || !partner.role.is_castling_partner() || partner.has_moved() {
        return None;
    }

    let mut between = king + direction;
    while between != partner_pos {
        if board.get(between).is_some() {
            return None;
        }
        between += direction;
    }

    let king_to = king + direction * 2;
    Some(Move::new(king, king_to).then(partner_pos, king_to - direction))
}
