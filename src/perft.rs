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


use crate::{game::Game, validator::Validator};

/// Counts legal move paths of a given length, starting with the side to
/// move and alternating sides.
///
/// Paths that end in mate before `depth` are not counted. Useful for
/// comparing, testing and debugging move generation and validation.
///
/// # Examples
///
/// ```
/// use knook::{perft, Game};
///
/// let game: Game = Game::default();
/// assert_eq!(perft(&game, 1), 20);
/// assert_eq!(perft(&game, 2), 400);
/// ```
pub fn perft<V: Validator>(game: &Game<V>, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    let moves = game.legal_moves(game.side_to_move());
    if depth == 1 {
        moves.len() as u64
    } else {
        moves
            .iter()
            .map(|m| {
                let mut child = game.clone();
                match child.apply_move(m) {
                    Ok(()) => perft(&child, depth - 1),
                    Err(_) => 0,
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{template::{parse_board, Registry}, Game};

    #[test]
    fn test_depth_zero() {
        let game: Game = Game::default();
        assert_eq!(perft(&game, 0), 1);
    }

    #[test]
    fn test_kings_only() {
        let board = parse_board("4k3/8/8/8/8/8/8/4K3", &Registry::standard()).unwrap();
        let game = Game::new(board);
        assert_eq!(perft(&game, 1), 5);
        assert_eq!(perft(&game, 2), 25);
    }
}
