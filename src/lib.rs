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


//! A rules engine for chess variants: boards of any size, moves made of
//! several steps, and the Knook, which moves like a rook or a knight.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use knook::{Game, Side};
//!
//! let game: Game = Game::default();
//! assert_eq!(game.legal_moves(Side::White).len(), 20);
//! ```
//!
//! Play moves:
//!
//! ```
//! use knook::{Game, Move};
//!
//! let mut game: Game = Game::default();
//!
//! // 1. Nf3
//! game.play(&Move::new("g1".parse()?, "f3".parse()?).capture())?;
//! assert_eq!(game.board().get("f3".parse()?).map(|p| p.move_count), Some(1));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Set up a board from a template and detect the end of the game:
//!
//! ```
//! use knook::{template::{parse_board, Registry}, Game, Outcome, Side};
//!
//! let board = parse_board("k7/1Q6/1K6/8/8/8/8/8", &Registry::default())?;
//! let game = Game::new(board);
//! assert!(game.is_checkmate(Side::Black));
//! assert!(!game.is_stalemate(Side::Black));
//! # Ok::<_, knook::template::ParseTemplateError>(())
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   plain value types.
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for plain value types.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.

#![doc(html_root_url = "https://docs.rs/knook/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod util;
mod board;
mod castling_side;
mod errors;
mod game;
mod listener;
mod m;
mod perft;
mod piece;
mod pos;
mod role;
mod side;

pub mod movegen;
pub mod template;
pub mod validator;

pub use board::{Board, Pieces};
pub use castling_side::CastlingSide;
pub use errors::{BoardError, InvalidPromotionTarget, PlayError};
pub use game::{Game, Outcome, ParseOutcomeError, PlayedMove};
pub use listener::{Event, Listener};
pub use m::{Captures, FollowUp, Move, MoveList, Step, Steps};
pub use movegen::Situation;
pub use perft::perft;
pub use piece::Piece;
pub use pos::{ParsePosError, Pos};
pub use role::{ByRole, Capabilities, Role};
pub use side::{BySide, ParseSideError, Side};
pub use validator::{Checks, StandardValidator, Validator};

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Side {}
