//! Library to cut an image into square tiles and scramble them.
//!
//! A run does the following:
//!
//! * Picks a grid shape and tile size covering as much of the image
//!   as possible for a requested tile count ([geometry::plan]).
//! * Numbers the tiles and draws a random permutation of them ([grid::generate]).
//! * Moves every tile to its permuted cell ([tile::transport]).
//!
//! The stored id grids are enough to put every tile back ([unscramble]).

// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//

pub mod codec;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
mod scramble;
pub mod session;
pub mod store;
pub mod tile;

#[doc(inline)]
pub use crate::config::{Config, ConfigBuilder};
#[doc(inline)]
pub use crate::error::{Error, Result};
#[doc(inline)]
pub use crate::scramble::{scramble, unscramble, Puzzle};
