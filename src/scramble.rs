// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use ndarray::prelude::*;
use rand::Rng;
use tracing::info;

use crate::error::Result;
use crate::geometry::{self, Dimension, TilingPlan};
use crate::grid::{self, IndexGrid};
use crate::tile;

/// Output of one scramble run.
#[derive(Debug, Clone)]
pub struct Puzzle<A> {
    pub plan: TilingPlan,
    pub original_ids: IndexGrid,
    pub scrambled_ids: IndexGrid,
    /// Source cropped to the covered region.
    pub original: Array3<A>,
    /// `original` with every tile moved to its scrambled cell.
    pub scrambled: Array3<A>,
}

/// Main scramble algorithm.
///
/// Parameters:
/// * `image` : Input array view of shape (height, width, channels).
///   Only the first 2 dimension are tiled.
/// * `tile_count` : Number of tiles to cut the image into.
/// * `random` : Random number generator used for the permutation.
pub fn scramble<A, R>(
    image: ArrayView3<'_, A>,
    tile_count: usize,
    random: &mut R,
) -> Result<Puzzle<A>>
where
    A: Clone + Send + Sync,
    R: Rng + ?Sized,
{
    let (height, width, _) = image.dim();
    let plan = geometry::plan(tile_count, height, width)?;
    info!(
        rows = plan.rows,
        cols = plan.cols,
        tile = plan.tile.height,
        coverage = plan.coverage(height, width),
        "tiling planned"
    );

    let (original_ids, scrambled_ids) = grid::generate(&plan, random)?;
    original_ids.check_plan(&plan)?;
    scrambled_ids.check_plan(&plan)?;

    let cropped = tile::crop(image, &plan)?;
    let original = cropped.to_owned();
    let scrambled = tile::transport(cropped, &original_ids, &scrambled_ids, plan.tile)?;

    Ok(Puzzle {
        plan,
        original_ids,
        scrambled_ids,
        original,
        scrambled,
    })
}

/// Put every tile of `scrambled` back at its original cell.
pub fn unscramble<A>(
    scrambled: ArrayView3<'_, A>,
    original_ids: &IndexGrid,
    scrambled_ids: &IndexGrid,
    dim: Dimension,
) -> Result<Array3<A>>
where
    A: Clone + Send + Sync,
{
    tile::transport(scrambled, scrambled_ids, original_ids, dim)
}
