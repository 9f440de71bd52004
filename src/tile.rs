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

use ndarray::parallel::prelude::*;
use ndarray::prelude::*;
use ndarray::{DataMut, Slice, Zip};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{Dimension, GridPosition, PixelOffset, TilingPlan};
use crate::grid::IndexGrid;

fn checked_offset(
    shape: (usize, usize, usize),
    pos: GridPosition,
    dim: Dimension,
) -> Result<PixelOffset> {
    let off = pos.offset(dim);
    if off.y + dim.height > shape.0 || off.x + dim.width > shape.1 {
        return Err(Error::invariant(format!(
            "tile at ({}, {}) of size {}x{} exceeds buffer {}x{}",
            pos.row, pos.col, dim.height, dim.width, shape.0, shape.1
        )));
    }
    Ok(off)
}

/// Borrow the pixel block of the tile at `pos`.
pub fn extract<'a, A>(
    source: ArrayView3<'a, A>,
    pos: GridPosition,
    dim: Dimension,
) -> Result<ArrayView3<'a, A>> {
    let off = checked_offset(source.dim(), pos, dim)?;

    let mut tile = source;
    tile.slice_axis_inplace(Axis(0), Slice::from(off.y..off.y + dim.height));
    tile.slice_axis_inplace(Axis(1), Slice::from(off.x..off.x + dim.width));
    Ok(tile)
}

/// Stamp `tile` into `dest` at grid cell `pos`.
pub fn place<'d, A, S>(
    dest: &'d mut ArrayBase<S, Ix3>,
    pos: GridPosition,
    tile: ArrayView3<'_, A>,
    dim: Dimension,
) -> Result<&'d mut ArrayBase<S, Ix3>>
where
    A: Clone,
    S: DataMut<Elem = A>,
{
    let (_, _, depth) = dest.dim();
    if tile.dim() != (dim.height, dim.width, depth) {
        let (h, w, d) = tile.dim();
        return Err(Error::invariant(format!(
            "tile block {h}x{w}x{d} does not match {}x{}x{depth}",
            dim.height, dim.width
        )));
    }
    let off = checked_offset(dest.dim(), pos, dim)?;

    dest.slice_mut(s![off.y..off.y + dim.height, off.x..off.x + dim.width, ..])
        .assign(&tile);
    Ok(dest)
}

/// Restrict `image` to the region covered by the plan's tiles.
pub fn crop<'a, A>(image: ArrayView3<'a, A>, plan: &TilingPlan) -> Result<ArrayView3<'a, A>> {
    let (height, width, _) = image.dim();
    plan.validate(height, width)?;

    debug!(
        height = plan.covered_height(),
        width = plan.covered_width(),
        "cropping to covered region"
    );
    Ok(image.slice_move(s![..plan.covered_height(), ..plan.covered_width(), ..]))
}

/// Build a new buffer where every tile id sits at its cell in `to`,
/// taking its pixels from its cell in `from`.
///
/// `source` must be exactly `rows * dim.height` by `cols * dim.width`.
/// Destination cells are filled in parallel; they never overlap since
/// both grids are permutations over the same cells.
pub fn transport<A>(
    source: ArrayView3<'_, A>,
    from: &IndexGrid,
    to: &IndexGrid,
    dim: Dimension,
) -> Result<Array3<A>>
where
    A: Clone + Send + Sync,
{
    if from.shape() != to.shape() {
        return Err(Error::invariant(format!(
            "id grids differ in shape ({:?} != {:?})",
            from.shape(),
            to.shape()
        )));
    }
    if dim.is_empty() {
        return Err(Error::invalid("tile dimension must be positive"));
    }

    let (height, width, depth) = source.dim();
    let (rows, cols) = to.shape();
    if (height, width) != (rows * dim.height, cols * dim.width) {
        return Err(Error::invariant(format!(
            "buffer {height}x{width} does not fit {rows}x{cols} tiles of {}x{}",
            dim.height, dim.width
        )));
    }
    if depth == 0 {
        return Err(Error::invalid("image has no channels"));
    }

    debug!(tiles = to.len(), ?dim, "transporting tiles");

    // Element `i` is the block of tile id `i`.
    let tiles = from
        .positions()
        .into_iter()
        .map(|pos| extract(source.view(), pos, dim))
        .collect::<Result<Vec<_>>>()?;
    let targets = to.view();
    let mut out = source.to_owned();

    // Each chunk is exactly one destination cell.
    Zip::indexed(out.exact_chunks_mut((dim.height, dim.width, depth)))
        .into_par_iter()
        .try_for_each(|((r, c, _), mut cell)| {
            let tile = tiles[targets[[r, c]]].view();
            place(&mut cell, GridPosition::new(0, 0), tile, dim).map(drop)
        })?;

    Ok(out)
}
