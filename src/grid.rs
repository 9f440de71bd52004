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
use rand::prelude::*;

use crate::error::{Error, Result};
use crate::geometry::{GridPosition, TilingPlan};

/// `rows x cols` array holding every tile id `0..rows*cols` exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGrid {
    ids: Array2<usize>,
}

impl IndexGrid {
    /// Ids in row-major order.
    pub fn identity(rows: usize, cols: usize) -> Self {
        Self {
            ids: Array2::from_shape_fn((rows, cols), |(r, c)| r * cols + c),
        }
    }

    /// Ids uniformly shuffled over all cells.
    pub fn shuffled<R: Rng + ?Sized>(rows: usize, cols: usize, random: &mut R) -> Self {
        let mut grid = Self::identity(rows, cols);
        grid.ids
            .as_slice_mut()
            .expect("Should be standard-layout")
            .shuffle(random);
        grid
    }

    /// Wrap a raw array, checking it is a permutation of `0..len`.
    pub fn from_array(ids: Array2<usize>) -> Result<Self> {
        let mut seen = vec![false; ids.len()];
        for ((r, c), &id) in ids.indexed_iter() {
            match seen.get_mut(id) {
                Some(s) if !*s => *s = true,
                Some(_) => {
                    return Err(Error::invariant(format!(
                        "tile id {id} repeated at ({r}, {c})"
                    )))
                }
                None => {
                    return Err(Error::invariant(format!(
                        "tile id {id} at ({r}, {c}) out of range 0..{}",
                        seen.len()
                    )))
                }
            }
        }
        Ok(Self { ids })
    }

    pub fn rows(&self) -> usize {
        self.ids.nrows()
    }

    pub fn cols(&self) -> usize {
        self.ids.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.ids.dim()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn view(&self) -> ArrayView2<'_, usize> {
        self.ids.view()
    }

    pub fn into_inner(self) -> Array2<usize> {
        self.ids
    }

    /// Tile id stored at `pos`.
    pub fn get(&self, pos: GridPosition) -> Option<usize> {
        self.ids.get((pos.row, pos.col)).copied()
    }

    /// Inverse lookup: element `i` is the cell holding tile id `i`.
    pub fn positions(&self) -> Vec<GridPosition> {
        let mut out = vec![GridPosition::new(0, 0); self.ids.len()];
        for ((r, c), &id) in self.ids.indexed_iter() {
            out[id] = GridPosition::new(r, c);
        }
        out
    }

    pub fn position_of(&self, id: usize) -> Option<GridPosition> {
        self.ids
            .indexed_iter()
            .find(|&(_, &v)| v == id)
            .map(|((r, c), _)| GridPosition::new(r, c))
    }

    /// Fail unless this grid has the plan's shape.
    pub fn check_plan(&self, plan: &TilingPlan) -> Result<()> {
        if self.shape() != (plan.rows, plan.cols) || self.len() != plan.tile_count {
            return Err(Error::invariant(format!(
                "id grid {}x{} does not match plan {}x{} ({} tiles)",
                self.rows(),
                self.cols(),
                plan.rows,
                plan.cols,
                plan.tile_count
            )));
        }
        Ok(())
    }
}

impl TryFrom<Array2<usize>> for IndexGrid {
    type Error = Error;

    fn try_from(ids: Array2<usize>) -> Result<Self> {
        Self::from_array(ids)
    }
}

/// Build the natural-order grid and a uniformly shuffled copy for `plan`.
pub fn generate<R: Rng + ?Sized>(
    plan: &TilingPlan,
    random: &mut R,
) -> Result<(IndexGrid, IndexGrid)> {
    if plan.rows * plan.cols != plan.tile_count {
        return Err(Error::invariant(format!(
            "grid {}x{} does not hold {} tiles",
            plan.rows, plan.cols, plan.tile_count
        )));
    }

    let original = IndexGrid::identity(plan.rows, plan.cols);
    let scrambled = IndexGrid::shuffled(plan.rows, plan.cols, random);
    Ok((original, scrambled))
}
