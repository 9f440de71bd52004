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

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Pixel size of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub height: usize,
    pub width: usize,
}

impl Dimension {
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    pub const fn square(length: usize) -> Self {
        Self::new(length, length)
    }

    pub const fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }
}

/// Cell address inside the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

impl GridPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Top-left pixel of this cell for tiles of size `dim`.
    pub const fn offset(&self, dim: Dimension) -> PixelOffset {
        PixelOffset {
            y: self.row * dim.height,
            x: self.col * dim.width,
        }
    }
}

/// Top-left pixel coordinate inside an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelOffset {
    pub y: usize,
    pub x: usize,
}

/// Grid shape and tile size chosen for an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilingPlan {
    pub tile_count: usize,
    pub tile: Dimension,
    pub rows: usize,
    pub cols: usize,
}

impl TilingPlan {
    pub const fn covered_height(&self) -> usize {
        self.rows * self.tile.height
    }

    pub const fn covered_width(&self) -> usize {
        self.cols * self.tile.width
    }

    pub const fn covered_area(&self) -> usize {
        self.covered_height() * self.covered_width()
    }

    /// Fraction of a `height` x `width` image covered by whole tiles.
    pub fn coverage(&self, height: usize, width: usize) -> f64 {
        if height == 0 || width == 0 {
            return 0.0;
        }
        self.covered_area() as f64 / (height * width) as f64
    }

    /// Check the plan against the image it was made for.
    pub fn validate(&self, height: usize, width: usize) -> Result<()> {
        if self.rows * self.cols != self.tile_count {
            return Err(Error::invariant(format!(
                "grid {}x{} does not hold {} tiles",
                self.rows, self.cols, self.tile_count
            )));
        }
        if self.tile.is_empty() {
            return Err(Error::invariant("tile has no pixels"));
        }
        if self.covered_height() > height || self.covered_width() > width {
            return Err(Error::invariant(format!(
                "covered region {}x{} exceeds image {}x{}",
                self.covered_height(),
                self.covered_width(),
                height,
                width
            )));
        }
        Ok(())
    }
}

/// All `(low, high)` with `low <= high` and `low * high == n`, ascending by `low`.
pub fn factor_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (1..)
        .take_while(move |&i| i <= n / i)
        .filter(move |&i| n % i == 0)
        .map(move |i| (i, n / i))
}

/// Largest square tile for a `low` x `high` grid, `high` along the longer side.
fn tile_length(low: usize, high: usize, shorter: usize, longer: usize) -> usize {
    (longer / high).min(shorter / low)
}

/// Choose rows, columns and square tile length maximizing covered area.
///
/// Every factor pair of `tile_count` is tried with its larger factor laid
/// along the longer image side. Ties keep the earliest pair.
pub fn plan(tile_count: usize, height: usize, width: usize) -> Result<TilingPlan> {
    if tile_count == 0 {
        return Err(Error::invalid("tile count must be positive"));
    }
    if height == 0 || width == 0 {
        return Err(Error::invalid(format!(
            "image dimensions must be positive (got {height}x{width})"
        )));
    }
    if height
        .checked_mul(width)
        .map_or(false, |pixels| tile_count > pixels)
    {
        return Err(Error::invalid(format!(
            "image {height}x{width} is too small for {tile_count} tiles"
        )));
    }

    let tall = height > width;
    let (shorter, longer) = if tall { (width, height) } else { (height, width) };

    let mut best: Option<(usize, usize, usize)> = None;
    let mut max_area = 0;
    for (low, high) in factor_pairs(tile_count) {
        let length = tile_length(low, high, shorter, longer);
        let area = (length * high) * (length * low);
        debug!(low, high, length, area, "factor pair");
        if area > max_area {
            max_area = area;
            best = Some((low, high, length));
        }
    }

    let Some((low, high, length)) = best else {
        return Err(Error::invalid(format!(
            "image {height}x{width} is too small for {tile_count} tiles"
        )));
    };
    let (rows, cols) = if tall { (high, low) } else { (low, high) };

    let plan = TilingPlan {
        tile_count,
        tile: Dimension::square(length),
        rows,
        cols,
    };
    let coverage = plan.coverage(height, width);
    if coverage < 0.5 {
        warn!(
            tile_count,
            coverage, "tiling leaves more than half of the image uncovered"
        );
    }
    Ok(plan)
}
