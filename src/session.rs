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

use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::info;

use crate::codec;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::scramble;
use crate::store::{self, Layout, Metadata, METADATA_FILE};

/// Artifacts of a finished create run.
#[derive(Debug, Clone)]
pub struct Created {
    pub layout: Layout,
    pub metadata: Metadata,
}

/// Scramble the image at `image_path` and write every artifact into its
/// output folder.
///
/// Nothing is written unless decoding and scrambling both succeed.
pub fn create<R>(image_path: &Path, config: &Config, random: &mut R) -> Result<Created>
where
    R: Rng + ?Sized,
{
    let raster = codec::decode(image_path)?;
    let layout = Layout::for_image(config.output_root(), image_path)?;
    info!(
        path = %image_path.display(),
        height = raster.height(),
        width = raster.width(),
        "loaded image"
    );

    let puzzle = scramble::scramble(raster.pixels.view(), config.tile_count(), random)?;
    let metadata = Metadata::now(layout.filename(), &puzzle.plan);

    store::ensure_dir(layout.dir())?;
    metadata.write(&layout.metadata())?;
    codec::encode(
        &raster.with_pixels(puzzle.original),
        &layout.original_image(),
    )?;
    codec::encode(
        &raster.with_pixels(puzzle.scrambled),
        &layout.scrambled_image(),
    )?;
    store::save_grid(&layout.original_ids(), &puzzle.original_ids)?;
    store::save_grid(&layout.scrambled_ids(), &puzzle.scrambled_ids)?;

    info!(dir = %layout.dir().display(), "puzzle written");
    Ok(Created { layout, metadata })
}

/// Restore the scrambled image in `folder` using its stored id grids.
///
/// Returns the path of the restored image.
pub fn solve(folder: &Path) -> Result<PathBuf> {
    if !folder.is_dir() {
        return Err(Error::invalid(format!(
            "{} is not a directory",
            folder.display()
        )));
    }

    let metadata = Metadata::read(&folder.join(METADATA_FILE))?;
    let layout = Layout::in_dir(folder, metadata.filename.as_str());
    let plan = metadata.plan();

    let original_ids = store::load_grid(&layout.original_ids())?;
    let scrambled_ids = store::load_grid(&layout.scrambled_ids())?;
    original_ids.check_plan(&plan)?;
    scrambled_ids.check_plan(&plan)?;

    let raster = codec::decode(&layout.scrambled_image())?;
    let restored = scramble::unscramble(
        raster.pixels.view(),
        &original_ids,
        &scrambled_ids,
        plan.tile,
    )?;

    let path = layout.restored_image();
    codec::encode(&raster.with_pixels(restored), &path)?;
    info!(path = %path.display(), "puzzle restored");
    Ok(path)
}
