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

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::io::Reader as ImageReader;
use image::{ColorType, ImageError, ImageFormat};
use ndarray::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};

/// Decoded image as a (height, width, bytes-per-pixel) array.
///
/// Pixels are kept as raw bytes so tiles move whole pixels whatever the
/// color type is.
#[derive(Debug, Clone)]
pub struct Raster {
    pub pixels: Array3<u8>,
    pub color: ColorType,
    pub format: Option<ImageFormat>,
}

impl Raster {
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Same color type and format with different pixels.
    pub fn with_pixels(&self, pixels: Array3<u8>) -> Self {
        Self {
            pixels,
            color: self.color,
            format: self.format,
        }
    }
}

pub fn decode(path: &Path) -> Result<Raster> {
    let fail = |source: ImageError| Error::ImageDecode {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|e| fail(ImageError::IoError(e)))?;
    let reader = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(|e| fail(ImageError::IoError(e)))?;
    let format = reader.format();
    let im = reader.decode().map_err(fail)?;

    let color = im.color();
    let shape = (
        im.height() as usize,
        im.width() as usize,
        usize::from(color.bytes_per_pixel()),
    );
    let pixels = Array3::from_shape_vec(shape, im.into_bytes())
        .map_err(|e| Error::invariant(format!("decoded buffer has wrong size: {e}")))?;

    debug!(path = %path.display(), ?shape, ?color, "decoded image");
    Ok(Raster {
        pixels,
        color,
        format,
    })
}

pub fn encode(raster: &Raster, path: &Path) -> Result<()> {
    let (height, width, _) = raster.pixels.dim();
    let size = |v: usize| {
        u32::try_from(v).map_err(|_| Error::invalid(format!("image side {v} too large")))
    };
    let (width, height) = (size(width)?, size(height)?);

    let pixels = raster.pixels.as_standard_layout();
    let bytes = pixels
        .as_slice()
        .ok_or_else(|| Error::invariant("pixel buffer is not contiguous"))?;

    let saved = match raster.format {
        Some(format) => {
            image::save_buffer_with_format(path, bytes, width, height, raster.color, format)
        }
        None => image::save_buffer(path, bytes, width, height, raster.color),
    };
    saved.map_err(|e| Error::persistence(path, "encode image", e))?;

    debug!(path = %path.display(), width, height, "encoded image");
    Ok(())
}
