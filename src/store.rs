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

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{Dimension, TilingPlan};
use crate::grid::IndexGrid;

pub const METADATA_FILE: &str = "create.json";
pub const ORIGINAL_IDS_FILE: &str = "original.json";
pub const SCRAMBLED_IDS_FILE: &str = "scrambled.json";

/// Timestamp format of [`Metadata::created`].
pub const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Create `path` and all missing parents. Existing directories are fine.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::persistence(path, "create directory", e))
}

/// Description of a create run, stored next to its images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub filename: String,
    pub created: String,
    pub squares: usize,
    /// Tile (height, width).
    pub dimensions: (usize, usize),
    pub rows: usize,
    pub cols: usize,
}

impl Metadata {
    pub fn new(filename: impl Into<String>, created: impl Into<String>, plan: &TilingPlan) -> Self {
        Self {
            filename: filename.into(),
            created: created.into(),
            squares: plan.tile_count,
            dimensions: (plan.tile.height, plan.tile.width),
            rows: plan.rows,
            cols: plan.cols,
        }
    }

    /// Stamp with the current local time.
    pub fn now(filename: impl Into<String>, plan: &TilingPlan) -> Self {
        let created = chrono::Local::now().format(CREATED_FORMAT).to_string();
        Self::new(filename, created, plan)
    }

    pub fn tile(&self) -> Dimension {
        Dimension::new(self.dimensions.0, self.dimensions.1)
    }

    /// Rebuild the plan this metadata was written from.
    pub fn plan(&self) -> TilingPlan {
        TilingPlan {
            tile_count: self.squares,
            tile: self.tile(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::persistence(path, "serialize metadata", e))?;
        fs::write(path, content + "\n").map_err(|e| Error::persistence(path, "write metadata", e))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| Error::persistence(path, "read metadata", e))?;
        serde_json::from_str(&content).map_err(|e| Error::persistence(path, "parse metadata", e))
    }
}

pub fn save_grid(path: &Path, grid: &IndexGrid) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::persistence(path, "create id grid", e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &grid.view())
        .map_err(|e| Error::persistence(path, "write id grid", e))?;
    writer
        .flush()
        .map_err(|e| Error::persistence(path, "write id grid", e))
}

pub fn load_grid(path: &Path) -> Result<IndexGrid> {
    let file = File::open(path).map_err(|e| Error::persistence(path, "open id grid", e))?;
    let ids: Array2<usize> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::persistence(path, "parse id grid", e))?;
    IndexGrid::from_array(ids)
}

fn file_stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

/// File names inside the output folder of one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    dir: PathBuf,
    filename: String,
}

impl Layout {
    /// Folder for `image_path` under `root`, named after the image stem.
    pub fn for_image(root: &Path, image_path: &Path) -> Result<Self> {
        let filename = image_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::invalid(format!("{} has no usable file name", image_path.display()))
            })?
            .to_owned();
        Ok(Self {
            dir: root.join(file_stem(&filename)),
            filename,
        })
    }

    /// Existing output folder holding `filename`'s artifacts.
    pub fn in_dir(dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            filename: filename.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    fn suffixed(&self, suffix: &str) -> PathBuf {
        let name = match Path::new(&self.filename).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}_{suffix}.{ext}", file_stem(&self.filename)),
            None => format!("{}_{suffix}", self.filename),
        };
        self.dir.join(name)
    }

    pub fn original_image(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }

    pub fn scrambled_image(&self) -> PathBuf {
        self.suffixed("scrambled")
    }

    pub fn restored_image(&self) -> PathBuf {
        self.suffixed("restored")
    }

    pub fn metadata(&self) -> PathBuf {
        self.dir.join(METADATA_FILE)
    }

    pub fn original_ids(&self) -> PathBuf {
        self.dir.join(ORIGINAL_IDS_FILE)
    }

    pub fn scrambled_ids(&self) -> PathBuf {
        self.dir.join(SCRAMBLED_IDS_FILE)
    }
}
