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

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use sha2::{Digest, Sha256};

/// Tile count used when none is given.
pub const DEFAULT_TILE_COUNT: usize = 1000;

/// Directory under which per-image output folders are created.
pub const DEFAULT_OUTPUT_ROOT: &str = "output";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    tile_count: usize,
    output_root: PathBuf,
    seed: Option<String>,
    threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tile_count: DEFAULT_TILE_COUNT,
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            seed: None,
            threads: None,
        }
    }
}

impl Config {
    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Random source for one run.
    ///
    /// A textual seed is hashed into the generator state, otherwise
    /// the generator is seeded from OS entropy.
    pub fn random(&self) -> Xoshiro256StarStar {
        match &self.seed {
            Some(seed) => {
                let mut hasher = Sha256::new();
                hasher.update(seed);

                Xoshiro256StarStar::from_seed(hasher.finalize().into())
            }
            None => Xoshiro256StarStar::from_entropy(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tile_count(mut self, tile_count: usize) -> Self {
        self.config.tile_count = tile_count;
        self
    }

    pub fn output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.config.output_root = output_root.into();
        self
    }

    pub fn seed(mut self, seed: Option<String>) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.config.threads = threads;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
