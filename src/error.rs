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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed cause of a persistence failure (I/O, JSON or image encoding).
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    /// Non-positive tile count, empty image, or otherwise unusable argument.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Source image is missing or cannot be decoded.
    #[error("cannot decode image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Components disagree about grid shape or permutation. Always a bug.
    #[error("invariant violated: {reason}")]
    InvariantViolation { reason: String },

    /// Writing or reading a run artifact failed.
    #[error("failed to {operation} {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: BoxedSource,
    },
}

impl Error {
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn persistence(
        path: impl AsRef<Path>,
        operation: &'static str,
        source: impl Into<BoxedSource>,
    ) -> Self {
        Self::Persistence {
            path: path.as_ref().to_path_buf(),
            operation,
            source: source.into(),
        }
    }
}
