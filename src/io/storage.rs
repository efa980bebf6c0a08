// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dataset storage.
//!
//! Crops are written as PNG files named after the second they were taken,
//! one directory per label under the dataset root:
//!
//! ```text
//! dataset/original/<label>/<yymmddHHMMSS>.png
//! dataset/original/<yymmddHHMMSS>_original.png
//! dataset/original/<yymmddHHMMSS>_result.png
//! ```

use crate::errors::{PatchError, Result};
use crate::models::label::Label;
use chrono::{DateTime, Local};
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Default dataset root relative to the working directory.
pub const DEFAULT_DATASET_ROOT: &str = "dataset/original";

/// Where crops and snapshots end up.
pub trait StorageSink {
    /// Create `path` and its parents if absent. Must be safe to call repeatedly.
    fn ensure_dir(&mut self, path: &Path) -> Result<()>;

    /// Write `image` to `path`, replacing any existing file.
    fn write_image(&mut self, path: &Path, image: &RgbImage) -> Result<()>;
}

/// Storage sink backed by the local filesystem.
#[derive(Debug, Default)]
pub struct FsSink;

impl StorageSink for FsSink {
    fn ensure_dir(&mut self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|source| PatchError::Storage {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_image(&mut self, path: &Path, image: &RgbImage) -> Result<()> {
        image.save(path).map_err(|err| match err {
            image::ImageError::IoError(source) => PatchError::Storage {
                path: path.to_path_buf(),
                source,
            },
            source => PatchError::Encode {
                path: path.to_path_buf(),
                source,
            },
        })
    }
}

/// The two whole-image files written when a session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshots {
    pub original: PathBuf,
    pub result: PathBuf,
}

/// File layout of the dataset directory.
#[derive(Debug, Clone)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl Default for DatasetLayout {
    fn default() -> Self {
        Self::new(DEFAULT_DATASET_ROOT)
    }
}

impl DatasetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn label_dir(&self, label: &Label) -> PathBuf {
        self.root.join(label.as_str())
    }

    pub fn crop_path(&self, label: &Label, stamp: &str) -> PathBuf {
        self.label_dir(label).join(format!("{}.png", stamp))
    }

    pub fn snapshot_paths(&self, stamp: &str) -> Snapshots {
        Snapshots {
            original: self.root.join(format!("{}_original.png", stamp)),
            result: self.root.join(format!("{}_result.png", stamp)),
        }
    }
}

/// Second resolution file stamp, e.g. `250914173005`.
pub fn timestamp(now: DateTime<Local>) -> String {
    now.format("%y%m%d%H%M%S").to_string()
}
