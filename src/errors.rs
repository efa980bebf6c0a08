// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for image loading, labels and dataset storage.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatchError>;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image {0} is empty")]
    EmptyImage(PathBuf),

    #[error("no image selected")]
    NoImage,

    #[error("patch half-size must be positive")]
    ZeroHalfSize,

    #[error("invalid label name {0:?}")]
    InvalidLabel(String),

    #[error("storage failure at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write image {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl PatchError {
    /// Storage and encoding failures abort the session, everything else is
    /// either a startup failure or recoverable by the operator.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, PatchError::Storage { .. } | PatchError::Encode { .. })
    }
}
