// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings.
//!
//! Settings are read once at startup by the binary and handed to the session
//! as fixed values; nothing changes them while a session runs.

use crate::io::storage::DEFAULT_DATASET_ROOT;
use anyhow::{ensure, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Startup settings with defaults matching the classic crop workflow.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Source image. When absent the operator picks one in a file dialog.
    pub image_path: Option<PathBuf>,
    /// Scale factor applied to the source image before display
    pub scale: f32,
    /// Half the side length of a saved patch, in displayed pixels
    pub half_size: u32,
    /// Directory receiving label directories and snapshots
    pub dataset_root: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            image_path: None,
            scale: 0.5,
            half_size: 16,
            dataset_root: PathBuf::from(DEFAULT_DATASET_ROOT),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.scale.is_finite() && self.scale > 0.0,
            "scale must be positive, got {}",
            self.scale
        );
        ensure!(self.half_size > 0, "half_size must be positive");
        Ok(())
    }
}
