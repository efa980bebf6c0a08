// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Settings file loading.
//!
//! Settings are read from `patchlab.yaml`, `patchlab.yml` or `patchlab.json`
//! in the working directory. The format follows the file extension.

use crate::models::settings::Settings;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Settings file names probed in order.
pub const SETTINGS_FILES: [&str; 3] = ["patchlab.yaml", "patchlab.yml", "patchlab.json"];

/// Import settings from YAML format.
pub fn import_yaml(path: &Path) -> Result<Settings> {
    let yaml = std::fs::read_to_string(path)?;
    let settings = serde_yaml::from_str(&yaml)?;
    Ok(settings)
}

/// Import settings from JSON format.
pub fn import_json(path: &Path) -> Result<Settings> {
    let json = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&json)?;
    Ok(settings)
}

/// Import settings, picking the parser from the file extension.
pub fn import_settings(path: &Path) -> Result<Settings> {
    let extension = path.extension().and_then(|s| s.to_str());
    let settings = match extension {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        _ => bail!("Unsupported settings extension: {:?}", extension),
    }
    .with_context(|| format!("Failed to read settings {}", path.display()))?;

    settings.validate()?;
    Ok(settings)
}

/// Load the first settings file found in `dir`, or defaults if there is none.
pub fn load_settings(dir: &Path) -> Result<Settings> {
    match find_settings_file(dir) {
        Some(path) => {
            log::info!("Loading settings from {}", path.display());
            import_settings(&path)
        }
        None => {
            log::debug!("No settings file in {}, using defaults", dir.display());
            Ok(Settings::default())
        }
    }
}

fn find_settings_file(dir: &Path) -> Option<PathBuf> {
    SETTINGS_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(load_settings(tmp.path()).unwrap(), Settings::default());
    }

    #[test]
    fn test_yaml_settings_with_partial_fields() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("patchlab.yaml"),
            "image_path: traps/node10.jpg\nhalf_size: 24\n",
        )
        .unwrap();

        let settings = load_settings(tmp.path()).unwrap();
        assert_eq!(settings.image_path, Some(PathBuf::from("traps/node10.jpg")));
        assert_eq!(settings.half_size, 24);
        assert_eq!(settings.scale, 0.5);
    }

    #[test]
    fn test_json_settings() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("patchlab.json"),
            r#"{ "scale": 1.0, "dataset_root": "out" }"#,
        )
        .unwrap();

        let settings = load_settings(tmp.path()).unwrap();
        assert_eq!(settings.scale, 1.0);
        assert_eq!(settings.dataset_root, PathBuf::from("out"));
        assert_eq!(settings.image_path, None);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("patchlab.yml"), "half_size: 0\n").unwrap();
        assert!(load_settings(tmp.path()).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(import_settings(Path::new("patchlab.toml")).is_err());
    }
}
