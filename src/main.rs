// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! PATCHLAB - Patch Labeling Tool
//!
//! A desktop tool for building image classification datasets: click on
//! points of interest to save fixed-size labeled patches around them.

mod app;
mod errors;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::PatchApp;
use errors::PatchError;
use io::storage::{DatasetLayout, FsSink};
use models::session::Session;
use std::path::PathBuf;
use std::sync::mpsc::channel;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let settings = io::serialization::load_settings(&std::env::current_dir()?)?;

    let image_path = match settings.image_path.clone() {
        Some(path) => path,
        None => pick_image()?,
    };
    let image = io::media::load_image(&image_path, settings.scale)?;
    log::info!(
        "Loaded image: {} ({}x{} after scaling by {})",
        image_path.display(),
        image.width(),
        image.height(),
        settings.scale
    );

    let session = Session::new(
        image,
        settings.half_size,
        DatasetLayout::new(&settings.dataset_root),
        FsSink,
    )?;

    let (width, height) = session.annotated().dimensions();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                (width as f32 + 240.0).min(1600.0),
                (height as f32 + 60.0).min(1000.0),
            ])
            .with_min_inner_size([640.0, 480.0])
            .with_title(format!("PATCHLAB - {}", image_path.display())),
        ..Default::default()
    };

    let (failures, failure_receiver) = channel();

    // Run the application
    eframe::run_native(
        "PATCHLAB",
        options,
        Box::new(move |_cc| Ok(Box::new(PatchApp::new(session, failures)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    if let Ok(err) = failure_receiver.try_recv() {
        return Err(err.into());
    }

    Ok(())
}

/// Ask the operator for the source image with a native file dialog.
fn pick_image() -> Result<PathBuf, PatchError> {
    rfd::FileDialog::new()
        .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif"])
        .pick_file()
        .ok_or(PatchError::NoImage)
}
