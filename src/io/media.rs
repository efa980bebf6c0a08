// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image loading, cropping and marker drawing.

use crate::errors::{PatchError, Result};
use crate::models::label::MarkerColor;
use crate::util::geometry::CropRect;
use image::{imageops, RgbImage};
use imageproc::{drawing::draw_hollow_rect_mut, rect::Rect};
use std::path::Path;

/// Load an image as RGB and scale it by `scale` in both directions.
pub fn load_image(path: &Path, scale: f32) -> Result<RgbImage> {
    let img = image::open(path)
        .map_err(|source| PatchError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();

    if img.width() == 0 || img.height() == 0 {
        return Err(PatchError::EmptyImage(path.to_path_buf()));
    }

    Ok(resize(&img, scale))
}

/// Scale an image by a factor, keeping at least one pixel per side.
pub fn resize(img: &RgbImage, scale: f32) -> RgbImage {
    if (scale - 1.0).abs() < f32::EPSILON {
        return img.clone();
    }
    let width = ((img.width() as f32 * scale).round() as u32).max(1);
    let height = ((img.height() as f32 * scale).round() as u32).max(1);
    imageops::resize(img, width, height, imageops::FilterType::Triangle)
}

/// Copy the pixels under `rect` out of `img`.
pub fn crop(img: &RgbImage, rect: &CropRect) -> RgbImage {
    imageops::crop_imm(img, rect.left, rect.top, rect.width(), rect.height()).to_image()
}

/// Draw a 1-pixel hollow rectangle with inclusive corners, clipped to the image.
pub fn draw_marker(img: &mut RgbImage, top_left: (i32, i32), bottom_right: (i32, i32), color: MarkerColor) {
    let width = (bottom_right.0 - top_left.0 + 1).max(1) as u32;
    let height = (bottom_right.1 - top_left.1 + 1).max(1) as u32;
    let rect = Rect::at(top_left.0, top_left.1).of_size(width, height);
    draw_hollow_rect_mut(img, rect, color.rgb());
}

/// Convert an RGB buffer into an egui image for texture upload.
pub fn to_color_image(img: &RgbImage) -> egui::ColorImage {
    let size = [img.width() as usize, img.height() as usize];
    egui::ColorImage::from_rgb(size, img.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::label::PALETTE;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 7]))
    }

    #[test]
    fn test_crop_copies_region() {
        let img = gradient(64, 64);
        let rect = CropRect { left: 10, top: 20, right: 42, bottom: 52 };
        let patch = crop(&img, &rect);

        assert_eq!(patch.dimensions(), (32, 32));
        assert_eq!(patch.get_pixel(0, 0), &Rgb([10, 20, 7]));
        assert_eq!(patch.get_pixel(31, 31), &Rgb([41, 51, 7]));
    }

    #[test]
    fn test_draw_marker_outlines_only() {
        let mut img = RgbImage::new(40, 40);
        let color = PALETTE[0];
        draw_marker(&mut img, (10, 10), (20, 20), color);

        assert_eq!(img.get_pixel(10, 10), &color.rgb());
        assert_eq!(img.get_pixel(20, 20), &color.rgb());
        assert_eq!(img.get_pixel(15, 10), &color.rgb());
        assert_eq!(img.get_pixel(10, 15), &color.rgb());
        assert_eq!(img.get_pixel(15, 15), &Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(21, 21), &Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(9, 9), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_draw_marker_clips_at_edge() {
        let mut img = RgbImage::new(32, 32);
        draw_marker(&mut img, (0, 0), (32, 32), PALETTE[2]);
        assert_eq!(img.get_pixel(0, 0), &PALETTE[2].rgb());
        assert_eq!(img.get_pixel(31, 0), &PALETTE[2].rgb());
        assert_eq!(img.get_pixel(31, 31), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_resize_by_half() {
        let img = gradient(101, 60);
        assert_eq!(resize(&img, 0.5).dimensions(), (51, 30));
        assert_eq!(resize(&img, 1.0).dimensions(), (101, 60));
        assert_eq!(resize(&img, 0.001).dimensions(), (1, 1));
    }

    #[test]
    fn test_load_missing_image_fails() {
        let err = load_image(Path::new("does/not/exist.png"), 1.0).unwrap_err();
        assert!(matches!(err, PatchError::ImageLoad { .. }));
    }

    #[test]
    fn test_load_scales_image() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("source.png");
        gradient(80, 40).save(&path).unwrap();

        let img = load_image(&path, 0.5).unwrap();
        assert_eq!(img.dimensions(), (40, 20));
    }

    #[test]
    fn test_color_image_size() {
        let color = to_color_image(&gradient(12, 5));
        assert_eq!(color.size, [12, 5]);
    }
}
