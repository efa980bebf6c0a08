// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module converts click coordinates into crop rectangles and decides
//! whether a crop around a click fits inside the image.

/// A crop rectangle in pixel coordinates. `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Outcome of resolving a click against the image bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Accepted(CropRect),
    /// The clipped crop would have been `width` x `height`.
    Rejected { width: u32, height: u32 },
}

/// Resolve a click at `(x, y)` into a crop of `2 * half_size` pixels square.
///
/// The candidate `[y-h, y+h) x [x-h, x+h)` is clipped to the image. Anything
/// that loses pixels to an edge is rejected instead of padded, so every
/// accepted crop has exactly the full patch size.
pub fn resolve(x: u32, y: u32, half_size: u32, width: u32, height: u32) -> Resolution {
    let (left, right) = clip_span(x, half_size, width);
    let (top, bottom) = clip_span(y, half_size, height);

    let clipped_width = right - left;
    let clipped_height = bottom - top;
    let full = 2 * half_size as u64;

    if clipped_width as u64 >= full && clipped_height as u64 >= full {
        Resolution::Accepted(CropRect {
            left,
            top,
            right,
            bottom,
        })
    } else {
        Resolution::Rejected {
            width: clipped_width,
            height: clipped_height,
        }
    }
}

/// Inclusive corners of the marker drawn around an accepted crop.
pub fn marker_bounds(rect: &CropRect) -> ((i32, i32), (i32, i32)) {
    (
        (rect.left as i32, rect.top as i32),
        (rect.right as i32, rect.bottom as i32),
    )
}

fn clip_span(center: u32, half: u32, limit: u32) -> (u32, u32) {
    let lo = center.saturating_sub(half).min(limit);
    let hi = center.saturating_add(half).min(limit);
    (lo, hi.max(lo))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted(res: Resolution) -> bool {
        matches!(res, Resolution::Accepted(_))
    }

    #[test]
    fn test_center_click_is_accepted() {
        let res = resolve(500, 500, 16, 1000, 1000);
        match res {
            Resolution::Accepted(rect) => {
                assert_eq!(rect.width(), 32);
                assert_eq!(rect.height(), 32);
                assert_eq!((rect.left, rect.top), (484, 484));
            }
            Resolution::Rejected { .. } => panic!("center click rejected"),
        }
    }

    #[test]
    fn test_corner_click_is_rejected() {
        let res = resolve(5, 5, 16, 1000, 1000);
        assert_eq!(res, Resolution::Rejected { width: 21, height: 21 });
    }

    #[test]
    fn test_edge_boundaries() {
        let (w, h, half) = (200, 100, 16);

        // Exactly half_size away from every edge is still a full crop
        assert!(accepted(resolve(half, half, half, w, h)));
        assert!(accepted(resolve(w - half, h - half, half, w, h)));

        // One pixel closer loses a row or column
        assert!(!accepted(resolve(half - 1, 50, half, w, h)));
        assert!(!accepted(resolve(100, half - 1, half, w, h)));
        assert!(!accepted(resolve(w - half + 1, 50, half, w, h)));
        assert!(!accepted(resolve(100, h - half + 1, half, w, h)));
    }

    #[test]
    fn test_truncated_in_one_dimension_is_rejected() {
        // Full height but only partially wide: no padding, whole crop rejected
        let res = resolve(10, 50, 16, 200, 100);
        assert_eq!(res, Resolution::Rejected { width: 26, height: 32 });
    }

    #[test]
    fn test_acceptance_matches_distance_rule() {
        let (w, h, half) = (64u32, 48u32, 8u32);
        for y in 0..=h + 2 {
            for x in 0..=w + 2 {
                let expected = half <= y && y <= h - half && half <= x && x <= w - half;
                let res = resolve(x, y, half, w, h);
                assert_eq!(accepted(res), expected, "click ({}, {})", x, y);
                if let Resolution::Accepted(rect) = res {
                    assert_eq!((rect.width(), rect.height()), (2 * half, 2 * half));
                }
            }
        }
    }

    #[test]
    fn test_click_outside_image_is_rejected() {
        assert_eq!(
            resolve(500, 20, 16, 100, 100),
            Resolution::Rejected { width: 0, height: 32 }
        );
    }

    #[test]
    fn test_marker_bounds_are_inclusive_around_click() {
        if let Resolution::Accepted(rect) = resolve(40, 30, 10, 100, 100) {
            assert_eq!(marker_bounds(&rect), ((30, 20), (50, 40)));
        } else {
            panic!("expected accepted crop");
        }
    }
}
