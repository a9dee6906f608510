use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use imageproc::edges::canny;
use imageproc::point::Point;

use crate::shared::binary_mask::BinaryMask;
use crate::shared::contour::Contour;

pub const DEFAULT_CANNY_LOW: f32 = 100.0;
pub const DEFAULT_CANNY_HIGH: f32 = 200.0;

/// Fewer points than this cannot enclose an area.
pub const MIN_CONTOUR_POINTS: usize = 3;

/// Finds the outer boundaries of finger blobs.
///
/// Only top-level outer borders are kept: holes, and anything nested inside
/// a hole, are dropped. Each boundary is reduced to its direction-change
/// points.
#[derive(Clone, Copy, Debug)]
pub struct ContourExtractor {
    canny_low: f32,
    canny_high: f32,
}

impl ContourExtractor {
    pub fn new(canny_low: f32, canny_high: f32) -> Self {
        Self {
            canny_low,
            canny_high,
        }
    }

    /// Edge-detects the mask, then traces the outer contours of the edges.
    ///
    /// No size filtering happens here beyond dropping degenerate contours.
    pub fn extract(&self, mask: &BinaryMask) -> Vec<Contour> {
        if mask.validate().is_err() {
            return Vec::new();
        }
        let edges = canny(mask.as_image(), self.canny_low, self.canny_high);
        outer_contours(&edges)
            .into_iter()
            .filter(|c| c.len() >= MIN_CONTOUR_POINTS)
            .collect()
    }

    /// Outer contours of the mask itself, without edge detection.
    pub fn external_contours(&self, mask: &BinaryMask) -> Vec<Contour> {
        if mask.validate().is_err() {
            return Vec::new();
        }
        outer_contours(mask.as_image())
    }
}

impl Default for ContourExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_CANNY_LOW, DEFAULT_CANNY_HIGH)
    }
}

fn outer_contours(image: &GrayImage) -> Vec<Contour> {
    find_contours::<i32>(image)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| Contour::new(simplify_chain(&c.points)))
        .collect()
}

/// Keeps only the points where the boundary changes direction.
///
/// The chain is treated as closed, so the first point survives only if the
/// step into it differs from the step out of it.
pub fn simplify_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let mut chain: Vec<Point<i32>> = Vec::with_capacity(points.len());
    for &p in points {
        if chain.last() != Some(&p) {
            chain.push(p);
        }
    }
    while chain.len() > 1 && chain.first() == chain.last() {
        chain.pop();
    }

    let n = chain.len();
    if n < 3 {
        return chain;
    }
    (0..n)
        .filter(|&i| {
            let prev = chain[(i + n - 1) % n];
            let cur = chain[i];
            let next = chain[(i + 1) % n];
            (cur.x - prev.x, cur.y - prev.y) != (next.x - cur.x, next.y - cur.y)
        })
        .map(|i| chain[i])
        .collect()
}
