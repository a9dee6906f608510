use imageproc::point::Point;

use crate::fingers::domain::min_area_rect::min_area_rect;
use crate::shared::contour::Contour;
use crate::shared::oriented_rect::OrientedRect;

/// Contours at or below this point count are treated as noise.
pub const DEFAULT_MIN_ROI_POINTS: usize = 80;
/// Length of the fingertip ROI relative to the finger's width.
pub const TIP_EXPANSION: f32 = 1.6;
/// Fraction of the center-to-tip offset the ROI center moves by.
pub const TIP_SHIFT: f32 = 2.0 / 3.0;

/// Turns finger contours into fingertip regions of interest.
///
/// The minimum-area rectangle of a palm-free finger stub is pushed toward
/// the stub's far end and stretched to 1.6 finger-widths along the finger,
/// so it covers the tip even when the contour stops a little short of it.
#[derive(Clone, Copy, Debug)]
pub struct FingerRoiEstimator {
    min_points: usize,
}

impl FingerRoiEstimator {
    pub fn new(min_points: usize) -> Self {
        Self { min_points }
    }

    /// One ROI per contour with more than `min_points` points, in input order.
    pub fn estimate(&self, contours: &[Contour]) -> Vec<OrientedRect> {
        contours
            .iter()
            .filter(|c| c.is_significant(self.min_points))
            .filter_map(|c| min_area_rect(c.points()))
            .map(|rect| project_to_tip(&rect))
            .collect()
    }
}

impl Default for FingerRoiEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ROI_POINTS)
    }
}

/// Midpoint of the rectangle edge the finger tip is assumed to lie on.
///
/// With the `(-90, 0]` angle range of [`min_area_rect`], that edge faces
/// upward for any finger within 90 degrees of vertical.
pub fn tip_midpoint(rect: &OrientedRect) -> Point<f32> {
    let [_, p1, p2, p3] = rect.points();
    let (a, b) = if rect.height > rect.width {
        (p1, p2)
    } else {
        (p2, p3)
    };
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Shifts `rect` toward its tip-ward edge and resizes it along the finger.
pub fn project_to_tip(rect: &OrientedRect) -> OrientedRect {
    let tip = tip_midpoint(rect);
    let center_x = rect.center_x + (tip.x - rect.center_x) * TIP_SHIFT;
    let center_y = rect.center_y + (tip.y - rect.center_y) * TIP_SHIFT;

    let (width, height) = if rect.height > rect.width {
        (rect.width, TIP_EXPANSION * rect.width)
    } else {
        (TIP_EXPANSION * rect.height, rect.height)
    };

    OrientedRect::new((center_x, center_y), width, height, rect.angle)
}
