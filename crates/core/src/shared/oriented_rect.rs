use imageproc::point::Point;

/// Rotated rectangle: center, size and rotation in degrees.
///
/// `width` runs along `(cos angle, sin angle)` and `height` along
/// `(-sin angle, cos angle)`, in image coordinates (y grows downward).
/// Rectangles fitted by `min_area_rect` keep `angle` in `(-90, 0]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedRect {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
    pub angle: f32,
}

impl OrientedRect {
    pub fn new(center: (f32, f32), width: f32, height: f32, angle: f32) -> Self {
        Self {
            center_x: center.0,
            center_y: center.1,
            width,
            height,
            angle,
        }
    }

    pub fn long_side(&self) -> f32 {
        self.width.max(self.height)
    }

    pub fn short_side(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Four corners in drawing order.
    ///
    /// At zero rotation: bottom-left, top-left, top-right, bottom-right.
    /// Consecutive corners share an edge, so `points[i] -> points[(i + 1) % 4]`
    /// traces the outline.
    pub fn points(&self) -> [Point<f32>; 4] {
        let rad = self.angle.to_radians();
        let b = rad.cos() * 0.5;
        let a = rad.sin() * 0.5;
        let (cx, cy) = (self.center_x, self.center_y);
        let p0 = Point::new(
            cx - a * self.height - b * self.width,
            cy + b * self.height - a * self.width,
        );
        let p1 = Point::new(
            cx + a * self.height - b * self.width,
            cy - b * self.height - a * self.width,
        );
        let p2 = Point::new(2.0 * cx - p0.x, 2.0 * cy - p0.y);
        let p3 = Point::new(2.0 * cx - p1.x, 2.0 * cy - p1.y);
        [p0, p1, p2, p3]
    }
}
