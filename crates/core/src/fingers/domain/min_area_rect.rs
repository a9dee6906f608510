//! Minimum-area enclosing rectangle of a point set.
//!
//! The optimal rectangle has one side collinear with an edge of the convex
//! hull, so it is enough to try every hull edge as a base direction and
//! project the hull onto that edge and its normal.

use imageproc::geometry::convex_hull;
use imageproc::point::Point;

use crate::shared::oriented_rect::OrientedRect;

/// Smallest-area rotated rectangle enclosing `points`.
///
/// The angle is normalized to `(-90, 0]` degrees, so the edge from `p1` to
/// `p2` always faces up or up-left and the one from `p2` to `p3` faces right
/// or up-right. Returns `None` for an empty point set; a single point yields
/// a zero-sized rectangle.
pub fn min_area_rect(points: &[Point<i32>]) -> Option<OrientedRect> {
    let mut unique = points.to_vec();
    unique.sort_by_key(|p| (p.x, p.y));
    unique.dedup();
    let hull = convex_hull(unique.as_slice());
    match hull.len() {
        0 => return None,
        1 => {
            let p = hull[0];
            return Some(OrientedRect::new((p.x as f32, p.y as f32), 0.0, 0.0, 0.0));
        }
        _ => {}
    }

    let n = hull.len();
    let mut best: Option<(f64, OrientedRect)> = None;
    for i in 0..n {
        let a = hull[i];
        let b = hull[(i + 1) % n];
        let (dx, dy) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
        let len = dx.hypot(dy);
        if len == 0.0 {
            continue;
        }
        let (ux, uy) = (dx / len, dy / len);
        let (vx, vy) = (-uy, ux);

        let (mut min_u, mut max_u) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_v, mut max_v) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &hull {
            let (px, py) = ((p.x - a.x) as f64, (p.y - a.y) as f64);
            let pu = px * ux + py * uy;
            let pv = px * vx + py * vy;
            min_u = min_u.min(pu);
            max_u = max_u.max(pu);
            min_v = min_v.min(pv);
            max_v = max_v.max(pv);
        }

        let width = max_u - min_u;
        let height = max_v - min_v;
        let area = width * height;
        if best.as_ref().is_some_and(|(best_area, _)| area >= *best_area) {
            continue;
        }

        let mid_u = (min_u + max_u) / 2.0;
        let mid_v = (min_v + max_v) / 2.0;
        let cx = a.x as f64 + ux * mid_u + vx * mid_v;
        let cy = a.y as f64 + uy * mid_u + vy * mid_v;
        best = Some((area, normalized(cx, cy, width, height, dy.atan2(dx).to_degrees())));
    }

    best.map(|(_, rect)| rect)
}

/// Folds the edge angle into `(-90, 0]`, swapping sides on a quarter turn.
fn normalized(cx: f64, cy: f64, width: f64, height: f64, angle_deg: f64) -> OrientedRect {
    let angle = angle_deg.rem_euclid(180.0);
    let (angle, w, h) = if angle == 0.0 {
        (0.0, width, height)
    } else if angle <= 90.0 {
        (angle - 90.0, height, width)
    } else {
        (angle - 180.0, width, height)
    };
    OrientedRect::new((cx as f32, cy as f32), w as f32, h as f32, angle as f32)
}
