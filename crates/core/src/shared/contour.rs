use imageproc::point::Point;

/// Ordered outer-boundary points of one connected foreground region.
///
/// The point count doubles as a size/complexity measure: boundaries are
/// stored with only their direction-change points, so a blob with a ragged
/// outline has many more points than a clean rectangle of the same area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contour {
    points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point<i32>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the point count strictly exceeds `min_points`.
    pub fn is_significant(&self, min_points: usize) -> bool {
        !self.points.is_empty() && self.points.len() > min_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn square() -> Contour {
        Contour::new(vec![
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
        ])
    }

    #[rstest]
    #[case::below(5, false)]
    #[case::equal(4, false)]
    #[case::above(3, true)]
    fn test_significance_is_strict(#[case] min_points: usize, #[case] expected: bool) {
        assert_eq!(square().is_significant(min_points), expected);
    }

    #[test]
    fn test_empty_contour_never_significant() {
        let c = Contour::new(Vec::new());
        assert!(c.is_empty());
        assert!(!c.is_significant(0));
    }
}
