use crate::fingers::domain::contour_extractor::ContourExtractor;
use crate::shared::binary_mask::BinaryMask;
use crate::shared::error::InputError;

/// Contours with at most this many points do not count during the sweep.
pub const DEFAULT_SWEEP_MIN_POINTS: usize = 40;

/// Removes the palm from a hand mask, leaving only the finger blobs.
///
/// The mask is truncated one row at a time from the bottom up. While the cut
/// is still inside the palm the hand is one connected blob; once it passes
/// the webbing between the fingers the blob splits, and the number of
/// significant outer contours jumps. The row where that count first reaches
/// its maximum is taken as the palm/finger boundary.
#[derive(Clone, Copy, Debug)]
pub struct PalmRemover {
    min_contour_points: usize,
    wrist_band_rows: u32,
    extractor: ContourExtractor,
}

impl PalmRemover {
    /// `wrist_band_rows` bottom rows are blanked before the sweep starts.
    pub fn new(min_contour_points: usize, wrist_band_rows: u32) -> Self {
        Self {
            min_contour_points,
            wrist_band_rows,
            extractor: ContourExtractor::default(),
        }
    }

    /// Returns a copy of `mask` with everything from the boundary row down
    /// blanked. Masks without a boundary come back unchanged apart from the
    /// wrist band.
    pub fn remove_palm(&self, mask: &BinaryMask) -> Result<BinaryMask, InputError> {
        self.remove_palm_with_boundary(mask).map(|(fingers, _)| fingers)
    }

    /// First row of the blanked region, or `None` when the contour count
    /// never rises during the sweep.
    pub fn find_boundary(&self, mask: &BinaryMask) -> Option<u32> {
        self.remove_palm_with_boundary(mask)
            .ok()
            .and_then(|(_, boundary)| boundary)
    }

    /// [`PalmRemover::remove_palm`] and [`PalmRemover::find_boundary`] from a
    /// single sweep.
    pub fn remove_palm_with_boundary(
        &self,
        mask: &BinaryMask,
    ) -> Result<(BinaryMask, Option<u32>), InputError> {
        mask.validate()?;
        let mut output = self.without_wrist(mask);
        let boundary = self.sweep(&output);
        if let Some(row) = boundary {
            log::debug!("Palm boundary at row {row}");
            output.clear_rows_from(row);
        }
        Ok((output, boundary))
    }

    fn without_wrist(&self, mask: &BinaryMask) -> BinaryMask {
        let mut copy = mask.clone();
        if self.wrist_band_rows > 0 {
            copy.clear_rows_from(mask.height().saturating_sub(self.wrist_band_rows));
        }
        copy
    }

    fn sweep(&self, mask: &BinaryMask) -> Option<u32> {
        let top = mask.top_foreground_row()?;
        let mut working = mask.clone();
        let mut max_count = self.significant_count(&working);
        let mut max_row = None;

        for row in (top..mask.height()).rev() {
            // Clearing an empty row leaves the count where it was.
            if !working.row_has_foreground(row) {
                continue;
            }
            working.clear_row(row);
            let count = self.significant_count(&working);
            if count > max_count {
                max_count = count;
                max_row = Some(row);
            }
        }

        if max_row.is_none() {
            log::debug!("Contour count never rose above {max_count}; keeping mask");
        }
        // The row just above the split still carries the webbing.
        max_row.map(|row| row.saturating_sub(1))
    }

    fn significant_count(&self, mask: &BinaryMask) -> usize {
        self.extractor
            .external_contours(mask)
            .iter()
            .filter(|c| c.is_significant(self.min_contour_points))
            .count()
    }
}

impl Default for PalmRemover {
    fn default() -> Self {
        Self::new(DEFAULT_SWEEP_MIN_POINTS, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Rectangles keep only their corners, so synthetic shapes need a small
    // threshold to register as significant.
    const TEST_MIN_POINTS: usize = 3;

    fn remover() -> PalmRemover {
        PalmRemover::new(TEST_MIN_POINTS, 0)
    }

    /// Palm over rows 60..100, two fingers over rows 20..60 touching it.
    fn two_fingers_on_palm() -> BinaryMask {
        let mut mask = BinaryMask::new(80, 100);
        mask.fill_rect(10, 60, 70, 100);
        mask.fill_rect(15, 20, 29, 60);
        mask.fill_rect(45, 20, 59, 60);
        mask
    }

    fn blob_count(mask: &BinaryMask) -> usize {
        ContourExtractor::default().external_contours(mask).len()
    }

    // ── No boundary ──

    #[test]
    fn test_single_solid_blob_is_unchanged() {
        let mut mask = BinaryMask::new(40, 60);
        mask.fill_rect(5, 10, 35, 55);
        let remover = remover();
        assert_eq!(remover.find_boundary(&mask), None);
        assert_eq!(remover.remove_palm(&mask).unwrap(), mask);
    }

    #[test]
    fn test_blank_mask_is_unchanged() {
        let mask = BinaryMask::new(30, 30);
        assert_eq!(remover().find_boundary(&mask), None);
        assert_eq!(remover().remove_palm(&mask).unwrap(), mask);
    }

    #[test]
    fn test_already_separated_fingers_are_unchanged() {
        let mut mask = BinaryMask::new(60, 60);
        mask.fill_rect(5, 5, 20, 50);
        mask.fill_rect(35, 5, 50, 50);
        assert_eq!(remover().remove_palm(&mask).unwrap(), mask);
    }

    #[test]
    fn test_empty_mask_is_rejected() {
        let err = remover().remove_palm(&BinaryMask::new(0, 10)).unwrap_err();
        assert_eq!(
            err,
            InputError::EmptyMask {
                width: 0,
                height: 10
            }
        );
        assert_eq!(remover().find_boundary(&BinaryMask::new(0, 10)), None);
    }

    // ── Palm removal ──

    #[test]
    fn test_boundary_is_just_above_the_junction() {
        // Blanking row 60 splits the hand; one extra row goes with it.
        assert_eq!(remover().find_boundary(&two_fingers_on_palm()), Some(59));
    }

    #[test]
    fn test_two_fingers_survive_palm_removal() {
        let mask = two_fingers_on_palm();
        let out = remover().remove_palm(&mask).unwrap();

        assert_eq!(blob_count(&out), 2);
        for y in 59..100 {
            assert!(!out.row_has_foreground(y), "row {y} should be blank");
        }
        for y in 20..59 {
            assert!(out.is_foreground(20, y));
            assert!(out.is_foreground(50, y));
        }
        assert_eq!(out.width(), mask.width());
        assert_eq!(out.height(), mask.height());
    }

    #[test]
    fn test_single_sweep_matches_separate_calls() {
        let mask = two_fingers_on_palm();
        let (fingers, boundary) = remover().remove_palm_with_boundary(&mask).unwrap();
        assert_eq!(boundary, Some(59));
        assert_eq!(boundary, remover().find_boundary(&mask));
        assert_eq!(fingers, remover().remove_palm(&mask).unwrap());
    }

    #[test]
    fn test_plateau_keeps_lowest_row() {
        // The count stays at 2 for every row from the junction up to the
        // fingertips; the first row that reached it wins.
        let mut mask = two_fingers_on_palm();
        mask.fill_rect(15, 5, 29, 20);
        assert_eq!(remover().find_boundary(&mask), Some(59));
    }

    #[test]
    fn test_high_threshold_ignores_small_blobs() {
        let remover = PalmRemover::new(1_000, 0);
        let mask = two_fingers_on_palm();
        assert_eq!(remover.find_boundary(&mask), None);
        assert_eq!(remover.remove_palm(&mask).unwrap(), mask);
    }

    // ── Wrist band ──

    #[test]
    fn test_wrist_band_is_blanked() {
        let mut mask = BinaryMask::new(40, 100);
        mask.fill_rect(5, 10, 35, 100);
        let out = PalmRemover::new(TEST_MIN_POINTS, 30)
            .remove_palm(&mask)
            .unwrap();
        assert!(out.row_has_foreground(69));
        for y in 70..100 {
            assert!(!out.row_has_foreground(y));
        }
    }

    #[test]
    fn test_wrist_band_taller_than_mask_blanks_everything() {
        let mut mask = BinaryMask::new(20, 20);
        mask.fill_rect(0, 0, 20, 20);
        let out = PalmRemover::new(TEST_MIN_POINTS, 500)
            .remove_palm(&mask)
            .unwrap();
        assert!(out.is_blank());
    }

    #[test]
    fn test_fingers_joined_only_inside_wrist_band() {
        // The strip joining the two bars disappears with the band, so the
        // sweep starts from two blobs and never finds more.
        let mut mask = BinaryMask::new(60, 100);
        mask.fill_rect(5, 10, 20, 100);
        mask.fill_rect(35, 10, 50, 100);
        mask.fill_rect(5, 90, 50, 100);

        let remover = PalmRemover::new(TEST_MIN_POINTS, 20);
        assert_eq!(remover.find_boundary(&mask), None);
        let out = remover.remove_palm(&mask).unwrap();
        assert_eq!(blob_count(&out), 2);
        assert!(out.row_has_foreground(79));
        assert!(!out.row_has_foreground(80));
    }
}
