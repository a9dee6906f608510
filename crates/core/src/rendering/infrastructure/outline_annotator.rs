use image::{ImageBuffer, Rgb};
use imageproc::drawing::draw_line_segment_mut;

use crate::rendering::domain::frame_annotator::FrameAnnotator;
use crate::shared::contour::Contour;
use crate::shared::frame::Frame;
use crate::shared::oriented_rect::OrientedRect;

pub const CONTOUR_COLOR: [u8; 3] = [255, 255, 0];
pub const ROI_COLOR: [u8; 3] = [255, 0, 0];
pub const DEFAULT_ROI_THICKNESS: u32 = 2;

/// Outlines contours (1 px) and fingertip ROIs onto an RGB frame in place.
///
/// Thicker ROI outlines grow inward, one nested rectangle per pixel of
/// thickness. Anything falling outside the frame is clipped.
pub struct OutlineAnnotator {
    roi_thickness: u32,
}

impl OutlineAnnotator {
    pub fn new(roi_thickness: u32) -> Self {
        Self {
            roi_thickness: roi_thickness.max(1),
        }
    }
}

impl Default for OutlineAnnotator {
    fn default() -> Self {
        Self::new(DEFAULT_ROI_THICKNESS)
    }
}

impl FrameAnnotator for OutlineAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        contours: &[Contour],
        rois: &[OrientedRect],
    ) -> Result<(), Box<dyn std::error::Error>> {
        frame.validate()?;
        let (width, height) = (frame.width(), frame.height());
        let mut canvas =
            ImageBuffer::<Rgb<u8>, &mut [u8]>::from_raw(width, height, frame.data_mut())
                .ok_or("frame buffer does not match its dimensions")?;

        for contour in contours {
            let pts = contour.points();
            for (i, a) in pts.iter().enumerate() {
                let b = pts[(i + 1) % pts.len()];
                draw_line_segment_mut(
                    &mut canvas,
                    (a.x as f32, a.y as f32),
                    (b.x as f32, b.y as f32),
                    Rgb(CONTOUR_COLOR),
                );
            }
        }

        for roi in rois {
            for inset in 0..self.roi_thickness {
                let shrink = 2.0 * inset as f32;
                if roi.width <= shrink || roi.height <= shrink {
                    break;
                }
                let ring = OrientedRect::new(
                    (roi.center_x, roi.center_y),
                    roi.width - shrink,
                    roi.height - shrink,
                    roi.angle,
                );
                let corners = ring.points();
                for i in 0..corners.len() {
                    let (a, b) = (corners[i], corners[(i + 1) % corners.len()]);
                    draw_line_segment_mut(&mut canvas, (a.x, a.y), (b.x, b.y), Rgb(ROI_COLOR));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::point::Point;

    fn black_frame(w: u32, h: u32) -> Frame {
        Frame::new(vec![0; (w * h * 3) as usize], w, h, 3, 0)
    }

    fn pixel(frame: &Frame, x: u32, y: u32) -> [u8; 3] {
        let i = ((y * frame.width() + x) * 3) as usize;
        [frame.data()[i], frame.data()[i + 1], frame.data()[i + 2]]
    }

    #[test]
    fn test_contour_is_outlined_in_yellow() {
        let mut frame = black_frame(20, 20);
        let square = Contour::new(vec![
            Point::new(5, 5),
            Point::new(10, 5),
            Point::new(10, 10),
            Point::new(5, 10),
        ]);
        OutlineAnnotator::default()
            .annotate(&mut frame, &[square], &[])
            .unwrap();

        assert_eq!(pixel(&frame, 7, 5), CONTOUR_COLOR);
        assert_eq!(pixel(&frame, 5, 8), CONTOUR_COLOR);
        assert_eq!(pixel(&frame, 7, 7), [0, 0, 0]);
    }

    #[test]
    fn test_roi_is_outlined_in_red() {
        let mut frame = black_frame(40, 40);
        let roi = OrientedRect::new((20.0, 20.0), 10.0, 16.0, 0.0);
        OutlineAnnotator::new(1)
            .annotate(&mut frame, &[], &[roi])
            .unwrap();

        assert_eq!(pixel(&frame, 15, 20), ROI_COLOR);
        assert_eq!(pixel(&frame, 25, 20), ROI_COLOR);
        assert_eq!(pixel(&frame, 20, 12), ROI_COLOR);
        assert_eq!(pixel(&frame, 20, 20), [0, 0, 0]);
    }

    #[test]
    fn test_thick_roi_grows_inward() {
        let mut frame = black_frame(40, 40);
        let roi = OrientedRect::new((20.0, 20.0), 10.0, 16.0, 0.0);
        OutlineAnnotator::new(2)
            .annotate(&mut frame, &[], &[roi])
            .unwrap();

        assert_eq!(pixel(&frame, 15, 20), ROI_COLOR);
        assert_eq!(pixel(&frame, 16, 20), ROI_COLOR);
        assert_eq!(pixel(&frame, 14, 20), [0, 0, 0]);
    }

    #[test]
    fn test_out_of_bounds_roi_is_clipped() {
        let mut frame = black_frame(16, 16);
        let roi = OrientedRect::new((0.0, 0.0), 30.0, 50.0, 30.0);
        OutlineAnnotator::default()
            .annotate(&mut frame, &[], &[roi])
            .unwrap();
        assert_eq!(frame.data().len(), 16 * 16 * 3);
    }

    #[test]
    fn test_nothing_to_draw_leaves_frame_untouched() {
        let mut frame = black_frame(8, 8);
        OutlineAnnotator::default()
            .annotate(&mut frame, &[], &[])
            .unwrap();
        assert!(frame.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_malformed_frame_is_rejected() {
        let mut frame = Frame::from_raw_unchecked(vec![0; 5], 4, 4, 3, 0);
        assert!(OutlineAnnotator::default()
            .annotate(&mut frame, &[], &[])
            .is_err());
    }
}
