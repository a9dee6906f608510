use crate::shared::contour::Contour;
use crate::shared::frame::Frame;
use crate::shared::oriented_rect::OrientedRect;

/// Draws a frame's analysis results onto the frame for display or export.
pub trait FrameAnnotator: Send {
    fn annotate(
        &self,
        frame: &mut Frame,
        contours: &[Contour],
        rois: &[OrientedRect],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
