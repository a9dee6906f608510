use std::time::Instant;

use crate::fingers::domain::contour_extractor::ContourExtractor;
use crate::fingers::domain::finger_roi_estimator::FingerRoiEstimator;
use crate::fingers::domain::palm_remover::PalmRemover;
use crate::pipeline::pipeline_logger::{NullPipelineLogger, PipelineLogger};
use crate::segmentation::domain::mask_cleaner::MaskCleaner;
use crate::segmentation::domain::skin_segmenter::SkinSegmenter;
use crate::shared::binary_mask::BinaryMask;
use crate::shared::contour::Contour;
use crate::shared::error::InputError;
use crate::shared::frame::Frame;
use crate::shared::oriented_rect::OrientedRect;
use crate::shared::threshold_config::ThresholdConfig;

/// Everything the pipeline derived from one frame.
#[derive(Clone, Debug)]
pub struct FrameAnalysis {
    pub frame_index: usize,
    pub skin_mask: BinaryMask,
    pub cleaned_mask: BinaryMask,
    pub finger_mask: BinaryMask,
    pub boundary_row: Option<u32>,
    pub contours: Vec<Contour>,
    pub rois: Vec<OrientedRect>,
}

/// Frame → fingertip ROIs: segment, clean, remove palm, trace, estimate.
///
/// Holds only stage parameters, so one instance can process any number of
/// frames in any order.
#[derive(Clone, Copy, Debug, Default)]
pub struct FingerPipeline {
    segmenter: SkinSegmenter,
    cleaner: MaskCleaner,
    palm_remover: PalmRemover,
    extractor: ContourExtractor,
    estimator: FingerRoiEstimator,
}

impl FingerPipeline {
    pub fn new(
        cleaner: MaskCleaner,
        palm_remover: PalmRemover,
        extractor: ContourExtractor,
        estimator: FingerRoiEstimator,
    ) -> Self {
        Self {
            segmenter: SkinSegmenter::new(),
            cleaner,
            palm_remover,
            extractor,
            estimator,
        }
    }

    pub fn process(
        &self,
        frame: &Frame,
        cfg: &ThresholdConfig,
    ) -> Result<FrameAnalysis, InputError> {
        self.process_logged(frame, cfg, &mut NullPipelineLogger)
    }

    /// Same as [`FingerPipeline::process`], reporting per-stage timings and
    /// result counts to `logger`.
    pub fn process_logged(
        &self,
        frame: &Frame,
        cfg: &ThresholdConfig,
        logger: &mut dyn PipelineLogger,
    ) -> Result<FrameAnalysis, InputError> {
        let t = Instant::now();
        let skin_mask = self.segmenter.segment(frame, cfg)?;
        logger.timing("segment", elapsed_ms(t));

        let t = Instant::now();
        let cleaned_mask = self.cleaner.clean(&skin_mask)?;
        logger.timing("clean", elapsed_ms(t));

        let t = Instant::now();
        let (finger_mask, boundary_row) =
            self.palm_remover.remove_palm_with_boundary(&cleaned_mask)?;
        logger.timing("palm", elapsed_ms(t));

        let t = Instant::now();
        let contours = self.extractor.extract(&finger_mask);
        logger.timing("contours", elapsed_ms(t));

        let t = Instant::now();
        let rois = self.estimator.estimate(&contours);
        logger.timing("roi", elapsed_ms(t));

        logger.metric("contours", contours.len() as f64);
        logger.metric("rois", rois.len() as f64);
        log::debug!(
            "frame {}: boundary {:?}, {} contours, {} ROIs",
            frame.index(),
            boundary_row,
            contours.len(),
            rois.len()
        );

        Ok(FrameAnalysis {
            frame_index: frame.index(),
            skin_mask,
            cleaned_mask,
            finger_mask,
            boundary_row,
            contours,
            rois,
        })
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
