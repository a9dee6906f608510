use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::pipeline::finger_pipeline::FingerPipeline;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::rendering::domain::frame_annotator::FrameAnnotator;
use crate::segmentation::domain::threshold_source::ThresholdSource;
use crate::shared::constants::{ANNOTATED_FRAME_PREFIX, MASK_FRAME_PREFIX};
use crate::video::domain::frame_source::FrameSource;
use crate::video::domain::image_writer::ImageWriter;

/// Knobs for one extraction run.
#[derive(Clone, Debug)]
pub struct ExtractOptions {
    /// Also write the palm-removed mask of every frame.
    pub save_masks: bool,
    /// Stop after this many frames.
    pub max_frames: Option<usize>,
    /// Checked between frames; a frame in progress always completes.
    pub cancelled: Arc<AtomicBool>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            save_masks: false,
            max_frames: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_read: usize,
    pub frames_processed: usize,
    pub frames_failed: usize,
    pub frames_with_rois: usize,
    pub total_rois: usize,
    pub cancelled: bool,
}

/// Runs the fingertip pipeline over every frame of a source:
/// read → thresholds → analyse → annotate → write.
///
/// A frame the pipeline rejects is logged and counted, and the run moves on.
/// Errors from the source, the annotator or the writer end the run.
pub struct ExtractFingertipsUseCase {
    source: Box<dyn FrameSource>,
    writer: Box<dyn ImageWriter>,
    annotator: Box<dyn FrameAnnotator>,
    thresholds: Box<dyn ThresholdSource>,
    logger: Box<dyn PipelineLogger>,
    pipeline: FingerPipeline,
    options: ExtractOptions,
}

impl ExtractFingertipsUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        writer: Box<dyn ImageWriter>,
        annotator: Box<dyn FrameAnnotator>,
        thresholds: Box<dyn ThresholdSource>,
        logger: Box<dyn PipelineLogger>,
        pipeline: FingerPipeline,
        options: ExtractOptions,
    ) -> Self {
        Self {
            source,
            writer,
            annotator,
            thresholds,
            logger,
            pipeline,
            options,
        }
    }

    pub fn execute(
        &mut self,
        input_path: &Path,
        output_dir: &Path,
    ) -> Result<RunSummary, Box<dyn std::error::Error>> {
        let metadata = self.source.open(input_path)?;
        let total = match self.options.max_frames {
            Some(max) if metadata.total_frames > 0 => max.min(metadata.total_frames),
            Some(max) => max,
            None => metadata.total_frames,
        };
        self.logger.info(&format!(
            "Input {}: {}x{}, {} frames",
            input_path.display(),
            metadata.width,
            metadata.height,
            metadata.total_frames
        ));

        let mut summary = RunSummary::default();
        for result in self.source.frames() {
            if self.options.cancelled.load(Ordering::Relaxed) {
                summary.cancelled = true;
                break;
            }
            if self
                .options
                .max_frames
                .is_some_and(|max| summary.frames_read >= max)
            {
                break;
            }

            let mut frame = result?;
            summary.frames_read += 1;

            let cfg = self.thresholds.current();
            match self
                .pipeline
                .process_logged(&frame, &cfg, self.logger.as_mut())
            {
                Ok(analysis) => {
                    summary.frames_processed += 1;
                    summary.total_rois += analysis.rois.len();
                    if !analysis.rois.is_empty() {
                        summary.frames_with_rois += 1;
                    }

                    self.annotator
                        .annotate(&mut frame, &analysis.contours, &analysis.rois)?;
                    let index = frame.index();
                    self.writer.write_frame(
                        &output_path(output_dir, ANNOTATED_FRAME_PREFIX, index),
                        &frame,
                    )?;
                    if self.options.save_masks {
                        self.writer.write_mask(
                            &output_path(output_dir, MASK_FRAME_PREFIX, index),
                            &analysis.finger_mask,
                        )?;
                    }
                }
                Err(e) => {
                    log::warn!("Skipping frame {}: {e}", frame.index());
                    summary.frames_failed += 1;
                }
            }

            self.logger.progress(summary.frames_read, total);
        }
        self.source.close();

        if summary.cancelled {
            self.logger.info("Cancelled");
        }
        self.logger.info(&format!(
            "{} frames processed, {} skipped, {} fingertip ROIs",
            summary.frames_processed, summary.frames_failed, summary.total_rois
        ));
        self.logger.summary();
        Ok(summary)
    }
}

/// `<dir>/<prefix>_NNNNN.png`
pub fn output_path(dir: &Path, prefix: &str, index: usize) -> PathBuf {
    dir.join(format!("{prefix}_{index:05}.png"))
}
