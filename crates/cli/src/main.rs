use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use fingertip_core::fingers::domain::contour_extractor::{
    ContourExtractor, DEFAULT_CANNY_HIGH, DEFAULT_CANNY_LOW,
};
use fingertip_core::fingers::domain::finger_roi_estimator::{
    FingerRoiEstimator, DEFAULT_MIN_ROI_POINTS,
};
use fingertip_core::fingers::domain::palm_remover::{PalmRemover, DEFAULT_SWEEP_MIN_POINTS};
use fingertip_core::pipeline::extract_fingertips_use_case::{
    ExtractFingertipsUseCase, ExtractOptions,
};
use fingertip_core::pipeline::finger_pipeline::FingerPipeline;
use fingertip_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use fingertip_core::rendering::infrastructure::outline_annotator::{
    OutlineAnnotator, DEFAULT_ROI_THICKNESS,
};
use fingertip_core::segmentation::domain::mask_cleaner::MaskCleaner;
use fingertip_core::segmentation::domain::threshold_source::{FixedThresholds, ThresholdSource};
use fingertip_core::segmentation::infrastructure::json_threshold_file::JsonThresholdFile;
use fingertip_core::shared::constants::DEFAULT_WRIST_BAND_ROWS;
use fingertip_core::shared::threshold_config::ThresholdConfig;
use fingertip_core::video::domain::frame_source::FrameSource;
use fingertip_core::video::infrastructure::image_file_source::ImageFileSource;
use fingertip_core::video::infrastructure::image_file_writer::ImageFileWriter;
use fingertip_core::video::infrastructure::image_sequence_source::{
    is_image_file, ImageSequenceSource,
};

/// Fingertip region-of-interest extraction from hand images and videos.
///
/// Writes one annotated frame per input frame (frame_NNNNN.png) into the
/// output directory.
#[derive(Parser, Debug)]
#[command(name = "fingertip")]
struct Cli {
    /// Input image, directory of images, or video file.
    input: PathBuf,

    /// Output directory.
    output: PathBuf,

    /// Lower hue bound (0-179).
    #[arg(long)]
    low_h: Option<u8>,

    /// Upper hue bound (0-179).
    #[arg(long)]
    high_h: Option<u8>,

    /// Lower saturation bound (0-255).
    #[arg(long)]
    low_s: Option<u8>,

    /// Upper saturation bound (0-255).
    #[arg(long)]
    high_s: Option<u8>,

    /// Lower value bound (0-255).
    #[arg(long)]
    low_v: Option<u8>,

    /// Upper value bound (0-255).
    #[arg(long)]
    high_v: Option<u8>,

    /// JSON threshold file, re-read whenever it changes during the run.
    #[arg(long)]
    thresholds: Option<PathBuf>,

    /// Minimum contour points counted by the palm-removal sweep.
    #[arg(long, default_value_t = DEFAULT_SWEEP_MIN_POINTS)]
    sweep_min_points: usize,

    /// Minimum contour points for a fingertip ROI.
    #[arg(long, default_value_t = DEFAULT_MIN_ROI_POINTS)]
    roi_min_points: usize,

    /// Bottom rows blanked before palm removal (wrist suppression).
    #[arg(long, default_value_t = DEFAULT_WRIST_BAND_ROWS)]
    wrist_band: u32,

    /// Also write the palm-removed mask of every frame (mask_NNNNN.png).
    #[arg(long)]
    save_masks: bool,

    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<usize>,
}

impl Cli {
    fn has_threshold_flags(&self) -> bool {
        [
            self.low_h,
            self.high_h,
            self.low_s,
            self.high_s,
            self.low_v,
            self.high_v,
        ]
        .iter()
        .any(Option::is_some)
    }

    /// Threshold flags layered over the default range.
    fn threshold_config(&self) -> ThresholdConfig {
        let d = ThresholdConfig::default();
        ThresholdConfig {
            low_h: self.low_h.unwrap_or(d.low_h),
            high_h: self.high_h.unwrap_or(d.high_h),
            low_s: self.low_s.unwrap_or(d.low_s),
            high_s: self.high_s.unwrap_or(d.high_s),
            low_v: self.low_v.unwrap_or(d.low_v),
            high_v: self.high_v.unwrap_or(d.high_v),
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let thresholds: Box<dyn ThresholdSource> = match &cli.thresholds {
        Some(path) => Box::new(JsonThresholdFile::open(path)?),
        None => Box::new(FixedThresholds(cli.threshold_config())),
    };
    let pipeline = FingerPipeline::new(
        MaskCleaner::default(),
        PalmRemover::new(cli.sweep_min_points, cli.wrist_band),
        ContourExtractor::new(DEFAULT_CANNY_LOW, DEFAULT_CANNY_HIGH),
        FingerRoiEstimator::new(cli.roi_min_points),
    );
    let options = ExtractOptions {
        save_masks: cli.save_masks,
        max_frames: cli.max_frames,
        ..ExtractOptions::default()
    };

    let mut use_case = ExtractFingertipsUseCase::new(
        open_source(&cli.input)?,
        Box::new(ImageFileWriter::new()),
        Box::new(OutlineAnnotator::new(DEFAULT_ROI_THICKNESS)),
        thresholds,
        Box::new(StdoutPipelineLogger::default()),
        pipeline,
        options,
    );
    let summary = use_case.execute(&cli.input, &cli.output)?;

    log::info!(
        "Fingertips found in {}/{} frames; output written to {}",
        summary.frames_with_rois,
        summary.frames_read,
        cli.output.display()
    );
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input not found: {}", cli.input.display()).into());
    }
    if cli.output.is_file() {
        return Err(format!(
            "Output must be a directory, got file {}",
            cli.output.display()
        )
        .into());
    }
    if cli.thresholds.is_some() && cli.has_threshold_flags() {
        return Err("--thresholds cannot be combined with --low-*/--high-* flags".into());
    }
    cli.threshold_config().validate()?;
    if cli.max_frames == Some(0) {
        return Err("--max-frames must be at least 1".into());
    }
    Ok(())
}

fn open_source(input: &Path) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    if input.is_dir() {
        Ok(Box::new(ImageSequenceSource::new()))
    } else if is_image_file(input) {
        Ok(Box::new(ImageFileSource::new()))
    } else {
        open_video_source()
    }
}

#[cfg(feature = "ffmpeg")]
fn open_video_source() -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    use fingertip_core::video::infrastructure::ffmpeg_frame_source::FfmpegFrameSource;
    Ok(Box::new(FfmpegFrameSource::new()))
}

#[cfg(not(feature = "ffmpeg"))]
fn open_video_source() -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    Err("Video input requires building with the `ffmpeg` feature".into())
}
