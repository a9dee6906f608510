//! Fingertip region-of-interest extraction from hand video.
//!
//! Frames flow through [`pipeline::finger_pipeline::FingerPipeline`]:
//! skin segmentation, mask cleanup, palm removal, contour tracing and
//! fingertip rectangle estimation. The `video`, `rendering` and
//! `segmentation::infrastructure` modules hold the I/O around it.

pub mod shared;

pub mod segmentation {
    pub mod domain {
        pub mod hsv;
        pub mod mask_cleaner;
        pub mod skin_segmenter;
        pub mod threshold_source;
    }
    pub mod infrastructure;
}

pub mod fingers {
    pub mod domain {
        pub mod contour_extractor;
        pub mod finger_roi_estimator;
        pub mod min_area_rect;
        pub mod palm_remover;
    }
}

pub mod rendering {
    pub mod domain {
        pub mod frame_annotator;
    }
    pub mod infrastructure;
}

pub mod video {
    pub mod domain {
        pub mod frame_source;
        pub mod image_writer;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod extract_fingertips_use_case;
    pub mod finger_pipeline;
    pub mod pipeline_logger;
}
