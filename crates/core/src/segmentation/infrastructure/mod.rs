pub mod json_threshold_file;
