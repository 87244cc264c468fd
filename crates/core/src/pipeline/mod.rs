pub mod pipeline_logger;
pub mod report;
pub mod transcribe_video_use_case;
