/// Sample rate expected by Whisper models.
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// Container extensions accepted for uploaded videos.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "wmv"];

/// Upload size ceiling: 200 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 200 * 1024 * 1024;
