use std::path::Path;

use thiserror::Error;

use crate::shared::constants::{MAX_UPLOAD_BYTES, VIDEO_EXTENSIONS};

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("file too large: {size} bytes exceeds the {limit} byte limit")]
    Oversize { size: u64, limit: u64 },
    #[error("unsupported container extension: {0}")]
    UnsupportedExtension(String),
    #[error("filename has no extension: {0}")]
    MissingExtension(String),
}

/// An uploaded video held in memory: raw bytes plus the caller-declared
/// filename and size.
///
/// The declared size normally matches `bytes.len()`, but validation works
/// off the declared value so oversize inputs can be rejected before the
/// bytes are ever staged to disk.
#[derive(Clone, Debug)]
pub struct VideoUpload {
    bytes: Vec<u8>,
    filename: String,
    size: u64,
}

impl VideoUpload {
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        let size = bytes.len() as u64;
        Self {
            bytes,
            filename: filename.into(),
            size,
        }
    }

    /// Construct with an explicitly declared size, which may differ from
    /// the buffered byte count (e.g. a host that streams uploads).
    pub fn from_parts(bytes: Vec<u8>, filename: impl Into<String>, size: u64) -> Self {
        Self {
            bytes,
            filename: filename.into(),
            size,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// The lowercased filename extension, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    /// Admission check: size ceiling first, then the container allowlist.
    /// Must pass before any staged file is created.
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.size > MAX_UPLOAD_BYTES {
            return Err(UploadError::Oversize {
                size: self.size,
                limit: MAX_UPLOAD_BYTES,
            });
        }
        match self.extension() {
            Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            Some(ext) => Err(UploadError::UnsupportedExtension(ext)),
            None => Err(UploadError::MissingExtension(self.filename.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("clip.mp4")]
    #[case("clip.avi")]
    #[case("clip.mov")]
    #[case("clip.mkv")]
    #[case("clip.wmv")]
    #[case("CLIP.MP4")]
    fn test_validate_accepts_allowed_extensions(#[case] filename: &str) {
        let upload = VideoUpload::new(vec![0u8; 16], filename);
        assert!(upload.validate().is_ok());
    }

    #[rstest]
    #[case("notes.txt")]
    #[case("clip.webm")]
    #[case("sound.wav")]
    fn test_validate_rejects_other_extensions(#[case] filename: &str) {
        let upload = VideoUpload::new(vec![0u8; 16], filename);
        assert!(matches!(
            upload.validate(),
            Err(UploadError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn test_validate_rejects_missing_extension() {
        let upload = VideoUpload::new(vec![0u8; 16], "clip");
        assert!(matches!(
            upload.validate(),
            Err(UploadError::MissingExtension(_))
        ));
    }

    #[test]
    fn test_validate_rejects_oversize() {
        let upload = VideoUpload::from_parts(Vec::new(), "big.mp4", 250 * 1024 * 1024);
        match upload.validate() {
            Err(UploadError::Oversize { size, limit }) => {
                assert_eq!(size, 250 * 1024 * 1024);
                assert_eq!(limit, MAX_UPLOAD_BYTES);
            }
            other => panic!("expected Oversize, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_accepts_exactly_at_ceiling() {
        let upload = VideoUpload::from_parts(Vec::new(), "clip.mp4", MAX_UPLOAD_BYTES);
        assert!(upload.validate().is_ok());
    }

    #[test]
    fn test_oversize_checked_before_extension() {
        let upload = VideoUpload::from_parts(Vec::new(), "big.txt", MAX_UPLOAD_BYTES + 1);
        assert!(matches!(upload.validate(), Err(UploadError::Oversize { .. })));
    }

    #[test]
    fn test_size_tracks_byte_count() {
        let upload = VideoUpload::new(vec![0u8; 1024], "clip.mp4");
        assert_eq!(upload.size(), 1024);
        assert_eq!(upload.bytes().len(), 1024);
    }

    #[test]
    fn test_extension_is_lowercased() {
        let upload = VideoUpload::new(Vec::new(), "Holiday.MOV");
        assert_eq!(upload.extension().as_deref(), Some("mov"));
    }
}
