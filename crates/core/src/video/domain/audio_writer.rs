use crate::audio::domain::audio_segment::AudioSegment;
use std::path::Path;

/// Domain interface for serializing extracted audio to a standalone file.
pub trait AudioWriter: Send {
    /// Encode the AudioSegment to `dest`, in the container implied by the
    /// destination's extension.
    fn write_audio(&self, dest: &Path, audio: &AudioSegment)
        -> Result<(), Box<dyn std::error::Error>>;
}
