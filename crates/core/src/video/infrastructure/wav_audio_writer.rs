use std::path::Path;

use crate::audio::domain::audio_segment::AudioSegment;
use crate::video::domain::audio_writer::AudioWriter;

/// Serializes an AudioSegment to a standalone 16-bit PCM WAV file.
pub struct WavAudioWriter;

impl AudioWriter for WavAudioWriter {
    fn write_audio(
        &self,
        dest: &Path,
        audio: &AudioSegment,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let spec = hound::WavSpec {
            channels: audio.channels(),
            sample_rate: audio.sample_rate(),
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(dest, spec)?;
        for &sample in audio.samples() {
            let quantized = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer.write_sample(quantized)?;
        }
        writer.finalize()?;
        Ok(())
    }
}
