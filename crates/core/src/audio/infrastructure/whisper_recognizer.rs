use std::path::Path;
use std::sync::Arc;

use whisper_rs::{FullParams, SamplingStrategy};

use crate::audio::domain::model_size::ModelSize;
use crate::audio::domain::speech_recognizer::SpeechRecognizer;
use crate::audio::infrastructure::model_registry::ModelRegistry;

/// Speech recognizer using whisper.cpp via whisper-rs.
///
/// Holds the model size selector and a shared [`ModelRegistry`]; the
/// context is acquired from the registry on first transcription (cached
/// thereafter) so constructing the recognizer is cheap.
pub struct WhisperRecognizer {
    registry: Arc<ModelRegistry>,
    size: ModelSize,
}

impl WhisperRecognizer {
    pub fn new(registry: Arc<ModelRegistry>, size: ModelSize) -> Self {
        Self { registry, size }
    }

    pub fn size(&self) -> ModelSize {
        self.size
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    fn transcribe(&self, audio_path: &Path) -> Result<String, Box<dyn std::error::Error>> {
        let ctx = self.registry.load(self.size)?;
        let samples = read_wav_samples(audio_path)?;

        let mut state = ctx
            .create_state()
            .map_err(|e| format!("failed to create whisper state: {e}"))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        // None lets whisper auto-detect the spoken language.
        params.set_language(None);
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(4) as i32);

        state
            .full(params, &samples)
            .map_err(|e| format!("whisper inference failed: {e}"))?;

        let mut text = String::new();
        for segment in state.as_iter() {
            text.push_str(&segment.to_string());
        }

        Ok(text.trim().to_string())
    }
}

/// Decode a staged WAV file into mono f32 samples normalized to [-1.0, 1.0].
///
/// The extractor writes mono 16-bit PCM at the Whisper sample rate; other
/// channel counts are downmixed by averaging each frame.
fn read_wav_samples(path: &Path) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| format!("failed to open staged audio {}: {e}", path.display()))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };

    if spec.channels <= 1 {
        return Ok(samples);
    }

    let channels = spec.channels as usize;
    let mono = samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();
    Ok(mono)
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_wav(path: &Path, samples: &[i16], channels: u16) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_read_wav_samples_nonexistent_file() {
        let result = read_wav_samples(Path::new("/nonexistent/audio.wav"));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_wav_samples_mono_int16() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mono.wav");
        write_wav(&path, &[0, i16::MAX, i16::MIN], 1);

        let samples = read_wav_samples(&path).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], 0.0);
        assert!((samples[1] - (i16::MAX as f32 / 32768.0)).abs() < 1e-6);
        assert!((samples[2] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_read_wav_samples_downmixes_stereo() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("stereo.wav");
        // Two frames of (L, R); each frame averages to a single sample.
        write_wav(&path, &[16384, -16384, 8192, 8192], 2);

        let samples = read_wav_samples(&path).unwrap();
        assert_eq!(samples.len(), 2);
        assert!(samples[0].abs() < 1e-6);
        assert!((samples[1] - 0.25).abs() < 1e-3);
    }

    #[test]
    #[ignore] // Requires a whisper model file (downloads on first run)
    fn test_transcribe_does_not_crash_on_silence() {
        let registry = Arc::new(ModelRegistry::new());
        let recognizer = WhisperRecognizer::new(registry, ModelSize::Tiny);

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("silence.wav");
        write_wav(&path, &vec![0i16; 16000 * 3], 1);

        let result = recognizer.transcribe(&path);
        assert!(result.is_ok(), "transcription should not error: {result:?}");
    }
}
