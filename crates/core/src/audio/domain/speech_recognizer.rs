use std::path::Path;

/// Domain interface for speech-to-text transcription.
///
/// Implementations map a staged audio file to plain text, loading whatever
/// model they need on first use.
pub trait SpeechRecognizer: Send {
    fn transcribe(&self, audio_path: &Path) -> Result<String, Box<dyn std::error::Error>>;
}
