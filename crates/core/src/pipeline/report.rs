use std::time::Duration;

use chrono::{DateTime, Local};

use crate::audio::domain::model_size::ModelSize;
use crate::audio::domain::transcript::Transcript;

/// Fixed-template detailed report offered alongside the raw transcript:
/// source filename, model-size label, elapsed time, word count, generation
/// timestamp, and the transcription body.
pub struct TranscriptionReport<'a> {
    pub filename: &'a str,
    pub model_size: ModelSize,
    pub elapsed: Duration,
    pub transcript: &'a Transcript,
}

impl TranscriptionReport<'_> {
    pub fn render(&self) -> String {
        self.render_at(Local::now())
    }

    fn render_at(&self, generated: DateTime<Local>) -> String {
        format!(
            "Video Transcription\n\
             ==================\n\
             File: {file}\n\
             Method: Whisper ({size} model)\n\
             Processing Time: {elapsed:.1} seconds\n\
             Word Count: {words}\n\
             Generated: {timestamp}\n\
             \n\
             Transcription:\n\
             --------------\n\
             {body}\n",
            file = self.filename,
            size = self.model_size,
            elapsed = self.elapsed.as_secs_f64(),
            words = self.transcript.word_count(),
            timestamp = generated.format("%Y-%m-%d %H:%M:%S"),
            body = self.transcript.text(),
        )
    }
}
