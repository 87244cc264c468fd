use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::audio::domain::speech_recognizer::SpeechRecognizer;
use crate::audio::domain::transcript::Transcript;
use crate::pipeline::pipeline_logger::{PipelineLogger, Stage};
use crate::shared::constants::WHISPER_SAMPLE_RATE;
use crate::upload::domain::video_upload::{UploadError, VideoUpload};
use crate::upload::infrastructure::temp_staging::StagedFiles;
use crate::video::domain::audio_reader::AudioReader;
use crate::video::domain::audio_writer::AudioWriter;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("upload rejected: {0}")]
    Rejected(#[from] UploadError),
    #[error("failed to stage upload: {0}")]
    Staging(#[from] std::io::Error),
    #[error("audio extraction failed: {0}")]
    Extraction(String),
    #[error("transcription failed: {0}")]
    Transcription(String),
}

impl PipelineError {
    /// The stage this invocation failed in, for user-facing messages.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Rejected(_) => "validation",
            PipelineError::Staging(_) => "staging",
            PipelineError::Extraction(_) => "audio extraction",
            PipelineError::Transcription(_) => "transcription",
        }
    }
}

/// Result of a successful pipeline invocation.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub transcript: Transcript,
    /// Wall-clock duration of the full pipeline, staging through cleanup.
    pub elapsed: Duration,
}

/// Orchestrates one upload → extract → transcribe → cleanup invocation.
///
/// Stages run strictly in order (Staging → Extracting → Transcribing →
/// Done); any failure is terminal for the invocation — no step is retried —
/// and the staged files are removed on every exit path. Invocations are
/// independent: each gets uniquely-named staged files, and the only shared
/// state is whatever model cache the recognizer carries.
pub struct TranscribeVideoUseCase {
    reader: Box<dyn AudioReader>,
    writer: Box<dyn AudioWriter>,
    recognizer: Box<dyn SpeechRecognizer>,
    logger: Box<dyn PipelineLogger>,
    staging_dir: Option<PathBuf>,
}

impl TranscribeVideoUseCase {
    pub fn new(
        reader: Box<dyn AudioReader>,
        writer: Box<dyn AudioWriter>,
        recognizer: Box<dyn SpeechRecognizer>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            reader,
            writer,
            recognizer,
            logger,
            staging_dir: None,
        }
    }

    /// Stage temporary files under `dir` instead of the OS temp directory.
    pub fn with_staging_dir(mut self, dir: PathBuf) -> Self {
        self.staging_dir = Some(dir);
        self
    }

    pub fn run(&mut self, upload: &VideoUpload) -> Result<PipelineOutcome, PipelineError> {
        // Admission check runs before any temporary file exists.
        upload.validate()?;

        let started = Instant::now();

        self.logger.stage(Stage::Staging);
        let mut staged = match &self.staging_dir {
            Some(dir) => StagedFiles::stage_in(upload, dir),
            None => StagedFiles::stage(upload),
        }?;

        let result = self.process(&staged);

        // Cleanup runs on every path before returning control.
        staged.remove();

        let transcript = result?;
        self.logger.stage(Stage::Done);

        Ok(PipelineOutcome {
            transcript,
            elapsed: started.elapsed(),
        })
    }

    fn process(&mut self, staged: &StagedFiles) -> Result<Transcript, PipelineError> {
        self.logger.stage(Stage::Extracting);
        let audio = self
            .reader
            .read_audio(staged.video_path(), WHISPER_SAMPLE_RATE)
            .map_err(|e| PipelineError::Extraction(e.to_string()))?
            .ok_or_else(|| PipelineError::Extraction("video has no audio track".to_string()))?;
        self.writer
            .write_audio(staged.audio_path(), &audio)
            .map_err(|e| PipelineError::Extraction(e.to_string()))?;

        self.logger.stage(Stage::Transcribing);
        let text = self
            .recognizer
            .transcribe(staged.audio_path())
            .map_err(|e| PipelineError::Transcription(e.to_string()))?;

        Ok(Transcript::new(text))
    }
}
