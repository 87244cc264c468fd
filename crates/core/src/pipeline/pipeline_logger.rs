use std::fmt;

/// Coarse pipeline stages, in execution order. `Failed` is implicit: any
/// stage can short-circuit the run, and cleanup happens regardless.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Staging,
    Extracting,
    Transcribing,
    Done,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Staging => "Staging uploaded video",
            Stage::Extracting => "Extracting audio from video",
            Stage::Transcribing => "Transcribing audio",
            Stage::Done => "Transcription complete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cross-cutting observer for pipeline orchestration events.
///
/// Decouples the use case from specific output mechanisms (log crate, GUI
/// signals) so each host can surface progress without changing the
/// orchestration code. Progress is limited to coarse stage labels; there
/// is no cancellation or percentage reporting.
pub trait PipelineLogger: Send {
    /// Report entry into a pipeline stage.
    fn stage(&mut self, stage: Stage);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);
}

/// Silent logger that discards all events. Used by tests and by hosts
/// with their own progress surface.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn stage(&mut self, _stage: Stage) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger that forwards stage transitions and messages to the log crate.
pub struct LogPipelineLogger;

impl PipelineLogger for LogPipelineLogger {
    fn stage(&mut self, stage: Stage) {
        log::info!("{stage}...");
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }
}
