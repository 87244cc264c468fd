use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::Builder;

use crate::upload::domain::video_upload::VideoUpload;

/// Invocation-scoped temporary files that pass data between pipeline steps:
/// the staged video (uploaded bytes persisted to disk) and the staged audio
/// destination (created empty at staging time, filled by the extractor).
///
/// Both files exist from the moment staging succeeds until [`remove`] runs.
/// Removal is best-effort: unlink failures are logged at debug level and
/// otherwise swallowed. `Drop` repeats the removal as a backstop so the
/// files never outlive the invocation even on early returns.
///
/// [`remove`]: StagedFiles::remove
#[derive(Debug)]
pub struct StagedFiles {
    video_path: PathBuf,
    audio_path: PathBuf,
    removed: bool,
}

impl StagedFiles {
    /// Stage an upload in the OS temp directory.
    pub fn stage(upload: &VideoUpload) -> std::io::Result<Self> {
        Self::stage_in(upload, &std::env::temp_dir())
    }

    /// Stage an upload in a specific directory. Each invocation gets
    /// uniquely-named files, so concurrent invocations never collide.
    pub fn stage_in(upload: &VideoUpload, dir: &Path) -> std::io::Result<Self> {
        let suffix = match upload.extension() {
            Some(ext) => format!(".{ext}"),
            None => String::new(),
        };

        let mut video = Builder::new()
            .prefix("clipscribe-video-")
            .suffix(&suffix)
            .tempfile_in(dir)?;
        video.write_all(upload.bytes())?;
        video.flush()?;

        let audio = Builder::new()
            .prefix("clipscribe-audio-")
            .suffix(".wav")
            .tempfile_in(dir)?;

        // Detach both files from tempfile's auto-delete; removal is this
        // type's job so it happens on every exit path, success or failure.
        let (_, video_path) = video.keep().map_err(|e| e.error)?;
        let (_, audio_path) = audio.keep().map_err(|e| e.error)?;

        Ok(Self {
            video_path,
            audio_path,
            removed: false,
        })
    }

    pub fn video_path(&self) -> &Path {
        &self.video_path
    }

    pub fn audio_path(&self) -> &Path {
        &self.audio_path
    }

    /// Best-effort removal of both staged files. Both unlink attempts run
    /// unconditionally; failures are logged and swallowed.
    pub fn remove(&mut self) {
        for path in [&self.video_path, &self.audio_path] {
            if let Err(e) = fs::remove_file(path) {
                log::debug!("failed to remove staged file {}: {e}", path.display());
            }
        }
        self.removed = true;
    }
}

impl Drop for StagedFiles {
    fn drop(&mut self) {
        if !self.removed {
            self.remove();
        }
    }
}
