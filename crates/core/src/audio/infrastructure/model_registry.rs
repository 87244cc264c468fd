use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use whisper_rs::{WhisperContext, WhisperContextParameters};

use crate::audio::domain::model_size::ModelSize;
use crate::shared::model_resolver::{self, ModelResolveError, ProgressFn};

#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error(transparent)]
    Resolve(#[from] ModelResolveError),
    #[error("model path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),
    #[error("failed to initialize whisper context: {0}")]
    Context(String),
    #[error("model registry mutex poisoned")]
    Poisoned,
}

/// Process-wide cache of loaded Whisper contexts, one per model size.
///
/// Contexts are immutable after load and reused across pipeline
/// invocations; there is no teardown. The host creates one registry and
/// shares it (typically behind an `Arc`), so concurrent first-loads of the
/// same size serialize on the mutex instead of doing redundant work.
pub struct ModelRegistry {
    contexts: Mutex<HashMap<ModelSize, Arc<WhisperContext>>>,
    progress: Option<fn(u64, u64)>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            contexts: Mutex::new(HashMap::new()),
            progress: None,
        }
    }

    /// Report model download progress through the given callback.
    pub fn with_progress(mut self, progress: fn(u64, u64)) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Return the cached context for `size`, resolving the model file and
    /// loading it on first use.
    pub fn load(&self, size: ModelSize) -> Result<Arc<WhisperContext>, ModelLoadError> {
        let mut contexts = self.contexts.lock().map_err(|_| ModelLoadError::Poisoned)?;
        if let Some(ctx) = contexts.get(&size) {
            return Ok(Arc::clone(ctx));
        }

        let path = model_resolver::resolve(
            size.model_filename(),
            size.download_url(),
            None,
            self.progress.map(|f| Box::new(f) as ProgressFn),
        )?;
        let path_str = path
            .to_str()
            .ok_or_else(|| ModelLoadError::InvalidPath(path.clone()))?;

        log::info!("loading whisper {size} model from {}", path.display());
        let ctx = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
            .map_err(|e| ModelLoadError::Context(e.to_string()))?;

        let ctx = Arc::new(ctx);
        contexts.insert(size, Arc::clone(&ctx));
        Ok(ctx)
    }

    /// Whether a context for `size` has already been loaded.
    pub fn is_loaded(&self, size: ModelSize) -> bool {
        self.contexts
            .lock()
            .map(|c| c.contains_key(&size))
            .unwrap_or(false)
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_starts_empty() {
        let registry = ModelRegistry::new();
        assert!(!registry.is_loaded(ModelSize::Tiny));
        assert!(!registry.is_loaded(ModelSize::Large));
    }

    #[test]
    #[ignore] // Requires a whisper model file (downloads on first run)
    fn test_second_load_reuses_cached_context() {
        let registry = ModelRegistry::new();
        let first = registry.load(ModelSize::Tiny).expect("first load failed");
        assert!(registry.is_loaded(ModelSize::Tiny));
        let second = registry.load(ModelSize::Tiny).expect("second load failed");
        assert!(Arc::ptr_eq(&first, &second));
    }
}
