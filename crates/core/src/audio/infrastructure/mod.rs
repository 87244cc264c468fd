pub mod model_registry;
pub mod whisper_recognizer;
