pub mod audio_reader;
pub mod audio_writer;
