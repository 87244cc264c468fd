use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;

use clipscribe_core::audio::domain::model_size::ModelSize;
use clipscribe_core::audio::infrastructure::model_registry::ModelRegistry;
use clipscribe_core::audio::infrastructure::whisper_recognizer::WhisperRecognizer;
use clipscribe_core::pipeline::pipeline_logger::LogPipelineLogger;
use clipscribe_core::pipeline::report::TranscriptionReport;
use clipscribe_core::pipeline::transcribe_video_use_case::TranscribeVideoUseCase;
use clipscribe_core::upload::domain::video_upload::VideoUpload;
use clipscribe_core::video::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;
use clipscribe_core::video::infrastructure::wav_audio_writer::WavAudioWriter;

/// Transcribe the audio track of a video file to text.
#[derive(Parser)]
#[command(name = "clipscribe")]
struct Cli {
    /// Input video file (mp4, avi, mov, mkv, wmv).
    input: PathBuf,

    /// Whisper model size: tiny, base, small, medium, or large.
    #[arg(long, default_value = "base")]
    model_size: ModelSize,

    /// Write the raw transcription to this file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write a detailed report (metadata + transcription) to this file.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Directory for staged temporary files (defaults to the OS temp dir).
    #[arg(long)]
    staging_dir: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    let filename = cli
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or("Input path has no filename")?
        .to_string();

    let bytes = fs::read(&cli.input)?;
    let upload = VideoUpload::new(bytes, filename.clone());
    log::info!(
        "File: {} ({:.2} MB)",
        filename,
        upload.size() as f64 / (1024.0 * 1024.0)
    );

    let registry = Arc::new(ModelRegistry::new().with_progress(download_progress));
    let recognizer = WhisperRecognizer::new(registry, cli.model_size);
    log::info!("Transcribing with Whisper ({} model)", cli.model_size);

    let mut use_case = TranscribeVideoUseCase::new(
        Box::new(FfmpegAudioReader),
        Box::new(WavAudioWriter),
        Box::new(recognizer),
        Box::new(LogPipelineLogger),
    );
    if let Some(dir) = cli.staging_dir {
        use_case = use_case.with_staging_dir(dir);
    }

    let outcome = match use_case.run(&upload) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("pipeline failed during {}", e.stage());
            return Err(e.into());
        }
    };
    eprintln!();

    let transcript = &outcome.transcript;
    println!("{}", transcript.text());
    log::info!(
        "Transcription completed in {:.1}s ({} words, {} characters)",
        outcome.elapsed.as_secs_f64(),
        transcript.word_count(),
        transcript.char_count()
    );

    if let Some(path) = cli.output {
        fs::write(&path, transcript.text())?;
        log::info!("Transcription written to {}", path.display());
    }

    if let Some(path) = cli.report {
        let report = TranscriptionReport {
            filename: &filename,
            model_size: cli.model_size,
            elapsed: outcome.elapsed,
            transcript,
        };
        fs::write(&path, report.render())?;
        log::info!("Report written to {}", path.display());
    }

    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading whisper model... {pct}%");
    } else {
        eprint!("\rDownloading whisper model... {downloaded} bytes");
    }
}
