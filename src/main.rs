use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use watson_stt::core::stt::ibm_watson::{AudioContentType, DEFAULT_MODEL};
use watson_stt::{AudioStream, RecognitionConfig, ServiceOptions, SpeechToText};

/// Watson STT - IBM Watson Speech-to-Text recognize client
#[derive(Parser, Debug)]
#[command(name = "watson-stt")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send an audio file to the recognize endpoint
    Recognize(RecognizeArgs),
}

#[derive(clap::Args, Debug)]
struct RecognizeArgs {
    /// Audio file to upload
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: PathBuf,

    /// MIME type of the audio (guessed from the file extension if omitted)
    #[arg(long = "content-type")]
    content_type: Option<String>,

    /// Recognition model
    #[arg(short = 'm', long = "model", default_value = DEFAULT_MODEL)]
    model: String,

    /// Session to recognize in (authenticated clients only)
    #[arg(long = "session-id", default_value = "")]
    session_id: String,

    /// Keywords to spot, comma separated
    #[arg(long = "keywords", value_delimiter = ',')]
    keywords: Vec<String>,

    #[arg(long = "keywords-threshold", default_value_t = 0.0)]
    keywords_threshold: f64,

    #[arg(long = "max-alternatives", default_value_t = 1)]
    max_alternatives: u32,

    /// Request per-word confidence scores
    #[arg(long = "word-confidence")]
    word_confidence: bool,
}

fn guess_content_type(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let content_type = match extension.as_str() {
        "flac" => AudioContentType::Flac,
        "wav" => AudioContentType::Wav,
        "ogg" | "opus" => AudioContentType::OggOpus,
        _ => return None,
    };
    Some(content_type.mime())
}

async fn recognize(options: ServiceOptions, args: RecognizeArgs) -> anyhow::Result<bool> {
    let content_type = match args.content_type {
        Some(content_type) => content_type,
        None => guess_content_type(&args.file).ok_or_else(|| {
            anyhow!(
                "Cannot guess content type of {}, pass --content-type",
                args.file.display()
            )
        })?,
    };

    let audio = AudioStream::open(&args.file)
        .await
        .with_context(|| format!("Failed to open {}", args.file.display()))?;

    let client = SpeechToText::new(options)?;
    let config = RecognitionConfig {
        session_id: args.session_id,
        audio: Some(audio),
        content_type,
        model: args.model,
        keywords: args.keywords,
        keywords_threshold: args.keywords_threshold,
        max_alternatives: args.max_alternatives,
        word_confidence: args.word_confidence,
        ..Default::default()
    };

    let response = client.recognize(config).await?;
    let status = response.status();
    let body = response.text().await?;

    println!("{status}");
    println!("{body}");

    Ok(status.is_success())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration from file or environment
    let options = if let Some(config_path) = cli.config {
        info!("Loading configuration from {}", config_path.display());
        ServiceOptions::from_file(&config_path)?
    } else {
        ServiceOptions::from_env()?
    };

    let success = match cli.command {
        Commands::Recognize(args) => recognize(options, args).await?,
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
