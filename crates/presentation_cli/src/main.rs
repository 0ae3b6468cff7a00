//! VoxCare CLI
//!
//! Command-line utility for audio conversion and chat smoke tests
//! against a running server.

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};

use ai_speech::{AudioConverter, AudioData, AudioFormat};
use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// VoxCare CLI
#[derive(Parser)]
#[command(name = "voxcare-cli")]
#[command(author, version, about = "VoxCare audio and chat utility", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an audio file into recognition-ready WAV (PCM s16le, mono, 16 kHz)
    ///
    /// Requires FFmpeg on the system.
    /// Example: voxcare-cli convert recording.webm recording.wav --base64-sidecar
    Convert {
        /// Input audio file (format inferred from the extension)
        input: PathBuf,

        /// Output WAV file
        output: PathBuf,

        /// Also write the output as base64 text next to the WAV file
        #[arg(long)]
        base64_sidecar: bool,

        /// FFmpeg binary path (defaults to "ffmpeg" in PATH)
        #[arg(long)]
        ffmpeg: Option<String>,
    },

    /// Send a chat message to a running server and print the reply
    Chat {
        /// Message to send
        message: String,

        /// Server URL
        #[arg(short, long, default_value = "http://localhost:8000")]
        url: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Sidecar path for the base64 copy of a converted file
fn sidecar_path(output: &Path) -> PathBuf {
    output.with_extension("base64.txt")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            base64_sidecar,
            ffmpeg,
        } => {
            let format = input
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(AudioFormat::from_extension)
                .with_context(|| format!("Unsupported input format: {}", input.display()))?;

            let bytes = tokio::fs::read(&input)
                .await
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let audio = AudioData::new(bytes, format);

            let converter = ffmpeg.map_or_else(AudioConverter::new, AudioConverter::with_ffmpeg_path);
            if !converter.is_available().await {
                anyhow::bail!("FFmpeg not found; install it or pass --ffmpeg");
            }

            let wav = converter.convert_for_recognition(&audio).await?;

            tokio::fs::write(&output, wav.data())
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Wrote {} bytes to {}", wav.size_bytes(), output.display());

            if base64_sidecar {
                let sidecar = sidecar_path(&output);
                tokio::fs::write(&sidecar, BASE64.encode(wav.data()))
                    .await
                    .with_context(|| format!("Failed to write {}", sidecar.display()))?;
                println!("Wrote base64 sidecar to {}", sidecar.display());
            }
        },

        Commands::Chat { message, url } => {
            println!("Sending: {message}");

            let client = reqwest::Client::new();
            let response = client
                .post(format!("{url}/api/chat"))
                .json(&serde_json::json!({
                    "messages": [{ "role": "user", "content": message }]
                }))
                .send()
                .await
                .with_context(|| format!("Failed to reach server at {url}"))?;

            let status = response.status();
            let body = response.json::<serde_json::Value>().await?;

            if status.is_success() {
                println!("{}", body["message"].as_str().unwrap_or_default());
            } else {
                anyhow::bail!(
                    "Server returned {status}: {}",
                    body["error"].as_str().unwrap_or("unknown error")
                );
            }
        },
    }

    Ok(())
}
