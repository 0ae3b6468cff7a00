//! Audio format converter
//!
//! Converts audio between container formats, particularly browser recorder
//! output (WebM/OGG Opus) into the uncompressed WAV the recognition
//! service expects.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::SpeechError;
use crate::types::{AudioData, AudioFormat};

/// Sample rate of recognition-ready audio in Hertz
pub const RECOGNITION_SAMPLE_RATE_HERTZ: u32 = 16000;

/// Audio converter backed by an FFmpeg subprocess
///
/// FFmpeg must be installed on the system. Input and output travel over
/// stdin/stdout pipes; nothing touches the filesystem.
#[derive(Debug, Clone, Default)]
pub struct AudioConverter {
    /// FFmpeg binary path (defaults to "ffmpeg" in PATH)
    ffmpeg_path: Option<String>,
}

impl AudioConverter {
    /// Create a new audio converter with default settings
    #[must_use]
    pub const fn new() -> Self {
        Self { ffmpeg_path: None }
    }

    /// Create a new audio converter with a custom FFmpeg path
    #[must_use]
    pub fn with_ffmpeg_path(path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: Some(path.into()),
        }
    }

    fn ffmpeg_path(&self) -> &str {
        self.ffmpeg_path.as_deref().unwrap_or("ffmpeg")
    }

    /// Check if FFmpeg is available on the system
    #[instrument(skip(self))]
    pub async fn is_available(&self) -> bool {
        Command::new(self.ffmpeg_path())
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|status| status.success())
    }

    /// Convert audio data to the target container format
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::AudioProcessing` if FFmpeg cannot be spawned,
    /// rejects the input, or produces no output.
    #[instrument(skip(self, audio), fields(
        input_format = %audio.format(),
        target_format = %target_format
    ))]
    pub async fn convert(
        &self,
        audio: &AudioData,
        target_format: AudioFormat,
    ) -> Result<AudioData, SpeechError> {
        if audio.format() == target_format {
            debug!("Audio already in target format, skipping conversion");
            return Ok(audio.clone());
        }

        let mut args = vec![
            "-f".to_string(),
            Self::format_to_ffmpeg(target_format).to_string(),
        ];
        args.extend(Self::codec_options(target_format));

        let output = self.run_ffmpeg(&args, audio.data()).await?;
        Ok(AudioData::new(output, target_format))
    }

    /// Convert audio into the recognition input contract:
    /// WAV container, 16-bit signed PCM, mono, 16000 Hz.
    ///
    /// Always re-encodes, even for WAV input, since the source sample
    /// rate and channel count are unknown.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::AudioProcessing` if the conversion fails.
    #[instrument(skip(self, audio), fields(input_format = %audio.format()))]
    pub async fn convert_for_recognition(
        &self,
        audio: &AudioData,
    ) -> Result<AudioData, SpeechError> {
        let sample_rate = RECOGNITION_SAMPLE_RATE_HERTZ.to_string();
        let args = [
            "-f", "wav", "-codec:a", "pcm_s16le", "-ar", &sample_rate, "-ac", "1",
        ]
        .map(String::from);

        let output = self.run_ffmpeg(&args, audio.data()).await?;
        Ok(AudioData::new(output, AudioFormat::Wav))
    }

    /// Spawn FFmpeg reading from stdin and writing to stdout.
    ///
    /// `output_args` carries the output format/codec flags; input format
    /// detection is left to FFmpeg's probing.
    async fn run_ffmpeg(
        &self,
        output_args: &[String],
        input: &[u8],
    ) -> Result<Vec<u8>, SpeechError> {
        let mut cmd = Command::new(self.ffmpeg_path());
        cmd.args(["-i", "pipe:0"])
            .args(output_args)
            .args(["-y", "-loglevel", "error", "pipe:1"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| SpeechError::AudioProcessing(format!("Failed to spawn FFmpeg: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input).await.map_err(|e| {
                SpeechError::AudioProcessing(format!("Failed to write to FFmpeg stdin: {e}"))
            })?;
            // Drop stdin to signal EOF
            drop(stdin);
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| SpeechError::AudioProcessing(format!("Failed to wait for FFmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::AudioProcessing(format!(
                "FFmpeg conversion failed: {stderr}"
            )));
        }

        if output.stdout.is_empty() {
            return Err(SpeechError::AudioProcessing(
                "FFmpeg produced empty output".to_string(),
            ));
        }

        debug!(output_bytes = output.stdout.len(), "Conversion successful");

        Ok(output.stdout)
    }

    /// FFmpeg muxer name for an audio format
    const fn format_to_ffmpeg(format: AudioFormat) -> &'static str {
        match format {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Flac => "flac",
            AudioFormat::Webm => "webm",
            AudioFormat::M4a => "ipod", // FFmpeg uses "ipod" for m4a
            AudioFormat::Opus => "opus",
        }
    }

    /// Codec flags per target format
    fn codec_options(format: AudioFormat) -> Vec<String> {
        let options: &[&str] = match format {
            AudioFormat::Mp3 => &["-codec:a", "libmp3lame", "-q:a", "2"],
            AudioFormat::Wav => &["-codec:a", "pcm_s16le", "-ar", "16000", "-ac", "1"],
            AudioFormat::Opus => &["-codec:a", "libopus", "-application", "voip", "-b:a", "32k"],
            AudioFormat::Flac => &["-codec:a", "flac", "-compression_level", "5"],
            AudioFormat::M4a => &["-codec:a", "aac", "-b:a", "128k"],
            AudioFormat::Ogg | AudioFormat::Webm => &["-codec:a", "libopus", "-b:a", "48k"],
        };
        options.iter().map(ToString::to_string).collect()
    }
}
