//! Google Cloud speech provider
//!
//! Implements `SpeechToText` against `speech:recognize` and `TextToSpeech`
//! against `text:synthesize`. Both are the synchronous REST endpoints,
//! suitable for short clips only; long-running recognition is out of scope.
//!
//! Authentication uses an API key passed as a `key` query parameter.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::{SpeechToText, SynthesisRequest, TextToSpeech, TranscribeRequest};
use crate::retry::{RetryPolicy, with_backoff};
use crate::types::{
    AudioData, AudioEncoding, AudioFormat, EMPTY_TRANSCRIPT_FALLBACK, Transcription, VoiceGender,
    VoiceSelection,
};

/// Speech provider backed by the Google Cloud STT and TTS REST APIs
#[derive(Debug, Clone)]
pub struct GoogleSpeechProvider {
    client: Client,
    config: SpeechConfig,
}

impl GoogleSpeechProvider {
    /// Create a new Google speech provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid
    /// (notably a missing API key) or the HTTP client cannot be built.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }

    fn recognize_url(&self) -> String {
        format!("{}/speech:recognize", self.config.stt_base_url)
    }

    fn synthesize_url(&self) -> String {
        format!("{}/text:synthesize", self.config.tts_base_url)
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.config.max_retries,
            initial_delay_ms: self.config.retry_initial_delay_ms,
        }
    }

    /// Map a non-success response to a typed error.
    async fn classify_failure(
        response: reqwest::Response,
        fallback: fn(String) -> SpeechError,
    ) -> SpeechError {
        let status = response.status();
        let error_body = response.text().await.unwrap_or_default();

        if let Ok(api_error) = serde_json::from_str::<GoogleApiError>(&error_body) {
            if api_error.error.status == "RESOURCE_EXHAUSTED" {
                return SpeechError::RateLimited;
            }
            return fallback(api_error.error.message);
        }

        if status.as_u16() == 429 {
            return SpeechError::RateLimited;
        }

        warn!(status = %status, body = %error_body, "Speech API request failed");
        fallback(format!("HTTP {status}: {error_body}"))
    }

    async fn recognize_dispatch(
        &self,
        body: &RecognizeRequest<'_>,
    ) -> Result<Transcription, SpeechError> {
        let response = self
            .client
            .post(self.recognize_url())
            .query(&[("key", self.api_key())])
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response, SpeechError::TranscriptionFailed).await);
        }

        let recognized: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        // Top alternative per result segment, space-joined
        let segments: Vec<&str> = recognized
            .results
            .iter()
            .filter_map(|r| r.alternatives.first())
            .map(|a| a.transcript.as_str())
            .collect();
        let text = segments.join(" ").trim().to_string();

        let confidence = recognized
            .results
            .first()
            .and_then(|r| r.alternatives.first())
            .and_then(|a| a.confidence);

        debug!(
            segments = recognized.results.len(),
            text_len = text.len(),
            "Recognition complete"
        );

        // Recognition succeeded but heard nothing; callers get guidance
        // text rather than an empty string.
        if text.is_empty() {
            return Ok(Transcription::new(EMPTY_TRANSCRIPT_FALLBACK));
        }

        let mut transcription = Transcription::new(text);
        if let Some(confidence) = confidence {
            transcription = transcription.with_confidence(confidence);
        }
        Ok(transcription)
    }

    async fn synthesize_dispatch(
        &self,
        body: &SynthesizeWireRequest<'_>,
    ) -> Result<AudioData, SpeechError> {
        let response = self
            .client
            .post(self.synthesize_url())
            .query(&[("key", self.api_key())])
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response, SpeechError::SynthesisFailed).await);
        }

        let synthesized: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let audio_bytes = BASE64.decode(synthesized.audio_content.as_bytes()).map_err(|e| {
            SpeechError::InvalidResponse(format!("Audio content is not valid base64: {e}"))
        })?;

        if audio_bytes.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Response contained no audio".to_string(),
            ));
        }

        debug!(audio_bytes = audio_bytes.len(), "Synthesis complete");

        Ok(AudioData::new(audio_bytes, AudioFormat::Mp3))
    }
}

/// Wire request for `speech:recognize`
#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: AudioEncoding,
    sample_rate_hertz: u32,
    language_code: &'a str,
    enable_automatic_punctuation: bool,
    audio_channel_count: u32,
    model: &'a str,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio<'a> {
    /// Base64-encoded audio bytes
    content: &'a str,
}

/// Wire response from `speech:recognize`
#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognizeResult>,
}

#[derive(Debug, Deserialize)]
struct RecognizeResult {
    #[serde(default)]
    alternatives: Vec<RecognizeAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognizeAlternative {
    transcript: String,
    #[serde(default)]
    confidence: Option<f32>,
}

/// Wire request for `text:synthesize`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeWireRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceParams<'a>,
    audio_config: SynthesisAudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceParams<'a> {
    language_code: &'a str,
    name: &'a str,
    ssml_gender: VoiceGender,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesisAudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f32,
    pitch: f32,
}

/// Wire response from `text:synthesize`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

/// Google API error envelope
#[derive(Debug, Deserialize)]
struct GoogleApiError {
    error: GoogleApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleApiErrorDetail {
    message: String,
    #[serde(default)]
    status: String,
}

#[async_trait]
impl SpeechToText for GoogleSpeechProvider {
    #[instrument(skip(self, request), fields(content_len = request.audio_content.len()))]
    async fn transcribe(&self, request: TranscribeRequest) -> Result<Transcription, SpeechError> {
        let content = request.audio_content.trim();
        if content.is_empty() {
            return Err(SpeechError::NoAudioContent);
        }

        let decoded = BASE64
            .decode(content.as_bytes())
            .map_err(|e| SpeechError::InvalidBase64(e.to_string()))?;

        // Payloads below the floor cannot contain speech; rejected before
        // any network call.
        if decoded.len() < self.config.min_audio_bytes {
            return Err(SpeechError::AudioTooSmall {
                size_bytes: decoded.len(),
                min_bytes: self.config.min_audio_bytes,
            });
        }

        let encoding = request
            .encoding
            .as_deref()
            .map_or(AudioEncoding::Linear16, AudioEncoding::parse);

        let body = RecognizeRequest {
            config: RecognitionConfig {
                encoding,
                sample_rate_hertz: request
                    .sample_rate_hertz
                    .unwrap_or(self.config.default_sample_rate_hertz),
                language_code: request
                    .language_code
                    .as_deref()
                    .unwrap_or(&self.config.default_language),
                enable_automatic_punctuation: true,
                audio_channel_count: 1,
                model: "default",
            },
            audio: RecognitionAudio { content },
        };

        debug!(
            encoding = encoding.as_str(),
            audio_bytes = decoded.len(),
            "Sending recognition request"
        );

        with_backoff(self.retry_policy(), || self.recognize_dispatch(&body)).await
    }
}

#[async_trait]
impl TextToSpeech for GoogleSpeechProvider {
    #[instrument(skip(self, request), fields(text_len = request.text.len()))]
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioData, SpeechError> {
        if request.text.trim().is_empty() {
            return Err(SpeechError::InvalidText);
        }

        let voice_name = request
            .voice_name
            .as_deref()
            .unwrap_or(&self.config.default_voice);
        let voice = VoiceSelection::parse(voice_name)?;

        let body = SynthesizeWireRequest {
            input: SynthesisInput {
                text: &request.text,
            },
            voice: VoiceParams {
                language_code: &voice.language_code,
                name: &voice.name,
                ssml_gender: voice.gender,
            },
            audio_config: SynthesisAudioConfig {
                audio_encoding: "MP3",
                speaking_rate: request.speaking_rate.unwrap_or(self.config.speaking_rate),
                pitch: request.pitch.unwrap_or(self.config.pitch),
            },
        };

        debug!(voice = %voice.name, "Sending synthesis request");

        with_backoff(self.retry_policy(), || self.synthesize_dispatch(&body)).await
    }
}
