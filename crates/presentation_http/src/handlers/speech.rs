//! Speech handlers (text-to-speech and speech-to-text)

use ai_speech::{AudioData, SynthesisRequest, TranscribeRequest};
use axum::{Json, extract::State};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Build a `data:` URI for synthesized audio, playable directly by a
/// browser `<audio>` element.
pub(crate) fn audio_data_url(audio: &AudioData) -> String {
    format!(
        "data:{};base64,{}",
        audio.mime_type(),
        BASE64.encode(audio.data())
    )
}

/// Text-to-speech request body
#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    /// Text to synthesize
    pub text: String,
    /// Voice name (default "en-US-Chirp-HD-F")
    #[serde(default)]
    pub voice_name: Option<String>,
    /// Speaking rate multiplier (default 1.0)
    #[serde(default)]
    pub speaking_rate: Option<f32>,
    /// Pitch adjustment in semitones (default 0.0)
    #[serde(default)]
    pub pitch: Option<f32>,
}

/// Text-to-speech response body
#[derive(Debug, Serialize)]
pub struct TtsResponse {
    /// Synthesized audio as a base64 data URI
    pub audio_url: String,
}

/// Synthesize speech for the given text
#[instrument(skip(state, request), fields(text_len = request.text.len()))]
pub async fn synthesize(
    State(state): State<AppState>,
    Json(request): Json<TtsRequest>,
) -> Result<Json<TtsResponse>, ApiError> {
    let synthesis = SynthesisRequest {
        text: request.text,
        voice_name: request.voice_name,
        speaking_rate: request.speaking_rate,
        pitch: request.pitch,
    };

    let audio = state.tts.synthesize(synthesis).await?;

    Ok(Json(TtsResponse {
        audio_url: audio_data_url(&audio),
    }))
}

/// Speech-to-text request body
#[derive(Debug, Deserialize)]
pub struct SttRequest {
    /// Base64-encoded audio bytes
    pub audio_content: String,
    /// Recognition encoding name (default "LINEAR16")
    #[serde(default)]
    pub encoding: Option<String>,
    /// Sample rate in Hertz (default 16000)
    #[serde(default)]
    pub sample_rate_hertz: Option<u32>,
    /// BCP-47 language code (default "en-US")
    #[serde(default)]
    pub language_code: Option<String>,
}

/// Speech-to-text response body
#[derive(Debug, Serialize)]
pub struct SttResponse {
    /// Transcribed text
    pub text: String,
}

/// Transcribe uploaded audio
#[instrument(skip(state, request), fields(content_len = request.audio_content.len()))]
pub async fn transcribe(
    State(state): State<AppState>,
    Json(request): Json<SttRequest>,
) -> Result<Json<SttResponse>, ApiError> {
    let transcription = TranscribeRequest {
        audio_content: request.audio_content,
        encoding: request.encoding,
        sample_rate_hertz: request.sample_rate_hertz,
        language_code: request.language_code,
    };

    let result = state.stt.transcribe(transcription).await?;

    Ok(Json(SttResponse { text: result.text }))
}

#[cfg(test)]
mod tests {
    use ai_speech::AudioFormat;

    use super::*;

    #[test]
    fn audio_data_url_has_mp3_prefix() {
        let audio = AudioData::new(vec![1, 2, 3], AudioFormat::Mp3);
        let url = audio_data_url(&audio);
        assert!(url.starts_with("data:audio/mp3;base64,"));
        assert!(url.ends_with(&BASE64.encode([1u8, 2, 3])));
    }

    #[test]
    fn tts_request_deserializes_with_defaults() {
        let json = r#"{"text": "Hello"}"#;
        let request: TtsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.text, "Hello");
        assert!(request.voice_name.is_none());
        assert!(request.speaking_rate.is_none());
        assert!(request.pitch.is_none());
    }

    #[test]
    fn tts_request_deserializes_full_body() {
        let json = r#"{
            "text": "Hallo",
            "voice_name": "de-DE-Standard-B",
            "speaking_rate": 1.2,
            "pitch": -2.0
        }"#;
        let request: TtsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.voice_name.as_deref(), Some("de-DE-Standard-B"));
        assert_eq!(request.speaking_rate, Some(1.2));
        assert_eq!(request.pitch, Some(-2.0));
    }

    #[test]
    fn stt_request_deserializes_with_defaults() {
        let json = r#"{"audio_content": "YWJj"}"#;
        let request: SttRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.audio_content, "YWJj");
        assert!(request.encoding.is_none());
        assert!(request.sample_rate_hertz.is_none());
        assert!(request.language_code.is_none());
    }

    #[test]
    fn stt_response_serializes_text() {
        let response = SttResponse {
            text: "hello world".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"text":"hello world"}"#);
    }
}
