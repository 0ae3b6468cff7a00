//! Types for speech processing
//!
//! Contains data structures for audio data, container formats, recognition
//! encodings, voice selection, and transcriptions.

use serde::{Deserialize, Serialize};

use crate::error::SpeechError;

/// Fallback text returned when recognition succeeds but yields no words
pub const EMPTY_TRANSCRIPT_FALLBACK: &str =
    "I couldn't understand what was said. Could you please speak more clearly or try again?";

/// Recognition encodings accepted by the speech-to-text service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioEncoding {
    /// Uncompressed 16-bit signed little-endian PCM
    #[serde(rename = "LINEAR16")]
    Linear16,
    /// FLAC (lossless)
    #[serde(rename = "FLAC")]
    Flac,
    /// MP3
    #[serde(rename = "MP3")]
    Mp3,
    /// Opus in an OGG container
    #[serde(rename = "OGG_OPUS")]
    OggOpus,
    /// Opus in a WebM container (browser MediaRecorder output)
    #[serde(rename = "WEBM_OPUS")]
    WebmOpus,
    /// 8-bit mu-law PCM
    #[serde(rename = "MULAW")]
    Mulaw,
    /// Adaptive Multi-Rate narrowband
    #[serde(rename = "AMR")]
    Amr,
    /// Adaptive Multi-Rate wideband
    #[serde(rename = "AMR_WB")]
    AmrWb,
    /// Speex with header byte
    #[serde(rename = "SPEEX_WITH_HEADER_BYTE")]
    SpeexWithHeaderByte,
}

impl AudioEncoding {
    /// Parse an encoding name.
    ///
    /// Unrecognized names fall back to `Linear16` so that callers with
    /// unusual browser recorder settings still get a recognition attempt.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "FLAC" => Self::Flac,
            "MP3" => Self::Mp3,
            "OGG_OPUS" => Self::OggOpus,
            "WEBM_OPUS" => Self::WebmOpus,
            "MULAW" => Self::Mulaw,
            "AMR" => Self::Amr,
            "AMR_WB" => Self::AmrWb,
            "SPEEX_WITH_HEADER_BYTE" => Self::SpeexWithHeaderByte,
            _ => Self::Linear16,
        }
    }

    /// Wire name of the encoding
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Linear16 => "LINEAR16",
            Self::Flac => "FLAC",
            Self::Mp3 => "MP3",
            Self::OggOpus => "OGG_OPUS",
            Self::WebmOpus => "WEBM_OPUS",
            Self::Mulaw => "MULAW",
            Self::Amr => "AMR",
            Self::AmrWb => "AMR_WB",
            Self::SpeexWithHeaderByte => "SPEEX_WITH_HEADER_BYTE",
        }
    }
}

/// Voice gender classification used by the synthesis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceGender {
    /// Male voice
    #[serde(rename = "MALE")]
    Male,
    /// Female voice
    #[serde(rename = "FEMALE")]
    Female,
}

/// Voice parameters derived from a hyphen-delimited voice name
///
/// Names follow the `<lang>-<region>-<family>[-<variant>...]` convention,
/// e.g. `en-US-Chirp-HD-F`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSelection {
    /// Full voice name as given
    pub name: String,
    /// BCP-47 language code (first two name segments)
    pub language_code: String,
    /// Derived gender
    pub gender: VoiceGender,
}

impl VoiceSelection {
    /// Parse a voice name into its selection parameters.
    ///
    /// The language code is taken from the first two hyphen-delimited
    /// segments. Gender is `Female` when the name contains an uppercase
    /// `F` anywhere, `Male` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::InvalidVoice` for names with fewer than
    /// three segments.
    pub fn parse(name: &str) -> Result<Self, SpeechError> {
        let segments: Vec<&str> = name.split('-').collect();
        if segments.len() < 3 {
            return Err(SpeechError::InvalidVoice(name.to_string()));
        }

        let language_code = format!("{}-{}", segments[0], segments[1]);
        let gender = if name.contains('F') {
            VoiceGender::Female
        } else {
            VoiceGender::Male
        };

        Ok(Self {
            name: name.to_string(),
            language_code,
            gender,
        })
    }
}

/// Supported audio container formats for conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MP3 format
    Mp3,
    /// WAV format (uncompressed)
    Wav,
    /// OGG container (typically Opus)
    Ogg,
    /// FLAC format (lossless)
    Flac,
    /// WebM format
    Webm,
    /// M4A/AAC format
    M4a,
    /// Raw Opus
    Opus,
}

impl AudioFormat {
    /// Get the MIME type for this audio format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mp3",
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
            Self::Flac => "audio/flac",
            Self::Webm => "audio/webm",
            Self::M4a => "audio/m4a",
            Self::Opus => "audio/opus",
        }
    }

    /// Get the file extension for this audio format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
            Self::Webm => "webm",
            Self::M4a => "m4a",
            Self::Opus => "opus",
        }
    }

    /// Parse an audio format from a file extension
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "wav" | "wave" => Some(Self::Wav),
            "ogg" | "oga" => Some(Self::Ogg),
            "flac" => Some(Self::Flac),
            "webm" => Some(Self::Webm),
            "m4a" | "mp4" => Some(Self::M4a),
            "opus" => Some(Self::Opus),
            _ => None,
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Container for audio bytes with their format
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Raw audio bytes
    data: Vec<u8>,
    /// Audio format
    format: AudioFormat,
}

impl AudioData {
    /// Create new audio data
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Get the raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the audio format
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Get the size of the audio data in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the audio data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the MIME type for this audio
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Result of speech-to-text transcription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    /// Transcribed text
    pub text: String,
    /// Confidence score of the top alternative (0.0 - 1.0)
    pub confidence: Option<f32>,
}

impl Transcription {
    /// Create a simple transcription with just text
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
        }
    }

    /// Set the confidence score
    #[must_use]
    pub const fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Check if the transcription is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod audio_encoding {
        use super::*;

        #[test]
        fn parse_known_encodings() {
            assert_eq!(AudioEncoding::parse("LINEAR16"), AudioEncoding::Linear16);
            assert_eq!(AudioEncoding::parse("FLAC"), AudioEncoding::Flac);
            assert_eq!(AudioEncoding::parse("MP3"), AudioEncoding::Mp3);
            assert_eq!(AudioEncoding::parse("OGG_OPUS"), AudioEncoding::OggOpus);
            assert_eq!(AudioEncoding::parse("WEBM_OPUS"), AudioEncoding::WebmOpus);
            assert_eq!(AudioEncoding::parse("MULAW"), AudioEncoding::Mulaw);
            assert_eq!(AudioEncoding::parse("AMR"), AudioEncoding::Amr);
            assert_eq!(AudioEncoding::parse("AMR_WB"), AudioEncoding::AmrWb);
            assert_eq!(
                AudioEncoding::parse("SPEEX_WITH_HEADER_BYTE"),
                AudioEncoding::SpeexWithHeaderByte
            );
        }

        #[test]
        fn parse_unknown_falls_back_to_linear16() {
            assert_eq!(AudioEncoding::parse("BOGUS"), AudioEncoding::Linear16);
            assert_eq!(AudioEncoding::parse(""), AudioEncoding::Linear16);
            assert_eq!(AudioEncoding::parse("pcm"), AudioEncoding::Linear16);
        }

        #[test]
        fn parse_is_case_insensitive() {
            assert_eq!(AudioEncoding::parse("webm_opus"), AudioEncoding::WebmOpus);
            assert_eq!(AudioEncoding::parse(" mp3 "), AudioEncoding::Mp3);
        }

        #[test]
        fn serializes_to_wire_names() {
            assert_eq!(
                serde_json::to_string(&AudioEncoding::Linear16).unwrap(),
                "\"LINEAR16\""
            );
            assert_eq!(
                serde_json::to_string(&AudioEncoding::WebmOpus).unwrap(),
                "\"WEBM_OPUS\""
            );
            assert_eq!(
                serde_json::to_string(&AudioEncoding::AmrWb).unwrap(),
                "\"AMR_WB\""
            );
        }

        #[test]
        fn as_str_matches_serialization() {
            for encoding in [
                AudioEncoding::Linear16,
                AudioEncoding::Flac,
                AudioEncoding::Mp3,
                AudioEncoding::OggOpus,
                AudioEncoding::WebmOpus,
                AudioEncoding::Mulaw,
                AudioEncoding::Amr,
                AudioEncoding::AmrWb,
                AudioEncoding::SpeexWithHeaderByte,
            ] {
                let json = serde_json::to_string(&encoding).unwrap();
                assert_eq!(json, format!("\"{}\"", encoding.as_str()));
            }
        }
    }

    mod voice_selection {
        use super::*;

        #[test]
        fn parses_default_voice() {
            let voice = VoiceSelection::parse("en-US-Chirp-HD-F").unwrap();
            assert_eq!(voice.name, "en-US-Chirp-HD-F");
            assert_eq!(voice.language_code, "en-US");
            assert_eq!(voice.gender, VoiceGender::Female);
        }

        #[test]
        fn voice_without_f_is_male() {
            let voice = VoiceSelection::parse("de-DE-Standard-B").unwrap();
            assert_eq!(voice.language_code, "de-DE");
            assert_eq!(voice.gender, VoiceGender::Male);
        }

        #[test]
        fn gender_check_is_case_sensitive() {
            // Lowercase 'f' does not flip the gender
            let voice = VoiceSelection::parse("en-GB-fable-x").unwrap();
            assert_eq!(voice.gender, VoiceGender::Male);
        }

        #[test]
        fn rejects_short_names() {
            assert!(matches!(
                VoiceSelection::parse("x"),
                Err(SpeechError::InvalidVoice(_))
            ));
            assert!(matches!(
                VoiceSelection::parse("en-US"),
                Err(SpeechError::InvalidVoice(_))
            ));
            assert!(matches!(
                VoiceSelection::parse(""),
                Err(SpeechError::InvalidVoice(_))
            ));
        }

        #[test]
        fn three_segments_is_enough() {
            let voice = VoiceSelection::parse("es-ES-Standard").unwrap();
            assert_eq!(voice.language_code, "es-ES");
        }

        #[test]
        fn gender_serializes_uppercase() {
            assert_eq!(
                serde_json::to_string(&VoiceGender::Female).unwrap(),
                "\"FEMALE\""
            );
            assert_eq!(
                serde_json::to_string(&VoiceGender::Male).unwrap(),
                "\"MALE\""
            );
        }

        mod properties {
            use super::*;
            use proptest::prelude::*;

            proptest! {
                /// Any parsed voice keeps the first two segments as the
                /// language code and never panics on arbitrary input.
                #[test]
                fn parse_never_panics(name in ".{0,64}") {
                    match VoiceSelection::parse(&name) {
                        Ok(voice) => {
                            let segments: Vec<&str> = name.split('-').collect();
                            prop_assert!(segments.len() >= 3);
                            prop_assert_eq!(
                                voice.language_code,
                                format!("{}-{}", segments[0], segments[1])
                            );
                            prop_assert_eq!(
                                voice.gender == VoiceGender::Female,
                                name.contains('F')
                            );
                        },
                        Err(SpeechError::InvalidVoice(_)) => {
                            prop_assert!(name.split('-').count() < 3);
                        },
                        Err(other) => prop_assert!(false, "unexpected error: {other}"),
                    }
                }
            }
        }
    }

    mod audio_format {
        use super::*;

        #[test]
        fn mime_types_are_correct() {
            assert_eq!(AudioFormat::Mp3.mime_type(), "audio/mp3");
            assert_eq!(AudioFormat::Wav.mime_type(), "audio/wav");
            assert_eq!(AudioFormat::Ogg.mime_type(), "audio/ogg");
            assert_eq!(AudioFormat::Flac.mime_type(), "audio/flac");
            assert_eq!(AudioFormat::Webm.mime_type(), "audio/webm");
            assert_eq!(AudioFormat::M4a.mime_type(), "audio/m4a");
            assert_eq!(AudioFormat::Opus.mime_type(), "audio/opus");
        }

        #[test]
        fn from_extension_parses_common_names() {
            assert_eq!(AudioFormat::from_extension("mp3"), Some(AudioFormat::Mp3));
            assert_eq!(AudioFormat::from_extension(".wav"), Some(AudioFormat::Wav));
            assert_eq!(AudioFormat::from_extension("WEBM"), Some(AudioFormat::Webm));
            assert_eq!(AudioFormat::from_extension("m4a"), Some(AudioFormat::M4a));
            assert_eq!(AudioFormat::from_extension("txt"), None);
        }

        #[test]
        fn display_matches_extension() {
            assert_eq!(format!("{}", AudioFormat::Mp3), "mp3");
            assert_eq!(format!("{}", AudioFormat::Wav), "wav");
            assert_eq!(format!("{}", AudioFormat::Ogg), "ogg");
        }
    }

    mod audio_data {
        use super::*;

        #[test]
        fn new_creates_audio_data() {
            let data = vec![1, 2, 3, 4];
            let audio = AudioData::new(data.clone(), AudioFormat::Mp3);

            assert_eq!(audio.data(), &data);
            assert_eq!(audio.format(), AudioFormat::Mp3);
            assert_eq!(audio.size_bytes(), 4);
            assert!(!audio.is_empty());
        }

        #[test]
        fn is_empty_for_no_bytes() {
            let audio = AudioData::new(vec![], AudioFormat::Wav);
            assert!(audio.is_empty());
        }

        #[test]
        fn into_data_consumes_and_returns_bytes() {
            let original = vec![1, 2, 3, 4, 5];
            let audio = AudioData::new(original.clone(), AudioFormat::Ogg);
            assert_eq!(audio.into_data(), original);
        }

        #[test]
        fn mime_type_delegates_to_format() {
            let audio = AudioData::new(vec![], AudioFormat::Mp3);
            assert_eq!(audio.mime_type(), "audio/mp3");
        }
    }

    mod transcription {
        use super::*;

        #[test]
        fn new_creates_simple_transcription() {
            let transcription = Transcription::new("Hello, world!");
            assert_eq!(transcription.text, "Hello, world!");
            assert!(transcription.confidence.is_none());
        }

        #[test]
        fn with_confidence_sets_confidence() {
            let transcription = Transcription::new("Test").with_confidence(0.95);
            assert_eq!(transcription.confidence, Some(0.95));
        }

        #[test]
        fn is_empty_for_whitespace_only() {
            assert!(Transcription::new("").is_empty());
            assert!(Transcription::new("   \n\t  ").is_empty());
            assert!(!Transcription::new("Hello").is_empty());
        }

        #[test]
        fn fallback_text_is_not_empty() {
            assert!(!Transcription::new(EMPTY_TRANSCRIPT_FALLBACK).is_empty());
        }
    }
}
