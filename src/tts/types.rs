//! TTS (Text-to-Speech) types.

use super::lang;
use crate::error::SynthesisError;
use bytes::Bytes;
use std::fmt;

/// Audio output from TTS.
#[derive(Debug, Clone)]
pub struct AudioOutput {
    pub data: Bytes,
    pub format: AudioFormat,
}

impl AudioOutput {
    pub fn mp3(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            format: AudioFormat::Mp3,
        }
    }
}

/// Supported audio formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
}

impl AudioFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
        }
    }
}

/// Speaking rate requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeechRate {
    #[default]
    Normal,
    Slow,
}

impl SpeechRate {
    pub fn from_slow(slow: bool) -> Self {
        if slow {
            Self::Slow
        } else {
            Self::Normal
        }
    }

    pub fn is_slow(&self) -> bool {
        matches!(self, Self::Slow)
    }
}

/// A language code accepted by the synthesis backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language {
    code: String,
}

impl Language {
    /// Validate `code` against the supported table.
    ///
    /// Matching is case-insensitive and deprecated regional codes such as
    /// `en-us` or `pt-br` resolve to their replacement.
    pub fn parse(code: &str) -> Result<Self, SynthesisError> {
        let wanted = code.trim();
        lang::canonical_code(wanted)
            .map(|code| Self {
                code: code.to_string(),
            })
            .ok_or_else(|| SynthesisError::UnsupportedLanguage(wanted.to_string()))
    }

    /// Accept `code` as-is, bypassing the supported-language check.
    pub fn unchecked(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn english() -> Self {
        Self::unchecked("en")
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable name, when the code is in the supported table.
    pub fn name(&self) -> Option<&'static str> {
        lang::language_name(&self.code)
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Language::parse("EN").unwrap().code(), "en");
        assert_eq!(Language::parse("zh-cn").unwrap().code(), "zh-CN");
        assert_eq!(Language::parse("fr-ca").unwrap().code(), "fr-CA");
    }

    #[test]
    fn test_parse_deprecated_regional_codes() {
        assert_eq!(Language::parse("en-us").unwrap().code(), "en");
        assert_eq!(Language::parse("en-GB").unwrap().code(), "en");
        assert_eq!(Language::parse("pt-br").unwrap().code(), "pt");
        assert_eq!(Language::parse("es-us").unwrap().code(), "es");
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = Language::parse("xx-klingon").unwrap_err();
        assert!(matches!(err, SynthesisError::UnsupportedLanguage(ref c) if c == "xx-klingon"));
    }

    #[test]
    fn test_unchecked_keeps_code() {
        let lang = Language::unchecked("xx");
        assert_eq!(lang.code(), "xx");
        assert!(lang.name().is_none());
        assert_eq!(Language::default().name(), Some("English"));
    }

    #[test]
    fn test_speech_rate_from_flag() {
        assert_eq!(SpeechRate::from_slow(false), SpeechRate::Normal);
        assert!(SpeechRate::from_slow(true).is_slow());
        assert!(!SpeechRate::default().is_slow());
    }
}
