//! # text-to-audio
//!
//! Turn a plain-text document into a spoken MP3 file.
//!
//! The conversion is a single straight line: read the source file, collapse
//! every whitespace run to one space, hand the text to a [`Synthesizer`] with
//! a language code and speaking rate, and write the returned audio to the
//! destination. The bundled synthesizer, [`GoogleTtsClient`], speaks to the
//! TTS backend of Google Translate.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use text_to_audio::{convert_file, ConversionConfig, GoogleTtsClient};
//!
//! fn main() -> text_to_audio::Result<()> {
//!     let config = ConversionConfig::new("gdpr_part1.txt", "gdpr_part1.mp3")
//!         .with_language("en")
//!         .with_slow(false);
//!     let client = GoogleTtsClient::builder().build()?;
//!
//!     let report = convert_file(config, client)?;
//!     println!("wrote {} bytes", report.bytes_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`converter`] | The conversion operation |
//! | [`text`] | Whitespace normalization and chunking |
//! | [`tts`] | Synthesizer trait and the Google TTS client |
//! | [`output`] | Discard-on-failure destination writer |
//! | [`config`] | Configuration structs, YAML and environment loading |

pub mod config;
pub mod converter;
pub mod output;
pub mod text;
pub mod tts;

pub use config::{AppConfig, BackendConfig, ConversionConfig};
pub use converter::{convert_file, ConversionReport, TextToSpeechConverter};
pub use text::normalize_whitespace;
pub use tts::{AudioFormat, AudioOutput, GoogleTtsClient, Language, SpeechRate, Synthesizer};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, SynthesisError};
