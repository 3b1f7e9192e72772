//! The text-to-speech conversion: read, normalize, synthesize, persist.

use crate::config::ConversionConfig;
use crate::error::SynthesisError;
use crate::output::PartialFile;
use crate::text::normalize_whitespace;
use crate::tts::Synthesizer;
use crate::{Error, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// Summary of a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    /// Characters of normalized text sent for synthesis
    pub characters: usize,
    pub bytes_written: u64,
}

/// Converts one text file into one MP3 file.
pub struct TextToSpeechConverter<S> {
    config: ConversionConfig,
    synthesizer: S,
}

impl<S: Synthesizer> TextToSpeechConverter<S> {
    pub fn new(config: ConversionConfig, synthesizer: S) -> Self {
        Self {
            config,
            synthesizer,
        }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Run the conversion.
    ///
    /// The synthesizer is called at most once, and only after the source was
    /// read and found to contain text. On any failure the destination is left
    /// as it was.
    pub fn convert(&self) -> Result<ConversionReport> {
        let language = self.config.resolve_language()?;
        let source = &self.config.source_path;
        let destination = &self.config.destination_path;
        info!(
            source = %source.display(),
            destination = %destination.display(),
            language = %language,
            "Converting text to speech"
        );

        let content = std::fs::read_to_string(source).map_err(|e| Error::io(source, e))?;
        let normalized = normalize_whitespace(&content);
        let text = normalized.trim();
        if text.is_empty() {
            return Err(SynthesisError::EmptyText.into());
        }
        debug!(
            read_bytes = content.len(),
            characters = text.chars().count(),
            "Normalized source text"
        );

        let audio = self
            .synthesizer
            .synthesize(text, &language, self.config.speech_rate())?;

        let mut output = PartialFile::create(destination)?;
        output.write_all(&audio.data)?;
        let bytes_written = output.commit()?;

        info!(
            destination = %destination.display(),
            bytes = bytes_written,
            format = audio.format.mime_type(),
            "Saved audio"
        );
        Ok(ConversionReport {
            source_path: source.clone(),
            destination_path: destination.clone(),
            characters: text.chars().count(),
            bytes_written,
        })
    }
}

/// Convert `config.source_path` into `config.destination_path` with `synthesizer`.
pub fn convert_file<S: Synthesizer>(config: ConversionConfig, synthesizer: S) -> Result<ConversionReport> {
    TextToSpeechConverter::new(config, synthesizer).convert()
}
