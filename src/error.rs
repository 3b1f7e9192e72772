use std::path::{Path, PathBuf};
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Configuration key that caused the error (e.g., "backend.timeout_secs")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "config_loader", "env")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Failures of the speech-synthesis capability.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("No text to speak")]
    EmptyText,

    #[error("No text to send to TTS API after tokenization")]
    NoSpeakableText,

    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),

    #[error("Failed to connect. Probable cause: {hint} ({message})")]
    Network { message: String, hint: String },

    #[error("{status} ({reason}) from TTS API. Probable cause: {cause}")]
    Http {
        status: u16,
        reason: String,
        cause: String,
    },

    #[error("No audio stream in response. Unsupported language '{language}'")]
    NoAudio { language: String },

    #[error("Failed to decode audio payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Unified error type for the converter.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Wrap an I/O failure together with the path it happened on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }

    pub fn is_synthesis(&self) -> bool {
        matches!(self, Error::Synthesis(_))
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display_includes_context() {
        let err = Error::configuration_with_context(
            "invalid timeout",
            ErrorContext::new()
                .with_field_path("backend.timeout_secs")
                .with_source("env"),
        );
        assert_eq!(
            err.to_string(),
            "Configuration error: invalid timeout (field: backend.timeout_secs, source: env)"
        );
        assert!(err.context().is_some());
    }

    #[test]
    fn test_io_error_names_path() {
        let err = Error::io(
            "missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.is_io());
        assert!(!err.is_synthesis());
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_http_error_message() {
        let err: Error = SynthesisError::Http {
            status: 403,
            reason: "Forbidden".to_string(),
            cause: "Bad token or upstream API changes".to_string(),
        }
        .into();
        assert!(err.is_synthesis());
        assert_eq!(
            err.to_string(),
            "Synthesis error: 403 (Forbidden) from TTS API. Probable cause: Bad token or upstream API changes"
        );
    }
}
