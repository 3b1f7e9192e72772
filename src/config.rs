//! Configuration structures
//!
//! Settings come from an optional YAML file, then `TEXT_TO_AUDIO_*`
//! environment variables override individual fields.
//!
//! ```yaml
//! conversion:
//!   source_path: ./gdpr_part3_art53_to_end.txt
//!   destination_path: ./gdpr_part3_art53_to_end.mp3
//!   language: en
//!   slow: false
//! backend:
//!   tld: com
//!   timeout_secs: 120
//! ```

use crate::error::SynthesisError;
use crate::text::{Tokenizer, MAX_CHUNK_CHARS};
use crate::tts::{GoogleTtsClient, Language, SpeechRate};
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the YAML configuration file.
pub const CONFIG_PATH_ENV: &str = "TEXT_TO_AUDIO_CONFIG";

/// File read when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "text_to_audio.yaml";

const ENV_PREFIX: &str = "TEXT_TO_AUDIO_";

/// What to convert and how it should sound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Text file to read
    pub source_path: PathBuf,
    /// Where to write the MP3; an existing file is replaced
    pub destination_path: PathBuf,
    /// Synthesis locale, e.g. "en"
    pub language: String,
    /// Speak slowly
    pub slow: bool,
    /// Reject language codes missing from the supported table
    pub lang_check: bool,
}

impl ConversionConfig {
    pub fn new(source_path: impl Into<PathBuf>, destination_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            destination_path: destination_path.into(),
            ..Self::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_slow(mut self, slow: bool) -> Self {
        self.slow = slow;
        self
    }

    pub fn with_lang_check(mut self, lang_check: bool) -> Self {
        self.lang_check = lang_check;
        self
    }

    pub fn speech_rate(&self) -> SpeechRate {
        SpeechRate::from_slow(self.slow)
    }

    pub fn resolve_language(&self) -> std::result::Result<Language, SynthesisError> {
        if self.lang_check {
            Language::parse(&self.language)
        } else {
            Ok(Language::unchecked(self.language.trim()))
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_path.as_os_str().is_empty() {
            return Err(missing_field("conversion.source_path", "SOURCE"));
        }
        if self.destination_path.as_os_str().is_empty() {
            return Err(missing_field("conversion.destination_path", "DESTINATION"));
        }
        if self.language.trim().is_empty() {
            return Err(missing_field("conversion.language", "LANG"));
        }
        Ok(())
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::new(),
            destination_path: PathBuf::new(),
            language: "en".to_string(),
            slow: false,
            lang_check: true,
        }
    }
}

/// Settings of the Google Translate TTS backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub tld: String,
    /// Host root replacing `https://translate.google.{tld}/`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Unset means requests may block indefinitely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    pub max_chunk_chars: usize,
}

impl BackendConfig {
    pub fn build_client(&self) -> Result<GoogleTtsClient> {
        let mut builder = GoogleTtsClient::builder()
            .tld(self.tld.clone())
            .tokenizer(Tokenizer::new().with_max_chars(self.max_chunk_chars));
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url.clone());
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(proxy_url) = &self.proxy_url {
            builder = builder.proxy_url(proxy_url.clone());
        }
        builder.build()
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            tld: "com".to_string(),
            base_url: None,
            timeout_secs: None,
            proxy_url: None,
            max_chunk_chars: MAX_CHUNK_CHARS,
        }
    }
}

/// Complete configuration of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub conversion: ConversionConfig,
    pub backend: BackendConfig,
}

impl AppConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            Error::configuration_with_context(
                "Invalid configuration YAML",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("config_loader"),
            )
        })
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_yaml_str(&yaml)
    }

    /// Load the file named by `TEXT_TO_AUDIO_CONFIG` (or the default file when
    /// it exists), apply environment overrides and validate.
    pub fn load() -> Result<Self> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    /// [`AppConfig::load`] with variables read through `env`, which maps a
    /// full variable name such as `TEXT_TO_AUDIO_SOURCE` to its value.
    pub fn load_with<F>(env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match env(CONFIG_PATH_ENV) {
            Some(path) => Self::from_yaml_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_yaml_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| env(&format!("{}{}", ENV_PREFIX, key)))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps an unprefixed key such as
    /// `SOURCE` to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SOURCE") {
            self.conversion.source_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("DESTINATION") {
            self.conversion.destination_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("LANG") {
            self.conversion.language = v;
        }
        if let Some(v) = lookup("SLOW") {
            self.conversion.slow = parse_bool("SLOW", "conversion.slow", &v)?;
        }
        if let Some(v) = lookup("LANG_CHECK") {
            self.conversion.lang_check = parse_bool("LANG_CHECK", "conversion.lang_check", &v)?;
        }
        if let Some(v) = lookup("TLD") {
            self.backend.tld = v;
        }
        if let Some(v) = lookup("TIMEOUT_SECS") {
            let secs = v.trim().parse::<u64>().map_err(|_| {
                env_error("TIMEOUT_SECS", "backend.timeout_secs", &v, "expected whole seconds")
            })?;
            self.backend.timeout_secs = Some(secs);
        }
        if let Some(v) = lookup("PROXY_URL") {
            self.backend.proxy_url = Some(v);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.conversion.validate()?;
        if self.backend.tld.trim().is_empty() {
            return Err(missing_field("backend.tld", "TLD"));
        }
        if self.backend.max_chunk_chars == 0 {
            return Err(Error::configuration_with_context(
                "Chunk size must be positive",
                ErrorContext::new().with_field_path("backend.max_chunk_chars"),
            ));
        }
        Ok(())
    }
}

fn parse_bool(key: &str, field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(env_error(key, field, value, "expected true or false")),
    }
}

fn env_error(key: &str, field: &str, value: &str, expected: &str) -> Error {
    Error::configuration_with_context(
        format!("Invalid value '{}' for {}{}: {}", value, ENV_PREFIX, key, expected),
        ErrorContext::new().with_field_path(field).with_source("env"),
    )
}

fn missing_field(field: &str, env_key: &str) -> Error {
    Error::configuration_with_context(
        format!("{} is required", field),
        ErrorContext::new().with_details(format!("set it in the config file or {}{}", ENV_PREFIX, env_key)),
    )
}
