//! Google Translate TTS client.

use super::protocol;
use super::types::{AudioOutput, Language, SpeechRate};
use super::Synthesizer;
use crate::error::SynthesisError;
use crate::text::Tokenizer;
use crate::{Error, ErrorContext, Result};
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, REFERER, USER_AGENT};
use reqwest::{Proxy, StatusCode};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const DEFAULT_TLD: &str = "com";
const REFERER_URL: &str = "http://translate.google.com/";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/47.0.2526.106 Safari/537.36";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=utf-8";

/// Blocking client for the speech endpoint behind Google Translate.
///
/// Text is split into backend-sized chunks, one request is made per chunk and
/// the returned MP3 segments are concatenated in order.
pub struct GoogleTtsClient {
    http_client: Client,
    endpoint: Url,
    tld: String,
    tokenizer: Tokenizer,
}

impl GoogleTtsClient {
    pub fn builder() -> GoogleTtsClientBuilder {
        GoogleTtsClientBuilder::new()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn tld(&self) -> &str {
        &self.tld
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    fn request_chunk(&self, chunk: &str, language: &Language, rate: SpeechRate) -> Result<Vec<u8>> {
        let body = protocol::encode_request(chunk, language.code(), rate);
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(REFERER, REFERER_URL)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .map_err(|e| self.network_error(e))?;

        let status = response.status();
        let text = response.text().map_err(|e| self.network_error(e))?;
        if !status.is_success() {
            return Err(SynthesisError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                cause: infer_cause(status, &self.tld),
            }
            .into());
        }
        Ok(protocol::decode_response(&text, language.code())?)
    }

    fn network_error(&self, err: reqwest::Error) -> Error {
        let host = self.endpoint.host_str().unwrap_or("unknown host");
        SynthesisError::Network {
            message: err.to_string(),
            hint: format!("Host '{}' is not reachable", host),
        }
        .into()
    }
}

impl Synthesizer for GoogleTtsClient {
    fn synthesize(&self, text: &str, language: &Language, rate: SpeechRate) -> Result<AudioOutput> {
        if text.trim().is_empty() {
            return Err(SynthesisError::EmptyText.into());
        }
        let chunks = self.tokenizer.chunks(text);
        if chunks.is_empty() {
            return Err(SynthesisError::NoSpeakableText.into());
        }

        info!(
            language = %language,
            slow = rate.is_slow(),
            chunks = chunks.len(),
            "Synthesizing speech"
        );
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            debug!(chunk = idx + 1, total = chunks.len(), chars = chunk.chars().count(), "Requesting chunk");
            let part = self.request_chunk(chunk, language, rate)?;
            audio.extend_from_slice(&part);
        }
        Ok(AudioOutput::mp3(audio))
    }
}

/// Best guess at why the backend answered `status`.
fn infer_cause(status: StatusCode, tld: &str) -> String {
    match status.as_u16() {
        403 => "Bad token or upstream API changes".to_string(),
        404 if tld != DEFAULT_TLD => format!("Unsupported tld '{}'", tld),
        s if s >= 500 => "Upstream API error. Try again later.".to_string(),
        _ => "Unknown".to_string(),
    }
}

pub struct GoogleTtsClientBuilder {
    tld: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    proxy_url: Option<String>,
    tokenizer: Tokenizer,
}

impl GoogleTtsClientBuilder {
    pub fn new() -> Self {
        Self {
            tld: None,
            base_url: None,
            timeout: None,
            proxy_url: None,
            tokenizer: Tokenizer::new(),
        }
    }
    /// Top-level domain of the Translate host, e.g. `com`, `co.uk`, `com.au`.
    pub fn tld(mut self, tld: impl Into<String>) -> Self {
        self.tld = Some(tld.into());
        self
    }
    /// Host root to use instead of `https://translate.google.{tld}/`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
    /// Per-request timeout. Requests block indefinitely when unset.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
    pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }
    pub fn tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn build(self) -> Result<GoogleTtsClient> {
        let tld = self.tld.unwrap_or_else(|| DEFAULT_TLD.to_string());
        let base_url = self
            .base_url
            .unwrap_or_else(|| format!("https://translate.google.{}/", tld));
        let endpoint = Url::parse(&base_url)
            .and_then(|base| base.join(protocol::ENDPOINT_PATH))
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid TTS base URL: {}", e),
                    ErrorContext::new()
                        .with_field_path("backend.base_url")
                        .with_details(base_url.clone()),
                )
            })?;

        let mut builder = Client::builder().timeout(self.timeout);
        if let Some(proxy_url) = &self.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    ErrorContext::new().with_field_path("backend.proxy_url"),
                )
            })?;
            builder = builder.proxy(proxy);
        }
        let http_client = builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(GoogleTtsClient {
            http_client,
            endpoint,
            tld,
            tokenizer: self.tokenizer,
        })
    }
}

impl Default for GoogleTtsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let client = GoogleTtsClient::builder().build().unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://translate.google.com/_/TranslateWebserverUi/data/batchexecute"
        );
        assert_eq!(client.tld(), "com");
    }

    #[test]
    fn test_endpoint_follows_tld() {
        let client = GoogleTtsClient::builder().tld("co.uk").build().unwrap();
        assert_eq!(
            client.endpoint().host_str(),
            Some("translate.google.co.uk")
        );
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let err = GoogleTtsClient::builder()
            .base_url("not a url")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, Error::Configuration { .. }));
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("backend.base_url")
        );
    }

    #[test]
    fn test_infer_cause() {
        assert_eq!(
            infer_cause(StatusCode::FORBIDDEN, "com"),
            "Bad token or upstream API changes"
        );
        assert_eq!(
            infer_cause(StatusCode::NOT_FOUND, "xyz"),
            "Unsupported tld 'xyz'"
        );
        assert_eq!(infer_cause(StatusCode::NOT_FOUND, "com"), "Unknown");
        assert_eq!(
            infer_cause(StatusCode::SERVICE_UNAVAILABLE, "com"),
            "Upstream API error. Try again later."
        );
    }

    #[test]
    fn test_empty_text_is_rejected_before_any_request() {
        let client = GoogleTtsClient::builder()
            .base_url("http://127.0.0.1:9/")
            .build()
            .unwrap();
        let err = client
            .synthesize("   ", &Language::english(), SpeechRate::Normal)
            .unwrap_err();
        assert!(matches!(err, Error::Synthesis(SynthesisError::EmptyText)));

        let err = client
            .synthesize(" ... ", &Language::english(), SpeechRate::Normal)
            .unwrap_err();
        assert!(matches!(err, Error::Synthesis(SynthesisError::NoSpeakableText)));
    }
}
