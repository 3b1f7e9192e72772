//! Shared fixtures for integration tests

#![allow(dead_code)]

use base64::Engine as _;
use mockito::{Mock, Server, ServerGuard};
use text_to_audio::GoogleTtsClient;

pub const BATCHEXECUTE_PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";

/// Test fixture that manages a mock speech backend
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub fn new() -> Self {
        let server = Server::new();
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Create a client pointed at the mock server
    pub fn client(&self) -> GoogleTtsClient {
        GoogleTtsClient::builder()
            .base_url(self.base_url.as_str())
            .build()
            .expect("client builds")
    }

    /// Answer requests whose body matches `body_pattern` with `audio`
    pub fn mock_audio(&mut self, body_pattern: &str, audio: &[u8]) -> Mock {
        self.server
            .mock("POST", BATCHEXECUTE_PATH)
            .match_body(mockito::Matcher::Regex(body_pattern.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json; charset=utf-8")
            .with_body(audio_envelope(audio))
            .create()
    }

    /// Answer every request with `status` and `body`
    pub fn mock_status(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", BATCHEXECUTE_PATH)
            .with_status(status)
            .with_body(body)
            .create()
    }
}

/// Response envelope carrying `audio` the way the backend encodes it
pub fn audio_envelope(audio: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(audio);
    format!(
        ")]}}'\n\n{}\n[[\"wrb.fr\",\"jQ1olc\",\"[\\\"{}\\\"]\",null,null,null,\"generic\"]]\n56\n[[\"di\",42],[\"af.httprm\",41,\"-1\",3]]\n",
        b64.len() + 60,
        b64
    )
}
