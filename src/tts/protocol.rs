//! Wire format of the Translate web UI `batchexecute` RPC used for speech.
//!
//! Request: a form body with a single `f.req` field holding
//! `[[["jQ1olc", "<inner json>", null, "generic"]]]`, where the inner JSON is
//! `[text, lang, speed, "null"]` and `speed` is `true` for slow speech or
//! `null` otherwise.
//!
//! Response: a line-oriented envelope; the line carrying the RPC id holds the
//! base64-encoded MP3 as `jQ1olc","[\"<base64>\"]`.

use super::types::SpeechRate;
use crate::error::SynthesisError;
use base64::Engine as _;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

/// RPC identifier of the speech endpoint.
pub const RPC_ID: &str = "jQ1olc";

/// Path of the RPC endpoint, relative to the host root.
pub const ENDPOINT_PATH: &str = "_/TranslateWebserverUi/data/batchexecute";

static AUDIO_PAYLOAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"jQ1olc","\[\\"(.*)\\"]"#).expect("audio payload pattern is valid")
});

/// Build the url-encoded form body for one chunk of text.
pub fn encode_request(text: &str, lang: &str, rate: SpeechRate) -> String {
    let speed = if rate.is_slow() { Value::Bool(true) } else { Value::Null };
    let inner = json!([text, lang, speed, "null"]).to_string();
    let envelope = json!([[[RPC_ID, inner, null, "generic"]]]).to_string();

    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("f.req", &envelope)
        .finish()
}

/// Extract and decode the audio carried by a response body.
///
/// A line that names the RPC but carries no payload, or a body with no such
/// line at all, means the backend produced no audio for `lang`.
pub fn decode_response(body: &str, lang: &str) -> Result<Vec<u8>, SynthesisError> {
    let mut audio = Vec::new();
    let mut found = false;

    for line in body.lines().filter(|line| line.contains(RPC_ID)) {
        let captures = AUDIO_PAYLOAD
            .captures(line)
            .ok_or_else(|| SynthesisError::NoAudio {
                language: lang.to_string(),
            })?;
        let decoded = base64::engine::general_purpose::STANDARD.decode(&captures[1])?;
        audio.extend_from_slice(&decoded);
        found = true;
    }

    if !found {
        return Err(SynthesisError::NoAudio {
            language: lang.to_string(),
        });
    }
    Ok(audio)
}

/// Wrap base64 audio in the response envelope the backend sends.
#[cfg(test)]
pub(crate) fn sample_response(audio: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(audio);
    format!(
        ")]}}'\n\n{}\n[[\"wrb.fr\",\"{}\",\"[\\\"{}\\\"]\",null,null,null,\"generic\"]]\n",
        120 + b64.len(),
        RPC_ID,
        b64
    )
}
