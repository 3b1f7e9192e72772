//! text-to-audio — read a text file and save it as spoken MP3.
//!
//! Configuration comes from the YAML file named by `TEXT_TO_AUDIO_CONFIG`
//! (default `text_to_audio.yaml`, optional) and `TEXT_TO_AUDIO_*` overrides:
//!
//!   TEXT_TO_AUDIO_SOURCE        text file to read
//!   TEXT_TO_AUDIO_DESTINATION   MP3 file to write
//!   TEXT_TO_AUDIO_LANG          language code (default "en")
//!   TEXT_TO_AUDIO_SLOW          speak slowly (default false)
//!   TEXT_TO_AUDIO_LANG_CHECK    reject unknown language codes (default true)
//!   TEXT_TO_AUDIO_TLD           Google Translate domain (default "com")
//!   TEXT_TO_AUDIO_TIMEOUT_SECS  per-request timeout (default none)
//!   TEXT_TO_AUDIO_PROXY_URL     HTTP(S) proxy
//!
//! Log verbosity follows `RUST_LOG`.

use anyhow::Context;
use text_to_audio::{AppConfig, TextToSpeechConverter};

fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let client = config
        .backend
        .build_client()
        .context("failed to set up the TTS client")?;

    let converter = TextToSpeechConverter::new(config.conversion, client);
    let report = converter.convert().with_context(|| {
        format!(
            "failed to convert '{}'",
            converter.config().source_path.display()
        )
    })?;

    tracing::info!(
        source = %report.source_path.display(),
        destination = %report.destination_path.display(),
        characters = report.characters,
        bytes = report.bytes_written,
        "Done"
    );
    Ok(())
}
