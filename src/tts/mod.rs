//! TTS（文字转语音）模块：将规范化后的文本合成为 MP3 音频。
//!
//! The [`Synthesizer`] trait is the seam between the converter and whatever
//! produces audio; [`GoogleTtsClient`] is the network-backed implementation.

mod client;
pub mod lang;
pub mod protocol;
mod types;

pub use client::{GoogleTtsClient, GoogleTtsClientBuilder};
pub use lang::supported_languages;
pub use types::{AudioFormat, AudioOutput, Language, SpeechRate};

use crate::Result;

/// Turns text into audio.
///
/// Implementations may fail for any reason (unreachable backend, rejected
/// input); the caller gets the error unchanged and does not retry.
pub trait Synthesizer {
    fn synthesize(&self, text: &str, language: &Language, rate: SpeechRate) -> Result<AudioOutput>;
}

impl<S: Synthesizer + ?Sized> Synthesizer for &S {
    fn synthesize(&self, text: &str, language: &Language, rate: SpeechRate) -> Result<AudioOutput> {
        (**self).synthesize(text, language, rate)
    }
}

impl<S: Synthesizer + ?Sized> Synthesizer for Box<S> {
    fn synthesize(&self, text: &str, language: &Language, rate: SpeechRate) -> Result<AudioOutput> {
        (**self).synthesize(text, language, rate)
    }
}
