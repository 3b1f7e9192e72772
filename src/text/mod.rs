//! Text preparation: whitespace normalization and request-sized chunking.

pub mod normalize;
pub mod tokenize;

pub use normalize::{is_normalized, normalize_whitespace};
pub use tokenize::{Tokenizer, MAX_CHUNK_CHARS};
