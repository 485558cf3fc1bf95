use clex_protocol::Category;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("unsupported lexicon format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("empty word in the {0} vocabulary")]
    EmptyWord(Category),

    #[error("empty name in the defined list")]
    EmptyDefine,

    #[error("invalid lexicon archive: {0}")]
    InvalidArchive(String),

    #[error("failed to encode lexicon: {0}")]
    Encode(String),
}
