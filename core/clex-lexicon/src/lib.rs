//! Classification of words against the C keyword vocabularies.

pub mod archive;
pub mod classifier;
pub mod error;
pub mod lexicon;
pub mod symbols;
pub mod vocabulary;
mod words;

pub use archive::{decode, encode};
pub use classifier::{KeywordClassifier, SharedClassifier};
pub use error::LexiconError;
pub use lexicon::{Lexicon, LexiconBuilder};
pub use symbols::{is_grammatical_symbol, GRAMMATICAL_SYMBOLS};
pub use vocabulary::{ExtensionVocabulary, Vocabulary};

pub use clex_protocol::{Category, CategoryFlags, Dialect, LexiconData, Revision};
