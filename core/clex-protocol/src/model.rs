use rkyv::{Archive, Deserialize, Serialize};
use crate::category::{Category, Dialect, Revision};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Format version written into every lexicon document.
pub const LEXICON_FORMAT_VERSION: u32 = 1;

/// The words of one fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct VocabularyData {
    pub category: Category,
    pub words: Vec<String>,
}

/// A complete lexicon as stored on disk (JSON or rkyv).
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct LexiconData {
    pub version: u32,
    pub revision: Revision,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dialects: Vec<Dialect>,
    pub vocabularies: Vec<VocabularyData>,
    /// Names seeded into the extension vocabulary.
    #[cfg_attr(feature = "serde", serde(default))]
    pub defined: Vec<String>,
}

impl LexiconData {
    /// An empty document of the current format version.
    pub fn empty(revision: Revision) -> Self {
        Self {
            version: LEXICON_FORMAT_VERSION,
            revision,
            dialects: Vec::new(),
            vocabularies: Vec::new(),
            defined: Vec::new(),
        }
    }

    /// All words listed for `category`, across repeated entries.
    pub fn words(&self, category: Category) -> impl Iterator<Item = &str> {
        self.vocabularies
            .iter()
            .filter(move |v| v.category == category)
            .flat_map(|v| v.words.iter().map(String::as_str))
    }
}
