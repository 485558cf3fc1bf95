use std::sync::{Arc, PoisonError, RwLock};

use clex_protocol::{Category, CategoryFlags, LexiconData};
use log::{debug, trace};

use crate::error::LexiconError;
use crate::lexicon::Lexicon;
use crate::vocabulary::ExtensionVocabulary;

/// Classifies words against a shared [`Lexicon`] plus an owned extension
/// vocabulary of `#define`d names.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    lexicon: Arc<Lexicon>,
    defined: ExtensionVocabulary,
}

impl KeywordClassifier {
    pub fn new(lexicon: impl Into<Arc<Lexicon>>) -> Self {
        Self {
            lexicon: lexicon.into(),
            defined: ExtensionVocabulary::new(),
        }
    }

    /// Starts with the extension vocabulary pre-seeded.
    pub fn with_defined<I, S>(lexicon: impl Into<Arc<Lexicon>>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lexicon: lexicon.into(),
            defined: words.into_iter().collect(),
        }
    }

    /// Builds the lexicon from a document and seeds its `defined` names.
    pub fn from_data(data: &LexiconData) -> Result<Self, LexiconError> {
        let lexicon = Lexicon::from_data(data)?;
        if data.defined.iter().any(String::is_empty) {
            return Err(LexiconError::EmptyDefine);
        }
        Ok(Self::with_defined(lexicon, data.defined.iter().cloned()))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn defined(&self) -> &ExtensionVocabulary {
        &self.defined
    }

    pub fn is_in_vocabulary(&self, category: Category, word: &str) -> bool {
        self.lexicon.contains(category, word)
    }

    /// True for a word of any fixed vocabulary or the extension vocabulary.
    pub fn is_in_any_vocabulary(&self, word: &str) -> bool {
        self.lexicon.contains_any(word) || self.defined.contains(word)
    }

    pub fn is_defined(&self, word: &str) -> bool {
        self.defined.contains(word)
    }

    /// Returns `true` only if `word` was not already present.
    pub fn add_to_extension_vocabulary(&mut self, word: &str) -> bool {
        let inserted = self.defined.insert(word);
        if inserted {
            debug!("defined `{}` ({} names defined)", word, self.defined.len());
        }
        inserted
    }

    pub fn classify(&self, word: &str) -> CategoryFlags {
        classify_with(&self.lexicon, &self.defined, word)
    }

    pub fn into_shared(self) -> SharedClassifier {
        SharedClassifier {
            lexicon: self.lexicon,
            defined: RwLock::new(self.defined),
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}

fn classify_with(lexicon: &Lexicon, defined: &ExtensionVocabulary, word: &str) -> CategoryFlags {
    let mut flags = lexicon.categories_of(word);
    if defined.contains(word) {
        flags |= CategoryFlags::DEFINED;
    }
    if flags.is_empty() {
        trace!("`{}` is not in any vocabulary", word);
    }
    flags
}

/// A [`KeywordClassifier`] usable from several threads at once.
///
/// The lexicon is read without locking; the extension vocabulary sits behind
/// a `RwLock` so inserts exclude readers.
#[derive(Debug)]
pub struct SharedClassifier {
    lexicon: Arc<Lexicon>,
    defined: RwLock<ExtensionVocabulary>,
}

impl SharedClassifier {
    pub fn new(lexicon: impl Into<Arc<Lexicon>>) -> Self {
        KeywordClassifier::new(lexicon).into_shared()
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn is_in_vocabulary(&self, category: Category, word: &str) -> bool {
        self.lexicon.contains(category, word)
    }

    pub fn is_in_any_vocabulary(&self, word: &str) -> bool {
        self.lexicon.contains_any(word) || self.is_defined(word)
    }

    pub fn is_defined(&self, word: &str) -> bool {
        // A set insert never leaves a half-applied state, so a poisoned lock
        // still guards a consistent set.
        self.defined
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(word)
    }

    pub fn add_to_extension_vocabulary(&self, word: &str) -> bool {
        let mut defined = self.defined.write().unwrap_or_else(PoisonError::into_inner);
        let inserted = defined.insert(word);
        if inserted {
            debug!("defined `{}` ({} names defined)", word, defined.len());
        }
        inserted
    }

    pub fn classify(&self, word: &str) -> CategoryFlags {
        let defined = self.defined.read().unwrap_or_else(PoisonError::into_inner);
        classify_with(&self.lexicon, &defined, word)
    }

    /// A point-in-time copy for single-threaded use.
    pub fn snapshot(&self) -> KeywordClassifier {
        let defined = self.defined.read().unwrap_or_else(PoisonError::into_inner);
        KeywordClassifier {
            lexicon: Arc::clone(&self.lexicon),
            defined: defined.clone(),
        }
    }
}
