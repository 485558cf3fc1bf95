use clex_protocol::{
    Category, CategoryFlags, Dialect, LexiconData, Revision, VocabularyData, LEXICON_FORMAT_VERSION,
};
use log::debug;

use crate::archive;
use crate::error::LexiconError;
use crate::vocabulary::Vocabulary;
use crate::words;

/// The four fixed vocabularies of one configuration.
///
/// Immutable once built; share it between classifiers with `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    revision: Revision,
    dialects: Vec<Dialect>,
    vocabularies: [Vocabulary; Category::COUNT],
}

impl Lexicon {
    /// Built-in tables for `revision`, without compiler extensions.
    pub fn new(revision: Revision) -> Self {
        Self::builder().revision(revision).build()
    }

    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::default()
    }

    pub fn from_data(data: &LexiconData) -> Result<Self, LexiconError> {
        if data.version != LEXICON_FORMAT_VERSION {
            return Err(LexiconError::UnsupportedVersion {
                found: data.version,
                expected: LEXICON_FORMAT_VERSION,
            });
        }

        let mut vocabularies: [Vocabulary; Category::COUNT] = Default::default();
        for entry in &data.vocabularies {
            let vocab = &mut vocabularies[entry.category.index()];
            for word in &entry.words {
                if word.is_empty() {
                    return Err(LexiconError::EmptyWord(entry.category));
                }
                vocab.insert(word);
            }
        }

        let mut dialects = data.dialects.clone();
        dialects.sort_unstable();
        dialects.dedup();

        let lexicon = Self {
            revision: data.revision,
            dialects,
            vocabularies,
        };
        lexicon.log_summary("document");
        Ok(lexicon)
    }

    /// Loads a binary lexicon produced by [`archive::encode`].
    pub fn from_archive(bytes: &[u8]) -> Result<Self, LexiconError> {
        Self::from_data(&archive::decode(bytes)?)
    }

    /// Converts back into a document. Words are sorted; `defined` is left empty.
    pub fn to_data(&self) -> LexiconData {
        let mut data = LexiconData::empty(self.revision);
        data.dialects = self.dialects.clone();
        data.vocabularies = Category::ALL
            .into_iter()
            .map(|category| VocabularyData {
                category,
                words: self
                    .vocabulary(category)
                    .sorted()
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
            })
            .collect();
        data
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn dialects(&self) -> &[Dialect] {
        &self.dialects
    }

    pub fn vocabulary(&self, category: Category) -> &Vocabulary {
        &self.vocabularies[category.index()]
    }

    pub fn contains(&self, category: Category, word: &str) -> bool {
        self.vocabulary(category).contains(word)
    }

    pub fn contains_any(&self, word: &str) -> bool {
        self.vocabularies.iter().any(|v| v.contains(word))
    }

    /// Every fixed category containing `word`.
    pub fn categories_of(&self, word: &str) -> CategoryFlags {
        Category::ALL
            .into_iter()
            .filter(|c| self.contains(*c, word))
            .fold(CategoryFlags::empty(), |acc, c| acc | c.flag())
    }

    fn log_summary(&self, source: &str) {
        debug!(
            "built {} lexicon from {}: {} standard, {} preprocessor, {} non-preprocessor, {} extension",
            self.revision,
            source,
            self.vocabulary(Category::Standard).len(),
            self.vocabulary(Category::PreprocessorOnly).len(),
            self.vocabulary(Category::NonPreprocessorOnly).len(),
            self.vocabulary(Category::CompilerExtension).len(),
        );
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(Revision::default())
    }
}

/// Assembles a [`Lexicon`] from the built-in tables plus custom words.
#[derive(Debug, Clone, Default)]
pub struct LexiconBuilder {
    revision: Revision,
    dialects: Vec<Dialect>,
    extra: Vec<(Category, String)>,
}

impl LexiconBuilder {
    pub fn revision(mut self, revision: Revision) -> Self {
        self.revision = revision;
        self
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        if !self.dialects.contains(&dialect) {
            self.dialects.push(dialect);
        }
        self
    }

    pub fn dialects(self, dialects: impl IntoIterator<Item = Dialect>) -> Self {
        dialects.into_iter().fold(self, Self::dialect)
    }

    /// Adds a custom word to a fixed vocabulary. Empty words are ignored.
    pub fn word(mut self, category: Category, word: impl Into<String>) -> Self {
        let word = word.into();
        if !word.is_empty() {
            self.extra.push((category, word));
        }
        self
    }

    pub fn build(mut self) -> Lexicon {
        self.dialects.sort_unstable();

        let mut vocabularies: [Vocabulary; Category::COUNT] = [
            words::standard(self.revision).collect(),
            words::preprocessor_only(self.revision).collect(),
            words::non_preprocessor_only(self.revision).collect(),
            self.dialects
                .iter()
                .flat_map(|d| words::compiler_extensions(*d).iter().copied())
                .collect(),
        ];
        for (category, word) in &self.extra {
            vocabularies[category.index()].insert(word);
        }

        let lexicon = Lexicon {
            revision: self.revision,
            dialects: self.dialects,
            vocabularies,
        };
        lexicon.log_summary("built-in tables");
        lexicon
    }
}
