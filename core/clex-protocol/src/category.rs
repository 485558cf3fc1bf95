use core::fmt;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

/// One of the fixed keyword vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Category {
    /// Keywords of the language proper, up to some revision.
    Standard = 0,
    /// Names that only mean something inside a preprocessing directive.
    PreprocessorOnly = 1,
    /// Keywords that only mean something outside preprocessing directives.
    NonPreprocessorOnly = 2,
    /// Compiler-specific keywords (GNU, MSVC).
    CompilerExtension = 3,
}

impl Category {
    pub const COUNT: usize = 4;

    pub const ALL: [Category; Category::COUNT] = [
        Category::Standard,
        Category::PreprocessorOnly,
        Category::NonPreprocessorOnly,
        Category::CompilerExtension,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::Standard => "standard",
            Category::PreprocessorOnly => "preprocessor",
            Category::NonPreprocessorOnly => "non-preprocessor",
            Category::CompilerExtension => "extension",
        }
    }

    /// The flag reported by a classification for this category.
    pub const fn flag(self) -> CategoryFlags {
        match self {
            Category::Standard => CategoryFlags::STANDARD,
            Category::PreprocessorOnly => CategoryFlags::PREPROCESSOR_ONLY,
            Category::NonPreprocessorOnly => CategoryFlags::NON_PREPROCESSOR_ONLY,
            Category::CompilerExtension => CategoryFlags::COMPILER_EXTENSION,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A revision of the C standard. Ordered by publication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Revision {
    C90 = 0,
    C99 = 1,
    C11 = 2,
    #[default]
    C17 = 3,
    C23 = 4,
}

impl Revision {
    pub const ALL: [Revision; 5] = [
        Revision::C90,
        Revision::C99,
        Revision::C11,
        Revision::C17,
        Revision::C23,
    ];

    /// Every revision up to and including `self`, oldest first.
    pub fn up_to(self) -> impl Iterator<Item = Revision> {
        Self::ALL.into_iter().take_while(move |r| *r <= self)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Revision::C90 => "C90",
            Revision::C99 => "C99",
            Revision::C11 => "C11",
            Revision::C17 => "C17",
            Revision::C23 => "C23",
        };
        f.write_str(s)
    }
}

/// A compiler family whose extension keywords can be enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Dialect {
    /// GCC and Clang.
    Gnu = 0,
    /// Microsoft Visual C.
    Msvc = 1,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Gnu => f.write_str("gnu"),
            Dialect::Msvc => f.write_str("msvc"),
        }
    }
}

bitflags! {
    /// Every vocabulary a word was found in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct CategoryFlags: u8 {
        const STANDARD = 1;
        const PREPROCESSOR_ONLY = 2;
        const NON_PREPROCESSOR_ONLY = 4;
        const COMPILER_EXTENSION = 8;

        // Extension vocabulary (#define'd names)
        const DEFINED = 16;
    }
}

impl CategoryFlags {
    /// The fixed categories contained in the set, in `Category::ALL` order.
    pub fn categories(self) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |c| self.contains(c.flag()))
    }
}
