//! Built-in word tables.
//!
//! Each table lists what a revision *adds*; a lexicon for revision R takes
//! the union of every table up to R.

use clex_protocol::{Dialect, Revision};

const STANDARD_C90: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do",
    "double", "else", "enum", "extern", "float", "for", "goto", "if",
    "int", "long", "register", "return", "short", "signed", "sizeof", "static",
    "struct", "switch", "typedef", "union", "unsigned", "void", "volatile", "while",
];

const STANDARD_C99: &[&str] = &["_Bool", "_Complex", "_Imaginary", "inline", "restrict"];

const STANDARD_C11: &[&str] = &[
    "_Alignas", "_Alignof", "_Atomic", "_Generic", "_Noreturn", "_Static_assert", "_Thread_local",
];

const STANDARD_C23: &[&str] = &[
    "alignas", "alignof", "bool", "constexpr", "false", "nullptr", "static_assert",
    "thread_local", "true", "typeof", "typeof_unqual", "_BitInt", "_Decimal32",
    "_Decimal64", "_Decimal128",
];

const PREPROCESSOR_C90: &[&str] = &[
    "define", "undef", "include", "if", "ifdef", "ifndef", "elif", "else", "endif",
    "line", "error", "pragma", "defined",
];

const PREPROCESSOR_C99: &[&str] = &["__VA_ARGS__"];

const PREPROCESSOR_C23: &[&str] = &[
    "elifdef", "elifndef", "embed", "warning", "__has_include", "__has_embed",
    "__has_c_attribute", "__VA_OPT__",
];

// _Pragma is the operator form of #pragma, only valid outside directives.
const NON_PREPROCESSOR_C99: &[&str] = &["_Pragma"];

const GNU_EXTENSIONS: &[&str] = &[
    "asm", "__asm", "__asm__", "__attribute", "__attribute__", "__extension__",
    "__typeof", "__typeof__", "__inline", "__inline__", "__restrict", "__restrict__",
    "__volatile", "__volatile__", "__const", "__const__", "__signed", "__signed__",
    "__label__", "__alignof", "__alignof__", "__auto_type", "__int128", "__thread",
    "__builtin_va_arg", "__builtin_offsetof", "__real__", "__imag__",
];

const MSVC_EXTENSIONS: &[&str] = &[
    "__asm", "__based", "__cdecl", "__declspec", "__except", "__fastcall", "__finally",
    "__forceinline", "__inline", "__int8", "__int16", "__int32", "__int64", "__leave",
    "__ptr32", "__ptr64", "__restrict", "__stdcall", "__try", "__unaligned", "__vectorcall",
];

fn standard_additions(revision: Revision) -> &'static [&'static str] {
    match revision {
        Revision::C90 => STANDARD_C90,
        Revision::C99 => STANDARD_C99,
        Revision::C11 => STANDARD_C11,
        Revision::C17 => &[],
        Revision::C23 => STANDARD_C23,
    }
}

fn preprocessor_additions(revision: Revision) -> &'static [&'static str] {
    match revision {
        Revision::C90 => PREPROCESSOR_C90,
        Revision::C99 => PREPROCESSOR_C99,
        Revision::C23 => PREPROCESSOR_C23,
        Revision::C11 | Revision::C17 => &[],
    }
}

fn non_preprocessor_additions(revision: Revision) -> &'static [&'static str] {
    match revision {
        Revision::C99 => NON_PREPROCESSOR_C99,
        _ => &[],
    }
}

pub(crate) fn standard(revision: Revision) -> impl Iterator<Item = &'static str> {
    revision.up_to().flat_map(|r| standard_additions(r).iter().copied())
}

pub(crate) fn preprocessor_only(revision: Revision) -> impl Iterator<Item = &'static str> {
    revision.up_to().flat_map(|r| preprocessor_additions(r).iter().copied())
}

pub(crate) fn non_preprocessor_only(revision: Revision) -> impl Iterator<Item = &'static str> {
    revision.up_to().flat_map(|r| non_preprocessor_additions(r).iter().copied())
}

pub(crate) fn compiler_extensions(dialect: Dialect) -> &'static [&'static str] {
    match dialect {
        Dialect::Gnu => GNU_EXTENSIONS,
        Dialect::Msvc => MSVC_EXTENSIONS,
    }
}
